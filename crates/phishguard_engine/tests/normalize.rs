use phishguard_engine::{normalize_reply, AnalysisError, GenerateContentResponse};
use phishguard_report::{RiskLevel, ScanKind};
use pretty_assertions::assert_eq;
use serde_json::json;

fn analysis_text(score: f64) -> String {
    json!({
        "isPhishing": true,
        "confidenceScore": score,
        "riskLevel": "High",
        "threatsDetected": [{
            "name": "Urgency pressure",
            "severity": "Medium",
            "description": "Demands immediate action"
        }],
        "summary": "Suspicious message",
        "recommendations": ["Delete it"],
        "extractedLinks": []
    })
    .to_string()
}

fn reply_with(text: &str, grounding: serde_json::Value) -> GenerateContentResponse {
    serde_json::from_value(json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }] },
            "groundingMetadata": grounding,
        }]
    }))
    .unwrap()
}

#[test]
fn normalizes_a_structured_reply() {
    let reply = reply_with(
        &analysis_text(86.4),
        json!({
            "groundingChunks": [
                { "web": { "uri": "https://intel.example.com/report", "title": "Threat Report" } },
                { "web": { "uri": "https://no-title.example.com" } },
                { "web": { "uri": "", "title": "Empty locator" } },
                { "web": { "title": "Missing locator" } },
                {}
            ]
        }),
    );

    let result = normalize_reply(reply, ScanKind::Content).unwrap();
    assert!(result.is_phishing);
    assert_eq!(result.confidence_score, 86);
    assert_eq!(result.risk_level, RiskLevel::High);
    assert_eq!(result.threats_detected.len(), 1);
    assert!(!result.is_simulation);

    // Only entries with a usable locator survive; missing titles default.
    assert_eq!(result.grounding_sources.len(), 2);
    assert_eq!(result.grounding_sources[0].title, "Threat Report");
    assert_eq!(result.grounding_sources[1].title, "External Source");
}

#[test]
fn simulation_replies_never_carry_grounding() {
    let reply = reply_with(
        &analysis_text(70.0),
        json!({
            "groundingChunks": [
                { "web": { "uri": "https://intel.example.com/report", "title": "Attached anyway" } }
            ]
        }),
    );

    let result = normalize_reply(reply, ScanKind::Simulation).unwrap();
    assert!(result.is_simulation);
    assert!(result.grounding_sources.is_empty());
}

#[test]
fn scores_are_rounded_and_clamped() {
    for (raw, expected) in [(86.4, 86u8), (99.6, 100), (250.0, 100), (-5.0, 0)] {
        let reply = reply_with(&analysis_text(raw), json!({ "groundingChunks": [] }));
        let result = normalize_reply(reply, ScanKind::Content).unwrap();
        assert_eq!(result.confidence_score, expected, "raw score {raw}");
    }
}

#[test]
fn unparseable_text_is_an_invalid_response() {
    let reply = reply_with("this is not json", json!({ "groundingChunks": [] }));
    let err = normalize_reply(reply, ScanKind::Content).unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidResponse(_)));
    assert_eq!(
        err.user_message(),
        "Analysis failed. The security engine could not process the request."
    );
}

#[test]
fn empty_replies_are_rejected() {
    let empty: GenerateContentResponse =
        serde_json::from_value(json!({ "candidates": [] })).unwrap();
    assert!(matches!(
        normalize_reply(empty, ScanKind::Content),
        Err(AnalysisError::EmptyReply)
    ));

    let blank = reply_with("   ", json!({ "groundingChunks": [] }));
    assert!(matches!(
        normalize_reply(blank, ScanKind::Content),
        Err(AnalysisError::EmptyReply)
    ));
}
