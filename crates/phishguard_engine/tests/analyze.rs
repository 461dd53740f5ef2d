use phishguard_engine::{
    AnalysisError, AnalysisRequest, Analyzer, AnalyzerSettings, GeminiAnalyzer,
    ANALYSIS_FAILED_MESSAGE,
};
use phishguard_report::{RiskLevel, ScanKind};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/v1beta/models/gemini-3-flash-preview:generateContent";

fn settings_for(server: &MockServer) -> AnalyzerSettings {
    let mut settings = AnalyzerSettings::new("test-key");
    settings.base_url = server.uri();
    settings
}

fn service_reply() -> Value {
    let analysis = json!({
        "isPhishing": true,
        "confidenceScore": 97,
        "riskLevel": "Critical",
        "threatsDetected": [{
            "name": "Credential harvesting",
            "severity": "Critical",
            "description": "Asks the reader to verify their account"
        }],
        "summary": "Credential phishing attempt",
        "recommendations": ["Do not click the link", "Report to IT"],
        "extractedLinks": [{
            "url": "http://secure-login.example-scam.com",
            "isSuspicious": true,
            "reason": "Lookalike login domain"
        }]
    });
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": analysis.to_string() }] },
            "groundingMetadata": {
                "groundingChunks": [
                    { "web": { "uri": "https://intel.example.com/report", "title": "Threat Report" } },
                    { "web": { "uri": "", "title": "Dropped" } }
                ]
            }
        }]
    })
}

async fn received_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    serde_json::from_slice(&requests[0].body).expect("json body")
}

#[tokio::test]
async fn detection_scan_attaches_web_search_and_normalizes_the_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(service_reply()))
        .mount(&server)
        .await;

    let analyzer = GeminiAnalyzer::new(settings_for(&server)).unwrap();
    let request = AnalysisRequest {
        content: "Dear user, verify your account now: http://secure-login.example-scam.com"
            .to_string(),
        kind: ScanKind::Content,
    };

    let result = analyzer.analyze(&request).await.expect("analysis ok");
    assert!(result.is_phishing);
    assert_eq!(result.confidence_score, 97);
    assert_eq!(result.risk_level, RiskLevel::Critical);
    assert!(!result.is_simulation);
    assert_eq!(result.grounding_sources.len(), 1);
    assert_eq!(
        result.grounding_sources[0].uri,
        "https://intel.example.com/report"
    );

    let body = received_body(&server).await;
    assert!(body["tools"][0]["google_search"].is_object());
    assert_eq!(
        body["contents"][0]["parts"][0]["text"],
        json!(request.content)
    );
    let instruction = body["systemInstruction"]["parts"][0]["text"]
        .as_str()
        .unwrap();
    assert!(instruction.contains("phishing indicators"));
    assert_eq!(
        body["generationConfig"]["responseMimeType"],
        "application/json"
    );
}

#[tokio::test]
async fn url_scan_issues_the_real_time_verification_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(service_reply()))
        .mount(&server)
        .await;

    let analyzer = GeminiAnalyzer::new(settings_for(&server)).unwrap();
    let request = AnalysisRequest {
        content: "google.com".to_string(),
        kind: ScanKind::Url,
    };
    analyzer.analyze(&request).await.expect("analysis ok");

    let body = received_body(&server).await;
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.starts_with("Perform a real-time security check for the URL: google.com"));
    assert!(body["tools"][0]["google_search"].is_object());
}

#[tokio::test]
async fn simulation_scan_requests_no_tools_and_strips_grounding() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(service_reply()))
        .mount(&server)
        .await;

    let analyzer = GeminiAnalyzer::new(settings_for(&server)).unwrap();
    let request = AnalysisRequest {
        content: "Your mailbox is full, click here to keep receiving mail".to_string(),
        kind: ScanKind::Simulation,
    };

    let result = analyzer.analyze(&request).await.expect("analysis ok");
    assert!(result.is_simulation);
    // Even though the canned reply attached grounding metadata.
    assert!(result.grounding_sources.is_empty());

    let body = received_body(&server).await;
    assert_eq!(body["tools"], json!([]));
    let instruction = body["systemInstruction"]["parts"][0]["text"]
        .as_str()
        .unwrap();
    assert!(instruction.contains("security awareness training"));
}

#[tokio::test]
async fn http_failure_maps_to_the_generic_user_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let analyzer = GeminiAnalyzer::new(settings_for(&server)).unwrap();
    let request = AnalysisRequest {
        content: "anything".to_string(),
        kind: ScanKind::Content,
    };

    let err = analyzer.analyze(&request).await.unwrap_err();
    assert_eq!(err, AnalysisError::HttpStatus(500));
    assert_eq!(err.user_message(), ANALYSIS_FAILED_MESSAGE);
}

#[tokio::test]
async fn unparseable_reply_text_fails_without_surfacing_parser_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "I cannot comply with that request." }] }
            }]
        })))
        .mount(&server)
        .await;

    let analyzer = GeminiAnalyzer::new(settings_for(&server)).unwrap();
    let request = AnalysisRequest {
        content: "anything".to_string(),
        kind: ScanKind::Content,
    };

    let err = analyzer.analyze(&request).await.unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidResponse(_)));
    assert_eq!(err.user_message(), ANALYSIS_FAILED_MESSAGE);
}

#[tokio::test]
async fn missing_api_key_fails_before_any_call() {
    let server = MockServer::start().await;
    let mut settings = settings_for(&server);
    settings.api_key = String::new();

    let analyzer = GeminiAnalyzer::new(settings).unwrap();
    let request = AnalysisRequest {
        content: "anything".to_string(),
        kind: ScanKind::Content,
    };

    let err = analyzer.analyze(&request).await.unwrap_err();
    assert_eq!(err, AnalysisError::MissingApiKey);
    assert!(server.received_requests().await.unwrap().is_empty());
}
