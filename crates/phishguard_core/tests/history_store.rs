use chrono::Utc;
use phishguard_core::{excerpt, filter_history, record, EXCERPT_CHARS, HISTORY_LIMIT};
use phishguard_report::{AnalysisResult, RiskLevel, ScanHistoryItem};

fn sample_item(id: &str, content: &str, risk: RiskLevel, simulation: bool) -> ScanHistoryItem {
    ScanHistoryItem {
        id: id.to_string(),
        content: content.to_string(),
        result: AnalysisResult {
            is_phishing: risk >= RiskLevel::High,
            confidence_score: 50,
            risk_level: risk,
            threats_detected: Vec::new(),
            summary: String::new(),
            recommendations: Vec::new(),
            extracted_links: Vec::new(),
            grounding_sources: Vec::new(),
            analyzed_at: Utc::now(),
            is_simulation: simulation,
        },
        timestamp: Utc::now(),
    }
}

#[test]
fn record_evicts_the_oldest_beyond_the_limit() {
    let mut history = Vec::new();
    for n in 1..=11 {
        let item = sample_item(&format!("id-{n}"), &format!("scan {n}"), RiskLevel::Low, false);
        history = record(history, item);
    }

    assert_eq!(history.len(), HISTORY_LIMIT);
    assert_eq!(history.first().unwrap().id, "id-11");
    assert_eq!(history.last().unwrap().id, "id-2");
}

#[test]
fn blank_term_returns_everything_in_order() {
    let items = vec![
        sample_item("a", "first", RiskLevel::Low, false),
        sample_item("b", "second", RiskLevel::High, false),
    ];

    let all = filter_history(&items, "");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, "a");
    assert_eq!(all[1].id, "b");

    let padded = filter_history(&items, "   ");
    assert_eq!(padded.len(), 2);
}

#[test]
fn filter_matches_risk_label_case_insensitively() {
    let items = vec![
        sample_item("a", "verify your account", RiskLevel::Critical, false),
        sample_item("b", "team lunch friday", RiskLevel::Low, false),
    ];

    let hits = filter_history(&items, "CRITICAL");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "a");
}

#[test]
fn filter_matches_content_and_simulation_keyword() {
    let items = vec![
        sample_item("a", "reset your password", RiskLevel::Medium, false),
        sample_item("b", "training draft", RiskLevel::High, true),
    ];

    let by_content = filter_history(&items, "password");
    assert_eq!(by_content.len(), 1);
    assert_eq!(by_content[0].id, "a");

    // Simulation entries match any prefix of the word itself.
    let by_mode = filter_history(&items, "simu");
    assert_eq!(by_mode.len(), 1);
    assert_eq!(by_mode[0].id, "b");

    assert!(filter_history(&items, "no such thing").is_empty());
}

#[test]
fn excerpt_truncates_on_character_boundaries() {
    let short = "hello";
    assert_eq!(excerpt(short), "hello");

    let long = "x".repeat(250);
    assert_eq!(excerpt(&long).chars().count(), EXCERPT_CHARS);

    // Multi-byte characters must not be split.
    let wide = "é".repeat(150);
    let cut = excerpt(&wide);
    assert_eq!(cut.chars().count(), EXCERPT_CHARS);
}
