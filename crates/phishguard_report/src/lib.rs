//! Shared analysis report model.
//!
//! These types describe the normalized outcome of one analysis call and the
//! locally persisted scan history built from it. Field names serialize as
//! camelCase to stay compatible with the inference service's JSON schema and
//! with snapshots written by earlier builds.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ordered severity scale used for both real threats and simulated
/// persuasion tactics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What kind of input the user submitted.
///
/// `Content` and `Url` both run the detection profile; `Simulation` runs the
/// training critique profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanKind {
    Content,
    Url,
    Simulation,
}

impl ScanKind {
    pub fn mode(self) -> AnalysisMode {
        match self {
            ScanKind::Content | ScanKind::Url => AnalysisMode::Detection,
            ScanKind::Simulation => AnalysisMode::Simulation,
        }
    }

    pub fn is_simulation(self) -> bool {
        self.mode() == AnalysisMode::Simulation
    }
}

/// The two fixed instruction profiles the external model can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    Detection,
    Simulation,
}

/// One threat (or persuasion tactic, in simulation mode) named by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedThreat {
    pub name: String,
    pub severity: RiskLevel,
    pub description: String,
}

/// A link the model pulled out of the submitted content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedLink {
    pub url: String,
    pub is_suspicious: bool,
    pub reason: String,
}

/// A citation substantiating a detection-mode verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

/// Fallback title for citations the service returns without one.
pub const DEFAULT_SOURCE_TITLE: &str = "External Source";

/// The normalized outcome of one analysis call.
///
/// `confidence_score` is overloaded by mode: risk probability in detection
/// mode, deception effectiveness in simulation mode. `analyzed_at` and
/// `is_simulation` are stamped locally, never requested from the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub is_phishing: bool,
    /// 0..=100, clamped during normalization.
    pub confidence_score: u8,
    pub risk_level: RiskLevel,
    /// Model output order, never re-sorted.
    pub threats_detected: Vec<DetailedThreat>,
    pub summary: String,
    pub recommendations: Vec<String>,
    pub extracted_links: Vec<ExtractedLink>,
    /// Always empty when `is_simulation` is true.
    #[serde(default)]
    pub grounding_sources: Vec<GroundingSource>,
    pub analyzed_at: DateTime<Utc>,
    pub is_simulation: bool,
}

/// One persisted entry of the bounded scan history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanHistoryItem {
    /// Locally generated, unique per scan.
    pub id: String,
    /// First 100 characters of the raw submitted input.
    pub content: String,
    pub result: AnalysisResult,
    pub timestamp: DateTime<Utc>,
}
