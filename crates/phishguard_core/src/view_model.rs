use chrono::{DateTime, Utc};
use phishguard_report::{AnalysisResult, DetailedThreat, RiskLevel, ScanKind};

/// Display descriptor for a result's risk tag, replacing per-widget
/// color/icon lookups in the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Safe,
    Caution,
    Elevated,
    Severe,
    Training,
}

impl Tone {
    pub fn for_result(result: &AnalysisResult) -> Self {
        if result.is_simulation {
            return Tone::Training;
        }
        match result.risk_level {
            RiskLevel::Low => Tone::Safe,
            RiskLevel::Medium => Tone::Caution,
            RiskLevel::High => Tone::Elevated,
            RiskLevel::Critical => Tone::Severe,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRowView {
    pub id: String,
    pub excerpt: String,
    pub risk_label: &'static str,
    pub tone: Tone,
    pub is_simulation: bool,
    pub timestamp: DateTime<Utc>,
    pub expanded: bool,
    pub threats: Vec<DetailedThreat>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub active_tab: ScanKind,
    pub scanning: bool,
    pub result: Option<AnalysisResult>,
    pub error: Option<String>,
    /// History rows after applying the search term.
    pub history: Vec<HistoryRowView>,
    /// Size of the unfiltered history.
    pub history_total: usize,
    pub search_term: String,
    pub dirty: bool,
}
