use phishguard_report::{AnalysisResult, ScanHistoryItem, ScanKind};

use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User switched to another scan tab.
    TabSelected(ScanKind),
    /// User edited the input buffer of a tab.
    InputChanged(ScanKind, String),
    /// User submitted the active tab's input for analysis.
    ScanSubmitted,
    /// Engine finished an analysis successfully.
    AnalysisCompleted {
        request_id: RequestId,
        /// Locally generated id for the resulting history entry.
        scan_id: String,
        result: AnalysisResult,
    },
    /// Engine reported a failed analysis; `message` is already user-facing.
    AnalysisFailed {
        request_id: RequestId,
        message: String,
    },
    /// Restore persisted history at startup.
    HistoryRestored(Vec<ScanHistoryItem>),
    /// User re-selected a history entry to redisplay its result.
    HistoryEntrySelected { id: String },
    /// User expanded or collapsed a history entry's threat breakdown.
    HistoryEntryToggled { id: String },
    /// User edited the history search box.
    SearchTermChanged(String),
    /// User asked to wipe the history.
    ClearHistoryClicked,
    /// User reset all inputs and the displayed result.
    ResetClicked,
}
