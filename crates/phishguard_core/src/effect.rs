use phishguard_report::{ScanHistoryItem, ScanKind};

use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Submit `content` to the analysis client.
    Analyze {
        request_id: RequestId,
        content: String,
        kind: ScanKind,
    },
    /// Persist the given snapshot as the new durable history.
    PersistHistory(Vec<ScanHistoryItem>),
    /// Erase the persisted history snapshot.
    ClearHistory,
}
