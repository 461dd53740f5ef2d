use phishguard_report::{AnalysisResult, ScanHistoryItem, ScanKind};

use crate::history;
use crate::view_model::{AppViewModel, HistoryRowView, Tone};

pub type RequestId = u64;

/// Shown when the URL tab's input fails the syntactic check.
pub const INVALID_URL_MESSAGE: &str =
    "Please enter a valid URL (e.g., https://example.com or domain.com)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ActiveScan {
    pub request_id: RequestId,
    /// Raw submitted input, kept for the history excerpt.
    pub submitted: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    active_tab: ScanKind,
    content_input: String,
    url_input: String,
    simulation_input: String,
    in_flight: Option<ActiveScan>,
    result: Option<AnalysisResult>,
    error: Option<String>,
    history: Vec<ScanHistoryItem>,
    search_term: String,
    expanded_entry: Option<String>,
    next_request_id: RequestId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            active_tab: ScanKind::Content,
            content_input: String::new(),
            url_input: String::new(),
            simulation_input: String::new(),
            in_flight: None,
            result: None,
            error: None,
            history: Vec::new(),
            search_term: String::new(),
            expanded_entry: None,
            next_request_id: 1,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_tab(&self) -> ScanKind {
        self.active_tab
    }

    pub fn is_scanning(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn input(&self, kind: ScanKind) -> &str {
        match kind {
            ScanKind::Content => &self.content_input,
            ScanKind::Url => &self.url_input,
            ScanKind::Simulation => &self.simulation_input,
        }
    }

    pub(crate) fn select_tab(&mut self, kind: ScanKind) {
        self.active_tab = kind;
        // Switching tabs discards any pending input error.
        self.error = None;
        self.mark_dirty();
    }

    pub(crate) fn set_input(&mut self, kind: ScanKind, text: String) {
        match kind {
            ScanKind::Content => self.content_input = text,
            ScanKind::Url => {
                self.url_input = text;
                // Editing the URL clears a stale validation error.
                self.error = None;
            }
            ScanKind::Simulation => self.simulation_input = text,
        }
        self.mark_dirty();
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.mark_dirty();
    }

    /// Records the in-flight scan and returns its request id. Clears the
    /// previous error and result so no partial output lingers.
    pub(crate) fn begin_scan(&mut self, submitted: String) -> RequestId {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.error = None;
        self.result = None;
        self.in_flight = Some(ActiveScan {
            request_id,
            submitted,
        });
        self.mark_dirty();
        request_id
    }

    /// Takes the in-flight scan if its id matches; stale completions from
    /// an earlier scan are ignored.
    pub(crate) fn take_matching_scan(&mut self, request_id: RequestId) -> Option<ActiveScan> {
        if self
            .in_flight
            .as_ref()
            .is_some_and(|scan| scan.request_id == request_id)
        {
            self.mark_dirty();
            self.in_flight.take()
        } else {
            None
        }
    }

    pub(crate) fn set_result(&mut self, result: AnalysisResult) {
        self.result = Some(result);
        self.mark_dirty();
    }

    pub(crate) fn record_item(&mut self, item: ScanHistoryItem) {
        self.history = history::record(std::mem::take(&mut self.history), item);
        self.mark_dirty();
    }

    pub fn history_snapshot(&self) -> Vec<ScanHistoryItem> {
        self.history.clone()
    }

    pub(crate) fn restore_history(&mut self, items: Vec<ScanHistoryItem>) {
        self.history = items;
        self.history.truncate(history::HISTORY_LIMIT);
        self.mark_dirty();
    }

    pub(crate) fn clear_history(&mut self) {
        self.history.clear();
        self.expanded_entry = None;
        self.mark_dirty();
    }

    /// Copies the stored result of one entry into the displayed result slot.
    pub(crate) fn redisplay_entry(&mut self, id: &str) {
        if let Some(item) = self.history.iter().find(|item| item.id == id) {
            self.result = Some(item.result.clone());
            self.mark_dirty();
        }
    }

    pub(crate) fn toggle_entry(&mut self, id: &str) {
        if self.expanded_entry.as_deref() == Some(id) {
            self.expanded_entry = None;
        } else {
            self.expanded_entry = Some(id.to_string());
        }
        self.mark_dirty();
    }

    pub(crate) fn set_search_term(&mut self, term: String) {
        self.search_term = term;
        self.mark_dirty();
    }

    pub(crate) fn reset_inputs(&mut self) {
        self.content_input.clear();
        self.url_input.clear();
        self.simulation_input.clear();
        self.result = None;
        self.error = None;
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns and resets the dirty flag; the shell renders only when it
    /// was set.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        let rows = history::filter_history(&self.history, &self.search_term)
            .into_iter()
            .map(|item| HistoryRowView {
                id: item.id.clone(),
                excerpt: item.content.clone(),
                risk_label: item.result.risk_level.label(),
                tone: Tone::for_result(&item.result),
                is_simulation: item.result.is_simulation,
                timestamp: item.timestamp,
                expanded: self.expanded_entry.as_deref() == Some(item.id.as_str()),
                threats: item.result.threats_detected.clone(),
            })
            .collect();

        AppViewModel {
            active_tab: self.active_tab,
            scanning: self.is_scanning(),
            result: self.result.clone(),
            error: self.error.clone(),
            history: rows,
            history_total: self.history.len(),
            search_term: self.search_term.clone(),
            dirty: self.dirty,
        }
    }
}
