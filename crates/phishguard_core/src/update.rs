use phishguard_report::{ScanHistoryItem, ScanKind};

use crate::{history, is_valid_url, AppState, Effect, Msg, INVALID_URL_MESSAGE};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::TabSelected(kind) => {
            state.select_tab(kind);
            Vec::new()
        }
        Msg::InputChanged(kind, text) => {
            state.set_input(kind, text);
            Vec::new()
        }
        Msg::ScanSubmitted => submit_scan(&mut state),
        Msg::AnalysisCompleted {
            request_id,
            scan_id,
            result,
        } => {
            let Some(scan) = state.take_matching_scan(request_id) else {
                return (state, Vec::new());
            };
            let item = ScanHistoryItem {
                id: scan_id,
                content: history::excerpt(&scan.submitted),
                timestamp: result.analyzed_at,
                result: result.clone(),
            };
            state.set_result(result);
            state.record_item(item);
            vec![Effect::PersistHistory(state.history_snapshot())]
        }
        Msg::AnalysisFailed {
            request_id,
            message,
        } => {
            // Failed scans are reported, never recorded.
            if state.take_matching_scan(request_id).is_some() {
                state.set_error(message);
            }
            Vec::new()
        }
        Msg::HistoryRestored(items) => {
            state.restore_history(items);
            Vec::new()
        }
        Msg::HistoryEntrySelected { id } => {
            state.redisplay_entry(&id);
            Vec::new()
        }
        Msg::HistoryEntryToggled { id } => {
            state.toggle_entry(&id);
            Vec::new()
        }
        Msg::SearchTermChanged(term) => {
            state.set_search_term(term);
            Vec::new()
        }
        Msg::ClearHistoryClicked => {
            state.clear_history();
            vec![Effect::ClearHistory]
        }
        Msg::ResetClicked => {
            state.reset_inputs();
            Vec::new()
        }
    };

    (state, effects)
}

fn submit_scan(state: &mut AppState) -> Vec<Effect> {
    // The UI contract forbids a second submission while one is in flight.
    if state.is_scanning() {
        return Vec::new();
    }

    let kind = state.active_tab();
    let submitted = state.input(kind).trim().to_string();
    // Blank input is silently ignored: no call, no error.
    if submitted.is_empty() {
        return Vec::new();
    }

    if kind == ScanKind::Url && !is_valid_url(&submitted) {
        state.set_error(INVALID_URL_MESSAGE);
        return Vec::new();
    }

    let request_id = state.begin_scan(submitted.clone());
    vec![Effect::Analyze {
        request_id,
        content: submitted,
        kind,
    }]
}
