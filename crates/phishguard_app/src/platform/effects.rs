use std::thread;
use std::time::Duration;

use guard_logging::guard_info;
use phishguard_core::{Effect, Msg};
use phishguard_engine::{AnalysisRequest, EngineEvent, EngineHandle, RequestId};
use phishguard_report::ScanHistoryItem;
use uuid::Uuid;

use super::persistence::HistoryStore;

/// Bridges core effects to the engine and the durable history store.
pub(crate) struct EffectRunner {
    engine: EngineHandle,
    store: HistoryStore,
}

impl EffectRunner {
    pub(crate) fn new(engine: EngineHandle, store: HistoryStore) -> Self {
        Self { engine, store }
    }

    pub(crate) fn load_history(&self) -> Vec<ScanHistoryItem> {
        self.store.load()
    }

    /// Executes effects, returning any follow-up messages.
    ///
    /// An analyze effect blocks until the engine reports completion; the
    /// shell forbids a second submission while one is in flight, so at most
    /// one call is ever pending.
    pub(crate) fn run(&self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::Analyze {
                    request_id,
                    content,
                    kind,
                } => {
                    guard_info!(
                        "Analyze request_id={} kind={:?} content_len={}",
                        request_id,
                        kind,
                        content.len()
                    );
                    self.engine.submit(request_id, AnalysisRequest { content, kind });
                    follow_ups.push(self.await_completion());
                }
                Effect::PersistHistory(snapshot) => {
                    self.store.save(&snapshot);
                }
                Effect::ClearHistory => {
                    self.store.clear();
                }
            }
        }
        follow_ups
    }

    fn await_completion(&self) -> Msg {
        loop {
            if let Some(event) = self.engine.try_recv() {
                let EngineEvent::AnalysisCompleted { request_id, result } = event;
                return completion_msg(request_id, result);
            }
            thread::sleep(Duration::from_millis(20));
        }
    }
}

fn completion_msg(
    request_id: RequestId,
    result: Result<phishguard_report::AnalysisResult, phishguard_engine::AnalysisError>,
) -> Msg {
    match result {
        Ok(result) => Msg::AnalysisCompleted {
            request_id,
            // Scan ids are stamped here so the core stays deterministic.
            scan_id: Uuid::new_v4().to_string(),
            result,
        },
        Err(err) => Msg::AnalysisFailed {
            request_id,
            message: err.user_message().to_string(),
        },
    }
}
