use std::sync::{mpsc, Arc};
use std::thread;

use guard_logging::guard_warn;

use crate::client::{Analyzer, AnalyzerSettings, GeminiAnalyzer};
use crate::{AnalysisError, AnalysisRequest, EngineEvent, RequestId};

enum EngineCommand {
    Submit {
        request_id: RequestId,
        request: AnalysisRequest,
    },
}

/// Handle to the background analysis worker.
///
/// Commands go in over a channel; completions come back as [`EngineEvent`]s
/// polled with `try_recv`. The worker owns a tokio runtime so callers stay
/// synchronous. Two submissions in flight at once complete in no guaranteed
/// order; the caller's UI contract prevents that in practice.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: AnalyzerSettings) -> Result<Self, AnalysisError> {
        let analyzer: Arc<dyn Analyzer> = Arc::new(GeminiAnalyzer::new(settings)?);
        Ok(Self::with_analyzer(analyzer))
    }

    /// Runs the worker against any analyzer; tests pass a canned fake.
    pub fn with_analyzer(analyzer: Arc<dyn Analyzer>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let analyzer = analyzer.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(analyzer.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn submit(&self, request_id: RequestId, request: AnalysisRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Submit {
            request_id,
            request,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    analyzer: &dyn Analyzer,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit {
            request_id,
            request,
        } => {
            let result = analyzer.analyze(&request).await;
            if let Err(err) = &result {
                guard_warn!("Analysis {} failed: {}", request_id, err);
            }
            let _ = event_tx.send(EngineEvent::AnalysisCompleted { request_id, result });
        }
    }
}
