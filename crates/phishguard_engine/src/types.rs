use phishguard_report::{AnalysisResult, ScanKind};
use thiserror::Error;

pub type RequestId = u64;

/// One unit of work for the analysis client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// Raw submitted content, URL or draft message.
    pub content: String,
    pub kind: ScanKind,
}

/// The single generic message shown for any transport or parse failure.
/// Detail stays in the log; partial results are never rendered.
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Analysis failed. The security engine could not process the request.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("api key is not configured")]
    MissingApiKey,
    #[error("inference service returned http status {0}")]
    HttpStatus(u16),
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("reply carried no analysis text")]
    EmptyReply,
    #[error("reply did not match the expected shape: {0}")]
    InvalidResponse(String),
}

impl AnalysisError {
    /// What the user sees. Every failure collapses to one generic message.
    pub fn user_message(&self) -> &'static str {
        ANALYSIS_FAILED_MESSAGE
    }
}

#[derive(Debug)]
pub enum EngineEvent {
    AnalysisCompleted {
        request_id: RequestId,
        result: Result<AnalysisResult, AnalysisError>,
    },
}
