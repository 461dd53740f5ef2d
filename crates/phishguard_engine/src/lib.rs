//! PhishGuard engine: analysis client and effect execution.
mod client;
mod engine;
mod parse;
mod persist;
mod prompt;
mod types;

pub use client::{Analyzer, AnalyzerSettings, GeminiAnalyzer, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use engine::EngineHandle;
pub use parse::{normalize_reply, GenerateContentResponse};
pub use persist::{ensure_data_dir, AtomicFileWriter, PersistError};
pub use prompt::{
    build_request_body, user_prompt, DETECTION_INSTRUCTION, SIMULATION_INSTRUCTION,
};
pub use types::{
    AnalysisError, AnalysisRequest, EngineEvent, RequestId, ANALYSIS_FAILED_MESSAGE,
};
