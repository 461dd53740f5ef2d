use std::time::Duration;

use guard_logging::guard_debug;
use phishguard_report::AnalysisResult;

use crate::parse::{normalize_reply, GenerateContentResponse};
use crate::prompt::build_request_body;
use crate::{AnalysisError, AnalysisRequest};

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct AnalyzerSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl AnalyzerSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// The single seam to the external inference service: submit a request,
/// await the normalized structured reply. Tests substitute a fake.
#[async_trait::async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError>;
}

/// `reqwest`-backed analyzer speaking the Gemini `generateContent` REST API.
/// One best-effort call per request; no retries, no rate limiting.
#[derive(Debug, Clone)]
pub struct GeminiAnalyzer {
    settings: AnalyzerSettings,
    client: reqwest::Client,
}

impl GeminiAnalyzer {
    pub fn new(settings: AnalyzerSettings) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| AnalysisError::Network(err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }
}

#[async_trait::async_trait]
impl Analyzer for GeminiAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        if self.settings.api_key.is_empty() {
            return Err(AnalysisError::MissingApiKey);
        }

        let body = build_request_body(request);
        guard_debug!(
            "Submitting {:?} analysis, content_len={}",
            request.kind,
            request.content.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.settings.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::HttpStatus(status.as_u16()));
        }

        let reply: GenerateContentResponse =
            response.json().await.map_err(map_reqwest_error)?;
        normalize_reply(reply, request.kind)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> AnalysisError {
    if err.is_timeout() {
        return AnalysisError::Timeout;
    }
    if err.is_decode() {
        return AnalysisError::InvalidResponse(err.to_string());
    }
    AnalysisError::Network(err.to_string())
}
