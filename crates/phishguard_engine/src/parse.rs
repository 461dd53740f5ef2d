use chrono::Utc;
use phishguard_report::{
    AnalysisResult, DetailedThreat, ExtractedLink, GroundingSource, RiskLevel, ScanKind,
    DEFAULT_SOURCE_TITLE,
};
use serde::Deserialize;

use crate::AnalysisError;

/// Wire shape of a `generateContent` reply, limited to the fields the
/// normalizer reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebSource {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// The JSON document the model is asked to emit as its reply text.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireAnalysis {
    is_phishing: bool,
    confidence_score: f64,
    risk_level: RiskLevel,
    threats_detected: Vec<DetailedThreat>,
    summary: String,
    recommendations: Vec<String>,
    extracted_links: Vec<ExtractedLink>,
}

/// Turns a raw service reply into an [`AnalysisResult`].
///
/// Parse failures carry the underlying detail for the log; callers surface
/// only the generic user message. `analyzed_at` and `is_simulation` are
/// stamped here, and grounding is forced empty for simulation scans no
/// matter what the service attached.
pub fn normalize_reply(
    reply: GenerateContentResponse,
    kind: ScanKind,
) -> Result<AnalysisResult, AnalysisError> {
    let candidate = reply
        .candidates
        .into_iter()
        .next()
        .ok_or(AnalysisError::EmptyReply)?;

    let text = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(AnalysisError::EmptyReply);
    }

    let wire: WireAnalysis = serde_json::from_str(&text)
        .map_err(|err| AnalysisError::InvalidResponse(err.to_string()))?;

    let grounding_sources = if kind.is_simulation() {
        Vec::new()
    } else {
        extract_grounding(candidate.grounding_metadata)
    };

    Ok(AnalysisResult {
        is_phishing: wire.is_phishing,
        confidence_score: clamp_score(wire.confidence_score),
        risk_level: wire.risk_level,
        threats_detected: wire.threats_detected,
        summary: wire.summary,
        recommendations: wire.recommendations,
        extracted_links: wire.extracted_links,
        grounding_sources,
        analyzed_at: Utc::now(),
        is_simulation: kind.is_simulation(),
    })
}

/// Citation entries lacking a usable locator are dropped; missing titles
/// fall back to the default.
fn extract_grounding(metadata: Option<GroundingMetadata>) -> Vec<GroundingSource> {
    metadata
        .map(|meta| meta.grounding_chunks)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|chunk| chunk.web)
        .filter_map(|web| {
            let uri = web.uri.filter(|uri| !uri.is_empty())?;
            Some(GroundingSource {
                title: web
                    .title
                    .filter(|title| !title.is_empty())
                    .unwrap_or_else(|| DEFAULT_SOURCE_TITLE.to_string()),
                uri,
            })
        })
        .collect()
}

fn clamp_score(raw: f64) -> u8 {
    raw.round().clamp(0.0, 100.0) as u8
}
