use phishguard_report::{AnalysisMode, ScanKind};
use serde_json::{json, Value};

use crate::AnalysisRequest;

/// Detection profile: real-time identity and reputation verification with
/// tightly calibrated risk scores.
pub const DETECTION_INSTRUCTION: &str = "\
You are a senior cybersecurity analyst specializing in NLP and real-time threat intelligence.
Your task is to analyze the provided text or URL for phishing indicators using your internal knowledge and the web search tool.

CRITICAL INSTRUCTIONS FOR EXACT DATA:
1. When a URL is provided, use web search to verify its domain age, official status, and if it appears on any threat blacklists.
2. DO NOT default to a \"safe\" score like 85%. If a domain is 100% verified as official (e.g., google.com, amazon.com), the confidenceScore (RISK) MUST be 0-1%.
3. If a domain is definitely a known phishing site, the confidenceScore MUST be 95-100%.
4. \"confidenceScore\" in this schema represents the PROBABILITY OF THREAT (Risk Level).
5. For \"threatsDetected\", provide specific details based on real-time findings.
Return a valid JSON object matching the requested schema.";

/// Simulation profile: red-team critique of a drafted training message.
/// Never performs real identity checks.
pub const SIMULATION_INSTRUCTION: &str = "\
You are a \"Red Team\" social engineering expert providing security awareness training.
Your task is to analyze a \"draft\" phishing message provided by a student and evaluate its effectiveness.
1. Rate the \"Deception Score\" (0-100) based on how likely a typical employee is to fall for it.
2. Identify \"Persuasion Tactics\" used, providing a severity and description.
3. Provide a \"Critique\" in the summary.
4. Suggest \"Improvements\" to make it more deceptive for training purposes.
Return a valid JSON object matching the requested schema.";

/// The text actually sent as the user turn. URL scans get wrapped in an
/// explicit real-time verification request; everything else goes verbatim.
pub fn user_prompt(request: &AnalysisRequest) -> String {
    match request.kind {
        ScanKind::Url => format!(
            "Perform a real-time security check for the URL: {}. \
             Use search to verify the site's identity, age, and reputation. \
             Provide exact data, not a general estimate.",
            request.content
        ),
        ScanKind::Content | ScanKind::Simulation => request.content.clone(),
    }
}

/// Builds the full `generateContent` request body.
///
/// Detection requests attach the web-search tool; simulation requests attach
/// no tools, so no grounding is ever solicited for them.
pub fn build_request_body(request: &AnalysisRequest) -> Value {
    let instruction = match request.kind.mode() {
        AnalysisMode::Detection => DETECTION_INSTRUCTION,
        AnalysisMode::Simulation => SIMULATION_INSTRUCTION,
    };

    let tools = match request.kind.mode() {
        AnalysisMode::Detection => json!([{ "google_search": {} }]),
        AnalysisMode::Simulation => json!([]),
    };

    let score_description = match request.kind.mode() {
        AnalysisMode::Detection => "Risk Percentage (0-100)",
        AnalysisMode::Simulation => "Deception Score",
    };

    json!({
        "systemInstruction": {
            "parts": [{ "text": instruction }]
        },
        "contents": [{
            "role": "user",
            "parts": [{ "text": user_prompt(request) }]
        }],
        "tools": tools,
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema(score_description),
        }
    })
}

/// Mirrors `AnalysisResult` minus the locally stamped fields
/// (`groundingSources`, `analyzedAt`, `isSimulation`).
fn response_schema(score_description: &str) -> Value {
    let risk_levels = ["Low", "Medium", "High", "Critical"];
    json!({
        "type": "OBJECT",
        "properties": {
            "isPhishing": { "type": "BOOLEAN" },
            "confidenceScore": { "type": "NUMBER", "description": score_description },
            "riskLevel": { "type": "STRING", "enum": risk_levels },
            "threatsDetected": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "severity": { "type": "STRING", "enum": risk_levels },
                        "description": { "type": "STRING" }
                    },
                    "required": ["name", "severity", "description"]
                }
            },
            "summary": { "type": "STRING" },
            "recommendations": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "extractedLinks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "url": { "type": "STRING" },
                        "isSuspicious": { "type": "BOOLEAN" },
                        "reason": { "type": "STRING" }
                    },
                    "required": ["url", "isSuspicious", "reason"]
                }
            }
        },
        "required": [
            "isPhishing",
            "confidenceScore",
            "riskLevel",
            "threatsDetected",
            "summary",
            "recommendations",
            "extractedLinks"
        ]
    })
}
