//! External analysis generation.
//!
//! The generator is a single-method capability so providers can be swapped
//! without touching the orchestrator. The shipped implementation speaks the
//! Gemini `generateContent` REST shape.

use super::types::GeneratedAnalysis;
use crate::config::GeneratorConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Capability interface: structured prompt in, structured analysis out.
///
/// Implementations own their transport, timeout, and output normalization.
/// Errors are recovered by the orchestrator with a deterministic fallback,
/// never shown to the end user as a hard failure.
pub trait AnalysisGenerator: Send + Sync {
    /// Provider identifier for logs (e.g. "gemini").
    fn name(&self) -> &str;

    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<GeneratedAnalysis>> + Send + 'a>>;
}

// ─── Gemini wire types ──────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// Gemini-backed generator with a bounded request timeout and no retries.
pub struct GeminiGenerator {
    api_key: Option<String>,
    model: String,
    base_url: String,
    temperature: f64,
    client: Client,
}

impl GeminiGenerator {
    /// Create a generator from config. The API key falls back to the
    /// `GEMINI_API_KEY` environment variable.
    pub fn new(config: &GeneratorConfig) -> Self {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok());
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            temperature: config.temperature,
            client,
        }
    }

    fn api_key(&self) -> anyhow::Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "Gemini API key not found; set generator.api_key or the GEMINI_API_KEY env var"
            )
        })
    }

    fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: 8192,
            },
        }
    }

    fn extract_text(result: &GenerateContentResponse) -> anyhow::Result<String> {
        let text = result
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .map(|candidate| {
                let mut out = String::new();
                for part in &candidate.content.parts {
                    if let Some(t) = &part.text {
                        if !out.is_empty() {
                            out.push('\n');
                        }
                        out.push_str(t);
                    }
                }
                out
            })
            .unwrap_or_default();

        if text.is_empty() {
            anyhow::bail!("no response from Gemini");
        }
        Ok(text)
    }
}

impl AnalysisGenerator for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<GeneratedAnalysis>> + Send + 'a>> {
        Box::pin(async move {
            let key = self.api_key()?;
            let url = format!(
                "{}/models/{}:generateContent?key={}",
                self.base_url, self.model, key
            );
            let request = self.build_request(prompt);

            let response = self.client.post(url).json(&request).send().await?;
            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                anyhow::bail!("Gemini API error ({status}): {body}");
            }

            let result: GenerateContentResponse = response.json().await?;
            let text = Self::extract_text(&result)?;
            parse_generated(&text)
        })
    }
}

/// Strip optional markdown code fences around a JSON payload.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Parse generator output, tolerating fences and missing fields.
fn parse_generated(text: &str) -> anyhow::Result<GeneratedAnalysis> {
    let payload = strip_code_fences(text);
    serde_json::from_str(payload)
        .map_err(|e| anyhow::anyhow!("unparseable generator output: {e}"))
}
