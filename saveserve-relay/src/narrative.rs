//! Short "impact story" for a food item, written by a generative model.
//!
//! Prompt construction is pure ([`impact_prompt`]); the model call sits
//! behind [`NarrativeModel`] so tests never reach a real service. The
//! narrator never fails: any error degrades to a fixed sentence.

use async_trait::async_trait;
use reqwest::Client;
use saveserve_core::config::NarrativeConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{RelayError, Result};

const SERVICE: &str = "gemini";

/// Returned when the model answers with no text.
pub const EMPTY_FALLBACK: &str = "Shared food is the oldest form of community.";

/// Returned when the call fails.
pub const ERROR_FALLBACK: &str = "The impact is greater than the sum of its calories. It is dignity.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeRequest {
    pub model: String,
    pub prompt: String,
}

/// Model used when no other one is configured.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Build the request for `food_item`.
pub fn impact_prompt(food_item: &str) -> NarrativeRequest {
    let prompt = format!(
        "The user has entered a food item that is typically wasted: \"{item}\".\n\
         \n\
         TASK: Act as a poetic, observational narrator.\n\
         GOAL: Describe the human moment of this food being shared instead of wasted.\n\
         \n\
         STRICT RULES:\n\
         - Do NOT use statistics, numbers, or percentages.\n\
         - Do NOT mention \"saving the planet\" or \"carbon footprint\".\n\
         - Focus ONLY on the human sensation: warmth, relief, taste, dignity.\n\
         - Maximum 2 sentences.\n\
         - Tone: Quiet, dignified, hopeful.\n\
         \n\
         Example Input: \"Leftover Sandwiches\"\n\
         Example Output: \"A surprise lunch for three strangers who become neighbors over shared bread. \
         The quiet relief of a full stomach.\"",
        item = food_item
    );
    NarrativeRequest {
        model: DEFAULT_MODEL.to_string(),
        prompt,
    }
}

/// A text generation backend.
#[async_trait]
pub trait NarrativeModel: Send + Sync {
    /// Generated text, or `None` when the model produced nothing.
    async fn generate(&self, request: &NarrativeRequest) -> Result<Option<String>>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// Gemini `generateContent` REST client.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Reads API_KEY (or GEMINI_API_KEY) from the environment.
    pub fn from_env(config: &NarrativeConfig) -> Result<Self> {
        let api_key = std::env::var("API_KEY")
            .or_else(|_| std::env::var("GEMINI_API_KEY"))
            .map_err(|_| RelayError::MissingApiKey { var: "API_KEY" })?;
        Ok(Self::new(api_key, config.base_url.clone()))
    }
}

#[async_trait]
impl NarrativeModel for GeminiClient {
    async fn generate(&self, request: &NarrativeRequest) -> Result<Option<String>> {
        let url = format!("{}/models/{}:generateContent", self.base_url, request.model);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| RelayError::network("narrative generation", e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(RelayError::rejected(SERVICE, status.as_u16(), &text));
        }

        let data: GenerateResponse = response.json().await.map_err(|e| RelayError::Decode {
            service: SERVICE,
            reason: e.to_string(),
        })?;
        Ok(data.text())
    }
}

/// Best-effort narrator: always returns a sentence.
pub struct ImpactNarrator<M> {
    model: M,
    model_name: String,
}

impl<M: NarrativeModel> ImpactNarrator<M> {
    pub fn new(model: M, model_name: impl Into<String>) -> Self {
        Self {
            model,
            model_name: model_name.into(),
        }
    }

    pub async fn story(&self, food_item: &str) -> String {
        let request = NarrativeRequest {
            model: self.model_name.clone(),
            ..impact_prompt(food_item)
        };
        match self.model.generate(&request).await {
            Ok(Some(text)) => {
                debug!(chars = text.len(), "narrative generated");
                text
            }
            Ok(None) => EMPTY_FALLBACK.to_string(),
            Err(err) => {
                warn!(error = %err, "narrative generation failed, using fallback");
                ERROR_FALLBACK.to_string()
            }
        }
    }
}
