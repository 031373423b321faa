//! Suggestion backends for the AI side of matching.
//!
//! A [`Suggester`] is a soft dependency: the engine works the same with the
//! [`NullSuggester`] as with the [`GenerativeSuggester`], it only returns
//! fewer results.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{Suggestion, SuggestionRequest};

/// Errors a suggestion backend may return
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Suggestion backend returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Malformed suggestion response: {0}")]
    MalformedResponse(String),
}

/// Best-effort source of ranked match suggestions
///
/// Results are untrusted: ids may be unknown, scores out of range.
#[async_trait]
pub trait Suggester: Send + Sync {
    async fn suggest(&self, request: &SuggestionRequest) -> Result<Vec<Suggestion>, ProviderError>;

    /// `false` lets the engine skip the call entirely
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Suggester for environments without a generative backend
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSuggester;

#[async_trait]
impl Suggester for NullSuggester {
    async fn suggest(&self, _request: &SuggestionRequest) -> Result<Vec<Suggestion>, ProviderError> {
        Ok(Vec::new())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Connection settings for an OpenAI-compatible chat completions API
#[derive(Debug, Clone)]
pub struct GenerativeSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
}

const SYSTEM_PROMPT: &str = "You are an assistant for a skill bartering marketplace. \
    You suggest barter partners whose skills complement the user's. \
    You MUST respond with a single JSON object only. \
    Do NOT use markdown code fences. \
    Only suggest user ids that appear in the candidate list.";

/// Suggester backed by a chat completions endpoint
#[derive(Clone)]
pub struct GenerativeSuggester {
    http: reqwest::Client,
    settings: GenerativeSettings,
}

impl std::fmt::Debug for GenerativeSuggester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerativeSuggester")
            .field("base_url", &self.settings.base_url)
            .field("model", &self.settings.model)
            .finish()
    }
}

impl GenerativeSuggester {
    pub fn new(settings: GenerativeSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl Suggester for GenerativeSuggester {
    async fn suggest(&self, request: &SuggestionRequest) -> Result<Vec<Suggestion>, ProviderError> {
        let body = serde_json::json!({
            "model": self.settings.model,
            "temperature": self.settings.temperature,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": build_prompt(request) },
            ],
        });

        let mut rb = self.http.post(self.completions_url()).json(&body);
        if let Some(key) = &self.settings.api_key {
            rb = rb.bearer_auth(key);
        }

        let response = rb.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            return Err(ProviderError::Api { status, body });
        }

        let json: serde_json::Value = response.json().await?;

        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| ProviderError::MalformedResponse("missing message content".into()))?;

        let suggestions = parse_suggestions(content)?;

        tracing::debug!("Suggestion backend returned {} entries", suggestions.len());

        Ok(suggestions)
    }
}

/// Render the user prompt for one request
pub fn build_prompt(request: &SuggestionRequest) -> String {
    let mut prompt = String::from(
        "Given a user's offered skills, desired skills and profile description, \
         suggest barter matches among the candidates below. Consider the relevance \
         and complementarity of skills. Give each suggestion a matchScore between 0 \
         and 1 and a short reason.\n\n",
    );

    prompt.push_str(&format!("Offered Skills: {}\n", request.offered_skills.join(", ")));
    prompt.push_str(&format!("Desired Skills: {}\n", request.desired_skills.join(", ")));
    prompt.push_str(&format!(
        "Profile Description: {}\n\n",
        request.profile_description.as_deref().unwrap_or("(none)")
    ));

    prompt.push_str("Candidates:\n");
    for entry in &request.roster {
        prompt.push_str(&format!(
            "- id={} name={} offers=[{}] wants=[{}]\n",
            entry.id,
            entry.name,
            entry.offers.join(", "),
            entry.wants.join(", ")
        ));
    }

    prompt.push_str(
        "\nRespond with JSON of the form \
         {\"suggestions\": [{\"userId\": \"...\", \"matchScore\": 0.0, \"reason\": \"...\"}]}",
    );

    prompt
}

#[derive(Deserialize)]
struct SuggestionEnvelope {
    suggestions: Vec<Suggestion>,
}

/// Parse model output into suggestions
///
/// Accepts the `{"suggestions": [...]}` object, a bare array, and either
/// wrapped in a markdown code fence.
pub fn parse_suggestions(content: &str) -> Result<Vec<Suggestion>, ProviderError> {
    let trimmed = strip_code_fence(content.trim());

    if let Ok(envelope) = serde_json::from_str::<SuggestionEnvelope>(trimmed) {
        return Ok(envelope.suggestions);
    }

    serde_json::from_str::<Vec<Suggestion>>(trimmed)
        .map_err(|e| ProviderError::MalformedResponse(e.to_string()))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
