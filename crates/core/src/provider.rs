//! Content-provider catalogue and chat-completion envelopes.
//!
//! No requests are sent from here. This only knows which endpoint, model id
//! and API key belong to each model choice, how to shape the request body,
//! and where the drafted text sits in the response.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const GROQ_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// A model the user can pick for drafting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelChoice {
    #[default]
    ClaudeSonnet,
    GeminiFlash,
    LlamaSmall,
    Mistral,
    GroqLlama,
    GroqMixtral,
}

/// Where and how to reach a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub api_url: &'static str,
    pub model: &'static str,
    pub env_var: &'static str,
}

impl ModelChoice {
    /// Every choice, in menu order.
    pub const ALL: [ModelChoice; 6] = [
        ModelChoice::ClaudeSonnet,
        ModelChoice::GeminiFlash,
        ModelChoice::LlamaSmall,
        ModelChoice::Mistral,
        ModelChoice::GroqLlama,
        ModelChoice::GroqMixtral,
    ];

    pub fn config(&self) -> ProviderConfig {
        match self {
            ModelChoice::ClaudeSonnet => ProviderConfig {
                api_url: OPENROUTER_URL,
                model: "anthropic/claude-3.5-sonnet",
                env_var: "OPENROUTER_API_KEY",
            },
            ModelChoice::GeminiFlash => ProviderConfig {
                api_url: OPENROUTER_URL,
                model: "google/gemini-2.0-flash-exp:free",
                env_var: "OPENROUTER_API_KEY",
            },
            ModelChoice::LlamaSmall => ProviderConfig {
                api_url: OPENROUTER_URL,
                model: "meta-llama/llama-3.2-3b-instruct:free",
                env_var: "OPENROUTER_API_KEY",
            },
            ModelChoice::Mistral => ProviderConfig {
                api_url: OPENROUTER_URL,
                model: "mistralai/mistral-7b-instruct:free",
                env_var: "OPENROUTER_API_KEY",
            },
            ModelChoice::GroqLlama => ProviderConfig {
                api_url: GROQ_URL,
                model: "llama-3.3-70b-versatile",
                env_var: "GROQ_API_KEY",
            },
            ModelChoice::GroqMixtral => ProviderConfig {
                api_url: GROQ_URL,
                model: "mixtral-8x7b-32768",
                env_var: "GROQ_API_KEY",
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModelChoice::ClaudeSonnet => "Claude 3.5 Sonnet",
            ModelChoice::GeminiFlash => "Gemini 2.0 Flash",
            ModelChoice::LlamaSmall => "Llama 3.2 3B",
            ModelChoice::Mistral => "Mistral 7B",
            ModelChoice::GroqLlama => "Llama 3.3 70B (Groq)",
            ModelChoice::GroqMixtral => "Mixtral 8x7B (Groq)",
        }
    }

    /// Read the API key for this choice from the environment.
    pub fn api_key(&self) -> Result<String> {
        let env_var = self.config().env_var;
        match std::env::var(env_var) {
            Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Err(Error::MissingApiKey {
                env_var: env_var.to_string(),
            }),
        }
    }

    /// Chat-completions request body for a single user prompt.
    pub fn chat_request(&self, prompt: &str, max_tokens: usize) -> Value {
        json!({
            "model": self.config().model,
            "max_tokens": max_tokens,
            "messages": [{"role": "user", "content": prompt}],
        })
    }
}

/// Pull the assistant text out of a chat-completions response body.
pub fn extract_message_content(body: &str) -> Result<String> {
    let response: Value = serde_json::from_str(body)?;

    response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            Error::InvalidResponse("missing choices[0].message.content".to_string())
        })
}
