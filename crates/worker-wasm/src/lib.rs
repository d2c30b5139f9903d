//! WASM-compatible wrapper for slide salvage.
//!
//! This crate exposes the salvage pipeline and prompt builder to JavaScript
//! so the browser front end can turn a model response into slides without a
//! round trip to the server.

use deck_core::{
    extract_message_content, GenerationRequest, ModelChoice, OutlineFormatter, SalvagePath,
    SlideDraft, SlideNormalizer, SlideSalvager,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Result of salvaging a model response.
#[derive(Debug, Serialize, Deserialize)]
pub struct SalvageResult {
    /// Title of the opening slide, for naming the download.
    pub deck_title: String,
    /// Slides in display order.
    pub slides: Vec<SlideDraft>,
    /// "parsed" or "partially_recovered".
    pub path: String,
    /// Records dropped for being unparseable or missing a title.
    pub discarded: usize,
    /// Plain-text preview of the deck.
    pub outline: String,
    /// Set when the response had to be repaired.
    pub warning: Option<String>,
}

/// Prompt and request body for one generation request.
#[derive(Debug, Serialize, Deserialize)]
pub struct PromptResult {
    pub prompt: String,
    pub max_tokens: usize,
    pub api_url: String,
    /// JSON request body, serialized.
    pub body: String,
}

/// Salvage slides from a model response.
///
/// # Arguments
/// * `raw` - The model's text, or the full response body when `envelope` is set
/// * `envelope` - Whether `raw` is a chat-completions response body
/// * `clean` - Whether to collapse whitespace in slide text
///
/// # Returns
/// A JavaScript object with the salvage result, or throws the user-facing
/// failure message.
#[wasm_bindgen]
pub fn salvage_response(raw: &str, envelope: bool, clean: bool) -> Result<JsValue, JsValue> {
    let result = salvage_response_impl(raw, envelope, clean).map_err(|e| JsValue::from_str(&e))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn salvage_response_impl(raw: &str, envelope: bool, clean: bool) -> Result<SalvageResult, String> {
    let text = if envelope {
        extract_message_content(raw).map_err(|e| e.to_string())?
    } else {
        raw.to_string()
    };

    let salvager =
        SlideSalvager::new().with_normalizer(SlideNormalizer::new().with_clean_text(clean));
    let salvaged = salvager.salvage(&text).map_err(|e| e.user_message())?;

    let outline = OutlineFormatter::new().format(&salvaged.draft);
    let (path, warning) = match salvaged.path {
        SalvagePath::Parsed => ("parsed", None),
        SalvagePath::PartiallyRecovered => (
            "partially_recovered",
            Some(
                "The response was malformed; only complete slides were kept.".to_string(),
            ),
        ),
    };

    let deck_title = salvaged
        .draft
        .title_slide()
        .map(|s| s.title.clone())
        .unwrap_or_default();

    Ok(SalvageResult {
        deck_title,
        slides: salvaged.draft.into_slides(),
        path: path.to_string(),
        discarded: salvaged.discarded,
        outline,
        warning,
    })
}

/// Build the prompt and request body for a generation request.
///
/// # Arguments
/// * `request` - A `GenerationRequest`-shaped object; missing fields take defaults
/// * `model` - Model id such as "claude-sonnet" or "groq-llama"
#[wasm_bindgen]
pub fn build_prompt(request: JsValue, model: &str) -> Result<JsValue, JsValue> {
    let request: GenerationRequest = serde_wasm_bindgen::from_value(request)
        .map_err(|e| JsValue::from_str(&format!("Invalid request: {}", e)))?;

    let result = build_prompt_impl(&request, model).map_err(|e| JsValue::from_str(&e))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn build_prompt_impl(request: &GenerationRequest, model: &str) -> Result<PromptResult, String> {
    request.validate().map_err(|e| e.to_string())?;

    let model: ModelChoice = serde_json::from_value(serde_json::Value::String(model.to_string()))
        .map_err(|_| format!("Unknown model: {}", model))?;

    let prompt = request.build_prompt();
    let max_tokens = request.max_tokens();
    let body = model.chat_request(&prompt, max_tokens).to_string();

    Ok(PromptResult {
        prompt,
        max_tokens,
        api_url: model.config().api_url.to_string(),
        body,
    })
}
