//! Generation requests and the prompt sent to the content provider.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Fewest slides a request may ask for.
pub const MIN_SLIDES: usize = 5;

/// Most slides a request may ask for.
pub const MAX_SLIDES: usize = 30;

/// Output token ceiling for any request.
const MAX_OUTPUT_TOKENS: usize = 4000;

/// Parameters collected from the user for one deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationRequest {
    pub topic: String,
    pub category: String,
    pub slide_count: usize,
    pub tone: String,
    pub audience: String,
    /// Free-form points the user wants covered.
    pub key_points: String,
    pub language: String,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            topic: String::new(),
            category: "Business".to_string(),
            slide_count: 10,
            tone: "Professional".to_string(),
            audience: String::new(),
            key_points: String::new(),
            language: "English".to_string(),
        }
    }
}

impl GenerationRequest {
    /// Create a request for a topic with default settings.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Default::default()
        }
    }

    /// Set the number of slides.
    pub fn with_slide_count(mut self, count: usize) -> Self {
        self.slide_count = count;
        self
    }

    /// Set the output language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the points the deck must cover.
    pub fn with_key_points(mut self, points: impl Into<String>) -> Self {
        self.key_points = points.into();
        self
    }

    /// Check that the request can be sent.
    pub fn validate(&self) -> Result<()> {
        if self.topic.trim().is_empty() {
            return Err(Error::InvalidRequest("topic is empty".to_string()));
        }
        if !(MIN_SLIDES..=MAX_SLIDES).contains(&self.slide_count) {
            return Err(Error::InvalidRequest(format!(
                "slide count {} is outside {}..={}",
                self.slide_count, MIN_SLIDES, MAX_SLIDES
            )));
        }
        Ok(())
    }

    /// Output token budget: 350 per slide plus 500, capped at 4000.
    pub fn max_tokens(&self) -> usize {
        (self.slide_count * 350 + 500).min(MAX_OUTPUT_TOKENS)
    }

    /// Render the instruction text for the model.
    pub fn build_prompt(&self) -> String {
        let topic = self.topic.trim();
        let mut prompt = String::new();

        if !self.language.trim().is_empty() && !self.language.eq_ignore_ascii_case("english") {
            prompt.push_str(&format!(
                "Generate ALL content in {} language.\n",
                self.language.trim()
            ));
        }

        prompt.push_str(&format!(
            "Create a {}-slide presentation about: {}\n",
            self.slide_count, topic
        ));
        prompt.push_str(&format!(
            "Category: {} | Tone: {} | Audience: {}\n",
            self.category, self.tone, self.audience
        ));
        if !self.key_points.trim().is_empty() {
            prompt.push_str(&format!("Include these points: {}\n", self.key_points.trim()));
        }

        prompt.push_str(&format!(
            r#"
Return ONLY valid JSON (no markdown):
{{"slides": [
  {{
    "title": "Main Title",
    "bullets": [],
    "image_prompt": "professional {topic}",
    "speaker_notes": "Introduction"
  }},
  {{
    "title": "Key Point",
    "bullets": ["Point 1", "Point 2", "Point 3"],
    "image_prompt": "{topic} concept",
    "speaker_notes": "Explain points"
  }}
]}}

CRITICAL:
1. First slide: TITLE ONLY (empty bullets)
2. Other slides: 3-5 bullets each
3. Complete sentences (8-15 words)
4. Total: exactly {count} slides
5. Return ONLY JSON

Generate now:"#,
            topic = topic,
            count = self.slide_count
        ));

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_tokens_scales_and_caps() {
        assert_eq!(GenerationRequest::new("x").with_slide_count(5).max_tokens(), 2250);
        assert_eq!(GenerationRequest::new("x").with_slide_count(10).max_tokens(), 4000);
        assert_eq!(GenerationRequest::new("x").with_slide_count(30).max_tokens(), 4000);
    }

    #[test]
    fn test_validate() {
        assert!(GenerationRequest::new("AI in Healthcare").validate().is_ok());
        assert!(GenerationRequest::new("   ").validate().is_err());
        assert!(GenerationRequest::new("x").with_slide_count(4).validate().is_err());
        assert!(GenerationRequest::new("x").with_slide_count(31).validate().is_err());
    }

    #[test]
    fn test_prompt_mentions_request_fields() {
        let prompt = GenerationRequest::new("AI in Healthcare")
            .with_slide_count(7)
            .with_key_points("- Diagnostics\n- Cost")
            .build_prompt();

        assert!(prompt.starts_with("Create a 7-slide presentation about: AI in Healthcare\n"));
        assert!(prompt.contains("Category: Business | Tone: Professional"));
        assert!(prompt.contains("Include these points: - Diagnostics\n- Cost"));
        assert!(prompt.contains("\"image_prompt\": \"professional AI in Healthcare\""));
        assert!(prompt.contains("4. Total: exactly 7 slides"));
        assert!(!prompt.contains("language."));
    }

    #[test]
    fn test_prompt_language_instruction() {
        let prompt = GenerationRequest::new("Rust").with_language("Spanish").build_prompt();
        assert!(prompt.starts_with("Generate ALL content in Spanish language.\n"));
    }

    #[test]
    fn test_prompt_example_is_valid_slides_json() {
        let prompt = GenerationRequest::new("Rust").build_prompt();
        let start = prompt.find("{\"slides\"").unwrap();
        let end = prompt.find("]}").unwrap() + 2;

        let draft = crate::salvage_slides(&prompt[start..end]).unwrap();
        assert_eq!(draft.len(), 2);
        assert!(draft.slides()[0].is_title_only());
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let request: GenerationRequest =
            serde_json::from_str(r#"{"topic": "Ocean", "slide_count": 6}"#).unwrap();

        assert_eq!(request.topic, "Ocean");
        assert_eq!(request.slide_count, 6);
        assert_eq!(request.language, "English");
    }
}
