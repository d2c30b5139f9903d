//! Domain types for drafted slide content.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single slide as drafted by the model, with every field populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideDraft {
    /// Slide heading. Never empty.
    pub title: String,

    /// Bullet lines in display order. Empty for the title slide.
    pub bullets: Vec<String>,

    /// Phrase used to search for an illustrative photo.
    pub image_prompt: String,

    /// Presenter notes attached to the slide.
    pub speaker_notes: String,
}

impl SlideDraft {
    /// Create a slide with only a title, using the default for every other field.
    pub fn titled(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            image_prompt: title.clone(),
            title,
            bullets: Vec::new(),
            speaker_notes: String::new(),
        }
    }

    /// True when the slide carries no bullet lines.
    pub fn is_title_only(&self) -> bool {
        self.bullets.is_empty()
    }
}

/// An ordered, immutable deck of drafted slides.
///
/// Only built through the normalizer, so it is never empty and every slide
/// has a non-empty title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresentationDraft {
    slides: Vec<SlideDraft>,
}

impl PresentationDraft {
    pub(crate) fn from_slides(slides: Vec<SlideDraft>) -> Self {
        debug_assert!(!slides.is_empty());
        debug_assert!(slides.iter().all(|s| !s.title.trim().is_empty()));
        Self { slides }
    }

    /// Slides in display order.
    pub fn slides(&self) -> &[SlideDraft] {
        &self.slides
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always false for a draft returned by the pipeline.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Iterate over slides in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, SlideDraft> {
        self.slides.iter()
    }

    /// The opening slide.
    pub fn title_slide(&self) -> Option<&SlideDraft> {
        self.slides.first()
    }

    /// Hand the slides over to a renderer.
    pub fn into_slides(self) -> Vec<SlideDraft> {
        self.slides
    }

    /// Serialize as `{"slides": [...]}`.
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<'a> IntoIterator for &'a PresentationDraft {
    type Item = &'a SlideDraft;
    type IntoIter = std::slice::Iter<'a, SlideDraft>;

    fn into_iter(self) -> Self::IntoIter {
        self.slides.iter()
    }
}

/// A slide record as it came out of the model response, before defaults.
///
/// Optional fields stay `None` when the record did not carry them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlideRecord {
    pub title: String,
    pub bullets: Option<Vec<String>>,
    pub image_prompt: Option<String>,
    pub speaker_notes: Option<String>,
}

impl SlideRecord {
    /// Read a record out of a parsed JSON value.
    ///
    /// Returns `None` unless the value is an object with a usable `title`.
    /// Unknown keys are ignored.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        let title = object.get("title").and_then(title_text)?;
        if title.trim().is_empty() {
            return None;
        }

        let bullets = match object.get("bullets") {
            Some(Value::Array(items)) => Some(items.iter().filter_map(scalar_text).collect()),
            Some(Value::String(single)) => Some(vec![single.clone()]),
            _ => None,
        };

        Some(Self {
            title,
            bullets,
            image_prompt: object.get("image_prompt").and_then(scalar_text),
            speaker_notes: object.get("speaker_notes").and_then(scalar_text),
        })
    }
}

/// Titles may be strings or numbers only.
fn title_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Text for strings, numbers and booleans; nothing for the rest.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
