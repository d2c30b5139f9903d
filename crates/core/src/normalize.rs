//! Normalization of salvaged slide records into a presentation draft.
//!
//! Fills in the optional fields every renderer expects and rejects a draft
//! that ends up with no slides. Text cleanup (NFC, whitespace collapsing,
//! blank bullet removal) is available but off by default, so well-formed
//! records pass through unchanged.

use crate::types::{PresentationDraft, SlideDraft, SlideRecord};
use crate::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Regex to collapse any whitespace run, newlines included.
static WHITESPACE_COLLAPSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Regex to collapse spaces and tabs only, for text that keeps its line breaks.
static INLINE_WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

/// Normalizer for salvaged slide records.
#[derive(Debug, Clone, Default)]
pub struct SlideNormalizer {
    /// Whether to clean up text fields.
    clean_text: bool,
}

impl SlideNormalizer {
    /// Create a normalizer that only applies field defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to clean up text fields while normalizing.
    pub fn with_clean_text(mut self, clean: bool) -> Self {
        self.clean_text = clean;
        self
    }

    /// Turn records into a draft, applying defaults to missing fields.
    ///
    /// Records whose title is blank (after cleanup, if enabled) are dropped.
    /// Fails with [`Error::EmptyPresentation`] when nothing is left.
    pub fn normalize(&self, records: Vec<SlideRecord>) -> Result<PresentationDraft> {
        let slides: Vec<SlideDraft> = records
            .into_iter()
            .filter_map(|record| self.normalize_record(record))
            .collect();

        if slides.is_empty() {
            log::warn!("Normalization left no slides");
            return Err(Error::EmptyPresentation);
        }

        Ok(PresentationDraft::from_slides(slides))
    }

    /// Normalize one record, or `None` if it has no usable title.
    pub fn normalize_record(&self, record: SlideRecord) -> Option<SlideDraft> {
        let title = self.single_line(record.title);
        if title.trim().is_empty() {
            return None;
        }

        let bullets = record
            .bullets
            .unwrap_or_default()
            .into_iter()
            .map(|b| self.single_line(b))
            .filter(|b| !self.clean_text || !b.is_empty())
            .collect();

        let image_prompt = match record.image_prompt {
            Some(prompt) => self.single_line(prompt),
            None => title.clone(),
        };

        let speaker_notes = record
            .speaker_notes
            .map(|notes| self.multi_line(notes))
            .unwrap_or_default();

        Some(SlideDraft {
            title,
            bullets,
            image_prompt,
            speaker_notes,
        })
    }

    /// Clean a field that renders on one line.
    fn single_line(&self, text: String) -> String {
        if !self.clean_text {
            return text;
        }
        let composed: String = text.nfc().collect();
        WHITESPACE_COLLAPSE_REGEX
            .replace_all(composed.trim(), " ")
            .into_owned()
    }

    /// Clean a field that keeps its line breaks.
    fn multi_line(&self, text: String) -> String {
        if !self.clean_text {
            return text;
        }
        let composed: String = text.nfc().collect();
        composed
            .replace("\r\n", "\n")
            .lines()
            .map(|line| INLINE_WHITESPACE_REGEX.replace_all(line, " ").trim().to_string())
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}

/// Normalize with defaults only.
pub fn normalize(records: Vec<SlideRecord>) -> Result<PresentationDraft> {
    SlideNormalizer::new().normalize(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str) -> SlideRecord {
        SlideRecord {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_for_title_only_record() {
        let draft = normalize(vec![record("Intro")]).unwrap();
        let slide = &draft.slides()[0];

        assert_eq!(slide.title, "Intro");
        assert!(slide.bullets.is_empty());
        assert_eq!(slide.image_prompt, "Intro");
        assert_eq!(slide.speaker_notes, "");
    }

    #[test]
    fn test_present_fields_are_kept() {
        let input = SlideRecord {
            title: "Growth".to_string(),
            bullets: Some(vec!["  Revenue up ".to_string()]),
            image_prompt: Some("chart going up".to_string()),
            speaker_notes: Some("Pause here".to_string()),
        };
        let draft = normalize(vec![input]).unwrap();
        let slide = &draft.slides()[0];

        assert_eq!(slide.bullets, vec!["  Revenue up "]);
        assert_eq!(slide.image_prompt, "chart going up");
        assert_eq!(slide.speaker_notes, "Pause here");
    }

    #[test]
    fn test_order_is_preserved() {
        let draft = normalize(vec![record("One"), record("Two"), record("Three")]).unwrap();
        let titles: Vec<&str> = draft.iter().map(|s| s.title.as_str()).collect();

        assert_eq!(titles, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = normalize(Vec::new()).unwrap_err();
        assert!(matches!(err, Error::EmptyPresentation));
    }

    #[test]
    fn test_blank_titles_are_dropped() {
        let draft = normalize(vec![record("  "), record("Kept")]).unwrap();
        assert_eq!(draft.len(), 1);

        let err = normalize(vec![record("")]).unwrap_err();
        assert!(matches!(err, Error::EmptyPresentation));
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        let normalizer = SlideNormalizer::new().with_clean_text(true);
        let input = SlideRecord {
            title: "  Market\n   Overview ".to_string(),
            bullets: Some(vec![
                "First\t\tpoint".to_string(),
                "   ".to_string(),
                "Second point".to_string(),
            ]),
            image_prompt: None,
            speaker_notes: Some("Line  one\r\n  Line two  ".to_string()),
        };
        let slide = normalizer.normalize_record(input).unwrap();

        assert_eq!(slide.title, "Market Overview");
        assert_eq!(slide.bullets, vec!["First point", "Second point"]);
        assert_eq!(slide.image_prompt, "Market Overview");
        assert_eq!(slide.speaker_notes, "Line one\nLine two");
    }

    #[test]
    fn test_clean_text_composes_unicode() {
        let normalizer = SlideNormalizer::new().with_clean_text(true);
        // "e" followed by a combining acute accent.
        let slide = normalizer.normalize_record(record("Caf\u{0065}\u{0301}")).unwrap();

        assert_eq!(slide.title, "Caf\u{00e9}");
    }

    #[test]
    fn test_clean_text_drops_whitespace_title() {
        let normalizer = SlideNormalizer::new().with_clean_text(true);
        assert!(normalizer.normalize_record(record("\n\t")).is_none());
    }
}
