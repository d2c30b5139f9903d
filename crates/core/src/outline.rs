//! Plain-text outline output.
//!
//! Renders a draft as numbered slides separated by blank lines, for
//! previewing a deck before it goes to the deck writer.

use crate::types::{PresentationDraft, SlideDraft};

/// Formatter for plain-text outlines.
#[derive(Debug, Clone)]
pub struct OutlineFormatter {
    /// Whether to print speaker notes under each slide.
    include_notes: bool,
    /// Whether to print the image search phrase under each slide.
    include_image_prompts: bool,
}

impl Default for OutlineFormatter {
    fn default() -> Self {
        Self {
            include_notes: true,
            include_image_prompts: false,
        }
    }
}

impl OutlineFormatter {
    /// Create a formatter that includes notes but not image prompts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to include speaker notes.
    pub fn with_notes(mut self, include: bool) -> Self {
        self.include_notes = include;
        self
    }

    /// Set whether to include image search phrases.
    pub fn with_image_prompts(mut self, include: bool) -> Self {
        self.include_image_prompts = include;
        self
    }

    /// Format a whole draft.
    ///
    /// # Example output
    /// ```text
    /// 1. AI in Healthcare
    ///
    /// 2. Diagnostics
    ///    - Models read scans in seconds
    ///    - Doctors confirm the findings
    ///    Notes: Mention the pilot study
    /// ```
    pub fn format(&self, draft: &PresentationDraft) -> String {
        draft
            .iter()
            .enumerate()
            .map(|(idx, slide)| self.format_slide(idx + 1, slide))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Format and add a trailing newline.
    pub fn format_with_newline(&self, draft: &PresentationDraft) -> String {
        format!("{}\n", self.format(draft))
    }

    /// Format one slide under its 1-based number.
    pub fn format_slide(&self, number: usize, slide: &SlideDraft) -> String {
        let mut lines = vec![format!("{}. {}", number, slide.title)];

        lines.extend(slide.bullets.iter().map(|b| format!("   - {}", b)));

        if self.include_image_prompts && !slide.image_prompt.is_empty() {
            lines.push(format!("   Image: {}", slide.image_prompt));
        }

        if self.include_notes && !slide.speaker_notes.trim().is_empty() {
            // Continuation lines line up under the text after "Notes: ".
            let notes = slide.speaker_notes.trim().replace('\n', "\n          ");
            lines.push(format!("   Notes: {}", notes));
        }

        lines.join("\n")
    }
}
