//! Partial-structure recovery for truncated responses.
//!
//! When the model runs out of output tokens the JSON document usually ends
//! in the middle of the last slide. Rather than give up on the whole
//! response, this scans the `slides` collection for complete `{ ... }`
//! objects, parses each one on its own, and drops the unterminated tail.

use crate::types::SlideRecord;
use crate::{Error, Result};
use serde_json::Value;

/// Key that introduces the slide collection.
const SLIDES_KEY: &str = "\"slides\"";

/// Records salvaged from a malformed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovered {
    /// Accepted records in response order.
    pub records: Vec<SlideRecord>,

    /// Complete candidates that failed to parse or had no title.
    pub discarded: usize,
}

/// Recover every complete slide record from a sanitized response.
///
/// Fails when there is no `"slides"` key, no `[` after it, or no candidate
/// object survives parsing.
pub fn recover(text: &str) -> Result<Recovered> {
    let key_pos = text
        .find(SLIDES_KEY)
        .ok_or_else(|| Error::NoRecoverableSlides("response has no \"slides\" key".to_string()))?;

    let after_key = key_pos + SLIDES_KEY.len();
    let bracket_pos = text[after_key..]
        .find('[')
        .map(|offset| after_key + offset)
        .ok_or_else(|| {
            Error::NoRecoverableSlides("\"slides\" key is not followed by a list".to_string())
        })?;

    let mut records = Vec::new();
    let mut discarded = 0;

    for candidate in CandidateScanner::new(text, bracket_pos + 1) {
        match serde_json::from_str::<Value>(candidate)
            .ok()
            .as_ref()
            .and_then(SlideRecord::from_value)
        {
            Some(record) => records.push(record),
            None => {
                log::debug!("Discarding unusable slide candidate ({} bytes)", candidate.len());
                discarded += 1;
            }
        }
    }

    if records.is_empty() {
        return Err(Error::NoRecoverableSlides(format!(
            "none of {} candidate records had a usable title",
            discarded
        )));
    }

    Ok(Recovered { records, discarded })
}

/// Yields each balanced top-level `{ ... }` span found after `start`.
///
/// Braces inside string literals are ignored, including after escaped
/// quotes. A closing brace with no open object is skipped. An object that
/// is still open when the text ends is never yielded.
pub struct CandidateScanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> CandidateScanner<'a> {
    /// Start scanning `text` at byte offset `start`.
    pub fn new(text: &'a str, start: usize) -> Self {
        Self {
            text,
            pos: start.min(text.len()),
        }
    }
}

impl<'a> Iterator for CandidateScanner<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        // All delimiters are ASCII, so byte offsets are always char boundaries.
        let bytes = self.text.as_bytes();
        let mut depth = 0usize;
        let mut start = None;
        let mut in_string = false;
        let mut escaped = false;

        while self.pos < bytes.len() {
            let i = self.pos;
            self.pos += 1;

            let b = bytes[i];
            if in_string {
                if escaped {
                    escaped = false;
                } else if b == b'\\' {
                    escaped = true;
                } else if b == b'"' {
                    in_string = false;
                }
                continue;
            }

            match b {
                b'"' => in_string = true,
                b'{' => {
                    if depth == 0 {
                        start = Some(i);
                    }
                    depth += 1;
                }
                b'}' => {
                    if depth == 0 {
                        continue;
                    }
                    depth -= 1;
                    if depth == 0 {
                        if let Some(s) = start.take() {
                            return Some(&self.text[s..=i]);
                        }
                    }
                }
                _ => {}
            }
        }

        None
    }
}
