//! The salvage pipeline: raw model text in, presentation draft out.
//!
//! ```text
//! raw -> sanitize -> strict parse ----------------> normalize -> draft
//!                        |                             ^
//!                        +-> recover (truncated) ------+
//! ```
//!
//! A failed strict parse and a discarded candidate are expected outcomes and
//! only show up in the debug log. The caller sees either a draft or one of
//! the two generation-failure errors.

use crate::normalize::SlideNormalizer;
use crate::recover::recover;
use crate::sanitize::sanitize;
use crate::types::{PresentationDraft, SlideRecord};
use crate::Result;
use serde::Serialize;
use serde_json::Value;

/// Which path produced the records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SalvagePath {
    /// The whole response parsed as one document.
    Parsed,
    /// The response was malformed and records were scanned out of it.
    PartiallyRecovered,
}

/// A successful salvage along with how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Salvaged {
    pub draft: PresentationDraft,
    pub path: SalvagePath,
    /// Records dropped for being unparseable or missing a title.
    pub discarded: usize,
}

/// Parse the whole text strictly and return the items of its `slides` list.
///
/// `None` covers both malformed JSON and a document without a top-level
/// `slides` array; either way the caller should fall back to recovery.
pub fn try_parse(text: &str) -> Option<Vec<Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(mut document)) => match document.remove("slides") {
            Some(Value::Array(items)) => Some(items),
            _ => {
                log::debug!("Document parsed but has no top-level slides list");
                None
            }
        },
        Ok(_) => {
            log::debug!("Document parsed but is not an object");
            None
        }
        Err(e) => {
            log::debug!("Strict parse failed, falling back to recovery: {}", e);
            None
        }
    }
}

/// Salvages slide decks from model responses.
#[derive(Debug, Clone, Default)]
pub struct SlideSalvager {
    normalizer: SlideNormalizer,
}

impl SlideSalvager {
    /// Create a salvager that applies field defaults only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom normalizer.
    pub fn with_normalizer(mut self, normalizer: SlideNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Run the full pipeline on one raw response.
    pub fn salvage(&self, raw: &str) -> Result<Salvaged> {
        let text = sanitize(raw);

        let (records, path, discarded) = match try_parse(&text) {
            Some(items) => {
                let total = items.len();
                let records: Vec<SlideRecord> =
                    items.iter().filter_map(SlideRecord::from_value).collect();
                let discarded = total - records.len();
                (records, SalvagePath::Parsed, discarded)
            }
            None => {
                let recovered = recover(&text).inspect_err(|e| log::warn!("{}", e))?;
                (
                    recovered.records,
                    SalvagePath::PartiallyRecovered,
                    recovered.discarded,
                )
            }
        };

        let draft = self.normalizer.normalize(records)?;
        log::debug!(
            "Salvaged {} slides via {:?} ({} discarded)",
            draft.len(),
            path,
            discarded
        );

        Ok(Salvaged {
            draft,
            path,
            discarded,
        })
    }

    /// Run the pipeline and keep only the draft.
    pub fn salvage_draft(&self, raw: &str) -> Result<PresentationDraft> {
        self.salvage(raw).map(|s| s.draft)
    }
}

/// Salvage a draft from a raw response with default settings.
pub fn salvage_slides(raw: &str) -> Result<PresentationDraft> {
    SlideSalvager::new().salvage_draft(raw)
}
