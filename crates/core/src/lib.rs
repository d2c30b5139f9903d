//! Salvage parsing and normalization of LLM-drafted slide decks.
//!
//! The entry point is [`SlideSalvager`] (or [`salvage_slides`] for default
//! settings): it takes the raw text a model returned, which may be fenced,
//! malformed or cut off mid-slide, and recovers an ordered list of complete
//! slides.

pub mod error;
pub mod images;
pub mod normalize;
pub mod outline;
pub mod prompt;
pub mod provider;
pub mod recover;
pub mod salvage;
pub mod sanitize;
pub mod types;

pub use error::{Error, Result, GENERATION_FAILED_MESSAGE};
pub use images::{find_slide_image, ImageProvider, SearchCounter};
pub use normalize::SlideNormalizer;
pub use outline::OutlineFormatter;
pub use prompt::GenerationRequest;
pub use provider::{extract_message_content, ModelChoice};
pub use salvage::{salvage_slides, SalvagePath, Salvaged, SlideSalvager};
pub use sanitize::sanitize;
pub use types::{PresentationDraft, SlideDraft, SlideRecord};
