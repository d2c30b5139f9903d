//! Error types for slide-deck salvage.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Message shown to end users for any generation failure.
pub const GENERATION_FAILED_MESSAGE: &str =
    "No slides were generated. Try again or switch to a different model.";

/// Errors that can occur while turning a model response into a slide deck.
#[derive(Error, Debug)]
pub enum Error {
    /// The response held no `slides` collection, or none of its records
    /// could be salvaged.
    #[error("No recoverable slides: {0}")]
    NoRecoverableSlides(String),

    /// Every record was filtered out, or the collection was empty.
    #[error("No slides remained after normalization")]
    EmptyPresentation,

    /// The provider response did not have the expected envelope shape.
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    /// The generation request is not usable as given.
    #[error("Invalid generation request: {0}")]
    InvalidRequest(String),

    /// The API key environment variable for a provider is not set.
    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: String },

    /// JSON error outside of the salvage path (envelopes, request bodies).
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl Error {
    /// True for the two terminal states of the salvage pipeline.
    pub fn is_generation_failure(&self) -> bool {
        matches!(self, Error::NoRecoverableSlides(_) | Error::EmptyPresentation)
    }

    /// Uniform text for end users. Both salvage failures read the same.
    pub fn user_message(&self) -> String {
        if self.is_generation_failure() {
            GENERATION_FAILED_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}
