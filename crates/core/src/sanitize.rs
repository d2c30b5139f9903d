//! Removal of formatting wrappers around model responses.
//!
//! Models often wrap their JSON in a Markdown code fence even when told not
//! to. This strips one leading fence opener (with or without a language tag)
//! and one trailing fence closer.

use regex::Regex;
use std::sync::LazyLock;

const FENCE: &str = "```";

/// Matches a fence opener and an optional language tag such as `json`.
static FENCE_OPENER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[A-Za-z0-9_+.\-]*").unwrap());

/// Strip surrounding whitespace and code-fence markers from a raw response.
///
/// Never fails; text without fences only loses its outer whitespace.
///
/// # Example
/// ```
/// use deck_core::sanitize;
///
/// assert_eq!(sanitize("```json\n{\"slides\": []}\n```"), "{\"slides\": []}");
/// ```
pub fn sanitize(raw: &str) -> String {
    let mut text = raw.trim();

    if let Some(found) = FENCE_OPENER_REGEX.find(text) {
        text = &text[found.end()..];
    }

    if let Some(stripped) = text.strip_suffix(FENCE) {
        text = stripped;
    }

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{"slides":[{"title":"Intro","bullets":[]}]}"#;

    #[test]
    fn test_plain_text_is_trimmed() {
        assert_eq!(sanitize("  \n\tHello\n "), "Hello");
    }

    #[test]
    fn test_json_fence_removed() {
        let raw = format!("```json\n{}\n```", PAYLOAD);
        assert_eq!(sanitize(&raw), PAYLOAD);
    }

    #[test]
    fn test_bare_fence_removed() {
        let raw = format!("```\n{}\n```", PAYLOAD);
        assert_eq!(sanitize(&raw), PAYLOAD);
    }

    #[test]
    fn test_other_language_tags_removed() {
        assert_eq!(sanitize(&format!("```JSON\n{}```", PAYLOAD)), PAYLOAD);
        assert_eq!(sanitize(&format!("```javascript\n{}", PAYLOAD)), PAYLOAD);
    }

    #[test]
    fn test_fence_on_same_line_as_payload() {
        assert_eq!(sanitize(&format!("```json{}```", PAYLOAD)), PAYLOAD);
    }

    #[test]
    fn test_truncated_response_keeps_opener_removal() {
        // No closing fence when the response was cut off.
        let raw = "```json\n{\"slides\": [{\"title\": \"A\"";
        assert_eq!(sanitize(raw), "{\"slides\": [{\"title\": \"A\"");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let raw = format!("  ```json\n{}\n```  ", PAYLOAD);
        let once = sanitize(&raw);
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn test_only_fences() {
        assert_eq!(sanitize("```json\n```"), "");
        assert_eq!(sanitize(""), "");
    }
}
