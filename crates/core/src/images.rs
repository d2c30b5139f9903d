//! Planning of per-slide photo lookups.
//!
//! The actual image services live outside this crate behind [`ImageProvider`].
//! Searches are counted through a [`SearchCounter`] the caller owns and
//! passes in, so separate generation runs never share a tally by accident.

use crate::types::SlideDraft;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Payloads this small are error pages or placeholders, not photos.
pub const MIN_IMAGE_BYTES: usize = 5000;

/// A source of stock photos.
pub trait ImageProvider {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Look up one photo for a search phrase.
    fn fetch(&self, query: &str) -> Option<Vec<u8>>;
}

/// Thread-safe tally of searches performed.
#[derive(Debug, Default)]
pub struct SearchCounter {
    count: AtomicUsize,
}

impl SearchCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }
}

/// Whether the slide at `index` gets a photo. The title slide does not.
pub fn wants_image(index: usize) -> bool {
    index > 0
}

/// Search phrases for a slide, best first, without blanks or repeats.
pub fn search_terms<'a>(slide: &'a SlideDraft, topic: &'a str) -> Vec<&'a str> {
    let mut terms: Vec<&str> = Vec::with_capacity(3);
    for term in [slide.image_prompt.as_str(), slide.title.as_str(), topic] {
        let term = term.trim();
        if !term.is_empty() && !terms.iter().any(|t| t.eq_ignore_ascii_case(term)) {
            terms.push(term);
        }
    }
    terms
}

/// Find a photo for a slide.
///
/// Tries each search term against each provider in order and returns the
/// first payload larger than [`MIN_IMAGE_BYTES`]. Every attempt is recorded
/// on `counter`.
pub fn find_slide_image(
    providers: &[&dyn ImageProvider],
    counter: &SearchCounter,
    topic: &str,
    slide: &SlideDraft,
) -> Option<Vec<u8>> {
    for term in search_terms(slide, topic) {
        for provider in providers {
            counter.record();
            match provider.fetch(term) {
                Some(bytes) if bytes.len() > MIN_IMAGE_BYTES => {
                    log::debug!("{} found an image for {:?}", provider.name(), term);
                    return Some(bytes);
                }
                Some(bytes) => {
                    log::debug!(
                        "{} returned {} bytes for {:?}, too small",
                        provider.name(),
                        bytes.len(),
                        term
                    );
                }
                None => {}
            }
        }
    }

    log::debug!("No image found for slide {:?}", slide.title);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Serves fixed-size payloads for known queries and logs every lookup.
    struct FakeProvider {
        name: &'static str,
        hits: Vec<(&'static str, usize)>,
        seen: RefCell<Vec<String>>,
    }

    impl FakeProvider {
        fn new(name: &'static str, hits: Vec<(&'static str, usize)>) -> Self {
            Self {
                name,
                hits,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl ImageProvider for FakeProvider {
        fn name(&self) -> &str {
            self.name
        }

        fn fetch(&self, query: &str) -> Option<Vec<u8>> {
            self.seen.borrow_mut().push(query.to_string());
            self.hits
                .iter()
                .find(|(q, _)| *q == query)
                .map(|(_, size)| vec![0u8; *size])
        }
    }

    fn slide(title: &str, prompt: &str) -> SlideDraft {
        SlideDraft {
            image_prompt: prompt.to_string(),
            ..SlideDraft::titled(title)
        }
    }

    #[test]
    fn test_search_terms_order_and_dedup() {
        let s = slide("Solar Power", "solar panels on roof");
        assert_eq!(
            search_terms(&s, "Energy"),
            vec!["solar panels on roof", "Solar Power", "Energy"]
        );

        let s = SlideDraft::titled("Energy");
        assert_eq!(search_terms(&s, " energy "), vec!["Energy"]);
    }

    #[test]
    fn test_image_prompt_searched_before_title_and_topic() {
        let s = slide("Title", "p");
        assert_eq!(search_terms(&s, "Topic"), vec!["p", "Title", "Topic"]);

        let provider = FakeProvider::new("a", vec![]);
        find_slide_image(&[&provider], &SearchCounter::new(), "Topic", &s);
        assert_eq!(*provider.seen.borrow(), vec!["p", "Title", "Topic"]);
    }

    #[test]
    fn test_first_provider_hit_wins() {
        let google = FakeProvider::new("google", vec![("Solar Power", 8000)]);
        let unsplash = FakeProvider::new("unsplash", vec![("solar panels", 9000)]);
        let counter = SearchCounter::new();

        let image = find_slide_image(
            &[&google, &unsplash],
            &counter,
            "Energy",
            &slide("Solar Power", "solar panels"),
        )
        .unwrap();

        assert_eq!(image.len(), 9000);
        assert_eq!(counter.get(), 2);
        assert_eq!(*google.seen.borrow(), vec!["solar panels"]);
    }

    #[test]
    fn test_small_payloads_are_skipped() {
        let provider = FakeProvider::new("google", vec![("solar panels", 100), ("Energy", 6000)]);
        let counter = SearchCounter::new();

        let image = find_slide_image(
            &[&provider],
            &counter,
            "Energy",
            &slide("Solar Power", "solar panels"),
        )
        .unwrap();

        assert_eq!(image.len(), 6000);
        assert_eq!(counter.get(), 3);
    }

    #[test]
    fn test_no_image_counts_every_attempt() {
        let a = FakeProvider::new("a", vec![]);
        let b = FakeProvider::new("b", vec![]);
        let counter = SearchCounter::new();

        let image = find_slide_image(&[&a, &b], &counter, "Topic", &slide("Title", "prompt"));

        assert!(image.is_none());
        assert_eq!(counter.get(), 6);
    }

    #[test]
    fn test_counter_is_shared_across_slides() {
        let provider = FakeProvider::new("a", vec![]);
        let counter = SearchCounter::new();

        find_slide_image(&[&provider], &counter, "", &SlideDraft::titled("One"));
        find_slide_image(&[&provider], &counter, "", &SlideDraft::titled("Two"));

        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn test_title_slide_has_no_image() {
        assert!(!wants_image(0));
        assert!(wants_image(1));
    }
}
