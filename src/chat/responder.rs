//! Canned-reply rule table.
//!
//! MediBot does not interpret text. A reply is picked by checking the
//! lowercased utterance for trigger terms, topic by topic in a fixed
//! priority order. The reply texts live in the translation catalog under
//! `reply.*`, so they share its locale fallback.

use crate::i18n::{Catalog, Locale};

/// Category of canned reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Hospital,
    Fever,
    /// No trigger matched; greeting and capability summary.
    Default,
}

/// Topics in match priority order, with their trigger terms.
const RULES: &[(Topic, &[&str])] = &[
    (Topic::Hospital, &["hospital", "अस्पताल", "ହସ୍ପିଟାଲ", "হাসপাতাল"]),
    (Topic::Fever, &["fever", "बुखार", "ଜ୍ୱର", "জ্বর"]),
];

impl Topic {
    /// Catalog key of the reply text.
    pub fn reply_key(self) -> &'static str {
        match self {
            Self::Hospital => "reply.hospital",
            Self::Fever => "reply.fever",
            Self::Default => "reply.default",
        }
    }

    /// First topic whose trigger occurs in `utterance`.
    pub fn classify(utterance: &str) -> Self {
        let normalized = utterance.to_lowercase();
        RULES
            .iter()
            .find(|(_, triggers)| triggers.iter().any(|t| normalized.contains(t)))
            .map_or(Self::Default, |(topic, _)| *topic)
    }
}

/// Deterministic mapping from `(utterance, locale)` to a reply.
#[derive(Debug, Clone, Copy)]
pub struct ResponseSelector {
    catalog: &'static Catalog,
}

impl ResponseSelector {
    pub fn new(catalog: &'static Catalog) -> Self {
        Self { catalog }
    }

    /// Reply text for `utterance` in `locale`.
    pub fn select_reply(&self, utterance: &str, locale: Locale) -> String {
        self.reply_for(Topic::classify(utterance), locale)
    }

    /// Reply text for a known topic.
    pub fn reply_for(&self, topic: Topic, locale: Locale) -> String {
        self.catalog.resolve(locale, topic.reply_key()).to_string()
    }
}

impl Default for ResponseSelector {
    fn default() -> Self {
        Self::new(Catalog::embedded())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en(key: &str) -> &'static str {
        Catalog::embedded()
            .lookup(Locale::En, key)
            .unwrap_or_else(|| panic!("missing en key {key}"))
    }

    #[test]
    fn test_fever_matches() {
        let selector = ResponseSelector::default();
        assert_eq!(selector.select_reply("I have a fever", Locale::En), en("reply.fever"));
        assert_eq!(selector.select_reply("FEVER since monday", Locale::En), en("reply.fever"));
    }

    #[test]
    fn test_hospital_has_priority_over_fever() {
        assert_eq!(Topic::classify("which hospital treats fever?"), Topic::Hospital);
        assert_eq!(Topic::classify("fever, need a Hospital"), Topic::Hospital);
    }

    #[test]
    fn test_native_script_triggers() {
        assert_eq!(Topic::classify("मुझे बुखार है"), Topic::Fever);
        assert_eq!(Topic::classify("पास का अस्पताल"), Topic::Hospital);
        assert_eq!(Topic::classify("আমার জ্বর"), Topic::Fever);
    }

    #[test]
    fn test_unmatched_returns_locale_greeting() {
        let selector = ResponseSelector::default();
        let reply = selector.select_reply("xyz123", Locale::Bn);
        assert_eq!(
            Some(reply.as_str()),
            Catalog::embedded().lookup(Locale::Bn, "reply.default")
        );
        assert_ne!(reply, en("reply.default"));
    }

    #[test]
    fn test_missing_topic_falls_back_to_english() {
        let selector = ResponseSelector::default();
        // Hindi has no hospital reply; Odia has no fever reply.
        assert_eq!(selector.select_reply("hospital", Locale::Hi), en("reply.hospital"));
        assert_eq!(selector.select_reply("fever", Locale::Or), en("reply.fever"));
        // Hindi does have its own fever reply.
        assert_ne!(selector.select_reply("fever", Locale::Hi), en("reply.fever"));
    }

    #[test]
    fn test_selection_is_deterministic_and_non_empty() {
        let selector = ResponseSelector::default();
        for locale in Locale::ALL {
            for utterance in ["", "hello", "fever", "hospital near 751001"] {
                let first = selector.select_reply(utterance, locale);
                assert!(!first.is_empty());
                assert_eq!(first, selector.select_reply(utterance, locale));
            }
        }
    }
}
