//! Supported locales.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the languages the client ships translations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Hi,
    Or,
    Bn,
}

impl Locale {
    /// Every supported locale, in selector order.
    pub const ALL: [Locale; 4] = [Locale::En, Locale::Hi, Locale::Or, Locale::Bn];

    /// Locale used when nothing else applies, and the canonical key space.
    pub const DEFAULT: Locale = Locale::En;

    /// Short language code, e.g. `"hi"`.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
            Self::Or => "or",
            Self::Bn => "bn",
        }
    }

    /// English name of the language.
    pub fn name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Hi => "Hindi",
            Self::Or => "Odia",
            Self::Bn => "Bengali",
        }
    }

    /// Name of the language written in that language.
    pub fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Hi => "हिंदी",
            Self::Or => "ଓଡ଼ିଆ",
            Self::Bn => "বাংলা",
        }
    }

    /// Parse a language code, returning `None` for anything outside the set.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(code))
    }

    /// Comma separated list of codes, for prompts.
    pub fn available_codes() -> String {
        Self::ALL.map(Locale::code).join(", ")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing an unsupported language code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language code: {0:?}")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnknownLocale(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Locale::from_code("hi"), Some(Locale::Hi));
        assert_eq!(Locale::from_code(" BN "), Some(Locale::Bn));
        assert_eq!(Locale::from_code("fr"), None);
        assert_eq!(Locale::from_code(""), None);
    }

    #[test]
    fn test_code_round_trips_for_every_locale() {
        for locale in Locale::ALL {
            assert_eq!(locale.code().parse::<Locale>(), Ok(locale));
        }
    }

    #[test]
    fn test_default_is_english() {
        assert_eq!(Locale::default(), Locale::En);
        assert_eq!(Locale::DEFAULT, Locale::En);
    }

    #[test]
    fn test_available_codes() {
        assert_eq!(Locale::available_codes(), "en, hi, or, bn");
    }
}
