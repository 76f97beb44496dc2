//! Character classes and generation requests

use serde::{Deserialize, Serialize};

pub const UPPERCASE_LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE_LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &str = "0123456789";
pub const DEFAULT_SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Glyphs that are easy to misread in most fonts
pub const DEFAULT_SIMILAR: &str = "il1Lo0O";

/// Length used when the request leaves it unset (zero)
pub const DEFAULT_LENGTH: usize = 12;
pub const MIN_LENGTH: usize = 1;
pub const MAX_LENGTH: usize = 128;

/// Classes substituted when a request enables none
const DEFAULT_CLASSES: [CharClass; 3] = [CharClass::Upper, CharClass::Lower, CharClass::Digit];

/// A class of characters usable in generated passwords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Upper,
    Lower,
    Digit,
    Symbol,
}

impl CharClass {
    /// Base alphabet of the class, before any exclusion
    pub fn alphabet<'a>(&self, symbols: &'a str) -> &'a str {
        match self {
            Self::Upper => UPPERCASE_LETTERS,
            Self::Lower => LOWERCASE_LETTERS,
            Self::Digit => DIGITS,
            Self::Symbol => symbols,
        }
    }
}

impl std::fmt::Display for CharClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Upper => "uppercase",
            Self::Lower => "lowercase",
            Self::Digit => "digit",
            Self::Symbol => "symbol",
        };
        f.write_str(name)
    }
}

/// What to do when exclude-similar would empty an enabled class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarPolicy {
    /// Apply the exclusion everywhere; an emptied class makes the request unsatisfiable
    #[default]
    Strict,
    /// Skip the exclusion for any enabled class it would empty
    KeepRequired,
}

impl std::str::FromStr for SimilarPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "keep_required" | "keep-required" => Ok(Self::KeepRequired),
            other => Err(format!("unknown exclude-similar policy: {}", other)),
        }
    }
}

/// A password generation request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharsetSpec {
    /// Requested length; zero means [`DEFAULT_LENGTH`]
    pub length: usize,
    pub upper: bool,
    pub lower: bool,
    pub digits: bool,
    pub symbols: bool,
    /// Drop visually similar glyphs from the charset
    pub exclude_similar: bool,
}

impl CharsetSpec {
    /// Request with every class enabled
    pub fn all_classes(length: usize) -> Self {
        Self {
            length,
            upper: true,
            lower: true,
            digits: true,
            symbols: true,
            exclude_similar: false,
        }
    }

    /// Length actually generated: zero becomes the default, the rest is clamped
    pub fn effective_length(&self) -> usize {
        if self.length == 0 {
            return DEFAULT_LENGTH;
        }
        self.length.clamp(MIN_LENGTH, MAX_LENGTH)
    }

    /// Enabled classes, or the default set when none are enabled
    pub fn enabled_classes(&self) -> Vec<CharClass> {
        let classes: Vec<CharClass> = [
            (self.upper, CharClass::Upper),
            (self.lower, CharClass::Lower),
            (self.digits, CharClass::Digit),
            (self.symbols, CharClass::Symbol),
        ]
        .into_iter()
        .filter_map(|(enabled, class)| enabled.then_some(class))
        .collect();

        if classes.is_empty() {
            DEFAULT_CLASSES.to_vec()
        } else {
            classes
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_length() {
        let with_length = |length| CharsetSpec {
            length,
            ..CharsetSpec::default()
        };

        assert_eq!(with_length(0).effective_length(), 12);
        assert_eq!(with_length(1).effective_length(), 1);
        assert_eq!(with_length(64).effective_length(), 64);
        assert_eq!(with_length(128).effective_length(), 128);
        assert_eq!(with_length(500).effective_length(), 128);
    }

    #[test]
    fn test_default_classes_when_none_enabled() {
        let spec = CharsetSpec::default();
        assert_eq!(
            spec.enabled_classes(),
            vec![CharClass::Upper, CharClass::Lower, CharClass::Digit]
        );
    }

    #[test]
    fn test_enabled_classes_keep_order() {
        let spec = CharsetSpec {
            symbols: true,
            lower: true,
            ..CharsetSpec::default()
        };
        assert_eq!(spec.enabled_classes(), vec![CharClass::Lower, CharClass::Symbol]);
    }

    #[test]
    fn test_similar_policy_parse() {
        assert_eq!("strict".parse::<SimilarPolicy>().unwrap(), SimilarPolicy::Strict);
        assert_eq!(
            " Keep-Required ".parse::<SimilarPolicy>().unwrap(),
            SimilarPolicy::KeepRequired
        );
        assert!("lenient".parse::<SimilarPolicy>().is_err());
    }
}
