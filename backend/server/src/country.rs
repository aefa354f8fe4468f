//! # Country Extraction
//!
//! Derives a country label from the tail of a free-text address.
//!
//! The default strategy is a heuristic: one or two capitalized ASCII words
//! anchored at the end of the address (`..., Springfield, United States` yields
//! `United States`). It never checks the match against a list of real
//! countries, so a trailing capitalized street or city name is taken as the
//! country, and three-word countries only keep their last two words.
//!
//! Anything implementing [`CountryExtractor`] can replace it, e.g. a lookup
//! backed by a geocoding service.
use regex::Regex;

/// One or two `Xxxx` words at the very end, separated by a single space.
pub const DEFAULT_COUNTRY_PATTERN: &str = r"[A-Z][a-z]+(?: [A-Z][a-z]+)?$";

pub trait CountryExtractor: Send + Sync {
    fn extract(&self, address: &str) -> Option<String>;
}

pub struct PatternExtractor {
    pattern: Regex,
}

impl PatternExtractor {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn default_pattern() -> Result<Self, regex::Error> {
        Self::new(DEFAULT_COUNTRY_PATTERN)
    }
}

impl CountryExtractor for PatternExtractor {
    fn extract(&self, address: &str) -> Option<String> {
        self.pattern
            .find(address)
            .map(|found| found.as_str().to_string())
    }
}
