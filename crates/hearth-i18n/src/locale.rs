// crates/hearth-i18n/src/locale.rs
// ============================================================================
// Module: Locale Identifiers
// Description: Closed set of locales supported by Hearth.
// Purpose: Provide stable locale codes for catalogs, storage, and parsing.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`LocaleId`] is the closed enumeration of languages Hearth ships catalogs
//! for. Codes are two-letter lowercase labels and are the exact values written
//! to the persisted locale record.
//!
//! ## Invariants
//! - Exactly one bundled catalog exists per variant.
//! - [`LocaleId::as_str`] and [`LocaleId::parse`] round-trip for every variant.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Number of supported locales.
pub const LOCALE_COUNT: usize = 8;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported Hearth locales.
///
/// # Invariants
/// - Variants are stable for storage and catalog lookup.
/// - Serialized form is the lowercase two-letter code.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleId {
    /// Croatian.
    Hr,
    /// English.
    En,
    /// German.
    De,
    /// French.
    Fr,
    /// Italian.
    It,
    /// Spanish.
    Es,
    /// Slovenian.
    Sl,
    /// Serbian (Latin script).
    Sr,
}

impl LocaleId {
    /// Ordered list of supported locales.
    ///
    /// # Invariants
    /// - Ordering is stable for deterministic presentation (language pickers, audits).
    pub const ALL: [Self; LOCALE_COUNT] =
        [Self::Hr, Self::En, Self::De, Self::Fr, Self::It, Self::Es, Self::Sl, Self::Sr];

    /// Returns the canonical locale code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hr => "hr",
            Self::En => "en",
            Self::De => "de",
            Self::Fr => "fr",
            Self::It => "it",
            Self::Es => "es",
            Self::Sl => "sl",
            Self::Sr => "sr",
        }
    }

    /// Returns the language name written in the language itself.
    #[must_use]
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::Hr => "Hrvatski",
            Self::En => "English",
            Self::De => "Deutsch",
            Self::Fr => "Français",
            Self::It => "Italiano",
            Self::Es => "Español",
            Self::Sl => "Slovenščina",
            Self::Sr => "Srpski",
        }
    }

    /// Attempts to parse a locale value (case-insensitive, tolerant of region tags).
    ///
    /// Accepts bare codes (`fr`), region-tagged codes (`fr-CA`, `fr_FR`), and
    /// POSIX-style values with encoding or modifier suffixes (`hr_HR.UTF-8`).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let value = value.split(['.', '@']).next().unwrap_or("");
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "hr" => Some(Self::Hr),
            "en" => Some(Self::En),
            "de" => Some(Self::De),
            "fr" => Some(Self::Fr),
            "it" => Some(Self::It),
            "es" => Some(Self::Es),
            "sl" => Some(Self::Sl),
            "sr" => Some(Self::Sr),
            _ => None,
        }
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a supported locale.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale: {0}")]
pub struct UnsupportedLocale(pub String);

impl FromStr for LocaleId {
    type Err = UnsupportedLocale;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| UnsupportedLocale(value.to_string()))
    }
}
