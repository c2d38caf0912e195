// crates/hearth-i18n/src/tests/locale.rs
// ============================================================================
// Module: Locale Identifier Tests
// Description: Unit tests for locale codes and tolerant parsing.
// Purpose: Keep stored codes and platform locale strings mapping correctly.
// Dependencies: hearth-i18n locale module
// ============================================================================

//! ## Overview
//! Covers code round-trips, region/encoding tolerance, and serde form.

use std::collections::BTreeSet;

use crate::locale::LocaleId;
use crate::locale::UnsupportedLocale;

#[test]
fn every_locale_round_trips_through_its_code() {
    for locale in LocaleId::ALL {
        assert_eq!(LocaleId::parse(locale.as_str()), Some(locale));
        assert_eq!(locale.to_string(), locale.as_str());
    }
}

#[test]
fn all_lists_each_locale_once() {
    let unique: BTreeSet<LocaleId> = LocaleId::ALL.into_iter().collect();
    assert_eq!(unique.len(), LocaleId::ALL.len());
    assert_eq!(LocaleId::ALL[0], LocaleId::Hr);
}

#[test]
fn parse_accepts_region_tags_and_case() {
    assert_eq!(LocaleId::parse("FR"), Some(LocaleId::Fr));
    assert_eq!(LocaleId::parse("fr-CA"), Some(LocaleId::Fr));
    assert_eq!(LocaleId::parse("de_AT"), Some(LocaleId::De));
    assert_eq!(LocaleId::parse(" sl "), Some(LocaleId::Sl));
}

#[test]
fn parse_strips_posix_suffixes() {
    assert_eq!(LocaleId::parse("hr_HR.UTF-8"), Some(LocaleId::Hr));
    assert_eq!(LocaleId::parse("sr_RS@latin"), Some(LocaleId::Sr));
}

#[test]
fn parse_rejects_unsupported_values() {
    assert_eq!(LocaleId::parse(""), None);
    assert_eq!(LocaleId::parse("xx"), None);
    assert_eq!(LocaleId::parse("english"), None);
    assert_eq!(LocaleId::parse("C"), None);
    assert_eq!(LocaleId::parse("-fr"), None);
}

#[test]
fn from_str_reports_the_rejected_value() {
    let err = "pt-BR".parse::<LocaleId>().unwrap_err();
    assert_eq!(err, UnsupportedLocale("pt-BR".to_string()));
    assert_eq!("it".parse::<LocaleId>(), Ok(LocaleId::It));
}

#[test]
fn serde_uses_lowercase_codes() {
    assert_eq!(serde_json::to_string(&LocaleId::Es).unwrap(), "\"es\"");
    let parsed: LocaleId = serde_json::from_str("\"sr\"").unwrap();
    assert_eq!(parsed, LocaleId::Sr);
    assert!(serde_json::from_str::<LocaleId>("\"Sr\"").is_err());
}

#[test]
fn native_names_are_distinct() {
    let names: BTreeSet<&str> = LocaleId::ALL.iter().map(|locale| locale.native_name()).collect();
    assert_eq!(names.len(), LocaleId::ALL.len());
    assert_eq!(LocaleId::Hr.native_name(), "Hrvatski");
}
