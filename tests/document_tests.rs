// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for parsing, typed access and layout-preserving edits.

mod common;

use common::{init_tracing, SAMPLE};
use linecfg::prelude::*;

#[test]
fn test_typed_getters() {
    init_tracing();
    let doc = Document::parse("answer = 42\npi = 3.14\nis_active = true\nquotes = a\\nb\n");

    assert_eq!(doc.get_int("answer").unwrap(), 42);
    assert_eq!(doc.get_float("pi").unwrap(), 3.14);
    assert!(doc.get_bool("is_active").unwrap());
    assert_eq!(doc.get_string("quotes").unwrap(), "a\nb");
}

#[test]
fn test_getter_errors() {
    init_tracing();
    let doc = Document::parse("greeting = hello");

    let err = doc.get_int("greeting").unwrap_err();
    assert!(err.is_type_error());
    assert!(matches!(
        err,
        ConfigError::TypeConversionError { ref key, .. } if key == "greeting"
    ));

    let err = doc.get_int("missing").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Configuration key not found: missing");
}

#[test]
fn test_sample_structure() {
    init_tracing();
    let doc = Document::parse(SAMPLE);

    assert_eq!(doc.lines().len(), 7);
    assert_eq!(doc.comments(), ["Sample configuration", "Flags"]);
    assert_eq!(doc.len(), 4);

    let keys: Vec<String> = doc.keys().into_iter().map(String::from).collect();
    assert_eq!(keys, ["answer", "pi", "is_active", "quotes"]);
}

#[test]
fn test_sample_round_trip() {
    init_tracing();
    let doc = Document::parse(SAMPLE);
    assert_eq!(doc.to_string(), SAMPLE);
}

#[test]
fn test_edit_cycle_preserves_layout() {
    init_tracing();
    let mut doc = Document::parse(SAMPLE);

    doc.set_int("answer", -1).unwrap();
    doc.set_string("quotes", "x\ny").unwrap();
    doc.set_float("ratio", 0.25).unwrap();
    doc.unset("pi");

    assert_eq!(
        doc.to_string(),
        "# Sample configuration\n\
         answer = -1\n\
         \n\
         ## Flags\n\
         is_active = true\n\
         quotes = x\\ny\n\
         ratio = 0.25"
    );
    assert_eq!(doc.comments(), ["Sample configuration", "Flags"]);
}

#[test]
fn test_irregular_spacing_is_kept() {
    init_tracing();
    let mut doc = Document::parse("   answer=42   \n\tpi =3.14");

    doc.set_int("answer", 7).unwrap();
    doc.set_float("pi", 2.5).unwrap();

    assert_eq!(doc.to_string(), "   answer=7   \n\tpi =2.5");
    assert_eq!(doc.get_int("answer").unwrap(), 7);
}

#[test]
fn test_value_with_equals_sign() {
    init_tracing();
    let mut doc = Document::parse("url = http://host/?a=b");
    assert_eq!(doc.get_string("url").unwrap(), "http://host/?a=b");

    doc.set_string("url", "http://other/?c=d").unwrap();
    assert_eq!(doc.to_string(), "url = http://other/?c=d");
}

#[test]
fn test_malformed_lines_are_kept() {
    init_tracing();
    let mut doc = Document::parse("[section]\nanswer = 42\njust some words");

    assert_eq!(doc.len(), 1);
    doc.set_int("answer", 1).unwrap();
    assert_eq!(doc.to_string(), "[section]\nanswer = 1\njust some words");
}

#[test]
fn test_bool_literals_are_strict() {
    init_tracing();
    let doc = Document::parse("a = true\nb = False\nc = 1");

    assert!(doc.get_bool("a").unwrap());
    assert!(doc.get_bool("b").unwrap_err().is_type_error());
    assert!(doc.get_bool("c").unwrap_err().is_type_error());
}

#[test]
fn test_float_input_notations() {
    init_tracing();
    let mut doc = Document::parse("big = 1e21\nsmall = -2.5E-3");

    assert_eq!(doc.get_float("big").unwrap(), 1e21);
    assert_eq!(doc.get_float("small").unwrap(), -0.0025);

    doc.set_float("big", 1e21).unwrap();
    assert_eq!(doc.get("big").unwrap().as_str(), "1000000000000000000000");
}

#[test]
fn test_from_reader_matches_parse() {
    init_tracing();
    let from_reader = Document::from_reader(SAMPLE.as_bytes()).unwrap();
    assert_eq!(from_reader, Document::parse(SAMPLE));
}

#[test]
fn test_persisted_config_in_memory() {
    init_tracing();
    let mut config = PersistedConfig::open(MemoryStorage::new(SAMPLE)).unwrap();

    config.set_bool("is_active", false).unwrap();
    config.persist().unwrap();

    let reopened = PersistedConfig::open(config.storage().clone()).unwrap();
    assert!(!reopened.get_bool("is_active").unwrap());
    assert_eq!(reopened.comments(), config.comments());
}

#[test]
fn test_unwritable_keys_keep_text_and_index_in_step() {
    init_tracing();
    let mut doc = Document::parse(SAMPLE);
    let before = doc.clone();

    let err = doc.set_string("a=b", "1").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidKey { .. }));
    assert_eq!(doc, before);

    doc.set_int(" x", 1).unwrap();
    doc.set_int(" x", 2).unwrap();
    assert!(doc.to_string().ends_with("\nx = 2"));

    let reparsed = Document::parse(&doc.to_string());
    assert_eq!(reparsed.get_int("x").unwrap(), 2);
    assert_eq!(reparsed, doc);
}
