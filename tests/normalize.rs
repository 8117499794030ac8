use serde_json::{json, Value};
use statute_etl::{looks_absolute, normalize, Period, Record, BASE_ORIGIN};

fn rec(v: Value) -> Record {
    match v {
        Value::Object(m) => m,
        _ => panic!("fixture must be an object"),
    }
}

/// `@type` is always set to "Statute", even when the input carries another value.
#[test]
fn sets_statute_type_and_overwrites_existing() {
    let out = normalize(rec(json!({ "id": "x" })));
    assert_eq!(out["@type"], "Statute");

    let out = normalize(rec(json!({ "@type": "Legislation", "id": "x" })));
    assert_eq!(out["@type"], "Statute");
}

/// Only `@type` and `url` may change; every other key comes through untouched
/// and in the same order.
#[test]
fn leaves_other_keys_alone() {
    let input = rec(json!({
        "id": "al-1",
        "name": "Año fiscal",
        "nested": { "url": "/not/top/level" },
        "tags": [1, 2, 3],
        "url": "/codes/alabama/",
        "extra": null
    }));
    let out = normalize(input.clone());

    for (k, v) in &input {
        if k == "url" { continue; }
        assert_eq!(out.get(k), Some(v), "key {k} changed");
    }
    assert_eq!(out.len(), input.len() + 1);

    let keys: Vec<&str> = out.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["id", "name", "nested", "tags", "url", "extra", "@type"]);
}

/// Root-relative urls gain the base origin; absolute ones are returned unchanged.
#[test]
fn absolutizes_relative_urls_only() {
    let out = normalize(rec(json!({ "url": "/codes/alabama/2023/" })));
    assert_eq!(out["url"], format!("{BASE_ORIGIN}/codes/alabama/2023/"));

    for abs in ["https://law.justia.com/codes/x/", "http://example.com/a", "ftp://host/file"] {
        let out = normalize(rec(json!({ "url": abs })));
        assert_eq!(out["url"], abs);
    }
}

/// Empty, missing and non-string urls are not touched, and no url key is invented.
#[test]
fn ignores_empty_missing_and_non_string_urls() {
    let out = normalize(rec(json!({ "url": "" })));
    assert_eq!(out["url"], "");

    let out = normalize(rec(json!({ "id": 1 })));
    assert!(out.get("url").is_none());

    let out = normalize(rec(json!({ "url": 42 })));
    assert_eq!(out["url"], 42);

    let out = normalize(rec(json!({ "url": null })));
    assert!(out["url"].is_null());
}

/// Normalizing twice yields the same url (and the same record) as normalizing once.
#[test]
fn normalization_is_idempotent() {
    for url in ["/codes/a/", "https://law.justia.com/codes/a/", "codes/b", "", "mailto:x@y"] {
        let once = normalize(rec(json!({ "url": url, "@type": "Other" })));
        let twice = normalize(once.clone());
        assert_eq!(once, twice, "url {url:?}");
    }
}

#[test]
fn absolute_detection() {
    assert!(looks_absolute("http://a"));
    assert!(looks_absolute("https://a"));
    assert!(looks_absolute("s3://bucket/key"));
    assert!(!looks_absolute("/codes/a"));
    assert!(!looks_absolute("codes/a"));
    assert!(!looks_absolute("//cdn.example.com/a"));
}

/// Periods are single path components.
#[test]
fn period_validation() {
    assert_eq!("2023".parse::<Period>().unwrap().source_file_name(), "2023.jsonl");
    assert!("".parse::<Period>().is_err());
    assert!("   ".parse::<Period>().is_err());
    assert!("..".parse::<Period>().is_err());
    assert!("../2023".parse::<Period>().is_err());
    assert!("20\\23".parse::<Period>().is_err());
}
