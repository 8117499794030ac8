//! Record normalization: Schema.org type tagging and URL absolutization.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// One statute: an open-ended JSON object. Key order is preserved end to end.
pub type Record = Map<String, Value>;

pub const TYPE_KEY: &str = "@type";
pub const STATUTE_TYPE: &str = "Statute";
pub const URL_KEY: &str = "url";

/// Origin prepended to root-relative statute URLs.
pub const BASE_ORIGIN: &str = "https://law.justia.com";

fn scheme_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").expect("valid scheme regex"))
}

/// True for values already carrying a scheme: anything starting with `http`,
/// or any `scheme://` prefix.
pub fn looks_absolute(url: &str) -> bool {
    url.starts_with("http") || scheme_re().is_match(url)
}

/// Normalize in place. Only `@type` and `url` are touched.
pub fn normalize_in_place(record: &mut Record) {
    record.insert(TYPE_KEY.to_string(), Value::String(STATUTE_TYPE.to_string()));

    // Non-string urls are left alone.
    if let Some(Value::String(url)) = record.get_mut(URL_KEY) {
        if !url.is_empty() && !looks_absolute(url) {
            url.insert_str(0, BASE_ORIGIN);
        }
    }
}

/// Owned variant of [`normalize_in_place`].
pub fn normalize(mut record: Record) -> Record {
    normalize_in_place(&mut record);
    record
}
