use std::fmt;
use std::str::FromStr;

/// Caller-selected scope (usually a year such as "2023") naming the source file
/// read from every jurisdiction directory.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period(String);

impl Period {
    /// Validates `s` as a single path component; rejects empty values and anything
    /// that would resolve outside a jurisdiction directory.
    pub fn new(s: impl Into<String>) -> Result<Self, String> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err("period must not be empty".into());
        }
        if s == "." || s == ".." {
            return Err(format!("invalid period {s:?}"));
        }
        if s.contains(['/', '\\', '\0']) {
            return Err(format!("period {s:?} must not contain path separators"));
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `<period>.jsonl`
    pub fn source_file_name(&self) -> String {
        format!("{}.jsonl", self.0)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Period {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
