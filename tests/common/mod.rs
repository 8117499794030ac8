#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const PERIOD: &str = "2023";

/// Write raw lines (already serialized) to `path`, one per line.
pub fn write_lines(path: &Path, lines: &[String]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut f = File::create(path).unwrap();
    for l in lines {
        writeln!(&mut f, "{}", l).unwrap();
    }
}

/// Read a JSONL file into a vector of `serde_json::Value` (skips empty lines).
pub fn read_jsonl_values(path: &Path) -> Vec<Value> {
    let f = File::open(path).unwrap();
    let r = BufReader::new(f);
    r.lines()
        .map(|l| l.unwrap())
        .filter(|s| !s.is_empty())
        .map(|s| serde_json::from_str(&s).unwrap())
        .collect()
}

/// Read a text file line-by-line into strings (useful for the manifest).
pub fn read_lines(path: &Path) -> Vec<String> {
    let f = File::open(path).unwrap();
    let r = BufReader::new(f);
    r.lines().map(|l| l.unwrap()).filter(|s| !s.is_empty()).collect()
}

pub fn statute(id: &str, url: &str) -> String {
    json!({ "id": id, "name": format!("Statute {id}"), "url": url }).to_string()
}

/// A tiny input tree under `<tmp>/state_laws`:
/// - `alabama/2023.jsonl`: 2 statutes (one root-relative url, one absolute)
/// - `colorado/2023.jsonl`: 1 statute with a non-ASCII name
/// - `delaware/2023.jsonl`: only malformed lines
/// - `georgia/`: no 2023 file (has 2022 only)
/// - `plots/`: reserved, must never be treated as a jurisdiction
/// - `notes.txt`: a plain file at the root, ignored
pub struct Corpus {
    pub tmp: TempDir,
    pub input_root: PathBuf,
    pub output_dir: PathBuf,
}

pub fn make_corpus_basic() -> Corpus {
    let tmp = tempfile::tempdir().unwrap();
    let input_root = tmp.path().join("state_laws");
    let output_dir = tmp.path().join("out");

    write_lines(
        &input_root.join("alabama").join("2023.jsonl"),
        &[
            statute("al-1", "/codes/alabama/2023/title-1/section-1-1-1/"),
            statute("al-2", "https://law.justia.com/codes/alabama/2023/title-1/section-1-1-2/"),
        ],
    );
    write_lines(
        &input_root.join("colorado").join("2023.jsonl"),
        &[json!({ "id": "co-1", "name": "Año fiscal — § 24-1-101", "url": "/codes/colorado/2023/title-24/" }).to_string()],
    );
    write_lines(
        &input_root.join("delaware").join("2023.jsonl"),
        &["{not json".to_string(), "[1, 2, 3]".to_string()],
    );
    write_lines(&input_root.join("georgia").join("2022.jsonl"), &[statute("ga-1", "/codes/georgia/2022/")]);
    write_lines(&input_root.join("plots").join("2023.jsonl"), &[statute("plot", "/plots/")]);
    fs::write(input_root.join("notes.txt"), "not a jurisdiction\n").unwrap();

    Corpus { tmp, input_root, output_dir }
}

/// Two jurisdictions only: `A` (2 statutes) and `B` (1 statute).
pub fn make_corpus_ab() -> Corpus {
    let tmp = tempfile::tempdir().unwrap();
    let input_root = tmp.path().join("state_laws");
    let output_dir = tmp.path().join("out");
    write_lines(&input_root.join("A").join("2023.jsonl"), &[statute("a1", "/a/1"), statute("a2", "/a/2")]);
    write_lines(&input_root.join("B").join("2023.jsonl"), &[statute("b1", "/b/1")]);
    Corpus { tmp, input_root, output_dir }
}
