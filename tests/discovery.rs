#[path = "common/mod.rs"]
mod common;

use common::*;
use statute_etl::{discover_jurisdictions, StatuteCopier, DEFAULT_RESERVED_DIRS};

fn reserved() -> Vec<String> {
    DEFAULT_RESERVED_DIRS.iter().map(|s| s.to_string()).collect()
}

/// Discovery lists subdirectories only, drops `plots`, and sorts by name.
#[test]
fn lists_sorted_directories_without_reserved() {
    let c = make_corpus_basic();
    let got = discover_jurisdictions(&c.input_root, &reserved(), None).unwrap();
    assert_eq!(got, vec!["alabama", "colorado", "delaware", "georgia"]);
}

/// A cap of N keeps exactly the first N of the sorted list, regardless of
/// directory creation order.
#[test]
fn limit_selects_sorted_prefix() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("state_laws");
    for name in ["wyoming", "alaska", "texas", "plots", "california"] {
        std::fs::create_dir_all(root.join(name)).unwrap();
    }

    let all = discover_jurisdictions(&root, &reserved(), None).unwrap();
    assert_eq!(all, vec!["alaska", "california", "texas", "wyoming"]);

    for n in 0..=all.len() {
        let got = discover_jurisdictions(&root, &reserved(), Some(n)).unwrap();
        assert_eq!(got, all[..n].to_vec());
    }

    let got = discover_jurisdictions(&root, &reserved(), Some(99)).unwrap();
    assert_eq!(got, all);
}

/// Custom reserved names replace the default list.
#[test]
fn reserved_names_are_configurable() {
    let c = make_corpus_basic();
    let got = StatuteCopier::new()
        .input_root(&c.input_root)
        .reserved_dirs(["plots", "georgia"])
        .jurisdictions()
        .unwrap();
    assert_eq!(got, vec!["alabama", "colorado", "delaware"]);
}

/// A missing input root is a hard error, raised before anything is written.
#[test]
fn missing_root_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("out");
    let res = StatuteCopier::new()
        .input_root(tmp.path().join("does_not_exist"))
        .output_dir(&out)
        .progress(false)
        .copy_unified(&PERIOD.parse().unwrap());
    assert!(res.is_err());
    assert!(!out.join("statutes_2023.jsonl").exists());
    assert!(!out.exists(), "output directory should not be created");
}
