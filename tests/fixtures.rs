//! Program fixtures: every `tests/fixtures/<case>/{prg,exp}` pair must pass

use std::path::Path;

use minterp::harness::{Fixture, Verdict, load_fixtures};
use pretty_assertions::assert_eq;

fn fixture_root() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"))
}

#[test]
fn test_all_fixtures_pass() {
    let fixtures = load_fixtures(fixture_root()).expect("fixtures should load");
    assert!(!fixtures.is_empty());

    for fixture in &fixtures {
        let outcome = fixture.run();
        assert_eq!(
            outcome.actual.trim(),
            outcome.expected.trim(),
            "fixture {} produced {:?}",
            outcome.name,
            outcome.verdict
        );
        assert_eq!(outcome.verdict, Verdict::Pass);
    }
}

#[test]
fn test_fixtures_are_sorted() {
    let fixtures = load_fixtures(fixture_root()).unwrap();
    let names: Vec<_> = fixtures.iter().map(|f| f.name.clone()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn test_missing_pair_is_an_error() {
    let root = fixture_root().join("01_write_literal");
    // A case directory has no sub-directories of its own
    assert!(load_fixtures(&root).unwrap().is_empty());
    assert!(Fixture::load(&root.join("prg")).is_err());
    assert!(load_fixtures(&root.join("does-not-exist")).is_err());
}
