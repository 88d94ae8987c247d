//! Tests for resolving command-line specs against a workspace

use packwright::core::models::Specs;
use packwright::core::ports::TargetRepository;
use packwright::core::services::{Selection, SelectionError, select};

use crate::common::{TestRepo, addr};

fn selection(repo: &TestRepo, specs: &[&str]) -> Result<Selection, SelectionError> {
    let graph = repo.graph();
    let files = repo.repository().list_files().unwrap();
    select(&graph, &files, &Specs::parse(specs).unwrap())
}

fn addresses(selection: &Selection) -> Vec<String> {
    selection.targets.iter().map(|t| t.address.to_string()).collect()
}

#[test]
fn test_no_specs_selects_everything() {
    let repo = TestRepo::new();
    let all = selection(&repo, &[]).unwrap();
    assert_eq!(all.targets.len(), 5);
    assert!(all.files.contains(&"src/python/foo/bar/b_test.py".to_string()));
}

#[test]
fn test_recursive_and_single_directory_specs() {
    let repo = TestRepo::new();

    let foo = selection(&repo, &["src/python/foo::"]).unwrap();
    assert_eq!(addresses(&foo), vec!["src/python/foo:dist", "src/python/foo/bar:lib"]);

    let python = selection(&repo, &["src/python:"]).unwrap();
    assert_eq!(addresses(&python), vec!["src/python:all"]);
    assert_eq!(python.files, vec!["src/python/BUILD.toml"]);
}

#[test]
fn test_address_and_file_specs() {
    let repo = TestRepo::new();

    let lib = selection(&repo, &["src/python/baz:lib"]).unwrap();
    assert_eq!(addresses(&lib), vec!["src/python/baz:lib"]);
    assert_eq!(lib.files, vec!["src/python/baz/c.py"]);
    assert!(lib.requested_files.is_empty());

    let file = selection(&repo, &["src/python/foo/bar/a.py"]).unwrap();
    assert_eq!(addresses(&file), vec!["src/python/foo/bar:lib"]);
    assert_eq!(file.files, vec!["src/python/foo/bar/a.py"]);
    assert_eq!(file.requested_files, vec!["src/python/foo/bar/a.py"]);
}

#[test]
fn test_address_spec_sources_are_not_requested_files() {
    let repo = TestRepo::new();
    let both = selection(&repo, &["src/python/foo/bar:lib", "src/python/baz/c.py"]).unwrap();
    assert_eq!(addresses(&both), vec!["src/python/baz:lib", "src/python/foo/bar:lib"]);
    assert_eq!(
        both.files,
        vec!["src/python/baz/c.py", "src/python/foo/bar/a.py", "src/python/foo/bar/b.py"]
    );
    assert_eq!(both.requested_files, vec!["src/python/baz/c.py"]);
}

#[test]
fn test_unknown_specs() {
    let repo = TestRepo::new();
    assert_eq!(
        selection(&repo, &["src/python/baz:nope"]).unwrap_err(),
        SelectionError::UnknownTarget(addr("src/python/baz:nope"))
    );
    assert_eq!(
        selection(&repo, &["src/missing.py"]).unwrap_err(),
        SelectionError::UnknownFile("src/missing.py".to_string())
    );
}
