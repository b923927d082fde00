//! Loader integration: import resolution over an in-memory fetcher.
//!
//! Import identity is the SHA-256 of the fetched bytes, so cycles and
//! diamonds are exercised by serving byte-identical documents from
//! different URLs.

use revpad::fakes::FakeFetcher;
use revpad::{load, RevpadError};

#[test]
fn load_resolves_imports_in_declaration_order() {
    let root = br#"
rules:
  - name: root-rule
    spec: "1 == 1"
imports:
  - url: https://example.com/first.yml
  - url: https://example.com/second.yml
"#;

    let first = r#"
rules:
  - name: first-rule
    spec: "1 == 1"
"#;

    let second = r#"
rules:
  - name: second-rule
    spec: "1 == 1"
"#;

    let fetcher = FakeFetcher::new()
        .with("https://example.com/first.yml", first)
        .with("https://example.com/second.yml", second);

    let file = load(root, &fetcher).unwrap();

    assert!(file.imports.is_empty());
    let names: Vec<&str> = file.rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["root-rule", "first-rule", "second-rule"]);
}

#[test]
fn load_resolves_nested_imports() {
    let root = br#"
imports:
  - url: https://example.com/mid.yml
"#;

    let mid = r#"
imports:
  - url: https://example.com/leaf.yml
rules:
  - name: mid-rule
    spec: "1 == 1"
"#;

    let leaf = r#"
rules:
  - name: leaf-rule
    spec: "1 == 1"
"#;

    let fetcher = FakeFetcher::new()
        .with("https://example.com/mid.yml", mid)
        .with("https://example.com/leaf.yml", leaf);

    let file = load(root, &fetcher).unwrap();

    // The sub-document merges its own imports before being merged itself.
    let names: Vec<&str> = file.rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["mid-rule", "leaf-rule"]);
}

#[test]
fn load_fails_on_cyclic_imports() {
    let root: &[u8] = br#"
imports:
  - url: https://example.com/b.yml
"#;

    let b = r#"
imports:
  - url: https://example.com/a.yml
"#;

    // a.yml serves the root document's exact bytes, closing the cycle.
    let fetcher = FakeFetcher::new()
        .with("https://example.com/b.yml", b)
        .with("https://example.com/a.yml", root);

    let err = load(root, &fetcher).unwrap_err();
    assert_eq!(err, RevpadError::CyclicDependency);
    assert_eq!(err.to_string(), "loader: cyclic dependency");
}

#[test]
fn load_merges_diamond_imports_exactly_once() {
    let root = br#"
imports:
  - url: https://example.com/b.yml
  - url: https://example.com/c.yml
"#;

    let shared = r#"
rules:
  - name: from-d
    spec: "1 == 1"
"#;

    let b = r#"
imports:
  - url: https://example.com/d-via-b.yml
rules:
  - name: from-b
    spec: "1 == 1"
"#;

    let c = r#"
imports:
  - url: https://example.com/d-via-c.yml
rules:
  - name: from-c
    spec: "1 == 1"
"#;

    let fetcher = FakeFetcher::new()
        .with("https://example.com/b.yml", b)
        .with("https://example.com/c.yml", c)
        .with("https://example.com/d-via-b.yml", shared)
        .with("https://example.com/d-via-c.yml", shared);

    let file = load(root, &fetcher).unwrap();

    let from_d: Vec<_> = file.rules.iter().filter(|r| r.name == "from-d").collect();
    assert_eq!(from_d.len(), 1);

    // b.yml merges its own rules first, then the shared import it pulled in.
    let names: Vec<&str> = file.rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["from-b", "from-d", "from-c"]);
}

#[test]
fn load_dedupes_mirror_urls_by_content_hash() {
    let root = br#"
imports:
  - url: https://mirror-one.example.com/shared.yml
  - url: https://mirror-two.example.com/shared.yml
"#;

    let shared = r#"
rules:
  - name: shared-rule
    spec: "1 == 1"
"#;

    let fetcher = FakeFetcher::new()
        .with("https://mirror-one.example.com/shared.yml", shared)
        .with("https://mirror-two.example.com/shared.yml", shared);

    let file = load(root, &fetcher).unwrap();
    assert_eq!(file.rules.len(), 1);
}

#[test]
fn load_keeps_existing_labels_on_merge() {
    let root = br#"
labels:
  bug:
    name: root-bug
imports:
  - url: https://example.com/labels.yml
"#;

    let imported = r#"
labels:
  bug:
    name: imported-bug
  feature:
    name: feature
"#;

    let fetcher = FakeFetcher::new().with("https://example.com/labels.yml", imported);

    let file = load(root, &fetcher).unwrap();
    assert_eq!(file.labels["bug"].name, "root-bug");
    assert_eq!(file.labels["feature"].name, "feature");
}

#[test]
fn load_keeps_rule_names_unique_on_merge() {
    let root = br#"
rules:
  - name: shared
    spec: "1 == 1"
imports:
  - url: https://example.com/dup.yml
"#;

    let imported = r#"
rules:
  - name: shared
    spec: "1 == 2"
  - name: extra
    spec: "1 == 1"
"#;

    let fetcher = FakeFetcher::new().with("https://example.com/dup.yml", imported);

    let file = load(root, &fetcher).unwrap();

    let shared: Vec<_> = file.rules.iter().filter(|r| r.name == "shared").collect();
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].spec, "1 == 1");
    assert!(file.rules.iter().any(|r| r.name == "extra"));
}

#[test]
fn load_propagates_fetch_errors() {
    let root = br#"
imports:
  - url: https://example.com/missing.yml
"#;

    let err = load(root, &FakeFetcher::new()).unwrap_err();
    assert!(matches!(err, RevpadError::Host(_)));
}

#[test]
fn load_rejects_unknown_mode() {
    let source = br#"
mode: shouting
"#;

    let err = load(source, &FakeFetcher::new()).unwrap_err();
    assert!(err.to_string().contains("unknown mode"));
}

#[test]
fn load_accepts_missing_mode_and_version() {
    let source = br#"
rules:
  - name: lone
    spec: "1 == 1"
"#;

    let file = load(source, &FakeFetcher::new()).unwrap();
    assert_eq!(file.mode, revpad::Mode::Silent);
    assert_eq!(file.version, "");
}
