// End-to-end loading of the fixture registry through the core pipelines

use chrono::{TimeZone, Utc};
use std::fs;
use std::path::PathBuf;
use svcreg_core::{build_bundle, detect_conflicts, validate_batch, SchemaValidator};
use svcreg_store::loader::partition;
use svcreg_store::{
    list_record_files, load_categories, load_config, load_records, load_schema_document,
    read_bundle_digest, write_bundle,
};
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("registry")
}

#[test]
fn test_fixture_registry_validates_cleanly() {
    // Given: the fixture registry with default layout
    let config = load_config(&fixtures_dir(), None).unwrap();
    let schema = load_schema_document(&config.layout.schema_path).unwrap();
    let validator = SchemaValidator::compile(&schema).unwrap();

    // When: every record is discovered, loaded and validated
    let files = list_record_files(&config.layout.records_dir).unwrap();
    let (records, failures) = partition(load_records(&files));
    let reports = validate_batch(&validator, &records);

    // Then: all three records load and pass, and nothing conflicts
    assert_eq!(files.len(), 3, "README.md must not be discovered");
    assert!(failures.is_empty());
    for report in &reports {
        assert!(report.passed(), "{}: {:?}", report.file, report.violations);
    }
    assert!(detect_conflicts(&records).is_empty());
}

#[test]
fn test_discovery_order_is_sorted() {
    let files = list_record_files(&fixtures_dir().join("servers")).unwrap();
    let names: Vec<&str> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap())
        .collect();
    assert_eq!(names, vec!["brave-search.json", "github.json", "postgres.yaml"]);
}

#[test]
fn test_build_writes_bundle_with_matching_digest() {
    // Given: the fixture records and categories
    let root = fixtures_dir();
    let files = list_record_files(&root.join("servers")).unwrap();
    let (records, _) = partition(load_records(&files));
    let categories = load_categories(&root.join("categories.json")).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap();

    // When: the bundle is built and written
    let out = build_bundle(&records, categories, &Default::default(), now);
    let dist = TempDir::new().unwrap();
    let target = dist.path().join("dist").join("bundle.json");
    write_bundle(&target, &out.bundle).unwrap();

    // Then: the file parses, is ordered by name and lists only used categories
    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
    let names: Vec<&str> = written["servers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Brave Search", "GitHub", "postgres"]);
    assert_eq!(written["home"]["featured_server_ids"], serde_json::json!(["github"]));
    let category_ids: Vec<&str> = written["ui"]["filters"][0]["options"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_str().unwrap())
        .collect();
    assert_eq!(category_ids, vec!["developer-tools", "databases", "search"]);

    // And: a rebuild at a later instant has the same semantic digest
    let later = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
    let rebuilt = build_bundle(&records, out.bundle.categories.clone(), &Default::default(), later);
    assert_eq!(
        read_bundle_digest(&target).unwrap(),
        Some(svcreg_core::bundle::semantic_digest(&rebuilt.bundle).unwrap())
    );
}

#[test]
fn test_parse_failure_is_reported_per_file() {
    // Given: a records dir with one good and one malformed record
    let tmp = TempDir::new().unwrap();
    let servers = tmp.path().join("servers");
    fs::create_dir(&servers).unwrap();
    fs::write(servers.join("a.json"), r#"{"id": "a"}"#).unwrap();
    fs::write(servers.join("b.yaml"), "id: [unterminated").unwrap();

    // When: the batch is loaded
    let files = list_record_files(&servers).unwrap();
    let outcomes = load_records(&files);

    // Then: the good file still loads and the failure names its file
    assert!(outcomes[0].is_ok());
    let err = outcomes[1].result.as_ref().unwrap_err();
    assert_eq!(err.code(), "ERR_PARSE");
    assert!(err.file().unwrap().ends_with("b.yaml"));
}
