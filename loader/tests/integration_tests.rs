use std::path::Path;

use argchecker_core::{CheckError, OptionSpec, Schema, SchemaIssue};
use argchecker_loader::{LoaderError, SchemaFile};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn backup_schema() -> SchemaFile {
    let expect = Schema::new()
        .with("-v", OptionSpec::flag().repeated())
        .with("-o", OptionSpec::param("DIR").with_default("/tmp/backup"))
        .with("-x", OptionSpec::param("PATTERN").repeated())
        .with("SOURCE", OptionSpec::positional().required().repeated())
        .with("DEST", OptionSpec::positional().required());
    SchemaFile::new(Some("backup"), expect)
}

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

// ---------------------------------------------------------------------------
// Round trips through disk
// ---------------------------------------------------------------------------

#[test]
fn test_save_and_load_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("backup.json");

    let original = backup_schema();
    original.save(&path).unwrap();
    let loaded = SchemaFile::load(&path).unwrap();

    assert_eq!(loaded, original);
    assert_eq!(
        loaded.expect.keys().collect::<Vec<_>>(),
        vec!["-v", "-o", "-x", "SOURCE", "DEST"]
    );
}

#[test]
fn test_save_and_load_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("backup.yml");

    let original = backup_schema();
    original.save(&path).unwrap();
    let loaded = SchemaFile::load(&path).unwrap();

    assert_eq!(loaded, original);
}

#[test]
fn test_loaded_schema_checks_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("backup.json");
    backup_schema().save(&path).unwrap();

    let mut checker = SchemaFile::load_validated(&path).unwrap().to_checker(None);
    assert_eq!(
        checker.usage(),
        "Usage: backup [-v] ... [-o [DIR]] [-x PATTERN] ... SOURCE ... DEST"
    );

    checker
        .check(["-v", "-x", "*.o", "src", "docs", "-o", "-", "/mnt/disk"])
        .unwrap();
    assert!(checker.get("-v").is_flag());
    assert_eq!(checker.get("-o").as_str(), Some("/tmp/backup"));
    assert_eq!(checker.get("-x").values(), ["*.o"]);
    assert_eq!(checker.get("SOURCE").values(), ["src", "docs"]);
    assert_eq!(checker.get("DEST").as_str(), Some("/mnt/disk"));

    let err = checker.check(["src"]).unwrap_err();
    assert_eq!(err, CheckError::MissingRequiredKey("DEST".into()));
}

// ---------------------------------------------------------------------------
// Failure modes
// ---------------------------------------------------------------------------

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "schema.toml", "name = 'x'");

    let err = SchemaFile::load(&path).unwrap_err();
    assert!(matches!(err, LoaderError::UnsupportedFormat(p) if p == path));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = SchemaFile::load(dir.path().join("absent.json")).unwrap_err();

    assert!(matches!(err, LoaderError::IoError(_)));
}

#[test]
fn test_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "broken.json", "{\"expect\": [");

    let err = SchemaFile::load(&path).unwrap_err();
    assert!(matches!(err, LoaderError::JsonError(_)));
}

#[test]
fn test_malformed_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "broken.yaml", "expect:\n  -a: { repeat: maybe }\n");

    let err = SchemaFile::load(&path).unwrap_err();
    assert!(matches!(err, LoaderError::YamlError(_)));
}

#[test]
fn test_load_validated_rejects_lint_issues() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "lint.yaml",
        "expect:\n  -v: { default: \"1\" }\n  XX: { repeat: true }\n  YY: { repeat: true }\n",
    );

    // Plain loading accepts it.
    assert!(SchemaFile::load(&path).is_ok());

    let err = SchemaFile::load_validated(&path).unwrap_err();
    match err {
        LoaderError::InvalidSchema { path: p, issues } => {
            assert_eq!(p, path);
            assert_eq!(
                issues,
                vec![
                    SchemaIssue::DefaultWithoutParam("-v".into()),
                    SchemaIssue::MultipleRepeatPositionals("YY".into()),
                ]
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_load_validated_rejects_empty_switch_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "flat.json",
        r#"{"switch_prefix": "", "expect": {"FILE": {}}}"#,
    );

    // Without the lint, every positional argument would be rejected.
    let mut checker = SchemaFile::load(&path).unwrap().to_checker(None);
    assert_eq!(
        checker.check(["a.txt"]).unwrap_err(),
        CheckError::UnrecognizedOption("a.txt".into())
    );

    let err = SchemaFile::load_validated(&path).unwrap_err();
    match err {
        LoaderError::InvalidSchema { issues, .. } => {
            assert_eq!(issues, vec![SchemaIssue::EmptySwitchPrefix]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_load_validated_rejects_empty_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "blank.yaml",
        "placeholder: \"\"\nexpect:\n  -o: { param: FILE, default: out }\n",
    );

    let err = SchemaFile::load_validated(&path).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!(
            "invalid schema in {}: placeholder token cannot be empty",
            path.display()
        )
    );
}

#[test]
fn test_invalid_schema_message_lists_issues() {
    let err = LoaderError::InvalidSchema {
        path: "app.json".into(),
        issues: vec![
            SchemaIssue::EmptyKey,
            SchemaIssue::DuplicateKey("-a".into()),
        ],
    };

    assert_eq!(
        err.to_string(),
        "invalid schema in app.json: schema key cannot be empty; duplicate key in schema: -a"
    );
}
