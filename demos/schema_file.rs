//! Schema file example.
//!
//! Writes a YAML schema file, loads it back with linting, checks an
//! argument vector with the resulting checker, and prints the matches as
//! JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p argchecker-demos --example schema_file
//! ```
//!
//! This example creates a temporary schema file to demonstrate the API.

use argchecker_loader::SchemaFile;

const SCHEMA: &str = r#"
name: convert
expect:
  -q: {}
  -f: { param: FORMAT, default: png }
  -s: { param: SIZE, repeat: true }
  INPUT: { must: true, repeat: true }
  OUTPUT: {}
"#;

fn main() {
    let dir = std::env::temp_dir().join("argchecker_example_schema");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("convert.yaml");
    std::fs::write(&path, SCHEMA).unwrap();

    let file = SchemaFile::load_validated(&path).unwrap();
    println!("Loaded {} keys from {}", file.expect.len(), path.display());

    // Save a JSON copy next to it
    let json_path = dir.join("convert.json");
    file.save(&json_path).unwrap();
    let reloaded = SchemaFile::load(&json_path).unwrap();
    assert_eq!(reloaded, file);

    let mut checker = file.to_checker(None);
    println!("{}", checker.usage());

    let args = ["-s", "64", "-f", "-", "-s", "128", "logo.svg", "icon.svg", "out/"];
    checker.check(args).unwrap();
    println!("$ convert {}", args.join(" "));
    println!("{}", serde_json::to_string_pretty(checker.matches()).unwrap());

    std::fs::remove_dir_all(&dir).unwrap();
}
