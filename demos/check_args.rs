//! Argument checking example.
//!
//! Builds a schema in code, prints its usage line, and checks a few
//! argument vectors against it, showing both accepted and rejected input.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p argchecker-demos --example check_args
//! ```

use argchecker_core::{ArgValue, Checker, OptionSpec, Schema, validate_schema};

fn main() {
    let schema = Schema::new()
        .with("-v", OptionSpec::flag().repeated())
        .with("-n", OptionSpec::flag())
        .with("-o", OptionSpec::param("DIR").with_default("./out"))
        .with("-x", OptionSpec::param("PATTERN").repeated())
        .with("SOURCE", OptionSpec::positional().required().repeated())
        .with("DEST", OptionSpec::positional().required());

    let issues = validate_schema(&schema);
    assert!(issues.is_empty(), "schema has issues: {issues:?}");

    let mut checker = Checker::new(schema, Some("sync"));
    println!("{}", checker.usage());
    println!();

    let inputs: [&[&str]; 5] = [
        &["a.txt", "b.txt", "/mnt/backup"],
        &["-v", "-x", "*.o", "-x", "*.tmp", "-o", "-", "src", "/mnt/backup"],
        &["-o", "/srv", "src"],
        &["-n", "-n", "src", "dest"],
        &["-q", "src", "dest"],
    ];

    for args in inputs {
        println!("$ sync {}", args.join(" "));
        match checker.check(args) {
            Ok(()) => {
                for (key, value) in checker.matches().iter() {
                    println!("  {key:<8} {}", describe(value));
                }
            }
            Err(err) => println!("  rejected: {err}"),
        }
        println!();
    }

    // The last successful check is cleared by a failed one.
    println!("matches after failure: {}", checker.matches().len());
}

fn describe(value: &ArgValue) -> String {
    match value {
        ArgValue::Absent => "(absent)".to_string(),
        ArgValue::Flag => "on".to_string(),
        ArgValue::Single(v) => v.clone(),
        ArgValue::Multi(vs) => vs.join(", "),
    }
}
