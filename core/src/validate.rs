//! Schema linting.
//!
//! [`Checker`](crate::Checker) accepts any schema, but some declarations can
//! never match the way their author intended: a `default` on a switch that
//! takes no value, a key that collides with the placeholder token, or two
//! repeatable positional keys competing for the same surplus. These checks
//! catch such problems before a schema is shipped.
//!
//! # Examples
//!
//! ```
//! use argchecker_core::*;
//!
//! let schema = Schema::new()
//!     .with("-o", OptionSpec::param("FILE").with_default("out.txt"))
//!     .with("INPUT", OptionSpec::positional().required());
//! assert!(validate_schema(&schema).is_empty());
//!
//! // Invalid: default on a switch without param
//! let bad = Schema::new().with("-v", OptionSpec::flag().with_default("1"));
//! assert_eq!(
//!     validate_schema(&bad),
//!     vec![SchemaIssue::DefaultWithoutParam("-v".into())]
//! );
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{CheckerOptions, Schema};

/// Problems found in a schema declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaIssue {
    /// The switch prefix is empty, so every key and token would be a switch.
    #[error("switch prefix cannot be empty")]
    EmptySwitchPrefix,
    /// The placeholder is empty, so an empty argument would select defaults.
    #[error("placeholder token cannot be empty")]
    EmptyPlaceholder,
    /// A key is empty or whitespace-only.
    #[error("schema key cannot be empty")]
    EmptyKey,
    /// The same key is declared twice.
    #[error("duplicate key in schema: {0}")]
    DuplicateKey(String),
    /// A key equals the placeholder token.
    #[error("key conflicts with the placeholder token: {0}")]
    PlaceholderKey(String),
    /// A switch declares a default but takes no value.
    #[error("default declared without param: {0}")]
    DefaultWithoutParam(String),
    /// A positional key declares a param label, which is never shown.
    #[error("param declared on positional key: {0}")]
    PositionalParam(String),
    /// A positional key declares a default, which is never used.
    #[error("default declared on positional key: {0}")]
    PositionalDefault(String),
    /// A second repeatable positional key, which can only ever get one token.
    #[error("more than one repeatable positional key: {0}")]
    MultipleRepeatPositionals(String),
}

/// Lints a schema using the default token conventions.
pub fn validate_schema(schema: &Schema) -> Vec<SchemaIssue> {
    validate_schema_with(schema, &CheckerOptions::default())
}

/// Lints a schema using custom token conventions.
///
/// Returns every issue found: problems with the conventions first, then the
/// keys in declaration order.
pub fn validate_schema_with(schema: &Schema, options: &CheckerOptions) -> Vec<SchemaIssue> {
    let mut issues = Vec::new();
    if options.switch_prefix.is_empty() {
        issues.push(SchemaIssue::EmptySwitchPrefix);
    }
    if options.placeholder.is_empty() {
        issues.push(SchemaIssue::EmptyPlaceholder);
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut repeat_positional: Option<&str> = None;

    for (key, spec) in schema.iter() {
        if key.trim().is_empty() {
            issues.push(SchemaIssue::EmptyKey);
            continue;
        }

        if !seen.insert(key) {
            issues.push(SchemaIssue::DuplicateKey(key.to_string()));
            continue;
        }

        if key == options.placeholder {
            issues.push(SchemaIssue::PlaceholderKey(key.to_string()));
        }

        if options.is_named_key(key) {
            if spec.default.is_some() && spec.param.is_none() {
                issues.push(SchemaIssue::DefaultWithoutParam(key.to_string()));
            }
        } else {
            if spec.param.is_some() {
                issues.push(SchemaIssue::PositionalParam(key.to_string()));
            }
            if spec.default.is_some() {
                issues.push(SchemaIssue::PositionalDefault(key.to_string()));
            }
            if spec.repeat {
                match repeat_positional {
                    Some(_) => issues.push(SchemaIssue::MultipleRepeatPositionals(key.to_string())),
                    None => repeat_positional = Some(key),
                }
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use crate::OptionSpec;

    use super::*;

    #[test]
    fn test_validate_schema_accepts_valid_schema() {
        let schema = Schema::new()
            .with("-a", OptionSpec::param("PARAM_A").with_default("1"))
            .with("-b", OptionSpec::flag())
            .with("-c", OptionSpec::param("PARAM_C").repeated())
            .with("XX", OptionSpec::positional().repeated())
            .with("YY", OptionSpec::positional())
            .with("ZZ", OptionSpec::positional().required());

        assert!(validate_schema(&schema).is_empty());
    }

    #[test]
    fn test_validate_schema_rejects_duplicate_key() {
        let schema = Schema::new()
            .with("-a", OptionSpec::flag())
            .with("-a", OptionSpec::param("N"));

        assert_eq!(
            validate_schema(&schema),
            vec![SchemaIssue::DuplicateKey("-a".to_string())]
        );
    }

    #[test]
    fn test_validate_schema_rejects_placeholder_key() {
        let schema = Schema::new().with("-", OptionSpec::flag());

        assert_eq!(
            validate_schema(&schema),
            vec![SchemaIssue::PlaceholderKey("-".to_string())]
        );
    }

    #[test]
    fn test_validate_schema_rejects_empty_key() {
        let schema = Schema::new().with("  ", OptionSpec::positional());

        assert_eq!(validate_schema(&schema), vec![SchemaIssue::EmptyKey]);
    }

    #[test]
    fn test_validate_schema_rejects_positional_default() {
        let schema = Schema::new().with("XX", OptionSpec::positional().with_default("1"));

        assert_eq!(
            validate_schema(&schema),
            vec![SchemaIssue::PositionalDefault("XX".to_string())]
        );
    }

    #[test]
    fn test_validate_schema_rejects_positional_param() {
        let schema = Schema::new().with("FILE", OptionSpec::param("PATH"));

        assert_eq!(
            validate_schema(&schema),
            vec![SchemaIssue::PositionalParam("FILE".to_string())]
        );
    }

    #[test]
    fn test_validate_schema_reports_every_issue() {
        let schema = Schema::new()
            .with("-v", OptionSpec::flag().with_default("yes"))
            .with("XX", OptionSpec::positional().repeated())
            .with("YY", OptionSpec::positional().repeated());

        assert_eq!(
            validate_schema(&schema),
            vec![
                SchemaIssue::DefaultWithoutParam("-v".to_string()),
                SchemaIssue::MultipleRepeatPositionals("YY".to_string()),
            ]
        );
    }

    #[test]
    fn test_validate_schema_rejects_empty_conventions() {
        let schema = Schema::new().with("FILE", OptionSpec::positional());
        let options = CheckerOptions {
            switch_prefix: String::new(),
            placeholder: String::new(),
        };

        assert_eq!(
            validate_schema_with(&schema, &options),
            vec![SchemaIssue::EmptySwitchPrefix, SchemaIssue::EmptyPlaceholder]
        );
    }

    #[test]
    fn test_validate_schema_with_custom_prefix() {
        let options = CheckerOptions {
            switch_prefix: "+".into(),
            placeholder: "-".into(),
        };
        // Under a `+` prefix, `-v` is positional.
        let schema = Schema::new().with("-v", OptionSpec::positional().with_default("1"));

        assert_eq!(
            validate_schema_with(&schema, &options),
            vec![SchemaIssue::PositionalDefault("-v".to_string())]
        );
    }
}
