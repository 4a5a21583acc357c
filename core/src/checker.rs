//! The argument checking engine.
//!
//! [`Checker`] owns a [`Schema`], the usage line synthesized from it, and the
//! [`Matches`] of the most recent [`Checker::check`] call.
//!
//! Checking happens in three steps:
//!
//! 1. A left-to-right scan matches named switches (consuming their value
//!    token when they take one) and queues every other token as positional.
//! 2. Queued positional tokens are distributed over the positional keys in
//!    declaration order. A repeatable key absorbs the surplus, keeping one
//!    token in reserve for every positional key declared after it; an
//!    optional key gives way when the remaining tokens are only enough for
//!    the mandatory keys after it.
//! 3. The requiredness pass rejects the input if any `must` key is absent.
//!
//! # Examples
//!
//! ```
//! use argchecker_core::*;
//!
//! let schema = Schema::new()
//!     .with("XX", OptionSpec::positional().repeated())
//!     .with("YY", OptionSpec::positional().required());
//! let mut checker = Checker::new(schema, None);
//!
//! checker.check(["10", "11", "12", "20"]).unwrap();
//! assert_eq!(checker.get("XX").values(), ["10", "11", "12"]);
//! assert_eq!(checker.get("YY").as_str(), Some("20"));
//!
//! let err = checker.check(Vec::<String>::new()).unwrap_err();
//! assert_eq!(err, CheckError::MissingRequiredKey("YY".into()));
//! assert!(!checker.is_on("XX"));
//! ```

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::{ArgValue, CheckError, OptionSpec, Schema};

/// Program name used in the usage line when none is given.
pub const DEFAULT_PROGRAM_NAME: &str = "command";

static ABSENT: ArgValue = ArgValue::Absent;

/// Token conventions used by a [`Checker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerOptions {
    /// Keys starting with this prefix are named switches (default `-`).
    pub switch_prefix: String,
    /// Token that selects a switch's default value (default `-`).
    pub placeholder: String,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        Self {
            switch_prefix: "-".to_string(),
            placeholder: "-".to_string(),
        }
    }
}

impl CheckerOptions {
    /// Whether a schema key denotes a named switch.
    pub fn is_named_key(&self, key: &str) -> bool {
        key.starts_with(self.switch_prefix.as_str())
    }

    /// Whether an argument token should be read as a switch. The bare
    /// placeholder is never a switch.
    pub fn looks_like_switch(&self, token: &str) -> bool {
        token != self.placeholder && self.is_named_key(token)
    }
}

/// Values matched by a successful check, in declaration order.
///
/// Serializes as a map from key to [`ArgValue`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Matches {
    values: IndexMap<String, ArgValue>,
}

impl Matches {
    /// Value matched for `key`, [`ArgValue::Absent`] if unobserved.
    pub fn get(&self, key: &str) -> &ArgValue {
        self.values.get(key).unwrap_or(&ABSENT)
    }

    /// Whether `key` was observed.
    pub fn is_on(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Observed keys and their values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of observed keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing was observed.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn record(
        &mut self,
        key: &str,
        spec: &OptionSpec,
        value: Option<String>,
    ) -> Result<(), CheckError> {
        if let Some(existing) = self.values.get_mut(key) {
            if !spec.repeat {
                return Err(CheckError::DuplicateOption(key.to_string()));
            }
            // Repeated bare flags only stay marked present.
            if let (ArgValue::Multi(values), Some(value)) = (existing, value) {
                values.push(value);
            }
            return Ok(());
        }

        let entry = match value {
            None => ArgValue::Flag,
            Some(value) if spec.repeat => ArgValue::Multi(vec![value]),
            Some(value) => ArgValue::Single(value),
        };
        self.values.insert(key.to_string(), entry);
        Ok(())
    }

    fn ordered_by(mut self, schema: &Schema) -> Self {
        let mut values = IndexMap::with_capacity(self.values.len());
        for key in schema.keys() {
            if let Some((key, value)) = self.values.swap_remove_entry(key) {
                values.insert(key, value);
            }
        }
        Self { values }
    }
}

/// Schema-driven argument checker.
///
/// Construct once per schema, call [`check`](Checker::check) with an
/// argument vector (program path already stripped), then query the result
/// with [`get`](Checker::get) and [`is_on`](Checker::is_on). Each call to
/// `check` replaces the previous result; a failed call leaves no result.
#[derive(Debug, Clone)]
pub struct Checker {
    schema: Schema,
    options: CheckerOptions,
    named: Vec<usize>,
    positional: Vec<usize>,
    usage: String,
    matches: Matches,
}

impl Checker {
    /// Creates a checker with the default token conventions.
    ///
    /// `name` is the program name shown in the usage line and defaults to
    /// [`DEFAULT_PROGRAM_NAME`].
    pub fn new(schema: Schema, name: Option<&str>) -> Self {
        Self::with_options(schema, name, CheckerOptions::default())
    }

    /// Creates a checker with custom token conventions.
    pub fn with_options(schema: Schema, name: Option<&str>, options: CheckerOptions) -> Self {
        let (named, positional): (Vec<usize>, Vec<usize>) =
            (0..schema.len()).partition(|&index| options.is_named_key(schema.entry(index).0));
        let usage = render_usage(
            name.unwrap_or(DEFAULT_PROGRAM_NAME),
            &schema,
            &named,
            &positional,
        );

        Self {
            schema,
            options,
            named,
            positional,
            usage,
            matches: Matches::default(),
        }
    }

    /// The synthesized usage line, e.g. `Usage: app [-a [N]] [-b] FILE ...`.
    ///
    /// # Examples
    ///
    /// ```
    /// use argchecker_core::{Checker, OptionSpec, Schema};
    ///
    /// let schema = Schema::new()
    ///     .with("-c", OptionSpec::param("PARAM_C").repeated())
    ///     .with("ZZ", OptionSpec::positional().required());
    /// let checker = Checker::new(schema, Some("testapp"));
    /// assert_eq!(checker.usage(), "Usage: testapp [-c PARAM_C] ... ZZ");
    /// ```
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// The schema this checker was built from.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Token conventions in use.
    pub fn options(&self) -> &CheckerOptions {
        &self.options
    }

    /// Checks an argument vector against the schema.
    ///
    /// On success the matches are replaced by the result of this call. On
    /// failure the matches are cleared and the first violation is returned.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckError`] describing the first violation found: an
    /// unknown switch, a repeated non-repeatable key, a switch missing its
    /// value, surplus positional tokens, or an absent `must` key.
    pub fn check<I, S>(&mut self, args: I) -> Result<(), CheckError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.matches = Matches::default();

        let args: Vec<S> = args.into_iter().collect();
        let tokens: Vec<&str> = args.iter().map(AsRef::as_ref).collect();

        match self.scan(&tokens) {
            Ok(matches) => {
                debug!(matched = matches.len(), "argument check passed");
                self.matches = matches;
                Ok(())
            }
            Err(err) => {
                debug!(error = %err, "argument check failed");
                Err(err)
            }
        }
    }

    /// Reads `key` from the result of the last successful check.
    ///
    /// After a failed check every key reads as [`ArgValue::Absent`], as do
    /// keys the schema never declared.
    pub fn get(&self, key: &str) -> &ArgValue {
        self.matches.get(key)
    }

    /// Whether `key` was given (directly or default-filled) in the last
    /// successful check.
    pub fn is_on(&self, key: &str) -> bool {
        self.matches.is_on(key)
    }

    /// All matches of the last successful check.
    pub fn matches(&self) -> &Matches {
        &self.matches
    }

    fn find_named(&self, token: &str) -> Option<(&str, &OptionSpec)> {
        self.named
            .iter()
            .map(|&index| self.schema.entry(index))
            .find(|(key, _)| *key == token)
    }

    fn scan(&self, args: &[&str]) -> Result<Matches, CheckError> {
        let mut matches = Matches::default();
        let mut positional_tokens = Vec::new();
        let mut cursor = 0;

        while let Some(&token) = args.get(cursor) {
            cursor += 1;

            if let Some((key, spec)) = self.find_named(token) {
                let value = if spec.takes_value() {
                    let (value, consumed) = self.take_param(key, spec, args.get(cursor).copied())?;
                    cursor += consumed;
                    Some(value)
                } else {
                    None
                };
                debug!(key, value = ?value, "matched named option");
                matches.record(key, spec, value)?;
            } else if self.options.looks_like_switch(token) {
                return Err(CheckError::UnrecognizedOption(token.to_string()));
            } else {
                positional_tokens.push(token);
            }
        }

        self.assign_positionals(&positional_tokens, &mut matches)?;

        for (key, spec) in self.schema.iter() {
            if spec.must && !matches.is_on(key) {
                return Err(CheckError::MissingRequiredKey(key.to_string()));
            }
        }

        Ok(matches.ordered_by(&self.schema))
    }

    /// Resolves the value of a value-taking switch from the token after it.
    /// Any token other than the placeholder or a declared switch is taken
    /// verbatim, so `-5` is a value. Returns the value and how many tokens
    /// were consumed.
    fn take_param(
        &self,
        key: &str,
        spec: &OptionSpec,
        next: Option<&str>,
    ) -> Result<(String, usize), CheckError> {
        let fallback = || {
            spec.default
                .clone()
                .ok_or_else(|| CheckError::MissingRequiredValue(key.to_string()))
        };

        match next {
            Some(next) if next == self.options.placeholder => Ok((fallback()?, 1)),
            Some(next) if self.find_named(next).is_none() => Ok((next.to_string(), 1)),
            _ => Ok((fallback()?, 0)),
        }
    }

    fn assign_positionals(&self, tokens: &[&str], matches: &mut Matches) -> Result<(), CheckError> {
        let mut next = 0;

        for (slot, &index) in self.positional.iter().enumerate() {
            let remaining = tokens.len() - next;
            if remaining == 0 {
                break;
            }

            let (key, spec) = self.schema.entry(index);
            let later = &self.positional[slot + 1..];
            let reserved = later
                .iter()
                .filter(|&&later_index| self.schema.entry(later_index).1.must)
                .count();

            if !spec.must && remaining <= reserved {
                debug!(key, remaining, "optional positional left empty");
                continue;
            }

            let take = if spec.repeat {
                remaining.saturating_sub(later.len()).max(1)
            } else {
                1
            };
            for &token in &tokens[next..next + take] {
                matches.record(key, spec, Some(token.to_string()))?;
            }
            debug!(key, count = take, "assigned positional tokens");
            next += take;
        }

        match tokens.get(next) {
            Some(extra) => Err(CheckError::UnexpectedExtraArgument(extra.to_string())),
            None => Ok(()),
        }
    }
}

fn render_usage(name: &str, schema: &Schema, named: &[usize], positional: &[usize]) -> String {
    let mut parts = vec![format!("Usage: {name}")];

    for &index in named {
        let (key, spec) = schema.entry(index);
        let mut part = match (&spec.param, &spec.default) {
            (None, _) => format!("[{key}]"),
            (Some(param), Some(_)) => format!("[{key} [{param}]]"),
            (Some(param), None) => format!("[{key} {param}]"),
        };
        if spec.repeat {
            part.push_str(" ...");
        }
        parts.push(part);
    }

    for &index in positional {
        let (key, spec) = schema.entry(index);
        let mut part = if spec.must {
            key.to_string()
        } else {
            format!("[{key}]")
        };
        if spec.repeat {
            part.push_str(" ...");
        }
        parts.push(part);
    }

    parts.join(" ")
}
