//! Schema type definitions.
//!
//! A [`Schema`] is an ordered list of keys, each carrying an [`OptionSpec`].
//! Declaration order matters twice: it fixes the order of tokens in the
//! synthesized usage line, and it decides which positional slot receives
//! which positional token. Schemas serialize as a JSON/YAML object whose
//! member order is the declaration order.

use indexmap::IndexMap;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};

/// Declaration of a single schema key.
///
/// The same record describes named switches (`-v`, `-o`) and positional
/// slots (`INPUT`); which one a key is depends only on the key itself.
///
/// # Examples
///
/// ```
/// use argchecker_core::OptionSpec;
///
/// let output = OptionSpec::param("FILE").with_default("out.txt");
/// assert!(output.takes_value());
/// assert_eq!(output.default.as_deref(), Some("out.txt"));
///
/// let inputs = OptionSpec::positional().required().repeated();
/// assert!(inputs.must);
/// assert!(inputs.repeat);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionSpec {
    /// Label of the value a named key consumes (e.g. `FILE`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    /// Value used when the key is given without one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Occurrences accumulate instead of being rejected as duplicates.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub repeat: bool,
    /// The key has to appear at least once.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub must: bool,
}

impl OptionSpec {
    /// A switch that takes no value.
    pub fn flag() -> Self {
        Self::default()
    }

    /// A switch that consumes the following token, labelled `label` in the
    /// usage line.
    pub fn param(label: &str) -> Self {
        Self {
            param: Some(label.to_string()),
            ..Self::default()
        }
    }

    /// A positional slot.
    pub fn positional() -> Self {
        Self::default()
    }

    /// Sets the value used when the switch is given without one.
    pub fn with_default(mut self, value: &str) -> Self {
        self.default = Some(value.to_string());
        self
    }

    /// Marks the key as repeatable.
    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }

    /// Marks the key as mandatory.
    pub fn required(mut self) -> Self {
        self.must = true;
        self
    }

    /// Whether a named key with this spec consumes a value token.
    pub fn takes_value(&self) -> bool {
        self.param.is_some()
    }
}

/// Ordered collection of schema keys.
///
/// Keys are kept in declaration order. [`Schema::with`] appends without
/// deduplicating so that [`validate_schema`](crate::validate_schema) can
/// report repeated declarations; [`Schema::insert`] replaces an existing
/// declaration in place.
///
/// # Examples
///
/// ```
/// use argchecker_core::{OptionSpec, Schema};
///
/// let schema = Schema::new()
///     .with("-a", OptionSpec::flag())
///     .with("XX", OptionSpec::positional());
///
/// assert_eq!(schema.keys().collect::<Vec<_>>(), vec!["-a", "XX"]);
/// assert!(schema.get("-a").is_some());
/// assert!(schema.get("-b").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "IndexMap<String, OptionSpec>",
    into = "IndexMap<String, OptionSpec>"
)]
pub struct Schema {
    entries: Vec<(String, OptionSpec)>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a key declaration.
    pub fn with(mut self, key: impl Into<String>, spec: OptionSpec) -> Self {
        self.entries.push((key.into(), spec));
        self
    }

    /// Declares `key`, replacing an earlier declaration of the same key
    /// without moving it.
    pub fn insert(&mut self, key: impl Into<String>, spec: OptionSpec) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = spec,
            None => self.entries.push((key, spec)),
        }
    }

    /// Looks up the first declaration of `key`.
    pub fn get(&self, key: &str) -> Option<&OptionSpec> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, spec)| spec)
    }

    /// Iterates over declarations in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionSpec)> {
        self.entries.iter().map(|(key, spec)| (key.as_str(), spec))
    }

    /// Iterates over declared keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entry(&self, index: usize) -> (&str, &OptionSpec) {
        let (key, spec) = &self.entries[index];
        (key.as_str(), spec)
    }
}

impl From<IndexMap<String, OptionSpec>> for Schema {
    fn from(map: IndexMap<String, OptionSpec>) -> Self {
        Self {
            entries: map.into_iter().collect(),
        }
    }
}

impl From<Schema> for IndexMap<String, OptionSpec> {
    fn from(schema: Schema) -> Self {
        schema.entries.into_iter().collect()
    }
}

impl<K: Into<String>> FromIterator<(K, OptionSpec)> for Schema {
    fn from_iter<T: IntoIterator<Item = (K, OptionSpec)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, spec)| (k.into(), spec)).collect(),
        }
    }
}

/// Value matched for a single key.
///
/// Serializes as `null` (absent), `true` (flag), a string (single value) or
/// an array of strings (repeated key).
///
/// # Examples
///
/// ```
/// use argchecker_core::ArgValue;
///
/// let flag = ArgValue::Flag;
/// assert!(flag.is_present());
/// assert_eq!(flag.len(), 0);
///
/// let many = ArgValue::Multi(vec!["1".into(), "2".into()]);
/// assert_eq!(many.values(), ["1", "2"]);
/// assert_eq!(many.as_str(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ArgValue {
    /// The key was not observed.
    #[default]
    Absent,
    /// A switch without parameter was given.
    Flag,
    /// A non-repeatable key received one value.
    Single(String),
    /// A repeatable key, values in input order.
    Multi(Vec<String>),
}

impl ArgValue {
    /// Whether the key was observed.
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    /// Whether this is a bare flag.
    pub fn is_flag(&self) -> bool {
        matches!(self, Self::Flag)
    }

    /// The value of a single-valued key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            _ => None,
        }
    }

    /// All values, in input order. Empty for absent keys and bare flags.
    pub fn values(&self) -> &[String] {
        match self {
            Self::Absent | Self::Flag => &[],
            Self::Single(value) => std::slice::from_ref(value),
            Self::Multi(values) => values,
        }
    }

    /// Number of values carried.
    pub fn len(&self) -> usize {
        self.values().len()
    }

    /// Whether no value is carried (absent keys and bare flags).
    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }
}

impl Serialize for ArgValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Absent => serializer.serialize_none(),
            Self::Flag => serializer.serialize_bool(true),
            Self::Single(value) => serializer.serialize_str(value),
            Self::Multi(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
        }
    }
}
