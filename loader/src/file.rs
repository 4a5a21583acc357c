//! On-disk schema files.
//!
//! A schema file names the program and declares its expected arguments. The
//! `expect` object is read in document order, which becomes the declaration
//! order of the [`Schema`].
//!
//! # Example YAML
//!
//! ```yaml
//! name: testapp
//! expect:
//!   -a: { param: PARAM_A, default: "1" }
//!   -b: {}
//!   -c: { param: PARAM_C, repeat: true }
//!   XX: { repeat: true }
//!   ZZ: { must: true }
//! ```
//!
//! The same file as JSON:
//!
//! ```json
//! {
//!   "name": "testapp",
//!   "expect": {
//!     "-a": { "param": "PARAM_A", "default": "1" },
//!     "-b": {},
//!     "-c": { "param": "PARAM_C", "repeat": true },
//!     "XX": { "repeat": true },
//!     "ZZ": { "must": true }
//!   }
//! }
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use argchecker_core::{Checker, CheckerOptions, Schema, validate_schema_with};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LoaderError, Result};

/// Serialization format of a schema file, picked by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// `.json`
    Json,
    /// `.yaml` or `.yml`
    Yaml,
}

impl SchemaFormat {
    /// Detects the format from a file extension (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use argchecker_loader::SchemaFormat;
    ///
    /// assert_eq!(SchemaFormat::from_path("app.json"), Some(SchemaFormat::Json));
    /// assert_eq!(SchemaFormat::from_path("app.YML"), Some(SchemaFormat::Yaml));
    /// assert_eq!(SchemaFormat::from_path("app.toml"), None);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    fn require(path: &Path) -> Result<Self> {
        Self::from_path(path).ok_or_else(|| LoaderError::UnsupportedFormat(path.to_path_buf()))
    }
}

/// A program's argument schema as stored on disk.
///
/// # Examples
///
/// ```
/// use argchecker_loader::SchemaFile;
///
/// let file = SchemaFile::from_yaml_str(r#"
/// name: testapp
/// expect:
///   -a: { param: PARAM_A, default: "1" }
///   XX: { must: true }
/// "#).unwrap();
///
/// let mut checker = file.to_checker(None);
/// assert_eq!(checker.usage(), "Usage: testapp [-a [PARAM_A]] XX");
///
/// checker.check(["-a", "-", "10"]).unwrap();
/// assert_eq!(checker.get("-a").as_str(), Some("1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaFile {
    /// Program name shown in the usage line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Overrides the switch prefix (default `-`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub switch_prefix: Option<String>,
    /// Overrides the placeholder token (default `-`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Expected arguments, in declaration order.
    #[serde(default)]
    pub expect: Schema,
}

impl SchemaFile {
    /// Creates a schema file with default token conventions.
    pub fn new(name: Option<&str>, expect: Schema) -> Self {
        Self {
            name: name.map(String::from),
            expect,
            ..Self::default()
        }
    }

    /// Loads a schema file, choosing JSON or YAML by extension.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedFormat`](LoaderError::UnsupportedFormat) for
    /// unknown extensions, [`IoError`](LoaderError::IoError) if the file
    /// cannot be read, or a JSON/YAML error if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = SchemaFormat::require(path)?;
        let reader = BufReader::new(std::fs::File::open(path)?);

        let file: Self = match format {
            SchemaFormat::Json => serde_json::from_reader(reader)?,
            SchemaFormat::Yaml => serde_yaml::from_reader(reader)?,
        };
        debug!(
            path = %path.display(),
            keys = file.expect.len(),
            "Loaded schema file"
        );
        Ok(file)
    }

    /// Loads a schema file and rejects it if linting finds issues.
    ///
    /// # Errors
    ///
    /// Everything [`load`](Self::load) returns, plus
    /// [`InvalidSchema`](LoaderError::InvalidSchema).
    pub fn load_validated(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = Self::load(path)?;
        let issues = validate_schema_with(&file.expect, &file.options());
        if !issues.is_empty() {
            return Err(LoaderError::InvalidSchema {
                path: path.to_path_buf(),
                issues,
            });
        }
        Ok(file)
    }

    /// Parses a JSON schema file.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Parses a YAML schema file.
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Saves the schema file, choosing JSON or YAML by extension.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedFormat`](LoaderError::UnsupportedFormat) for
    /// unknown extensions, or an I/O or serialization error.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = SchemaFormat::require(path)?;
        let writer = BufWriter::new(std::fs::File::create(path)?);

        match format {
            SchemaFormat::Json => serde_json::to_writer_pretty(writer, self)?,
            SchemaFormat::Yaml => serde_yaml::to_writer(writer, self)?,
        }
        Ok(())
    }

    /// Token conventions declared by the file.
    pub fn options(&self) -> CheckerOptions {
        let defaults = CheckerOptions::default();
        CheckerOptions {
            switch_prefix: self
                .switch_prefix
                .clone()
                .unwrap_or(defaults.switch_prefix),
            placeholder: self.placeholder.clone().unwrap_or(defaults.placeholder),
        }
    }

    /// Builds a checker for this schema. `name` overrides the file's name.
    pub fn to_checker(&self, name: Option<&str>) -> Checker {
        Checker::with_options(
            self.expect.clone(),
            name.or(self.name.as_deref()),
            self.options(),
        )
    }
}
