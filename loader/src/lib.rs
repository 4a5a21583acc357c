//! Loading and saving argchecker schema files.
//!
//! A [`SchemaFile`] bundles a program name, optional token conventions, and
//! the ordered [`Schema`](argchecker_core::Schema) of expected arguments. Files
//! are JSON (`.json`) or YAML (`.yaml`, `.yml`); the format is picked from the
//! extension.
//!
//! # Quick start
//!
//! ```no_run
//! use argchecker_loader::SchemaFile;
//!
//! let file = SchemaFile::load_validated("schemas/backup.yaml").unwrap();
//! let mut checker = file.to_checker(None);
//!
//! let args: Vec<String> = std::env::args().skip(1).collect();
//! if let Err(err) = checker.check(&args) {
//!     eprintln!("error: {err}\n{}", checker.usage());
//!     std::process::exit(2);
//! }
//! ```

mod error;
mod file;

pub use error::{LoaderError, Result};
pub use file::{SchemaFile, SchemaFormat};
