//! Schema-driven checking of command-line arguments.
//!
//! This crate provides the checking engine for declarative CLI schemas:
//!
//! - [`Schema`]: ordered collection of keys, each described by an
//!   [`OptionSpec`]. Keys starting with `-` are named switches, all other keys
//!   are positional slots filled by arrival order.
//! - [`Checker`]: synthesizes a usage line from the schema, scans an argument
//!   vector, and exposes the matched values through [`Checker::get`] and
//!   [`Checker::is_on`].
//! - [`ArgValue`]: the tagged result for a single key (absent, bare flag,
//!   single value, or repeated values).
//! - [`CheckError`]: why an argument vector was rejected.
//!
//! Schema linting ([`validate_schema`]) catches declarations the checker would
//! accept but never match sensibly, such as a `default` on a key that takes no
//! parameter.
//!
//! # Example
//!
//! ```
//! use argchecker_core::*;
//!
//! let schema = Schema::new()
//!     .with("-v", OptionSpec::flag())
//!     .with("-o", OptionSpec::param("FILE").with_default("out.txt"))
//!     .with("INPUT", OptionSpec::positional().required().repeated());
//!
//! let mut checker = Checker::new(schema, Some("mytool"));
//! assert_eq!(checker.usage(), "Usage: mytool [-v] [-o [FILE]] INPUT ...");
//!
//! checker.check(["-o", "-", "a.txt", "b.txt"]).unwrap();
//! assert!(!checker.is_on("-v"));
//! assert_eq!(checker.get("-o").as_str(), Some("out.txt"));
//! assert_eq!(checker.get("INPUT").values(), ["a.txt", "b.txt"]);
//! ```

mod checker;
mod error;
mod types;
mod validate;

pub use checker::{Checker, CheckerOptions, DEFAULT_PROGRAM_NAME, Matches};
pub use error::CheckError;
pub use types::*;
pub use validate::{SchemaIssue, validate_schema, validate_schema_with};
