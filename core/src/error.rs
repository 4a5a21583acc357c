//! Errors raised while checking an argument vector.

use thiserror::Error;

/// Reasons an argument vector is rejected by [`Checker::check`](crate::Checker::check).
///
/// Every variant carries the offending key or token. Any of them aborts the
/// whole check; callers usually print the error followed by the usage line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// A switch-looking token matches no declared named key.
    #[error("unrecognized option: {0}")]
    UnrecognizedOption(String),
    /// A non-repeatable key occurred more than once.
    #[error("duplicate option: {0}")]
    DuplicateOption(String),
    /// A value-taking switch got no value and declares no default.
    #[error("option requires a value: {0}")]
    MissingRequiredValue(String),
    /// More positional tokens than the declared positional keys absorb.
    #[error("unexpected extra argument: {0}")]
    UnexpectedExtraArgument(String),
    /// A `must` key never appeared.
    #[error("missing required argument: {0}")]
    MissingRequiredKey(String),
}

impl CheckError {
    /// The key or token the error is about.
    pub fn subject(&self) -> &str {
        match self {
            Self::UnrecognizedOption(s)
            | Self::DuplicateOption(s)
            | Self::MissingRequiredValue(s)
            | Self::UnexpectedExtraArgument(s)
            | Self::MissingRequiredKey(s) => s,
        }
    }
}
