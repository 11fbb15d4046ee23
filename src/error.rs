//! Failure classes surfaced by commands.
//!
//! These travel inside `anyhow::Error`; use `downcast_ref::<HookError>()` to
//! tell them apart.

use derive_more::Display;

#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum HookError {
    /// The target repository could not be determined.
    #[display("could not determine the repo to use: {_0}")]
    Repository(String),

    /// The user backed out of an interactive prompt.
    #[display("cancelled")]
    Cancelled,

    /// The API answered with a non-success status.
    #[display("HTTP {status}: {message}")]
    Http { status: i32, message: String },

    /// A hook definition handed to `create --input` could not be parsed.
    #[display("invalid hook definition: {_0}")]
    InvalidInput(String),

    /// A choice prompt was given nothing to choose from.
    #[display("no options to choose from")]
    NoOptions,
}

impl std::error::Error for HookError {}

impl HookError {
    /// True when the error is a user cancellation.
    #[must_use]
    pub fn is_cancelled(err: &anyhow::Error) -> bool {
        matches!(err.downcast_ref::<Self>(), Some(Self::Cancelled))
    }
}
