//! Fatal error types.
//!
//! These cover the unrecoverable class only: misconfigured rule-specs,
//! fields missing from the submitted data, and collaborator failures. A rule
//! predicate failing is not an error; it lands in
//! [`ValidationState::errors`](crate::ValidationState) instead.

use crate::session::SessionError;
use crate::store::StoreError;

/// Result type alias for validation operations.
pub type Result<T, E = ValidateError> = std::result::Result<T, E>;

/// Unrecoverable validation error.
#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    /// A declared field is absent from the submitted data entirely.
    /// Distinct from present-but-empty, which is a normal validation failure.
    #[error("field `{field}` was not found in the submitted data")]
    UnknownField {
        /// The missing field name
        field: String,
    },

    /// A rule-spec names a rule that was never registered.
    #[error("no rule named `{name}` is registered")]
    UnknownRule {
        /// The unresolved rule name
        name: String,
    },

    /// A parameterized rule was used without its argument.
    #[error("rule `{rule}` requires an argument")]
    MissingArgument {
        /// The rule name
        rule: &'static str,
    },

    /// A rule argument could not be parsed.
    #[error("rule `{rule}` got a bad argument: `{given}`")]
    BadArgument {
        /// The rule name
        rule: &'static str,
        /// The argument as written in the rule-spec
        given: String,
    },

    /// A record lookup failed. Never treated as a passing check.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Writing flash state to the session failed on the redirect path.
    #[error(transparent)]
    Session(#[from] SessionError),
}
