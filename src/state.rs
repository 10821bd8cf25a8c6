//! Accumulated validation output.

use crate::value::Value;
use indexmap::IndexMap;
use serde::Serialize;

/// Per-call accumulation of validated values and error messages.
///
/// Built fresh for each validation run and discarded once consumed or
/// transferred into session flash. Both maps keep insertion order, which is
/// the field declaration order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationState {
    /// Every processed field with its (possibly coerced) value, whether or
    /// not its rules passed.
    pub validated: IndexMap<String, Value>,
    /// Failing fields only, each with its first failing rule's message.
    pub errors: IndexMap<String, String>,
}

impl ValidationState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field failed.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// True when at least one field failed.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// How a validation run ended.
///
/// The explicit form of the redirect-and-die exit: in `Redirected`, flash
/// state has already been written and the redirector invoked, and there is
/// no state to hand back.
#[derive(Debug)]
pub enum Outcome {
    /// All fields processed; the state goes back to the caller.
    Completed(ValidationState),
    /// Validation failed in redirect mode; the response is a redirect back.
    Redirected,
}

impl Outcome {
    /// The state, when the run completed normally.
    pub fn state(&self) -> Option<&ValidationState> {
        match self {
            Outcome::Completed(state) => Some(state),
            Outcome::Redirected => None,
        }
    }

    /// Consume the outcome into its state, when the run completed normally.
    pub fn into_state(self) -> Option<ValidationState> {
        match self {
            Outcome::Completed(state) => Some(state),
            Outcome::Redirected => None,
        }
    }

    /// Whether the run ended in a redirect.
    pub fn is_redirected(&self) -> bool {
        matches!(self, Outcome::Redirected)
    }
}
