//! # formguard
//!
//! Server-side form validation for web applications: apply a pipeline of
//! named rules per field, collect per-field error messages, and on failure
//! flash the errors and old input to the session and redirect back to the
//! originating page.
//!
//! Rule pipelines are written as pipe-delimited specs, with arguments after
//! a colon:
//!
//! ```text
//! "required|min:3|email"
//! ```
//!
//! ## Built-in rules
//!
//! - `required` - non-empty after trimming
//! - `email` - email-address grammar
//! - `equals:<field>` - matches another field's value
//! - `min:<n>` / `max:<n>` - length bounds
//! - `unique:<table>` / `exists:<table>` - record store lookups
//! - `string` / `int` - value type checks
//! - `url` - URL grammar
//!
//! ## Example
//!
//! ```rust
//! use formguard::{FormData, Outcome, Validator};
//!
//! let form: FormData = [("email", "a@b.com"), ("password", "secret")]
//!     .into_iter()
//!     .collect();
//!
//! let validator = Validator::builder().build();
//! let outcome = validator
//!     .run(
//!         &form,
//!         &[("email", "required|email"), ("password", "required|min:6")],
//!         false,
//!     )
//!     .unwrap();
//!
//! match outcome {
//!     Outcome::Completed(state) => assert!(state.is_ok()),
//!     Outcome::Redirected => unreachable!("redirect mode is off"),
//! }
//! ```
//!
//! A field missing from the submitted data entirely is a configuration
//! error and aborts the run with an `Err`; a rule predicate failing is
//! ordinary and lands in [`ValidationState::errors`]. With the redirect
//! flag set and any failing field, the errors and original input are
//! written to the [`SessionStore`] flash keys, the [`Redirector`] fires,
//! and the run yields [`Outcome::Redirected`] instead of a state.

mod error;
mod redirect;
mod rules;
mod ruleset;
mod session;
mod state;
mod store;
mod validator;
mod value;

pub use error::{Result, ValidateError};
pub use redirect::{RecordingRedirector, Redirector};
pub use rules::{RuleContext, RuleFn, RuleRegistry, RuleReport};
pub use session::{
    MemorySession, SessionError, SessionResult, SessionStore, FLASH_ERRORS, FLASH_OLD,
};
pub use state::{Outcome, ValidationState};
pub use store::{Condition, MemoryStore, Op, Record, RecordStore, StoreError, StoreResult};
pub use validator::{FieldReport, Validator, ValidatorBuilder};
pub use value::{FormData, Value};

/// Prelude for the common surface.
pub mod prelude {
    pub use crate::error::{Result, ValidateError};
    pub use crate::state::{Outcome, ValidationState};
    pub use crate::validator::Validator;
    pub use crate::value::{FormData, Value};
}
