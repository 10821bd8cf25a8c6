//! Field dispatch and the validation run orchestrator.

use crate::error::ValidateError;
use crate::redirect::{RecordingRedirector, Redirector};
use crate::rules::{display_name, RuleContext, RuleFn, RuleRegistry};
use crate::ruleset;
use crate::session::{MemorySession, SessionError, SessionStore, FLASH_ERRORS, FLASH_OLD};
use crate::state::{Outcome, ValidationState};
use crate::store::{MemoryStore, RecordStore};
use crate::value::{FormData, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of validating a single field.
#[derive(Debug, Clone)]
pub struct FieldReport {
    /// The field's value after any coercion
    pub value: Value,
    /// Message of the first failing rule, if any
    pub error: Option<String>,
}

/// The validation entry point, wired to its framework collaborators.
///
/// Build one with [`Validator::builder`], supplying the hosting framework's
/// session store, record store, and redirect primitive; the in-memory
/// defaults make the validator usable standalone.
pub struct Validator {
    registry: RuleRegistry,
    records: Arc<dyn RecordStore>,
    session: Arc<dyn SessionStore>,
    redirect: Arc<dyn Redirector>,
}

impl Validator {
    /// Start building a validator.
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::new()
    }

    /// Run one field's rule pipeline, stopping at the first failure.
    ///
    /// Later rules for the field are not evaluated once one fails; the
    /// report always carries the field's (possibly coerced) value. A field
    /// absent from the submitted data entirely is fatal, unlike one that is
    /// present but empty.
    pub fn check_field(
        &self,
        form: &FormData,
        field: &str,
        rules: &str,
    ) -> Result<FieldReport, ValidateError> {
        let mut value = form
            .get(field)
            .cloned()
            .ok_or_else(|| ValidateError::UnknownField {
                field: field.to_string(),
            })?;

        let ctx = RuleContext::new(form, self.records.as_ref());

        for descriptor in ruleset::parse(rules) {
            let rule = self.registry.get(&descriptor.name)?;
            // Each rule sees the running value, so coercion chains
            let report = rule(&ctx, field, &value, descriptor.arg.as_deref())?;
            value = report.value;

            if !report.passed {
                let message = report
                    .message
                    .unwrap_or_else(|| format!("{} is invalid.", display_name(field)));
                return Ok(FieldReport {
                    value,
                    error: Some(message),
                });
            }
        }

        Ok(FieldReport { value, error: None })
    }

    /// Validate every field in declaration order.
    ///
    /// With `redirect` set and at least one failing field, the errors and
    /// the original submitted values are flashed to the session, the
    /// redirector fires, and the outcome is `Redirected`; no state goes back
    /// to the caller on that path. Otherwise the accumulated state is
    /// returned, failures included.
    pub fn run(
        &self,
        form: &FormData,
        fields: &[(&str, &str)],
        redirect: bool,
    ) -> Result<Outcome, ValidateError> {
        let mut state = ValidationState::new();

        for &(field, rules) in fields {
            let report = self.check_field(form, field, rules)?;
            debug!(field, passed = report.error.is_none(), "field validated");

            state.validated.insert(field.to_string(), report.value);
            if let Some(message) = report.error {
                state.errors.insert(field.to_string(), message);
            }
        }

        if state.has_errors() && redirect {
            warn!(
                failed = state.errors.len(),
                "validation failed, flashing state and redirecting back"
            );
            self.flash(&state, form)?;
            self.redirect.redirect_back();
            return Ok(Outcome::Redirected);
        }

        Ok(Outcome::Completed(state))
    }

    // Flash errors and the original (pre-coercion) submitted values so the
    // next request can repopulate the form.
    fn flash(&self, state: &ValidationState, form: &FormData) -> Result<(), ValidateError> {
        let errors =
            serde_json::to_value(&state.errors).map_err(|e| SessionError::WriteError {
                key: FLASH_ERRORS.to_string(),
                reason: e.to_string(),
            })?;
        self.session.set(FLASH_ERRORS, errors)?;

        let old = serde_json::to_value(form).map_err(|e| SessionError::WriteError {
            key: FLASH_OLD.to_string(),
            reason: e.to_string(),
        })?;
        self.session.set(FLASH_OLD, old)?;

        Ok(())
    }
}

/// Builder for [`Validator`].
#[derive(Default)]
pub struct ValidatorBuilder {
    registry: RuleRegistry,
    records: Option<Arc<dyn RecordStore>>,
    session: Option<Arc<dyn SessionStore>>,
    redirect: Option<Arc<dyn Redirector>>,
}

impl ValidatorBuilder {
    /// Create a builder with the built-in rules and no collaborators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extra rule on top of the built-ins.
    pub fn rule(mut self, name: impl Into<String>, rule: RuleFn) -> Self {
        self.registry.register(name, rule);
        self
    }

    /// Set the record store.
    pub fn records(mut self, store: impl RecordStore + 'static) -> Self {
        self.records = Some(Arc::new(store));
        self
    }

    /// Set the record store from an `Arc`.
    pub fn records_arc(mut self, store: Arc<dyn RecordStore>) -> Self {
        self.records = Some(store);
        self
    }

    /// Set the session store.
    pub fn session(mut self, store: impl SessionStore + 'static) -> Self {
        self.session = Some(Arc::new(store));
        self
    }

    /// Set the session store from an `Arc`.
    pub fn session_arc(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session = Some(store);
        self
    }

    /// Set the redirect primitive.
    pub fn redirect(mut self, redirector: impl Redirector + 'static) -> Self {
        self.redirect = Some(Arc::new(redirector));
        self
    }

    /// Set the redirect primitive from an `Arc`.
    pub fn redirect_arc(mut self, redirector: Arc<dyn Redirector>) -> Self {
        self.redirect = Some(redirector);
        self
    }

    /// Build the validator, defaulting any missing collaborator to its
    /// in-memory implementation.
    pub fn build(self) -> Validator {
        Validator {
            registry: self.registry,
            records: self
                .records
                .unwrap_or_else(|| Arc::new(MemoryStore::new())),
            session: self
                .session
                .unwrap_or_else(|| Arc::new(MemorySession::new())),
            redirect: self
                .redirect
                .unwrap_or_else(|| Arc::new(RecordingRedirector::new())),
        }
    }
}
