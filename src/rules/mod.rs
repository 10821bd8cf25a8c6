//! Named validation rules and the registry that resolves them.
//!
//! Each rule is a plain function checking one field of the submitted data,
//! optionally parameterized by a string argument from the rule-spec
//! (`min:3`, `unique:users`). Rules are looked up by name in a
//! [`RuleRegistry`]; an unknown name is a configuration error, never a
//! crash.

mod checks;

use crate::error::ValidateError;
use crate::store::RecordStore;
use crate::value::{FormData, Value};
use std::collections::HashMap;

/// Everything a rule may consult: the submitted data and the record store.
pub struct RuleContext<'a> {
    form: &'a FormData,
    records: &'a dyn RecordStore,
}

impl<'a> RuleContext<'a> {
    /// Create a context over one request's submitted data.
    pub fn new(form: &'a FormData, records: &'a dyn RecordStore) -> Self {
        Self { form, records }
    }

    /// The submitted data under validation.
    pub fn form(&self) -> &FormData {
        self.form
    }

    /// The record store backing `unique` and `exists`.
    pub fn records(&self) -> &dyn RecordStore {
        self.records
    }

    /// Fetch a field's raw submitted value, failing fatally when the field
    /// was never submitted. Rules use this for cross-field lookups; the
    /// field under validation arrives as the rule's value argument, already
    /// carrying any coercion from earlier rules in the pipeline.
    pub fn value(&self, field: &str) -> Result<&Value, ValidateError> {
        self.form.get(field).ok_or_else(|| ValidateError::UnknownField {
            field: field.to_string(),
        })
    }
}

/// Outcome of one rule invocation.
#[derive(Debug, Clone)]
pub struct RuleReport {
    /// Whether the predicate held
    pub passed: bool,
    /// The value after any coercion the rule applies (e.g. trimming)
    pub value: Value,
    /// Failure message; `None` when passed
    pub message: Option<String>,
}

impl RuleReport {
    /// A passing report carrying the (possibly coerced) value.
    pub fn pass(value: Value) -> Self {
        Self {
            passed: true,
            value,
            message: None,
        }
    }

    /// A failing report with its human-readable message.
    pub fn fail(value: Value, message: impl Into<String>) -> Self {
        Self {
            passed: false,
            value,
            message: Some(message.into()),
        }
    }
}

/// Signature shared by every rule function.
///
/// The `Value` argument is the field's current value, including any
/// coercion applied by earlier rules in the pipeline; the report must carry
/// it forward, further coerced or unchanged.
pub type RuleFn =
    fn(&RuleContext<'_>, &str, &Value, Option<&str>) -> Result<RuleReport, ValidateError>;

/// Registry mapping rule names to rule functions.
pub struct RuleRegistry {
    rules: HashMap<String, RuleFn>,
}

impl RuleRegistry {
    /// Registry holding the ten built-in rules.
    pub fn builtin() -> Self {
        let mut registry = Self {
            rules: HashMap::new(),
        };
        registry.register("required", checks::required);
        registry.register("email", checks::email);
        registry.register("equals", checks::equals);
        registry.register("min", checks::min);
        registry.register("max", checks::max);
        registry.register("unique", checks::unique);
        registry.register("exists", checks::exists);
        registry.register("string", checks::string);
        registry.register("int", checks::int);
        registry.register("url", checks::url);
        registry
    }

    /// Register a rule under a name, replacing any previous binding.
    pub fn register(&mut self, name: impl Into<String>, rule: RuleFn) {
        self.rules.insert(name.into(), rule);
    }

    /// Resolve a rule by name.
    pub fn get(&self, name: &str) -> Result<RuleFn, ValidateError> {
        self.rules
            .get(name)
            .copied()
            .ok_or_else(|| ValidateError::UnknownRule {
                name: name.to_string(),
            })
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Field name as it reads in messages, underscores as spaces.
pub(crate) fn display_name(field: &str) -> String {
    field.replace('_', " ")
}
