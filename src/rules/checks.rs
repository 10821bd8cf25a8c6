//! The built-in rule functions.
//!
//! Each rule checks the value it is handed, which is the field's current
//! value in the pipeline: coercion applied by an earlier rule (like
//! `required`'s trimming) is visible to every later rule.

use super::{display_name, RuleContext, RuleReport};
use crate::error::ValidateError;
use crate::store::Condition;
use crate::value::Value;
use regex::Regex;
use std::sync::OnceLock;

// Pre-compiled grammar patterns
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static URL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        // RFC 5322 simplified
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
        ).unwrap()
    })
}

fn url_regex() -> &'static Regex {
    URL_REGEX.get_or_init(|| {
        // http/https/ftp scheme or a leading www., then URL-safe characters
        Regex::new(r"(?i)^(?:(?:https?|ftp)://|www\.)[-a-z0-9+&@#/%?=~_|!:,.;]*[-a-z0-9+&@#/%=~_|]$")
            .unwrap()
    })
}

fn require_arg<'a>(
    rule: &'static str,
    arg: Option<&'a str>,
) -> Result<&'a str, ValidateError> {
    arg.ok_or(ValidateError::MissingArgument { rule })
}

fn int_arg(rule: &'static str, arg: Option<&str>) -> Result<usize, ValidateError> {
    let raw = require_arg(rule, arg)?;
    raw.parse().map_err(|_| ValidateError::BadArgument {
        rule,
        given: raw.to_string(),
    })
}

/// The value, after trimming if textual, must be non-empty.
///
/// The trimmed value is what flows on to later rules and into the
/// validated state.
pub(super) fn required(
    _ctx: &RuleContext<'_>,
    field: &str,
    value: &Value,
    _arg: Option<&str>,
) -> Result<RuleReport, ValidateError> {
    let value = match value {
        Value::Str(s) => Value::Str(s.trim().to_string()),
        other => other.clone(),
    };

    if matches!(&value, Value::Str(s) if s.is_empty()) {
        Ok(RuleReport::fail(
            value,
            format!("{} field cannot be empty.", display_name(field)),
        ))
    } else {
        Ok(RuleReport::pass(value))
    }
}

/// The value must match a standard email-address grammar.
pub(super) fn email(
    _ctx: &RuleContext<'_>,
    _field: &str,
    value: &Value,
    _arg: Option<&str>,
) -> Result<RuleReport, ValidateError> {
    let ok = value
        .as_str()
        .map(|s| email_regex().is_match(s))
        .unwrap_or(false);

    if ok {
        Ok(RuleReport::pass(value.clone()))
    } else {
        Ok(RuleReport::fail(value.clone(), "Invalid email address."))
    }
}

/// The value must equal the value of the other named field.
pub(super) fn equals(
    ctx: &RuleContext<'_>,
    field: &str,
    value: &Value,
    arg: Option<&str>,
) -> Result<RuleReport, ValidateError> {
    let other = require_arg("equals", arg)?;
    let expected = ctx.value(other)?;

    if value == expected {
        Ok(RuleReport::pass(value.clone()))
    } else {
        Ok(RuleReport::fail(
            value.clone(),
            format!(
                "{} did not match {}.",
                display_name(field),
                display_name(other)
            ),
        ))
    }
}

/// The value's textual length must be at least the argument.
pub(super) fn min(
    _ctx: &RuleContext<'_>,
    field: &str,
    value: &Value,
    arg: Option<&str>,
) -> Result<RuleReport, ValidateError> {
    let bound = int_arg("min", arg)?;

    if value.text_len() >= bound {
        Ok(RuleReport::pass(value.clone()))
    } else {
        Ok(RuleReport::fail(
            value.clone(),
            format!(
                "{} should not be less than {} characters.",
                display_name(field),
                bound
            ),
        ))
    }
}

/// The value's textual length must be at most the argument.
pub(super) fn max(
    _ctx: &RuleContext<'_>,
    field: &str,
    value: &Value,
    arg: Option<&str>,
) -> Result<RuleReport, ValidateError> {
    let bound = int_arg("max", arg)?;

    if value.text_len() <= bound {
        Ok(RuleReport::pass(value.clone()))
    } else {
        Ok(RuleReport::fail(
            value.clone(),
            format!(
                "{} should not exceed {} characters.",
                display_name(field),
                bound
            ),
        ))
    }
}

/// No record in the argument table may already hold this value in the
/// column named like the field. A store error propagates; it is never a
/// silent pass.
pub(super) fn unique(
    ctx: &RuleContext<'_>,
    field: &str,
    value: &Value,
    arg: Option<&str>,
) -> Result<RuleReport, ValidateError> {
    let table = require_arg("unique", arg)?;

    let hit = ctx
        .records()
        .read(table, &[Condition::eq(field, value.clone())])?;

    if hit.is_some() {
        Ok(RuleReport::fail(
            value.clone(),
            format!("This {} already exists.", display_name(field)),
        ))
    } else {
        Ok(RuleReport::pass(value.clone()))
    }
}

/// A record with this value must exist in the argument table.
pub(super) fn exists(
    ctx: &RuleContext<'_>,
    field: &str,
    value: &Value,
    arg: Option<&str>,
) -> Result<RuleReport, ValidateError> {
    let table = require_arg("exists", arg)?;

    let hit = ctx
        .records()
        .read(table, &[Condition::eq(field, value.clone())])?;

    if hit.is_some() {
        Ok(RuleReport::pass(value.clone()))
    } else {
        Ok(RuleReport::fail(
            value.clone(),
            format!("This {} does not exist.", display_name(field)),
        ))
    }
}

/// The value must be textual.
pub(super) fn string(
    _ctx: &RuleContext<'_>,
    field: &str,
    value: &Value,
    _arg: Option<&str>,
) -> Result<RuleReport, ValidateError> {
    if matches!(value, Value::Str(_)) {
        Ok(RuleReport::pass(value.clone()))
    } else {
        Ok(RuleReport::fail(
            value.clone(),
            format!("{} is not of type string.", display_name(field)),
        ))
    }
}

/// The value must be an integer.
pub(super) fn int(
    _ctx: &RuleContext<'_>,
    field: &str,
    value: &Value,
    _arg: Option<&str>,
) -> Result<RuleReport, ValidateError> {
    if matches!(value, Value::Int(_)) {
        Ok(RuleReport::pass(value.clone()))
    } else {
        Ok(RuleReport::fail(
            value.clone(),
            format!("{} is not of type integer.", display_name(field)),
        ))
    }
}

/// The value must match a URL grammar: an http/https/ftp scheme or a
/// leading `www.`, followed by URL-safe characters.
pub(super) fn url(
    _ctx: &RuleContext<'_>,
    field: &str,
    value: &Value,
    _arg: Option<&str>,
) -> Result<RuleReport, ValidateError> {
    let ok = value
        .as_str()
        .map(|s| url_regex().is_match(s))
        .unwrap_or(false);

    if ok {
        Ok(RuleReport::pass(value.clone()))
    } else {
        Ok(RuleReport::fail(
            value.clone(),
            format!("{} is not a valid url.", display_name(field)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::value::FormData;

    fn report(
        rule: super::super::RuleFn,
        form: &FormData,
        field: &str,
        arg: Option<&str>,
    ) -> RuleReport {
        let store = MemoryStore::new();
        let ctx = RuleContext::new(form, &store);
        let value = form.get(field).cloned().unwrap();
        rule(&ctx, field, &value, arg).unwrap()
    }

    #[test]
    fn required_trims_and_passes() {
        let form = FormData::new().with("name", " a ");
        let out = report(required, &form, "name", None);
        assert!(out.passed);
        assert_eq!(out.value, Value::from("a"));
    }

    #[test]
    fn required_fails_on_empty_and_whitespace() {
        for raw in ["", "   "] {
            let form = FormData::new().with("full_name", raw);
            let out = report(required, &form, "full_name", None);
            assert!(!out.passed);
            assert_eq!(
                out.message.as_deref(),
                Some("full name field cannot be empty.")
            );
        }
    }

    #[test]
    fn required_passes_integers() {
        let form = FormData::new().with("age", 0);
        assert!(report(required, &form, "age", None).passed);
    }

    #[test]
    fn email_accepts_valid_addresses() {
        let form = FormData::new().with("email", "a@b.com");
        assert!(report(email, &form, "email", None).passed);
    }

    #[test]
    fn email_rejects_invalid_addresses() {
        for raw in ["not-an-email", "@b.com", "a@"] {
            let form = FormData::new().with("email", raw);
            let out = report(email, &form, "email", None);
            assert!(!out.passed, "accepted `{raw}`");
            assert_eq!(out.message.as_deref(), Some("Invalid email address."));
        }
    }

    #[test]
    fn email_rejects_non_text() {
        let form = FormData::new().with("email", 42);
        assert!(!report(email, &form, "email", None).passed);
    }

    #[test]
    fn equals_compares_against_other_field() {
        let form = FormData::new()
            .with("password", "x")
            .with("password_confirm", "x");
        assert!(report(equals, &form, "password", Some("password_confirm")).passed);

        let form = FormData::new()
            .with("password", "x")
            .with("password_confirm", "y");
        let out = report(equals, &form, "password", Some("password_confirm"));
        assert!(!out.passed);
        assert_eq!(
            out.message.as_deref(),
            Some("password did not match password confirm.")
        );
    }

    #[test]
    fn equals_without_argument_is_fatal() {
        let form = FormData::new().with("password", "x");
        let store = MemoryStore::new();
        let ctx = RuleContext::new(&form, &store);
        assert!(matches!(
            equals(&ctx, "password", &Value::from("x"), None),
            Err(ValidateError::MissingArgument { rule: "equals" })
        ));
    }

    #[test]
    fn min_checks_lower_bound() {
        let form = FormData::new().with("name", "ab");
        let out = report(min, &form, "name", Some("3"));
        assert!(!out.passed);
        assert_eq!(
            out.message.as_deref(),
            Some("name should not be less than 3 characters.")
        );

        let form = FormData::new().with("name", "abc");
        assert!(report(min, &form, "name", Some("3")).passed);
    }

    #[test]
    fn max_checks_upper_bound() {
        let form = FormData::new().with("name", "abcdef");
        let out = report(max, &form, "name", Some("5"));
        assert!(!out.passed);
        assert_eq!(
            out.message.as_deref(),
            Some("name should not exceed 5 characters.")
        );

        let form = FormData::new().with("name", "ab");
        assert!(report(max, &form, "name", Some("5")).passed);
    }

    #[test]
    fn min_measures_the_value_it_is_given() {
        // The pipeline hands min the coerced value, not the raw submission
        let form = FormData::new().with("name", "  ab  ");
        let store = MemoryStore::new();
        let ctx = RuleContext::new(&form, &store);

        let out = min(&ctx, "name", &Value::from("ab"), Some("3")).unwrap();
        assert!(!out.passed);
        assert_eq!(out.value, Value::from("ab"));
    }

    #[test]
    fn min_with_bad_argument_is_fatal() {
        let form = FormData::new().with("name", "ab");
        let store = MemoryStore::new();
        let ctx = RuleContext::new(&form, &store);
        assert!(matches!(
            min(&ctx, "name", &Value::from("ab"), Some("three")),
            Err(ValidateError::BadArgument { rule: "min", .. })
        ));
    }

    #[test]
    fn length_rules_measure_integer_digits() {
        let form = FormData::new().with("pin", 1234);
        assert!(report(min, &form, "pin", Some("4")).passed);
        assert!(!report(max, &form, "pin", Some("3")).passed);
    }

    #[test]
    fn unique_fails_when_a_record_matches() {
        let store = MemoryStore::new();
        store
            .insert("users", [("email", "taken@example.com")])
            .unwrap();
        let form = FormData::new().with("email", "taken@example.com");
        let ctx = RuleContext::new(&form, &store);

        let out = unique(&ctx, "email", &Value::from("taken@example.com"), Some("users")).unwrap();
        assert!(!out.passed);
        assert_eq!(out.message.as_deref(), Some("This email already exists."));
    }

    #[test]
    fn unique_passes_on_fresh_value() {
        let store = MemoryStore::new();
        store
            .insert("users", [("email", "taken@example.com")])
            .unwrap();
        let form = FormData::new().with("email", "fresh@example.com");
        let ctx = RuleContext::new(&form, &store);

        assert!(
            unique(&ctx, "email", &Value::from("fresh@example.com"), Some("users"))
                .unwrap()
                .passed
        );
    }

    #[test]
    fn exists_requires_a_matching_record() {
        let store = MemoryStore::new();
        store.insert("users", [("username", "alice")]).unwrap();

        let form = FormData::new().with("username", "alice");
        let ctx = RuleContext::new(&form, &store);
        assert!(
            exists(&ctx, "username", &Value::from("alice"), Some("users"))
                .unwrap()
                .passed
        );

        let form = FormData::new().with("username", "bob");
        let ctx = RuleContext::new(&form, &store);
        let out = exists(&ctx, "username", &Value::from("bob"), Some("users")).unwrap();
        assert!(!out.passed);
        assert_eq!(out.message.as_deref(), Some("This username does not exist."));
    }

    #[test]
    fn type_rules_check_the_variant() {
        let form = FormData::new().with("name", "jo").with("age", 30);

        assert!(report(string, &form, "name", None).passed);
        let out = report(string, &form, "age", None);
        assert!(!out.passed);
        assert_eq!(out.message.as_deref(), Some("age is not of type string."));

        assert!(report(int, &form, "age", None).passed);
        let out = report(int, &form, "name", None);
        assert!(!out.passed);
        assert_eq!(out.message.as_deref(), Some("name is not of type integer."));
    }

    #[test]
    fn url_accepts_schemes_and_www() {
        for raw in [
            "https://example.com",
            "http://example.com/path?query=1",
            "ftp://files.example.com",
            "www.example.com",
        ] {
            let form = FormData::new().with("site", raw);
            assert!(report(url, &form, "site", None).passed, "rejected `{raw}`");
        }
    }

    #[test]
    fn url_rejects_everything_else() {
        for raw in ["not a url", "example.com", "www."] {
            let form = FormData::new().with("home_page", raw);
            let out = report(url, &form, "home_page", None);
            assert!(!out.passed, "accepted `{raw}`");
            assert_eq!(
                out.message.as_deref(),
                Some("home page is not a valid url.")
            );
        }
    }
}
