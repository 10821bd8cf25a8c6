//! Rule-spec string parsing.
//!
//! A rule-spec is a pipe-delimited pipeline, e.g. `"required|min:3|email"`.
//! A rule takes its argument after a colon; only the first colon splits, so
//! arguments may themselves contain colons.

/// One parsed rule invocation: a name plus an optional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDescriptor {
    /// Rule name to look up in the registry
    pub name: String,
    /// Argument for parameterized rules
    pub arg: Option<String>,
}

/// Split a rule-spec string into descriptors, preserving order.
pub(crate) fn parse(spec: &str) -> Vec<RuleDescriptor> {
    spec.split('|')
        .map(|entry| match entry.split_once(':') {
            Some((name, arg)) => RuleDescriptor {
                name: name.to_string(),
                arg: Some(arg.to_string()),
            },
            None => RuleDescriptor {
                name: entry.to_string(),
                arg: None,
            },
        })
        .collect()
}
