//! Option validation. Every check runs before a request is built, so a
//! rejected call never reaches the network.

use std::fmt;
use std::mem::take;

/// What a field was required to satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    Range { min: i64, max: i64 },
    AtLeast { min: i64 },
    NonEmpty,
    Format(&'static str),
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range { min, max } => write!(f, "must be between {min} and {max}"),
            Self::AtLeast { min } => write!(f, "must be at least {min}"),
            Self::NonEmpty => f.write_str("must not be empty"),
            Self::Format(fmt) => write!(f, "must be formatted as {fmt}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub constraint: Constraint,
    pub found: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` {} (got {})", self.field, self.constraint, self.found)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid options: {}", join(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// Names of the offending fields, in the order they were checked.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.violations.iter().map(|v| v.field)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields().any(|f| f == field)
    }
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Collects every violated constraint of an options object.
#[derive(Default)]
pub(crate) struct Validator {
    violations: Vec<Violation>,
}

impl Validator {
    pub fn check(
        &mut self,
        field: &'static str,
        ok: bool,
        constraint: Constraint,
        found: impl fmt::Display,
    ) -> &mut Self {
        if !ok {
            self.violations.push(Violation {
                field,
                constraint,
                found: found.to_string(),
            });
        }
        self
    }

    pub fn range(
        &mut self,
        field: &'static str,
        value: Option<impl Into<i64>>,
        min: i64,
        max: i64,
    ) -> &mut Self {
        match value.map(Into::into) {
            Some(v) => self.check(field, (min..=max).contains(&v), Constraint::Range { min, max }, v),
            None => self,
        }
    }

    pub fn at_least(&mut self, field: &'static str, value: Option<impl Into<i64>>, min: i64) -> &mut Self {
        match value.map(Into::into) {
            Some(v) => self.check(field, v >= min, Constraint::AtLeast { min }, v),
            None => self,
        }
    }

    pub fn non_empty<T>(&mut self, field: &'static str, value: &[T]) -> &mut Self {
        self.check(field, !value.is_empty(), Constraint::NonEmpty, "an empty list")
    }

    pub fn non_blank(&mut self, field: &'static str, value: Option<&str>) -> &mut Self {
        match value {
            Some(v) => self.check(field, !v.trim().is_empty(), Constraint::NonEmpty, format_args!("{v:?}")),
            None => self,
        }
    }

    pub fn finish(&mut self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                violations: take(&mut self.violations),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_when_unset_or_in_bounds() {
        let res = Validator::default()
            .range("limit", None::<u32>, 1, 500)
            .range("namespace", Some(-2), -2, 5501)
            .at_least("chars", Some(1u32), 1)
            .finish();
        assert_eq!(res, Ok(()));
    }

    #[test]
    fn collects_every_violation() {
        let err = Validator::default()
            .range("limit", Some(501u32), 1, 500)
            .range("sentences", Some(0u32), 1, 10)
            .non_empty::<String>("titles", &[])
            .finish()
            .unwrap_err();
        assert_eq!(err.fields().collect::<Vec<_>>(), ["limit", "sentences", "titles"]);
        assert_eq!(
            err.violations[0],
            Violation {
                field: "limit",
                constraint: Constraint::Range { min: 1, max: 500 },
                found: "501".into(),
            }
        );
        assert_eq!(
            err.to_string(),
            "invalid options: `limit` must be between 1 and 500 (got 501), \
             `sentences` must be between 1 and 10 (got 0), \
             `titles` must not be empty (got an empty list)"
        );
    }

    #[test]
    fn blank_strings_are_rejected() {
        let err = Validator::default()
            .non_blank("user_agent", Some("  "))
            .finish()
            .unwrap_err();
        assert!(err.has_field("user_agent"));
    }
}
