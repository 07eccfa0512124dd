//! Assertion primitives.
//!
//! Checks return `Result<(), Failure>` so a scenario can chain them with `?`;
//! the first failing check aborts the case and the runner converts the
//! failure into that case's result. Comparisons are strict except
//! [`expect_blank`], the one deliberately loose check (absence and the empty
//! string are equivalent), used where a scenario asserts "nothing reflected
//! yet". Attribute-absence checks use [`expect_unset`], which accepts only
//! `None`.

use std::fmt::Debug;

use thiserror::Error;

/// Why a case stopped short of passing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Failure {
    /// An expected/actual mismatch from one of the checks.
    #[error("assertion failed: {message}")]
    Assertion {
        /// Human-readable diff of expected vs. actual.
        message: String,
    },
    /// The case body hit a condition outside any assertion.
    #[error("case errored: {message}")]
    Errored {
        /// What went wrong.
        message: String,
    },
}

impl Failure {
    /// Build an assertion failure with a preformatted message.
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion {
            message: message.into(),
        }
    }

    /// Build a non-assertion case error.
    #[must_use]
    pub fn errored(message: impl Into<String>) -> Self {
        Self::Errored {
            message: message.into(),
        }
    }
}

/// Strict value equality.
pub fn expect_eq<T: PartialEq + Debug>(expected: T, actual: T) -> Result<(), Failure> {
    if expected == actual {
        Ok(())
    } else {
        Err(Failure::assertion(format!(
            "expected {expected:?}, got {actual:?}"
        )))
    }
}

/// The value must be `true`.
pub fn expect_true(value: bool) -> Result<(), Failure> {
    if value {
        Ok(())
    } else {
        Err(Failure::assertion("expected true, got false"))
    }
}

/// The value must be `false`.
pub fn expect_false(value: bool) -> Result<(), Failure> {
    if value {
        Err(Failure::assertion("expected false, got true"))
    } else {
        Ok(())
    }
}

/// The value must be absent (`None`). An empty string is still a value.
pub fn expect_unset<T: Debug>(value: Option<T>) -> Result<(), Failure> {
    match value {
        None => Ok(()),
        Some(present) => Err(Failure::assertion(format!(
            "expected no value, got {present:?}"
        ))),
    }
}

/// The value must be absent or empty. This is the one loose comparison the
/// viewer scenarios need; everything else should use [`expect_eq`] or
/// [`expect_unset`].
pub fn expect_blank(value: Option<&str>) -> Result<(), Failure> {
    match value {
        None | Some("") => Ok(()),
        Some(text) => Err(Failure::assertion(format!(
            "expected blank, got {text:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expect_eq_reports_both_values() {
        let failure = expect_eq("30%", "0%").unwrap_err();
        let Failure::Assertion { message } = failure else {
            panic!("expected assertion failure");
        };
        assert!(message.contains("30%"));
        assert!(message.contains("0%"));
    }

    #[test]
    fn truthiness_checks() {
        assert!(expect_true(true).is_ok());
        assert!(expect_true(false).is_err());
        assert!(expect_false(false).is_ok());
        assert!(expect_false(true).is_err());
    }

    #[test]
    fn expect_unset_rejects_empty_string() {
        assert!(expect_unset::<String>(None).is_ok());
        assert!(expect_unset(Some(String::new())).is_err());
    }

    #[test]
    fn expect_blank_accepts_absence_and_empty() {
        assert!(expect_blank(None).is_ok());
        assert!(expect_blank(Some("")).is_ok());
        assert!(expect_blank(Some("title")).is_err());
    }
}
