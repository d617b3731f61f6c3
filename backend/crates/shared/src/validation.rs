//! Field-level validation
//!
//! Validators collect every violation instead of stopping at the first one,
//! so a client sees the full list in a single response.

use std::borrow::Cow;
use std::fmt;

/// A single field that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: Cow<'static, str>,
}

/// One or more field violations
///
/// ## Examples
/// ```rust
/// use kernel::validation::ValidationErrors;
///
/// let mut errors = ValidationErrors::new();
/// errors.check(false, "name", "cannot be blank");
/// errors.check(true, "creator", "cannot be blank");
///
/// let err = errors.into_result().unwrap_err();
/// assert_eq!(err.to_string(), "name: cannot be blank");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a single violation
    pub fn single(field: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<Cow<'static, str>>) {
        self.violations.push(FieldViolation {
            field,
            message: message.into(),
        });
    }

    /// Record a violation unless `ok` holds
    pub fn check(&mut self, ok: bool, field: &'static str, message: impl Into<Cow<'static, str>>) {
        if !ok {
            self.add(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Whether `field` has at least one violation
    pub fn has(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", violation.field, violation.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
