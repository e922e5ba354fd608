//=========================================================================
// Validation
//=========================================================================
//
// Boolean-plus-message outcome for operations callers branch on without
// treating the negative case as an error (deferred layer push, refused
// segment entry, unreadable save slot).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Validation ==========================================================

/// Outcome of an operation that may be refused or deferred.
///
/// # Example
///
/// ```
/// use stratus::core::Validation;
///
/// let outcome = Validation::invalid("Layer 'Pause' is blocking");
/// if !outcome.is_valid() {
///     assert_eq!(outcome.message(), Some("Layer 'Pause' is blocking"));
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Validation {
    valid: bool,
    message: Option<String>,
}

impl Validation {
    /// Successful outcome with no message.
    pub fn valid() -> Self {
        Self { valid: true, message: None }
    }

    /// Successful outcome with an informational message.
    pub fn valid_with(message: impl Into<String>) -> Self {
        Self { valid: true, message: Some(message.into()) }
    }

    /// Refused or deferred outcome with the reason.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self { valid: false, message: Some(message.into()) }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Converts into a `Result`, using the message (or a generic one) as error.
    pub fn into_result(self) -> Result<(), String> {
        if self.valid {
            Ok(())
        } else {
            Err(self.message.unwrap_or_else(|| "invalid".to_string()))
        }
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.valid { "valid" } else { "invalid" };
        match &self.message {
            Some(message) => write!(f, "{}: {}", status, message),
            None => write!(f, "{}", status),
        }
    }
}

impl From<bool> for Validation {
    fn from(valid: bool) -> Self {
        Self { valid, message: None }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_has_no_message() {
        let v = Validation::valid();
        assert!(v.is_valid());
        assert_eq!(v.message(), None);
        assert_eq!(v.to_string(), "valid");
    }

    #[test]
    fn valid_with_keeps_note() {
        let v = Validation::valid_with("resumed from queue");
        assert!(v.is_valid());
        assert_eq!(v.message(), Some("resumed from queue"));
        assert_eq!(v.into_result(), Ok(()));
    }

    #[test]
    fn invalid_carries_reason() {
        let v = Validation::invalid("queued");
        assert!(!v.is_valid());
        assert_eq!(v.to_string(), "invalid: queued");
        assert_eq!(v.into_result(), Err("queued".to_string()));
    }

    #[test]
    fn from_bool() {
        assert!(Validation::from(true).is_valid());
        assert_eq!(Validation::from(false).into_result(), Err("invalid".to_string()));
    }
}
