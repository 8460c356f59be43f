//! Argument and state guards
//!
//! Each guard returns an [`AssertError`] instead of unwinding, so callers
//! propagate failures with `?`.

use crate::error::AssertError;

/// Fail with `IllegalArgument` unless `valid` holds
pub fn legal_argument(valid: bool, message: impl Into<String>) -> Result<(), AssertError> {
    if valid {
        Ok(())
    } else {
        Err(AssertError::IllegalArgument(message.into()))
    }
}

/// Fail with `IllegalState` unless `state` holds
pub fn legal_state(state: bool, message: impl Into<String>) -> Result<(), AssertError> {
    if state {
        Ok(())
    } else {
        Err(AssertError::IllegalState(message.into()))
    }
}

/// Unwrap `value`, failing with `NullValue` when it is `None`
pub fn not_null<T>(value: Option<T>, message: impl Into<String>) -> Result<T, AssertError> {
    value.ok_or_else(|| AssertError::NullValue(message.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_argument() {
        assert!(legal_argument(true, "unused").is_ok());
        assert_eq!(
            legal_argument(false, "bad argument"),
            Err(AssertError::IllegalArgument("bad argument".to_string()))
        );
    }

    #[test]
    fn test_legal_state() {
        assert!(legal_state(true, "unused").is_ok());
        assert_eq!(
            legal_state(false, "bad state"),
            Err(AssertError::IllegalState("bad state".to_string()))
        );
    }

    #[test]
    fn test_not_null() {
        assert_eq!(not_null(Some(42), "unused"), Ok(42));
        let err = not_null::<i32>(None, "value cannot be null!").unwrap_err();
        assert_eq!(err.message(), "value cannot be null!");
        assert!(matches!(err, AssertError::NullValue(_)));
    }
}
