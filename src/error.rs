use thiserror::Error;

/// Errors produced while validating inputs, running a simulation, or
/// reading and writing run artefacts.
#[derive(Debug, Error)]
pub enum SimError {
    /// An input violates its precondition (e.g. non-positive mass).
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The integrated state stopped being finite.
    #[error("numeric instability at step {step} (t={time:.4} s): state is no longer finite")]
    NumericInstability { step: usize, time: f64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Shared validation helpers
// ---------------------------------------------------------------------------

pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<(), SimError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimError::invalid(name, format!("must be finite, got {value}")))
    }
}

pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<(), SimError> {
    require_finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid(name, format!("must be >= 0, got {value}")))
    }
}

pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<(), SimError> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid(name, format!("must be > 0, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_zero_and_nan() {
        assert!(require_positive("mass", 0.0).is_err());
        assert!(require_positive("mass", f64::NAN).is_err());
        assert!(require_positive("mass", 1e-9).is_ok());
    }

    #[test]
    fn non_negative_accepts_zero() {
        assert!(require_non_negative("radius", 0.0).is_ok());
        assert!(require_non_negative("radius", -0.1).is_err());
        assert!(require_non_negative("radius", f64::INFINITY).is_err());
    }

    #[test]
    fn message_names_the_parameter() {
        let err = require_positive("mass", -2.0).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("`mass`"), "got: {msg}");
        assert!(msg.contains("-2"), "got: {msg}");
    }
}
