//! Error types for rotation interpolation.

use std::fmt;

use super::base::Float;

/// Result type for rotation interpolation operations.
pub type TweenResult<T> = Result<T, TweenError>;

/// Errors that can occur while building or evaluating a rotation curve.
#[derive(Debug, Clone, PartialEq)]
pub enum TweenError {
    /// Malformed curve data: mismatched lengths, no keyframes, a cycle
    /// shorter than the final keyframe, or a bad parameter.
    InvalidArgument {
        parameter: String,
        message: String,
    },

    /// Input violates a contract of the evaluation, such as a rotation that
    /// is not unit length or a query time outside the cycle.
    PreconditionViolation { message: String },

    /// A cache accessor was called with an index outside `[0, last]`.
    IndexOutOfRange { index: usize, last: Option<usize> },
}

impl TweenError {
    pub(crate) fn invalid_argument(parameter: &str, message: impl Into<String>) -> TweenError {
        TweenError::InvalidArgument {
            parameter: parameter.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn precondition(message: impl Into<String>) -> TweenError {
        TweenError::PreconditionViolation { message: message.into() }
    }

    pub(crate) fn time_out_of_cycle(time: Float, cycle_time: Float) -> TweenError {
        TweenError::precondition(format!(
            "time {} is outside the cycle [0, {}]",
            time, cycle_time
        ))
    }
}

impl fmt::Display for TweenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { parameter, message } => {
                write!(f, "Invalid argument '{}': {}", parameter, message)
            }
            Self::PreconditionViolation { message } => {
                write!(f, "Precondition violated: {}", message)
            }
            Self::IndexOutOfRange { index, last: Some(last) } => {
                write!(f, "Index {} out of range [0, {}]", index, last)
            }
            Self::IndexOutOfRange { index, last: None } => {
                write!(f, "Index {} out of range, no segments are cached", index)
            }
        }
    }
}

impl std::error::Error for TweenError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let e = TweenError::invalid_argument("times", "must not be empty");
        assert_eq!(e.to_string(), "Invalid argument 'times': must not be empty");
        let e = TweenError::IndexOutOfRange { index: 4, last: Some(2) };
        assert_eq!(e.to_string(), "Index 4 out of range [0, 2]");
        let e = TweenError::IndexOutOfRange { index: 0, last: None };
        assert!(e.to_string().contains("no segments"));
        let e = TweenError::time_out_of_cycle(3.0, 2.0);
        assert_eq!(e.to_string(), "Precondition violated: time 3 is outside the cycle [0, 2]");
    }
}
