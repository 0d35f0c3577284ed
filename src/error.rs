//! Error types for proximity filtering.

use thiserror::Error;

/// Errors raised when building a proximity filter or point.
///
/// Only construction can fail. Every query operation is total over
/// finite input once a filter exists.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("invalid {name}: {value} ({reason})")]
    InvalidArgument {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl GeoError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        GeoError::InvalidArgument {
            name,
            value,
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, GeoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message() {
        let err = GeoError::invalid("latitude", 91.0, "must be within [-90, 90]");
        assert_eq!(
            err.to_string(),
            "invalid latitude: 91 (must be within [-90, 90])"
        );
    }
}
