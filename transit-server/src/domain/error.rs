//! Domain error types.
//!
//! These errors represent validation failures in caller-supplied input and
//! configuration. They are distinct from API/IO errors.

use super::SpeedProfile;

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A required endpoint was not supplied at all
    #[error("missing {0}")]
    MissingLocation(&'static str),

    /// A free-text location was empty or whitespace
    #[error("location text must not be empty")]
    BlankLocation,

    /// Coordinates outside the valid latitude/longitude range
    #[error("invalid coordinates: {lat},{lng}")]
    InvalidCoordinates { lat: f64, lng: f64 },

    /// A walking speed that is not a positive, finite number
    #[error("invalid walking speed for {profile}: {speed} m/s")]
    InvalidSpeed { profile: SpeedProfile, speed: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::MissingLocation("destination");
        assert_eq!(err.to_string(), "missing destination");

        let err = DomainError::BlankLocation;
        assert_eq!(err.to_string(), "location text must not be empty");

        let err = DomainError::InvalidCoordinates {
            lat: 91.0,
            lng: -71.5,
        };
        assert_eq!(err.to_string(), "invalid coordinates: 91,-71.5");

        let err = DomainError::InvalidSpeed {
            profile: SpeedProfile::Fast,
            speed: 0.0,
        };
        assert_eq!(err.to_string(), "invalid walking speed for fast: 0 m/s");
    }
}
