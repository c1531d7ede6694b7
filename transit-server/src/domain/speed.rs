//! Walking speed profiles.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A named walking-speed preset selectable by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedProfile {
    /// Leisurely pace, or limited mobility (~2.0 mph).
    Slow,
    /// Typical adult pace (~3.1 mph).
    #[default]
    Normal,
    /// Brisk walk (~4.0 mph).
    Fast,
}

impl SpeedProfile {
    /// All profiles, slowest first.
    pub const ALL: [SpeedProfile; 3] = [SpeedProfile::Slow, SpeedProfile::Normal, SpeedProfile::Fast];

    /// Parse a profile name, falling back to [`SpeedProfile::Normal`] for
    /// missing or unrecognised values.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("slow") => SpeedProfile::Slow,
            Some("fast") => SpeedProfile::Fast,
            _ => SpeedProfile::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedProfile::Slow => "slow",
            SpeedProfile::Normal => "normal",
            SpeedProfile::Fast => "fast",
        }
    }
}

impl fmt::Display for SpeedProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Walking speed in meters/second for each profile.
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedTable {
    slow: f64,
    normal: f64,
    fast: f64,
}

impl SpeedTable {
    /// Create a table, rejecting speeds that are not positive and finite.
    pub fn new(slow: f64, normal: f64, fast: f64) -> Result<Self, DomainError> {
        for (profile, speed) in [
            (SpeedProfile::Slow, slow),
            (SpeedProfile::Normal, normal),
            (SpeedProfile::Fast, fast),
        ] {
            if !speed.is_finite() || speed <= 0.0 {
                return Err(DomainError::InvalidSpeed { profile, speed });
            }
        }
        Ok(Self { slow, normal, fast })
    }

    /// Walking speed for a profile, in meters/second.
    pub fn speed(&self, profile: SpeedProfile) -> f64 {
        match profile {
            SpeedProfile::Slow => self.slow,
            SpeedProfile::Normal => self.normal,
            SpeedProfile::Fast => self.fast,
        }
    }

    /// Whole seconds needed to walk `meters` at the profile's speed.
    pub fn walk_seconds(&self, profile: SpeedProfile, meters: f64) -> i64 {
        walk_seconds(meters, self.speed(profile))
    }
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self {
            slow: 0.9,
            normal: 1.4,
            fast: 1.8,
        }
    }
}

/// Whole seconds needed to walk `meters` at `speed` m/s (floored).
pub fn walk_seconds(meters: f64, speed: f64) -> i64 {
    (meters / speed).floor() as i64
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn walk_seconds_is_floor_of_quotient(meters in 0.0f64..20_000.0) {
            let table = SpeedTable::default();
            for profile in SpeedProfile::ALL {
                let secs = table.walk_seconds(profile, meters);
                prop_assert_eq!(secs, (meters / table.speed(profile)).floor() as i64);
            }
        }

        #[test]
        fn slower_profiles_never_walk_faster(meters in 0.0f64..20_000.0) {
            let table = SpeedTable::default();
            let slow = table.walk_seconds(SpeedProfile::Slow, meters);
            let normal = table.walk_seconds(SpeedProfile::Normal, meters);
            let fast = table.walk_seconds(SpeedProfile::Fast, meters);
            prop_assert!(slow >= normal);
            prop_assert!(normal >= fast);
        }
    }
}
