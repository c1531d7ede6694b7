//! Origin and destination locations.
//!
//! Callers send either a free-text place name or a `{lat, lng}` pair.
//! Both are rendered into the single query string the directions provider
//! accepts.

use serde::Deserialize;

use super::DomainError;

/// A trip endpoint as supplied by the client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Location {
    /// A latitude/longitude pair, passed through verbatim.
    Coordinates { lat: f64, lng: f64 },

    /// A free-text place name, qualified with the deployment region.
    Place(String),
}

impl Location {
    /// Create a location from a place name.
    pub fn place(name: impl Into<String>) -> Self {
        Location::Place(name.into())
    }

    /// Create a location from coordinates.
    pub fn coordinates(lat: f64, lng: f64) -> Self {
        Location::Coordinates { lat, lng }
    }

    /// Render this location as a directions provider query string.
    ///
    /// Coordinates render as `"lat,lng"`. Free text has `region` appended
    /// (e.g. `"Fenway Park, Boston, MA"`) so the provider does not resolve
    /// an ambiguous name to some other city.
    pub fn to_query(&self, region: &str) -> Result<String, DomainError> {
        match self {
            Location::Coordinates { lat, lng } => {
                let valid = lat.is_finite()
                    && lng.is_finite()
                    && (-90.0..=90.0).contains(lat)
                    && (-180.0..=180.0).contains(lng);
                if !valid {
                    return Err(DomainError::InvalidCoordinates {
                        lat: *lat,
                        lng: *lng,
                    });
                }
                Ok(format!("{lat},{lng}"))
            }
            Location::Place(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Err(DomainError::BlankLocation);
                }
                if region.is_empty() {
                    Ok(text.to_string())
                } else {
                    Ok(format!("{text}, {region}"))
                }
            }
        }
    }
}
