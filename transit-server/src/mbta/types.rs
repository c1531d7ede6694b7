//! MBTA v3 JSON:API wire types.
//!
//! Every endpoint returns a document whose `data` array holds resources of
//! one kind. Only the attributes and relationships this server reads are
//! modelled; everything else is ignored on deserialization.

use serde::Deserialize;

/// A JSON:API document holding a list of resources.
#[derive(Debug, Clone, Deserialize)]
pub struct Document<A> {
    #[serde(default = "Vec::new")]
    pub data: Vec<Resource<A>>,
}

/// A single JSON:API resource.
#[derive(Debug, Clone, Deserialize)]
pub struct Resource<A> {
    pub id: String,
    pub attributes: A,
    #[serde(default)]
    pub relationships: Relationships,
}

impl<A> Resource<A> {
    /// ID of the related route, if the relationship is present.
    pub fn route_id(&self) -> Option<&str> {
        self.relationships
            .route
            .as_ref()
            .and_then(|r| r.data.as_ref())
            .map(|d| d.id.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relationships {
    pub route: Option<Relationship>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Relationship {
    pub data: Option<ResourceId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceId {
    pub id: String,
}

/// `/stops` attributes.
#[derive(Debug, Clone, Deserialize)]
pub struct StopAttributes {
    pub name: String,
    /// e.g. "Park Street - Red Line - Alewife"
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// `/predictions` attributes. Times are ISO-8601 with offset.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionAttributes {
    pub arrival_time: Option<String>,
    pub departure_time: Option<String>,
    pub direction_id: Option<u8>,
    pub status: Option<String>,
}

/// `/alerts` attributes.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertAttributes {
    pub header: String,
    pub description: Option<String>,
    pub severity: i64,
}

/// `/vehicles` attributes.
#[derive(Debug, Clone, Deserialize)]
pub struct VehicleAttributes {
    pub latitude: f64,
    pub longitude: f64,
    pub bearing: Option<f64>,
    /// `STOPPED_AT`, `INCOMING_AT` or `IN_TRANSIT_TO`
    pub current_status: Option<String>,
}
