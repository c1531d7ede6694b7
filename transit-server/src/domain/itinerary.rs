//! Candidate itineraries and their legs.
//!
//! An `Itinerary` is one alternative trip returned by the directions
//! provider: an ordered sequence of walking and transit legs. Itineraries
//! are built fresh per request and discarded once the response is sent.

use serde::Serialize;

/// Travel mode of a single leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TravelMode {
    Walking,
    Transit,
}

impl TravelMode {
    /// Parse the provider's mode name (`"WALKING"` / `"TRANSIT"`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "WALKING" => Some(TravelMode::Walking),
            "TRANSIT" => Some(TravelMode::Transit),
            _ => None,
        }
    }
}

/// Boarding details for a transit leg.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitDetails {
    /// Line display name (e.g. "Green Line E").
    pub line_name: String,

    /// Stop where the vehicle is boarded.
    pub departure_stop: String,

    /// Stop where the vehicle is left.
    pub arrival_stop: String,

    /// Number of stops ridden.
    pub num_stops: u32,

    /// Scheduled departure, epoch seconds.
    pub departure_time: i64,

    /// Scheduled arrival, epoch seconds.
    pub arrival_time: Option<i64>,
}

/// One contiguous segment of an itinerary in a single travel mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Leg {
    /// On foot, with the provider's instruction text (may contain HTML).
    Walk {
        distance_meters: f64,
        instruction: String,
    },

    /// Riding a scheduled vehicle.
    Transit(TransitDetails),
}

impl Leg {
    pub fn mode(&self) -> TravelMode {
        match self {
            Leg::Walk { .. } => TravelMode::Walking,
            Leg::Transit(_) => TravelMode::Transit,
        }
    }

    /// Transit details, if this is a transit leg.
    pub fn transit(&self) -> Option<&TransitDetails> {
        match self {
            Leg::Transit(details) => Some(details),
            Leg::Walk { .. } => None,
        }
    }
}

/// A complete candidate trip from origin to destination.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    /// Position among the provider's alternatives.
    pub index: usize,

    /// Legs in travel order.
    pub legs: Vec<Leg>,

    /// Provider-reported total duration in seconds.
    pub duration_secs: i64,

    /// Provider-reported total distance (e.g. "3.2 km").
    pub distance_text: String,

    /// Encoded overview polyline.
    pub polyline: Option<String>,
}

impl Itinerary {
    /// The first transit leg, if any.
    pub fn first_transit(&self) -> Option<&TransitDetails> {
        self.legs.iter().find_map(Leg::transit)
    }

    /// Walking distance covered before boarding the first vehicle.
    ///
    /// For a walk-only itinerary this is the whole walking distance.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_server::domain::{Itinerary, Leg, TransitDetails};
    ///
    /// let walk = |m: f64| Leg::Walk { distance_meters: m, instruction: "Walk".into() };
    /// let ride = Leg::Transit(TransitDetails {
    ///     line_name: "Red Line".into(),
    ///     departure_stop: "Park Street".into(),
    ///     arrival_stop: "Kendall/MIT".into(),
    ///     num_stops: 3,
    ///     departure_time: 1_700_000_000,
    ///     arrival_time: None,
    /// });
    ///
    /// let itinerary = Itinerary {
    ///     index: 0,
    ///     legs: vec![walk(200.0), walk(150.0), ride, walk(400.0)],
    ///     duration_secs: 1200,
    ///     distance_text: "3 km".into(),
    ///     polyline: None,
    /// };
    ///
    /// assert_eq!(itinerary.approach_distance(), 350.0);
    /// ```
    pub fn approach_distance(&self) -> f64 {
        self.legs
            .iter()
            .take_while(|leg| leg.mode() != TravelMode::Transit)
            .map(|leg| match leg {
                Leg::Walk {
                    distance_meters, ..
                } => *distance_meters,
                Leg::Transit(_) => 0.0,
            })
            .sum()
    }

    /// Distinct transit line names, in first-ridden order.
    pub fn transit_lines(&self) -> Vec<&str> {
        let mut lines: Vec<&str> = Vec::new();
        for details in self.legs.iter().filter_map(Leg::transit) {
            if !lines.contains(&details.line_name.as_str()) {
                lines.push(&details.line_name);
            }
        }
        lines
    }
}

/// A point on a decoded path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathPoint {
    pub lat: f64,
    pub lng: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(meters: f64) -> Leg {
        Leg::Walk {
            distance_meters: meters,
            instruction: format!("Walk {meters} m"),
        }
    }

    fn ride(line: &str) -> Leg {
        Leg::Transit(TransitDetails {
            line_name: line.to_string(),
            departure_stop: "Park Street".to_string(),
            arrival_stop: "Kenmore".to_string(),
            num_stops: 4,
            departure_time: 1_700_000_000,
            arrival_time: Some(1_700_000_600),
        })
    }

    fn itinerary(legs: Vec<Leg>) -> Itinerary {
        Itinerary {
            index: 0,
            legs,
            duration_secs: 1500,
            distance_text: "4.1 km".to_string(),
            polyline: None,
        }
    }

    #[test]
    fn travel_mode_parse() {
        assert_eq!(TravelMode::parse("WALKING"), Some(TravelMode::Walking));
        assert_eq!(TravelMode::parse("TRANSIT"), Some(TravelMode::Transit));
        assert_eq!(TravelMode::parse("DRIVING"), None);
    }

    #[test]
    fn approach_stops_at_first_transit() {
        let it = itinerary(vec![walk(100.0), ride("Red Line"), walk(300.0)]);
        assert_eq!(it.approach_distance(), 100.0);
        assert_eq!(it.first_transit().unwrap().line_name, "Red Line");
    }

    #[test]
    fn walk_only_counts_everything() {
        let it = itinerary(vec![walk(100.0), walk(250.0)]);
        assert_eq!(it.approach_distance(), 350.0);
    }

    #[test]
    fn transit_lines_are_distinct_and_ordered() {
        let it = itinerary(vec![
            ride("Green Line E"),
            walk(50.0),
            ride("Red Line"),
            ride("Green Line E"),
        ]);
        assert_eq!(it.transit_lines(), vec!["Green Line E", "Red Line"]);
    }
}
