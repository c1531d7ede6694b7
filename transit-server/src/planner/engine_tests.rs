//! Unit tests for the itinerary ranking engine.

use super::*;
use chrono::Duration;
use serde_json::{Value, json};
use std::sync::Mutex;

const NOW: i64 = 1_700_000_000;

fn now() -> DateTime<FixedOffset> {
    DateTime::from_timestamp(NOW, 0)
        .unwrap()
        .with_timezone(&FixedOffset::west_opt(5 * 3600).unwrap())
}

/// A walk-then-ride route as the provider would send it.
fn route(walk_meters: f64, departs_in: i64, line: &str, stop: &str, duration_secs: i64) -> Value {
    json!({
        "overview_polyline": {"points": "_p~iF~ps|U_ulLnnqC_mqNvxq`@"},
        "legs": [{
            "distance": {"text": "4.2 km", "value": 4200},
            "duration": {"text": "20 mins", "value": duration_secs},
            "steps": [
                {
                    "travel_mode": "WALKING",
                    "distance": {"text": "0.5 km", "value": walk_meters},
                    "html_instructions": format!("Walk to {stop}")
                },
                {
                    "travel_mode": "TRANSIT",
                    "distance": {"text": "3.7 km", "value": 3700},
                    "html_instructions": format!("Subway towards {stop}"),
                    "transit_details": {
                        "line": {"name": line},
                        "departure_stop": {"name": stop},
                        "arrival_stop": {"name": "Kenmore"},
                        "departure_time": {"value": NOW + departs_in},
                        "num_stops": 4
                    }
                }
            ]
        }]
    })
}

fn walk_only(meters: f64, duration_secs: i64) -> Value {
    json!({
        "legs": [{
            "distance": {"text": "3.6 km", "value": meters},
            "duration": {"text": "46 mins", "value": duration_secs},
            "steps": [{
                "travel_mode": "WALKING",
                "distance": {"text": "3.6 km", "value": meters},
                "html_instructions": "Walk to Fenway Park"
            }]
        }]
    })
}

fn ok_response(routes: Vec<Value>) -> DirectionsResponse {
    serde_json::from_value(json!({"status": "OK", "routes": routes})).unwrap()
}

/// Fake provider serving one canned reply and recording every query.
struct FakeProvider {
    reply: Option<DirectionsResponse>,
    queries: Mutex<Vec<DirectionsQuery>>,
}

impl FakeProvider {
    fn new(response: DirectionsResponse) -> Self {
        Self {
            reply: Some(response),
            queries: Mutex::new(Vec::new()),
        }
    }

    fn offline() -> Self {
        Self {
            reply: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

impl DirectionsProvider for FakeProvider {
    async fn fetch_alternatives(
        &self,
        query: &DirectionsQuery,
    ) -> Result<DirectionsResponse, DirectionsError> {
        self.queries.lock().unwrap().push(query.clone());
        self.reply
            .clone()
            .ok_or_else(|| DirectionsError::MockData("provider offline".to_string()))
    }
}

fn request(profile: SpeedProfile) -> RankRequest {
    RankRequest::new(
        Location::coordinates(42.3523, -71.0552),
        Location::place("Fenway Park"),
        profile,
    )
}

async fn rank(
    provider: &FakeProvider,
    profile: SpeedProfile,
) -> Result<Vec<RankedItinerary>, RankError> {
    let config = RankConfig::default();
    ItineraryRanker::new(provider, &config)
        .rank_feasible_itineraries(&request(profile), now())
        .await
}

#[tokio::test]
async fn slow_walker_loses_tight_connection() {
    // 560 m before a departure at now+500: 622 s slow, 311 s fast
    let provider = FakeProvider::new(ok_response(vec![route(
        560.0,
        500,
        "Red Line",
        "South Station",
        1500,
    )]));

    let slow = rank(&provider, SpeedProfile::Slow).await.unwrap();
    assert!(slow.is_empty());

    let fast = rank(&provider, SpeedProfile::Fast).await.unwrap();
    assert_eq!(fast.len(), 1);
    assert_eq!(fast[0].station_eta, "Reach South Station by 5:18 PM");
    assert_eq!(fast[0].countdown, "Departs in 8 min");
}

#[tokio::test]
async fn ranked_by_recomputed_arrival() {
    // 280 m at the baseline pace leaves provider durations unchanged
    let provider = FakeProvider::new(ok_response(vec![
        route(280.0, 600, "Orange Line", "Downtown Crossing", 1200),
        route(280.0, 600, "Red Line", "South Station", 900),
    ]));

    let ranked = rank(&provider, SpeedProfile::Normal).await.unwrap();
    let order: Vec<_> = ranked.iter().map(|r| r.index).collect();
    assert_eq!(order, vec![1, 0]);
    assert_eq!(ranked[0].arrival, now() + Duration::seconds(900));
    assert_eq!(ranked[1].arrival, now() + Duration::seconds(1200));
    assert_eq!(ranked[0].duration, "15 min");
    assert_eq!(ranked[0].summary, "Via Red Line");
}

#[tokio::test]
async fn at_most_three_results() {
    let provider = FakeProvider::new(ok_response(vec![
        route(280.0, 900, "Red Line", "South Station", 1500),
        route(280.0, 900, "Orange Line", "Downtown Crossing", 1100),
        route(280.0, 900, "Blue Line", "State", 1300),
        route(280.0, 900, "Green Line B", "Park Street", 1000),
        route(280.0, 900, "Green Line C", "Park Street", 1400),
    ]));

    let ranked = rank(&provider, SpeedProfile::Normal).await.unwrap();
    let order: Vec<_> = ranked.iter().map(|r| r.index).collect();
    assert_eq!(order, vec![3, 1, 2]);
}

#[tokio::test]
async fn nothing_catchable_is_empty_success() {
    let provider = FakeProvider::new(ok_response(vec![
        route(280.0, 30, "Red Line", "South Station", 1500),
        route(280.0, -60, "Orange Line", "Downtown Crossing", 1100),
    ]));

    let ranked = rank(&provider, SpeedProfile::Fast).await.unwrap();
    assert!(ranked.is_empty());
}

#[tokio::test]
async fn walk_only_route_admitted() {
    let provider = FakeProvider::new(ok_response(vec![walk_only(3620.0, 2760)]));

    let ranked = rank(&provider, SpeedProfile::Slow).await.unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].summary, "Walking Route");
    assert_eq!(ranked[0].countdown, "Now");
    assert!(ranked[0].station_eta.starts_with("Reach Destination by "));
}

#[tokio::test]
async fn provider_failure_status_reported() {
    let response: DirectionsResponse =
        serde_json::from_value(json!({"status": "ZERO_RESULTS", "routes": []})).unwrap();
    let provider = FakeProvider::new(response);

    let err = rank(&provider, SpeedProfile::Normal).await.unwrap_err();
    assert!(matches!(
        err,
        RankError::ProviderStatus { ref status, .. } if status == "ZERO_RESULTS"
    ));
}

#[tokio::test]
async fn unreachable_provider_reported() {
    let provider = FakeProvider::offline();

    let err = rank(&provider, SpeedProfile::Normal).await.unwrap_err();
    assert!(matches!(err, RankError::ProviderUnavailable(_)));
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn blank_destination_never_reaches_provider() {
    let provider = FakeProvider::new(ok_response(Vec::new()));
    let config = RankConfig::default();
    let request = RankRequest::new(
        Location::place("South Station"),
        Location::place("   "),
        SpeedProfile::Normal,
    );

    let err = ItineraryRanker::new(&provider, &config)
        .rank_feasible_itineraries(&request, now())
        .await
        .unwrap_err();

    assert!(matches!(err, RankError::InvalidInput(DomainError::BlankLocation)));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn malformed_route_skipped() {
    let mut broken = route(280.0, 900, "Red Line", "South Station", 1500);
    broken["legs"][0]["steps"][1]["transit_details"]
        .as_object_mut()
        .unwrap()
        .remove("departure_stop");

    let provider = FakeProvider::new(ok_response(vec![
        broken,
        route(280.0, 900, "Orange Line", "Downtown Crossing", 1100),
    ]));

    let ranked = rank(&provider, SpeedProfile::Normal).await.unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].index, 1);
}

#[tokio::test]
async fn out_of_range_times_skipped() {
    let provider = FakeProvider::new(ok_response(vec![
        // Trip that would end some 300,000 years from now
        route(280.0, 900, "Red Line", "South Station", 10_000_000_000_000),
        // Walk too long to express as a duration at all
        route(1e300, 900, "Blue Line", "State", 1500),
        route(280.0, 900, "Orange Line", "Downtown Crossing", 1100),
    ]));

    let ranked = rank(&provider, SpeedProfile::Normal).await.unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].index, 2);
}

#[tokio::test]
async fn query_is_region_qualified() {
    let provider = FakeProvider::new(ok_response(Vec::new()));
    rank(&provider, SpeedProfile::Normal).await.unwrap();

    let queries = provider.queries.lock().unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].origin, "42.3523,-71.0552");
    assert_eq!(queries[0].destination, "Fenway Park, Boston, MA");
    assert_eq!(queries[0].mode, "transit");
    assert!(queries[0].alternatives);
}

#[tokio::test]
async fn same_input_same_output() {
    let provider = FakeProvider::new(ok_response(vec![
        route(560.0, 500, "Red Line", "South Station", 1500),
        route(690.0, 900, "Orange Line", "Downtown Crossing", 1620),
        walk_only(3620.0, 2760),
    ]));

    let first = rank(&provider, SpeedProfile::Normal).await.unwrap();
    let second = rank(&provider, SpeedProfile::Normal).await.unwrap();
    assert_eq!(first, second);
}

#[test]
fn evaluate_fills_display_fields() {
    let response = ok_response(vec![route(280.0, 600, "Red Line", "South Station", 1500)]);
    let candidates = convert_routes(&response);
    let config = RankConfig::default();

    let ranked = evaluate_itinerary(&candidates[0], SpeedProfile::Normal, &config, now()).unwrap();

    // 17:13:20 local; 200 s walk, 1500 s trip
    assert_eq!(ranked.time_range, "Leave Now – 5:38 PM");
    assert_eq!(ranked.station_eta, "Reach South Station by 5:16 PM");
    assert_eq!(ranked.countdown, "Departs in 10 min");
    assert_eq!(ranked.duration_mins, 25);
    assert_eq!(ranked.distance, "4.2 km");
    assert_eq!(
        ranked.steps,
        vec![
            "Walk to South Station",
            "Board <b>Red Line</b> at South Station",
            "Ride 4 stops",
        ]
    );
    assert_eq!(ranked.path.len(), 3);
}

#[test]
fn rank_candidates_filters_then_sorts() {
    let response = ok_response(vec![
        route(560.0, 500, "Red Line", "South Station", 1500),
        route(280.0, 900, "Orange Line", "Downtown Crossing", 2000),
    ]);
    let candidates = convert_routes(&response);
    let config = RankConfig::default();

    let slow = rank_candidates(&candidates, SpeedProfile::Slow, &config, now());
    assert_eq!(slow.iter().map(|r| r.index).collect::<Vec<_>>(), vec![1]);

    let fast = rank_candidates(&candidates, SpeedProfile::Fast, &config, now());
    assert_eq!(fast.iter().map(|r| r.index).collect::<Vec<_>>(), vec![0, 1]);
}
