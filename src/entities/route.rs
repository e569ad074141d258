use serde::{Deserialize, Serialize};

use crate::entities::Location;

/// What a caller asks for: stop names in entry order, the first being the start.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RouteRequest {
    pub locations: Vec<String>,
    #[serde(default)]
    pub fixed_destination: Option<String>,
}

/// An ordered route together with its directions link.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Plan {
    pub origin: String,
    pub destination: String,
    pub waypoints: String,
    pub google_maps_url: String,
    pub locations: Vec<Location>,
    pub has_fixed_destination: bool,
}

impl Plan {
    pub fn new(
        locations: Vec<Location>,
        google_maps_url: String,
        has_fixed_destination: bool,
    ) -> Self {
        let origin = locations.first().map(|l| l.name.clone()).unwrap_or_default();
        let destination = locations.last().map(|l| l.name.clone()).unwrap_or_default();
        let waypoints = match locations.len() {
            0..=2 => String::new(),
            n => locations[1..n - 1]
                .iter()
                .map(|l| l.name.as_str())
                .collect::<Vec<_>>()
                .join("|"),
        };

        Self {
            origin,
            destination,
            waypoints,
            google_maps_url,
            locations,
            has_fixed_destination,
        }
    }
}

#[test]
fn plan_splits_endpoints_and_waypoints() {
    use crate::entities::Coordinates;

    let stops: Vec<Location> = ["A", "B", "C", "D"]
        .iter()
        .map(|name| Location::new((*name).into(), Coordinates::new(0.0, 0.0)))
        .collect();

    let plan = Plan::new(stops, "".into(), false);

    assert_eq!(plan.origin, "A");
    assert_eq!(plan.destination, "D");
    assert_eq!(plan.waypoints, "B|C");
}

#[test]
fn single_stop_plan_has_no_waypoints() {
    use crate::entities::Coordinates;

    let plan = Plan::new(
        vec![Location::new("A".into(), Coordinates::new(1.0, 2.0))],
        "".into(),
        false,
    );

    assert_eq!(plan.origin, "A");
    assert_eq!(plan.destination, "A");
    assert!(plan.waypoints.is_empty());
}
