//! Nearest-neighbor route ordering.
//!
//! Everything here is synchronous and free of I/O: callers hand in
//! locations whose coordinates are already resolved.

use geo::GeodesicDistance;
use geo_types::Point;

use crate::entities::{Coordinates, Location};

/// Geodesic distance on the WGS84 ellipsoid, in kilometers.
pub fn distance(a: Coordinates, b: Coordinates) -> f64 {
    if a == b {
        return 0.0;
    }

    let a: Point<f64> = a.into();
    let b: Point<f64> = b.into();

    a.geodesic_distance(&b) / 1000.0
}

/// Orders `locations` by repeatedly visiting the closest unvisited one.
///
/// The first location stays first. Among equidistant candidates the one
/// given earliest wins.
#[tracing::instrument(skip_all, fields(len = locations.len()))]
pub fn optimize(locations: Vec<Location>) -> Vec<Location> {
    let mut remaining = locations.into_iter();
    let start = match remaining.next() {
        Some(start) => start,
        None => return vec![],
    };

    tracing::debug!("optimizing route using nearest neighbor");

    let mut remaining: Vec<Location> = remaining.collect();
    let mut route = Vec::with_capacity(remaining.len() + 1);
    route.push(start);

    while let Some(current) = route.last() {
        if remaining.is_empty() {
            break;
        }

        let mut nearest = 0;
        let mut nearest_distance = f64::INFINITY;
        for (i, candidate) in remaining.iter().enumerate() {
            let d = distance(current.coordinates, candidate.coordinates);
            if d < nearest_distance {
                nearest = i;
                nearest_distance = d;
            }
        }

        // `remove` keeps the pool in entry order for the tie-break above.
        route.push(remaining.remove(nearest));
    }

    tracing::debug!("route optimized with {} locations", route.len());

    route
}

/// Moves `destination` to the end of `route`, dropping any stop with the same name.
pub fn apply_fixed_destination(
    route: Vec<Location>,
    destination: Option<Location>,
) -> Vec<Location> {
    let destination = match destination {
        Some(destination) => destination,
        None => return route,
    };

    let mut route: Vec<Location> = route
        .into_iter()
        .filter(|l| l.name != destination.name)
        .collect();
    route.push(destination);

    route
}

#[cfg(test)]
fn at(name: &str, lat: f64, lon: f64) -> Location {
    Location::new(name.into(), Coordinates::new(lat, lon))
}

#[cfg(test)]
fn names(route: &[Location]) -> Vec<&str> {
    route.iter().map(|l| l.name.as_str()).collect()
}

#[test]
fn distance_is_symmetric() {
    let pairs = [
        (Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 1.0)),
        (Coordinates::new(51.5074, -0.1278), Coordinates::new(48.8566, 2.3522)),
        (Coordinates::new(-33.8688, 151.2093), Coordinates::new(40.7128, -74.006)),
    ];

    for (a, b) in pairs {
        assert!((distance(a, b) - distance(b, a)).abs() < 1e-6);
    }
}

#[test]
fn distance_to_self_is_zero() {
    let here = Coordinates::new(37.7749, -122.4194);
    assert_eq!(distance(here, here), 0.0);
}

#[test]
fn distance_uses_the_ellipsoid() {
    // One degree of longitude on the WGS84 equator is ~111.32 km; a
    // spherical model with the mean radius gives ~111.19 km.
    let d = distance(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 1.0));
    assert!((d - 111.319).abs() < 0.01, "got {}", d);

    // London to Paris
    let d = distance(
        Coordinates::new(51.5074, -0.1278),
        Coordinates::new(48.8566, 2.3522),
    );
    assert!((d - 343.9).abs() < 1.0, "got {}", d);
}

#[test]
fn optimize_empty_and_single() {
    assert!(optimize(vec![]).is_empty());

    let only = vec![at("A", 10.0, 10.0)];
    assert_eq!(optimize(only.clone()), only);
}

#[test]
fn optimize_visits_nearest_first() {
    let route = optimize(vec![
        at("A", 0.0, 0.0),
        at("B", 0.0, 1.0),
        at("C", 0.0, 10.0),
        at("D", 0.0, 2.0),
    ]);

    assert_eq!(names(&route), vec!["A", "B", "D", "C"]);
}

#[test]
fn optimize_keeps_entry_order_on_ties() {
    let route = optimize(vec![
        at("A", 0.0, 0.0),
        at("B", 5.0, 5.0),
        at("C", 5.0, 5.0),
    ]);
    assert_eq!(names(&route), vec!["A", "B", "C"]);

    let route = optimize(vec![
        at("A", 0.0, 0.0),
        at("C", 5.0, 5.0),
        at("B", 5.0, 5.0),
    ]);
    assert_eq!(names(&route), vec!["A", "C", "B"]);
}

#[test]
fn optimize_is_a_deterministic_permutation_anchored_at_start() {
    let input = vec![
        at("Home", 52.52, 13.405),
        at("Hamburg", 53.5511, 9.9937),
        at("Munich", 48.1351, 11.582),
        at("Cologne", 50.9375, 6.9603),
        at("Leipzig", 51.3397, 12.3731),
        at("Dresden", 51.0504, 13.7373),
        at("Frankfurt", 50.1109, 8.6821),
    ];

    let first = optimize(input.clone());
    let second = optimize(input.clone());

    assert_eq!(first, second);
    assert_eq!(first[0], input[0]);
    assert_eq!(first.len(), input.len());

    let mut got = names(&first);
    let mut want = names(&input);
    got.sort();
    want.sort();
    assert_eq!(got, want);
}

#[test]
fn fixed_destination_absent_leaves_route_alone() {
    let route = vec![at("A", 0.0, 0.0), at("B", 0.0, 1.0)];
    assert_eq!(apply_fixed_destination(route.clone(), None), route);
}

#[test]
fn fixed_destination_moves_matching_stop_last() {
    let route = optimize(vec![at("A", 0.0, 0.0), at("B", 0.0, 1.0), at("C", 0.0, 2.0)]);
    assert_eq!(names(&route), vec!["A", "B", "C"]);

    let route = apply_fixed_destination(route, Some(at("B", 0.0, 1.0)));
    assert_eq!(names(&route), vec!["A", "C", "B"]);
}

#[test]
fn fixed_destination_appends_new_stop() {
    let route = vec![at("A", 0.0, 0.0), at("B", 0.0, 1.0)];
    let route = apply_fixed_destination(route, Some(at("Z", 0.0, 5.0)));

    assert_eq!(names(&route), vec!["A", "B", "Z"]);
}

#[test]
fn fixed_destination_collapses_every_duplicate() {
    let route = vec![
        at("A", 0.0, 0.0),
        at("B", 0.0, 1.0),
        at("B", 0.0, 1.0),
        at("C", 0.0, 2.0),
    ];
    let route = apply_fixed_destination(route, Some(at("B", 0.0, 1.0)));

    assert_eq!(names(&route), vec!["A", "C", "B"]);
}

#[test]
fn fixed_destination_can_displace_the_start() {
    let route = vec![at("A", 0.0, 0.0), at("B", 0.0, 1.0)];
    let route = apply_fixed_destination(route, Some(at("A", 0.0, 0.0)));

    assert_eq!(names(&route), vec!["B", "A"]);
}
