use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::entities::Location;

const DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/?api=1";

/// Everything except ASCII alphanumerics and `_.-~/`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// Builds a directions link visiting `route` in order.
///
/// Returns `None` for an empty route.
pub fn directions_url(route: &[Location]) -> Option<String> {
    let origin = route.first()?;
    let destination = route.last()?;

    let mut url = format!(
        "{}&origin={}&destination={}",
        DIRECTIONS_URL,
        encode(&origin.name),
        encode(&destination.name)
    );

    if route.len() > 2 {
        let waypoints = route[1..route.len() - 1]
            .iter()
            .map(|l| l.name.as_str())
            .collect::<Vec<_>>()
            .join("|");
        url.push_str("&waypoints=");
        url.push_str(&encode(&waypoints));
    }

    Some(url)
}

#[cfg(test)]
fn named(names: &[&str]) -> Vec<Location> {
    use crate::entities::Coordinates;

    names
        .iter()
        .map(|name| Location::new((*name).into(), Coordinates::new(0.0, 0.0)))
        .collect()
}

#[test]
fn encode_matches_path_safe_quoting() {
    assert_eq!(encode("10 Downing St, London"), "10%20Downing%20St%2C%20London");
    assert_eq!(encode("a/b_c.d-e~f"), "a/b_c.d-e~f");
    assert_eq!(encode("A|B"), "A%7CB");
    assert_eq!(encode("Zürich"), "Z%C3%BCrich");
}

#[test]
fn directions_url_with_waypoints() {
    let url = directions_url(&named(&["Start Here", "B", "C", "End"])).unwrap();

    assert_eq!(
        url,
        "https://www.google.com/maps/dir/?api=1&origin=Start%20Here&destination=End&waypoints=B%7CC"
    );
}

#[test]
fn directions_url_without_waypoints() {
    let url = directions_url(&named(&["A", "B"])).unwrap();
    assert_eq!(
        url,
        "https://www.google.com/maps/dir/?api=1&origin=A&destination=B"
    );

    let url = directions_url(&named(&["A"])).unwrap();
    assert_eq!(
        url,
        "https://www.google.com/maps/dir/?api=1&origin=A&destination=A"
    );

    assert!(directions_url(&[]).is_none());
}
