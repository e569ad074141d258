use std::collections::HashMap;

use axum::extract::{Extension, Form};
use axum::response::Html;

use crate::api::{DynAPI, RouteAPI};
use crate::entities::RouteRequest;
use crate::error::Error;
use crate::server::render;

pub async fn index() -> Html<String> {
    Html(render::index(None))
}

#[tracing::instrument(skip_all)]
pub async fn submit(
    Extension(api): Extension<DynAPI>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Html<String>, Error> {
    tracing::debug!("processing route request");

    match api.plan_route(parse_fields(&fields)).await {
        Ok(plan) => Ok(Html(render::route(&plan))),
        Err(err) if err.is_user_facing() => Ok(Html(render::index(Some(&err.message)))),
        Err(err) => Err(err),
    }
}

/// `location_1` is the start; stops follow from `location_2` until the
/// first missing or blank field.
pub fn parse_fields(fields: &HashMap<String, String>) -> RouteRequest {
    let field = |key: &str| fields.get(key).map(|v| v.trim()).unwrap_or_default();

    let mut locations = vec![field("location_1").to_string()];
    locations.extend(
        (2..)
            .map(|i| field(&format!("location_{}", i)))
            .take_while(|name| !name.is_empty())
            .map(String::from),
    );

    let fixed_destination = fields
        .contains_key("useFixedDestination")
        .then(|| field("fixed_destination"))
        .filter(|name| !name.is_empty())
        .map(String::from);

    RouteRequest {
        locations,
        fixed_destination,
    }
}

#[cfg(test)]
fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn reads_start_and_consecutive_stops() {
    let request = parse_fields(&fields(&[
        ("location_1", "  Home "),
        ("location_2", "Work"),
        ("location_3", "Gym"),
        ("location_5", "Skipped"),
    ]));

    assert_eq!(request.locations, vec!["Home", "Work", "Gym"]);
    assert_eq!(request.fixed_destination, None);
}

#[test]
fn stops_at_first_blank_stop() {
    let request = parse_fields(&fields(&[
        ("location_1", "Home"),
        ("location_2", "   "),
        ("location_3", "Gym"),
    ]));

    assert_eq!(request.locations, vec!["Home"]);
}

#[test]
fn blank_start_keeps_its_slot() {
    let request = parse_fields(&fields(&[("location_2", "Work")]));

    assert_eq!(request.locations, vec!["", "Work"]);
}

#[test]
fn fixed_destination_needs_the_checkbox() {
    let request = parse_fields(&fields(&[
        ("location_1", "Home"),
        ("location_2", "Work"),
        ("fixed_destination", "Airport"),
    ]));
    assert_eq!(request.fixed_destination, None);

    let request = parse_fields(&fields(&[
        ("location_1", "Home"),
        ("location_2", "Work"),
        ("useFixedDestination", "on"),
        ("fixed_destination", " Airport "),
    ]));
    assert_eq!(request.fixed_destination.as_deref(), Some("Airport"));

    let request = parse_fields(&fields(&[
        ("location_1", "Home"),
        ("useFixedDestination", "on"),
        ("fixed_destination", ""),
    ]));
    assert_eq!(request.fixed_destination, None);
}
