use super::{helpers::resolve_location, Engine};

use async_trait::async_trait;

use crate::{
    api::RouteAPI,
    entities::{Plan, RouteRequest},
    error::{insufficient_input_error, invalid_input_error, upstream_error, Error, Role},
    external::{google_maps, Geocoder},
    optimizer,
};

#[async_trait]
impl<G: Geocoder> RouteAPI for Engine<G> {
    #[tracing::instrument(skip(self))]
    async fn plan_route(&self, request: RouteRequest) -> Result<Plan, Error> {
        let mut names = request.locations.iter().map(|name| name.trim());
        let mut locations = Vec::with_capacity(request.locations.len());

        // A blank start is skipped and then caught by the length check below.
        if let Some(start) = names.next().filter(|name| !name.is_empty()) {
            locations.push(resolve_location(&self.geocoder, start, Role::Start).await?);
        }

        for name in names {
            if name.is_empty() {
                return Err(invalid_input_error());
            }
            locations.push(resolve_location(&self.geocoder, name, Role::Stop).await?);
        }

        let destination = match request
            .fixed_destination
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
        {
            Some(name) => Some(resolve_location(&self.geocoder, name, Role::Destination).await?),
            None => None,
        };

        if locations.len() < 2 {
            return Err(insufficient_input_error());
        }

        let has_fixed_destination = destination.is_some();
        let route = optimizer::optimize(locations);
        let route = optimizer::apply_fixed_destination(route, destination);

        let url = google_maps::directions_url(&route).ok_or_else(upstream_error)?;

        tracing::info!(stops = route.len(), "route planned");

        Ok(Plan::new(route, url, has_fixed_destination))
    }
}

#[cfg(test)]
use crate::external::fixtures::TableGeocoder;

#[cfg(test)]
fn request(locations: &[&str], fixed_destination: Option<&str>) -> RouteRequest {
    RouteRequest {
        locations: locations.iter().map(|s| s.to_string()).collect(),
        fixed_destination: fixed_destination.map(String::from),
    }
}

#[cfg(test)]
fn equator() -> TableGeocoder {
    TableGeocoder::equator()
}

#[test]
fn plans_nearest_neighbor_order() {
    use tokio_test::block_on;

    let engine = Engine::new(equator());
    let plan = block_on(engine.plan_route(request(&["A", "B", "C", "D"], None))).unwrap();

    let names: Vec<_> = plan.locations.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "D", "C"]);
    assert_eq!(plan.origin, "A");
    assert_eq!(plan.destination, "C");
    assert_eq!(plan.waypoints, "B|D");
    assert_eq!(
        plan.google_maps_url,
        "https://www.google.com/maps/dir/?api=1&origin=A&destination=C&waypoints=B%7CD"
    );
    assert!(!plan.has_fixed_destination);
}

#[test]
fn fixed_destination_goes_last() {
    use tokio_test::block_on;

    let engine = Engine::new(equator());

    let plan = block_on(engine.plan_route(request(&["A", "B", "D"], Some("B")))).unwrap();
    let names: Vec<_> = plan.locations.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["A", "D", "B"]);
    assert!(plan.has_fixed_destination);

    let plan = block_on(engine.plan_route(request(&["A", "C"], Some(" Z ")))).unwrap();
    let names: Vec<_> = plan.locations.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["A", "C", "Z"]);
}

#[test]
fn blank_fixed_destination_is_ignored() {
    use tokio_test::block_on;

    let engine = Engine::new(equator());
    let plan = block_on(engine.plan_route(request(&["A", "C", "B"], Some("  ")))).unwrap();

    let names: Vec<_> = plan.locations.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
    assert!(!plan.has_fixed_destination);
}

#[test]
fn unresolved_stop_aborts_before_later_lookups() {
    use crate::error::resolution_error;
    use tokio_test::block_on;

    let engine = Engine::new(equator());
    let err = block_on(engine.plan_route(request(&["A", "Nowhere", "B"], Some("C")))).unwrap_err();

    assert_eq!(err, resolution_error(Role::Stop, "Nowhere"));
    assert_eq!(*engine.geocoder.asked.lock().unwrap(), vec!["A", "Nowhere"]);
}

#[test]
fn unresolved_start_and_destination_name_their_role() {
    use tokio_test::block_on;

    let engine = Engine::new(equator());

    let err = block_on(engine.plan_route(request(&["Nowhere", "A"], None))).unwrap_err();
    assert_eq!(
        err.message,
        "Could not find coordinates for starting point: 'Nowhere'"
    );

    let err = block_on(engine.plan_route(request(&["A", "B"], Some("Atlantis")))).unwrap_err();
    assert_eq!(
        err.message,
        "Could not find coordinates for destination: 'Atlantis'"
    );
}

#[test]
fn needs_a_start_and_one_stop() {
    use tokio_test::block_on;

    let engine = Engine::new(equator());

    let err = block_on(engine.plan_route(request(&["A"], None))).unwrap_err();
    assert_eq!(err, insufficient_input_error());

    // the fixed destination does not count as a stop
    let err = block_on(engine.plan_route(request(&["A"], Some("B")))).unwrap_err();
    assert_eq!(err, insufficient_input_error());

    let err = block_on(engine.plan_route(request(&["", "B"], None))).unwrap_err();
    assert_eq!(err, insufficient_input_error());

    let err = block_on(engine.plan_route(request(&[], None))).unwrap_err();
    assert_eq!(err, insufficient_input_error());
}

#[test]
fn blank_stop_is_invalid_input() {
    use tokio_test::block_on;

    let engine = Engine::new(equator());
    let err = block_on(engine.plan_route(request(&["A", " ", "B"], None))).unwrap_err();

    assert_eq!(err, invalid_input_error());
}

#[test]
fn out_of_range_coordinates_count_as_unresolved() {
    use crate::error::resolution_error;
    use tokio_test::block_on;

    let engine = Engine::new(TableGeocoder::with(&[
        ("A", 0.0, 0.0),
        ("Bad", 95.0, 0.0),
    ]));
    let err = block_on(engine.plan_route(request(&["A", "Bad"], None))).unwrap_err();

    assert_eq!(err, resolution_error(Role::Stop, "Bad"));
}
