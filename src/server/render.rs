//! HTML pages for the form front end.

use crate::entities::Plan;

/// Stop fields shown on an empty form, after the start.
const STOP_FIELDS: usize = 5;

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        body
    )
}

pub fn index(error: Option<&str>) -> String {
    let mut body = String::from("<h1>Route Optimizer</h1>\n");

    if let Some(error) = error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", escape(error)));
    }

    body.push_str("<form method=\"post\" action=\"/\">\n");
    body.push_str("<label>Starting point <input name=\"location_1\" required></label><br>\n");
    for i in 2..STOP_FIELDS + 2 {
        body.push_str(&format!(
            "<label>Stop {} <input name=\"location_{}\"></label><br>\n",
            i - 1,
            i
        ));
    }
    body.push_str(
        "<label><input type=\"checkbox\" name=\"useFixedDestination\"> Fixed destination</label>\n\
         <input name=\"fixed_destination\"><br>\n\
         <button type=\"submit\">Optimize</button>\n\
         </form>\n",
    );

    page("Route Optimizer", &body)
}

pub fn route(plan: &Plan) -> String {
    let mut body = String::from("<h1>Optimized Route</h1>\n");

    body.push_str(&format!("<p>Origin: {}</p>\n", escape(&plan.origin)));
    if !plan.waypoints.is_empty() {
        body.push_str(&format!("<p>Waypoints: {}</p>\n", escape(&plan.waypoints)));
    }
    body.push_str(&format!("<p>Destination: {}</p>\n", escape(&plan.destination)));
    if plan.has_fixed_destination {
        body.push_str("<p>The destination was fixed.</p>\n");
    }

    body.push_str("<ol>\n");
    for location in &plan.locations {
        body.push_str(&format!(
            "<li>{} ({:.5}, {:.5})</li>\n",
            escape(&location.name),
            location.coordinates.lat,
            location.coordinates.lon
        ));
    }
    body.push_str("</ol>\n");

    body.push_str(&format!(
        "<p><a href=\"{}\" target=\"_blank\">Open in Google Maps</a></p>\n<p><a href=\"/\">Plan another route</a></p>\n",
        escape(&plan.google_maps_url)
    ));

    page("Optimized Route", &body)
}

#[test]
fn escape_neutralizes_markup() {
    assert_eq!(
        escape("<script>alert('x')</script> & \"y\""),
        "&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt; &amp; &quot;y&quot;"
    );
}

#[test]
fn index_shows_escaped_error() {
    let html = index(Some("Could not find coordinates for stop: '<b>'"));

    assert!(html.contains("Could not find coordinates for stop: &#x27;&lt;b&gt;&#x27;"));
    assert!(html.contains("name=\"location_1\""));
    assert!(html.contains("name=\"location_6\""));
    assert!(!html.contains("name=\"location_7\""));
}

#[test]
fn route_lists_stops_in_order_with_link() {
    use crate::entities::{Coordinates, Location};

    let plan = Plan::new(
        vec![
            Location::new("A & Co".into(), Coordinates::new(1.0, 2.0)),
            Location::new("B".into(), Coordinates::new(3.0, 4.0)),
            Location::new("C".into(), Coordinates::new(5.0, 6.0)),
        ],
        "https://www.google.com/maps/dir/?api=1&origin=A&destination=C".into(),
        true,
    );

    let html = route(&plan);

    let a = html.find("<li>A &amp; Co").unwrap();
    let b = html.find("<li>B").unwrap();
    let c = html.find("<li>C").unwrap();
    assert!(a < b && b < c);
    assert!(html.contains("Waypoints: B"));
    assert!(html.contains("href=\"https://www.google.com/maps/dir/?api=1&amp;origin=A&amp;destination=C\""));
    assert!(html.contains("The destination was fixed."));
}
