mod handlers;
mod render;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};

use crate::api::{DynAPI, API};
use crate::error::{server_error, Error};
use crate::server::handlers::{form, routes};

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/", get(form::index).post(form::submit))
        .route("/routes", post(routes::create))
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(router(api).into_make_service())
        .await
        .map_err(server_error)
}

#[cfg(test)]
fn call(
    api: DynAPI,
    request: axum::http::Request<axum::body::Body>,
) -> (axum::http::StatusCode, String) {
    use tower::ServiceExt;

    tokio_test::block_on(async {
        let response = router(api).oneshot(request).await.unwrap();
        let status = response.status();
        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();

        (status, String::from_utf8(body.to_vec()).unwrap())
    })
}

#[cfg(test)]
fn post_request(uri: &str, content_type: &str, body: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", content_type)
        .body(axum::body::Body::from(body.to_string()))
        .unwrap()
}

#[cfg(test)]
fn equator_api() -> DynAPI {
    use crate::{engine::Engine, external::fixtures::TableGeocoder};

    Arc::new(Engine::new(TableGeocoder::equator()))
}

#[cfg(test)]
const FORM: &str = "application/x-www-form-urlencoded";

#[test]
fn index_page_serves_the_form() {
    use axum::http::{Request, StatusCode};

    let request = Request::builder()
        .uri("/")
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, body) = call(equator_api(), request);

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("name=\"location_1\""));
    assert!(body.contains("name=\"useFixedDestination\""));
}

#[test]
fn form_submission_renders_the_ordered_route() {
    use axum::http::StatusCode;

    let (status, body) = call(
        equator_api(),
        post_request(
            "/",
            FORM,
            "location_1=A&location_2=B&location_3=C&location_4=D&useFixedDestination=on&fixed_destination=B",
        ),
    );

    assert_eq!(status, StatusCode::OK);
    let d = body.find("<li>D").unwrap();
    let c = body.find("<li>C").unwrap();
    let b = body.find("<li>B").unwrap();
    assert!(body.find("<li>A").unwrap() < d && d < c && c < b);
    assert!(body.contains("origin=A&amp;destination=B&amp;waypoints=D%7CC"));
}

#[test]
fn form_caller_errors_rerender_the_form() {
    use axum::http::StatusCode;

    let (status, body) = call(
        equator_api(),
        post_request("/", FORM, "location_1=A&location_2=%3Cb%3ENowhere"),
    );
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Could not find coordinates for stop: &#x27;&lt;b&gt;Nowhere&#x27;"));
    assert!(body.contains("name=\"location_1\""));

    let (status, body) = call(equator_api(), post_request("/", FORM, "location_1=A"));
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Please enter at least a starting point and one stop."));
}

#[test]
fn form_internal_errors_fall_through_to_json() {
    use axum::http::StatusCode;

    use crate::{engine::Engine, external::fixtures::UnreachableGeocoder};

    let api: DynAPI = Arc::new(Engine::new(UnreachableGeocoder));
    let (status, body) = call(api, post_request("/", FORM, "location_1=A&location_2=B"));

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "code": 4, "error": "Internal Server Error" })
    );
}

#[test]
fn json_api_returns_the_plan() {
    use axum::http::StatusCode;

    let (status, body) = call(
        equator_api(),
        post_request("/routes", "application/json", r#"{"locations": ["A", "B", "C", "D"]}"#),
    );

    assert_eq!(status, StatusCode::OK);
    let plan: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(plan["origin"], "A");
    assert_eq!(plan["destination"], "C");
    assert_eq!(plan["waypoints"], "B|D");
    assert_eq!(plan["has_fixed_destination"], false);
    assert_eq!(plan["locations"][2]["name"], "D");
    assert_eq!(plan["locations"][2]["coordinates"]["lon"], 2.0);
    assert!(plan.get("id").is_none());
}

#[test]
fn json_api_caller_errors_are_bad_requests() {
    use axum::http::StatusCode;

    let (status, body) = call(
        equator_api(),
        post_request(
            "/routes",
            "application/json",
            r#"{"locations": ["A", "B"], "fixed_destination": "Atlantis"}"#,
        ),
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "code": 102,
            "error": "Could not find coordinates for destination: 'Atlantis'",
        })
    );
}
