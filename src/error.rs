use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt::{self, Display};
use std::{io, num};

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    /// Errors the caller can fix; their message is safe to show.
    pub fn is_user_facing(&self) -> bool {
        self.code >= 100
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        io_error(err)
    }
}

impl From<num::ParseIntError> for Error {
    fn from(err: num::ParseIntError) -> Self {
        config_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Which part of the request a location name came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Role {
    Start,
    Stop,
    Destination,
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Start => f.write_str("starting point"),
            Role::Stop => f.write_str("stop"),
            Role::Destination => f.write_str("destination"),
        }
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 101,
        message: "invalid input".into(),
    }
}

pub fn resolution_error(role: Role, name: &str) -> Error {
    Error {
        code: 102,
        message: format!("Could not find coordinates for {}: '{}'", role, name),
    }
}

pub fn insufficient_input_error() -> Error {
    Error {
        code: 103,
        message: "Please enter at least a starting point and one stop.".into(),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    tracing::error!("reqwest error: {}", err);

    Error {
        code: 3,
        message: "reqwest error".into(),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 4,
        message: "upstream error".into(),
    }
}

pub fn io_error(err: io::Error) -> Error {
    Error {
        code: 6,
        message: format!("io error: {}", err),
    }
}

pub fn config_error<T: Display>(err: T) -> Error {
    Error {
        code: 7,
        message: format!("configuration error: {}", err),
    }
}

pub fn server_error<T: Display>(err: T) -> Error {
    Error {
        code: 8,
        message: format!("server error: {}", err),
    }
}

#[test]
fn resolution_error_names_the_role() {
    let err = resolution_error(Role::Start, "Nowhere");
    assert_eq!(
        err.message,
        "Could not find coordinates for starting point: 'Nowhere'"
    );

    let err = resolution_error(Role::Destination, "Atlantis");
    assert_eq!(
        err.message,
        "Could not find coordinates for destination: 'Atlantis'"
    );
    assert!(err.is_user_facing());
}

#[test]
fn internal_errors_hide_their_message() {
    let response = upstream_error().into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = insufficient_input_error().into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
