//! Responses produced by controller actions.
//!
//! # Responsibilities
//! - Represent HTML, JSON, redirect and empty responses
//! - Carry status and extra headers set by actions (CORS, cookies)
//! - Convert into an axum response at the HTTP boundary
//!
//! # Design Decisions
//! - Actions return values instead of writing to the socket
//! - JSON bodies are serialized when the response is built, so
//!   serialization errors surface inside the action

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use serde::Serialize;

/// Body of an action response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    Empty,
    Html(String),
    Json(String),
    Text(String),
}

/// Response returned by a controller action.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: ResponseBody,
}

impl Response {
    fn new(status: StatusCode, body: ResponseBody) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body,
        }
    }

    /// `200 OK` with an HTML body.
    pub fn html(body: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, ResponseBody::Html(body.into()))
    }

    /// `200 OK` with `data` serialized as JSON.
    pub fn json<T: Serialize + ?Sized>(data: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_string(data)?;
        Ok(Self::new(StatusCode::OK, ResponseBody::Json(body)))
    }

    /// Plain text with the given status.
    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        Self::new(status, ResponseBody::Text(body.into()))
    }

    /// `302 Found` pointing at `location`.
    pub fn redirect(location: &str) -> Self {
        let mut response = Self::new(StatusCode::FOUND, ResponseBody::Empty);
        if let Ok(value) = HeaderValue::from_str(location) {
            response.headers.insert(header::LOCATION, value);
        } else {
            tracing::warn!(location = %location, "Redirect target is not a valid header value");
        }
        response
    }

    /// No body.
    pub fn empty(status: StatusCode) -> Self {
        Self::new(status, ResponseBody::Empty)
    }

    /// The `Location` header, if set.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        let (content_type, body) = match self.body {
            ResponseBody::Empty => (None, Body::empty()),
            ResponseBody::Html(s) => (Some("text/html; charset=utf-8"), Body::from(s)),
            ResponseBody::Json(s) => (Some("application/json"), Body::from(s)),
            ResponseBody::Text(s) => (Some("text/plain; charset=utf-8"), Body::from(s)),
        };

        let mut response = axum::response::Response::new(body);
        *response.status_mut() = self.status;
        if let Some(content_type) = content_type {
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        response.headers_mut().extend(self.headers);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_response() {
        let response = Response::json(&[1, 2, 3]).unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, ResponseBody::Json("[1,2,3]".into()));
    }

    #[test]
    fn test_redirect_sets_location() {
        let response = Response::redirect("http://localhost:8000/posts");
        assert_eq!(response.status, StatusCode::FOUND);
        assert_eq!(response.location(), Some("http://localhost:8000/posts"));
    }

    #[test]
    fn test_into_response_sets_content_type() {
        let response = Response::html("<p>hi</p>").into_response();
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html; charset=utf-8"
        );

        let response = Response::empty(StatusCode::NO_CONTENT).into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());
    }
}
