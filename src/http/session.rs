//! Language persistence across requests.
//!
//! The active language travels in a `lang` cookie. It is read when a request
//! starts and written back only when an action changed it.

use axum::http::{header, HeaderMap, HeaderValue};
use cookie::{Cookie, SameSite};

/// Cookie holding the active language.
pub const LANGUAGE_COOKIE: &str = "lang";

/// Language stored in the request's cookies, if any.
pub fn language_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == LANGUAGE_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// `Set-Cookie` value persisting `lang`.
pub fn language_cookie(lang: &str) -> Option<HeaderValue> {
    let cookie = Cookie::build((LANGUAGE_COOKIE, lang))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    HeaderValue::from_str(&cookie.to_string()).ok()
}
