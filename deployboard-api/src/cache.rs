/// Cache-Control for read endpoints
///
/// Each data operation declares whether its result may be cached
/// (`Operation::read_options`). Read handlers wrap their body in `Fresh`, which
/// sends `Cache-Control: no-store` for non-cacheable results and
/// `private, max-age=N` otherwise.

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use deployboard_shared::data::ReadOptions;
use serde::Serialize;

/// Builds the Cache-Control header for a read
pub fn cache_control(options: ReadOptions, max_age_seconds: u64) -> HeaderValue {
    if !options.cacheable {
        return HeaderValue::from_static("no-store");
    }

    HeaderValue::from_str(&format!("private, max-age={}", max_age_seconds))
        .unwrap_or_else(|_| HeaderValue::from_static("no-store"))
}

/// JSON body sent with the Cache-Control header of its operation
#[derive(Debug)]
pub struct Fresh<T> {
    pub body: T,
    pub options: ReadOptions,
    pub max_age_seconds: u64,
}

impl<T: Serialize> IntoResponse for Fresh<T> {
    fn into_response(self) -> Response {
        let value = cache_control(self.options, self.max_age_seconds);
        ([(header::CACHE_CONTROL, value)], Json(self.body)).into_response()
    }
}
