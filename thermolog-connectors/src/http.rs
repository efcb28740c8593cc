//! HTTP route handlers for the log store and latest reading
//!
//! Routes served (paths as registered by the embedding web server):
//!
//! | Route            | Handler                 | Success       | Failure |
//! |------------------|-------------------------|---------------|---------|
//! | `/downloadCSV`   | [`download_csv`]        | 200 text/csv  | 404/500 |
//! | `/clearCSV`      | [`clear_csv`]           | 200           | 500     |
//! | `/temperature`   | [`latest_temperature`]  | 200 text/plain| 404     |
//! | `/api/latest`    | [`latest_json`]         | 200 json      | 404     |
//!
//! Handlers are synchronous and transport-agnostic: they take the store
//! or publisher and produce an [`HttpResponse`] for the server to encode.
//! A missing log is a caller problem (404), never a controller fault.

use serde::Serialize;

use thermolog_core::publish::{LivePublisher, Observer};
use thermolog_core::storage::LogStore;

/// Minimal response surface the embedding server maps onto its own types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Content type of the body.
    pub content_type: &'static str,
    /// Response body.
    pub body: String,
}

impl HttpResponse {
    fn ok(content_type: &'static str, body: String) -> Self {
        Self {
            status: 200,
            content_type,
            body,
        }
    }

    fn not_found(message: &str) -> Self {
        Self {
            status: 404,
            content_type: "text/plain",
            body: message.into(),
        }
    }

    fn server_error(message: &str) -> Self {
        Self {
            status: 500,
            content_type: "text/plain",
            body: message.into(),
        }
    }
}

/// `GET /downloadCSV` - the entire log, byte-identical to what was appended.
pub fn download_csv<S: LogStore>(store: &mut S) -> HttpResponse {
    if !store.is_present() {
        return HttpResponse::not_found("CSV file not found");
    }
    let mut body = String::new();
    match store.read_all(&mut body) {
        Ok(()) => HttpResponse::ok("text/csv", body),
        Err(e) => {
            log::warn!("CSV export failed: {}", e);
            HttpResponse::server_error("Failed to read CSV file")
        }
    }
}

/// `GET /clearCSV` - truncate the log to empty.
pub fn clear_csv<S: LogStore>(store: &mut S) -> HttpResponse {
    match store.clear() {
        Ok(()) => HttpResponse::ok("text/plain", "CSV file cleared successfully".into()),
        Err(e) => {
            log::warn!("CSV clear failed: {}", e);
            HttpResponse::server_error("Failed to clear CSV file")
        }
    }
}

/// `GET /temperature` - latest Celsius value as plain text.
pub fn latest_temperature<O: Observer, const N: usize>(
    publisher: &LivePublisher<O, N>,
) -> HttpResponse {
    match publisher.latest_text() {
        Some(text) => HttpResponse::ok("text/plain", text.as_str().into()),
        None => HttpResponse::not_found("No reading available"),
    }
}

#[derive(Debug, Serialize)]
struct LatestReading {
    celsius: f32,
}

/// `GET /api/latest` - latest reading as JSON.
pub fn latest_json<O: Observer, const N: usize>(publisher: &LivePublisher<O, N>) -> HttpResponse {
    let Some(celsius) = publisher.latest() else {
        return HttpResponse::not_found("No reading available");
    };
    match serde_json::to_string(&LatestReading { celsius }) {
        Ok(body) => HttpResponse::ok("application/json", body),
        Err(e) => {
            log::warn!("latest reading serialization failed: {}", e);
            HttpResponse::server_error("Failed to serialize reading")
        }
    }
}
