//! Network surface for Thermolog
//!
//! The web server and socket transport themselves live outside the core;
//! this crate is the seam between them and the duty-cycle engine:
//!
//! - [`http`] - transport-agnostic request handlers for the CSV export,
//!   clear, and latest-reading routes. Each returns a plain
//!   [`http::HttpResponse`] the embedding server maps onto its own types.
//! - [`live`] - the push channel: an [`Observer`] adapter over any
//!   byte sink, plus handling for the optional `get_temperature` pull
//!   command.
//!
//! Nothing here blocks the sampling loop: handlers touch only the log
//! store and the publisher's cache, both owned by the same single thread
//! of control.
//!
//! [`Observer`]: thermolog_core::publish::Observer

pub mod http;
pub mod live;

pub use http::{clear_csv, download_csv, latest_json, latest_temperature, HttpResponse};
pub use live::{handle_message, TextSocket, TransportError};
