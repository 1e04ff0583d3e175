//! Axum-based HTTP server for stability-relay.
//!
//! This module sets up the router the browser front end talks to: three
//! multipart image routes that relay to the Stability API, plus health,
//! credential and metrics endpoints.
//!
//! # Components
//!
//! - `form`: Multipart body extraction into an `UploadForm`.
//! - `handlers`: Implementation of individual endpoints.
//! - `middleware`: Request IDs, CORS and request metrics.
//! - `routes`: The main router configuration that ties everything together.

mod form;
mod handlers;
mod middleware;
mod routes;

pub use routes::{create_router, AppState};
