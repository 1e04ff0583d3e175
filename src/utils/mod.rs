//! Utility functions and helpers for stability-relay.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization and API key masking.

pub mod logging;
