// stability-relay - Multipart relay from browser forms to the Stability AI image API

pub mod cli;
pub mod config;
pub mod error;
pub mod imaging;
pub mod metrics;
pub mod models;
pub mod server;
pub mod stability;
pub mod translation;
pub mod utils;
