// HTTP routes configuration

use super::handlers::{
    erase_handler, generate_handler, health_handler, inpaint_handler, is_working_handler,
    metrics_handler, root_handler, test_api_key_handler,
};
use super::middleware::{cors_layer, request_id_layers, track_metrics};
use crate::config::AppConfig;
use crate::error::Result;
use crate::stability::ImageProvider;
use crate::translation::RequestTranslator;
use axum::extract::DefaultBodyLimit;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub translator: RequestTranslator,
}

pub fn create_router(config: AppConfig, provider: Arc<dyn ImageProvider>) -> Result<Router> {
    let config = Arc::new(config);
    let state = AppState {
        translator: RequestTranslator::new(config.clone(), provider),
    };

    let (set_request_id, propagate_request_id) = request_id_layers();
    let cors = cors_layer(&config.server)?;

    let app = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/test-api-key", get(test_api_key_handler))
        .route("/api/IsWorking", post(is_working_handler))
        .route("/metrics", get(metrics_handler))
        .route("/generate", post(generate_handler))
        .route("/inpaint", post(inpaint_handler))
        .route("/erase_direct_upload", post(erase_handler))
        .route_layer(middleware::from_fn(track_metrics))
        // Enforced while `Multipart` reads the body, so overruns surface as JSON errors
        .layer(DefaultBodyLimit::max(config.server.max_body_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state);

    Ok(app)
}
