use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::Config,
    handlers::stream,
    middleware::logging,
    routes::{files, health},
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        stream::chat_stream,
        files::upload_file,
        files::list_files,
        files::delete_file,
    ),
    components(schemas(stream::ChatRequest, stream::ChatMessage, health::HealthResponse)),
    tags(
        (name = "chat", description = "Streaming chat relay"),
        (name = "files", description = "File ingestion and management proxy"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

pub fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Chat
        .route("/api/chat", post(stream::chat_stream))
        // Files
        .route("/api/files/upload", post(files::upload_file))
        .route("/api/files/list", get(files::list_files))
        .route("/api/files/delete", delete(files::delete_file));

    // The relay imposes no deadline of its own; the response timeout lives
    // here at the HTTP layer.
    Router::new()
        .merge(api_routes)
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(logging::log_request))
        .layer(TimeoutLayer::new(Duration::from_secs(300)))
        .layer(build_cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    if config.cors.enabled {
        let mut cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any);

        if config.cors.origins.iter().any(|o| o == "*") {
            cors = cors.allow_origin(Any);
        } else {
            for origin in &config.cors.origins {
                if let Ok(parsed_origin) = origin.parse::<axum::http::HeaderValue>() {
                    cors = cors.allow_origin(parsed_origin);
                }
            }
        }

        cors
    } else {
        CorsLayer::permissive()
    }
}
