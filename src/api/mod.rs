//! Portal HTTP API
//!
//! HTTP layer for the portal, built with Axum.
//!
//! # Endpoints
//!
//! ## Site
//! - `GET /` - Single-page site with the assistant widgets
//!
//! ## Content
//! - `GET /api/v1/destinations` - List destinations (`?category=Villa`)
//! - `GET /api/v1/destinations/:id` - Get a destination
//! - `GET /api/v1/events` - List events (`?upcoming=true`)
//! - `GET /api/v1/attractions` - Discovery landmarks
//! - `GET /api/v1/dishes` - Regional dishes
//! - `GET /api/v1/map` - Map markers
//! - `GET /api/v1/membership` - Membership offer
//! - `GET /api/v1/gallery/suggestions` - Gallery prompt ideas
//!
//! ## Assistants
//! - `POST /api/v1/concierge` - Concierge chat
//! - `POST /api/v1/guide` - Elite guide
//! - `POST /api/v1/discovery` - Ask about a landmark
//! - `POST /api/v1/recipes` - AI chef
//! - `POST /api/v1/gallery` - Generate a picture
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use fvg_portal::api::{serve, AppState};
//! use fvg_portal::assistant::{Assistant, ModelSet};
//! use fvg_portal::config::ServerConfig;
//! use fvg_portal::content::Catalog;
//! use fvg_portal::gemini::{GeminiClient, GeminiConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let model = Arc::new(GeminiClient::new(GeminiConfig::default())?);
//!     let assistant = Assistant::new(model, ModelSet::default());
//!     let config = ServerConfig::default();
//!
//!     let state = AppState::new(Catalog::builtin(), assistant, config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod extract;
pub mod frontend;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use extract::ApiJson;
pub use state::AppState;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Content routes
        .route("/destinations", get(routes::content::list_destinations))
        .route("/destinations/:id", get(routes::content::get_destination))
        .route("/events", get(routes::content::list_events))
        .route("/attractions", get(routes::content::list_attractions))
        .route("/dishes", get(routes::content::list_dishes))
        .route("/map", get(routes::content::map_points))
        .route("/membership", get(routes::content::membership))
        .route("/gallery/suggestions", get(routes::content::gallery_suggestions))
        // Assistant routes
        .route("/concierge", post(routes::assistant::concierge))
        .route("/guide", post(routes::assistant::guide))
        .route("/discovery", post(routes::assistant::discovery))
        .route("/recipes", post(routes::assistant::recipe))
        .route("/gallery", post(routes::assistant::gallery));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config);
    let body_limit = state.config.max_body_bytes;

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::site::index))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS for the configured origins, or any origin when none are listed
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

/// Start the server
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("FVG Portal listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("FVG Portal shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::{Assistant, ModelSet, Widget};
    use crate::content::Catalog;
    use crate::gemini::testing::ScriptedModel;
    use crate::gemini::{GeminiClient, GeminiConfig};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn create_test_app(model: Arc<ScriptedModel>) -> Router {
        let assistant = Assistant::new(model, ModelSet::default());
        let state = AppState::new(Catalog::builtin(), assistant, ServerConfig::default());
        build_router(state)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app(Arc::new(ScriptedModel::text("ok")));
        let (status, _) = send(app, get("/health/live")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready_without_key() {
        let client = GeminiClient::new(GeminiConfig::default()).unwrap();
        let assistant = Assistant::new(Arc::new(client), ModelSet::default());
        let app = build_router(AppState::new(
            Catalog::builtin(),
            assistant,
            ServerConfig::default(),
        ));

        let response = app.clone().oneshot(get("/health/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let (status, body) = send(app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["model"], "missing_api_key");
        assert_eq!(body["provider"], "gemini");
    }

    #[tokio::test]
    async fn test_index_page() {
        let app = create_test_app(Arc::new(ScriptedModel::text("ok")));
        let response = app.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("/api/v1/concierge"));
    }

    #[tokio::test]
    async fn test_list_destinations() {
        let app = create_test_app(Arc::new(ScriptedModel::text("ok")));
        let (status, body) = send(app, get("/api/v1/destinations")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_filter_destinations_by_category() {
        let app = create_test_app(Arc::new(ScriptedModel::text("ok")));
        let (status, body) = send(app, get("/api/v1/destinations?category=mountain")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["name"], "Alps Refuge Resort");
        assert_eq!(body[0]["category"], "Mountain");
    }

    #[tokio::test]
    async fn test_unknown_category_rejected() {
        let app = create_test_app(Arc::new(ScriptedModel::text("ok")));
        let (status, body) = send(app, get("/api/v1/destinations?category=castle")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_destination_not_found() {
        let app = create_test_app(Arc::new(ScriptedModel::text("ok")));
        let (status, body) = send(app, get("/api/v1/destinations/42")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_events_and_attractions() {
        let app = create_test_app(Arc::new(ScriptedModel::text("ok")));
        let (status, events) = send(app.clone(), get("/api/v1/events")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(events[2]["display_date"], "October 12, 2025");

        let (_, attractions) = send(app, get("/api/v1/attractions")).await;
        assert_eq!(attractions.as_array().unwrap().len(), 3);
        assert!(attractions[0]["maps_url"]
            .as_str()
            .unwrap()
            .starts_with("https://www.google.com/maps/search/"));
    }

    #[tokio::test]
    async fn test_gallery_suggestions() {
        let app = create_test_app(Arc::new(ScriptedModel::text("ok")));
        let (_, body) = send(app, get("/api/v1/gallery/suggestions")).await;
        assert_eq!(body["aspect_ratios"], json!(["1:1", "16:9", "4:3"]));
    }

    #[tokio::test]
    async fn test_concierge_reply() {
        let model = Arc::new(ScriptedModel::text("Trieste is enchanting in autumn."));
        let app = create_test_app(model.clone());

        let (status, body) = send(
            app,
            post_json(
                "/api/v1/concierge",
                json!({"message": "When to visit Trieste?", "history": []}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["role"], "model");
        assert_eq!(body["content"], "Trieste is enchanting in autumn.");
        assert_eq!(body["fallback"], false);
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn test_concierge_empty_message() {
        let model = Arc::new(ScriptedModel::text("unused"));
        let app = create_test_app(model.clone());

        let (status, body) =
            send(app, post_json("/api/v1/concierge", json!({"message": "   "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_concierge_failure_apologizes() {
        let app = create_test_app(Arc::new(ScriptedModel::failing()));
        let (status, body) =
            send(app, post_json("/api/v1/concierge", json!({"message": "Hello"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fallback"], true);
        assert_eq!(body["content"], Widget::Concierge.apology().unwrap());
    }

    #[tokio::test]
    async fn test_guide_modes() {
        let model = Arc::new(ScriptedModel::text("Certainly."));
        let app = create_test_app(model.clone());

        send(
            app.clone(),
            post_json("/api/v1/guide", json!({"message": "Venice?", "mode": "fast"})),
        )
        .await;
        send(
            app,
            post_json(
                "/api/v1/guide",
                json!({"message": "Plan ten days", "deep_thinking": true}),
            ),
        )
        .await;

        let requests = model.requests();
        assert_eq!(requests[0].model, ModelSet::default().fast);
        assert_eq!(requests[1].model, ModelSet::default().guide);
        assert!(requests[1].generation_config.is_some());
    }

    #[tokio::test]
    async fn test_guide_failure_apologizes() {
        let app = create_test_app(Arc::new(ScriptedModel::failing()));
        let (status, body) =
            send(app, post_json("/api/v1/guide", json!({"message": "Hello"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"], Widget::EliteGuide.apology().unwrap());
    }

    #[tokio::test]
    async fn test_discovery_unknown_attraction() {
        let app = create_test_app(Arc::new(ScriptedModel::text("ok")));
        let (status, _) = send(
            app,
            post_json("/api/v1/discovery", json!({"attraction": "Colosseum"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_discovery_with_location() {
        let model = Arc::new(ScriptedModel::text("Open 9:00 to 19:00."));
        let app = create_test_app(model.clone());
        let (status, _) = send(
            app,
            post_json(
                "/api/v1/discovery",
                json!({
                    "attraction": "Basilica of Aquileia",
                    "location": {"latitude": 45.77, "longitude": 13.37}
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(model.requests()[0].model, ModelSet::default().maps);
    }

    #[tokio::test]
    async fn test_recipe_and_fallback() {
        let app = create_test_app(Arc::new(ScriptedModel::text("## Cjarsons\n\nFold gently.")));
        let (status, body) =
            send(app, post_json("/api/v1/recipes", json!({"dish": "Cjarsons"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["html"].as_str().unwrap().contains("<h2>Cjarsons</h2>"));

        let app = create_test_app(Arc::new(ScriptedModel::failing()));
        let (status, body) =
            send(app, post_json("/api/v1/recipes", json!({"dish": "Gubana"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fallback"], true);
        assert_eq!(body["markdown"], Widget::Chef.apology().unwrap());
    }

    #[tokio::test]
    async fn test_gallery_generation() {
        let model = Arc::new(ScriptedModel::answering(json!({
            "candidates": [{"content": {"parts": [
                {"inlineData": {"mimeType": "image/png", "data": "AAAA"}}
            ]}}]
        })));
        let app = create_test_app(model);
        let (status, body) = send(
            app,
            post_json(
                "/api/v1/gallery",
                json!({"prompt": "Grado lagoon", "aspect_ratio": "16:9"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["url"], "data:image/png;base64,AAAA");
        assert_eq!(body["aspect_ratio"], "16:9");
    }

    #[tokio::test]
    async fn test_gallery_failure_is_bad_gateway() {
        let app = create_test_app(Arc::new(ScriptedModel::failing()));
        let (status, body) =
            send(app, post_json("/api/v1/gallery", json!({"prompt": "a villa"}))).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let model = Arc::new(ScriptedModel::text("unused"));
        let config = ServerConfig {
            max_body_bytes: 64,
            ..Default::default()
        };
        let assistant = Assistant::new(model.clone(), ModelSet::default());
        let app = build_router(AppState::new(Catalog::builtin(), assistant, config));

        let response = app
            .oneshot(post_json(
                "/api/v1/concierge",
                json!({"message": "x".repeat(200)}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let model = Arc::new(ScriptedModel::text("ok"));
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/concierge")
            .header("Content-Type", "application/json")
            .body(Body::from("not json"))
            .unwrap();

        let (status, body) = send(create_test_app(model.clone()), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["request_id"].as_str().is_some_and(|id| !id.is_empty()));
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_fields_are_validation_errors() {
        let model = Arc::new(ScriptedModel::text("ok"));
        for uri in [
            "/api/v1/concierge",
            "/api/v1/guide",
            "/api/v1/discovery",
            "/api/v1/recipes",
            "/api/v1/gallery",
        ] {
            let (status, body) =
                send(create_test_app(model.clone()), post_json(uri, json!({}))).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR", "{}", uri);
            assert!(body["request_id"].is_string(), "{}", uri);
        }
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_wrong_field_type_is_validation_error() {
        let model = Arc::new(ScriptedModel::text("ok"));
        let (status, body) = send(
            create_test_app(model),
            post_json("/api/v1/recipes", json!({"dish": 42})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
