use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::IntoResponse,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;

use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use tracing::{info, warn};

use crate::AppState;
use crate::analysis;
use crate::config::{AppConfig, ServerConfig};
use crate::handlers::{api, camera, chat, history, pages, recommendations};
use crate::session::{session_middleware, spawn_cleanup};

/// CORS for the JSON API, so browser clients on other origins can call it.
///
/// `*` (or an empty list) allows any origin. Unparseable origins are skipped.
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let base = CorsLayer::new().allow_headers(Any).allow_methods(Any);
    if config.cors_allowed_origins.iter().any(|o| o.trim() == "*") {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    if origins.is_empty() {
        base.allow_origin(Any)
    } else {
        base.allow_origin(origins)
    }
}

/// Build the application router around `state`.
pub fn build_router(state: AppState) -> Router {
    let timeout_duration = Duration::from_secs(state.config.server.request_timeout_secs);
    let body_limit = state.config.server.body_limit_bytes;
    let static_dir = state.config.server.static_dir.clone();

    let pages = Router::new()
        .route("/", get(pages::home))
        .route("/result", get(pages::result))
        .route("/login", get(pages::login_page).post(pages::login_submit))
        .route("/logout", post(pages::logout))
        .route("/camera", get(camera::camera_page))
        .route("/camera/analyze", post(camera::camera_analyze))
        .route("/chat", get(chat::chat_page).post(chat::chat_send))
        .route("/chat/analyze", post(chat::chat_analyze))
        .route("/history", get(history::history_page))
        .route("/history/{id}/delete", post(history::history_delete))
        .route(
            "/recommendations",
            get(recommendations::recommendations_page),
        )
        .route(
            "/recommendations/{id}/toggle",
            post(recommendations::recommendations_toggle),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    // The JSON API is stateless per request and needs no visitor cookie.
    let api = Router::new()
        .route("/predict/image", post(api::predict_image))
        .route("/api/chat/message", post(api::chat_message))
        .layer(cors_layer(&state.config.server));

    Router::new()
        .merge(pages)
        .merge(api)
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum::middleware::from_fn(
            move |req: Request, next: Next| {
                let duration = timeout_duration;
                async move {
                    match tokio::time::timeout(duration, next.run(req)).await {
                        Ok(res) => res,
                        Err(_) => {
                            (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response()
                        }
                    }
                }
            },
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let analyzer = analysis::from_config(&config.analysis)?;
    info!(
        name: "analysis.config.loaded",
        analyzer = analyzer.name(),
        mode = config.analysis.mode.as_str(),
        "Stress analyzer configured"
    );

    let state = AppState::new(Arc::clone(&config), analyzer);

    let _cleanup = spawn_cleanup(
        state.sessions.clone(),
        Duration::from_secs(config.session.cleanup_interval_secs.max(1)),
        Duration::from_secs(config.session.idle_timeout_secs),
    );

    let app = build_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
