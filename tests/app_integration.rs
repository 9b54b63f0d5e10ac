//! End-to-end tests driving the router in-process.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{
        Request, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD, CONTENT_TYPE, COOKIE,
            LOCATION, ORIGIN, SET_COOKIE,
        },
    },
    response::Response,
    routing::post,
};
use serde_json::{Value, json};
use tower::ServiceExt;

use stressbot::AppState;
use stressbot::analysis;
use stressbot::config::{AnalysisMode, AppConfig};
use stressbot::domain::chat::CANNED_REPLIES;
use stressbot::domain::AnalysisKind;
use stressbot::server::build_router;
use stressbot::session::Session;
use stressbot::ui::views::camera::ANALYSIS_FAILED;

const FORM: &str = "application/x-www-form-urlencoded";

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.analysis.simulated_delay_ms = 0;
    config.chat.reply_delay_ms = 0;
    config.chat.reply_jitter_ms = 0;
    config.session.sign_in_delay_ms = 0;
    config
}

struct TestApp {
    router: Router,
    state: AppState,
}

impl TestApp {
    fn new() -> Self {
        Self::with_config(test_config())
    }

    fn with_config(config: AppConfig) -> Self {
        let config = Arc::new(config);
        let analyzer = analysis::from_config(&config.analysis).expect("analyzer from config");
        let state = AppState::new(config, analyzer);
        Self {
            router: build_router(state.clone()),
            state,
        }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    /// Open a visitor session and return its cookie header value.
    async fn visit(&self) -> String {
        let response = self.send(get("/", None)).await;
        session_cookie(&response).expect("first visit sets a cookie")
    }

    fn session(&self, cookie: &str) -> Session {
        let id = cookie.split_once('=').map(|(_, v)| v).unwrap_or_default();
        self.state.sessions.get(id).expect("session exists")
    }

    async fn sign_in(&self, cookie: &str) {
        let response = self
            .send(post_form(
                "/login",
                Some(cookie),
                "email=ana%40example.com&password=secret",
                false,
            ))
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, cookie: Option<&str>, body: &str, htmx: bool) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, FORM);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    if htmx {
        builder = builder.header("HX-Request", "true");
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Serve a `/predict/image` that always fails, and return its base URL.
async fn spawn_failing_backend() -> String {
    let app = Router::new().route(
        "/predict/image",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Traceback: /srv/model/stress_model_final.h5 not found",
            )
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{addr}")
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn session_cookie(response: &Response) -> Option<String> {
    let header = response.headers().get(SET_COOKIE)?.to_str().ok()?;
    header.split(';').next().map(str::to_string)
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

async fn text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_first_visit_issues_session_cookie() {
    let app = TestApp::new();

    let response = app.send(get("/", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let header = response.headers()[SET_COOKIE].to_str().unwrap().to_string();
    assert!(header.starts_with("stressbot_session="));
    assert!(header.contains("HttpOnly"));
    assert!(header.contains("SameSite=Lax"));
    assert!(header.contains("Path=/"));

    let cookie = session_cookie(&response).unwrap();
    assert!(text(response).await.contains("Bienvenido a StressBot"));

    let again = app.send(get("/", Some(&cookie))).await;
    assert!(again.headers().get(SET_COOKIE).is_none());
    assert_eq!(app.state.sessions.len(), 1);
}

#[tokio::test]
async fn test_unknown_cookie_gets_a_fresh_session() {
    let app = TestApp::new();
    let response = app
        .send(get("/", Some("stressbot_session=made-up")))
        .await;
    let cookie = session_cookie(&response).unwrap();
    assert_ne!(cookie, "stressbot_session=made-up");
}

#[tokio::test]
async fn test_chat_round_trip_with_htmx() {
    let app = TestApp::new();
    let cookie = app.visit().await;

    let response = app
        .send(post_form("/chat", Some(&cookie), "message=++Hola%21++", true))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let fragment = text(response).await;
    assert_eq!(fragment.matches("bubble-row").count(), 2);
    assert!(fragment.contains("<p>Hola!</p>"));
    assert!(CANNED_REPLIES.iter().any(|reply| fragment.contains(reply)));

    let transcript = app.session(&cookie).chat();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[1].content, "Hola!");

    let page = text(app.send(get("/chat", Some(&cookie))).await).await;
    assert!(page.contains("Hola!"));
}

#[tokio::test]
async fn test_plain_chat_post_redirects_and_blank_is_ignored() {
    let app = TestApp::new();
    let cookie = app.visit().await;

    let response = app
        .send(post_form("/chat", Some(&cookie), "message=Estoy+cansado", false))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/chat");

    let blank = app
        .send(post_form("/chat", Some(&cookie), "message=+++", true))
        .await;
    assert_eq!(blank.status(), StatusCode::OK);
    assert!(text(blank).await.is_empty());
    assert_eq!(app.session(&cookie).chat().len(), 3);
}

#[tokio::test]
async fn test_camera_capture_shows_result() {
    let app = TestApp::new();
    let cookie = app.visit().await;

    let body =
        serde_urlencoded::to_string([("image", "data:image/jpeg;base64,/9j/4AAQSkZJRg==")])
            .unwrap();
    let response = app
        .send(post_form("/camera/analyze", Some(&cookie), &body, false))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/result");

    let session = app.session(&cookie);
    let result = session.last_result().expect("result stored");
    assert_eq!(result.kind, AnalysisKind::Photo);
    assert!((20..80).contains(&result.score.value()));
    assert_eq!(session.history().len(), 6);
    assert_eq!(session.history()[0].note, "Análisis facial completado");

    let page = text(app.send(get("/result", Some(&cookie))).await).await;
    assert!(page.contains("Nivel de estrés:"));
    assert!(page.contains(r#"href="/camera""#));
    assert!(!page.contains("bottom-nav"));
}

#[tokio::test]
async fn test_invalid_capture_rerenders_camera() {
    let app = TestApp::new();
    let cookie = app.visit().await;

    let response = app
        .send(post_form("/camera/analyze", Some(&cookie), "image=%25%25%25", false))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(text(response)
        .await
        .contains("No se pudo analizar la imagen. Inténtalo de nuevo."));
    assert!(app.session(&cookie).last_result().is_none());
}

#[tokio::test]
async fn test_result_without_analysis_redirects_home() {
    let app = TestApp::new();
    let cookie = app.visit().await;
    let response = app.send(get("/result", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_private_views_require_sign_in() {
    let app = TestApp::new();
    let cookie = app.visit().await;

    for uri in ["/history", "/recommendations"] {
        let response = app.send(get(uri, Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/login");
    }

    app.sign_in(&cookie).await;

    for uri in ["/history", "/recommendations"] {
        let response = app.send(get(uri, Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn test_login_validation_and_toasts() {
    let app = TestApp::new();
    let cookie = app.visit().await;

    let missing = app
        .send(post_form("/login", Some(&cookie), "email=ana%40example.com&password=", false))
        .await;
    assert_eq!(missing.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = text(missing).await;
    assert!(body.contains("Introduce tu email y contraseña."));
    assert!(body.contains("ana@example.com"));
    assert!(!app.session(&cookie).is_signed_in());

    app.sign_in(&cookie).await;
    let home = text(app.send(get("/", Some(&cookie))).await).await;
    assert!(home.contains("¡Bienvenido!"));
    assert!(home.contains("¡Hola de nuevo!"));
    assert!(home.contains("Análisis recientes"));

    // Toasts show once.
    let again = text(app.send(get("/", Some(&cookie))).await).await;
    assert!(!again.contains("¡Bienvenido!"));

    let logout = app.send(post_form("/logout", Some(&cookie), "", false)).await;
    assert_eq!(logout.status(), StatusCode::SEE_OTHER);
    let home = text(app.send(get("/", Some(&cookie))).await).await;
    assert!(home.contains("Sesión cerrada"));
    assert!(home.contains("Bienvenido a StressBot"));
}

#[tokio::test]
async fn test_sign_up_keeps_name() {
    let app = TestApp::new();
    let cookie = app.visit().await;

    let page = text(app.send(get("/login?mode=signup", Some(&cookie))).await).await;
    assert!(page.contains("Crear cuenta"));

    let response = app
        .send(post_form(
            "/login",
            Some(&cookie),
            "mode=signup&name=Ana&email=ana%40example.com&password=secret",
            false,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let account = app.session(&cookie).account().unwrap();
    assert_eq!(account.display_name(), "Ana");
}

#[tokio::test]
async fn test_history_filter_and_delete() {
    let app = TestApp::new();
    let cookie = app.visit().await;
    app.sign_in(&cookie).await;

    let chats = text(app.send(get("/history?filter=chat", Some(&cookie))).await).await;
    assert_eq!(chats.matches(r#"class="history-item""#).count(), 2);

    let id = app.session(&cookie).history()[0].id.clone();
    let response = app
        .send(post_form(
            &format!("/history/{id}/delete"),
            Some(&cookie),
            "filter=all",
            true,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(text(response).await.is_empty());
    assert_eq!(app.session(&cookie).history().len(), 4);

    let id = app.session(&cookie).history()[0].id.clone();
    let response = app
        .send(post_form(
            &format!("/history/{id}/delete"),
            Some(&cookie),
            "filter=photo",
            false,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/history?filter=photo");
}

#[tokio::test]
async fn test_recommendation_toggle() {
    let app = TestApp::new();
    let cookie = app.visit().await;
    app.sign_in(&cookie).await;

    let response = app
        .send(post_form(
            "/recommendations/3/toggle",
            Some(&cookie),
            "category=activity&saved=false",
            false,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/recommendations?category=activity");
    assert!(app.session(&cookie).recommendations()[2].saved);

    // Unsaving from the favorites view removes the card.
    let response = app
        .send(post_form(
            "/recommendations/3/toggle",
            Some(&cookie),
            "category=all&saved=true",
            true,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(text(response).await.is_empty());

    let missing = app
        .send(post_form("/recommendations/99/toggle", Some(&cookie), "", true))
        .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let favorites =
        text(app.send(get("/recommendations?saved=true", Some(&cookie))).await).await;
    assert_eq!(favorites.matches(r#"class="rec-card""#).count(), 3);
}

#[tokio::test]
async fn test_chat_analysis() {
    let app = TestApp::new();
    let cookie = app.visit().await;

    let early = app.send(post_form("/chat/analyze", Some(&cookie), "", false)).await;
    assert_eq!(early.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&early), "/chat");
    let page = text(app.send(get("/chat", Some(&cookie))).await).await;
    assert!(page.contains("Cuéntame algo primero"));

    app.send(post_form(
        "/chat",
        Some(&cookie),
        "message=Mucho+trabajo+esta+semana",
        false,
    ))
    .await;
    let response = app.send(post_form("/chat/analyze", Some(&cookie), "", false)).await;
    assert_eq!(location(&response), "/result");

    let session = app.session(&cookie);
    let entry = &session.history()[0];
    assert_eq!(entry.kind, AnalysisKind::Chat);
    assert_eq!(entry.note, "Mucho trabajo esta semana");

    let page = text(app.send(get("/result", Some(&cookie))).await).await;
    assert!(page.contains(r#"href="/chat""#));
}

#[tokio::test]
async fn test_predict_image_api() {
    let app = TestApp::new();

    let response = app
        .send(post_json(
            "/predict/image",
            &json!({"image": "data:image/png;base64,iVBORw0KGgo="}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(SET_COOKIE).is_none());
    let body: Value = serde_json::from_str(&text(response).await).unwrap();
    let score = body["stress_score"].as_f64().unwrap();
    assert!((20.0..80.0).contains(&score));
    assert!(["Bajo", "Moderado", "Alto"].contains(&body["nivel"].as_str().unwrap()));

    let bad = app
        .send(post_json("/predict/image", &json!({"image": "not base64!"})))
        .await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&text(bad).await).unwrap();
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_chat_message_api() {
    let app = TestApp::new();

    let response = app
        .send(post_json("/api/chat/message", &json!({"message": "Hola"})))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&text(response).await).unwrap();
    assert!(CANNED_REPLIES.contains(&body["response"].as_str().unwrap()));

    let blank = app
        .send(post_json(
            "/api/chat/message",
            &json!({"message": "  ", "session_id": "abc"}),
        ))
        .await;
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_api_bodies_get_error_envelope() {
    let app = TestApp::new();

    let cases = [
        ("/predict/image", r#"{"img": "x"}"#),
        ("/predict/image", "not json"),
        ("/api/chat/message", "{}"),
    ];
    for (uri, body) in cases {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        let response = app.send(request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri} {body}");
        let envelope: Value = serde_json::from_str(&text(response).await).unwrap();
        assert_eq!(envelope["status"], "error");
        assert!(envelope["message"].as_str().is_some_and(|m| !m.is_empty()));
    }
}

#[tokio::test]
async fn test_backend_failure_surfaces_as_bad_gateway() {
    let mut config = test_config();
    config.analysis.mode = AnalysisMode::Remote;
    config.analysis.backend_url = spawn_failing_backend().await;
    config.analysis.request_timeout_secs = 5;
    let app = TestApp::with_config(config);
    let cookie = app.visit().await;

    let body = serde_urlencoded::to_string([("image", "data:image/png;base64,iVBORw0KGgo=")])
        .unwrap();
    let response = app
        .send(post_form("/camera/analyze", Some(&cookie), &body, false))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let page = text(response).await;
    assert!(page.contains(ANALYSIS_FAILED));
    assert!(!page.contains("Traceback"));
    assert!(app.session(&cookie).last_result().is_none());

    let response = app
        .send(post_json(
            "/predict/image",
            &json!({"image": "data:image/png;base64,iVBORw0KGgo="}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let envelope: Value = serde_json::from_str(&text(response).await).unwrap();
    assert_eq!(envelope["status"], "error");
    assert!(!envelope["message"].as_str().unwrap().contains("Traceback"));
}

#[tokio::test(start_paused = true)]
async fn test_slow_analysis_times_out() {
    let mut config = test_config();
    config.server.request_timeout_secs = 1;
    config.analysis.simulated_delay_ms = 5_000;
    let app = TestApp::with_config(config);

    let response = app
        .send(post_json(
            "/predict/image",
            &json!({"image": "data:image/png;base64,iVBORw0KGgo="}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let mut config = test_config();
    config.server.body_limit_bytes = 1024;
    let app = TestApp::with_config(config);

    let response = app
        .send(post_json(
            "/api/chat/message",
            &json!({"message": "a".repeat(4096)}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let envelope: Value = serde_json::from_str(&text(response).await).unwrap();
    assert_eq!(envelope["status"], "error");
}

fn preflight(uri: &str, origin: &str) -> Request<Body> {
    Request::builder()
        .method("OPTIONS")
        .uri(uri)
        .header(ORIGIN, origin)
        .header(ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_api_allows_cross_origin_calls() {
    let app = TestApp::new();
    let response = app
        .send(preflight("/predict/image", "http://localhost:5173"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let mut config = test_config();
    config.server.cors_allowed_origins = vec!["http://app.example".to_string()];
    let app = TestApp::with_config(config);

    let allowed = app
        .send(preflight("/api/chat/message", "http://app.example"))
        .await;
    assert_eq!(
        allowed.headers()[ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://app.example"
    );

    let other = app
        .send(preflight("/api/chat/message", "http://evil.example"))
        .await;
    assert!(other.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn test_deleting_last_visible_row_shows_empty_state() {
    let app = TestApp::new();
    let cookie = app.visit().await;
    app.sign_in(&cookie).await;

    let chats: Vec<String> = app
        .session(&cookie)
        .history()
        .into_iter()
        .filter(|item| item.kind == AnalysisKind::Chat)
        .map(|item| item.id)
        .collect();
    assert_eq!(chats.len(), 2);

    let first = app
        .send(post_form(
            &format!("/history/{}/delete", chats[0]),
            Some(&cookie),
            "filter=chat",
            true,
        ))
        .await;
    assert!(text(first).await.is_empty());

    let last = app
        .send(post_form(
            &format!("/history/{}/delete", chats[1]),
            Some(&cookie),
            "filter=chat",
            true,
        ))
        .await;
    assert_eq!(last.status(), StatusCode::OK);
    assert!(text(last).await.contains("No hay registros aún"));
}
