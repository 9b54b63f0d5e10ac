//! Home, result, login and logout.

use std::time::Duration;

use axum::{
    Extension, Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Local;
use serde::Deserialize;
use tracing::info;

use super::page;
use crate::AppState;
use crate::domain::View;
use crate::session::{Account, Session, Toast};
use crate::ui::views::{self, login};

/// GET / - Landing page.
pub async fn home(State(state): State<AppState>, Extension(session): Extension<Session>) -> Response {
    let account = session.account();
    let recent = session.recent_history(3);
    let content = views::home::render(account.as_ref(), &recent, Local::now());
    page(&state, &session, View::Home, &content).into_response()
}

/// GET /result - Last analysis, or back home if there is none.
pub async fn result(State(state): State<AppState>, Extension(session): Extension<Session>) -> Response {
    match session.last_result() {
        Some(last) => page(&state, &session, View::Result, &views::result::render(&last)).into_response(),
        None => Redirect::to(View::Home.path()).into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    mode: Option<String>,
}

/// GET /login
pub async fn login_page(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<LoginQuery>,
) -> Response {
    let form = login::LoginForm {
        mode: login::LoginMode::parse(query.mode.as_deref()),
        ..Default::default()
    };
    page(&state, &session, View::Login, &login::render(&form)).into_response()
}

#[derive(Debug, Deserialize)]
pub struct LoginSubmission {
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    name: Option<String>,
}

/// POST /login - Mock sign-in. Any non-empty email and password are accepted.
pub async fn login_submit(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Form(form): Form<LoginSubmission>,
) -> Response {
    let mode = login::LoginMode::parse(form.mode.as_deref());
    let email = form.email.trim();

    if email.is_empty() || form.password.is_empty() {
        let view = login::render(&login::LoginForm {
            mode,
            email,
            name: form.name.as_deref().unwrap_or_default(),
            error: Some(login::MISSING_CREDENTIALS),
        });
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            page(&state, &session, View::Login, &view),
        )
            .into_response();
    }

    let delay = Duration::from_millis(state.config.session.sign_in_delay_ms);
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let name = match mode {
        login::LoginMode::SignUp => form
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
        login::LoginMode::SignIn => None,
    };
    session.sign_in(Account {
        email: email.to_string(),
        name,
    });
    session.set_toast(Toast::new(
        "¡Bienvenido!",
        "Has iniciado sesión correctamente.",
    ));
    info!(session_id = %session.id(), mode = mode.as_str(), "Visitor signed in");

    Redirect::to(View::Home.path()).into_response()
}

/// POST /logout
pub async fn logout(Extension(session): Extension<Session>) -> Redirect {
    if session.sign_out() {
        session.set_toast(Toast::new(
            "Sesión cerrada",
            "Has cerrado sesión correctamente.",
        ));
        info!(session_id = %session.id(), "Visitor signed out");
    }
    Redirect::to(View::Home.path())
}
