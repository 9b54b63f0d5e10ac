use std::time::Duration;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tokio::task::JoinHandle;
use tracing::info;

use super::SessionStore;
use crate::AppState;

/// Attach the visitor's [`Session`](super::Session) to the request.
///
/// A missing or unknown cookie gets a new session and a `Set-Cookie`.
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let cookie_name = state.config.session.cookie_name.clone();
    let (session, created) = state
        .sessions
        .resolve(jar.get(&cookie_name).map(Cookie::value));

    if created {
        info!(name: "session.created", session_id = %session.id(), "Visitor session created");
    }

    request.extensions_mut().insert(session.clone());
    let response = next.run(request).await;

    if !created {
        return response;
    }

    let cookie = Cookie::build((cookie_name, session.id().to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (jar.add(cookie), response).into_response()
}

/// Periodically drop idle sessions.
pub fn spawn_cleanup(
    store: SessionStore,
    every: Duration,
    idle_timeout: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // First tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = store.cleanup_expired_with_timeout(idle_timeout);
            if removed > 0 {
                info!(
                    name: "session.cleanup",
                    removed,
                    remaining = store.len(),
                    "Expired sessions removed"
                );
            }
        }
    })
}
