//! HTTP handlers.
//!
//! HTML handlers read the visitor's [`Session`] from request extensions
//! (put there by [`crate::session::session_middleware`]) and return full
//! pages, htmx fragments or `303 See Other` redirects.

pub mod api;
pub mod camera;
pub mod chat;
pub mod history;
pub mod pages;
pub mod recommendations;

use axum::http::HeaderMap;
use axum::response::{Html, Redirect};

use crate::AppState;
use crate::domain::View;
use crate::session::Session;
use crate::ui::{Chrome, render_page};

/// Whether the request was issued by htmx.
pub(crate) fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("hx-request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Render `content` inside the shell, consuming any pending toast.
pub(crate) fn page(state: &AppState, session: &Session, view: View, content: &str) -> Html<String> {
    let account = session.account();
    let toast = session.take_toast();
    let chrome = Chrome {
        view,
        account: account.as_ref(),
        toast: toast.as_ref(),
        htmx_src: &state.config.ui.htmx_src,
    };
    Html(render_page(&chrome, content))
}

/// Redirect anonymous visitors away from views that need an account.
pub(crate) fn require_sign_in(session: &Session, view: View) -> Result<(), Redirect> {
    if view.requires_sign_in() && !session.is_signed_in() {
        return Err(Redirect::to(View::Login.path()));
    }
    Ok(())
}
