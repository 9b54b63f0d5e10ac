use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Local;
use serde::Deserialize;
use tracing::info;

use super::{is_htmx, page, require_sign_in};
use crate::AppState;
use crate::domain::{HistoryFilter, View};
use crate::session::Session;
use crate::ui::views::history;

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    filter: Option<String>,
}

/// GET /history?filter=all|photo|chat
pub async fn history_page(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<HistoryQuery>,
) -> Response {
    if let Err(redirect) = require_sign_in(&session, View::History) {
        return redirect.into_response();
    }
    let filter = HistoryFilter::parse(query.filter.as_deref());
    let content = history::render(&session.history(), filter, Local::now());
    page(&state, &session, View::History, &content).into_response()
}

/// POST /history/{id}/delete
pub async fn history_delete(
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<HistoryQuery>,
) -> Response {
    if let Err(redirect) = require_sign_in(&session, View::History) {
        return redirect.into_response();
    }
    let removed = session.delete_history(&id);
    info!(session_id = %session.id(), history_id = %id, removed, "History entry deleted");

    let filter = HistoryFilter::parse(form.filter.as_deref());
    if is_htmx(&headers) {
        // Deleting the last visible row swaps in the empty state.
        let fragment = if filter.apply(&session.history()).is_empty() {
            history::empty_state()
        } else {
            String::new()
        };
        return Html(fragment).into_response();
    }
    Redirect::to(&format!("/history?filter={}", filter.as_str())).into_response()
}
