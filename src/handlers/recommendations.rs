use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::info;

use super::{is_htmx, page, require_sign_in};
use crate::AppState;
use crate::domain::{RecommendationFilter, View};
use crate::session::Session;
use crate::ui::views::recommendations;

/// Query (GET) or hidden form fields (POST) describing the active filter.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    category: Option<String>,
    #[serde(default)]
    saved: bool,
}

impl FilterParams {
    fn filter(&self) -> RecommendationFilter {
        RecommendationFilter::parse(self.category.as_deref(), self.saved)
    }
}

/// GET /recommendations?category=...&saved=true
pub async fn recommendations_page(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(params): Query<FilterParams>,
) -> Response {
    if let Err(redirect) = require_sign_in(&session, View::Recommendations) {
        return redirect.into_response();
    }
    let content = recommendations::render(&session.recommendations(), &params.filter());
    page(&state, &session, View::Recommendations, &content).into_response()
}

/// POST /recommendations/{id}/toggle - Flip the saved flag.
pub async fn recommendations_toggle(
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Form(params): Form<FilterParams>,
) -> Response {
    if let Err(redirect) = require_sign_in(&session, View::Recommendations) {
        return redirect.into_response();
    }
    let Some(saved) = session.toggle_saved(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    info!(session_id = %session.id(), recommendation_id = %id, saved, "Recommendation toggled");

    let filter = params.filter();
    if !is_htmx(&headers) {
        let target = format!("{}{}", View::Recommendations.path(), filter.query_with_category(filter.category));
        return Redirect::to(&target).into_response();
    }

    // Unsaved cards drop out of the favorites view.
    let card = session
        .recommendations()
        .into_iter()
        .find(|rec| rec.id == id)
        .filter(|rec| filter.matches(rec))
        .map(|rec| recommendations::card(&rec, &filter))
        .unwrap_or_default();
    Html(card).into_response()
}
