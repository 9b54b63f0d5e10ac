use axum::{
    Extension, Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{info, warn};

use super::page;
use crate::AppState;
use crate::analysis::CapturedImage;
use crate::domain::View;
use crate::domain::history::PHOTO_PREVIEW;
use crate::session::Session;
use crate::ui::views::camera;

/// GET /camera
pub async fn camera_page(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Response {
    page(&state, &session, View::Camera, &camera::render(None)).into_response()
}

#[derive(Debug, Deserialize)]
pub struct CaptureForm {
    #[serde(default)]
    image: String,
}

/// POST /camera/analyze - Analyze a captured frame and show the result.
pub async fn camera_analyze(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Form(form): Form<CaptureForm>,
) -> Response {
    let outcome = match CapturedImage::parse(&form.image) {
        Ok(image) => state.analyzer.analyze_image(&image).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(result) => {
            info!(
                name: "analysis.completed",
                session_id = %session.id(),
                kind = result.kind.as_str(),
                analyzer = state.analyzer.name(),
                score = result.score.value(),
                "Photo analysis completed"
            );
            session.record_result(result, PHOTO_PREVIEW);
            Redirect::to(View::Result.path()).into_response()
        }
        Err(e) => {
            warn!(
                session_id = %session.id(),
                analyzer = state.analyzer.name(),
                error = %e,
                "Photo analysis failed"
            );
            let status = if e.is_client_error() {
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                StatusCode::BAD_GATEWAY
            };
            let content = camera::render(Some(camera::ANALYSIS_FAILED));
            (status, page(&state, &session, View::Camera, &content)).into_response()
        }
    }
}
