//! JSON API mirroring the prediction and chatbot backends.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::AppState;
use crate::analysis::{CapturedImage, PredictionBody};
use crate::domain::chat::clean_input;
use crate::error::AppError;

fn default_session_id() -> String {
    "default_user".to_string()
}

/// Request body for image prediction.
#[derive(Debug, Deserialize)]
pub struct ImageRequest {
    /// Data URL or bare base64.
    pub image: String,
}

/// POST /predict/image
pub async fn predict_image(
    State(state): State<AppState>,
    payload: Result<Json<ImageRequest>, JsonRejection>,
) -> Result<Json<PredictionBody>, AppError> {
    let Json(req) = payload?;
    let image = CapturedImage::parse(&req.image)?;
    let result = state.analyzer.analyze_image(&image).await?;
    info!(
        name: "analysis.completed",
        kind = result.kind.as_str(),
        analyzer = state.analyzer.name(),
        score = result.score.value(),
        bytes = image.bytes().len(),
        "API image prediction completed"
    );
    Ok(Json(PredictionBody {
        stress_score: f64::from(result.score.value()),
        nivel: Some(result.band().label().to_string()),
    }))
}

/// Request body for the chatbot.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default = "default_session_id")]
    pub session_id: String,
}

/// Chatbot answer.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /api/chat/message
pub async fn chat_message(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(req) = payload?;
    let Some(text) = clean_input(&req.message) else {
        return Err(AppError::Validation("El mensaje no puede estar vacío".to_string()));
    };
    let reply = state.responder.reply().await;
    info!(
        name: "chat.reply",
        session_id = %req.session_id,
        chars = text.chars().count(),
        "API chat reply"
    );
    Ok(Json(ChatResponse {
        response: reply.to_string(),
    }))
}
