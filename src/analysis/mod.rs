//! Stress estimation backends.
//!
//! The camera view hands a [`CapturedImage`] to a [`StressAnalyzer`]. Two
//! implementations exist:
//!
//! - [`SimulatedAnalyzer`]: waits, then returns a random score
//! - [`RemoteAnalyzer`]: posts the image to an external `/predict/image` endpoint
//!
//! Chat conversations are estimated locally by [`estimate_from_conversation`].

mod image;
mod remote;
mod simulated;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{AnalysisConfig, AnalysisMode};
use crate::domain::{AnalysisKind, AnalysisResult, ChatMessage, ChatRole};

pub use image::CapturedImage;
pub use remote::{PredictionBody, RemoteAnalyzer};
pub use simulated::{SimulatedAnalyzer, random_score};

/// Errors that can occur while estimating stress.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The submitted image could not be decoded.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// The backend could not be reached.
    #[error("Analysis backend unreachable: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("Analysis backend returned {status}: {body}")]
    BackendStatus { status: u16, body: String },

    /// The backend reported an error in its response body.
    #[error("Analysis backend rejected the image: {0}")]
    Rejected(String),

    /// The backend response had an unexpected shape.
    #[error("Unexpected analysis response: {0}")]
    Decode(String),

    /// A chat analysis was requested before the visitor said anything.
    #[error("The conversation has no user messages yet")]
    EmptyConversation,
}

impl AnalysisError {
    /// Whether the caller sent bad input, as opposed to a backend failure.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidImage(_) | Self::EmptyConversation)
    }
}

/// Estimates a stress level from a captured face image.
#[async_trait]
pub trait StressAnalyzer: Send + Sync + std::fmt::Debug {
    /// Analyze `image` and produce a photo result.
    async fn analyze_image(&self, image: &CapturedImage) -> Result<AnalysisResult, AnalysisError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Build the analyzer selected by configuration.
pub fn from_config(config: &AnalysisConfig) -> Result<Arc<dyn StressAnalyzer>, AnalysisError> {
    let analyzer: Arc<dyn StressAnalyzer> = match config.mode {
        AnalysisMode::Simulated => Arc::new(SimulatedAnalyzer::new(Duration::from_millis(
            config.simulated_delay_ms,
        ))),
        AnalysisMode::Remote => Arc::new(RemoteAnalyzer::new(
            &config.backend_url,
            Duration::from_secs(config.request_timeout_secs),
        )?),
    };
    Ok(analyzer)
}

/// Estimate stress from a chat transcript.
///
/// There is no inference behind this: the score is random, as in the photo
/// simulation. The transcript must contain at least one user message.
pub fn estimate_from_conversation(
    messages: &[ChatMessage],
) -> Result<AnalysisResult, AnalysisError> {
    if !messages.iter().any(|m| m.role == ChatRole::User) {
        return Err(AnalysisError::EmptyConversation);
    }

    let score = random_score();
    let message = format!(
        "Basado en nuestra conversación, tu nivel de estrés parece {}. Recuerda tomar pausas y cuidar tu respiración.",
        score.band().label().to_lowercase()
    );
    Ok(AnalysisResult::new(AnalysisKind::Chat, score, message))
}
