//! Wellness chat transcript and canned assistant.

use std::time::Duration;

use chrono::{DateTime, Local, Timelike};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// First assistant message of every conversation.
pub const WELCOME_MESSAGE: &str = "¡Hola! 👋 Soy tu asistente de bienestar. Cuéntame, ¿cómo te sientes hoy? Estoy aquí para ayudarte a evaluar y manejar tu estrés.";

/// Replies the assistant picks from.
pub const CANNED_REPLIES: [&str; 4] = [
    "Entiendo cómo te sientes. Es completamente normal experimentar esos sentimientos. ¿Podrías contarme más sobre qué situaciones específicas te generan más estrés?",
    "Gracias por compartir eso conmigo. Basándome en lo que me cuentas, parece que estás experimentando un nivel moderado de estrés. Te recomiendo tomar pausas cortas durante el día. ¿Te gustaría que te sugiera algunos ejercicios de relajación?",
    "Es importante reconocer nuestras emociones. Un ejercicio que puede ayudarte es la respiración profunda: inhala por 4 segundos, mantén por 4 segundos, y exhala por 6 segundos. ¿Lo intentamos juntos?",
    "Me alegra que estés buscando ayuda. Recuerda que cuidar de tu salud mental es tan importante como la física. ¿Hay algo específico que te gustaría trabajar hoy?",
];

/// Maximum characters of a conversation summary.
const SUMMARY_CHARS: usize = 48;

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// A single chat bubble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    pub sent_at: DateTime<Local>,
}

impl ChatMessage {
    fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            sent_at: Local::now(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }

    #[must_use]
    pub fn welcome() -> Self {
        Self {
            id: "welcome".to_string(),
            ..Self::assistant(WELCOME_MESSAGE)
        }
    }

    /// Time of day as `HH:MM`.
    #[must_use]
    pub fn time_label(&self) -> String {
        format!("{:02}:{:02}", self.sent_at.hour(), self.sent_at.minute())
    }
}

/// Normalise user input. Returns `None` for blank messages.
#[must_use]
pub fn clean_input(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Short history note for a conversation, from its first user message.
#[must_use]
pub fn summarize(messages: &[ChatMessage]) -> Option<String> {
    let first = messages.iter().find(|m| m.role == ChatRole::User)?;
    let mut summary: String = first.content.chars().take(SUMMARY_CHARS).collect();
    if first.content.chars().count() > SUMMARY_CHARS {
        summary.push('…');
    }
    Some(summary)
}

/// Picks canned replies after a simulated typing pause.
#[derive(Debug, Clone)]
pub struct CannedResponder {
    base_delay: Duration,
    jitter: Duration,
}

impl CannedResponder {
    #[must_use]
    pub fn new(base_delay: Duration, jitter: Duration) -> Self {
        Self { base_delay, jitter }
    }

    /// A responder that answers without pausing.
    #[must_use]
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// How long the assistant "types" before answering.
    #[must_use]
    pub fn typing_delay(&self) -> Duration {
        if self.jitter.is_zero() {
            return self.base_delay;
        }
        let jitter_ms = u64::try_from(self.jitter.as_millis()).unwrap_or(u64::MAX);
        self.base_delay + Duration::from_millis(rand::rng().random_range(0..jitter_ms))
    }

    /// Pick a reply at random.
    #[must_use]
    pub fn pick_reply(&self) -> &'static str {
        CANNED_REPLIES
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(CANNED_REPLIES[0])
    }

    /// Wait out the typing delay, then answer.
    pub async fn reply(&self) -> &'static str {
        let delay = self.typing_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.pick_reply()
    }
}
