//! Past analyses shown on the history and home views.

use chrono::{DateTime, Datelike, Duration, Local, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::stress::{AnalysisKind, AnalysisResult, StressScore};

/// Note attached to photo entries.
pub const PHOTO_PREVIEW: &str = "Análisis facial completado";

const MONTHS: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

/// One row of the history list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    pub kind: AnalysisKind,
    pub score: StressScore,
    pub recorded_at: DateTime<Local>,
    /// Conversation summary or photo preview text.
    pub note: String,
}

impl HistoryItem {
    #[must_use]
    pub fn new(
        kind: AnalysisKind,
        score: StressScore,
        recorded_at: DateTime<Local>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            score,
            recorded_at,
            note: note.into(),
        }
    }

    /// Build an entry for a freshly completed analysis.
    #[must_use]
    pub fn from_result(result: &AnalysisResult, note: impl Into<String>) -> Self {
        Self::new(result.kind, result.score, result.recorded_at, note)
    }

    /// Date label relative to `now`.
    #[must_use]
    pub fn date_label(&self, now: DateTime<Local>) -> String {
        relative_date_label(self.recorded_at, now)
    }
}

/// Format a timestamp as "Hoy, HH:MM", "Ayer, HH:MM" or "Mar 15, HH:MM".
#[must_use]
pub fn relative_date_label(when: DateTime<Local>, now: DateTime<Local>) -> String {
    let time = format!("{:02}:{:02}", when.hour(), when.minute());
    let day = when.date_naive();
    let today = now.date_naive();

    if day == today {
        format!("Hoy, {time}")
    } else if today.pred_opt() == Some(day) {
        format!("Ayer, {time}")
    } else {
        let month = MONTHS[when.month0() as usize];
        format!("{month} {}, {time}", when.day())
    }
}

/// History tab selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryFilter {
    #[default]
    All,
    Photo,
    Chat,
}

impl HistoryFilter {
    pub const ALL: [Self; 3] = [Self::All, Self::Photo, Self::Chat];

    /// Parse a query value. Unknown values select everything.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("photo") => Self::Photo,
            Some("chat") => Self::Chat,
            _ => Self::All,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Photo => "photo",
            Self::Chat => "chat",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "Todos",
            Self::Photo => "Fotos",
            Self::Chat => "Chats",
        }
    }

    #[must_use]
    pub fn matches(self, item: &HistoryItem) -> bool {
        match self {
            Self::All => true,
            Self::Photo => item.kind == AnalysisKind::Photo,
            Self::Chat => item.kind == AnalysisKind::Chat,
        }
    }

    /// Apply the filter, preserving order.
    #[must_use]
    pub fn apply(self, items: &[HistoryItem]) -> Vec<HistoryItem> {
        items.iter().filter(|i| self.matches(i)).cloned().collect()
    }
}

/// The sample entries every visitor starts with, newest first.
#[must_use]
pub fn seed_history(now: DateTime<Local>) -> Vec<HistoryItem> {
    let entries = [
        (AnalysisKind::Photo, 35, Duration::minutes(30), PHOTO_PREVIEW),
        (
            AnalysisKind::Chat,
            45,
            Duration::minutes(105),
            "Conversación sobre estrés laboral",
        ),
        (AnalysisKind::Photo, 55, Duration::hours(24), PHOTO_PREVIEW),
        (
            AnalysisKind::Chat,
            40,
            Duration::hours(28),
            "Ejercicios de respiración",
        ),
        (AnalysisKind::Photo, 65, Duration::days(4), PHOTO_PREVIEW),
    ];

    entries
        .into_iter()
        .map(|(kind, score, age, note)| {
            HistoryItem::new(kind, StressScore::new(score), now - age, note)
        })
        .collect()
}
