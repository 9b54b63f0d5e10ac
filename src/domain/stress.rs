//! Stress scores, bands and analysis results.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Circumference of the result meter circle (`r = 45`).
pub const METER_CIRCUMFERENCE: f64 = 283.0;

/// A stress score as a percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StressScore(u8);

impl StressScore {
    /// Highest representable score.
    pub const MAX: u8 = 100;

    /// Create a score, clamping anything above 100.
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    /// Create a score from a backend value, rounding to the nearest integer.
    ///
    /// Non-finite values map to zero.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            return Self(0);
        }
        let rounded = value.round().clamp(0.0, f64::from(Self::MAX));
        Self(rounded as u8)
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn band(self) -> StressBand {
        StressBand::for_score(self)
    }

    /// Length of the filled arc on the result meter.
    #[must_use]
    pub fn meter_arc(self) -> f64 {
        f64::from(self.0) * METER_CIRCUMFERENCE / 100.0
    }
}

impl std::fmt::Display for StressScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Low / moderate / high bucket of a stress score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StressBand {
    Low,
    Moderate,
    High,
}

impl StressBand {
    /// Scores below this are low.
    pub const MODERATE_FROM: u8 = 40;
    /// Scores from this up are high.
    pub const HIGH_FROM: u8 = 70;

    #[must_use]
    pub fn for_score(score: StressScore) -> Self {
        match score.value() {
            v if v < Self::MODERATE_FROM => Self::Low,
            v if v < Self::HIGH_FROM => Self::Moderate,
            _ => Self::High,
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Bajo",
            Self::Moderate => "Moderado",
            Self::High => "Alto",
        }
    }

    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Low => "😊",
            Self::Moderate => "😐",
            Self::High => "😟",
        }
    }

    /// Colour token used by the stylesheet (`text-mint`, `bg-peach-light`...).
    #[must_use]
    pub fn tone(self) -> &'static str {
        match self {
            Self::Low => "mint",
            Self::Moderate => "peach",
            Self::High => "rose",
        }
    }

    /// One-line advice shown under a result.
    #[must_use]
    pub fn quick_tip(self) -> &'static str {
        match self {
            Self::Low => {
                "¡Excelente! Mantén tus hábitos actuales y sigue cuidando tu bienestar."
            }
            Self::Moderate => {
                "Intenta hacer una pausa de 5 minutos con ejercicios de respiración profunda."
            }
            Self::High => {
                "Busca un lugar tranquilo y practica la respiración 4-7-8 para reducir el estrés."
            }
        }
    }
}

/// How a stress estimate was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    Photo,
    Chat,
}

impl AnalysisKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Chat => "chat",
        }
    }

    /// Title shown in history rows and recent-analysis cards.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Photo => "Análisis facial",
            Self::Chat => "Conversación",
        }
    }

    /// Where "try again" leads.
    #[must_use]
    pub fn retry_path(self) -> &'static str {
        match self {
            Self::Photo => "/camera",
            Self::Chat => "/chat",
        }
    }
}

/// Outcome of a photo or chat analysis, as shown on the result view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub kind: AnalysisKind,
    pub score: StressScore,
    pub message: String,
    /// Level label reported by a remote backend, if any.
    pub level: Option<String>,
    pub recorded_at: DateTime<Local>,
}

impl AnalysisResult {
    #[must_use]
    pub fn new(kind: AnalysisKind, score: StressScore, message: impl Into<String>) -> Self {
        Self {
            kind,
            score,
            message: message.into(),
            level: None,
            recorded_at: Local::now(),
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    #[must_use]
    pub fn band(&self) -> StressBand {
        self.score.band()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_clamps_and_rounds() {
        assert_eq!(StressScore::new(150).value(), 100);
        assert_eq!(StressScore::from_f64(75.5).value(), 76);
        assert_eq!(StressScore::from_f64(75.4).value(), 75);
        assert_eq!(StressScore::from_f64(-3.0).value(), 0);
        assert_eq!(StressScore::from_f64(f64::NAN).value(), 0);
        assert_eq!(StressScore::from_f64(240.0).value(), 100);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(StressScore::new(0).band(), StressBand::Low);
        assert_eq!(StressScore::new(39).band(), StressBand::Low);
        assert_eq!(StressScore::new(40).band(), StressBand::Moderate);
        assert_eq!(StressScore::new(69).band(), StressBand::Moderate);
        assert_eq!(StressScore::new(70).band(), StressBand::High);
        assert_eq!(StressScore::new(100).band(), StressBand::High);
    }

    #[test]
    fn test_band_presentation() {
        assert_eq!(StressBand::Low.label(), "Bajo");
        assert_eq!(StressBand::Moderate.emoji(), "😐");
        assert_eq!(StressBand::High.tone(), "rose");
        assert!(StressBand::High.quick_tip().contains("4-7-8"));
    }

    #[test]
    fn test_meter_arc() {
        assert!((StressScore::new(100).meter_arc() - 283.0).abs() < f64::EPSILON);
        assert!((StressScore::new(50).meter_arc() - 141.5).abs() < 1e-9);
        assert_eq!(StressScore::new(42).to_string(), "42%");
    }

    #[test]
    fn test_retry_path_follows_kind() {
        assert_eq!(AnalysisKind::Photo.retry_path(), "/camera");
        assert_eq!(AnalysisKind::Chat.retry_path(), "/chat");
    }
}
