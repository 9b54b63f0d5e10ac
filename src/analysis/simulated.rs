//! Delay-then-random stand-in for a real model.

use std::ops::Range;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use super::{AnalysisError, CapturedImage, StressAnalyzer};
use crate::domain::{AnalysisKind, AnalysisResult, StressScore};

/// Range simulated scores are drawn from.
pub const SIMULATED_RANGE: Range<u8> = 20..80;

const PHOTO_MESSAGE: &str = "Basado en tu expresión facial, parece que tienes un nivel moderado de estrés. Te recomendamos tomar un descanso.";

/// Draw a score from [`SIMULATED_RANGE`].
#[must_use]
pub fn random_score() -> StressScore {
    StressScore::new(rand::rng().random_range(SIMULATED_RANGE))
}

/// Analyzer that pretends to think, then guesses.
#[derive(Debug, Clone)]
pub struct SimulatedAnalyzer {
    delay: Duration,
}

impl SimulatedAnalyzer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl StressAnalyzer for SimulatedAnalyzer {
    async fn analyze_image(&self, image: &CapturedImage) -> Result<AnalysisResult, AnalysisError> {
        tracing::debug!(
            bytes = image.bytes().len(),
            delay_ms = self.delay.as_millis(),
            "Simulating image analysis"
        );
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(AnalysisResult::new(
            AnalysisKind::Photo,
            random_score(),
            PHOTO_MESSAGE,
        ))
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_scores_stay_in_range() {
        for _ in 0..200 {
            let score = random_score().value();
            assert!(SIMULATED_RANGE.contains(&score), "{score}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_the_configured_delay() {
        let analyzer = SimulatedAnalyzer::new(Duration::from_secs(2));
        let image = CapturedImage::parse("aGVsbG8=").unwrap();

        let started = tokio::time::Instant::now();
        let result = analyzer.analyze_image(&image).await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(2));
        assert_eq!(result.kind, AnalysisKind::Photo);
        assert!(SIMULATED_RANGE.contains(&result.score.value()));
        assert_eq!(result.message, PHOTO_MESSAGE);
    }
}
