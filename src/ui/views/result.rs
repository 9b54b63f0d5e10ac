use crate::domain::stress::METER_CIRCUMFERENCE;
use crate::domain::AnalysisResult;
use crate::ui::components::{ButtonSize, ButtonVariant, Icon, link_button};
use crate::ui::escape;

fn meter(result: &AnalysisResult) -> String {
    let band = result.band();
    format!(
        r#"<div class="meter">
    <svg viewBox="0 0 100 100" class="meter-ring" aria-hidden="true">
        <circle cx="50" cy="50" r="45" class="meter-track" fill="none" stroke-width="8"/>
        <circle cx="50" cy="50" r="45" class="meter-arc text-{tone}" fill="none" stroke="currentColor" stroke-width="8" stroke-linecap="round" stroke-dasharray="{arc:.2} {circumference}"/>
    </svg>
    <div class="meter-label">
        <span class="meter-emoji">{emoji}</span>
        <span class="meter-score">{score}</span>
    </div>
</div>"#,
        tone = band.tone(),
        arc = result.score.meter_arc(),
        circumference = METER_CIRCUMFERENCE,
        emoji = band.emoji(),
        score = result.score,
    )
}

/// Outcome of the last analysis.
#[must_use]
pub fn render(result: &AnalysisResult) -> String {
    let band = result.band();
    let level = result.level.as_deref().unwrap_or(band.label());
    format!(
        r#"<div class="view result fade-in">
    <section class="card result-card">
        {meter}
        <h2>Nivel de estrés: {label}</h2>
        <p class="muted lead">{message}</p>
        <div class="quick-tip">
            <h3>{sparkles}Recomendación rápida</h3>
            <p class="muted small">{tip}</p>
        </div>
    </section>
    <div class="button-row stretch">
        {retry}
        {next}
    </div>
</div>"#,
        meter = meter(result),
        label = escape(level),
        message = escape(&result.message),
        sparkles = Icon::Sparkles.svg("icon-sm text-primary"),
        tip = band.quick_tip(),
        retry = link_button(
            result.kind.retry_path(),
            ButtonVariant::Outline,
            ButtonSize::Lg,
            &format!("{}Repetir", Icon::RefreshCcw.svg("icon-sm")),
        ),
        next = link_button(
            "/",
            ButtonVariant::Gradient,
            ButtonSize::Lg,
            &format!("Continuar{}", Icon::ArrowRight.svg("icon-sm")),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnalysisKind, StressScore};

    #[test]
    fn test_meter_and_labels() {
        let result = AnalysisResult::new(AnalysisKind::Photo, StressScore::new(50), "Todo bien");
        let html = render(&result);
        assert!(html.contains(r#"stroke-dasharray="141.50 283""#));
        assert!(html.contains("Nivel de estrés: Moderado"));
        assert!(html.contains("50%"));
        assert!(html.contains("😐"));
        assert!(html.contains(r#"href="/camera""#));
        assert!(html.contains("Recomendación rápida"));
    }

    #[test]
    fn test_chat_result_retries_in_chat() {
        let result = AnalysisResult::new(AnalysisKind::Chat, StressScore::new(10), "<ok>");
        let html = render(&result);
        assert!(html.contains(r#"href="/chat""#));
        assert!(html.contains("&lt;ok&gt;"));
        assert!(html.contains("Nivel de estrés: Bajo"));
    }

    #[test]
    fn test_backend_level_wins() {
        let result = AnalysisResult::new(AnalysisKind::Photo, StressScore::new(80), "m")
            .with_level("Muy alto");
        assert!(render(&result).contains("Nivel de estrés: Muy alto"));
    }
}
