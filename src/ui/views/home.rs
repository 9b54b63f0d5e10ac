use chrono::{DateTime, Local};

use crate::domain::{AnalysisKind, HistoryItem};
use crate::session::Account;
use crate::ui::components::Icon;

const QUOTE: &str = "\"La calma es la cuna del poder interior\"";

fn kind_icon(kind: AnalysisKind) -> String {
    match kind {
        AnalysisKind::Photo => format!(
            r#"<span class="tile-icon bg-lavender-light">{}</span>"#,
            Icon::Camera.svg("icon-sm text-primary")
        ),
        AnalysisKind::Chat => format!(
            r#"<span class="tile-icon bg-mint-light">{}</span>"#,
            Icon::MessageCircle.svg("icon-sm text-secondary")
        ),
    }
}

fn recent_card(item: &HistoryItem, now: DateTime<Local>) -> String {
    format!(
        r#"<div class="recent-item">
    {}
    <div class="grow"><p class="strong">{}</p><p class="muted small">{}</p></div>
    <div class="score">{}<span>{}</span></div>
</div>"#,
        kind_icon(item.kind),
        item.kind.title(),
        item.date_label(now),
        Icon::Heart.svg(&format!("icon-xs text-{}", item.score.band().tone())),
        item.score,
    )
}

/// Landing view. `recent` is only shown to signed-in visitors.
#[must_use]
pub fn render(account: Option<&Account>, recent: &[HistoryItem], now: DateTime<Local>) -> String {
    let heading = if account.is_some() {
        "¡Hola de nuevo!"
    } else {
        "Bienvenido a StressBot"
    };

    let recent_section = if account.is_some() && !recent.is_empty() {
        let cards: String = recent
            .iter()
            .take(3)
            .map(|item| recent_card(item, now))
            .collect();
        format!(
            r#"<section class="card recent">
    <h3 class="section-title">{}Análisis recientes</h3>
    <div class="recent-grid">{cards}</div>
</section>"#,
            Icon::TrendingUp.svg("icon-sm text-primary")
        )
    } else {
        String::new()
    };

    format!(
        r#"<div class="view home fade-in">
    <section class="hero">
        <div class="hero-main">
            <span class="hero-badge">{brain}</span>
            <div>
                <h2>{heading}</h2>
                <p class="muted">Evalúa tu nivel de estrés de forma sencilla</p>
            </div>
        </div>
        <p class="quote desktop-only">{QUOTE}</p>
    </section>

    <div class="action-grid">
        <a href="/camera" class="action-card">
            <span class="action-icon bg-lavender-light">{camera}</span>
            <h3>Análisis Facial</h3>
            <p class="muted small">Toma una foto y analiza tu estrés</p>
        </a>
        <a href="/chat" class="action-card">
            <span class="action-icon bg-mint-light">{chat}</span>
            <h3>Chat de Bienestar</h3>
            <p class="muted small">Conversa con nuestro asistente</p>
        </a>
        <div class="feature-stack desktop-only">
            <div class="feature-card from-sky">
                <span class="feature-icon">{trend}</span>
                <div><h3>Seguimiento Continuo</h3><p class="muted small">Monitorea tu progreso y mejora tu bienestar día a día</p></div>
            </div>
            <div class="feature-card from-peach">
                <span class="feature-icon">{heart}</span>
                <div><h3>Recomendaciones Personalizadas</h3><p class="muted small">Técnicas de relajación adaptadas a tus necesidades</p></div>
            </div>
        </div>
    </div>

    {recent_section}

    <p class="quote-card mobile-only">{QUOTE}</p>
</div>"#,
        brain = Icon::Brain.svg("icon-lg"),
        camera = Icon::Camera.svg("icon-md text-primary"),
        chat = Icon::MessageCircle.svg("icon-md text-secondary"),
        trend = Icon::TrendingUp.svg("icon-md text-primary"),
        heart = Icon::Heart.svg("icon-md text-rose"),
    )
}
