use chrono::{DateTime, Local};

use crate::domain::{AnalysisKind, HistoryFilter, HistoryItem};
use crate::ui::components::{ButtonSize, ButtonVariant, Icon, band_badge, button_class};
use crate::ui::escape;

fn tabs(active: HistoryFilter) -> String {
    HistoryFilter::ALL
        .into_iter()
        .map(|filter| {
            let icon = match filter {
                HistoryFilter::All => String::new(),
                HistoryFilter::Photo => Icon::Camera.svg("icon-xs"),
                HistoryFilter::Chat => Icon::MessageCircle.svg("icon-xs"),
            };
            format!(
                r#"<a href="/history?filter={}" class="tab{}">{icon}{}</a>"#,
                filter.as_str(),
                if filter == active { " active" } else { "" },
                filter.label(),
            )
        })
        .collect()
}

/// One history row with its delete control.
#[must_use]
pub fn row(item: &HistoryItem, filter: HistoryFilter, now: DateTime<Local>) -> String {
    let band = item.score.band();
    let icon = match item.kind {
        AnalysisKind::Photo => format!(
            r#"<span class="tile-icon bg-lavender-light">{}</span>"#,
            Icon::Camera.svg("icon-sm text-primary")
        ),
        AnalysisKind::Chat => format!(
            r#"<span class="tile-icon bg-mint-light">{}</span>"#,
            Icon::MessageCircle.svg("icon-sm text-secondary")
        ),
    };
    let id = escape(&item.id);
    format!(
        r#"<div class="history-item" id="history-{id}">
    {icon}
    <div class="grow min-w-0">
        <div class="row-title"><p class="strong truncate">{title}</p>{badge}</div>
        <p class="muted small truncate">{note}</p>
        <p class="muted small">{date}</p>
    </div>
    <div class="row-end">
        <span class="score">{heart}<span>{score}</span></span>
        <form method="post" action="/history/{id}/delete" class="inline-form"
              hx-post="/history/{id}/delete" hx-target="closest .history-item" hx-swap="outerHTML">
            <input type="hidden" name="filter" value="{filter}">
            <button type="submit" class="{delete_class}" aria-label="Eliminar">{trash}</button>
        </form>
        {chevron}
    </div>
</div>"#,
        title = item.kind.title(),
        badge = band_badge(band),
        note = escape(&item.note),
        date = item.date_label(now),
        heart = Icon::Heart.svg(&format!("icon-xs text-{}", band.tone())),
        score = item.score,
        filter = filter.as_str(),
        delete_class = button_class(ButtonVariant::Ghost, ButtonSize::IconSm, "danger"),
        trash = Icon::Trash.svg("icon-xs"),
        chevron = Icon::ChevronRight.svg("icon-xs muted"),
    )
}

/// Placeholder for a list with nothing left under the active filter.
#[must_use]
pub fn empty_state() -> String {
    format!(
        r#"<div class="empty-state"><span class="round-icon muted-bg">{}</span><p class="muted">No hay registros aún</p></div>"#,
        Icon::Calendar.svg("icon-lg muted")
    )
}

/// History list. `items` is the visitor's full history; `filter` is applied here.
#[must_use]
pub fn render(items: &[HistoryItem], filter: HistoryFilter, now: DateTime<Local>) -> String {
    let visible = filter.apply(items);
    let list = if visible.is_empty() {
        empty_state()
    } else {
        visible.iter().map(|item| row(item, filter, now)).collect()
    };

    format!(
        r#"<div class="view history fade-in">
    <div class="view-heading">
        <h2>Tu Historial</h2>
        <p class="muted">Revisa tus análisis anteriores</p>
    </div>
    <nav class="tabs">{tabs}</nav>
    <div class="history-list">{list}</div>
</div>"#,
        tabs = tabs(filter),
    )
}
