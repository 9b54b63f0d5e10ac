use crate::domain::recommendations::RecommendationIcon;
use crate::domain::{Category, Recommendation, RecommendationFilter};
use crate::ui::components::{ButtonSize, ButtonVariant, Icon, button_class};
use crate::ui::escape;

fn icon(icon: RecommendationIcon) -> Icon {
    match icon {
        RecommendationIcon::Wind => Icon::Wind,
        RecommendationIcon::Moon => Icon::Moon,
        RecommendationIcon::Leaf => Icon::Leaf,
        RecommendationIcon::Music => Icon::Music,
        RecommendationIcon::Book => Icon::BookOpen,
        RecommendationIcon::Coffee => Icon::Coffee,
    }
}

fn pills(filter: &RecommendationFilter) -> String {
    let all = std::iter::once((None, "Todos"));
    let categories = Category::ALL.into_iter().map(|c| (Some(c), c.label()));
    all.chain(categories)
        .map(|(category, label)| {
            format!(
                r#"<a href="/recommendations{}" class="pill{}">{label}</a>"#,
                filter.query_with_category(category),
                if filter.category == category { " active" } else { "" },
            )
        })
        .collect()
}

/// One recommendation card. The filter is echoed so plain posts can return to it.
#[must_use]
pub fn card(rec: &Recommendation, filter: &RecommendationFilter) -> String {
    let id = escape(&rec.id);
    let (heart_class, label) = if rec.saved {
        ("icon-sm filled text-rose", "Quitar de favoritos")
    } else {
        ("icon-sm muted", "Guardar en favoritos")
    };
    format!(
        r#"<article class="rec-card" id="rec-{id}">
    <span class="tile-icon {color}">{icon}</span>
    <div class="grow">
        <div class="row-title spread">
            <h3>{title}</h3>
            <form method="post" action="/recommendations/{id}/toggle" class="inline-form"
                  hx-post="/recommendations/{id}/toggle" hx-target="closest .rec-card" hx-swap="outerHTML">
                <input type="hidden" name="category" value="{category}">
                <input type="hidden" name="saved" value="{saved_only}">
                <button type="submit" class="heart-toggle" aria-pressed="{saved}" aria-label="{label}">{heart}</button>
            </form>
        </div>
        <p class="muted small">{description}</p>
        <div class="effectiveness">
            <div class="bar"><div style="width: {effectiveness}%"></div></div>
            <span class="small muted">{effectiveness}% efectivo</span>
        </div>
    </div>
</article>"#,
        color = rec.category.color(),
        icon = icon(rec.icon).svg("icon-sm"),
        title = escape(&rec.title),
        category = filter.category.map_or("all", Category::as_str),
        saved_only = filter.saved_only,
        saved = rec.saved,
        heart = Icon::Heart.svg(heart_class),
        description = escape(&rec.description),
        effectiveness = rec.effectiveness,
    )
}

/// Recommendation grid. `recs` is the visitor's full list; `filter` is applied here.
#[must_use]
pub fn render(recs: &[Recommendation], filter: &RecommendationFilter) -> String {
    let visible = filter.apply(recs);
    let grid = if visible.is_empty() {
        format!(
            r#"<div class="empty-state">{}<p class="muted">{}</p></div>"#,
            Icon::Sparkles.svg("icon-xl muted"),
            filter.empty_message()
        )
    } else {
        visible.iter().map(|rec| card(rec, filter)).collect()
    };

    let (favorites_variant, favorites_icon) = if filter.saved_only {
        (ButtonVariant::Lavender, "icon-xs filled")
    } else {
        (ButtonVariant::Outline, "icon-xs")
    };

    format!(
        r#"<div class="view recommendations fade-in">
    <div class="view-heading with-badge">
        <span class="round-icon gradient-warm">{sparkles}</span>
        <div>
            <h2>Recomendaciones</h2>
            <p class="muted">Técnicas personalizadas para tu bienestar</p>
        </div>
    </div>
    <div class="toolbar">
        <a href="/recommendations{favorites_query}" class="{favorites_class}" aria-pressed="{saved_only}">{heart}Favoritos</a>
    </div>
    <nav class="pills">{pills}</nav>
    <div class="rec-grid">{grid}</div>
</div>"#,
        sparkles = Icon::Sparkles.svg("icon-md"),
        favorites_query = filter.query_toggling_saved(),
        favorites_class = button_class(favorites_variant, ButtonSize::Sm, ""),
        saved_only = filter.saved_only,
        heart = Icon::Heart.svg(favorites_icon),
        pills = pills(filter),
    )
}
