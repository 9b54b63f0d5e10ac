//! Application shell.

use super::components::{ButtonSize, ButtonVariant, Icon, button_class, link_button};
use super::escape;
use crate::domain::navigation::{NavIcon, visible_nav_items};
use crate::domain::View;
use crate::session::{Account, Toast};

/// Per-request context for the shell around a view.
#[derive(Debug, Clone, Copy)]
pub struct Chrome<'a> {
    pub view: View,
    pub account: Option<&'a Account>,
    pub toast: Option<&'a Toast>,
    pub htmx_src: &'a str,
}

impl Chrome<'_> {
    fn signed_in(&self) -> bool {
        self.account.is_some()
    }
}

fn nav_icon(icon: NavIcon) -> Icon {
    match icon {
        NavIcon::Home => Icon::Home,
        NavIcon::Camera => Icon::Camera,
        NavIcon::Chat => Icon::MessageCircle,
        NavIcon::History => Icon::History,
        NavIcon::Sparkles => Icon::Sparkles,
    }
}

fn logo(size_class: &str) -> String {
    format!(
        r#"<span class="logo {size_class}">{}</span>"#,
        Icon::Brain.svg("icon-md")
    )
}

fn logout_form(class: &str, content: &str) -> String {
    format!(
        r#"<form method="post" action="/logout" class="inline-form"><button type="submit" class="{class}" aria-label="Cerrar sesión">{content}</button></form>"#
    )
}

fn sidebar(chrome: &Chrome<'_>) -> String {
    let links: String = visible_nav_items(chrome.signed_in())
        .into_iter()
        .map(|item| {
            let active = item.view == chrome.view;
            format!(
                r#"<a href="{}" class="sidebar-link{}"{}>{}<span>{}</span></a>"#,
                item.view.path(),
                if active { " active" } else { "" },
                if active { r#" aria-current="page""# } else { "" },
                nav_icon(item.icon).svg("icon-sm"),
                item.desktop_label,
            )
        })
        .collect();

    let user = match chrome.account {
        Some(account) => format!(
            r#"<div class="sidebar-user">
    <span class="avatar bg-lavender-light">{}</span>
    <div class="sidebar-user-text"><p class="truncate">{}</p><p class="muted small">Cuenta activa</p></div>
</div>
{}"#,
            Icon::User.svg("icon-sm text-primary"),
            escape(account.display_name()),
            logout_form(
                &button_class(ButtonVariant::Ghost, ButtonSize::Sm, "w-full justify-start"),
                &format!("{}Cerrar sesión", Icon::LogOut.svg("icon-xs")),
            ),
        ),
        None => format!(
            r#"<a href="/login" class="{}">{}Iniciar sesión</a>"#,
            button_class(ButtonVariant::Gradient, ButtonSize::Md, "w-full"),
            Icon::User.svg("icon-xs"),
        ),
    };

    format!(
        r#"<aside class="sidebar">
    <div class="sidebar-brand">{}<div><h1>StressBot</h1><p class="muted small">Tu bienestar importa</p></div></div>
    <nav class="sidebar-nav">{links}</nav>
    <div class="sidebar-footer">{user}</div>
</aside>"#,
        logo("logo-lg"),
    )
}

fn header(chrome: &Chrome<'_>) -> String {
    let action = if chrome.signed_in() {
        logout_form(
            &button_class(ButtonVariant::Ghost, ButtonSize::IconSm, ""),
            &Icon::LogOut.svg("icon-sm"),
        )
    } else {
        link_button(
            "/login",
            ButtonVariant::Lavender,
            ButtonSize::Sm,
            &format!("{}Iniciar sesión", Icon::User.svg("icon-xs")),
        )
    };
    format!(
        r#"<header class="mobile-header">
    <a href="/" class="brand">{}<span>StressBot</span></a>
    {action}
</header>"#,
        logo("logo-sm"),
    )
}

fn bottom_nav(chrome: &Chrome<'_>) -> String {
    let links: String = visible_nav_items(chrome.signed_in())
        .into_iter()
        .map(|item| {
            let active = item.view == chrome.view;
            format!(
                r#"<a href="{}" class="bottom-link{}"{}>{}<span>{}</span></a>"#,
                item.view.path(),
                if active { " active" } else { "" },
                if active { r#" aria-current="page""# } else { "" },
                nav_icon(item.icon).svg("icon-sm"),
                item.mobile_label,
            )
        })
        .collect();
    format!(r#"<nav class="bottom-nav">{links}</nav>"#)
}

/// Toast markup, or nothing.
#[must_use]
pub fn toast(toast: Option<&Toast>) -> String {
    toast.map_or_else(String::new, |t| {
        format!(
            r#"<div class="toast" role="status" data-toast><strong>{}</strong><p>{}</p></div>"#,
            escape(&t.title),
            escape(&t.description)
        )
    })
}

/// Wrap view `content` in the full document.
#[must_use]
pub fn render_page(chrome: &Chrome<'_>, content: &str) -> String {
    let (sidebar, header, bottom_nav) = if chrome.view.shows_navigation() {
        (sidebar(chrome), header(chrome), bottom_nav(chrome))
    } else {
        (String::new(), String::new(), String::new())
    };
    let shell_class = if chrome.view.shows_navigation() {
        "app-shell"
    } else {
        "app-shell bare"
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="description" content="Evalúa tu nivel de estrés de forma sencilla">
    <title>{title} - StressBot</title>
    <script src="{htmx}" defer></script>
    <script src="/static/app.js" defer></script>
    <link rel="stylesheet" href="/static/app.css">
</head>
<body>
    <div class="{shell_class}">
        {sidebar}
        <div class="app-main">
            {header}
            <main id="app" class="app-content">
                {content}
            </main>
        </div>
        {bottom_nav}
    </div>
    {toast}
</body>
</html>"#,
        title = chrome.view.title(),
        htmx = escape(chrome.htmx_src),
        toast = toast(chrome.toast),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chrome(view: View, account: Option<&Account>) -> Chrome<'_> {
        Chrome {
            view,
            account,
            toast: None,
            htmx_src: "/htmx.js",
        }
    }

    #[test]
    fn test_anonymous_shell_hides_private_links() {
        let html = render_page(&chrome(View::Home, None), "<p>hi</p>");
        assert!(html.contains("<title>Inicio - StressBot</title>"));
        assert!(html.contains(r#"href="/camera""#));
        assert!(!html.contains(r#"href="/history""#));
        assert!(html.contains(r#"href="/login""#));
        assert!(html.contains(r#"class="sidebar-link active" aria-current="page""#));
    }

    #[test]
    fn test_signed_in_shell() {
        let account = Account {
            email: "ana@example.com".to_string(),
            name: Some("<Ana>".to_string()),
        };
        let html = render_page(&chrome(View::History, Some(&account)), "");
        assert!(html.contains(r#"href="/recommendations""#));
        assert!(html.contains("&lt;Ana&gt;"));
        assert!(html.contains(r#"action="/logout""#));
        assert!(html.contains("<span>Tips</span>"));
    }

    #[test]
    fn test_login_and_result_have_no_chrome() {
        for view in [View::Login, View::Result] {
            let html = render_page(&chrome(view, None), "");
            assert!(!html.contains("sidebar-nav"));
            assert!(!html.contains("bottom-nav"));
            assert!(!html.contains("mobile-header"));
        }
    }

    #[test]
    fn test_toast_is_escaped() {
        let t = Toast::new("¡Bienvenido!", "<b>ok</b>");
        let html = toast(Some(&t));
        assert!(html.contains("<strong>¡Bienvenido!</strong>"));
        assert!(html.contains("&lt;b&gt;ok&lt;/b&gt;"));
        assert!(toast(None).is_empty());
    }
}
