//! Views and the navigation chrome that links them.

/// Every screen of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Camera,
    Chat,
    History,
    Recommendations,
    Login,
    Result,
}

impl View {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Camera => "/camera",
            Self::Chat => "/chat",
            Self::History => "/history",
            Self::Recommendations => "/recommendations",
            Self::Login => "/login",
            Self::Result => "/result",
        }
    }

    /// Document title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Inicio",
            Self::Camera => "Análisis por Foto",
            Self::Chat => "Chat de Bienestar",
            Self::History => "Tu Historial",
            Self::Recommendations => "Recomendaciones",
            Self::Login => "Iniciar sesión",
            Self::Result => "Resultado",
        }
    }

    /// Sidebar, header and bottom nav are hidden on login and result.
    #[must_use]
    pub fn shows_navigation(self) -> bool {
        !matches!(self, Self::Login | Self::Result)
    }

    #[must_use]
    pub fn requires_sign_in(self) -> bool {
        matches!(self, Self::History | Self::Recommendations)
    }
}

/// Icon identifiers for nav entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIcon {
    Home,
    Camera,
    Chat,
    History,
    Sparkles,
}

/// An entry in the sidebar and bottom nav.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub view: View,
    pub icon: NavIcon,
    /// Label in the desktop sidebar.
    pub desktop_label: &'static str,
    /// Label in the mobile bottom nav.
    pub mobile_label: &'static str,
}

pub const NAV_ITEMS: [NavItem; 5] = [
    NavItem {
        view: View::Home,
        icon: NavIcon::Home,
        desktop_label: "Inicio",
        mobile_label: "Inicio",
    },
    NavItem {
        view: View::Camera,
        icon: NavIcon::Camera,
        desktop_label: "Análisis Foto",
        mobile_label: "Foto",
    },
    NavItem {
        view: View::Chat,
        icon: NavIcon::Chat,
        desktop_label: "Chat",
        mobile_label: "Chat",
    },
    NavItem {
        view: View::History,
        icon: NavIcon::History,
        desktop_label: "Historial",
        mobile_label: "Historial",
    },
    NavItem {
        view: View::Recommendations,
        icon: NavIcon::Sparkles,
        desktop_label: "Recomendaciones",
        mobile_label: "Tips",
    },
];

/// Nav entries a visitor may see.
#[must_use]
pub fn visible_nav_items(signed_in: bool) -> Vec<NavItem> {
    NAV_ITEMS
        .into_iter()
        .filter(|item| signed_in || !item.view.requires_sign_in())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_visitors_see_three_items() {
        let items = visible_nav_items(false);
        let views: Vec<View> = items.iter().map(|i| i.view).collect();
        assert_eq!(views, vec![View::Home, View::Camera, View::Chat]);
    }

    #[test]
    fn test_signed_in_visitors_see_everything() {
        let items = visible_nav_items(true);
        assert_eq!(items.len(), 5);
        assert_eq!(items[4].mobile_label, "Tips");
        assert_eq!(items[4].desktop_label, "Recomendaciones");
    }

    #[test]
    fn test_chrome_hidden_on_login_and_result() {
        assert!(View::Home.shows_navigation());
        assert!(View::Chat.shows_navigation());
        assert!(!View::Login.shows_navigation());
        assert!(!View::Result.shows_navigation());
    }
}
