//! Relaxation technique catalog.

use serde::{Deserialize, Serialize};

/// Recommendation category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Breathing,
    Mindfulness,
    Activity,
    Rest,
}

impl Category {
    pub const ALL: [Self; 4] = [Self::Breathing, Self::Mindfulness, Self::Activity, Self::Rest];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Breathing => "breathing",
            Self::Mindfulness => "mindfulness",
            Self::Activity => "activity",
            Self::Rest => "rest",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Breathing => "Respiración",
            Self::Mindfulness => "Mindfulness",
            Self::Activity => "Actividad",
            Self::Rest => "Descanso",
        }
    }

    /// Background class of the card icon.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Breathing => "bg-sky-light",
            Self::Mindfulness => "bg-mint-light",
            Self::Activity => "bg-peach-light",
            Self::Rest => "bg-rose-light",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

/// Icons available to recommendation cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationIcon {
    Wind,
    Moon,
    Leaf,
    Music,
    Book,
    Coffee,
}

/// A relaxation technique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: RecommendationIcon,
    pub category: Category,
    /// Effectiveness percentage.
    pub effectiveness: u8,
    pub saved: bool,
}

/// The built-in recommendation list.
#[must_use]
pub fn catalog() -> Vec<Recommendation> {
    let entries = [
        (
            "1",
            "Respiración 4-7-8",
            "Inhala 4s, mantén 7s, exhala 8s. Repite 4 veces para calmar tu sistema nervioso.",
            RecommendationIcon::Wind,
            Category::Breathing,
            92,
            true,
        ),
        (
            "2",
            "Meditación de 5 minutos",
            "Una breve sesión de mindfulness para reconectar contigo mismo.",
            RecommendationIcon::Moon,
            Category::Mindfulness,
            88,
            true,
        ),
        (
            "3",
            "Caminata consciente",
            "15 minutos de caminata enfocándote en tus sensaciones y el entorno.",
            RecommendationIcon::Leaf,
            Category::Activity,
            85,
            false,
        ),
        (
            "4",
            "Música relajante",
            "Escucha música a 432Hz para reducir la ansiedad y el estrés.",
            RecommendationIcon::Music,
            Category::Rest,
            78,
            true,
        ),
        (
            "5",
            "Journaling emocional",
            "Escribe 3 cosas por las que estás agradecido y cómo te sientes.",
            RecommendationIcon::Book,
            Category::Mindfulness,
            82,
            false,
        ),
        (
            "6",
            "Pausa de café consciente",
            "Disfruta tu bebida sin distracciones, enfocándote en cada sorbo.",
            RecommendationIcon::Coffee,
            Category::Rest,
            75,
            false,
        ),
    ];

    entries
        .into_iter()
        .map(
            |(id, title, description, icon, category, effectiveness, saved)| Recommendation {
                id: id.to_string(),
                title: title.to_string(),
                description: description.to_string(),
                icon,
                category,
                effectiveness,
                saved,
            },
        )
        .collect()
}

/// Category pill plus "Favoritos" toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecommendationFilter {
    /// `None` selects every category.
    pub category: Option<Category>,
    pub saved_only: bool,
}

impl RecommendationFilter {
    /// Parse query values. Unknown categories select everything.
    #[must_use]
    pub fn parse(category: Option<&str>, saved_only: bool) -> Self {
        Self {
            category: category.and_then(Category::parse),
            saved_only,
        }
    }

    #[must_use]
    pub fn matches(&self, rec: &Recommendation) -> bool {
        if self.saved_only && !rec.saved {
            return false;
        }
        self.category.is_none_or(|c| c == rec.category)
    }

    #[must_use]
    pub fn apply(&self, recs: &[Recommendation]) -> Vec<Recommendation> {
        recs.iter().filter(|r| self.matches(r)).cloned().collect()
    }

    /// Message shown when nothing matches.
    #[must_use]
    pub fn empty_message(&self) -> &'static str {
        if self.saved_only {
            "No tienes favoritos guardados"
        } else {
            "No hay recomendaciones en esta categoría"
        }
    }

    /// Query string reproducing this filter, with `category` replaced.
    #[must_use]
    pub fn query_with_category(&self, category: Option<Category>) -> String {
        let category = category.map_or("all", Category::as_str);
        if self.saved_only {
            format!("?category={category}&saved=true")
        } else {
            format!("?category={category}")
        }
    }

    /// Query string with the saved-only toggle flipped.
    #[must_use]
    pub fn query_toggling_saved(&self) -> String {
        let category = self.category.map_or("all", Category::as_str);
        if self.saved_only {
            format!("?category={category}")
        } else {
            format!("?category={category}&saved=true")
        }
    }
}

/// Flip the saved flag of `id`. Returns the new state, or `None` if unknown.
pub fn toggle_saved(recs: &mut [Recommendation], id: &str) -> Option<bool> {
    let rec = recs.iter_mut().find(|r| r.id == id)?;
    rec.saved = !rec.saved;
    Some(rec.saved)
}
