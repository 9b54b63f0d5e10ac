//! Display records of the wellness app.
//!
//! None of these types are persisted. They describe what the views render:
//! stress scores and their bands, history rows, the recommendation catalog,
//! chat messages and the navigation model.

pub mod chat;
pub mod history;
pub mod navigation;
pub mod recommendations;
pub mod stress;

pub use chat::{CannedResponder, ChatMessage, ChatRole};
pub use history::{HistoryFilter, HistoryItem};
pub use navigation::{NavItem, View};
pub use recommendations::{Category, Recommendation, RecommendationFilter};
pub use stress::{AnalysisKind, AnalysisResult, StressBand, StressScore};
