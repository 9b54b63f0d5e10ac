//! StressBot
//!
//! A wellness web app that estimates a visitor's stress level from a face
//! photo or a short chat, and offers relaxation techniques.
//!
//! # Architecture
//!
//! - **Server**: Axum, server-rendered HTML progressively enhanced with htmx
//! - **Analysis**: pluggable [`analysis::StressAnalyzer`] backends (simulated or remote HTTP)
//! - **Sessions**: in-memory per-visitor state keyed by cookie
//!
//! # Modules
//!
//! - [`analysis`]: stress estimation from images and conversations
//! - [`config`]: layered configuration (defaults, file, env, CLI)
//! - [`domain`]: scores, history, recommendations, chat, navigation
//! - [`handlers`]: HTTP handlers for pages and the JSON API
//! - [`server`]: router assembly and startup
//! - [`session`]: visitor sessions and their middleware
//! - [`ui`]: HTML rendering

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::implicit_hasher)]
#![allow(clippy::assigning_clones)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::default_trait_access)]
#![allow(clippy::unused_async)]

pub mod analysis;
pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod server;
pub mod session;
pub mod ui;

use std::sync::Arc;
use std::time::Duration;

use analysis::StressAnalyzer;
use config::AppConfig;
use domain::CannedResponder;
use session::SessionStore;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Visitor sessions.
    pub sessions: SessionStore,
    /// Photo analysis backend.
    pub analyzer: Arc<dyn StressAnalyzer>,
    /// Canned chat assistant.
    pub responder: CannedResponder,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Wire up state from configuration and an already-built analyzer.
    #[must_use]
    pub fn new(config: Arc<AppConfig>, analyzer: Arc<dyn StressAnalyzer>) -> Self {
        let responder = CannedResponder::new(
            Duration::from_millis(config.chat.reply_delay_ms),
            Duration::from_millis(config.chat.reply_jitter_ms),
        );
        Self {
            sessions: SessionStore::new(),
            analyzer,
            responder,
            config,
        }
    }
}
