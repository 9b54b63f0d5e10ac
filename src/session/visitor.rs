//! Per-visitor state and the store that holds it.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::history::seed_history;
use crate::domain::recommendations::{self, catalog};
use crate::domain::{AnalysisResult, ChatMessage, HistoryItem, Recommendation};

/// A signed-in (mock) account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub email: String,
    pub name: Option<String>,
}

impl Account {
    /// Name to greet the visitor with.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

/// A one-shot notification rendered by the next full page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub title: String,
    pub description: String,
}

impl Toast {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug)]
struct VisitorState {
    account: Option<Account>,
    chat: Vec<ChatMessage>,
    history: Vec<HistoryItem>,
    recommendations: Vec<Recommendation>,
    last_result: Option<AnalysisResult>,
    toast: Option<Toast>,
    last_activity: DateTime<Utc>,
}

impl VisitorState {
    fn fresh() -> Self {
        Self {
            account: None,
            chat: vec![ChatMessage::welcome()],
            history: seed_history(Local::now()),
            recommendations: catalog(),
            last_result: None,
            toast: None,
            last_activity: Utc::now(),
        }
    }
}

/// Everything the app remembers about one browser.
///
/// Cloning is cheap; clones share state.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    id: String,
    state: RwLock<VisitorState>,
}

impl Session {
    fn new(id: String) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                id,
                state: RwLock::new(VisitorState::fresh()),
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, VisitorState> {
        self.inner.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, VisitorState> {
        let mut guard = self
            .inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        guard.last_activity = Utc::now();
        guard
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Update the last activity timestamp.
    pub fn touch(&self) {
        drop(self.write());
    }

    // Account

    #[must_use]
    pub fn account(&self) -> Option<Account> {
        self.read().account.clone()
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.read().account.is_some()
    }

    pub fn sign_in(&self, account: Account) {
        self.write().account = Some(account);
    }

    /// Sign out. Returns whether anyone was signed in.
    pub fn sign_out(&self) -> bool {
        self.write().account.take().is_some()
    }

    // Toast

    pub fn set_toast(&self, toast: Toast) {
        self.write().toast = Some(toast);
    }

    /// Take the pending toast, clearing it.
    pub fn take_toast(&self) -> Option<Toast> {
        self.write().toast.take()
    }

    // Chat

    #[must_use]
    pub fn chat(&self) -> Vec<ChatMessage> {
        self.read().chat.clone()
    }

    pub fn push_chat(&self, message: ChatMessage) {
        self.write().chat.push(message);
    }

    // Analysis results and history

    #[must_use]
    pub fn last_result(&self) -> Option<AnalysisResult> {
        self.read().last_result.clone()
    }

    /// Remember `result` for the result view and prepend it to history.
    pub fn record_result(&self, result: AnalysisResult, note: impl Into<String>) -> HistoryItem {
        let item = HistoryItem::from_result(&result, note);
        let mut guard = self.write();
        guard.history.insert(0, item.clone());
        guard.last_result = Some(result);
        item
    }

    /// History entries, newest first.
    #[must_use]
    pub fn history(&self) -> Vec<HistoryItem> {
        self.read().history.clone()
    }

    /// The `n` most recent entries.
    #[must_use]
    pub fn recent_history(&self, n: usize) -> Vec<HistoryItem> {
        self.read().history.iter().take(n).cloned().collect()
    }

    /// Delete a history entry. Returns whether it existed.
    pub fn delete_history(&self, id: &str) -> bool {
        let mut guard = self.write();
        let before = guard.history.len();
        guard.history.retain(|item| item.id != id);
        guard.history.len() != before
    }

    // Recommendations

    #[must_use]
    pub fn recommendations(&self) -> Vec<Recommendation> {
        self.read().recommendations.clone()
    }

    /// Flip a recommendation's saved flag. `None` if the id is unknown.
    pub fn toggle_saved(&self, id: &str) -> Option<bool> {
        recommendations::toggle_saved(&mut self.write().recommendations, id)
    }

    // Expiry

    /// Check if the session has been idle longer than `timeout`.
    #[must_use]
    pub fn is_expired_with_timeout(&self, timeout: Duration) -> bool {
        let last = self.read().last_activity;
        match (Utc::now() - last).to_std() {
            Ok(idle) => idle > timeout,
            // Negative duration: clock skew.
            Err(_) => false,
        }
    }
}

/// Thread-safe store for visitor sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Session>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Session>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a session with a fresh random id.
    #[must_use]
    pub fn create(&self) -> Session {
        let session = Session::new(Uuid::new_v4().to_string());
        self.write()
            .insert(session.id().to_string(), session.clone());
        session
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Session> {
        self.read().get(id).cloned()
    }

    /// Look up `id`, or create a new session if it is unknown.
    ///
    /// Unknown ids are never adopted; the new session gets its own id.
    #[must_use]
    pub fn resolve(&self, id: Option<&str>) -> (Session, bool) {
        if let Some(session) = id.and_then(|id| self.get(id)) {
            session.touch();
            return (session, false);
        }
        (self.create(), true)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove sessions idle longer than `timeout`. Returns how many went.
    pub fn cleanup_expired_with_timeout(&self, timeout: Duration) -> usize {
        let mut guard = self.write();
        let before = guard.len();
        guard.retain(|_, session| !session.is_expired_with_timeout(timeout));
        before - guard.len()
    }
}
