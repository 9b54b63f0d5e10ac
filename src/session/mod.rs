//! Per-visitor session state.
//!
//! Each browser gets an in-memory [`Session`] identified by a cookie. The
//! session holds what the views need between requests: the mock account,
//! chat transcript, history, saved recommendations, the last analysis
//! result and a pending toast. Nothing is persisted.
//!
//! # Example
//!
//! ```rust
//! use stressbot::session::SessionStore;
//!
//! let store = SessionStore::new();
//! let session = store.create();
//! assert_eq!(session.history().len(), 5);
//! assert!(!session.is_signed_in());
//! ```

mod middleware;
mod visitor;

pub use middleware::{session_middleware, spawn_cleanup};
pub use visitor::{Account, Session, SessionStore, Toast};
