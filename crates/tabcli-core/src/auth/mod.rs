//! Authentication module for the cached session lifecycle.
//!
//! This module provides:
//! - `SessionData`: the persisted token record with its validity window
//! - `SessionStore`: swappable durable backing (file for production,
//!   in-memory for tests)
//! - `Authenticator`: sign-in/sign-out orchestration and the
//!   `ensure_authenticated` gate every authenticated operation goes through
//!
//! Sessions are persisted to disk and expire 240 minutes after issue,
//! matching the server's own token timeout.

pub mod authenticator;
pub mod session;
pub mod store;

pub use authenticator::{AuthState, AuthStatus, Authenticator, SignInSummary, SignOutSummary};
pub use session::{Clock, SessionData, SessionInfo, SystemClock, SESSION_TIMEOUT_MINUTES};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
