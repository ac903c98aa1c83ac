use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::api::{AuthError, SignInApi};
use crate::config::Credentials;

use super::session::{Clock, SessionData};
use super::store::SessionStore;
use super::SessionInfo;

/// The in-memory copy of the session, owned by one process invocation.
/// Set once by cache adoption or sign-in; not re-validated per call.
#[derive(Debug, Clone)]
pub struct AuthState {
    pub token: String,
    pub site_id: String,
    pub user_id: String,
}

/// What `auth login` prints.
#[derive(Debug, Clone, Serialize)]
pub struct SignInSummary {
    pub site_id: String,
    pub user_id: String,
    pub site_name: Option<String>,
    pub user_name: Option<String>,
}

/// What `auth logout` prints.
#[derive(Debug, Serialize)]
pub struct SignOutSummary {
    pub message: String,
}

/// What `auth status` prints. `authenticated` reports that a session record
/// exists on disk; `valid` reports whether it is still inside the timeout
/// window. An expired-but-undeleted record shows up as
/// `authenticated: true, valid: false`.
#[derive(Debug, Serialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    #[serde(flatten)]
    pub session: Option<SessionInfo>,
}

/// Session lifecycle orchestration: adopt a valid cached session when one
/// exists, otherwise sign in; persist on success; clear on sign-out.
pub struct Authenticator<A> {
    api: A,
    credentials: Credentials,
    store: Box<dyn SessionStore>,
    clock: Box<dyn Clock>,
    state: Option<AuthState>,
}

impl<A: SignInApi> Authenticator<A> {
    pub fn new(
        api: A,
        credentials: Credentials,
        store: Box<dyn SessionStore>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            api,
            credentials,
            store,
            clock,
            state: None,
        }
    }

    /// The in-memory session, if one has been adopted this run.
    pub fn state(&self) -> Option<&AuthState> {
        self.state.as_ref()
    }

    /// Make sure a usable session is held in memory, contacting the server
    /// only when no valid cached session exists. Idempotent within a run.
    pub async fn ensure_authenticated(&mut self) -> Result<(), AuthError> {
        if self.state.is_some() {
            return Ok(());
        }

        if let Some(cached) = self.store.load() {
            if cached.is_valid_at(self.clock.now()) {
                debug!(site_id = %cached.site_id, "Adopting cached session");
                self.state = Some(AuthState {
                    token: cached.token,
                    site_id: cached.site_id,
                    user_id: cached.user_id,
                });
                return Ok(());
            }
            debug!("Cached session expired");
        }

        self.sign_in().await.map(|_| ())
    }

    /// Exchange credentials for a fresh token, adopt it, and persist it.
    /// On failure nothing is adopted or persisted.
    pub async fn sign_in(&mut self) -> Result<SignInSummary, AuthError> {
        let response = self.api.sign_in(&self.credentials).await?;

        let session = SessionData {
            token: response.token.clone(),
            site_id: response.site_id.clone(),
            user_id: response.user_id.clone(),
            timestamp: self.clock.now(),
        };
        if let Err(e) = self.store.save(&session) {
            warn!(error = %e, "Failed to persist session");
        }

        self.state = Some(AuthState {
            token: response.token,
            site_id: response.site_id.clone(),
            user_id: response.user_id.clone(),
        });
        info!(site_id = %response.site_id, "Signed in");

        Ok(SignInSummary {
            site_id: response.site_id,
            user_id: response.user_id,
            site_name: response.site_name,
            user_name: response.user_name,
        })
    }

    /// Best-effort remote sign-out, then unconditional local cleanup.
    /// Succeeds even with no active session or an unreachable server.
    pub async fn sign_out(&mut self) -> Result<SignOutSummary> {
        if let Some(state) = self.state.take() {
            if let Err(e) = self.api.sign_out(&state.token).await {
                debug!(error = %e, "Remote sign-out failed, clearing local session anyway");
            }
        }
        self.store.clear()?;

        Ok(SignOutSummary {
            message: "Signed out successfully".to_string(),
        })
    }

    /// Report on the persisted session record. Presence-based: an expired
    /// record still counts as `authenticated`, flagged via `valid`.
    pub fn auth_status(&self) -> AuthStatus {
        match self.store.load() {
            None => AuthStatus {
                authenticated: false,
                valid: None,
                session: None,
            },
            Some(session) => {
                let now = self.clock.now();
                AuthStatus {
                    authenticated: true,
                    valid: Some(session.is_valid_at(now)),
                    session: Some(session.info_at(now)),
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
