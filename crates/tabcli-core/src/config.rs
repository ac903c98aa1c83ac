//! Configuration loaded from the process environment.
//!
//! Credentials are read once at startup (a `.env` file is honored by the
//! binary) and never written anywhere. The only thing this tool persists is
//! the session record under the user cache directory.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application name used for the cache directory path
const APP_NAME: &str = "tabcli";

/// Session file name in the cache directory
const SESSION_FILE: &str = "session.json";

/// Personal access token credentials and the server to use them against.
/// Immutable for the process lifetime.
#[derive(Clone)]
pub struct Credentials {
    /// Server base URL, no trailing slash
    pub server_url: String,
    /// Site content URL; empty string selects the default site
    pub site_content_url: String,
    pub pat_name: String,
    pub pat_secret: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        let server_url = env::var("TABLEAU_SERVER_URL")
            .context("TABLEAU_SERVER_URL is not set")?;
        let pat_name = env::var("TABLEAU_PAT_NAME")
            .context("TABLEAU_PAT_NAME is not set")?;
        let pat_secret = env::var("TABLEAU_PAT_SECRET")
            .context("TABLEAU_PAT_SECRET is not set")?;
        let site_content_url = env::var("TABLEAU_SITE_ID").unwrap_or_default();

        Ok(Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            site_content_url,
            pat_name,
            pat_secret,
        })
    }
}

/// Default location of the persisted session record:
/// `<user cache dir>/tabcli/session.json`
pub fn session_path() -> Result<PathBuf> {
    let cache_dir = dirs::cache_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
    Ok(cache_dir.join(APP_NAME).join(SESSION_FILE))
}
