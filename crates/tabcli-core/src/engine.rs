//! Authenticated resource operations.
//!
//! `Engine` owns the API client and the authenticator. Every operation calls
//! `ensure_authenticated` before issuing its one request; the token is not
//! re-validated per call, so a run that outlives the timeout window surfaces
//! an Unauthorized error rather than silently re-authenticating.

use anyhow::{Context, Result};

use crate::api::ApiClient;
use crate::auth::{
    AuthStatus, Authenticator, FileSessionStore, SignInSummary, SignOutSummary, SystemClock,
};
use crate::config::{self, Credentials};
use crate::models::permission::AddPermissionRequest;
use crate::models::{
    JobResponse, JobSummary, PermissionChange, PermissionList, PermissionsResponse, ProjectList,
    ProjectsResponse, SiteList, SitesResponse, TaskList, TasksResponse, WorkbookDetails,
    WorkbookList, WorkbookResponse, WorkbooksResponse,
};

pub struct Engine {
    api: ApiClient,
    auth: Authenticator<ApiClient>,
}

impl Engine {
    /// Build an engine from environment configuration, with the session
    /// record in the user cache directory.
    pub fn from_env() -> Result<Self> {
        let credentials = Credentials::from_env()?;
        let api = ApiClient::new(&credentials.server_url)?;
        let store = FileSessionStore::new(config::session_path()?);
        let auth = Authenticator::new(
            api.clone(),
            credentials,
            Box::new(store),
            Box::new(SystemClock),
        );
        Ok(Self { api, auth })
    }

    /// Adopt or obtain a session and return its token and site id.
    async fn session(&mut self) -> Result<(String, String)> {
        self.auth.ensure_authenticated().await?;
        let state = self
            .auth
            .state()
            .context("No session held after authentication")?;
        Ok((state.token.clone(), state.site_id.clone()))
    }

    // Authentication operations

    pub async fn sign_in(&mut self) -> Result<SignInSummary> {
        Ok(self.auth.sign_in().await?)
    }

    pub async fn sign_out(&mut self) -> Result<SignOutSummary> {
        self.auth.sign_out().await
    }

    pub fn auth_status(&self) -> AuthStatus {
        self.auth.auth_status()
    }

    // Discovery operations

    /// List all sites. Server installs only; Tableau Cloud scopes tokens to
    /// one site.
    pub async fn list_sites(&mut self) -> Result<SiteList> {
        let (token, _) = self.session().await?;
        let resp: SitesResponse = self.api.get(&token, "/sites").await?;
        Ok(resp.into())
    }

    pub async fn list_projects(&mut self) -> Result<ProjectList> {
        let (token, site_id) = self.session().await?;
        let resp: ProjectsResponse = self
            .api
            .get(&token, &format!("/sites/{}/projects", site_id))
            .await?;
        Ok(resp.into())
    }

    pub async fn list_workbooks(&mut self) -> Result<WorkbookList> {
        let (token, site_id) = self.session().await?;
        let resp: WorkbooksResponse = self
            .api
            .get(&token, &format!("/sites/{}/workbooks", site_id))
            .await?;
        Ok(resp.into())
    }

    pub async fn get_workbook(&mut self, workbook_id: &str) -> Result<WorkbookDetails> {
        let (token, site_id) = self.session().await?;
        let resp: WorkbookResponse = self
            .api
            .get(&token, &format!("/sites/{}/workbooks/{}", site_id, workbook_id))
            .await?;
        Ok(resp.workbook.into())
    }

    // Extract refresh operations

    pub async fn list_extract_tasks(&mut self) -> Result<TaskList> {
        let (token, site_id) = self.session().await?;
        let resp: TasksResponse = self
            .api
            .get(&token, &format!("/sites/{}/tasks/extractRefreshes", site_id))
            .await?;
        Ok(resp.into())
    }

    pub async fn run_extract_refresh(&mut self, task_id: &str) -> Result<JobSummary> {
        let (token, site_id) = self.session().await?;
        let resp: JobResponse = self
            .api
            .post(
                &token,
                &format!("/sites/{}/tasks/extractRefreshes/{}/runNow", site_id, task_id),
            )
            .await?;
        Ok(resp.into())
    }

    // Permission operations

    pub async fn get_workbook_permissions(&mut self, workbook_id: &str) -> Result<PermissionList> {
        let (token, site_id) = self.session().await?;
        let resp: PermissionsResponse = self
            .api
            .get(
                &token,
                &format!("/sites/{}/workbooks/{}/permissions", site_id, workbook_id),
            )
            .await?;
        Ok(resp.into())
    }

    pub async fn add_workbook_permission(
        &mut self,
        workbook_id: &str,
        user_id: &str,
        capability: &str,
        mode: &str,
    ) -> Result<PermissionChange> {
        let (token, site_id) = self.session().await?;
        let payload = AddPermissionRequest::for_user(user_id, capability, mode);
        let data: serde_json::Value = self
            .api
            .put(
                &token,
                &format!("/sites/{}/workbooks/{}/permissions", site_id, workbook_id),
                &payload,
            )
            .await?;
        Ok(PermissionChange {
            message: "Permission added successfully".to_string(),
            data: Some(data),
        })
    }

    pub async fn delete_workbook_permission(
        &mut self,
        workbook_id: &str,
        user_id: &str,
        capability: &str,
        mode: &str,
    ) -> Result<PermissionChange> {
        let (token, site_id) = self.session().await?;
        self.api
            .delete(
                &token,
                &format!(
                    "/sites/{}/workbooks/{}/permissions/users/{}/{}/{}",
                    site_id, workbook_id, user_id, capability, mode
                ),
            )
            .await?;
        Ok(PermissionChange {
            message: "Permission deleted successfully".to_string(),
            data: None,
        })
    }
}
