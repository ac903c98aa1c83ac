//! Wire and output types for the REST API.
//!
//! Each resource module pairs the server's nested envelope shapes
//! (`Deserialize`) with the flat structs the CLI prints (`Serialize`).
//! The server returns a bare object instead of a one-element array for
//! singleton collections; `one_or_many` normalizes that.

pub mod permission;
pub mod project;
pub mod site;
pub mod task;
pub mod workbook;

pub use permission::{GranteeSummary, PermissionChange, PermissionList, PermissionsResponse};
pub use project::{ProjectList, ProjectSummary, ProjectsResponse};
pub use site::{SiteList, SiteSummary, SitesResponse};
pub use task::{JobResponse, JobSummary, TaskList, TaskSummary, TasksResponse};
pub use workbook::{WorkbookDetails, WorkbookList, WorkbookResponse, WorkbookSummary, WorkbooksResponse};

use serde::{Deserialize, Deserializer};

/// A `{id, name}` reference nested inside other resources. Either field can
/// be missing depending on the endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedRef {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Accept either a JSON array or a single bare object, and a missing field
/// (combined with `#[serde(default)]`) as an empty list.
pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
    }

    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
    })
}

// ============================================================================
// Tests
// ============================================================================
