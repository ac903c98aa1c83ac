use serde::{Deserialize, Serialize};

use super::one_or_many;

#[derive(Debug, Deserialize)]
pub struct ProjectsResponse {
    #[serde(default)]
    pub projects: ProjectItems,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectItems {
    #[serde(default, deserialize_with = "one_or_many")]
    pub project: Vec<Project>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub parent_project_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectList {
    pub projects: Vec<ProjectSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub parent_project_id: Option<String>,
}

impl From<ProjectsResponse> for ProjectList {
    fn from(resp: ProjectsResponse) -> Self {
        Self {
            projects: resp
                .projects
                .project
                .into_iter()
                .map(|p| ProjectSummary {
                    id: p.id,
                    name: p.name,
                    description: p.description,
                    parent_project_id: p.parent_project_id,
                })
                .collect(),
        }
    }
}
