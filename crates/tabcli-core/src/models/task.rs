use serde::{Deserialize, Serialize};

use super::{one_or_many, NamedRef};

#[derive(Debug, Deserialize)]
pub struct TasksResponse {
    #[serde(default)]
    pub tasks: TaskItems,
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskItems {
    #[serde(default, deserialize_with = "one_or_many")]
    pub task: Vec<Task>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub extract_refresh: Option<ExtractRefresh>,
    pub schedule: Option<NamedRef>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRefresh {
    pub id: Option<String>,
    pub priority: Option<i64>,
    #[serde(rename = "type")]
    pub refresh_type: Option<String>,
    pub workbook: Option<NamedRef>,
    pub datasource: Option<NamedRef>,
}

#[derive(Debug, Serialize)]
pub struct TaskList {
    pub tasks: Vec<TaskSummary>,
}

#[derive(Debug, Serialize)]
pub struct TaskSummary {
    pub id: Option<String>,
    pub priority: Option<i64>,
    #[serde(rename = "type")]
    pub refresh_type: Option<String>,
    /// Workbook id, for workbook-extract tasks
    pub workbook: Option<String>,
    /// Data source id, for datasource-extract tasks
    pub datasource: Option<String>,
    pub schedule: Option<String>,
}

impl From<TasksResponse> for TaskList {
    fn from(resp: TasksResponse) -> Self {
        Self {
            tasks: resp
                .tasks
                .task
                .into_iter()
                .map(|t| {
                    let refresh = t.extract_refresh.unwrap_or_default();
                    TaskSummary {
                        id: refresh.id,
                        priority: refresh.priority,
                        refresh_type: refresh.refresh_type,
                        workbook: refresh.workbook.and_then(|w| w.id),
                        datasource: refresh.datasource.and_then(|d| d.id),
                        schedule: t.schedule.and_then(|s| s.name),
                    }
                })
                .collect(),
        }
    }
}

/// Envelope for the async job created by a run-now request.
#[derive(Debug, Deserialize)]
pub struct JobResponse {
    #[serde(default)]
    pub job: Job,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Option<String>,
    pub mode: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub job_id: Option<String>,
    pub mode: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub created_at: Option<String>,
}

impl From<JobResponse> for JobSummary {
    fn from(resp: JobResponse) -> Self {
        Self {
            job_id: resp.job.id,
            mode: resp.job.mode,
            job_type: resp.job.job_type,
            created_at: resp.job.created_at,
        }
    }
}
