use serde::{Deserialize, Serialize};

use super::{one_or_many, NamedRef};

#[derive(Debug, Deserialize)]
pub struct WorkbooksResponse {
    #[serde(default)]
    pub workbooks: WorkbookItems,
}

#[derive(Debug, Default, Deserialize)]
pub struct WorkbookItems {
    #[serde(default, deserialize_with = "one_or_many")]
    pub workbook: Vec<Workbook>,
}

/// Envelope for a single-workbook fetch.
#[derive(Debug, Deserialize)]
pub struct WorkbookResponse {
    pub workbook: Workbook,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workbook {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub webpage_url: Option<String>,
    pub show_tabs: Option<String>,
    /// Size in megabytes; the server sends it as a string
    pub size: Option<String>,
    pub project: Option<NamedRef>,
    pub owner: Option<NamedRef>,
}

#[derive(Debug, Serialize)]
pub struct WorkbookList {
    pub workbooks: Vec<WorkbookSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkbookSummary {
    pub id: Option<String>,
    pub name: Option<String>,
    pub project_id: Option<String>,
    pub project_name: Option<String>,
    pub owner: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkbookDetails {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub project_id: Option<String>,
    pub project_name: Option<String>,
    pub owner: Option<String>,
    pub owner_id: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub webpage_url: Option<String>,
    pub show_tabs: Option<String>,
    pub size: Option<String>,
}

impl From<Workbook> for WorkbookSummary {
    fn from(w: Workbook) -> Self {
        let project = w.project.unwrap_or_default();
        let owner = w.owner.unwrap_or_default();
        Self {
            id: w.id,
            name: w.name,
            project_id: project.id,
            project_name: project.name,
            owner: owner.name,
            created_at: w.created_at,
            updated_at: w.updated_at,
        }
    }
}

impl From<WorkbooksResponse> for WorkbookList {
    fn from(resp: WorkbooksResponse) -> Self {
        Self {
            workbooks: resp
                .workbooks
                .workbook
                .into_iter()
                .map(WorkbookSummary::from)
                .collect(),
        }
    }
}

impl From<Workbook> for WorkbookDetails {
    fn from(w: Workbook) -> Self {
        let project = w.project.unwrap_or_default();
        let owner = w.owner.unwrap_or_default();
        Self {
            id: w.id,
            name: w.name,
            description: w.description,
            project_id: project.id,
            project_name: project.name,
            owner: owner.name,
            owner_id: owner.id,
            created_at: w.created_at,
            updated_at: w.updated_at,
            webpage_url: w.webpage_url,
            show_tabs: w.show_tabs,
            size: w.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_workbooks_response() {
        let json = r#"{"workbooks": {"workbook": [
            {"id": "w1", "name": "Sales", "createdAt": "2024-01-01T00:00:00Z",
             "updatedAt": "2024-02-01T00:00:00Z",
             "project": {"id": "p1", "name": "Finance"},
             "owner": {"id": "u1", "name": "ops"}}
        ]}}"#;
        let list: WorkbookList = serde_json::from_str::<WorkbooksResponse>(json)
            .expect("Failed to parse workbooks test JSON")
            .into();
        assert_eq!(list.workbooks.len(), 1);
        let wb = &list.workbooks[0];
        assert_eq!(wb.project_id.as_deref(), Some("p1"));
        assert_eq!(wb.project_name.as_deref(), Some("Finance"));
        assert_eq!(wb.owner.as_deref(), Some("ops"));
    }

    #[test]
    fn test_parse_single_workbook_as_list() {
        let json = r#"{"workbooks": {"workbook": {"id": "w1", "name": "Sales"}}}"#;
        let list: WorkbookList = serde_json::from_str::<WorkbooksResponse>(json)
            .expect("Failed to parse single-workbook test JSON")
            .into();
        assert_eq!(list.workbooks.len(), 1);
        assert!(list.workbooks[0].project_id.is_none());
    }

    #[test]
    fn test_parse_workbook_details() {
        let json = r#"{"workbook":
            {"id": "w1", "name": "Sales", "description": "FY24",
             "webpageUrl": "https://server/workbooks/1", "showTabs": "true", "size": "2",
             "project": {"id": "p1", "name": "Finance"},
             "owner": {"id": "u1", "name": "ops"}}}"#;
        let details: WorkbookDetails = serde_json::from_str::<WorkbookResponse>(json)
            .expect("Failed to parse workbook details test JSON")
            .workbook
            .into();
        assert_eq!(details.owner_id.as_deref(), Some("u1"));
        assert_eq!(details.show_tabs.as_deref(), Some("true"));
        assert_eq!(details.size.as_deref(), Some("2"));
    }
}
