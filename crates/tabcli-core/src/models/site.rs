use serde::{Deserialize, Serialize};

use super::one_or_many;

#[derive(Debug, Deserialize)]
pub struct SitesResponse {
    #[serde(default)]
    pub sites: SiteItems,
}

#[derive(Debug, Default, Deserialize)]
pub struct SiteItems {
    #[serde(default, deserialize_with = "one_or_many")]
    pub site: Vec<Site>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: Option<String>,
    pub name: Option<String>,
    pub content_url: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SiteList {
    pub sites: Vec<SiteSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSummary {
    pub id: Option<String>,
    pub name: Option<String>,
    pub content_url: Option<String>,
    pub state: Option<String>,
}

impl From<SitesResponse> for SiteList {
    fn from(resp: SitesResponse) -> Self {
        Self {
            sites: resp
                .sites
                .site
                .into_iter()
                .map(|s| SiteSummary {
                    id: s.id,
                    name: s.name,
                    content_url: s.content_url,
                    state: s.state,
                })
                .collect(),
        }
    }
}
