//! Scholarship records.

use super::ResourceClient;
use crate::api::ApiClient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Scholarship {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub slots: Option<u32>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ScholarshipDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slots: Option<u32>,
}

#[must_use]
pub fn scholarships(api: &Arc<ApiClient>) -> ResourceClient<Scholarship> {
    ResourceClient::new(api.clone(), "scholarships")
}
