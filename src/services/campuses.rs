//! Campus records.

use super::ResourceClient;
use crate::api::ApiClient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Campus {
    pub id: u64,
    pub name: String,
    pub address: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CampusDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[must_use]
pub fn campuses(api: &Arc<ApiClient>) -> ResourceClient<Campus> {
    ResourceClient::new(api.clone(), "campuses")
}
