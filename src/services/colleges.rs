//! College records.

use super::ResourceClient;
use crate::api::ApiClient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct College {
    pub id: u64,
    pub name: String,
    pub campus_id: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CollegeDraft {
    pub name: String,
    pub campus_id: u64,
}

#[must_use]
pub fn colleges(api: &Arc<ApiClient>) -> ResourceClient<College> {
    ResourceClient::new(api.clone(), "colleges")
}
