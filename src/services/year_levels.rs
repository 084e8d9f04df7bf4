//! Year-level records.

use super::ResourceClient;
use crate::api::ApiClient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct YearLevel {
    pub id: u64,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize)]
pub struct YearLevelDraft {
    pub name: String,
}

#[must_use]
pub fn year_levels(api: &Arc<ApiClient>) -> ResourceClient<YearLevel> {
    ResourceClient::new(api.clone(), "year_levels")
}
