//! Course records.

use super::ResourceClient;
use crate::api::ApiClient;
use crate::errors::ApiError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Course {
    pub id: u64,
    pub name: String,
    pub college_id: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CourseDraft {
    pub name: String,
    pub college_id: u64,
}

#[must_use]
pub fn courses(api: &Arc<ApiClient>) -> ResourceClient<Course> {
    ResourceClient::new(api.clone(), "courses")
}

/// Courses offered by one college, for dependent dropdowns.
pub async fn by_college(api: &ApiClient, college_id: u64) -> Result<Vec<Course>, ApiError> {
    api.get(&format!("/colleges/{college_id}/courses")).await
}
