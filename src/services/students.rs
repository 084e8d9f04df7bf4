//! Student records.

use super::ResourceClient;
use crate::api::ApiClient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Student {
    pub id: u64,
    pub student_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Scholarship application status: `pending`, `approved` or `rejected`.
    pub status: String,
    pub campus_id: u64,
    pub college_id: u64,
    pub course_id: u64,
    pub year_level_id: u64,
    pub scholarship_id: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Set only on soft-deleted records.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Create/update payload; the server assigns id, status and timestamps.
#[derive(Clone, Debug, Serialize)]
pub struct StudentDraft {
    pub student_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub campus_id: u64,
    pub college_id: u64,
    pub course_id: u64,
    pub year_level_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scholarship_id: Option<u64>,
}

#[must_use]
pub fn students(api: &Arc<ApiClient>) -> ResourceClient<Student> {
    ResourceClient::new(api.clone(), "students")
}
