//! Domain service façades over the records API. Each resource gets the same
//! nine operations through a shared [`ResourceClient`]; the per-resource
//! modules contribute the typed models and endpoint names. No caching, no
//! validation, no error handling: failures propagate to the caller, and
//! auth failures are already handled by the adapter.

pub mod campuses;
pub mod colleges;
pub mod courses;
pub mod psgc;
pub mod scholarships;
pub mod students;
pub mod year_levels;

use crate::api::ApiClient;
use crate::errors::ApiError;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::{marker::PhantomData, sync::Arc};

/// Filter parameters for paginated listings.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ListParams {
    #[must_use]
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }
}

/// Laravel-style pagination envelope returned by listing endpoints.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub current_page: u32,
    pub per_page: u32,
    pub total: u64,
    pub last_page: u32,
}

/// Thin CRUD façade for one resource collection.
pub struct ResourceClient<T> {
    api: Arc<ApiClient>,
    resource: &'static str,
    _entity: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> ResourceClient<T> {
    pub(crate) fn new(api: Arc<ApiClient>, resource: &'static str) -> Self {
        Self {
            api,
            resource,
            _entity: PhantomData,
        }
    }

    /// Filtered, paginated listing of live records.
    pub async fn get_all(&self, params: &ListParams) -> Result<Paginated<T>, ApiError> {
        self.api
            .get_with_query(&format!("/{}", self.resource), params)
            .await
    }

    /// Unfiltered lightweight list, for dropdowns.
    pub async fn get_all_dropdown(&self) -> Result<Vec<T>, ApiError> {
        self.api.get(&format!("/{}-all", self.resource)).await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<T, ApiError> {
        self.api.get(&format!("/{}/{id}", self.resource)).await
    }

    pub async fn create<P: Serialize + ?Sized>(&self, payload: &P) -> Result<T, ApiError> {
        self.api.post(&format!("/{}", self.resource), payload).await
    }

    pub async fn update<P: Serialize + ?Sized>(&self, id: u64, payload: &P) -> Result<T, ApiError> {
        self.api
            .put(&format!("/{}/{id}", self.resource), payload)
            .await
    }

    /// Soft delete: the record moves to the trash listing.
    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.api.delete(&format!("/{}/{id}", self.resource)).await
    }

    /// Filtered, paginated listing of soft-deleted records.
    pub async fn get_trash(&self, params: &ListParams) -> Result<Paginated<T>, ApiError> {
        self.api
            .get_with_query(&format!("/{}-trash", self.resource), params)
            .await
    }

    /// Brings a soft-deleted record back.
    pub async fn restore(&self, id: u64) -> Result<(), ApiError> {
        self.api
            .post_empty(&format!("/{}-restore/{id}", self.resource))
            .await
    }

    /// Irreversible removal of a soft-deleted record.
    pub async fn force_delete(&self, id: u64) -> Result<(), ApiError> {
        self.api
            .delete(&format!("/{}-force-delete/{id}", self.resource))
            .await
    }
}
