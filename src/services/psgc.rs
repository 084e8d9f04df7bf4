//! Philippine Standard Geographic Code lookups, used for address dropdowns.
//! Read-only; the hierarchy is province → city/municipality → barangay.

use crate::api::ApiClient;
use crate::errors::ApiError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Province {
    pub code: String,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct City {
    pub code: String,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Barangay {
    pub code: String,
    pub name: String,
}

pub async fn provinces(api: &ApiClient) -> Result<Vec<Province>, ApiError> {
    api.get("/psgc/provinces").await
}

pub async fn cities_by_province(
    api: &ApiClient,
    province_code: &str,
) -> Result<Vec<City>, ApiError> {
    api.get(&format!("/psgc/cities/{province_code}")).await
}

pub async fn barangays_by_city(api: &ApiClient, city_code: &str) -> Result<Vec<Barangay>, ApiError> {
    api.get(&format!("/psgc/barangays/{city_code}")).await
}
