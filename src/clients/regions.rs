//! Indonesian administrative regions (province → regency → district)

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::error::{AgrilokaError, Result};
use crate::schemas::Region;

/// Level of the region hierarchy to list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionLevel {
    Provinces,
    /// Regencies of the given province id
    Regencies(String),
    /// Districts of the given regency id
    Districts(String),
}

impl RegionLevel {
    pub fn path(&self) -> String {
        match self {
            RegionLevel::Provinces => "provinces.json".to_string(),
            RegionLevel::Regencies(id) => format!("regencies/{}.json", id),
            RegionLevel::Districts(id) => format!("districts/{}.json", id),
        }
    }
}

pub struct RegionClient {
    client: Client,
    base_url: String,
}

impl RegionClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AgrilokaError::Internal {
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn fetch(&self, level: &RegionLevel) -> Result<Vec<Region>> {
        let url = format!("{}/{}", self.base_url, level.path());
        debug!(%url, "Fetching regions");

        let failed = |detail: String| AgrilokaError::Network {
            message: format!("Failed to fetch location data: {}", detail),
        };

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(AgrilokaError::Http {
                status: status.as_u16(),
                message: format!("Failed to fetch location data: {}", url),
            });
        }
        resp.json::<Vec<Region>>()
            .await
            .map_err(|e| failed(e.to_string()))
    }

    pub async fn provinces(&self) -> Result<Vec<Region>> {
        self.fetch(&RegionLevel::Provinces).await
    }

    pub async fn regencies(&self, province_id: &str) -> Result<Vec<Region>> {
        self.fetch(&RegionLevel::Regencies(province_id.to_string()))
            .await
    }

    pub async fn districts(&self, regency_id: &str) -> Result<Vec<Region>> {
        self.fetch(&RegionLevel::Districts(regency_id.to_string()))
            .await
    }
}
