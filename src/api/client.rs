use anyhow::Result;
use async_trait::async_trait;
use log::debug;

use crate::http::HttpClient;

use super::types::{CreatePlanRequest, Plan};

/// Default plan service URL (the backend's development address).
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlanService: Send + Sync {
    async fn create_plan(&self, goal: &str) -> Result<Plan>;
    async fn get_plan(&self, id: u64) -> Result<Plan>;
}

pub struct PlanApi {
    http: HttpClient,
    api_url: String,
}

impl PlanApi {
    #[tracing::instrument(skip(http, api_url))]
    pub fn new(http: HttpClient, api_url: Option<String>) -> Self {
        let api_url = api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self { http, api_url }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl PlanService for PlanApi {
    #[tracing::instrument(skip(self))]
    async fn create_plan(&self, goal: &str) -> Result<Plan> {
        let url = format!("{}/create-plan", self.api_url);

        debug!("Requesting plan from {}...", url);

        let request = CreatePlanRequest {
            goal: goal.to_string(),
        };
        self.http.post_json(&url, &request).await
    }

    #[tracing::instrument(skip(self))]
    async fn get_plan(&self, id: u64) -> Result<Plan> {
        let url = format!("{}/plans/{}", self.api_url, id);

        debug!("Fetching saved plan from {}...", url);

        self.http.get_json(&url).await
    }
}
