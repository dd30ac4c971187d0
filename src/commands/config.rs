use anyhow::Result;
use reqwest::Client;

use crate::{
    api::{PlanApi, PlanService},
    http::HttpClient,
};

pub struct Config<P: PlanService> {
    pub api: P,
}

impl Config<PlanApi> {
    pub fn new(api_url: Option<String>) -> Result<Self> {
        let client = Client::builder().user_agent("planr-cli").build()?;
        let api = PlanApi::new(HttpClient::new(client), api_url);

        Ok(Self { api })
    }
}
