use anyhow::Result;
use log::debug;

use crate::api::{Plan, PlanService};
use crate::render::{render_plan, render_plan_json};

use super::Config;

/// Display a previously saved plan by id, as cards or raw JSON.
#[tracing::instrument(skip(api_url))]
pub async fn show(id: u64, json: bool, api_url: Option<String>) -> Result<()> {
    let config = Config::new(api_url)?;
    let plan = run_show(&config.api, id).await?;

    if json {
        println!("{}", render_plan_json(&plan)?);
    } else {
        print!("{}", render_plan(&plan));
    }
    Ok(())
}

#[tracing::instrument(skip(api))]
pub async fn run_show<P: PlanService>(api: &P, id: u64) -> Result<Plan> {
    debug!("Fetching plan {}", id);
    api.get_plan(id).await
}
