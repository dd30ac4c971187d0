use anyhow::Result;
use log::{debug, warn};

use crate::api::{Plan, PlanService};
use crate::countdown::RetryController;
use crate::http::ApiError;
use crate::render::render_plan;

use super::Config;

/// Maximum number of rate-limit waits before the error is surfaced.
pub const MAX_RATE_LIMIT_WAITS: usize = 3;

/// Generate a plan for `goal` and print it as cards.
#[tracing::instrument(skip(api_url))]
pub async fn create(goal: &str, api_url: Option<String>) -> Result<()> {
    let config = Config::new(api_url)?;
    let plan = run_create(&config.api, goal).await?;
    print!("{}", render_plan(&plan));
    Ok(())
}

/// Requests a plan for `goal`. A rate-limited response starts a visible
/// one-per-second countdown; once it completes the request is replayed, up
/// to [`MAX_RATE_LIMIT_WAITS`] times.
#[tracing::instrument(skip(api))]
pub async fn run_create<P: PlanService>(api: &P, goal: &str) -> Result<Plan> {
    let goal = goal.trim();
    if goal.is_empty() {
        anyhow::bail!("Goal must not be empty.");
    }

    let mut controller = RetryController::new();
    let mut waits = 0;

    loop {
        match api.create_plan(goal).await {
            Ok(plan) => return Ok(plan),
            Err(e) => match e.downcast_ref::<ApiError>() {
                Some(ApiError::RateLimited {
                    message,
                    retry_after,
                }) if waits < MAX_RATE_LIMIT_WAITS => {
                    waits += 1;
                    warn!(
                        "Rate limited ({}), waiting before retry {}/{}",
                        message, waits, MAX_RATE_LIMIT_WAITS
                    );
                    eprintln!("Rate limited: {}", message);

                    let handle = controller.start(
                        *retry_after,
                        |remaining| eprint!("\rRetrying in {:>2}s...", remaining),
                        || eprintln!("\rRetrying now.       "),
                    );
                    handle.wait().await;

                    debug!("Countdown finished, replaying request");
                }
                _ => return Err(e),
            },
        }
    }
}
