//! Client for the plan service JSON API.

mod client;
mod types;

#[cfg(test)]
pub use client::MockPlanService;
pub use client::{DEFAULT_API_URL, PlanApi, PlanService};
pub use types::{CreatePlanRequest, Plan, Task};
