use serde::{Deserialize, Serialize};

/// Request body for plan creation.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CreatePlanRequest {
    pub goal: String,
}

/// A single task within a plan.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub task_id: u32,
    pub task_name: String,
    pub description: String,
    pub timeline_days: u32,
    #[serde(default)]
    pub dependencies: Vec<u32>,
}

/// A generated plan: a named project broken down into tasks.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Plan {
    #[serde(default)]
    pub project_name: Option<String>,
    pub tasks: Vec<Task>,
}
