//! Terminal rendering of plans as task cards.

use anyhow::Result;

use crate::api::{Plan, Task};

/// Renders a plan as text cards, one per task, with a trailing summary.
pub fn render_plan(plan: &Plan) -> String {
    let mut out = String::new();

    let name = plan.project_name.as_deref().unwrap_or("Untitled Plan");
    out.push_str(&format!("Project: {}\n", name));

    for task in &plan.tasks {
        out.push('\n');
        render_task(&mut out, task);
    }

    let total_days: u32 = plan.tasks.iter().map(|t| t.timeline_days).sum();
    out.push_str(&format!(
        "\n{} task(s), {} day(s) total\n",
        plan.tasks.len(),
        total_days
    ));

    out
}

fn render_task(out: &mut String, task: &Task) {
    let deps = if task.dependencies.is_empty() {
        "none".to_string()
    } else {
        task.dependencies
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    out.push_str(&format!(
        "[{}] {} ({} day(s))\n    {}\n    depends on: {}\n",
        task.task_id, task.task_name, task.timeline_days, task.description, deps
    ));
}

/// Renders the raw plan JSON, pretty-printed.
pub fn render_plan_json(plan: &Plan) -> Result<String> {
    Ok(serde_json::to_string_pretty(plan)?)
}
