use crate::errors::StoreError;
use crate::models::{Project, Task};
use crate::repository::{ProjectRepository, TaskRepository};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
    pub total_projects: usize,
    /// Whole percent of tasks completed, 0 when there are no tasks.
    pub completion_rate: u32,
    /// Projects per task to two decimals, "0.00" when there are no tasks.
    pub project_to_task_ratio: String,
}

/// Fetches both collections concurrently, once.
pub async fn fetch_dashboard(
    tasks: &TaskRepository,
    projects: &ProjectRepository,
) -> Result<DashboardStats, StoreError> {
    let (tasks, projects) = tokio::try_join!(tasks.list(), projects.list())?;
    Ok(build_dashboard(&tasks, &projects))
}

pub fn build_dashboard(tasks: &[Task], projects: &[Project]) -> DashboardStats {
    let total_tasks = tasks.len();
    let completed_tasks = tasks.iter().filter(|task| task.completed).count();
    let total_projects = projects.len();

    let (completion_rate, project_to_task_ratio) = if total_tasks == 0 {
        (0, "0.00".to_string())
    } else {
        let total = total_tasks as f64;
        let rate = (completed_tasks as f64 / total * 100.0).round() as u32;
        // Half-up to cents; `{:.2}` alone rounds 0.125 to "0.12".
        let ratio = total_projects as f64 / total;
        (rate, format!("{:.2}", (ratio * 100.0).round() / 100.0))
    };

    DashboardStats {
        total_tasks,
        completed_tasks,
        pending_tasks: total_tasks - completed_tasks,
        total_projects,
        completion_rate,
        project_to_task_ratio,
    }
}

/// Groups digits in threes: `1234567` becomes `1,234,567`.
pub fn format_count(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}
