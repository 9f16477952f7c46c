use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::models::{
    Priority,
    ids::{MemberId, ProjectId, TaskId},
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Id of the task, never changes once assigned
    pub id: TaskId,
    /// What has to be done
    pub description: String,
    /// Project the task belongs to. Removing the project removes the task
    pub project_id: ProjectId,
    /// Current state of the task
    pub status: TaskStatus,
    /// Urgency of the task
    pub priority: Priority,
    /// Member the task is assigned to, `None` when unassigned
    pub assignee_id: Option<MemberId>,
    /// Day the task is due
    pub deadline: Date,
}

labelled_enum! {
    TaskStatus ("task status", default = Pending) {
        Pending => "Pending" | "Pendiente",
        InProgress => "In progress" | "En progreso",
        Completed => "Completed" | "Completado",
        Blocked => "Blocked" | "Bloqueado",
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Pendiente", TaskStatus::Pending)]
    #[case("in progress", TaskStatus::InProgress)]
    #[case("BLOCKED", TaskStatus::Blocked)]
    fn test_status_labels(#[case] input: &str, #[case] expected: TaskStatus) {
        assert_eq!(input.parse::<TaskStatus>().unwrap(), expected);
    }

    #[rstest]
    #[case("Alta", Priority::High)]
    #[case("Urgente", Priority::Urgent)]
    #[case("media", Priority::Medium)]
    #[case("low", Priority::Low)]
    fn test_priority_accepts_dashboard_labels(#[case] input: &str, #[case] expected: Priority) {
        assert_eq!(input.parse::<Priority>().unwrap(), expected);
    }
}
