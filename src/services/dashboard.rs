use jiff::{ToSpan, civil::Date};
use serde::Serialize;

use crate::models::{
    ids::{MemberId, ProjectId},
    member::Member,
    store::Store,
    task::{Task, TaskStatus},
};

pub const UNASSIGNED: &str = "Unassigned";

/// Hours credited per completed task in the summary
pub const HOURS_PER_COMPLETED_TASK: usize = 4;

/// Window used for the "new projects" figure of the summary
pub const RECENT_PROJECT_DAYS: i64 = 30;

pub fn count_tasks_by_status(store: &Store, status: TaskStatus) -> usize {
    store.tasks().filter(|t| t.status == status).count()
}

pub fn count_active_members(store: &Store) -> usize {
    store.members().filter(|m| m.is_active).count()
}

/// Projects created strictly after `date`
pub fn count_projects_created_since(store: &Store, date: Date) -> usize {
    store.projects().filter(|p| p.created_at > date).count()
}

pub fn list_tasks_for_project<'a>(store: &'a Store, project_id: &'a ProjectId) -> Vec<&'a Task> {
    store.get_tasks_for_project(project_id).collect()
}

pub fn list_members_for_project<'a>(
    store: &'a Store,
    project_id: &'a ProjectId,
) -> Vec<&'a Member> {
    store.get_members_for_project(project_id).collect()
}

/// Members named on the project card that still exist.
pub fn team_for_project<'a>(store: &'a Store, project_id: &ProjectId) -> Vec<&'a Member> {
    store
        .get_project(project_id)
        .map(|project| {
            project
                .team_member_ids
                .iter()
                .filter_map(|id| store.get_member(id))
                .collect()
        })
        .unwrap_or_default()
}

/// Display name of an assignee, `"Unassigned"` when absent or dangling.
pub fn resolve_assignee_name<'a>(store: &'a Store, user_id: Option<&MemberId>) -> &'a str {
    user_id
        .and_then(|id| store.get_member(id))
        .map(|m| m.name.as_str())
        .unwrap_or(UNASSIGNED)
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_projects: usize,
    pub projects_created_last_month: usize,
    pub completed_tasks: usize,
    pub hours_worked: usize,
    pub active_members: usize,
    pub active_unassigned_members: usize,
    pub tasks_by_status: Vec<(TaskStatus, usize)>,
}

/// Figures shown on the overview cards, recomputed on every call.
pub fn dashboard_summary(store: &Store, today: Date) -> DashboardSummary {
    let completed_tasks = count_tasks_by_status(store, TaskStatus::Completed);
    let month_ago = today
        .checked_sub(RECENT_PROJECT_DAYS.days())
        .unwrap_or(Date::MIN);

    DashboardSummary {
        total_projects: store.project_count(),
        projects_created_last_month: count_projects_created_since(store, month_ago),
        completed_tasks,
        hours_worked: completed_tasks * HOURS_PER_COMPLETED_TASK,
        active_members: count_active_members(store),
        active_unassigned_members: store
            .members()
            .filter(|m| m.is_active && m.project_id.is_none())
            .count(),
        tasks_by_status: TaskStatus::ALL
            .iter()
            .map(|&status| (status, count_tasks_by_status(store, status)))
            .collect(),
    }
}
