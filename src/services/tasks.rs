use jiff::civil::Date;
use tracing::{info, warn};

use crate::{
    models::{
        Priority,
        ids::{MemberId, ProjectId, TaskId},
        store::Store,
        task::{Task, TaskStatus},
    },
    services::{EntityKind, StoreError, parse_date, require_text},
};

/// Editable copy of a task's fields. `deadline` is kept as typed and parsed on save.
#[derive(Debug, Clone, Default)]
pub struct TaskParameters {
    pub description: String,
    pub project_id: ProjectId,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assignee_id: Option<MemberId>,
    pub deadline: String,
}

impl TaskParameters {
    pub fn from_task(task: &Task) -> Self {
        Self {
            description: task.description.clone(),
            project_id: task.project_id.clone(),
            status: task.status,
            priority: task.priority,
            assignee_id: task.assignee_id.clone(),
            deadline: task.deadline.to_string(),
        }
    }
}

// The referenced project is only checked for presence: callers pick it from
// the live project list, so existence is their precondition. An assignee must
// be a current member.
fn validate(store: &Store, parameters: &TaskParameters) -> Result<Date, StoreError> {
    require_text("description", &parameters.description)?;
    require_text("project", parameters.project_id.as_str())?;
    if let Some(assignee_id) = &parameters.assignee_id
        && store.get_member(assignee_id).is_none()
    {
        return Err(StoreError::Validation {
            field: "assignee",
            reason: format!("member '{}' does not exist", assignee_id),
        });
    }
    parse_date("deadline", &parameters.deadline)
}

fn build(id: TaskId, deadline: Date, parameters: TaskParameters) -> Task {
    Task {
        id,
        description: parameters.description,
        project_id: parameters.project_id,
        status: parameters.status,
        priority: parameters.priority,
        assignee_id: parameters.assignee_id,
        deadline,
    }
}

pub fn create_task(store: &mut Store, parameters: TaskParameters) -> Result<Task, StoreError> {
    let deadline =
        validate(store, &parameters).inspect_err(|e| warn!(error = %e, "task rejected"))?;

    let task = build(store.next_task_id(), deadline, parameters);

    info!(task_id = %task.id, project_id = %task.project_id, "task created");

    store.add_task(task.clone());

    Ok(task)
}

/// Replaces every field of the task except its id.
pub fn update_task(
    store: &mut Store,
    id: &TaskId,
    parameters: TaskParameters,
) -> Result<Task, StoreError> {
    let deadline = validate(store, &parameters)
        .inspect_err(|e| warn!(task_id = %id, error = %e, "task update rejected"))?;

    let task = store
        .get_task_mut(id)
        .ok_or_else(|| StoreError::not_found(EntityKind::Task, id))?;

    *task = build(id.clone(), deadline, parameters);

    info!(task_id = %id, status = %task.status, "task updated");

    Ok(task.clone())
}

/// Tasks are leaves of the reference graph, deleting one has no cascades.
pub fn delete_task(store: &mut Store, id: &TaskId) -> Result<Task, StoreError> {
    let task = store.remove_task(id).ok_or_else(|| {
        warn!(task_id = %id, "delete of unknown task");
        StoreError::not_found(EntityKind::Task, id)
    })?;

    info!(task_id = %id, "task deleted");

    Ok(task)
}

/// One page of the task listing.
#[derive(Debug)]
pub struct TaskPage<'a> {
    pub tasks: Vec<&'a Task>,
    /// 1-based page number that was requested
    pub page: usize,
    pub total_pages: usize,
    pub total_tasks: usize,
}

pub const DEFAULT_TASKS_PER_PAGE: usize = 5;

/// Slices the task listing into pages of `per_page`. Pages are 1-based;
/// a page past the end comes back empty.
pub fn page_tasks(store: &Store, page: usize, per_page: usize) -> TaskPage<'_> {
    let per_page = per_page.max(1);
    let total_tasks = store.task_count();
    let total_pages = total_tasks.div_ceil(per_page);
    let start = page.saturating_sub(1).saturating_mul(per_page);

    let tasks = if page == 0 {
        Vec::new()
    } else {
        store.tasks().skip(start).take(per_page).collect()
    };

    TaskPage {
        tasks,
        page,
        total_pages,
        total_tasks,
    }
}
