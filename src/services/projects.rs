use tracing::{info, warn};

use crate::{
    models::{
        Priority,
        ids::{MemberId, ProjectId},
        project::{Category, Project, ProjectStatus},
        store::Store,
    },
    services::{EntityKind, StoreError, require, require_text},
};

/// Editable copy of a project's fields, committed to the store on save.
#[derive(Debug, Clone, Default)]
pub struct ProjectParameters {
    pub name: String,
    pub description: String,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub team_member_ids: Vec<MemberId>,
    /// Ignored on creation, new projects always start as planned
    pub status: Option<ProjectStatus>,
    /// Ignored on creation, new projects always start at zero
    pub progress: Option<u8>,
}

impl ProjectParameters {
    /// Copy of an existing project, used to prefill an edit.
    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            description: project.description.clone(),
            category: Some(project.category),
            priority: Some(project.priority),
            team_member_ids: project.team_member_ids.clone(),
            status: Some(project.status),
            progress: Some(project.progress),
        }
    }
}

struct ValidProject {
    category: Category,
    priority: Priority,
    team_member_ids: Vec<MemberId>,
}

fn validate(parameters: &ProjectParameters) -> Result<ValidProject, StoreError> {
    require_text("name", &parameters.name)?;
    let category = require("category", parameters.category)?;
    let priority = require("priority", parameters.priority)?;

    // Team is a set, keep first occurrence order
    let mut team_member_ids: Vec<MemberId> = Vec::with_capacity(parameters.team_member_ids.len());
    for id in &parameters.team_member_ids {
        if !team_member_ids.contains(id) {
            team_member_ids.push(id.clone());
        }
    }

    Ok(ValidProject {
        category,
        priority,
        team_member_ids,
    })
}

pub fn create_project(
    store: &mut Store,
    parameters: ProjectParameters,
) -> Result<Project, StoreError> {
    let valid = validate(&parameters).inspect_err(|e| warn!(error = %e, "project rejected"))?;

    let project = Project {
        id: store.next_project_id(),
        name: parameters.name,
        description: parameters.description,
        status: ProjectStatus::Planned,
        progress: 0,
        team_member_ids: valid.team_member_ids,
        category: valid.category,
        priority: valid.priority,
        created_at: jiff::Zoned::now().date(),
    };

    info!(project_id = %project.id, name = %project.name, "project created");

    store.add_project(project.clone());

    Ok(project)
}

/// Replaces name, description, category, priority and team. `status` and
/// `progress` are only changed when given: unlike member and task updates,
/// `None` keeps the stored value. Id and creation date never change.
pub fn update_project(
    store: &mut Store,
    id: &ProjectId,
    parameters: ProjectParameters,
) -> Result<Project, StoreError> {
    let valid = validate(&parameters)
        .and_then(|valid| match parameters.progress {
            Some(progress) if progress > 100 => Err(StoreError::Validation {
                field: "progress",
                reason: format!("{} is not between 0 and 100", progress),
            }),
            _ => Ok(valid),
        })
        .inspect_err(|e| warn!(project_id = %id, error = %e, "project update rejected"))?;

    let project = store
        .get_project_mut(id)
        .ok_or_else(|| StoreError::not_found(EntityKind::Project, id))?;

    project.name = parameters.name;
    project.description = parameters.description;
    project.category = valid.category;
    project.priority = valid.priority;
    project.team_member_ids = valid.team_member_ids;
    if let Some(status) = parameters.status {
        project.status = status;
    }
    if let Some(progress) = parameters.progress {
        project.progress = progress;
    }

    info!(project_id = %id, "project updated");

    Ok(project.clone())
}

#[derive(Debug)]
pub struct DeleteProjectResult {
    pub project: Project,
    pub cascaded_tasks_count: usize,
    pub unassigned_members_count: usize,
}

/// Removes a project together with its tasks and unassigns its members.
pub fn delete_project(
    store: &mut Store,
    id: &ProjectId,
) -> Result<DeleteProjectResult, StoreError> {
    let project = store.remove_project(id).ok_or_else(|| {
        warn!(project_id = %id, "delete of unknown project");
        StoreError::not_found(EntityKind::Project, id)
    })?;

    // Cascade delete: tasks cannot outlive their project
    let cascaded_tasks_count = store.retain_tasks(|t| &t.project_id != id);

    // Members stay, but lose the reference
    let mut unassigned_members_count = 0;
    for member in store.members_mut() {
        if member.project_id.as_ref() == Some(id) {
            member.project_id = None;
            unassigned_members_count += 1;
        }
    }

    info!(
        project_id = %id,
        cascaded_tasks_count,
        unassigned_members_count,
        "project deleted"
    );

    Ok(DeleteProjectResult {
        project,
        cascaded_tasks_count,
        unassigned_members_count,
    })
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::models::{ids::TaskId, task::Task};

    #[fixture]
    fn store() -> Store {
        Store::seeded()
    }

    fn parameters() -> ProjectParameters {
        ProjectParameters {
            name: String::from("Data Warehouse"),
            description: String::from("Reporting backend"),
            category: Some(Category::Other),
            priority: Some(Priority::Urgent),
            team_member_ids: vec![MemberId::from("u-004")],
            ..ProjectParameters::default()
        }
    }

    #[rstest]
    fn test_create_project_starts_planned_at_zero(mut store: Store) {
        let project = create_project(
            &mut store,
            ProjectParameters {
                status: Some(ProjectStatus::Completed),
                progress: Some(80),
                ..parameters()
            },
        )
        .unwrap();

        assert_eq!(project.status, ProjectStatus::Planned);
        assert_eq!(project.progress, 0);
        assert_eq!(project.created_at, jiff::Zoned::now().date());
        assert!(!["p-001", "p-002", "p-003"].contains(&project.id.as_str()));

        let stored = store.get_project(&project.id).unwrap();
        assert_eq!(stored, &project);
        assert_eq!(stored.name, "Data Warehouse");
        assert_eq!(stored.description, "Reporting backend");
        assert_eq!(stored.category, Category::Other);
        assert_eq!(stored.priority, Priority::Urgent);
        assert_eq!(stored.team_member_ids, vec![MemberId::from("u-004")]);
    }

    #[rstest]
    fn test_create_project_dedupes_team(mut store: Store) {
        let project = create_project(
            &mut store,
            ProjectParameters {
                team_member_ids: vec![
                    MemberId::from("u-002"),
                    MemberId::from("u-001"),
                    MemberId::from("u-002"),
                ],
                ..parameters()
            },
        )
        .unwrap();
        assert_eq!(
            project.team_member_ids,
            vec![MemberId::from("u-002"), MemberId::from("u-001")]
        );
    }

    #[rstest]
    #[case::blank_name(ProjectParameters { name: String::from("   "), ..parameters() }, "name")]
    #[case::no_category(ProjectParameters { category: None, ..parameters() }, "category")]
    #[case::no_priority(ProjectParameters { priority: None, ..parameters() }, "priority")]
    fn test_create_project_validation(
        mut store: Store,
        #[case] input: ProjectParameters,
        #[case] expected_field: &str,
    ) {
        let before = store.clone();
        match create_project(&mut store, input) {
            Err(StoreError::Validation { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("Expected validation error, got {:?}", other),
        }
        assert_eq!(store, before);
    }

    #[rstest]
    fn test_update_project_keeps_id_and_creation_date(mut store: Store) {
        let id = ProjectId::from("p-002");
        let original = store.get_project(&id).unwrap().clone();
        let mut edit = ProjectParameters::from_project(&original);
        edit.status = Some(ProjectStatus::Completed);
        edit.progress = Some(100);

        let updated = update_project(&mut store, &id, edit).unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.status, ProjectStatus::Completed);
        assert_eq!(updated.progress, 100);
    }

    #[rstest]
    fn test_update_project_rejects_progress_over_100(mut store: Store) {
        let id = ProjectId::from("p-002");
        let mut edit = ProjectParameters::from_project(store.get_project(&id).unwrap());
        edit.progress = Some(101);
        let before = store.clone();

        let err = update_project(&mut store, &id, edit).unwrap_err();

        assert!(matches!(err, StoreError::Validation { field: "progress", .. }));
        assert_eq!(store, before);
    }

    #[rstest]
    fn test_update_project_without_status_keeps_stored_values(mut store: Store) {
        let id = ProjectId::from("p-001");
        let edit = ProjectParameters {
            status: None,
            progress: None,
            ..ProjectParameters::from_project(store.get_project(&id).unwrap())
        };

        let updated = update_project(&mut store, &id, edit).unwrap();

        assert_eq!(updated.status, ProjectStatus::InProgress);
        assert_eq!(updated.progress, 65);
    }

    #[rstest]
    fn test_update_unknown_project(mut store: Store) {
        let before = store.clone();
        let err = update_project(&mut store, &ProjectId::from("p-404"), parameters()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: EntityKind::Project, .. }));
        assert_eq!(store, before);
    }

    #[rstest]
    fn test_delete_seed_project_cascades(mut store: Store) {
        let result = delete_project(&mut store, &ProjectId::from("p-001")).unwrap();

        assert_eq!(result.project.name, "E-commerce Platform");
        assert_eq!(result.cascaded_tasks_count, 2);
        assert_eq!(result.unassigned_members_count, 3);

        let projects: Vec<_> = store.projects().map(|p| p.id.as_str()).collect();
        assert_eq!(projects, vec!["p-002", "p-003"]);

        let tasks: Vec<_> = store.tasks().map(|t| t.id.as_str()).collect();
        assert_eq!(tasks, vec!["t-002"]);

        for id in ["u-001", "u-002", "u-003"] {
            assert_eq!(store.get_member(&MemberId::from(id)).unwrap().project_id, None);
        }
        for id in ["u-004", "u-005"] {
            assert_eq!(
                store.get_member(&MemberId::from(id)).unwrap().project_id,
                Some(ProjectId::from("p-002"))
            );
        }
    }

    #[rstest]
    fn test_delete_project_leaves_other_records_untouched(mut store: Store) {
        let before = store.clone();
        delete_project(&mut store, &ProjectId::from("p-002")).unwrap();

        let untouched_tasks: Vec<&Task> = before
            .tasks()
            .filter(|t| t.project_id.as_str() != "p-002")
            .collect();
        let remaining_tasks: Vec<&Task> = store.tasks().collect();
        assert_eq!(remaining_tasks, untouched_tasks);

        assert_eq!(
            store.get_project(&ProjectId::from("p-001")),
            before.get_project(&ProjectId::from("p-001"))
        );
        assert!(store.get_task(&TaskId::from("t-002")).is_none());
    }

    #[rstest]
    fn test_delete_unknown_project_changes_nothing(mut store: Store) {
        let before = store.clone();
        let err = delete_project(&mut store, &ProjectId::from("nonexistent")).unwrap_err();
        assert_eq!(
            err,
            StoreError::NotFound {
                entity: EntityKind::Project,
                id: String::from("nonexistent"),
            }
        );
        assert_eq!(store, before);
    }

    #[rstest]
    fn test_deleted_project_id_is_not_reissued(mut store: Store) {
        let created = create_project(&mut store, parameters()).unwrap();
        delete_project(&mut store, &created.id).unwrap();
        let next = create_project(&mut store, parameters()).unwrap();
        assert_ne!(created.id, next.id);
    }
}
