use jiff::civil::Date;
use tracing::{info, warn};

use crate::{
    models::{
        ids::{MemberId, ProjectId},
        member::{Member, Role},
        store::Store,
    },
    services::{EntityKind, StoreError, parse_date, require_text},
};

/// Editable copy of a member's fields. `birthdate` is kept as typed by the
/// user and parsed on save.
#[derive(Debug, Clone)]
pub struct MemberParameters {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub position: String,
    pub birthdate: String,
    pub phone: String,
    pub project_id: Option<ProjectId>,
    pub is_active: bool,
}

impl Default for MemberParameters {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            role: Role::default(),
            position: String::new(),
            birthdate: String::new(),
            phone: String::new(),
            project_id: None,
            is_active: true,
        }
    }
}

impl MemberParameters {
    pub fn from_member(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            email: member.email.clone(),
            role: member.role,
            position: member.position.clone(),
            birthdate: member.birthdate.to_string(),
            phone: member.phone.clone(),
            project_id: member.project_id.clone(),
            is_active: member.is_active,
        }
    }
}

fn validate(store: &Store, parameters: &MemberParameters) -> Result<Date, StoreError> {
    require_text("name", &parameters.name)?;
    require_text("email", &parameters.email)?;
    require_text("position", &parameters.position)?;
    if let Some(project_id) = &parameters.project_id
        && store.get_project(project_id).is_none()
    {
        return Err(StoreError::Validation {
            field: "project",
            reason: format!("project '{}' does not exist", project_id),
        });
    }
    parse_date("birthdate", &parameters.birthdate)
}

fn build(user_id: MemberId, birthdate: Date, parameters: MemberParameters) -> Member {
    Member {
        user_id,
        name: parameters.name,
        email: parameters.email,
        role: parameters.role,
        position: parameters.position,
        birthdate,
        phone: parameters.phone,
        project_id: parameters.project_id,
        is_active: parameters.is_active,
    }
}

pub fn create_member(store: &mut Store, parameters: MemberParameters) -> Result<Member, StoreError> {
    let birthdate =
        validate(store, &parameters).inspect_err(|e| warn!(error = %e, "member rejected"))?;

    let member = build(store.next_member_id(), birthdate, parameters);

    info!(user_id = %member.user_id, name = %member.name, "member created");

    store.add_member(member.clone());

    Ok(member)
}

/// Replaces every field of the member except its id.
pub fn update_member(
    store: &mut Store,
    id: &MemberId,
    parameters: MemberParameters,
) -> Result<Member, StoreError> {
    let birthdate = validate(store, &parameters)
        .inspect_err(|e| warn!(user_id = %id, error = %e, "member update rejected"))?;

    let member = store
        .get_member_mut(id)
        .ok_or_else(|| StoreError::not_found(EntityKind::Member, id))?;

    *member = build(id.clone(), birthdate, parameters);

    info!(user_id = %id, "member updated");

    Ok(member.clone())
}

#[derive(Debug)]
pub struct DeleteMemberResult {
    pub member: Member,
    pub unassigned_tasks_count: usize,
}

/// Removes a member, unassigning every task that pointed at them and
/// dropping them from project team lists.
pub fn delete_member(store: &mut Store, id: &MemberId) -> Result<DeleteMemberResult, StoreError> {
    let member = store.remove_member(id).ok_or_else(|| {
        warn!(user_id = %id, "delete of unknown member");
        StoreError::not_found(EntityKind::Member, id)
    })?;

    let mut unassigned_tasks_count = 0;
    for task in store.tasks_mut() {
        if task.assignee_id.as_ref() == Some(id) {
            task.assignee_id = None;
            unassigned_tasks_count += 1;
        }
    }

    for project in store.projects_mut() {
        project.team_member_ids.retain(|member_id| member_id != id);
    }

    info!(user_id = %id, unassigned_tasks_count, "member deleted");

    Ok(DeleteMemberResult {
        member,
        unassigned_tasks_count,
    })
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::{
        models::ids::TaskId,
        services::{dashboard::resolve_assignee_name, projects::delete_project},
    };

    #[fixture]
    fn store() -> Store {
        Store::seeded()
    }

    fn parameters() -> MemberParameters {
        MemberParameters {
            name: String::from("Pedro Sánchez"),
            email: String::from("pedro@example.com"),
            role: Role::BackendDeveloper,
            position: String::from("Dev"),
            birthdate: String::from("2000-01-01"),
            phone: String::from("555-0000"),
            project_id: Some(ProjectId::from("p-003")),
            is_active: true,
        }
    }

    #[rstest]
    fn test_create_member(mut store: Store) {
        let member = create_member(&mut store, parameters()).unwrap();

        assert_eq!(member.user_id.as_str(), "u-006");
        assert_eq!(member.birthdate, jiff::civil::date(2000, 1, 1));
        assert_eq!(store.member_count(), 6);
        assert_eq!(store.get_member(&member.user_id), Some(&member));
    }

    #[rstest]
    #[case::empty_name(MemberParameters { name: String::new(), email: String::from("x@x.com"), ..parameters() }, "name")]
    #[case::empty_email(MemberParameters { email: String::from(" "), ..parameters() }, "email")]
    #[case::empty_position(MemberParameters { position: String::new(), ..parameters() }, "position")]
    #[case::missing_birthdate(MemberParameters { birthdate: String::new(), ..parameters() }, "birthdate")]
    #[case::bad_birthdate(MemberParameters { birthdate: String::from("2001-02-30"), ..parameters() }, "birthdate")]
    #[case::unknown_project(MemberParameters { project_id: Some(ProjectId::from("p-999")), ..parameters() }, "project")]
    fn test_create_member_validation(
        mut store: Store,
        #[case] input: MemberParameters,
        #[case] expected_field: &str,
    ) {
        let before = store.clone();
        match create_member(&mut store, input) {
            Err(StoreError::Validation { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("Expected validation error, got {:?}", other),
        }
        assert_eq!(store.member_count(), 5);
        assert_eq!(store, before);
    }

    #[rstest]
    fn test_update_member_replaces_record(mut store: Store) {
        let id = MemberId::from("u-003");
        let mut edit = MemberParameters::from_member(store.get_member(&id).unwrap());
        edit.is_active = true;
        edit.project_id = None;
        edit.position = String::from("Head of Design");

        let updated = update_member(&mut store, &id, edit).unwrap();

        assert_eq!(updated.user_id, id);
        assert!(updated.is_active);
        assert_eq!(updated.project_id, None);
        assert_eq!(store.get_member(&id).unwrap().position, "Head of Design");
        assert_eq!(store.member_count(), 5);
    }

    #[rstest]
    fn test_update_member_validates(mut store: Store) {
        let id = MemberId::from("u-001");
        let before = store.clone();
        let err = update_member(
            &mut store,
            &id,
            MemberParameters {
                birthdate: String::from("not a date"),
                ..parameters()
            },
        )
        .unwrap_err();
        assert!(matches!(err, StoreError::Validation { field: "birthdate", .. }));
        assert_eq!(store, before);
    }

    #[rstest]
    fn test_update_member_rejects_deleted_project(mut store: Store) {
        delete_project(&mut store, &ProjectId::from("p-003")).unwrap();
        let id = MemberId::from("u-004");
        let mut edit = MemberParameters::from_member(store.get_member(&id).unwrap());
        edit.project_id = Some(ProjectId::from("p-003"));
        let before = store.clone();

        let err = update_member(&mut store, &id, edit).unwrap_err();

        assert!(matches!(err, StoreError::Validation { field: "project", .. }));
        assert_eq!(store, before);
        assert_eq!(
            store.get_member(&id).unwrap().project_id,
            Some(ProjectId::from("p-002"))
        );
    }

    #[rstest]
    fn test_update_unknown_member(mut store: Store) {
        let before = store.clone();
        let err = update_member(&mut store, &MemberId::from("u-999"), parameters()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: EntityKind::Member, .. }));
        assert_eq!(store, before);
    }

    #[rstest]
    fn test_delete_member_unassigns_tasks(mut store: Store) {
        let id = MemberId::from("u-002");
        let result = delete_member(&mut store, &id).unwrap();

        assert_eq!(result.member.name, "Juan Pérez");
        assert_eq!(result.unassigned_tasks_count, 1);
        assert_eq!(store.get_tasks_assigned_to(&id).count(), 0);

        let task = store.get_task(&TaskId::from("t-001")).unwrap();
        assert_eq!(task.assignee_id, None);
        assert_eq!(resolve_assignee_name(&store, task.assignee_id.as_ref()), "Unassigned");

        // Other assignments untouched
        assert_eq!(
            store.get_task(&TaskId::from("t-003")).unwrap().assignee_id,
            Some(MemberId::from("u-004"))
        );
    }

    #[rstest]
    fn test_delete_member_leaves_project_teams(mut store: Store) {
        let id = MemberId::from("u-001");
        delete_member(&mut store, &id).unwrap();

        assert!(store.projects().all(|p| !p.team_member_ids.contains(&id)));
        assert_eq!(
            store.get_project(&ProjectId::from("p-001")).unwrap().team_member_ids,
            vec![MemberId::from("u-002"), MemberId::from("u-003")]
        );
        assert!(
            store
                .get_project(&ProjectId::from("p-003"))
                .unwrap()
                .team_member_ids
                .is_empty()
        );
    }

    #[rstest]
    fn test_delete_unknown_member(mut store: Store) {
        let before = store.clone();
        let err = delete_member(&mut store, &MemberId::from("u-404")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: EntityKind::Member, .. }));
        assert_eq!(store, before);
    }
}
