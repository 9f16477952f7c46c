use crate::models::{
    ids::{MemberId, ProjectId, TaskId},
    member::Member,
    project::Project,
    task::Task,
};

/// In-memory relational store of projects, members and tasks.
///
/// Collections keep insertion order for stable listing, except tasks where
/// the newest task is listed first. Fields are private: every mutation goes
/// through `crate::services`, which is where the referential-integrity
/// cascades live.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Store {
    projects: Vec<Project>,
    members: Vec<Member>,
    tasks: Vec<Task>,
    sequences: Sequences,
}

/// Last issued sequence number per collection
#[derive(Debug, Clone, PartialEq, Default)]
struct Sequences {
    project: u64,
    member: u64,
    task: u64,
}

impl Store {
    /// Builds a store from existing records, e.g. the seed data.
    ///
    /// Id counters start after the highest canonical id already present.
    pub fn from_parts(projects: Vec<Project>, members: Vec<Member>, tasks: Vec<Task>) -> Self {
        let sequences = Sequences {
            project: projects.iter().filter_map(|p| p.id.sequence()).max().unwrap_or(0),
            member: members.iter().filter_map(|m| m.user_id.sequence()).max().unwrap_or(0),
            task: tasks.iter().filter_map(|t| t.id.sequence()).max().unwrap_or(0),
        };

        Self {
            projects,
            members,
            tasks,
            sequences,
        }
    }

    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn get_project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    pub fn get_member(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| &m.user_id == id)
    }

    pub fn get_task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn get_tasks_for_project<'a>(
        &'a self,
        project_id: &'a ProjectId,
    ) -> impl Iterator<Item = &'a Task> {
        self.tasks.iter().filter(move |t| &t.project_id == project_id)
    }

    pub fn get_members_for_project<'a>(
        &'a self,
        project_id: &'a ProjectId,
    ) -> impl Iterator<Item = &'a Member> {
        self.members
            .iter()
            .filter(move |m| m.project_id.as_ref() == Some(project_id))
    }

    pub fn get_tasks_assigned_to<'a>(
        &'a self,
        member_id: &'a MemberId,
    ) -> impl Iterator<Item = &'a Task> {
        self.tasks
            .iter()
            .filter(move |t| t.assignee_id.as_ref() == Some(member_id))
    }

    pub(crate) fn get_project_mut(&mut self, id: &ProjectId) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| &p.id == id)
    }

    pub(crate) fn get_member_mut(&mut self, id: &MemberId) -> Option<&mut Member> {
        self.members.iter_mut().find(|m| &m.user_id == id)
    }

    pub(crate) fn get_task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| &t.id == id)
    }

    pub(crate) fn projects_mut(&mut self) -> impl Iterator<Item = &mut Project> {
        self.projects.iter_mut()
    }

    pub(crate) fn members_mut(&mut self) -> impl Iterator<Item = &mut Member> {
        self.members.iter_mut()
    }

    pub(crate) fn tasks_mut(&mut self) -> impl Iterator<Item = &mut Task> {
        self.tasks.iter_mut()
    }

    pub(crate) fn next_project_id(&mut self) -> ProjectId {
        loop {
            self.sequences.project += 1;
            let id = ProjectId::from_sequence(self.sequences.project);
            if self.get_project(&id).is_none() {
                return id;
            }
        }
    }

    pub(crate) fn next_member_id(&mut self) -> MemberId {
        loop {
            self.sequences.member += 1;
            let id = MemberId::from_sequence(self.sequences.member);
            if self.get_member(&id).is_none() {
                return id;
            }
        }
    }

    pub(crate) fn next_task_id(&mut self) -> TaskId {
        loop {
            self.sequences.task += 1;
            let id = TaskId::from_sequence(self.sequences.task);
            if self.get_task(&id).is_none() {
                return id;
            }
        }
    }

    pub(crate) fn add_project(&mut self, project: Project) {
        self.projects.push(project);
    }

    pub(crate) fn add_member(&mut self, member: Member) {
        self.members.push(member);
    }

    /// New tasks go to the top of the listing
    pub(crate) fn add_task(&mut self, task: Task) {
        self.tasks.insert(0, task);
    }

    pub(crate) fn remove_project(&mut self, id: &ProjectId) -> Option<Project> {
        let index = self.projects.iter().position(|p| &p.id == id)?;
        Some(self.projects.remove(index))
    }

    pub(crate) fn remove_member(&mut self, id: &MemberId) -> Option<Member> {
        let index = self.members.iter().position(|m| &m.user_id == id)?;
        Some(self.members.remove(index))
    }

    pub(crate) fn remove_task(&mut self, id: &TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|t| &t.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// Drops every task for which `keep` returns false, returning how many went.
    pub(crate) fn retain_tasks(&mut self, keep: impl FnMut(&Task) -> bool) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(keep);
        before - self.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_continue_after_seed() {
        let mut store = Store::seeded();
        assert_eq!(store.next_project_id().as_str(), "p-004");
        assert_eq!(store.next_member_id().as_str(), "u-006");
        assert_eq!(store.next_task_id().as_str(), "t-004");
    }

    #[test]
    fn test_ids_are_not_reused_after_removal() {
        let mut store = Store::seeded();
        let first = store.next_task_id();
        store.remove_task(&TaskId::from("t-003"));
        let second = store.next_task_id();
        assert_ne!(first, second);
        assert_eq!(second.as_str(), "t-005");
    }

    #[test]
    fn test_next_id_skips_taken_foreign_ids() {
        let mut store = Store::seeded();
        let mut task = store.get_task(&TaskId::from("t-001")).unwrap().clone();
        task.id = TaskId::from("t-004");
        store.add_task(task);
        assert_eq!(store.next_task_id().as_str(), "t-005");
    }

    #[test]
    fn test_new_tasks_are_listed_first() {
        let mut store = Store::seeded();
        let mut task = store.get_task(&TaskId::from("t-002")).unwrap().clone();
        task.id = store.next_task_id();
        store.add_task(task);
        assert_eq!(store.tasks().next().unwrap().id.as_str(), "t-004");
    }

    #[test]
    fn test_relation_accessors() {
        let store = Store::seeded();
        let p1 = ProjectId::from("p-001");
        let u2 = MemberId::from("u-002");

        let tasks: Vec<_> = store.get_tasks_for_project(&p1).map(|t| t.id.as_str()).collect();
        assert_eq!(tasks, vec!["t-001", "t-003"]);

        let members: Vec<_> = store
            .get_members_for_project(&p1)
            .map(|m| m.user_id.as_str())
            .collect();
        assert_eq!(members, vec!["u-001", "u-002", "u-003"]);

        assert_eq!(store.get_tasks_assigned_to(&u2).count(), 1);
    }
}
