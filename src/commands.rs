use std::{thread, time::Duration};

use clap::Subcommand;
use colored::*;
use thiserror::Error;
use tracing::debug;

use crate::{
    models::{
        Priority,
        ids::{MemberId, ProjectId, TaskId},
        member::Role,
        project::{Category, Project, ProjectStatus},
        store::Store,
        task::TaskStatus,
    },
    services::{
        EntityKind, StoreError,
        dashboard::dashboard_summary,
        members::{MemberParameters, create_member, delete_member, update_member},
        projects::{ProjectParameters, create_project, delete_project, update_project},
        tasks::{
            DEFAULT_TASKS_PER_PAGE, TaskParameters, create_task, delete_task, page_tasks,
            update_task,
        },
    },
    ui,
};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Project '{0}' not found")]
    ProjectNotFound(String),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Commands that read or change the in-memory store
#[derive(Debug, Subcommand)]
pub enum DashboardCommand {
    /// Show the overview figures
    Summary {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all projects
    Projects {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCommands),

    /// List all team members
    Members {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage team members
    #[command(subcommand)]
    Member(MemberCommands),

    /// List tasks, newest first, one page at a time
    Tasks {
        /// Page to show (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Tasks per page
        #[arg(long, default_value_t = DEFAULT_TASKS_PER_PAGE)]
        per_page: usize,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCommands),
}

#[derive(Debug, Subcommand)]
pub enum ProjectCommands {
    /// Create a new project (starts planned, at 0%)
    New {
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,

        /// web, mobile, design, marketing or other
        #[arg(short, long)]
        category: Option<Category>,

        /// low, medium, high or urgent
        #[arg(short, long)]
        priority: Option<Priority>,

        /// Team member id (can be used multiple times)
        #[arg(short, long = "member", action = clap::ArgAction::Append)]
        members: Vec<String>,
    },
    /// Edit a project, omitted fields keep their value
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        status: Option<ProjectStatus>,

        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        progress: Option<u8>,

        #[arg(short, long)]
        category: Option<Category>,

        #[arg(short, long)]
        priority: Option<Priority>,

        /// Replace the team with these member ids
        #[arg(short, long = "member", action = clap::ArgAction::Append)]
        members: Vec<String>,

        /// Empty the team list
        #[arg(long, conflicts_with = "members")]
        clear_team: bool,
    },
    /// Delete a project, its tasks, and unassign its members
    Delete { id: String },
    /// Show a project by id or slug
    View { id_or_slug: String },
}

#[derive(Debug, Subcommand)]
pub enum MemberCommands {
    /// Add a team member
    New {
        name: String,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long, default_value_t = Role::FrontendDeveloper)]
        role: Role,

        #[arg(long)]
        position: Option<String>,

        /// Birthdate as YYYY-MM-DD
        #[arg(short, long)]
        birthdate: Option<String>,

        #[arg(long, default_value = "")]
        phone: String,

        /// Project the member works on
        #[arg(short, long)]
        project: Option<String>,

        /// Mark the member as away
        #[arg(long)]
        inactive: bool,
    },
    /// Edit a member, omitted fields keep their value
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        role: Option<Role>,

        #[arg(long)]
        position: Option<String>,

        #[arg(short, long)]
        birthdate: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(short, long)]
        project: Option<String>,

        /// Remove the member from their project
        #[arg(long, conflicts_with = "project")]
        unassign: bool,

        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a member and unassign their tasks
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
pub enum TaskCommands {
    /// Create a task
    New {
        description: String,

        /// Project id
        #[arg(short, long)]
        project: Option<String>,

        #[arg(short, long, default_value_t = TaskStatus::Pending)]
        status: TaskStatus,

        #[arg(long, default_value_t = Priority::Medium)]
        priority: Priority,

        /// Member id
        #[arg(short, long)]
        assignee: Option<String>,

        /// Deadline as YYYY-MM-DD
        #[arg(short, long)]
        deadline: Option<String>,
    },
    /// Edit a task, omitted fields keep their value
    Edit {
        id: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(short, long)]
        project: Option<String>,

        #[arg(short, long)]
        status: Option<TaskStatus>,

        #[arg(long)]
        priority: Option<Priority>,

        #[arg(short, long)]
        assignee: Option<String>,

        /// Remove the assignee
        #[arg(long, conflicts_with = "assignee")]
        unassign: bool,

        #[arg(short, long)]
        deadline: Option<String>,
    },
    /// Delete a task
    Delete { id: String },
}

impl DashboardCommand {
    pub fn is_mutation(&self) -> bool {
        match self {
            DashboardCommand::Project(ProjectCommands::View { .. }) => false,
            DashboardCommand::Project(_)
            | DashboardCommand::Member(_)
            | DashboardCommand::Task(_) => true,
            DashboardCommand::Summary { .. }
            | DashboardCommand::Projects { .. }
            | DashboardCommand::Members { .. }
            | DashboardCommand::Tasks { .. } => false,
        }
    }
}

fn find_project<'a>(store: &'a Store, id_or_slug: &str) -> Option<&'a Project> {
    store.get_project(&ProjectId::from(id_or_slug)).or_else(|| {
        store
            .projects()
            .find(|p| p.slug().eq_ignore_ascii_case(id_or_slug))
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CommandError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Runs one command against the store. Mutations wait `latency` first.
pub fn execute(
    store: &mut Store,
    command: DashboardCommand,
    latency: Duration,
) -> Result<(), CommandError> {
    if command.is_mutation() && !latency.is_zero() {
        debug!(?latency, "simulating latency");
        thread::sleep(latency);
    }

    match command {
        DashboardCommand::Summary { json } => {
            let summary = dashboard_summary(store, jiff::Zoned::now().date());
            if json {
                print_json(&summary)?;
            } else {
                ui::render_summary(&summary);
            }
        }
        DashboardCommand::Projects { json } => {
            let projects: Vec<_> = store.projects().collect();
            if json {
                print_json(&projects)?;
            } else if projects.is_empty() {
                println!("No projects found");
            } else {
                ui::render_view_header("Projects", store.project_count(), "project", "projects");
                for project in projects {
                    ui::render_project_card(project, store);
                }
            }
        }
        DashboardCommand::Project(command) => execute_project(store, command)?,
        DashboardCommand::Members { json } => {
            let members: Vec<_> = store.members().collect();
            if json {
                print_json(&members)?;
            } else if members.is_empty() {
                println!("No members found");
            } else {
                ui::render_view_header("Team", store.member_count(), "member", "members");
                for member in members {
                    ui::render_member_line(member, store);
                    println!();
                }
            }
        }
        DashboardCommand::Member(command) => execute_member(store, command)?,
        DashboardCommand::Tasks {
            page,
            per_page,
            json,
        } => {
            let page = page_tasks(store, page, per_page);
            if json {
                print_json(&page.tasks)?;
            } else {
                ui::render_task_page(&page, store);
            }
        }
        DashboardCommand::Task(command) => execute_task(store, command)?,
    }

    Ok(())
}

fn execute_project(store: &mut Store, command: ProjectCommands) -> Result<(), CommandError> {
    match command {
        ProjectCommands::New {
            name,
            description,
            category,
            priority,
            members,
        } => {
            let params = ProjectParameters {
                name,
                description,
                category,
                priority,
                team_member_ids: members.into_iter().map(MemberId::from).collect(),
                ..ProjectParameters::default()
            };
            let project = create_project(store, params)?;
            println!("✓ Project {} created with id {}", project.name, project.id);
        }
        ProjectCommands::Edit {
            id,
            name,
            description,
            status,
            progress,
            category,
            priority,
            members,
            clear_team,
        } => {
            let id = ProjectId::from(id);
            let current = store
                .get_project(&id)
                .ok_or_else(|| StoreError::not_found(EntityKind::Project, &id))?;

            // Edit a copy, commit it as a whole
            let mut params = ProjectParameters::from_project(current);
            if let Some(name) = name {
                params.name = name;
            }
            if let Some(description) = description {
                params.description = description;
            }
            params.status = status.or(params.status);
            params.progress = progress.or(params.progress);
            params.category = category.or(params.category);
            params.priority = priority.or(params.priority);
            if clear_team {
                params.team_member_ids.clear();
            } else if !members.is_empty() {
                params.team_member_ids = members.into_iter().map(MemberId::from).collect();
            }

            let project = update_project(store, &id, params)?;
            println!("✓ Project {} updated", project.name);
        }
        ProjectCommands::Delete { id } => {
            let result = delete_project(store, &ProjectId::from(id))?;
            println!("✓ Project deleted: {}", result.project.name);
            if result.cascaded_tasks_count > 0 {
                println!("  └─ {} task(s) also deleted", result.cascaded_tasks_count);
            }
            if result.unassigned_members_count > 0 {
                println!(
                    "  └─ {} member(s) unassigned",
                    result.unassigned_members_count
                );
            }
        }
        ProjectCommands::View { id_or_slug } => {
            let project = find_project(store, &id_or_slug).ok_or_else(|| {
                let available: Vec<_> = store.projects().map(|p| p.slug()).collect();
                if !available.is_empty() {
                    eprintln!("\nAvailable projects:");
                    for slug in available {
                        eprintln!("  - {}", slug);
                    }
                }
                CommandError::ProjectNotFound(id_or_slug.clone())
            })?;
            ui::render_project_details(project, store);
        }
    }
    Ok(())
}

fn execute_member(store: &mut Store, command: MemberCommands) -> Result<(), CommandError> {
    match command {
        MemberCommands::New {
            name,
            email,
            role,
            position,
            birthdate,
            phone,
            project,
            inactive,
        } => {
            let params = MemberParameters {
                name,
                email: email.unwrap_or_default(),
                role,
                position: position.unwrap_or_default(),
                birthdate: birthdate.unwrap_or_default(),
                phone,
                project_id: project.map(ProjectId::from),
                is_active: !inactive,
            };
            let member = create_member(store, params)?;
            println!("✓ Member {} added with id {}", member.name, member.user_id);
        }
        MemberCommands::Edit {
            id,
            name,
            email,
            role,
            position,
            birthdate,
            phone,
            project,
            unassign,
            active,
        } => {
            let id = MemberId::from(id);
            let current = store.get_member(&id).ok_or_else(|| {
                StoreError::not_found(EntityKind::Member, &id)
            })?;

            let mut params = MemberParameters::from_member(current);
            if let Some(name) = name {
                params.name = name;
            }
            if let Some(email) = email {
                params.email = email;
            }
            if let Some(role) = role {
                params.role = role;
            }
            if let Some(position) = position {
                params.position = position;
            }
            if let Some(birthdate) = birthdate {
                params.birthdate = birthdate;
            }
            if let Some(phone) = phone {
                params.phone = phone;
            }
            if unassign {
                params.project_id = None;
            } else if let Some(project) = project {
                params.project_id = Some(ProjectId::from(project));
            }
            if let Some(active) = active {
                params.is_active = active;
            }

            let member = update_member(store, &id, params)?;
            println!("✓ Member {} updated", member.name);
        }
        MemberCommands::Delete { id } => {
            let result = delete_member(store, &MemberId::from(id))?;
            println!("✓ Member deleted: {}", result.member.name);
            if result.unassigned_tasks_count > 0 {
                println!(
                    "  └─ {} task(s) now {}",
                    result.unassigned_tasks_count,
                    "Unassigned".dimmed()
                );
            }
        }
    }
    Ok(())
}

fn execute_task(store: &mut Store, command: TaskCommands) -> Result<(), CommandError> {
    match command {
        TaskCommands::New {
            description,
            project,
            status,
            priority,
            assignee,
            deadline,
        } => {
            let params = TaskParameters {
                description,
                project_id: project.map(ProjectId::from).unwrap_or_default(),
                status,
                priority,
                assignee_id: assignee.map(MemberId::from),
                deadline: deadline.unwrap_or_default(),
            };
            let task = create_task(store, params)?;
            println!("✓ Task {} created: {}", task.id, task.description);
        }
        TaskCommands::Edit {
            id,
            description,
            project,
            status,
            priority,
            assignee,
            unassign,
            deadline,
        } => {
            let id = TaskId::from(id);
            let current = store
                .get_task(&id)
                .ok_or_else(|| StoreError::not_found(EntityKind::Task, &id))?;

            let mut params = TaskParameters::from_task(current);
            if let Some(description) = description {
                params.description = description;
            }
            if let Some(project) = project {
                params.project_id = ProjectId::from(project);
            }
            if let Some(status) = status {
                params.status = status;
            }
            if let Some(priority) = priority {
                params.priority = priority;
            }
            if unassign {
                params.assignee_id = None;
            } else if let Some(assignee) = assignee {
                params.assignee_id = Some(MemberId::from(assignee));
            }
            if let Some(deadline) = deadline {
                params.deadline = deadline;
            }

            let task = update_task(store, &id, params)?;
            println!("✓ Task {} updated", task.id);
        }
        TaskCommands::Delete { id } => {
            let task = delete_task(store, &TaskId::from(id))?;
            println!("✓ Task deleted: {}", task.description);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    #[command(no_binary_name = true)]
    struct Line {
        #[command(subcommand)]
        command: DashboardCommand,
    }

    fn parse(args: &[&str]) -> DashboardCommand {
        Line::try_parse_from(args).unwrap().command
    }

    #[test]
    fn test_parses_spanish_priority() {
        let command = parse(&[
            "task", "new", "Review PR", "-p", "p-002", "--priority", "Alta", "-d", "2025-12-01",
        ]);
        match command {
            DashboardCommand::Task(TaskCommands::New { priority, .. }) => {
                assert_eq!(priority, Priority::High)
            }
            other => panic!("Unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rejects_progress_over_100() {
        assert!(Line::try_parse_from(["project", "edit", "p-001", "--progress", "120"]).is_err());
    }

    #[test]
    fn test_mutation_classification() {
        assert!(parse(&["project", "delete", "p-001"]).is_mutation());
        assert!(!parse(&["project", "view", "p-001"]).is_mutation());
        assert!(!parse(&["tasks"]).is_mutation());
    }

    #[test]
    fn test_execute_delete_project_then_view_fails() {
        let mut store = Store::seeded();
        execute(&mut store, parse(&["project", "delete", "p-001"]), Duration::ZERO).unwrap();
        let err = execute(&mut store, parse(&["project", "view", "p-001"]), Duration::ZERO)
            .unwrap_err();
        assert!(matches!(err, CommandError::ProjectNotFound(_)));
    }

    #[test]
    fn test_execute_member_without_name_is_rejected() {
        let mut store = Store::seeded();
        let err = execute(
            &mut store,
            parse(&["member", "new", "", "-e", "x@x.com", "--position", "Dev", "-b", "2000-01-01"]),
            Duration::ZERO,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CommandError::Store(StoreError::Validation { field: "name", .. })
        ));
        assert_eq!(store.member_count(), 5);
    }

    #[test]
    fn test_execute_edit_keeps_untouched_fields() {
        let mut store = Store::seeded();
        execute(
            &mut store,
            parse(&["task", "edit", "t-001", "--status", "Bloqueado"]),
            Duration::ZERO,
        )
        .unwrap();
        let task = store.get_task(&TaskId::from("t-001")).unwrap();
        assert_eq!(task.status, TaskStatus::Blocked);
        assert_eq!(task.assignee_id, Some(MemberId::from("u-002")));
        assert_eq!(task.description, "Implementar autenticación");
    }

    #[test]
    fn test_find_project_by_slug() {
        let store = Store::seeded();
        assert_eq!(
            find_project(&store, "mobile-app").map(|p| p.id.as_str()),
            Some("p-002")
        );
        assert!(find_project(&store, "unknown").is_none());
    }
}
