use jiff::civil::{Date, date};

use crate::models::{
    Priority,
    ids::{MemberId, ProjectId, TaskId},
    member::{Member, Role},
    project::{Category, Project, ProjectStatus},
    store::Store,
    task::{Task, TaskStatus},
};

impl Store {
    /// The dashboard's initial data set: 3 projects, 5 members, 3 tasks.
    pub fn seeded() -> Self {
        Store::from_parts(seed_projects(), seed_members(), seed_tasks())
    }
}

fn member_ids(ids: &[&str]) -> Vec<MemberId> {
    ids.iter().copied().map(MemberId::from).collect()
}

fn seed_projects() -> Vec<Project> {
    vec![
        Project {
            id: ProjectId::from("p-001"),
            name: String::from("E-commerce Platform"),
            description: String::from("Plataforma de comercio electrónico con Next.js"),
            status: ProjectStatus::InProgress,
            progress: 65,
            team_member_ids: member_ids(&["u-001", "u-002", "u-003"]),
            category: Category::Web,
            priority: Priority::High,
            created_at: date(2025, 10, 1),
        },
        Project {
            id: ProjectId::from("p-002"),
            name: String::from("Mobile App"),
            description: String::from("Aplicación móvil con React Native"),
            status: ProjectStatus::InReview,
            progress: 90,
            team_member_ids: member_ids(&["u-004", "u-005"]),
            category: Category::Mobile,
            priority: Priority::Medium,
            created_at: date(2025, 9, 15),
        },
        Project {
            id: ProjectId::from("p-003"),
            name: String::from("Design System"),
            description: String::from("Librería de componentes reutilizables"),
            status: ProjectStatus::Completed,
            progress: 100,
            team_member_ids: member_ids(&["u-001"]),
            category: Category::Design,
            priority: Priority::Low,
            created_at: date(2025, 8, 10),
        },
    ]
}

fn seed_members() -> Vec<Member> {
    let member = |id: &str,
                  name: &str,
                  email: &str,
                  role: Role,
                  position: &str,
                  birthdate: Date,
                  phone: &str,
                  project: &str,
                  is_active: bool| Member {
        user_id: MemberId::from(id),
        name: name.to_string(),
        email: email.to_string(),
        role,
        position: position.to_string(),
        birthdate,
        phone: phone.to_string(),
        project_id: Some(ProjectId::from(project)),
        is_active,
    };

    vec![
        member(
            "u-001",
            "María García",
            "maria@example.com",
            Role::FrontendDeveloper,
            "Líder de Frontend",
            date(1995, 5, 20),
            "555-1234",
            "p-001",
            true,
        ),
        member(
            "u-002",
            "Juan Pérez",
            "juan@example.com",
            Role::BackendDeveloper,
            "Ingeniero de API",
            date(1990, 11, 10),
            "555-5678",
            "p-001",
            true,
        ),
        member(
            "u-003",
            "Ana López",
            "ana@example.com",
            Role::UiUxDesigner,
            "Diseñadora Principal",
            date(1998, 1, 25),
            "555-9012",
            "p-001",
            false,
        ),
        member(
            "u-004",
            "Carlos Ruiz",
            "carlos@example.com",
            Role::DevOpsEngineer,
            "Arquitecto Cloud",
            date(1985, 7, 3),
            "555-3456",
            "p-002",
            true,
        ),
        member(
            "u-005",
            "Laura Martínez",
            "laura@example.com",
            Role::ProjectManager,
            "Gerente de Proyectos",
            date(1992, 3, 15),
            "555-7890",
            "p-002",
            true,
        ),
    ]
}

fn seed_tasks() -> Vec<Task> {
    vec![
        Task {
            id: TaskId::from("t-001"),
            description: String::from("Implementar autenticación"),
            project_id: ProjectId::from("p-001"),
            status: TaskStatus::InProgress,
            priority: Priority::High,
            assignee_id: Some(MemberId::from("u-002")),
            deadline: date(2025, 11, 15),
        },
        Task {
            id: TaskId::from("t-002"),
            description: String::from("Diseñar pantalla de perfil"),
            project_id: ProjectId::from("p-002"),
            status: TaskStatus::Pending,
            priority: Priority::Medium,
            assignee_id: Some(MemberId::from("u-003")),
            deadline: date(2025, 11, 20),
        },
        Task {
            id: TaskId::from("t-003"),
            description: String::from("Configurar CI/CD"),
            project_id: ProjectId::from("p-001"),
            status: TaskStatus::Completed,
            priority: Priority::Low,
            assignee_id: Some(MemberId::from("u-004")),
            deadline: date(2025, 11, 10),
        },
    ]
}
