use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::models::{
    Priority,
    ids::{MemberId, ProjectId},
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Id of the project, never changes once assigned
    pub id: ProjectId,
    /// Name of the project
    pub name: String,
    /// Free text description
    pub description: String,
    /// Lifecycle stage of the project
    pub status: ProjectStatus,
    /// Completion percentage, 0 to 100
    pub progress: u8,
    /// Members listed on the project card. Not kept in sync with `Member::project_id`
    pub team_member_ids: Vec<MemberId>,
    /// Kind of work
    pub category: Category,
    /// Urgency of the project
    pub priority: Priority,
    /// Day the project was created
    pub created_at: Date,
}

impl Project {
    pub fn slug(&self) -> String {
        slug::slugify(&self.name)
    }
}

labelled_enum! {
    ProjectStatus ("project status", default = Planned) {
        Planned => "Planned" | "Planificado",
        InProgress => "In progress" | "En progreso",
        InReview => "In review" | "En revisión" | "En revision",
        Completed => "Completed" | "Completado",
    }
}

labelled_enum! {
    #[serde(rename_all = "lowercase")]
    Category ("category", default = Other) {
        Web => "web",
        Mobile => "mobile",
        Design => "design",
        Marketing => "marketing",
        Other => "other",
    }
}
