use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::models::ids::{MemberId, ProjectId};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub user_id: MemberId,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Job title shown under the name
    pub position: String,
    pub birthdate: Date,
    pub phone: String,
    /// Project the member currently works on, `None` when unassigned
    pub project_id: Option<ProjectId>,
    pub is_active: bool,
}

impl Member {
    /// Initials used as avatar fallback ("María García" -> "MG")
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect()
    }
}

labelled_enum! {
    Role ("role", default = FrontendDeveloper) {
        FrontendDeveloper => "Frontend Developer",
        BackendDeveloper => "Backend Developer",
        UiUxDesigner => "UI/UX Designer",
        DevOpsEngineer => "DevOps Engineer",
        ProjectManager => "Project Manager",
    }
}
