use colored::*;

use crate::{
    models::{
        Priority,
        member::Member,
        project::{Project, ProjectStatus},
        store::Store,
        task::{Task, TaskStatus},
    },
    services::{
        dashboard::{
            DashboardSummary, list_members_for_project, list_tasks_for_project,
            resolve_assignee_name, team_for_project,
        },
        tasks::TaskPage,
    },
    settings::Settings,
};

const PROGRESS_BAR_WIDTH: usize = 20;

/// Get the terminal width, defaulting to 80 if unavailable
fn get_terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}

/// Render a view header with title and count
pub fn render_view_header(title: &str, count: usize, singular: &str, plural_noun: &str) {
    println!(
        "\n  {} ({})\n",
        title.cyan().bold(),
        plural(count, singular, plural_noun)
    );
}

/// Render a section header (e.g., "Team", "Tasks")
pub fn render_section_header(title: &str) {
    println!("\n  ─── {} ───\n", title.bold());
}

pub fn project_status_badge(status: ProjectStatus) -> ColoredString {
    let label = format!("[{}]", status.label());
    match status {
        ProjectStatus::Completed => label.green(),
        ProjectStatus::InReview => label.yellow(),
        ProjectStatus::InProgress => label.blue(),
        ProjectStatus::Planned => label.normal(),
    }
}

pub fn task_status_badge(status: TaskStatus) -> ColoredString {
    let label = status.label();
    match status {
        TaskStatus::Completed => label.green(),
        TaskStatus::InProgress => label.blue(),
        TaskStatus::Pending => label.normal(),
        TaskStatus::Blocked => label.red().bold(),
    }
}

pub fn priority_badge(priority: Priority) -> ColoredString {
    let label = priority.label();
    match priority {
        Priority::Urgent => label.red().bold(),
        Priority::High => label.red(),
        Priority::Medium => label.yellow(),
        Priority::Low => label.dimmed(),
    }
}

/// Text progress bar such as `██████░░░░ 65%`
pub fn progress_bar(progress: u8) -> String {
    let progress = usize::from(progress.min(100));
    let filled = progress * PROGRESS_BAR_WIDTH / 100;
    format!(
        "{}{} {}%",
        "█".repeat(filled),
        "░".repeat(PROGRESS_BAR_WIDTH - filled),
        progress
    )
}

/// Render a project as a card: name, status, description, progress, team size
pub fn render_project_card(project: &Project, store: &Store) {
    println!(
        "{} {} {}  {}",
        "•".green(),
        project.name.bold(),
        format!("({})", project.id).dimmed(),
        project_status_badge(project.status)
    );
    if !project.description.is_empty() {
        println!("    {}", project.description.dimmed());
    }
    println!("    {}", progress_bar(project.progress));
    println!(
        "    {} {} {} {} {}",
        project.category.label().blue(),
        "•".dimmed(),
        priority_badge(project.priority),
        "•".dimmed(),
        plural(team_for_project(store, &project.id).len(), "member", "members").dimmed()
    );
    println!("    {}", "─".repeat(30).dimmed());
    println!();
}

/// Full project details: card plus team, assigned members and tasks
pub fn render_project_details(project: &Project, store: &Store) {
    render_project_card(project, store);
    println!(
        "    {} {}",
        "Created:".dimmed(),
        project.created_at.strftime("%b %d, %Y")
    );
    println!("    {} {}", "Slug:".dimmed(), project.slug());

    render_section_header("Team");
    let team = team_for_project(store, &project.id);
    if team.is_empty() {
        println!("    No team members listed");
    }
    for member in team {
        render_member_line(member, store);
    }

    render_section_header("Assigned members");
    let assigned = list_members_for_project(store, &project.id);
    if assigned.is_empty() {
        println!("    No members assigned");
    }
    for member in assigned {
        render_member_line(member, store);
    }

    render_section_header("Tasks");
    let tasks = list_tasks_for_project(store, &project.id);
    if tasks.is_empty() {
        println!("    No tasks");
    }
    for task in tasks {
        render_task_line(task, store);
    }
}

/// Render a member line with initials avatar, role and active badge
pub fn render_member_line(member: &Member, store: &Store) {
    let badge = if member.is_active {
        "Active".green()
    } else {
        "Away".dimmed()
    };
    let project = member
        .project_id
        .as_ref()
        .and_then(|id| store.get_project(id))
        .map(|p| p.name.as_str())
        .unwrap_or("No project");
    let task_count = store.get_tasks_assigned_to(&member.user_id).count();

    println!(
        "  {} {} {}  {}",
        format!("({})", member.initials()).cyan(),
        member.name.bold(),
        format!("[{}]", member.user_id).dimmed(),
        badge
    );
    println!(
        "      {} · {} · {} · {}",
        member.role.label(),
        member.position,
        project.blue(),
        plural(task_count, "task", "tasks").dimmed()
    );
    println!(
        "      {} · {} · born {}",
        member.email.dimmed(),
        member.phone.dimmed(),
        member.birthdate
    );
}

/// Render a single task row, right-aligning the deadline when there is room
pub fn render_task_line(task: &Task, store: &Store) {
    let terminal_width = get_terminal_width();

    let project_name = store
        .get_project(&task.project_id)
        .map(|p| p.name.as_str())
        .unwrap_or("-");
    let assignee = resolve_assignee_name(store, task.assignee_id.as_ref());

    let left_section = format!("  {:>5}  {}", task.id, task.description);
    let styled_left = if task.status == TaskStatus::Completed {
        left_section.dimmed()
    } else {
        left_section.bold()
    };

    let deadline = task.deadline.to_string();
    let left_visible_len = left_section.chars().count();
    if left_visible_len + deadline.len() + 4 < terminal_width {
        let padding = terminal_width - left_visible_len - deadline.len() - 2;
        println!("{}{}{}", styled_left, " ".repeat(padding), deadline.dimmed());
    } else {
        println!("{}  {}", styled_left, deadline.dimmed());
    }

    println!(
        "         {} · {} · {} · {}",
        project_name.blue(),
        task_status_badge(task.status),
        priority_badge(task.priority),
        assignee
    );
}

pub fn render_task_page(page: &TaskPage<'_>, store: &Store) {
    render_view_header("Tasks", page.total_tasks, "task", "tasks");
    if page.tasks.is_empty() {
        println!("  No tasks on this page");
    }
    for task in &page.tasks {
        render_task_line(task, store);
    }
    println!(
        "\n  {}",
        format!("Page {} of {}", page.page, page.total_pages.max(1)).dimmed()
    );
}

pub fn render_summary(summary: &DashboardSummary) {
    println!("\n  {}\n", "Dashboard".cyan().bold());

    let card = |title: &str, value: String, change: String| {
        println!("  {:<18} {:>6}   {}", title.bold(), value, change.dimmed());
    };

    card(
        "Total projects",
        summary.total_projects.to_string(),
        format!("+{} in the last month", summary.projects_created_last_month),
    );
    card(
        "Completed tasks",
        summary.completed_tasks.to_string(),
        String::new(),
    );
    card(
        "Hours worked",
        format!("{}h", summary.hours_worked),
        String::new(),
    );
    card(
        "Active members",
        summary.active_members.to_string(),
        format!("{} without a project", summary.active_unassigned_members),
    );

    render_section_header("Tasks by status");
    for (status, count) in &summary.tasks_by_status {
        println!("  {:<14} {}", task_status_badge(*status), count);
    }
    println!();
}

pub fn render_settings(settings: &Settings, path: &std::path::Path) {
    println!("\n  {}\n", "Settings".cyan().bold());
    println!("  {:<22} {:?}", "Theme", settings.theme);
    println!("  {:<22} {:?}", "Default language", settings.default_language);
    println!(
        "  {:<22} {}",
        "Email notifications", settings.email_notifications
    );
    println!("  {:<22} {}", "API URL", settings.api_url);
    println!("  {:<22} {} ms", "Simulated latency", settings.latency_ms);
    println!("\n  {}", path.display().to_string().dimmed());
}
