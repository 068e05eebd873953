use liberty_dev_core::{ProjectEntity, ProjectType};
use serde_json::{Value, json};

pub fn describe_type(project_type: ProjectType) -> &'static str {
    match project_type {
        ProjectType::LibertyMaven => "Maven",
        ProjectType::LibertyMavenContainer => "Maven (container ready)",
        ProjectType::LibertyGradle => "Gradle",
        ProjectType::LibertyGradleContainer => "Gradle (container ready)",
    }
}

pub fn print_projects(projects: &[&ProjectEntity]) {
    if projects.is_empty() {
        println!("❌ No Liberty dev mode projects found");
        return;
    }

    let width = projects.iter().map(|p| p.label.len()).max().unwrap_or(0);
    println!("📦 {} project(s)", projects.len());
    println!("{}", "=".repeat(80));
    for project in projects {
        let running = if project.has_terminal() { " ▶" } else { "" };
        println!(
            "   {:<width$}  {:<24} {}{}",
            project.label,
            describe_type(project.project_type()),
            project.path().display(),
            running,
        );
    }
}

pub fn projects_json(projects: &[&ProjectEntity]) -> Value {
    Value::Array(
        projects
            .iter()
            .map(|project| {
                json!({
                    "label": project.label,
                    "path": project.path(),
                    "projectType": project.project_type(),
                    "supportsContainer": project.project_type().supports_container(),
                })
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_type() {
        assert_eq!(describe_type(ProjectType::LibertyMaven), "Maven");
        assert_eq!(
            describe_type(ProjectType::LibertyGradleContainer),
            "Gradle (container ready)"
        );
    }
}
