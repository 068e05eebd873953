use super::shell::ShellKind;
use super::wrapper::find_wrapper;
use crate::config::Config;
use crate::maven::classifier::{LIBERTY_GROUP_ID, LIBERTY_MAVEN_PLUGIN};
use crate::types::BuildTool;
use std::path::{Path, PathBuf};

/// Text typed into a running dev mode session to end it
pub const STOP_INPUT: &str = "exit";

/// Text typed into a running dev mode session to run the tests
pub const RUN_TESTS_INPUT: &str = "";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevGoal {
    Dev,
    DevContainer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Executable {
    /// A project wrapper script, invoked by path
    Wrapper(PathBuf),
    /// A program looked up on `PATH`
    Program(String),
}

impl Executable {
    /// Wrapper above the build file when preferred and present, else the
    /// configured program.
    pub fn resolve(tool: BuildTool, build_file: &Path, config: &Config, shell: ShellKind) -> Self {
        let tool_config = match tool {
            BuildTool::Maven => &config.maven,
            BuildTool::Gradle => &config.gradle,
        };

        if tool_config.prefer_wrapper {
            if let Some(wrapper) = find_wrapper(build_file, tool, shell) {
                return Executable::Wrapper(wrapper);
            }
        }
        Executable::Program(tool_config.executable.clone())
    }
}

/// A dev mode launch line for one build file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevCommand {
    pub tool: BuildTool,
    pub goal: DevGoal,
    pub executable: Executable,
    pub build_file: PathBuf,
    pub parameters: Option<String>,
}

impl DevCommand {
    pub fn new(tool: BuildTool, build_file: impl Into<PathBuf>) -> Self {
        let program = match tool {
            BuildTool::Maven => "mvn",
            BuildTool::Gradle => "gradle",
        };
        Self {
            tool,
            goal: DevGoal::Dev,
            executable: Executable::Program(program.to_string()),
            build_file: build_file.into(),
            parameters: None,
        }
    }

    pub fn with_goal(mut self, goal: DevGoal) -> Self {
        self.goal = goal;
        self
    }

    pub fn with_executable(mut self, executable: Executable) -> Self {
        self.executable = executable;
        self
    }

    /// Extra parameters appended after the goal; blank text is ignored
    pub fn with_parameters(mut self, parameters: impl Into<String>) -> Self {
        let parameters = parameters.into();
        let trimmed = parameters.trim();
        self.parameters = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Goal (Maven) or task (Gradle) name
    pub fn goal_name(&self) -> &'static str {
        match (self.tool, self.goal) {
            (BuildTool::Maven, DevGoal::Dev) => "dev",
            (BuildTool::Maven, DevGoal::DevContainer) => "devc",
            (BuildTool::Gradle, DevGoal::Dev) => "libertyDev",
            (BuildTool::Gradle, DevGoal::DevContainer) => "libertyDevc",
        }
    }

    pub fn to_shell_command(&self, shell: ShellKind) -> String {
        let executable = match &self.executable {
            Executable::Wrapper(path) => shell.invoke(path),
            Executable::Program(program) => program.clone(),
        };
        let parameters = self
            .parameters
            .as_ref()
            .map(|p| format!(" {p}"))
            .unwrap_or_default();
        let build_file = shell.quote_path(&self.build_file);

        match self.tool {
            BuildTool::Maven => format!(
                "{executable} {LIBERTY_GROUP_ID}:{LIBERTY_MAVEN_PLUGIN}:{}{parameters} -f {build_file}",
                self.goal_name()
            ),
            BuildTool::Gradle => format!(
                "{executable} {}{parameters} -b={build_file}",
                self.goal_name()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use tempfile::TempDir;

    #[test]
    fn test_maven_commands() {
        let command = DevCommand::new(BuildTool::Maven, "/ws/app/pom.xml");
        assert_snapshot!(
            command.to_shell_command(ShellKind::Posix),
            @r#"mvn io.openliberty.tools:liberty-maven-plugin:dev -f "/ws/app/pom.xml""#
        );

        let container = command
            .clone()
            .with_goal(DevGoal::DevContainer)
            .with_parameters(" -DhotTests=true ");
        assert_snapshot!(
            container.to_shell_command(ShellKind::Posix),
            @r#"mvn io.openliberty.tools:liberty-maven-plugin:devc -DhotTests=true -f "/ws/app/pom.xml""#
        );
    }

    #[test]
    fn test_gradle_commands() {
        let command = DevCommand::new(BuildTool::Gradle, "/ws/app/build.gradle");
        assert_snapshot!(
            command.to_shell_command(ShellKind::Posix),
            @r#"gradle libertyDev -b="/ws/app/build.gradle""#
        );
        assert_snapshot!(
            command
                .with_goal(DevGoal::DevContainer)
                .with_parameters("--hotTests")
                .to_shell_command(ShellKind::Posix),
            @r#"gradle libertyDevc --hotTests -b="/ws/app/build.gradle""#
        );
    }

    #[test]
    fn test_wrapper_on_windows_shells() {
        let command = DevCommand::new(BuildTool::Maven, r"C:\ws\app\pom.xml")
            .with_executable(Executable::Wrapper(PathBuf::from(r"C:\ws\app\mvnw.cmd")));

        assert_snapshot!(
            command.to_shell_command(ShellKind::PowerShell),
            @r#"& "C:\ws\app\mvnw.cmd" io.openliberty.tools:liberty-maven-plugin:dev -f "C:\ws\app\pom.xml""#
        );
        assert_snapshot!(
            command.to_shell_command(ShellKind::GitBash),
            @r#""/c/ws/app/mvnw.cmd" io.openliberty.tools:liberty-maven-plugin:dev -f "/c/ws/app/pom.xml""#
        );
    }

    #[test]
    fn test_blank_parameters_are_dropped() {
        let command = DevCommand::new(BuildTool::Gradle, "/ws/build.gradle").with_parameters("   ");
        assert_eq!(command.parameters, None);
    }

    #[test]
    fn test_resolve_executable() {
        let temp = TempDir::new().unwrap();
        let build_file = temp.path().join("build.gradle");
        let mut config = Config::default();

        assert_eq!(
            Executable::resolve(BuildTool::Gradle, &build_file, &config, ShellKind::Posix),
            Executable::Program("gradle".to_string())
        );

        std::fs::write(temp.path().join("gradlew"), "").unwrap();
        assert_eq!(
            Executable::resolve(BuildTool::Gradle, &build_file, &config, ShellKind::Posix),
            Executable::Wrapper(temp.path().join("gradlew"))
        );

        config.gradle.prefer_wrapper = false;
        config.gradle.executable = "/opt/gradle/bin/gradle".to_string();
        assert_eq!(
            Executable::resolve(BuildTool::Gradle, &build_file, &config, ShellKind::Posix),
            Executable::Program("/opt/gradle/bin/gradle".to_string())
        );
    }
}
