use super::custom_params::{CustomParameterFlow, ParameterHistory};
use crate::command::{DevCommand, DevGoal, Executable, RUN_TESTS_INPUT, STOP_INPUT, ShellKind};
use crate::config::Config;
use crate::error::Result;
use crate::host::{Host, TerminalFactory, TerminalSpec};
use crate::registry::{ProjectEntity, Registry};
use crate::report::ReportKind;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Commands that drive a project's terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevAction {
    Start,
    StartInContainer,
    CustomStart,
    Stop,
    RunTests,
}

impl fmt::Display for DevAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DevAction::Start => "start",
            DevAction::StartInContainer => "start-container",
            DevAction::CustomStart => "custom-start",
            DevAction::Stop => "stop",
            DevAction::RunTests => "run-tests",
        })
    }
}

impl FromStr for DevAction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "start" => Ok(DevAction::Start),
            "start-container" | "startc" => Ok(DevAction::StartInContainer),
            "custom-start" | "custom" => Ok(DevAction::CustomStart),
            "stop" => Ok(DevAction::Stop),
            "run-tests" | "test" => Ok(DevAction::RunTests),
            other => Err(format!("unknown action '{other}'")),
        }
    }
}

/// What a command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text was typed into the project's terminal
    Sent(String),
    /// A report or file was shown
    Opened(PathBuf),
    /// The user was told why nothing happened
    Notified,
    /// The user backed out of a prompt
    Cancelled,
    /// No project was registered for the path
    Skipped,
}

/// Settings and remembered input shared by every command
#[derive(Debug, Clone)]
pub struct DispatchContext {
    pub config: Config,
    pub shell: ShellKind,
    pub parameters: ParameterHistory,
}

impl DispatchContext {
    pub fn new(config: Config) -> Self {
        let shell = config.shell();
        Self {
            config,
            shell,
            parameters: ParameterHistory::default(),
        }
    }

    pub fn with_parameters(mut self, parameters: ParameterHistory) -> Self {
        self.parameters = parameters;
        self
    }

    /// Goal of a plain start: the container goal only when configured and
    /// supported by the project.
    pub fn start_goal(&self, entity: &ProjectEntity) -> DevGoal {
        if self.config.container && entity.project_type().supports_container() {
            DevGoal::DevContainer
        } else {
            DevGoal::Dev
        }
    }

    pub fn dev_command(&self, entity: &ProjectEntity, goal: DevGoal) -> DevCommand {
        let tool = entity.project_type().build_tool();
        let executable = Executable::resolve(tool, entity.path(), &self.config, self.shell);
        DevCommand::new(tool, entity.path())
            .with_goal(goal)
            .with_executable(executable)
    }

    /// The text an action would type, without prompting or running it.
    /// `None` when the action does not apply to the project.
    pub fn command_line(
        &self,
        entity: &ProjectEntity,
        action: DevAction,
        parameters: Option<&str>,
    ) -> Option<String> {
        let line = match action {
            DevAction::Start => self
                .dev_command(entity, self.start_goal(entity))
                .to_shell_command(self.shell),
            DevAction::StartInContainer => {
                if !entity.project_type().supports_container() {
                    return None;
                }
                self.dev_command(entity, DevGoal::DevContainer)
                    .to_shell_command(self.shell)
            }
            DevAction::CustomStart => self
                .dev_command(entity, self.start_goal(entity))
                .with_parameters(parameters.unwrap_or_default())
                .to_shell_command(self.shell),
            DevAction::Stop => STOP_INPUT.to_string(),
            DevAction::RunTests => RUN_TESTS_INPUT.to_string(),
        };
        Some(line)
    }

    pub fn terminal_spec(&self, entity: &ProjectEntity) -> TerminalSpec {
        let mut env = Vec::new();
        if let Some(java_home) = self.config.java_home() {
            env.push(("JAVA_HOME".to_string(), java_home));
        }
        TerminalSpec {
            name: format!("{} (liberty dev)", entity.label),
            cwd: entity.project_dir().to_path_buf(),
            env,
        }
    }
}

/// Turns user commands into terminal input and host notifications
pub struct Dispatcher<F, H> {
    context: DispatchContext,
    factory: F,
    host: H,
}

impl<F: TerminalFactory, H: Host> Dispatcher<F, H> {
    pub fn new(context: DispatchContext, factory: F, host: H) -> Self {
        Self {
            context,
            factory,
            host,
        }
    }

    pub fn context(&self) -> &DispatchContext {
        &self.context
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn dispatch(
        &mut self,
        registry: &mut Registry,
        path: &Path,
        action: DevAction,
    ) -> Result<Outcome> {
        match action {
            DevAction::Start => self.start(registry, path),
            DevAction::StartInContainer => self.start_in_container(registry, path),
            DevAction::CustomStart => self.custom_start(registry, path),
            DevAction::Stop => self.stop(registry, path),
            DevAction::RunTests => self.run_tests(registry, path),
        }
    }

    pub fn start(&mut self, registry: &mut Registry, path: &Path) -> Result<Outcome> {
        let Some(entity) = registry.get(path) else {
            return Ok(skip(path));
        };
        let line = self
            .context
            .dev_command(entity, self.context.start_goal(entity))
            .to_shell_command(self.context.shell);
        self.launch(registry, path, line)
    }

    pub fn start_in_container(&mut self, registry: &mut Registry, path: &Path) -> Result<Outcome> {
        let Some(entity) = registry.get(path) else {
            return Ok(skip(path));
        };

        if !entity.project_type().supports_container() {
            let plugin = match entity.project_type().build_tool() {
                crate::types::BuildTool::Maven => "liberty-maven-plugin 3.3.0",
                crate::types::BuildTool::Gradle => "liberty-gradle-plugin 3.1.0",
            };
            self.host.warn(&format!(
                "{} does not support dev mode in a container. It requires {plugin} or later.",
                entity.label
            ));
            return Ok(Outcome::Notified);
        }

        let line = self
            .context
            .dev_command(entity, DevGoal::DevContainer)
            .to_shell_command(self.context.shell);
        self.launch(registry, path, line)
    }

    pub fn custom_start(&mut self, registry: &mut Registry, path: &Path) -> Result<Outcome> {
        if registry.get(path).is_none() {
            return Ok(skip(path));
        }

        let mut flow = CustomParameterFlow::new(&self.context.parameters);
        while !flow.is_finished() {
            let input = self.host.prompt(flow.state(), flow.recent());
            flow.handle(input);
        }
        let Some(parameters) = flow.result() else {
            debug!("Custom start cancelled");
            return Ok(Outcome::Cancelled);
        };

        self.context.parameters.remember(parameters);
        registry.persist_parameters(&self.context.parameters);

        let Some(entity) = registry.get(path) else {
            return Ok(skip(path));
        };
        let line = self
            .context
            .dev_command(entity, self.context.start_goal(entity))
            .with_parameters(parameters)
            .to_shell_command(self.context.shell);
        self.launch(registry, path, line)
    }

    pub fn stop(&mut self, registry: &mut Registry, path: &Path) -> Result<Outcome> {
        self.send_to_running(registry, path, STOP_INPUT)
    }

    pub fn run_tests(&mut self, registry: &mut Registry, path: &Path) -> Result<Outcome> {
        self.send_to_running(registry, path, RUN_TESTS_INPUT)
    }

    pub fn open_report(
        &mut self,
        registry: &Registry,
        path: &Path,
        kind: ReportKind,
    ) -> Result<Outcome> {
        let Some(entity) = registry.get(path) else {
            return Ok(skip(path));
        };

        if entity.project_type().build_tool() != kind.build_tool() {
            self.host.warn(&format!(
                "{} is not a {:?} project, so it has no {kind} report.",
                entity.label,
                kind.build_tool()
            ));
            return Ok(Outcome::Notified);
        }

        let report = kind.resolve(entity.path(), registry.roots());
        if !report.is_file() {
            self.host.info(&format!(
                "Test report not found at {}. Run the tests first.",
                report.display()
            ));
            return Ok(Outcome::Notified);
        }

        match std::fs::read_to_string(&report) {
            Ok(html) => {
                self.host.show_report(&kind.title(&entity.label), &report, &html);
                Ok(Outcome::Opened(report))
            }
            Err(e) => {
                warn!("Failed to read {}: {}", report.display(), e);
                self.host
                    .warn(&format!("Could not read {}: {e}", report.display()));
                Ok(Outcome::Notified)
            }
        }
    }

    /// Open the project's build file in the host
    pub fn open_project(&mut self, registry: &Registry, path: &Path) -> Outcome {
        match registry.get(path) {
            Some(entity) => {
                self.host.open_file(entity.path());
                Outcome::Opened(entity.path().to_path_buf())
            }
            None => skip(path),
        }
    }

    fn send_to_running(&mut self, registry: &mut Registry, path: &Path, text: &str) -> Result<Outcome> {
        let Some(entity) = registry.get_mut(path) else {
            return Ok(skip(path));
        };

        match entity.terminal_mut() {
            Some(terminal) => {
                terminal.show();
                terminal.send_text(text)?;
                Ok(Outcome::Sent(text.to_string()))
            }
            None => {
                let message = format!("Liberty dev mode has not been started on {}", entity.label);
                self.host.warn(&message);
                Ok(Outcome::Notified)
            }
        }
    }

    fn launch(&mut self, registry: &mut Registry, path: &Path, line: String) -> Result<Outcome> {
        let Some(entity) = registry.get(path) else {
            return Ok(skip(path));
        };

        if !entity.has_terminal() {
            let spec = self.context.terminal_spec(entity);
            let terminal = self.factory.create(spec)?;
            registry.attach_terminal(path, terminal);
        }

        let Some(entity) = registry.get_mut(path) else {
            return Ok(skip(path));
        };
        info!("{}: {}", entity.label, line);
        if let Some(terminal) = entity.terminal_mut() {
            terminal.show();
            terminal.send_text(&line)?;
        }
        Ok(Outcome::Sent(line))
    }
}

fn skip(path: &Path) -> Outcome {
    warn!("No project is registered for {}", path.display());
    Outcome::Skipped
}
