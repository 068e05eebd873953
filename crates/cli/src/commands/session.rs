use anyhow::Result;
use liberty_dev_core::{DevAction, DispatchContext, Dispatcher, Outcome, Registry, ReportKind};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::mpsc;
use tracing::{debug, warn};

use crate::display::print_projects;
use crate::events::{EventQueue, SessionEvent, spawn_stdin_reader};
use crate::host::{ConsoleHost, ProcessTerminalFactory};
use crate::watch::watch_build_files;
use crate::workspace::{open_registry, resolve_project};

type SessionDispatcher = Dispatcher<ProcessTerminalFactory, ConsoleHost>;

const HELP: &str = "\
Commands:
   list                          show projects
   start <project>               start dev mode
   start-container <project>     start dev mode in a container
   custom-start <project>        start dev mode with extra parameters
   stop <project>                stop dev mode
   run-tests <project>           run the tests of a running session
   report <project> <kind>       show a test report (failsafe, surefire, gradle)
   open <project>                show the build file
   add <build file>              add a project by hand
   remove <build file>           remove a project added by hand
   refresh                       search the workspace again
   help                          show this help
   quit                          leave the session";

/// Run the interactive dashboard until input ends or the user quits
pub fn session_command(workspaces: &[PathBuf]) -> Result<()> {
    let (sender, receiver) = mpsc::channel();
    let events = Rc::new(EventQueue::new(receiver));

    let mut registry = open_registry(workspaces)?;
    registry.subscribe(|registry| print_projects(&registry.projects()));
    print_projects(&registry.projects());

    let _watcher = match watch_build_files(registry.roots(), registry.config(), sender.clone()) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            warn!("Build files will not be watched: {:#}", e);
            None
        }
    };
    spawn_stdin_reader(sender.clone());

    let context = DispatchContext::new(registry.config().clone())
        .with_parameters(registry.parameter_history());
    let factory = ProcessTerminalFactory::new(context.shell, sender);
    let host = ConsoleHost::new(Rc::clone(&events));
    let mut dispatcher = Dispatcher::new(context, factory, host);

    println!("{HELP}");
    while let Some(event) = events.next() {
        match event {
            SessionEvent::Line(line) => {
                if !handle_line(&line, &mut registry, &mut dispatcher) {
                    break;
                }
            }
            SessionEvent::BuildFilesChanged => {
                events.coalesce_build_changes();
                registry.refresh();
            }
            SessionEvent::TerminalClosed(id) => {
                if let Some(path) = registry.terminal_closed(id) {
                    println!("⏹ Terminal for {} closed", path.display());
                }
            }
            SessionEvent::InputClosed => break,
        }
    }
    Ok(())
}

/// Returns false when the session should end
fn handle_line(line: &str, registry: &mut Registry, dispatcher: &mut SessionDispatcher) -> bool {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return true;
    };
    let args: Vec<&str> = words.collect();

    let result: Result<()> = match (verb, args.as_slice()) {
        ("quit" | "q", _) => return false,
        ("help" | "?", _) => {
            println!("{HELP}");
            Ok(())
        }
        ("list" | "ls", _) => {
            print_projects(&registry.projects());
            Ok(())
        }
        ("refresh", _) => {
            registry.refresh();
            Ok(())
        }
        ("add", [path]) => registry.add_project(Path::new(path)).map(|_| ()).map_err(Into::into),
        ("remove", [path]) => registry
            .remove_project(Path::new(path))
            .map(|removed| {
                if !removed {
                    println!("❌ {path} was not added by hand");
                }
            })
            .map_err(Into::into),
        ("report", [project, kind]) => run_report(registry, dispatcher, project, kind),
        ("open", [project]) => project_path(registry, project).map(|path| {
            dispatcher.open_project(registry, &path);
        }),
        (action, [project]) => match action.parse::<DevAction>() {
            Ok(action) => run_action(registry, dispatcher, project, action),
            Err(e) => Err(anyhow::anyhow!(e)),
        },
        _ => Err(anyhow::anyhow!("Unrecognised command '{line}', type help")),
    };

    if let Err(e) = result {
        println!("❌ {e:#}");
    }
    true
}

fn project_path(registry: &Registry, project: &str) -> Result<PathBuf> {
    Ok(resolve_project(registry, project)?.path().to_path_buf())
}

fn run_action(
    registry: &mut Registry,
    dispatcher: &mut SessionDispatcher,
    project: &str,
    action: DevAction,
) -> Result<()> {
    let path = project_path(registry, project)?;
    let outcome = dispatcher.dispatch(registry, &path, action)?;
    debug!("{} on {}: {:?}", action, path.display(), outcome);
    if outcome == Outcome::Cancelled {
        println!("Cancelled");
    }
    Ok(())
}

fn run_report(
    registry: &Registry,
    dispatcher: &mut SessionDispatcher,
    project: &str,
    kind: &str,
) -> Result<()> {
    let kind: ReportKind = kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let path = project_path(registry, project)?;
    dispatcher.open_report(registry, &path, kind)?;
    Ok(())
}
