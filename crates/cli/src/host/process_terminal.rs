use liberty_dev_core::error::{Error, Result};
use liberty_dev_core::{ShellKind, Terminal, TerminalFactory, TerminalId, TerminalSpec};
use std::io::Write;
use std::process::{ChildStdin, Command, Stdio};
use std::sync::mpsc::Sender;
use std::thread;
use tracing::debug;

use crate::events::SessionEvent;

/// A child shell whose stdin receives the dev mode input. Its output goes
/// straight to this process's stdout.
pub struct ProcessTerminal {
    id: TerminalId,
    name: String,
    stdin: ChildStdin,
}

impl Terminal for ProcessTerminal {
    fn id(&self) -> TerminalId {
        self.id
    }

    fn show(&mut self) {
        eprintln!("▶ {}", self.name);
    }

    fn send_text(&mut self, text: &str) -> Result<()> {
        writeln!(self.stdin, "{text}")?;
        self.stdin.flush()?;
        Ok(())
    }
}

pub struct ProcessTerminalFactory {
    shell: ShellKind,
    events: Sender<SessionEvent>,
    next_id: u64,
}

impl ProcessTerminalFactory {
    pub fn new(shell: ShellKind, events: Sender<SessionEvent>) -> Self {
        Self {
            shell,
            events,
            next_id: 1,
        }
    }
}

impl TerminalFactory for ProcessTerminalFactory {
    fn create(&mut self, spec: TerminalSpec) -> Result<Box<dyn Terminal>> {
        let id = TerminalId(self.next_id);
        self.next_id += 1;

        let mut child = shell_command(self.shell)
            .current_dir(&spec.cwd)
            .envs(spec.env.iter().cloned())
            .stdin(Stdio::piped())
            .spawn()?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Other(format!("{} has no stdin", spec.name)))?;
        debug!("Started {} ({}) in {}", spec.name, id, spec.cwd.display());

        let events = self.events.clone();
        thread::spawn(move || {
            let _ = child.wait();
            let _ = events.send(SessionEvent::TerminalClosed(id));
        });

        Ok(Box::new(ProcessTerminal {
            id,
            name: spec.name,
            stdin,
        }))
    }
}

fn shell_command(shell: ShellKind) -> Command {
    match shell {
        ShellKind::Posix => Command::new("sh"),
        ShellKind::GitBash => Command::new("bash"),
        ShellKind::Wsl => Command::new("wsl"),
        ShellKind::Cmd => {
            let mut command = Command::new("cmd");
            command.arg("/Q");
            command
        }
        ShellKind::PowerShell => {
            let mut command = Command::new("powershell");
            command.args(["-NoLogo", "-NoProfile", "-Command", "-"]);
            command
        }
    }
}
