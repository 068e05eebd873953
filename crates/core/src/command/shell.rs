//! Shell flavours terminals run, and how paths are written for each

use crate::types::BuildTool;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellKind {
    /// sh, bash, zsh on Unix-like systems
    Posix,
    Cmd,
    PowerShell,
    /// Git Bash on Windows, drives mounted as `/c/...`
    GitBash,
    /// Windows Subsystem for Linux, drives mounted as `/mnt/c/...`
    Wsl,
}

impl ShellKind {
    /// Shell of the current process environment
    pub fn current() -> Self {
        let shell = std::env::var("SHELL")
            .ok()
            .or_else(|| std::env::var("ComSpec").ok());
        Self::detect(shell.as_deref(), cfg!(windows))
    }

    /// Classify a shell executable path. Off Windows everything is POSIX.
    pub fn detect(shell_path: Option<&str>, windows: bool) -> Self {
        if !windows {
            return ShellKind::Posix;
        }

        let Some(shell_path) = shell_path else {
            return ShellKind::PowerShell;
        };
        let lower = shell_path.to_ascii_lowercase().replace('/', "\\");

        if lower.contains("wsl") || lower.ends_with("system32\\bash.exe") {
            ShellKind::Wsl
        } else if lower.contains("bash") {
            ShellKind::GitBash
        } else if lower.ends_with("cmd.exe") || lower.ends_with("cmd") {
            ShellKind::Cmd
        } else {
            ShellKind::PowerShell
        }
    }

    pub fn is_windows_native(&self) -> bool {
        matches!(self, ShellKind::Cmd | ShellKind::PowerShell)
    }

    /// Rewrite a path into the form this shell understands
    pub fn convert_path(&self, path: &Path) -> String {
        let text = path.to_string_lossy();
        match self {
            ShellKind::Posix => text.into_owned(),
            ShellKind::Cmd | ShellKind::PowerShell => text.replace('/', "\\"),
            ShellKind::GitBash => {
                mount_drive(&text, "/").unwrap_or_else(|| text.replace('\\', "/"))
            }
            ShellKind::Wsl => mount_drive(&text, "/mnt/").unwrap_or_else(|| text.replace('\\', "/")),
        }
    }

    pub fn quote_path(&self, path: &Path) -> String {
        format!("\"{}\"", self.convert_path(path))
    }

    /// Command prefix that runs the executable at `path`
    pub fn invoke(&self, path: &Path) -> String {
        match self {
            ShellKind::PowerShell => format!("& {}", self.quote_path(path)),
            _ => self.quote_path(path),
        }
    }

    /// Wrapper script names to look for, most specific first
    pub fn wrapper_names(&self, tool: BuildTool) -> &'static [&'static str] {
        match (tool, self.is_windows_native()) {
            (BuildTool::Maven, true) => &["mvnw.cmd", "mvnw"],
            (BuildTool::Maven, false) => &["mvnw"],
            (BuildTool::Gradle, true) => &["gradlew.bat", "gradlew"],
            (BuildTool::Gradle, false) => &["gradlew"],
        }
    }
}

/// `C:\a\b` -> `{prefix}c/a/b`
fn mount_drive(text: &str, prefix: &str) -> Option<String> {
    let mut chars = text.chars();
    let drive = chars.next().filter(char::is_ascii_alphabetic)?;
    if chars.next() != Some(':') {
        return None;
    }
    let rest = text[2..].replace('\\', "/");
    Some(format!(
        "{prefix}{}/{}",
        drive.to_ascii_lowercase(),
        rest.trim_start_matches('/')
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(ShellKind::detect(Some("/bin/zsh"), false), ShellKind::Posix);
        assert_eq!(
            ShellKind::detect(Some(r"C:\Windows\System32\cmd.exe"), true),
            ShellKind::Cmd
        );
        assert_eq!(
            ShellKind::detect(Some(r"C:\Program Files\Git\bin\bash.exe"), true),
            ShellKind::GitBash
        );
        assert_eq!(
            ShellKind::detect(Some(r"C:\Windows\System32\wsl.exe"), true),
            ShellKind::Wsl
        );
        assert_eq!(
            ShellKind::detect(Some(r"C:\Windows\System32\bash.exe"), true),
            ShellKind::Wsl
        );
        assert_eq!(ShellKind::detect(Some("pwsh.exe"), true), ShellKind::PowerShell);
        assert_eq!(ShellKind::detect(None, true), ShellKind::PowerShell);
    }

    #[test]
    fn test_convert_path() {
        let path = Path::new(r"C:\work\app\pom.xml");
        assert_eq!(ShellKind::GitBash.convert_path(path), "/c/work/app/pom.xml");
        assert_eq!(ShellKind::Wsl.convert_path(path), "/mnt/c/work/app/pom.xml");
        assert_eq!(ShellKind::Cmd.convert_path(path), r"C:\work\app\pom.xml");
        assert_eq!(
            ShellKind::Posix.convert_path(Path::new("/home/dev/app/pom.xml")),
            "/home/dev/app/pom.xml"
        );
    }

    #[test]
    fn test_invoke() {
        let wrapper = Path::new(r"C:\work\app\mvnw.cmd");
        assert_eq!(
            ShellKind::PowerShell.invoke(wrapper),
            r#"& "C:\work\app\mvnw.cmd""#
        );
        assert_eq!(ShellKind::Cmd.invoke(wrapper), r#""C:\work\app\mvnw.cmd""#);
    }

    #[test]
    fn test_wrapper_names() {
        assert_eq!(ShellKind::Posix.wrapper_names(BuildTool::Gradle), &["gradlew"]);
        assert_eq!(
            ShellKind::Cmd.wrapper_names(BuildTool::Maven),
            &["mvnw.cmd", "mvnw"]
        );
    }
}
