use liberty_dev_core::Host;
use liberty_dev_core::dispatch::{FlowInput, FlowState};
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

use crate::events::EventQueue;

/// Host that talks to the user over stdout and the session's input lines
pub struct ConsoleHost {
    events: Rc<EventQueue>,
}

impl ConsoleHost {
    pub fn new(events: Rc<EventQueue>) -> Self {
        Self { events }
    }

    fn ask(&self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        let _ = std::io::stdout().flush();
        self.events.next_line()
    }
}

impl Host for ConsoleHost {
    fn info(&mut self, message: &str) {
        println!("ℹ️  {message}");
    }

    fn warn(&mut self, message: &str) {
        println!("⚠️  {message}");
    }

    fn prompt(&mut self, state: &FlowState, recent: &[String]) -> FlowInput {
        match state {
            FlowState::ChooseRecent => {
                println!("Recent parameters:");
                for (index, parameters) in recent.iter().enumerate() {
                    println!("   {}. {}", index + 1, parameters);
                }
                let Some(answer) = self.ask("Number, n for new, q to cancel: ") else {
                    return FlowInput::Cancel;
                };
                parse_choice(&answer)
            }
            FlowState::Enter { initial, error } => {
                if let Some(error) = error {
                    println!("❌ {error}");
                }
                let prompt = if initial.is_empty() {
                    "Parameters (b back, q cancel): ".to_string()
                } else {
                    format!("Parameters [{initial}] (b back, q cancel): ")
                };
                let Some(answer) = self.ask(&prompt) else {
                    return FlowInput::Cancel;
                };
                match answer.trim() {
                    "q" => FlowInput::Cancel,
                    "b" => FlowInput::Back,
                    text => FlowInput::Text(text.to_string()),
                }
            }
            FlowState::Completed(_) | FlowState::Cancelled => FlowInput::Cancel,
        }
    }

    fn show_report(&mut self, title: &str, path: &Path, html: &str) {
        println!("📊 {title}");
        println!("   {}", path.display());
        for line in report_text(html).lines() {
            println!("   {line}");
        }
    }

    fn open_file(&mut self, path: &Path) {
        println!("📂 {}", path.display());
    }
}

/// Readable text of an HTML test report: markup, scripts and styles are
/// dropped and block elements end lines.
fn report_text(html: &str) -> String {
    let mut text = String::new();
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        let Some(close) = rest[open..].find('>') else {
            rest = "";
            break;
        };
        let tag = rest[open + 1..open + close].trim().to_ascii_lowercase();
        rest = &rest[open + close + 1..];

        let name: String = tag
            .trim_start_matches('/')
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect();
        if matches!(name.as_str(), "script" | "style") && !tag.starts_with('/') {
            let end = format!("</{name}");
            let skipped = rest.to_ascii_lowercase().find(&end).unwrap_or(rest.len());
            rest = &rest[skipped..];
            continue;
        }
        if matches!(
            name.as_str(),
            "br" | "p" | "div" | "tr" | "li" | "h1" | "h2" | "h3" | "h4" | "table" | "title"
        ) {
            text.push('\n');
        } else if matches!(name.as_str(), "td" | "th") {
            text.push(' ');
        }
    }
    text.push_str(rest);

    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_choice(answer: &str) -> FlowInput {
    match answer.trim() {
        "q" => FlowInput::Cancel,
        "n" => FlowInput::NewEntry,
        "b" => FlowInput::Back,
        text if text.starts_with('-') => FlowInput::Text(text.to_string()),
        text => match text.parse::<usize>() {
            Ok(number) if number > 0 => FlowInput::Pick(number - 1),
            _ => FlowInput::NewEntry,
        },
    }
}
