//! Collecting the extra parameters for a custom dev mode start

use crate::state::MAX_RECENT_PARAMETERS;

/// Parameter strings used by earlier custom starts, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterHistory {
    last: Option<String>,
    recent: Vec<String>,
}

impl ParameterHistory {
    pub fn new(last: &str, recent: Vec<String>) -> Self {
        let last = Some(last.trim().to_string()).filter(|l| !l.is_empty());
        let mut history = Self {
            last,
            recent: Vec::new(),
        };
        for parameters in recent.iter().rev() {
            history.push_recent(parameters);
        }
        history
    }

    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    pub fn recent(&self) -> &[String] {
        &self.recent
    }

    pub fn remember(&mut self, parameters: &str) {
        let parameters = parameters.trim();
        if parameters.is_empty() {
            return;
        }
        self.last = Some(parameters.to_string());
        self.push_recent(parameters);
    }

    fn push_recent(&mut self, parameters: &str) {
        self.recent.retain(|p| p != parameters);
        self.recent.insert(0, parameters.to_string());
        self.recent.truncate(MAX_RECENT_PARAMETERS);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    /// Pick a recent parameter string or start a new one
    ChooseRecent,
    /// Type the parameters, starting from `initial`
    Enter {
        initial: String,
        error: Option<String>,
    },
    Completed(String),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowInput {
    /// Index into the recent list
    Pick(usize),
    NewEntry,
    Text(String),
    Back,
    Cancel,
}

/// Step machine behind the custom start prompt.
///
/// With no history the flow opens on [`FlowState::Enter`] pre-filled with
/// the last parameters. Accepted text must start with `-`.
#[derive(Debug, Clone)]
pub struct CustomParameterFlow {
    recent: Vec<String>,
    state: FlowState,
}

impl CustomParameterFlow {
    pub fn new(history: &ParameterHistory) -> Self {
        let state = if history.recent().is_empty() {
            FlowState::Enter {
                initial: history.last().unwrap_or_default().to_string(),
                error: None,
            }
        } else {
            FlowState::ChooseRecent
        };
        Self {
            recent: history.recent().to_vec(),
            state,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn recent(&self) -> &[String] {
        &self.recent
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, FlowState::Completed(_) | FlowState::Cancelled)
    }

    /// Parameters once the flow completed
    pub fn result(&self) -> Option<&str> {
        match &self.state {
            FlowState::Completed(parameters) => Some(parameters),
            _ => None,
        }
    }

    pub fn handle(&mut self, input: FlowInput) {
        let next = match (&self.state, input) {
            (FlowState::Completed(_) | FlowState::Cancelled, _) => return,
            (_, FlowInput::Cancel) => FlowState::Cancelled,

            (FlowState::ChooseRecent, FlowInput::Pick(index)) => match self.recent.get(index) {
                Some(parameters) => FlowState::Enter {
                    initial: parameters.clone(),
                    error: None,
                },
                None => return,
            },
            (FlowState::ChooseRecent, FlowInput::NewEntry) => FlowState::Enter {
                initial: String::new(),
                error: None,
            },
            (FlowState::ChooseRecent, FlowInput::Text(text)) => validate(&text, ""),
            (FlowState::ChooseRecent, FlowInput::Back) => FlowState::Cancelled,

            (FlowState::Enter { initial, .. }, FlowInput::Text(text)) => validate(&text, initial),
            (FlowState::Enter { .. }, FlowInput::Back) => {
                if self.recent.is_empty() {
                    FlowState::Cancelled
                } else {
                    FlowState::ChooseRecent
                }
            }
            (FlowState::Enter { .. }, FlowInput::Pick(_) | FlowInput::NewEntry) => return,
        };
        self.state = next;
    }
}

fn validate(text: &str, initial: &str) -> FlowState {
    let text = text.trim();
    let parameters = if text.is_empty() { initial.trim() } else { text };

    if parameters.starts_with('-') {
        FlowState::Completed(parameters.to_string())
    } else {
        FlowState::Enter {
            initial: parameters.to_string(),
            error: Some("Parameters must start with '-'".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> ParameterHistory {
        let mut history = ParameterHistory::default();
        history.remember("-DhotTests=true");
        history.remember("-DdebugPort=7778");
        history
    }

    #[test]
    fn test_history_is_newest_first_and_deduplicated() {
        let mut history = history();
        history.remember("-DhotTests=true");
        assert_eq!(history.last(), Some("-DhotTests=true"));
        assert_eq!(history.recent(), &["-DhotTests=true", "-DdebugPort=7778"]);

        for i in 0..20 {
            history.remember(&format!("-Dn={i}"));
        }
        assert_eq!(history.recent().len(), MAX_RECENT_PARAMETERS);
        assert_eq!(history.recent()[0], "-Dn=19");
    }

    #[test]
    fn test_history_from_persisted_state() {
        let history = ParameterHistory::new(
            " -Da ",
            vec!["-Da".to_string(), "-Db".to_string(), "-Da".to_string()],
        );
        assert_eq!(history.last(), Some("-Da"));
        assert_eq!(history.recent(), &["-Da", "-Db"]);
    }

    #[test]
    fn test_empty_history_starts_on_entry() {
        let mut flow = CustomParameterFlow::new(&ParameterHistory::default());
        assert_eq!(
            flow.state(),
            &FlowState::Enter {
                initial: String::new(),
                error: None
            }
        );

        flow.handle(FlowInput::Text("hotTests".to_string()));
        assert!(matches!(flow.state(), FlowState::Enter { error: Some(_), .. }));

        flow.handle(FlowInput::Text("--hotTests".to_string()));
        assert_eq!(flow.result(), Some("--hotTests"));
        assert!(flow.is_finished());
    }

    #[test]
    fn test_pick_recent_then_accept_default() {
        let mut flow = CustomParameterFlow::new(&history());
        assert_eq!(flow.state(), &FlowState::ChooseRecent);

        flow.handle(FlowInput::Pick(1));
        flow.handle(FlowInput::Text(String::new()));
        assert_eq!(flow.result(), Some("-DhotTests=true"));
    }

    #[test]
    fn test_back_and_cancel() {
        let mut flow = CustomParameterFlow::new(&history());
        flow.handle(FlowInput::NewEntry);
        flow.handle(FlowInput::Back);
        assert_eq!(flow.state(), &FlowState::ChooseRecent);

        flow.handle(FlowInput::Pick(99));
        assert_eq!(flow.state(), &FlowState::ChooseRecent);

        flow.handle(FlowInput::Cancel);
        assert_eq!(flow.state(), &FlowState::Cancelled);
        flow.handle(FlowInput::Text("-Dx".to_string()));
        assert_eq!(flow.state(), &FlowState::Cancelled);
    }
}
