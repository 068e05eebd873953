//! Events a session reacts to, funnelled through one channel

use liberty_dev_core::TerminalId;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::BufRead;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A line typed by the user
    Line(String),
    InputClosed,
    /// A tracked build file was created, changed or removed
    BuildFilesChanged,
    /// A terminal's shell exited
    TerminalClosed(TerminalId),
}

/// Receiving end of the session channel.
///
/// Prompts read user lines out of order; the events they skip over are kept
/// and handed out by [`EventQueue::next`] afterwards.
pub struct EventQueue {
    receiver: Receiver<SessionEvent>,
    pending: RefCell<VecDeque<SessionEvent>>,
}

impl EventQueue {
    pub fn new(receiver: Receiver<SessionEvent>) -> Self {
        Self {
            receiver,
            pending: RefCell::new(VecDeque::new()),
        }
    }

    /// Next event, or `None` once every sender is gone
    pub fn next(&self) -> Option<SessionEvent> {
        if let Some(event) = self.pending.borrow_mut().pop_front() {
            return Some(event);
        }
        self.receiver.recv().ok()
    }

    /// Next user line, deferring other events. `None` when input is closed.
    pub fn next_line(&self) -> Option<String> {
        loop {
            match self.receiver.recv().ok()? {
                SessionEvent::Line(line) => return Some(line),
                SessionEvent::InputClosed => {
                    self.pending.borrow_mut().push_back(SessionEvent::InputClosed);
                    return None;
                }
                other => self.pending.borrow_mut().push_back(other),
            }
        }
    }

    /// Drop further queued change notifications so a burst of saves
    /// triggers a single refresh.
    pub fn coalesce_build_changes(&self) {
        let mut pending = self.pending.borrow_mut();
        pending.retain(|event| *event != SessionEvent::BuildFilesChanged);
        while let Ok(event) = self.receiver.try_recv() {
            if event != SessionEvent::BuildFilesChanged {
                pending.push_back(event);
            }
        }
    }
}

/// Forward stdin lines into the session channel
pub fn spawn_stdin_reader(events: Sender<SessionEvent>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if events.send(SessionEvent::Line(line)).is_err() {
                        return;
                    }
                }
                Err(_) => break,
            }
        }
        let _ = events.send(SessionEvent::InputClosed);
    });
}
