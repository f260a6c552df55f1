//! Navigation history.

use crate::GuardDecision;

/// A browser-like history stack of paths.
///
/// Only what the guard needs: push, replace, back. The stack is never
/// empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    /// Starts a history at `initial`.
    pub fn new(initial: &str) -> Self {
        Self {
            entries: vec![initial.to_string()],
        }
    }

    /// The path currently shown.
    pub fn current(&self) -> &str {
        self.entries.last().map(String::as_str).unwrap_or("/")
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Adds a new entry.
    pub fn push(&mut self, path: &str) {
        self.entries.push(path.to_string());
    }

    /// Overwrites the current entry.
    pub fn replace(&mut self, path: &str) {
        match self.entries.last_mut() {
            Some(last) => *last = path.to_string(),
            None => self.entries.push(path.to_string()),
        }
    }

    /// Goes back one entry. Returns the new current path, or `None` if
    /// already at the oldest entry.
    pub fn back(&mut self) -> Option<&str> {
        if self.entries.len() <= 1 {
            return None;
        }
        self.entries.pop();
        Some(self.current())
    }

    /// Performs a redirect decision. Returns `true` if the location changed.
    pub fn apply(&mut self, decision: GuardDecision) -> bool {
        let GuardDecision::Redirect { to, replace } = decision else {
            return false;
        };
        if replace {
            self.replace(to.path());
        } else {
            self.push(to.path());
        }
        tracing::debug!(to = %to, replace, "redirected");
        true
    }
}
