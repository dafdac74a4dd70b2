//! Ordered, deduplicated collection of non-fatal export warnings

use std::collections::BTreeSet;

/// Human-readable data-quality warnings gathered during one export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Warnings {
    messages: BTreeSet<String>,
}

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning; repeated messages are kept once
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        if self.messages.insert(message.clone()) {
            tracing::warn!(warning = %message, "export warning");
        }
    }

    pub fn contains(&self, message: &str) -> bool {
        self.messages.contains(message)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    /// Sorted, deduplicated messages
    pub fn into_vec(self) -> Vec<String> {
        self.messages.into_iter().collect()
    }
}
