//! Conversation store: the ordered dialogue history

use crate::llm::{Role, Turn};

/// An append-only sequence of turns. Insertion order is prompt order;
/// nothing here ever reorders or edits an entry.
///
/// There is exactly one writer (the submit path), so the store is plain
/// owned state with no locking.
#[derive(Debug, Default)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Create an empty conversation
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one turn at the end. Empty content is permitted; duplicates are
    /// permitted; there is no size cap.
    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        self.turns.push(Turn::new(role, content));
    }

    /// Read-only snapshot of every turn appended so far
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Empty the conversation. Irreversible; there is no undo.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
