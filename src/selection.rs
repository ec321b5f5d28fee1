//! Transient selection state for the symptom and trigger pickers.

/// Labels chosen during form interaction, before a submit commits them
/// into an entry. One instance per picker per editing session; never
/// persisted. Insertion order is kept for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    labels: Vec<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes `label` if present, adds it otherwise. Two toggles of the
    /// same label cancel out. An empty label is a no-op.
    pub fn toggle(&mut self, label: &str) {
        if label.is_empty() {
            return;
        }
        if let Some(position) = self.labels.iter().position(|existing| existing == label) {
            self.labels.remove(position);
        } else {
            self.labels.push(label.to_string());
        }
    }

    /// Adds a user-typed label unless it is blank or already selected.
    pub fn add_free_text(&mut self, label: &str) {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return;
        }
        if !self.labels.iter().any(|existing| existing == trimmed) {
            self.labels.push(trimmed.to_string());
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|existing| existing == label)
    }

    /// Copy of the current labels; does not mutate state.
    pub fn snapshot(&self) -> Vec<String> {
        self.labels.clone()
    }

    /// Empties the selection. Called once, after a successful submit.
    pub fn clear(&mut self) {
        self.labels.clear();
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
