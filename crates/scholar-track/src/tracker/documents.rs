//! Required-document list with a parallel done list, matched by document name.

use super::domain::ScholarshipRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentChecklist {
    required: Vec<String>,
    done: Vec<String>,
}

impl DocumentChecklist {
    pub fn new(required: Vec<String>, done: Vec<String>) -> Self {
        Self { required, done }
    }

    pub fn from_record(record: &ScholarshipRecord) -> Self {
        Self::new(
            record.required_documents.clone(),
            record.documents_done.clone(),
        )
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn done(&self) -> &[String] {
        &self.done
    }

    pub fn add_required(&mut self, name: impl Into<String>) {
        self.required.push(name.into());
    }

    /// Removes the entry at `index`; the done list is left as is.
    pub fn remove_required(&mut self, index: usize) -> Option<String> {
        (index < self.required.len()).then(|| self.required.remove(index))
    }

    /// Marks `name` done, or undone when it already is.
    pub fn toggle_done(&mut self, name: &str) {
        match self.done.iter().position(|entry| entry == name) {
            Some(index) => {
                self.done.remove(index);
            }
            None => self.done.push(name.to_string()),
        }
    }

    pub fn is_done(&self, name: &str) -> bool {
        self.done.iter().any(|entry| entry == name)
    }

    /// `|done| / |required|` without checking membership; `None` when nothing is required.
    ///
    /// Stale done entries still count, so the value can exceed 1.
    pub fn literal_ratio(&self) -> Option<f64> {
        if self.required.is_empty() {
            None
        } else {
            Some(self.done.len() as f64 / self.required.len() as f64)
        }
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.required, self.done)
    }
}
