use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::HostError;
use crate::host::Host;

/// Full replacement of one line's text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub line: usize,
    pub text: String,
}

impl Change {
    pub fn new(line: usize, text: impl Into<String>) -> Self {
        Self {
            line,
            text: text.into(),
        }
    }
}

/// Result of one renumbering scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingChanges {
    pub changes: Vec<Change>,
    /// Last line the scan processed
    pub end_index: usize,
}

impl PendingChanges {
    pub fn empty(end_index: usize) -> Self {
        Self {
            changes: Vec::new(),
            end_index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Changes collected over one reaction cycle, applied as a single transaction.
///
/// Holds at most one entry per line, keyed and iterated in line order; a later
/// change for the same line replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changes: BTreeMap<usize, String>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, change: Change) {
        self.changes.insert(change.line, change.text);
    }

    pub fn get(&self, line: usize) -> Option<&str> {
        self.changes.get(&line).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.changes.iter().map(|(&line, text)| (line, text.as_str()))
    }

    /// Submit everything as one transaction, then clear.
    ///
    /// The set is emptied whether or not the host accepts it, so a rejected batch
    /// is never replayed on the next cycle. Returns whether anything was submitted.
    pub fn apply<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<bool, HostError> {
        if self.changes.is_empty() {
            return Ok(false);
        }

        let changes: Vec<Change> = std::mem::take(&mut self.changes)
            .into_iter()
            .map(|(line, text)| Change { line, text })
            .collect();
        host.apply_transaction(&changes)?;
        Ok(true)
    }
}

impl Extend<Change> for ChangeSet {
    fn extend<T: IntoIterator<Item = Change>>(&mut self, iter: T) {
        for change in iter {
            self.push(change);
        }
    }
}
