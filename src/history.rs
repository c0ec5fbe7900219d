use std::fmt;

use itertools::Itertools;

use crate::{snapshot::Snapshot, state::StateHolder};

/// Ordered store of [`Snapshot`]s taken from a single [`StateHolder`],
/// last-in-first-out. The history owns its holder for the holder's lifetime;
/// mutate the state through [`History::subject_mut`] between backups.
///
/// The history never looks inside a snapshot's state. It only reads the
/// label and creation time, and hands snapshots back to the holder on undo.
#[derive(Debug, Clone)]
pub struct History {
    subject: StateHolder,
    entries: Vec<Snapshot>,
}

impl History {
    pub fn new(subject: StateHolder) -> Self {
        Self {
            subject,
            entries: Vec::new(),
        }
    }

    pub fn subject(&self) -> &StateHolder {
        &self.subject
    }

    pub fn subject_mut(&mut self) -> &mut StateHolder {
        &mut self.subject
    }

    pub fn into_subject(self) -> StateHolder {
        self.subject
    }

    /// Checkpoint the subject's current state on top of the stack.
    pub fn backup(&mut self) {
        let snapshot = self.subject.snapshot();
        log::debug!("saved checkpoint {}", snapshot.label());
        self.entries.push(snapshot);
    }

    /// Pop the most recent snapshot and restore it into the subject.
    ///
    /// A snapshot the holder rejects as incompatible is skipped and the next
    /// older one is tried, so a damaged or foreign entry never aborts the
    /// undo chain. With nothing left to undo this is a no-op.
    ///
    /// Returns whether a restore happened.
    pub fn undo(&mut self) -> bool {
        while let Some(entry) = self.entries.pop() {
            match self.subject.restore(&entry) {
                Ok(()) => {
                    log::debug!("rolled back to {}", entry.label());
                    return true;
                }
                Err(err) => {
                    log::warn!("skipping checkpoint {}: {err}", entry.label());
                }
            }
        }
        false
    }

    /// Labels of the remaining snapshots, oldest to newest.
    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(Snapshot::label).collect()
    }

    /// Append an externally obtained snapshot (e.g. a deserialized one) on
    /// top of the stack. Whether it can actually restore the subject is only
    /// decided when [`History::undo`] reaches it.
    pub fn push_snapshot(&mut self, snapshot: Snapshot) {
        self.entries.push(snapshot);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Most recent snapshot, if any.
    pub fn peek(&self) -> Option<&Snapshot> {
        self.entries.last()
    }

    /// Remaining snapshots, oldest to newest.
    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.entries.iter()
    }
}

impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.entries.iter().map(Snapshot::label).join("\n"))
    }
}
