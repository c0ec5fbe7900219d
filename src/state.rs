use std::{thread, time::Duration};

use rand::Rng;
use thiserror::Error;

use crate::snapshot::Snapshot;

/// Kind tag stamped on every snapshot produced by a [`StateHolder`].
/// [`StateHolder::restore`] only accepts snapshots carrying this tag.
pub const SNAPSHOT_KIND: &str = "opaque-state/v1";

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestoreError {
    #[error("snapshot of kind `{found}` cannot restore a holder expecting `{expected}`")]
    InvalidSnapshotKind {
        expected: &'static str,
        found: String,
    },
}

/// Settings for [`StateHolder::mutate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    length: usize,
    char_pause: Option<Duration>,
}

impl Default for Mutation {
    fn default() -> Self {
        Self {
            length: 10,
            char_pause: None,
        }
    }
}

impl Mutation {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            char_pause: None,
        }
    }

    /// Sleep this long after generating each character, simulating a slow
    /// state transition. Off by default.
    pub fn with_char_pause(mut self, pause: Duration) -> Self {
        self.char_pause = Some(pause);
        self
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

/// Owner of a single opaque state value that can be checkpointed into
/// [`Snapshot`]s and later restored from them.
#[derive(Debug, Clone)]
pub struct StateHolder {
    state: String,
    mutation: Mutation,
}

impl StateHolder {
    pub fn new(initial: impl Into<String>) -> Self {
        Self::with_mutation(initial, Mutation::default())
    }

    pub fn with_mutation(initial: impl Into<String>, mutation: Mutation) -> Self {
        let state = initial.into();
        log::debug!("initial state is `{state}`");
        Self { state, mutation }
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    /// Replace the current state with a freshly generated pseudo-random
    /// string, each character drawn uniformly from the 52 ASCII letters.
    /// Not suitable where unpredictability matters.
    pub fn mutate(&mut self) {
        let mut rng = rand::thread_rng();
        let mut next = String::with_capacity(self.mutation.length);
        for _ in 0..self.mutation.length {
            next.push(ALPHABET[rng.gen_range(0..ALPHABET.len())] as char);
            if let Some(pause) = self.mutation.char_pause {
                thread::sleep(pause);
            }
        }
        log::debug!("state changed to `{next}`");
        self.state = next;
    }

    /// Capture the current state and wall-clock time into a new immutable
    /// [`Snapshot`]. The holder itself is left untouched.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(SNAPSHOT_KIND, self.state.clone())
    }

    /// Overwrite the current state with the one captured in `snapshot`.
    /// Rejects snapshots whose kind tag was not produced by this family of
    /// holders, leaving the current state untouched.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RestoreError> {
        if snapshot.kind() != SNAPSHOT_KIND {
            return Err(RestoreError::InvalidSnapshotKind {
                expected: SNAPSHOT_KIND,
                found: snapshot.kind().to_string(),
            });
        }
        self.state = snapshot.state().to_string();
        log::debug!("state restored to `{}`", self.state);
        Ok(())
    }
}
