pub use crate::{
    history::History,
    snapshot::Snapshot,
    state::{Mutation, RestoreError, StateHolder, SNAPSHOT_KIND},
};

mod history;
mod snapshot;
mod state;
