use rewind::{History, Mutation, RestoreError, Snapshot, StateHolder, SNAPSHOT_KIND};

fn forged_snapshot(kind: &str, state: &str) -> Snapshot {
    let json = format!(
        r#"{{"kind":"{kind}","state":"{state}","created_at":"2024-05-04T12:00:00Z"}}"#
    );
    serde_json::from_str(&json).expect("hand-written snapshot JSON should deserialize")
}

#[test]
fn labels_match_checkpoint_count_and_order() {
    let mut history = History::new(StateHolder::new("alpha"));
    for _ in 0..4 {
        history.backup();
        history.subject_mut().mutate();
    }
    let labels = history.labels();
    assert_eq!(labels.len(), 4);
    assert!(labels[0].contains("(alpha)..."));
    // Reading the labels leaves the history untouched.
    assert_eq!(history.len(), 4);
}

#[test]
fn undo_on_fresh_history_is_a_noop() {
    let mut history = History::new(StateHolder::new("untouched"));
    assert!(!history.undo());
    assert_eq!(history.subject().state(), "untouched");
    assert!(history.is_empty());
}

#[test]
fn undo_restores_state_held_before_mutate() {
    let mut history = History::new(StateHolder::new("checkpoint-me"));
    history.backup();
    history.subject_mut().mutate();
    assert_ne!(history.subject().state(), "checkpoint-me");

    assert!(history.undo());
    assert_eq!(history.subject().state(), "checkpoint-me");
    assert!(history.is_empty());
}

#[test]
fn undo_consumes_one_entry_per_restore() {
    let mut history = History::new(StateHolder::new("X"));
    for _ in 0..3 {
        history.backup();
        history.subject_mut().mutate();
    }
    assert_eq!(history.len(), 3);
    assert!(history.undo());
    assert_eq!(history.len(), 2);
    assert!(history.undo());
    assert_eq!(history.len(), 1);
}

#[test]
fn undo_walks_backups_most_recent_first() {
    let mut history = History::new(StateHolder::new("X"));
    history.backup();
    history.subject_mut().mutate();
    let y = history.subject().state().to_string();
    history.backup();
    history.subject_mut().mutate();

    assert!(history.undo());
    assert_eq!(history.subject().state(), y);
    assert!(history.undo());
    assert_eq!(history.subject().state(), "X");
    assert!(!history.undo());
}

#[test]
fn undo_skips_deserialized_foreign_snapshots() {
    let mut history = History::new(StateHolder::new("genuine"));
    history.backup();
    history.subject_mut().mutate();
    history.push_snapshot(forged_snapshot("legacy-state/v0", "tampered"));
    assert_eq!(history.len(), 2);

    // The foreign entry is consumed while being skipped, then the genuine
    // one restores.
    assert!(history.undo());
    assert_eq!(history.subject().state(), "genuine");
    assert!(history.is_empty());
}

#[test]
fn restore_surfaces_kind_mismatch_to_the_caller() {
    let mut holder = StateHolder::new("genuine");
    let err = holder
        .restore(&forged_snapshot("legacy-state/v0", "tampered"))
        .unwrap_err();
    match err {
        RestoreError::InvalidSnapshotKind { expected, found } => {
            assert_eq!(expected, SNAPSHOT_KIND);
            assert_eq!(found, "legacy-state/v0");
        }
    }
    assert_eq!(holder.state(), "genuine");
}

#[test]
fn snapshots_from_a_holder_restore_after_a_serde_round_trip() {
    let mut holder = StateHolder::new("survives-the-wire");
    let json = serde_json::to_string(&holder.snapshot()).unwrap();
    holder.mutate();

    let snapshot: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(snapshot.kind(), SNAPSHOT_KIND);
    holder.restore(&snapshot).unwrap();
    assert_eq!(holder.state(), "survives-the-wire");
}

#[test]
fn demo_scenario_end_to_end() {
    let holder = StateHolder::with_mutation("Super-duper-super-puper-super.", Mutation::new(30));
    let mut history = History::new(holder);

    for _ in 0..3 {
        history.backup();
        history.subject_mut().mutate();
    }
    assert_eq!(history.labels().len(), 3);
    let last_backed_up = history.peek().unwrap().label();

    assert!(history.undo());
    assert_eq!(history.len(), 2);
    // The most recent checkpoint is the one that was restored.
    assert!(history
        .labels()
        .iter()
        .all(|label| *label != last_backed_up));

    assert!(history.undo());
    assert_eq!(history.len(), 1);
    assert!(history.labels()[0].contains("(Super-dup)..."));
}
