#![no_main]
use libfuzzer_sys::fuzz_target;
use rewind::{History, Mutation, StateHolder};

// Drives an arbitrary sequence of operations against a history and checks
// the stack accounting. Every snapshot here comes from the bound holder, so
// an undo consumes exactly one entry.
fuzz_target!(|ops: Vec<u8>| {
    let holder = StateHolder::with_mutation("seed", Mutation::new(4));
    let mut history = History::new(holder);
    for op in ops {
        let before = history.len();
        match op % 4 {
            0 => {
                history.backup();
                assert_eq!(history.len(), before + 1);
            }
            1 => {
                let restored = history.undo();
                assert_eq!(restored, before > 0);
                assert_eq!(history.len(), before.saturating_sub(1));
            }
            2 => history.subject_mut().mutate(),
            _ => {
                assert_eq!(history.labels().len(), before);
            }
        }
    }
});
