use rand::Rng;
use rand::seq::SliceRandom;

use crate::hotkey::combo::Combo;

/// One drill: what to do, and the chord that does it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShortcutTask {
    pub description: &'static str,
    pub combo: Combo,
}

/// The lesson catalog. Only chords a terminal actually delivers are listed.
pub const CATALOG: [ShortcutTask; 7] = [
    ShortcutTask {
        description: "Save",
        combo: Combo::ctrl('s'),
    },
    ShortcutTask {
        description: "Copy",
        combo: Combo::ctrl('c'),
    },
    ShortcutTask {
        description: "Paste",
        combo: Combo::ctrl('v'),
    },
    ShortcutTask {
        description: "Cut",
        combo: Combo::ctrl('x'),
    },
    ShortcutTask {
        description: "Search",
        combo: Combo::ctrl('f'),
    },
    ShortcutTask {
        description: "Select all",
        combo: Combo::ctrl('a'),
    },
    ShortcutTask {
        description: "Undo",
        combo: Combo::ctrl('z'),
    },
];

/// A fresh copy of the catalog in Fisher-Yates shuffled order.
pub fn shuffled<R: Rng>(rng: &mut R) -> Vec<ShortcutTask> {
    let mut tasks = CATALOG.to_vec();
    tasks.shuffle(rng);
    tasks
}

/// Every chord the trainer recognises.
pub fn allowed_combos() -> impl Iterator<Item = Combo> {
    CATALOG.iter().map(|task| task.combo)
}
