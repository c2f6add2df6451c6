/// Append-only stack of snapshots taken just before each mutating action.
#[derive(Clone, Debug)]
pub struct UndoHistory<T> {
    snapshots: Vec<T>,
}

impl<T> UndoHistory<T> {
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
        }
    }

    pub fn push(&mut self, snapshot: T) {
        self.snapshots.push(snapshot);
    }

    /// The most recent snapshot, removed. `None` when there is nothing to undo.
    pub fn pop(&mut self) -> Option<T> {
        self.snapshots.pop()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl<T> Default for UndoHistory<T> {
    fn default() -> Self {
        Self::new()
    }
}
