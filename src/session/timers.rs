use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Clone, Debug)]
struct Entry<E> {
    id: TimerId,
    due: Instant,
    period: Option<Duration>,
    event: E,
}

/// Deadline queue owned by a single screen.
///
/// Nothing runs by itself: the screen calls [`Timers::drain_due`] from its
/// tick and reacts to the returned events. Dropping the screen drops every
/// pending entry with it.
#[derive(Clone, Debug)]
pub struct Timers<E> {
    entries: Vec<Entry<E>>,
    next_id: u64,
}

impl<E: Clone> Timers<E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Fire `event` once, `delay` after `now`.
    pub fn after(&mut self, now: Instant, delay: Duration, event: E) -> TimerId {
        self.push(now + delay, None, event)
    }

    /// Fire `event` every `period`, first at `now + period`.
    pub fn every(&mut self, now: Instant, period: Duration, event: E) -> TimerId {
        let period = period.max(Duration::from_millis(1));
        self.push(now + period, Some(period), event)
    }

    fn push(&mut self, due: Instant, period: Option<Duration>, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due,
            period,
            event,
        });
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return every event due at `now`, oldest deadline first.
    /// A repeating entry that fell behind fires once per missed period.
    pub fn drain_due(&mut self, now: Instant) -> Vec<E> {
        let mut fired: Vec<(Instant, TimerId, E)> = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].due > now {
                i += 1;
                continue;
            }
            match self.entries[i].period {
                Some(period) => {
                    let entry = &mut self.entries[i];
                    while entry.due <= now {
                        fired.push((entry.due, entry.id, entry.event.clone()));
                        entry.due += period;
                    }
                    i += 1;
                }
                None => {
                    let entry = self.entries.swap_remove(i);
                    fired.push((entry.due, entry.id, entry.event));
                }
            }
        }
        fired.sort_by_key(|(due, id, _)| (*due, *id));
        fired.into_iter().map(|(_, _, event)| event).collect()
    }
}

impl<E: Clone> Default for Timers<E> {
    fn default() -> Self {
        Self::new()
    }
}
