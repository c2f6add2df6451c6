use crate::hotkey::KeyInput;

/// A key handler. It receives the current screen state on every call instead
/// of capturing it, so it can never act on a stale copy.
pub type Handler<S> = Box<dyn FnMut(&mut S, &mut KeyInput)>;

/// Single-subscriber key dispatcher.
///
/// The application feeds every key-down through [`HotkeyRouter::dispatch`].
/// At most one handler is registered at a time; registering another replaces
/// it and registering `None` clears the slot.
pub struct HotkeyRouter<S> {
    slot: Option<Handler<S>>,
    registrations: u64,
}

impl<S> HotkeyRouter<S> {
    pub fn new() -> Self {
        Self {
            slot: None,
            registrations: 0,
        }
    }

    pub fn set_handler(&mut self, handler: Option<Handler<S>>) {
        self.slot = handler;
        self.registrations += 1;
    }

    pub fn has_handler(&self) -> bool {
        self.slot.is_some()
    }

    /// How many times the slot has been written. Lets callers observe that a
    /// screen change re-registered exactly once.
    pub fn registrations(&self) -> u64 {
        self.registrations
    }

    /// Forward a key to the registered handler. Returns `false` when the slot
    /// is empty.
    pub fn dispatch(&mut self, state: &mut S, input: &mut KeyInput) -> bool {
        match self.slot.as_mut() {
            Some(handler) => {
                handler(state, input);
                true
            }
            None => false,
        }
    }
}

impl<S> Default for HotkeyRouter<S> {
    fn default() -> Self {
        Self::new()
    }
}
