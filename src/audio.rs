use std::io::{self, Write};

/// Feedback sounds. Screens queue them; the main loop plays them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Success,
    Failure,
}

/// Terminal bell player. Playback is fire-and-forget: a failed write is
/// logged and dropped.
pub struct Chime {
    enabled: bool,
}

impl Chime {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn play(&mut self, cue: Cue) {
        if !self.enabled {
            return;
        }
        // One bell for success, a double bell for a miss.
        let bells: &[u8] = match cue {
            Cue::Success => b"\x07",
            Cue::Failure => b"\x07\x07",
        };
        let mut out = io::stdout();
        if let Err(err) = out.write_all(bells).and_then(|_| out.flush()) {
            tracing::debug!(?cue, %err, "audio cue dropped");
        }
    }
}
