//! Countdown that blocks repeated face searches.

/// Seconds the search button stays disabled after a successful search.
pub const SUBMIT_COOLDOWN_SECS: u32 = 60;

/// One-second countdown driven by the page's timer.
///
/// After `start(n)` the label reads `Submit (n)`, then `Submit (n-1)` on the
/// next tick, down to `Submit (1)`. The n-th tick ends the cooldown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitCooldown {
    remaining: Option<u32>,
}

impl SubmitCooldown {
    pub fn start(&mut self, seconds: u32) {
        self.remaining = (seconds > 0).then_some(seconds);
    }

    /// Advance one second. Returns true while the cooldown is still running.
    pub fn tick(&mut self) -> bool {
        self.remaining = match self.remaining {
            Some(n) if n > 1 => Some(n - 1),
            _ => None,
        };
        self.is_active()
    }

    pub fn is_active(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    /// Text for the search button.
    pub fn label(&self) -> String {
        match self.remaining {
            Some(n) => format!("Submit ({n})"),
            None => "Submit".to_string(),
        }
    }
}
