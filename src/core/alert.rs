//! Sustained-inattention alert policy.

/// Events emitted by the alert policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertEvent {
    /// The user has been unfocused for the configured run of ticks
    SustainedUnfocus,
}

/// Tracks the length of the current unfocused run.
///
/// Edge-triggered: the event fires exactly once, on the tick where the run
/// length equals the trigger, and cannot fire again until a focused tick
/// resets the run and a fresh run reaches the trigger.
#[derive(Debug, Clone)]
pub struct AlertPolicy {
    trigger: u32,
    consecutive_unfocused: u32,
}

impl AlertPolicy {
    pub fn new(trigger: u32) -> Self {
        Self {
            trigger,
            consecutive_unfocused: 0,
        }
    }

    /// Feed one tick's focus decision.
    pub fn on_tick(&mut self, focused: bool) -> Option<AlertEvent> {
        if focused {
            self.consecutive_unfocused = 0;
            return None;
        }

        self.consecutive_unfocused += 1;
        if self.consecutive_unfocused == self.trigger {
            Some(AlertEvent::SustainedUnfocus)
        } else {
            None
        }
    }
}
