use crate::action::Action;
use std::time::{Duration, Instant};
use tracing::debug;

/// How long an action has to be held before it is dispatched, and again between repeats.
pub(crate) const HOLD_TIME: Duration = Duration::from_secs(3);

/// An action that has been held long enough to be executed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Dispatch {
    pub(crate) action: Action,
    pub(crate) held: Duration,
}

/// Debounces per-frame actions into one dispatch per `HOLD_TIME` of continuous hold.
///
/// Owned by the frame loop and fed exactly once per frame. Timestamps must come from a
/// monotonic clock.
#[derive(Debug, Clone)]
pub(crate) struct Dispatcher {
    current: Action,
    armed_at: Option<Instant>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub(crate) fn new() -> Self {
        Self {
            current: Action::None,
            armed_at: None,
        }
    }

    pub(crate) fn current(&self) -> Action {
        self.current
    }

    #[cfg(test)]
    pub(crate) fn armed_at(&self) -> Option<Instant> {
        self.armed_at
    }

    pub(crate) fn update(&mut self, action: Action, now: Instant) -> Option<Dispatch> {
        if action != self.current {
            debug!(from = %self.current, to = %action, "re-arming");
            self.current = action;
            self.armed_at = Some(now);
            return None;
        }

        if self.current.is_none() {
            return None;
        }

        // an action other than NONE is only ever current after passing through the branch above
        let armed_at = self.armed_at?;
        let held = now.saturating_duration_since(armed_at);
        if held >= HOLD_TIME {
            self.armed_at = Some(now);
            Some(Dispatch {
                action: self.current,
                held,
            })
        } else {
            None
        }
    }
}
