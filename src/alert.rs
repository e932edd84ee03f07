//! Time-bounded alert driven by per-frame trigger events.
//!
//! The machine is evaluated once per frame. A trigger always (re)activates the
//! alert and restarts its window, so a gesture held across frames keeps the
//! alert alive until roughly one duration after it stops. The timeout check
//! runs after the trigger check.

use log::{debug, info, warn};
use std::time::{Duration, Instant};

/// Current alert state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertState {
    /// No alert showing
    Inactive,
    /// Alert showing since the most recent trigger
    Active {
        /// Time of the most recent trigger
        activated_at: Instant,
    },
}

impl AlertState {
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }
}

/// Two-state alert machine with a fixed active window
#[derive(Debug, Clone)]
pub struct AlertStateMachine {
    state: AlertState,
    duration: Duration,
}

impl AlertStateMachine {
    /// Create an inactive machine with the given active window
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            state: AlertState::Inactive,
            duration,
        }
    }

    /// Advance the machine by one frame
    ///
    /// `triggered` reports whether this frame contained a qualifying gesture.
    pub fn update(&mut self, triggered: bool, now: Instant) -> AlertState {
        if triggered {
            self.trigger(now);
        }
        self.check_timeout(now);
        self.state
    }

    /// Activate the alert, restarting its window at `now`
    pub fn trigger(&mut self, now: Instant) {
        if self.state.is_active() {
            debug!("Alert re-triggered, window restarted");
        } else {
            warn!("ALERT: LEFT HAND FIST DETECTED!");
        }
        self.state = AlertState::Active { activated_at: now };
    }

    /// Deactivate the alert once its window has elapsed
    pub fn check_timeout(&mut self, now: Instant) {
        if let AlertState::Active { activated_at } = self.state {
            if now.saturating_duration_since(activated_at) > self.duration {
                info!("Alert cleared after {:.1}s", self.duration.as_secs_f64());
                self.state = AlertState::Inactive;
            }
        }
    }

    #[must_use]
    pub fn state(&self) -> AlertState {
        self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Time left in the active window, zero when inactive
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.state {
            AlertState::Inactive => Duration::ZERO,
            AlertState::Active { activated_at } => self
                .duration
                .saturating_sub(now.saturating_duration_since(activated_at)),
        }
    }
}

impl Default for AlertStateMachine {
    fn default() -> Self {
        Self::new(crate::constants::ALERT_DURATION)
    }
}
