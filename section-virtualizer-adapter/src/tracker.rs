use core::cell::Cell;

use crate::{ScrollError, Throttle};

/// Whether live scroll events drive content updates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackingState {
    /// Scroll events update the sticky overlay and (throttled) the groups.
    #[default]
    Tracking,
    /// A programmatic scroll is in flight. Content was already converted for its target, so
    /// intermediate events only record the offset.
    Suspended,
}

/// What the host has to refresh after an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollEffects {
    pub overlay: bool,
    pub groups: bool,
}

impl ScrollEffects {
    pub const NONE: Self = Self {
        overlay: false,
        groups: false,
    };
    pub const ALL: Self = Self {
        overlay: true,
        groups: true,
    };
}

/// The scroll-offset state machine.
///
/// Transitions:
/// - `Tracking --suspend()--> Suspended` when a programmatic scroll starts.
/// - `Suspended --resume()--> Tracking` once that scroll settles.
///
/// A second `suspend()` while suspended is rejected with [`ScrollError::ScrollInProgress`].
///
/// Every field is a `Cell`, so all transitions take `&self` and none of them can fail on a
/// borrow. In particular `resume()` always succeeds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollTracker {
    state: Cell<TrackingState>,
    offset: Cell<f64>,
    throttle: Cell<Throttle>,
}

impl ScrollTracker {
    pub fn new(update_time_interval_ms: u64) -> Self {
        Self {
            state: Cell::new(TrackingState::Tracking),
            offset: Cell::new(0.0),
            throttle: Cell::new(Throttle::new(update_time_interval_ms)),
        }
    }

    pub fn state(&self) -> TrackingState {
        self.state.get()
    }

    pub fn is_tracking(&self) -> bool {
        self.state() == TrackingState::Tracking
    }

    /// The last known scroll offset.
    pub fn offset(&self) -> f64 {
        self.offset.get()
    }

    pub fn throttle(&self) -> Throttle {
        self.throttle.get()
    }

    pub fn set_update_time_interval_ms(&self, interval_ms: u64) {
        let mut throttle = self.throttle.get();
        throttle.set_interval_ms(interval_ms);
        self.throttle.set(throttle);
    }

    /// A live scroll event from the surface.
    ///
    /// While tracking, the overlay is always refreshed and the groups are refreshed at most once
    /// per update interval. While suspended, only the offset is recorded.
    pub fn on_scroll(&self, offset: f64, now_ms: u64) -> ScrollEffects {
        self.offset.set(offset);
        if self.state() == TrackingState::Suspended {
            vtrace!(offset, "scroll event while suspended");
            return ScrollEffects::NONE;
        }
        let mut throttle = self.throttle.get();
        let groups = throttle.try_acquire(now_ms);
        self.throttle.set(throttle);
        vtrace!(offset, now_ms, groups, "on_scroll");
        ScrollEffects {
            overlay: true,
            groups,
        }
    }

    /// Scrolling came to rest: everything is refreshed with the last known offset.
    pub fn on_momentum_scroll_end(&self) -> ScrollEffects {
        vtrace!(offset = self.offset(), "on_momentum_scroll_end");
        ScrollEffects::ALL
    }

    /// Enters [`TrackingState::Suspended`] for a programmatic scroll to `target`.
    pub fn suspend(&self, target: f64) -> Result<(), ScrollError> {
        if self.state() == TrackingState::Suspended {
            vwarn!(target, "rejecting scroll_to while another one is in flight");
            return Err(ScrollError::ScrollInProgress);
        }
        self.state.set(TrackingState::Suspended);
        self.offset.set(target);
        vdebug!(target, "tracking suspended");
        Ok(())
    }

    pub fn resume(&self) {
        if self.state.replace(TrackingState::Tracking) == TrackingState::Suspended {
            vdebug!(offset = self.offset(), "tracking resumed");
        }
    }
}
