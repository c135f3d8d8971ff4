//! Zone transition state machine.
//!
//! # States
//! - unset: nothing recorded since start or the last reset
//! - GREEN / YELLOW / RED / MAX: the last recorded zone
//!
//! # State Transitions
//! ```text
//! L == last_zone: stay, counters untouched
//! L != last_zone: last_zone := L, then
//!     YELLOW → yellow += 1
//!     RED    → red += 1
//!     MAX    → max += 1
//!     GREEN  → (no counter)
//! reset: → unset, all counters 0
//! ```

use serde::{Deserialize, Serialize};

use crate::zones::levels::Zone;

/// Transition counters plus the last recorded zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneState {
    pub yellow: u64,
    pub red: u64,
    pub max: u64,
    pub last_zone: Option<Zone>,
}

/// Outcome of recording a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// State after the record.
    pub state: ZoneState,
    /// False when the zone repeated the last one.
    pub changed: bool,
}

/// Applies zone transitions to a [`ZoneState`].
///
/// Not synchronized; the owner serializes access.
#[derive(Debug, Default)]
pub struct StateTracker {
    state: ZoneState,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> ZoneState {
        self.state
    }

    /// Record a zone, counting it only when it differs from the last one.
    pub fn record_zone(&mut self, zone: Zone) -> Transition {
        if self.state.last_zone == Some(zone) {
            return Transition {
                state: self.state,
                changed: false,
            };
        }

        self.state.last_zone = Some(zone);
        match zone {
            Zone::Green => {}
            Zone::Yellow => self.state.yellow += 1,
            Zone::Red => self.state.red += 1,
            Zone::Max => self.state.max += 1,
        }

        Transition {
            state: self.state,
            changed: true,
        }
    }

    /// Zero every counter and forget the last zone.
    pub fn reset(&mut self) -> ZoneState {
        self.state = ZoneState::default();
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_zone_counts_once() {
        let mut tracker = StateTracker::new();
        let first = tracker.record_zone(Zone::Red);
        let second = tracker.record_zone(Zone::Red);

        assert!(first.changed);
        assert!(!second.changed);
        assert_eq!(second.state.red, 1);
        assert_eq!(first.state, second.state);
    }

    #[test]
    fn test_yellow_red_yellow_sequence() {
        let mut tracker = StateTracker::new();
        tracker.record_zone(Zone::Yellow);
        tracker.record_zone(Zone::Red);
        let state = tracker.record_zone(Zone::Yellow).state;

        assert_eq!(
            state,
            ZoneState { yellow: 2, red: 1, max: 0, last_zone: Some(Zone::Yellow) }
        );
    }

    #[test]
    fn test_green_only_moves_last_zone() {
        let mut tracker = StateTracker::new();
        let transition = tracker.record_zone(Zone::Green);

        assert!(transition.changed);
        assert_eq!(
            transition.state,
            ZoneState { yellow: 0, red: 0, max: 0, last_zone: Some(Zone::Green) }
        );
    }

    #[test]
    fn test_max_counter() {
        let mut tracker = StateTracker::new();
        tracker.record_zone(Zone::Max);
        tracker.record_zone(Zone::Green);
        let state = tracker.record_zone(Zone::Max).state;
        assert_eq!(state.max, 2);
        assert_eq!(state.yellow + state.red, 0);
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut tracker = StateTracker::new();
        assert_eq!(tracker.reset(), ZoneState::default());

        tracker.record_zone(Zone::Yellow);
        tracker.record_zone(Zone::Max);
        let state = tracker.reset();

        assert_eq!(state, ZoneState { yellow: 0, red: 0, max: 0, last_zone: None });
        // After reset the same zone counts again.
        assert!(tracker.record_zone(Zone::Max).changed);
    }

    #[test]
    fn test_wire_format() {
        let mut tracker = StateTracker::new();
        assert_eq!(
            serde_json::to_value(tracker.state()).unwrap(),
            serde_json::json!({"yellow": 0, "red": 0, "max": 0, "last_zone": null})
        );
        tracker.record_zone(Zone::Red);
        assert_eq!(
            serde_json::to_value(tracker.state()).unwrap(),
            serde_json::json!({"yellow": 0, "red": 1, "max": 0, "last_zone": "RED"})
        );
    }
}
