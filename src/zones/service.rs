//! The process-wide zone service.
//!
//! Holds the current levels and the transition tracker behind one lock so
//! that every read-compare-increment sequence is atomic. Alerts go out
//! after the lock is released.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde_json::Value;

use crate::alerts::Notifier;
use crate::observability::metrics;
use crate::zones::error::ZoneError;
use crate::zones::levels::{rms_to_db, Levels, Zone};
use crate::zones::tracker::{StateTracker, Transition, ZoneState};
use crate::zones::validator;

#[derive(Debug, Default)]
struct Inner {
    levels: Levels,
    tracker: StateTracker,
}

/// Result of classifying and recording one measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    pub zone: Zone,
    pub db: f64,
    pub state: ZoneState,
}

/// Owns levels and zone state for the life of the process.
pub struct ZoneService {
    inner: Mutex<Inner>,
    notifier: Arc<dyn Notifier>,
    alert_zones: Vec<Zone>,
}

impl ZoneService {
    /// Create a service starting from `levels` with an unset zone state.
    pub fn new(levels: Levels, notifier: Arc<dyn Notifier>, alert_zones: Vec<Zone>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                levels,
                tracker: StateTracker::new(),
            }),
            notifier,
            alert_zones,
        }
    }

    // A panic while holding the lock cannot leave Inner half-written,
    // so a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn levels(&self) -> Levels {
        self.lock().levels
    }

    pub fn state(&self) -> ZoneState {
        self.lock().tracker.state()
    }

    /// Validate `payload` and replace all four levels at once.
    pub fn update_levels(&self, payload: &Value) -> Result<Levels, ZoneError> {
        let levels = validator::validate(payload)?;
        self.lock().levels = levels;

        metrics::record_level_update();
        tracing::info!(
            green = levels.green,
            yellow = levels.yellow,
            red = levels.red,
            max = levels.max,
            "Levels updated"
        );
        Ok(levels)
    }

    /// Record a zone by its wire label.
    pub fn record_label(&self, label: &str) -> Result<ZoneState, ZoneError> {
        let zone: Zone = label.parse()?;
        Ok(self.record_zone(zone))
    }

    /// Record a zone and fire an alert when it is a new alert zone.
    pub fn record_zone(&self, zone: Zone) -> ZoneState {
        let transition = self.lock().tracker.record_zone(zone);
        self.after_record(zone, transition)
    }

    /// Classify a dB reading against the current levels and record it.
    pub fn record_measurement(&self, db: f64) -> Result<Measurement, ZoneError> {
        if !db.is_finite() {
            return Err(ZoneError::InvalidMeasurement);
        }

        let (zone, transition) = {
            let mut inner = self.lock();
            let zone = inner.levels.classify(db);
            (zone, inner.tracker.record_zone(zone))
        };
        let state = self.after_record(zone, transition);

        Ok(Measurement { zone, db, state })
    }

    /// Classify an RMS amplitude; see [`rms_to_db`].
    pub fn record_rms(&self, rms: f64) -> Result<Measurement, ZoneError> {
        if !rms.is_finite() || rms < 0.0 {
            return Err(ZoneError::InvalidMeasurement);
        }
        self.record_measurement(rms_to_db(rms))
    }

    /// Zero all counters and forget the last zone.
    pub fn reset(&self) -> ZoneState {
        let state = self.lock().tracker.reset();
        metrics::record_reset();
        tracing::info!("Zone state reset");
        state
    }

    fn after_record(&self, zone: Zone, transition: Transition) -> ZoneState {
        if transition.changed {
            metrics::record_transition(zone);
            tracing::debug!(zone = %zone, state = ?transition.state, "Zone transition");

            if self.alert_zones.contains(&zone) {
                self.notifier.notify(zone);
            }
        }
        transition.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::NoopNotifier;
    use serde_json::json;

    #[derive(Default)]
    struct RecordingNotifier {
        zones: Mutex<Vec<Zone>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, zone: Zone) {
            self.zones.lock().unwrap().push(zone);
        }
    }

    fn service_with_recorder() -> (ZoneService, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let service = ZoneService::new(Levels::default(), notifier.clone(), vec![Zone::Yellow]);
        (service, notifier)
    }

    #[test]
    fn test_yellow_alert_fires_once_per_entry() {
        let (service, notifier) = service_with_recorder();

        service.record_zone(Zone::Yellow);
        service.record_zone(Zone::Yellow);
        service.record_zone(Zone::Red);
        service.record_zone(Zone::Max);
        service.record_zone(Zone::Green);
        service.record_zone(Zone::Yellow);

        assert_eq!(*notifier.zones.lock().unwrap(), vec![Zone::Yellow, Zone::Yellow]);
        assert_eq!(service.state().yellow, 2);
    }

    #[test]
    fn test_invalid_label_leaves_state() {
        let (service, notifier) = service_with_recorder();
        service.record_zone(Zone::Red);

        assert_eq!(service.record_label("PURPLE"), Err(ZoneError::InvalidLabel));
        assert_eq!(
            service.state(),
            ZoneState { yellow: 0, red: 1, max: 0, last_zone: Some(Zone::Red) }
        );
        assert!(notifier.zones.lock().unwrap().is_empty());
    }

    #[test]
    fn test_update_levels_is_atomic() {
        let service = ZoneService::new(Levels::default(), Arc::new(NoopNotifier), Vec::new());

        let rejected = service.update_levels(&json!({"GREEN": 0, "YELLOW": -1, "RED": -2, "MAX": -2}));
        assert_eq!(rejected, Err(ZoneError::InvalidOrdering));
        assert_eq!(service.levels(), Levels::default());

        let levels = service
            .update_levels(&json!({"GREEN": -30, "YELLOW": -20, "RED": -10, "MAX": -10}))
            .unwrap();
        assert_eq!(service.levels(), levels);
    }

    #[test]
    fn test_measurement_uses_current_levels() {
        let (service, notifier) = service_with_recorder();

        let measurement = service.record_measurement(-4.0).unwrap();
        assert_eq!(measurement.zone, Zone::Yellow);
        assert_eq!(measurement.state.yellow, 1);

        service
            .update_levels(&json!({"GREEN": -10, "YELLOW": -8, "RED": -6, "MAX": -5}))
            .unwrap();
        let measurement = service.record_measurement(-4.0).unwrap();
        assert_eq!(measurement.zone, Zone::Max);
        assert_eq!(measurement.state.max, 1);

        assert_eq!(*notifier.zones.lock().unwrap(), vec![Zone::Yellow]);
    }

    #[test]
    fn test_rms_measurement() {
        let (service, _) = service_with_recorder();

        assert_eq!(service.record_rms(1.0).unwrap().zone, Zone::Max);
        assert_eq!(service.record_rms(0.0).unwrap().zone, Zone::Green);
        assert_eq!(service.record_rms(-0.5), Err(ZoneError::InvalidMeasurement));
        assert_eq!(service.record_measurement(f64::NAN), Err(ZoneError::InvalidMeasurement));
    }

    #[test]
    fn test_reset() {
        let (service, _) = service_with_recorder();
        service.record_zone(Zone::Yellow);
        service.record_zone(Zone::Max);

        assert_eq!(service.reset(), ZoneState::default());
        assert_eq!(service.state(), ZoneState::default());
    }

    #[test]
    fn test_concurrent_records_count_each_transition() {
        let service = Arc::new(ZoneService::new(Levels::default(), Arc::new(NoopNotifier), Vec::new()));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let service = service.clone();
                std::thread::spawn(move || {
                    let zone = if i % 2 == 0 { Zone::Red } else { Zone::Green };
                    for _ in 0..100 {
                        service.record_zone(zone);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let state = service.state();
        assert!(state.red >= 1);
        assert!(matches!(state.last_zone, Some(Zone::Red) | Some(Zone::Green)));
        assert_eq!(state.yellow + state.max, 0);
    }
}
