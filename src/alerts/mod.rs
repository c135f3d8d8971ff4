//! Zone alert notifications.
//!
//! # Data Flow
//! ```text
//! ZoneService commits a transition
//!     → lock released
//!     → Notifier::notify(zone)   (alert zones only)
//!         → log.rs      tracing event
//!         → command.rs  spawn external player, never awaited
//! ```
//!
//! # Design Decisions
//! - `notify` must return immediately; slow work goes to a spawned task
//! - Failures are logged and dropped, state is already committed

pub mod command;
pub mod log;

use std::sync::Arc;

use crate::config::AlertConfig;
use crate::zones::Zone;

pub use self::command::CommandNotifier;
pub use self::log::LogNotifier;

/// Receives a zone every time the tracker enters an alert zone.
pub trait Notifier: Send + Sync {
    /// Fire-and-forget; must not block the caller.
    fn notify(&self, zone: Zone);
}

/// Notifier used when alerts are disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _zone: Zone) {}
}

/// Build the notifier described by the `[alerts]` config table.
pub fn from_config(config: &AlertConfig) -> Arc<dyn Notifier> {
    if !config.enabled {
        tracing::info!("Zone alerts disabled");
        return Arc::new(NoopNotifier);
    }

    match CommandNotifier::from_argv(&config.command) {
        Some(notifier) => {
            tracing::info!(command = ?config.command, "Zone alerts play external command");
            Arc::new(notifier)
        }
        None => Arc::new(LogNotifier),
    }
}
