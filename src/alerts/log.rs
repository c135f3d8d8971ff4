//! Notifier that only writes a log line.

use crate::alerts::Notifier;
use crate::zones::Zone;

#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, zone: Zone) {
        tracing::info!(zone = %zone, "Zone alert");
    }
}
