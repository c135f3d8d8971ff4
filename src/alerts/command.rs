//! Notifier that runs an external command, typically an audio player.
//!
//! # Design Decisions
//! - The child runs on a spawned tokio task; `notify` never waits for it
//! - At most one child at a time: an alert arriving while the previous one
//!   is still playing is skipped
//! - The zone label is passed to the child as the `ZONE` env variable

use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::process::Command;
use tokio::runtime::Handle;

use crate::alerts::Notifier;
use crate::zones::Zone;

#[derive(Debug)]
pub struct CommandNotifier {
    program: String,
    args: Vec<String>,
    running: Arc<AtomicBool>,
}

impl CommandNotifier {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Build from an argv list; `None` when the list is empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }

    /// True while a previously spawned command has not exited.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

impl Notifier for CommandNotifier {
    fn notify(&self, zone: Zone) {
        let Ok(handle) = Handle::try_current() else {
            tracing::warn!(zone = %zone, "No async runtime available, alert dropped");
            return;
        };

        if self.running.swap(true, Ordering::AcqRel) {
            tracing::debug!(zone = %zone, "Previous alert still running, skipping");
            return;
        }

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .env("ZONE", zone.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let running = self.running.clone();
        let program = self.program.clone();
        handle.spawn(async move {
            match command.status().await {
                Ok(status) if status.success() => {
                    tracing::debug!(zone = %zone, program = %program, "Alert command finished");
                }
                Ok(status) => {
                    tracing::warn!(zone = %zone, program = %program, status = %status, "Alert command failed");
                }
                Err(e) => {
                    tracing::warn!(zone = %zone, program = %program, error = %e, "Failed to spawn alert command");
                }
            }
            running.store(false, Ordering::Release);
        });
    }
}
