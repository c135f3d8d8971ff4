//! Zone tracking core.
//!
//! # Data Flow
//! ```text
//! POST /api/levels payload
//!     → validator.rs (typed decode, ordering check)
//!     → service.rs (swap levels under lock)
//!
//! POST /api/state label  /  POST /api/measure reading
//!     → levels.rs (parse label or classify dB)
//!     → tracker.rs (transition + counters, under the service lock)
//!     → alerts (notifier, after the lock is released)
//! ```
//!
//! # Design Decisions
//! - All state lives in one `ZoneService` built at startup and shared via Arc
//! - Tracker and validator are pure and know nothing about HTTP
//! - GREEN is the baseline and is never counted

pub mod error;
pub mod levels;
pub mod service;
pub mod tracker;
pub mod validator;

pub use error::ZoneError;
pub use levels::{rms_to_db, Levels, Zone};
pub use service::{Measurement, ZoneService};
pub use tracker::{StateTracker, Transition, ZoneState};
pub use validator::validate;
