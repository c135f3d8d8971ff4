//! Zone Tracker Library
//!
//! Tracks which threshold zone (GREEN/YELLOW/RED/MAX) an external
//! measurement sits in, counts zone transitions and serves both over a
//! small JSON API.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!     HTTP request   │  ┌─────────┐    ┌──────────┐    ┌─────────┐  │
//!     ───────────────┼─▶│  http   │───▶│  zones   │───▶│ alerts  │──┼──▶ external command
//!                    │  │ server  │    │ service  │    │notifier │  │
//!     JSON response  │  └─────────┘    └──────────┘    └─────────┘  │
//!     ◀──────────────┼──────┘                                       │
//!                    │  config · observability · lifecycle          │
//!                    └──────────────────────────────────────────────┘
//! ```

pub mod alerts;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod zones;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use zones::{Levels, Zone, ZoneError, ZoneService, ZoneState};
