//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, lenient body parsing)
//!     → handlers.rs (call into ZoneService)
//!     → response.rs (errors → {"error": msg})
//!     → Send to client
//! ```

pub mod handlers;
pub mod page;
pub mod request;
pub mod response;
pub mod server;

pub use request::{lenient_json, MakeRequestUuidV4, X_REQUEST_ID};
pub use response::{ApiError, ApiResult};
pub use server::{AppState, HttpServer};
