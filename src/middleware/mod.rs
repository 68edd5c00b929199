//! HTTP middleware: request gatekeeping, rate limiting, and logging.

pub mod gatekeeper;
pub mod logging;
pub mod rate_limit;

pub use gatekeeper::{gatekeeper_middleware, Gatekeeper};
pub use logging::request_logging;
pub use rate_limit::RateLimiter;
