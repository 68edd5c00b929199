//! Job board backend library.
//!
//! Public job browsing and application submission, an admin portal API,
//! and the request gatekeeping layer (rate limiting + session auth) that
//! fronts every route.

pub mod api;
pub mod auth;
pub mod middleware;
pub mod store;
