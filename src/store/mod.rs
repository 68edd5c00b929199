//! Job board persistence layer.

pub mod db;
pub mod models;

pub use db::JobStore;
