//! gnss-planning test modules
pub mod toolkit;

mod dop;
