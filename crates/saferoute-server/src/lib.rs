//! Shared library surface for the safe-route server and its tests.

pub mod advisory;
pub mod api;
pub mod config;
pub mod planner;
pub mod risk;
pub mod state;
