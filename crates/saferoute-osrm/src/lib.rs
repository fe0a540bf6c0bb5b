//! Client for OSRM-compatible routing services.

pub mod client;
pub mod polyline;

pub use client::{OsrmClient, OsrmError, OsrmRoute};
