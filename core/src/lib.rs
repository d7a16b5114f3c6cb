//! Occupancy-monitoring core for the CrowdCount dashboard platform.
//!
//! The modules cover the logic shared by every dashboard surface: the
//! threshold alert detector, the zone editor and its polygon engine, the
//! zone data cache, and occupancy sample types. Rendering and the backend
//! API stay behind small seams (`ViewBridge`, the dashboard API client).

pub mod alerts;
pub mod cache;
pub mod occupancy;
pub mod prelude;
pub mod telemetry;
pub mod zones;

pub use prelude::{AlertTransition, AreaId, FetchError, FetchResult, ViewBridge};
