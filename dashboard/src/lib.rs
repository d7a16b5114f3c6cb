//! Headless driver for the CrowdCount occupancy dashboard.
//!
//! Wires the crowdcore domain logic to the real backend: a typed HTTP
//! client, the fan-out polling engine, and the session object that
//! threads all state through explicitly.

pub mod api;
pub mod config;
pub mod poller;
pub mod session;
pub mod view;
