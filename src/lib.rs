//! Read-only JSON API over a climate dataset of weather stations and their
//! daily measurements (precipitation and temperature observations).
//!
//! - [`store`]: SQLite access, opened read-only
//! - [`climate`]: startup-derived context and the query service
//! - [`gateway`]: axum routes under `/api/v1.0`
//! - [`config`]: TOML configuration with CLI overrides

pub mod climate;
pub mod config;
pub mod gateway;
pub mod store;

pub use climate::{ClimateContext, ClimateService, TemperatureSummary};
pub use config::Config;
