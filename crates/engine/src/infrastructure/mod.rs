//! Infrastructure implementations.
//!
//! Contains port traits, their reference implementations, configuration and
//! logging bootstrap.

pub mod config;
pub mod file_flag_store;
pub mod memory_host;
pub mod ports;
pub mod random;
pub mod telemetry;
