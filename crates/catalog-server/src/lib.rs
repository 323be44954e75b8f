//! # Catalog Server Library
//!
//! Dependency wiring, logging setup and startup utilities for the product
//! catalog server binary.

pub mod di;
pub mod startup;
pub mod telemetry;
