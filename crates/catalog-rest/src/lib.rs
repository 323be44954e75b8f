//! # Catalog REST
//!
//! REST API layer using Axum for the product catalog service.
//! Serves `GET /products/{id}` plus health endpoints.

pub mod controllers;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
