//! # Catalog Service
//!
//! Read-through product lookups: the cache abstraction and its backends,
//! and the service that orchestrates cache, store and cache write-back.

pub mod cache;
pub mod r#impl;
pub mod product_service;

pub use cache::*;
pub use product_service::*;
pub use r#impl::ProductServiceImpl;
