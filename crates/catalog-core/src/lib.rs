//! # Catalog Core
//!
//! Core types and error definitions shared by every layer of the product
//! catalog service: the [`Product`] entity, its [`ProductId`], and the
//! unified [`CatalogError`].

pub mod error;
pub mod product;
pub mod result;

pub use error::*;
pub use product::*;
pub use result::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
