//! # Catalog Repository
//!
//! Store access for the product catalog:
//!
//! ```text
//! ProductService
//!   ↓  Arc<dyn ProductRepository>   (store interface)
//! PgProductRepository               (PostgreSQL / SQLx)
//!   ↓  Arc<dyn DatabasePoolInterface>
//! PostgreSQL
//! ```
//!
//! [`seed`] holds the fixed product list inserted on request at startup.

pub mod pool;
pub mod postgres;
pub mod seed;
pub mod traits;

pub use pool::*;
pub use postgres::*;
pub use seed::{default_products, seed_products, SeedReport};
pub use traits::*;
