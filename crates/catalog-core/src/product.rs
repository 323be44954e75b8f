//! The product entity and its typed identifier.

use crate::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// A strongly-typed wrapper for product IDs.
///
/// Always positive once constructed through [`ProductId::new`] or
/// [`ProductId::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Creates a product ID, rejecting zero and negative values.
    pub fn new(id: i64) -> CatalogResult<Self> {
        if id <= 0 {
            return Err(CatalogError::validation(format!(
                "Product ID must be positive, got {}",
                id
            )));
        }
        Ok(Self(id))
    }

    /// Parses a product ID from a decimal string.
    pub fn parse(s: &str) -> CatalogResult<Self> {
        let id = s
            .parse::<i64>()
            .map_err(|_| CatalogError::validation(format!("Invalid product ID: {}", s)))?;
        Self::new(id)
    }

    /// Returns the inner integer.
    #[must_use]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A product record.
///
/// Field order is the JSON field order served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl Product {
    /// Creates a new product.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            price,
        }
    }

    /// Serializes the product to its JSON wire form.
    pub fn to_json_bytes(&self) -> CatalogResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}
