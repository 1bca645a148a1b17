//! # Catalog
//!
//! The in-memory product catalog and its maintenance rules.
//!
//! ## Catalog Maintenance Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Edits                                        │
//! │                                                                         │
//! │  Form Action             Operation                Effect                │
//! │  ───────────             ─────────                ──────                │
//! │                                                                         │
//! │  Save (no id) ─────────► upsert(input) ─────────► push with next_id    │
//! │                                                                         │
//! │  Save (id = 3) ────────► upsert(input) ─────────► products[i] = input  │
//! │                                                   (same position)       │
//! │                                                                         │
//! │  Delete (id = 3) ──────► remove(3) ─────────────► retain(id != 3)      │
//! │                                                                         │
//! │  After every accepted edit the store rewrites the whole file.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reading and writing the file is `aqua-store`'s job. This module only
//! knows the JSON text form.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{CatalogParseError, ValidationError};
use crate::types::Product;
use crate::validation::{validate_product, ProductInput, ValidationResult};

/// Indentation used when the catalog is written out.
const JSON_INDENT: &[u8] = b"    ";

/// Ordered collection of products. Order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Builds a catalog from records that did not come through the form,
    /// checking ids are unique and every record is well formed.
    pub fn from_products(products: Vec<Product>) -> ValidationResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(ValidationError::Duplicate {
                    field: "id".to_string(),
                    value: product.id.to_string(),
                });
            }
            validate_product(product)?;
        }
        Ok(Catalog { products })
    }

    /// Parses the catalog file's text form.
    ///
    /// The store wraps the error with the file path.
    pub fn from_json(text: &str) -> Result<Self, CatalogParseError> {
        let products: Vec<Product> = serde_json::from_str(text)?;
        Ok(Catalog::from_products(products)?)
    }

    /// Renders the catalog as a pretty JSON array, four-space indented,
    /// with a trailing newline.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        buf.push(b'\n');
        // serde_json only ever emits UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks a product up by id.
    pub fn get(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Looks a product up by its display name (first match).
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        let name = name.trim();
        self.products.iter().find(|p| p.name == name)
    }

    /// Names in display order, for product pickers.
    pub fn names(&self) -> Vec<&str> {
        self.products.iter().map(|p| p.name.as_str()).collect()
    }

    /// Returns `(max existing id, or 0) + 1`.
    ///
    /// Fails once some product already carries `u32::MAX`; ids are never
    /// reused below the maximum.
    ///
    /// ```rust
    /// use aqua_core::catalog::Catalog;
    ///
    /// assert_eq!(Catalog::new().next_id().unwrap(), 1);
    /// ```
    pub fn next_id(&self) -> ValidationResult<u32> {
        let max = self.products.iter().map(|p| p.id).max().unwrap_or(0);
        max.checked_add(1).ok_or_else(|| ValidationError::OutOfRange {
            field: "id".to_string(),
            min: 1,
            max: i64::from(u32::MAX),
        })
    }

    /// Inserts or replaces a product and returns the id it now carries.
    ///
    /// ## Behavior
    /// - `input.id` matches an entry: that entry is replaced in place
    /// - otherwise (no id, or an id nobody has): appended with `next_id`
    /// - no id left to hand out: error, catalog untouched
    pub fn upsert(&mut self, input: ProductInput) -> ValidationResult<u32> {
        if let Some(id) = input.id {
            if let Some(slot) = self.products.iter_mut().find(|p| p.id == id) {
                *slot = input.into_product(id);
                return Ok(id);
            }
        }

        let id = self.next_id()?;
        self.products.push(input.into_product(id));
        Ok(id)
    }

    /// Removes the product with `id`. Returns whether anything was removed;
    /// an unknown id is not an error.
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        self.products.len() != before
    }

    pub fn into_products(self) -> Vec<Product> {
        self.products
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
