//! # Catalog Commands
//!
//! Catalog maintenance. Every accepted edit is written to disk before the
//! command returns.

use tracing::{debug, info};

use aqua_core::{Product, ProductDraft};

use crate::error::{ApiError, ApiResult};
use crate::state::CatalogState;

/// All products in display order.
pub fn list_products(catalog: &CatalogState) -> Vec<Product> {
    debug!("list_products command");
    catalog.catalog().products().to_vec()
}

/// Validates the form, inserts or replaces the product, saves the file.
///
/// ## Behavior
/// - `draft.id` empty: new product, id assigned as max + 1
/// - `draft.id` set and known: replaced in place
/// - any validation error: catalog untouched
///
/// ## Returns
/// The product as stored.
pub fn save_product(catalog: &mut CatalogState, draft: ProductDraft) -> ApiResult<Product> {
    debug!(id = ?draft.id, name = %draft.name, "save_product command");

    let input = draft.validate()?;
    let id = catalog.with_catalog_mut(|c| c.upsert(input).map_err(ApiError::from))?;
    let product = catalog.product(id)?.clone();

    info!(id, name = %product.name, "Product saved");
    Ok(product)
}

/// Removes a product and saves the file.
///
/// ## Returns
/// `false` when no product had that id (nothing is written then).
pub fn delete_product(catalog: &mut CatalogState, id: u32) -> ApiResult<bool> {
    debug!(id, "delete_product command");

    if catalog.catalog().get(id).is_none() {
        return Ok(false);
    }
    let removed = catalog.with_catalog_mut(|c| Ok::<_, ApiError>(c.remove(id)))?;

    info!(id, "Product deleted");
    Ok(removed)
}
