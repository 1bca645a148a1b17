//! # Catalog State
//!
//! The catalog loaded at startup, plus the store it is saved back to.
//!
//! ## Edit Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  with_catalog_mut(edit)                                                 │
//! │                                                                         │
//! │  working = catalog.clone()                                              │
//! │  edit(&mut working) ───── Err ──► nothing saved, catalog untouched      │
//! │       │                                                                 │
//! │       ▼ Ok                                                              │
//! │  store.save(&working) ─── Err ──► in-memory catalog untouched           │
//! │       │                                                                 │
//! │       ▼ Ok                                                              │
//! │  catalog = working                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Memory and disk never disagree after an edit.

use aqua_core::{Catalog, CoreError, Product};
use aqua_store::{CatalogStore, StoreError};

/// Catalog held for the session.
#[derive(Debug)]
pub struct CatalogState {
    store: CatalogStore,
    catalog: Catalog,
    load_warning: Option<StoreError>,
}

impl CatalogState {
    /// Loads the catalog; a missing or corrupt file leaves it empty and
    /// keeps the error for the front end to show.
    pub fn open(store: CatalogStore) -> Self {
        let (catalog, load_warning) = store.load_or_empty();
        CatalogState {
            store,
            catalog,
            load_warning,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// The load error, if any. Handed out once.
    pub fn take_load_warning(&mut self) -> Option<StoreError> {
        self.load_warning.take()
    }

    pub fn product(&self, id: u32) -> Result<&Product, CoreError> {
        self.catalog.get(id).ok_or(CoreError::ProductNotFound(id))
    }

    /// Applies an edit and persists it. The edit is kept only if both the
    /// edit and the save succeed.
    pub fn with_catalog_mut<F, R, E>(&mut self, edit: F) -> Result<R, E>
    where
        F: FnOnce(&mut Catalog) -> Result<R, E>,
        E: From<StoreError>,
    {
        let mut working = self.catalog.clone();
        let result = edit(&mut working)?;
        self.store.save(&working)?;
        self.catalog = working;
        Ok(result)
    }
}
