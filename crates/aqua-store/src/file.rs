//! # Catalog File
//!
//! Whole-file load and save of the product catalog.
//!
//! ## Save Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Atomic Catalog Replace                               │
//! │                                                                         │
//! │  catalog.to_pretty_json()                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  create parent directory (if missing)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  write products.json.tmp ──── fails ───► Persistence error              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  rename over products.json ── fails ───► remove tmp, Persistence error  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  done: readers see either the old file or the new one, never half       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two sessions saving the same file race; the last rename wins.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use aqua_core::Catalog;

use crate::error::{StoreError, StoreResult};

/// Default file name inside the data directory.
pub const CATALOG_FILE_NAME: &str = "products.json";

/// Handle on the catalog file. Holds only the path; every call touches disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CatalogStore { path: path.into() }
    }

    /// Store at `<dir>/products.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        CatalogStore::new(dir.as_ref().join(CATALOG_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the catalog.
    ///
    /// A missing file is a load error like any other; callers that want
    /// to start empty use [`CatalogStore::load_or_empty`].
    pub fn load(&self) -> StoreResult<Catalog> {
        debug!(path = %self.path.display(), "Loading catalog");

        let text = fs::read_to_string(&self.path).map_err(|e| StoreError::load(&self.path, e))?;
        let catalog = Catalog::from_json(&text).map_err(|e| StoreError::load(&self.path, e))?;

        debug!(count = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Like [`CatalogStore::load`], but falls back to an empty catalog and
    /// hands back the error so the front end can show it.
    pub fn load_or_empty(&self) -> (Catalog, Option<StoreError>) {
        match self.load() {
            Ok(catalog) => (catalog, None),
            Err(err) => {
                warn!(error = %err, "Starting with an empty catalog");
                (Catalog::new(), Some(err))
            }
        }
    }

    /// Overwrites the file with the full catalog.
    pub fn save(&self, catalog: &Catalog) -> StoreResult<()> {
        debug!(path = %self.path.display(), count = catalog.len(), "Saving catalog");

        let result = self.write_atomically(catalog);
        match &result {
            Ok(()) => info!(path = %self.path.display(), count = catalog.len(), "Catalog saved"),
            Err(err) => error!(error = %err, "Catalog save failed"),
        }
        result
    }

    fn write_atomically(&self, catalog: &Catalog) -> StoreResult<()> {
        let text = catalog
            .to_pretty_json()
            .map_err(|e| StoreError::persistence(&self.path, e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::persistence(&self.path, e))?;
        }

        let tmp = self.temp_path()?;
        fs::write(&tmp, text).map_err(|e| StoreError::persistence(&self.path, e))?;

        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::persistence(&self.path, e));
        }
        Ok(())
    }

    /// `products.json` → `products.json.tmp`, next to the target so the
    /// rename never crosses filesystems.
    fn temp_path(&self) -> StoreResult<PathBuf> {
        let name = self
            .path
            .file_name()
            .ok_or_else(|| StoreError::persistence(&self.path, "path has no file name"))?;
        let mut tmp_name = OsString::from(name);
        tmp_name.push(".tmp");
        Ok(self.path.with_file_name(tmp_name))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use aqua_core::{Money, ProductDraft, ProductInput};
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn sample() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .upsert(ProductInput {
                id: None,
                name: "Garrafón 20L".to_string(),
                units_per_case: 1,
                distributor_cost_with_tax: Money::new(dec!(58)),
                retail_price_with_tax: Money::new(dec!(95)),
                wholesale_case_price: Money::new(dec!(80)),
            })
            .unwrap();
        catalog
            .upsert(ProductInput {
                id: None,
                name: "Botella 600ml (24)".to_string(),
                units_per_case: 24,
                distributor_cost_with_tax: Money::new(dec!(96.5)),
                retail_price_with_tax: Money::new(dec!(150)),
                wholesale_case_price: Money::new(dec!(120)),
            })
            .unwrap();
        catalog
    }

    #[test]
    fn test_missing_file_is_recoverable() {
        let dir = TempDir::new().unwrap();
        let store = CatalogStore::in_dir(dir.path());

        let err = store.load().unwrap_err();
        assert!(err.is_recoverable());

        let (catalog, warning) = store.load_or_empty();
        assert!(catalog.is_empty());
        assert!(matches!(warning, Some(StoreError::Load { .. })));
    }

    #[test]
    fn test_corrupt_file_is_recoverable() {
        let dir = TempDir::new().unwrap();
        let store = CatalogStore::in_dir(dir.path());
        fs::write(store.path(), "[{\"id\": 1, \"name\": ").unwrap();

        let (catalog, warning) = store.load_or_empty();
        assert!(catalog.is_empty());
        assert!(warning.unwrap().is_recoverable());

        // The broken file is left for the operator to inspect
        assert!(store.path().exists());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = CatalogStore::new(dir.path().join("nested").join("products.json"));
        let catalog = sample();

        store.save(&catalog).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, catalog);
        assert!(!dir.path().join("nested").join("products.json.tmp").exists());
    }

    #[test]
    fn test_finest_accepted_prices_survive_save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = CatalogStore::in_dir(dir.path());

        let draft = ProductDraft {
            id: None,
            name: "Hielo 5kg".to_string(),
            units_per_case: "1".to_string(),
            distributor_cost_with_tax: "95.1234".to_string(),
            retail_price_with_tax: "999999.9999".to_string(),
            wholesale_case_price: "0.0001".to_string(),
        };
        let mut catalog = sample();
        let id = catalog.upsert(draft.validate().unwrap()).unwrap();

        store.save(&catalog).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, catalog);

        let product = loaded.get(id).unwrap();
        assert_eq!(product.distributor_cost_with_tax, Money::new(dec!(95.1234)));
        assert_eq!(product.retail_price_with_tax, Money::new(dec!(999999.9999)));
        assert_eq!(product.wholesale_case_price, Money::new(dec!(0.0001)));
    }

    #[test]
    fn test_file_with_excess_precision_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = CatalogStore::in_dir(dir.path());
        fs::write(
            store.path(),
            r#"[{"id":1,"name":"Garrafón 20L","units_per_case":1,"distributor_cost_with_tax":95.123456789012345678,"retail_price_with_tax":95,"wholesale_case_price":80}]"#,
        )
        .unwrap();

        let err = store.load().unwrap_err();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("distributor cost"));
    }

    #[test]
    fn test_save_of_load_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = CatalogStore::in_dir(dir.path());
        store.save(&sample()).unwrap();
        let first = fs::read(store.path()).unwrap();

        let loaded = store.load().unwrap();
        store.save(&loaded).unwrap();
        let second = fs::read(store.path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_non_ascii_kept_literal() {
        let dir = TempDir::new().unwrap();
        let store = CatalogStore::in_dir(dir.path());
        store.save(&sample()).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\"name\": \"Garrafón 20L\""));
        assert!(!text.contains("\\u00f3"));
        assert!(text.starts_with("[\n    {\n        \"id\": 1,"));
    }

    #[test]
    fn test_unwritable_destination_fails_loudly() {
        let dir = TempDir::new().unwrap();
        // The target is a directory, so the final rename cannot succeed
        let target = dir.path().join("products.json");
        fs::create_dir(&target).unwrap();
        let store = CatalogStore::new(&target);

        let err = store.save(&sample()).unwrap_err();
        assert!(matches!(err, StoreError::Persistence { .. }));
        assert!(!err.is_recoverable());
        assert!(!dir.path().join("products.json.tmp").exists());
    }

    #[test]
    fn test_parent_is_a_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("data");
        fs::write(&blocker, "not a directory").unwrap();
        let store = CatalogStore::in_dir(&blocker);

        let err = store.save(&sample()).unwrap_err();
        assert!(matches!(err, StoreError::Persistence { .. }));
    }

    #[test]
    fn test_failed_save_keeps_previous_file() {
        let dir = TempDir::new().unwrap();
        let store = CatalogStore::in_dir(dir.path());
        store.save(&sample()).unwrap();
        let before = fs::read(store.path()).unwrap();

        // Block the temp file slot with a directory
        fs::create_dir(dir.path().join("products.json.tmp")).unwrap();
        let mut bigger = sample();
        bigger.remove(1);
        assert!(store.save(&bigger).is_err());

        assert_eq!(fs::read(store.path()).unwrap(), before);
    }
}
