//! # aqua-store: Catalog File Storage for Aqua Quote
//!
//! Loads and saves the product catalog as one flat JSON file.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Aqua Quote Data Flow                             │
//! │                                                                         │
//! │  Desk command (save_product)                                            │
//! │       │  validate + Catalog::upsert (aqua-core)                         │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    aqua-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────────┐           ┌────────────────────┐       │   │
//! │  │   │   CatalogStore     │           │     StoreError     │       │   │
//! │  │   │   (file.rs)        │──────────►│     (error.rs)     │       │   │
//! │  │   │                    │           │                    │       │   │
//! │  │   │ load               │           │ Load (recoverable) │       │   │
//! │  │   │ load_or_empty      │           │                    │       │   │
//! │  │   │ save (temp+rename) │           │ Persistence        │       │   │
//! │  │   └────────────────────┘           └────────────────────┘       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      products.json                              │   │
//! │  │   ~/.local/share/quote/products.json (or AQUA_CATALOG_PATH)     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use aqua_store::CatalogStore;
//!
//! let store = CatalogStore::new("products.json");
//! let (catalog, warning) = store.load_or_empty();
//! if let Some(err) = warning {
//!     eprintln!("starting with an empty catalog: {err}");
//! }
//! store.save(&catalog)?;
//! # Ok::<(), aqua_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod file;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use file::{CatalogStore, CATALOG_FILE_NAME};
