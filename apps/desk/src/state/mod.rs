//! # State Module
//!
//! Session state for the desk shell.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────┐          │
//! │  │ ConfigState  │  │  CatalogState    │  │   Quotation      │          │
//! │  │              │  │                  │  │   (aqua-core)    │          │
//! │  │ catalog_path │  │  CatalogStore    │  │  client_name     │          │
//! │  │ export_dir   │  │  Catalog         │  │  line_items      │          │
//! │  │ tax_factor   │  │  load warning    │  │  tax_factor      │          │
//! │  └──────────────┘  └──────────────────┘  └──────────────────┘          │
//! │                                                                         │
//! │  One operator, one thread: commands borrow what they need, `&mut`      │
//! │  for the state they change. No locks.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod config;

pub use catalog::CatalogState;
pub use config::{ConfigState, EXPORT_SUBDIR};
