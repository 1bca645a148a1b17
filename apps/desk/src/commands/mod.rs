//! # Desk Commands
//!
//! Every operation a front end can ask for.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── catalog.rs  ◄─── list_products, save_product, delete_product
//! ├── quote.rs    ◄─── preview_price, add_to_quote, set_client,
//! │                    get_quote, clear_quote
//! └── export.rs   ◄─── export_quote
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Front end (console line, form button, dashboard request)               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  fn add_to_quote(                                                       │
//! │      catalog: &CatalogState,     ◄── only the state it reads           │
//! │      quote: &mut Quotation,      ◄── and the state it changes          │
//! │      request: AddLineRequest,    ◄── raw operator input                │
//! │  ) -> ApiResult<QuoteResponse>                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Serializable response or ApiError { code, message }                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod export;
pub mod quote;
