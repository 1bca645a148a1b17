//! # aqua-core: Pure Pricing and Quotation Logic for Aqua Quote
//!
//! This crate is the **heart** of Aqua Quote. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Aqua Quote Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Front ends (desktop form / browser dashboard)          │   │
//! │  │   Product picker ──► Quantity/Mode ──► Quote table ──► Export   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    aqua-desk commands                           │   │
//! │  │    list_products, add_to_quote, export_quote, save_product      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ aqua-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐  │   │
//! │  │  │ catalog │ │ pricing │ │  quote  │ │ export  │ │validation│  │   │
//! │  │  │ upsert  │ │ retail  │ │ add_line│ │ format  │ │  drafts  │  │   │
//! │  │  │ next_id │ │ margin  │ │ totals  │ │ render  │ │ quantity │  │   │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └─────────┘ └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO CLOCK • PURE FUNCTIONS                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 aqua-store (Catalog file)                       │   │
//! │  │                products.json, load/save wholesale               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, LineItem, PricingMode, TaxFactor)
//! - [`money`] - Money type over `rust_decimal` (no floating point!)
//! - [`catalog`] - Product collection, id assignment, upsert/remove
//! - [`pricing`] - Retail and margin-based wholesale unit prices
//! - [`quote`] - Quote accumulation and tax back-calculation
//! - [`export`] - Printable document layout
//! - [`validation`] - Product form and quantity checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use aqua_core::{Money, PricingMode, Product, Quotation, TaxFactor};
//! use rust_decimal_macros::dec;
//!
//! let garrafon = Product {
//!     id: 1,
//!     name: "Garrafón 20L".into(),
//!     units_per_case: 1,
//!     distributor_cost_with_tax: Money::new(dec!(58)),
//!     retail_price_with_tax: Money::new(dec!(95)),
//!     wholesale_case_price: Money::new(dec!(80)),
//! };
//!
//! let mut quote = Quotation::new(TaxFactor::default());
//! quote.add_line(&garrafon, 3, PricingMode::Retail, None).unwrap();
//! quote.add_line(&garrafon, 2, PricingMode::Wholesale, Some(dec!(25))).unwrap();
//!
//! let totals = quote.totals();
//! assert_eq!(totals.grand_total.to_string(), "$430.00");
//! assert_eq!(totals.pretax_subtotal.to_string(), "$370.69");
//! assert_eq!(totals.tax_amount.to_string(), "$59.31");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod export;
pub mod money;
pub mod pricing;
pub mod quote;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use error::{
    CatalogParseError, CoreError, CoreResult, PricingError, QuoteStateError, ValidationError,
};
pub use export::{export_file_name, ExportFormatter, QuoteDocument};
pub use money::Money;
pub use pricing::{compute_unit_price, parse_margin, preview_unit_price};
pub use quote::{QuoteSnapshot, QuoteState, QuoteTotals, Quotation};
pub use types::*;
pub use validation::{ProductDraft, ProductInput};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum cases on a single quote line.
///
/// ## Business Reason
/// Catches typos (1000 instead of 100) before they reach a printed quote.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Largest catalog price accepted, per case, tax included.
///
/// Together with [`MAX_PRICE_DECIMAL_PLACES`] this keeps every stored price
/// exactly representable as the JSON number written to the catalog file.
pub const MAX_PRICE: u32 = 1_000_000;

/// Most decimal places a catalog price may carry.
pub const MAX_PRICE_DECIMAL_PLACES: u32 = 4;
