//! # Domain Types
//!
//! Core domain types used throughout Aqua Quote.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐   ┌──────────────────┐   ┌────────────────┐  │
//! │  │    Product           │   │    LineItem      │   │  PricingMode   │  │
//! │  │  ─────────────────── │   │  ──────────────  │   │  ────────────  │  │
//! │  │  id (u32)            │   │  product_name    │   │  Retail        │  │
//! │  │  name                │──►│  quantity        │   │  Wholesale     │  │
//! │  │  units_per_case      │   │  unit_price      │   └────────────────┘  │
//! │  │  distributor_cost    │   │  subtotal        │                       │
//! │  │  retail_price        │   │  (frozen copy)   │   ┌────────────────┐  │
//! │  │  wholesale_case_price│   └──────────────────┘   │   TaxFactor    │  │
//! │  └──────────────────────┘                          │  1.16 = 16%    │  │
//! │                                                    └────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `LineItem` copies the product name and freezes the unit price when it
//! is added. Editing or deleting the product afterwards does not touch the
//! quote.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{PricingError, ValidationError};
use crate::money::Money;

// =============================================================================
// Tax Factor
// =============================================================================

/// Multiplier that turns a tax-exclusive amount into a tax-inclusive one.
///
/// ## Why a Factor?
/// Every price in the catalog already includes tax. Going back to the
/// pre-tax amount is a division by the factor, going forward is a
/// multiplication. `1.16` = 16% tax.
///
/// The factor is injected everywhere it is needed (pricing engine, quote,
/// export) so other tax regimes only change configuration.
///
/// Deserializing goes through [`TaxFactor::new`], so a stored factor
/// below 1 is rejected the same way a typed one is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal")]
pub struct TaxFactor(Decimal);

/// 16% tax.
pub const DEFAULT_TAX_FACTOR: TaxFactor = TaxFactor(dec!(1.16));

/// Largest factor accepted (a 900% tax).
pub const MAX_TAX_FACTOR: u32 = 10;

impl TaxFactor {
    /// Creates a tax factor.
    ///
    /// ## Rules
    /// - Must be at least 1 (a factor below 1 would be a negative tax)
    /// - At most [`MAX_TAX_FACTOR`]
    ///
    /// ```rust
    /// use aqua_core::types::TaxFactor;
    /// use rust_decimal_macros::dec;
    ///
    /// assert!(TaxFactor::new(dec!(1.16)).is_ok());
    /// assert!(TaxFactor::new(dec!(1)).is_ok()); // tax-free
    /// assert!(TaxFactor::new(dec!(0.9)).is_err());
    /// assert!(TaxFactor::new(dec!(116)).is_err());
    /// ```
    pub fn new(factor: Decimal) -> Result<Self, ValidationError> {
        if factor < Decimal::ONE {
            return Err(ValidationError::invalid_format(
                "tax factor",
                "must be 1 or greater",
            ));
        }
        if factor > Decimal::from(MAX_TAX_FACTOR) {
            return Err(ValidationError::OutOfRange {
                field: "tax factor".to_string(),
                min: 1,
                max: i64::from(MAX_TAX_FACTOR),
            });
        }
        Ok(TaxFactor(factor))
    }

    /// Creates a tax factor from a rate in percent (16 → 1.16).
    pub fn from_rate_percent(rate: Decimal) -> Result<Self, ValidationError> {
        TaxFactor::new(Decimal::ONE + rate / Decimal::ONE_HUNDRED)
    }

    /// Returns the raw factor.
    #[inline]
    pub const fn factor(&self) -> Decimal {
        self.0
    }

    /// Returns the tax rate in percent, for labels ("Tax (16%)").
    pub fn rate_percent(&self) -> Decimal {
        ((self.0 - Decimal::ONE) * Decimal::ONE_HUNDRED).normalize()
    }

    /// Removes tax from a tax-inclusive amount.
    #[inline]
    pub fn strip(&self, amount_with_tax: Money) -> Money {
        amount_with_tax / self.0
    }

    /// Adds tax to a tax-exclusive amount.
    #[inline]
    pub fn apply(&self, amount_without_tax: Money) -> Money {
        amount_without_tax * self.0
    }

    /// [`TaxFactor::apply`], `None` if the result does not fit.
    #[inline]
    pub fn checked_apply(&self, amount_without_tax: Money) -> Option<Money> {
        amount_without_tax.checked_mul(self.0)
    }
}

impl TryFrom<Decimal> for TaxFactor {
    type Error = ValidationError;

    fn try_from(factor: Decimal) -> Result<Self, Self::Error> {
        TaxFactor::new(factor)
    }
}

impl Default for TaxFactor {
    fn default() -> Self {
        DEFAULT_TAX_FACTOR
    }
}

impl fmt::Display for TaxFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Product
// =============================================================================

/// One catalog entry (a case of a product).
///
/// Field order here is the field order in the catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Catalog-assigned identifier (max existing + 1).
    pub id: u32,

    /// Display name shown in the product list and on the quote.
    pub name: String,

    /// Pieces per case. Informational only.
    pub units_per_case: u32,

    /// What the distributor pays for one case, tax included.
    #[ts(as = "f64")]
    pub distributor_cost_with_tax: Money,

    /// Fixed price for retail customers, tax included.
    #[ts(as = "f64")]
    pub retail_price_with_tax: Money,

    /// Suggested case price. Stored and editable, never used in formulas.
    #[ts(as = "f64")]
    pub wholesale_case_price: Money,
}

// =============================================================================
// Pricing Mode
// =============================================================================

/// How a line item's unit price is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    /// Fixed retail price from the catalog.
    #[default]
    Retail,
    /// Distributor cost plus an operator-chosen margin.
    Wholesale,
}

impl fmt::Display for PricingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingMode::Retail => write!(f, "retail"),
            PricingMode::Wholesale => write!(f, "wholesale"),
        }
    }
}

impl FromStr for PricingMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "retail" | "r" => Ok(PricingMode::Retail),
            "wholesale" | "w" => Ok(PricingMode::Wholesale),
            other => Err(ValidationError::invalid_format(
                "pricing mode",
                format!("'{}' is not retail or wholesale", other),
            )),
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A product added to a quote.
///
/// ## Design Notes
/// - `product_name`: copied, not a reference to the catalog entry
/// - `unit_price`: computed once by the pricing engine and frozen
/// - `subtotal`: `quantity × unit_price`, unrounded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    pub product_name: String,
    pub quantity: u32,
    #[ts(as = "f64")]
    pub unit_price: Money,
    #[ts(as = "f64")]
    pub subtotal: Money,
    /// Mode the price was computed with.
    pub pricing_mode: PricingMode,
    /// Margin used for wholesale lines.
    #[serde(with = "rust_decimal::serde::float_option", default)]
    #[ts(as = "Option<f64>")]
    pub margin_percent: Option<Decimal>,
}

impl LineItem {
    /// Builds a line from an already computed unit price.
    ///
    /// Fails with [`PricingError::Overflow`] when `quantity × unit_price`
    /// does not fit.
    pub fn new(
        product_name: impl Into<String>,
        quantity: u32,
        unit_price: Money,
        pricing_mode: PricingMode,
        margin_percent: Option<Decimal>,
    ) -> Result<Self, PricingError> {
        let subtotal = unit_price
            .checked_multiply_quantity(quantity)
            .ok_or(PricingError::Overflow)?;
        Ok(LineItem {
            product_name: product_name.into(),
            quantity,
            unit_price,
            subtotal,
            pricing_mode,
            margin_percent,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
