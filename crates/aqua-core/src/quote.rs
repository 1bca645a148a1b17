//! # Quotation Aggregator
//!
//! Accumulates priced line items for one client and derives the totals.
//!
//! ## Quote Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Quote States                                         │
//! │                                                                         │
//! │               add_line                                                  │
//! │  ┌─────────┐ ─────────────► ┌────────────┐                              │
//! │  │  Empty  │                │  NonEmpty  │ ◄─┐ add_line                 │
//! │  └─────────┘ ◄───────────── └─────┬──────┘ ──┘                          │
//! │       ▲  │       clear            │                                     │
//! │       └──┘ clear                  │ snapshot()                          │
//! │                                   ▼  (client name required)             │
//! │                             Export Formatter                            │
//! │                                                                         │
//! │  Empty      → snapshot() fails with QuoteStateError::Empty              │
//! │  no client  → snapshot() fails with QuoteStateError::MissingClient      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Totals
//! Every price in the quote already includes tax, so tax is backed out of
//! the grand total instead of being added on top:
//!
//! ```text
//! grand_total     = Σ subtotal
//! pretax_subtotal = grand_total / tax_factor
//! tax_amount      = grand_total - pretax_subtotal
//! ```
//!
//! Totals are recomputed from the line items on every call. Nothing is
//! cached, so they can never go stale.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, PricingError, QuoteStateError};
use crate::money::Money;
use crate::pricing::compute_unit_price;
use crate::types::{LineItem, PricingMode, Product, TaxFactor};
use crate::validation::validate_quantity;

// =============================================================================
// Quote State
// =============================================================================

/// Whether the quote has any line items yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum QuoteState {
    Empty,
    NonEmpty,
}

// =============================================================================
// Totals
// =============================================================================

/// Totals block shown under the line items and printed on the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuoteTotals {
    #[ts(as = "f64")]
    pub pretax_subtotal: Money,
    #[ts(as = "f64")]
    pub tax_amount: Money,
    #[ts(as = "f64")]
    pub grand_total: Money,
}

impl QuoteTotals {
    /// Derives the totals for a set of line items.
    ///
    /// Callers guarantee the subtotals sum without overflow; `add_line`
    /// refuses any line that would break that.
    pub(crate) fn from_line_items(items: &[LineItem], tax_factor: TaxFactor) -> Self {
        let grand_total: Money = items.iter().map(|item| item.subtotal).sum();
        let pretax_subtotal = tax_factor.strip(grand_total);
        QuoteTotals {
            pretax_subtotal,
            tax_amount: grand_total - pretax_subtotal,
            grand_total,
        }
    }

    /// Returns true when every total is zero.
    pub fn is_zero(&self) -> bool {
        self.pretax_subtotal.is_zero() && self.tax_amount.is_zero() && self.grand_total.is_zero()
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Everything the Export Formatter needs, taken from a quote that passed
/// the export guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    pub client_name: String,
    pub line_items: Vec<LineItem>,
    pub totals: QuoteTotals,
}

// =============================================================================
// Quotation
// =============================================================================

/// The quote being built in the current session.
///
/// ## Invariants
/// - Line items keep insertion order
/// - A line item never changes after it is appended
/// - A failed `add_line` leaves the quote exactly as it was
/// - The grand total always fits in a Decimal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quotation {
    client_name: String,
    line_items: Vec<LineItem>,
    tax_factor: TaxFactor,
}

impl Quotation {
    /// Creates an empty quote priced under `tax_factor`.
    pub fn new(tax_factor: TaxFactor) -> Self {
        Quotation {
            client_name: String::new(),
            line_items: Vec::new(),
            tax_factor,
        }
    }

    pub fn state(&self) -> QuoteState {
        if self.line_items.is_empty() {
            QuoteState::Empty
        } else {
            QuoteState::NonEmpty
        }
    }

    pub fn tax_factor(&self) -> TaxFactor {
        self.tax_factor
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn set_client_name(&mut self, name: impl Into<String>) {
        self.client_name = name.into();
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn len(&self) -> usize {
        self.line_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// Prices `quantity` cases of `product` and appends the line.
    ///
    /// ## Flow
    /// ```text
    /// validate_quantity ──► compute_unit_price ──► LineItem::new ──► total check ──► push
    ///        │                     │                     │                │
    ///        └── error ────────────┴─────────────────────┴────────────────┴──► returned, nothing appended
    /// ```
    ///
    /// ## Returns
    /// A copy of the appended line.
    pub fn add_line(
        &mut self,
        product: &Product,
        quantity: i64,
        mode: PricingMode,
        margin_percent: Option<Decimal>,
    ) -> CoreResult<LineItem> {
        let quantity = validate_quantity(quantity)?;
        let unit_price = compute_unit_price(product, mode, self.tax_factor, margin_percent)?;

        let margin_percent = match mode {
            PricingMode::Retail => None,
            PricingMode::Wholesale => margin_percent,
        };
        let line = LineItem::new(product.name.clone(), quantity, unit_price, mode, margin_percent)?;

        let running_total: Money = self.line_items.iter().map(|item| item.subtotal).sum();
        running_total
            .checked_add(line.subtotal)
            .ok_or(PricingError::Overflow)?;

        self.line_items.push(line.clone());
        Ok(line)
    }

    /// Recomputes the totals from the current line items.
    pub fn totals(&self) -> QuoteTotals {
        QuoteTotals::from_line_items(&self.line_items, self.tax_factor)
    }

    /// Drops every line item and the client name. Safe to call repeatedly.
    pub fn clear(&mut self) {
        self.line_items.clear();
        self.client_name.clear();
    }

    /// Checks the export preconditions.
    ///
    /// Emptiness is checked before the client name.
    pub fn ensure_exportable(&self) -> Result<(), QuoteStateError> {
        if self.line_items.is_empty() {
            return Err(QuoteStateError::Empty);
        }
        if self.client_name.trim().is_empty() {
            return Err(QuoteStateError::MissingClient);
        }
        Ok(())
    }

    /// Freezes the quote for export.
    pub fn snapshot(&self) -> Result<QuoteSnapshot, QuoteStateError> {
        self.ensure_exportable()?;
        Ok(QuoteSnapshot {
            client_name: self.client_name.trim().to_string(),
            line_items: self.line_items.clone(),
            totals: self.totals(),
        })
    }
}

impl Default for Quotation {
    fn default() -> Self {
        Quotation::new(TaxFactor::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, PricingError, ValidationError};
    use rust_decimal_macros::dec;

    fn garrafon() -> Product {
        Product {
            id: 1,
            name: "Garrafón 20L".to_string(),
            units_per_case: 1,
            distributor_cost_with_tax: Money::new(dec!(58.0)),
            retail_price_with_tax: Money::new(dec!(95.0)),
            wholesale_case_price: Money::new(dec!(80.0)),
        }
    }

    #[test]
    fn test_new_quote_is_empty() {
        let quote = Quotation::default();
        assert_eq!(quote.state(), QuoteState::Empty);
        assert!(quote.totals().is_zero());
        assert_eq!(quote.client_name(), "");
    }

    #[test]
    fn test_add_line_retail() {
        let mut quote = Quotation::default();
        let line = quote.add_line(&garrafon(), 3, PricingMode::Retail, None).unwrap();

        assert_eq!(line.product_name, "Garrafón 20L");
        assert_eq!(line.unit_price, Money::new(dec!(95)));
        assert_eq!(line.subtotal, Money::new(dec!(285)));
        assert_eq!(line.margin_percent, None);
        assert_eq!(quote.state(), QuoteState::NonEmpty);
        assert_eq!(quote.line_items(), &[line]);
    }

    #[test]
    fn test_add_line_wholesale_records_margin() {
        let mut quote = Quotation::default();
        let line = quote
            .add_line(&garrafon(), 2, PricingMode::Wholesale, Some(dec!(25)))
            .unwrap();
        assert_eq!(line.unit_price, Money::new(dec!(72.5)));
        assert_eq!(line.subtotal, Money::new(dec!(145)));
        assert_eq!(line.margin_percent, Some(dec!(25)));
    }

    #[test]
    fn test_totals_back_out_tax() {
        let mut quote = Quotation::default();
        quote.add_line(&garrafon(), 3, PricingMode::Retail, None).unwrap();
        quote
            .add_line(&garrafon(), 2, PricingMode::Wholesale, Some(dec!(25)))
            .unwrap();

        let totals = quote.totals();
        assert_eq!(totals.grand_total, Money::new(dec!(430)));
        assert_eq!(totals.pretax_subtotal.rounded(), Money::new(dec!(370.69)));
        assert_eq!(totals.tax_amount.rounded(), Money::new(dec!(59.31)));
        assert_eq!(totals.tax_amount, totals.grand_total - totals.pretax_subtotal);
    }

    #[test]
    fn test_failed_add_leaves_quote_untouched() {
        let mut quote = Quotation::default();
        quote.add_line(&garrafon(), 1, PricingMode::Retail, None).unwrap();
        let before = quote.clone();

        let err = quote
            .add_line(&garrafon(), 2, PricingMode::Wholesale, None)
            .unwrap_err();
        assert!(matches!(err, CoreError::Pricing(PricingError::MissingMargin)));

        let err = quote.add_line(&garrafon(), 0, PricingMode::Retail, None).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MustBePositive { .. })
        ));

        assert_eq!(quote, before);
    }

    #[test]
    fn test_add_line_overflow_leaves_quote_untouched() {
        let mut quote = Quotation::default();
        quote.add_line(&garrafon(), 1, PricingMode::Retail, None).unwrap();
        let before = quote.clone();

        let mut huge = garrafon();
        huge.retail_price_with_tax = Money::new(Decimal::MAX);

        // Subtotal alone overflows
        let err = quote.add_line(&huge, 2, PricingMode::Retail, None).unwrap_err();
        assert!(matches!(err, CoreError::Pricing(PricingError::Overflow)));

        // Subtotal fits, but not on top of the existing lines
        let err = quote.add_line(&huge, 1, PricingMode::Retail, None).unwrap_err();
        assert!(matches!(err, CoreError::Pricing(PricingError::Overflow)));

        // Wholesale markup overflows
        huge.distributor_cost_with_tax = Money::new(Decimal::MAX);
        let err = quote
            .add_line(&huge, 1, PricingMode::Wholesale, Some(dec!(25)))
            .unwrap_err();
        assert!(matches!(err, CoreError::Pricing(PricingError::Overflow)));

        assert_eq!(quote, before);
        assert_eq!(quote.totals().grand_total, Money::new(dec!(95)));
    }

    #[test]
    fn test_line_price_is_frozen() {
        let mut quote = Quotation::default();
        let mut product = garrafon();
        quote.add_line(&product, 1, PricingMode::Retail, None).unwrap();

        product.retail_price_with_tax = Money::new(dec!(120));
        product.name = "Garrafón 20L (nuevo)".to_string();

        assert_eq!(quote.line_items()[0].unit_price, Money::new(dec!(95)));
        assert_eq!(quote.line_items()[0].product_name, "Garrafón 20L");
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut quote = Quotation::default();
        quote.set_client_name("Purificadora Azul");
        quote.add_line(&garrafon(), 3, PricingMode::Retail, None).unwrap();

        quote.clear();
        assert!(quote.is_empty());
        assert!(quote.totals().is_zero());
        assert_eq!(quote.client_name(), "");

        quote.clear();
        assert_eq!(quote.state(), QuoteState::Empty);
    }

    #[test]
    fn test_export_guards() {
        let mut quote = Quotation::default();
        assert_eq!(quote.snapshot().unwrap_err(), QuoteStateError::Empty);

        quote.set_client_name("Purificadora Azul");
        assert_eq!(quote.snapshot().unwrap_err(), QuoteStateError::Empty);

        quote.set_client_name("   ");
        quote.add_line(&garrafon(), 1, PricingMode::Retail, None).unwrap();
        assert_eq!(quote.snapshot().unwrap_err(), QuoteStateError::MissingClient);

        quote.set_client_name(" Purificadora Azul ");
        let snapshot = quote.snapshot().unwrap();
        assert_eq!(snapshot.client_name, "Purificadora Azul");
        assert_eq!(snapshot.line_items.len(), 1);
        assert_eq!(snapshot.totals, quote.totals());
    }
}
