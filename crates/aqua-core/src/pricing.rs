//! # Pricing Engine
//!
//! Computes the unit price of one case under a pricing mode.
//!
//! ## The Two Modes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RETAIL                                                                 │
//! │    unit_price = product.retail_price_with_tax        (as stored)        │
//! │                                                                         │
//! │  WHOLESALE (margin m%)                                                  │
//! │    cost_without_tax = distributor_cost_with_tax / tax_factor            │
//! │    marked_up        = cost_without_tax × (1 + m / 100)                  │
//! │    unit_price       = marked_up × tax_factor                            │
//! │                                                                         │
//! │  Example: cost $58.00, tax 1.16, margin 25%                             │
//! │    58.00 / 1.16 = 50.00 → × 1.25 = 62.50 → × 1.16 = 72.50               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The margin applies to the true pre-tax cost. Tax is stripped and
//! re-applied with the same factor, so a 0% margin gives back the cost.
//!
//! Nothing here mutates the catalog. Arithmetic is checked: a price that
//! leaves Decimal's range is a [`PricingError::Overflow`], never a panic.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

use crate::error::PricingError;
use crate::money::Money;
use crate::types::{PricingMode, Product, TaxFactor};

/// Result type for pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;

/// Highest wholesale margin accepted, in percent.
pub const MAX_MARGIN_PERCENT: Decimal = dec!(1000);

/// Computes the tax-inclusive unit price of `product`.
///
/// ## Arguments
/// * `mode` - Retail or Wholesale
/// * `tax_factor` - e.g. 1.16
/// * `margin_percent` - required for Wholesale, ignored for Retail
///
/// ## Example
/// ```rust
/// use aqua_core::money::Money;
/// use aqua_core::pricing::compute_unit_price;
/// use aqua_core::types::{PricingMode, Product, TaxFactor};
/// use rust_decimal_macros::dec;
///
/// let product = Product {
///     id: 1,
///     name: "Garrafón 20L".into(),
///     units_per_case: 1,
///     distributor_cost_with_tax: Money::new(dec!(58)),
///     retail_price_with_tax: Money::new(dec!(95)),
///     wholesale_case_price: Money::new(dec!(80)),
/// };
/// let tax = TaxFactor::default();
///
/// let retail = compute_unit_price(&product, PricingMode::Retail, tax, None).unwrap();
/// assert_eq!(retail, Money::new(dec!(95)));
///
/// let wholesale =
///     compute_unit_price(&product, PricingMode::Wholesale, tax, Some(dec!(25))).unwrap();
/// assert_eq!(wholesale, Money::new(dec!(72.5)));
/// ```
pub fn compute_unit_price(
    product: &Product,
    mode: PricingMode,
    tax_factor: TaxFactor,
    margin_percent: Option<Decimal>,
) -> PricingResult<Money> {
    match mode {
        PricingMode::Retail => Ok(product.retail_price_with_tax),
        PricingMode::Wholesale => {
            let margin = margin_percent.ok_or(PricingError::MissingMargin)?;
            wholesale_price(product.distributor_cost_with_tax, tax_factor, margin)
        }
    }
}

/// Applies the margin formula to a tax-inclusive cost.
pub fn wholesale_price(
    cost_with_tax: Money,
    tax_factor: TaxFactor,
    margin_percent: Decimal,
) -> PricingResult<Money> {
    check_margin(margin_percent)?;

    let cost_without_tax = tax_factor.strip(cost_with_tax);
    let markup = Decimal::ONE + margin_percent / Decimal::ONE_HUNDRED;
    let marked_up = cost_without_tax
        .checked_mul(markup)
        .ok_or(PricingError::Overflow)?;
    tax_factor.checked_apply(marked_up).ok_or(PricingError::Overflow)
}

/// Margin must sit in `0..=MAX_MARGIN_PERCENT`.
fn check_margin(margin: Decimal) -> PricingResult<()> {
    if margin < Decimal::ZERO {
        return Err(PricingError::NegativeMargin { margin });
    }
    if margin > MAX_MARGIN_PERCENT {
        return Err(PricingError::MarginTooLarge {
            margin,
            max: MAX_MARGIN_PERCENT,
        });
    }
    Ok(())
}

/// Parses the margin field as typed by the operator ("25", "12.5").
///
/// ```rust
/// use aqua_core::pricing::parse_margin;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse_margin(" 25 ").unwrap(), dec!(25));
/// assert!(parse_margin("").is_err());
/// assert!(parse_margin("-5").is_err());
/// assert!(parse_margin("5000").is_err());
/// ```
pub fn parse_margin(input: &str) -> PricingResult<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PricingError::MissingMargin);
    }

    let margin = Decimal::from_str(trimmed).map_err(|_| PricingError::InvalidMargin {
        input: trimmed.to_string(),
    })?;

    check_margin(margin)?;
    Ok(margin)
}

/// Parses an optional margin field: blank or absent means "no margin".
pub fn parse_optional_margin(input: Option<&str>) -> PricingResult<Option<Decimal>> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_margin(text).map(Some),
    }
}

/// Prices one case straight from form text, for the "price per case" label
/// shown before the operator adds the line.
///
/// Retail ignores the margin text entirely, even when it does not parse.
pub fn preview_unit_price(
    product: &Product,
    mode: PricingMode,
    tax_factor: TaxFactor,
    margin_input: Option<&str>,
) -> PricingResult<Money> {
    let margin = match mode {
        PricingMode::Retail => None,
        PricingMode::Wholesale => parse_optional_margin(margin_input)?,
    };
    compute_unit_price(product, mode, tax_factor, margin)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_retail_returns_stored_price() {
        let price =
            compute_unit_price(&garrafon(), PricingMode::Retail, TaxFactor::default(), None).unwrap();
        assert_eq!(price, Money::new(dec!(95)));
    }

    #[test]
    fn test_retail_ignores_margin() {
        let price = compute_unit_price(
            &garrafon(),
            PricingMode::Retail,
            TaxFactor::default(),
            Some(dec!(-10)),
        )
        .unwrap();
        assert_eq!(price, Money::new(dec!(95)));
    }

    #[test]
    fn test_wholesale_margin_formula() {
        let price = compute_unit_price(
            &garrafon(),
            PricingMode::Wholesale,
            TaxFactor::default(),
            Some(dec!(25)),
        )
        .unwrap();
        assert_eq!(price, Money::new(dec!(72.5)));
    }

    #[test]
    fn test_wholesale_zero_margin_is_cost() {
        let price = compute_unit_price(
            &garrafon(),
            PricingMode::Wholesale,
            TaxFactor::default(),
            Some(dec!(0)),
        )
        .unwrap();
        assert_eq!(price, Money::new(dec!(58)));
    }

    #[test]
    fn test_wholesale_with_other_tax_regime() {
        let tax = TaxFactor::new(dec!(1.08)).unwrap();
        let price = wholesale_price(Money::new(dec!(108)), tax, dec!(10)).unwrap();
        assert_eq!(price, Money::new(dec!(118.8)));
    }

    #[test]
    fn test_wholesale_missing_margin() {
        let err = compute_unit_price(&garrafon(), PricingMode::Wholesale, TaxFactor::default(), None)
            .unwrap_err();
        assert_eq!(err, PricingError::MissingMargin);
    }

    #[test]
    fn test_wholesale_negative_margin() {
        let err = compute_unit_price(
            &garrafon(),
            PricingMode::Wholesale,
            TaxFactor::default(),
            Some(dec!(-0.5)),
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::NegativeMargin { .. }));
    }

    #[test]
    fn test_parse_margin() {
        assert_eq!(parse_margin("12.5").unwrap(), dec!(12.5));
        assert_eq!(parse_margin("0").unwrap(), dec!(0));
        assert_eq!(parse_margin("   ").unwrap_err(), PricingError::MissingMargin);
        assert_eq!(
            parse_margin("abc").unwrap_err(),
            PricingError::InvalidMargin {
                input: "abc".to_string()
            }
        );
        assert!(matches!(
            parse_margin("-1").unwrap_err(),
            PricingError::NegativeMargin { .. }
        ));
    }

    #[test]
    fn test_margin_ceiling() {
        assert_eq!(parse_margin("1000").unwrap(), dec!(1000));
        assert_eq!(
            parse_margin("1000.01").unwrap_err(),
            PricingError::MarginTooLarge {
                margin: dec!(1000.01),
                max: MAX_MARGIN_PERCENT,
            }
        );
        assert!(matches!(
            parse_margin("79228162514264337593543950335").unwrap_err(),
            PricingError::MarginTooLarge { .. }
        ));

        // Values that skip the parser are held to the same ceiling
        let err = compute_unit_price(
            &garrafon(),
            PricingMode::Wholesale,
            TaxFactor::default(),
            Some(Decimal::MAX),
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::MarginTooLarge { .. }));
    }

    #[test]
    fn test_wholesale_overflow_is_an_error() {
        let mut product = garrafon();
        product.distributor_cost_with_tax = Money::new(Decimal::MAX);
        let err = compute_unit_price(
            &product,
            PricingMode::Wholesale,
            TaxFactor::default(),
            Some(dec!(25)),
        )
        .unwrap_err();
        assert_eq!(err, PricingError::Overflow);
    }

    #[test]
    fn test_parse_optional_margin() {
        assert_eq!(parse_optional_margin(None).unwrap(), None);
        assert_eq!(parse_optional_margin(Some(" ")).unwrap(), None);
        assert_eq!(parse_optional_margin(Some("25")).unwrap(), Some(dec!(25)));
        assert!(parse_optional_margin(Some("x")).is_err());
    }

    #[test]
    fn test_preview_unit_price() {
        let tax = TaxFactor::default();
        let retail = preview_unit_price(&garrafon(), PricingMode::Retail, tax, Some("oops")).unwrap();
        assert_eq!(retail, Money::new(dec!(95)));

        let wholesale =
            preview_unit_price(&garrafon(), PricingMode::Wholesale, tax, Some(" 25 ")).unwrap();
        assert_eq!(wholesale.to_string(), "$72.50");

        assert_eq!(
            preview_unit_price(&garrafon(), PricingMode::Wholesale, tax, Some("")).unwrap_err(),
            PricingError::MissingMargin
        );
    }
}
