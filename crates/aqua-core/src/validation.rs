//! # Validation Module
//!
//! Input validation for catalog maintenance and quote entry.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end (form widgets)                                     │
//! │  ├── Spin boxes, numeric inputs                                        │
//! │  └── Raw text is passed through unchanged                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── ProductDraft::validate  (text form → ProductInput)                │
//! │  └── validate_quantity       (cases on a quote line)                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog                                                      │
//! │  └── Unique ids, checked again when a file is loaded                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use aqua_core::validation::{validate_quantity, ProductDraft};
//!
//! let draft = ProductDraft {
//!     id: None,
//!     name: "Garrafón 20L".into(),
//!     units_per_case: "1".into(),
//!     distributor_cost_with_tax: "58".into(),
//!     retail_price_with_tax: "95".into(),
//!     wholesale_case_price: "80".into(),
//! };
//! assert!(draft.validate().is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;
use crate::{MAX_ITEM_QUANTITY, MAX_PRICE, MAX_PRICE_DECIMAL_PLACES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product name accepted.
pub const MAX_NAME_LENGTH: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 200 characters
///
/// ```rust
/// use aqua_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Garrafón 20L").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quote line quantity and narrows it to `u32`.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// Operator enters quantity: 5
///      │
///      ▼
/// validate_quantity(5) ← THIS FUNCTION
///      │
///      ├── qty <= 0?  → "quantity must be positive"
///      ├── qty > 999? → "quantity must be between 1 and 999"
///      └── OK → pricing engine runs, line is appended
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<u32> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > i64::from(MAX_ITEM_QUANTITY) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::from(MAX_ITEM_QUANTITY),
        });
    }

    Ok(qty as u32)
}

/// Parses a non-negative decimal amount typed by the operator.
///
/// ```rust
/// use aqua_core::validation::parse_money;
///
/// assert!(parse_money("retail price", "95.50").is_ok());
/// assert!(parse_money("retail price", "-1").is_err());
/// assert!(parse_money("retail price", "abc").is_err());
/// assert!(parse_money("retail price", "2000000").is_err());
/// assert!(parse_money("retail price", "1.23456").is_err());
/// ```
pub fn parse_money(field: &str, input: &str) -> ValidationResult<Money> {
    let input = input.trim();
    let amount = Decimal::from_str(input)
        .or_else(|_| Decimal::from_scientific(input))
        .map_err(|_| ValidationError::invalid_format(field, format!("'{}' is not a number", input)))?;

    let amount = Money::new(amount);
    check_price(field, amount)?;
    Ok(amount)
}

/// Range and precision rules shared by the form and the file loader.
///
/// - below zero → `InvalidFormat`
/// - above [`MAX_PRICE`] → `OutOfRange`
/// - more than [`MAX_PRICE_DECIMAL_PLACES`] significant decimals → `InvalidFormat`
fn check_price(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::invalid_format(field, "must not be negative"));
    }

    if amount.amount() > Decimal::from(MAX_PRICE) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::from(MAX_PRICE),
        });
    }

    // Trailing zeros don't count: "58.000000" is fine
    if amount.amount().normalize().scale() > MAX_PRICE_DECIMAL_PLACES {
        return Err(ValidationError::invalid_format(
            field,
            format!("at most {} decimal places", MAX_PRICE_DECIMAL_PLACES),
        ));
    }

    Ok(())
}

/// Parses a non-negative whole count typed by the operator.
pub fn parse_count(field: &str, input: &str) -> ValidationResult<u32> {
    let input = input.trim();
    input.parse::<u32>().map_err(|_| {
        ValidationError::invalid_format(
            field,
            format!("'{}' is not a whole number of zero or more", input),
        )
    })
}

// =============================================================================
// Product Form
// =============================================================================

/// A product edit exactly as typed into the catalog form.
///
/// Every field is raw text so a bad entry is reported against its field
/// instead of failing deserialization as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductDraft {
    /// `None` for a new product, the existing id for an edit.
    pub id: Option<u32>,
    pub name: String,
    pub units_per_case: String,
    pub distributor_cost_with_tax: String,
    pub retail_price_with_tax: String,
    pub wholesale_case_price: String,
}

/// A validated product edit, ready for `Catalog::upsert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInput {
    pub id: Option<u32>,
    pub name: String,
    pub units_per_case: u32,
    pub distributor_cost_with_tax: Money,
    pub retail_price_with_tax: Money,
    pub wholesale_case_price: Money,
}

impl ProductDraft {
    /// Pre-fills the form from an existing product (edit flow).
    pub fn from_product(product: &Product) -> Self {
        ProductDraft {
            id: Some(product.id),
            name: product.name.clone(),
            units_per_case: product.units_per_case.to_string(),
            distributor_cost_with_tax: product.distributor_cost_with_tax.amount().to_string(),
            retail_price_with_tax: product.retail_price_with_tax.amount().to_string(),
            wholesale_case_price: product.wholesale_case_price.amount().to_string(),
        }
    }

    /// Checks every field and produces a [`ProductInput`].
    ///
    /// ## Rules
    /// - name: non-empty → otherwise `Required`
    /// - units per case: whole number ≥ 0 → otherwise `InvalidFormat`
    /// - the three prices: decimal ≥ 0 → otherwise `InvalidFormat`
    pub fn validate(&self) -> ValidationResult<ProductInput> {
        validate_product_name(&self.name)?;

        Ok(ProductInput {
            id: self.id,
            name: self.name.trim().to_string(),
            units_per_case: parse_count("units per case", &self.units_per_case)?,
            distributor_cost_with_tax: parse_money(
                "distributor cost",
                &self.distributor_cost_with_tax,
            )?,
            retail_price_with_tax: parse_money("retail price", &self.retail_price_with_tax)?,
            wholesale_case_price: parse_money("wholesale case price", &self.wholesale_case_price)?,
        })
    }
}

impl ProductInput {
    /// Turns the input into a catalog entry carrying `id`.
    pub fn into_product(self, id: u32) -> Product {
        Product {
            id,
            name: self.name,
            units_per_case: self.units_per_case,
            distributor_cost_with_tax: self.distributor_cost_with_tax,
            retail_price_with_tax: self.retail_price_with_tax,
            wholesale_case_price: self.wholesale_case_price,
        }
    }
}

/// Checks a product that did not come through the form (e.g. a hand-edited
/// catalog file).
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_name(&product.name)?;

    let prices = [
        ("distributor cost", product.distributor_cost_with_tax),
        ("retail price", product.retail_price_with_tax),
        ("wholesale case price", product.wholesale_case_price),
    ];
    for (field, amount) in prices {
        check_price(field, amount)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
