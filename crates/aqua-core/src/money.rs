//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    58.0 / 1.16 = 50.00000000000001  ❌ WRONG!                           │
//! │                                                                         │
//! │  THE EARLY-ROUNDING PROBLEM                                             │
//! │    Round every step to cents and the tax back-calculation drifts:       │
//! │    430.00 / 1.16 → 370.69, then 370.69 × 1.16 = 429.9999 ≠ 430.00       │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal, rounded only for display                │
//! │    58 / 1.16 = 50 exactly                                              │
//! │    Intermediate values keep 28 significant digits                      │
//! │    Display/export rounds half away from zero to 2 places               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use aqua_core::money::Money;
//! use rust_decimal_macros::dec;
//!
//! let price = Money::new(dec!(95.00));
//! let line = price * 3;
//! assert_eq!(line, Money::new(dec!(285)));
//! assert_eq!(line.to_string(), "$285.00");
//!
//! // Thousands are grouped on display
//! assert_eq!(Money::new(dec!(1234567.891)).to_string(), "$1,234,567.89");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

/// Decimal places shown to the operator and printed on exports.
pub const DISPLAY_DECIMALS: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in pesos (or any single currency).
///
/// ## Design Decisions
/// - **Decimal inner value**: exact base-10 arithmetic, no binary float drift
/// - **Full precision inside**: `58 / 1.16` and friends keep every digit
/// - **Rounding at the edge**: only [`Money::rounded`] and `Display` round
/// - **Serialized as a JSON number**: the catalog file stays hand-editable
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.retail_price_with_tax ──┐                                      │
/// │                                  ├──► LineItem.unit_price ──► subtotal  │
/// │  Product.distributor_cost ──► margin formula                           │
/// │                                                                         │
/// │  Σ subtotal ──► grand_total ──► ÷ tax factor ──► pretax_subtotal       │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Money {
    /// Wraps a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use aqua_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// assert_eq!(Money::from_cents(9500), Money::new(dec!(95)));
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, DISPLAY_DECIMALS))
    }

    /// Returns the unrounded decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is below zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Rounds to whole cents, half away from zero.
    ///
    /// This is the only rounding in the system. Call it when a value leaves
    /// the engine (screen, export), never between two calculation steps.
    ///
    /// ```rust
    /// use aqua_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// assert_eq!(Money::new(dec!(370.689655)).rounded(), Money::new(dec!(370.69)));
    /// assert_eq!(Money::new(dec!(0.125)).rounded(), Money::new(dec!(0.13)));
    /// ```
    pub fn rounded(&self) -> Self {
        Money(
            self.0
                .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Multiplies money by a case count.
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Garrafón 20L  $72.50
    /// Quantity: 2
    ///      │
    ///      ▼
    /// multiply_quantity(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Subtotal: $145.00
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * Decimal::from(qty))
    }

    // -------------------------------------------------------------------------
    // Checked arithmetic
    // -------------------------------------------------------------------------
    // The operators above panic when a result leaves Decimal's range. Every
    // path that starts from operator input goes through these instead.

    /// `None` if the result does not fit.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    #[inline]
    pub fn checked_mul(self, factor: Decimal) -> Option<Money> {
        self.0.checked_mul(factor).map(Money)
    }

    /// `None` on overflow or a zero divisor.
    #[inline]
    pub fn checked_div(self, divisor: Decimal) -> Option<Money> {
        self.0.checked_div(divisor).map(Money)
    }

    /// [`Money::multiply_quantity`] that reports overflow instead of panicking.
    #[inline]
    pub fn checked_multiply_quantity(self, qty: u32) -> Option<Money> {
        self.checked_mul(Decimal::from(qty))
    }
}

// =============================================================================
// Display Formatting
// =============================================================================

/// Groups an unsigned digit string in threes: `1234567` → `1,234,567`.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Shows money the way the quote screen and the printed quote do:
/// `$` sign, thousands separators, exactly two decimals.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rounded = self.rounded().0;
        let sign = if rounded < Decimal::ZERO { "-" } else { "" };
        rounded.rescale(DISPLAY_DECIMALS);
        let text = rounded.abs().to_string();
        let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));
        write!(f, "{}${}.{}", sign, group_thousands(whole), frac)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a case count.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Multiplication by a factor (markup, tax factor).
impl Mul<Decimal> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, factor: Decimal) -> Self {
        Money(self.0 * factor)
    }
}

/// Division by a factor (stripping tax).
impl Div<Decimal> for Money {
    type Output = Self;

    #[inline]
    fn div(self, factor: Decimal) -> Self {
        Money(self.0 / factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
