//! # Export Formatter
//!
//! Turns a finished quote into the content of a single printable page.
//!
//! ## Page Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Quotation - Water Distributor                          ← title         │
//! │  Date: 17 October 2026                                  ← issue date    │
//! │  Client: Purificadora Azul                              ← client        │
//! │  ───────────────────────────────────────────────────────                │
//! │  Product                   Quantity   Unit Price    Subtotal            │
//! │  Garrafón 20L                     3       $95.00     $285.00            │
//! │  Garrafón 20L                     2       $72.50     $145.00            │
//! │  ───────────────────────────────────────────────────────                │
//! │                                     Subtotal:        $370.69            │
//! │                                     Tax (16%):        $59.31            │
//! │                                     Total:           $430.00            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`QuoteDocument`] holds the already formatted text of every cell. How it
//! is painted (plain text here, a PDF canvas elsewhere) is up to the front
//! end; the words and numbers are fixed by this module.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use ts_rs::TS;

use crate::error::QuoteStateError;
use crate::quote::{QuoteSnapshot, QuoteTotals};
use crate::types::{LineItem, TaxFactor};

/// Title printed at the top of every quote unless configured otherwise.
pub const DEFAULT_TITLE: &str = "Quotation - Water Distributor";

/// Column headers of the line-item table, in print order.
pub const COLUMNS: [&str; 4] = ["Product", "Quantity", "Unit Price", "Subtotal"];

/// Total width of the rendered text page.
const PAGE_WIDTH: usize = 72;
const PRODUCT_WIDTH: usize = 36;
const QUANTITY_WIDTH: usize = 9;
const UNIT_PRICE_WIDTH: usize = 13;
const SUBTOTAL_WIDTH: usize = 14;

// =============================================================================
// Document Payload
// =============================================================================

/// One row of the line-item table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DocumentRow {
    pub product: String,
    pub quantity: String,
    pub unit_price: String,
    pub subtotal: String,
}

/// One row of the totals block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TotalsRow {
    pub label: String,
    pub amount: String,
}

/// The printable quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuoteDocument {
    pub title: String,
    /// Issue date, already formatted ("17 October 2026").
    pub issued_on: String,
    pub client_name: String,
    pub rows: Vec<DocumentRow>,
    /// Always three rows: subtotal, tax, total.
    pub totals: Vec<TotalsRow>,
}

impl QuoteDocument {
    /// Renders the fixed-width text page.
    pub fn render_text(&self) -> String {
        let rule = "-".repeat(PAGE_WIDTH);
        let mut out = String::new();

        // Writing into a String cannot fail
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "Date: {}", self.issued_on);
        let _ = writeln!(out, "Client: {}", self.client_name);
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(
            out,
            "{}",
            table_line(COLUMNS[0], COLUMNS[1], COLUMNS[2], COLUMNS[3])
        );
        for row in &self.rows {
            let _ = writeln!(
                out,
                "{}",
                table_line(&row.product, &row.quantity, &row.unit_price, &row.subtotal)
            );
        }
        let _ = writeln!(out, "{}", rule);
        for row in &self.totals {
            let _ = writeln!(
                out,
                "{:>label$}{:>amount$}",
                row.label,
                row.amount,
                label = PAGE_WIDTH - SUBTOTAL_WIDTH,
                amount = SUBTOTAL_WIDTH
            );
        }
        out
    }
}

fn table_line(product: &str, quantity: &str, unit_price: &str, subtotal: &str) -> String {
    format!(
        "{:<pw$}{:>qw$}{:>uw$}{:>sw$}",
        truncate(product, PRODUCT_WIDTH - 1),
        quantity,
        unit_price,
        subtotal,
        pw = PRODUCT_WIDTH,
        qw = QUANTITY_WIDTH,
        uw = UNIT_PRICE_WIDTH,
        sw = SUBTOTAL_WIDTH
    )
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max_chars - 1).collect();
        cut.push('~');
        cut
    }
}

// =============================================================================
// Formatter
// =============================================================================

/// Builds [`QuoteDocument`]s with a fixed title and tax label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFormatter {
    title: String,
    tax_factor: TaxFactor,
}

impl ExportFormatter {
    pub fn new(title: impl Into<String>, tax_factor: TaxFactor) -> Self {
        ExportFormatter {
            title: title.into(),
            tax_factor,
        }
    }

    /// Formats a quote.
    ///
    /// ## Errors
    /// - `QuoteStateError::Empty` when there are no line items
    /// - `QuoteStateError::MissingClient` when the client name is blank
    pub fn format(
        &self,
        client_name: &str,
        line_items: &[LineItem],
        totals: &QuoteTotals,
        issued_at: NaiveDate,
    ) -> Result<QuoteDocument, QuoteStateError> {
        if line_items.is_empty() {
            return Err(QuoteStateError::Empty);
        }
        let client_name = client_name.trim();
        if client_name.is_empty() {
            return Err(QuoteStateError::MissingClient);
        }

        let rows = line_items
            .iter()
            .map(|item| DocumentRow {
                product: item.product_name.clone(),
                quantity: item.quantity.to_string(),
                unit_price: item.unit_price.to_string(),
                subtotal: item.subtotal.to_string(),
            })
            .collect();

        let totals = vec![
            TotalsRow {
                label: "Subtotal:".to_string(),
                amount: totals.pretax_subtotal.to_string(),
            },
            TotalsRow {
                label: format!("Tax ({}%):", self.tax_factor.rate_percent()),
                amount: totals.tax_amount.to_string(),
            },
            TotalsRow {
                label: "Total:".to_string(),
                amount: totals.grand_total.to_string(),
            },
        ];

        Ok(QuoteDocument {
            title: self.title.clone(),
            issued_on: issued_at.format("%d %B %Y").to_string(),
            client_name: client_name.to_string(),
            rows,
            totals,
        })
    }

    /// Formats a snapshot taken with `Quotation::snapshot`.
    pub fn format_snapshot(
        &self,
        snapshot: &QuoteSnapshot,
        issued_at: NaiveDate,
    ) -> Result<QuoteDocument, QuoteStateError> {
        self.format(
            &snapshot.client_name,
            &snapshot.line_items,
            &snapshot.totals,
            issued_at,
        )
    }
}

impl Default for ExportFormatter {
    fn default() -> Self {
        ExportFormatter::new(DEFAULT_TITLE, TaxFactor::default())
    }
}

/// File name for an exported quote: `quote_<client>_<YYYYMMDD>.txt`.
///
/// Spaces become underscores; path separators and other characters that
/// are unsafe in file names are dropped.
///
/// ```rust
/// use aqua_core::export::export_file_name;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
/// assert_eq!(export_file_name("Juan Pérez", date), "quote_Juan_Pérez_20261017.txt");
/// ```
pub fn export_file_name(client_name: &str, issued_at: NaiveDate) -> String {
    let client: String = client_name
        .trim()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('_'),
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => None,
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect();
    format!("quote_{}_{}.txt", client, issued_at.format("%Y%m%d"))
}

// =============================================================================
// Unit Tests
// =============================================================================
