//! # Export Command
//!
//! Writes the printable quote into the export directory.
//!
//! ## Export Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quote.snapshot()          ── Empty / MissingClient ──► QUOTE_STATE     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  formatter.format_snapshot(snapshot, today)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  <export_dir>/quote_<client>_<YYYYMMDD>.txt ── io error ──► EXPORT_FAILED│
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ExportResponse { path, document }                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The quote is left as it was; the operator clears it explicitly.

use chrono::NaiveDate;
use serde::Serialize;
use std::fs;
use tracing::{debug, error, info};
use ts_rs::TS;

use aqua_core::{export_file_name, QuoteDocument, Quotation};

use crate::error::{ApiError, ApiResult};
use crate::state::ConfigState;

/// Where the quote went and what it says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub path: String,
    pub file_name: String,
    pub document: QuoteDocument,
}

/// Exports the current quote dated `issued_on`.
///
/// An existing file with the same name (same client, same day) is
/// overwritten.
pub fn export_quote(
    config: &ConfigState,
    quote: &Quotation,
    issued_on: NaiveDate,
) -> ApiResult<ExportResponse> {
    debug!(client = %quote.client_name(), lines = quote.len(), "export_quote command");

    let snapshot = quote.snapshot()?;
    let document = config
        .export_formatter()
        .format_snapshot(&snapshot, issued_on)?;

    let file_name = export_file_name(&snapshot.client_name, issued_on);
    let path = config.export_dir.join(&file_name);

    let written = fs::create_dir_all(&config.export_dir)
        .and_then(|()| fs::write(&path, document.render_text()));
    if let Err(e) = written {
        error!(path = %path.display(), error = %e, "Quote export failed");
        return Err(ApiError::export_failed(format!(
            "Could not write {}: {}",
            path.display(),
            e
        )));
    }

    info!(path = %path.display(), client = %snapshot.client_name, "Quote exported");
    Ok(ExportResponse {
        path: path.display().to_string(),
        file_name,
        document,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use aqua_core::{Money, PricingMode, Product};
    use rust_decimal_macros::dec;
    use std::path::Path;
    use tempfile::TempDir;

    fn garrafon() -> Product {
        Product {
            id: 1,
            name: "Garrafón 20L".to_string(),
            units_per_case: 1,
            distributor_cost_with_tax: Money::new(dec!(58)),
            retail_price_with_tax: Money::new(dec!(95)),
            wholesale_case_price: Money::new(dec!(80)),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[test]
    fn test_export_writes_document() {
        let dir = TempDir::new().unwrap();
        let config = ConfigState::for_data_dir(dir.path());
        let mut quote = Quotation::new(config.tax_factor);
        quote.add_line(&garrafon(), 3, PricingMode::Retail, None).unwrap();
        quote
            .add_line(&garrafon(), 2, PricingMode::Wholesale, Some(dec!(25)))
            .unwrap();
        quote.set_client_name("Purificadora Azul");

        let response = export_quote(&config, &quote, date()).unwrap();
        assert_eq!(response.file_name, "quote_Purificadora_Azul_20261017.txt");

        let text = fs::read_to_string(&response.path).unwrap();
        assert_eq!(text, response.document.render_text());
        assert!(text.contains("$430.00"));

        // Export does not consume the quote
        assert_eq!(quote.len(), 2);
    }

    #[test]
    fn test_export_guards() {
        let dir = TempDir::new().unwrap();
        let config = ConfigState::for_data_dir(dir.path());
        let mut quote = Quotation::default();
        quote.set_client_name("Purificadora Azul");

        let err = export_quote(&config, &quote, date()).unwrap_err();
        assert_eq!(err.code, ErrorCode::QuoteState);
        assert_eq!(err.message, "The quote has no products");

        quote.set_client_name("");
        quote.add_line(&garrafon(), 1, PricingMode::Retail, None).unwrap();
        let err = export_quote(&config, &quote, date()).unwrap_err();
        assert_eq!(err.message, "A client name is required");

        assert!(!Path::new(&config.export_dir).exists());
    }

    #[test]
    fn test_unwritable_export_dir() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("quotes");
        fs::write(&blocker, "not a directory").unwrap();
        let config = ConfigState::for_data_dir(dir.path());

        let mut quote = Quotation::default();
        quote.set_client_name("Purificadora Azul");
        quote.add_line(&garrafon(), 1, PricingMode::Retail, None).unwrap();

        let err = export_quote(&config, &quote, date()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ExportFailed);
    }
}
