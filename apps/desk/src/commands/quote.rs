//! # Quote Commands
//!
//! Building the quote for the current client.
//!
//! ## Quote Screen
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Client: Purificadora Azul                                              │
//! │                                                                         │
//! │  Product [Garrafón 20L ▼]  Qty [2]  (•) Wholesale  Margin [25] %        │
//! │  Price per case: $72.50                        ◄── preview_price        │
//! │                                        [Add]   ◄── add_to_quote         │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  Garrafón 20L        3    $95.00    $285.00                    │    │
//! │  │  Garrafón 20L        2    $72.50    $145.00                    │    │
//! │  ├────────────────────────────────────────────────────────────────┤    │
//! │  │  Subtotal                           $370.69                    │    │
//! │  │  Tax (16%)                           $59.31                    │    │
//! │  │  Total                              $430.00                    │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! │                             [Clear]  ◄── clear_quote                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use aqua_core::pricing::parse_optional_margin;
use aqua_core::{
    preview_unit_price, LineItem, Money, PricingMode, QuoteState, QuoteTotals, Quotation,
};

use crate::error::ApiResult;
use crate::state::CatalogState;

// =============================================================================
// Requests
// =============================================================================

/// Price lookup before committing a line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceRequest {
    pub product_id: u32,
    pub mode: PricingMode,
    /// Margin as typed; only read for wholesale.
    #[serde(default)]
    pub margin: Option<String>,
}

/// A line to add to the quote.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AddLineRequest {
    pub product_id: u32,
    pub quantity: i64,
    pub mode: PricingMode,
    #[serde(default)]
    pub margin: Option<String>,
}

// =============================================================================
// Responses
// =============================================================================

/// Price-per-case label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricePreview {
    pub product_id: u32,
    pub product_name: String,
    pub mode: PricingMode,
    #[ts(as = "f64")]
    pub unit_price: Money,
    /// `unit_price` rounded for display ("$72.50").
    pub display: String,
}

/// Full quote as the front end shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub client_name: String,
    pub state: QuoteState,
    pub items: Vec<LineItem>,
    pub totals: QuoteTotals,
    /// "Tax (16%)"
    pub tax_label: String,
}

impl From<&Quotation> for QuoteResponse {
    fn from(quote: &Quotation) -> Self {
        QuoteResponse {
            client_name: quote.client_name().to_string(),
            state: quote.state(),
            items: quote.line_items().to_vec(),
            totals: quote.totals(),
            tax_label: format!("Tax ({}%)", quote.tax_factor().rate_percent()),
        }
    }
}

// =============================================================================
// Commands
// =============================================================================

/// Shows what one case would cost without touching the quote.
pub fn preview_price(
    catalog: &CatalogState,
    quote: &Quotation,
    request: PriceRequest,
) -> ApiResult<PricePreview> {
    debug!(product_id = request.product_id, mode = %request.mode, "preview_price command");

    let product = catalog.product(request.product_id)?;
    let unit_price = preview_unit_price(
        product,
        request.mode,
        quote.tax_factor(),
        request.margin.as_deref(),
    )?;

    Ok(PricePreview {
        product_id: product.id,
        product_name: product.name.clone(),
        mode: request.mode,
        unit_price,
        display: unit_price.to_string(),
    })
}

/// Prices the product and appends the line.
///
/// ## Behavior
/// - Price is frozen now; later catalog edits do not change the line
/// - Quantity outside 1..=999, unknown product or bad margin: quote untouched
pub fn add_to_quote(
    catalog: &CatalogState,
    quote: &mut Quotation,
    request: AddLineRequest,
) -> ApiResult<QuoteResponse> {
    debug!(
        product_id = request.product_id,
        quantity = request.quantity,
        mode = %request.mode,
        "add_to_quote command"
    );

    let product = catalog.product(request.product_id)?;
    let margin = match request.mode {
        PricingMode::Retail => None,
        PricingMode::Wholesale => parse_optional_margin(request.margin.as_deref())?,
    };
    quote.add_line(product, request.quantity, request.mode, margin)?;

    Ok(QuoteResponse::from(&*quote))
}

/// Sets the client the quote is addressed to.
pub fn set_client(quote: &mut Quotation, client_name: &str) -> QuoteResponse {
    debug!(client = %client_name, "set_client command");
    quote.set_client_name(client_name);
    QuoteResponse::from(&*quote)
}

pub fn get_quote(quote: &Quotation) -> QuoteResponse {
    debug!("get_quote command");
    QuoteResponse::from(quote)
}

/// Starts over: no lines, no client.
pub fn clear_quote(quote: &mut Quotation) -> QuoteResponse {
    debug!("clear_quote command");
    quote.clear();
    QuoteResponse::from(&*quote)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, ErrorCode};
    use aqua_core::{ProductInput, TaxFactor};
    use aqua_store::CatalogStore;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn catalog_with_garrafon(dir: &TempDir) -> CatalogState {
        let mut state = CatalogState::open(CatalogStore::in_dir(dir.path()));
        state
            .with_catalog_mut(|c| {
                c.upsert(ProductInput {
                    id: None,
                    name: "Garrafón 20L".to_string(),
                    units_per_case: 1,
                    distributor_cost_with_tax: Money::new(dec!(58)),
                    retail_price_with_tax: Money::new(dec!(95)),
                    wholesale_case_price: Money::new(dec!(80)),
                })
                .map_err(ApiError::from)
            })
            .unwrap();
        state
    }

    fn add(product_id: u32, quantity: i64, mode: PricingMode, margin: Option<&str>) -> AddLineRequest {
        AddLineRequest {
            product_id,
            quantity,
            mode,
            margin: margin.map(str::to_string),
        }
    }

    #[test]
    fn test_preview_price() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_with_garrafon(&dir);
        let quote = Quotation::new(TaxFactor::default());

        let preview = preview_price(
            &catalog,
            &quote,
            PriceRequest {
                product_id: 1,
                mode: PricingMode::Wholesale,
                margin: Some("25".to_string()),
            },
        )
        .unwrap();
        assert_eq!(preview.display, "$72.50");
        assert!(quote.is_empty());
    }

    #[test]
    fn test_add_lines_and_totals() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_with_garrafon(&dir);
        let mut quote = Quotation::default();

        add_to_quote(&catalog, &mut quote, add(1, 3, PricingMode::Retail, None)).unwrap();
        let response =
            add_to_quote(&catalog, &mut quote, add(1, 2, PricingMode::Wholesale, Some("25")))
                .unwrap();

        assert_eq!(response.state, QuoteState::NonEmpty);
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.totals.grand_total.to_string(), "$430.00");
        assert_eq!(response.tax_label, "Tax (16%)");
    }

    #[test]
    fn test_add_errors_leave_quote_alone() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_with_garrafon(&dir);
        let mut quote = Quotation::default();

        let err = add_to_quote(&catalog, &mut quote, add(9, 1, PricingMode::Retail, None)).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = add_to_quote(&catalog, &mut quote, add(1, 1000, PricingMode::Retail, None))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = add_to_quote(&catalog, &mut quote, add(1, 1, PricingMode::Wholesale, Some("")))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PricingError);

        let err = add_to_quote(&catalog, &mut quote, add(1, 1, PricingMode::Wholesale, Some("-3")))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PricingError);

        let err = add_to_quote(&catalog, &mut quote, add(1, 1, PricingMode::Wholesale, Some("5000")))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PricingError);
        assert_eq!(err.message, "Margin must be at most 1000% (got 5000%)");

        assert!(get_quote(&quote).items.is_empty());
    }

    #[test]
    fn test_client_and_clear() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog_with_garrafon(&dir);
        let mut quote = Quotation::default();

        set_client(&mut quote, "Purificadora Azul");
        add_to_quote(&catalog, &mut quote, add(1, 1, PricingMode::Retail, None)).unwrap();

        let response = clear_quote(&mut quote);
        assert_eq!(response.client_name, "");
        assert_eq!(response.state, QuoteState::Empty);
        assert!(response.totals.is_zero());
    }

    #[test]
    fn test_request_json_shape() {
        let request: AddLineRequest = serde_json::from_str(
            r#"{"productId": 1, "quantity": 2, "mode": "wholesale", "margin": "25"}"#,
        )
        .unwrap();
        assert_eq!(request, add(1, 2, PricingMode::Wholesale, Some("25")));
    }
}
