//! # Console Front End
//!
//! One command per line on stdin, answers on stdout.
//!
//! ## Commands
//! ```text
//! products                                  list the catalog
//! price <id> <retail|wholesale> [margin]    price per case, quote untouched
//! add <id> <qty> <retail|wholesale> [margin]
//! client <name>                             set (or clear) the client
//! show                                      current quote and totals
//! clear                                     empty the quote and client
//! export                                    write the printable quote
//! product-save <id|new> | <name> | <units> | <cost> | <retail> | <case price>
//! product-delete <id>
//! help
//! quit
//! ```

use chrono::NaiveDate;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

use aqua_core::{PricingMode, Product, ProductDraft, Quotation};
use aqua_store::CatalogStore;

use crate::commands::catalog::{delete_product, list_products, save_product};
use crate::commands::export::export_quote;
use crate::commands::quote::{
    add_to_quote, clear_quote, get_quote, preview_price, set_client, AddLineRequest,
    PriceRequest, QuoteResponse,
};
use crate::error::{ApiError, ApiResult};
use crate::state::{CatalogState, ConfigState};

const PROMPT: &str = "> ";

pub const HELP: &str = "\
Commands:
  products                                   list the catalog
  price <id> <retail|wholesale> [margin]     price per case
  add <id> <qty> <retail|wholesale> [margin] add a line to the quote
  client <name>                              set the client name
  show                                       show the quote
  clear                                      start a new quote
  export                                     write the quote to a file
  product-save <id|new> | <name> | <units per case> | <cost> | <retail> | <case price>
  product-delete <id>
  help
  quit";

const USAGE_PRICE: &str = "price <id> <retail|wholesale> [margin]";
const USAGE_ADD: &str = "add <id> <qty> <retail|wholesale> [margin]";
const USAGE_SAVE: &str =
    "product-save <id|new> | <name> | <units per case> | <cost> | <retail> | <case price>";
const USAGE_DELETE: &str = "product-delete <id>";

// =============================================================================
// Parsing
// =============================================================================

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Products,
    Price(PriceRequest),
    Add(AddLineRequest),
    Client(String),
    Show,
    Clear,
    Export,
    ProductSave(ProductDraft),
    ProductDelete(u32),
    Help,
    Quit,
}

/// Why a line could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("{0}")]
    Invalid(String),
}

/// Parses one line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    let command = match keyword.to_lowercase().as_str() {
        "products" | "ls" => Command::Products,
        "price" => Command::Price(parse_price(rest)?),
        "add" => Command::Add(parse_add(rest)?),
        "client" => Command::Client(rest.to_string()),
        "show" => Command::Show,
        "clear" => Command::Clear,
        "export" => Command::Export,
        "product-save" => Command::ProductSave(parse_product_save(rest)?),
        "product-delete" => {
            let id = rest.split_whitespace().next().ok_or(ParseError::Usage(USAGE_DELETE))?;
            Command::ProductDelete(parse_id(id)?)
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_price(rest: &str) -> Result<PriceRequest, ParseError> {
    let args: Vec<&str> = rest.split_whitespace().collect();
    match args.as_slice() {
        [id, mode] | [id, mode, _] => Ok(PriceRequest {
            product_id: parse_id(id)?,
            mode: parse_mode(mode)?,
            margin: args.get(2).map(|m| m.to_string()),
        }),
        _ => Err(ParseError::Usage(USAGE_PRICE)),
    }
}

fn parse_add(rest: &str) -> Result<AddLineRequest, ParseError> {
    let args: Vec<&str> = rest.split_whitespace().collect();
    match args.as_slice() {
        [id, qty, mode] | [id, qty, mode, _] => Ok(AddLineRequest {
            product_id: parse_id(id)?,
            quantity: qty
                .parse()
                .map_err(|_| ParseError::Invalid(format!("quantity '{}' is not a whole number", qty)))?,
            mode: parse_mode(mode)?,
            margin: args.get(3).map(|m| m.to_string()),
        }),
        _ => Err(ParseError::Usage(USAGE_ADD)),
    }
}

fn parse_product_save(rest: &str) -> Result<ProductDraft, ParseError> {
    let fields: Vec<&str> = rest.split('|').map(str::trim).collect();
    let [id, name, units, cost, retail, case] = fields.as_slice() else {
        return Err(ParseError::Usage(USAGE_SAVE));
    };

    let id = match *id {
        "" | "new" => None,
        id => Some(parse_id(id)?),
    };

    Ok(ProductDraft {
        id,
        name: name.to_string(),
        units_per_case: units.to_string(),
        distributor_cost_with_tax: cost.to_string(),
        retail_price_with_tax: retail.to_string(),
        wholesale_case_price: case.to_string(),
    })
}

fn parse_id(text: &str) -> Result<u32, ParseError> {
    text.trim_start_matches('#')
        .parse()
        .map_err(|_| ParseError::Invalid(format!("'{}' is not a product id", text)))
}

fn parse_mode(text: &str) -> Result<PricingMode, ParseError> {
    PricingMode::from_str(text).map_err(|e| ParseError::Invalid(e.to_string()))
}

// =============================================================================
// Session
// =============================================================================

/// Everything one operator works with.
#[derive(Debug)]
pub struct Session {
    pub config: ConfigState,
    pub catalog: CatalogState,
    pub quote: Quotation,
}

impl Session {
    /// Loads the catalog named in `config` and starts an empty quote.
    pub fn open(config: ConfigState) -> Self {
        let catalog = CatalogState::open(CatalogStore::new(config.catalog_path.clone()));
        let quote = Quotation::new(config.tax_factor);
        Session {
            config,
            catalog,
            quote,
        }
    }

    /// Runs one command and returns the text to show.
    pub fn execute(&mut self, command: Command, today: NaiveDate) -> ApiResult<String> {
        match command {
            Command::Products => Ok(render_products(&list_products(&self.catalog))),
            Command::Price(request) => {
                let preview = preview_price(&self.catalog, &self.quote, request)?;
                Ok(format!(
                    "{} ({}): {} per case",
                    preview.product_name, preview.mode, preview.display
                ))
            }
            Command::Add(request) => {
                let response = add_to_quote(&self.catalog, &mut self.quote, request)?;
                Ok(render_quote(&response))
            }
            Command::Client(name) => {
                let response = set_client(&mut self.quote, &name);
                if response.client_name.trim().is_empty() {
                    Ok("Client cleared.".to_string())
                } else {
                    Ok(format!("Client: {}", response.client_name))
                }
            }
            Command::Show => Ok(render_quote(&get_quote(&self.quote))),
            Command::Clear => {
                clear_quote(&mut self.quote);
                Ok("Quote cleared.".to_string())
            }
            Command::Export => {
                let response = export_quote(&self.config, &self.quote, today)?;
                Ok(format!("Saved {}", response.path))
            }
            Command::ProductSave(draft) => {
                let product = save_product(&mut self.catalog, draft)?;
                Ok(format!("Saved #{} {}", product.id, product.name))
            }
            Command::ProductDelete(id) => {
                if delete_product(&mut self.catalog, id)? {
                    Ok(format!("Deleted #{}", id))
                } else {
                    Ok(format!("No product #{}", id))
                }
            }
            Command::Help => Ok(HELP.to_string()),
            Command::Quit => Ok(String::new()),
        }
    }
}

// =============================================================================
// Loop
// =============================================================================

/// Reads commands until `quit` or end of input.
///
/// `today` dates exported quotes.
pub fn run_console<R, W>(
    session: &mut Session,
    input: R,
    mut output: W,
    today: impl Fn() -> NaiveDate,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    if let Some(warning) = session.catalog.take_load_warning() {
        let warning = ApiError::from(warning);
        writeln!(output, "warning: {}; starting with an empty catalog", warning.message)?;
    }
    writeln!(
        output,
        "{} product(s) loaded. Type 'help' for commands.",
        session.catalog.catalog().len()
    )?;

    write!(output, "{}", PROMPT)?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => {
                debug!(?command, "Console command");
                match session.execute(command, today()) {
                    Ok(text) => writeln!(output, "{}", text)?,
                    Err(err) => writeln!(output, "error: {}", err.message)?,
                }
            }
            Err(err) => writeln!(output, "error: {}", err)?,
        }
        write!(output, "{}", PROMPT)?;
        output.flush()?;
    }

    writeln!(output)?;
    Ok(())
}

// =============================================================================
// Rendering
// =============================================================================

fn render_products(products: &[Product]) -> String {
    if products.is_empty() {
        return "(no products)".to_string();
    }

    let mut out = format!(
        "{:>4}  {:<30} {:>6} {:>12} {:>12} {:>12}",
        "id", "name", "units", "cost", "retail", "case"
    );
    for p in products {
        out.push_str(&format!(
            "\n{:>4}  {:<30} {:>6} {:>12} {:>12} {:>12}",
            p.id,
            p.name,
            p.units_per_case,
            p.distributor_cost_with_tax.to_string(),
            p.retail_price_with_tax.to_string(),
            p.wholesale_case_price.to_string(),
        ));
    }
    out
}

fn render_quote(quote: &QuoteResponse) -> String {
    let client = if quote.client_name.trim().is_empty() {
        "(none)"
    } else {
        quote.client_name.as_str()
    };
    let mut out = format!("Client: {}", client);

    if quote.items.is_empty() {
        out.push_str("\n(no products in quote)");
    }
    for (n, item) in quote.items.iter().enumerate() {
        let margin = item
            .margin_percent
            .map(|m| format!(" +{}%", m.normalize()))
            .unwrap_or_default();
        out.push_str(&format!(
            "\n{:>3}. {:<30} {:>4} x {:>12} = {:>12}  {}{}",
            n + 1,
            item.product_name,
            item.quantity,
            item.unit_price.to_string(),
            item.subtotal.to_string(),
            item.pricing_mode,
            margin,
        ));
    }

    let label_width = 48;
    out.push_str(&format!(
        "\n{:>w$} {:>14}\n{:>w$} {:>14}\n{:>w$} {:>14}",
        "Subtotal:",
        quote.totals.pretax_subtotal.to_string(),
        format!("{}:", quote.tax_label),
        quote.totals.tax_amount.to_string(),
        "Total:",
        quote.totals.grand_total.to_string(),
        w = label_width,
    ));
    out
}
