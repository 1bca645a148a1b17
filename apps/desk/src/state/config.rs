//! # Configuration State
//!
//! Settings resolved once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`AQUA_*`)
//! 2. Platform data directory (`directories`)
//! 3. Defaults (this file)
//!
//! Read-only after startup.

use rust_decimal::Decimal;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

use aqua_core::export::DEFAULT_TITLE;
use aqua_core::{ExportFormatter, TaxFactor};
use aqua_store::CATALOG_FILE_NAME;

/// Sub-directory of the data dir that receives exported quotes.
pub const EXPORT_SUBDIR: &str = "quotes";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Catalog file (default: `<data dir>/products.json`)
    pub catalog_path: PathBuf,

    /// Where exported quotes are written (default: `<data dir>/quotes`)
    pub export_dir: PathBuf,

    /// Tax factor used for pricing, totals and the tax label
    pub tax_factor: TaxFactor,

    /// Heading printed on every exported quote
    pub document_title: String,
}

impl Default for ConfigState {
    /// Everything relative to the working directory, 16% tax.
    fn default() -> Self {
        ConfigState::for_data_dir(Path::new("."))
    }
}

impl ConfigState {
    /// Defaults rooted at `data_dir`.
    pub fn for_data_dir(data_dir: &Path) -> Self {
        ConfigState {
            catalog_path: data_dir.join(CATALOG_FILE_NAME),
            export_dir: data_dir.join(EXPORT_SUBDIR),
            tax_factor: TaxFactor::default(),
            document_title: DEFAULT_TITLE.to_string(),
        }
    }

    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `AQUA_CATALOG_PATH`: catalog file
    /// - `AQUA_EXPORT_DIR`: export directory
    /// - `AQUA_TAX_FACTOR`: e.g. "1.16" (values outside 1..=10 are ignored)
    /// - `AQUA_BUSINESS_NAME`: document title
    pub fn from_env(data_dir: &Path) -> Self {
        ConfigState::from_vars(data_dir, |key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] with an injectable lookup.
    pub fn from_vars(data_dir: &Path, var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::for_data_dir(data_dir);

        if let Some(path) = var("AQUA_CATALOG_PATH") {
            config.catalog_path = PathBuf::from(path);
        }

        if let Some(dir) = var("AQUA_EXPORT_DIR") {
            config.export_dir = PathBuf::from(dir);
        }

        if let Some(raw) = var("AQUA_TAX_FACTOR") {
            match Decimal::from_str(raw.trim())
                .map_err(|e| e.to_string())
                .and_then(|d| TaxFactor::new(d).map_err(|e| e.to_string()))
            {
                Ok(factor) => config.tax_factor = factor,
                Err(reason) => {
                    warn!(value = %raw, %reason, "Ignoring AQUA_TAX_FACTOR");
                }
            }
        }

        if let Some(name) = var("AQUA_BUSINESS_NAME") {
            let name = name.trim();
            if !name.is_empty() {
                config.document_title = name.to_string();
            }
        }

        config
    }

    /// Formatter carrying this deployment's title and tax label.
    pub fn export_formatter(&self) -> ExportFormatter {
        ExportFormatter::new(self.document_title.clone(), self.tax_factor)
    }
}
