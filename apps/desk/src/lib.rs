//! # Aqua Quote Desk Library
//!
//! Operator shell for the quotation engine.
//!
//! ## Module Organization
//! ```text
//! aqua_desk_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── console.rs      ◄─── Line-oriented front end
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── catalog.rs  ◄─── Catalog + store, save-then-commit edits
//! │   └── config.rs   ◄─── Paths, tax factor, document title
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── catalog.rs  ◄─── Catalog maintenance commands
//! │   ├── quote.rs    ◄─── Quote building commands
//! │   └── export.rs   ◄─── Printable quote export
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod console;
pub mod error;
pub mod state;

use chrono::Local;
use directories::ProjectDirs;
use std::io;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use console::Session;
use state::ConfigState;

/// Runs the console shell.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: warn, aqua crates at info; RUST_LOG overrides            │
/// │                                                                         │
/// │  2. Determine Data Directory ─────────────────────────────────────────► │
/// │     • AQUA_DATA_DIR if set                                              │
/// │     • macOS: ~/Library/Application Support/com.aqua.quote/              │
/// │     • Windows: %APPDATA%\aqua\quote\data\                               │
/// │     • Linux: ~/.local/share/quote/                                      │
/// │                                                                         │
/// │  3. Resolve Configuration (AQUA_* overrides) ─────────────────────────► │
/// │                                                                         │
/// │  4. Load Catalog (empty + warning if missing or corrupt) ─────────────► │
/// │                                                                         │
/// │  5. Read commands until quit / end of input ──────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() {
    init_tracing();

    info!("Starting Aqua Quote Desk");

    let data_dir = get_data_dir();
    info!(data_dir = %data_dir.display(), "Data directory determined");

    let config = ConfigState::from_env(&data_dir);
    info!(
        catalog = %config.catalog_path.display(),
        exports = %config.export_dir.display(),
        tax_factor = %config.tax_factor,
        "Configuration loaded"
    );

    let mut session = Session::open(config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = console::run_console(&mut session, stdin.lock(), stdout.lock(), || {
        Local::now().date_naive()
    }) {
        error!(error = %e, "Console stopped");
    }

    info!("Aqua Quote Desk stopped");
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=aqua=trace` - Show trace for aqua crates only
/// - Default: warnings, plus info from aqua crates
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,aqua=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Determines the data directory based on the platform.
///
/// ## Development Override
/// Set `AQUA_DATA_DIR` to use a custom directory. When no platform
/// directory can be found the working directory is used.
fn get_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("AQUA_DATA_DIR") {
        return PathBuf::from(dir);
    }

    match ProjectDirs::from("com", "aqua", "quote") {
        Some(dirs) => dirs.data_dir().to_path_buf(),
        None => {
            warn!("Could not determine app data directory, using the working directory");
            PathBuf::from(".")
        }
    }
}
