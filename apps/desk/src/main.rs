//! # Aqua Quote Desk Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Aqua Quote Desk                                  │
//! │                                                                         │
//! │  stdin ──► console.rs ──► commands/ ──► aqua-core (pricing, quote)      │
//! │                               │                                         │
//! │                               ├──► aqua-store (products.json)           │
//! │                               └──► quotes/quote_<client>_<date>.txt     │
//! │  stdout ◄── answers           stderr ◄── tracing logs                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

fn main() {
    // Setup lives in lib.rs for testability
    aqua_desk_lib::run();
}
