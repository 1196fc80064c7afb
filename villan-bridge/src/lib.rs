//! Villan print bridge - POS order ingestion and ticket dispatch
//!
//! Pulls recent purchases from the Zettle commerce API, classifies each
//! order's line items by fulfillment destination (kitchen vs. register),
//! assigns a wrapping order number, and sends formatted tickets to the
//! network receipt printers.
//!
//! # Module structure
//!
//! ```text
//! villan-bridge/src/
//! ├── config.rs      # Environment configuration, register→printer map
//! ├── zettle.rs      # API client: token lifecycle + purchase polling
//! ├── classify.rs    # Raw purchase → destination-tagged ticket
//! ├── sequence.rs    # Wrapping order number allocator
//! ├── render.rs      # Ticket layouts (customer / kitchen / register)
//! ├── dispatch.rs    # Per-destination routing with isolated failures
//! ├── pipeline.rs    # One fetch→classify→number→dispatch cycle
//! └── logger.rs      # tracing subscriber setup
//! ```
//!
//! The process runs one ingestion cycle per invocation; scheduling is
//! left to an external timer (cron, systemd timer).

pub mod classify;
pub mod config;
pub mod dispatch;
pub mod logger;
pub mod pipeline;
pub mod render;
pub mod sequence;
pub mod zettle;

// Re-export public types
pub use classify::{LineItem, Ticket, classify};
pub use config::{Config, ConfigError};
pub use dispatch::{Destination, DispatchError, DispatchReport, PrintDispatcher};
pub use logger::init_logger;
pub use pipeline::{CycleSummary, run_cycle};
pub use render::{PAPER_WIDTH, TicketRenderer};
pub use sequence::SequenceAllocator;
pub use zettle::{ApiError, ApiResult, Purchase, PurchaseProduct, ZettleClient};
