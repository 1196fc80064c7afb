//! # villan-printer
//!
//! ESC/POS thermal printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command building
//! - Latin-9 (ISO-8859-15) encoding for Nordic receipt printers
//! - Network printing (raw TCP)
//! - Order number banner rendering (raster graphics)
//!
//! Business logic (WHAT to print) stays in application code:
//! - Ticket layouts and dispatch → villan-bridge
//!
//! ## Example
//!
//! ```ignore
//! use villan_printer::{EscPosBuilder, NetworkPrinter, Printer};
//!
//! // Build ESC/POS content
//! let mut builder = EscPosBuilder::new(48);
//! builder.center();
//! builder.bold();
//! builder.line("Studentpuben Villan");
//! builder.left();
//! builder.sep_double();
//! builder.line("2x Burger");
//! builder.cut();
//!
//! // Send to network printer
//! let printer = NetworkPrinter::from_net_path("tcp://192.168.1.100:9100")?;
//! printer.print(&builder.build()).await?;
//! ```

mod encoding;
mod error;
mod escpos;
mod printer;
mod raster;

// Re-exports
pub use encoding::{encode_latin9, latin9_width, truncate_latin9};
pub use error::{PrintError, PrintResult};
pub use escpos::EscPosBuilder;
pub use printer::{NetworkPrinter, Printer};
pub use raster::order_number_banner;
