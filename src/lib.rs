//! # Renglon - Line-Template Layout Engine for Character Printers
//!
//! Renglon turns declarative fixed-width line templates plus a report
//! tree into the control-code byte streams character-mode printers
//! consume. It provides:
//!
//! - **Templates**: `_` runs mark value slots, everything else prints
//!   verbatim; values wrap, align and truncate within their slot
//! - **Report tree**: report/page headers and footers, data-bound detail
//!   groups over JSON rows, nested groups for per-row collections
//! - **Pagination**: fixed page heights, footers pinned to the page
//!   bottom, `$P`/`$T` page number placeholders, keep-together blocks
//! - **Dialects**: ESC/P dot-matrix, ESC/POS thermal receipt and Star
//!   line mode behind one trait
//!
//! ## Quick Start
//!
//! ```
//! use renglon::dialect::EscPos;
//! use renglon::{FieldResult, Group, ItemKind, Line, Report};
//! use serde_json::json;
//!
//! let mut report = Report::new(EscPos);
//! report.set_page_height(0); // continuous receipt paper
//!
//! report.add(Line::new(ItemKind::ReportHeader, "        CORNER SHOP"));
//! let sale = report.add_group(Group::with_rows(vec![
//!     json!({"item": "Espresso", "price": " 2.40"}),
//!     json!({"item": "Croissant", "price": " 1.80"}),
//! ]));
//! report.add_child(
//!     sale,
//!     Line::new(ItemKind::Detail, "____________________ ______").bind(|args| {
//!         let row = args.row.unwrap();
//!         match args.index {
//!             0 => FieldResult::new(row["item"].as_str().unwrap()),
//!             _ => FieldResult::new(row["price"].as_str().unwrap()),
//!         }
//!     }),
//! );
//! report.add_child(sale, Line::new(ItemKind::Footer, "---------------------------"));
//!
//! let bytes = report.build()?;
//! assert!(bytes.starts_with(&[0x1B, b'@'])); // printer reset
//! # Ok::<(), renglon::RenglonError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`layout`] | Templates, word wrap, alignment, line composition |
//! | [`report`] | The item tree: lines, groups, data binding |
//! | [`dialect`] | Printer family control-code tables |
//! | [`extras`] | Barcodes, QR codes, images, cuts, raw codes |
//! | [`encoding`] | Unicode to printer code-page conversion |
//! | [`output`] | Rendered elements, styled line serialization |
//! | [`error`] | Error types |
//!
//! ## Supported Printer Families
//!
//! - Epson ESC/P (9/24-pin dot-matrix, LX/FX class, fanfold paper)
//! - Epson ESC/POS (thermal receipt printers)
//! - Star line mode (TSP/SP class receipt printers)
//!
//! Other printers in these families generally work; dialects degrade to
//! plain text for anything a model cannot express.

pub mod dialect;
pub mod encoding;
pub mod error;
pub mod extras;
pub mod layout;
pub mod output;
mod page;
pub mod report;

// Re-exports for convenience
pub use encoding::TextEncoding;
pub use error::RenglonError;
pub use layout::FieldResult;
pub use report::{BindArgs, Group, ItemId, ItemKind, Line, RenderContext, Report, RowSource};
