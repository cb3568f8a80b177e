//! # Renglon CLI
//!
//! Builds demo documents and writes the raw printer bytes to a file or
//! stdout. Pipe them to a device node or spool them as-is; the stream is
//! exactly what the printer expects.
//!
//! ## Usage
//!
//! ```bash
//! # thermal receipt (ESC/POS), bytes to stdout
//! renglon receipt
//!
//! # receipt over Star line mode, rows from a file, cut at the end
//! renglon receipt --star --rows items.json --cut -o receipt.bin
//!
//! # paged dot-matrix invoice (ESC/P) with page numbers
//! renglon invoice --page-height 24 -o invoice.prn
//!
//! # supported printer families
//! renglon dialects
//! ```
//!
//! Row files are JSON arrays of objects:
//! `[{"item": "Espresso", "qty": 2, "price": 2.40}, ...]`

use std::fs;
use std::io::Write as _;
use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};
use serde_json::{Value, json};

use renglon::dialect::{
    Alignment, CutMode, Dialect, EscP, EscPos, FontStyle, Pitch, PrintStyle, StarLine,
};
use renglon::extras::{CutPaper, QrCode};
use renglon::{FieldResult, Group, ItemKind, Line, RenglonError, Report};

/// Renglon - layout engine for receipt and dot-matrix printers
#[derive(Parser)]
#[command(name = "renglon")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a demo sales receipt (continuous paper)
    Receipt {
        /// JSON file with sale rows (defaults to built-in demo rows)
        #[arg(long, value_name = "FILE")]
        rows: Option<PathBuf>,

        /// Target Star line mode instead of ESC/POS
        #[arg(long)]
        star: bool,

        /// Cut the paper after the receipt
        #[arg(long)]
        cut: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Build a demo paged invoice with page numbers (ESC/P)
    Invoice {
        /// JSON file with invoice rows (defaults to built-in demo rows)
        #[arg(long, value_name = "FILE")]
        rows: Option<PathBuf>,

        /// Page height in text lines
        #[arg(long, default_value = "24")]
        page_height: usize,

        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List supported printer families
    Dialects,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "renglon=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), RenglonError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Receipt { rows, star, cut, output } => {
            let rows = load_rows(rows.as_deref(), demo_sale_rows)?;
            let bytes = if star {
                build_receipt(rows, cut, StarLine)?
            } else {
                build_receipt(rows, cut, EscPos)?
            };
            write_output(&bytes, output.as_deref())
        }
        Commands::Invoice { rows, page_height, output } => {
            let rows = load_rows(rows.as_deref(), demo_invoice_rows)?;
            let bytes = build_invoice(rows, page_height)?;
            write_output(&bytes, output.as_deref())
        }
        Commands::Dialects => {
            for dialect in [&EscP as &dyn Dialect, &EscPos, &StarLine] {
                println!("{}", dialect.name());
            }
            Ok(())
        }
    }
}

fn load_rows(
    path: Option<&std::path::Path>,
    fallback: fn() -> Vec<Value>,
) -> Result<Vec<Value>, RenglonError> {
    match path {
        Some(path) => Ok(serde_json::from_str(&fs::read_to_string(path)?)?),
        None => Ok(fallback()),
    }
}

fn write_output(bytes: &[u8], path: Option<&std::path::Path>) -> Result<(), RenglonError> {
    match path {
        Some(path) => fs::write(path, bytes)?,
        None => std::io::stdout().write_all(bytes)?,
    }
    Ok(())
}

// ============================================================================
// DEMO DOCUMENTS
// ============================================================================

fn demo_sale_rows() -> Vec<Value> {
    vec![
        json!({"item": "Espresso", "qty": 2, "price": 2.40}),
        json!({"item": "Croissant", "qty": 1, "price": 1.80}),
        json!({"item": "Orange juice, freshly squeezed", "qty": 1, "price": 3.20}),
    ]
}

fn demo_invoice_rows() -> Vec<Value> {
    vec![
        json!({"item": "Thermal paper roll 80mm x 80m", "qty": 24, "price": 1.15}),
        json!({"item": "Ribbon cartridge, black", "qty": 6, "price": 4.90}),
        json!({"item": "Cable, serial DB9 to DB25, 2m shielded", "qty": 3, "price": 7.25}),
        json!({"item": "Power supply 24V 2.5A", "qty": 2, "price": 18.00}),
        json!({"item": "Wall mount bracket", "qty": 5, "price": 6.40}),
        json!({"item": "Cleaning pen for thermal heads", "qty": 10, "price": 2.10}),
        json!({"item": "Paper guide assembly, spare", "qty": 1, "price": 12.75}),
        json!({"item": "Interface board, ethernet", "qty": 2, "price": 39.00}),
    ]
}

fn row_amount(row: &Value) -> f64 {
    let qty = row["qty"].as_f64().unwrap_or(1.0);
    let price = row["price"].as_f64().unwrap_or(0.0);
    qty * price
}

fn build_receipt(
    rows: Vec<Value>,
    cut: bool,
    dialect: impl Dialect + 'static,
) -> Result<Vec<u8>, RenglonError> {
    let total: f64 = rows.iter().map(row_amount).sum();
    let stamp = Local::now().format("%Y-%m-%d %H:%M").to_string();

    let mut report = Report::new(dialect);
    report.set_page_height(0);

    report.add(
        Line::new(ItemKind::ReportHeader, "CORNER SHOP")
            .aligned(Alignment::Center)
            .styled(FontStyle::Emphasized),
    );
    report.add(
        Line::new(ItemKind::ReportHeader, "________________")
            .aligned(Alignment::Center)
            .bind(move |_| FieldResult::new(stamp.clone())),
    );
    report.add(Line::new(ItemKind::ReportHeader, "--------------------------------"));

    let sale = report.add_group(Group::with_rows(rows));
    report.add_child(
        sale,
        Line::new(ItemKind::Detail, "__________________ ___ ________").bind(|args| {
            let Some(row) = args.row else {
                return FieldResult::new("");
            };
            match args.index {
                0 => FieldResult::new(row["item"].as_str().unwrap_or("?")).wrapped(),
                1 => FieldResult::new(row["qty"].as_f64().unwrap_or(1.0).to_string())
                    .aligned(Alignment::Right),
                _ => FieldResult::new(format!("{:.2}", row_amount(row)))
                    .aligned(Alignment::Right),
            }
        }),
    );
    report.add_child(sale, Line::new(ItemKind::Footer, "--------------------------------"));

    let total_text = format!("{total:.2}");
    report.add(
        Line::new(ItemKind::ReportFooter, "TOTAL                 __________")
            .styled(FontStyle::Emphasized)
            .bind(move |_| FieldResult::new(total_text.clone()).aligned(Alignment::Right)),
    );
    report.add(Line::new(ItemKind::ReportFooter, "   thank you, come again"));

    report.add_item(QrCode::new("https://example.com/receipt/1234")?);
    if cut {
        report.add_item(CutPaper::new(CutMode::FeedAndPartial));
    }

    report.build()
}

fn build_invoice(rows: Vec<Value>, page_height: usize) -> Result<Vec<u8>, RenglonError> {
    let total: f64 = rows.iter().map(row_amount).sum();
    let stamp = Local::now().format("%Y-%m-%d").to_string();
    let number = Local::now().format("INV-%y%m%d-01").to_string();

    let mut report = Report::new(EscP);
    report.set_page_height(page_height);

    report.add(
        Line::new(ItemKind::PageHeader, "ACME SUPPLY CO.                          Page $P of $T"),
    );
    report.add(Line::new(ItemKind::PageFooter, "-- continued overleaf --"));

    report.add(
        Line::new(ItemKind::ReportHeader, "INVOICE ______________        Date: __________")
            .print_style(PrintStyle::pitch(Pitch::Pica))
            .bind(move |args| match args.index {
                0 => FieldResult::new(number.clone()),
                _ => FieldResult::new(stamp.clone()),
            }),
    );
    report.add(Line::new(ItemKind::ReportHeader, ""));

    report.add(
        Line::new(
            ItemKind::Header,
            "Description                              Qty      Unit     Amount",
        )
        .styled(FontStyle::Underline)
        .repeat_on_new_page(),
    );

    let items = report.add_group(Group::with_rows(rows));
    report.add_child(
        items,
        Line::new(
            ItemKind::Detail,
            "________________________________________ ___ ________ __________",
        )
        .bind(|args| {
            let Some(row) = args.row else {
                return FieldResult::new("");
            };
            match args.index {
                0 => FieldResult::new(row["item"].as_str().unwrap_or("?")).wrapped(),
                1 => FieldResult::new(row["qty"].as_f64().unwrap_or(1.0).to_string())
                    .aligned(Alignment::Right),
                2 => FieldResult::new(format!("{:.2}", row["price"].as_f64().unwrap_or(0.0)))
                    .aligned(Alignment::Right),
                _ => FieldResult::new(format!("{:.2}", row_amount(row)))
                    .aligned(Alignment::Right),
            }
        }),
    );

    let total_text = format!("{total:.2}");
    report.add(
        Line::new(ItemKind::ReportFooter, "                                Total due:     __________")
            .styled(FontStyle::Emphasized)
            .keep_together()
            .bind(move |_| FieldResult::new(total_text.clone()).aligned(Alignment::Right)),
    );

    report.build()
}
