//! CLI tool for sheetgrid - replays keystrokes against a CSV file and prints
//! the resulting view state as JSON
//!
//! Usage:
//!   sheetgrid_cli <input.csv>                               # Report initial view
//!   sheetgrid_cli <input.csv> --config cfg.json             # Layout from JSON config
//!   sheetgrid_cli <input.csv> --keys Shift+ArrowDown,Ctrl+c # Replay keys
//!   sheetgrid_cli <input.csv> -o out.json                   # Write report to file
//!
//! Keys use DOM key names with optional `Ctrl+` / `Shift+` prefixes. Log
//! output goes to stderr and is filtered with `RUST_LOG`.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use tracing_subscriber::EnvFilter;

use sheetgrid::csv::Delimiter;
use sheetgrid::{
    CellRange, ClipboardSink, MemoryClipboard, SheetConfig, SheetView, TableProvider, VisibleCell,
};

#[derive(Default)]
struct Args {
    input: String,
    config: Option<String>,
    keys: Vec<String>,
    output: Option<String>,
}

fn usage() -> ! {
    eprintln!(
        "Usage: sheetgrid_cli <input.csv> [--config cfg.json] [--keys k1,k2,...] [-o output.json]"
    );
    std::process::exit(1);
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => args.config = Some(iter.next().unwrap_or_else(|| usage())),
            "--keys" => {
                let keys = iter.next().unwrap_or_else(|| usage());
                args.keys = keys
                    .split(',')
                    .filter(|k| !k.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "-o" => args.output = Some(iter.next().unwrap_or_else(|| usage())),
            other if args.input.is_empty() => args.input = other.to_string(),
            _ => usage(),
        }
    }
    if args.input.is_empty() {
        usage();
    }
    args
}

/// Split `Ctrl+Shift+Home` into `("Home", ctrl, shift)`.
fn parse_key(chord: &str) -> (&str, bool, bool) {
    let mut key = chord;
    let mut ctrl = false;
    let mut shift = false;
    loop {
        if let Some(rest) = key.strip_prefix("Ctrl+") {
            ctrl = true;
            key = rest;
        } else if let Some(rest) = key.strip_prefix("Shift+") {
            shift = true;
            key = rest;
        } else {
            return (key, ctrl, shift);
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    columns: u32,
    rows: u32,
    selection: Option<CellRange>,
    cells_selected: u64,
    hidden_columns: u32,
    hidden_rows: u32,
    maximum_hidden_columns: u32,
    maximum_hidden_rows: u32,
    editing: Option<(u32, u32)>,
    clipboard: Option<String>,
    /// Keys whose action was refused, with the reason.
    refused: Vec<String>,
    visible_cells: Vec<VisibleCell>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = parse_args();

    let text = match fs::read_to_string(&args.input) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error reading {}: {}", args.input, e);
            std::process::exit(1);
        }
    };

    let mut config = match &args.config {
        Some(path) => {
            let json = match fs::read_to_string(path) {
                Ok(j) => j,
                Err(e) => {
                    eprintln!("Error reading {}: {}", path, e);
                    std::process::exit(1);
                }
            };
            match SheetConfig::from_json(&json) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Error in {}: {}", path, e);
                    std::process::exit(1);
                }
            }
        }
        None => SheetConfig::default(),
    };

    let is_tsv = Path::new(&args.input)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("tsv"));
    let delim = if is_tsv {
        Delimiter::Tab
    } else {
        Delimiter::Comma
    };
    let table = TableProvider::from_delimited(&text, delim, true);
    if args.config.is_none() {
        config.number_frozen_rows = table.heading_rows();
    }

    let mut view = match SheetView::new(table, MemoryClipboard::new(), config) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error creating view: {}", e);
            std::process::exit(1);
        }
    };

    let mut refused = Vec::new();
    for chord in &args.keys {
        let (key, ctrl, shift) = parse_key(chord);
        match view.key_down(key, ctrl, shift) {
            Ok(true) => {}
            Ok(false) => tracing::warn!(key = %chord, "key not mapped"),
            Err(e) => refused.push(format!("{chord}: {e}")),
        }
        if shift {
            view.key_up("Shift");
        }
    }

    let viewport = view.viewport();
    let report = Report {
        columns: viewport.column_count(),
        rows: viewport.row_count(),
        selection: view.selected_range(),
        cells_selected: view.number_of_cells_selected(),
        hidden_columns: viewport.hidden_columns(),
        hidden_rows: viewport.hidden_rows(),
        maximum_hidden_columns: viewport.maximum_hidden_columns(),
        maximum_hidden_rows: viewport.maximum_hidden_rows(),
        editing: view.editor().editing_cell(),
        clipboard: view.clipboard().text(),
        refused,
        visible_cells: view.visible_cells(),
    };

    let json = match serde_json::to_string_pretty(&report) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    match args.output {
        Some(path) => {
            if let Err(e) = fs::write(&path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
