//! # gridscope-cli
//!
//! Command-line explorer for tabular workbooks: load a file, search
//! across all sheets, select columns, and inspect aggregates and
//! extracted transaction records.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use gridscope_engine::{FilteredView, Ratio, Session};
use gridscope_sheet::{Book, CellValue};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// gridscope - explore and aggregate tabular workbooks
#[derive(Parser)]
#[command(name = "gridscope")]
#[command(author, version, about = "Workbook search & aggregation explorer", long_about = None)]
struct Cli {
    /// Workbook file to load (.xlsx, .xls, .csv, .tsv)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Filter rows by a case-insensitive search term
    #[arg(short, long)]
    search: Option<String>,

    /// Sheet to explore (defaults to the first sheet)
    #[arg(long)]
    sheet: Option<String>,

    /// Comma-separated column indices to aggregate (0-based)
    #[arg(short, long, value_name = "COLS")]
    columns: Option<String>,

    /// Write extracted transactions to an XLSX file
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// Output format (json, csv, table)
    #[arg(short = 'f', long = "format", default_value = "table")]
    format: OutputFormat,

    /// Number of symbols in the summary
    #[arg(long, default_value_t = 5)]
    top: usize,

    /// Start the interactive explorer
    #[arg(short = 'i', long = "interactive")]
    interactive: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Output format for results.
#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Pretty table output (default)
    #[default]
    Table,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .init();
    }

    let mut session = Session::load(&cli.file)
        .await
        .with_context(|| format!("Failed to load {}", cli.file.display()))?;

    print_load_report(&session);

    if session.is_empty() {
        anyhow::bail!("workbook contains no sheets and no transaction data");
    }

    if let Some(sheet) = &cli.sheet {
        session
            .set_active_sheet(sheet)
            .map_err(|e| anyhow::anyhow!("{e}"))?;
    }
    if let Some(term) = &cli.search {
        session.set_search(term);
    }
    if let Some(columns) = &cli.columns {
        for col in parse_columns(columns)? {
            session.toggle_column(col);
        }
    }

    if let Some(path) = &cli.export {
        export_records(&session, path)?;
        println!("{} {}", "Exported:".green().bold(), path.display());
    }

    if cli.interactive {
        run_repl(&mut session, cli.format, cli.top)
    } else {
        print_session(&session, cli.format, cli.top)
    }
}

/// Parse "1,3,4" into column indices.
fn parse_columns(spec: &str) -> Result<Vec<usize>> {
    spec.split(',')
        .map(|part| {
            part.trim()
                .parse::<usize>()
                .with_context(|| format!("Invalid column index: '{part}'"))
        })
        .collect()
}

/// Print what the load produced: sheets, record count, and whether
/// the transaction schema matched.
fn print_load_report(session: &Session) {
    println!(
        "{} {} ({} sheets, {} transactions)",
        "Loaded:".cyan().bold(),
        session.file_base_name(),
        session.book().sheet_count(),
        session.records().len()
    );

    if let Some(err) = session.schema_error() {
        // Not fatal: the raw sheets are still explorable
        println!(
            "{} {e} - no transaction data, raw sheets remain available",
            "Warning:".yellow().bold(),
            e = err
        );
    }
}

fn export_records(session: &Session, path: &std::path::Path) -> Result<()> {
    let sheet = gridscope_engine::records_to_sheet(&session.sorted_records());
    let mut book = Book::new();
    book.add_sheet("Transactions", sheet)
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    book.save_as_xlsx(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// One-shot output: the active filtered view, any aggregates, and the
/// symbol summary.
fn print_session(session: &Session, format: OutputFormat, top: usize) -> Result<()> {
    if let Some(view) = session.filtered_view() {
        let sheet_name = session.active_sheet_name().unwrap_or("?");
        println!("\n{} {sheet_name}", "Sheet:".cyan().bold());
        print_view(&view, format)?;
    }

    print_aggregates(session);

    let entries = session.summary_entries(top);
    if !entries.is_empty() {
        println!("\n{}", "Top symbols by value:".cyan().bold());
        for entry in &entries {
            println!("  {:<12} {}", entry.symbol, entry.total_value);
        }
    }

    Ok(())
}

fn print_view(view: &FilteredView, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_view_table(view),
        OutputFormat::Json => {
            let headers: Vec<String> = view.headers.iter().map(CellValue::as_str).collect();
            let rows: Vec<serde_json::Map<String, serde_json::Value>> = view
                .rows
                .iter()
                .map(|row| {
                    headers
                        .iter()
                        .enumerate()
                        .map(|(i, h)| {
                            let cell = row.get(i).cloned().unwrap_or(CellValue::Null);
                            let value = serde_json::to_value(&cell)
                                .unwrap_or(serde_json::Value::Null);
                            (h.clone(), value)
                        })
                        .collect()
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(view.headers.iter().map(CellValue::as_str))?;
            for row in &view.rows {
                writer.write_record(row.iter().map(CellValue::as_str))?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

fn print_view_table(view: &FilteredView) {
    let headers: Vec<String> = view.headers.iter().map(CellValue::as_str).collect();
    let mut widths: Vec<usize> = headers.iter().map(String::len).collect();

    let rendered: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|row| {
            (0..headers.len().max(row.len()))
                .map(|i| row.get(i).map(CellValue::as_str).unwrap_or_default())
                .collect()
        })
        .collect();

    for row in &rendered {
        for (i, cell) in row.iter().enumerate() {
            if i >= widths.len() {
                widths.push(cell.len());
            } else if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let header_line: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{h:<width$}", width = widths[i]))
        .collect();
    println!("{}", header_line.join("  ").bold());

    for row in &rendered {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{cell:<width$}", width = widths.get(i).copied().unwrap_or(0)))
            .collect();
        println!("{}", line.join("  "));
    }
    println!("({} rows)", view.rows.len());
}

fn print_aggregates(session: &Session) {
    let aggregates = session.aggregates();
    if aggregates.is_empty() {
        return;
    }

    println!("\n{}", "Aggregates:".cyan().bold());
    let headers: Vec<String> = session
        .filtered_view()
        .map(|v| v.headers.iter().map(CellValue::as_str).collect())
        .unwrap_or_default();

    for (col, agg) in &aggregates {
        let label = headers
            .get(*col)
            .filter(|h| !h.is_empty())
            .cloned()
            .unwrap_or_else(|| format!("col {col}"));
        println!(
            "  {label}: sum={} count={} avg={}",
            agg.sum, agg.count, agg.average
        );
    }

    if let Some(result) = session.ratio() {
        let ratio = match result.ratio {
            Ratio::Value(v) => v.to_string(),
            Ratio::NotApplicable => "N/A".to_string(),
        };
        println!(
            "  ratio (col {} / col {}): {ratio}",
            result.numerator_col, result.denominator_col
        );
    }
}

/// Run the interactive explorer.
fn run_repl(session: &mut Session, format: OutputFormat, top: usize) -> Result<()> {
    println!(
        "{} {} - Interactive Mode",
        "gridscope".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        "Type {} for help, {} to exit\n",
        ":help".yellow(),
        ":quit".yellow()
    );

    let mut rl = DefaultEditor::new()?;

    loop {
        let prompt = format!(
            "{}> ",
            session.active_sheet_name().unwrap_or("gridscope")
        )
        .green()
        .bold()
        .to_string();

        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                match run_command(session, line, format, top) {
                    Ok(ReplFlow::Continue) => {}
                    Ok(ReplFlow::Quit) => break,
                    Err(e) => println!("{} {e}", "Error:".red().bold()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(e) => {
                println!("{} {e}", "Error:".red().bold());
                break;
            }
        }
    }

    Ok(())
}

enum ReplFlow {
    Continue,
    Quit,
}

fn run_command(
    session: &mut Session,
    line: &str,
    format: OutputFormat,
    top: usize,
) -> Result<ReplFlow> {
    let (command, rest) = match line.split_once(' ') {
        Some((c, r)) => (c, r.trim()),
        None => (line, ""),
    };

    match command {
        ":quit" | ":q" | ":exit" => return Ok(ReplFlow::Quit),
        ":help" | ":h" | ":?" => print_help(),
        ":sheets" => {
            for (i, name) in session.book().sheet_names().iter().enumerate() {
                let marker = if Some(*name) == session.active_sheet_name() {
                    "*"
                } else {
                    " "
                };
                println!("{marker} [{i}] {name}");
            }
        }
        ":sheet" => {
            let name = resolve_sheet_name(session, rest)?;
            session
                .set_active_sheet(&name)
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            println!("Active sheet: {name} (column selection cleared)");
        }
        "search" => {
            session.set_search(rest);
            if rest.is_empty() {
                println!("Search cleared");
            }
            if let Some(view) = session.filtered_view() {
                println!("{} matching rows", view.row_count());
            }
        }
        "select" => {
            let col: usize = rest
                .parse()
                .with_context(|| format!("Invalid column index: '{rest}'"))?;
            let before = session.selection().len();
            session.toggle_column(col);
            if session.selection().len() == before && !session.selection().contains(col) {
                println!("Column {col} is not summable in the current view");
            } else {
                println!("Selected columns: {:?}", session.selection().indices());
            }
        }
        "agg" => {
            if session.selection().is_empty() {
                println!("No columns selected; use {} first", "select COL".yellow());
            } else {
                print_aggregates(session);
            }
        }
        "view" => {
            if let Some(view) = session.filtered_view() {
                print_view(&view, format)?;
            }
        }
        "records" => {
            for record in session.sorted_records() {
                println!(
                    "{:<12} {:>14} {:<10} {}",
                    record.symbol, record.value, record.transaction_type, record.date
                );
            }
        }
        "summary" => {
            for entry in session.summary_entries(top) {
                println!("  {:<12} {}", entry.symbol, entry.total_value);
            }
        }
        "export" => {
            let path = if rest.is_empty() {
                PathBuf::from(format!("{}_transactions.xlsx", session.file_base_name()))
            } else {
                PathBuf::from(rest)
            };
            export_records(session, &path)?;
            println!("{} {}", "Exported:".green().bold(), path.display());
        }
        _ => {
            println!("{} Unknown command: {}", "Error:".red().bold(), line);
        }
    }

    Ok(ReplFlow::Continue)
}

/// Accept either a sheet index or a sheet name.
fn resolve_sheet_name(session: &Session, arg: &str) -> Result<String> {
    if let Ok(index) = arg.parse::<usize>() {
        let names = session.book().sheet_names();
        return names
            .get(index)
            .map(|s| (*s).to_string())
            .with_context(|| format!("No sheet at index {index}"));
    }
    Ok(arg.to_string())
}

fn print_help() {
    println!("Commands:");
    println!("  {}          list sheets", ":sheets".yellow());
    println!("  {}  switch sheet (resets selection)", ":sheet N|NAME".yellow());
    println!("  {}    filter all sheets (empty to clear)", "search TERM".yellow());
    println!("  {}     toggle a column for aggregation", "select COL".yellow());
    println!("  {}            show aggregates for selection", "agg".yellow());
    println!("  {}           print the filtered view", "view".yellow());
    println!("  {}        extracted transactions by value", "records".yellow());
    println!("  {}        top symbols by total value", "summary".yellow());
    println!("  {}  write transactions to XLSX", "export [PATH]".yellow());
    println!("  {}          quit", ":quit".yellow());
}
