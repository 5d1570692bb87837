use anyhow::{Context, Result, bail};
use chrono::Datelike;
use clap::{Args, Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::PathBuf;

mod config;
mod input;

use protea_core::Categorizer;
use protea_recon::{ParseOptions, ParsedStatement, check_continuity, parse_statement};

#[derive(Parser, Debug)]
#[command(name = "protea", version, about = "FNB statement extraction and reconciliation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse statements and print the reconstructed ledger
    Parse {
        #[command(flatten)]
        opts: CommonOpts,
    },

    /// Reconcile each statement against its declared balances
    Reconcile {
        #[command(flatten)]
        opts: CommonOpts,
    },

    /// Totals by category and by month across all statements
    Summary {
        #[command(flatten)]
        opts: CommonOpts,
    },

    /// Write all transactions to a CSV file
    Export {
        #[command(flatten)]
        opts: CommonOpts,

        /// Output CSV path
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Args, Debug)]
struct CommonOpts {
    /// Extracted statement files (.txt page text, .json word positions)
    files: Vec<PathBuf>,

    /// Year to assume when a statement declares none (default: current year)
    #[arg(long)]
    year: Option<i32>,

    /// Reconciliation tolerance in ZAR
    #[arg(long)]
    tolerance: Option<f64>,

    /// TOML config: tolerance, extra noise patterns, category keywords
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Parse { opts } => {
            let batch = load_batch(&opts)?;
            cmd_parse(&batch)
        }
        Command::Reconcile { opts } => {
            let batch = load_batch(&opts)?;
            cmd_reconcile(&batch)
        }
        Command::Summary { opts } => {
            let batch = load_batch(&opts)?;
            cmd_summary(&batch)
        }
        Command::Export { opts, out } => {
            let batch = load_batch(&opts)?;
            cmd_export(&batch, &out)
        }
    }
}

struct Batch {
    statements: Vec<ParsedStatement>,
    tolerance: f64,
    categorizer: Categorizer,
}

/// Parse every input file. A file that cannot be read or holds no text is a
/// per-file warning; the rest of the batch still goes through.
fn load_batch(opts: &CommonOpts) -> Result<Batch> {
    if opts.files.is_empty() {
        bail!("no input files given");
    }

    let cfg = config::load_config(opts.config.as_deref())?;
    let tolerance = opts.tolerance.unwrap_or(cfg.tolerance);
    let fallback_year = opts.year.unwrap_or_else(|| chrono::Local::now().year());
    let options = ParseOptions {
        tolerance,
        fallback_year: Some(fallback_year),
        extra_noise_patterns: cfg.noise_patterns.clone(),
    };

    let mut statements = Vec::new();
    for path in &opts.files {
        let id = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let pages = match input::load_pages(path) {
            Ok(pages) => pages,
            Err(err) => {
                eprintln!("warning: skipping {}: {err:#}", path.display());
                continue;
            }
        };

        let parsed = parse_statement(&id, &pages, &options)
            .with_context(|| format!("parsing {}", path.display()))?;
        if parsed.transactions.is_empty() {
            eprintln!("warning: {id}: no transactions found");
        }
        statements.push(parsed);
    }

    Ok(Batch {
        statements,
        tolerance,
        categorizer: Categorizer::with_custom_rules(cfg.categories),
    })
}

fn cmd_parse(batch: &Batch) -> Result<()> {
    for statement in &batch.statements {
        println!("== {} ==", statement.id);
        for txn in &statement.transactions {
            println!(
                "{}  {:>12.2}  {:<24}  {}",
                txn.date,
                txn.amount,
                batch.categorizer.categorize(&txn.description).name(),
                txn.description,
            );
        }
        print_diagnostics(statement);
        println!();
    }
    Ok(())
}

fn cmd_reconcile(batch: &Batch) -> Result<()> {
    for statement in &batch.statements {
        let report = &statement.report;
        println!("{}", report.summary());
        match report.reconciles(batch.tolerance) {
            Some(true) => println!("  reconciled within {:.2}", batch.tolerance),
            Some(false) => println!("  MISMATCH: review the source statement"),
            None => println!("  not reconcilable: opening/closing balance missing"),
        }
        print_diagnostics(statement);
    }

    for brk in check_continuity(&batch.statements, batch.tolerance) {
        println!(
            "continuity break: {} closes at {:.2} but {} opens at {:.2} (gap {:.2})",
            brk.from_statement, brk.closing, brk.to_statement, brk.opening, brk.gap,
        );
    }
    Ok(())
}

fn cmd_summary(batch: &Batch) -> Result<()> {
    let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();
    let mut by_month: BTreeMap<String, f64> = BTreeMap::new();

    for statement in &batch.statements {
        for txn in &statement.transactions {
            let category = batch.categorizer.categorize(&txn.description).name();
            *by_category.entry(category).or_insert(0.0) += txn.amount;
            let month = format!("{}-{:02}", txn.date.year(), txn.date.month());
            *by_month.entry(month).or_insert(0.0) += txn.amount;
        }
    }

    println!("By category:");
    for (category, total) in &by_category {
        println!("  {category:<24} {total:>12.2}");
    }
    println!("By month:");
    for (month, total) in &by_month {
        println!("  {month:<24} {total:>12.2}");
    }
    Ok(())
}

fn cmd_export(batch: &Batch, out: &PathBuf) -> Result<()> {
    let mut writer = csv::Writer::from_path(out)
        .with_context(|| format!("creating {}", out.display()))?;
    writer.write_record(["date", "description", "amount", "category", "statement"])?;

    for statement in &batch.statements {
        for txn in &statement.transactions {
            writer.write_record([
                txn.date.to_string(),
                txn.description.clone(),
                format!("{:.2}", txn.amount),
                batch.categorizer.categorize(&txn.description).name().to_string(),
                txn.source_statement.clone(),
            ])?;
        }
    }
    writer.flush()?;

    let count: usize = batch.statements.iter().map(|s| s.transactions.len()).sum();
    println!("wrote {} transactions to {}", count, out.display());
    Ok(())
}

fn print_diagnostics(statement: &ParsedStatement) {
    for diagnostic in &statement.diagnostics {
        eprintln!("  diagnostic: {}", diagnostic.describe());
    }
}
