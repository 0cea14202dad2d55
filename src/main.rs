use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use trading_report::extract::PlainTextExtractor;
use trading_report::model::TradingItem;
use trading_report::response::{self, ReportResponse};
use trading_report::settings::Settings;
use trading_report::{parser, TradingParseResult};

#[derive(Parser)]
#[command(name = "trading_report", about = "Sales table parser for club trading reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an extracted report and list its items
    Parse {
        file: PathBuf,
        /// Print the full parse result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the upload response body for an extracted report
    Summary { file: PathBuf },
    /// Show why each candidate line was accepted or dropped
    Inspect { file: PathBuf },
    /// Run a base64 payload through the upload handler
    Upload {
        /// File holding the base64 (or data URL) payload
        file: PathBuf,
    },
    /// Parse many reports in parallel
    Batch {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load().context("Failed to load settings")?;
    info!(top_n = settings.top_n, "settings loaded");

    let result = match cli.command {
        Commands::Parse { file, json } => {
            let report = parser::parse_report(&read_text(&file)?, settings.top_n);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report, settings.name_width);
            }
            Ok(())
        }
        Commands::Summary { file } => {
            let report = parser::parse_report(&read_text(&file)?, settings.top_n);
            let body = ReportResponse::from_result(&report);
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
        Commands::Inspect { file } => {
            let inspection = parser::inspect(&read_text(&file)?);
            match &inspection.header {
                Some(h) => println!("Header: {}", h),
                None => println!("Header: not found, every line is a candidate"),
            }
            println!("{}", "-".repeat(80));
            for (line, outcome) in &inspection.rows {
                match outcome {
                    Ok(item) => println!("  ok    {}", truncate(item.name(), settings.name_width)),
                    Err(why) => println!("  drop  {} ({})", truncate(line, settings.name_width), why),
                }
            }
            println!(
                "\n{} accepted, {} dropped",
                inspection.accepted(),
                inspection.rejected()
            );
            Ok(())
        }
        Commands::Upload { file } => {
            let payload = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let outcome = response::handle_upload(&payload, &PlainTextExtractor, settings.top_n);
            println!("HTTP {}", outcome.status);
            println!("{}", serde_json::to_string_pretty(&outcome.body)?);
            Ok(())
        }
        Commands::Batch { files } => {
            println!("Parsing {} reports...", files.len());
            let counts = process_files(&files, settings.top_n)?;
            counts.print();
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let text = parser::decode_text(&bytes)
        .with_context(|| format!("{} is not a text file", path.display()))?;
    Ok(text.to_string())
}

fn print_report(report: &TradingParseResult, name_width: usize) {
    if report.is_empty() {
        println!("No trading items found.");
        return;
    }

    println!(
        "{:>3} | {:<w$} | {:>9} | {:>10} | {:>6} | {:>10} | {:>10} | {:>6} | {:>6}",
        "#", "Item", "Avg Cost", "Line Cost", "Qty", "Value", "Profit", "GP%", "Ratio%",
        w = name_width
    );
    println!("{}", "-".repeat(name_width + 90));
    for (i, item) in report.items.iter().enumerate() {
        print_item(i + 1, item, name_width);
    }

    if let Some(best) = &report.highest_profit {
        println!("\nHighest profit: {} ({:.2})", best.name(), best.profit());
    }
    println!("\n--- Most popular ---");
    for (i, item) in report.top_popular.iter().enumerate() {
        println!(
            "  {}. {} ({:.1}%, qty {})",
            i + 1,
            item.name(),
            item.sales_ratio_percent(),
            item.quantity()
        );
    }
    println!("\n{} items", report.items.len());
}

fn print_item(n: usize, item: &TradingItem, name_width: usize) {
    println!(
        "{:>3} | {:<w$} | {:>9.2} | {:>10.2} | {:>6} | {:>10.2} | {:>10.2} | {:>6.1} | {:>6.1}",
        n,
        truncate(item.name(), name_width),
        item.avg_cost(),
        item.line_cost(),
        item.quantity(),
        item.value(),
        item.profit(),
        item.gp_percent(),
        item.sales_ratio_percent(),
        w = name_width
    );
}

struct BatchCounts {
    files: usize,
    items: usize,
    empty: usize,
    failed: usize,
}

impl BatchCounts {
    fn print(&self) {
        println!(
            "Parsed {} files: {} items, {} files without items, {} unreadable.",
            self.files, self.items, self.empty, self.failed,
        );
    }
}

fn process_files(files: &[PathBuf], top_n: usize) -> Result<BatchCounts> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let mut counts = BatchCounts {
        files: files.len(),
        items: 0,
        empty: 0,
        failed: 0,
    };

    for chunk in files.chunks(64) {
        let results: Vec<_> = chunk
            .par_iter()
            .map(|path| read_text(path).map(|text| parser::parse_report(&text, top_n)))
            .collect();

        for (path, result) in chunk.iter().zip(results) {
            match result {
                Ok(report) => {
                    counts.items += report.items.len();
                    if report.is_empty() {
                        counts.empty += 1;
                    }
                    let best = report
                        .highest_profit
                        .as_ref()
                        .map(|i| format!("{} ({:.2})", i.name(), i.profit()))
                        .unwrap_or_else(|| "-".into());
                    pb.println(format!(
                        "{}: {} items, best: {}",
                        path.display(),
                        report.items.len(),
                        best
                    ));
                }
                Err(e) => {
                    counts.failed += 1;
                    pb.println(format!("{}: {:#}", path.display(), e));
                }
            }
        }
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    Ok(counts)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
