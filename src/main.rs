use clap::Parser;
use log::{info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::io;
use std::path::PathBuf;

use studytree::content::{load_subjects, source_for};
use studytree::core::Record;
use studytree::core::config::{self, ResolvedConfig};
use studytree::core::hierarchy::subject_tree;
use studytree::tui;

#[derive(Parser)]
#[command(name = "studytree", about = "Browse study notes from a spreadsheet workbook")]
struct Args {
    /// Workbook path or http(s) URL
    workbook: Option<String>,

    /// Config file (defaults to ~/.studytree/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the subject hierarchy as JSON instead of starting the TUI
    #[arg(long)]
    dump: bool,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let study_config = config::load_config(args.config.as_deref()).map_err(io::Error::other)?;
    let mut resolved = config::resolve(&study_config, args.workbook.as_deref());
    if let Some(log_file) = args.log_file {
        resolved.log_file = log_file;
    }

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    info!(
        "studytree starting up: workbook={}, {} subject(s)",
        resolved.workbook,
        resolved.subjects.len()
    );

    if args.dump {
        return dump(&resolved).await;
    }
    tui::run(resolved)
}

/// Loads every subject and prints its hierarchy as JSON.
async fn dump(config: &ResolvedConfig) -> io::Result<()> {
    let source = source_for(&config.workbook);
    let sheets: Vec<String> = config.subjects.iter().map(|s| s.sheet.clone()).collect();
    let results = load_subjects(source.as_ref(), &sheets)
        .await
        .map_err(io::Error::other)?;

    let loaded: Vec<(&str, Vec<Record>)> = config
        .subjects
        .iter()
        .zip(results)
        .map(|(subject, result)| {
            let records = result.unwrap_or_else(|e| {
                warn!("Skipping {}: {}", subject.sheet, e);
                eprintln!("{}: {}", subject.sheet, e);
                Vec::new()
            });
            (subject.label.as_str(), records)
        })
        .collect();

    let trees: Vec<_> = loaded
        .iter()
        .map(|(label, records)| subject_tree(label, records))
        .collect();
    let json = serde_json::to_string_pretty(&trees).map_err(io::Error::other)?;
    println!("{json}");
    Ok(())
}
