/*
 * main.rs
 * Copyright (c) 2025 Posit, PBC
 */

mod diagnostics;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yaml_path::{ParseCache, RegionSpan, Settings};

/// Show where the cursor is in a YAML or JSON document
#[derive(Parser, Debug)]
#[command(name = "yaml-path")]
#[command(version)]
#[command(about = "Resolve cursor positions in YAML/JSON to paths, convert JSON to YAML", long_about = None)]
struct Cli {
    /// Settings file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the path of the node at a position
    Path {
        /// YAML or JSON document
        file: PathBuf,

        /// Line number (1-based)
        #[arg(long, value_parser = parse_one_based)]
        line: usize,

        /// Column number (1-based)
        #[arg(long, value_parser = parse_one_based, default_value = "1")]
        col: usize,
    },

    /// Print a status line for one or more cursors
    Status {
        /// YAML or JSON document
        file: PathBuf,

        /// Cursor positions as LINE:COL (1-based)
        #[arg(required = true, value_parser = parse_cursor)]
        cursors: Vec<(usize, usize)>,
    },

    /// Convert JSON documents to readable YAML (reads stdin without files)
    Convert {
        /// JSON files, written as one YAML stream
        files: Vec<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yaml_path=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Returns `false` when the input was rejected and a report was printed.
fn run(cli: Cli) -> Result<bool> {
    let settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings: {}", path.display()))?,
        None => Settings::default(),
    };
    tracing::debug!(?settings, "settings loaded");

    match cli.command {
        Commands::Path { file, line, col } => path_command(&file, line, col),
        Commands::Status { file, cursors } => status_command(&file, &cursors, &settings),
        Commands::Convert { files } => convert_command(&files),
    }
}

fn path_command(file: &Path, line: usize, col: usize) -> Result<bool> {
    let content = read_file(file)?;
    let name = display_name(file);

    match yaml_path::parse_file(&content, &name) {
        Ok(documents) => {
            println!("{}", yaml_path::resolve_path(&documents, line, col));
            Ok(true)
        }
        Err(err) => {
            eprint!(
                "{}",
                diagnostics::render_parse_error(&err, &name, &content, use_color())
            );
            Ok(false)
        }
    }
}

fn status_command(file: &Path, cursors: &[(usize, usize)], settings: &Settings) -> Result<bool> {
    let content = read_file(file)?;

    let mut cache = ParseCache::new();
    let parsed = cache.get_or_parse(0, RegionSpan::Whole, &content, 0);
    let reports = yaml_path::reports_for_cursors(parsed, cursors);

    if let Some(text) = yaml_path::status_text(&reports, settings) {
        println!("{}", text);
    }
    Ok(cache.first_error(0).is_none())
}

fn convert_command(files: &[PathBuf]) -> Result<bool> {
    let inputs = if files.is_empty() {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read standard input")?;
        vec![("<stdin>".to_string(), content)]
    } else {
        files
            .iter()
            .map(|file| Ok((display_name(file), read_file(file)?)))
            .collect::<Result<Vec<_>>>()?
    };

    let documents: Vec<&str> = inputs.iter().map(|(_, content)| content.as_str()).collect();
    match yaml_readable::convert_json_documents_to_yaml(&documents) {
        Ok(yaml) => {
            print!("{}", yaml);
            Ok(true)
        }
        Err(err) => {
            let (name, content) = &inputs[err.document().unwrap_or(0)];
            eprint!(
                "{}",
                diagnostics::render_conversion_error(&err, name, content, use_color())
            );
            Ok(false)
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map_or_else(|| path.display().to_string(), str::to_string)
}

fn use_color() -> bool {
    std::io::stderr().is_terminal()
}

/// Parse a 1-based number into a 0-based one.
fn parse_one_based(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|_| format!("not a number: {:?}", s))?;
    n.checked_sub(1)
        .ok_or_else(|| "positions start at 1".to_string())
}

/// Parse `LINE:COL` (1-based) into a 0-based pair. `LINE` alone means column 1.
fn parse_cursor(s: &str) -> Result<(usize, usize), String> {
    match s.split_once(':') {
        Some((line, col)) => Ok((parse_one_based(line)?, parse_one_based(col)?)),
        None => Ok((parse_one_based(s)?, 0)),
    }
}
