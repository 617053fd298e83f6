// fakeseries CLI - Synthetic time series on the command line
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # fakeseries
//!
//! Generates rows from a JSON series description and writes them as CSV or
//! JSON lines.
//!
//! ## Usage
//!
//! ```bash
//! # A day of hourly rows as CSV on stdout
//! fakeseries --config series.json --rows 24
//!
//! # JSON lines to a file, statistics on stderr
//! fakeseries --config series.json --rows 1000 --format json --output rows.jsonl --stats
//! ```

mod output;

use clap::Parser;
use fakeseries::{Series, SeriesConfig};
use output::{write_rows, Format, OutputError};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

/// Synthetic time-series generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON series description
    #[arg(short, long)]
    config: PathBuf,

    /// Number of rows to generate
    #[arg(short, long, default_value = "100")]
    rows: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: Format,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print statistics snapshots to stderr after generation
    #[arg(long)]
    stats: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), OutputError> {
    info!("fakeseries v{}", fakeseries::VERSION);

    let config = SeriesConfig::from_file(&args.config)?;
    let mut series = Series::new(config)?;
    info!(
        "Loaded {}: columns {:?}",
        args.config.display(),
        series.header()
    );

    let written = match &args.output {
        Some(path) => {
            let file = BufWriter::new(File::create(path)?);
            write_rows(&mut series, args.rows, args.format, file)?
        }
        None => write_rows(&mut series, args.rows, args.format, io::stdout().lock())?,
    };
    info!("Generated {} rows", written);

    if args.stats {
        for snapshot in series.stats() {
            eprintln!("{}", snapshot.to_json()?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "columns": [
                    {{"kind": "pattern", "id": "ok", "good": 3, "bad": 1}},
                    {{"kind": "data", "id": "load", "samples": 20, "from": 0, "to": 10,
                      "use_random": true, "seed": 12, "limit_lower": true, "limit_upper": true}}
                ],
                "gates": ["ok"]
            }}"#
        )
        .unwrap();
        file.flush().unwrap();
        file
    }

    fn args(config: PathBuf, output: Option<PathBuf>, format: Format) -> Args {
        Args {
            config,
            rows: 8,
            format,
            output,
            stats: true,
            log_level: "warn".to_string(),
        }
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from([
            "fakeseries",
            "--config",
            "series.json",
            "--rows",
            "5",
            "--format",
            "json",
        ]);
        assert_eq!(args.rows, 5);
        assert_eq!(args.format, Format::Json);
        assert!(args.output.is_none());
        assert!(!args.stats);
    }

    #[test]
    fn test_run_writes_csv_file() {
        let config = config_file();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("rows.csv");

        run(&args(config.path().to_path_buf(), Some(out.clone()), Format::Csv)).unwrap();

        let text = std::fs::read_to_string(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "ok,load");
        assert_eq!(lines[4], "false,");
    }

    #[test]
    fn test_run_is_reproducible() {
        let config = config_file();
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.jsonl");
        let b = dir.path().join("b.jsonl");

        run(&args(config.path().to_path_buf(), Some(a.clone()), Format::Json)).unwrap();
        run(&args(config.path().to_path_buf(), Some(b.clone()), Format::Json)).unwrap();

        assert_eq!(
            std::fs::read_to_string(a).unwrap(),
            std::fs::read_to_string(b).unwrap()
        );
    }

    #[test]
    fn test_run_missing_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(&args(dir.path().join("nope.json"), None, Format::Csv));
        assert!(matches!(
            result,
            Err(OutputError::Generator(fakeseries::Error::Io(_)))
        ));
    }
}
