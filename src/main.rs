//! TRF Bridge CLI
//!
//! Entry point for the `trf-bridge` command-line tool.

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use trf_bridge::submit::{self, JsonWriter, ReportSink};
use trf_bridge::{Converter, ConverterDefaults};

#[derive(Parser)]
#[command(name = "trf-bridge")]
#[command(about = "Convert sequencer and ATML test reports to repository JSON", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a report document and emit the submission payload
    Convert {
        /// Path to the source XML document
        file: PathBuf,

        /// Write the payload to this file instead of stdout
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,

        /// Path to a TOML file with converter defaults
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Pretty-print the JSON payload
        #[arg(long)]
        pretty: bool,
    },

    /// Print the effective converter defaults
    Defaults {
        /// Path to a TOML file with converter defaults
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Convert {
            file,
            out,
            config,
            pretty,
        } => run_convert(file, out, config, pretty),
        Commands::Defaults { config } => run_defaults(config),
    }
}

fn load_defaults(config: Option<PathBuf>) -> ConverterDefaults {
    match config {
        Some(path) => match ConverterDefaults::from_file(&path) {
            Ok(defaults) => defaults,
            Err(e) => {
                eprintln!("Error loading config {}: {}", path.display(), e);
                process::exit(1);
            }
        },
        None => ConverterDefaults::default(),
    }
}

fn run_convert(file: PathBuf, out: Option<PathBuf>, config: Option<PathBuf>, pretty: bool) {
    let converter = Converter::new(load_defaults(config));

    let bytes = match std::fs::read(&file) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error reading {}: {}", file.display(), e);
            process::exit(1);
        }
    };

    let report = match converter.convert(&bytes) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Conversion failed: {}", e);
            process::exit(1);
        }
    };

    let result = match out {
        Some(path) => File::create(&path)
            .map_err(submit::SubmitError::from)
            .and_then(|f| sink(f, pretty).submit(&report)),
        None => sink(io::stdout().lock(), pretty).submit(&report),
    };

    if let Err(e) = result {
        eprintln!("Error writing payload: {}", e);
        process::exit(1);
    }
}

fn sink<W: Write>(writer: W, pretty: bool) -> JsonWriter<W> {
    let sink = JsonWriter::new(writer);
    if pretty {
        sink.pretty()
    } else {
        sink
    }
}

fn run_defaults(config: Option<PathBuf>) {
    let defaults = load_defaults(config);
    match toml::to_string_pretty(&defaults) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error rendering defaults: {}", e);
            process::exit(1);
        }
    }
}
