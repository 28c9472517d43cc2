use std::path::PathBuf;

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{info, warn};
use motifprofile::{
    commands::{motifprofile_profile, motifprofile_windows, ProcessingMode},
    prelude::*,
    profile::{DEFAULT_FETCH_RETRIES, DEFAULT_INTERVAL_SIZE, DEFAULT_WINDOW_SIZE},
    reporting::Report,
    Position,
};

const INFO: &str = "\
motifprofile: pattern density profiles around genomic coordinates
usage: motifprofile [--help] <subcommand>

Subcommands:

  profile: compute the coverage density of a pattern (e.g. CG) in windows
           around each coordinate.

  windows: list the windows that would be profiled around each coordinate.

";

#[derive(Parser)]
#[clap(name = "motifprofile")]
#[clap(about = INFO)]
struct Cli {
    /// increase logging verbosity (overridden by RUST_LOG)
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Profile {
        /// the reference FASTA file (indexed with a .fai unless --in-memory is set)
        #[arg(long, required = true)]
        fasta: PathBuf,

        /// a TSV genome file (or .fai) of sequence names and their lengths
        /// (the FASTA index is used if not specified)
        #[arg(long)]
        seqlens: Option<PathBuf>,

        /// the pattern to profile, matched literally and case-insensitively
        #[arg(long, required = true)]
        pattern: String,

        /// number of basepairs on either side of each coordinate to profile
        #[arg(long, default_value_t = DEFAULT_INTERVAL_SIZE)]
        interval: Position,

        /// window width in basepairs
        #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE)]
        window: Position,

        /// how many times to retry a failed sequence retrieval before skipping the window
        #[arg(long, default_value_t = DEFAULT_FETCH_RETRIES)]
        retries: usize,

        /// load the whole FASTA into memory, rather than querying the index per window
        #[arg(long)]
        in_memory: bool,

        /// an optional output file (standard output will be used if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// a TSV file of sequence name, 1-based coordinate, and strand (+ or -)
        #[arg(required = true)]
        coordinates: PathBuf,
    },
    Windows {
        /// a TSV genome file (or .fai) of sequence names and their lengths
        #[arg(long, required = true)]
        seqlens: PathBuf,

        /// number of basepairs on either side of each coordinate
        #[arg(long, default_value_t = DEFAULT_INTERVAL_SIZE)]
        interval: Position,

        /// window width in basepairs
        #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE)]
        window: Position,

        /// an optional output file (standard output will be used if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// a TSV file of sequence name, 1-based coordinate, and strand (+ or -)
        #[arg(required = true)]
        coordinates: PathBuf,
    },
}

fn run(cli: Cli) -> Result<Report, MotifProfileError> {
    match cli.command {
        Some(Commands::Profile {
            fasta,
            seqlens,
            pattern,
            interval,
            window,
            retries,
            in_memory,
            output,
            coordinates,
        }) => {
            // validated before anything is read
            let config = ProfileConfig::new(&pattern, interval, window)?.with_fetch_retries(retries);
            let mode = if in_memory {
                ProcessingMode::InMemory
            } else {
                ProcessingMode::Indexed
            };
            motifprofile_profile(
                &coordinates,
                &fasta,
                seqlens.as_ref(),
                &config,
                output.as_ref(),
                mode,
            )
        }
        Some(Commands::Windows {
            seqlens,
            interval,
            window,
            output,
            coordinates,
        }) => {
            let config = WindowConfig::new(interval, window)?;
            motifprofile_windows(&coordinates, &seqlens, &config, output.as_ref())
        }
        None => {
            println!("{}\n", INFO);
            std::process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.debug > 0 { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    match run(cli) {
        Ok(report) => {
            info!("{}", report);
            if !report.is_complete() {
                warn!(
                    "{} records and {} windows were skipped:",
                    report.records_skipped(),
                    report.windows_skipped
                );
                for issue in report.issues() {
                    warn!("  {}", issue);
                }
                if report.omitted_issues() > 0 {
                    warn!("  ... and {} more", report.omitted_issues());
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
