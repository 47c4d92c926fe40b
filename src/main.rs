use anyhow::Context;
use clap::Parser;
use fasta2csv::{AllowList, ConvertError, ConvertOptions, ConvertSummary};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

/// Make a CSV of the allow-listed transcripts in a multi-line FASTA file.
///
/// Typical command line:
///   fasta2csv gencode.v45.lncRNA_transcripts.fa \
///     gencode.v45.long_noncoding_RNAs.canonical_transcripts.txt \
///     gencode_canonical_lncRNA.csv
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// input sequence file (FASTA)
    fasta_file: PathBuf,
    /// input transcript ID list, one ID per line
    txt_file: PathBuf,
    /// output CSV file; overwritten if it exists
    csv_file: PathBuf,
    /// print the full error trace after a failure and log at debug level
    #[arg(long)]
    debug: bool,
    /// do not print the record counts on success
    #[arg(short, long)]
    quiet: bool,
}

impl From<Args> for ConvertOptions {
    fn from(args: Args) -> ConvertOptions {
        ConvertOptions::new(args.fasta_file, args.txt_file, args.csv_file)
            .with_debug(args.debug)
            .with_quiet(args.quiet)
    }
}

// RUST_LOG wins over the level picked from --debug
fn init_logging(debug: bool) {
    let default_level = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn convert(opts: &ConvertOptions) -> anyhow::Result<ConvertSummary> {
    let allow_list = AllowList::from_path(opts.txt_file()).with_context(|| {
        format!(
            "Failed while loading the allow-list {}",
            opts.txt_file().display()
        )
    })?;

    fasta2csv::convert(opts.fasta_file(), &allow_list, opts.csv_file()).with_context(|| {
        format!(
            "Failed while converting FASTA {} into {}",
            opts.fasta_file().display(),
            opts.csv_file().display()
        )
    })
}

fn main() -> ExitCode {
    let opts = ConvertOptions::from(Args::parse());
    init_logging(opts.debug);

    match convert(&opts) {
        Ok(summary) => {
            if !opts.quiet {
                println!("{}", summary);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            let cause = e.downcast_ref::<ConvertError>();
            if opts.debug {
                eprintln!("{:?}", e);
            } else {
                let category = cause.map_or("unexpected error", ConvertError::category);
                eprintln!("There was an error ({}).", category);
                eprintln!("Run with --debug for the full error trace.");
            }
            let code = cause.map_or(1, ConvertError::exit_code);
            ExitCode::from(code as u8)
        }
    }
}
