use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Configuration of a single conversion run.
///
/// A `ConvertOptions` is built once (by the command line front end or by a caller of the
/// library) and handed to [crate::converter::run] by reference. Nothing else holds
/// run-wide state.
///
/// # Fields
///
/// * `fasta_file`: The input FASTA file.
/// * `txt_file`: The allow-list of transcript IDs, one per line.
/// * `csv_file`: The output CSV file. It is overwritten if it exists.
/// * `debug`: If `true`, failures are reported with their full error chain.
/// * `quiet`: If `true`, the summary lines are not printed on success.
///
/// # Examples
///
/// ```rust
/// use fasta2csv::options::ConvertOptions;
///
/// let opts = ConvertOptions::new("transcripts.fa", "canonical.txt", "out.csv")
///     .with_debug(true);
/// assert!(opts.debug);
/// assert!(!opts.quiet);
/// ```
pub struct ConvertOptions {
    pub fasta_file: PathBuf,
    pub txt_file: PathBuf,
    pub csv_file: PathBuf,
    pub debug: bool,
    pub quiet: bool,
}

impl ConvertOptions {
    /// Creates options for converting `fasta_file` into `csv_file`, keeping the records
    /// listed in `txt_file`. Debug and quiet modes start off.
    pub fn new<F, T, C>(fasta_file: F, txt_file: T, csv_file: C) -> ConvertOptions
    where
        F: Into<PathBuf>,
        T: Into<PathBuf>,
        C: Into<PathBuf>,
    {
        ConvertOptions {
            fasta_file: fasta_file.into(),
            txt_file: txt_file.into(),
            csv_file: csv_file.into(),
            debug: false,
            quiet: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> ConvertOptions {
        self.debug = debug;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> ConvertOptions {
        self.quiet = quiet;
        self
    }

    pub fn fasta_file(&self) -> &Path {
        &self.fasta_file
    }

    pub fn txt_file(&self) -> &Path {
        &self.txt_file
    }

    pub fn csv_file(&self) -> &Path {
        &self.csv_file
    }
}
