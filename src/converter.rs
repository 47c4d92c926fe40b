use crate::error::ConvertError;
use crate::fasta2csv_utils::open_text_file;
use crate::options::ConvertOptions;
use crate::reader::{AllowList, FastaRecords};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, trace, warn};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
/// Record counts of a finished conversion.
///
/// * `records_in`: The number of FASTA records read.
/// * `records_out`: The number of CSV rows written.
pub struct ConvertSummary {
    pub records_in: usize,
    pub records_out: usize,
}

impl std::fmt::Display for ConvertSummary {
    /// The two-line terminal summary.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Sequences_input: {}", self.records_in)?;
        write!(f, "Sequences_output: {}", self.records_out)
    }
}

/// Converts the FASTA file at `fasta_path` into the CSV file at `output_path`, keeping only
/// the records whose transcript ID is in `allow_list`.
///
/// Every kept record becomes one row `transcript_id,gene_id,sequence` with both IDs
/// version-stripped. Rows appear in input order; there is no header row. The output file is
/// created (or truncated) only after the FASTA file has been opened, so a missing input does
/// not clobber an existing output.
///
/// # Errors
///
/// * [ConvertError::Config] if the FASTA file cannot be opened or the output cannot be created.
/// * [ConvertError::MalformedRecord] on the first malformed line of the FASTA file.
/// * [ConvertError::Io] if reading or writing fails part way. The output file is then
///   incomplete and should be discarded.
///
/// # Examples
///
/// ```rust,no_run
/// use fasta2csv::{convert, AllowList};
///
/// let allow_list = AllowList::from_path("canonical_transcripts.txt")?;
/// let summary = convert("lncRNA_transcripts.fa", &allow_list, "canonical_lncRNA.csv")?;
/// println!("{}", summary);
/// # Ok::<(), fasta2csv::ConvertError>(())
/// ```
pub fn convert<F: AsRef<Path>, O: AsRef<Path>>(
    fasta_path: F,
    allow_list: &AllowList,
    output_path: O,
) -> Result<ConvertSummary, ConvertError> {
    let fasta_path = fasta_path.as_ref();
    let output_path = output_path.as_ref();

    let rdr = open_text_file(fasta_path)?;
    let out = File::create(output_path).map_err(|e| ConvertError::config(output_path, e))?;
    let mut wtr = BufWriter::new(out);

    info!(
        "Converting {} into {}",
        fasta_path.display(),
        output_path.display()
    );
    convert_with(rdr, allow_list, &mut wtr)
}

/// Runs the filter-and-convert pass over any buffered reader and writer.
///
/// This is the engine behind [convert]; see there for the output format. The writer is
/// flushed before the summary is returned.
pub fn convert_with<R: BufRead, W: Write>(
    rdr: R,
    allow_list: &AllowList,
    wtr: &mut W,
) -> Result<ConvertSummary, ConvertError> {
    let mut summary = ConvertSummary::default();
    let mut emitted: HashSet<String> = HashSet::with_capacity(allow_list.len());

    let mut records = FastaRecords::new(rdr);
    for result in records.by_ref() {
        let record = result?;

        if !allow_list.contains(&record.transcript_id) {
            continue;
        }

        trace!("writing record {}", record.transcript_id);
        record.write_csv(wtr)?;
        summary.records_out += 1;

        if emitted.contains(&record.transcript_id) {
            debug!(
                "Transcript {} appears more than once in the input; writing every copy.",
                record.transcript_id
            );
        } else {
            emitted.insert(record.transcript_id);
        }
    }
    wtr.flush()?;
    summary.records_in = records.records_seen();

    let not_found = allow_list.len() - emitted.len();
    if not_found > 0 {
        warn!(
            "{} of the {} allow-listed transcript IDs were not found in the input.",
            not_found,
            allow_list.len()
        );
    }
    info!(
        "Finished converting. Read {} records and wrote {} records.",
        summary.records_in, summary.records_out
    );

    Ok(summary)
}

/// Loads the allow-list named in `opts` and then converts its FASTA file.
///
/// The allow-list is read completely before the FASTA pass begins.
pub fn run(opts: &ConvertOptions) -> Result<ConvertSummary, ConvertError> {
    let allow_list = AllowList::from_path(opts.txt_file())?;
    convert(opts.fasta_file(), &allow_list, opts.csv_file())
}
