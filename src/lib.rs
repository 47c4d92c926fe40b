//! fasta2csv turns a multi-line FASTA file of transcript sequences into a CSV file with one
//! `transcript_id,gene_id,sequence` row per record, keeping only the transcripts named in an
//! allow-list. It was written for GENCODE transcript FASTA files, whose definition lines look
//! like `>ENST00000417334.1|ENSG00000231141.1|...`, and a list of canonical transcript IDs.
//!
//! The work is a single streaming pass: the allow-list is loaded with [AllowList::from_path],
//! then [convert] reads the FASTA file record by record and writes the kept ones.

pub mod converter;
pub mod error;
pub mod fasta2csv_utils;
pub mod options;
pub mod reader;
pub use converter::{convert, convert_with, run, ConvertSummary};
pub use error::ConvertError;
pub use options::ConvertOptions;
pub use reader::{AllowList, FastaRecord};
