pub mod allow_list;
pub mod fasta;
pub use allow_list::AllowList;
pub use fasta::{parse_header, FastaRecord, FastaRecords};
