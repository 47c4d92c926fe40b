use crate::error::ConvertError;
use crate::fasta2csv_utils::open_text_file;
use std::collections::hash_set;
use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;
use tracing::{info, warn};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// The set of transcript IDs allowed into the output.
///
/// Membership is exact, case-sensitive string equality. The set is filled once by
/// [AllowList::from_path] or [AllowList::from_reader] and is read-only afterwards.
pub struct AllowList {
    ids: HashSet<String>,
}

impl AllowList {
    /// Reads the allow-list file at `file_path`, one transcript ID per line.
    ///
    /// Leading and trailing whitespace is stripped from every line and duplicates collapse
    /// silently. Lines that are empty after stripping are skipped.
    ///
    /// # Errors
    ///
    /// Returns [ConvertError::Config] if the file cannot be opened or read.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use fasta2csv::AllowList;
    ///
    /// let ids = AllowList::from_path("gencode.v45.canonical_transcripts.txt")?;
    /// println!("{} transcripts allowed", ids.len());
    /// # Ok::<(), fasta2csv::ConvertError>(())
    /// ```
    pub fn from_path<T: AsRef<Path>>(file_path: T) -> Result<AllowList, ConvertError> {
        let path = file_path.as_ref();
        let rdr = open_text_file(path)?;

        let allow_list = AllowList::from_reader(rdr).map_err(|e| match e {
            ConvertError::Io(source) => ConvertError::config(path, source),
            e => e,
        })?;

        info!(
            "Loaded {} transcript IDs from {}",
            allow_list.len(),
            path.display()
        );
        if allow_list.is_empty() {
            warn!(
                "The allow-list {} is empty; no records will be written.",
                path.display()
            );
        }
        Ok(allow_list)
    }

    /// Reads an allow-list from any buffered reader, with the same rules as
    /// [AllowList::from_path].
    pub fn from_reader<R: BufRead>(rdr: R) -> Result<AllowList, ConvertError> {
        let mut ids = HashSet::new();
        for l in rdr.lines() {
            let line = l?;
            let id = line.trim();
            if !id.is_empty() {
                ids.insert(id.to_string());
            }
        }
        Ok(AllowList { ids })
    }

    pub fn contains(&self, transcript_id: &str) -> bool {
        self.ids.contains(transcript_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, String> {
        self.ids.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for AllowList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> AllowList {
        AllowList {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}
