use crate::error::ConvertError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::trace;

/// The first character of every FASTA definition line.
pub const DEFLINE_PREFIX: char = '>';

/// Separates the fields of a definition line, e.g.
/// `>ENST00000417334.1|ENSG00000231141.1|OTTHUMG00000...`.
pub const FIELD_DELIMITER: char = '|';

/// Separates an identifier from its version suffix, e.g. `ENST00000417334.1`.
pub const VERSION_DELIMITER: char = '.';

/// Separates the columns of an output row.
pub const CSV_SEPARATOR: char = ',';

/// Returns the part of `id` before the first [VERSION_DELIMITER].
///
/// An identifier without a version is returned unchanged, and an identifier that
/// starts with the delimiter yields an empty string.
///
/// ```rust
/// use fasta2csv::fasta2csv_utils::strip_version;
/// assert_eq!(strip_version("ENST00000417334.1"), "ENST00000417334");
/// assert_eq!(strip_version("ENSG00000231141"), "ENSG00000231141");
/// ```
pub fn strip_version(id: &str) -> &str {
    id.split(VERSION_DELIMITER).next().unwrap_or(id)
}

/// Removes a single trailing line terminator (`\n` or `\r\n`) from `line`.
/// Any other trailing whitespace is kept.
pub fn trim_line_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Peeks at the start of `reader` and reports whether it begins with the gzip magic bytes
/// `1f 8b`. Nothing is consumed, so the caller can keep reading from the first byte.
///
/// Used by [open_text_file] to turn compressed inputs away before they reach the line
/// parsers. Call it before anything else has read from `reader`.
pub fn is_gzipped<T: BufRead>(reader: &mut T) -> std::io::Result<bool> {
    const GZIP_MAGIC_NUMBER: [u8; 2] = [0x1f, 0x8b];

    let src = reader.fill_buf()?;
    Ok(src.get(..2) == Some(&GZIP_MAGIC_NUMBER))
}

/// Opens the plain-text file at `file_path` for buffered reading.
///
/// Every failure here is a configuration problem: the file is missing, unreadable,
/// or gzip compressed (compressed input is not supported). All of them are reported as
/// [ConvertError::Config] naming the path.
pub fn open_text_file<T: AsRef<Path>>(file_path: T) -> Result<BufReader<File>, ConvertError> {
    let path = file_path.as_ref();
    let file = File::open(path).map_err(|e| ConvertError::config(path, e))?;
    let mut rdr = BufReader::new(file);

    if is_gzipped(&mut rdr).map_err(|e| ConvertError::config(path, e))? {
        return Err(ConvertError::config(
            path,
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "gzip compressed input is not supported; decompress it first",
            ),
        ));
    }
    trace!("opened {} as plain text", path.display());

    Ok(rdr)
}
