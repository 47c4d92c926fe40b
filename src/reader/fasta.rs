use crate::error::ConvertError;
use crate::fasta2csv_utils::{
    strip_version, trim_line_terminator, CSV_SEPARATOR, DEFLINE_PREFIX, FIELD_DELIMITER,
};
use std::io::{BufRead, ErrorKind, Write};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// One FASTA record with its version-stripped identifiers and its full sequence.
///
/// # Fields
///
/// * `transcript_id`: The first `|` field of the definition line, without its version suffix.
/// * `gene_id`: The second `|` field of the definition line, without its version suffix.
/// * `sequence`: All sequence lines of the record, concatenated without separators.
pub struct FastaRecord {
    pub transcript_id: String,
    pub gene_id: String,
    pub sequence: String,
}

impl FastaRecord {
    pub fn new<T: Into<String>, G: Into<String>>(transcript_id: T, gene_id: G) -> FastaRecord {
        FastaRecord {
            transcript_id: transcript_id.into(),
            gene_id: gene_id.into(),
            sequence: String::new(),
        }
    }

    /// Writes the record as one CSV row, `transcript_id,gene_id,sequence`, terminated by `\n`.
    /// No quoting is applied.
    pub fn write_csv<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        writeln!(
            w,
            "{}{sep}{}{sep}{}",
            self.transcript_id,
            self.gene_id,
            self.sequence,
            sep = CSV_SEPARATOR
        )
    }
}

/// Parses a definition line into an empty [FastaRecord].
///
/// The line must start with `>` and carry at least two `|`-separated fields; fields after
/// the second are ignored. Each of the first two fields loses everything from its first `.`
/// on, so `>ENST00000417334.1|ENSG00000231141.1|OTTHUMG...` gives transcript
/// `ENST00000417334` and gene `ENSG00000231141`. Trailing whitespace on the line is ignored.
///
/// `line_number` is only used to locate the problem in the returned error.
///
/// # Errors
///
/// Returns [ConvertError::MalformedRecord] if the line is not a definition line, has nothing
/// after the `>`, has fewer than two fields, or has an empty transcript ID.
pub fn parse_header(line: &str, line_number: usize) -> Result<FastaRecord, ConvertError> {
    let content = match line.strip_prefix(DEFLINE_PREFIX) {
        Some(c) => c.trim_end(),
        None => {
            return Err(ConvertError::malformed(
                line_number,
                format!("definition line does not start with '{}'", DEFLINE_PREFIX),
            ))
        }
    };
    if content.is_empty() {
        return Err(ConvertError::malformed(
            line_number,
            format!("definition line has no content after '{}'", DEFLINE_PREFIX),
        ));
    }

    let mut fields = content.split(FIELD_DELIMITER);
    let (transcript_field, gene_field) = match (fields.next(), fields.next()) {
        (Some(t), Some(g)) => (t, g),
        _ => {
            return Err(ConvertError::malformed(
                line_number,
                format!(
                    "expected at least two '{}'-separated fields in definition line {:?}",
                    FIELD_DELIMITER, line
                ),
            ))
        }
    };

    let transcript_id = strip_version(transcript_field);
    if transcript_id.is_empty() {
        return Err(ConvertError::malformed(
            line_number,
            format!("empty transcript ID in definition line {:?}", line),
        ));
    }

    Ok(FastaRecord::new(transcript_id, strip_version(gene_field)))
}

/// Where the record reader is between two lines.
enum ParserState {
    /// No definition line seen yet.
    AwaitingHeader,
    /// A record is open; sequence lines are appended to it until the next header or EOF.
    AccumulatingSequence(FastaRecord),
}

/// Streams [FastaRecord]s out of a multi-line FASTA input.
///
/// A record is only known to be complete once the next definition line arrives, so each
/// header hands back the record it closes. The last record has no such header and is
/// flushed when the input ends. Reading stops at the first error.
///
/// # Examples
///
/// ```rust
/// use fasta2csv::reader::fasta::FastaRecords;
///
/// let data = b">ENST01.1|ENSG01.1\nAAAA\nCCCC\n>ENST02.2|ENSG02.1|x\nGGGG\n";
/// let recs = FastaRecords::new(&data[..])
///     .collect::<Result<Vec<_>, _>>()?;
/// assert_eq!(recs.len(), 2);
/// assert_eq!(recs[0].sequence, "AAAACCCC");
/// assert_eq!(recs[1].transcript_id, "ENST02");
/// # Ok::<(), fasta2csv::ConvertError>(())
/// ```
pub struct FastaRecords<R: BufRead> {
    rdr: R,
    buf: String,
    line_number: usize,
    records_seen: usize,
    state: ParserState,
    done: bool,
}

impl<R: BufRead> FastaRecords<R> {
    pub fn new(rdr: R) -> FastaRecords<R> {
        FastaRecords {
            rdr,
            buf: String::new(),
            line_number: 0,
            records_seen: 0,
            state: ParserState::AwaitingHeader,
            done: false,
        }
    }

    /// The number of lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// The number of definition lines parsed so far, including a record that is still open.
    pub fn records_seen(&self) -> usize {
        self.records_seen
    }

    fn fail(&mut self, e: ConvertError) -> Option<Result<FastaRecord, ConvertError>> {
        self.done = true;
        Some(Err(e))
    }
}

impl<R: BufRead> Iterator for FastaRecords<R> {
    type Item = Result<FastaRecord, ConvertError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            self.buf.clear();
            let nread = match self.rdr.read_line(&mut self.buf) {
                Ok(n) => n,
                // not UTF-8 text
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    let e = ConvertError::malformed(
                        self.line_number + 1,
                        format!("line is not valid UTF-8 text ({})", e),
                    );
                    return self.fail(e);
                }
                Err(e) => return self.fail(e.into()),
            };

            // end of stream: flush the open record, if any
            if nread == 0 {
                self.done = true;
                return match std::mem::replace(&mut self.state, ParserState::AwaitingHeader) {
                    ParserState::AccumulatingSequence(rec) => Some(Ok(rec)),
                    ParserState::AwaitingHeader => None,
                };
            }

            self.line_number += 1;
            let line = trim_line_terminator(&self.buf);

            if line.starts_with(DEFLINE_PREFIX) {
                let opened = match parse_header(line, self.line_number) {
                    Ok(rec) => rec,
                    Err(e) => return self.fail(e),
                };
                self.records_seen += 1;

                match std::mem::replace(
                    &mut self.state,
                    ParserState::AccumulatingSequence(opened),
                ) {
                    ParserState::AccumulatingSequence(closed) => return Some(Ok(closed)),
                    ParserState::AwaitingHeader => continue,
                }
            }

            match &mut self.state {
                ParserState::AccumulatingSequence(rec) => rec.sequence.push_str(line),
                ParserState::AwaitingHeader => {
                    self.done = true;
                    return Some(Err(ConvertError::malformed(
                        self.line_number,
                        "sequence line before the first definition line",
                    )));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(data: &[u8]) -> Result<Vec<FastaRecord>, ConvertError> {
        FastaRecords::new(data).collect()
    }

    #[test]
    fn test_parse_header_strips_versions() {
        let rec = parse_header(
            ">ENST00000417334.1|ENSG00000231141.1|OTTHUMG00000002868.1|OTTHUMT00000007973.1|",
            1,
        )
        .unwrap();
        assert_eq!(rec.transcript_id, "ENST00000417334");
        assert_eq!(rec.gene_id, "ENSG00000231141");
        assert!(rec.sequence.is_empty());
    }

    #[test]
    fn test_parse_header_without_versions() {
        let rec = parse_header(">t1|g1", 1).unwrap();
        assert_eq!(rec.transcript_id, "t1");
        assert_eq!(rec.gene_id, "g1");
    }

    #[test]
    fn test_parse_header_errors() {
        for (line, n) in [(">", 3), (">   ", 4), (">ENST01.1", 5), (">.1|ENSG01.1", 6)] {
            match parse_header(line, n) {
                Err(ConvertError::MalformedRecord { line, .. }) => assert_eq!(line, n),
                other => panic!("expected a malformed record error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_multiline_sequence_is_concatenated() {
        let recs = read_all(b">t1.1|g1.1\nAAAA\nCCCC\nGGGG\n").unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].sequence, "AAAACCCCGGGG");
    }

    #[test]
    fn test_last_record_is_flushed_without_trailing_newline() {
        let recs = read_all(b">t1|g1\nAC\n>t2|g2\nGT").unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[1].transcript_id, "t2");
        assert_eq!(recs[1].sequence, "GT");
    }

    #[test]
    fn test_header_without_sequence() {
        let recs = read_all(b">t1|g1\n>t2|g2\nACGT\n>t3|g3\n").unwrap();
        let seqs: Vec<&str> = recs.iter().map(|r| r.sequence.as_str()).collect();
        assert_eq!(seqs, vec!["", "ACGT", ""]);
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let recs = read_all(b">t1.1|g1.1\r\nAC\r\n\r\nGT\r\n\n").unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].sequence, "ACGT");
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(read_all(b"").unwrap().is_empty());
    }

    #[test]
    fn test_blank_line_before_header_is_malformed() {
        for data in [&b"\n>t1|g1\nAC\n"[..], &b"\r\n>t1|g1\nAC\n"[..], &b"  \n>t1|g1\n"[..]] {
            match read_all(data) {
                Err(ConvertError::MalformedRecord { line, .. }) => assert_eq!(line, 1),
                other => panic!("expected a malformed record error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let mut rdr = FastaRecords::new(&b">t1|g1\nAC\n\xff\xfeGT\n"[..]);
        match rdr.next() {
            Some(Err(ConvertError::MalformedRecord { line, .. })) => assert_eq!(line, 3),
            other => panic!("expected a malformed record error, got {:?}", other),
        }
        assert!(rdr.next().is_none());
    }

    #[test]
    fn test_sequence_before_header_is_malformed() {
        let mut rdr = FastaRecords::new(&b"ACGT\n>t1|g1\nAC\n"[..]);
        match rdr.next() {
            Some(Err(ConvertError::MalformedRecord { line, .. })) => assert_eq!(line, 1),
            other => panic!("expected a malformed record error, got {:?}", other),
        }
        assert!(rdr.next().is_none());
    }

    #[test]
    fn test_bad_header_stops_reading() {
        let mut rdr = FastaRecords::new(&b">t1|g1\nAC\n>t2\nGT\n"[..]);
        match rdr.next() {
            Some(Err(ConvertError::MalformedRecord { line, .. })) => assert_eq!(line, 3),
            other => panic!("expected a malformed record error, got {:?}", other),
        }
        assert!(rdr.next().is_none());
        assert_eq!(rdr.records_seen(), 1);
    }

    #[test]
    fn test_counters() {
        let mut rdr = FastaRecords::new(&b">t1|g1\nAC\nGT\n>t2|g2\nAA\n"[..]);
        let first = rdr.next().unwrap().unwrap();
        assert_eq!(first.transcript_id, "t1");
        // the second header closed the first record
        assert_eq!(rdr.line_number(), 4);
        assert_eq!(rdr.records_seen(), 2);
        let second = rdr.next().unwrap().unwrap();
        assert_eq!(second.transcript_id, "t2");
        assert!(rdr.next().is_none());
        assert_eq!(rdr.line_number(), 5);
    }

    #[test]
    fn test_write_csv() {
        let mut rec = FastaRecord::new("ENST00000417334", "ENSG00000231141");
        rec.sequence.push_str("GGTTGCCAC");
        let mut out = Vec::new();
        rec.write_csv(&mut out).unwrap();
        assert_eq!(out, b"ENST00000417334,ENSG00000231141,GGTTGCCAC\n");
    }
}
