//! Parsing iterator for coordinate lists.
//!
//! A coordinate list is a tab-separated file of `seqname`, `coordinate` (1-based) and
//! `strand` (`+` or `-`), one record per line. Any further columns are ignored. Lines
//! starting with `#` are comments.
//!
//! Under the hood, this uses the [`csv`] crate. Each line is yielded as its own
//! [`Result`], so that a caller can skip a malformed line and keep going: malformed
//! lines are reported as [`MotifProfileError::InvalidCoordinateLine`], while I/O failures
//! are reported as other variants and should be treated as fatal.

use csv::{Reader, ReaderBuilder, StringRecord, StringRecordsIntoIter};
use std::io::Read;
use std::path::PathBuf;

use crate::error::MotifProfileError;
use crate::io::file::InputFile;
use crate::profile::{CoordinateRecord, Strand};
use crate::Position;

/// Build a TSV reader which ignores comment lines, works on gzip-compressed
/// files, and allows a ragged number of columns.
pub fn build_tsv_reader(
    filepath: impl Into<PathBuf>,
) -> Result<Reader<Box<dyn Read>>, MotifProfileError> {
    let stream = InputFile::new(filepath).reader()?;
    let stream: Box<dyn Read> = Box::new(stream);

    let reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(stream);
    Ok(reader)
}

/// An iterator over the [`CoordinateRecord`] entries of a coordinate list.
pub struct CoordinateIterator {
    inner: StringRecordsIntoIter<Box<dyn Read>>,
}

impl std::fmt::Debug for CoordinateIterator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoordinateIterator").finish_non_exhaustive()
    }
}

impl CoordinateIterator {
    /// Create a new [`CoordinateIterator`] over a (possibly gzip-compressed) coordinate list.
    pub fn new(filepath: impl Into<PathBuf>) -> Result<Self, MotifProfileError> {
        let reader = build_tsv_reader(filepath)?;
        Ok(Self {
            inner: reader.into_records(),
        })
    }
}

impl Iterator for CoordinateIterator {
    type Item = Result<CoordinateRecord, MotifProfileError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        Some(match result {
            Ok(record) => {
                let line = record.position().map_or(0, |pos| pos.line());
                parse_coordinate_record(&record, line)
            }
            Err(err) if err.is_io_error() => Err(err.into()),
            Err(err) => {
                let line = err.position().map_or(0, |pos| pos.line());
                Err(MotifProfileError::InvalidCoordinateLine(
                    line,
                    err.to_string(),
                ))
            }
        })
    }
}

/// Parse one coordinate list row; `line` is only used in error messages.
pub fn parse_coordinate_record(
    record: &StringRecord,
    line: u64,
) -> Result<CoordinateRecord, MotifProfileError> {
    let invalid = |reason: String| MotifProfileError::InvalidCoordinateLine(line, reason);

    if record.len() < 3 {
        return Err(invalid(format!(
            "expected 3 columns (seqname, coordinate, strand), found {}",
            record.len()
        )));
    }

    let seqname = &record[0];
    if seqname.is_empty() {
        return Err(invalid("empty sequence name".to_string()));
    }

    let coordinate: Position = record[1]
        .trim()
        .parse()
        .map_err(|_| invalid(format!("invalid coordinate '{}'", &record[1])))?;
    if coordinate == 0 {
        return Err(invalid(
            "coordinates are 1-based, so must be at least 1".to_string(),
        ));
    }

    let strand: Strand = record[2]
        .trim()
        .parse()
        .map_err(|err: MotifProfileError| invalid(err.to_string()))?;

    Ok(CoordinateRecord::new(seqname, coordinate, strand))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utilities::temp_file_with;

    #[test]
    fn test_coordinate_iterator() {
        let file = temp_file_with(
            "# a comment\nchr1\t500\t+\nchr2\t1\t-\textra\tcolumns\n",
            ".tsv",
        );
        let records: Vec<_> = CoordinateIterator::new(file.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            records,
            vec![
                CoordinateRecord::new("chr1", 500, Strand::Forward),
                CoordinateRecord::new("chr2", 1, Strand::Reverse),
            ]
        );
    }

    #[test]
    fn test_malformed_lines_are_recoverable() {
        let file = temp_file_with(
            "chr1\t500\t+\nchr1\tabc\t+\nchr1\t0\t-\nchr1\t10\t.\nchr1\t10\nchr2\t20\t-\n",
            ".tsv",
        );
        let results: Vec<_> = CoordinateIterator::new(file.path()).unwrap().collect();
        assert_eq!(results.len(), 6);

        let invalid_lines: Vec<u64> = results
            .iter()
            .filter_map(|r| match r {
                Err(MotifProfileError::InvalidCoordinateLine(line, _)) => Some(*line),
                _ => None,
            })
            .collect();
        assert_eq!(invalid_lines, vec![2, 3, 4, 5]);

        assert_eq!(
            results.last().unwrap().as_ref().unwrap(),
            &CoordinateRecord::new("chr2", 20, Strand::Reverse)
        );
    }

    #[test]
    fn test_parse_coordinate_record() {
        let record = StringRecord::from(vec!["chrX", "12345", "-"]);
        let parsed = parse_coordinate_record(&record, 1).unwrap();
        assert_eq!(parsed.seqname, "chrX");
        assert_eq!(parsed.coordinate, 12345);
        assert_eq!(parsed.strand, Strand::Reverse);

        let negative = StringRecord::from(vec!["chrX", "-5", "+"]);
        assert!(parse_coordinate_record(&negative, 1).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(CoordinateIterator::new("no/such/coordinates.tsv").is_err());
    }
}
