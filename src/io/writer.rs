//! TSV report output.

use csv::{Writer, WriterBuilder};
use serde::Serialize;
use std::io::Write;

use crate::error::MotifProfileError;
use crate::io::file::OutputFile;

/// Column header of the density profile report.
pub const PROFILE_HEADER: [&str; 4] = ["Chromosome_Coordinate", "Distance", "Ratio", "Strand"];

/// Column header of the window listing.
pub const WINDOWS_HEADER: [&str; 5] = ["Chromosome", "Start", "End", "Distance", "Strand"];

/// Writes rows of a tab-separated report, after a single header line.
///
/// Rows are serialized with [`serde`] in field order, so any `Serialize` struct whose
/// fields line up with the header can be written.
pub struct ReportWriter {
    writer: Writer<Box<dyn Write>>,
    rows: usize,
}

impl ReportWriter {
    /// Create a [`ReportWriter`] over an arbitrary writer, writing `header` immediately.
    pub fn new(writer: Box<dyn Write>, header: &[&str]) -> Result<Self, MotifProfileError> {
        let mut writer = WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(writer);
        writer.write_record(header)?;
        Ok(Self { writer, rows: 0 })
    }

    /// Open `output` and create a [`ReportWriter`] with the density profile header.
    pub fn profile(output: &OutputFile) -> Result<Self, MotifProfileError> {
        Self::new(output.writer()?, &PROFILE_HEADER)
    }

    /// Open `output` and create a [`ReportWriter`] with the window listing header.
    pub fn windows(output: &OutputFile) -> Result<Self, MotifProfileError> {
        Self::new(output.writer()?, &WINDOWS_HEADER)
    }

    pub fn write<T: Serialize>(&mut self, row: &T) -> Result<(), MotifProfileError> {
        self.writer.serialize(row)?;
        self.rows += 1;
        Ok(())
    }

    /// Number of rows written, not counting the header.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn flush(&mut self) -> Result<(), MotifProfileError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::density::Density;
    use crate::profile::{DensityResult, Strand};

    #[test]
    fn test_profile_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.tsv");
        let output = OutputFile::new(&path);

        let mut writer = ReportWriter::profile(&output).unwrap();
        writer
            .write(&DensityResult::new(
                "chr1_500",
                -100,
                Density::from_counts(1, 5),
                Strand::Forward,
            ))
            .unwrap();
        writer
            .write(&DensityResult::new("chr1_500", 0, Density::ONE, Strand::Reverse))
            .unwrap();
        assert_eq!(writer.rows(), 2);
        writer.flush().unwrap();
        drop(writer);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "Chromosome_Coordinate\tDistance\tRatio\tStrand\n\
             chr1_500\t-100\t0.20\t+\n\
             chr1_500\t0\t1.00\t-\n"
        );
    }

    #[test]
    fn test_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.tsv");
        let mut writer = ReportWriter::profile(&OutputFile::new(&path)).unwrap();
        writer.flush().unwrap();
        drop(writer);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Chromosome_Coordinate\tDistance\tRatio\tStrand\n"
        );
    }
}
