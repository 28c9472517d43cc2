//! Input/Output file handling with [`InputFile`] and [`OutputFile`].
//!
//! These types abstract over reading/writing both plaintext and gzip-compressed
//! input/output.

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use indexmap::IndexMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use crate::error::MotifProfileError;
use crate::Position;

/// Read a tab-delimited *genome file* of sequence (i.e. chromosome) names and their lengths.
///
/// Only the first two columns are used, so a FASTA index (`.fai`) works too. Blank lines
/// and lines starting with `#` are skipped.
pub fn read_seqlens(
    filepath: impl Into<PathBuf>,
) -> Result<IndexMap<String, Position>, MotifProfileError> {
    let input_file = InputFile::new(filepath);
    let reader = input_file.reader()?;

    let mut seqlens = IndexMap::new();
    for (i, result) in reader.lines().enumerate() {
        let line = result?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let mut columns = line.split('\t');
        let seqname = columns.next().unwrap_or_default();
        let length = columns.next().ok_or_else(|| {
            MotifProfileError::InvalidGenomeFile(format!(
                "line {} has no length column: '{}'",
                i + 1,
                line
            ))
        })?;
        let length: Position = length.trim().parse()?;
        if length == 0 {
            return Err(MotifProfileError::InvalidGenomeFile(format!(
                "sequence '{}' has zero length",
                seqname
            )));
        }
        if seqlens.contains_key(seqname) {
            return Err(MotifProfileError::InvalidGenomeFile(format!(
                "sequence '{}' is duplicated",
                seqname
            )));
        }
        seqlens.insert(seqname.to_string(), length);
    }
    Ok(seqlens)
}

/// Check if a file is a gzipped by looking for the magic numbers
fn is_gzipped_file(file_path: impl Into<PathBuf>) -> io::Result<bool> {
    let file = File::open(file_path.into())?;
    let mut buffer = Vec::with_capacity(2);
    file.take(2).read_to_end(&mut buffer)?;

    Ok(buffer == [0x1f, 0x8b])
}

/// Represents an input file.
///
/// This abstracts how data is read in, allowing for both plaintext and gzip-compressed input
/// to be read through a common interface.
#[derive(Clone, Debug)]
pub struct InputFile {
    pub filepath: PathBuf,
}

impl InputFile {
    /// Constructs a new `InputFile`.
    ///
    /// # Arguments
    ///
    /// * `filepath` - the path to the file. Gzip-compressed input is detected by
    ///   its magic number and decompressed automatically.
    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            filepath: filepath.into(),
        }
    }

    /// Opens the file and returns a buffered reader.
    pub fn reader(&self) -> io::Result<BufReader<Box<dyn Read>>> {
        let file = File::open(&self.filepath)?;
        let is_gzipped = is_gzipped_file(&self.filepath)?;
        let reader: Box<dyn Read> = if is_gzipped {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };
        Ok(BufReader::new(reader))
    }
}

enum OutputDestination {
    File(PathBuf),
    Stdout,
}

/// Represents an output file.
///
/// This abstracts writing both plaintext and gzip-compressed files, or standard output.
pub struct OutputFile {
    destination: OutputDestination,
}

impl OutputFile {
    /// Constructs a new `OutputFile`.
    ///
    /// # Arguments
    ///
    /// * `filepath` - the path to the file. If the file extension is
    ///   `.gz`, `OutputFile` will automatically write gzip-compressed output.
    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            destination: OutputDestination::File(filepath.into()),
        }
    }

    /// Constructs a new [`OutputFile`] for standard output.
    pub fn new_stdout() -> Self {
        Self {
            destination: OutputDestination::Stdout,
        }
    }

    /// Opens the file and returns a writer.
    pub fn writer(&self) -> io::Result<Box<dyn Write>> {
        let writer: Box<dyn Write> = match &self.destination {
            OutputDestination::File(path) => {
                let is_gzip = path.extension().map_or(false, |ext| ext == "gz");
                if is_gzip {
                    Box::new(BufWriter::new(GzEncoder::new(
                        File::create(path)?,
                        Compression::default(),
                    )))
                } else {
                    Box::new(BufWriter::new(File::create(path)?))
                }
            }
            OutputDestination::Stdout => Box::new(BufWriter::new(io::stdout())),
        };
        Ok(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utilities::{temp_file_with, temp_seqlens_file};
    use flate2::read::GzDecoder;

    #[test]
    fn test_read_seqlens() {
        let file = temp_seqlens_file(&[("chr1", 1000), ("chr2", 250), ("chrM", 16569)]);
        let seqlens = read_seqlens(file.path()).unwrap();
        assert_eq!(seqlens.len(), 3);
        assert_eq!(seqlens.get("chr2"), Some(&250));
        // order is preserved
        assert_eq!(seqlens.get_index(2).unwrap().0, "chrM");
    }

    #[test]
    fn test_read_seqlens_fai() {
        let file = temp_file_with("chr1\t1000\t6\t60\t61\n\nchr2\t30\t1030\t60\t61\n", ".fai");
        let seqlens = read_seqlens(file.path()).unwrap();
        assert_eq!(seqlens.get("chr1"), Some(&1000));
        assert_eq!(seqlens.get("chr2"), Some(&30));
    }

    #[test]
    fn test_read_seqlens_invalid() {
        let duplicated = temp_file_with("chr1\t10\nchr1\t20\n", ".tsv");
        assert!(matches!(
            read_seqlens(duplicated.path()),
            Err(MotifProfileError::InvalidGenomeFile(_))
        ));

        let missing_length = temp_file_with("chr1\n", ".tsv");
        assert!(read_seqlens(missing_length.path()).is_err());

        let bad_length = temp_file_with("chr1\tabc\n", ".tsv");
        assert!(matches!(
            read_seqlens(bad_length.path()),
            Err(MotifProfileError::ParseIntError(_))
        ));

        let zero_length = temp_file_with("chr1\t0\n", ".tsv");
        assert!(read_seqlens(zero_length.path()).is_err());
    }

    #[test]
    fn test_empty_input_file() {
        let file = temp_file_with("", ".tsv");
        assert!(read_seqlens(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_gzipped_output_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seqlens.tsv.gz");
        {
            let mut writer = OutputFile::new(&path).writer().unwrap();
            writeln!(writer, "chr1\t42").unwrap();
        }
        let mut raw = String::new();
        GzDecoder::new(File::open(&path).unwrap())
            .read_to_string(&mut raw)
            .unwrap();
        assert_eq!(raw, "chr1\t42\n");

        let seqlens = read_seqlens(&path).unwrap();
        assert_eq!(seqlens.get("chr1"), Some(&42));
    }
}
