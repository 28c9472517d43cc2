//! Types and methods for working with per-basepair nucleotide sequence data.
//!
//! Currently this requires the [`noodles::fasta`] module, but their API is unstable
//! and may be a source of future pain.

use bytes::Bytes;
use genomap::GenomeMap;
use indexmap::IndexMap;
use noodles::core::{Position as NoodlesPosition, Region};
use noodles::fasta::indexed_reader;
use noodles::fasta::{io::BufReadSeek, reader, record::Sequence, IndexedReader};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;
use std::path::PathBuf;
use std::str;

use crate::error::MotifProfileError;
use crate::traits::{check_range, Sequences};
use crate::Position;

/// A newtype around raw nucleotide [`Bytes`], for making it more
/// display and other operations more convenient.
#[derive(Clone, Debug, PartialEq)]
pub struct Nucleotides(Bytes);

impl fmt::Display for Nucleotides {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match str::from_utf8(&self.0) {
            Ok(s) => write!(f, "{}", s),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl Deref for Nucleotides {
    type Target = Bytes;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&Sequence> for Nucleotides {
    fn from(sequence: &Sequence) -> Self {
        let seq = Bytes::from(sequence.as_ref().to_vec());
        Nucleotides(seq)
    }
}

impl From<String> for Nucleotides {
    fn from(s: String) -> Self {
        let bytes = Bytes::from(s.into_bytes());
        Nucleotides(bytes)
    }
}

impl<'a> From<&'a str> for Nucleotides {
    fn from(s: &'a str) -> Self {
        let bytes = Bytes::from(s.as_bytes().to_vec());
        Nucleotides(bytes)
    }
}

impl Nucleotides {
    /// Get the length of the nucleotide sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return whether this is an empty object.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A zero-copy sub-slice of the 1-based, inclusive range `[start, end]`.
    ///
    /// The range must already be checked against the sequence length.
    fn slice_range(&self, start: Position, end: Position) -> Nucleotides {
        Nucleotides(self.0.slice((start - 1) as usize..end as usize))
    }
}

// Sequence lengths are bounded by `Position`; anything longer is rejected on load.
fn sequence_length(seqname: &str, len: usize) -> Result<Position, MotifProfileError> {
    Position::try_from(len).map_err(|_| {
        MotifProfileError::InvalidGenomeFile(format!(
            "sequence '{}' is too long ({} bases)",
            seqname, len
        ))
    })
}

/// [`NucleotideSequences`] for storing a whole genome's nucleotide sequence
/// data in-memory.
pub struct NucleotideSequences {
    data: GenomeMap<Nucleotides>,
}

impl NucleotideSequences {
    /// Load an entire FASTA file into memory, into a [`NucleotideSequences`] object.
    ///
    /// # Arguments
    /// * `filepath`: a path to the (possible gzipped) FASTA file.
    /// * `seqnames`: an optional subset of sequences to load.
    pub fn from_fasta(
        filepath: impl Into<PathBuf>,
        seqnames: Option<Vec<String>>,
    ) -> Result<Self, MotifProfileError> {
        let data = parse_fasta(filepath, seqnames)?;
        let seqs = Self { data };
        seqs.validate_lengths()?;
        Ok(seqs)
    }

    /// Build a [`NucleotideSequences`] from `(seqname, sequence)` pairs.
    pub fn from_sequences<N, S>(
        sequences: impl IntoIterator<Item = (N, S)>,
    ) -> Result<Self, MotifProfileError>
    where
        N: AsRef<str>,
        S: Into<Nucleotides>,
    {
        let mut data = GenomeMap::new();
        for (name, seq) in sequences {
            data.insert(name.as_ref(), seq.into())?;
        }
        let seqs = Self { data };
        seqs.validate_lengths()?;
        Ok(seqs)
    }

    fn validate_lengths(&self) -> Result<(), MotifProfileError> {
        for (name, seq) in self.data.iter() {
            sequence_length(name, seq.len())?;
        }
        Ok(())
    }

    /// Retrieve an [`IndexMap`] of the sequence names and their lengths.
    pub fn seqlens(&self) -> IndexMap<String, Position> {
        self.data
            .iter()
            .map(|(k, v)| (k.clone(), v.len() as Position))
            .collect()
    }

    /// Retrieve the whole [`Nucleotides`] for a particular sequence name.
    pub fn get_sequence(&self, seqname: &str) -> Result<&Nucleotides, MotifProfileError> {
        self.data
            .get(seqname)
            .ok_or(MotifProfileError::MissingSequence(seqname.to_string()))
    }
}

impl Sequences for NucleotideSequences {
    fn get_sequence_length(&self, seqname: &str) -> Result<Position, MotifProfileError> {
        Ok(self.get_sequence(seqname)?.len() as Position)
    }

    fn fetch(
        &self,
        seqname: &str,
        start: Position,
        end: Position,
    ) -> Result<Nucleotides, MotifProfileError> {
        let seq = self.get_sequence(seqname)?;
        check_range(start, end, seq.len() as Position)?;
        Ok(seq.slice_range(start, end))
    }
}

/// Nucleotide sequences retrieved region-by-region from an indexed FASTA file.
///
/// Each [`Sequences::fetch()`] call is a fresh query against the file; the
/// sequence names and lengths come from the FASTA index.
pub struct IndexedNucleotideSequences {
    seqlens: IndexMap<String, Position>,
    reader: RefCell<IndexedReader<Box<dyn BufReadSeek>>>,
}

impl fmt::Debug for IndexedNucleotideSequences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedNucleotideSequences")
            .field("seqlens", &self.seqlens)
            .finish_non_exhaustive()
    }
}

impl IndexedNucleotideSequences {
    /// Open an indexed FASTA file. The index is expected at `<filepath>.fai`.
    ///
    /// # Arguments
    /// * `filepath` - the path to the (possibly bgzipped) and indexed FASTA file.
    pub fn new(filepath: impl Into<PathBuf>) -> Result<Self, MotifProfileError> {
        let filepath = filepath.into();
        let reader = indexed_reader::Builder::default().build_from_path(filepath)?;

        let mut seqlens = IndexMap::new();
        for record in reader.index().iter() {
            let name = String::from_utf8(record.name().to_vec())?;
            let length = Position::try_from(record.length()).map_err(|_| {
                MotifProfileError::InvalidGenomeFile(format!(
                    "sequence '{}' is too long ({} bases)",
                    name,
                    record.length()
                ))
            })?;
            seqlens.insert(name, length);
        }

        Ok(Self {
            seqlens,
            reader: RefCell::new(reader),
        })
    }

    /// Get an [`IndexMap`] of the sequence names and their lengths, from the FASTA index.
    pub fn seqlens(&self) -> IndexMap<String, Position> {
        self.seqlens.clone()
    }
}

impl Sequences for IndexedNucleotideSequences {
    fn get_sequence_length(&self, seqname: &str) -> Result<Position, MotifProfileError> {
        self.seqlens
            .get(seqname)
            .ok_or(MotifProfileError::MissingSequence(seqname.to_string()))
            .copied()
    }

    fn fetch(
        &self,
        seqname: &str,
        start: Position,
        end: Position,
    ) -> Result<Nucleotides, MotifProfileError> {
        let seqlen = self.get_sequence_length(seqname)?;
        check_range(start, end, seqlen)?;

        // check_range() guarantees both are >= 1
        let (Some(noodles_start), Some(noodles_end)) = (
            NoodlesPosition::new(start as usize),
            NoodlesPosition::new(end as usize),
        ) else {
            return Err(MotifProfileError::InvalidGenomicRange(start, end));
        };

        let region = Region::new(seqname.as_bytes().to_vec(), noodles_start..=noodles_end);
        let record = self.reader.borrow_mut().query(&region)?;
        Ok(record.sequence().into())
    }
}

// Convert an `Option<Vec<String>>` into a `Option<HashSet<String>>`
fn option_vec_to_hashset(x: Option<Vec<String>>) -> Option<HashSet<String>> {
    x.map(HashSet::from_iter)
}

/// Use the [`noodles`] library to parse a FASTA file.
pub fn parse_fasta(
    filepath: impl Into<PathBuf>,
    seqnames: Option<Vec<String>>,
) -> Result<GenomeMap<Nucleotides>, MotifProfileError> {
    let seqnames_set = option_vec_to_hashset(seqnames);

    let filepath = filepath.into();

    let mut reader = reader::Builder.build_from_path(filepath)?;

    let mut sequences = GenomeMap::new();

    for result in reader.records() {
        let record = result?;
        let name = String::from_utf8(record.definition().name().to_vec())?;
        if seqnames_set
            .as_ref()
            .map_or(true, |keep_seqnames| keep_seqnames.contains(&name))
        {
            sequences.insert(&name, record.sequence().into())?;
        }
    }

    Ok(sequences)
}
