//! Traits used by the motifprofile library.
//!

use crate::{error::MotifProfileError, sequences::nucleotide::Nucleotides, Position};

/// The [`Sequences`] trait defines an abstraction over reference nucleotide sequence
/// retrieval: anything that can return the bases of a 1-based, right-inclusive range on a
/// named sequence.
///
/// Implementations must return exactly `end - start + 1` bases, with no header lines or
/// line breaks.
pub trait Sequences {
    /// Get the length of a particular sequence.
    fn get_sequence_length(&self, seqname: &str) -> Result<Position, MotifProfileError>;

    /// Retrieve the bases of `seqname` in `[start, end]` (1-based, inclusive).
    fn fetch(
        &self,
        seqname: &str,
        start: Position,
        end: Position,
    ) -> Result<Nucleotides, MotifProfileError>;

    /// Apply an arbitrary function to the bases of the specified region.
    ///
    /// # Arguments
    /// * `func`: a function that takes the region's bytes, returning a generic type `V`.
    /// * `seqname`: the sequence name of the region to apply the function to.
    /// * `start`: the 1-based start position of the region.
    /// * `end`: the 1-based, inclusive end position of the region.
    fn region_map<V, F>(
        &self,
        func: &F,
        seqname: &str,
        start: Position,
        end: Position,
    ) -> Result<V, MotifProfileError>
    where
        F: Fn(&[u8]) -> V,
    {
        let seq = self.fetch(seqname, start, end)?;
        let expected = end.saturating_sub(start) as usize + 1;
        if seq.len() != expected {
            return Err(MotifProfileError::TruncatedSequence(
                seqname.to_string(),
                start,
                seq.len(),
                expected,
            ));
        }
        Ok(func(&seq))
    }
}

/// Check that `[start, end]` is a valid 1-based, inclusive range on a sequence of
/// length `seqlen`.
pub fn check_range(
    start: Position,
    end: Position,
    seqlen: Position,
) -> Result<(), MotifProfileError> {
    if start > end {
        return Err(MotifProfileError::InvalidGenomicRange(start, end));
    }
    if start == 0 || end > seqlen {
        return Err(MotifProfileError::InvalidGenomicRangeForSequence(
            start, end, seqlen,
        ));
    }
    Ok(())
}
