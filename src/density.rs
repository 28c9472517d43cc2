//! Coverage density of a literal nucleotide pattern in a sequence.
//!
//! The *coverage density* is the fraction of a sequence's bases that are part of at least one
//! match of the pattern. Matches may overlap, and overlapping matches cover each base only
//! once. So `AA` in `AAA` matches twice (offsets 0 and 1), covering all three bases, for a
//! density of `1.00`.
//!
//! Matching is an exact, case-insensitive comparison of bytes; there is no special
//! handling of IUPAC ambiguity codes.
//!
//! Densities are reported with two decimals, *truncated* rather than rounded (e.g. 2/3
//! is `0.66`). See [`Density`].

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::MotifProfileError;

/// A validated, non-empty pattern, stored upper-cased.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern(Vec<u8>);

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, MotifProfileError> {
        Self::from_bytes(pattern.as_bytes())
    }

    pub fn from_bytes(pattern: &[u8]) -> Result<Self, MotifProfileError> {
        if pattern.is_empty() {
            return Err(MotifProfileError::InvalidPattern);
        }
        Ok(Self(pattern.to_ascii_uppercase()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Count the bases of `seq` covered by at least one match of this pattern.
    pub fn covered_bases(&self, seq: &[u8]) -> usize {
        let k = self.len();
        if seq.len() < k {
            return 0;
        }
        // matches are found in order, so only bases past the last covered end are new
        let mut covered = 0;
        let mut covered_end = 0;
        for (i, kmer) in seq.windows(k).enumerate() {
            if kmer.eq_ignore_ascii_case(self.as_bytes()) {
                covered += i + k - covered_end.max(i);
                covered_end = i + k;
            }
        }
        covered
    }

    /// Compute the coverage [`Density`] of this pattern in `seq`.
    pub fn density(&self, seq: &[u8]) -> Density {
        Density::from_counts(self.covered_bases(seq), seq.len())
    }
}

impl FromStr for Pattern {
    type Err = MotifProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::new(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

/// A density in `[0.00, 1.00]` at two-decimal precision.
///
/// Stored as an integer number of hundredths, so that truncation is exact and
/// [`Display`](fmt::Display) always renders two decimals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Density(u8);

impl Density {
    pub const ZERO: Density = Density(0);
    pub const ONE: Density = Density(100);

    /// `covered / total`, truncated toward zero at two decimals. A zero `total` is `0.00`.
    pub fn from_counts(covered: usize, total: usize) -> Self {
        if total == 0 {
            return Density::ZERO;
        }
        let covered = covered.min(total) as u64;
        let hundredths = covered * 100 / total as u64;
        Density(hundredths as u8)
    }

    pub fn hundredths(&self) -> u8 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Density {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Calculate the coverage density of `pattern` in `seq`.
///
/// # Errors
/// Returns [`MotifProfileError::InvalidPattern`] if `pattern` is empty.
pub fn pattern_density(seq: &[u8], pattern: &[u8]) -> Result<Density, MotifProfileError> {
    Ok(Pattern::from_bytes(pattern)?.density(seq))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utilities::{random_nucleotides, random_soft_mask};

    fn density(seq: &str, pattern: &str) -> Density {
        pattern_density(seq.as_bytes(), pattern.as_bytes()).unwrap()
    }

    #[test]
    fn test_coverage_not_count() {
        assert_eq!(density("AAA", "AA"), Density::ONE);
        assert_eq!(density("AAA", "AA").to_string(), "1.00");
        // one CG covers 2 of 10 bases
        assert_eq!(density("ATCGATTTAA", "CG").to_string(), "0.20");
        // CGCG: matches at 0 and 2, covering 4 of 8 bases
        assert_eq!(density("CGCGTTTT", "CG").to_string(), "0.50");
        // overlapping matches at 0, 1, 2 of AAA: union is bases 0..5
        assert_eq!(density("AAAAATTTTT", "AAA").to_string(), "0.50");
    }

    #[test]
    fn test_truncation() {
        // 2/3 = 0.666...
        assert_eq!(density("CGA", "CG").to_string(), "0.66");
        // 2/7 = 0.2857...
        assert_eq!(density("CGAAAAA", "CG").to_string(), "0.28");
        // 1/3 = 0.333...
        assert_eq!(density("ACT", "C").to_string(), "0.33");
        // 29/100 exactly; a float product could land just below and truncate to 0.28
        let seq = format!("{}{}", "C".repeat(29), "A".repeat(71));
        assert_eq!(density(&seq, "C").to_string(), "0.29");
        assert_eq!(density(&seq, "C").hundredths(), 29);
    }

    #[test]
    fn test_short_sequence() {
        assert_eq!(density("C", "CG"), Density::ZERO);
        assert_eq!(density("", "CG"), Density::ZERO);
        assert_eq!(density("CG", "CGC").to_string(), "0.00");
    }

    #[test]
    fn test_no_match() {
        assert_eq!(density("AAAAAAAAAA", "CG"), Density::ZERO);
        assert_eq!(density("GCGC", "CC"), Density::ZERO);
    }

    #[test]
    fn test_empty_pattern() {
        for seq in ["A", "ACGT", "NNNN"] {
            assert!(matches!(
                pattern_density(seq.as_bytes(), b""),
                Err(MotifProfileError::InvalidPattern)
            ));
        }
        assert!(Pattern::new("").is_err());
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(density("acgt", "CG"), density("ACGT", "cg"));
        assert_eq!(density("aCgT", "Cg").to_string(), "0.50");

        for _ in 0..200 {
            let seq = random_nucleotides(250);
            let masked = random_soft_mask(&seq);
            for pattern in ["CG", "cg", "A", "TA", "GgG"] {
                let lower = pattern.to_ascii_lowercase();
                assert_eq!(
                    pattern_density(&masked, pattern.as_bytes()).unwrap(),
                    pattern_density(&seq.to_ascii_uppercase(), lower.as_bytes()).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_density_bounds() {
        for len in [0, 1, 2, 7, 100, 1000] {
            let seq = random_nucleotides(len);
            for pattern in ["C", "CG", "ACG", "AAAAAAAA"] {
                let d = density(std::str::from_utf8(&seq).unwrap(), pattern);
                assert!(d >= Density::ZERO && d <= Density::ONE);
                assert!((0.0..=1.0).contains(&d.as_f64()));
            }
        }
    }

    #[test]
    fn test_covered_bases() {
        let pattern = Pattern::new("cg").unwrap();
        assert_eq!(pattern.as_bytes(), b"CG");
        assert_eq!(pattern.to_string(), "CG");
        assert_eq!(pattern.covered_bases(b"CGCGAACG"), 6);
        assert_eq!(pattern.covered_bases(b"C"), 0);
    }

    #[test]
    fn test_covered_bases_matches_position_mask() {
        for _ in 0..100 {
            let seq = random_soft_mask(&random_nucleotides(300));
            for pattern in ["A", "AA", "cg", "ACA", "TTTT"] {
                let pattern = Pattern::new(pattern).unwrap();
                let k = pattern.len();
                let mut mask = vec![false; seq.len()];
                for i in 0..=seq.len() - k {
                    if seq[i..i + k].to_ascii_uppercase() == pattern.as_bytes() {
                        mask[i..i + k].fill(true);
                    }
                }
                let expected = mask.iter().filter(|&&covered| covered).count();
                assert_eq!(pattern.covered_bases(&seq), expected);
            }
        }
    }

    #[test]
    fn test_density_display() {
        assert_eq!(Density::ZERO.to_string(), "0.00");
        assert_eq!(Density::ONE.to_string(), "1.00");
        assert_eq!(Density::from_counts(1, 20).to_string(), "0.05");
        assert_eq!(Density::from_counts(3, 0), Density::ZERO);
    }
}
