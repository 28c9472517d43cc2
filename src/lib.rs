//! # motifprofile
//!
//! Profile how the local density of a short nucleotide pattern (e.g. `CG`) changes
//! with distance from a set of genomic coordinates.
//!
//! For each coordinate, a symmetric interval is tiled into fixed-width windows
//! (see [`windows`]), the reference sequence for each window is retrieved through
//! a [`Sequences`] implementation, and the *coverage density* of the pattern is
//! computed (see [`density`]): the fraction of bases that take part in at least
//! one, possibly overlapping, match of the pattern.
//!
//! Positions in this crate are **1-based and right-inclusive**, matching the
//! coordinate lists and FASTA indexes the tool consumes.
//!
//! [`Sequences`]: crate::traits::Sequences

pub mod commands;
pub mod density;
pub mod error;
pub mod io;
pub mod profile;
pub mod reporting;
pub mod sequences;
pub mod test_utilities;
pub mod traits;
pub mod windows;

/// A 1-based genomic position.
pub type Position = u32;

/// A signed offset between two positions (e.g. a window's distance from its coordinate).
pub type PositionOffset = i64;

pub mod prelude {
    pub use crate::density::{pattern_density, Density, Pattern};
    pub use crate::error::MotifProfileError;
    pub use crate::io::{read_seqlens, CoordinateIterator, InputFile, OutputFile, ReportWriter};
    pub use crate::profile::{
        CoordinateProcessor, CoordinateRecord, DensityResult, ProfileConfig, Strand, WindowConfig,
    };
    pub use crate::sequences::nucleotide::{
        IndexedNucleotideSequences, NucleotideSequences, Nucleotides,
    };
    pub use crate::traits::Sequences;
    pub use crate::windows::{generate_windows, WindowSpec, Windows};
}
