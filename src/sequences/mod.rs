//! Reference sequence retrieval.
//!
//! The [`Sequences`] trait is the seam between the profiling engine and wherever the
//! reference bases come from. Two implementations are provided in [`nucleotide`]:
//!
//!  - [`IndexedNucleotideSequences`], which queries an indexed FASTA file (`.fai`) for
//!    exactly the requested range on every call. Nothing is cached.
//!  - [`NucleotideSequences`], which holds a whole FASTA file in memory. This is
//!    convenient for small genomes and tests.
//!
//! [`Sequences`]: crate::traits::Sequences
//! [`IndexedNucleotideSequences`]: crate::sequences::nucleotide::IndexedNucleotideSequences
//! [`NucleotideSequences`]: crate::sequences::nucleotide::NucleotideSequences

pub mod nucleotide;
