//! Test cases and test utility functions.
//!

use rand::{seq::SliceRandom, thread_rng, Rng};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile, TempDir};

/// Bases per line in FASTA files written by [`temp_indexed_fasta()`].
pub const FASTA_LINE_BASES: usize = 60;

const NUCLEOTIDES: &[u8] = b"ACGT";

/// Build a random upper-case nucleotide sequence of length `len`.
pub fn random_nucleotides(len: usize) -> Vec<u8> {
    let mut rng = thread_rng();
    (0..len)
        .map(|_| *NUCLEOTIDES.choose(&mut rng).unwrap())
        .collect()
}

/// Randomly lower-case ("soft-mask") bases of a sequence.
pub fn random_soft_mask(seq: &[u8]) -> Vec<u8> {
    let mut rng = thread_rng();
    seq.iter()
        .map(|base| {
            if rng.gen_bool(0.5) {
                base.to_ascii_lowercase()
            } else {
                *base
            }
        })
        .collect()
}

/// A FASTA file and its `.fai` index in a temporary directory, removed on drop.
pub struct TempIndexedFasta {
    _dir: TempDir,
    path: PathBuf,
}

impl TempIndexedFasta {
    /// The path of the FASTA file (the index is this path with `.fai` appended).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The path of the `.fai` index.
    pub fn index_path(&self) -> PathBuf {
        let mut path = self.path.clone().into_os_string();
        path.push(".fai");
        path.into()
    }
}

/// Write `sequences` to a temporary FASTA file wrapped at [`FASTA_LINE_BASES`], along
/// with a matching `.fai` index.
pub fn temp_indexed_fasta(sequences: &[(&str, &str)]) -> TempIndexedFasta {
    let dir = tempfile::tempdir().expect("could not create temporary directory");
    let path = dir.path().join("genome.fa");

    let mut fasta = File::create(&path).expect("could not create FASTA file");
    let mut index = String::new();
    let mut offset = 0;

    for (name, seq) in sequences {
        let header = format!(">{}\n", name);
        fasta.write_all(header.as_bytes()).unwrap();
        offset += header.len();

        let mut nlines = 0;
        for line in seq.as_bytes().chunks(FASTA_LINE_BASES) {
            fasta.write_all(line).unwrap();
            fasta.write_all(b"\n").unwrap();
            nlines += 1;
        }

        index.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\n",
            name,
            seq.len(),
            offset,
            FASTA_LINE_BASES,
            FASTA_LINE_BASES + 1
        ));
        offset += seq.len() + nlines;
    }

    let result = TempIndexedFasta { _dir: dir, path };
    std::fs::write(result.index_path(), index).expect("could not write FASTA index");
    result
}

/// Write `contents` to a named temporary file with the given suffix (e.g. `".tsv"`).
pub fn temp_file_with(contents: &str, suffix: &str) -> NamedTempFile {
    let mut file = Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("could not create temporary file");
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Write a genome file (sequence names and lengths) to a temporary file.
pub fn temp_seqlens_file(seqlens: &[(&str, usize)]) -> NamedTempFile {
    let contents: String = seqlens
        .iter()
        .map(|(name, len)| format!("{}\t{}\n", name, len))
        .collect();
    temp_file_with(&contents, ".tsv")
}
