//! Command functions, one per `motifprofile` subcommand.

use indexmap::IndexMap;
use log::info;
use std::path::PathBuf;

use crate::{
    io::{read_seqlens, CoordinateIterator, OutputFile, ReportWriter},
    prelude::*,
    profile::{for_each_record, WindowConfig, WindowRecord},
    reporting::Report,
    Position,
};

/// Where reference sequence is read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessingMode {
    /// Query the indexed FASTA for each window.
    Indexed,
    /// Load the whole FASTA into memory first.
    InMemory,
}

fn output_file(output: Option<&PathBuf>) -> OutputFile {
    output.map_or(OutputFile::new_stdout(), |path| OutputFile::new(path))
}

/// Compute the pattern density profile around each coordinate in `coordinates`.
///
/// # Arguments
/// * `coordinates`: the coordinate list (seqname, 1-based coordinate, strand).
/// * `fasta`: the reference FASTA; in [`ProcessingMode::Indexed`] mode this must have a
///   `.fai` index alongside it.
/// * `seqlens`: an optional genome file of sequence lengths. If `None`, lengths come
///   from the reference itself.
/// * `config`: the validated run configuration.
/// * `output`: an optional output file (standard output if `None`).
pub fn motifprofile_profile(
    coordinates: &PathBuf,
    fasta: &PathBuf,
    seqlens: Option<&PathBuf>,
    config: &ProfileConfig,
    output: Option<&PathBuf>,
    mode: ProcessingMode,
) -> Result<Report, MotifProfileError> {
    match mode {
        ProcessingMode::Indexed => {
            let sequences = IndexedNucleotideSequences::new(fasta)?;
            let genome = match seqlens {
                Some(path) => read_seqlens(path)?,
                None => sequences.seqlens(),
            };
            profile_with(coordinates, &genome, &sequences, config, output)
        }
        ProcessingMode::InMemory => {
            let sequences = NucleotideSequences::from_fasta(fasta, None)?;
            let genome = match seqlens {
                Some(path) => read_seqlens(path)?,
                None => sequences.seqlens(),
            };
            profile_with(coordinates, &genome, &sequences, config, output)
        }
    }
}

fn profile_with<S: Sequences>(
    coordinates: &PathBuf,
    genome: &IndexMap<String, Position>,
    sequences: &S,
    config: &ProfileConfig,
    output: Option<&PathBuf>,
) -> Result<Report, MotifProfileError> {
    let records = CoordinateIterator::new(coordinates)?;
    let mut writer = ReportWriter::profile(&output_file(output))?;

    info!(
        "profiling '{}' density in {}bp windows within {}bp of each coordinate",
        config.pattern,
        config.windows.window_size(),
        config.windows.interval_size()
    );

    let processor = CoordinateProcessor::new(config, genome, sequences);
    let report = processor.run(records, |result| writer.write(&result))?;
    writer.flush()?;
    Ok(report)
}

/// Write the windows that would be profiled around each coordinate, without retrieving
/// any sequence.
pub fn motifprofile_windows(
    coordinates: &PathBuf,
    seqlens: &PathBuf,
    config: &WindowConfig,
    output: Option<&PathBuf>,
) -> Result<Report, MotifProfileError> {
    let genome = read_seqlens(seqlens)?;
    let records = CoordinateIterator::new(coordinates)?;
    let mut writer = ReportWriter::windows(&output_file(output))?;

    let mut report = Report::new();
    for_each_record(records, &mut report, |record, report| {
        let Some(windows) = config.locate(&record, &genome, report) else {
            return Ok(());
        };
        for window in windows {
            writer.write(&WindowRecord::new(&record, &window))?;
            report.windows_emitted += 1;
        }
        Ok(())
    })?;
    writer.flush()?;
    Ok(report)
}
