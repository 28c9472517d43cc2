//! Per-coordinate density profiles.
//!
//! For each [`CoordinateRecord`], the [`CoordinateProcessor`]:
//!
//!  1. looks up the record's sequence length (unknown sequences are skipped with a warning),
//!  2. generates the windows around the coordinate (see [`crate::windows`]),
//!  3. retrieves each window's bases through a [`Sequences`] implementation, retrying
//!     failed retrievals a bounded number of times,
//!  4. computes the pattern's coverage [`Density`] in each window, and
//!  5. emits one [`DensityResult`] per window, in window order.
//!
//! A window whose bases cannot be retrieved is skipped and counted in the [`Report`];
//! no density is ever emitted for it.

use indexmap::IndexMap;
use log::{debug, warn};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::density::{Density, Pattern};
use crate::error::MotifProfileError;
use crate::reporting::Report;
use crate::traits::Sequences;
use crate::windows::{generate_windows, WindowSpec, Windows};
use crate::{Position, PositionOffset};

pub const DEFAULT_INTERVAL_SIZE: Position = 10_000;
pub const DEFAULT_WINDOW_SIZE: Position = 100;
pub const DEFAULT_FETCH_RETRIES: usize = 2;

/// Strand annotation, carried from input to output untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Strand {
    #[serde(rename = "+")]
    Forward,
    #[serde(rename = "-")]
    Reverse,
}

impl FromStr for Strand {
    type Err = MotifProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            _ => Err(MotifProfileError::InvalidStrand(s.to_string())),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
        }
    }
}

/// One line of a coordinate list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoordinateRecord {
    pub seqname: String,
    /// 1-based position.
    pub coordinate: Position,
    pub strand: Strand,
}

impl CoordinateRecord {
    pub fn new(seqname: impl Into<String>, coordinate: Position, strand: Strand) -> Self {
        Self {
            seqname: seqname.into(),
            coordinate,
            strand,
        }
    }

    /// The `<seqname>_<coordinate>` label used in the output.
    pub fn label(&self) -> String {
        format!("{}_{}", self.seqname, self.coordinate)
    }
}

/// The density of the pattern in one window around a coordinate.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DensityResult {
    pub label: String,
    pub distance: PositionOffset,
    pub ratio: Density,
    pub strand: Strand,
}

impl DensityResult {
    pub fn new(
        label: impl Into<String>,
        distance: PositionOffset,
        ratio: Density,
        strand: Strand,
    ) -> Self {
        Self {
            label: label.into(),
            distance,
            ratio,
            strand,
        }
    }
}

/// One generated window, with the record it belongs to, for window listings.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WindowRecord {
    pub seqname: String,
    pub start: Position,
    pub end: Position,
    pub distance: PositionOffset,
    pub strand: Strand,
}

impl WindowRecord {
    pub fn new(record: &CoordinateRecord, window: &WindowSpec) -> Self {
        Self {
            seqname: record.seqname.clone(),
            start: window.start,
            end: window.end,
            distance: window.distance,
            strand: record.strand,
        }
    }
}

/// Validated interval and window sizes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowConfig {
    interval_size: Position,
    window_size: Position,
}

impl WindowConfig {
    /// Both sizes must be positive, and the interval must be larger than the window.
    pub fn new(interval_size: Position, window_size: Position) -> Result<Self, MotifProfileError> {
        if window_size == 0 {
            return Err(MotifProfileError::InvalidConfiguration(
                "window size must be a positive integer".to_string(),
            ));
        }
        if interval_size == 0 {
            return Err(MotifProfileError::InvalidConfiguration(
                "interval size must be a positive integer".to_string(),
            ));
        }
        if interval_size <= window_size {
            return Err(MotifProfileError::InvalidConfiguration(format!(
                "interval size ({}) must be greater than window size ({})",
                interval_size, window_size
            )));
        }
        Ok(Self {
            interval_size,
            window_size,
        })
    }

    pub fn interval_size(&self) -> Position {
        self.interval_size
    }

    pub fn window_size(&self) -> Position {
        self.window_size
    }

    /// The windows around `coordinate` on a sequence of length `seqlen`.
    pub fn windows(&self, coordinate: Position, seqlen: Position) -> Windows {
        generate_windows(coordinate, seqlen, self.interval_size, self.window_size)
    }

    /// Look up the record's sequence and return its windows, or `None` (after logging
    /// and counting the reason) if the record must be skipped.
    pub fn locate(
        &self,
        record: &CoordinateRecord,
        seqlens: &IndexMap<String, Position>,
        report: &mut Report,
    ) -> Option<Windows> {
        let Some(&seqlen) = seqlens.get(&record.seqname) else {
            warn!(
                "skipping {}: sequence '{}' is not in the genome file",
                record.label(),
                record.seqname
            );
            report.skipped_unknown_seqname += 1;
            report.add_issue(format!("unknown sequence '{}'", record.seqname));
            return None;
        };
        if record.coordinate > seqlen {
            warn!(
                "skipping {}: coordinate is past the end of '{}' (length {})",
                record.label(),
                record.seqname,
                seqlen
            );
            report.skipped_out_of_range += 1;
            report.add_issue(format!("{} is past the sequence end", record.label()));
            return None;
        }
        report.records_processed += 1;
        Some(self.windows(record.coordinate, seqlen))
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            interval_size: DEFAULT_INTERVAL_SIZE,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

/// Complete, validated configuration for a profiling run.
#[derive(Clone, Debug)]
pub struct ProfileConfig {
    pub pattern: Pattern,
    pub windows: WindowConfig,
    /// Extra attempts made after a failed sequence retrieval.
    pub fetch_retries: usize,
}

impl ProfileConfig {
    pub fn new(
        pattern: &str,
        interval_size: Position,
        window_size: Position,
    ) -> Result<Self, MotifProfileError> {
        Ok(Self {
            pattern: Pattern::new(pattern)?,
            windows: WindowConfig::new(interval_size, window_size)?,
            fetch_retries: DEFAULT_FETCH_RETRIES,
        })
    }

    pub fn with_fetch_retries(mut self, fetch_retries: usize) -> Self {
        self.fetch_retries = fetch_retries;
        self
    }
}

/// Computes density profiles for coordinate records.
pub struct CoordinateProcessor<'a, S> {
    config: &'a ProfileConfig,
    seqlens: &'a IndexMap<String, Position>,
    sequences: &'a S,
}

impl<'a, S: Sequences> CoordinateProcessor<'a, S> {
    /// # Arguments
    /// * `config`: the validated run configuration.
    /// * `seqlens`: the sequence (chromosome) length table.
    /// * `sequences`: where window sequences are retrieved from.
    pub fn new(
        config: &'a ProfileConfig,
        seqlens: &'a IndexMap<String, Position>,
        sequences: &'a S,
    ) -> Self {
        Self {
            config,
            seqlens,
            sequences,
        }
    }

    /// Compute the density of the pattern in one window.
    ///
    /// I/O failures are retried up to `fetch_retries` times; any other error (e.g. a
    /// sequence missing from the reference) is returned on the first attempt.
    pub fn window_density(
        &self,
        seqname: &str,
        window: &WindowSpec,
    ) -> Result<Density, MotifProfileError> {
        let pattern = &self.config.pattern;
        let density = |seq: &[u8]| pattern.density(seq);
        let mut attempt = 0;
        loop {
            match self
                .sequences
                .region_map(&density, seqname, window.start, window.end)
            {
                Ok(ratio) => return Ok(ratio),
                Err(err @ MotifProfileError::IOError(_))
                    if attempt < self.config.fetch_retries =>
                {
                    attempt += 1;
                    debug!(
                        "retrieving {}:{}-{} failed (attempt {}): {}",
                        seqname, window.start, window.end, attempt, err
                    );
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Process one record, passing each window's [`DensityResult`] to `emit` in window order.
    ///
    /// Skipped records and windows are logged and counted in `report`. Only errors
    /// returned by `emit` are propagated.
    pub fn process_record<F>(
        &self,
        record: &CoordinateRecord,
        report: &mut Report,
        mut emit: F,
    ) -> Result<(), MotifProfileError>
    where
        F: FnMut(DensityResult) -> Result<(), MotifProfileError>,
    {
        let Some(windows) = self.config.windows.locate(record, self.seqlens, report) else {
            return Ok(());
        };

        let label = record.label();
        for window in windows {
            match self.window_density(&record.seqname, &window) {
                Ok(ratio) => {
                    emit(DensityResult::new(
                        label.clone(),
                        window.distance,
                        ratio,
                        record.strand,
                    ))?;
                    report.windows_emitted += 1;
                }
                Err(err) => {
                    warn!(
                        "skipping window {}:{}-{} of {}: {}",
                        record.seqname, window.start, window.end, label, err
                    );
                    report.windows_skipped += 1;
                    report.add_issue(format!(
                        "window {}:{}-{} skipped: {}",
                        record.seqname, window.start, window.end, err
                    ));
                }
            }
        }
        Ok(())
    }

    /// Process records one at a time, in order. Malformed records
    /// ([`MotifProfileError::InvalidCoordinateLine`]) are skipped with a warning; any other
    /// error from `records`, or from `emit`, aborts the run.
    pub fn run<I, F>(&self, records: I, mut emit: F) -> Result<Report, MotifProfileError>
    where
        I: IntoIterator<Item = Result<CoordinateRecord, MotifProfileError>>,
        F: FnMut(DensityResult) -> Result<(), MotifProfileError>,
    {
        let mut report = Report::new();
        for_each_record(records, &mut report, |record, report| {
            self.process_record(&record, report, &mut emit)
        })?;
        Ok(report)
    }
}

/// Pass each well-formed record to `func`, in order, counting every record read.
///
/// Malformed records ([`MotifProfileError::InvalidCoordinateLine`]) are logged, counted and
/// skipped. Any other error from `records`, or any error from `func`, is returned.
pub fn for_each_record<I, F>(
    records: I,
    report: &mut Report,
    mut func: F,
) -> Result<(), MotifProfileError>
where
    I: IntoIterator<Item = Result<CoordinateRecord, MotifProfileError>>,
    F: FnMut(CoordinateRecord, &mut Report) -> Result<(), MotifProfileError>,
{
    for result in records {
        report.records_read += 1;
        match result {
            Ok(record) => func(record, report)?,
            Err(err @ MotifProfileError::InvalidCoordinateLine(..)) => {
                warn!("skipping malformed coordinate record: {}", err);
                report.skipped_malformed += 1;
                report.add_issue(err.to_string());
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}
