//! Types for standardized reports to the user about a profiling run.
//!
//! Skipping a record or a window is never fatal, but it should never be silent
//! either: every skip is logged as it happens and tallied in a [`Report`], which is
//! summarized at the end of a run.
//!

use std::fmt;

/// How many issue messages a [`Report`] keeps; later issues are only counted.
pub const MAX_REPORTED_ISSUES: usize = 20;

/// Tallies of what happened to each coordinate record and window in a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    /// Coordinate list lines read (including malformed ones).
    pub records_read: usize,
    /// Records whose windows were generated.
    pub records_processed: usize,
    pub skipped_malformed: usize,
    pub skipped_unknown_seqname: usize,
    /// Records whose coordinate lies past the end of its sequence.
    pub skipped_out_of_range: usize,
    /// Windows with a density emitted to the output.
    pub windows_emitted: usize,
    /// Windows skipped because their sequence could not be retrieved.
    pub windows_skipped: usize,
    entries: Vec<String>,
    omitted: usize,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue message. Only the first [`MAX_REPORTED_ISSUES`] are kept.
    pub fn add_issue(&mut self, message: String) {
        if self.entries.len() < MAX_REPORTED_ISSUES {
            self.entries.push(message)
        } else {
            self.omitted += 1;
        }
    }

    pub fn issues(&self) -> &[String] {
        &self.entries
    }

    /// The number of issues past [`MAX_REPORTED_ISSUES`] that were counted but not kept.
    pub fn omitted_issues(&self) -> usize {
        self.omitted
    }

    pub fn records_skipped(&self) -> usize {
        self.skipped_malformed + self.skipped_unknown_seqname + self.skipped_out_of_range
    }

    /// Whether every record and window made it to the output.
    pub fn is_complete(&self) -> bool {
        self.records_skipped() == 0 && self.windows_skipped == 0
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} coordinate records read, {} processed ({} malformed, {} on unknown sequences, \
             {} past the sequence end); {} windows written, {} windows skipped",
            self.records_read,
            self.records_processed,
            self.skipped_malformed,
            self.skipped_unknown_seqname,
            self.skipped_out_of_range,
            self.windows_emitted,
            self.windows_skipped
        )
    }
}
