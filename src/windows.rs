//! Fixed-width windows tiling the interval around a coordinate.
//!
//! The interval around a coordinate is `[coordinate - interval_size, coordinate + interval_size]`,
//! clamped to `[1, seqlen]`. It is tiled from its start with contiguous, non-overlapping windows of
//! exactly `width` bases. A trailing window that would run past the clamped interval end is
//! dropped, never truncated, so every window has the same width.
//!
//! ```
//! use motifprofile::windows::generate_windows;
//!
//! let starts: Vec<_> = generate_windows(1000, 100_000, 300, 100)
//!     .map(|w| (w.start, w.distance))
//!     .collect();
//! assert_eq!(starts.first(), Some(&(700, -300)));
//! assert_eq!(starts.last(), Some(&(1200, 200)));
//! ```

use crate::{Position, PositionOffset};

/// A single window, 1-based and right-inclusive.
///
/// `distance` is the window *start* minus the coordinate the window was generated
/// around (not the window center).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowSpec {
    pub start: Position,
    pub end: Position,
    pub distance: PositionOffset,
}

impl WindowSpec {
    pub fn width(&self) -> Position {
        self.end - self.start + 1
    }
}

/// Lazy iterator over the windows around one coordinate.
///
/// This is cheap to clone; a clone restarts from the same position the original was at.
#[derive(Clone, Debug)]
pub struct Windows {
    coordinate: Position,
    interval_start: Position,
    interval_end: Position,
    next_start: Option<Position>,
    width: Position,
}

impl Windows {
    /// Create the window iterator. `interval_size` and `width` are assumed to be validated
    /// (non-zero); a zero `width` yields no windows.
    pub fn new(
        coordinate: Position,
        seqlen: Position,
        interval_size: Position,
        width: Position,
    ) -> Self {
        let interval_start = coordinate.saturating_sub(interval_size).max(1);
        let interval_end = coordinate.saturating_add(interval_size).min(seqlen);
        Self {
            coordinate,
            interval_start,
            interval_end,
            next_start: Some(interval_start),
            width,
        }
    }

    /// The clamped interval `[start, end]` these windows tile. If the coordinate lies past the
    /// end of the sequence, `start` may be greater than `end`.
    pub fn interval(&self) -> (Position, Position) {
        (self.interval_start, self.interval_end)
    }

    // The last base of a window starting at `start`, or None if it would overflow.
    fn window_end(&self, start: Position) -> Option<Position> {
        if self.width == 0 {
            return None;
        }
        let end = start.checked_add(self.width - 1)?;
        (end <= self.interval_end).then_some(end)
    }
}

impl Iterator for Windows {
    type Item = WindowSpec;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next_start?;
        let end = self.window_end(start)?;
        self.next_start = end.checked_add(1);
        Some(WindowSpec {
            start,
            end,
            distance: PositionOffset::from(start) - PositionOffset::from(self.coordinate),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next_start {
            Some(start) if self.window_end(start).is_some() => {
                ((self.interval_end - start + 1) / self.width) as usize
            }
            _ => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Windows {}

/// Generate the ordered windows around `coordinate` on a sequence of length `seqlen`.
///
/// This is a pure function of its arguments; calling it twice with the same arguments
/// yields the same windows.
pub fn generate_windows(
    coordinate: Position,
    seqlen: Position,
    interval_size: Position,
    window_size: Position,
) -> Windows {
    Windows::new(coordinate, seqlen, interval_size, window_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starts_and_distances(windows: Windows) -> Vec<(Position, PositionOffset)> {
        windows.map(|w| (w.start, w.distance)).collect()
    }

    #[test]
    fn test_tiling() {
        let windows = generate_windows(1000, 100_000, 300, 100);
        assert_eq!(windows.len(), 6);
        assert_eq!(
            starts_and_distances(windows),
            vec![
                (700, -300),
                (800, -200),
                (900, -100),
                (1000, 0),
                (1100, 100),
                (1200, 200)
            ]
        );
    }

    #[test]
    fn test_windows_are_contiguous_and_full_width() {
        let windows: Vec<_> = generate_windows(5_000, 1_000_000, 10_000, 100).collect();
        assert!(!windows.is_empty());
        for pair in windows.windows(2) {
            assert_eq!(pair[0].end + 1, pair[1].start);
        }
        assert!(windows.iter().all(|w| w.width() == 100));
    }

    #[test]
    fn test_left_boundary_clipping() {
        let windows: Vec<_> = generate_windows(50, 10_000, 100, 30).collect();
        // interval clamps to [1, 150]
        assert_eq!(windows.first().unwrap().start, 1);
        assert_eq!(windows.first().unwrap().distance, -49);
        assert_eq!(
            windows.iter().map(|w| (w.start, w.end)).collect::<Vec<_>>(),
            vec![(1, 30), (31, 60), (61, 90), (91, 120), (121, 150)]
        );
        assert!(windows.iter().all(|w| w.end <= 150));
    }

    #[test]
    fn test_partial_trailing_window_dropped() {
        // interval is [60, 140]: 81 bases, so the fifth 20bp window (140-159) is dropped
        let windows: Vec<_> = generate_windows(100, 10_000, 40, 20).collect();
        assert_eq!(windows.len(), 4);
        assert_eq!(windows.last().unwrap().end, 139);
    }

    #[test]
    fn test_right_boundary_clipping() {
        // interval is [900, 1000], clamped at the sequence end
        let windows: Vec<_> = generate_windows(950, 1000, 50, 30).collect();
        assert_eq!(
            windows.iter().map(|w| (w.start, w.end)).collect::<Vec<_>>(),
            vec![(900, 929), (930, 959), (960, 989)]
        );
        assert!(windows.iter().all(|w| w.end <= 1000));
    }

    #[test]
    fn test_interval_narrower_than_window() {
        // interval is [1, 10] on a 10bp sequence
        assert_eq!(generate_windows(5, 10, 100, 30).count(), 0);
    }

    #[test]
    fn test_coordinate_past_sequence_end() {
        let windows = generate_windows(20_000, 1_000, 100, 10);
        let (start, end) = windows.interval();
        assert!(start > end);
        assert_eq!(windows.len(), 0);
        assert_eq!(windows.count(), 0);
    }

    #[test]
    fn test_restartable() {
        let windows = generate_windows(1000, 100_000, 300, 100);
        let first: Vec<_> = windows.clone().collect();
        let second: Vec<_> = windows.collect();
        assert_eq!(first, second);
        assert_eq!(
            first,
            generate_windows(1000, 100_000, 300, 100).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_size_hint_matches_count() {
        let mut windows = generate_windows(50, 10_000, 100, 30);
        assert_eq!(windows.len(), 5);
        windows.next();
        assert_eq!(windows.len(), 4);
        assert_eq!(windows.count(), 4);
    }

    #[test]
    fn test_sequence_end_at_max_position() {
        let max = Position::MAX;
        // interval is [max - 15, max], exactly four windows
        let windows: Vec<_> = generate_windows(max - 5, max, 10, 4).collect();
        assert_eq!(windows.len(), 4);
        assert_eq!(windows.last().unwrap().end, max);
        assert!(windows.iter().all(|w| w.width() == 4));
    }
}
