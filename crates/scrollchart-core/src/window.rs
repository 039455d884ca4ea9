//! Window bounds over a series
//!
//! A window is `len` contiguous rows starting at `start`, with
//! `0 <= start <= series_len - len`.

use std::ops::Range;

use crate::error::ConfigError;

/// Valid start positions for a fixed-length window over a series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    len: usize,
    max_start: usize,
}

impl WindowBounds {
    /// Bounds for `visible_rows` rows over a series of `series_len` records
    pub fn new(series_len: usize, visible_rows: usize) -> Result<Self, ConfigError> {
        if visible_rows == 0 {
            return Err(ConfigError::NoRows);
        }
        if series_len < visible_rows {
            return Err(ConfigError::SeriesTooShort {
                len: series_len,
                visible_rows,
            });
        }
        Ok(Self {
            len: visible_rows,
            max_start: series_len - visible_rows,
        })
    }

    /// Window length (visible row count)
    pub fn rows(&self) -> usize {
        self.len
    }

    /// Last valid start index
    pub fn max_start(&self) -> usize {
        self.max_start
    }

    /// Clamp any index into `[0, max_start]`
    pub fn clamp(&self, index: i64) -> usize {
        if index <= 0 {
            0
        } else {
            usize::try_from(index).map_or(self.max_start, |i| i.min(self.max_start))
        }
    }

    /// Row range covered by the window starting at `start`
    pub fn range(&self, start: usize) -> Range<usize> {
        start..start + self.len
    }

    /// Next start for playback: one step forward, wrapping to 0 past the end
    pub fn advance(&self, start: usize) -> usize {
        let next = start + 1;
        if next > self.max_start {
            0
        } else {
            next
        }
    }
}
