// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Block-strided address pattern.
//!
//! A [`BlockStride`] describes `count` runs of `block` consecutive indices in
//! a 1-D index space, the first run beginning at `start` and each following
//! run beginning `stride` indices after the previous one. It is the same
//! shape as an HDF5 hyperslab along one axis, but carries no dependency on
//! any file-format API.

use std::ops::Range;

/// Regularly spaced fixed-length runs in a 1-D index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockStride {
    /// First index of the first run
    pub start: usize,
    /// Distance between the starts of consecutive runs
    pub stride: usize,
    /// Number of runs
    pub count: usize,
    /// Length of each run
    pub block: usize,
}

impl BlockStride {
    /// Create a new pattern.
    pub fn new(start: usize, stride: usize, count: usize, block: usize) -> Self {
        Self {
            start,
            stride,
            count,
            block,
        }
    }

    /// A single contiguous run covering `range`.
    pub fn contiguous(range: Range<usize>) -> Self {
        let len = range.end.saturating_sub(range.start);
        Self::new(range.start, len.max(1), usize::from(len > 0), len)
    }

    /// Total number of indices selected.
    pub fn len(&self) -> usize {
        self.count * self.block
    }

    /// True when the pattern selects nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when runs never touch or overlap each other.
    pub fn is_disjoint(&self) -> bool {
        self.count <= 1 || self.block <= self.stride
    }

    /// One past the last selected index, or `start` if empty.
    pub fn end(&self) -> usize {
        if self.is_empty() {
            self.start
        } else {
            self.start + (self.count - 1) * self.stride + self.block
        }
    }

    /// The `k`-th run as a half-open range.
    pub fn run(&self, k: usize) -> Option<Range<usize>> {
        if k >= self.count {
            return None;
        }
        let begin = self.start + k * self.stride;
        Some(begin..begin + self.block)
    }

    /// Iterate the runs in order.
    pub fn runs(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..self.count).filter_map(move |k| self.run(k))
    }

    /// Iterate every selected index in order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.runs().flatten()
    }

    /// Whether any index is selected by both patterns.
    ///
    /// Walks the runs of the pattern with fewer runs and locates the first
    /// candidate run of the other arithmetically.
    pub fn overlaps(&self, other: &BlockStride) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        if self.end() <= other.start || other.end() <= self.start {
            return false;
        }
        let (walked, probed) = if self.count <= other.count {
            (self, other)
        } else {
            (other, self)
        };
        walked.runs().any(|run| {
            probed
                .first_run_ending_after(run.start)
                .is_some_and(|r| r.start < run.end)
        })
    }

    /// First run whose last index is at or after `index`.
    fn first_run_ending_after(&self, index: usize) -> Option<Range<usize>> {
        if self.stride == 0 {
            return self.run(0).filter(|r| r.end > index);
        }
        let first_end = self.start + self.block;
        let k = if index < first_end {
            0
        } else {
            (index + 1 - first_end).div_ceil(self.stride)
        };
        self.run(k)
    }
}
