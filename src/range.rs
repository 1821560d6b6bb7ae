// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Formatting ranges

use crate::conv::{to_u32, to_usize};
use crate::FormattingKind;
use thiserror::Error;

/// Error returned on constructing an empty or inverted [`FormattingRange`]
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeError {
    #[error("formatting range {start}..{end} is empty or inverted")]
    Empty { start: usize, end: usize },
}

/// A span of text with a formatting kind
///
/// The span `start..end` is half-open over byte offsets into the text. It is
/// never empty: `start < end` holds for every value of this type.
///
/// Ranges do not own text; they are annotations which must be kept consistent
/// with the text by [`reshape_for_edit`](crate::engine::reshape_for_edit).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawRange"))]
pub struct FormattingRange {
    pub(crate) start: u32,
    pub(crate) end: u32,
    pub(crate) kind: FormattingKind,
}

impl FormattingRange {
    /// Construct over `start..end`
    ///
    /// Fails if `start >= end`.
    pub fn new(start: usize, end: usize, kind: FormattingKind) -> Result<Self, RangeError> {
        if start >= end {
            return Err(RangeError::Empty { start, end });
        }
        Ok(FormattingRange {
            start: to_u32(start),
            end: to_u32(end),
            kind,
        })
    }

    /// Construct from raw offsets, yielding `None` if empty
    #[inline]
    pub(crate) fn span(start: u32, end: u32, kind: FormattingKind) -> Option<Self> {
        (start < end).then_some(FormattingRange { start, end, kind })
    }

    #[inline]
    pub fn start(&self) -> usize {
        to_usize(self.start)
    }

    #[inline]
    pub fn end(&self) -> usize {
        to_usize(self.end)
    }

    #[inline]
    pub fn kind(&self) -> FormattingKind {
        self.kind
    }

    /// The span as a `Range`
    #[inline]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start()..self.end()
    }

    /// True if this range shares at least one position with `start..end`
    #[inline]
    pub(crate) fn overlaps(&self, start: u32, end: u32) -> bool {
        self.start < end && self.end > start
    }

    /// True if `start..end` lies within this range
    #[inline]
    pub(crate) fn covers(&self, start: u32, end: u32) -> bool {
        self.start <= start && self.end >= end
    }

    /// True if the position `index` lies within this range
    #[inline]
    pub(crate) fn contains(&self, index: u32) -> bool {
        self.start <= index && index < self.end
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawRange {
    start: usize,
    end: usize,
    kind: FormattingKind,
}

#[cfg(feature = "serde")]
impl TryFrom<RawRange> for FormattingRange {
    type Error = RangeError;

    #[inline]
    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        FormattingRange::new(raw.start, raw.end, raw.kind)
    }
}

/// A collection of [`FormattingRange`]
///
/// Order of items is not significant for coverage, though it does decide
/// ties (see [`current_formatting_at`](crate::engine::current_formatting_at)).
/// Ranges of different kinds may overlap freely.
///
/// Engine operations never mutate a collection; they consume a reference and
/// return a replacement.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RangeCollection {
    pub(crate) seq: Vec<FormattingRange>,
}

impl RangeCollection {
    /// Construct an empty collection
    #[inline]
    pub fn new() -> Self {
        RangeCollection::default()
    }

    /// True if the collection is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Returns the number of items
    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    /// Iterate over ranges
    #[inline]
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = &'a FormattingRange> {
        self.seq.iter()
    }

    /// Access ranges as a slice
    #[inline]
    pub fn as_slice(&self) -> &[FormattingRange] {
        &self.seq
    }

    /// True if some range of `kind` contains position `index`
    pub fn has_kind_at(&self, kind: FormattingKind, index: usize) -> bool {
        let index = to_u32(index);
        self.seq.iter().any(|r| r.kind == kind && r.contains(index))
    }

    /// Merge overlapping or adjacent ranges of the same kind
    ///
    /// Coverage of each kind is unchanged. The result is sorted by kind, then
    /// by start.
    pub fn coalesced(&self) -> RangeCollection {
        let mut sorted = self.seq.clone();
        sorted.sort_by_key(|r| (r.kind, r.start, r.end));

        let mut seq: Vec<FormattingRange> = Vec::with_capacity(sorted.len());
        for range in sorted {
            if let Some(last) = seq.last_mut() {
                if last.kind == range.kind && last.end >= range.start {
                    last.end = last.end.max(range.end);
                    continue;
                }
            }
            seq.push(range);
        }
        RangeCollection { seq }
    }
}

impl From<Vec<FormattingRange>> for RangeCollection {
    #[inline]
    fn from(seq: Vec<FormattingRange>) -> Self {
        RangeCollection { seq }
    }
}

impl FromIterator<FormattingRange> for RangeCollection {
    fn from_iter<T: IntoIterator<Item = FormattingRange>>(iter: T) -> Self {
        RangeCollection {
            seq: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RangeCollection {
    type Item = &'a FormattingRange;
    type IntoIter = std::slice::Iter<'a, FormattingRange>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.seq.iter()
    }
}
