// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! KAS Rich-Edit library — simple data types

use crate::conv::{to_u32, to_usize};
use thiserror::Error;

/// Kind of formatting applied by a [`FormattingRange`](crate::FormattingRange)
///
/// Kinds fall into two disjoint groups:
///
/// -   *Block* kinds ([`Self::Body`] and the headings) are mutually exclusive:
///     a position has at most one active block kind, defaulting to `Body`.
/// -   *Inline* kinds ([`Self::Bold`], [`Self::Italic`], [`Self::Underline`])
///     may be combined freely with each other and with any block kind.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormattingKind {
    /// Normal body text
    #[default]
    Body,
    /// Bold weight
    Bold,
    /// Italic style
    Italic,
    /// Underlined
    Underline,
    /// Title
    Heading1,
    /// Heading
    Heading2,
    /// Sub-heading
    Heading3,
}

impl FormattingKind {
    /// All kinds, in declaration order
    pub const ALL: [FormattingKind; 7] = [
        FormattingKind::Body,
        FormattingKind::Bold,
        FormattingKind::Italic,
        FormattingKind::Underline,
        FormattingKind::Heading1,
        FormattingKind::Heading2,
        FormattingKind::Heading3,
    ];

    /// True for `Body` and the headings
    #[inline]
    pub fn is_block(self) -> bool {
        !self.is_inline()
    }

    /// True for `Bold`, `Italic` and `Underline`
    #[inline]
    pub fn is_inline(self) -> bool {
        matches!(
            self,
            FormattingKind::Bold | FormattingKind::Italic | FormattingKind::Underline
        )
    }

    /// True for `Heading1`, `Heading2` and `Heading3`
    #[inline]
    pub fn is_heading(self) -> bool {
        matches!(
            self,
            FormattingKind::Heading1 | FormattingKind::Heading2 | FormattingKind::Heading3
        )
    }
}

/// A text selection
///
/// Offsets are in bytes (UTF-8 code units) and satisfy `start <= end`.
/// When `start == end` the selection is a caret.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSelection"))]
pub struct Selection {
    pub(crate) start: u32,
    pub(crate) end: u32,
}

/// Error returned on constructing an inverted [`Selection`]
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
#[error("selection {start}..{end} is inverted")]
pub struct SelectionError {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Construct a selection over `start..end`, failing if `start > end`
    pub fn try_new(start: usize, end: usize) -> Result<Self, SelectionError> {
        if start > end {
            return Err(SelectionError { start, end });
        }
        Ok(Selection::new(start, end))
    }

    /// Construct a selection over `start..end`
    ///
    /// The caller is trusted to supply `start <= end`; this is only checked on
    /// debug builds.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "inverted selection {start}..{end}");
        Selection {
            start: to_u32(start),
            end: to_u32(end),
        }
    }

    /// Construct a caret (empty selection) at `index`
    #[inline]
    pub fn caret(index: usize) -> Self {
        Selection::new(index, index)
    }

    #[inline]
    pub fn start(&self) -> usize {
        to_usize(self.start)
    }

    #[inline]
    pub fn end(&self) -> usize {
        to_usize(self.end)
    }

    /// True if this is a caret
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of selected bytes
    #[inline]
    pub fn len(&self) -> usize {
        to_usize(self.end - self.start)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSelection {
    start: usize,
    end: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSelection> for Selection {
    type Error = SelectionError;

    #[inline]
    fn try_from(raw: RawSelection) -> Result<Self, Self::Error> {
        Selection::try_new(raw.start, raw.end)
    }
}

impl From<std::ops::Range<usize>> for Selection {
    #[inline]
    fn from(range: std::ops::Range<usize>) -> Self {
        Selection::new(range.start, range.end)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn kind_groups_are_disjoint() {
        for kind in FormattingKind::ALL {
            assert_ne!(kind.is_block(), kind.is_inline(), "{kind:?}");
            if kind.is_heading() {
                assert!(kind.is_block());
            }
        }
        assert_eq!(FormattingKind::default(), FormattingKind::Body);
    }

    #[test]
    fn selection() {
        let sel = Selection::from(2..5);
        assert_eq!((sel.start(), sel.end(), sel.len()), (2, 5, 3));
        assert!(!sel.is_empty());
        assert!(Selection::caret(4).is_empty());
        assert_eq!(Selection::try_new(3, 3), Ok(Selection::caret(3)));
        assert_eq!(
            Selection::try_new(5, 2),
            Err(SelectionError { start: 5, end: 2 })
        );
    }
}
