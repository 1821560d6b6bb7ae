// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Sets of active formatting kinds

use crate::FormattingKind;
use thiserror::Error;

bitflags::bitflags! {
    /// Inline formatting flags
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct InlineFlags: u8 {
        const BOLD = 1 << 0;
        const ITALIC = 1 << 1;
        const UNDERLINE = 1 << 2;
    }
}

impl InlineFlags {
    /// Flag corresponding to an inline `kind`
    ///
    /// Returns `None` for block kinds.
    pub fn from_kind(kind: FormattingKind) -> Option<Self> {
        Some(match kind {
            FormattingKind::Bold => InlineFlags::BOLD,
            FormattingKind::Italic => InlineFlags::ITALIC,
            FormattingKind::Underline => InlineFlags::UNDERLINE,
            _ => return None,
        })
    }
}

/// Error returned if a list of kinds does not form a valid [`FormatSet`]
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatSetError {
    #[error("no block kind given")]
    NoBlockKind,
    #[error("block kinds {0:?} and {1:?} are mutually exclusive")]
    MultipleBlockKinds(FormattingKind, FormattingKind),
}

/// A set of formatting kinds with exactly one block kind
///
/// This is the set of kinds active at some position, or pending for text
/// typed next. It always contains exactly one block kind (by default,
/// [`FormattingKind::Body`]) plus zero or more inline kinds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawFormatSet"))]
pub struct FormatSet {
    block: FormattingKind,
    inline: InlineFlags,
}

impl FormatSet {
    /// Construct with the given block kind and no inline kinds
    ///
    /// Inline `kind` values are replaced with `Body`.
    #[inline]
    pub fn new(block: FormattingKind) -> Self {
        let block = if block.is_block() {
            block
        } else {
            FormattingKind::Body
        };
        FormatSet {
            block,
            inline: InlineFlags::empty(),
        }
    }

    /// The block kind
    #[inline]
    pub fn block(&self) -> FormattingKind {
        self.block
    }

    /// The inline kinds
    #[inline]
    pub fn inline(&self) -> InlineFlags {
        self.inline
    }

    /// True if `kind` is a member of this set
    pub fn contains(&self, kind: FormattingKind) -> bool {
        match InlineFlags::from_kind(kind) {
            Some(flag) => self.inline.contains(flag),
            None => self.block == kind,
        }
    }

    /// Add `kind`
    ///
    /// A block kind replaces the current block kind.
    pub fn insert(&mut self, kind: FormattingKind) {
        match InlineFlags::from_kind(kind) {
            Some(flag) => self.inline.insert(flag),
            None => self.block = kind,
        }
    }

    /// Toggle `kind` for typing at a caret
    ///
    /// A block kind replaces the current block kind; an inline kind flips
    /// membership.
    pub fn toggle(&mut self, kind: FormattingKind) {
        match InlineFlags::from_kind(kind) {
            Some(flag) => self.inline.toggle(flag),
            None => self.block = kind,
        }
    }

    /// Number of kinds in the set (including the block kind)
    #[inline]
    pub fn len(&self) -> usize {
        1 + self.inline.bits().count_ones() as usize
    }

    /// Iterate over member kinds
    ///
    /// The block kind is yielded first, followed by inline kinds in
    /// declaration order.
    pub fn iter(&self) -> impl Iterator<Item = FormattingKind> + '_ {
        std::iter::once(self.block).chain(
            FormattingKind::ALL
                .into_iter()
                .filter(|kind| kind.is_inline() && self.contains(*kind)),
        )
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawFormatSet {
    block: FormattingKind,
    inline: InlineFlags,
}

#[cfg(feature = "serde")]
impl TryFrom<RawFormatSet> for FormatSet {
    type Error = FormatSetError;

    fn try_from(raw: RawFormatSet) -> Result<Self, Self::Error> {
        if !raw.block.is_block() {
            return Err(FormatSetError::NoBlockKind);
        }
        Ok(FormatSet {
            block: raw.block,
            inline: raw.inline,
        })
    }
}

impl From<FormattingKind> for FormatSet {
    fn from(kind: FormattingKind) -> Self {
        let mut set = FormatSet::default();
        set.insert(kind);
        set
    }
}

impl TryFrom<&[FormattingKind]> for FormatSet {
    type Error = FormatSetError;

    fn try_from(kinds: &[FormattingKind]) -> Result<Self, Self::Error> {
        let mut block = None;
        let mut inline = InlineFlags::empty();
        for kind in kinds.iter().copied() {
            if let Some(flag) = InlineFlags::from_kind(kind) {
                inline.insert(flag);
                continue;
            }
            match block {
                None => block = Some(kind),
                Some(prev) if prev == kind => (),
                Some(prev) => return Err(FormatSetError::MultipleBlockKinds(prev, kind)),
            }
        }
        let block = block.ok_or(FormatSetError::NoBlockKind)?;
        Ok(FormatSet { block, inline })
    }
}
