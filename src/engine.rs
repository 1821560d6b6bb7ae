// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Range engine
//!
//! Stateless operations over a [`RangeCollection`]. Each takes the current
//! collection by reference and returns a replacement; none can fail. Ranges
//! which would become empty are dropped rather than reported.

use crate::conv::{offset_at_least, to_u32};
use crate::{FormatSet, FormattingKind, FormattingRange, RangeCollection, Selection};
use smallvec::SmallVec;

/// Adjust ranges for a text edit at `index` changing text length by `delta`
///
/// A positive `delta` is an insertion of `delta` bytes at `index`; a negative
/// `delta` is a deletion of `-delta` bytes starting at `index`.
///
/// -   Ranges ending at or before `index` are unchanged.
/// -   Ranges starting at or after `index` are shifted by `delta`, but never
///     to before `index`.
/// -   A range straddling `index` is split into the part before `index` and
///     the part after the edited span (shifted by `delta`). The latter is
///     dropped if consumed by a deletion.
///
/// Any resulting empty range is discarded.
pub fn reshape_for_edit(ranges: &RangeCollection, index: usize, delta: isize) -> RangeCollection {
    let index = to_u32(index);
    let after_start = offset_at_least(index, delta.max(0), index);

    ranges
        .iter()
        .flat_map(|range| {
            let mut parts = SmallVec::<[FormattingRange; 2]>::new();
            if range.end <= index {
                parts.push(*range);
            } else if range.start >= index {
                let start = offset_at_least(range.start, delta, index);
                let end = offset_at_least(range.end, delta, index);
                parts.extend(FormattingRange::span(start, end, range.kind));
            } else {
                parts.extend(FormattingRange::span(range.start, index, range.kind));
                let end = offset_at_least(range.end, delta, index);
                parts.extend(FormattingRange::span(after_start, end, range.kind));
            }
            parts
        })
        .collect()
}

/// Apply or toggle `kind` over a non-empty `selection`
///
/// Block kinds: every block range overlapping the selection is removed, then
/// a range of `kind` over the selection is added. `Body` instead removes only
/// overlapping heading ranges and adds nothing (absence of a block range
/// implies `Body`).
///
/// Inline kinds: if one range of `kind` covers the whole selection, the
/// selection is cut out of it (keeping any non-empty parts before and after).
/// Otherwise a range of `kind` over the selection is added, on top of any
/// partial coverage.
///
/// An empty `selection` returns the input unchanged.
pub fn apply_to_selection(
    ranges: &RangeCollection,
    selection: Selection,
    kind: FormattingKind,
) -> RangeCollection {
    let (start, end) = (selection.start, selection.end);
    if start >= end {
        return ranges.clone();
    }
    let added = FormattingRange { start, end, kind };

    if kind == FormattingKind::Body {
        return ranges
            .iter()
            .filter(|r| !(r.kind.is_heading() && r.overlaps(start, end)))
            .copied()
            .collect();
    } else if kind.is_block() {
        return ranges
            .iter()
            .filter(|r| !(r.kind.is_block() && r.overlaps(start, end)))
            .copied()
            .chain(std::iter::once(added))
            .collect();
    }

    let mut seq = ranges.seq.clone();
    match seq.iter().position(|r| r.kind == kind && r.covers(start, end)) {
        Some(i) => {
            let covering = seq.remove(i);
            seq.extend(FormattingRange::span(covering.start, start, kind));
            seq.extend(FormattingRange::span(end, covering.end, kind));
        }
        None => seq.push(added),
    }
    RangeCollection { seq }
}

/// Kinds active at the anchor (start) of `selection`
///
/// A range is active at index `i` if `start <= i < end`. If no block range is
/// active the block kind is `Body`; if several are, the one latest in the
/// collection wins.
pub fn current_formatting_at(ranges: &RangeCollection, selection: Selection) -> FormatSet {
    let anchor = selection.start;
    let mut set = FormatSet::default();
    for range in ranges.iter().filter(|r| r.contains(anchor)) {
        set.insert(range.kind);
    }
    set
}

/// Toggle `kind` within a pending set, for typing at a caret
///
/// A block kind replaces the pending block kind; an inline kind flips
/// membership.
#[inline]
pub fn toggle_for_typing(pending: FormatSet, kind: FormattingKind) -> FormatSet {
    let mut pending = pending;
    pending.toggle(kind);
    pending
}

#[cfg(test)]
mod test {
    use super::*;
    use FormattingKind::*;

    fn r(start: usize, end: usize, kind: FormattingKind) -> FormattingRange {
        FormattingRange::new(start, end, kind).unwrap()
    }

    fn coll(v: &[FormattingRange]) -> RangeCollection {
        RangeCollection::from(v.to_vec())
    }

    fn sorted(ranges: &RangeCollection) -> Vec<FormattingRange> {
        let mut v = ranges.as_slice().to_vec();
        v.sort_by_key(|r| (r.kind, r.start, r.end));
        v
    }

    fn assert_valid(ranges: &RangeCollection) {
        for range in ranges {
            assert!(range.start < range.end, "invalid range {range:?}");
        }
    }

    #[test]
    fn insertion_preserves_prefix_and_shifts_suffix() {
        let ranges = coll(&[r(0, 3, Bold), r(3, 5, Italic), r(8, 9, Underline)]);
        let out = reshape_for_edit(&ranges, 3, 4);
        assert_eq!(
            out.as_slice(),
            &[r(0, 3, Bold), r(7, 9, Italic), r(12, 13, Underline)]
        );
    }

    #[test]
    fn insertion_splits_straddling_range() {
        let ranges = coll(&[r(0, 5, Bold)]);
        let out = reshape_for_edit(&ranges, 3, 2);
        assert_eq!(out.as_slice(), &[r(0, 3, Bold), r(5, 7, Bold)]);
    }

    #[test]
    fn deletion_clamps_straddling_range() {
        let ranges = coll(&[r(5, 10, Bold)]);
        let out = reshape_for_edit(&ranges, 7, -3);
        assert_eq!(out.as_slice(), &[r(5, 7, Bold)]);
    }

    #[test]
    fn deletion_keeps_tail_of_straddling_range() {
        let ranges = coll(&[r(2, 10, Heading2)]);
        let out = reshape_for_edit(&ranges, 4, -2);
        assert_eq!(out.as_slice(), &[r(2, 4, Heading2), r(4, 8, Heading2)]);
    }

    #[test]
    fn deletion_shifts_following_range() {
        let ranges = coll(&[r(2, 6, Italic)]);
        let out = reshape_for_edit(&ranges, 1, -1);
        assert_eq!(out.as_slice(), &[r(1, 5, Italic)]);
    }

    #[test]
    fn deletion_drops_consumed_range() {
        let ranges = coll(&[r(3, 5, Bold), r(0, 2, Italic), r(4, 9, Underline)]);
        let out = reshape_for_edit(&ranges, 2, -4);
        assert_eq!(out.as_slice(), &[r(0, 2, Italic), r(2, 5, Underline)]);
        assert_valid(&out);
    }

    #[test]
    fn zero_delta_keeps_coverage() {
        let ranges = coll(&[r(0, 6, Bold)]);
        let out = reshape_for_edit(&ranges, 2, 0);
        assert_eq!(out.coalesced().as_slice(), &[r(0, 6, Bold)]);
    }

    #[test]
    fn heading_replaces_block_ranges() {
        let ranges = coll(&[r(0, 4, Body), r(4, 10, Heading1), r(2, 6, Bold)]);
        let out = apply_to_selection(&ranges, Selection::from(3..5), Heading2);
        assert_eq!(sorted(&out), vec![r(2, 6, Bold), r(3, 5, Heading2)]);
    }

    #[test]
    fn body_clears_headings_only() {
        let ranges = coll(&[r(0, 4, Body), r(4, 10, Heading3), r(12, 14, Heading1)]);
        let out = apply_to_selection(&ranges, Selection::from(3..5), Body);
        assert_eq!(out.as_slice(), &[r(0, 4, Body), r(12, 14, Heading1)]);
    }

    #[test]
    fn inline_toggle_adds_then_removes() {
        let ranges = coll(&[r(0, 11, Body)]);
        let sel = Selection::from(0..5);
        let once = apply_to_selection(&ranges, sel, Bold);
        assert_eq!(sorted(&once), vec![r(0, 11, Body), r(0, 5, Bold)]);
        let twice = apply_to_selection(&once, sel, Bold);
        assert_eq!(twice, ranges);
    }

    #[test]
    fn inline_toggle_cuts_covering_range() {
        let ranges = coll(&[r(0, 10, Italic)]);
        let out = apply_to_selection(&ranges, Selection::from(3..6), Italic);
        assert_eq!(out.as_slice(), &[r(0, 3, Italic), r(6, 10, Italic)]);

        let out = apply_to_selection(&ranges, Selection::from(0..10), Italic);
        assert!(out.is_empty());
    }

    #[test]
    fn inline_toggle_on_partial_coverage_adds() {
        let ranges = coll(&[r(0, 3, Underline)]);
        let sel = Selection::from(2..5);
        let once = apply_to_selection(&ranges, sel, Underline);
        assert_eq!(once.as_slice(), &[r(0, 3, Underline), r(2, 5, Underline)]);
        let twice = apply_to_selection(&once, sel, Underline);
        assert_eq!(twice, ranges);
    }

    #[test]
    fn caret_selection_is_noop() {
        let ranges = coll(&[r(0, 3, Bold)]);
        let out = apply_to_selection(&ranges, Selection::caret(1), Heading1);
        assert_eq!(out, ranges);
    }

    #[test]
    fn formatting_at_anchor() {
        let ranges = coll(&[r(0, 5, Heading1), r(2, 4, Bold), r(4, 8, Italic)]);
        let at = |i| current_formatting_at(&ranges, Selection::caret(i));

        assert_eq!(at(0).iter().collect::<Vec<_>>(), vec![Heading1]);
        assert_eq!(at(2).iter().collect::<Vec<_>>(), vec![Heading1, Bold]);
        assert_eq!(at(4).iter().collect::<Vec<_>>(), vec![Heading1, Italic]);
        assert_eq!(at(5).iter().collect::<Vec<_>>(), vec![Body, Italic]);
        assert_eq!(at(8), FormatSet::default());
    }

    #[test]
    fn formatting_at_prefers_latest_block() {
        let ranges = coll(&[r(0, 5, Heading1), r(0, 5, Body)]);
        let set = current_formatting_at(&ranges, Selection::from(1..3));
        assert_eq!(set.block(), Body);
    }

    #[test]
    fn typing_toggle_keeps_one_block() {
        let mut pending = FormatSet::default();
        for kind in [Bold, Heading1, Italic, Heading3, Bold, Body, Heading2] {
            pending = toggle_for_typing(pending, kind);
            assert_eq!(pending.iter().filter(|k| k.is_block()).count(), 1);
        }
        assert_eq!(
            pending.iter().collect::<Vec<_>>(),
            vec![Heading2, Italic]
        );
    }

    #[test]
    fn operations_never_yield_empty_ranges() {
        let ranges = coll(&[
            r(0, 2, Bold),
            r(1, 7, Heading1),
            r(3, 4, Italic),
            r(6, 12, Underline),
        ]);
        for index in 0..13 {
            for delta in -6..6 {
                assert_valid(&reshape_for_edit(&ranges, index, delta));
            }
        }
        for start in 0..12 {
            for end in start..12 {
                for kind in FormattingKind::ALL {
                    assert_valid(&apply_to_selection(&ranges, Selection::from(start..end), kind));
                }
            }
        }
    }
}
