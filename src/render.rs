// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Composition of text and ranges into styled runs

use crate::conv::{to_u32, to_usize};
use crate::{RangeCollection, StyleDescriptor, StyleResolver};
use std::iter::FusedIterator;

/// A run of text with uniform style
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StyledRun {
    start: u32,
    end: u32,
    /// Style of the run
    pub style: StyleDescriptor,
}

impl StyledRun {
    #[inline]
    pub fn start(&self) -> usize {
        to_usize(self.start)
    }

    #[inline]
    pub fn end(&self) -> usize {
        to_usize(self.end)
    }

    /// The span as a `Range`
    #[inline]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start()..self.end()
    }
}

/// Text with resolved styles
///
/// Runs are contiguous, non-empty and cover the whole text in order. Empty
/// text has no runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyledText {
    text: String,
    runs: Vec<StyledRun>,
}

impl StyledText {
    /// Read contiguous unformatted text
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Access runs as a slice
    #[inline]
    pub fn runs(&self) -> &[StyledRun] {
        &self.runs
    }

    /// Iterate over `(text, style)` pieces
    pub fn pieces(&self) -> Pieces<'_> {
        Pieces {
            text: &self.text,
            runs: self.runs.iter(),
        }
    }

    /// Style at byte `index`
    ///
    /// Returns `None` if `index` is not less than the text length.
    pub fn style_at(&self, index: usize) -> Option<StyleDescriptor> {
        let index = to_u32(index);
        let i = self.runs.partition_point(|run| run.end <= index);
        self.runs
            .get(i)
            .filter(|run| run.start <= index)
            .map(|run| run.style)
    }
}

/// Iterator over `(text, style)` pieces of a [`StyledText`]
pub struct Pieces<'a> {
    text: &'a str,
    runs: std::slice::Iter<'a, StyledRun>,
}

impl<'a> Iterator for Pieces<'a> {
    type Item = (&'a str, StyleDescriptor);

    fn next(&mut self) -> Option<Self::Item> {
        let run = self.runs.next()?;
        let slice = self.text.get(run.range()).unwrap_or_default();
        Some((slice, run.style))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.runs.size_hint()
    }
}

impl<'a> ExactSizeIterator for Pieces<'a> {}
impl<'a> FusedIterator for Pieces<'a> {}

/// Compose `text` with `ranges` using `resolver`
///
/// Ranges which are empty or extend beyond the end of `text` are skipped
/// silently; composition never fails.
pub fn compose<R: StyleResolver + ?Sized>(
    text: &str,
    ranges: &RangeCollection,
    resolver: &R,
) -> StyledText {
    let len = to_u32(text.len());
    let valid: Vec<_> = ranges
        .iter()
        .filter(|r| {
            let ok = r.start < r.end
                && r.start < len
                && r.end <= len
                && text.is_char_boundary(to_usize(r.start))
                && text.is_char_boundary(to_usize(r.end));
            if !ok {
                log::debug!("compose: skipping {r:?} (text length {len})");
            }
            ok
        })
        .map(|r| (r.start, r.end, resolver.style(r.kind)))
        .collect();

    let mut bounds: Vec<u32> = Vec::with_capacity(2 * valid.len() + 2);
    bounds.push(0);
    bounds.push(len);
    for (start, end, _) in &valid {
        bounds.push(*start);
        bounds.push(*end);
    }
    bounds.sort_unstable();
    bounds.dedup();

    let mut runs: Vec<StyledRun> = Vec::with_capacity(bounds.len());
    for w in bounds.windows(2) {
        let (start, end) = (w[0], w[1]);
        let style = valid
            .iter()
            .filter(|(s, e, _)| *s <= start && end <= *e)
            .fold(StyleDescriptor::default(), |acc, (_, _, style)| {
                acc.merge(*style)
            });
        match runs.last_mut() {
            Some(last) if last.style == style => last.end = end,
            _ => runs.push(StyledRun { start, end, style }),
        }
    }

    StyledText {
        text: text.to_string(),
        runs,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{DefaultStyles, FontSizeScale, FormattingKind::*, FormattingRange};

    fn r(start: usize, end: usize, kind: crate::FormattingKind) -> FormattingRange {
        FormattingRange::new(start, end, kind).unwrap()
    }

    #[test]
    fn empty_text() {
        let styled = compose("", &RangeCollection::new(), &DefaultStyles);
        assert!(styled.runs().is_empty());
        assert_eq!(styled.style_at(0), None);
    }

    #[test]
    fn plain_text_is_one_run() {
        let ranges = RangeCollection::from(vec![r(0, 5, Body)]);
        let styled = compose("Hello", &ranges, &DefaultStyles);
        assert_eq!(styled.runs().len(), 1);
        assert_eq!(styled.runs()[0].range(), 0..5);
        assert!(styled.runs()[0].style.is_default());
    }

    #[test]
    fn overlapping_styles_split_runs() {
        let ranges = RangeCollection::from(vec![r(0, 5, Heading1), r(3, 8, Bold)]);
        let styled = compose("Title body", &ranges, &DefaultStyles);
        let pieces: Vec<_> = styled
            .pieces()
            .map(|(s, st)| (s, st.bold, st.size))
            .collect();
        assert_eq!(
            pieces,
            vec![
                ("Tit", false, FontSizeScale::H1),
                ("le", true, FontSizeScale::H1),
                (" bo", true, FontSizeScale::Normal),
                ("dy", false, FontSizeScale::Normal),
            ]
        );
        assert!(styled.style_at(3).unwrap().bold);
        assert!(!styled.style_at(9).unwrap().bold);
        assert_eq!(styled.style_at(10), None);
    }

    #[test]
    fn out_of_bounds_ranges_skipped() {
        let ranges = RangeCollection::from(vec![
            r(2, 9, Italic),
            r(5, 6, Underline),
            r(0, 1, Bold),
        ]);
        let styled = compose("abc", &ranges, &DefaultStyles);
        assert_eq!(styled.runs().len(), 2);
        assert!(styled.style_at(0).unwrap().bold);
        assert!(styled.style_at(2).unwrap().is_default());
    }

    #[test]
    fn ranges_inside_char_skipped() {
        // "é" occupies bytes 1..3
        let text = "a\u{e9}b";
        let ranges = RangeCollection::from(vec![
            r(0, 2, Body),
            r(2, 4, Body),
            r(2, 4, Bold),
            r(3, 4, Italic),
        ]);
        let styled = compose(text, &ranges, &DefaultStyles);
        let joined: String = styled.pieces().map(|(s, _)| s).collect();
        assert_eq!(joined, text);
        assert!(styled.style_at(0).unwrap().is_default());
        assert!(styled.style_at(3).unwrap().italic);
        assert!(!styled.style_at(3).unwrap().bold);
    }
}
