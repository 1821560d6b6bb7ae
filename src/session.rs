// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Editor session
//!
//! A [`SessionState`] is an immutable value; each event produces a new state
//! via [`SessionState::apply`]. The [`Editor`] type owns the one mutable slot
//! and exposes the command surface used by a UI layer.

use crate::conv::to_u32;
use crate::engine::{apply_to_selection, current_formatting_at, reshape_for_edit, toggle_for_typing};
use crate::render::{compose, StyledText};
use crate::{FormatSet, FormattingKind, FormattingRange, RangeCollection, Selection, StyleResolver};

/// Session configuration
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Treat the first line as a title
    ///
    /// If true, the session starts with pending formatting `Heading1` and the
    /// first line break typed always returns to `Body`.
    pub title_line: bool,
}

/// An input event
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// The text widget reports new contents and selection
    TextChanged { text: String, selection: Selection },
    /// The user requested a formatting command
    Format(FormattingKind),
}

/// State of an editor session
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    text: String,
    selection: Selection,
    ranges: RangeCollection,
    pending: FormatSet,
    first_line: bool,
}

impl SessionState {
    /// Construct an empty session
    pub fn new(config: &SessionConfig) -> Self {
        let pending = if config.title_line {
            FormatSet::new(FormattingKind::Heading1)
        } else {
            FormatSet::default()
        };
        SessionState {
            pending,
            first_line: config.title_line,
            ..Default::default()
        }
    }

    /// Replace contents, placing the caret at the end
    ///
    /// Pending formatting is not changed.
    pub fn with_content(self, text: impl Into<String>, ranges: RangeCollection) -> Self {
        let text = text.into();
        let selection = Selection::caret(text.len());
        SessionState {
            text,
            selection,
            ranges,
            ..self
        }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    #[inline]
    pub fn ranges(&self) -> &RangeCollection {
        &self.ranges
    }

    /// Formatting to be applied to text typed next
    #[inline]
    pub fn pending_formatting(&self) -> FormatSet {
        self.pending
    }

    /// True while no line break has been typed in a title session
    #[inline]
    pub fn is_first_line(&self) -> bool {
        self.first_line
    }

    /// Produce the state following `event`
    pub fn apply(&self, event: Event) -> SessionState {
        match event {
            Event::TextChanged { text, selection } => self.on_text_changed(text, selection),
            Event::Format(kind) => self.on_format_command(kind),
        }
    }

    /// Handle a change of text and/or selection
    ///
    /// If the text grew, the new text is assumed to be appended at the old
    /// end of text and receives one range per pending kind. If it shrank, the
    /// deletion is assumed to start at the lesser of the old and new
    /// selection starts: for a deleted selection or forward delete this is
    /// the old selection start, while for backspace the deleted text lies
    /// before the old caret and the new caret marks its start.
    pub fn on_text_changed(&self, text: impl Into<String>, selection: Selection) -> SessionState {
        let text = text.into();
        let old_len = self.text.len();
        let new_len = text.len();
        debug_assert!(selection.end() <= new_len, "selection beyond end of text");

        let mut pending = self.pending;
        let mut first_line = self.first_line;

        let ranges = if new_len > old_len {
            let added = new_len - old_len;
            let mut ranges = reshape_for_edit(&self.ranges, old_len, added as isize);
            let (start, end) = (to_u32(old_len), to_u32(new_len));
            ranges
                .seq
                .extend(pending.iter().filter_map(|kind| FormattingRange::span(start, end, kind)));

            if added == 1 && text.as_bytes().get(old_len) == Some(&b'\n') {
                let after_heading = old_len > 0
                    && FormattingKind::ALL
                        .into_iter()
                        .filter(|kind| kind.is_heading())
                        .any(|kind| self.ranges.has_kind_at(kind, old_len - 1));
                if first_line || after_heading {
                    log::debug!("line break at {old_len}: returning to body text");
                    first_line = false;
                    pending = FormatSet::default();
                }
            }
            ranges
        } else if new_len < old_len {
            let index = self.selection.start().min(selection.start());
            let removed = old_len - new_len;
            reshape_for_edit(&self.ranges, index, -(removed as isize))
        } else {
            self.ranges.clone()
        };

        if !selection.is_empty() {
            pending = current_formatting_at(&ranges, selection);
        }

        log::trace!(
            "text changed: {old_len} → {new_len} bytes, {} ranges, pending {pending:?}",
            ranges.len()
        );
        SessionState {
            text,
            selection,
            ranges,
            pending,
            first_line,
        }
    }

    /// Handle a formatting command
    ///
    /// With a selection, `kind` is applied to the selected text; at a caret,
    /// only pending formatting is toggled.
    pub fn on_format_command(&self, kind: FormattingKind) -> SessionState {
        let (ranges, pending) = if !self.selection.is_empty() {
            let ranges = apply_to_selection(&self.ranges, self.selection, kind);
            let pending = current_formatting_at(&ranges, self.selection);
            (ranges, pending)
        } else {
            (self.ranges.clone(), toggle_for_typing(self.pending, kind))
        };

        log::trace!("format {kind:?}: pending {pending:?}");
        SessionState {
            ranges,
            pending,
            ..self.clone()
        }
    }

    /// Compose text and ranges for display
    pub fn render<R: StyleResolver + ?Sized>(&self, resolver: &R) -> StyledText {
        compose(&self.text, &self.ranges, resolver)
    }
}

/// Host of a session
///
/// Owns the current [`SessionState`], replacing it on each event.
#[derive(Clone, Debug, Default)]
pub struct Editor {
    state: SessionState,
}

impl Editor {
    /// Construct with an empty session
    pub fn new(config: SessionConfig) -> Self {
        Editor {
            state: SessionState::new(&config),
        }
    }

    /// Construct from an existing state
    pub fn from_state(state: SessionState) -> Self {
        Editor { state }
    }

    /// Snapshot of the current state
    #[inline]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Handle an event
    pub fn handle(&mut self, event: Event) {
        self.state = self.state.apply(event);
    }

    /// Handle a change of text and/or selection
    pub fn on_text_changed(&mut self, text: impl Into<String>, selection: Selection) {
        self.state = self.state.on_text_changed(text, selection);
    }

    /// Handle a formatting command
    pub fn on_format_command(&mut self, kind: FormattingKind) {
        self.state = self.state.on_format_command(kind);
    }

    /// Formatting to be applied to text typed next
    ///
    /// Use this to highlight toolbar buttons.
    #[inline]
    pub fn pending_formatting(&self) -> FormatSet {
        self.state.pending
    }

    /// Compose text and ranges for display
    pub fn render<R: StyleResolver + ?Sized>(&self, resolver: &R) -> StyledText {
        self.state.render(resolver)
    }
}
