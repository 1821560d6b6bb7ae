// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! KAS Rich-Edit library
//!
//! This library maintains formatting ranges over a plain-text buffer while the
//! text is edited, and computes the formatting applied to newly typed text.
//!
//! -   [`engine`] provides stateless operations on a [`RangeCollection`]
//! -   [`SessionState`] is an editor session driven by text-change and
//!     formatting-command events; [`Editor`] hosts a session
//! -   [`compose`] resolves text and ranges into [`StyledText`] via a
//!     [`StyleResolver`]
//!
//! All text offsets are byte offsets (UTF-8 code units).
//!
//! ```
//! # use kas_rich_edit::{Editor, FormattingKind, Selection, SessionConfig};
//! let mut editor = Editor::new(SessionConfig::default());
//! editor.on_text_changed("Hello World", Selection::caret(11));
//! editor.on_text_changed("Hello World", Selection::from(0..5));
//! editor.on_format_command(FormattingKind::Bold);
//! assert!(editor.pending_formatting().contains(FormattingKind::Bold));
//! ```

#![cfg_attr(doc_cfg, feature(doc_cfg))]

pub mod conv;

mod data;
pub use data::*;

mod range;
pub use range::*;

mod format_set;
pub use format_set::*;

pub mod engine;

mod style;
pub use style::*;

mod render;
pub use render::{compose, Pieces, StyledRun, StyledText};

mod session;
pub use session::*;
