// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Presentation styles for formatting kinds

use crate::FormattingKind;

/// Font size class
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontSizeScale {
    #[default]
    Normal,
    H3,
    H2,
    H1,
}

impl FontSizeScale {
    /// Size relative to body text
    pub fn rel_size(self) -> f32 {
        // CSS sizes: https://www.w3.org/TR/2018/REC-css-fonts-3-20180920/#font-size-prop
        match self {
            FontSizeScale::Normal => 1.0,
            FontSizeScale::H3 => 6.0 / 5.0,
            FontSizeScale::H2 => 3.0 / 2.0,
            FontSizeScale::H1 => 2.0 / 1.0,
        }
    }
}

/// Visual attributes of a span of text
///
/// The default value is plain body text.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleDescriptor {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub size: FontSizeScale,
}

impl StyleDescriptor {
    /// True if no attribute differs from body text
    #[inline]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Compose with another style applying to the same text
    ///
    /// Flags are combined; the larger font size wins.
    pub fn merge(self, other: StyleDescriptor) -> StyleDescriptor {
        StyleDescriptor {
            bold: self.bold || other.bold,
            italic: self.italic || other.italic,
            underline: self.underline || other.underline,
            size: self.size.max(other.size),
        }
    }
}

/// Maps formatting kinds to presentation styles
///
/// This is implemented for any `Fn(FormattingKind) -> StyleDescriptor`.
pub trait StyleResolver {
    /// Get the style for `kind`
    fn style(&self, kind: FormattingKind) -> StyleDescriptor;
}

impl<F: Fn(FormattingKind) -> StyleDescriptor> StyleResolver for F {
    #[inline]
    fn style(&self, kind: FormattingKind) -> StyleDescriptor {
        self(kind)
    }
}

/// Default styles
///
/// Each kind other than `Body` sets exactly one attribute.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DefaultStyles;

impl StyleResolver for DefaultStyles {
    fn style(&self, kind: FormattingKind) -> StyleDescriptor {
        let mut style = StyleDescriptor::default();
        match kind {
            FormattingKind::Body => (),
            FormattingKind::Bold => style.bold = true,
            FormattingKind::Italic => style.italic = true,
            FormattingKind::Underline => style.underline = true,
            FormattingKind::Heading1 => style.size = FontSizeScale::H1,
            FormattingKind::Heading2 => style.size = FontSizeScale::H2,
            FormattingKind::Heading3 => style.size = FontSizeScale::H3,
        }
        style
    }
}
