// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Type conversion utilities
//!
//! Text offsets are stored as `u32` instead of `usize` by this library in
//! order to save space (edited documents are not expected to scale anywhere
//! close to `u32::MAX` bytes of text). Edit deltas are signed (`isize`).

use easy_cast::Cast;

/// Convert `usize` → `u32`
///
/// This is a "safer" wrapper around `as` ensuring (on debug builds) that the
/// input value may be represented correctly by `u32`.
#[inline]
pub fn to_u32(x: usize) -> u32 {
    x.cast()
}

/// Convert `u32` → `usize`
///
/// This is a "safer" wrapper around `as` ensuring that the operation is
/// zero-extension.
#[inline]
pub fn to_usize(x: u32) -> usize {
    x.cast()
}

/// Offset `x` by a signed `delta`, clamping the result to `min..=u32::MAX`
#[inline]
pub fn offset_at_least(x: u32, delta: isize, min: u32) -> u32 {
    let value = i64::from(x) + delta as i64;
    value.clamp(i64::from(min), i64::from(u32::MAX)) as u32
}
