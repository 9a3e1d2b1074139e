// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loop padding around the real slide list.
//!
//! The track shows the real slides with `buffer_count` copies of the tail in
//! front and `buffer_count` copies of the head behind:
//!
//! ```text
//! real:     a b c d e          (len 5, buffer_count 1)
//! buffered: e a b c d e a      (len 7)
//! ```
//!
//! Sliding onto a padding copy looks identical to sliding onto the real slide, so
//! the active index can be moved back into the real range without a visible jump.

use alloc::vec::Vec;

use crate::CarouselError;

/// Real slides plus loop padding, in track order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BufferedSlides<T> {
    slides: Vec<T>,
    real_len: usize,
    buffer_count: usize,
}

impl<T: Clone> BufferedSlides<T> {
    /// Builds the padded track for `real` with `buffer_count` copies on each end.
    ///
    /// Fails if `real` is empty or shorter than `buffer_count`.
    pub fn build(real: &[T], buffer_count: usize) -> Result<Self, CarouselError> {
        let len = real.len();
        if len == 0 {
            return Err(CarouselError::EmptySlides);
        }
        if buffer_count > len {
            return Err(CarouselError::BufferExceedsSlides { buffer_count, len });
        }

        let mut slides = Vec::with_capacity(len + 2 * buffer_count);
        slides.extend_from_slice(&real[len - buffer_count..]);
        slides.extend_from_slice(real);
        slides.extend_from_slice(&real[..buffer_count]);

        Ok(Self {
            slides,
            real_len: len,
            buffer_count,
        })
    }
}

impl<T> BufferedSlides<T> {
    /// Returns the padded track.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.slides
    }

    /// Number of slides on the padded track (`real_len + 2 * buffer_count`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Returns `true` if the track has no slides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Number of real slides.
    #[must_use]
    pub const fn real_len(&self) -> usize {
        self.real_len
    }

    /// Number of padding slides on each end.
    #[must_use]
    pub const fn buffer_count(&self) -> usize {
        self.buffer_count
    }

    /// Maps a track index to the real slide it shows.
    ///
    /// Returns `None` for indices past the end of the track.
    #[must_use]
    pub fn real_index(&self, buffered: usize) -> Option<usize> {
        (buffered < self.slides.len())
            .then(|| (buffered + self.real_len - self.buffer_count) % self.real_len)
    }

    /// Track index of the real copy of slide `real`.
    #[must_use]
    pub const fn buffered_index(&self, real: usize) -> usize {
        real + self.buffer_count
    }
}
