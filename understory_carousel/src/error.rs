// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by fallible carousel constructors.

/// Errors produced while building a carousel or validating its configuration.
///
/// The reducer itself never fails; these only surface from constructors and
/// [`CarouselConfig::validate`](crate::CarouselConfig::validate).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CarouselError {
    /// The content list has no slides.
    #[error("a carousel needs at least one slide")]
    EmptySlides,
    /// More padding slides were requested than there are real slides.
    #[error("buffer count {buffer_count} exceeds the {len} real slides")]
    BufferExceedsSlides {
        /// Requested padding on each end.
        buffer_count: usize,
        /// Number of real slides.
        len: usize,
    },
    /// Breakpoint `max_width` values are not strictly ascending.
    #[error("breakpoints must be strictly ascending by max width")]
    UnorderedBreakpoints,
    /// A breakpoint asks for zero padding slides.
    #[error("breakpoint buffer count must be at least 1")]
    ZeroBufferCount,
    /// The drag threshold divisor is zero, negative, or not finite.
    #[error("threshold divisor must be finite and positive, got {0}")]
    InvalidThresholdDivisor(f64),
}
