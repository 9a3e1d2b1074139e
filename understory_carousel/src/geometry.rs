// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Responsive slide geometry and the centering offset.
//!
//! [`Breakpoints`] maps a viewport width to a [`Geometry`]: how wide one slide is
//! and how many padding slides the loop needs on each end. [`center`] turns a slide
//! index into the track offset that puts that slide in the middle of the viewport.
//!
//! ```
//! use understory_carousel::{Breakpoints, center};
//!
//! let geometry = Breakpoints::default().resolve(1200.0);
//! assert_eq!(geometry.slide_width, 450.0);
//! assert_eq!(geometry.buffer_count, 3);
//!
//! // Slide 3 centered in a 1200px viewport.
//! assert_eq!(center(3, 450.0, 1200.0), -(3.0 * 450.0 - 600.0 + 225.0));
//! ```

use smallvec::SmallVec;

use crate::CarouselError;

/// How wide a slide is for a given breakpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SlideWidth {
    /// One slide spans the whole viewport.
    FillViewport,
    /// A fixed width in logical pixels.
    Fixed(f64),
}

impl SlideWidth {
    /// Resolves this rule against a concrete viewport width.
    #[must_use]
    pub const fn resolve(self, window_width: f64) -> f64 {
        match self {
            Self::FillViewport => window_width,
            Self::Fixed(width) => width,
        }
    }
}

/// Slide width and loop padding chosen for a range of viewport widths.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    /// Width of each slide.
    pub slide_width: SlideWidth,
    /// Number of duplicate slides placed on each end of the track.
    pub buffer_count: usize,
}

/// A layout that applies to viewports narrower than `below`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Breakpoint {
    /// Exclusive upper bound on the viewport width.
    pub below: f64,
    /// Layout used when the viewport is narrower than `below`.
    pub layout: Layout,
}

/// Concrete geometry for one viewport width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Viewport width this geometry was resolved for.
    pub window_width: f64,
    /// Width of each slide.
    pub slide_width: f64,
    /// Number of duplicate slides placed on each end of the track.
    pub buffer_count: usize,
}

impl Geometry {
    /// Returns a copy whose `buffer_count` is at most `len`.
    ///
    /// The loop buffer can only duplicate slides that exist.
    #[must_use]
    pub fn with_buffer_limit(self, len: usize) -> Self {
        Self {
            buffer_count: self.buffer_count.min(len),
            ..self
        }
    }
}

/// Ordered breakpoint table; the first matching rule wins.
#[derive(Clone, Debug, PartialEq)]
pub struct Breakpoints {
    rules: SmallVec<[Breakpoint; 4]>,
    fallback: Layout,
}

impl Breakpoints {
    /// Creates a table with no rules; every width resolves to `fallback`.
    #[must_use]
    pub fn new(fallback: Layout) -> Self {
        Self {
            rules: SmallVec::new(),
            fallback,
        }
    }

    /// Appends a rule for viewports narrower than `below`.
    ///
    /// Rules are checked in insertion order, so they should be added in
    /// ascending `below` order. [`Breakpoints::validate`] checks this.
    #[must_use]
    pub fn with_rule(mut self, below: f64, layout: Layout) -> Self {
        self.rules.push(Breakpoint { below, layout });
        self
    }

    /// Returns the rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[Breakpoint] {
        &self.rules
    }

    /// Returns the layout used when no rule matches.
    #[must_use]
    pub const fn fallback(&self) -> Layout {
        self.fallback
    }

    /// Checks that rules ascend strictly and that every layout keeps some padding.
    pub fn validate(&self) -> Result<(), CarouselError> {
        if self
            .rules
            .iter()
            .map(|rule| rule.layout)
            .chain(core::iter::once(self.fallback))
            .any(|layout| layout.buffer_count == 0)
        {
            return Err(CarouselError::ZeroBufferCount);
        }
        if self
            .rules
            .windows(2)
            .any(|pair| pair[0].below >= pair[1].below)
        {
            return Err(CarouselError::UnorderedBreakpoints);
        }
        Ok(())
    }

    /// Resolves the geometry for a viewport `window_width` pixels wide.
    #[must_use]
    pub fn resolve(&self, window_width: f64) -> Geometry {
        let layout = self
            .rules
            .iter()
            .find(|rule| window_width < rule.below)
            .map_or(self.fallback, |rule| rule.layout);
        Geometry {
            window_width,
            slide_width: layout.slide_width.resolve(window_width),
            buffer_count: layout.buffer_count,
        }
    }
}

impl Default for Breakpoints {
    /// Phones and small tablets show one full-width slide; wider screens show
    /// fixed-width slides with three padding slides on each end.
    fn default() -> Self {
        Self::new(Layout {
            slide_width: SlideWidth::Fixed(650.0),
            buffer_count: 3,
        })
        .with_rule(
            1025.0,
            Layout {
                slide_width: SlideWidth::FillViewport,
                buffer_count: 1,
            },
        )
        .with_rule(
            1367.0,
            Layout {
                slide_width: SlideWidth::Fixed(450.0),
                buffer_count: 3,
            },
        )
    }
}

/// Track offset that centers slide `index` in a viewport `window_width` wide.
///
/// Negative values move the track left.
#[must_use]
pub fn center(index: usize, slide_width: f64, window_width: f64) -> f64 {
    -(index as f64 * slide_width - window_width / 2.0 + slide_width / 2.0)
}
