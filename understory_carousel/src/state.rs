// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The carousel reducer.
//!
//! [`CarouselState`] is a small `Copy` record. Every change goes through
//! [`CarouselState::apply`], which takes an [`Event`] and returns the next state
//! without touching anything else, so the whole navigation model can be tested
//! without a renderer or a clock.
//!
//! ```
//! use understory_carousel::{Breakpoints, CarouselState, Event};
//!
//! let geometry = Breakpoints::default().resolve(1000.0);
//! let state = CarouselState::default()
//!     .apply(Event::resize(geometry))
//!     .apply(Event::SetSliderCount(7))
//!     .apply(Event::DragStart(100.0))
//!     .apply(Event::DragAction(250.0))
//!     .apply(Event::DragEnd);
//!
//! // Dragged right past the threshold: the previous slide becomes active.
//! assert_eq!(state.slide_nr(), 0);
//! assert!(state.is_transitioning());
//! ```

use crate::{Geometry, center};

/// Divisor used by [`Event::resize`] to derive the drag threshold.
pub const DEFAULT_THRESHOLD_DIVISOR: f64 = 10.0;

/// Whether the next offset change should be animated by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StyleModifier {
    /// Jump straight to the new offset.
    #[default]
    None,
    /// Animate towards the new offset.
    Transitioning,
}

/// Pointer positions of the gesture in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drag {
    /// Pointer X when the gesture started.
    pub client_x_start: f64,
    /// Latest pointer X.
    pub client_x: f64,
}

impl Drag {
    /// Horizontal distance travelled; positive when moving right.
    #[must_use]
    pub fn delta(&self) -> f64 {
        self.client_x - self.client_x_start
    }
}

/// Input to the reducer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// New viewport geometry. Resets the active slide to the first real slide.
    SetSliderWidth {
        /// Resolved geometry.
        geometry: Geometry,
        /// Minimum drag distance that commits to a slide change.
        threshold: f64,
    },
    /// Length of the padded track changed.
    SetSliderCount(usize),
    /// Move to a slide without animation. Used for wrap correction.
    UpdateSlideNr(usize),
    /// Move to a slide with animation.
    ShiftSlide(usize),
    /// Pointer pressed at the given X.
    DragStart(f64),
    /// Pointer moved to the given X.
    DragAction(f64),
    /// Pointer released.
    DragEnd,
}

impl Event {
    /// [`Event::SetSliderWidth`] with the threshold at `window_width / threshold_divisor`.
    #[must_use]
    pub fn resize_with(geometry: Geometry, threshold_divisor: f64) -> Self {
        Self::SetSliderWidth {
            geometry,
            threshold: geometry.window_width / threshold_divisor,
        }
    }

    /// [`Event::resize_with`] using [`DEFAULT_THRESHOLD_DIVISOR`].
    #[must_use]
    pub fn resize(geometry: Geometry) -> Self {
        Self::resize_with(geometry, DEFAULT_THRESHOLD_DIVISOR)
    }
}

/// Navigation and layout state of one carousel.
///
/// Indices are positions on the padded track, not in the real slide list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarouselState {
    buffer_count: usize,
    window_width: f64,
    slide_width: f64,
    translate_x: f64,
    slide_nr: usize,
    slide_count: usize,
    style: StyleModifier,
    drag: Option<Drag>,
    threshold: f64,
}

impl Default for CarouselState {
    fn default() -> Self {
        Self {
            buffer_count: 1,
            window_width: 0.0,
            slide_width: 0.0,
            translate_x: 0.0,
            slide_nr: 1,
            slide_count: 0,
            style: StyleModifier::None,
            drag: None,
            threshold: 0.0,
        }
    }
}

impl CarouselState {
    /// Number of padding slides on each end of the track.
    #[must_use]
    pub const fn buffer_count(&self) -> usize {
        self.buffer_count
    }

    /// Last observed viewport width.
    #[must_use]
    pub const fn window_width(&self) -> f64 {
        self.window_width
    }

    /// Width of one slide.
    #[must_use]
    pub const fn slide_width(&self) -> f64 {
        self.slide_width
    }

    /// Horizontal offset applied to the track.
    #[must_use]
    pub const fn translate_x(&self) -> f64 {
        self.translate_x
    }

    /// Active track index.
    #[must_use]
    pub const fn slide_nr(&self) -> usize {
        self.slide_nr
    }

    /// Length of the padded track.
    #[must_use]
    pub const fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Whether the current offset change should animate.
    #[must_use]
    pub const fn style(&self) -> StyleModifier {
        self.style
    }

    /// Shorthand for `style() == StyleModifier::Transitioning`.
    #[must_use]
    pub const fn is_transitioning(&self) -> bool {
        matches!(self.style, StyleModifier::Transitioning)
    }

    /// The gesture in progress, if any.
    #[must_use]
    pub const fn drag(&self) -> Option<Drag> {
        self.drag
    }

    /// Minimum drag distance that commits to a slide change.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Width of the whole padded track.
    #[must_use]
    pub fn track_width(&self) -> f64 {
        self.slide_count as f64 * self.slide_width
    }

    /// Offset that centers `slide_nr` with the current geometry.
    #[must_use]
    pub fn centered(&self, slide_nr: usize) -> f64 {
        center(slide_nr, self.slide_width, self.window_width)
    }

    /// Returns the state after `event`.
    #[must_use]
    pub fn apply(self, event: Event) -> Self {
        match event {
            Event::SetSliderWidth {
                geometry,
                threshold,
            } => {
                let slide_nr = geometry.buffer_count;
                Self {
                    slide_width: geometry.slide_width,
                    window_width: geometry.window_width,
                    buffer_count: geometry.buffer_count,
                    threshold,
                    slide_nr,
                    translate_x: center(slide_nr, geometry.slide_width, geometry.window_width),
                    ..self
                }
            }
            Event::SetSliderCount(slide_count) => Self {
                slide_count,
                ..self
            },
            Event::UpdateSlideNr(slide_nr) => Self {
                slide_nr,
                style: StyleModifier::None,
                translate_x: self.centered(slide_nr),
                ..self
            },
            Event::ShiftSlide(slide_nr) => self.shift(slide_nr),
            Event::DragStart(x) => {
                if self.drag.is_some() {
                    return self;
                }
                Self {
                    drag: Some(Drag {
                        client_x_start: x,
                        client_x: x,
                    }),
                    style: StyleModifier::None,
                    ..self
                }
            }
            Event::DragAction(x) => {
                let Some(drag) = self.drag else {
                    return self;
                };
                Self {
                    drag: Some(Drag {
                        client_x: x,
                        ..drag
                    }),
                    translate_x: self.centered(self.slide_nr) - drag.client_x_start + x,
                    ..self
                }
            }
            Event::DragEnd => {
                let Some(drag) = self.drag else {
                    return self;
                };
                let delta = drag.delta();
                let target = if delta > self.threshold {
                    self.slide_nr.saturating_sub(1)
                } else if -delta > self.threshold {
                    self.next_index()
                } else {
                    self.slide_nr
                };
                Self { drag: None, ..self }.shift(target)
            }
        }
    }

    fn shift(self, slide_nr: usize) -> Self {
        Self {
            slide_nr,
            style: StyleModifier::Transitioning,
            translate_x: self.centered(slide_nr),
            ..self
        }
    }

    fn next_index(&self) -> usize {
        let next = self.slide_nr + 1;
        match self.slide_count {
            0 => next,
            count => next.min(count - 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Breakpoints;

    /// Five real slides, one padding slide per end, 1000px viewport.
    fn five_slides() -> CarouselState {
        CarouselState::default()
            .apply(Event::resize(Breakpoints::default().resolve(1000.0)))
            .apply(Event::SetSliderCount(7))
    }

    fn drag(state: CarouselState, from: f64, to: f64) -> CarouselState {
        state
            .apply(Event::DragStart(from))
            .apply(Event::DragAction(to))
            .apply(Event::DragEnd)
    }

    #[test]
    fn resize_resets_to_first_real_slide_and_centers_it() {
        let state = five_slides();
        assert_eq!(state.slide_nr(), 1);
        assert_eq!(state.threshold(), 100.0);
        assert_eq!(state.translate_x(), center(1, 1000.0, 1000.0));

        // Moving elsewhere and resizing again snaps back to the first real slide
        // and the offset agrees with it.
        let moved = state.apply(Event::ShiftSlide(4));
        let resized = moved.apply(Event::resize(Breakpoints::default().resolve(1400.0)));
        assert_eq!(resized.slide_nr(), 3);
        assert_eq!(resized.translate_x(), center(3, 650.0, 1400.0));
    }

    #[test]
    fn resize_threshold_follows_divisor() {
        let geometry = Breakpoints::default().resolve(1200.0);
        let custom = CarouselState::default().apply(Event::resize_with(geometry, 8.0));
        assert_eq!(custom.threshold(), 150.0);

        let default = CarouselState::default().apply(Event::resize(geometry));
        assert_eq!(default.threshold(), 120.0);
    }

    #[test]
    fn small_drag_snaps_back() {
        let state = drag(five_slides(), 100.0, 140.0);
        assert_eq!(state.slide_nr(), 1);
        assert_eq!(state.style(), StyleModifier::Transitioning);
        assert_eq!(state.translate_x(), center(1, 1000.0, 1000.0));
        assert_eq!(state.drag(), None);
    }

    #[test]
    fn threshold_is_strict() {
        // Exactly the threshold does not commit.
        assert_eq!(drag(five_slides(), 100.0, 200.0).slide_nr(), 1);
        assert_eq!(drag(five_slides(), 200.0, 100.0).slide_nr(), 1);
        // One pixel more does.
        assert_eq!(drag(five_slides(), 100.0, 201.0).slide_nr(), 0);
        assert_eq!(drag(five_slides(), 201.0, 100.0).slide_nr(), 2);
    }

    #[test]
    fn drag_tracks_pointer_without_animation() {
        let state = five_slides()
            .apply(Event::ShiftSlide(2))
            .apply(Event::DragStart(500.0));
        assert_eq!(state.style(), StyleModifier::None);

        let state = state.apply(Event::DragAction(470.0));
        assert_eq!(state.translate_x(), center(2, 1000.0, 1000.0) - 30.0);
        assert_eq!(state.style(), StyleModifier::None);
        assert_eq!(
            state.drag(),
            Some(Drag {
                client_x_start: 500.0,
                client_x: 470.0
            })
        );
    }

    #[test]
    fn drag_events_outside_a_gesture_are_ignored() {
        let state = five_slides();
        assert_eq!(state.apply(Event::DragAction(900.0)), state);
        assert_eq!(state.apply(Event::DragEnd), state);

        // A second press does not move the gesture origin.
        let pressed = state.apply(Event::DragStart(10.0));
        assert_eq!(pressed.apply(Event::DragStart(600.0)), pressed);
    }

    #[test]
    fn update_slide_nr_is_silent() {
        let state = five_slides()
            .apply(Event::ShiftSlide(0))
            .apply(Event::UpdateSlideNr(5));
        assert_eq!(state.slide_nr(), 5);
        assert_eq!(state.style(), StyleModifier::None);
        assert_eq!(state.translate_x(), center(5, 1000.0, 1000.0));
    }

    #[test]
    fn committed_drags_stay_on_the_track() {
        let at_start = five_slides().apply(Event::UpdateSlideNr(0));
        assert_eq!(drag(at_start, 0.0, 500.0).slide_nr(), 0);

        let at_end = five_slides().apply(Event::UpdateSlideNr(6));
        assert_eq!(drag(at_end, 500.0, 0.0).slide_nr(), 6);
    }

    #[test]
    fn track_width_covers_padded_list() {
        assert_eq!(five_slides().track_width(), 7000.0);
    }
}
