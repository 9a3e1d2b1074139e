// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Carousel: an infinite-loop, draggable slide carousel core.
//!
//! This crate holds everything about a looping carousel except drawing it. Slides
//! are opaque values of any type; the crate only cares how many there are and how
//! wide they are laid out.
//!
//! The core concepts are:
//!
//! - [`Breakpoints`]: maps the viewport width to a [`Geometry`] (slide width and
//!   loop padding).
//! - [`center`]: the track offset that centers a slide in the viewport.
//! - [`CarouselState`]: a `Copy` record driven by [`CarouselState::apply`], a pure
//!   reducer over [`Event`]s (resize, drag, index changes).
//! - [`BufferedSlides`]: the real slides with copies of the tail in front and of the
//!   head behind, so the track can keep moving in either direction.
//! - [`wrap_target`]: where to silently jump once a padding copy becomes active.
//! - [`DeferredQueue`]: host-clocked delayed tasks (wrap correction, debounced resize).
//! - [`DragGesture`]: turns raw mouse/touch input into drag events and scopes the
//!   listeners it needs through a [`GestureHost`].
//! - [`Carousel`]: the widget shell tying the pieces together and exposing a
//!   render [`Frame`], index [`Indicator`]s, and the visible slide range.
//!
//! This crate deliberately does **not** know about widgets, display trees, or any
//! particular UI framework. Host frameworks are responsible for:
//!
//! - Passing the viewport width on mount and on resize.
//! - Forwarding pointer events from the listeners they were asked to install.
//! - Calling [`Carousel::tick`] once [`Carousel::next_deadline`] has passed.
//! - Laying out [`Carousel::slides`] at [`Frame::translate_x`], animating the move
//!   when [`Frame::transitioning`] is set.
//!
//! ## Minimal example
//!
//! Driving the reducer directly:
//!
//! ```rust
//! use understory_carousel::{BufferedSlides, Breakpoints, CarouselState, Event, wrap_target};
//!
//! let track = BufferedSlides::build(&["a", "b", "c", "d", "e"], 1).unwrap();
//! let geometry = Breakpoints::default().resolve(1000.0);
//!
//! let state = CarouselState::default()
//!     .apply(Event::resize(geometry))
//!     .apply(Event::SetSliderCount(track.len()))
//!     .apply(Event::ShiftSlide(0));
//!
//! // Slide 0 is the padding copy of "e"; the real "e" sits at index 5.
//! assert_eq!(track.as_slice()[0], "e");
//! assert_eq!(wrap_target(&state), Some(5));
//! ```
//!
//! Pixel values are `f64` logical pixels and timestamps are host-supplied
//! milliseconds.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds of `kurbo` that rely on `libm`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod buffer;
mod carousel;
mod config;
mod error;
mod geometry;
mod gesture;
mod schedule;
mod state;
mod wrap;

pub use buffer::BufferedSlides;
pub use carousel::{Carousel, Frame, Indicator};
pub use config::CarouselConfig;
pub use error::CarouselError;
pub use geometry::{Breakpoint, Breakpoints, Geometry, Layout, SlideWidth, center};
pub use gesture::{DragGesture, GestureHost, ListenerSlot, Phase, PointerInput, PointerKind};
pub use schedule::{Deferred, DeferredQueue};
pub use state::{CarouselState, DEFAULT_THRESHOLD_DIVISOR, Drag, Event, StyleModifier};
pub use wrap::wrap_target;
