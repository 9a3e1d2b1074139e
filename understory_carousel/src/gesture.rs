// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag gesture adapter.
//!
//! Translates raw mouse and touch input into the reducer's drag events and owns
//! the listener lifecycle around a gesture:
//!
//! - Press listeners (mouse down, touch start) live from [`DragGesture::mount`]
//!   until [`DragGesture::teardown`].
//! - Move and release listeners are attached when a press starts a gesture and
//!   detached when that gesture ends, so they never outlive it.
//!
//! Listeners are opaque handles issued by a [`GestureHost`], so the adapter works
//! with any windowing toolkit (or a test double).
//!
//! ```
//! use kurbo::Point;
//! use understory_carousel::{
//!     DragGesture, Event, GestureHost, ListenerSlot, Phase, PointerInput,
//! };
//!
//! #[derive(Default)]
//! struct Host {
//!     live: Vec<(u32, ListenerSlot)>,
//!     next: u32,
//! }
//!
//! impl GestureHost for Host {
//!     type Handle = u32;
//!     fn attach(&mut self, slot: ListenerSlot) -> u32 {
//!         self.next += 1;
//!         self.live.push((self.next, slot));
//!         self.next
//!     }
//!     fn detach(&mut self, handle: u32) {
//!         self.live.retain(|(h, _)| *h != handle);
//!     }
//!     fn prevent_default(&mut self) {}
//! }
//!
//! let mut host = Host::default();
//! let mut gesture = DragGesture::new();
//! gesture.mount(&mut host);
//! assert_eq!(host.live.len(), 2);
//!
//! let touches = [Point::new(120.0, 40.0), Point::new(300.0, 40.0)];
//! let start = gesture.handle(&mut host, PointerInput::Touch(Phase::Down, &touches));
//! assert_eq!(start, Some(Event::DragStart(120.0)));
//! assert_eq!(host.live.len(), 4);
//!
//! let end = gesture.handle(&mut host, PointerInput::Touch(Phase::Up, &[]));
//! assert_eq!(end, Some(Event::DragEnd));
//! assert_eq!(host.live.len(), 2);
//!
//! gesture.teardown(&mut host);
//! assert!(host.live.is_empty());
//! ```

use kurbo::Point;
use smallvec::SmallVec;

use crate::Event;

/// Input device family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Mouse or pen reported through mouse events.
    Mouse,
    /// Touch screen.
    Touch,
}

/// Phase of a raw pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Button pressed or finger down.
    Down,
    /// Pointer moved.
    Move,
    /// Button released or finger lifted.
    Up,
    /// The platform aborted the interaction (for example, touch cancel).
    Cancel,
}

/// A raw pointer event from the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput<'a> {
    /// Mouse event at a position.
    Mouse(Phase, Point),
    /// Touch event with the current touch points; the first one drives the drag.
    Touch(Phase, &'a [Point]),
}

impl PointerInput<'_> {
    /// Device family of this event.
    #[must_use]
    pub const fn kind(&self) -> PointerKind {
        match self {
            Self::Mouse(..) => PointerKind::Mouse,
            Self::Touch(..) => PointerKind::Touch,
        }
    }

    /// Phase of this event.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match *self {
            Self::Mouse(phase, _) | Self::Touch(phase, _) => phase,
        }
    }

    /// Horizontal pointer position, if the event carries one.
    #[must_use]
    pub fn x(&self) -> Option<f64> {
        match self {
            Self::Mouse(_, point) => Some(point.x),
            Self::Touch(_, touches) => touches.first().map(|point| point.x),
        }
    }
}

/// A listener the adapter asks the host to install.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerSlot {
    /// Mouse down or touch start on the track.
    Press(PointerKind),
    /// Pointer movement during a gesture.
    Move(PointerKind),
    /// Mouse up, touch end, or touch cancel during a gesture.
    Release(PointerKind),
}

/// Installs and removes native listeners on behalf of [`DragGesture`].
pub trait GestureHost {
    /// Token identifying one installed listener.
    type Handle;

    /// Installs a listener for `slot` and returns its handle.
    fn attach(&mut self, slot: ListenerSlot) -> Self::Handle;

    /// Removes a listener previously returned by [`GestureHost::attach`].
    fn detach(&mut self, handle: Self::Handle);

    /// Suppresses the platform's default handling of the current press
    /// (native image drag, text selection, scrolling).
    fn prevent_default(&mut self);
}

#[derive(Debug)]
struct Session<H> {
    kind: PointerKind,
    listeners: SmallVec<[H; 2]>,
}

/// Drag gesture adapter; see the [module docs](self).
///
/// At most one gesture is active. A press that arrives while a gesture is
/// active is ignored.
#[derive(Debug)]
pub struct DragGesture<H> {
    press_listeners: SmallVec<[H; 2]>,
    session: Option<Session<H>>,
}

impl<H> DragGesture<H> {
    /// Creates an adapter with no listeners installed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            press_listeners: SmallVec::new(),
            session: None,
        }
    }

    /// Returns `true` while a gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Device family of the gesture in progress.
    #[must_use]
    pub fn active_kind(&self) -> Option<PointerKind> {
        self.session.as_ref().map(|session| session.kind)
    }

    /// Installs the long-lived press listeners. Calling it twice is a no-op.
    pub fn mount<G: GestureHost<Handle = H>>(&mut self, host: &mut G) {
        if !self.press_listeners.is_empty() {
            return;
        }
        for kind in [PointerKind::Mouse, PointerKind::Touch] {
            self.press_listeners.push(host.attach(ListenerSlot::Press(kind)));
        }
    }

    /// Feeds one raw pointer event through the adapter.
    ///
    /// Returns the reducer event it maps to, or `None` if the input does not
    /// belong to a gesture.
    pub fn handle<G: GestureHost<Handle = H>>(
        &mut self,
        host: &mut G,
        input: PointerInput<'_>,
    ) -> Option<Event> {
        match input.phase() {
            Phase::Down => self.begin(host, input),
            Phase::Move => {
                if self.active_kind() != Some(input.kind()) {
                    return None;
                }
                input.x().map(Event::DragAction)
            }
            Phase::Up | Phase::Cancel => {
                if self.active_kind() != Some(input.kind()) {
                    return None;
                }
                self.end_session(host);
                tracing::trace!(kind = ?input.kind(), "drag gesture ended");
                Some(Event::DragEnd)
            }
        }
    }

    /// Removes every listener, ending any gesture without emitting an event.
    ///
    /// Returns `true` if a gesture was in progress.
    pub fn teardown<G: GestureHost<Handle = H>>(&mut self, host: &mut G) -> bool {
        let was_active = self.end_session(host);
        for handle in self.press_listeners.drain(..) {
            host.detach(handle);
        }
        was_active
    }

    fn begin<G: GestureHost<Handle = H>>(
        &mut self,
        host: &mut G,
        input: PointerInput<'_>,
    ) -> Option<Event> {
        if let Some(active) = self.active_kind() {
            tracing::warn!(?active, pressed = ?input.kind(), "press ignored during active drag");
            return None;
        }
        let x = input.x()?;
        host.prevent_default();

        let kind = input.kind();
        let mut listeners = SmallVec::new();
        listeners.push(host.attach(ListenerSlot::Move(kind)));
        listeners.push(host.attach(ListenerSlot::Release(kind)));
        self.session = Some(Session { kind, listeners });

        tracing::trace!(?kind, x, "drag gesture started");
        Some(Event::DragStart(x))
    }

    fn end_session<G: GestureHost<Handle = H>>(&mut self, host: &mut G) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        for handle in session.listeners {
            host.detach(handle);
        }
        true
    }
}

impl<H> Default for DragGesture<H> {
    fn default() -> Self {
        Self::new()
    }
}
