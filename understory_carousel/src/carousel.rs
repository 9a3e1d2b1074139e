// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The widget shell: reducer, padded track, gestures, and deferred work in one place.

use alloc::vec::Vec;
use core::ops::Range;

use crate::{
    BufferedSlides, CarouselConfig, CarouselError, CarouselState, DeferredQueue, DragGesture,
    Event, GestureHost, PointerInput, wrap_target,
};

/// What the rendering layer needs for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Horizontal offset of the track.
    pub translate_x: f64,
    /// Width of the whole padded track.
    pub track_width: f64,
    /// Whether the move to `translate_x` should animate.
    pub transitioning: bool,
    /// Active track index.
    pub active: usize,
}

/// One dot of the index indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Indicator {
    /// Real slide index.
    pub index: usize,
    /// Whether this slide is the active one.
    pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Task {
    /// Silent jump to `target`, valid only for the track it was computed on.
    WrapCorrection {
        target: usize,
        slide_count: usize,
        buffer_count: usize,
    },
    Resize(f64),
}

/// An infinite-loop carousel over slides of type `T`.
///
/// The host owns the clock and the input plumbing: it passes a millisecond
/// timestamp to every call, forwards raw pointer events to
/// [`Carousel::pointer`], and calls [`Carousel::tick`] when
/// [`Carousel::next_deadline`] passes. Slide contents are never inspected.
///
/// Dropping the carousel detaches every listener it installed on the host.
///
/// ```
/// use kurbo::Point;
/// use understory_carousel::{
///     Carousel, CarouselConfig, GestureHost, ListenerSlot, Phase, PointerInput,
/// };
///
/// struct NoListeners;
///
/// impl GestureHost for NoListeners {
///     type Handle = ();
///     fn attach(&mut self, _: ListenerSlot) {}
///     fn detach(&mut self, _: ()) {}
///     fn prevent_default(&mut self) {}
/// }
///
/// let slides = vec!["a", "b", "c", "d", "e"];
/// let mut carousel = Carousel::new(slides, CarouselConfig::default(), NoListeners).unwrap();
/// carousel.mount(0, 1000.0);
/// assert_eq!(carousel.slides(), &["e", "a", "b", "c", "d", "e", "a"]);
///
/// // Drag right far enough to go back one slide, onto the padding copy of "e".
/// carousel.pointer(10, PointerInput::Mouse(Phase::Down, Point::new(100.0, 0.0)));
/// carousel.pointer(20, PointerInput::Mouse(Phase::Move, Point::new(250.0, 0.0)));
/// carousel.pointer(30, PointerInput::Mouse(Phase::Up, Point::new(250.0, 0.0)));
/// assert_eq!(carousel.state().slide_nr(), 0);
///
/// // Once the transition has had time to finish, the real "e" takes over silently.
/// carousel.tick(280);
/// assert_eq!(carousel.state().slide_nr(), 5);
/// assert!(!carousel.frame().transitioning);
/// ```
pub struct Carousel<T, G: GestureHost> {
    config: CarouselConfig,
    real: Vec<T>,
    track: BufferedSlides<T>,
    state: CarouselState,
    queue: DeferredQueue<Task>,
    gesture: DragGesture<G::Handle>,
    host: G,
    watched: Option<(usize, usize, usize)>,
}

impl<T: Clone, G: GestureHost> Carousel<T, G> {
    /// Creates a carousel over `slides` and installs its press listeners on `host`.
    ///
    /// Fails if `slides` is empty or `config` does not validate.
    pub fn new(slides: Vec<T>, config: CarouselConfig, mut host: G) -> Result<Self, CarouselError> {
        config.validate()?;
        let state = CarouselState::default();
        let track = BufferedSlides::build(&slides, state.buffer_count().min(slides.len()))?;
        let state = state.apply(Event::SetSliderCount(track.len()));

        let mut gesture = DragGesture::new();
        gesture.mount(&mut host);

        Ok(Self {
            config,
            real: slides,
            track,
            state,
            queue: DeferredQueue::new(),
            gesture,
            host,
            watched: None,
        })
    }

    /// Applies the initial viewport width immediately.
    pub fn mount(&mut self, now: u64, window_width: f64) {
        self.apply_geometry(now, window_width);
    }

    /// Records a viewport resize; the geometry follows after the debounce delay.
    ///
    /// Earlier pending resizes are not cancelled; they apply in order and the
    /// last one wins.
    pub fn resize(&mut self, now: u64, window_width: f64) {
        self.queue.schedule(
            now,
            self.config.resize_debounce_ms,
            Task::Resize(window_width),
        );
    }

    /// Feeds a raw pointer event from the host.
    pub fn pointer(&mut self, now: u64, input: PointerInput<'_>) {
        if let Some(event) = self.gesture.handle(&mut self.host, input) {
            self.dispatch(now, event);
        }
    }

    /// Animates to real slide `index`. Out-of-range requests are ignored.
    pub fn request_index(&mut self, now: u64, index: usize) {
        if index >= self.real.len() {
            tracing::warn!(
                index,
                len = self.real.len(),
                "ignoring out-of-range slide request"
            );
            return;
        }
        self.dispatch(now, Event::ShiftSlide(self.track.buffered_index(index)));
    }

    /// Animates to the previous slide.
    pub fn previous(&mut self, now: u64) {
        let target = self.state.slide_nr().saturating_sub(1);
        self.dispatch(now, Event::ShiftSlide(target));
    }

    /// Animates to the next slide.
    pub fn next(&mut self, now: u64) {
        let last = self.state.slide_count().saturating_sub(1);
        let target = (self.state.slide_nr() + 1).min(last);
        self.dispatch(now, Event::ShiftSlide(target));
    }

    /// Runs every deferred task due at `now`. Returns `true` if anything ran.
    ///
    /// A wrap correction queued before the track was rebuilt is dropped, since
    /// its target index refers to the old track.
    pub fn tick(&mut self, now: u64) -> bool {
        let mut ran = false;
        while let Some(task) = self.queue.pop_due(now) {
            ran = true;
            match task {
                Task::WrapCorrection {
                    target,
                    slide_count,
                    buffer_count,
                } => {
                    if slide_count != self.state.slide_count()
                        || buffer_count != self.state.buffer_count()
                    {
                        tracing::trace!(slide_nr = target, "dropping stale wrap correction");
                        continue;
                    }
                    self.dispatch(now, Event::UpdateSlideNr(target));
                }
                Task::Resize(window_width) => self.apply_geometry(now, window_width),
            }
        }
        ran
    }

    /// Timestamp at which [`Carousel::tick`] next has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.queue.next_due()
    }

    /// Applies one reducer event, then rebuilds the track and schedules wrap
    /// correction as needed.
    pub fn dispatch(&mut self, now: u64, event: Event) {
        tracing::trace!(?event, "carousel event");
        self.state = self.state.apply(event);
        self.sync_track();
        self.watch_wrap(now);
    }

    fn apply_geometry(&mut self, now: u64, window_width: f64) {
        let resolved = self.config.breakpoints.resolve(window_width);
        let geometry = resolved.with_buffer_limit(self.real.len());
        if geometry.buffer_count != resolved.buffer_count {
            tracing::warn!(
                requested = resolved.buffer_count,
                slides = self.real.len(),
                "clamping loop buffer to the number of slides"
            );
        }
        tracing::debug!(
            window_width,
            slide_width = geometry.slide_width,
            buffer_count = geometry.buffer_count,
            "applying carousel geometry"
        );
        self.dispatch(
            now,
            Event::resize_with(geometry, self.config.threshold_divisor),
        );
    }

    fn sync_track(&mut self) {
        let buffer_count = self.state.buffer_count();
        if buffer_count == self.track.buffer_count() {
            return;
        }
        match BufferedSlides::build(&self.real, buffer_count) {
            Ok(track) => {
                tracing::debug!(buffer_count, len = track.len(), "rebuilt carousel track");
                self.track = track;
                self.state = self.state.apply(Event::SetSliderCount(self.track.len()));
            }
            Err(err) => tracing::warn!(%err, "keeping previous carousel track"),
        }
    }

    fn watch_wrap(&mut self, now: u64) {
        let key = (
            self.state.slide_nr(),
            self.state.slide_count(),
            self.state.buffer_count(),
        );
        if self.watched == Some(key) {
            return;
        }
        self.watched = Some(key);
        if let Some(target) = wrap_target(&self.state) {
            tracing::trace!(from = key.0, to = target, "scheduling wrap correction");
            let task = Task::WrapCorrection {
                target,
                slide_count: key.1,
                buffer_count: key.2,
            };
            self.queue.schedule(now, self.config.wrap_delay_ms, task);
        }
    }
}

impl<T, G: GestureHost> Carousel<T, G> {
    /// Current reducer state.
    #[must_use]
    pub const fn state(&self) -> &CarouselState {
        &self.state
    }

    /// Configuration this carousel was built with.
    #[must_use]
    pub const fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// The padded track, in layout order.
    #[must_use]
    pub fn slides(&self) -> &[T] {
        self.track.as_slice()
    }

    /// The real slides, as supplied.
    #[must_use]
    pub fn real_slides(&self) -> &[T] {
        &self.real
    }

    /// Render parameters for the current state.
    #[must_use]
    pub fn frame(&self) -> Frame {
        Frame {
            translate_x: self.state.translate_x(),
            track_width: self.state.track_width(),
            transitioning: self.state.is_transitioning(),
            active: self.state.slide_nr(),
        }
    }

    /// Real slide shown by the active track index.
    #[must_use]
    pub fn active_real_index(&self) -> Option<usize> {
        self.track.real_index(self.state.slide_nr())
    }

    /// One indicator per real slide.
    pub fn indicators(&self) -> impl Iterator<Item = Indicator> {
        let buffer_count = self.state.buffer_count();
        let slide_nr = self.state.slide_nr();
        (0..self.real.len()).map(move |index| Indicator {
            index,
            active: index + buffer_count == slide_nr,
        })
    }

    /// Track indices that overlap the viewport at the current offset.
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        let count = self.track.len();
        let slide_width = self.state.slide_width();
        let window_width = self.state.window_width();
        let translate_x = self.state.translate_x();
        let visible = |index: usize| {
            let left = translate_x + index as f64 * slide_width;
            left + slide_width > 0.0 && left < window_width
        };
        let start = (0..count).find(|&index| visible(index)).unwrap_or(count);
        let end = (start..count)
            .find(|&index| !visible(index))
            .unwrap_or(count);
        start..end
    }

    /// Returns `true` while a drag gesture is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_active()
    }

    /// The gesture host.
    #[must_use]
    pub const fn host(&self) -> &G {
        &self.host
    }

    /// The gesture host, mutably.
    pub fn host_mut(&mut self) -> &mut G {
        &mut self.host
    }
}

impl<T, G: GestureHost> core::fmt::Debug for Carousel<T, G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Carousel")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("slides", &self.track.len())
            .field("pending", &self.queue.len())
            .field("dragging", &self.gesture.is_active())
            .finish_non_exhaustive()
    }
}

impl<T, G: GestureHost> Drop for Carousel<T, G> {
    fn drop(&mut self) {
        self.gesture.teardown(&mut self.host);
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    use kurbo::Point;

    use super::*;
    use crate::{ListenerSlot, Phase, StyleModifier};

    /// Counts live listeners through a shared cell so drops can be observed.
    #[derive(Clone, Default)]
    struct SharedHost {
        live: Rc<RefCell<Vec<(u32, ListenerSlot)>>>,
        next: u32,
    }

    impl GestureHost for SharedHost {
        type Handle = u32;

        fn attach(&mut self, slot: ListenerSlot) -> u32 {
            self.next += 1;
            self.live.borrow_mut().push((self.next, slot));
            self.next
        }

        fn detach(&mut self, handle: u32) {
            self.live.borrow_mut().retain(|(h, _)| *h != handle);
        }

        fn prevent_default(&mut self) {}
    }

    fn five(window_width: f64) -> Carousel<char, SharedHost> {
        let mut carousel = Carousel::new(
            vec!['a', 'b', 'c', 'd', 'e'],
            CarouselConfig::default(),
            SharedHost::default(),
        )
        .unwrap();
        carousel.mount(0, window_width);
        carousel
    }

    fn drag(carousel: &mut Carousel<char, SharedHost>, now: u64, from: f64, to: f64) {
        carousel.pointer(now, PointerInput::Mouse(Phase::Down, Point::new(from, 0.0)));
        carousel.pointer(now, PointerInput::Mouse(Phase::Move, Point::new(to, 0.0)));
        carousel.pointer(now, PointerInput::Mouse(Phase::Up, Point::new(to, 0.0)));
    }

    #[test]
    fn mount_builds_padded_track() {
        let carousel = five(1000.0);
        assert_eq!(carousel.slides().len(), 7);
        assert_eq!(carousel.state().slide_count(), 7);
        assert_eq!(carousel.state().slide_nr(), 1);
        assert_eq!(carousel.state().threshold(), 100.0);
        assert_eq!(carousel.active_real_index(), Some(0));
        assert_eq!(carousel.frame().track_width, 7000.0);
        assert_eq!(carousel.next_deadline(), None);
    }

    #[test]
    fn short_drag_snaps_back() {
        let mut carousel = five(1000.0);
        drag(&mut carousel, 10, 100.0, 140.0);
        assert_eq!(carousel.state().slide_nr(), 1);
        assert_eq!(carousel.state().style(), StyleModifier::Transitioning);
        assert!(!carousel.is_dragging());
        assert_eq!(carousel.next_deadline(), None);
    }

    #[test]
    fn long_drag_wraps_to_real_last_slide() {
        let mut carousel = five(1000.0);
        drag(&mut carousel, 10, 100.0, 250.0);
        assert_eq!(carousel.state().slide_nr(), 0);
        assert_eq!(carousel.next_deadline(), Some(260));

        assert!(!carousel.tick(259));
        assert_eq!(carousel.state().slide_nr(), 0);

        assert!(carousel.tick(260));
        assert_eq!(carousel.state().slide_nr(), 5);
        assert_eq!(carousel.state().style(), StyleModifier::None);
        assert_eq!(carousel.active_real_index(), Some(4));
        assert_eq!(carousel.next_deadline(), None);
    }

    #[test]
    fn wrap_past_the_start_is_silent() {
        for window_width in [1000.0, 1200.0, 1600.0] {
            let mut carousel = five(window_width);
            let buffer_count = carousel.state().buffer_count();
            assert_eq!(carousel.state().slide_nr(), buffer_count);

            for now in 0..3 {
                carousel.dispatch(now, Event::ShiftSlide(buffer_count - 1));
            }
            carousel.tick(1_000);

            let state = carousel.state();
            assert_eq!(state.slide_nr(), state.slide_count() - buffer_count - 1);
            assert_eq!(state.style(), StyleModifier::None);
            assert_eq!(state.translate_x(), state.centered(state.slide_nr()));
        }
    }

    #[test]
    fn wrap_past_the_end_returns_to_first() {
        let mut carousel = five(1000.0);
        carousel.request_index(0, 4);
        carousel.next(10);
        assert_eq!(carousel.state().slide_nr(), 6);
        carousel.tick(260);
        assert_eq!(carousel.state().slide_nr(), 1);
        assert_eq!(carousel.active_real_index(), Some(0));
    }

    #[test]
    fn resize_is_debounced_and_rebuilds_track() {
        let mut carousel = five(1000.0);
        carousel.request_index(0, 2);

        carousel.resize(100, 1200.0);
        carousel.resize(200, 1500.0);
        assert!(!carousel.tick(599));
        assert_eq!(carousel.state().slide_width(), 1000.0);

        assert!(carousel.tick(600));
        assert_eq!(carousel.state().slide_width(), 450.0);
        assert_eq!(carousel.slides().len(), 11);

        assert!(carousel.tick(700));
        assert_eq!(carousel.state().slide_width(), 650.0);
        assert_eq!(carousel.state().window_width(), 1500.0);
        assert_eq!(carousel.state().slide_nr(), 3);
        assert_eq!(carousel.state().slide_count(), 11);
        assert_eq!(carousel.state().threshold(), 150.0);
        // No padding slide is active, so nothing else is pending.
        assert_eq!(carousel.next_deadline(), None);
    }

    #[test]
    fn rebuild_drops_pending_wrap_correction() {
        let mut carousel = five(1400.0);
        assert_eq!(carousel.state().slide_count(), 11);

        // Resize lands before the wrap correction queued by stepping onto padding.
        carousel.resize(0, 1000.0);
        carousel.previous(400);
        assert_eq!(carousel.state().slide_nr(), 2);
        assert_eq!(carousel.next_deadline(), Some(500));

        assert!(carousel.tick(500));
        assert_eq!(carousel.state().slide_count(), 7);
        assert_eq!(carousel.state().slide_nr(), 1);

        // The correction computed for the 11-slide track must not run on the new one.
        assert!(carousel.tick(650));
        assert_eq!(carousel.state().slide_nr(), 1);
        assert_eq!(carousel.active_real_index(), Some(0));
        assert_eq!(carousel.visible_range(), 1..2);
        assert_eq!(carousel.next_deadline(), None);
    }

    #[test]
    fn buffer_is_clamped_for_short_lists() {
        let mut carousel =
            Carousel::new(vec![1, 2], CarouselConfig::default(), SharedHost::default()).unwrap();
        carousel.mount(0, 1500.0);
        assert_eq!(carousel.state().buffer_count(), 2);
        assert_eq!(carousel.slides(), &[1, 2, 1, 2, 1, 2]);
        assert_eq!(carousel.next_deadline(), None);
    }

    #[test]
    fn indicators_follow_active_slide() {
        let mut carousel = five(1200.0);
        carousel.request_index(0, 3);
        let active: Vec<bool> = carousel.indicators().map(|i| i.active).collect();
        assert_eq!(active, [false, false, false, true, false]);

        carousel.request_index(10, 9);
        assert_eq!(carousel.state().slide_nr(), 6);
    }

    #[test]
    fn visible_range_covers_viewport() {
        let carousel = five(1000.0);
        assert_eq!(carousel.visible_range(), 1..2);

        // 450px slides in a 1200px viewport show the active slide and neighbors.
        let carousel = five(1200.0);
        assert_eq!(carousel.state().slide_nr(), 3);
        assert_eq!(carousel.visible_range(), 2..5);
    }

    #[test]
    fn empty_list_is_rejected() {
        let result =
            Carousel::<u8, _>::new(vec![], CarouselConfig::default(), SharedHost::default());
        assert!(matches!(result, Err(CarouselError::EmptySlides)));
    }

    #[test]
    fn drop_detaches_listeners() {
        let host = SharedHost::default();
        let live = host.live.clone();
        let mut carousel = Carousel::new(vec!['x', 'y'], CarouselConfig::default(), host).unwrap();
        carousel.mount(0, 800.0);
        carousel.pointer(5, PointerInput::Mouse(Phase::Down, Point::new(10.0, 0.0)));
        assert_eq!(live.borrow().len(), 4);

        drop(carousel);
        assert!(live.borrow().is_empty());
    }
}
