// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Infinite-loop carousel driven by a simulated host.
//!
//! This example shows how a host integrates `understory_carousel`:
//! - installing and removing the listeners the drag adapter asks for,
//! - forwarding mouse and touch input with host timestamps,
//! - ticking deferred work (wrap correction, debounced resize),
//! - and reading a render frame plus index indicators after each step.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_demos --example carousel_loop`

use kurbo::Point;
use understory_carousel::{
    Carousel, CarouselConfig, GestureHost, ListenerSlot, Phase, PointerInput,
};

/// Stand-in for a windowing toolkit: keeps a table of "installed" listeners.
#[derive(Debug, Default)]
struct SimHost {
    next: u32,
    live: Vec<(u32, ListenerSlot)>,
}

impl GestureHost for SimHost {
    type Handle = u32;

    fn attach(&mut self, slot: ListenerSlot) -> u32 {
        self.next += 1;
        self.live.push((self.next, slot));
        self.next
    }

    fn detach(&mut self, handle: u32) {
        self.live.retain(|(h, _)| *h != handle);
    }

    fn prevent_default(&mut self) {}
}

/// Opaque slide content; the carousel never looks inside.
#[derive(Clone, Debug)]
enum Slide {
    Text(&'static str),
    Video { title: &'static str },
}

impl Slide {
    fn label(&self) -> &'static str {
        match self {
            Self::Text(text) => text,
            Self::Video { title } => title,
        }
    }
}

fn report(label: &str, carousel: &Carousel<Slide, SimHost>) {
    let frame = carousel.frame();
    let dots: String = carousel
        .indicators()
        .map(|dot| if dot.active { '●' } else { '○' })
        .collect();
    let visible: Vec<&str> = carousel.slides()[carousel.visible_range()]
        .iter()
        .map(Slide::label)
        .collect();
    println!(
        "{label:<24} slide={:<2} x={:>8.1} animate={:<5} listeners={} {dots} visible={visible:?}",
        frame.active,
        frame.translate_x,
        frame.transitioning,
        carousel.host().live.len(),
    );
}

/// Advance the simulated clock to `until`, firing deferred work on the way.
fn run_until(carousel: &mut Carousel<Slide, SimHost>, until: u64) {
    while let Some(due) = carousel.next_deadline() {
        if due > until {
            break;
        }
        carousel.tick(due);
        report("  deferred", carousel);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let slides = vec![
        Slide::Text("quote + image"),
        Slide::Text("quote"),
        Slide::Video { title: "video" },
        Slide::Text("quote + image 2"),
        Slide::Text("quote 2"),
    ];

    let mut carousel = Carousel::new(slides, CarouselConfig::default(), SimHost::default())
        .expect("five slides and the default config are valid");

    carousel.mount(0, 1000.0);
    report("mounted @1000px", &carousel);

    // Short mouse drag: snaps back.
    carousel.pointer(
        100,
        PointerInput::Mouse(Phase::Down, Point::new(100.0, 300.0)),
    );
    carousel.pointer(
        120,
        PointerInput::Mouse(Phase::Move, Point::new(140.0, 300.0)),
    );
    report("dragging", &carousel);
    carousel.pointer(
        140,
        PointerInput::Mouse(Phase::Up, Point::new(140.0, 300.0)),
    );
    report("short drag released", &carousel);

    // Long touch swipe to the right: previous slide, then wrap to the real last slide.
    let down = [Point::new(100.0, 300.0)];
    let moved = [Point::new(250.0, 300.0)];
    carousel.pointer(1_000, PointerInput::Touch(Phase::Down, &down));
    carousel.pointer(1_050, PointerInput::Touch(Phase::Move, &moved));
    carousel.pointer(1_100, PointerInput::Touch(Phase::Up, &[]));
    report("swiped past start", &carousel);
    run_until(&mut carousel, 2_000);

    // Indicator click, then "next" past the end.
    carousel.request_index(2_000, 4);
    report("requested slide 4", &carousel);
    carousel.next(2_400);
    report("next past end", &carousel);
    run_until(&mut carousel, 3_000);

    // A burst of resizes: each one applies after the debounce, last one wins.
    carousel.resize(3_000, 1200.0);
    carousel.resize(3_100, 1600.0);
    run_until(&mut carousel, 5_000);
    report("resized @1600px", &carousel);

    drop(carousel);
    println!("dropped carousel; all listeners released");
}
