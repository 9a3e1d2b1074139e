// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunable constants for a [`Carousel`](crate::Carousel).

use crate::{Breakpoints, CarouselError, DEFAULT_THRESHOLD_DIVISOR};

/// Carousel tuning: breakpoints, timing, and drag sensitivity.
///
/// ```
/// use understory_carousel::CarouselConfig;
///
/// let config = CarouselConfig::default()
///     .with_wrap_delay(300)
///     .with_threshold_divisor(8.0);
/// assert_eq!(config.resize_debounce_ms, 500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselConfig {
    /// Viewport width to geometry table.
    pub breakpoints: Breakpoints,
    /// Delay before a padding slide is silently swapped for its real slide (milliseconds).
    ///
    /// Should be at least as long as the host's slide transition.
    pub wrap_delay_ms: u64,
    /// Delay between a resize notification and the geometry update (milliseconds).
    pub resize_debounce_ms: u64,
    /// Drag threshold is `window_width / threshold_divisor`.
    pub threshold_divisor: f64,
}

impl CarouselConfig {
    /// Replaces the breakpoint table.
    #[must_use]
    pub fn with_breakpoints(mut self, breakpoints: Breakpoints) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    /// Sets the wrap correction delay in milliseconds.
    #[must_use]
    pub fn with_wrap_delay(mut self, wrap_delay_ms: u64) -> Self {
        self.wrap_delay_ms = wrap_delay_ms;
        self
    }

    /// Sets the resize debounce in milliseconds.
    #[must_use]
    pub fn with_resize_debounce(mut self, resize_debounce_ms: u64) -> Self {
        self.resize_debounce_ms = resize_debounce_ms;
        self
    }

    /// Sets the divisor used to derive the drag threshold from the viewport width.
    #[must_use]
    pub fn with_threshold_divisor(mut self, threshold_divisor: f64) -> Self {
        self.threshold_divisor = threshold_divisor;
        self
    }

    /// Checks the breakpoint table and the threshold divisor.
    pub fn validate(&self) -> Result<(), CarouselError> {
        self.breakpoints.validate()?;
        if !self.threshold_divisor.is_finite() || self.threshold_divisor <= 0.0 {
            return Err(CarouselError::InvalidThresholdDivisor(
                self.threshold_divisor,
            ));
        }
        Ok(())
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            breakpoints: Breakpoints::default(),
            wrap_delay_ms: 250,
            resize_debounce_ms: 500,
            threshold_divisor: DEFAULT_THRESHOLD_DIVISOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CarouselState, Event};

    #[test]
    fn default_threshold_is_a_tenth_of_the_viewport() {
        let config = CarouselConfig::default();
        let geometry = config.breakpoints.resolve(1000.0);
        let state = CarouselState::default()
            .apply(Event::resize_with(geometry, config.threshold_divisor));
        assert_eq!(state.threshold(), 100.0);
        assert_eq!(config.wrap_delay_ms, 250);
    }

    #[test]
    fn invalid_divisor_is_rejected() {
        for divisor in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let config = CarouselConfig::default().with_threshold_divisor(divisor);
            assert!(matches!(
                config.validate(),
                Err(CarouselError::InvalidThresholdDivisor(_))
            ));
        }
    }
}
