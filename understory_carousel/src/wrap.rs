// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wrap correction: moving the active index off a padding slide.

use crate::CarouselState;

/// Track index that shows the same slide as `state.slide_nr()` but lies in the
/// real range, or `None` if the active slide is already real.
///
/// Leading padding maps forward by one real length, trailing padding maps back
/// by one real length. So with `B` padding slides on a track of `N`:
/// index `B - 1` maps to `N - B - 1` (the real last slide) and index `N - B`
/// maps to `B` (the real first slide).
///
/// Returns `None` until the padded track has been built.
#[must_use]
pub fn wrap_target(state: &CarouselState) -> Option<usize> {
    let buffer_count = state.buffer_count();
    let slide_count = state.slide_count();
    if buffer_count == 0 || slide_count <= 2 * buffer_count {
        return None;
    }
    let real_len = slide_count - 2 * buffer_count;
    let slide_nr = state.slide_nr();

    if slide_nr < buffer_count {
        Some(slide_nr + real_len)
    } else if slide_nr >= slide_count - buffer_count {
        Some(slide_nr - real_len)
    } else {
        None
    }
}
