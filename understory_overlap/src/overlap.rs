// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlap tests and padding.
//!
//! ## Hysteresis
//!
//! A drag interaction usually tests "has the dragged box entered the container"
//! with one padding and "has it left" with another. [`expand`] both boxes by
//! the relevant threshold before calling [`overlaps`]:
//!
//! ```
//! use understory_overlap::{BoundingBox, expand, overlaps};
//!
//! let container = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
//! let dragged = BoundingBox::new(105.0, 10.0, 125.0, 30.0);
//!
//! // Not touching on its own, but within a 10px enter threshold.
//! assert!(!overlaps(&container, &dragged));
//! assert!(overlaps(&container, &expand(&dragged, 10.0)));
//! ```

use crate::types::{BoundingBox, Scalar, gt, lt, max_t, min_t};

/// Whether two boxes intersect or touch.
///
/// Each box is tested for lying strictly right of, left of, above, or below the
/// other. Sharing an edge or a corner counts as overlapping. The test is
/// symmetric, and every well-formed box overlaps itself.
pub fn overlaps<T: PartialOrd + Copy>(a: &BoundingBox<T>, b: &BoundingBox<T>) -> bool {
    // one box right of the other
    if gt(a.x1, b.x2) || gt(b.x1, a.x2) {
        return false;
    }
    // one box left of the other
    if lt(a.x2, b.x1) || lt(b.x2, a.x1) {
        return false;
    }
    // one box above the other
    if lt(a.y2, b.y1) || lt(b.y2, a.y1) {
        return false;
    }
    // one box below the other
    if gt(a.y1, b.y2) || gt(b.y1, a.y2) {
        return false;
    }
    true
}

/// Grow a box by `padding` on every side.
///
/// Width and height each grow by `2 * padding`. A negative padding shrinks the box.
pub fn expand<T: Scalar>(b: &BoundingBox<T>, padding: T) -> BoundingBox<T> {
    BoundingBox {
        x1: T::sub(b.x1, padding),
        y1: T::sub(b.y1, padding),
        x2: T::add(b.x2, padding),
        y2: T::add(b.y2, padding),
    }
}

/// Smallest box covering both inputs.
pub fn union<T: PartialOrd + Copy>(a: &BoundingBox<T>, b: &BoundingBox<T>) -> BoundingBox<T> {
    BoundingBox {
        x1: min_t(a.x1, b.x1),
        y1: min_t(a.y1, b.y1),
        x2: max_t(a.x2, b.x2),
        y2: max_t(a.y2, b.y2),
    }
}
