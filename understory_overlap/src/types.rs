// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::cmp::Ordering;
use core::fmt::Debug;

/// Axis-aligned bounding box in 2D.
///
/// Boxes are plain values: a box read from a graph is a copy, never a view into
/// the graph's own (mutable) geometry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoundingBox<T> {
    /// Minimum x (left)
    pub x1: T,
    /// Minimum y (top)
    pub y1: T,
    /// Maximum x (right)
    pub x2: T,
    /// Maximum y (bottom)
    pub y2: T,
}

impl<T> BoundingBox<T> {
    /// Create a new box from min/max corners.
    pub const fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl<T: Scalar> BoundingBox<T> {
    /// Create a box from origin and size.
    pub fn from_xywh(x: T, y: T, w: T, h: T) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: T::add(x, w),
            y2: T::add(y, h),
        }
    }

    /// Width (`x2 - x1`).
    pub fn width(&self) -> T {
        T::sub(self.x2, self.x1)
    }

    /// Height (`y2 - y1`).
    pub fn height(&self) -> T {
        T::sub(self.y2, self.y1)
    }

    /// Whether this box contains the point. Edges count as inside.
    pub fn contains_point(&self, x: T, y: T) -> bool {
        le(self.x1, x) && le(self.y1, y) && le(x, self.x2) && le(y, self.y2)
    }
}

/// Numeric scalar abstraction for bounding boxes.
///
/// Only the handful of operations padding and size computations need.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Add two scalar values.
    fn add(a: Self, b: Self) -> Self;

    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Convert a small constant (thresholds, paddings) to the scalar type.
    fn from_u16(v: u16) -> Self;
}

impl Scalar for f32 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn from_u16(v: u16) -> Self {
        Self::from(v)
    }
}

impl Scalar for f64 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn from_u16(v: u16) -> Self {
        Self::from(v)
    }
}

impl Scalar for i64 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a.saturating_add(b)
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline]
    fn from_u16(v: u16) -> Self {
        Self::from(v)
    }
}

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

pub(crate) fn gt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Greater)
        .unwrap_or(false)
}

pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_is_derived_from_corners() {
        let b = BoundingBox::from_xywh(2.0_f64, 3.0, 10.0, 4.0);
        assert_eq!(b, BoundingBox::new(2.0, 3.0, 12.0, 7.0));
        assert_eq!(b.width(), 10.0);
        assert_eq!(b.height(), 4.0);
    }

    #[test]
    fn contains_point_includes_edges() {
        let b = BoundingBox::new(0_i64, 0, 10, 10);
        assert!(b.contains_point(0, 10));
        assert!(b.contains_point(5, 5));
        assert!(!b.contains_point(11, 5));
    }

    #[test]
    fn i64_arithmetic_saturates() {
        let b = BoundingBox::from_xywh(i64::MAX - 1, 0, 10, 1);
        assert_eq!(b.x2, i64::MAX);
    }
}
