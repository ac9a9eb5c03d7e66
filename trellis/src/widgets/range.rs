// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0

//! Properties shared by controls that track a value within bounds.
//!
//! [`ScrollBar`](crate::widgets::ScrollBar) and [`Track`](crate::widgets::Track)
//! both register these descriptors, which is what lets a scroll bar bind its
//! own range straight onto its track part.

use std::sync::LazyLock;

use trellis_core::core::Property;

/// The axis a range control runs along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    #[default]
    Vertical,
}

/// Marker type owning the shared range descriptors.
struct Range;

/// The lower bound of the range.
pub static MINIMUM: LazyLock<Property<f64>> =
    LazyLock::new(|| Property::new::<Range>("minimum", || 0.0));

/// The upper bound of the range.
pub static MAXIMUM: LazyLock<Property<f64>> =
    LazyLock::new(|| Property::new::<Range>("maximum", || 100.0));

/// The current value, normally between [`MINIMUM`] and [`MAXIMUM`].
///
/// Values are not clamped; a binding may deliver an out-of-range value and
/// the control stores it as-is.
pub static VALUE: LazyLock<Property<f64>> =
    LazyLock::new(|| Property::new::<Range>("value", || 0.0));

/// How much of the scrollable extent is visible at once, in range units.
///
/// The default is NaN, meaning the control has no viewport information.
pub static VIEWPORT_SIZE: LazyLock<Property<f64>> =
    LazyLock::new(|| Property::new::<Range>("viewport_size", || f64::NAN));

/// The axis of the control.
pub static ORIENTATION: LazyLock<Property<Orientation>> =
    LazyLock::new(|| Property::new::<Range>("orientation", || Orientation::Vertical));
