// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0

//! The part of a scroll bar that positions the thumb along the range.

use std::fmt;
use std::sync::LazyLock;

use trellis_core::core::{Control, ControlClass, Property, TypedControl};

use crate::widgets::range::{self, Orientation};
use crate::widgets::thumb::Thumb;

/// The thumb shown on the track.
pub static THUMB: LazyLock<Property<Option<Control>>> =
    LazyLock::new(|| Property::new::<Track>("thumb", || None));

static CLASS: LazyLock<ControlClass> = LazyLock::new(|| {
    ControlClass::builder("Track")
        .with(&range::MINIMUM)
        .with(&range::MAXIMUM)
        .with(&range::VALUE)
        .with(&range::VIEWPORT_SIZE)
        .with(&range::ORIENTATION)
        .with(&THUMB)
        .on_created(watch_thumb)
        .build()
});

/// A range surface holding a [`Thumb`].
///
/// A track registers the same range properties as the scroll bar that owns
/// it, which is what the scroll bar's wiring binds against. The thumb is a
/// property; the class keeps it in the structural children.
#[derive(Clone)]
pub struct Track {
    control: Control,
}

impl Track {
    /// Creates a track with no thumb.
    pub fn new() -> Self {
        Self {
            control: Control::new(&CLASS),
        }
    }

    /// The lower bound of the range.
    pub fn minimum(&self) -> f64 {
        self.control.get(&range::MINIMUM)
    }

    /// Sets the lower bound of the range.
    pub fn set_minimum(&self, minimum: f64) {
        self.control.set(&range::MINIMUM, minimum);
    }

    /// The upper bound of the range.
    pub fn maximum(&self) -> f64 {
        self.control.get(&range::MAXIMUM)
    }

    /// Sets the upper bound of the range.
    pub fn set_maximum(&self, maximum: f64) {
        self.control.set(&range::MAXIMUM, maximum);
    }

    /// The current value.
    pub fn value(&self) -> f64 {
        self.control.get(&range::VALUE)
    }

    /// Sets the current value.
    pub fn set_value(&self, value: f64) {
        self.control.set(&range::VALUE, value);
    }

    /// The viewport size, in range units.
    pub fn viewport_size(&self) -> f64 {
        self.control.get(&range::VIEWPORT_SIZE)
    }

    /// Sets the viewport size.
    pub fn set_viewport_size(&self, viewport_size: f64) {
        self.control.set(&range::VIEWPORT_SIZE, viewport_size);
    }

    /// The axis of the track.
    pub fn orientation(&self) -> Orientation {
        self.control.get(&range::ORIENTATION)
    }

    /// Sets the axis of the track.
    pub fn set_orientation(&self, orientation: Orientation) {
        self.control.set(&range::ORIENTATION, orientation);
    }

    /// The thumb, if one is set.
    pub fn thumb(&self) -> Option<Thumb> {
        self.control
            .get(&THUMB)
            .and_then(|control| control.downcast::<Thumb>())
    }

    /// Sets the thumb.
    pub fn set_thumb(&self, thumb: &Thumb) {
        self.control.set(&THUMB, Some(thumb.control().clone()));
    }

    /// Removes the thumb.
    pub fn clear_thumb(&self) {
        self.control.set(&THUMB, None);
    }

    /// Builder-style [`set_thumb`](Self::set_thumb).
    pub fn with_thumb(self, thumb: &Thumb) -> Self {
        self.set_thumb(thumb);
        self
    }
}

impl Default for Track {
    fn default() -> Self {
        Self::new()
    }
}

impl TypedControl for Track {
    fn class() -> &'static ControlClass {
        &CLASS
    }

    fn from_control(control: Control) -> Self {
        Self { control }
    }

    fn control(&self) -> &Control {
        &self.control
    }
}

impl fmt::Debug for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.control, f)
    }
}

fn watch_thumb(control: &Control) {
    control.retain_subscription(control.subscribe(&THUMB, |control, old, new| {
        if let Some(old) = old {
            control.remove_child(old);
        }
        if let Some(new) = new {
            control.add_child(new.clone());
        }
    }));
}
