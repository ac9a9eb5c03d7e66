// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0

//! A decorating container: a single child over a painted background.

use std::fmt;
use std::sync::LazyLock;

use trellis_core::core::{Control, ControlClass, Property, TypedControl};
use trellis_core::media::Brush;

/// The decorated child.
pub static CHILD: LazyLock<Property<Option<Control>>> =
    LazyLock::new(|| Property::new::<Border>("child", || None));

/// The brush painted behind the child.
pub static BACKGROUND: LazyLock<Property<Brush>> =
    LazyLock::new(|| Property::new::<Border>("background", || Brush::TRANSPARENT));

static CLASS: LazyLock<ControlClass> = LazyLock::new(|| {
    ControlClass::builder("Border")
        .with(&CHILD)
        .with(&BACKGROUND)
        .on_created(watch_child)
        .build()
});

/// A container that draws a background behind one child.
///
/// The child is an ordinary property; setting it keeps the structural tree
/// in step, so the previous child is removed from [`children`](Control::children)
/// and the new one added.
#[derive(Clone)]
pub struct Border {
    control: Control,
}

impl Border {
    /// Creates an empty, transparent border.
    pub fn new() -> Self {
        Self {
            control: Control::new(&CLASS),
        }
    }

    /// The decorated child, if one is set.
    pub fn child(&self) -> Option<Control> {
        self.control.get(&CHILD)
    }

    /// Sets the decorated child.
    pub fn set_child(&self, child: &Control) {
        self.control.set(&CHILD, Some(child.clone()));
    }

    /// Removes the decorated child.
    pub fn clear_child(&self) {
        self.control.set(&CHILD, None);
    }

    /// The background brush.
    pub fn background(&self) -> Brush {
        self.control.get(&BACKGROUND)
    }

    /// Sets the background brush.
    pub fn set_background(&self, background: Brush) {
        self.control.set(&BACKGROUND, background);
    }

    /// Builder-style [`set_child`](Self::set_child).
    pub fn with_child(self, child: &Control) -> Self {
        self.set_child(child);
        self
    }

    /// Builder-style [`set_background`](Self::set_background).
    pub fn with_background(self, background: Brush) -> Self {
        self.set_background(background);
        self
    }
}

impl Default for Border {
    fn default() -> Self {
        Self::new()
    }
}

impl TypedControl for Border {
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

impl fmt::Debug for Border {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.control, f)
    }
}

fn watch_child(control: &Control) {
    control.retain_subscription(control.subscribe(&CHILD, |control, old, new| {
        if let Some(old) = old {
            control.remove_child(old);
        }
        if let Some(new) = new {
            control.add_child(new.clone());
        }
    }));
}
