// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0

//! The grab handle of a [`Track`](crate::widgets::Track).

use std::fmt;
use std::sync::LazyLock;

use trellis_core::core::{Control, ControlClass, TypedControl};

static CLASS: LazyLock<ControlClass> = LazyLock::new(|| ControlClass::builder("Thumb").build());

/// The element a user drags to change a track's value.
///
/// A thumb has no properties of its own; its look comes entirely from its
/// control template. See [`theme::thumb_template`](crate::theme::thumb_template)
/// for the default.
#[derive(Clone)]
pub struct Thumb {
    control: Control,
}

impl Thumb {
    /// Creates a thumb with no template set.
    pub fn new() -> Self {
        Self {
            control: Control::new(&CLASS),
        }
    }
}

impl Default for Thumb {
    fn default() -> Self {
        Self::new()
    }
}

impl TypedControl for Thumb {
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

impl fmt::Debug for Thumb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.control, f)
    }
}
