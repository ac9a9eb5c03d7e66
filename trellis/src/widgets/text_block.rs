// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0

//! A run of text.

use std::fmt;
use std::sync::LazyLock;

use trellis_core::core::{Control, ControlClass, Property, TypedControl};

/// The displayed text.
pub static TEXT: LazyLock<Property<String>> =
    LazyLock::new(|| Property::new::<TextBlock>("text", String::new));

static CLASS: LazyLock<ControlClass> =
    LazyLock::new(|| ControlClass::builder("TextBlock").with(&TEXT).build());

/// A control that displays a string.
#[derive(Clone)]
pub struct TextBlock {
    control: Control,
}

impl TextBlock {
    /// Creates a text block showing `text`.
    pub fn new(text: impl Into<String>) -> Self {
        let text_block = Self {
            control: Control::new(&CLASS),
        };
        text_block.control.set(&TEXT, text.into());
        text_block
    }

    /// The displayed text.
    pub fn text(&self) -> String {
        self.control.get(&TEXT)
    }

    /// Replaces the displayed text.
    pub fn set_text(&self, text: impl Into<String>) {
        self.control.set(&TEXT, text.into());
    }
}

impl Default for TextBlock {
    fn default() -> Self {
        Self::new("")
    }
}

impl TypedControl for TextBlock {
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

impl fmt::Debug for TextBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.control, f)
    }
}
