// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0

//! Templated controls built on the Trellis engine.
//!
//! Each control is a thin typed wrapper around a [`Control`](crate::core::Control)
//! plus the property descriptors it registers. The descriptors are public
//! statics in the control's module so that bindings and templates can name
//! them directly, e.g. [`range::VALUE`] or [`border::BACKGROUND`].

pub mod border;
pub mod content_presenter;
pub mod range;
pub mod scroll_bar;
pub mod text_block;
pub mod thumb;
pub mod track;

pub use border::Border;
pub use content_presenter::ContentPresenter;
pub use range::Orientation;
pub use scroll_bar::{ScrollBar, ScrollBarVisibility};
pub use text_block::TextBlock;
pub use thumb::Thumb;
pub use track::Track;
