// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0

//! The standard control set for the Trellis toolkit.
//!
//! Trellis controls are property bags: their state is reactive properties,
//! their structure comes from templates, and composite controls talk to
//! their parts exclusively through bindings. This crate provides the
//! controls themselves (scroll bars, tracks, borders, text and content
//! presentation), the default [`theme`] templates, and [`testing`] helpers;
//! the underlying engine lives in [`trellis_core`], re-exported here as
//! [`core`].
//!
//! # Example
//!
//! ```
//! use trellis::core::TypedControl;
//! use trellis::theme;
//! use trellis::widgets::{ScrollBar, range};
//!
//! let scroll_bar = ScrollBar::new();
//! scroll_bar.control().set_template(theme::scroll_bar_template());
//! scroll_bar.set_value(25.0);
//!
//! // Templates stay unexpanded until the tree is realized.
//! scroll_bar.control().realize().unwrap();
//!
//! // The track part is wired up with bindings; value is two-way.
//! let track = scroll_bar.control().template_child("track").unwrap();
//! track.set(&range::VALUE, 50.0);
//! assert_eq!(scroll_bar.value(), 50.0);
//! ```

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET

pub use trellis_core::{core, media, palette, peniko};

pub mod testing;
pub mod theme;
pub mod widgets;

#[cfg(test)]
mod tests;
