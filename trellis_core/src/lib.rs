// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0

//! Trellis Core provides the reactive engine the Trellis toolkit is built on.
//!
//! Trellis controls are plain property bags wired together with bindings and
//! expanded through templates. This crate contains that machinery:
//!
//! - [`Control`][core::Control], the reactive object every control is made of,
//!   and [`Property`][core::Property] descriptors identifying its slots.
//! - [`Binding`][core::Binding], synchronous one-way and two-way propagation
//!   between two properties, with re-entrancy guards.
//! - [`DataTemplate`][core::DataTemplate] and
//!   [`ControlTemplate`][core::ControlTemplate], which build control subtrees
//!   from runtime values and from templated controls.
//! - [`media`], the small set of visual value types (brushes and their
//!   parsing) control properties use.
//!
//! The standard controls built on top of this engine live in the `trellis`
//! crate, which re-exports this one as `trellis::core`. Applications should
//! usually depend on `trellis` directly; libraries adding custom controls can
//! depend on `trellis_core` alone.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET

pub use peniko;
pub use peniko::color::palette;

pub mod core;
pub mod media;
