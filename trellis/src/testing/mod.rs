// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0

//! Helpers for testing Trellis controls.
//!
//! [`init_test_tracing`] installs a log subscriber so a failing test prints
//! the engine's traces, and [`TestControl`] is a minimal control class for
//! exercising bindings and templates without dragging a real widget in.

use std::fmt;
use std::sync::LazyLock;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use trellis_core::core::{Control, ControlClass, Property, TypedControl};

/// Initializes test logging.
///
/// The default filter is `warn`; use `RUST_LOG` to override it without
/// recompiling. Calling this more than once is fine; later calls leave the
/// installed subscriber alone.
pub fn init_test_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var("RUST_LOG")
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .without_time()
        .try_init();
}

/// A numeric property registered on [`TestControl`].
pub static ALPHA: LazyLock<Property<f64>> =
    LazyLock::new(|| Property::new::<TestControl>("alpha", || 0.0));

/// A second numeric property registered on [`TestControl`].
pub static BETA: LazyLock<Property<f64>> =
    LazyLock::new(|| Property::new::<TestControl>("beta", || 0.0));

/// A text property registered on [`TestControl`].
pub static LABEL: LazyLock<Property<String>> =
    LazyLock::new(|| Property::new::<TestControl>("label", String::new));

static CLASS: LazyLock<ControlClass> = LazyLock::new(|| {
    ControlClass::builder("TestControl")
        .with(&ALPHA)
        .with(&BETA)
        .with(&LABEL)
        .build()
});

/// A plain control class with a few registered properties and no hooks.
#[derive(Clone)]
pub struct TestControl {
    control: Control,
}

impl TestControl {
    /// Creates a test control.
    pub fn new() -> Self {
        Self {
            control: Control::new(&CLASS),
        }
    }
}

impl Default for TestControl {
    fn default() -> Self {
        Self::new()
    }
}

impl TypedControl for TestControl {
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

impl fmt::Debug for TestControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.control, f)
    }
}
