// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0

//! Templates build control subtrees: data templates from runtime values,
//! control templates from templated controls.

mod control;
mod data;
mod datum;

use std::error::Error;
use std::fmt;

pub use control::{ControlTemplate, FuncControlTemplate};
pub use data::{DataTemplate, DataTemplates, FuncDataTemplate};
pub use datum::Datum;

/// Errors from template resolution and application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateError {
    /// A template was asked to build from a value it does not accept.
    InvalidCast {
        /// The type the template expects.
        expected: &'static str,
        /// The type it was given.
        actual: &'static str,
    },
    /// No registered template matched the value, and there is no fallback.
    NoTemplateFound {
        /// The type of the unmatched value.
        data_type: &'static str,
    },
    /// The control already wears a different, applied template.
    AlreadyApplied {
        /// The class of the control.
        class: &'static str,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCast { expected, actual } => {
                write!(f, "template expected `{expected}` but was given `{actual}`")
            }
            Self::NoTemplateFound { data_type } => {
                write!(f, "no data template matches `{data_type}`")
            }
            Self::AlreadyApplied { class } => {
                write!(f, "`{class}` already has a different template applied")
            }
        }
    }
}

impl Error for TemplateError {}
