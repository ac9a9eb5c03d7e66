// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0

//! The reactive object model: controls, properties, bindings and templates.

mod binding;
mod class;
mod control;
mod property;
mod templates;

pub use binding::{Binding, BindingMode, BindingSet, UnknownProperty};
pub use class::{ClassBuilder, ControlClass, DuplicateRegistration, PropertyTable};
pub use control::{Control, PropertyChanged, Subscription, TypedControl, WeakControl};
pub use property::{Property, PropertyKey, PropertyValue};
pub use templates::{
    ControlTemplate, DataTemplate, DataTemplates, Datum, FuncControlTemplate, FuncDataTemplate,
    TemplateError,
};
