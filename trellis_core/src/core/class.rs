// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;
use std::error::Error;
use std::fmt;

use crate::core::control::Control;
use crate::core::property::{Property, PropertyKey, PropertyValue};

/// Error returned when the same property is registered twice on one class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateRegistration {
    class: &'static str,
    property: PropertyKey,
}

impl DuplicateRegistration {
    /// The class the registration was attempted on.
    pub fn class(&self) -> &'static str {
        self.class
    }

    /// The property that was already registered.
    pub fn property(&self) -> PropertyKey {
        self.property
    }
}

impl fmt::Display for DuplicateRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "property `{}` is already registered on `{}`",
            self.property, self.class
        )
    }
}

impl Error for DuplicateRegistration {}

/// The set of properties a control class accepts bindings on.
///
/// Registration is what makes a property part of a class's public contract;
/// `get`/`set` work on any descriptor, but
/// [`Binding::new`](crate::core::Binding::new) refuses endpoints whose class
/// does not register the property. A descriptor may be registered on several
/// classes; only a repeat on the *same* class is an error.
#[derive(Clone, Debug)]
pub struct PropertyTable {
    class: &'static str,
    keys: HashSet<PropertyKey>,
}

impl PropertyTable {
    /// Creates an empty table for the named class.
    pub fn new(class: &'static str) -> Self {
        Self {
            class,
            keys: HashSet::new(),
        }
    }

    /// Adds a property to the table.
    pub fn register<T: PropertyValue>(
        &mut self,
        property: &Property<T>,
    ) -> Result<(), DuplicateRegistration> {
        let key = property.key();
        if self.keys.insert(key) {
            Ok(())
        } else {
            Err(DuplicateRegistration {
                class: self.class,
                property: key,
            })
        }
    }

    /// Whether the table contains the given property.
    pub fn contains(&self, key: PropertyKey) -> bool {
        self.keys.contains(&key)
    }

    /// Number of registered properties.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no properties are registered.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Static description of a control type.
///
/// A class is the name, the registered [`PropertyTable`], and two optional
/// lifecycle hooks: `on_created` runs as the last step of
/// [`Control::new`](crate::core::Control::new) and typically installs the
/// subscriptions that keep derived properties and structural children
/// consistent; `on_template_applied` runs after a control template has been
/// expanded and is where composite controls wire their template parts up with
/// bindings.
///
/// Classes are built once, in a `static`, and controls refer to them by
/// `&'static` reference; class identity is pointer identity.
pub struct ControlClass {
    name: &'static str,
    properties: PropertyTable,
    on_created: Option<fn(&Control)>,
    on_template_applied: Option<fn(&Control)>,
}

impl ControlClass {
    /// Starts building a class with the given name.
    pub fn builder(name: &'static str) -> ClassBuilder {
        ClassBuilder {
            name,
            properties: PropertyTable::new(name),
            on_created: None,
            on_template_applied: None,
            error: None,
        }
    }

    /// The class name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The registered properties.
    pub fn properties(&self) -> &PropertyTable {
        &self.properties
    }

    pub(crate) fn created_hook(&self) -> Option<fn(&Control)> {
        self.on_created
    }

    pub(crate) fn template_applied_hook(&self) -> Option<fn(&Control)> {
        self.on_template_applied
    }
}

impl fmt::Debug for ControlClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlClass")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Builder returned by [`ControlClass::builder`].
pub struct ClassBuilder {
    name: &'static str,
    properties: PropertyTable,
    on_created: Option<fn(&Control)>,
    on_template_applied: Option<fn(&Control)>,
    error: Option<DuplicateRegistration>,
}

impl ClassBuilder {
    /// Registers a property on the class.
    ///
    /// A duplicate is remembered and reported by [`build`](Self::build);
    /// class definitions are static, so a duplicate is a bug in the control's
    /// declaration rather than a runtime condition to recover from.
    pub fn with<T: PropertyValue>(mut self, property: &Property<T>) -> Self {
        if self.error.is_some() {
            return self;
        }
        if let Err(error) = self.properties.register(property) {
            self.error = Some(error);
        }
        self
    }

    /// Sets the hook run when a control of this class is created.
    pub fn on_created(mut self, hook: fn(&Control)) -> Self {
        self.on_created = Some(hook);
        self
    }

    /// Sets the hook run after this class's control template is applied.
    pub fn on_template_applied(mut self, hook: fn(&Control)) -> Self {
        self.on_template_applied = Some(hook);
        self
    }

    /// Finishes the class.
    ///
    /// # Panics
    ///
    /// Panics if a property was registered twice.
    pub fn build(self) -> ControlClass {
        if let Some(error) = self.error {
            panic!("defining control class `{}`: {error}", self.name);
        }
        ControlClass {
            name: self.name,
            properties: self.properties,
            on_created: self.on_created,
            on_template_applied: self.on_template_applied,
        }
    }
}

impl fmt::Debug for ClassBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassBuilder")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Gadget;
    struct Doodad;

    #[test]
    fn duplicate_registration_is_reported() {
        let width: Property<f64> = Property::new::<Gadget>("width", || 0.0);
        let again: Property<f64> = Property::new::<Gadget>("width", || 1.0);

        let mut table = PropertyTable::new("Gadget");
        table.register(&width).unwrap();
        let error = table.register(&again).unwrap_err();
        assert_eq!(error.class(), "Gadget");
        assert_eq!(error.property(), width.key());
        assert_eq!(
            error.to_string(),
            "property `Gadget.width` is already registered on `Gadget`"
        );
        // The failed attempt changed nothing.
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn shared_descriptor_on_two_classes_is_fine() {
        let width: Property<f64> = Property::new::<Gadget>("width", || 0.0);
        let mut first = PropertyTable::new("Gadget");
        let mut second = PropertyTable::new("Doodad");
        first.register(&width).unwrap();
        second.register(&width).unwrap();
        assert!(first.contains(width.key()));
        assert!(second.contains(width.key()));
    }

    #[test]
    fn same_name_different_owner_is_not_a_duplicate() {
        let ours: Property<f64> = Property::new::<Gadget>("width", || 0.0);
        let theirs: Property<f64> = Property::new::<Doodad>("width", || 0.0);
        let mut table = PropertyTable::new("Gadget");
        table.register(&ours).unwrap();
        table.register(&theirs).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn builder_panics_on_duplicate() {
        let width: Property<f64> = Property::new::<Gadget>("width", || 0.0);
        let _ = ControlClass::builder("Gadget").with(&width).with(&width).build();
    }
}
