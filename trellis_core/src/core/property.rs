// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0

use std::any::{Any, TypeId, type_name};
use std::fmt;

/// A value that can be stored in a property slot.
///
/// This is blanket-implemented for every `'static` type that is `Debug`,
/// `Clone` and `PartialEq`, which is what the property store needs to log
/// changes, hand out copies, and skip writes that don't change anything.
/// You never implement it by hand.
pub trait PropertyValue: Any + fmt::Debug {
    /// Compares this value against another erased value.
    ///
    /// Values of different concrete types are never equal.
    fn dyn_eq(&self, other: &dyn PropertyValue) -> bool;

    /// Upcasts to [`Any`] so callers can downcast to the concrete type.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + fmt::Debug + Clone + PartialEq> PropertyValue for T {
    fn dyn_eq(&self, other: &dyn PropertyValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| other == self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The identity of a property descriptor: an owner type plus a name.
///
/// Two descriptors declared with the same owner and name are the same
/// property, even across separate `static`s. The owner is a marker type, not
/// necessarily a control; shared properties (like the range set) use a
/// dedicated marker so several classes can register the same descriptor.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyKey {
    owner: TypeId,
    owner_name: &'static str,
    name: &'static str,
}

impl PropertyKey {
    /// The property's name, unique within its owner.
    pub fn name(self) -> &'static str {
        self.name
    }

    /// The short name of the owner type.
    pub fn owner_name(self) -> &'static str {
        self.owner_name
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner_name, self.name)
    }
}

impl fmt::Debug for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// A property descriptor: identity plus a default value generator.
///
/// Descriptors are declared once, as `static`s next to the control that owns
/// them, and passed by reference to [`Control`](crate::core::Control)
/// operations:
///
/// ```
/// use std::sync::LazyLock;
/// use trellis_core::core::Property;
///
/// struct Slider;
///
/// static STEP: LazyLock<Property<f64>> =
///     LazyLock::new(|| Property::new::<Slider>("step", || 1.0));
///
/// assert_eq!(STEP.key().to_string(), "Slider.step");
/// assert_eq!(STEP.default_value(), 1.0);
/// ```
///
/// The default is a function rather than a value so that heap-owning types
/// (strings, collections, control references) can serve as defaults.
pub struct Property<T> {
    key: PropertyKey,
    default: fn() -> T,
}

impl<T: PropertyValue> Property<T> {
    /// Declares a property named `name`, owned by the marker type `O`.
    pub fn new<O: 'static>(name: &'static str, default: fn() -> T) -> Self {
        Self {
            key: PropertyKey {
                owner: TypeId::of::<O>(),
                owner_name: short_type_name::<O>(),
                name,
            },
            default,
        }
    }

    /// The descriptor's identity.
    pub fn key(&self) -> PropertyKey {
        self.key
    }

    /// The property's name.
    pub fn name(&self) -> &'static str {
        self.key.name
    }

    /// A fresh copy of the default value.
    pub fn default_value(&self) -> T {
        (self.default)()
    }
}

// Derived impls would put bounds on `T`; descriptors are copyable regardless.
impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Property<T> {}

impl<T> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

pub(crate) fn short_type_name<T: 'static>() -> &'static str {
    let full = type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Owner;

    #[test]
    fn keys_are_identity() {
        let first: Property<f64> = Property::new::<Owner>("width", || 0.0);
        let second: Property<f64> = Property::new::<Owner>("width", || 5.0);
        let other: Property<f64> = Property::new::<Owner>("height", || 0.0);
        assert_eq!(first.key(), second.key());
        assert_ne!(first.key(), other.key());
    }

    #[test]
    fn key_display_is_owner_dot_name() {
        let property: Property<bool> = Property::new::<Owner>("enabled", || true);
        assert_eq!(property.key().to_string(), "Owner.enabled");
        assert_eq!(property.key().owner_name(), "Owner");
        assert_eq!(property.name(), "enabled");
    }

    #[test]
    fn dyn_eq_respects_types() {
        let a = 1.0_f64;
        let b = 1.0_f64;
        let c = 2.0_f64;
        let s = String::from("1.0");
        assert!(a.dyn_eq(&b));
        assert!(!a.dyn_eq(&c));
        assert!(!a.dyn_eq(&s));
    }

    #[test]
    fn defaults_are_generated() {
        let property: Property<String> = Property::new::<Owner>("label", String::new);
        assert_eq!(property.default_value(), "");
    }
}
