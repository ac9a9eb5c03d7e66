// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0

use std::any::{Any, type_name};
use std::fmt;
use std::rc::Rc;

/// A type-erased runtime value, as handed to data templates.
///
/// A `Datum` wraps any `'static + Debug` value together with its type name
/// (for diagnostics) and a debug formatter, captured at construction while
/// the concrete type is still known. Clones share the payload; equality is
/// instance identity, which lets a `Datum` serve as a property value.
#[derive(Clone)]
pub struct Datum {
    inner: Rc<DatumInner>,
}

struct DatumInner {
    value: Box<dyn Any>,
    type_name: &'static str,
    debug: fn(&dyn Any, &mut fmt::Formatter<'_>) -> fmt::Result,
}

impl Datum {
    /// Erases a value.
    pub fn new<T: Any + fmt::Debug>(value: T) -> Self {
        Self {
            inner: Rc::new(DatumInner {
                value: Box::new(value),
                type_name: type_name::<T>(),
                debug: |value, f| match value.downcast_ref::<T>() {
                    Some(value) => fmt::Debug::fmt(value, f),
                    None => f.write_str("<opaque>"),
                },
            }),
        }
    }

    /// Whether the payload is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.inner.value.is::<T>()
    }

    /// Borrows the payload as a `T`, if it is one.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.value.downcast_ref::<T>()
    }

    /// The payload's type name, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.inner.type_name
    }
}

impl PartialEq for Datum {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Datum {}

impl fmt::Debug for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.inner.debug)(self.inner.value.as_ref(), f)
    }
}
