// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0

use std::cell::{Cell, RefCell};
use std::error::Error;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::core::control::{Control, Subscription};
use crate::core::property::{Property, PropertyKey, PropertyValue};

/// Direction values flow through a binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingMode {
    /// Source to target only.
    OneWay,
    /// Target to source only.
    OneWayToSource,
    /// Both directions.
    TwoWay,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Per-binding propagation state. A change arriving while the binding is
/// already propagating is an echo of its own write and is dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    Propagating(Direction),
}

/// Error returned by [`Binding::new`] when an endpoint's class does not
/// register the bound property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownProperty {
    class: &'static str,
    property: PropertyKey,
}

impl UnknownProperty {
    /// The class missing the registration.
    pub fn class(&self) -> &'static str {
        self.class
    }

    /// The property that was not registered.
    pub fn property(&self) -> PropertyKey {
        self.property
    }
}

impl fmt::Display for UnknownProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "property `{}` is not registered on `{}`",
            self.property, self.class
        )
    }
}

impl Error for UnknownProperty {}

struct BindingInner {
    state: Cell<State>,
    attached: Cell<bool>,
    subscriptions: RefCell<Vec<Subscription>>,
}

/// Handle to an active binding between two properties.
///
/// A binding first carries the current value across (source to target, or
/// target to source for [`BindingMode::OneWayToSource`]), then keeps the
/// endpoints in sync by subscribing to changes. Propagation is synchronous
/// and depth-first: when a write returns, every binding downstream of it has
/// settled.
///
/// Two-way bindings guard against echo: while a binding is propagating in
/// one direction, the notification its own write produces on the far end is
/// dropped instead of being sent back.
///
/// Dropping the handle detaches the binding; [`unbind`](Self::unbind) is the
/// explicit form. Controls hold no strong references to their bindings, so a
/// binding never keeps a control alive.
pub struct Binding {
    inner: Rc<BindingInner>,
}

impl Binding {
    /// Binds `source_property` on `source` to `target_property` on `target`.
    ///
    /// Both classes must register the respective property; otherwise this
    /// fails with [`UnknownProperty`] before any value moves, leaving both
    /// controls untouched.
    pub fn new<T: PropertyValue + Clone>(
        source: &Control,
        source_property: &Property<T>,
        target: &Control,
        target_property: &Property<T>,
        mode: BindingMode,
    ) -> Result<Self, UnknownProperty> {
        check_registered(source, source_property)?;
        check_registered(target, target_property)?;

        let inner = Rc::new(BindingInner {
            state: Cell::new(State::Idle),
            attached: Cell::new(true),
            subscriptions: RefCell::new(Vec::new()),
        });

        match mode {
            BindingMode::OneWay | BindingMode::TwoWay => {
                target.set(target_property, source.get(source_property));
            }
            BindingMode::OneWayToSource => {
                source.set(source_property, target.get(target_property));
            }
        }

        if matches!(mode, BindingMode::OneWay | BindingMode::TwoWay) {
            let subscription = attach(
                &inner,
                source,
                source_property,
                target,
                target_property,
                Direction::Forward,
            );
            inner.subscriptions.borrow_mut().push(subscription);
        }
        if matches!(mode, BindingMode::OneWayToSource | BindingMode::TwoWay) {
            let subscription = attach(
                &inner,
                target,
                target_property,
                source,
                source_property,
                Direction::Backward,
            );
            inner.subscriptions.borrow_mut().push(subscription);
        }

        trace!(
            source = %source_property.key(),
            target = %target_property.key(),
            mode = ?mode,
            "binding attached"
        );
        Ok(Self { inner })
    }

    /// [`Binding::new`] with [`BindingMode::OneWay`].
    pub fn one_way<T: PropertyValue + Clone>(
        source: &Control,
        source_property: &Property<T>,
        target: &Control,
        target_property: &Property<T>,
    ) -> Result<Self, UnknownProperty> {
        Self::new(source, source_property, target, target_property, BindingMode::OneWay)
    }

    /// [`Binding::new`] with [`BindingMode::OneWayToSource`].
    pub fn one_way_to_source<T: PropertyValue + Clone>(
        source: &Control,
        source_property: &Property<T>,
        target: &Control,
        target_property: &Property<T>,
    ) -> Result<Self, UnknownProperty> {
        Self::new(
            source,
            source_property,
            target,
            target_property,
            BindingMode::OneWayToSource,
        )
    }

    /// [`Binding::new`] with [`BindingMode::TwoWay`].
    pub fn two_way<T: PropertyValue + Clone>(
        source: &Control,
        source_property: &Property<T>,
        target: &Control,
        target_property: &Property<T>,
    ) -> Result<Self, UnknownProperty> {
        Self::new(source, source_property, target, target_property, BindingMode::TwoWay)
    }

    /// Whether the binding is still propagating changes.
    pub fn is_attached(&self) -> bool {
        self.inner.attached.get()
    }

    /// Detaches the binding. Safe to call more than once, and from inside a
    /// change notification handler.
    pub fn unbind(&self) {
        if !self.inner.attached.replace(false) {
            return;
        }
        self.inner.subscriptions.borrow_mut().clear();
        trace!("binding detached");
    }
}

impl Drop for Binding {
    fn drop(&mut self) {
        self.unbind();
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("attached", &self.inner.attached.get())
            .field("state", &self.inner.state.get())
            .finish_non_exhaustive()
    }
}

fn check_registered<T: PropertyValue>(
    control: &Control,
    property: &Property<T>,
) -> Result<(), UnknownProperty> {
    if control.class().properties().contains(property.key()) {
        Ok(())
    } else {
        Err(UnknownProperty {
            class: control.class().name(),
            property: property.key(),
        })
    }
}

fn attach<T: PropertyValue + Clone>(
    inner: &Rc<BindingInner>,
    from: &Control,
    from_property: &Property<T>,
    to: &Control,
    to_property: &Property<T>,
    direction: Direction,
) -> Subscription {
    let weak_inner = Rc::downgrade(inner);
    let weak_to = to.downgrade();
    let to_property = *to_property;
    from.subscribe(from_property, move |_, _, new| {
        let Some(inner) = weak_inner.upgrade() else {
            return;
        };
        if !inner.attached.get() {
            return;
        }
        if inner.state.get() != State::Idle {
            trace!(
                state = ?inner.state.get(),
                "dropped change notification while binding was propagating"
            );
            return;
        }
        let Some(to) = weak_to.upgrade() else {
            return;
        };
        inner.state.set(State::Propagating(direction));
        to.set(&to_property, new.clone());
        inner.state.set(State::Idle);
    })
}

/// Owns a group of bindings and detaches them together.
///
/// Composite controls keep their template wiring in one of these so the
/// bindings live exactly as long as the control (or until
/// [`clear`](Self::clear)).
#[derive(Default)]
pub struct BindingSet {
    bindings: Vec<Binding>,
}

impl BindingSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of a binding.
    pub fn hold(&mut self, binding: Binding) {
        self.bindings.push(binding);
    }

    /// Number of held bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the set holds nothing.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Drops (and thereby detaches) every held binding.
    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

impl fmt::Debug for BindingSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingSet")
            .field("len", &self.bindings.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use assert_matches::assert_matches;

    use super::*;
    use crate::core::class::ControlClass;

    struct Gadget;

    static WIDTH: LazyLock<Property<f64>> =
        LazyLock::new(|| Property::new::<Gadget>("width", || 0.0));
    static GADGET: LazyLock<ControlClass> =
        LazyLock::new(|| ControlClass::builder("Gadget").with(&WIDTH).build());
    static BARE: LazyLock<ControlClass> = LazyLock::new(|| ControlClass::builder("Bare").build());

    #[test]
    fn two_way_carries_the_source_value_first() {
        let source = Control::new(&GADGET);
        let target = Control::new(&GADGET);
        source.set(&WIDTH, 25.0);
        target.set(&WIDTH, 99.0);

        let _binding = Binding::two_way(&source, &WIDTH, &target, &WIDTH).unwrap();
        assert_eq!(target.get(&WIDTH), 25.0);

        target.set(&WIDTH, 50.0);
        assert_eq!(source.get(&WIDTH), 50.0);
        source.set(&WIDTH, 75.0);
        assert_eq!(target.get(&WIDTH), 75.0);
    }

    #[test]
    fn one_way_is_directional() {
        let source = Control::new(&GADGET);
        let target = Control::new(&GADGET);
        let _binding = Binding::one_way(&source, &WIDTH, &target, &WIDTH).unwrap();

        source.set(&WIDTH, 25.0);
        assert_eq!(target.get(&WIDTH), 25.0);

        target.set(&WIDTH, 99.0);
        assert_eq!(source.get(&WIDTH), 25.0);
        // A later source write still wins.
        source.set(&WIDTH, 30.0);
        assert_eq!(target.get(&WIDTH), 30.0);
    }

    #[test]
    fn one_way_to_source_flows_backwards() {
        let source = Control::new(&GADGET);
        let target = Control::new(&GADGET);
        target.set(&WIDTH, 25.0);

        let _binding = Binding::one_way_to_source(&source, &WIDTH, &target, &WIDTH).unwrap();
        assert_eq!(source.get(&WIDTH), 25.0);

        target.set(&WIDTH, 50.0);
        assert_eq!(source.get(&WIDTH), 50.0);
        source.set(&WIDTH, 99.0);
        assert_eq!(target.get(&WIDTH), 50.0);
    }

    #[test]
    fn unknown_property_fails_before_any_effect() {
        let source = Control::new(&GADGET);
        let target = Control::new(&BARE);
        source.set(&WIDTH, 25.0);

        let result = Binding::two_way(&source, &WIDTH, &target, &WIDTH);
        assert_matches!(result, Err(ref error) if error.class() == "Bare");
        assert_matches!(result, Err(ref error) if error.property() == WIDTH.key());

        // No residual wiring: the source keeps changing alone.
        source.set(&WIDTH, 50.0);
        assert_eq!(target.get(&WIDTH), 0.0);
        assert_eq!(
            result.unwrap_err().to_string(),
            "property `Gadget.width` is not registered on `Bare`"
        );
    }

    #[test]
    fn unbind_is_idempotent() {
        let source = Control::new(&GADGET);
        let target = Control::new(&GADGET);
        let binding = Binding::two_way(&source, &WIDTH, &target, &WIDTH).unwrap();

        binding.unbind();
        binding.unbind();
        assert!(!binding.is_attached());

        source.set(&WIDTH, 25.0);
        assert_eq!(target.get(&WIDTH), 0.0);
    }

    #[test]
    fn dropping_the_handle_detaches() {
        let source = Control::new(&GADGET);
        let target = Control::new(&GADGET);
        let binding = Binding::one_way(&source, &WIDTH, &target, &WIDTH).unwrap();
        drop(binding);

        source.set(&WIDTH, 25.0);
        assert_eq!(target.get(&WIDTH), 0.0);
    }

    #[test]
    fn rebinding_after_unbind_works() {
        let source = Control::new(&GADGET);
        let target = Control::new(&GADGET);
        let binding = Binding::two_way(&source, &WIDTH, &target, &WIDTH).unwrap();
        binding.unbind();

        source.set(&WIDTH, 25.0);
        let _binding = Binding::two_way(&source, &WIDTH, &target, &WIDTH).unwrap();
        assert_eq!(target.get(&WIDTH), 25.0);
        target.set(&WIDTH, 50.0);
        assert_eq!(source.get(&WIDTH), 50.0);
    }

    #[test]
    fn unbind_from_within_a_handler_is_safe() {
        let source = Control::new(&GADGET);
        let target = Control::new(&GADGET);
        let binding = Rc::new(Binding::two_way(&source, &WIDTH, &target, &WIDTH).unwrap());

        let armed = binding.clone();
        let _watch = target.subscribe(&WIDTH, move |_, _, _| {
            armed.unbind();
        });

        source.set(&WIDTH, 25.0);
        assert_eq!(target.get(&WIDTH), 25.0);
        assert!(!binding.is_attached());

        source.set(&WIDTH, 50.0);
        assert_eq!(target.get(&WIDTH), 25.0);
    }

    #[test]
    fn binding_set_detaches_on_clear() {
        let source = Control::new(&GADGET);
        let target = Control::new(&GADGET);
        let mut set = BindingSet::new();
        set.hold(Binding::one_way(&source, &WIDTH, &target, &WIDTH).unwrap());
        assert_eq!(set.len(), 1);

        set.clear();
        assert!(set.is_empty());
        source.set(&WIDTH, 25.0);
        assert_eq!(target.get(&WIDTH), 0.0);
    }
}
