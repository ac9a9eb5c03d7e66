// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::core::binding::{Binding, BindingSet};
use crate::core::class::ControlClass;
use crate::core::property::{Property, PropertyKey, PropertyValue};
use crate::core::templates::{ControlTemplate, TemplateError};

/// A change notification delivered to property observers.
#[derive(Debug)]
pub struct PropertyChanged<'a> {
    /// The control whose property changed.
    pub control: &'a Control,
    /// The property that changed.
    pub property: PropertyKey,
    /// The value before the change (the descriptor default if never set).
    pub old: &'a dyn PropertyValue,
    /// The value after the change.
    pub new: &'a dyn PropertyValue,
}

struct Observer {
    id: u64,
    alive: Rc<Cell<bool>>,
    callback: Rc<dyn Fn(&PropertyChanged<'_>)>,
}

struct AppliedTemplate {
    template: Rc<dyn ControlTemplate>,
    root: Control,
    names: HashMap<String, Control>,
}

pub(crate) struct ControlInner {
    class: &'static ControlClass,
    name: RefCell<Option<String>>,
    values: RefCell<HashMap<PropertyKey, Box<dyn PropertyValue>>>,
    observers: RefCell<HashMap<PropertyKey, Vec<Observer>>>,
    next_observer: Cell<u64>,
    children: RefCell<Vec<Control>>,
    template: RefCell<Option<Rc<dyn ControlTemplate>>>,
    applied: RefCell<Option<AppliedTemplate>>,
    retained_subscriptions: RefCell<Vec<Subscription>>,
    retained_bindings: RefCell<BindingSet>,
}

/// A reactive object: a bag of observable property slots.
///
/// `Control` is a cheap handle (clone freely); equality is instance identity.
/// Every control belongs to a [`ControlClass`] fixed at construction, which
/// determines its registered properties and lifecycle hooks. Controls are
/// single-threaded, like the UI tree they form.
///
/// Reads fall back to the descriptor default, so `get` never fails and slots
/// take no space until first written. Writes that don't change the effective
/// value are dropped; real changes synchronously notify every observer of
/// that property before `set` returns.
#[derive(Clone)]
pub struct Control {
    inner: Rc<ControlInner>,
}

/// Weak counterpart of [`Control`], for observers that must not keep the
/// control alive.
#[derive(Clone)]
pub struct WeakControl {
    inner: Weak<ControlInner>,
}

impl WeakControl {
    /// Upgrades back to a strong handle if the control is still alive.
    pub fn upgrade(&self) -> Option<Control> {
        self.inner.upgrade().map(|inner| Control { inner })
    }
}

impl fmt::Debug for WeakControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WeakControl")
    }
}

/// Implemented by the typed wrapper structs around [`Control`].
///
/// A wrapper ties a class to a Rust type so that class membership can be
/// checked with [`Control::downcast`], and so control templates can hand
/// their build closure the typed wrapper instead of a raw handle.
pub trait TypedControl: Sized {
    /// The class every instance of this wrapper belongs to.
    fn class() -> &'static ControlClass;

    /// Wraps a control known to belong to [`Self::class`].
    ///
    /// Prefer [`Control::downcast`], which checks the class first.
    fn from_control(control: Control) -> Self;

    /// The underlying control handle.
    fn control(&self) -> &Control;
}

impl Control {
    /// Creates a control of the given class and runs its `on_created` hook.
    pub fn new(class: &'static ControlClass) -> Self {
        let control = Self {
            inner: Rc::new(ControlInner {
                class,
                name: RefCell::new(None),
                values: RefCell::new(HashMap::new()),
                observers: RefCell::new(HashMap::new()),
                next_observer: Cell::new(0),
                children: RefCell::new(Vec::new()),
                template: RefCell::new(None),
                applied: RefCell::new(None),
                retained_subscriptions: RefCell::new(Vec::new()),
                retained_bindings: RefCell::new(BindingSet::new()),
            }),
        };
        if let Some(hook) = class.created_hook() {
            hook(&control);
        }
        control
    }

    /// The control's class.
    pub fn class(&self) -> &'static ControlClass {
        self.inner.class
    }

    /// The control's name, used to look template parts up.
    pub fn name(&self) -> Option<String> {
        self.inner.name.borrow().clone()
    }

    /// Names the control.
    pub fn set_name(&self, name: impl Into<String>) {
        *self.inner.name.borrow_mut() = Some(name.into());
    }

    /// Downgrades to a weak handle.
    pub fn downgrade(&self) -> WeakControl {
        WeakControl {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Whether this control belongs to `W`'s class.
    pub fn is<W: TypedControl>(&self) -> bool {
        std::ptr::eq(self.inner.class, W::class())
    }

    /// Returns the typed wrapper if this control belongs to `W`'s class.
    pub fn downcast<W: TypedControl>(&self) -> Option<W> {
        self.is::<W>().then(|| W::from_control(self.clone()))
    }

    /// Reads a property, falling back to the descriptor default.
    pub fn get<T: PropertyValue + Clone>(&self, property: &Property<T>) -> T {
        self.inner
            .values
            .borrow()
            .get(&property.key())
            .and_then(|stored| stored.as_any().downcast_ref::<T>())
            .cloned()
            .unwrap_or_else(|| property.default_value())
    }

    /// Writes a property.
    ///
    /// Writing the current effective value (stored or default) is a no-op.
    /// Otherwise the value is stored and every observer of the property is
    /// notified, synchronously, before this returns; cascaded writes from
    /// inside observers nest the same way.
    pub fn set<T: PropertyValue + Clone>(&self, property: &Property<T>, value: T) {
        let key = property.key();
        let old: Box<dyn PropertyValue> = {
            let mut values = self.inner.values.borrow_mut();
            match values.entry(key) {
                Entry::Occupied(mut entry) => {
                    if entry.get().dyn_eq(&value) {
                        return;
                    }
                    entry.insert(Box::new(value.clone()))
                }
                Entry::Vacant(entry) => {
                    let default = property.default_value();
                    if default.dyn_eq(&value) {
                        return;
                    }
                    entry.insert(Box::new(value.clone()));
                    Box::new(default)
                }
            }
        };
        trace!(
            class = self.inner.class.name(),
            property = %key,
            old = ?old,
            new = ?value,
            "property changed"
        );
        self.notify(key, &*old, &value);
    }

    /// Observes changes of one property.
    ///
    /// The callback receives the control, the old value and the new value.
    /// The returned [`Subscription`] detaches when dropped; use
    /// [`retain_subscription`](Self::retain_subscription) to keep it for the
    /// control's lifetime.
    pub fn subscribe<T, F>(&self, property: &Property<T>, callback: F) -> Subscription
    where
        T: PropertyValue,
        F: Fn(&Control, &T, &T) + 'static,
    {
        let key = property.key();
        let id = self.inner.next_observer.get();
        self.inner.next_observer.set(id + 1);
        let alive = Rc::new(Cell::new(true));
        let erased: Rc<dyn Fn(&PropertyChanged<'_>)> = Rc::new(move |event: &PropertyChanged<'_>| {
            let (Some(old), Some(new)) = (
                event.old.as_any().downcast_ref::<T>(),
                event.new.as_any().downcast_ref::<T>(),
            ) else {
                return;
            };
            callback(event.control, old, new);
        });
        self.inner
            .observers
            .borrow_mut()
            .entry(key)
            .or_default()
            .push(Observer {
                id,
                alive: alive.clone(),
                callback: erased,
            });
        Subscription {
            control: Rc::downgrade(&self.inner),
            key,
            id,
            alive,
        }
    }

    /// Keeps a subscription alive as long as this control.
    pub fn retain_subscription(&self, subscription: Subscription) {
        self.inner
            .retained_subscriptions
            .borrow_mut()
            .push(subscription);
    }

    /// Keeps a binding alive as long as this control.
    pub fn retain_binding(&self, binding: Binding) {
        self.inner.retained_bindings.borrow_mut().hold(binding);
    }

    fn notify(&self, key: PropertyKey, old: &dyn PropertyValue, new: &dyn PropertyValue) {
        // Snapshot first: observers may subscribe or unsubscribe from inside
        // their callbacks, and the list must not be borrowed while they run.
        type ObserverRef = (Rc<Cell<bool>>, Rc<dyn Fn(&PropertyChanged<'_>)>);
        let snapshot: SmallVec<[ObserverRef; 4]> = {
            let observers = self.inner.observers.borrow();
            let Some(list) = observers.get(&key) else {
                return;
            };
            list.iter()
                .map(|observer| (observer.alive.clone(), observer.callback.clone()))
                .collect()
        };
        let event = PropertyChanged {
            control: self,
            property: key,
            old,
            new,
        };
        for (alive, callback) in &snapshot {
            if alive.get() {
                callback(&event);
            }
        }
    }

    /// The structural children, in insertion order.
    pub fn children(&self) -> Vec<Control> {
        self.inner.children.borrow().clone()
    }

    /// Appends a structural child.
    pub fn add_child(&self, child: Control) {
        self.inner.children.borrow_mut().push(child);
    }

    /// Removes a structural child by identity.
    pub fn remove_child(&self, child: &Control) {
        self.inner
            .children
            .borrow_mut()
            .retain(|existing| existing != child);
    }

    /// Sets the control template to expand on [`apply_template`](Self::apply_template).
    pub fn set_template(&self, template: Rc<dyn ControlTemplate>) {
        *self.inner.template.borrow_mut() = Some(template);
    }

    /// The template set on this control, applied or not.
    pub fn template(&self) -> Option<Rc<dyn ControlTemplate>> {
        self.inner.template.borrow().clone()
    }

    /// Expands the control template, once.
    ///
    /// Returns `Ok(true)` when the template was built, and `Ok(false)` when
    /// there is nothing to do: no template is set, or the currently set
    /// template instance is already applied (the subtree and its part
    /// identities are kept as they are). Applying after a *different*
    /// template was already applied is refused with
    /// [`TemplateError::AlreadyApplied`], leaving the first expansion intact.
    ///
    /// On success the built subtree is walked and named controls are recorded
    /// as template parts, then the class's `on_template_applied` hook runs.
    /// On failure nothing is recorded.
    pub fn apply_template(&self) -> Result<bool, TemplateError> {
        let Some(template) = self.template() else {
            return Ok(false);
        };
        {
            let applied = self.inner.applied.borrow();
            if let Some(applied) = &*applied {
                if Rc::ptr_eq(&applied.template, &template) {
                    return Ok(false);
                }
                return Err(TemplateError::AlreadyApplied {
                    class: self.inner.class.name(),
                });
            }
        }
        let root = template.build(self)?;
        let mut names = HashMap::new();
        collect_named(&root, &mut names);
        *self.inner.applied.borrow_mut() = Some(AppliedTemplate {
            template,
            root,
            names,
        });
        debug!(class = self.inner.class.name(), "applied control template");
        if let Some(hook) = self.inner.class.template_applied_hook() {
            hook(self);
        }
        Ok(true)
    }

    /// Looks a named part of the applied template up.
    ///
    /// Returns the same control instance on every call.
    pub fn template_child(&self, name: &str) -> Option<Control> {
        self.inner
            .applied
            .borrow()
            .as_ref()
            .and_then(|applied| applied.names.get(name).cloned())
    }

    /// The root of the applied template subtree, if any.
    pub fn template_root(&self) -> Option<Control> {
        self.inner
            .applied
            .borrow()
            .as_ref()
            .map(|applied| applied.root.clone())
    }

    /// Applies templates through the whole subtree.
    ///
    /// This is the realization pass a render pipeline runs before first
    /// layout: templates stay unexpanded until someone needs the tree.
    pub fn realize(&self) -> Result<(), TemplateError> {
        self.apply_template()?;
        if let Some(root) = self.template_root() {
            root.realize()?;
        }
        for child in self.children() {
            child.realize()?;
        }
        Ok(())
    }
}

impl PartialEq for Control {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Control {}

impl fmt::Debug for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct(self.inner.class.name());
        if let Some(name) = self.name() {
            debug.field("name", &name);
        }
        if let Some(root) = self.template_root() {
            debug.field("template", &root);
        }
        let children = self.inner.children.borrow();
        if !children.is_empty() {
            debug.field("children", &*children);
        }
        debug.finish_non_exhaustive()
    }
}

fn collect_named(control: &Control, names: &mut HashMap<String, Control>) {
    if let Some(name) = control.name() {
        match names.entry(name) {
            Entry::Occupied(entry) => {
                warn!(
                    name = entry.key().as_str(),
                    "duplicate part name in template, keeping the first"
                );
            }
            Entry::Vacant(entry) => {
                entry.insert(control.clone());
            }
        }
    }
    for child in control.children() {
        collect_named(&child, names);
    }
}

/// Handle to a property observer; detaches when dropped.
pub struct Subscription {
    control: Weak<ControlInner>,
    key: PropertyKey,
    id: u64,
    alive: Rc<Cell<bool>>,
}

impl Subscription {
    /// Detaches the observer. Safe to call more than once, and from inside a
    /// change notification.
    pub fn unsubscribe(&self) {
        if !self.alive.replace(false) {
            return;
        }
        if let Some(inner) = self.control.upgrade() {
            let mut observers = inner.observers.borrow_mut();
            if let Some(list) = observers.get_mut(&self.key) {
                list.retain(|observer| observer.id != self.id);
            }
        }
    }

    /// Whether the observer is still attached.
    pub fn is_attached(&self) -> bool {
        self.alive.get()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("property", &self.key)
            .field("attached", &self.alive.get())
            .finish_non_exhaustive()
    }
}
