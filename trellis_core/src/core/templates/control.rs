// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use crate::core::control::{Control, TypedControl};
use crate::core::templates::TemplateError;

/// Expands a templated control into its visual subtree.
///
/// Applied lazily and at most once per control instance; see
/// [`Control::apply_template`].
pub trait ControlTemplate {
    /// Builds the subtree for `control`.
    fn build(&self, control: &Control) -> Result<Control, TemplateError>;
}

/// A [`ControlTemplate`] made from a closure typed on the wrapper `W`.
///
/// Applying it to a control of any other class reports
/// [`TemplateError::InvalidCast`] naming both classes.
pub struct FuncControlTemplate<W> {
    build: Box<dyn Fn(&W) -> Control>,
}

impl<W: TypedControl> FuncControlTemplate<W> {
    /// Wraps a typed build closure.
    pub fn new(build: impl Fn(&W) -> Control + 'static) -> Self {
        Self {
            build: Box::new(build),
        }
    }
}

impl<W: TypedControl> ControlTemplate for FuncControlTemplate<W> {
    fn build(&self, control: &Control) -> Result<Control, TemplateError> {
        let Some(typed) = control.downcast::<W>() else {
            return Err(TemplateError::InvalidCast {
                expected: W::class().name(),
                actual: control.class().name(),
            });
        };
        Ok((self.build)(&typed))
    }
}

impl<W> fmt::Debug for FuncControlTemplate<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuncControlTemplate").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::sync::LazyLock;

    use assert_matches::assert_matches;

    use super::*;
    use crate::core::class::ControlClass;

    static INNER: LazyLock<ControlClass> = LazyLock::new(|| ControlClass::builder("Inner").build());
    static OUTER: LazyLock<ControlClass> = LazyLock::new(|| ControlClass::builder("Outer").build());
    static OTHER: LazyLock<ControlClass> = LazyLock::new(|| ControlClass::builder("Other").build());

    struct Outer {
        control: Control,
    }

    impl TypedControl for Outer {
        fn class() -> &'static ControlClass {
            &OUTER
        }

        fn from_control(control: Control) -> Self {
            Self { control }
        }

        fn control(&self) -> &Control {
            &self.control
        }
    }

    fn subtree(_: &Outer) -> Control {
        let root = Control::new(&INNER);
        let part = Control::new(&INNER);
        part.set_name("part");
        root.add_child(part);
        root
    }

    #[test]
    fn applying_builds_once_and_records_parts() {
        let outer = Control::new(&OUTER);
        outer.set_template(Rc::new(FuncControlTemplate::<Outer>::new(subtree)));

        assert!(outer.apply_template().unwrap());
        let part = outer.template_child("part").unwrap();
        assert_eq!(part.class().name(), "Inner");

        // Idempotent: same instance, same subtree, same parts.
        assert!(!outer.apply_template().unwrap());
        assert_eq!(outer.template_child("part").unwrap(), part);
    }

    #[test]
    fn applying_without_a_template_is_a_no_op() {
        let outer = Control::new(&OUTER);
        assert!(!outer.apply_template().unwrap());
        assert_eq!(outer.template_root(), None);
    }

    #[test]
    fn a_different_template_is_rejected() {
        let outer = Control::new(&OUTER);
        outer.set_template(Rc::new(FuncControlTemplate::<Outer>::new(subtree)));
        outer.apply_template().unwrap();
        let root = outer.template_root().unwrap();

        outer.set_template(Rc::new(FuncControlTemplate::<Outer>::new(|_| {
            Control::new(&INNER)
        })));
        assert_matches!(
            outer.apply_template(),
            Err(TemplateError::AlreadyApplied { class: "Outer" })
        );
        // The first expansion is untouched.
        assert_eq!(outer.template_root(), Some(root));
    }

    #[test]
    fn a_mismatched_control_leaves_no_trace() {
        let other = Control::new(&OTHER);
        other.set_template(Rc::new(FuncControlTemplate::<Outer>::new(subtree)));

        assert_matches!(
            other.apply_template(),
            Err(TemplateError::InvalidCast {
                expected: "Outer",
                actual: "Other"
            })
        );
        assert_eq!(other.template_root(), None);
        assert_eq!(other.template_child("part"), None);
    }

    #[test]
    fn realize_expands_nested_templates_lazily() {
        let outer = Control::new(&OUTER);
        outer.set_template(Rc::new(FuncControlTemplate::<Outer>::new(|_| {
            let root = Control::new(&OUTER);
            root.set_template(Rc::new(FuncControlTemplate::<Outer>::new(|_| {
                Control::new(&INNER)
            })));
            root
        })));

        // Nothing is expanded until asked for.
        assert_eq!(outer.template_root(), None);

        outer.realize().unwrap();
        let root = outer.template_root().unwrap();
        let nested = root.template_root().unwrap();
        assert_eq!(nested.class().name(), "Inner");

        // A second pass finds everything already expanded.
        outer.realize().unwrap();
        assert_eq!(outer.template_root(), Some(root));
    }
}
