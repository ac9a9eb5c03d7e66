// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0

use std::any::{Any, type_name};
use std::fmt;
use std::rc::Rc;

use crate::core::control::Control;
use crate::core::templates::{Datum, TemplateError};

/// Chooses and builds controls for runtime values.
///
/// `matches` is a plain predicate: a value of a foreign type is a non-match,
/// never an error. `build` is where type errors surface; callers are
/// expected to consult `matches` first, and a registry like
/// [`DataTemplates`] always does.
pub trait DataTemplate {
    /// Whether this template can present `data`.
    fn matches(&self, data: &Datum) -> bool;

    /// Builds the control presenting `data`.
    ///
    /// Building from a value the template does not accept reports
    /// [`TemplateError::InvalidCast`] naming the expected and actual types.
    fn build(&self, data: &Datum) -> Result<Control, TemplateError>;
}

/// A [`DataTemplate`] made from typed closures.
///
/// The closures see `&T`; the erased [`Datum`] plumbing stays inside. With
/// [`new`](Self::new) the template accepts every `T`; with
/// [`filtered`](Self::filtered) it also applies a predicate, so several
/// templates for one type can coexist in a registry.
pub struct FuncDataTemplate<T> {
    filter: Option<Box<dyn Fn(&T) -> bool>>,
    build: Box<dyn Fn(&T) -> Control>,
}

impl<T: Any> FuncDataTemplate<T> {
    /// A template accepting every value of type `T`.
    pub fn new(build: impl Fn(&T) -> Control + 'static) -> Self {
        Self {
            filter: None,
            build: Box::new(build),
        }
    }

    /// A template accepting values of type `T` that also pass `filter`.
    pub fn filtered(
        filter: impl Fn(&T) -> bool + 'static,
        build: impl Fn(&T) -> Control + 'static,
    ) -> Self {
        Self {
            filter: Some(Box::new(filter)),
            build: Box::new(build),
        }
    }
}

impl<T: Any> DataTemplate for FuncDataTemplate<T> {
    fn matches(&self, data: &Datum) -> bool {
        match data.downcast_ref::<T>() {
            Some(value) => self.filter.as_ref().is_none_or(|filter| filter(value)),
            None => false,
        }
    }

    fn build(&self, data: &Datum) -> Result<Control, TemplateError> {
        let Some(value) = data.downcast_ref::<T>() else {
            return Err(TemplateError::InvalidCast {
                expected: type_name::<T>(),
                actual: data.type_name(),
            });
        };
        Ok((self.build)(value))
    }
}

impl<T: 'static> fmt::Debug for FuncDataTemplate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuncDataTemplate")
            .field("data_type", &type_name::<T>())
            .field("filtered", &self.filter.is_some())
            .finish_non_exhaustive()
    }
}

/// An ordered registry of data templates.
///
/// Registration prepends: the template registered last is consulted first,
/// so local registrations override inherited ones. [`resolve`](Self::resolve)
/// returns the first match, falling back to the template installed with
/// [`set_fallback`](Self::set_fallback) when nothing matches.
///
/// Cloning shares the registered templates. Equality compares template
/// identities, which makes a registry usable as a property value.
#[derive(Clone, Default)]
pub struct DataTemplates {
    templates: Vec<Rc<dyn DataTemplate>>,
    fallback: Option<Rc<dyn DataTemplate>>,
}

impl DataTemplates {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a template, giving it priority over earlier registrations.
    pub fn register(&mut self, template: impl DataTemplate + 'static) {
        self.templates.insert(0, Rc::new(template));
    }

    /// Installs the template used when nothing matches.
    ///
    /// The fallback should match any value; it is built without a prior
    /// `matches` check.
    pub fn set_fallback(&mut self, template: impl DataTemplate + 'static) {
        self.fallback = Some(Rc::new(template));
    }

    /// Number of registered templates, the fallback not included.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether no templates are registered.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Builds a control for `data` using the first matching template.
    pub fn resolve(&self, data: &Datum) -> Result<Control, TemplateError> {
        for template in &self.templates {
            if template.matches(data) {
                return template.build(data);
            }
        }
        match &self.fallback {
            Some(fallback) => fallback.build(data),
            None => Err(TemplateError::NoTemplateFound {
                data_type: data.type_name(),
            }),
        }
    }
}

impl PartialEq for DataTemplates {
    fn eq(&self, other: &Self) -> bool {
        let fallbacks_match = match (&self.fallback, &other.fallback) {
            (None, None) => true,
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        };
        fallbacks_match
            && self.templates.len() == other.templates.len()
            && self
                .templates
                .iter()
                .zip(&other.templates)
                .all(|(a, b)| Rc::ptr_eq(a, b))
    }
}

impl fmt::Debug for DataTemplates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTemplates")
            .field("templates", &self.templates.len())
            .field("fallback", &self.fallback.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use assert_matches::assert_matches;

    use super::*;
    use crate::core::class::ControlClass;

    static PLAIN: LazyLock<ControlClass> = LazyLock::new(|| ControlClass::builder("Plain").build());
    static FANCY: LazyLock<ControlClass> = LazyLock::new(|| ControlClass::builder("Fancy").build());

    fn plain_strings() -> FuncDataTemplate<String> {
        FuncDataTemplate::new(|_| Control::new(&PLAIN))
    }

    #[test]
    fn foreign_types_are_a_non_match() {
        let template = plain_strings();
        assert!(template.matches(&Datum::new(String::from("yes"))));
        assert!(!template.matches(&Datum::new(42_u32)));
    }

    #[test]
    fn building_from_a_foreign_type_reports_both_types() {
        let template = plain_strings();
        let error = template.build(&Datum::new(42_u32)).unwrap_err();
        assert_matches!(
            error,
            TemplateError::InvalidCast { expected, actual }
                if expected == "alloc::string::String" && actual == "u32"
        );
    }

    #[test]
    fn filters_narrow_the_match() {
        let template = FuncDataTemplate::<String>::filtered(
            |s| s.starts_with('#'),
            |_| Control::new(&PLAIN),
        );
        assert!(template.matches(&Datum::new(String::from("#hex"))));
        assert!(!template.matches(&Datum::new(String::from("name"))));
    }

    #[test]
    fn the_most_recent_registration_wins() {
        let mut templates = DataTemplates::new();
        templates.register(plain_strings());
        templates.register(FuncDataTemplate::<String>::new(|_| Control::new(&FANCY)));

        let datum = Datum::new(String::from("text"));
        let control = templates.resolve(&datum).unwrap();
        assert_eq!(control.class().name(), "Fancy");
    }

    #[test]
    fn unmatched_values_fall_back_or_fail() {
        let mut templates = DataTemplates::new();
        templates.register(plain_strings());

        let datum = Datum::new(42_u32);
        assert_matches!(
            templates.resolve(&datum),
            Err(TemplateError::NoTemplateFound { data_type: "u32" })
        );

        templates.set_fallback(FuncDataTemplate::<u32>::new(|_| Control::new(&FANCY)));
        let control = templates.resolve(&datum).unwrap();
        assert_eq!(control.class().name(), "Fancy");
    }

    #[test]
    fn registries_compare_by_template_identity() {
        let mut a = DataTemplates::new();
        a.register(plain_strings());
        let b = a.clone();
        assert_eq!(a, b);

        let mut c = DataTemplates::new();
        c.register(plain_strings());
        assert_ne!(a, c);
    }
}
