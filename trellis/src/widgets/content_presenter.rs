// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0

//! Presents an arbitrary value by resolving a data template for it.

use std::fmt;
use std::sync::LazyLock;

use tracing::warn;
use trellis_core::core::{Control, ControlClass, DataTemplates, Datum, Property, TypedControl};

use crate::widgets::text_block::TextBlock;

/// The value to present.
pub static CONTENT: LazyLock<Property<Option<Datum>>> =
    LazyLock::new(|| Property::new::<ContentPresenter>("content", || None));

/// The registry consulted to turn the content into a control.
pub static TEMPLATES: LazyLock<Property<DataTemplates>> =
    LazyLock::new(|| Property::new::<ContentPresenter>("templates", DataTemplates::new));

/// The control currently presenting the content.
static PRESENTED: LazyLock<Property<Option<Control>>> =
    LazyLock::new(|| Property::new::<ContentPresenter>("presented", || None));

static CLASS: LazyLock<ControlClass> = LazyLock::new(|| {
    ControlClass::builder("ContentPresenter")
        .with(&CONTENT)
        .with(&TEMPLATES)
        .with(&PRESENTED)
        .on_created(watch_content)
        .build()
});

/// A control that shows data instead of another control.
///
/// Whenever [`CONTENT`] or [`TEMPLATES`] change, the presenter resolves a
/// data template for the content and swaps the built control in as its only
/// structural child. A value no template matches (and no fallback catches)
/// is presented as a diagnostic [`TextBlock`] naming the unmatched type, so
/// a hole in the registry shows up on screen rather than failing the tree.
#[derive(Clone)]
pub struct ContentPresenter {
    control: Control,
}

impl ContentPresenter {
    /// Creates an empty presenter with an empty template registry.
    pub fn new() -> Self {
        Self {
            control: Control::new(&CLASS),
        }
    }

    /// The presented value.
    pub fn content(&self) -> Option<Datum> {
        self.control.get(&CONTENT)
    }

    /// Sets the value to present.
    pub fn set_content(&self, content: Datum) {
        self.control.set(&CONTENT, Some(content));
    }

    /// Clears the presented value.
    pub fn clear_content(&self) {
        self.control.set(&CONTENT, None);
    }

    /// The template registry.
    pub fn templates(&self) -> DataTemplates {
        self.control.get(&TEMPLATES)
    }

    /// Replaces the template registry.
    pub fn set_templates(&self, templates: DataTemplates) {
        self.control.set(&TEMPLATES, templates);
    }

    /// The control built for the current content, if any.
    pub fn presented(&self) -> Option<Control> {
        self.control.get(&PRESENTED)
    }
}

impl Default for ContentPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl TypedControl for ContentPresenter {
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

impl fmt::Debug for ContentPresenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.control, f)
    }
}

fn watch_content(control: &Control) {
    control.retain_subscription(control.subscribe(&CONTENT, |control, _, _| present(control)));
    control.retain_subscription(control.subscribe(&TEMPLATES, |control, _, _| present(control)));
}

fn present(control: &Control) {
    if let Some(old) = control.get(&PRESENTED) {
        control.remove_child(&old);
    }
    let presented = match control.get(&CONTENT) {
        Some(content) => {
            let templates = control.get(&TEMPLATES);
            match templates.resolve(&content) {
                Ok(built) => Some(built),
                Err(error) => {
                    warn!(%error, "presenting a diagnostic placeholder");
                    Some(TextBlock::new(error.to_string()).control().clone())
                }
            }
        }
        None => None,
    };
    control.set(&PRESENTED, presented.clone());
    if let Some(presented) = presented {
        control.add_child(presented);
    }
}

#[cfg(test)]
mod tests {
    use trellis_core::core::FuncDataTemplate;

    use super::*;
    use crate::widgets::text_block;

    fn string_templates() -> DataTemplates {
        let mut templates = DataTemplates::new();
        templates.register(FuncDataTemplate::<String>::new(|text| {
            TextBlock::new(text.as_str()).control().clone()
        }));
        templates
    }

    #[test]
    fn content_is_presented_as_a_child() {
        let presenter = ContentPresenter::new();
        presenter.set_templates(string_templates());
        presenter.set_content(Datum::new(String::from("hello")));

        let presented = presenter.presented().unwrap();
        assert_eq!(presenter.control().children(), vec![presented.clone()]);
        assert_eq!(presented.get(&text_block::TEXT), "hello");
    }

    #[test]
    fn new_content_replaces_the_presentation() {
        let presenter = ContentPresenter::new();
        presenter.set_templates(string_templates());
        presenter.set_content(Datum::new(String::from("first")));
        let first = presenter.presented().unwrap();

        presenter.set_content(Datum::new(String::from("second")));
        let second = presenter.presented().unwrap();
        assert_ne!(first, second);
        assert_eq!(presenter.control().children(), vec![second.clone()]);
        assert_eq!(second.get(&text_block::TEXT), "second");
    }

    #[test]
    fn clearing_content_removes_the_child() {
        let presenter = ContentPresenter::new();
        presenter.set_templates(string_templates());
        presenter.set_content(Datum::new(String::from("here")));
        presenter.clear_content();

        assert!(presenter.presented().is_none());
        assert!(presenter.control().children().is_empty());
    }

    #[test]
    fn an_unmatched_value_presents_a_diagnostic_placeholder() {
        let presenter = ContentPresenter::new();
        presenter.set_templates(string_templates());
        presenter.set_content(Datum::new(42_u32));

        let placeholder = presenter.presented().unwrap();
        let text = placeholder.get(&text_block::TEXT);
        assert!(text.contains("u32"), "placeholder text was {text:?}");
    }

    #[test]
    fn swapping_the_registry_re_presents() {
        let presenter = ContentPresenter::new();
        presenter.set_content(Datum::new(String::from("later")));
        let placeholder = presenter.presented().unwrap();
        assert!(placeholder.get(&text_block::TEXT).contains("String"));

        presenter.set_templates(string_templates());
        let presented = presenter.presented().unwrap();
        assert_eq!(presented.get(&text_block::TEXT), "later");
    }
}
