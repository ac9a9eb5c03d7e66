// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0

//! Default templates for the standard controls.

use std::rc::Rc;

use trellis_core::core::{
    Control, ControlTemplate, DataTemplate, DataTemplates, Datum, FuncControlTemplate,
    FuncDataTemplate, TemplateError, TypedControl,
};
use trellis_core::media::Brush;

use crate::palette::css;
use crate::widgets::{Border, ScrollBar, TextBlock, Thumb, Track};

/// The brush the default thumb template paints with.
pub const THUMB_BRUSH: Brush = Brush::solid(css::GRAY);

/// The default [`ScrollBar`] template.
///
/// A [`Border`] holding a [`Track`] named `"track"`, which carries a themed
/// [`Thumb`]. The scroll bar finds the track by name and wires it up with
/// bindings once the template is applied.
pub fn scroll_bar_template() -> Rc<dyn ControlTemplate> {
    Rc::new(FuncControlTemplate::<ScrollBar>::new(|_| {
        let thumb = Thumb::new();
        thumb.control().set_template(thumb_template());
        let track = Track::new().with_thumb(&thumb);
        track.control().set_name("track");
        Border::new().with_child(track.control()).control().clone()
    }))
}

/// The default [`Thumb`] template: a gray [`Border`].
pub fn thumb_template() -> Rc<dyn ControlTemplate> {
    Rc::new(FuncControlTemplate::<Thumb>::new(|_| {
        Border::new().with_background(THUMB_BRUSH).control().clone()
    }))
}

/// A data template that accepts anything and renders its debug text.
///
/// Registry fallbacks use this so unmatched values still show up somewhere
/// readable.
#[derive(Debug, Default)]
pub struct FallbackTextTemplate;

impl DataTemplate for FallbackTextTemplate {
    fn matches(&self, _data: &Datum) -> bool {
        true
    }

    fn build(&self, data: &Datum) -> Result<Control, TemplateError> {
        Ok(TextBlock::new(format!("{data:?}")).control().clone())
    }
}

/// A ready-made [`FallbackTextTemplate`].
pub fn fallback_text_template() -> FallbackTextTemplate {
    FallbackTextTemplate
}

/// The default data-template registry: strings render as [`TextBlock`]s and
/// everything else falls back to its debug text.
pub fn default_data_templates() -> DataTemplates {
    let mut templates = DataTemplates::new();
    templates.register(FuncDataTemplate::<String>::new(|text| {
        TextBlock::new(text.as_str()).control().clone()
    }));
    templates.set_fallback(FallbackTextTemplate);
    templates
}
