// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0

//! A scroll bar: a composite control wired to its track part by bindings.

use std::fmt;
use std::sync::LazyLock;

use tracing::{trace, warn};
use trellis_core::core::{Binding, Control, ControlClass, Property, TypedControl};

use crate::widgets::range::{self, Orientation};
use crate::widgets::track::Track;

/// When a scroll bar shows itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollBarVisibility {
    /// Always shown.
    Visible,
    /// Never shown.
    Hidden,
    /// Shown while the viewport is smaller than the scrollable range.
    #[default]
    Auto,
}

/// The visibility policy.
pub static VISIBILITY: LazyLock<Property<ScrollBarVisibility>> =
    LazyLock::new(|| Property::new::<ScrollBar>("visibility", || ScrollBarVisibility::Auto));

/// Whether the bar is currently shown, computed from [`VISIBILITY`] and the
/// range properties. Read-only in spirit; the class keeps it up to date.
pub static IS_VISIBLE: LazyLock<Property<bool>> =
    LazyLock::new(|| Property::new::<ScrollBar>("is_visible", || true));

static CLASS: LazyLock<ControlClass> = LazyLock::new(|| {
    ControlClass::builder("ScrollBar")
        .with(&range::MINIMUM)
        .with(&range::MAXIMUM)
        .with(&range::VALUE)
        .with(&range::VIEWPORT_SIZE)
        .with(&range::ORIENTATION)
        .with(&VISIBILITY)
        .with(&IS_VISIBLE)
        .on_created(watch_visibility)
        .on_template_applied(wire_track)
        .build()
});

/// A scroll bar.
///
/// The control itself only holds the range state; its visual structure comes
/// from a control template, which must name its [`Track`] part `"track"`.
/// Once the template is applied the bar binds its range properties onto the
/// track: minimum, maximum, viewport size and orientation one-way, value
/// two-way, so dragging the track updates the bar and vice versa. The parts
/// are never reached into directly.
#[derive(Clone)]
pub struct ScrollBar {
    control: Control,
}

impl ScrollBar {
    /// Creates a scroll bar with no template set.
    pub fn new() -> Self {
        Self {
            control: Control::new(&CLASS),
        }
    }

    /// The lower bound of the scrolled range.
    pub fn minimum(&self) -> f64 {
        self.control.get(&range::MINIMUM)
    }

    /// Sets the lower bound of the scrolled range.
    pub fn set_minimum(&self, minimum: f64) {
        self.control.set(&range::MINIMUM, minimum);
    }

    /// The upper bound of the scrolled range.
    pub fn maximum(&self) -> f64 {
        self.control.get(&range::MAXIMUM)
    }

    /// Sets the upper bound of the scrolled range.
    pub fn set_maximum(&self, maximum: f64) {
        self.control.set(&range::MAXIMUM, maximum);
    }

    /// The current scroll position.
    pub fn value(&self) -> f64 {
        self.control.get(&range::VALUE)
    }

    /// Sets the current scroll position.
    pub fn set_value(&self, value: f64) {
        self.control.set(&range::VALUE, value);
    }

    /// How much of the scrollable extent is visible at once.
    pub fn viewport_size(&self) -> f64 {
        self.control.get(&range::VIEWPORT_SIZE)
    }

    /// Sets the viewport size. NaN means unknown.
    pub fn set_viewport_size(&self, viewport_size: f64) {
        self.control.set(&range::VIEWPORT_SIZE, viewport_size);
    }

    /// The axis of the bar.
    pub fn orientation(&self) -> Orientation {
        self.control.get(&range::ORIENTATION)
    }

    /// Sets the axis of the bar.
    pub fn set_orientation(&self, orientation: Orientation) {
        self.control.set(&range::ORIENTATION, orientation);
    }

    /// The visibility policy.
    pub fn visibility(&self) -> ScrollBarVisibility {
        self.control.get(&VISIBILITY)
    }

    /// Sets the visibility policy.
    pub fn set_visibility(&self, visibility: ScrollBarVisibility) {
        self.control.set(&VISIBILITY, visibility);
    }

    /// Whether the bar is currently shown.
    pub fn is_visible(&self) -> bool {
        self.control.get(&IS_VISIBLE)
    }
}

impl Default for ScrollBar {
    fn default() -> Self {
        Self::new()
    }
}

impl TypedControl for ScrollBar {
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

impl fmt::Debug for ScrollBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.control, f)
    }
}

fn watch_visibility(control: &Control) {
    control.retain_subscription(
        control.subscribe(&VISIBILITY, |control, _, _| update_visibility(control)),
    );
    control.retain_subscription(
        control.subscribe(&range::VIEWPORT_SIZE, |control, _, _| {
            update_visibility(control);
        }),
    );
    control.retain_subscription(
        control.subscribe(&range::MINIMUM, |control, _, _| update_visibility(control)),
    );
    control.retain_subscription(
        control.subscribe(&range::MAXIMUM, |control, _, _| update_visibility(control)),
    );
    update_visibility(control);
}

fn update_visibility(control: &Control) {
    let visible = match control.get(&VISIBILITY) {
        ScrollBarVisibility::Visible => true,
        ScrollBarVisibility::Hidden => false,
        ScrollBarVisibility::Auto => {
            let viewport = control.get(&range::VIEWPORT_SIZE);
            let extent = control.get(&range::MAXIMUM) - control.get(&range::MINIMUM);
            viewport.is_nan() || viewport < extent
        }
    };
    control.set(&IS_VISIBLE, visible);
}

fn wire_track(control: &Control) {
    let Some(track) = control.template_child("track") else {
        trace!(
            class = control.class().name(),
            "template names no `track` part, nothing to wire"
        );
        return;
    };
    if !track.is::<Track>() {
        warn!(
            class = track.class().name(),
            "the `track` part is not a Track, leaving it unwired"
        );
        return;
    }
    let bindings = [
        Binding::one_way(control, &range::MINIMUM, &track, &range::MINIMUM),
        Binding::one_way(control, &range::MAXIMUM, &track, &range::MAXIMUM),
        Binding::two_way(control, &range::VALUE, &track, &range::VALUE),
        Binding::one_way(control, &range::VIEWPORT_SIZE, &track, &range::VIEWPORT_SIZE),
        Binding::one_way(control, &range::ORIENTATION, &track, &range::ORIENTATION),
    ];
    for binding in bindings {
        let binding = binding.expect("ScrollBar and Track both register the range properties");
        control.retain_binding(binding);
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use trellis_core::core::FuncControlTemplate;

    use super::*;
    use crate::theme;
    use crate::widgets::TextBlock;

    fn templated() -> (ScrollBar, Control) {
        let scroll_bar = ScrollBar::new();
        scroll_bar
            .control()
            .set_template(theme::scroll_bar_template());
        scroll_bar.control().apply_template().unwrap();
        let track = scroll_bar.control().template_child("track").unwrap();
        (scroll_bar, track)
    }

    #[test]
    fn setting_value_updates_the_track() {
        let (scroll_bar, track) = templated();
        scroll_bar.set_value(50.0);
        assert_eq!(track.get(&range::VALUE), 50.0);
    }

    #[test]
    fn track_value_flows_back() {
        let (scroll_bar, track) = templated();
        track.set(&range::VALUE, 50.0);
        assert_eq!(scroll_bar.value(), 50.0);
    }

    #[test]
    fn the_last_write_wins_across_the_two_way_binding() {
        let (scroll_bar, track) = templated();
        scroll_bar.set_value(25.0);
        track.set(&range::VALUE, 50.0);
        assert_eq!(scroll_bar.value(), 50.0);
        assert_eq!(track.get(&range::VALUE), 50.0);
    }

    #[test]
    fn state_set_before_the_template_carries_into_the_track() {
        let scroll_bar = ScrollBar::new();
        scroll_bar.set_value(25.0);
        scroll_bar.set_maximum(200.0);
        scroll_bar
            .control()
            .set_template(theme::scroll_bar_template());
        scroll_bar.control().apply_template().unwrap();

        let track = scroll_bar.control().template_child("track").unwrap();
        assert_eq!(track.get(&range::VALUE), 25.0);
        assert_eq!(track.get(&range::MAXIMUM), 200.0);
    }

    #[test]
    fn range_properties_flow_one_way_only() {
        let (scroll_bar, track) = templated();
        scroll_bar.set_minimum(10.0);
        scroll_bar.set_orientation(Orientation::Horizontal);
        assert_eq!(track.get(&range::MINIMUM), 10.0);
        assert_eq!(track.get(&range::ORIENTATION), Orientation::Horizontal);

        track.set(&range::MINIMUM, 99.0);
        assert_eq!(scroll_bar.minimum(), 10.0);
    }

    #[test]
    fn template_child_returns_the_same_instance() {
        let (scroll_bar, track) = templated();
        let again = scroll_bar.control().template_child("track").unwrap();
        assert_eq!(track, again);
    }

    #[test]
    fn auto_hides_when_the_viewport_covers_the_range() {
        let scroll_bar = ScrollBar::new();
        scroll_bar.set_visibility(ScrollBarVisibility::Auto);
        scroll_bar.set_minimum(0.0);
        scroll_bar.set_maximum(100.0);
        scroll_bar.set_viewport_size(100.0);
        assert!(!scroll_bar.is_visible());
    }

    #[test]
    fn a_nan_viewport_never_auto_hides() {
        let scroll_bar = ScrollBar::new();
        scroll_bar.set_visibility(ScrollBarVisibility::Auto);
        scroll_bar.set_minimum(0.0);
        scroll_bar.set_maximum(100.0);
        scroll_bar.set_viewport_size(f64::NAN);
        assert!(scroll_bar.is_visible());
    }

    #[test]
    fn a_small_viewport_keeps_the_bar_visible() {
        let scroll_bar = ScrollBar::new();
        scroll_bar.set_viewport_size(10.0);
        assert!(scroll_bar.is_visible());
    }

    #[test]
    fn visible_overrides_auto_hiding() {
        let scroll_bar = ScrollBar::new();
        scroll_bar.set_visibility(ScrollBarVisibility::Visible);
        scroll_bar.set_minimum(0.0);
        scroll_bar.set_maximum(100.0);
        scroll_bar.set_viewport_size(100.0);
        assert!(scroll_bar.is_visible());
    }

    #[test]
    fn hidden_wins_over_a_scrollable_range() {
        let scroll_bar = ScrollBar::new();
        scroll_bar.set_visibility(ScrollBarVisibility::Hidden);
        scroll_bar.set_minimum(0.0);
        scroll_bar.set_maximum(100.0);
        scroll_bar.set_viewport_size(10.0);
        assert!(!scroll_bar.is_visible());
    }

    #[test]
    fn visibility_recomputes_when_the_range_grows() {
        let scroll_bar = ScrollBar::new();
        scroll_bar.set_viewport_size(100.0);
        assert!(!scroll_bar.is_visible());

        scroll_bar.set_maximum(200.0);
        assert!(scroll_bar.is_visible());
    }

    #[test]
    fn a_template_without_a_track_is_tolerated() {
        let scroll_bar = ScrollBar::new();
        scroll_bar
            .control()
            .set_template(Rc::new(FuncControlTemplate::<ScrollBar>::new(|_| {
                TextBlock::new("no track here").control().clone()
            })));
        scroll_bar.control().apply_template().unwrap();

        scroll_bar.set_value(25.0);
        assert_eq!(scroll_bar.value(), 25.0);
    }

    #[test]
    fn a_mistyped_track_part_is_left_unwired() {
        let scroll_bar = ScrollBar::new();
        scroll_bar
            .control()
            .set_template(Rc::new(FuncControlTemplate::<ScrollBar>::new(|_| {
                let imposter = TextBlock::new("imposter");
                imposter.control().set_name("track");
                imposter.control().clone()
            })));
        scroll_bar.control().apply_template().unwrap();

        scroll_bar.set_value(25.0);
        let imposter = scroll_bar.control().template_child("track").unwrap();
        assert_eq!(imposter.get(&range::VALUE), 0.0);
    }
}
