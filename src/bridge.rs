//! Pointer and slider input for one bounded state value.
//!
//! The bridge never owns the value it controls. Every handler returns the
//! clamped value to store (or `None` when the input is ignored) and mirrors
//! that value onto the attached slider, so the widget and the view state
//! agree after every update from either side.

use log::debug;

use crate::coords::Interval;

/// An external control widget showing one number.
pub trait Slider {
    fn set_value(&mut self, value: f64);
}

/// How a state value is shown on its slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderScale {
    /// `[0,1]` state shown as `0..=100`.
    Percent,
    /// State shown as-is, rounded to an integer.
    Identity,
}

impl SliderScale {
    pub fn to_widget(self, value: f64) -> f64 {
        match self {
            SliderScale::Percent => (value * 100.0).round(),
            SliderScale::Identity => value.round(),
        }
    }

    pub fn from_widget(self, raw: f64) -> f64 {
        match self {
            SliderScale::Percent => raw / 100.0,
            SliderScale::Identity => raw.round(),
        }
    }
}

pub struct InteractionBridge {
    bounds: Interval,
    scale: SliderScale,
    drag_enabled: bool,
    sync_enabled: bool,
    dragging: bool,
    slider: Option<Box<dyn Slider>>,
}

impl InteractionBridge {
    pub fn new(bounds: Interval, scale: SliderScale) -> Self {
        Self {
            bounds,
            scale,
            drag_enabled: true,
            sync_enabled: true,
            dragging: false,
            slider: None,
        }
    }

    pub fn with_drag(mut self, enabled: bool) -> Self {
        self.drag_enabled = enabled;
        self
    }

    pub fn with_slider_sync(mut self, enabled: bool) -> Self {
        self.sync_enabled = enabled;
        self
    }

    pub fn bounds(&self) -> Interval {
        self.bounds
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn has_slider(&self) -> bool {
        self.slider.is_some()
    }

    /// Attach the widget and bring it in line with `current`.
    pub fn attach_slider(&mut self, slider: Box<dyn Slider>, current: f64) {
        self.slider = Some(slider);
        self.publish(current);
    }

    pub fn pointer_down(&mut self) {
        if self.drag_enabled {
            self.dragging = true;
        }
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    /// Pointer position as a fraction of the container width. Ignored
    /// unless a drag is in progress.
    pub fn pointer_move(&mut self, fraction: f64) -> Option<f64> {
        if !self.dragging || !fraction.is_finite() {
            return None;
        }
        let value = self.bounds.clamp(fraction);
        self.publish(value);
        Some(value)
    }

    /// Raw widget value from an input event.
    pub fn slider_input(&mut self, raw: f64) -> Option<f64> {
        if !raw.is_finite() {
            debug!("ignoring non-finite slider value");
            return None;
        }
        let value = self.bounds.clamp(self.scale.from_widget(raw));
        if self.scale.to_widget(value) != raw {
            self.publish(value);
        }
        Some(value)
    }

    /// Push a state value written elsewhere (animation, reset) to the widget.
    pub fn publish(&mut self, value: f64) {
        if !self.sync_enabled {
            return;
        }
        if let Some(slider) = self.slider.as_mut() {
            slider.set_value(self.scale.to_widget(value));
        }
    }
}
