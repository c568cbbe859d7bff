//! Per-view presets and the overrides a page may pass when mounting.

use serde::Deserialize;

use crate::clock::ClockStep;
use crate::coords::Interval;
use crate::error::{Result, VizError};
use crate::numeric::RiemannRule;
use crate::scene::{palette, Rgba};

#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    /// Pointer drag on the canvas moves the controlled value.
    pub enable_drag: bool,
    /// State changes are mirrored onto the slider.
    pub enable_slider_sync: bool,
    /// Skip redrawing frames when nothing changed.
    pub skip_idle_frames: bool,
    /// Seconds after mounting before the animation starts on its own.
    pub auto_start_delay: Option<f64>,
    pub preserve_aspect: bool,
    pub curve_segments: usize,
    pub time_step: ClockStep,
    pub background: Rgba,
    pub slider_id: Option<String>,
    pub function: Option<String>,
    pub bounds: Option<Interval>,
    pub rule: RiemannRule,
}

impl ViewConfig {
    fn base(slider_id: Option<&str>) -> Self {
        Self {
            enable_drag: false,
            enable_slider_sync: true,
            skip_idle_frames: true,
            auto_start_delay: None,
            preserve_aspect: false,
            curve_segments: 199,
            time_step: ClockStep::default(),
            background: palette::DARK_BACKGROUND,
            slider_id: slider_id.map(str::to_string),
            function: None,
            bounds: None,
            rule: RiemannRule::Left,
        }
    }

    pub fn derivative() -> Self {
        Self {
            function: Some("sine".to_string()),
            ..Self::base(Some("derivative-slider"))
        }
    }

    pub fn integral() -> Self {
        Self {
            function: Some("sine_bump".to_string()),
            bounds: Some(Interval::UNIT),
            ..Self::base(Some("integral-slider"))
        }
    }

    pub fn limit() -> Self {
        Self {
            enable_drag: true,
            curve_segments: 999,
            ..Self::base(Some("limit-slider"))
        }
    }

    pub fn fraction() -> Self {
        Self {
            auto_start_delay: Some(1.0),
            preserve_aspect: true,
            skip_idle_frames: false,
            background: palette::LIGHT_BACKGROUND,
            ..Self::base(None)
        }
    }

    pub fn transform() -> Self {
        Self::base(None)
    }

    pub fn apply(mut self, overrides: ConfigOverrides) -> Result<Self> {
        if let Some(v) = overrides.enable_drag {
            self.enable_drag = v;
        }
        if let Some(v) = overrides.enable_slider_sync {
            self.enable_slider_sync = v;
        }
        if let Some(v) = overrides.skip_idle_frames {
            self.skip_idle_frames = v;
        }
        if let Some(delay) = overrides.auto_start_delay {
            if !(delay.is_finite() && delay >= 0.0) {
                return Err(VizError::Config(format!("autoStartDelay must be >= 0, got {delay}")));
            }
            self.auto_start_delay = Some(delay);
        }
        if overrides.disable_auto_start == Some(true) {
            self.auto_start_delay = None;
        }
        if let Some(v) = overrides.preserve_aspect {
            self.preserve_aspect = v;
        }
        if let Some(segments) = overrides.curve_segments {
            if segments == 0 {
                return Err(VizError::NoSegments);
            }
            self.curve_segments = segments;
        }
        if let Some(step) = overrides.time_step {
            if let ClockStep::Fixed(s) = step {
                if !(s.is_finite() && s > 0.0) {
                    return Err(VizError::InvalidStep(s));
                }
            }
            self.time_step = step;
        }
        if let Some(v) = overrides.background {
            self.background = v;
        }
        if let Some(v) = overrides.slider_id {
            self.slider_id = Some(v);
        }
        if let Some(v) = overrides.function {
            self.function = Some(v);
        }
        if let Some(v) = overrides.bounds {
            self.bounds = Some(v);
        }
        if let Some(v) = overrides.rule {
            self.rule = v;
        }
        Ok(self)
    }
}

/// Options a page passes when mounting a view. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigOverrides {
    pub enable_drag: Option<bool>,
    pub enable_slider_sync: Option<bool>,
    pub skip_idle_frames: Option<bool>,
    pub auto_start_delay: Option<f64>,
    pub disable_auto_start: Option<bool>,
    pub preserve_aspect: Option<bool>,
    pub curve_segments: Option<usize>,
    pub time_step: Option<ClockStep>,
    pub background: Option<Rgba>,
    pub slider_id: Option<String>,
    pub function: Option<String>,
    pub bounds: Option<Interval>,
    pub rule: Option<RiemannRule>,
}
