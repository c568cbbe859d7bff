use std::str::FromStr;

use log::{debug, warn};

use crate::bridge::{InteractionBridge, Slider, SliderScale};
use crate::clock::{self, AnimationClock};
use crate::config::ViewConfig;
use crate::coords::{Interval, PlotWindow};
use crate::error::{Result, VizError};
use crate::functions::{FunctionEntry, FunctionRegistry};
use crate::numeric::{self, FINE_DX};
use crate::sampler;
use crate::scene::{palette, Scene};

use super::Visualization;

const DEFAULT_POINT: f64 = 0.5;
const DEFAULT_DX: f64 = 0.1;
const DX_RANGE: Interval = Interval { lo: 0.01, hi: 0.5 };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DerivativeMode {
    /// Tangent line from a fine central difference.
    #[default]
    Tangent,
    /// Secant line over the user-chosen step.
    Secant,
}

impl FromStr for DerivativeMode {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tangent" | "slope" => Ok(DerivativeMode::Tangent),
            "secant" => Ok(DerivativeMode::Secant),
            other => Err(VizError::UnknownMode(other.to_string())),
        }
    }
}

/// A curve with its tangent (or secant) line at a movable point.
pub struct DerivativeView {
    function: FunctionEntry,
    segments: usize,
    mode: DerivativeMode,
    point: f64,
    dx: f64,
    show_tangent: bool,
    clock: AnimationClock,
    bridge: InteractionBridge,
}

impl DerivativeView {
    pub fn new(config: &ViewConfig, registry: &FunctionRegistry) -> Result<Self> {
        let function = *registry.try_get(config.function.as_deref().unwrap_or("sine"))?;
        let bridge = InteractionBridge::new(function.domain(), SliderScale::Percent)
            .with_drag(config.enable_drag)
            .with_slider_sync(config.enable_slider_sync);
        Ok(Self {
            function,
            segments: config.curve_segments,
            mode: DerivativeMode::default(),
            point: function.domain().clamp(DEFAULT_POINT),
            dx: DEFAULT_DX,
            show_tangent: false,
            clock: AnimationClock::new(config.time_step),
            bridge,
        })
    }

    pub fn point(&self) -> f64 {
        self.point
    }

    pub fn mode(&self) -> DerivativeMode {
        self.mode
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn is_showing_tangent(&self) -> bool {
        self.show_tangent
    }

    pub fn show_tangent(&mut self) {
        self.show_tangent = true;
    }

    pub fn set_mode(&mut self, mode: DerivativeMode) {
        debug!("derivative mode {mode:?}");
        self.mode = mode;
    }

    /// Step for secant mode, clamped to `[0.01, 0.5]`.
    pub fn set_dx(&mut self, dx: f64) -> Result<()> {
        if !dx.is_finite() {
            return Err(VizError::InvalidStep(dx));
        }
        self.dx = DX_RANGE.clamp(dx);
        Ok(())
    }

    pub fn set_point(&mut self, point: f64) {
        self.point = self.function.domain().clamp(point);
        self.bridge.publish(self.point);
    }

    fn step(&self) -> f64 {
        match self.mode {
            DerivativeMode::Tangent => FINE_DX,
            DerivativeMode::Secant => self.dx,
        }
    }

    /// Slope of the line currently drawn through the point.
    pub fn slope(&self) -> Result<f64> {
        numeric::derivative_at(&self.function, self.point, self.step())
    }
}

impl Visualization for DerivativeView {
    fn window(&self) -> PlotWindow {
        PlotWindow::new(self.function.domain(), self.function.range())
    }

    fn is_animating(&self) -> bool {
        self.clock.is_running()
    }

    fn is_interacting(&self) -> bool {
        self.bridge.is_dragging()
    }

    fn advance(&mut self, frame_delta: f64) {
        if let Some(time) = self.clock.advance(frame_delta) {
            self.set_point(clock::oscillating_point(time));
        }
    }

    fn draw_curve(&self, scene: &mut Scene) {
        match sampler::sample(&self.function, self.segments) {
            Ok(curve) => {
                for run in curve.runs() {
                    scene.polyline(run, palette::CURVE);
                }
            }
            Err(err) => warn!("derivative curve: {err}"),
        }
    }

    fn draw_overlay(&self, scene: &mut Scene) {
        if !self.show_tangent && !self.is_animating() {
            return;
        }
        let slope = match self.slope() {
            Ok(slope) => slope,
            Err(err) => {
                debug!("no tangent at {}: {err}", self.point);
                return;
            }
        };
        let Some(y) = self.function.eval(self.point) else {
            return;
        };
        let domain = self.function.domain();
        let line = |x: f64| (x, y + slope * (x - self.point));
        scene.polyline([line(domain.lo()), line(domain.hi())], palette::HIGHLIGHT);

        if self.mode == DerivativeMode::Secant {
            let (lo, hi) = numeric::difference_window(domain, self.point, self.dx);
            let ends = [lo, hi]
                .into_iter()
                .filter_map(|x| self.function.eval(x).map(|y| (x, y)));
            scene.points(ends, palette::ARROW, 6.0);
        }
        scene.points([(self.point, y)], palette::HIGHLIGHT, 8.0);
    }

    fn start_animation(&mut self) {
        self.clock.start();
        self.show_tangent = true;
    }

    fn toggle_animation(&mut self) {
        if self.clock.is_running() {
            self.clock.stop();
        } else {
            self.start_animation();
        }
    }

    fn reset(&mut self) {
        self.clock.reset();
        self.mode = DerivativeMode::default();
        self.dx = DEFAULT_DX;
        self.show_tangent = false;
        self.set_point(DEFAULT_POINT);
    }

    fn pointer_down(&mut self) {
        self.bridge.pointer_down();
    }

    fn pointer_move(&mut self, fraction: f64) {
        if let Some(point) = self.bridge.pointer_move(fraction) {
            self.point = point;
            self.show_tangent = true;
        }
    }

    fn pointer_up(&mut self) {
        self.bridge.pointer_up();
    }

    fn slider_input(&mut self, raw: f64) {
        if let Some(point) = self.bridge.slider_input(raw) {
            self.point = point;
            self.show_tangent = true;
        }
    }

    fn attach_slider(&mut self, slider: Box<dyn Slider>) {
        self.bridge.attach_slider(slider, self.point);
    }
}
