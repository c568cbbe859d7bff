use log::{debug, warn};

use crate::bridge::{InteractionBridge, Slider, SliderScale};
use crate::clock::{self, AnimationClock};
use crate::config::ViewConfig;
use crate::coords::{Interval, PlotWindow};
use crate::error::Result;
use crate::functions::{FunctionEntry, FunctionRegistry};
use crate::numeric::{self, RiemannRect, RiemannRule};
use crate::sampler;
use crate::scene::{palette, Scene};

use super::Visualization;

pub const MIN_RECTANGLES: usize = 1;
pub const MAX_RECTANGLES: usize = 50;
const DEFAULT_RECTANGLES: usize = 10;
const ANIMATION_MIN: usize = 4;
const ANIMATION_RANGE: usize = 46;

/// A curve with the rectangles of a Riemann sum under it.
pub struct IntegralView {
    registry: FunctionRegistry,
    default_function: FunctionEntry,
    function: FunctionEntry,
    default_bounds: Interval,
    bounds: Interval,
    default_rule: RiemannRule,
    rule: RiemannRule,
    rectangles: usize,
    show_area: bool,
    segments: usize,
    clock: AnimationClock,
    bridge: InteractionBridge,
}

impl IntegralView {
    pub fn new(config: &ViewConfig, registry: &FunctionRegistry) -> Result<Self> {
        let function = *registry.try_get(config.function.as_deref().unwrap_or("sine_bump"))?;
        let bounds = config
            .bounds
            .unwrap_or(function.domain())
            .intersect(&function.domain())?;
        let count_bounds = Interval::new(MIN_RECTANGLES as f64, MAX_RECTANGLES as f64)?;
        let bridge = InteractionBridge::new(count_bounds, SliderScale::Identity)
            .with_drag(false)
            .with_slider_sync(config.enable_slider_sync);
        Ok(Self {
            registry: registry.clone(),
            default_function: function,
            function,
            default_bounds: bounds,
            bounds,
            default_rule: config.rule,
            rule: config.rule,
            rectangles: DEFAULT_RECTANGLES,
            show_area: false,
            segments: config.curve_segments,
            clock: AnimationClock::new(config.time_step),
            bridge,
        })
    }

    pub fn function(&self) -> &FunctionEntry {
        &self.function
    }

    pub fn bounds(&self) -> Interval {
        self.bounds
    }

    pub fn rule(&self) -> RiemannRule {
        self.rule
    }

    pub fn rectangles(&self) -> usize {
        self.rectangles
    }

    pub fn is_showing_area(&self) -> bool {
        self.show_area
    }

    /// Show the rectangles and freeze their count.
    pub fn add_rectangles(&mut self) {
        self.show_area = true;
        self.clock.stop();
    }

    /// Toggle the pulsing rectangle-count animation.
    pub fn show_area(&mut self) {
        self.toggle_animation();
    }

    pub fn set_function(&mut self, name: &str) -> Result<()> {
        let function = *self.registry.try_get(name)?;
        self.bounds = self
            .bounds
            .intersect(&function.domain())
            .unwrap_or(function.domain());
        self.function = function;
        debug!("integral function {name}");
        Ok(())
    }

    /// Integration bounds, clamped to the function's domain.
    pub fn set_bounds(&mut self, lower: f64, upper: f64) -> Result<()> {
        self.bounds = Interval::new(lower, upper)?.intersect(&self.function.domain())?;
        Ok(())
    }

    pub fn set_rule(&mut self, rule: RiemannRule) {
        self.rule = rule;
    }

    pub fn set_rectangles(&mut self, n: usize) {
        self.rectangles = n.clamp(MIN_RECTANGLES, MAX_RECTANGLES);
        self.bridge.publish(self.rectangles as f64);
    }

    pub fn riemann_rectangles(&self) -> Result<Vec<RiemannRect>> {
        numeric::riemann_rectangles(
            &self.function,
            self.bounds.lo(),
            self.bounds.hi(),
            self.rectangles,
            self.rule,
        )
    }

    /// Current Riemann-sum approximation.
    pub fn area(&self) -> Result<f64> {
        numeric::riemann_sum(
            &self.function,
            self.bounds.lo(),
            self.bounds.hi(),
            self.rectangles,
            self.rule,
        )
    }
}

impl Visualization for IntegralView {
    fn window(&self) -> PlotWindow {
        PlotWindow::new(self.function.domain(), self.function.range())
    }

    fn is_animating(&self) -> bool {
        self.clock.is_running()
    }

    fn advance(&mut self, frame_delta: f64) {
        if let Some(time) = self.clock.advance(frame_delta) {
            self.set_rectangles(clock::rectangle_count(time, ANIMATION_MIN, ANIMATION_RANGE));
        }
    }

    fn draw_curve(&self, scene: &mut Scene) {
        match sampler::sample(&self.function, self.segments) {
            Ok(curve) => {
                for run in curve.runs() {
                    scene.polyline(run, palette::CURVE);
                }
            }
            Err(err) => warn!("integral curve: {err}"),
        }
    }

    fn draw_overlay(&self, scene: &mut Scene) {
        if !self.show_area {
            return;
        }
        let rects = match self.riemann_rectangles() {
            Ok(rects) => rects,
            Err(err) => {
                warn!("riemann rectangles: {err}");
                return;
            }
        };
        let baseline = self.function.range().clamp(0.0);
        for rect in rects {
            scene.rect(rect.x0, baseline, rect.x1, rect.height, palette::AREA);
        }
    }

    fn start_animation(&mut self) {
        self.clock.start();
        self.show_area = true;
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
        self.function = self.default_function;
        self.bounds = self.default_bounds;
        self.rule = self.default_rule;
        self.show_area = false;
        self.set_rectangles(DEFAULT_RECTANGLES);
    }

    fn slider_input(&mut self, raw: f64) {
        if let Some(n) = self.bridge.slider_input(raw) {
            self.rectangles = n as usize;
        }
    }

    fn attach_slider(&mut self, slider: Box<dyn Slider>) {
        self.bridge.attach_slider(slider, self.rectangles as f64);
    }
}
