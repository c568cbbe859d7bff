use log::warn;

use crate::bridge::{InteractionBridge, Slider, SliderScale};
use crate::clock::{self, AnimationClock};
use crate::config::ViewConfig;
use crate::coords::{Interval, PlotWindow};
use crate::error::Result;
use crate::functions::{FunctionEntry, FunctionRegistry};
use crate::sampler;
use crate::scene::{palette, Scene};

use super::Visualization;

/// Kept away from the edges so both approach directions stay visible.
pub const APPROACH_RANGE: Interval = Interval { lo: 0.1, hi: 0.9 };
pub const EPSILON_RANGE: Interval = Interval { lo: 0.01, hi: 0.2 };
const DEFAULT_APPROACH: f64 = 0.5;
const DEFAULT_EPSILON: f64 = 0.1;

const ARROW_LENGTH: f64 = 0.1;
const ARROW_HEAD_DX: f64 = 0.05;
const ARROW_HEAD_DY: f64 = 0.1;

/// Two points closing in on `approaching` from either side.
pub struct LimitView {
    function: FunctionEntry,
    segments: usize,
    approaching: f64,
    epsilon: f64,
    clock: AnimationClock,
    bridge: InteractionBridge,
}

impl LimitView {
    pub fn new(config: &ViewConfig, registry: &FunctionRegistry) -> Result<Self> {
        let function = *registry.try_get(config.function.as_deref().unwrap_or("jump_sine"))?;
        let bridge = InteractionBridge::new(APPROACH_RANGE, SliderScale::Percent)
            .with_drag(config.enable_drag)
            .with_slider_sync(config.enable_slider_sync);
        Ok(Self {
            function,
            segments: config.curve_segments,
            approaching: DEFAULT_APPROACH,
            epsilon: DEFAULT_EPSILON,
            clock: AnimationClock::new(config.time_step),
            bridge,
        })
    }

    pub fn approaching(&self) -> f64 {
        self.approaching
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = EPSILON_RANGE.clamp(epsilon);
    }

    pub fn set_approaching(&mut self, x: f64) {
        self.approaching = APPROACH_RANGE.clamp(x);
        self.bridge.publish(self.approaching);
    }

    /// The sampled points on either side, `None` where one lands on a hole.
    /// Near the ends of the domain a point stops at the boundary.
    pub fn approach_points(&self) -> [Option<(f64, f64)>; 2] {
        let domain = self.function.domain();
        [
            self.approaching - self.epsilon,
            self.approaching + self.epsilon,
        ]
        .map(|x| {
            let x = domain.clamp(x);
            self.function.eval(x).map(|y| (x, y))
        })
    }

    fn arrow(&self, scene: &mut Scene, tip: (f64, f64), direction: f64) {
        let (x, y) = tip;
        let tail = x - direction * ARROW_LENGTH;
        let back = x - direction * ARROW_HEAD_DX;
        scene.segments(
            &[
                ((tail, y), (x, y)),
                ((x, y), (back, y + ARROW_HEAD_DY)),
                ((x, y), (back, y - ARROW_HEAD_DY)),
            ],
            palette::ARROW,
        );
    }
}

impl Visualization for LimitView {
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
            self.set_epsilon(clock::shrinking_epsilon(time, EPSILON_RANGE.hi()));
        }
    }

    fn draw_curve(&self, scene: &mut Scene) {
        match sampler::sample(&self.function, self.segments) {
            Ok(curve) => scene.points(curve.defined(), palette::CURVE, 2.0),
            Err(err) => warn!("limit curve: {err}"),
        }
    }

    fn draw_overlay(&self, scene: &mut Scene) {
        let [left, right] = self.approach_points();
        scene.points(left.into_iter().chain(right), palette::HIGHLIGHT, 8.0);
        // arrows point towards the approached x
        if let Some(tip) = left {
            self.arrow(scene, tip, 1.0);
        }
        if let Some(tip) = right {
            self.arrow(scene, tip, -1.0);
        }
    }

    fn start_animation(&mut self) {
        self.clock.start();
    }

    fn toggle_animation(&mut self) {
        self.clock.toggle();
    }

    fn reset(&mut self) {
        self.clock.reset();
        self.epsilon = DEFAULT_EPSILON;
        self.set_approaching(DEFAULT_APPROACH);
    }

    fn pointer_down(&mut self) {
        self.bridge.pointer_down();
    }

    fn pointer_move(&mut self, fraction: f64) {
        if let Some(x) = self.bridge.pointer_move(fraction) {
            self.approaching = x;
        }
    }

    fn pointer_up(&mut self) {
        self.bridge.pointer_up();
    }

    fn slider_input(&mut self, raw: f64) {
        if let Some(x) = self.bridge.slider_input(raw) {
            self.approaching = x;
        }
    }

    fn attach_slider(&mut self, slider: Box<dyn Slider>) {
        self.bridge.attach_slider(slider, self.approaching);
    }
}
