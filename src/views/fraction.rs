use std::f64::consts::PI;

use crate::clock::AnimationClock;
use crate::config::ViewConfig;
use crate::coords::PlotWindow;
use crate::error::{Result, VizError};
use crate::scene::{palette, DrawGeometry, Primitive, Rgba, Scene};

use super::Visualization;

pub const MAX_DENOMINATOR: u32 = 24;

const ROW_WIDTH: f64 = 1.4;
const ROW_HEIGHT: f64 = 0.2;
const ROW_OFFSET: f64 = 0.3;
const CELL_FILL: f64 = 0.9;
const DIVIDER_HALF_WIDTH: f64 = 0.8;
const DIVIDER_HALF_HEIGHT: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    num: u32,
    den: u32,
}

impl Fraction {
    pub fn new(num: u32, den: u32) -> Result<Self> {
        if den == 0 || den > MAX_DENOMINATOR || num > den {
            return Err(VizError::InvalidFraction { num, den });
        }
        Ok(Self { num, den })
    }

    pub fn num(&self) -> u32 {
        self.num
    }

    pub fn den(&self) -> u32 {
        self.den
    }

    pub fn value(&self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

/// Two fractions drawn as rows of cells, the divisor row spinning in as the
/// animation progresses.
pub struct FractionView {
    dividend: Fraction,
    divisor: Fraction,
    clock: AnimationClock,
}

impl FractionView {
    pub fn new(config: &ViewConfig) -> Self {
        Self {
            dividend: Fraction { num: 2, den: 3 },
            divisor: Fraction { num: 1, den: 2 },
            clock: AnimationClock::new(config.time_step),
        }
    }

    pub fn dividend(&self) -> Fraction {
        self.dividend
    }

    pub fn divisor(&self) -> Fraction {
        self.divisor
    }

    pub fn set_fractions(&mut self, dividend: Fraction, divisor: Fraction) {
        self.dividend = dividend;
        self.divisor = divisor;
    }

    /// Dividend over divisor, `None` when the divisor is zero.
    pub fn quotient(&self) -> Option<f64> {
        (self.divisor.num != 0).then(|| self.dividend.value() / self.divisor.value())
    }

    /// Animation progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.clock.time().min(1.0)
    }

    /// Rewind and play the animation from the start.
    pub fn reset_animation(&mut self) {
        self.clock.start();
    }

    fn draw_row(
        &self,
        scene: &mut Scene,
        fraction: Fraction,
        y: f64,
        color: Rgba,
        rotation: f64,
    ) {
        let progress = self.progress();
        let width = ROW_WIDTH / fraction.den as f64;
        let (sin, cos) = rotation.sin_cos();
        for i in 0..fraction.den {
            let x = -ROW_WIDTH / 2.0 + width * (i as f64 + 0.5);
            let active = i < fraction.num;
            let grow = if active { 1.0 + 0.5 * progress * progress } else { 1.0 };
            let corners = [(-0.5, -0.5), (0.5, -0.5), (-0.5, 0.5), (0.5, 0.5)].map(|(cx, cy)| {
                let rx = cx * cos - cy * sin;
                let ry = cx * sin + cy * cos;
                let px = rx * width * CELL_FILL + x;
                let py = ry * ROW_HEIGHT + y;
                (px * grow, py * grow)
            });
            let vertices = scene.vertices(corners);
            let color = if active { color } else { palette::INACTIVE };
            scene.push(DrawGeometry::new(Primitive::TriangleStrip, vertices, color));
        }
    }
}

impl Visualization for FractionView {
    fn window(&self) -> PlotWindow {
        PlotWindow::SIGNED
    }

    fn is_animating(&self) -> bool {
        self.clock.is_running()
    }

    fn advance(&mut self, frame_delta: f64) {
        self.clock.advance(frame_delta);
    }

    fn draw_reference(&self, scene: &mut Scene) {
        scene.rect(
            -DIVIDER_HALF_WIDTH,
            -DIVIDER_HALF_HEIGHT,
            DIVIDER_HALF_WIDTH,
            DIVIDER_HALF_HEIGHT,
            palette::DIVIDER,
        );
    }

    fn draw_curve(&self, scene: &mut Scene) {
        self.draw_row(scene, self.dividend, ROW_OFFSET, palette::DIVIDEND, 0.0);
    }

    fn draw_overlay(&self, scene: &mut Scene) {
        let rotation = self.progress() * PI;
        self.draw_row(scene, self.divisor, -ROW_OFFSET, palette::DIVISOR, rotation);
    }

    fn start_animation(&mut self) {
        self.clock.start();
    }

    fn toggle_animation(&mut self) {
        self.clock.toggle();
    }

    fn reset(&mut self) {
        self.clock.reset();
        self.dividend = Fraction { num: 2, den: 3 };
        self.divisor = Fraction { num: 1, den: 2 };
    }
}
