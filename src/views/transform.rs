use std::f64::consts::TAU;
use std::str::FromStr;

use log::debug;

use crate::clock::AnimationClock;
use crate::config::ViewConfig;
use crate::coords::PlotWindow;
use crate::error::{Result, VizError};
use crate::scene::{palette, DrawGeometry, Mat3, Primitive, Scene};

use super::Visualization;

const GRID_SIDE: usize = 10;
const GRID_SPACING: f64 = 1.0 / 4.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    Rotate,
    Scale,
    Shear,
}

impl FromStr for TransformKind {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "rotate" => Ok(TransformKind::Rotate),
            "scale" => Ok(TransformKind::Scale),
            "shear" => Ok(TransformKind::Shear),
            other => Err(VizError::UnknownMode(other.to_string())),
        }
    }
}

/// A point grid and the basis vectors under an animated linear map.
pub struct TransformView {
    rotation: f64,
    scale: [f64; 2],
    shear: [f64; 2],
    kind: Option<TransformKind>,
    clock: AnimationClock,
}

impl TransformView {
    pub fn new(config: &ViewConfig) -> Self {
        Self {
            rotation: 0.0,
            scale: [1.0, 1.0],
            shear: [0.0, 0.0],
            kind: None,
            clock: AnimationClock::new(config.time_step),
        }
    }

    pub fn kind(&self) -> Option<TransformKind> {
        self.kind
    }

    /// Start animating one kind of map, with the other parameters at rest.
    pub fn select(&mut self, kind: TransformKind) {
        debug!("transform {kind:?}");
        self.rotation = 0.0;
        self.scale = [1.0, 1.0];
        self.shear = [0.0, 0.0];
        self.kind = Some(kind);
        self.clock.start();
    }

    pub fn matrix(&self) -> Mat3 {
        Mat3::linear(self.rotation, self.scale, self.shear)
    }

    pub fn determinant(&self) -> f64 {
        self.matrix().determinant()
    }

    fn grid_points() -> Vec<(f64, f64)> {
        (0..GRID_SIDE * GRID_SIDE)
            .map(|i| {
                let x = (i % GRID_SIDE) as f64 * GRID_SPACING - 1.0;
                let y = (i / GRID_SIDE) as f64 * GRID_SPACING - 1.0;
                (x, y)
            })
            .collect()
    }
}

impl Visualization for TransformView {
    fn window(&self) -> PlotWindow {
        PlotWindow::SIGNED
    }

    fn is_animating(&self) -> bool {
        self.clock.is_running()
    }

    fn advance(&mut self, frame_delta: f64) {
        let Some(time) = self.clock.advance(frame_delta) else {
            return;
        };
        match self.kind {
            Some(TransformKind::Rotate) => self.rotation = time % TAU,
            Some(TransformKind::Scale) => {
                let s = 0.5 + (time * 2.0).sin() * 0.5;
                self.scale = [s, s];
            }
            Some(TransformKind::Shear) => self.shear = [time.sin() * 0.5, time.cos() * 0.5],
            None => {}
        }
    }

    // The map acts on unsquashed coordinates; the aspect goes on last.
    fn draw_reference(&self, scene: &mut Scene) {
        let vertices = scene.square_vertices(Self::grid_points());
        let transform = scene.aspect_correction() * self.matrix();
        scene.push(
            DrawGeometry::new(Primitive::Points, vertices, palette::GRID)
                .with_point_size(3.0)
                .with_transform(transform),
        );
    }

    fn draw_overlay(&self, scene: &mut Scene) {
        let transform = scene.aspect_correction() * self.matrix();
        for (tip, color) in [((1.0, 0.0), palette::BASIS_X), ((0.0, 1.0), palette::BASIS_Y)] {
            let vertices = scene.square_vertices([(0.0, 0.0), tip]);
            scene.push(DrawGeometry::new(Primitive::Lines, vertices, color).with_transform(transform));
        }
    }

    fn start_animation(&mut self) {
        self.select(self.kind.unwrap_or(TransformKind::Rotate));
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
        self.rotation = 0.0;
        self.scale = [1.0, 1.0];
        self.shear = [0.0, 0.0];
        self.kind = None;
    }
}
