//! Per-frame draw geometry and the renderer capability it is submitted to.

use serde::Deserialize;

use crate::coords::PlotWindow;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "[f32; 4]")]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

impl From<[f32; 4]> for Rgba {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self { r, g, b, a }
    }
}

pub mod palette {
    use super::Rgba;

    pub const DARK_BACKGROUND: Rgba = Rgba::rgb(0.1, 0.1, 0.1);
    pub const LIGHT_BACKGROUND: Rgba = Rgba::rgb(0.95, 0.95, 0.95);
    pub const AXIS: Rgba = Rgba::rgb(0.5, 0.5, 0.5);
    pub const CURVE: Rgba = Rgba::rgb(0.2, 0.5, 1.0);
    pub const HIGHLIGHT: Rgba = Rgba::rgb(1.0, 0.3, 0.3);
    pub const ARROW: Rgba = Rgba::rgb(1.0, 0.5, 0.2);
    pub const AREA: Rgba = Rgba::rgb(0.3, 0.8, 0.3).with_alpha(0.5);
    pub const INACTIVE: Rgba = Rgba::rgb(0.8, 0.8, 0.8);
    pub const DIVIDEND: Rgba = Rgba::rgb(0.3, 0.6, 1.0);
    pub const DIVISOR: Rgba = Rgba::rgb(1.0, 0.5, 0.3);
    pub const DIVIDER: Rgba = Rgba::rgb(0.2, 0.2, 0.2);
    pub const GRID: Rgba = Rgba::rgb(0.3, 0.3, 0.3);
    pub const BASIS_X: Rgba = Rgba::rgb(1.0, 0.0, 0.0);
    pub const BASIS_Y: Rgba = Rgba::rgb(0.0, 1.0, 0.0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Points,
    Lines,
    LineStrip,
    Triangles,
    TriangleStrip,
}

/// Row-major 3×3 matrix acting on homogeneous 2D points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3(pub [f64; 9]);

impl Mat3 {
    pub const IDENTITY: Mat3 = Mat3([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

    /// Rotation combined with per-axis scale and shear.
    pub fn linear(rotation: f64, scale: [f64; 2], shear: [f64; 2]) -> Self {
        let (s, c) = rotation.sin_cos();
        Mat3([
            scale[0] * c + shear[0] * s,
            -scale[0] * s + shear[0] * c,
            0.0,
            scale[1] * s + shear[1] * c,
            scale[1] * c + shear[1] * s,
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }

    pub fn apply(&self, [x, y]: [f64; 2]) -> [f64; 2] {
        let m = &self.0;
        [m[0] * x + m[1] * y + m[2], m[3] * x + m[4] * y + m[5]]
    }

    /// Signed area scale of the linear part.
    pub fn determinant(&self) -> f64 {
        let m = &self.0;
        m[0] * (m[4] * m[8] - m[5] * m[7]) - m[1] * (m[3] * m[8] - m[5] * m[6])
            + m[2] * (m[3] * m[7] - m[4] * m[6])
    }

    /// Layout expected by `uniformMatrix3fv` without transposition.
    pub fn to_column_major(&self) -> [f32; 9] {
        let m = &self.0;
        [
            m[0] as f32, m[3] as f32, m[6] as f32,
            m[1] as f32, m[4] as f32, m[7] as f32,
            m[2] as f32, m[5] as f32, m[8] as f32,
        ]
    }
}

impl std::ops::Mul for Mat3 {
    type Output = Mat3;

    /// `self * rhs` applies `rhs` first.
    fn mul(self, rhs: Mat3) -> Mat3 {
        let (a, b) = (&self.0, &rhs.0);
        let mut out = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                out[row * 3 + col] = (0..3).map(|k| a[row * 3 + k] * b[k * 3 + col]).sum();
            }
        }
        Mat3(out)
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Mat3::IDENTITY
    }
}

/// One draw call: vertices plus the uniforms the shader needs.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawGeometry {
    pub primitive: Primitive,
    pub vertices: Vec<[f32; 2]>,
    pub color: Rgba,
    pub transform: Mat3,
    pub point_size: f32,
}

impl DrawGeometry {
    pub fn new(primitive: Primitive, vertices: Vec<[f32; 2]>, color: Rgba) -> Self {
        Self {
            primitive,
            vertices,
            color,
            transform: Mat3::IDENTITY,
            point_size: 1.0,
        }
    }

    pub fn with_transform(mut self, transform: Mat3) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_point_size(mut self, size: f32) -> Self {
        self.point_size = size;
        self
    }

    /// Final clip-space positions, with the transform applied.
    pub fn clip_positions(&self) -> Vec<[f64; 2]> {
        self.vertices
            .iter()
            .map(|v| self.transform.apply([v[0] as f64, v[1] as f64]))
            .collect()
    }
}

/// The GPU capability the orchestrator draws through.
pub trait Renderer {
    fn clear(&mut self, color: Rgba);
    fn draw(&mut self, geometry: &DrawGeometry);
}

/// Keeps what would be on screen: the commands since the last clear.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    background: Option<Rgba>,
    frame: Vec<DrawGeometry>,
    clears: usize,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn background(&self) -> Option<Rgba> {
        self.background
    }

    pub fn frame(&self) -> &[DrawGeometry] {
        &self.frame
    }

    /// Number of frames actually drawn.
    pub fn clears(&self) -> usize {
        self.clears
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self, color: Rgba) {
        self.background = Some(color);
        self.frame.clear();
        self.clears += 1;
    }

    fn draw(&mut self, geometry: &DrawGeometry) {
        self.frame.push(geometry.clone());
    }
}

/// Draw commands of one frame, in submission order.
pub struct Scene {
    aspect: f64,
    window: PlotWindow,
    commands: Vec<DrawGeometry>,
}

impl Scene {
    pub fn new(window: PlotWindow, aspect: f64) -> Self {
        Self {
            aspect,
            window,
            commands: Vec::new(),
        }
    }

    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    pub fn window(&self) -> PlotWindow {
        self.window
    }

    /// Data coordinates to a clip-space vertex.
    pub fn vertex(&self, x: f64, y: f64) -> [f32; 2] {
        let (cx, cy) = self.window.to_clip(x, y, self.aspect);
        [cx as f32, cy as f32]
    }

    pub fn vertices(&self, points: impl IntoIterator<Item = (f64, f64)>) -> Vec<[f32; 2]> {
        points.into_iter().map(|(x, y)| self.vertex(x, y)).collect()
    }

    /// Like [`Scene::vertices`] but without the aspect correction, for
    /// geometry drawn under a transform. Pair with [`Scene::aspect_correction`].
    pub fn square_vertices(&self, points: impl IntoIterator<Item = (f64, f64)>) -> Vec<[f32; 2]> {
        points
            .into_iter()
            .map(|(x, y)| {
                let (cx, cy) = self.window.to_clip(x, y, 1.0);
                [cx as f32, cy as f32]
            })
            .collect()
    }

    /// Horizontal squash that keeps square data square on this viewport.
    pub fn aspect_correction(&self) -> Mat3 {
        let mut m = Mat3::IDENTITY;
        m.0[0] = 1.0 / self.aspect;
        m
    }

    pub fn push(&mut self, geometry: DrawGeometry) {
        if !geometry.vertices.is_empty() {
            self.commands.push(geometry);
        }
    }

    pub fn polyline(&mut self, points: impl IntoIterator<Item = (f64, f64)>, color: Rgba) {
        let vertices = self.vertices(points);
        if vertices.len() >= 2 {
            self.push(DrawGeometry::new(Primitive::LineStrip, vertices, color));
        }
    }

    pub fn segments(&mut self, pairs: &[((f64, f64), (f64, f64))], color: Rgba) {
        let vertices = self.vertices(pairs.iter().flat_map(|&(a, b)| [a, b]));
        self.push(DrawGeometry::new(Primitive::Lines, vertices, color));
    }

    pub fn points(&mut self, points: impl IntoIterator<Item = (f64, f64)>, color: Rgba, size: f32) {
        let vertices = self.vertices(points);
        self.push(DrawGeometry::new(Primitive::Points, vertices, color).with_point_size(size));
    }

    /// Axis-aligned filled rectangle, in data coordinates.
    pub fn rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgba) {
        let vertices = self.vertices([(x0, y0), (x1, y0), (x1, y1), (x0, y0), (x1, y1), (x0, y1)]);
        self.push(DrawGeometry::new(Primitive::Triangles, vertices, color));
    }

    /// The x and y axes through the data origin, if it is in view.
    pub fn axes(&mut self, color: Rgba) {
        let PlotWindow { x, y } = self.window;
        let mut pairs = Vec::with_capacity(2);
        if y.contains(0.0) {
            pairs.push(((x.lo(), 0.0), (x.hi(), 0.0)));
        }
        if x.contains(0.0) {
            pairs.push(((0.0, y.lo()), (0.0, y.hi())));
        }
        self.segments(&pairs, color);
    }

    pub fn into_commands(self) -> Vec<DrawGeometry> {
        self.commands
    }
}
