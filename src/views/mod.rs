//! The five visualizations.
//!
//! A view owns its state and knows how to draw it. Frame timing, idle
//! skipping and renderer access live in [`crate::orchestrator`].

mod derivative;
mod fraction;
mod integral;
mod limit;
mod transform;

pub use derivative::{DerivativeMode, DerivativeView};
pub use fraction::{Fraction, FractionView};
pub use integral::IntegralView;
pub use limit::LimitView;
pub use transform::{TransformKind, TransformView};

use crate::bridge::Slider;
use crate::coords::PlotWindow;
use crate::scene::{palette, Scene};

pub trait Visualization {
    /// Data-space region the view draws into.
    fn window(&self) -> PlotWindow;

    fn is_animating(&self) -> bool;

    /// A pointer drag is in progress.
    fn is_interacting(&self) -> bool {
        false
    }

    /// Advance the animation clock by one frame and recompute whatever
    /// depends on time. No-op while not animating.
    fn advance(&mut self, frame_delta: f64);

    fn draw_reference(&self, scene: &mut Scene) {
        scene.axes(palette::AXIS);
    }

    fn draw_curve(&self, _scene: &mut Scene) {}

    fn draw_overlay(&self, _scene: &mut Scene) {}

    fn start_animation(&mut self);

    fn toggle_animation(&mut self);

    /// Back to the state right after construction.
    fn reset(&mut self);

    fn pointer_down(&mut self) {}

    fn pointer_move(&mut self, _fraction: f64) {}

    fn pointer_up(&mut self) {}

    fn slider_input(&mut self, _raw: f64) {}

    fn attach_slider(&mut self, _slider: Box<dyn Slider>) {}
}
