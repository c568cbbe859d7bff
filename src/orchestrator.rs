//! Once-per-refresh frame driver for one view.
//!
//! All input goes through the orchestrator so it knows when the picture is
//! stale. A frame is skipped only when the view is idle, nothing changed
//! since the last drawn frame and the viewport kept its shape, so a skipped
//! frame always leaves the same geometry on screen as a redraw would.

use log::debug;

use crate::config::ViewConfig;
use crate::scene::{Renderer, Rgba, Scene};
use crate::views::Visualization;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Seconds since the previous frame.
    pub dt: f64,
    /// Viewport width over height.
    pub aspect: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Drawn,
    Skipped,
}

pub struct Orchestrator<V> {
    view: V,
    background: Rgba,
    skip_idle: bool,
    preserve_aspect: bool,
    auto_start: Option<f64>,
    elapsed: f64,
    dirty: bool,
    last_aspect: Option<f64>,
}

impl<V: Visualization> Orchestrator<V> {
    pub fn new(view: V, config: &ViewConfig) -> Self {
        Self {
            view,
            background: config.background,
            skip_idle: config.skip_idle_frames,
            preserve_aspect: config.preserve_aspect,
            auto_start: config.auto_start_delay,
            elapsed: 0.0,
            dirty: true,
            last_aspect: None,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutate the view; the next frame is redrawn.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut V) -> R) -> R {
        self.dirty = true;
        f(&mut self.view)
    }

    /// Force the next frame to be drawn, e.g. after the drawing buffer was
    /// resized and cleared underneath us.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn pointer_down(&mut self, fraction: f64) {
        self.update(|view| {
            view.pointer_down();
            view.pointer_move(fraction);
        });
    }

    pub fn pointer_move(&mut self, fraction: f64) {
        if self.view.is_interacting() {
            self.update(|view| view.pointer_move(fraction));
        }
    }

    pub fn pointer_up(&mut self) {
        if self.view.is_interacting() {
            self.update(|view| view.pointer_up());
        }
    }

    pub fn slider_input(&mut self, raw: f64) {
        self.update(|view| view.slider_input(raw));
    }

    pub fn is_idle(&self) -> bool {
        !self.view.is_animating() && !self.view.is_interacting()
    }

    fn tick_auto_start(&mut self, dt: f64) {
        let Some(delay) = self.auto_start else {
            return;
        };
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        if self.elapsed >= delay {
            debug!("auto-starting animation after {delay}s");
            self.auto_start = None;
            self.update(|view| view.start_animation());
        }
    }

    pub fn render_frame(&mut self, renderer: &mut dyn Renderer, frame: Frame) -> FrameOutcome {
        self.tick_auto_start(frame.dt);

        let aspect = if self.preserve_aspect { frame.aspect } else { 1.0 };
        let reshaped = self.last_aspect != Some(aspect);
        if self.skip_idle && self.is_idle() && !self.dirty && !reshaped {
            return FrameOutcome::Skipped;
        }

        renderer.clear(self.background);
        self.view.advance(frame.dt);

        let mut scene = Scene::new(self.view.window(), aspect);
        self.view.draw_reference(&mut scene);
        self.view.draw_curve(&mut scene);
        self.view.draw_overlay(&mut scene);
        for geometry in scene.into_commands() {
            renderer.draw(&geometry);
        }

        self.dirty = false;
        self.last_aspect = Some(aspect);
        FrameOutcome::Drawn
    }
}
