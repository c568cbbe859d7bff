//! Interactive calculus visualizations on a WebGL2 canvas.
//!
//! The plotting core (coordinates, functions, numerics, sampling, clocks,
//! input bridging, views and the frame orchestrator) is plain Rust and
//! builds on any target. The browser glue under `wasm` mounts views onto
//! canvases and exposes them to the page.

pub mod bridge;
pub mod clock;
pub mod config;
pub mod coords;
pub mod error;
pub mod functions;
pub mod numeric;
pub mod orchestrator;
pub mod sampler;
pub mod scene;
pub mod views;

pub use error::{Result, VizError};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    mod api;
    mod host;
    mod logger;
    mod render;

    pub use api::{DerivativeVis, FractionVis, IntegralVis, LimitVis, TransformVis};
    pub use logger::set_log_level;

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        logger::init(log::LevelFilter::Info);
        log::info!("calculus_viz {} loaded", env!("CARGO_PKG_VERSION"));
        Ok(())
    }
}
