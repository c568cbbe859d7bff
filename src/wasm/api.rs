//! Objects the page constructs, one per visualization.
//!
//! A view whose container is missing (or whose options are invalid) is
//! still returned as an object, but every method on it is a no-op.

use wasm_bindgen::prelude::*;

use super::host::{mount_or_log, Host};
use crate::config::ViewConfig;
use crate::error::VizError;
use crate::functions::FunctionRegistry;
use crate::numeric::RiemannRule;
use crate::views::{
    DerivativeMode, DerivativeView, Fraction, FractionView, IntegralView, LimitView,
    TransformKind, TransformView, Visualization,
};

impl From<VizError> for JsValue {
    fn from(err: VizError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

trait Handle<V> {
    fn host(&self) -> Option<&Host<V>>;

    fn update<R: Default>(&self, f: impl FnOnce(&mut V) -> R) -> R
    where
        V: Visualization + 'static,
    {
        self.host().map(|host| host.update(f)).unwrap_or_default()
    }

    fn try_update<E>(&self, f: impl FnOnce(&mut V) -> Result<(), E>) -> Result<(), E>
    where
        V: Visualization + 'static,
    {
        self.host().map_or(Ok(()), |host| host.update(f))
    }

    fn read<R: Default>(&self, f: impl FnOnce(&V) -> R) -> R
    where
        V: Visualization + 'static,
    {
        self.host().map(|host| host.read(f)).unwrap_or_default()
    }
}

macro_rules! view_handle {
    ($name:ident, $view:ty) => {
        #[wasm_bindgen]
        pub struct $name {
            host: Option<Host<$view>>,
        }

        impl Handle<$view> for $name {
            fn host(&self) -> Option<&Host<$view>> {
                self.host.as_ref()
            }
        }

        #[wasm_bindgen]
        impl $name {
            /// Whether the view found its container and is running.
            #[wasm_bindgen(getter)]
            pub fn mounted(&self) -> bool {
                self.host.is_some()
            }

            #[wasm_bindgen(js_name = toggleAnimation)]
            pub fn toggle_animation(&self) {
                self.update(|v| v.toggle_animation())
            }

            pub fn reset(&self) {
                self.update(|v| v.reset())
            }

            #[wasm_bindgen(getter)]
            pub fn animating(&self) -> bool {
                self.read(|v| v.is_animating())
            }

            /// Stop the frame loop and remove every listener.
            pub fn destroy(&mut self) {
                if let Some(host) = self.host.take() {
                    host.destroy();
                }
            }
        }
    };
}

view_handle!(DerivativeVis, DerivativeView);
view_handle!(IntegralVis, IntegralView);
view_handle!(LimitVis, LimitView);
view_handle!(FractionVis, FractionView);
view_handle!(TransformVis, TransformView);

#[wasm_bindgen]
impl DerivativeVis {
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str, options: JsValue) -> DerivativeVis {
        let host = mount_or_log(container_id, options, ViewConfig::derivative(), |config| {
            DerivativeView::new(config, &FunctionRegistry::builtin())
        });
        Self { host }
    }

    pub fn animate(&self) {
        self.toggle_animation()
    }

    #[wasm_bindgen(js_name = showTangent)]
    pub fn show_tangent(&self) {
        self.update(|v| v.show_tangent())
    }

    /// `"tangent"` or `"secant"`.
    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&self, mode: &str) -> Result<(), JsValue> {
        let mode: DerivativeMode = mode.parse()?;
        self.update(|v| v.set_mode(mode));
        Ok(())
    }

    #[wasm_bindgen(js_name = setDx)]
    pub fn set_dx(&self, dx: f64) -> Result<(), JsValue> {
        self.try_update(|v| v.set_dx(dx).map_err(JsValue::from))
    }

    pub fn slope(&self) -> Option<f64> {
        self.read(|v| v.slope().ok())
    }
}

#[wasm_bindgen]
impl IntegralVis {
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str, options: JsValue) -> IntegralVis {
        let host = mount_or_log(container_id, options, ViewConfig::integral(), |config| {
            IntegralView::new(config, &FunctionRegistry::builtin())
        });
        Self { host }
    }

    #[wasm_bindgen(js_name = addRectangles)]
    pub fn add_rectangles(&self) {
        self.update(|v| v.add_rectangles())
    }

    #[wasm_bindgen(js_name = showArea)]
    pub fn show_area(&self) {
        self.update(|v| v.show_area())
    }

    /// Name of a built-in function, e.g. `"quadratic"`.
    #[wasm_bindgen(js_name = setFunction)]
    pub fn set_function(&self, name: &str) -> Result<(), JsValue> {
        self.try_update(|v| v.set_function(name).map_err(JsValue::from))
    }

    #[wasm_bindgen(js_name = setBounds)]
    pub fn set_bounds(&self, lower: f64, upper: f64) -> Result<(), JsValue> {
        self.try_update(|v| v.set_bounds(lower, upper).map_err(JsValue::from))
    }

    /// `"left"`, `"right"` or `"midpoint"`.
    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&self, rule: &str) -> Result<(), JsValue> {
        let rule: RiemannRule = rule.parse()?;
        self.update(|v| v.set_rule(rule));
        Ok(())
    }

    #[wasm_bindgen(js_name = setRectangles)]
    pub fn set_rectangles(&self, n: usize) {
        self.update(|v| v.set_rectangles(n))
    }

    pub fn area(&self) -> Option<f64> {
        self.read(|v| v.area().ok())
    }
}

#[wasm_bindgen]
impl LimitVis {
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str, options: JsValue) -> LimitVis {
        let host = mount_or_log(container_id, options, ViewConfig::limit(), |config| {
            LimitView::new(config, &FunctionRegistry::builtin())
        });
        Self { host }
    }

    pub fn animate(&self) {
        self.toggle_animation()
    }

    #[wasm_bindgen(js_name = setEpsilon)]
    pub fn set_epsilon(&self, epsilon: f64) {
        self.update(|v| v.set_epsilon(epsilon))
    }

    #[wasm_bindgen(getter)]
    pub fn epsilon(&self) -> Option<f64> {
        self.read(|v| Some(v.epsilon()))
    }
}

#[wasm_bindgen]
impl FractionVis {
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str, options: JsValue) -> FractionVis {
        let host = mount_or_log(container_id, options, ViewConfig::fraction(), |config| {
            Ok(FractionView::new(config))
        });
        Self { host }
    }

    #[wasm_bindgen(js_name = resetAnimation)]
    pub fn reset_animation(&self) {
        self.update(|v| v.reset_animation())
    }

    #[wasm_bindgen(js_name = setFractions)]
    pub fn set_fractions(&self, num1: u32, den1: u32, num2: u32, den2: u32) -> Result<(), JsValue> {
        let dividend = Fraction::new(num1, den1)?;
        let divisor = Fraction::new(num2, den2)?;
        self.update(|v| v.set_fractions(dividend, divisor));
        Ok(())
    }

    pub fn quotient(&self) -> Option<f64> {
        self.read(|v| v.quotient())
    }
}

#[wasm_bindgen]
impl TransformVis {
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str, options: JsValue) -> TransformVis {
        let host = mount_or_log(container_id, options, ViewConfig::transform(), |config| {
            Ok(TransformView::new(config))
        });
        Self { host }
    }

    pub fn rotate(&self) {
        self.update(|v| v.select(TransformKind::Rotate))
    }

    pub fn scale(&self) {
        self.update(|v| v.select(TransformKind::Scale))
    }

    pub fn shear(&self) {
        self.update(|v| v.select(TransformKind::Shear))
    }

    pub fn determinant(&self) -> Option<f64> {
        self.read(|v| Some(v.determinant()))
    }
}
