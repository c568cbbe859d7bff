//! Mounting a view onto a page element and tearing it down again.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, Element, Event, EventTarget, HtmlCanvasElement, HtmlInputElement,
    MouseEvent,
};

use super::render::{FrameLoop, GlRenderer};
use crate::bridge::Slider;
use crate::config::{ConfigOverrides, ViewConfig};
use crate::coords::pointer_fraction;
use crate::error::{Result, VizError};
use crate::orchestrator::{Frame, Orchestrator};
use crate::views::Visualization;

/// A `<input type="range">` as seen by the interaction bridge.
struct DomSlider(HtmlInputElement);

impl Slider for DomSlider {
    fn set_value(&mut self, value: f64) {
        self.0.set_value(&value.to_string());
    }
}

struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn add(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> std::result::Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }

    fn remove(self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// A view running on a canvas: its orchestrator, frame loop and listeners.
pub struct Host<V> {
    orchestrator: Rc<RefCell<Orchestrator<V>>>,
    frame_loop: FrameLoop,
    listeners: Vec<Listener>,
}

impl<V: Visualization + 'static> Host<V> {
    pub fn update<R>(&self, f: impl FnOnce(&mut V) -> R) -> R {
        self.orchestrator.borrow_mut().update(f)
    }

    pub fn read<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        f(self.orchestrator.borrow().view())
    }

    pub fn destroy(self) {
        self.frame_loop.cancel();
        for listener in self.listeners {
            listener.remove();
        }
    }
}

/// Parse page options, build the view and mount it. Any failure is logged
/// and yields `None`, leaving sibling views on the page untouched.
pub fn mount_or_log<V, F>(
    container_id: &str,
    options: JsValue,
    preset: ViewConfig,
    build: F,
) -> Option<Host<V>>
where
    V: Visualization + 'static,
    F: FnOnce(&ViewConfig) -> Result<V>,
{
    let mounted = parse_options(options)
        .and_then(|overrides| preset.apply(overrides))
        .and_then(|config| {
            let view = build(&config)?;
            mount(container_id, &config, view)
        });
    match mounted {
        Ok(host) => {
            info!("mounted '{container_id}'");
            Some(host)
        }
        Err(err) => {
            warn!("'{container_id}' disabled: {err}");
            None
        }
    }
}

fn parse_options(options: JsValue) -> Result<ConfigOverrides> {
    if options.is_undefined() || options.is_null() {
        return Ok(ConfigOverrides::default());
    }
    serde_wasm_bindgen::from_value(options).map_err(|e| VizError::Config(e.to_string()))
}

fn js_err(err: JsValue) -> VizError {
    VizError::Graphics(format!("{err:?}"))
}

fn canvas_in(document: &Document, container: Element) -> Result<HtmlCanvasElement> {
    match container.dyn_into::<HtmlCanvasElement>() {
        Ok(canvas) => Ok(canvas),
        Err(container) => {
            let canvas: HtmlCanvasElement = document
                .create_element("canvas")
                .map_err(js_err)?
                .dyn_into()
                .map_err(|_| VizError::Graphics("not a canvas".into()))?;
            let style = canvas.style();
            style.set_property("width", "100%").map_err(js_err)?;
            style.set_property("height", "100%").map_err(js_err)?;
            container.append_child(&canvas).map_err(js_err)?;
            Ok(canvas)
        }
    }
}

fn fit_to_client(canvas: &HtmlCanvasElement) {
    let ratio = window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let w = (canvas.client_width() as f64 * ratio) as u32;
    let h = (canvas.client_height() as f64 * ratio) as u32;
    if w > 0 && h > 0 {
        canvas.set_width(w);
        canvas.set_height(h);
    }
}

fn pointer_x(canvas: &HtmlCanvasElement, event: &Event) -> Option<f64> {
    let event = event.dyn_ref::<MouseEvent>()?;
    let rect = canvas.get_bounding_client_rect();
    pointer_fraction(event.client_x() as f64, rect.left(), rect.width())
}

fn mount<V: Visualization + 'static>(
    container_id: &str,
    config: &ViewConfig,
    view: V,
) -> Result<Host<V>> {
    let window = window().ok_or_else(|| VizError::MissingElement("window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| VizError::MissingElement("document".into()))?;
    let container = document
        .get_element_by_id(container_id)
        .ok_or_else(|| VizError::MissingElement(container_id.to_string()))?;
    let canvas = canvas_in(&document, container)?;
    fit_to_client(&canvas);

    let mut renderer = GlRenderer::new(&canvas)?;
    let orchestrator = Rc::new(RefCell::new(Orchestrator::new(view, config)));
    let mut listeners = Vec::new();
    let window_target: &EventTarget = window.as_ref();

    // Resize canvas to fit its box; resizing clears the drawing buffer
    {
        let canvas = canvas.clone();
        let orchestrator = orchestrator.clone();
        listeners.push(
            Listener::add(window_target, "resize", move |_| {
                fit_to_client(&canvas);
                orchestrator.borrow_mut().invalidate();
            })
            .map_err(js_err)?,
        );
    }

    let slider = config
        .slider_id
        .as_deref()
        .and_then(|id| document.get_element_by_id(id))
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
    match slider {
        Some(input) => {
            orchestrator
                .borrow_mut()
                .update(|view| view.attach_slider(Box::new(DomSlider(input.clone()))));
            let orchestrator = orchestrator.clone();
            let reader = input.clone();
            listeners.push(
                Listener::add(input.as_ref(), "input", move |_| {
                    orchestrator.borrow_mut().slider_input(reader.value_as_number());
                })
                .map_err(js_err)?,
            );
        }
        None => debug!("'{container_id}' has no slider"),
    }

    if config.enable_drag {
        let canvas_target: &EventTarget = canvas.as_ref();
        {
            let orchestrator = orchestrator.clone();
            let canvas = canvas.clone();
            listeners.push(
                Listener::add(canvas_target, "mousedown", move |event| {
                    if let Some(x) = pointer_x(&canvas, &event) {
                        orchestrator.borrow_mut().pointer_down(x);
                    }
                })
                .map_err(js_err)?,
            );
        }
        {
            let orchestrator = orchestrator.clone();
            let canvas = canvas.clone();
            listeners.push(
                Listener::add(canvas_target, "mousemove", move |event| {
                    if let Some(x) = pointer_x(&canvas, &event) {
                        orchestrator.borrow_mut().pointer_move(x);
                    }
                })
                .map_err(js_err)?,
            );
        }
        {
            let orchestrator = orchestrator.clone();
            listeners.push(
                Listener::add(window_target, "mouseup", move |_| {
                    orchestrator.borrow_mut().pointer_up();
                })
                .map_err(js_err)?,
            );
        }
    }

    // Animation loop
    let frame_loop = {
        let orchestrator = orchestrator.clone();
        let last = Cell::new(None::<f64>);
        FrameLoop::start(move |timestamp| {
            let dt = last.replace(Some(timestamp)).map_or(0.0, |prev| (timestamp - prev) / 1000.0);
            let aspect = renderer.aspect();
            orchestrator
                .borrow_mut()
                .render_frame(&mut renderer, Frame { dt, aspect });
        })
        .map_err(js_err)?
    };

    Ok(Host {
        orchestrator,
        frame_loop,
        listeners,
    })
}
