use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Float32Array;
use log::warn;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram,
    WebGlShader, WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::error::VizError;
use crate::scene::{DrawGeometry, Primitive, Renderer, Rgba};

const VERTEX_SHADER: &str = r#"#version 300 es
in vec2 position;
uniform mat3 transform;
uniform float pointSize;
void main() {
    vec3 p = transform * vec3(position, 1.0);
    gl_Position = vec4(p.xy, 0.0, 1.0);
    gl_PointSize = pointSize;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;
uniform vec4 color;
uniform bool roundPoints;
out vec4 outColor;
void main() {
    if (roundPoints && length(gl_PointCoord - vec2(0.5)) > 0.5) {
        discard;
    }
    outColor = color;
}
"#;

/// Markers at least this large are drawn as discs.
const ROUND_POINT_SIZE: f32 = 4.0;

/// WebGL2 implementation of [`Renderer`]: one program, one dynamic vertex
/// buffer, per-draw uniforms.
pub struct GlRenderer {
    gl: GL,
    canvas: HtmlCanvasElement,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    buffer: WebGlBuffer,
    u_color: Option<WebGlUniformLocation>,
    u_transform: Option<WebGlUniformLocation>,
    u_point_size: Option<WebGlUniformLocation>,
    u_round: Option<WebGlUniformLocation>,
}

impl GlRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, VizError> {
        let gl: GL = canvas
            .get_context("webgl2")
            .map_err(|e| VizError::Graphics(format!("{e:?}")))?
            .ok_or_else(|| VizError::Graphics("WebGL2 not supported".into()))?
            .dyn_into()
            .map_err(|_| VizError::Graphics("not a WebGL2 context".into()))?;

        let vert = compile(&gl, GL::VERTEX_SHADER, VERTEX_SHADER)?;
        let frag = compile(&gl, GL::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
        let program = link(&gl, &vert, &frag)?;

        let buffer = gl
            .create_buffer()
            .ok_or_else(|| VizError::Graphics("cannot create buffer".into()))?;
        let vao = gl
            .create_vertex_array()
            .ok_or_else(|| VizError::Graphics("cannot create vertex array".into()))?;
        gl.bind_vertex_array(Some(&vao));
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        let position = gl.get_attrib_location(&program, "position");
        if position < 0 {
            return Err(VizError::Graphics("position attribute missing".into()));
        }
        gl.enable_vertex_attrib_array(position as u32);
        gl.vertex_attrib_pointer_with_i32(position as u32, 2, GL::FLOAT, false, 0, 0);
        gl.bind_vertex_array(None);

        gl.enable(GL::BLEND);
        gl.blend_func(GL::SRC_ALPHA, GL::ONE_MINUS_SRC_ALPHA);

        Ok(Self {
            u_color: gl.get_uniform_location(&program, "color"),
            u_transform: gl.get_uniform_location(&program, "transform"),
            u_point_size: gl.get_uniform_location(&program, "pointSize"),
            u_round: gl.get_uniform_location(&program, "roundPoints"),
            gl,
            canvas: canvas.clone(),
            program,
            vao,
            buffer,
        })
    }

    pub fn aspect(&self) -> f64 {
        crate::coords::aspect_ratio(self.canvas.width() as f64, self.canvas.height() as f64)
    }
}

impl Renderer for GlRenderer {
    fn clear(&mut self, color: Rgba) {
        self.gl
            .viewport(0, 0, self.canvas.width() as i32, self.canvas.height() as i32);
        self.gl.clear_color(color.r, color.g, color.b, color.a);
        self.gl.clear(GL::COLOR_BUFFER_BIT);
    }

    fn draw(&mut self, geometry: &DrawGeometry) {
        let gl = &self.gl;
        let data: Vec<f32> = geometry.vertices.iter().flat_map(|v| v.iter().copied()).collect();

        gl.use_program(Some(&self.program));
        gl.bind_vertex_array(Some(&self.vao));
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&self.buffer));
        gl.buffer_data_with_array_buffer_view(
            GL::ARRAY_BUFFER,
            &Float32Array::from(data.as_slice()),
            GL::DYNAMIC_DRAW,
        );

        let c = geometry.color;
        gl.uniform4f(self.u_color.as_ref(), c.r, c.g, c.b, c.a);
        gl.uniform_matrix3fv_with_f32_array(
            self.u_transform.as_ref(),
            false,
            &geometry.transform.to_column_major(),
        );
        gl.uniform1f(self.u_point_size.as_ref(), geometry.point_size);
        gl.uniform1i(
            self.u_round.as_ref(),
            (geometry.primitive == Primitive::Points && geometry.point_size >= ROUND_POINT_SIZE)
                as i32,
        );

        gl.draw_arrays(mode(geometry.primitive), 0, geometry.vertices.len() as i32);
        gl.bind_vertex_array(None);
    }
}

fn mode(primitive: Primitive) -> u32 {
    match primitive {
        Primitive::Points => GL::POINTS,
        Primitive::Lines => GL::LINES,
        Primitive::LineStrip => GL::LINE_STRIP,
        Primitive::Triangles => GL::TRIANGLES,
        Primitive::TriangleStrip => GL::TRIANGLE_STRIP,
    }
}

fn compile(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, VizError> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| VizError::Graphics("cannot create shader".into()))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        Err(VizError::Graphics(
            gl.get_shader_info_log(&shader).unwrap_or_default(),
        ))
    }
}

fn link(gl: &GL, vert: &WebGlShader, frag: &WebGlShader) -> Result<WebGlProgram, VizError> {
    let program = gl
        .create_program()
        .ok_or_else(|| VizError::Graphics("cannot create program".into()))?;
    gl.attach_shader(&program, vert);
    gl.attach_shader(&program, frag);
    gl.link_program(&program);
    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        Err(VizError::Graphics(
            gl.get_program_info_log(&program).unwrap_or_default(),
        ))
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A `requestAnimationFrame` loop registered once and re-armed every frame
/// until cancelled.
pub struct FrameLoop {
    // `callback` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    callback: FrameCallback,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn start(mut tick: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let f = callback.clone();
        let p = pending.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            tick(timestamp);

            // schedule next
            let next = f.borrow().as_ref().and_then(|cb| {
                window()?
                    .request_animation_frame(cb.as_ref().unchecked_ref())
                    .ok()
            });
            if next.is_none() {
                warn!("animation frame loop stopped");
            }
            p.set(next);
        }) as Box<dyn FnMut(f64)>));

        let first = window().ok_or("no window")?.request_animation_frame(
            callback
                .borrow()
                .as_ref()
                .ok_or("frame callback missing")?
                .as_ref()
                .unchecked_ref(),
        )?;
        pending.set(Some(first));

        Ok(Self { callback, pending })
    }

    pub fn cancel(&self) {
        if let (Some(id), Some(window)) = (self.pending.take(), window()) {
            let _ = window.cancel_animation_frame(id);
        }
        // dropping the closure breaks its self-reference
        self.callback.borrow_mut().take();
    }
}
