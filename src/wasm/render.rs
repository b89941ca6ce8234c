//! WebGL2 side: shader compilation, the static full-screen quad, the
//! GL-backed uniform sink and the animation-frame render loop.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, HtmlCanvasElement, HtmlElement, WebGl2RenderingContext as GL, WebGlProgram,
    WebGlShader, WebGlUniformLocation,
};

use super::{controls, shaders};
use crate::clock::FrameClock;
use crate::uniforms::{Synchronizer, UniformSet, UniformSink};

pub type SharedSync = Rc<RefCell<Synchronizer<GlSink>>>;

/// Interleaved x, y, u, v for a quad covering clip space.
#[rustfmt::skip]
const QUAD_VERTICES: [f32; 16] = [
    -1.0, -1.0,   0.0, 0.0,
     1.0, -1.0,   1.0, 0.0,
     1.0,  1.0,   1.0, 1.0,
    -1.0,  1.0,   0.0, 1.0,
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

fn compile_shader(gl: &GL, kind: u32, src: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| JsValue::from_str("failed to create shader object"))?;
    gl.shader_source(&shader, src);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        return Ok(shader);
    }

    let info = gl
        .get_shader_info_log(&shader)
        .unwrap_or_else(|| "unknown compile error".into());
    log::error!("shader compilation failed: {info}");
    gl.delete_shader(Some(&shader));
    Err(JsValue::from_str(&info))
}

fn link_program(gl: &GL, vert: &WebGlShader, frag: &WebGlShader) -> Result<WebGlProgram, JsValue> {
    let program = gl
        .create_program()
        .ok_or_else(|| JsValue::from_str("failed to create program object"))?;
    gl.attach_shader(&program, vert);
    gl.attach_shader(&program, frag);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        return Ok(program);
    }

    let info = gl
        .get_program_info_log(&program)
        .unwrap_or_else(|| "unknown link error".into());
    log::error!("program link failed: {info}");
    gl.delete_program(Some(&program));
    Err(JsValue::from_str(&info))
}

/// HUD elements refreshed on every uniform push.
struct Hud {
    x_len: HtmlElement,
    y_len: HtmlElement,
    z_len: HtmlElement,
    space: HtmlElement,
    x_rota: HtmlElement,
    y_rota: HtmlElement,
    z_rota: HtmlElement,
}

impl Hud {
    fn lookup(document: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            x_len: hud_element(document, "xValue")?,
            y_len: hud_element(document, "yValue")?,
            z_len: hud_element(document, "zValue")?,
            space: hud_element(document, "cspace")?,
            x_rota: hud_element(document, "xrota")?,
            y_rota: hud_element(document, "yrota")?,
            z_rota: hud_element(document, "zrota")?,
        })
    }

    fn refresh(&self, set: &UniformSet) {
        self.x_len.set_inner_text(&format!("X: {}", set.bounds[0]));
        self.y_len.set_inner_text(&format!("Y: {}", set.bounds[1]));
        self.z_len.set_inner_text(&format!("Z: {}", set.bounds[2]));
        self.space.set_inner_text(&format!("Space : {}", set.space));
        self.x_rota
            .set_inner_text(&format!("X rota : {}", set.rotation[0]));
        self.y_rota
            .set_inner_text(&format!("Y rota : {}", set.rotation[1]));
        self.z_rota
            .set_inner_text(&format!("Z rota : {}", set.rotation[2]));
    }
}

fn hud_element(document: &Document, id: &str) -> Result<HtmlElement, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("element #{id} not found")))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str(&format!("element #{id} is not an HtmlElement")))
}

/// Writes the full [`UniformSet`] into the linked program and refreshes the
/// HUD. Plain overwrites of GL uniform state, so re-applying an unchanged
/// set leaves the visible result untouched.
pub struct GlSink {
    gl: GL,
    program: WebGlProgram,
    u_offset: Option<WebGlUniformLocation>,
    u_x_len: Option<WebGlUniformLocation>,
    u_y_len: Option<WebGlUniformLocation>,
    u_z_len: Option<WebGlUniformLocation>,
    u_cspace: Option<WebGlUniformLocation>,
    u_xrota: Option<WebGlUniformLocation>,
    u_yrota: Option<WebGlUniformLocation>,
    u_zrota: Option<WebGlUniformLocation>,
    hud: Hud,
}

impl GlSink {
    fn new(gl: GL, program: WebGlProgram, hud: Hud) -> Self {
        // Inactive uniforms resolve to None; writes to them are skipped.
        let loc = |name: &str| gl.get_uniform_location(&program, name);
        Self {
            u_offset: loc("u_sphereOffset"),
            u_x_len: loc("u_x_len"),
            u_y_len: loc("u_y_len"),
            u_z_len: loc("u_z_len"),
            u_cspace: loc("u_cspace"),
            u_xrota: loc("u_xrota"),
            u_yrota: loc("u_yrota"),
            u_zrota: loc("u_zrota"),
            gl,
            program,
            hud,
        }
    }
}

impl UniformSink for GlSink {
    fn apply(&mut self, set: &UniformSet) {
        let gl = &self.gl;
        gl.use_program(Some(&self.program));
        gl.uniform3f(
            self.u_offset.as_ref(),
            set.offset[0],
            set.offset[1],
            set.offset[2],
        );
        gl.uniform1i(self.u_x_len.as_ref(), set.bounds[0]);
        gl.uniform1i(self.u_y_len.as_ref(), set.bounds[1]);
        gl.uniform1i(self.u_z_len.as_ref(), set.bounds[2]);
        gl.uniform1i(self.u_cspace.as_ref(), set.space);
        gl.uniform1i(self.u_xrota.as_ref(), set.rotation[0]);
        gl.uniform1i(self.u_yrota.as_ref(), set.rotation[1]);
        gl.uniform1i(self.u_zrota.as_ref(), set.rotation[2]);
        self.hud.refresh(set);
    }
}

/// Builds the GL pipeline, wires the inputs and starts the render loop.
pub fn start(canvas: HtmlCanvasElement) -> Result<(), JsValue> {
    let gl: GL = canvas
        .get_context("webgl2")?
        .ok_or("WebGL2 not supported")?
        .dyn_into()?;

    let vert = compile_shader(&gl, GL::VERTEX_SHADER, shaders::VERTEX_SRC)?;
    let frag = compile_shader(&gl, GL::FRAGMENT_SHADER, shaders::FRAGMENT_SRC)?;
    let program = link_program(&gl, &vert, &frag)?;
    log::info!("shader program linked");

    // Static quad, uploaded once.
    let vao = gl
        .create_vertex_array()
        .ok_or("failed to create vertex array")?;
    gl.bind_vertex_array(Some(&vao));

    let vbo = gl.create_buffer().ok_or("failed to create vertex buffer")?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&vbo));
    // No allocation may happen between creating the view and handing it to
    // buffer_data; nothing here allocates.
    unsafe {
        let view = js_sys::Float32Array::view(&QUAD_VERTICES);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &view, GL::STATIC_DRAW);
    }

    let a_position = gl.get_attrib_location(&program, "a_position") as u32;
    gl.enable_vertex_attrib_array(a_position);
    gl.vertex_attrib_pointer_with_i32(a_position, 2, GL::FLOAT, false, 4 * 4, 0);

    let a_uv = gl.get_attrib_location(&program, "a_uv") as u32;
    gl.enable_vertex_attrib_array(a_uv);
    gl.vertex_attrib_pointer_with_i32(a_uv, 2, GL::FLOAT, false, 4 * 4, 2 * 4);

    let ebo = gl.create_buffer().ok_or("failed to create index buffer")?;
    gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&ebo));
    unsafe {
        let view = js_sys::Uint16Array::view(&QUAD_INDICES);
        gl.buffer_data_with_array_buffer_view(GL::ELEMENT_ARRAY_BUFFER, &view, GL::STATIC_DRAW);
    }

    gl.bind_vertex_array(None);
    gl.bind_buffer(GL::ARRAY_BUFFER, None);
    gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, None);

    let u_resolution = gl.get_uniform_location(&program, "u_resolution");
    let u_time = gl.get_uniform_location(&program, "u_time");
    let u_dt = gl.get_uniform_location(&program, "u_dt");

    let win = window().ok_or("no window")?;
    let document = win.document().ok_or("no document")?;
    let performance = win.performance().ok_or("no performance")?;

    // One owned parameter set shared between the input handlers and the
    // rotation timer; construction performs the initial push.
    let hud = Hud::lookup(&document)?;
    let sync: SharedSync = Rc::new(RefCell::new(Synchronizer::new(GlSink::new(
        gl.clone(),
        program.clone(),
        hud,
    ))));
    controls::install(&document, &sync)?;

    // Resize canvas to fit window
    let resize_closure = {
        let canvas = canvas.clone();
        Closure::wrap(Box::new(move || {
            let w = window().unwrap().inner_width().unwrap().as_f64().unwrap();
            let h = window().unwrap().inner_height().unwrap().as_f64().unwrap();
            canvas.set_width(w as u32);
            canvas.set_height(h as u32);
        }) as Box<dyn FnMut()>)
    };
    win.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    let fps = hud_element(&document, "fps")?;
    let mut clock = FrameClock::new(performance.now());

    // Animation loop. `f` holds the animation-frame closure so that we can
    // keep calling `request_animation_frame` recursively. Storing it inside
    // an `Option` allows us to create the `Closure` first and then obtain a
    // reference to it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        gl.viewport(0, 0, canvas.width() as i32, canvas.height() as i32);
        gl.clear_color(0.0, 0.0, 0.0, 1.0);
        gl.clear(GL::COLOR_BUFFER_BIT);

        gl.bind_vertex_array(Some(&vao));
        gl.use_program(Some(&program));
        gl.uniform2f(
            u_resolution.as_ref(),
            canvas.width() as f32,
            canvas.height() as f32,
        );
        gl.uniform1f(u_time.as_ref(), clock.elapsed() as f32);
        gl.uniform1f(u_dt.as_ref(), clock.current_dt() as f32);

        gl.draw_elements_with_i32(GL::TRIANGLES, QUAD_INDICES.len() as i32, GL::UNSIGNED_SHORT, 0);
        gl.bind_vertex_array(None);

        clock.tick(performance.now());
        fps.set_inner_text(&format!("{}", clock.smoothed_rate().round()));

        // schedule next
        window()
            .unwrap()
            .request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref())
            .unwrap();
    }) as Box<dyn FnMut()>));

    win.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref())?;

    Ok(())
}
