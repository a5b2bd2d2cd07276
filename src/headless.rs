//! An in-memory model of a GL context, for tests and tools that run without
//! a display.
//!
//! `HeadlessDriver` tracks object names, bindings, buffer and texture
//! contents, shader and program status, and framebuffer completeness, and
//! raises the same error flags a core-profile driver would for the misuse it
//! understands. It does not rasterize: draw calls and clears are validated
//! and then dropped.
//!
//! Shader "compilation" fails if the source contains an `#error` directive.
//! Linking collects `uniform` declarations from every attached shader and
//! `in` declarations from vertex shaders, and assigns them locations in
//! order of appearance. Uniform values are kept per program, so they can be
//! read back.
//!
//! `glReadPixels` reads from a texture attached to the read framebuffer;
//! other sources read as zeros.

use gleam::gl::{GLbitfield, GLboolean, GLenum, GLfloat, GLint, GLintptr, GLsizei,
                GLsizeiptr, GLuint, GLuint64};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::convert::TryFrom;
use std::os::raw::c_void;
use std::ptr;

use crate::driver::{Driver, EntryPoint};
use crate::enums::{self, BufferType, Capability, CubeFace, IndexedBufferType, PixelDataFormat,
                   PixelDataInternalFormat, PixelDataType, PrimitiveType, ShaderType, TextureType};

const SURFACE_WIDTH: GLint = 640;
const SURFACE_HEIGHT: GLint = 480;
const MAX_TEXTURE_SIZE: GLint = 16384;
const MAX_VERTEX_ATTRIBS: GLint = 16;
const MAX_COLOR_ATTACHMENTS: GLint = 8;
const MAX_ANISOTROPY: GLfloat = 16.0;
const MAX_COMPUTE_WORK_GROUP_COUNT: GLuint = 65535;
/// Texture handles are the texture name with this bit set, so they are
/// never zero.
const HANDLE_BIT: GLuint64 = 1 << 32;

/// Per-draw-buffer state `glGetIntegeri_v` reports, falling back to the
/// global value for buffers with no override.
const INDEXED_DRAW_BUFFER_STATE: &[GLenum] = &[
    gl::BLEND_SRC_RGB, gl::BLEND_SRC_ALPHA, gl::BLEND_DST_RGB, gl::BLEND_DST_ALPHA,
    gl::COLOR_WRITEMASK,
];

pub struct HeadlessDriver {
    version: String,
    extensions: Vec<String>,
    missing_entry_points: HashSet<EntryPoint>,
    state: RefCell<State>,
}

impl HeadlessDriver {
    /// A desktop OpenGL 4.6 core context with anisotropic filtering and
    /// bindless textures.
    pub fn new() -> HeadlessDriver {
        HeadlessDriver::with_version("4.6.0 headless", &["GL_ARB_bindless_texture",
                                                         "GL_ARB_texture_filter_anisotropic",
                                                         "GL_EXT_texture_filter_anisotropic"])
    }

    /// A context reporting `version` as its `GL_VERSION` string, and
    /// `extensions` as its extension list.
    pub fn with_version(version: &str, extensions: &[&str]) -> HeadlessDriver {
        HeadlessDriver {
            version: version.to_string(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
            missing_entry_points: HashSet::new(),
            state: RefCell::new(State::new()),
        }
    }

    /// Report `entry` as not loaded.
    pub fn without_entry_point(mut self, entry: EntryPoint) -> HeadlessDriver {
        self.missing_entry_points.insert(entry);
        self
    }

    /// The number of live objects of every kind, excluding the default
    /// objects named zero. Handy for leak checks.
    pub fn live_objects(&self) -> usize {
        let s = self.state.borrow();
        s.buffers.len()
            + s.textures.len()
            + s.framebuffers.len()
            + s.renderbuffers.len()
            + s.vertex_arrays.len()
            + s.transform_feedbacks.keys().filter(|&&name| name != 0).count()
            + s.shaders.len()
            + s.programs.len()
    }
}

impl Default for HeadlessDriver {
    fn default() -> HeadlessDriver {
        HeadlessDriver::new()
    }
}

struct Mapping {
    offset: usize,
    length: usize,
}

#[derive(Default)]
struct BufferObject {
    data: Vec<u8>,
    usage: GLenum,
    mapped: Option<Mapping>,
}

#[derive(Clone)]
struct Image {
    width: GLsizei,
    height: GLsizei,
    depth: GLsizei,
    internal_format: GLint,
    pixel_size: usize,
    /// Tightly packed rows.
    data: Vec<u8>,
}

#[derive(Default)]
struct TextureObject {
    target: Option<GLenum>,
    /// Keyed by image target (a cube face, or the texture target) and level.
    images: HashMap<(GLenum, GLint), Image>,
    params: HashMap<GLenum, Vec<GLfloat>>,
    immutable_levels: Option<GLint>,
    buffer: Option<GLuint>,
    /// Set once a handle has been created; the texture can't change after.
    bindless: bool,
}

enum Attachment {
    Texture { name: GLuint, image_target: Option<GLenum>, level: GLint, layer: Option<GLint> },
    Renderbuffer(GLuint),
}

#[derive(Default)]
struct FramebufferObject {
    attachments: HashMap<GLenum, Attachment>,
    draw_buffers: Option<Vec<GLenum>>,
    read_buffer: Option<GLenum>,
}

#[derive(Default)]
struct RenderbufferObject {
    width: GLsizei,
    height: GLsizei,
    samples: GLsizei,
}

#[derive(Default)]
struct TransformFeedbackObject {
    active: bool,
    paused: bool,
}

struct ShaderObject {
    ty: GLenum,
    source: String,
    compiled: bool,
    log: String,
    delete_pending: bool,
}

#[derive(Default)]
struct ProgramObject {
    shaders: Vec<GLuint>,
    linked: bool,
    validated: bool,
    log: String,
    uniforms: HashMap<String, GLint>,
    attribs: HashMap<String, GLint>,
    attrib_bindings: HashMap<String, GLuint>,
    varyings: Vec<String>,
    delete_pending: bool,
    compute: bool,
    /// Uniform values by location. Unset uniforms read as zero.
    values: HashMap<GLint, Vec<f64>>,
}

struct State {
    next_name: GLuint,
    error: GLenum,

    buffers: HashMap<GLuint, BufferObject>,
    textures: HashMap<GLuint, TextureObject>,
    framebuffers: HashMap<GLuint, FramebufferObject>,
    renderbuffers: HashMap<GLuint, RenderbufferObject>,
    vertex_arrays: HashSet<GLuint>,
    transform_feedbacks: HashMap<GLuint, TransformFeedbackObject>,
    shaders: HashMap<GLuint, ShaderObject>,
    programs: HashMap<GLuint, ProgramObject>,

    buffer_bindings: HashMap<GLenum, GLuint>,
    indexed_bindings: HashMap<(GLenum, GLuint), GLuint>,
    active_unit: GLuint,
    texture_bindings: HashMap<(GLuint, GLenum), GLuint>,
    draw_framebuffer: GLuint,
    read_framebuffer: GLuint,
    renderbuffer: GLuint,
    transform_feedback: GLuint,
    vertex_array: GLuint,
    current_program: GLuint,

    enabled: HashSet<GLenum>,
    /// `glEnablei` overrides of `enabled`, cleared by `glEnable`.
    enabled_indexed: HashMap<(GLenum, GLuint), bool>,
    integers: HashMap<GLenum, Vec<GLint>>,
    /// Per-draw-buffer state, like `GL_BLEND_SRC_RGB` for buffer 2.
    indexed_integers: HashMap<(GLenum, GLuint), Vec<GLint>>,
    floats: HashMap<GLenum, Vec<GLfloat>>,
    /// Texture handles and whether each is resident.
    handles: HashMap<GLuint64, bool>,
}

impl State {
    fn new() -> State {
        let mut transform_feedbacks = HashMap::new();
        transform_feedbacks.insert(0, TransformFeedbackObject::default());

        let mut integers = HashMap::new();
        let mut set = |name: GLenum, values: &[GLint]| {
            integers.insert(name, values.to_vec());
        };
        set(gl::VIEWPORT, &[0, 0, SURFACE_WIDTH, SURFACE_HEIGHT]);
        set(gl::SCISSOR_BOX, &[0, 0, SURFACE_WIDTH, SURFACE_HEIGHT]);
        set(gl::DEPTH_FUNC, &[gl::LESS as GLint]);
        set(gl::DEPTH_WRITEMASK, &[1]);
        set(gl::COLOR_WRITEMASK, &[1, 1, 1, 1]);
        set(gl::BLEND_SRC_RGB, &[gl::ONE as GLint]);
        set(gl::BLEND_SRC_ALPHA, &[gl::ONE as GLint]);
        set(gl::BLEND_DST_RGB, &[gl::ZERO as GLint]);
        set(gl::BLEND_DST_ALPHA, &[gl::ZERO as GLint]);
        set(gl::BLEND_EQUATION_RGB, &[gl::FUNC_ADD as GLint]);
        set(gl::BLEND_EQUATION_ALPHA, &[gl::FUNC_ADD as GLint]);
        set(gl::CULL_FACE_MODE, &[gl::BACK as GLint]);
        set(gl::FRONT_FACE, &[gl::CCW as GLint]);
        set(gl::STENCIL_CLEAR_VALUE, &[0]);
        set(gl::STENCIL_FUNC, &[gl::ALWAYS as GLint]);
        set(gl::STENCIL_REF, &[0]);
        set(gl::STENCIL_VALUE_MASK, &[-1]);
        set(gl::STENCIL_WRITEMASK, &[-1]);
        set(gl::STENCIL_FAIL, &[gl::KEEP as GLint]);
        set(gl::STENCIL_PASS_DEPTH_FAIL, &[gl::KEEP as GLint]);
        set(gl::STENCIL_PASS_DEPTH_PASS, &[gl::KEEP as GLint]);
        set(gl::STENCIL_BACK_FUNC, &[gl::ALWAYS as GLint]);
        set(gl::STENCIL_BACK_REF, &[0]);
        set(gl::STENCIL_BACK_VALUE_MASK, &[-1]);
        set(gl::STENCIL_BACK_WRITEMASK, &[-1]);
        set(gl::STENCIL_BACK_FAIL, &[gl::KEEP as GLint]);
        set(gl::STENCIL_BACK_PASS_DEPTH_FAIL, &[gl::KEEP as GLint]);
        set(gl::STENCIL_BACK_PASS_DEPTH_PASS, &[gl::KEEP as GLint]);
        set(gl::POLYGON_MODE, &[gl::FILL as GLint, gl::FILL as GLint]);
        set(gl::PROVOKING_VERTEX, &[gl::LAST_VERTEX_CONVENTION as GLint]);
        set(gl::LOGIC_OP_MODE, &[gl::COPY as GLint]);
        set(gl::PRIMITIVE_RESTART_INDEX, &[0]);
        set(gl::LINE_SMOOTH_HINT, &[gl::DONT_CARE as GLint]);
        set(gl::POLYGON_SMOOTH_HINT, &[gl::DONT_CARE as GLint]);
        set(gl::TEXTURE_COMPRESSION_HINT, &[gl::DONT_CARE as GLint]);
        set(gl::FRAGMENT_SHADER_DERIVATIVE_HINT, &[gl::DONT_CARE as GLint]);
        set(gl::UNPACK_ALIGNMENT, &[4]);
        set(gl::PACK_ALIGNMENT, &[4]);
        set(gl::MAX_TEXTURE_SIZE, &[MAX_TEXTURE_SIZE]);
        set(gl::MAX_VERTEX_ATTRIBS, &[MAX_VERTEX_ATTRIBS]);
        set(gl::MAX_COLOR_ATTACHMENTS, &[MAX_COLOR_ATTACHMENTS]);
        set(gl::MAX_DRAW_BUFFERS, &[MAX_COLOR_ATTACHMENTS]);
        set(gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS, &[80]);
        set(gl::MAX_UNIFORM_BUFFER_BINDINGS, &[36]);
        set(gl::MAX_TRANSFORM_FEEDBACK_BUFFERS, &[4]);
        set(gl::MAX_SAMPLES, &[8]);

        let mut floats = HashMap::new();
        floats.insert(gl::COLOR_CLEAR_VALUE, vec![0.0; 4]);
        floats.insert(gl::DEPTH_CLEAR_VALUE, vec![1.0]);
        floats.insert(gl::DEPTH_RANGE, vec![0.0, 1.0]);
        floats.insert(gl::BLEND_COLOR, vec![0.0; 4]);
        floats.insert(gl::LINE_WIDTH, vec![1.0]);
        floats.insert(gl::POINT_SIZE, vec![1.0]);
        floats.insert(gl::POLYGON_OFFSET_FACTOR, vec![0.0]);
        floats.insert(gl::POLYGON_OFFSET_UNITS, vec![0.0]);
        floats.insert(enums::MAX_TEXTURE_MAX_ANISOTROPY, vec![MAX_ANISOTROPY]);

        let mut enabled = HashSet::new();
        enabled.insert(gl::DITHER);
        enabled.insert(gl::MULTISAMPLE);

        State {
            next_name: 1,
            error: gl::NO_ERROR,
            buffers: HashMap::new(),
            textures: HashMap::new(),
            framebuffers: HashMap::new(),
            renderbuffers: HashMap::new(),
            vertex_arrays: HashSet::new(),
            transform_feedbacks,
            shaders: HashMap::new(),
            programs: HashMap::new(),
            buffer_bindings: HashMap::new(),
            indexed_bindings: HashMap::new(),
            active_unit: 0,
            texture_bindings: HashMap::new(),
            draw_framebuffer: 0,
            read_framebuffer: 0,
            renderbuffer: 0,
            transform_feedback: 0,
            vertex_array: 0,
            current_program: 0,
            enabled,
            enabled_indexed: HashMap::new(),
            integers,
            indexed_integers: HashMap::new(),
            floats,
            handles: HashMap::new(),
        }
    }

    /// Record `error`, unless an earlier error is still pending.
    fn error(&mut self, error: GLenum) {
        if self.error == gl::NO_ERROR {
            self.error = error;
        }
    }

    fn gen_names(&mut self, n: GLsizei) -> Vec<GLuint> {
        if n < 0 {
            self.error(gl::INVALID_VALUE);
            return vec![];
        }
        (0..n).map(|_| {
            let name = self.next_name;
            self.next_name += 1;
            name
        }).collect()
    }

    fn integer(&self, name: GLenum) -> GLint {
        self.integers.get(&name).map_or(0, |v| v[0])
    }

    fn set_integers(&mut self, name: GLenum, values: &[GLint]) {
        self.integers.insert(name, values.to_vec());
    }

    fn bound_buffer(&mut self, target: GLenum) -> Option<&mut BufferObject> {
        let name = self.buffer_bindings.get(&target).copied().unwrap_or(0);
        if name == 0 {
            self.error(gl::INVALID_OPERATION);
            return None;
        }
        self.buffers.get_mut(&name)
    }

    fn bound_texture_name(&self, target: GLenum) -> GLuint {
        self.texture_bindings.get(&(self.active_unit, target)).copied().unwrap_or(0)
    }

    /// Return the texture bound for `image_target`, which may be a cube face.
    fn bound_texture(&mut self, image_target: GLenum) -> Option<&mut TextureObject> {
        let name = self.bound_texture_name(texture_target_of(image_target));
        if name == 0 {
            self.error(gl::INVALID_OPERATION);
            return None;
        }
        self.textures.get_mut(&name)
    }

    /// Like `bound_texture`, for calls that change the texture. A texture
    /// with a bindless handle can't be changed.
    fn bound_mutable_texture(&mut self, image_target: GLenum) -> Option<&mut TextureObject> {
        let bindless = self.bound_texture(image_target)?.bindless;
        if bindless {
            self.error(gl::INVALID_OPERATION);
            return None;
        }
        self.bound_texture(image_target)
    }

    fn framebuffer_binding(&self, target: GLenum) -> GLuint {
        if target == gl::READ_FRAMEBUFFER {
            self.read_framebuffer
        } else {
            self.draw_framebuffer
        }
    }

    fn bound_framebuffer(&mut self, target: GLenum) -> Option<&mut FramebufferObject> {
        let name = self.framebuffer_binding(target);
        if name == 0 {
            self.error(gl::INVALID_OPERATION);
            return None;
        }
        self.framebuffers.get_mut(&name)
    }

    fn active_transform_feedback(&self) -> Option<&TransformFeedbackObject> {
        self.transform_feedbacks.get(&self.transform_feedback).filter(|tf| tf.active)
    }

    fn framebuffer_status(&self, name: GLuint) -> GLenum {
        if name == 0 {
            return gl::FRAMEBUFFER_COMPLETE;
        }
        let fb = match self.framebuffers.get(&name) {
            Some(fb) => fb,
            None => return gl::FRAMEBUFFER_UNDEFINED,
        };
        if fb.attachments.is_empty() {
            return gl::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT;
        }

        let mut samples = None;
        for attachment in fb.attachments.values() {
            let (complete, attachment_samples) = match *attachment {
                Attachment::Texture { name, image_target, level, layer } => {
                    let image = self.textures.get(&name).and_then(|tex| {
                        let target = image_target.or(tex.target)?;
                        tex.images.get(&(target, level))
                    });
                    let complete = match (image, layer) {
                        (Some(image), Some(layer)) => layer < image.depth,
                        (Some(_), None) => true,
                        (None, _) => false,
                    };
                    (complete, 0)
                }
                Attachment::Renderbuffer(name) => match self.renderbuffers.get(&name) {
                    Some(rb) => (rb.width > 0 && rb.height > 0, rb.samples),
                    None => (false, 0),
                },
            };
            if !complete {
                return gl::FRAMEBUFFER_INCOMPLETE_ATTACHMENT;
            }
            match samples {
                None => samples = Some(attachment_samples),
                Some(s) if s != attachment_samples => return gl::FRAMEBUFFER_INCOMPLETE_MULTISAMPLE,
                Some(_) => {}
            }
        }

        if let Some(draw_buffers) = &fb.draw_buffers {
            if draw_buffers.iter().any(|b| *b != gl::NONE && !fb.attachments.contains_key(b)) {
                return gl::FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER;
            }
        }
        if let Some(read_buffer) = fb.read_buffer {
            if read_buffer != gl::NONE && !fb.attachments.contains_key(&read_buffer) {
                return gl::FRAMEBUFFER_INCOMPLETE_READ_BUFFER;
            }
        }

        gl::FRAMEBUFFER_COMPLETE
    }

    /// Check the conditions every draw call and clear shares.
    fn check_draw_framebuffer(&mut self) -> bool {
        if self.framebuffer_status(self.draw_framebuffer) != gl::FRAMEBUFFER_COMPLETE {
            self.error(gl::INVALID_FRAMEBUFFER_OPERATION);
            return false;
        }
        true
    }

    fn check_draw(&mut self, mode: GLenum, count: GLsizei) -> bool {
        if PrimitiveType::try_from(mode).is_err() {
            self.error(gl::INVALID_ENUM);
            return false;
        }
        if count < 0 {
            self.error(gl::INVALID_VALUE);
            return false;
        }
        let linked = self.programs.get(&self.current_program).map_or(false, |p| p.linked);
        if !linked {
            self.error(gl::INVALID_OPERATION);
            return false;
        }
        self.check_draw_framebuffer()
    }

    fn check_uniform(&mut self, location: GLint) -> bool {
        let program = match self.programs.get(&self.current_program) {
            Some(program) => program,
            None => {
                self.error(gl::INVALID_OPERATION);
                return false;
            }
        };
        if location == -1 {
            return false;
        }
        if !program.uniforms.values().any(|&l| l == location) {
            self.error(gl::INVALID_OPERATION);
            return false;
        }
        true
    }

    /// Check the uniform call, then store `values` at `location` in the
    /// current program.
    fn set_uniform(&mut self, location: GLint, values: Vec<f64>) {
        if !self.check_uniform(location) {
            return;
        }
        if let Some(program) = self.programs.get_mut(&self.current_program) {
            program.values.insert(location, values);
        }
    }

    /// The values stored at `location` in `program`, for `glGetUniform*`.
    fn uniform_values(&mut self, program: GLuint, location: GLint) -> Vec<f64> {
        let program = match self.programs.get(&program) {
            Some(p) if p.linked => p,
            Some(_) => {
                self.error(gl::INVALID_OPERATION);
                return vec![];
            }
            None => {
                self.error(gl::INVALID_VALUE);
                return vec![];
            }
        };
        if !program.uniforms.values().any(|&l| l == location) {
            self.error(gl::INVALID_OPERATION);
            return vec![];
        }
        program.values.get(&location).cloned().unwrap_or_else(|| vec![0.0])
    }

    fn check_elements(&mut self, element_type: GLenum) -> bool {
        if ![gl::UNSIGNED_BYTE, gl::UNSIGNED_SHORT, gl::UNSIGNED_INT].contains(&element_type) {
            self.error(gl::INVALID_ENUM);
            return false;
        }
        if self.buffer_bindings.get(&gl::ELEMENT_ARRAY_BUFFER).copied().unwrap_or(0) == 0 {
            self.error(gl::INVALID_OPERATION);
            return false;
        }
        true
    }

    fn check_draw_buffer_index(&mut self, buf: GLuint) -> bool {
        if buf >= MAX_COLOR_ATTACHMENTS as GLuint {
            self.error(gl::INVALID_VALUE);
            return false;
        }
        true
    }

    /// Set the front stencil state, the back, or both, as `face` selects.
    /// `front` and `back` name the state each of `values` goes to.
    fn stencil_face(&mut self, face: GLenum, front: &[GLenum], back: &[GLenum],
                    values: &[GLint]) {
        if enums::Face::try_from(face).is_err() {
            return self.error(gl::INVALID_ENUM);
        }
        if face != gl::BACK {
            for (&name, &value) in front.iter().zip(values) {
                self.set_integers(name, &[value]);
            }
        }
        if face != gl::FRONT {
            for (&name, &value) in back.iter().zip(values) {
                self.set_integers(name, &[value]);
            }
        }
    }

    /// Copy the `width` by `height` rectangle at `(x, y)` of the read
    /// framebuffer's color buffer into `output`, rows padded to
    /// `alignment`. Pixels with no texture behind them read as zero.
    fn read_color(&self, x: GLint, y: GLint, width: usize, height: usize, pixel_size: usize,
                  alignment: usize, output: &mut [u8]) -> Result<(), GLenum> {
        let stride = row_stride(width, pixel_size, alignment);
        let fb = match self.framebuffers.get(&self.read_framebuffer) {
            Some(fb) => fb,
            None => return Ok(()),
        };
        let source = fb.read_buffer.unwrap_or(gl::COLOR_ATTACHMENT0);
        let image = match fb.attachments.get(&source) {
            Some(&Attachment::Texture { name, image_target, level, layer }) => {
                let texture = self.textures.get(&name);
                let image = texture.and_then(|tex| {
                    let target = image_target.or(tex.target)?;
                    tex.images.get(&(target, level))
                });
                match image {
                    Some(image) => (image, layer.unwrap_or(0)),
                    None => return Ok(()),
                }
            }
            _ => return Ok(()),
        };
        let (image, layer) = image;
        if image.pixel_size != pixel_size {
            return Err(gl::INVALID_OPERATION);
        }
        for row in 0..height {
            let src_y = y + row as GLint;
            if src_y < 0 || src_y >= image.height {
                continue;
            }
            for col in 0..width {
                let src_x = x + col as GLint;
                if src_x < 0 || src_x >= image.width {
                    continue;
                }
                let src_row = layer as usize * image.height as usize + src_y as usize;
                let src = (src_row * image.width as usize + src_x as usize) * pixel_size;
                let dst = row * stride + col * pixel_size;
                output[dst..dst + pixel_size].copy_from_slice(&image.data[src..src + pixel_size]);
            }
        }
        Ok(())
    }

    fn unbind_everywhere(&mut self, name: GLuint) {
        for bound in self.buffer_bindings.values_mut()
            .chain(self.indexed_bindings.values_mut())
            .chain(self.texture_bindings.values_mut())
        {
            if *bound == name {
                *bound = 0;
            }
        }
    }

    fn store_image(&mut self, image_target: GLenum, level: GLint, internal_format: GLint,
                   size: [GLsizei; 3], format: GLenum, ty: GLenum, opt_data: Option<&[u8]>) {
        if size.iter().any(|&d| d < 0 || d > MAX_TEXTURE_SIZE) || level < 0 {
            self.error(gl::INVALID_VALUE);
            return;
        }
        if image_target == gl::TEXTURE_CUBE_MAP {
            self.error(gl::INVALID_ENUM);
            return;
        }
        let pixel_size = match client_pixel_size(format, ty) {
            Some(size) => size,
            None => {
                self.error(gl::INVALID_ENUM);
                return;
            }
        };
        let alignment = self.integer(gl::UNPACK_ALIGNMENT) as usize;
        let (width, rows) = (size[0] as usize, size[1] as usize * size[2] as usize);
        let data = match opt_data {
            Some(data) => {
                if data.len() < enums::image_size(width, rows, pixel_size, alignment) {
                    self.error(gl::INVALID_VALUE);
                    return;
                }
                repack(data, width, rows, pixel_size, alignment, 1)
            }
            None => vec![0; width * rows * pixel_size],
        };

        let texture = match self.bound_mutable_texture(image_target) {
            Some(texture) => texture,
            None => return,
        };
        if texture.immutable_levels.is_some() {
            self.error(gl::INVALID_OPERATION);
            return;
        }
        texture.images.insert((image_target, level), Image {
            width: size[0],
            height: size[1],
            depth: size[2],
            internal_format,
            pixel_size,
            data,
        });
    }

    fn store_sub_image(&mut self, image_target: GLenum, level: GLint, offset: [GLint; 3],
                       size: [GLsizei; 3], format: GLenum, ty: GLenum, data: &[u8]) {
        let pixel_size = match client_pixel_size(format, ty) {
            Some(size) => size,
            None => {
                self.error(gl::INVALID_ENUM);
                return;
            }
        };
        let alignment = self.integer(gl::UNPACK_ALIGNMENT) as usize;
        let (width, rows) = (size[0] as usize, size[1] as usize * size[2] as usize);
        if size.iter().any(|&d| d < 0) || offset.iter().any(|&o| o < 0)
            || data.len() < enums::image_size(width, rows, pixel_size, alignment)
        {
            self.error(gl::INVALID_VALUE);
            return;
        }
        let source = repack(data, width, rows, pixel_size, alignment, 1);

        let image = match self.bound_mutable_texture(image_target)
            .and_then(|texture| texture.images.get_mut(&(image_target, level)))
        {
            Some(image) => image,
            None => {
                self.error(gl::INVALID_OPERATION);
                return;
            }
        };
        if image.pixel_size != pixel_size {
            self.error(gl::INVALID_OPERATION);
            return;
        }
        if offset[0] + size[0] > image.width
            || offset[1] + size[1] > image.height
            || offset[2] + size[2] > image.depth
        {
            self.error(gl::INVALID_VALUE);
            return;
        }

        let row_bytes = width * pixel_size;
        for z in 0..size[2] as usize {
            for y in 0..size[1] as usize {
                let src = (z * size[1] as usize + y) * row_bytes;
                let dst_row = (offset[2] as usize + z) * image.height as usize
                    + offset[1] as usize + y;
                let dst = (dst_row * image.width as usize + offset[0] as usize) * pixel_size;
                image.data[dst..dst + row_bytes].copy_from_slice(&source[src..src + row_bytes]);
            }
        }
    }

    fn allocate_storage(&mut self, target: GLenum, levels: GLint, internal_format: GLenum,
                        size: [GLsizei; 3]) {
        if levels < 1 || size.iter().any(|&d| d < 1) {
            self.error(gl::INVALID_VALUE);
            return;
        }
        let (format, ty) = match PixelDataInternalFormat::try_from(internal_format) {
            Ok(f) => f.transfer_format(),
            Err(_) => {
                self.error(gl::INVALID_ENUM);
                return;
            }
        };
        let pixel_size = enums::pixel_size(format, ty);
        let image_targets: Vec<GLenum> = if target == gl::TEXTURE_CUBE_MAP {
            CubeFace::ALL.iter().map(|face| face.as_gl()).collect()
        } else {
            vec![target]
        };
        let layered = target == gl::TEXTURE_2D_ARRAY || target == gl::TEXTURE_CUBE_MAP_ARRAY;

        let texture = match self.bound_mutable_texture(target) {
            Some(texture) => texture,
            None => return,
        };
        if texture.immutable_levels.is_some() {
            self.error(gl::INVALID_OPERATION);
            return;
        }
        for level in 0..levels {
            let [width, height, depth] = mip_size(size, level, layered);
            for &image_target in &image_targets {
                texture.images.insert((image_target, level), Image {
                    width,
                    height,
                    depth,
                    internal_format: internal_format as GLint,
                    pixel_size,
                    data: vec![0; (width * height * depth) as usize * pixel_size],
                });
            }
        }
        texture.immutable_levels = Some(levels);
    }

    fn tex_parameter(&mut self, target: GLenum, pname: GLenum, values: Vec<GLfloat>) {
        if pname == enums::TEXTURE_MAX_ANISOTROPY && values[0] < 1.0 {
            self.error(gl::INVALID_VALUE);
            return;
        }
        if pname == gl::TEXTURE_SWIZZLE_RGBA && values.len() < 4 {
            self.error(gl::INVALID_VALUE);
            return;
        }
        if let Some(texture) = self.bound_mutable_texture(target) {
            match pname {
                enums::TEXTURE_MAX_ANISOTROPY => {
                    texture.params.insert(pname, vec![values[0].min(MAX_ANISOTROPY)]);
                }
                gl::TEXTURE_SWIZZLE_RGBA => {
                    let channels = [gl::TEXTURE_SWIZZLE_R, gl::TEXTURE_SWIZZLE_G,
                                    gl::TEXTURE_SWIZZLE_B, gl::TEXTURE_SWIZZLE_A];
                    for (&channel, &value) in channels.iter().zip(&values) {
                        texture.params.insert(channel, vec![value]);
                    }
                }
                _ => {
                    texture.params.insert(pname, values);
                }
            }
        }
    }

    fn tex_parameter_value(&mut self, target: GLenum, pname: GLenum) -> GLfloat {
        let texture = match self.bound_texture(target) {
            Some(texture) => texture,
            None => return 0.0,
        };
        if let Some(values) = texture.params.get(&pname) {
            return values[0];
        }
        match pname {
            gl::TEXTURE_IMMUTABLE_FORMAT => texture.immutable_levels.is_some() as GLint as GLfloat,
            gl::TEXTURE_IMMUTABLE_LEVELS => texture.immutable_levels.unwrap_or(0) as GLfloat,
            _ => default_tex_parameter(pname) as GLfloat,
        }
    }

    fn query_integers(&mut self, name: GLenum) -> Vec<GLint> {
        if let Some(&target) = BufferType::ALL.iter().find(|t| t.binding().as_gl() == name) {
            return vec![self.buffer_bindings.get(&target.as_gl()).copied().unwrap_or(0) as GLint];
        }
        if let Some(&target) = TextureType::ALL.iter().find(|t| t.binding().as_gl() == name) {
            return vec![self.bound_texture_name(target.as_gl()) as GLint];
        }
        match name {
            gl::DRAW_FRAMEBUFFER_BINDING => vec![self.draw_framebuffer as GLint],
            gl::READ_FRAMEBUFFER_BINDING => vec![self.read_framebuffer as GLint],
            gl::RENDERBUFFER_BINDING => vec![self.renderbuffer as GLint],
            gl::TRANSFORM_FEEDBACK_BINDING => vec![self.transform_feedback as GLint],
            gl::VERTEX_ARRAY_BINDING => vec![self.vertex_array as GLint],
            gl::CURRENT_PROGRAM => vec![self.current_program as GLint],
            gl::ACTIVE_TEXTURE => vec![(gl::TEXTURE0 + self.active_unit) as GLint],
            _ => {
                if let Some(values) = self.integers.get(&name) {
                    return values.clone();
                }
                if let Some(values) = self.floats.get(&name) {
                    return values.iter().map(|&v| v as GLint).collect();
                }
                if Capability::try_from(name).is_ok() {
                    return vec![self.enabled.contains(&name) as GLint];
                }
                self.error(gl::INVALID_ENUM);
                vec![]
            }
        }
    }

    fn delete_shader_if_unused(&mut self, shader: GLuint) {
        let attached = self.programs.values().any(|p| p.shaders.contains(&shader));
        if !attached && self.shaders.get(&shader).map_or(false, |s| s.delete_pending) {
            self.shaders.remove(&shader);
        }
    }

    fn remove_program(&mut self, program: GLuint) {
        if let Some(removed) = self.programs.remove(&program) {
            for shader in removed.shaders {
                self.delete_shader_if_unused(shader);
            }
        }
    }

    fn link(&mut self, program: GLuint) {
        let shaders: Vec<&ShaderObject> = match self.programs.get(&program) {
            Some(p) => p.shaders.iter().filter_map(|s| self.shaders.get(s)).collect(),
            None => {
                self.error(gl::INVALID_VALUE);
                return;
            }
        };

        let mut log = String::new();
        if shaders.is_empty() {
            log.push_str("error: no shaders attached\n");
        }
        if shaders.iter().any(|s| !s.compiled) {
            log.push_str("error: program contains shaders that did not compile\n");
        }

        let compute = shaders.iter().any(|s| s.ty == gl::COMPUTE_SHADER);
        let mut uniforms = Vec::new();
        let mut inputs = Vec::new();
        let mut outputs = Vec::new();
        for shader in &shaders {
            for name in declarations(&shader.source, "uniform") {
                if !uniforms.contains(&name) {
                    uniforms.push(name);
                }
            }
            if shader.ty == gl::VERTEX_SHADER {
                inputs.extend(declarations(&shader.source, "in"));
                inputs.extend(declarations(&shader.source, "attribute"));
            }
            if shader.ty == gl::VERTEX_SHADER || shader.ty == gl::GEOMETRY_SHADER {
                outputs.extend(declarations(&shader.source, "out"));
            }
        }

        let program = match self.programs.get_mut(&program) {
            Some(program) => program,
            None => return,
        };
        for varying in &program.varyings {
            if !outputs.contains(varying) {
                log.push_str(&format!("error: transform feedback varying '{}' is not an output\n",
                                      varying));
            }
        }

        program.linked = log.is_empty();
        program.validated = false;
        program.log = log;
        program.compute = compute;
        program.uniforms.clear();
        program.values.clear();
        program.attribs.clear();
        if !program.linked {
            return;
        }

        for (location, name) in uniforms.into_iter().enumerate() {
            program.uniforms.insert(name, location as GLint);
        }
        let mut next = 0;
        for name in inputs {
            let location = match program.attrib_bindings.get(&name) {
                Some(&index) => index as GLint,
                None => {
                    while program.attrib_bindings.values().any(|&i| i as GLint == next) {
                        next += 1;
                    }
                    next += 1;
                    next - 1
                }
            };
            program.attribs.insert(name, location);
        }
    }
}

/// Map an image target (like a cube map face) to the target its texture is
/// bound to.
fn texture_target_of(image_target: GLenum) -> GLenum {
    if CubeFace::try_from(image_target).is_ok() {
        gl::TEXTURE_CUBE_MAP
    } else {
        image_target
    }
}

fn client_pixel_size(format: GLenum, ty: GLenum) -> Option<usize> {
    let format = PixelDataFormat::try_from(format).ok()?;
    let ty = PixelDataType::try_from(ty).ok()?;
    Some(enums::pixel_size(format, ty))
}

fn row_stride(width: usize, pixel_size: usize, alignment: usize) -> usize {
    let row = width * pixel_size;
    (row + alignment - 1) / alignment * alignment
}

/// Copy `rows` rows of pixels from `src`, with rows padded to `from`
/// alignment, into a new buffer with rows padded to `to` alignment.
fn repack(src: &[u8], width: usize, rows: usize, pixel_size: usize, from: usize, to: usize) -> Vec<u8> {
    let row_bytes = width * pixel_size;
    let src_stride = row_stride(width, pixel_size, from);
    let dst_stride = row_stride(width, pixel_size, to);
    let mut dst = vec![0; enums::image_size(width, rows, pixel_size, to)];
    for row in 0..rows {
        dst[row * dst_stride..row * dst_stride + row_bytes]
            .copy_from_slice(&src[row * src_stride..row * src_stride + row_bytes]);
    }
    dst
}

fn mip_size(size: [GLsizei; 3], level: GLint, layered: bool) -> [GLsizei; 3] {
    let shrink = |d: GLsizei| (d >> level).max(1);
    [shrink(size[0]), shrink(size[1]), if layered { size[2] } else { shrink(size[2]) }]
}

fn default_tex_parameter(pname: GLenum) -> GLint {
    (match pname {
        gl::TEXTURE_MIN_FILTER => gl::NEAREST_MIPMAP_LINEAR,
        gl::TEXTURE_MAG_FILTER => gl::LINEAR,
        gl::TEXTURE_WRAP_S | gl::TEXTURE_WRAP_T | gl::TEXTURE_WRAP_R => gl::REPEAT,
        gl::TEXTURE_SWIZZLE_R => gl::RED,
        gl::TEXTURE_SWIZZLE_G => gl::GREEN,
        gl::TEXTURE_SWIZZLE_B => gl::BLUE,
        gl::TEXTURE_SWIZZLE_A => gl::ALPHA,
        gl::TEXTURE_COMPARE_MODE => gl::NONE,
        gl::TEXTURE_COMPARE_FUNC => gl::LEQUAL,
        gl::TEXTURE_MAX_LEVEL => 1000,
        enums::TEXTURE_MAX_ANISOTROPY => 1,
        _ => 0,
    }) as GLint
}

/// Return the names declared with storage qualifier `qualifier` in `source`,
/// like `uniform mat4 mvp;` or `layout(location = 0) in vec3 position;`.
fn declarations(source: &str, qualifier: &str) -> Vec<String> {
    let mut names = vec![];
    for statement in source.split(|c: char| c == ';' || c == '\n') {
        let statement = match statement.find("//") {
            Some(comment) => &statement[..comment],
            None => statement,
        };
        let mut statement = statement.trim();
        if statement.starts_with("layout") {
            match statement.find(')') {
                Some(close) => statement = statement[close + 1..].trim(),
                None => continue,
            }
        }
        let mut words = statement.split_whitespace();
        let mut word = words.next();
        // Skip interpolation and precision qualifiers.
        while let Some(w) = word {
            if ["flat", "smooth", "noperspective", "highp", "mediump", "lowp"].contains(&w) {
                word = words.next();
            } else {
                break;
            }
        }
        if word != Some(qualifier) {
            continue;
        }
        let rest: Vec<&str> = words.collect();
        if rest.len() < 2 || rest.contains(&"{") {
            continue;
        }
        let last = rest[rest.len() - 1];
        let name = last.split('[').next().unwrap_or(last);
        names.push(name.to_string());
    }
    names
}

impl Driver for HeadlessDriver {
    fn has_entry_point(&self, entry: EntryPoint) -> bool {
        !self.missing_entry_points.contains(&entry)
    }

    fn get_error(&self) -> GLenum {
        let mut s = self.state.borrow_mut();
        std::mem::replace(&mut s.error, gl::NO_ERROR)
    }

    fn get_string(&self, which: GLenum) -> String {
        match which {
            gl::VENDOR => "oglwrap".to_string(),
            gl::RENDERER => "headless".to_string(),
            gl::VERSION => self.version.clone(),
            gl::SHADING_LANGUAGE_VERSION => "4.60".to_string(),
            gl::EXTENSIONS => self.extensions.join(" "),
            _ => {
                self.state.borrow_mut().error(gl::INVALID_ENUM);
                String::new()
            }
        }
    }

    fn get_string_i(&self, which: GLenum, index: GLuint) -> String {
        if which != gl::EXTENSIONS {
            self.state.borrow_mut().error(gl::INVALID_ENUM);
            return String::new();
        }
        match self.extensions.get(index as usize) {
            Some(ext) => ext.clone(),
            None => {
                self.state.borrow_mut().error(gl::INVALID_VALUE);
                String::new()
            }
        }
    }

    fn get_integer_v(&self, name: GLenum, result: &mut [GLint]) {
        let values = match name {
            gl::NUM_EXTENSIONS => vec![self.extensions.len() as GLint],
            _ => self.state.borrow_mut().query_integers(name),
        };
        for (slot, value) in result.iter_mut().zip(values) {
            *slot = value;
        }
    }

    fn get_integer_iv(&self, name: GLenum, index: GLuint, result: &mut [GLint]) {
        let mut s = self.state.borrow_mut();
        let target = IndexedBufferType::ALL.iter().find(|t| t.binding().as_gl() == name);
        match target {
            Some(target) => {
                if let Some(slot) = result.first_mut() {
                    *slot = s.indexed_bindings.get(&(target.as_gl(), index))
                        .copied().unwrap_or(0) as GLint;
                }
            }
            None if INDEXED_DRAW_BUFFER_STATE.contains(&name) => {
                if !s.check_draw_buffer_index(index) {
                    return;
                }
                let values = match s.indexed_integers.get(&(name, index)) {
                    Some(values) => values.clone(),
                    None => s.query_integers(name),
                };
                for (slot, value) in result.iter_mut().zip(values) {
                    *slot = value;
                }
            }
            None => s.error(gl::INVALID_ENUM),
        }
    }

    fn get_float_v(&self, name: GLenum, result: &mut [GLfloat]) {
        let mut s = self.state.borrow_mut();
        let values = match s.floats.get(&name) {
            Some(values) => values.clone(),
            None => s.query_integers(name).into_iter().map(|v| v as GLfloat).collect(),
        };
        for (slot, value) in result.iter_mut().zip(values) {
            *slot = value;
        }
    }

    fn is_enabled(&self, cap: GLenum) -> GLboolean {
        let mut s = self.state.borrow_mut();
        if Capability::try_from(cap).is_err() {
            s.error(gl::INVALID_ENUM);
            return gl::FALSE;
        }
        s.enabled.contains(&cap) as GLboolean
    }

    fn gen_buffers(&self, n: GLsizei) -> Vec<GLuint> {
        let mut s = self.state.borrow_mut();
        let names = s.gen_names(n);
        for &name in &names {
            s.buffers.insert(name, BufferObject::default());
        }
        names
    }

    fn delete_buffers(&self, buffers: &[GLuint]) {
        let mut s = self.state.borrow_mut();
        for &name in buffers {
            if s.buffers.remove(&name).is_some() {
                s.unbind_everywhere(name);
            }
        }
    }

    fn bind_buffer(&self, target: GLenum, buffer: GLuint) {
        let mut s = self.state.borrow_mut();
        if BufferType::try_from(target).is_err() {
            return s.error(gl::INVALID_ENUM);
        }
        if buffer != 0 && !s.buffers.contains_key(&buffer) {
            return s.error(gl::INVALID_OPERATION);
        }
        s.buffer_bindings.insert(target, buffer);
    }

    fn bind_buffer_base(&self, target: GLenum, index: GLuint, buffer: GLuint) {
        let mut s = self.state.borrow_mut();
        if IndexedBufferType::try_from(target).is_err() {
            return s.error(gl::INVALID_ENUM);
        }
        if buffer != 0 && !s.buffers.contains_key(&buffer) {
            return s.error(gl::INVALID_OPERATION);
        }
        // Binding to an indexed point also binds the generic target.
        s.indexed_bindings.insert((target, index), buffer);
        s.buffer_bindings.insert(target, buffer);
    }

    fn bind_buffer_range(&self, target: GLenum, index: GLuint, buffer: GLuint,
                         offset: GLintptr, size: GLsizeiptr) {
        {
            let mut s = self.state.borrow_mut();
            let len = s.buffers.get(&buffer).map_or(0, |b| b.data.len());
            if buffer != 0 && (offset < 0 || size <= 0 || (offset + size) as usize > len) {
                return s.error(gl::INVALID_VALUE);
            }
        }
        self.bind_buffer_base(target, index, buffer)
    }

    fn buffer_data(&self, target: GLenum, size: GLsizeiptr, data: Option<&[u8]>, usage: GLenum) {
        let mut s = self.state.borrow_mut();
        if size < 0 || data.map_or(false, |d| d.len() != size as usize) {
            return s.error(gl::INVALID_VALUE);
        }
        if enums::BufferUsage::try_from(usage).is_err() {
            return s.error(gl::INVALID_ENUM);
        }
        if let Some(buffer) = s.bound_buffer(target) {
            buffer.data = match data {
                Some(data) => data.to_vec(),
                None => vec![0; size as usize],
            };
            buffer.usage = usage;
            buffer.mapped = None;
        }
    }

    fn buffer_sub_data(&self, target: GLenum, offset: GLintptr, data: &[u8]) {
        let mut s = self.state.borrow_mut();
        let buffer = match s.bound_buffer(target) {
            Some(buffer) => buffer,
            None => return,
        };
        let end = offset as usize + data.len();
        if offset < 0 || end > buffer.data.len() {
            return s.error(gl::INVALID_VALUE);
        }
        if buffer.mapped.is_some() {
            return s.error(gl::INVALID_OPERATION);
        }
        buffer.data[offset as usize..end].copy_from_slice(data);
    }

    fn get_buffer_parameter_iv(&self, target: GLenum, pname: GLenum) -> GLint {
        let mut s = self.state.borrow_mut();
        let buffer = match s.bound_buffer(target) {
            Some(buffer) => buffer,
            None => return 0,
        };
        match pname {
            gl::BUFFER_SIZE => buffer.data.len() as GLint,
            gl::BUFFER_USAGE => buffer.usage as GLint,
            gl::BUFFER_MAPPED => buffer.mapped.is_some() as GLint,
            gl::BUFFER_MAP_OFFSET => buffer.mapped.as_ref().map_or(0, |m| m.offset as GLint),
            gl::BUFFER_MAP_LENGTH => buffer.mapped.as_ref().map_or(0, |m| m.length as GLint),
            _ => {
                s.error(gl::INVALID_ENUM);
                0
            }
        }
    }

    fn map_buffer_range(&self, target: GLenum, offset: GLintptr, length: GLsizeiptr,
                        access: GLbitfield) -> *mut c_void {
        let mut s = self.state.borrow_mut();
        if access & (gl::MAP_READ_BIT | gl::MAP_WRITE_BIT) == 0 {
            s.error(gl::INVALID_OPERATION);
            return ptr::null_mut();
        }
        let buffer = match s.bound_buffer(target) {
            Some(buffer) => buffer,
            None => return ptr::null_mut(),
        };
        if offset < 0 || length <= 0 || (offset + length) as usize > buffer.data.len() {
            s.error(gl::INVALID_VALUE);
            return ptr::null_mut();
        }
        if buffer.mapped.is_some() {
            s.error(gl::INVALID_OPERATION);
            return ptr::null_mut();
        }
        buffer.mapped = Some(Mapping { offset: offset as usize, length: length as usize });
        // The vector isn't resized while mapped: `buffer_data` drops the
        // mapping and `buffer_sub_data` refuses mapped buffers.
        unsafe { buffer.data.as_mut_ptr().add(offset as usize) as *mut c_void }
    }

    fn unmap_buffer(&self, target: GLenum) -> GLboolean {
        let mut s = self.state.borrow_mut();
        let buffer = match s.bound_buffer(target) {
            Some(buffer) => buffer,
            None => return gl::FALSE,
        };
        if buffer.mapped.take().is_none() {
            s.error(gl::INVALID_OPERATION);
            return gl::FALSE;
        }
        gl::TRUE
    }

    fn gen_textures(&self, n: GLsizei) -> Vec<GLuint> {
        let mut s = self.state.borrow_mut();
        let names = s.gen_names(n);
        for &name in &names {
            s.textures.insert(name, TextureObject::default());
        }
        names
    }

    fn delete_textures(&self, textures: &[GLuint]) {
        let mut s = self.state.borrow_mut();
        for &name in textures {
            if s.textures.remove(&name).is_some() {
                s.unbind_everywhere(name);
                s.handles.remove(&(HANDLE_BIT | name as GLuint64));
            }
        }
    }

    fn active_texture(&self, texture: GLenum) {
        let mut s = self.state.borrow_mut();
        let units = s.integer(gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS) as GLenum;
        if texture < gl::TEXTURE0 || texture >= gl::TEXTURE0 + units {
            return s.error(gl::INVALID_ENUM);
        }
        s.active_unit = texture - gl::TEXTURE0;
    }

    fn bind_texture(&self, target: GLenum, texture: GLuint) {
        let mut s = self.state.borrow_mut();
        if TextureType::try_from(target).is_err() {
            return s.error(gl::INVALID_ENUM);
        }
        if texture != 0 {
            match s.textures.get_mut(&texture) {
                Some(t) if t.target.map_or(true, |existing| existing == target) => {
                    t.target = Some(target);
                }
                _ => return s.error(gl::INVALID_OPERATION),
            }
        }
        let unit = s.active_unit;
        s.texture_bindings.insert((unit, target), texture);
    }

    fn tex_image_1d(&self, target: GLenum, level: GLint, internal_format: GLint,
                    width: GLsizei, border: GLint, format: GLenum, ty: GLenum,
                    opt_data: Option<&[u8]>) {
        let mut s = self.state.borrow_mut();
        if border != 0 {
            return s.error(gl::INVALID_VALUE);
        }
        s.store_image(target, level, internal_format, [width, 1, 1], format, ty, opt_data);
    }

    fn tex_image_2d(&self, target: GLenum, level: GLint, internal_format: GLint,
                    width: GLsizei, height: GLsizei, border: GLint, format: GLenum,
                    ty: GLenum, opt_data: Option<&[u8]>) {
        let mut s = self.state.borrow_mut();
        if border != 0 {
            return s.error(gl::INVALID_VALUE);
        }
        s.store_image(target, level, internal_format, [width, height, 1], format, ty, opt_data);
    }

    fn tex_image_3d(&self, target: GLenum, level: GLint, internal_format: GLint,
                    width: GLsizei, height: GLsizei, depth: GLsizei, border: GLint,
                    format: GLenum, ty: GLenum, opt_data: Option<&[u8]>) {
        let mut s = self.state.borrow_mut();
        if border != 0 {
            return s.error(gl::INVALID_VALUE);
        }
        s.store_image(target, level, internal_format, [width, height, depth], format, ty, opt_data);
    }

    fn tex_sub_image_1d(&self, target: GLenum, level: GLint, xoffset: GLint, width: GLsizei,
                        format: GLenum, ty: GLenum, data: &[u8]) {
        self.state.borrow_mut()
            .store_sub_image(target, level, [xoffset, 0, 0], [width, 1, 1], format, ty, data);
    }

    fn tex_sub_image_2d(&self, target: GLenum, level: GLint, xoffset: GLint, yoffset: GLint,
                        width: GLsizei, height: GLsizei, format: GLenum, ty: GLenum,
                        data: &[u8]) {
        self.state.borrow_mut()
            .store_sub_image(target, level, [xoffset, yoffset, 0], [width, height, 1],
                             format, ty, data);
    }

    fn tex_sub_image_3d(&self, target: GLenum, level: GLint, xoffset: GLint, yoffset: GLint,
                        zoffset: GLint, width: GLsizei, height: GLsizei, depth: GLsizei,
                        format: GLenum, ty: GLenum, data: &[u8]) {
        self.state.borrow_mut()
            .store_sub_image(target, level, [xoffset, yoffset, zoffset], [width, height, depth],
                             format, ty, data);
    }

    fn tex_storage_2d(&self, target: GLenum, levels: GLint, internal_format: GLenum,
                      width: GLsizei, height: GLsizei) {
        self.state.borrow_mut().allocate_storage(target, levels, internal_format, [width, height, 1]);
    }

    fn tex_storage_3d(&self, target: GLenum, levels: GLint, internal_format: GLenum,
                      width: GLsizei, height: GLsizei, depth: GLsizei) {
        self.state.borrow_mut()
            .allocate_storage(target, levels, internal_format, [width, height, depth]);
    }

    fn tex_parameter_i(&self, target: GLenum, pname: GLenum, param: GLint) {
        self.state.borrow_mut().tex_parameter(target, pname, vec![param as GLfloat]);
    }

    fn tex_parameter_f(&self, target: GLenum, pname: GLenum, param: GLfloat) {
        self.state.borrow_mut().tex_parameter(target, pname, vec![param]);
    }

    fn tex_parameter_iv(&self, target: GLenum, pname: GLenum, params: &[GLint]) {
        if params.is_empty() {
            return self.state.borrow_mut().error(gl::INVALID_VALUE);
        }
        self.state.borrow_mut()
            .tex_parameter(target, pname, params.iter().map(|&p| p as GLfloat).collect());
    }

    fn tex_parameter_fv(&self, target: GLenum, pname: GLenum, params: &[GLfloat]) {
        if params.is_empty() {
            return self.state.borrow_mut().error(gl::INVALID_VALUE);
        }
        self.state.borrow_mut().tex_parameter(target, pname, params.to_vec());
    }

    fn get_tex_parameter_iv(&self, target: GLenum, pname: GLenum) -> GLint {
        self.state.borrow_mut().tex_parameter_value(target, pname) as GLint
    }

    fn get_tex_parameter_fv(&self, target: GLenum, pname: GLenum) -> GLfloat {
        self.state.borrow_mut().tex_parameter_value(target, pname)
    }

    fn get_tex_level_parameter_iv(&self, target: GLenum, level: GLint, pname: GLenum) -> GLint {
        let mut s = self.state.borrow_mut();
        let image = match s.bound_texture(target) {
            Some(texture) => texture.images.get(&(target, level)),
            None => return 0,
        };
        let image = match image {
            Some(image) => image,
            None => return 0,
        };
        match pname {
            gl::TEXTURE_WIDTH => image.width,
            gl::TEXTURE_HEIGHT => image.height,
            gl::TEXTURE_DEPTH => image.depth,
            gl::TEXTURE_INTERNAL_FORMAT => image.internal_format,
            _ => {
                s.error(gl::INVALID_ENUM);
                0
            }
        }
    }

    fn generate_mipmap(&self, target: GLenum) {
        let mut s = self.state.borrow_mut();
        let image_targets: Vec<GLenum> = if target == gl::TEXTURE_CUBE_MAP {
            CubeFace::ALL.iter().map(|face| face.as_gl()).collect()
        } else {
            vec![target]
        };
        let layered = target == gl::TEXTURE_2D_ARRAY || target == gl::TEXTURE_CUBE_MAP_ARRAY;
        let texture = match s.bound_mutable_texture(target) {
            Some(texture) => texture,
            None => return,
        };
        let mut bases = vec![];
        for &image_target in &image_targets {
            match texture.images.get(&(image_target, 0)) {
                Some(base) => bases.push((image_target, base.clone())),
                None => return s.error(gl::INVALID_OPERATION),
            }
        }
        for (image_target, base) in bases {
            let size = [base.width, base.height, base.depth];
            let mut level = 1;
            loop {
                let [width, height, depth] = mip_size(size, level, layered);
                texture.images.entry((image_target, level)).or_insert_with(|| Image {
                    width,
                    height,
                    depth,
                    data: vec![0; (width * height * depth) as usize * base.pixel_size],
                    ..base.clone()
                });
                if width == 1 && height == 1 && (layered || depth == 1) {
                    break;
                }
                level += 1;
            }
        }
    }

    fn tex_buffer(&self, target: GLenum, internal_format: GLenum, buffer: GLuint) {
        let mut s = self.state.borrow_mut();
        if target != gl::TEXTURE_BUFFER {
            return s.error(gl::INVALID_ENUM);
        }
        if buffer != 0 && !s.buffers.contains_key(&buffer) {
            return s.error(gl::INVALID_OPERATION);
        }
        if let Some(texture) = s.bound_mutable_texture(target) {
            texture.buffer = if buffer == 0 { None } else { Some(buffer) };
            texture.params.insert(gl::TEXTURE_INTERNAL_FORMAT, vec![internal_format as GLfloat]);
        }
    }

    fn get_tex_image_into_buffer(&self, target: GLenum, level: GLint, format: GLenum,
                                 ty: GLenum, output: &mut [u8]) {
        let mut s = self.state.borrow_mut();
        // A cube map has six images; only a face names one of them.
        if target == gl::TEXTURE_CUBE_MAP {
            return s.error(gl::INVALID_ENUM);
        }
        let pixel_size = match client_pixel_size(format, ty) {
            Some(size) => size,
            None => return s.error(gl::INVALID_ENUM),
        };
        let alignment = s.integer(gl::PACK_ALIGNMENT) as usize;
        let image = match s.bound_texture(target) {
            Some(texture) => match texture.images.get(&(target, level)) {
                Some(image) => image.clone(),
                None => return,
            },
            None => return,
        };
        if image.pixel_size != pixel_size {
            return s.error(gl::INVALID_OPERATION);
        }
        let rows = (image.height * image.depth) as usize;
        let packed = repack(&image.data, image.width as usize, rows, pixel_size, 1, alignment);
        if output.len() < packed.len() {
            return s.error(gl::INVALID_OPERATION);
        }
        output[..packed.len()].copy_from_slice(&packed);
    }

    fn pixel_store_i(&self, name: GLenum, param: GLint) {
        let mut s = self.state.borrow_mut();
        match name {
            gl::UNPACK_ALIGNMENT | gl::PACK_ALIGNMENT => {
                if ![1, 2, 4, 8].contains(&param) {
                    return s.error(gl::INVALID_VALUE);
                }
                s.set_integers(name, &[param]);
            }
            _ => s.error(gl::INVALID_ENUM),
        }
    }

    fn get_texture_handle(&self, texture: GLuint) -> GLuint64 {
        let mut s = self.state.borrow_mut();
        let object = match s.textures.get_mut(&texture) {
            Some(object) if object.target.is_some() => object,
            _ => {
                s.error(gl::INVALID_VALUE);
                return 0;
            }
        };
        object.bindless = true;
        let handle = HANDLE_BIT | texture as GLuint64;
        s.handles.entry(handle).or_insert(false);
        handle
    }

    fn make_texture_handle_resident(&self, handle: GLuint64) {
        let mut s = self.state.borrow_mut();
        match s.handles.get_mut(&handle) {
            Some(resident) if !*resident => *resident = true,
            _ => s.error(gl::INVALID_OPERATION),
        }
    }

    fn make_texture_handle_non_resident(&self, handle: GLuint64) {
        let mut s = self.state.borrow_mut();
        match s.handles.get_mut(&handle) {
            Some(resident) if *resident => *resident = false,
            _ => s.error(gl::INVALID_OPERATION),
        }
    }

    fn gen_framebuffers(&self, n: GLsizei) -> Vec<GLuint> {
        let mut s = self.state.borrow_mut();
        let names = s.gen_names(n);
        for &name in &names {
            s.framebuffers.insert(name, FramebufferObject::default());
        }
        names
    }

    fn delete_framebuffers(&self, framebuffers: &[GLuint]) {
        let mut s = self.state.borrow_mut();
        for &name in framebuffers {
            if s.framebuffers.remove(&name).is_some() {
                if s.draw_framebuffer == name {
                    s.draw_framebuffer = 0;
                }
                if s.read_framebuffer == name {
                    s.read_framebuffer = 0;
                }
            }
        }
    }

    fn bind_framebuffer(&self, target: GLenum, framebuffer: GLuint) {
        let mut s = self.state.borrow_mut();
        if framebuffer != 0 && !s.framebuffers.contains_key(&framebuffer) {
            return s.error(gl::INVALID_OPERATION);
        }
        match target {
            gl::FRAMEBUFFER => {
                s.draw_framebuffer = framebuffer;
                s.read_framebuffer = framebuffer;
            }
            gl::DRAW_FRAMEBUFFER => s.draw_framebuffer = framebuffer,
            gl::READ_FRAMEBUFFER => s.read_framebuffer = framebuffer,
            _ => s.error(gl::INVALID_ENUM),
        }
    }

    fn framebuffer_texture_2d(&self, target: GLenum, attachment: GLenum, textarget: GLenum,
                              texture: GLuint, level: GLint) {
        let mut s = self.state.borrow_mut();
        if texture != 0 && !s.textures.contains_key(&texture) {
            return s.error(gl::INVALID_OPERATION);
        }
        if let Some(fb) = s.bound_framebuffer(target) {
            if texture == 0 {
                fb.attachments.remove(&attachment);
            } else {
                fb.attachments.insert(attachment, Attachment::Texture {
                    name: texture,
                    image_target: Some(textarget),
                    level,
                    layer: None,
                });
            }
        }
    }

    fn framebuffer_texture_layer(&self, target: GLenum, attachment: GLenum, texture: GLuint,
                                 level: GLint, layer: GLint) {
        let mut s = self.state.borrow_mut();
        if texture != 0 && !s.textures.contains_key(&texture) {
            return s.error(gl::INVALID_OPERATION);
        }
        if layer < 0 {
            return s.error(gl::INVALID_VALUE);
        }
        if let Some(fb) = s.bound_framebuffer(target) {
            if texture == 0 {
                fb.attachments.remove(&attachment);
            } else {
                fb.attachments.insert(attachment, Attachment::Texture {
                    name: texture,
                    image_target: None,
                    level,
                    layer: Some(layer),
                });
            }
        }
    }

    fn framebuffer_renderbuffer(&self, target: GLenum, attachment: GLenum,
                                renderbuffertarget: GLenum, renderbuffer: GLuint) {
        let mut s = self.state.borrow_mut();
        if renderbuffertarget != gl::RENDERBUFFER {
            return s.error(gl::INVALID_ENUM);
        }
        if renderbuffer != 0 && !s.renderbuffers.contains_key(&renderbuffer) {
            return s.error(gl::INVALID_OPERATION);
        }
        if let Some(fb) = s.bound_framebuffer(target) {
            if renderbuffer == 0 {
                fb.attachments.remove(&attachment);
            } else {
                fb.attachments.insert(attachment, Attachment::Renderbuffer(renderbuffer));
            }
        }
    }

    fn check_frame_buffer_status(&self, target: GLenum) -> GLenum {
        let mut s = self.state.borrow_mut();
        match target {
            gl::FRAMEBUFFER | gl::DRAW_FRAMEBUFFER | gl::READ_FRAMEBUFFER => {
                s.framebuffer_status(s.framebuffer_binding(target))
            }
            _ => {
                s.error(gl::INVALID_ENUM);
                0
            }
        }
    }

    fn draw_buffers(&self, bufs: &[GLenum]) {
        let mut s = self.state.borrow_mut();
        let max = gl::COLOR_ATTACHMENT0 + MAX_COLOR_ATTACHMENTS as GLenum;
        if bufs.iter().any(|&b| b != gl::NONE && !(gl::COLOR_ATTACHMENT0..max).contains(&b)) {
            return s.error(gl::INVALID_ENUM);
        }
        if let Some(fb) = s.bound_framebuffer(gl::DRAW_FRAMEBUFFER) {
            fb.draw_buffers = Some(bufs.to_vec());
        }
    }

    fn read_buffer(&self, mode: GLenum) {
        let mut s = self.state.borrow_mut();
        if let Some(fb) = s.bound_framebuffer(gl::READ_FRAMEBUFFER) {
            fb.read_buffer = Some(mode);
        }
    }

    fn read_pixels(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei,
                   format: GLenum, ty: GLenum, output: &mut [u8]) {
        let mut s = self.state.borrow_mut();
        let pixel_size = match client_pixel_size(format, ty) {
            Some(size) => size,
            None => return s.error(gl::INVALID_ENUM),
        };
        if width < 0 || height < 0 {
            return s.error(gl::INVALID_VALUE);
        }
        if s.framebuffer_status(s.read_framebuffer) != gl::FRAMEBUFFER_COMPLETE {
            return s.error(gl::INVALID_FRAMEBUFFER_OPERATION);
        }
        let alignment = s.integer(gl::PACK_ALIGNMENT) as usize;
        let (width, height) = (width as usize, height as usize);
        if output.len() < enums::image_size(width, height, pixel_size, alignment) {
            return s.error(gl::INVALID_OPERATION);
        }
        if let Err(error) = s.read_color(x, y, width, height, pixel_size, alignment, output) {
            s.error(error);
        }
    }

    fn blit_framebuffer(&self, _src_x0: GLint, _src_y0: GLint, _src_x1: GLint, _src_y1: GLint,
                        _dst_x0: GLint, _dst_y0: GLint, _dst_x1: GLint, _dst_y1: GLint,
                        mask: GLbitfield, filter: GLenum) {
        let mut s = self.state.borrow_mut();
        let all = gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT | gl::STENCIL_BUFFER_BIT;
        if mask & !all != 0 {
            return s.error(gl::INVALID_VALUE);
        }
        if filter != gl::NEAREST && filter != gl::LINEAR {
            return s.error(gl::INVALID_ENUM);
        }
        if s.framebuffer_status(s.read_framebuffer) != gl::FRAMEBUFFER_COMPLETE {
            return s.error(gl::INVALID_FRAMEBUFFER_OPERATION);
        }
        s.check_draw_framebuffer();
    }

    fn gen_renderbuffers(&self, n: GLsizei) -> Vec<GLuint> {
        let mut s = self.state.borrow_mut();
        let names = s.gen_names(n);
        for &name in &names {
            s.renderbuffers.insert(name, RenderbufferObject::default());
        }
        names
    }

    fn delete_renderbuffers(&self, renderbuffers: &[GLuint]) {
        let mut s = self.state.borrow_mut();
        for &name in renderbuffers {
            if s.renderbuffers.remove(&name).is_some() && s.renderbuffer == name {
                s.renderbuffer = 0;
            }
        }
    }

    fn bind_renderbuffer(&self, target: GLenum, renderbuffer: GLuint) {
        let mut s = self.state.borrow_mut();
        if target != gl::RENDERBUFFER {
            return s.error(gl::INVALID_ENUM);
        }
        if renderbuffer != 0 && !s.renderbuffers.contains_key(&renderbuffer) {
            return s.error(gl::INVALID_OPERATION);
        }
        s.renderbuffer = renderbuffer;
    }

    fn renderbuffer_storage(&self, target: GLenum, internalformat: GLenum,
                            width: GLsizei, height: GLsizei) {
        self.renderbuffer_storage_multisample(target, 0, internalformat, width, height)
    }

    fn renderbuffer_storage_multisample(&self, target: GLenum, samples: GLsizei,
                                        internalformat: GLenum, width: GLsizei, height: GLsizei) {
        let mut s = self.state.borrow_mut();
        if target != gl::RENDERBUFFER || PixelDataInternalFormat::try_from(internalformat).is_err() {
            return s.error(gl::INVALID_ENUM);
        }
        if width < 0 || height < 0 || width > MAX_TEXTURE_SIZE || height > MAX_TEXTURE_SIZE
            || samples < 0 || samples > s.integer(gl::MAX_SAMPLES)
        {
            return s.error(gl::INVALID_VALUE);
        }
        let name = s.renderbuffer;
        match s.renderbuffers.get_mut(&name) {
            Some(rb) => *rb = RenderbufferObject { width, height, samples },
            None => s.error(gl::INVALID_OPERATION),
        }
    }

    fn gen_transform_feedbacks(&self, n: GLsizei) -> Vec<GLuint> {
        let mut s = self.state.borrow_mut();
        let names = s.gen_names(n);
        for &name in &names {
            s.transform_feedbacks.insert(name, TransformFeedbackObject::default());
        }
        names
    }

    fn delete_transform_feedbacks(&self, ids: &[GLuint]) {
        let mut s = self.state.borrow_mut();
        for &name in ids {
            if name == 0 {
                continue;
            }
            if s.transform_feedbacks.get(&name).map_or(false, |tf| tf.active) {
                s.error(gl::INVALID_OPERATION);
                continue;
            }
            if s.transform_feedbacks.remove(&name).is_some() && s.transform_feedback == name {
                s.transform_feedback = 0;
            }
        }
    }

    fn bind_transform_feedback(&self, target: GLenum, id: GLuint) {
        let mut s = self.state.borrow_mut();
        if target != gl::TRANSFORM_FEEDBACK {
            return s.error(gl::INVALID_ENUM);
        }
        if s.active_transform_feedback().map_or(false, |tf| !tf.paused) {
            return s.error(gl::INVALID_OPERATION);
        }
        if !s.transform_feedbacks.contains_key(&id) {
            return s.error(gl::INVALID_OPERATION);
        }
        s.transform_feedback = id;
    }

    fn begin_transform_feedback(&self, primitive_mode: GLenum) {
        let mut s = self.state.borrow_mut();
        if ![gl::POINTS, gl::LINES, gl::TRIANGLES].contains(&primitive_mode) {
            return s.error(gl::INVALID_ENUM);
        }
        let linked = s.programs.get(&s.current_program).map_or(false, |p| p.linked);
        let name = s.transform_feedback;
        match s.transform_feedbacks.get_mut(&name) {
            Some(tf) if !tf.active && linked => {
                tf.active = true;
                tf.paused = false;
            }
            _ => s.error(gl::INVALID_OPERATION),
        }
    }

    fn end_transform_feedback(&self) {
        let mut s = self.state.borrow_mut();
        let name = s.transform_feedback;
        match s.transform_feedbacks.get_mut(&name) {
            Some(tf) if tf.active => {
                tf.active = false;
                tf.paused = false;
            }
            _ => s.error(gl::INVALID_OPERATION),
        }
    }

    fn pause_transform_feedback(&self) {
        let mut s = self.state.borrow_mut();
        let name = s.transform_feedback;
        match s.transform_feedbacks.get_mut(&name) {
            Some(tf) if tf.active && !tf.paused => tf.paused = true,
            _ => s.error(gl::INVALID_OPERATION),
        }
    }

    fn resume_transform_feedback(&self) {
        let mut s = self.state.borrow_mut();
        let name = s.transform_feedback;
        match s.transform_feedbacks.get_mut(&name) {
            Some(tf) if tf.active && tf.paused => tf.paused = false,
            _ => s.error(gl::INVALID_OPERATION),
        }
    }

    fn transform_feedback_varyings(&self, program: GLuint, varyings: &[&str], buffer_mode: GLenum) {
        let mut s = self.state.borrow_mut();
        if buffer_mode != gl::INTERLEAVED_ATTRIBS && buffer_mode != gl::SEPARATE_ATTRIBS {
            return s.error(gl::INVALID_ENUM);
        }
        match s.programs.get_mut(&program) {
            Some(p) => p.varyings = varyings.iter().map(|v| v.to_string()).collect(),
            None => s.error(gl::INVALID_VALUE),
        }
    }

    fn gen_vertex_arrays(&self, n: GLsizei) -> Vec<GLuint> {
        let mut s = self.state.borrow_mut();
        let names = s.gen_names(n);
        s.vertex_arrays.extend(names.iter().copied());
        names
    }

    fn delete_vertex_arrays(&self, vertex_arrays: &[GLuint]) {
        let mut s = self.state.borrow_mut();
        for name in vertex_arrays {
            if s.vertex_arrays.remove(name) && s.vertex_array == *name {
                s.vertex_array = 0;
            }
        }
    }

    fn bind_vertex_array(&self, vao: GLuint) {
        let mut s = self.state.borrow_mut();
        if vao != 0 && !s.vertex_arrays.contains(&vao) {
            return s.error(gl::INVALID_OPERATION);
        }
        s.vertex_array = vao;
    }

    fn vertex_attrib_pointer(&self, index: GLuint, size: GLint, type_: GLenum,
                             _normalized: bool, stride: GLsizei, offset: GLuint) {
        let mut s = self.state.borrow_mut();
        if enums::DataType::try_from(type_).is_err() {
            return s.error(gl::INVALID_ENUM);
        }
        if index >= MAX_VERTEX_ATTRIBS as GLuint || !(1..=4).contains(&size) || stride < 0 {
            return s.error(gl::INVALID_VALUE);
        }
        let array_buffer = s.buffer_bindings.get(&gl::ARRAY_BUFFER).copied().unwrap_or(0);
        // Core profiles have no default vertex array, and no client arrays.
        if s.vertex_array == 0 || (array_buffer == 0 && offset != 0) {
            s.error(gl::INVALID_OPERATION);
        }
    }

    fn vertex_attrib_i_pointer(&self, index: GLuint, size: GLint, type_: GLenum,
                               stride: GLsizei, offset: GLuint) {
        if type_ == gl::FLOAT || type_ == gl::HALF_FLOAT || type_ == gl::DOUBLE {
            return self.state.borrow_mut().error(gl::INVALID_ENUM);
        }
        self.vertex_attrib_pointer(index, size, type_, false, stride, offset)
    }

    fn vertex_attrib_l_pointer(&self, index: GLuint, size: GLint, type_: GLenum,
                               stride: GLsizei, offset: GLuint) {
        if type_ != gl::DOUBLE {
            return self.state.borrow_mut().error(gl::INVALID_ENUM);
        }
        self.vertex_attrib_pointer(index, size, type_, false, stride, offset)
    }

    fn vertex_attrib_divisor(&self, index: GLuint, _divisor: GLuint) {
        let mut s = self.state.borrow_mut();
        if index >= MAX_VERTEX_ATTRIBS as GLuint {
            return s.error(gl::INVALID_VALUE);
        }
        if s.vertex_array == 0 {
            s.error(gl::INVALID_OPERATION);
        }
    }

    fn enable_vertex_attrib_array(&self, index: GLuint) {
        self.vertex_attrib_divisor(index, 0)
    }

    fn disable_vertex_attrib_array(&self, index: GLuint) {
        self.vertex_attrib_divisor(index, 0)
    }

    fn vertex_attrib_4f(&self, index: GLuint, _x: GLfloat, _y: GLfloat, _z: GLfloat, _w: GLfloat) {
        if index >= MAX_VERTEX_ATTRIBS as GLuint {
            self.state.borrow_mut().error(gl::INVALID_VALUE);
        }
    }

    fn create_shader(&self, shader_type: GLenum) -> GLuint {
        let mut s = self.state.borrow_mut();
        if ShaderType::try_from(shader_type).is_err() {
            s.error(gl::INVALID_ENUM);
            return 0;
        }
        let name = s.gen_names(1)[0];
        s.shaders.insert(name, ShaderObject {
            ty: shader_type,
            source: String::new(),
            compiled: false,
            log: String::new(),
            delete_pending: false,
        });
        name
    }

    fn delete_shader(&self, shader: GLuint) {
        let mut s = self.state.borrow_mut();
        if let Some(object) = s.shaders.get_mut(&shader) {
            object.delete_pending = true;
        }
        s.delete_shader_if_unused(shader);
    }

    fn shader_source(&self, shader: GLuint, strings: &[&[u8]]) {
        let mut s = self.state.borrow_mut();
        match s.shaders.get_mut(&shader) {
            Some(object) => {
                object.source = strings.iter()
                    .map(|bytes| String::from_utf8_lossy(bytes))
                    .collect();
            }
            None => s.error(gl::INVALID_VALUE),
        }
    }

    fn compile_shader(&self, shader: GLuint) {
        let mut s = self.state.borrow_mut();
        let object = match s.shaders.get_mut(&shader) {
            Some(object) => object,
            None => return s.error(gl::INVALID_VALUE),
        };
        let failure = object.source.lines().enumerate()
            .find(|(_, line)| line.trim_start().starts_with("#error"));
        match failure {
            Some((line, text)) => {
                object.compiled = false;
                object.log = format!("0:{}: error: {}\n", line + 1, text.trim());
            }
            None => {
                object.compiled = true;
                object.log.clear();
            }
        }
    }

    fn get_shader_iv(&self, shader: GLuint, pname: GLenum) -> GLint {
        let mut s = self.state.borrow_mut();
        let object = match s.shaders.get(&shader) {
            Some(object) => object,
            None => {
                s.error(gl::INVALID_VALUE);
                return 0;
            }
        };
        match pname {
            gl::SHADER_TYPE => object.ty as GLint,
            gl::COMPILE_STATUS => object.compiled as GLint,
            gl::DELETE_STATUS => object.delete_pending as GLint,
            gl::INFO_LOG_LENGTH => log_length(&object.log),
            gl::SHADER_SOURCE_LENGTH => log_length(&object.source),
            _ => {
                s.error(gl::INVALID_ENUM);
                0
            }
        }
    }

    fn get_shader_info_log(&self, shader: GLuint) -> String {
        let s = self.state.borrow();
        s.shaders.get(&shader).map_or_else(String::new, |object| object.log.clone())
    }

    fn create_program(&self) -> GLuint {
        let mut s = self.state.borrow_mut();
        let name = s.gen_names(1)[0];
        s.programs.insert(name, ProgramObject::default());
        name
    }

    fn delete_program(&self, program: GLuint) {
        let mut s = self.state.borrow_mut();
        if s.current_program == program {
            if let Some(object) = s.programs.get_mut(&program) {
                object.delete_pending = true;
            }
            return;
        }
        s.remove_program(program);
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        let mut s = self.state.borrow_mut();
        if !s.shaders.contains_key(&shader) {
            return s.error(gl::INVALID_VALUE);
        }
        match s.programs.get_mut(&program) {
            Some(p) if !p.shaders.contains(&shader) => p.shaders.push(shader),
            Some(_) => s.error(gl::INVALID_OPERATION),
            None => s.error(gl::INVALID_VALUE),
        }
    }

    fn detach_shader(&self, program: GLuint, shader: GLuint) {
        let mut s = self.state.borrow_mut();
        match s.programs.get_mut(&program) {
            Some(p) if p.shaders.contains(&shader) => p.shaders.retain(|&x| x != shader),
            Some(_) => return s.error(gl::INVALID_OPERATION),
            None => return s.error(gl::INVALID_VALUE),
        }
        s.delete_shader_if_unused(shader);
    }

    fn link_program(&self, program: GLuint) {
        let mut s = self.state.borrow_mut();
        if s.current_program == program && s.active_transform_feedback().is_some() {
            return s.error(gl::INVALID_OPERATION);
        }
        s.link(program);
    }

    fn validate_program(&self, program: GLuint) {
        let mut s = self.state.borrow_mut();
        match s.programs.get_mut(&program) {
            Some(p) => {
                p.validated = p.linked;
                if !p.linked {
                    p.log = "validation error: program is not successfully linked\n".to_string();
                }
            }
            None => s.error(gl::INVALID_VALUE),
        }
    }

    fn use_program(&self, program: GLuint) {
        let mut s = self.state.borrow_mut();
        if s.active_transform_feedback().map_or(false, |tf| !tf.paused) {
            return s.error(gl::INVALID_OPERATION);
        }
        if program != 0 {
            match s.programs.get(&program) {
                Some(p) if p.linked => {}
                Some(_) => return s.error(gl::INVALID_OPERATION),
                None => return s.error(gl::INVALID_VALUE),
            }
        }
        let previous = std::mem::replace(&mut s.current_program, program);
        if previous != program && s.programs.get(&previous).map_or(false, |p| p.delete_pending) {
            s.remove_program(previous);
        }
    }

    fn get_program_iv(&self, program: GLuint, pname: GLenum) -> GLint {
        let mut s = self.state.borrow_mut();
        let object = match s.programs.get(&program) {
            Some(object) => object,
            None => {
                s.error(gl::INVALID_VALUE);
                return 0;
            }
        };
        match pname {
            gl::LINK_STATUS => object.linked as GLint,
            gl::VALIDATE_STATUS => object.validated as GLint,
            gl::DELETE_STATUS => object.delete_pending as GLint,
            gl::ATTACHED_SHADERS => object.shaders.len() as GLint,
            gl::ACTIVE_UNIFORMS => object.uniforms.len() as GLint,
            gl::ACTIVE_ATTRIBUTES => object.attribs.len() as GLint,
            gl::INFO_LOG_LENGTH => log_length(&object.log),
            _ => {
                s.error(gl::INVALID_ENUM);
                0
            }
        }
    }

    fn get_program_info_log(&self, program: GLuint) -> String {
        let s = self.state.borrow();
        s.programs.get(&program).map_or_else(String::new, |object| object.log.clone())
    }

    fn get_uniform_location(&self, program: GLuint, name: &str) -> GLint {
        let mut s = self.state.borrow_mut();
        match s.programs.get(&program) {
            Some(p) if p.linked => p.uniforms.get(name).copied().unwrap_or(-1),
            Some(_) => {
                s.error(gl::INVALID_OPERATION);
                -1
            }
            None => {
                s.error(gl::INVALID_VALUE);
                -1
            }
        }
    }

    fn get_attrib_location(&self, program: GLuint, name: &str) -> GLint {
        let mut s = self.state.borrow_mut();
        match s.programs.get(&program) {
            Some(p) if p.linked => p.attribs.get(name).copied().unwrap_or(-1),
            Some(_) => {
                s.error(gl::INVALID_OPERATION);
                -1
            }
            None => {
                s.error(gl::INVALID_VALUE);
                -1
            }
        }
    }

    fn bind_attrib_location(&self, program: GLuint, index: GLuint, name: &str) {
        let mut s = self.state.borrow_mut();
        if index >= MAX_VERTEX_ATTRIBS as GLuint {
            return s.error(gl::INVALID_VALUE);
        }
        match s.programs.get_mut(&program) {
            Some(p) => {
                p.attrib_bindings.insert(name.to_string(), index);
            }
            None => s.error(gl::INVALID_VALUE),
        }
    }

    fn uniform_1f(&self, location: GLint, v0: GLfloat) {
        self.state.borrow_mut().set_uniform(location, vec![f64::from(v0)]);
    }

    fn uniform_2f(&self, location: GLint, v0: GLfloat, v1: GLfloat) {
        self.state.borrow_mut().set_uniform(location, vec![f64::from(v0), f64::from(v1)]);
    }

    fn uniform_3f(&self, location: GLint, v0: GLfloat, v1: GLfloat, v2: GLfloat) {
        self.state.borrow_mut().set_uniform(location, vec![f64::from(v0), f64::from(v1), f64::from(v2)]);
    }

    fn uniform_4f(&self, location: GLint, x: GLfloat, y: GLfloat, z: GLfloat, w: GLfloat) {
        self.state.borrow_mut().set_uniform(location, vec![f64::from(x), f64::from(y), f64::from(z), f64::from(w)]);
    }

    fn uniform_1i(&self, location: GLint, v0: GLint) {
        self.state.borrow_mut().set_uniform(location, vec![f64::from(v0)]);
    }

    fn uniform_2i(&self, location: GLint, v0: GLint, v1: GLint) {
        self.state.borrow_mut().set_uniform(location, vec![f64::from(v0), f64::from(v1)]);
    }

    fn uniform_3i(&self, location: GLint, v0: GLint, v1: GLint, v2: GLint) {
        self.state.borrow_mut().set_uniform(location, vec![f64::from(v0), f64::from(v1), f64::from(v2)]);
    }

    fn uniform_4i(&self, location: GLint, x: GLint, y: GLint, z: GLint, w: GLint) {
        self.state.borrow_mut().set_uniform(location, vec![f64::from(x), f64::from(y), f64::from(z), f64::from(w)]);
    }

    fn uniform_1ui(&self, location: GLint, v0: GLuint) {
        self.state.borrow_mut().set_uniform(location, vec![f64::from(v0)]);
    }

    fn uniform_2ui(&self, location: GLint, v0: GLuint, v1: GLuint) {
        self.state.borrow_mut().set_uniform(location, vec![f64::from(v0), f64::from(v1)]);
    }

    fn uniform_3ui(&self, location: GLint, v0: GLuint, v1: GLuint, v2: GLuint) {
        let values = vec![f64::from(v0), f64::from(v1), f64::from(v2)];
        self.state.borrow_mut().set_uniform(location, values);
    }

    fn uniform_4ui(&self, location: GLint, x: GLuint, y: GLuint, z: GLuint, w: GLuint) {
        let values = vec![f64::from(x), f64::from(y), f64::from(z), f64::from(w)];
        self.state.borrow_mut().set_uniform(location, values);
    }

    fn uniform_matrix_2fv(&self, location: GLint, _transpose: bool, value: &[f32]) {
        check_matrix(&mut self.state.borrow_mut(), location, value, 4);
    }

    fn uniform_matrix_3fv(&self, location: GLint, _transpose: bool, value: &[f32]) {
        check_matrix(&mut self.state.borrow_mut(), location, value, 9);
    }

    fn uniform_matrix_4fv(&self, location: GLint, _transpose: bool, value: &[f32]) {
        check_matrix(&mut self.state.borrow_mut(), location, value, 16);
    }

    fn get_uniform_fv(&self, program: GLuint, location: GLint, result: &mut [GLfloat]) {
        let values = self.state.borrow_mut().uniform_values(program, location);
        for (slot, value) in result.iter_mut().zip(values) {
            *slot = value as GLfloat;
        }
    }

    fn get_uniform_iv(&self, program: GLuint, location: GLint, result: &mut [GLint]) {
        let values = self.state.borrow_mut().uniform_values(program, location);
        for (slot, value) in result.iter_mut().zip(values) {
            *slot = value as GLint;
        }
    }

    fn get_uniform_uiv(&self, program: GLuint, location: GLint, result: &mut [GLuint]) {
        let values = self.state.borrow_mut().uniform_values(program, location);
        for (slot, value) in result.iter_mut().zip(values) {
            *slot = value as GLuint;
        }
    }

    fn enable(&self, cap: GLenum) {
        let mut s = self.state.borrow_mut();
        if Capability::try_from(cap).is_err() {
            return s.error(gl::INVALID_ENUM);
        }
        s.enabled.insert(cap);
        s.enabled_indexed.retain(|&(indexed, _), _| indexed != cap);
    }

    fn disable(&self, cap: GLenum) {
        let mut s = self.state.borrow_mut();
        if Capability::try_from(cap).is_err() {
            return s.error(gl::INVALID_ENUM);
        }
        s.enabled.remove(&cap);
        s.enabled_indexed.retain(|&(indexed, _), _| indexed != cap);
    }

    fn blend_func(&self, sfactor: GLenum, dfactor: GLenum) {
        self.blend_func_separate(sfactor, dfactor, sfactor, dfactor)
    }

    fn blend_func_separate(&self, src_rgb: GLenum, dest_rgb: GLenum,
                           src_alpha: GLenum, dest_alpha: GLenum) {
        let mut s = self.state.borrow_mut();
        if [src_rgb, dest_rgb, src_alpha, dest_alpha].iter()
            .any(|&f| enums::BlendFactor::try_from(f).is_err())
        {
            return s.error(gl::INVALID_ENUM);
        }
        s.set_integers(gl::BLEND_SRC_RGB, &[src_rgb as GLint]);
        s.set_integers(gl::BLEND_DST_RGB, &[dest_rgb as GLint]);
        s.set_integers(gl::BLEND_SRC_ALPHA, &[src_alpha as GLint]);
        s.set_integers(gl::BLEND_DST_ALPHA, &[dest_alpha as GLint]);
        s.indexed_integers.retain(|&(name, _), _| name == gl::COLOR_WRITEMASK);
    }

    fn blend_equation(&self, mode: GLenum) {
        self.blend_equation_separate(mode, mode)
    }

    fn blend_equation_separate(&self, mode_rgb: GLenum, mode_alpha: GLenum) {
        let mut s = self.state.borrow_mut();
        if enums::BlendEquation::try_from(mode_rgb).is_err()
            || enums::BlendEquation::try_from(mode_alpha).is_err()
        {
            return s.error(gl::INVALID_ENUM);
        }
        s.set_integers(gl::BLEND_EQUATION_RGB, &[mode_rgb as GLint]);
        s.set_integers(gl::BLEND_EQUATION_ALPHA, &[mode_alpha as GLint]);
    }

    fn blend_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.state.borrow_mut().floats.insert(gl::BLEND_COLOR, vec![r, g, b, a]);
    }

    fn depth_func(&self, func: GLenum) {
        let mut s = self.state.borrow_mut();
        if enums::CompareFunc::try_from(func).is_err() {
            return s.error(gl::INVALID_ENUM);
        }
        s.set_integers(gl::DEPTH_FUNC, &[func as GLint]);
    }

    fn depth_mask(&self, flag: bool) {
        self.state.borrow_mut().set_integers(gl::DEPTH_WRITEMASK, &[flag as GLint]);
    }

    fn depth_range(&self, near: f64, far: f64) {
        let clamp = |v: f64| v.max(0.0).min(1.0) as GLfloat;
        self.state.borrow_mut().floats.insert(gl::DEPTH_RANGE, vec![clamp(near), clamp(far)]);
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.state.borrow_mut().floats.insert(gl::COLOR_CLEAR_VALUE, vec![r, g, b, a]);
    }

    fn clear_depth(&self, depth: f64) {
        let depth = depth.max(0.0).min(1.0) as GLfloat;
        self.state.borrow_mut().floats.insert(gl::DEPTH_CLEAR_VALUE, vec![depth]);
    }

    fn clear_stencil(&self, stencil: GLint) {
        self.state.borrow_mut().set_integers(gl::STENCIL_CLEAR_VALUE, &[stencil]);
    }

    fn clear(&self, buffer_mask: GLbitfield) {
        let mut s = self.state.borrow_mut();
        let all = gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT | gl::STENCIL_BUFFER_BIT;
        if buffer_mask & !all != 0 {
            return s.error(gl::INVALID_VALUE);
        }
        s.check_draw_framebuffer();
    }

    fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        let mut s = self.state.borrow_mut();
        if width < 0 || height < 0 {
            return s.error(gl::INVALID_VALUE);
        }
        s.set_integers(gl::VIEWPORT, &[x, y, width, height]);
    }

    fn scissor(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        let mut s = self.state.borrow_mut();
        if width < 0 || height < 0 {
            return s.error(gl::INVALID_VALUE);
        }
        s.set_integers(gl::SCISSOR_BOX, &[x, y, width, height]);
    }

    fn cull_face(&self, mode: GLenum) {
        let mut s = self.state.borrow_mut();
        if enums::Face::try_from(mode).is_err() {
            return s.error(gl::INVALID_ENUM);
        }
        s.set_integers(gl::CULL_FACE_MODE, &[mode as GLint]);
    }

    fn front_face(&self, mode: GLenum) {
        let mut s = self.state.borrow_mut();
        if enums::FaceOrientation::try_from(mode).is_err() {
            return s.error(gl::INVALID_ENUM);
        }
        s.set_integers(gl::FRONT_FACE, &[mode as GLint]);
    }

    fn polygon_offset(&self, factor: GLfloat, units: GLfloat) {
        let mut s = self.state.borrow_mut();
        s.floats.insert(gl::POLYGON_OFFSET_FACTOR, vec![factor]);
        s.floats.insert(gl::POLYGON_OFFSET_UNITS, vec![units]);
    }

    fn line_width(&self, width: GLfloat) {
        let mut s = self.state.borrow_mut();
        if width <= 0.0 {
            return s.error(gl::INVALID_VALUE);
        }
        s.floats.insert(gl::LINE_WIDTH, vec![width]);
    }

    fn color_mask(&self, r: bool, g: bool, b: bool, a: bool) {
        let mut s = self.state.borrow_mut();
        s.set_integers(gl::COLOR_WRITEMASK, &[r as GLint, g as GLint, b as GLint, a as GLint]);
        s.indexed_integers.retain(|&(name, _), _| name != gl::COLOR_WRITEMASK);
    }

    fn stencil_func(&self, func: GLenum, ref_: GLint, mask: GLuint) {
        let mut s = self.state.borrow_mut();
        if enums::CompareFunc::try_from(func).is_err() {
            return s.error(gl::INVALID_ENUM);
        }
        s.set_integers(gl::STENCIL_FUNC, &[func as GLint]);
        s.set_integers(gl::STENCIL_REF, &[ref_]);
        s.set_integers(gl::STENCIL_VALUE_MASK, &[mask as GLint]);
    }

    fn stencil_op(&self, sfail: GLenum, dpfail: GLenum, dppass: GLenum) {
        let mut s = self.state.borrow_mut();
        if [sfail, dpfail, dppass].iter()
            .any(|&op| enums::StencilOperation::try_from(op).is_err())
        {
            return s.error(gl::INVALID_ENUM);
        }
        s.set_integers(gl::STENCIL_FAIL, &[sfail as GLint]);
        s.set_integers(gl::STENCIL_PASS_DEPTH_FAIL, &[dpfail as GLint]);
        s.set_integers(gl::STENCIL_PASS_DEPTH_PASS, &[dppass as GLint]);
    }

    fn stencil_mask(&self, mask: GLuint) {
        self.state.borrow_mut().set_integers(gl::STENCIL_WRITEMASK, &[mask as GLint]);
    }

    fn stencil_func_separate(&self, face: GLenum, func: GLenum, ref_: GLint, mask: GLuint) {
        let mut s = self.state.borrow_mut();
        if enums::CompareFunc::try_from(func).is_err() {
            return s.error(gl::INVALID_ENUM);
        }
        s.stencil_face(face,
                       &[gl::STENCIL_FUNC, gl::STENCIL_REF, gl::STENCIL_VALUE_MASK],
                       &[gl::STENCIL_BACK_FUNC, gl::STENCIL_BACK_REF, gl::STENCIL_BACK_VALUE_MASK],
                       &[func as GLint, ref_, mask as GLint]);
    }

    fn stencil_op_separate(&self, face: GLenum, sfail: GLenum, dpfail: GLenum, dppass: GLenum) {
        let mut s = self.state.borrow_mut();
        if [sfail, dpfail, dppass].iter()
            .any(|&op| enums::StencilOperation::try_from(op).is_err())
        {
            return s.error(gl::INVALID_ENUM);
        }
        s.stencil_face(face,
                       &[gl::STENCIL_FAIL, gl::STENCIL_PASS_DEPTH_FAIL,
                         gl::STENCIL_PASS_DEPTH_PASS],
                       &[gl::STENCIL_BACK_FAIL, gl::STENCIL_BACK_PASS_DEPTH_FAIL,
                         gl::STENCIL_BACK_PASS_DEPTH_PASS],
                       &[sfail as GLint, dpfail as GLint, dppass as GLint]);
    }

    fn stencil_mask_separate(&self, face: GLenum, mask: GLuint) {
        self.state.borrow_mut().stencil_face(face, &[gl::STENCIL_WRITEMASK],
                                             &[gl::STENCIL_BACK_WRITEMASK], &[mask as GLint]);
    }

    fn polygon_mode(&self, face: GLenum, mode: GLenum) {
        let mut s = self.state.borrow_mut();
        // Core profiles only take both faces at once.
        if face != gl::FRONT_AND_BACK || enums::PolygonMode::try_from(mode).is_err() {
            return s.error(gl::INVALID_ENUM);
        }
        s.set_integers(gl::POLYGON_MODE, &[mode as GLint, mode as GLint]);
    }

    fn point_size(&self, size: GLfloat) {
        let mut s = self.state.borrow_mut();
        if size <= 0.0 {
            return s.error(gl::INVALID_VALUE);
        }
        s.floats.insert(gl::POINT_SIZE, vec![size]);
    }

    fn provoking_vertex(&self, mode: GLenum) {
        let mut s = self.state.borrow_mut();
        if enums::ProvokingVertex::try_from(mode).is_err() {
            return s.error(gl::INVALID_ENUM);
        }
        s.set_integers(gl::PROVOKING_VERTEX, &[mode as GLint]);
    }

    fn logic_op(&self, opcode: GLenum) {
        let mut s = self.state.borrow_mut();
        if enums::LogicOp::try_from(opcode).is_err() {
            return s.error(gl::INVALID_ENUM);
        }
        s.set_integers(gl::LOGIC_OP_MODE, &[opcode as GLint]);
    }

    fn hint(&self, target: GLenum, mode: GLenum) {
        let mut s = self.state.borrow_mut();
        if enums::HintTarget::try_from(target).is_err()
            || enums::HintMode::try_from(mode).is_err()
        {
            return s.error(gl::INVALID_ENUM);
        }
        s.set_integers(target, &[mode as GLint]);
    }

    fn enable_i(&self, cap: GLenum, index: GLuint) {
        let mut s = self.state.borrow_mut();
        if cap != gl::BLEND && cap != gl::SCISSOR_TEST {
            return s.error(gl::INVALID_ENUM);
        }
        if s.check_draw_buffer_index(index) {
            s.enabled_indexed.insert((cap, index), true);
        }
    }

    fn disable_i(&self, cap: GLenum, index: GLuint) {
        let mut s = self.state.borrow_mut();
        if cap != gl::BLEND && cap != gl::SCISSOR_TEST {
            return s.error(gl::INVALID_ENUM);
        }
        if s.check_draw_buffer_index(index) {
            s.enabled_indexed.insert((cap, index), false);
        }
    }

    fn is_enabled_i(&self, cap: GLenum, index: GLuint) -> GLboolean {
        let mut s = self.state.borrow_mut();
        if cap != gl::BLEND && cap != gl::SCISSOR_TEST {
            s.error(gl::INVALID_ENUM);
            return gl::FALSE;
        }
        if !s.check_draw_buffer_index(index) {
            return gl::FALSE;
        }
        let enabled = s.enabled_indexed.get(&(cap, index)).copied()
            .unwrap_or_else(|| s.enabled.contains(&cap));
        enabled as GLboolean
    }

    fn blend_func_i(&self, buf: GLuint, src: GLenum, dst: GLenum) {
        let mut s = self.state.borrow_mut();
        if enums::BlendFactor::try_from(src).is_err() || enums::BlendFactor::try_from(dst).is_err() {
            return s.error(gl::INVALID_ENUM);
        }
        if !s.check_draw_buffer_index(buf) {
            return;
        }
        for &(name, value) in &[(gl::BLEND_SRC_RGB, src), (gl::BLEND_SRC_ALPHA, src),
                                (gl::BLEND_DST_RGB, dst), (gl::BLEND_DST_ALPHA, dst)] {
            s.indexed_integers.insert((name, buf), vec![value as GLint]);
        }
    }

    fn color_mask_i(&self, buf: GLuint, r: bool, g: bool, b: bool, a: bool) {
        let mut s = self.state.borrow_mut();
        if s.check_draw_buffer_index(buf) {
            s.indexed_integers.insert((gl::COLOR_WRITEMASK, buf),
                                      vec![r as GLint, g as GLint, b as GLint, a as GLint]);
        }
    }

    fn primitive_restart_index(&self, index: GLuint) {
        self.state.borrow_mut().set_integers(gl::PRIMITIVE_RESTART_INDEX, &[index as GLint]);
    }

    fn memory_barrier(&self, barriers: GLbitfield) {
        // GL 4.6 defines barrier bits up to GL_QUERY_BUFFER_BARRIER_BIT.
        if barriers != gl::ALL_BARRIER_BITS && barriers & !0xffff != 0 {
            self.state.borrow_mut().error(gl::INVALID_VALUE);
        }
    }

    fn flush(&self) {}

    fn finish(&self) {}

    fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei) {
        let mut s = self.state.borrow_mut();
        if first < 0 {
            return s.error(gl::INVALID_VALUE);
        }
        s.check_draw(mode, count);
    }

    fn draw_arrays_instanced(&self, mode: GLenum, first: GLint, count: GLsizei,
                             primcount: GLsizei) {
        if primcount < 0 {
            return self.state.borrow_mut().error(gl::INVALID_VALUE);
        }
        self.draw_arrays(mode, first, count)
    }

    fn draw_elements(&self, mode: GLenum, count: GLsizei, element_type: GLenum,
                     _indices_offset: GLuint) {
        let mut s = self.state.borrow_mut();
        if s.check_elements(element_type) {
            s.check_draw(mode, count);
        }
    }

    fn draw_elements_instanced(&self, mode: GLenum, count: GLsizei, element_type: GLenum,
                               indices_offset: GLuint, primcount: GLsizei) {
        if primcount < 0 {
            return self.state.borrow_mut().error(gl::INVALID_VALUE);
        }
        self.draw_elements(mode, count, element_type, indices_offset)
    }

    fn draw_range_elements(&self, mode: GLenum, start: GLuint, end: GLuint, count: GLsizei,
                           element_type: GLenum, indices_offset: GLuint) {
        if end < start {
            return self.state.borrow_mut().error(gl::INVALID_VALUE);
        }
        self.draw_elements(mode, count, element_type, indices_offset)
    }

    fn draw_elements_base_vertex(&self, mode: GLenum, count: GLsizei, element_type: GLenum,
                                 indices_offset: GLuint, _base_vertex: GLint) {
        self.draw_elements(mode, count, element_type, indices_offset)
    }

    fn draw_range_elements_base_vertex(&self, mode: GLenum, start: GLuint, end: GLuint,
                                       count: GLsizei, element_type: GLenum,
                                       indices_offset: GLuint, _base_vertex: GLint) {
        self.draw_range_elements(mode, start, end, count, element_type, indices_offset)
    }

    fn draw_elements_instanced_base_vertex(&self, mode: GLenum, count: GLsizei,
                                           element_type: GLenum, indices_offset: GLuint,
                                           primcount: GLsizei, _base_vertex: GLint) {
        self.draw_elements_instanced(mode, count, element_type, indices_offset, primcount)
    }

    fn dispatch_compute(&self, x: GLuint, y: GLuint, z: GLuint) {
        let mut s = self.state.borrow_mut();
        let compute = s.programs.get(&s.current_program).map_or(false, |p| p.linked && p.compute);
        if !compute {
            return s.error(gl::INVALID_OPERATION);
        }
        if [x, y, z].iter().any(|&n| n > MAX_COMPUTE_WORK_GROUP_COUNT) {
            s.error(gl::INVALID_VALUE);
        }
    }
}

/// Info log lengths include the terminating null, and are zero for empty logs.
fn log_length(log: &str) -> GLint {
    if log.is_empty() { 0 } else { log.len() as GLint + 1 }
}

fn check_matrix(s: &mut State, location: GLint, value: &[f32], elements: usize) {
    if value.len() % elements != 0 {
        return s.error(gl::INVALID_VALUE);
    }
    s.set_uniform(location, value.iter().map(|&v| f64::from(v)).collect());
}

#[test]
fn test_declarations() {
    let source = "#version 330\n\
                  uniform mat4 mvp; // transform\n\
                  uniform sampler2D tex;\n\
                  layout(location = 0) in vec3 position;\n\
                  in vec2 uv[2];\n\
                  flat out int id;\n\
                  uniform Block { vec4 x; };\n";
    assert_eq!(declarations(source, "uniform"), vec!["mvp", "tex"]);
    assert_eq!(declarations(source, "in"), vec!["position", "uv"]);
    assert_eq!(declarations(source, "out"), vec!["id"]);
}

#[test]
fn test_repack() {
    // Two rows of three one-byte pixels, rows padded to four bytes.
    let padded = [1, 2, 3, 0, 4, 5, 6];
    assert_eq!(enums::image_size(3, 2, 1, 4), 7);
    assert_eq!(repack(&padded, 3, 2, 1, 4, 1), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(repack(&[1, 2, 3, 4, 5, 6], 3, 2, 1, 1, 4), padded.to_vec());
}

#[test]
fn test_error_is_sticky_until_read() {
    let driver = HeadlessDriver::new();
    driver.bind_buffer(gl::ARRAY_BUFFER, 999);
    driver.enable(0xdead);
    assert_eq!(driver.get_error(), gl::INVALID_OPERATION);
    assert_eq!(driver.get_error(), gl::NO_ERROR);
}
