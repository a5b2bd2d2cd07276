//! A representation for recorded `Driver` method calls.
//!
//! Each variant is named after the `Driver` method it records, and has one
//! field per argument. Slices and strings are copied into owned `Vec`s and
//! `String`s, so a `Call` outlives the data the caller passed. Methods that
//! create objects record the names they returned in a `returned` field.
//!
//! Queries are not recorded: they have no effect on GL state, and a replay
//! doesn't need them.

use gleam::gl::{GLbitfield, GLenum, GLfloat, GLint, GLintptr, GLsizei, GLsizeiptr, GLuint,
                GLuint64};

#[allow(non_camel_case_types)]
#[derive(Clone, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Call {
    bind_buffer { target: GLenum, buffer: GLuint },
    bind_buffer_base { target: GLenum, index: GLuint, buffer: GLuint },
    bind_buffer_range { target: GLenum, index: GLuint, buffer: GLuint, offset: GLintptr, size: GLsizeiptr },
    buffer_data { target: GLenum, size: GLsizeiptr, data: Option<Vec<u8>>, usage: GLenum },
    buffer_sub_data { target: GLenum, offset: GLintptr, data: Vec<u8> },
    map_buffer_range { target: GLenum, offset: GLintptr, length: GLsizeiptr, access: GLbitfield },
    unmap_buffer { target: GLenum },
    gen_buffers { n: GLsizei, returned: Vec<GLuint> },
    delete_buffers { buffers: Vec<GLuint> },

    gen_textures { n: GLsizei, returned: Vec<GLuint> },
    delete_textures { textures: Vec<GLuint> },
    active_texture { texture: GLenum },
    bind_texture { target: GLenum, texture: GLuint },
    tex_image_1d { target: GLenum, level: GLint, internal_format: GLint, width: GLsizei, border: GLint, format: GLenum, ty: GLenum, opt_data: Option<Vec<u8>> },
    tex_image_2d { target: GLenum, level: GLint, internal_format: GLint, width: GLsizei, height: GLsizei, border: GLint, format: GLenum, ty: GLenum, opt_data: Option<Vec<u8>> },
    tex_image_3d { target: GLenum, level: GLint, internal_format: GLint, width: GLsizei, height: GLsizei, depth: GLsizei, border: GLint, format: GLenum, ty: GLenum, opt_data: Option<Vec<u8>> },
    tex_sub_image_1d { target: GLenum, level: GLint, xoffset: GLint, width: GLsizei, format: GLenum, ty: GLenum, data: Vec<u8> },
    tex_sub_image_2d { target: GLenum, level: GLint, xoffset: GLint, yoffset: GLint, width: GLsizei, height: GLsizei, format: GLenum, ty: GLenum, data: Vec<u8> },
    tex_sub_image_3d { target: GLenum, level: GLint, xoffset: GLint, yoffset: GLint, zoffset: GLint, width: GLsizei, height: GLsizei, depth: GLsizei, format: GLenum, ty: GLenum, data: Vec<u8> },
    tex_storage_2d { target: GLenum, levels: GLint, internal_format: GLenum, width: GLsizei, height: GLsizei },
    tex_storage_3d { target: GLenum, levels: GLint, internal_format: GLenum, width: GLsizei, height: GLsizei, depth: GLsizei },
    tex_parameter_i { target: GLenum, pname: GLenum, param: GLint },
    tex_parameter_f { target: GLenum, pname: GLenum, param: GLfloat },
    tex_parameter_iv { target: GLenum, pname: GLenum, params: Vec<GLint> },
    tex_parameter_fv { target: GLenum, pname: GLenum, params: Vec<GLfloat> },
    generate_mipmap { target: GLenum },
    tex_buffer { target: GLenum, internal_format: GLenum, buffer: GLuint },
    pixel_store_i { name: GLenum, param: GLint },
    get_texture_handle { texture: GLuint, returned: GLuint64 },
    make_texture_handle_resident { handle: GLuint64 },
    make_texture_handle_non_resident { handle: GLuint64 },

    gen_framebuffers { n: GLsizei, returned: Vec<GLuint> },
    delete_framebuffers { framebuffers: Vec<GLuint> },
    bind_framebuffer { target: GLenum, framebuffer: GLuint },
    framebuffer_texture_2d { target: GLenum, attachment: GLenum, textarget: GLenum, texture: GLuint, level: GLint },
    framebuffer_texture_layer { target: GLenum, attachment: GLenum, texture: GLuint, level: GLint, layer: GLint },
    framebuffer_renderbuffer { target: GLenum, attachment: GLenum, renderbuffertarget: GLenum, renderbuffer: GLuint },
    draw_buffers { bufs: Vec<GLenum> },
    read_buffer { mode: GLenum },
    blit_framebuffer { src_x0: GLint, src_y0: GLint, src_x1: GLint, src_y1: GLint, dst_x0: GLint, dst_y0: GLint, dst_x1: GLint, dst_y1: GLint, mask: GLbitfield, filter: GLenum },
    gen_renderbuffers { n: GLsizei, returned: Vec<GLuint> },
    delete_renderbuffers { renderbuffers: Vec<GLuint> },
    bind_renderbuffer { target: GLenum, renderbuffer: GLuint },
    renderbuffer_storage { target: GLenum, internalformat: GLenum, width: GLsizei, height: GLsizei },
    renderbuffer_storage_multisample { target: GLenum, samples: GLsizei, internalformat: GLenum, width: GLsizei, height: GLsizei },

    gen_transform_feedbacks { n: GLsizei, returned: Vec<GLuint> },
    delete_transform_feedbacks { ids: Vec<GLuint> },
    bind_transform_feedback { target: GLenum, id: GLuint },
    begin_transform_feedback { primitive_mode: GLenum },
    end_transform_feedback {},
    pause_transform_feedback {},
    resume_transform_feedback {},
    transform_feedback_varyings { program: GLuint, varyings: Vec<String>, buffer_mode: GLenum },

    gen_vertex_arrays { n: GLsizei, returned: Vec<GLuint> },
    delete_vertex_arrays { vertex_arrays: Vec<GLuint> },
    bind_vertex_array { vao: GLuint },
    vertex_attrib_pointer { index: GLuint, size: GLint, type_: GLenum, normalized: bool, stride: GLsizei, offset: GLuint },
    vertex_attrib_i_pointer { index: GLuint, size: GLint, type_: GLenum, stride: GLsizei, offset: GLuint },
    vertex_attrib_l_pointer { index: GLuint, size: GLint, type_: GLenum, stride: GLsizei, offset: GLuint },
    vertex_attrib_divisor { index: GLuint, divisor: GLuint },
    enable_vertex_attrib_array { index: GLuint },
    disable_vertex_attrib_array { index: GLuint },
    vertex_attrib_4f { index: GLuint, x: GLfloat, y: GLfloat, z: GLfloat, w: GLfloat },

    create_shader { shader_type: GLenum, returned: GLuint },
    delete_shader { shader: GLuint },
    shader_source { shader: GLuint, strings: Vec<Vec<u8>> },
    compile_shader { shader: GLuint },
    create_program { returned: GLuint },
    delete_program { program: GLuint },
    attach_shader { program: GLuint, shader: GLuint },
    detach_shader { program: GLuint, shader: GLuint },
    link_program { program: GLuint },
    validate_program { program: GLuint },
    use_program { program: GLuint },
    bind_attrib_location { program: GLuint, index: GLuint, name: String },

    uniform_1f { location: GLint, v0: GLfloat },
    uniform_2f { location: GLint, v0: GLfloat, v1: GLfloat },
    uniform_3f { location: GLint, v0: GLfloat, v1: GLfloat, v2: GLfloat },
    uniform_4f { location: GLint, x: GLfloat, y: GLfloat, z: GLfloat, w: GLfloat },
    uniform_1i { location: GLint, v0: GLint },
    uniform_2i { location: GLint, v0: GLint, v1: GLint },
    uniform_3i { location: GLint, v0: GLint, v1: GLint, v2: GLint },
    uniform_4i { location: GLint, x: GLint, y: GLint, z: GLint, w: GLint },
    uniform_1ui { location: GLint, v0: GLuint },
    uniform_2ui { location: GLint, v0: GLuint, v1: GLuint },
    uniform_3ui { location: GLint, v0: GLuint, v1: GLuint, v2: GLuint },
    uniform_4ui { location: GLint, x: GLuint, y: GLuint, z: GLuint, w: GLuint },
    uniform_matrix_2fv { location: GLint, transpose: bool, value: Vec<f32> },
    uniform_matrix_3fv { location: GLint, transpose: bool, value: Vec<f32> },
    uniform_matrix_4fv { location: GLint, transpose: bool, value: Vec<f32> },

    enable { cap: GLenum },
    disable { cap: GLenum },
    blend_func { sfactor: GLenum, dfactor: GLenum },
    blend_func_separate { src_rgb: GLenum, dest_rgb: GLenum, src_alpha: GLenum, dest_alpha: GLenum },
    blend_equation { mode: GLenum },
    blend_equation_separate { mode_rgb: GLenum, mode_alpha: GLenum },
    blend_color { r: f32, g: f32, b: f32, a: f32 },
    depth_func { func: GLenum },
    depth_mask { flag: bool },
    depth_range { near: f64, far: f64 },
    clear_color { r: f32, g: f32, b: f32, a: f32 },
    clear_depth { depth: f64 },
    clear_stencil { s: GLint },
    clear { buffer_mask: GLbitfield },
    viewport { x: GLint, y: GLint, width: GLsizei, height: GLsizei },
    scissor { x: GLint, y: GLint, width: GLsizei, height: GLsizei },
    cull_face { mode: GLenum },
    front_face { mode: GLenum },
    polygon_offset { factor: GLfloat, units: GLfloat },
    line_width { width: GLfloat },
    color_mask { r: bool, g: bool, b: bool, a: bool },
    stencil_func { func: GLenum, ref_: GLint, mask: GLuint },
    stencil_op { sfail: GLenum, dpfail: GLenum, dppass: GLenum },
    stencil_mask { mask: GLuint },
    stencil_func_separate { face: GLenum, func: GLenum, ref_: GLint, mask: GLuint },
    stencil_op_separate { face: GLenum, sfail: GLenum, dpfail: GLenum, dppass: GLenum },
    stencil_mask_separate { face: GLenum, mask: GLuint },
    polygon_mode { face: GLenum, mode: GLenum },
    point_size { size: GLfloat },
    provoking_vertex { mode: GLenum },
    logic_op { opcode: GLenum },
    hint { target: GLenum, mode: GLenum },
    enable_i { cap: GLenum, index: GLuint },
    disable_i { cap: GLenum, index: GLuint },
    blend_func_i { buf: GLuint, src: GLenum, dst: GLenum },
    color_mask_i { buf: GLuint, r: bool, g: bool, b: bool, a: bool },
    primitive_restart_index { index: GLuint },
    memory_barrier { barriers: GLbitfield },
    flush {},
    finish {},

    draw_arrays { mode: GLenum, first: GLint, count: GLsizei },
    draw_arrays_instanced { mode: GLenum, first: GLint, count: GLsizei, primcount: GLsizei },
    draw_elements { mode: GLenum, count: GLsizei, element_type: GLenum, indices_offset: GLuint },
    draw_elements_instanced { mode: GLenum, count: GLsizei, element_type: GLenum, indices_offset: GLuint, primcount: GLsizei },
    draw_range_elements { mode: GLenum, start: GLuint, end: GLuint, count: GLsizei, element_type: GLenum, indices_offset: GLuint },
    draw_elements_base_vertex { mode: GLenum, count: GLsizei, element_type: GLenum, indices_offset: GLuint, base_vertex: GLint },
    draw_range_elements_base_vertex { mode: GLenum, start: GLuint, end: GLuint, count: GLsizei, element_type: GLenum, indices_offset: GLuint, base_vertex: GLint },
    draw_elements_instanced_base_vertex { mode: GLenum, count: GLsizei, element_type: GLenum, indices_offset: GLuint, primcount: GLsizei, base_vertex: GLint },

    dispatch_compute { x: GLuint, y: GLuint, z: GLuint },
}

impl Call {
    /// Return true if this call deletes GL objects.
    pub fn is_delete(&self) -> bool {
        matches!(self,
                 Call::delete_buffers { .. }
                 | Call::delete_textures { .. }
                 | Call::delete_framebuffers { .. }
                 | Call::delete_renderbuffers { .. }
                 | Call::delete_transform_feedbacks { .. }
                 | Call::delete_vertex_arrays { .. }
                 | Call::delete_shader { .. }
                 | Call::delete_program { .. })
    }
}
