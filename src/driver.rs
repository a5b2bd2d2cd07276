//! The table of GL entry points every wrapper call goes through.
//!
//! `Driver` follows `gleam::gl::Gl` method for method, with two differences:
//! every method is safe, taking slices where the C API takes pointer/length
//! pairs, and it includes the entry points gleam doesn't expose (transform
//! feedback objects, one-dimensional textures, vector texture parameters,
//! multisample renderbuffers, base vertex draws, bindless textures, and
//! others). Entry points that a context may legitimately lack can be checked
//! with `has_entry_point` before use.
//!
//! Implementations:
//!
//! - `GleamDriver` forwards to a real context.
//! - `HeadlessDriver` models GL object and binding state in memory.
//! - `Recorder` forwards to another driver and records each call.

use gleam::gl::{GLbitfield, GLboolean, GLenum, GLfloat, GLint, GLintptr, GLsizei,
                GLsizeiptr, GLuint, GLuint64};
use std::os::raw::c_void;

/// Entry points that older or smaller contexts may not provide.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    /// `glGenTransformFeedbacks` and the rest of the transform feedback
    /// object API.
    TransformFeedback,
    /// `glTexImage1D`, `glTexSubImage1D`.
    TexImage1D,
    /// `glTexParameterfv`, `glTexParameteriv`.
    TexParameterVector,
    /// `glGetTexLevelParameteriv`.
    TexLevelParameter,
    /// `glRenderbufferStorageMultisample`.
    RenderbufferStorageMultisample,
    /// `glGetTexImage`: desktop GL only.
    GetTexImage,
    /// `glTransformFeedbackVaryings`.
    TransformFeedbackVaryings,
    /// `glReadPixels`.
    ReadPixels,
    /// `glPolygonMode`: desktop GL only.
    PolygonMode,
    /// `glPointSize`: desktop GL only.
    PointSize,
    /// `glProvokingVertex`.
    ProvokingVertex,
    /// `glLogicOp`: desktop GL only.
    LogicOp,
    /// `glEnablei`, `glDisablei`, `glIsEnabledi`, `glBlendFunci`,
    /// `glColorMaski`.
    IndexedState,
    /// `glMemoryBarrier`.
    MemoryBarrier,
    /// `glDispatchCompute`.
    DispatchCompute,
    /// `glPrimitiveRestartIndex`.
    PrimitiveRestartIndex,
    /// `glDrawRangeElements`.
    DrawRangeElements,
    /// `glDrawElementsBaseVertex`, `glDrawRangeElementsBaseVertex`,
    /// `glDrawElementsInstancedBaseVertex`.
    BaseVertex,
    /// `glGetUniformfv`, `glGetUniformiv`, `glGetUniformuiv`.
    GetUniform,
    /// `glVertexAttribLPointer`.
    VertexAttribLPointer,
    /// `glGetTextureHandleARB`, `glMakeTextureHandleResidentARB`,
    /// `glMakeTextureHandleNonResidentARB`.
    BindlessTexture,
}

#[allow(clippy::too_many_arguments)]
pub trait Driver {
    /// Return true if `entry` was loaded. Every entry point outside
    /// `EntryPoint` is assumed present.
    fn has_entry_point(&self, entry: EntryPoint) -> bool {
        let _ = entry;
        true
    }

    // Queries.
    fn get_error(&self) -> GLenum;
    fn get_string(&self, which: GLenum) -> String;
    fn get_string_i(&self, which: GLenum, index: GLuint) -> String;
    fn get_integer_v(&self, name: GLenum, result: &mut [GLint]);
    fn get_integer_iv(&self, name: GLenum, index: GLuint, result: &mut [GLint]);
    fn get_float_v(&self, name: GLenum, result: &mut [GLfloat]);
    fn is_enabled(&self, cap: GLenum) -> GLboolean;

    // Buffers.
    fn gen_buffers(&self, n: GLsizei) -> Vec<GLuint>;
    fn delete_buffers(&self, buffers: &[GLuint]);
    fn bind_buffer(&self, target: GLenum, buffer: GLuint);
    fn bind_buffer_base(&self, target: GLenum, index: GLuint, buffer: GLuint);
    fn bind_buffer_range(&self, target: GLenum, index: GLuint, buffer: GLuint,
                         offset: GLintptr, size: GLsizeiptr);
    /// `glBufferData`. With `data` of `None`, allocate `size` uninitialized
    /// bytes; otherwise `size` must equal `data.len()`.
    fn buffer_data(&self, target: GLenum, size: GLsizeiptr, data: Option<&[u8]>, usage: GLenum);
    fn buffer_sub_data(&self, target: GLenum, offset: GLintptr, data: &[u8]);
    fn get_buffer_parameter_iv(&self, target: GLenum, pname: GLenum) -> GLint;
    /// Returns null on failure. The mapping stays valid until `unmap_buffer`.
    fn map_buffer_range(&self, target: GLenum, offset: GLintptr, length: GLsizeiptr,
                        access: GLbitfield) -> *mut c_void;
    fn unmap_buffer(&self, target: GLenum) -> GLboolean;

    // Textures.
    fn gen_textures(&self, n: GLsizei) -> Vec<GLuint>;
    fn delete_textures(&self, textures: &[GLuint]);
    fn active_texture(&self, texture: GLenum);
    fn bind_texture(&self, target: GLenum, texture: GLuint);
    fn tex_image_1d(&self, target: GLenum, level: GLint, internal_format: GLint,
                    width: GLsizei, border: GLint, format: GLenum, ty: GLenum,
                    opt_data: Option<&[u8]>);
    fn tex_image_2d(&self, target: GLenum, level: GLint, internal_format: GLint,
                    width: GLsizei, height: GLsizei, border: GLint, format: GLenum,
                    ty: GLenum, opt_data: Option<&[u8]>);
    fn tex_image_3d(&self, target: GLenum, level: GLint, internal_format: GLint,
                    width: GLsizei, height: GLsizei, depth: GLsizei, border: GLint,
                    format: GLenum, ty: GLenum, opt_data: Option<&[u8]>);
    fn tex_sub_image_1d(&self, target: GLenum, level: GLint, xoffset: GLint, width: GLsizei,
                        format: GLenum, ty: GLenum, data: &[u8]);
    fn tex_sub_image_2d(&self, target: GLenum, level: GLint, xoffset: GLint, yoffset: GLint,
                        width: GLsizei, height: GLsizei, format: GLenum, ty: GLenum,
                        data: &[u8]);
    fn tex_sub_image_3d(&self, target: GLenum, level: GLint, xoffset: GLint, yoffset: GLint,
                        zoffset: GLint, width: GLsizei, height: GLsizei, depth: GLsizei,
                        format: GLenum, ty: GLenum, data: &[u8]);
    fn tex_storage_2d(&self, target: GLenum, levels: GLint, internal_format: GLenum,
                      width: GLsizei, height: GLsizei);
    fn tex_storage_3d(&self, target: GLenum, levels: GLint, internal_format: GLenum,
                      width: GLsizei, height: GLsizei, depth: GLsizei);
    fn tex_parameter_i(&self, target: GLenum, pname: GLenum, param: GLint);
    fn tex_parameter_f(&self, target: GLenum, pname: GLenum, param: GLfloat);
    fn tex_parameter_iv(&self, target: GLenum, pname: GLenum, params: &[GLint]);
    fn tex_parameter_fv(&self, target: GLenum, pname: GLenum, params: &[GLfloat]);
    fn get_tex_parameter_iv(&self, target: GLenum, pname: GLenum) -> GLint;
    fn get_tex_parameter_fv(&self, target: GLenum, pname: GLenum) -> GLfloat;
    fn get_tex_level_parameter_iv(&self, target: GLenum, level: GLint, pname: GLenum) -> GLint;
    fn generate_mipmap(&self, target: GLenum);
    fn tex_buffer(&self, target: GLenum, internal_format: GLenum, buffer: GLuint);
    fn get_tex_image_into_buffer(&self, target: GLenum, level: GLint, format: GLenum,
                                 ty: GLenum, output: &mut [u8]);
    fn pixel_store_i(&self, name: GLenum, param: GLint);
    /// `glGetTextureHandleARB`. Returns 0 on failure.
    fn get_texture_handle(&self, texture: GLuint) -> GLuint64;
    fn make_texture_handle_resident(&self, handle: GLuint64);
    fn make_texture_handle_non_resident(&self, handle: GLuint64);

    // Framebuffers and renderbuffers.
    fn gen_framebuffers(&self, n: GLsizei) -> Vec<GLuint>;
    fn delete_framebuffers(&self, framebuffers: &[GLuint]);
    fn bind_framebuffer(&self, target: GLenum, framebuffer: GLuint);
    fn framebuffer_texture_2d(&self, target: GLenum, attachment: GLenum, textarget: GLenum,
                              texture: GLuint, level: GLint);
    fn framebuffer_texture_layer(&self, target: GLenum, attachment: GLenum, texture: GLuint,
                                 level: GLint, layer: GLint);
    fn framebuffer_renderbuffer(&self, target: GLenum, attachment: GLenum,
                                renderbuffertarget: GLenum, renderbuffer: GLuint);
    fn check_frame_buffer_status(&self, target: GLenum) -> GLenum;
    fn draw_buffers(&self, bufs: &[GLenum]);
    fn read_buffer(&self, mode: GLenum);
    /// `glReadPixels` from the read framebuffer into `output`, which must
    /// hold the whole rectangle as `GL_PACK_ALIGNMENT` lays it out.
    fn read_pixels(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei,
                   format: GLenum, ty: GLenum, output: &mut [u8]);
    fn blit_framebuffer(&self, src_x0: GLint, src_y0: GLint, src_x1: GLint, src_y1: GLint,
                        dst_x0: GLint, dst_y0: GLint, dst_x1: GLint, dst_y1: GLint,
                        mask: GLbitfield, filter: GLenum);
    fn gen_renderbuffers(&self, n: GLsizei) -> Vec<GLuint>;
    fn delete_renderbuffers(&self, renderbuffers: &[GLuint]);
    fn bind_renderbuffer(&self, target: GLenum, renderbuffer: GLuint);
    fn renderbuffer_storage(&self, target: GLenum, internalformat: GLenum,
                            width: GLsizei, height: GLsizei);
    fn renderbuffer_storage_multisample(&self, target: GLenum, samples: GLsizei,
                                        internalformat: GLenum, width: GLsizei, height: GLsizei);

    // Transform feedback.
    fn gen_transform_feedbacks(&self, n: GLsizei) -> Vec<GLuint>;
    fn delete_transform_feedbacks(&self, ids: &[GLuint]);
    fn bind_transform_feedback(&self, target: GLenum, id: GLuint);
    fn begin_transform_feedback(&self, primitive_mode: GLenum);
    fn end_transform_feedback(&self);
    fn pause_transform_feedback(&self);
    fn resume_transform_feedback(&self);
    fn transform_feedback_varyings(&self, program: GLuint, varyings: &[&str], buffer_mode: GLenum);

    // Vertex arrays.
    fn gen_vertex_arrays(&self, n: GLsizei) -> Vec<GLuint>;
    fn delete_vertex_arrays(&self, vertex_arrays: &[GLuint]);
    fn bind_vertex_array(&self, vao: GLuint);
    fn vertex_attrib_pointer(&self, index: GLuint, size: GLint, type_: GLenum,
                             normalized: bool, stride: GLsizei, offset: GLuint);
    fn vertex_attrib_i_pointer(&self, index: GLuint, size: GLint, type_: GLenum,
                               stride: GLsizei, offset: GLuint);
    fn vertex_attrib_l_pointer(&self, index: GLuint, size: GLint, type_: GLenum,
                               stride: GLsizei, offset: GLuint);
    fn vertex_attrib_divisor(&self, index: GLuint, divisor: GLuint);
    fn enable_vertex_attrib_array(&self, index: GLuint);
    fn disable_vertex_attrib_array(&self, index: GLuint);
    fn vertex_attrib_4f(&self, index: GLuint, x: GLfloat, y: GLfloat, z: GLfloat, w: GLfloat);

    // Shaders and programs.
    fn create_shader(&self, shader_type: GLenum) -> GLuint;
    fn delete_shader(&self, shader: GLuint);
    fn shader_source(&self, shader: GLuint, strings: &[&[u8]]);
    fn compile_shader(&self, shader: GLuint);
    fn get_shader_iv(&self, shader: GLuint, pname: GLenum) -> GLint;
    fn get_shader_info_log(&self, shader: GLuint) -> String;
    fn create_program(&self) -> GLuint;
    fn delete_program(&self, program: GLuint);
    fn attach_shader(&self, program: GLuint, shader: GLuint);
    fn detach_shader(&self, program: GLuint, shader: GLuint);
    fn link_program(&self, program: GLuint);
    fn validate_program(&self, program: GLuint);
    fn use_program(&self, program: GLuint);
    fn get_program_iv(&self, program: GLuint, pname: GLenum) -> GLint;
    fn get_program_info_log(&self, program: GLuint) -> String;
    fn get_uniform_location(&self, program: GLuint, name: &str) -> GLint;
    fn get_attrib_location(&self, program: GLuint, name: &str) -> GLint;
    fn bind_attrib_location(&self, program: GLuint, index: GLuint, name: &str);

    // Uniforms of the current program.
    fn uniform_1f(&self, location: GLint, v0: GLfloat);
    fn uniform_2f(&self, location: GLint, v0: GLfloat, v1: GLfloat);
    fn uniform_3f(&self, location: GLint, v0: GLfloat, v1: GLfloat, v2: GLfloat);
    fn uniform_4f(&self, location: GLint, x: GLfloat, y: GLfloat, z: GLfloat, w: GLfloat);
    fn uniform_1i(&self, location: GLint, v0: GLint);
    fn uniform_2i(&self, location: GLint, v0: GLint, v1: GLint);
    fn uniform_3i(&self, location: GLint, v0: GLint, v1: GLint, v2: GLint);
    fn uniform_4i(&self, location: GLint, x: GLint, y: GLint, z: GLint, w: GLint);
    fn uniform_1ui(&self, location: GLint, v0: GLuint);
    fn uniform_2ui(&self, location: GLint, v0: GLuint, v1: GLuint);
    fn uniform_3ui(&self, location: GLint, v0: GLuint, v1: GLuint, v2: GLuint);
    fn uniform_4ui(&self, location: GLint, x: GLuint, y: GLuint, z: GLuint, w: GLuint);
    fn uniform_matrix_2fv(&self, location: GLint, transpose: bool, value: &[f32]);
    fn uniform_matrix_3fv(&self, location: GLint, transpose: bool, value: &[f32]);
    fn uniform_matrix_4fv(&self, location: GLint, transpose: bool, value: &[f32]);
    /// `glGetUniformfv`. GL writes as many values as the uniform has;
    /// `result` must be long enough for them.
    fn get_uniform_fv(&self, program: GLuint, location: GLint, result: &mut [GLfloat]);
    fn get_uniform_iv(&self, program: GLuint, location: GLint, result: &mut [GLint]);
    fn get_uniform_uiv(&self, program: GLuint, location: GLint, result: &mut [GLuint]);

    // Fixed-function state.
    fn enable(&self, cap: GLenum);
    fn disable(&self, cap: GLenum);
    fn blend_func(&self, sfactor: GLenum, dfactor: GLenum);
    fn blend_func_separate(&self, src_rgb: GLenum, dest_rgb: GLenum,
                           src_alpha: GLenum, dest_alpha: GLenum);
    fn blend_equation(&self, mode: GLenum);
    fn blend_equation_separate(&self, mode_rgb: GLenum, mode_alpha: GLenum);
    fn blend_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn depth_func(&self, func: GLenum);
    fn depth_mask(&self, flag: bool);
    fn depth_range(&self, near: f64, far: f64);
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn clear_depth(&self, depth: f64);
    fn clear_stencil(&self, s: GLint);
    fn clear(&self, buffer_mask: GLbitfield);
    fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei);
    fn scissor(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei);
    fn cull_face(&self, mode: GLenum);
    fn front_face(&self, mode: GLenum);
    fn polygon_offset(&self, factor: GLfloat, units: GLfloat);
    fn line_width(&self, width: GLfloat);
    fn color_mask(&self, r: bool, g: bool, b: bool, a: bool);
    fn stencil_func(&self, func: GLenum, ref_: GLint, mask: GLuint);
    fn stencil_op(&self, sfail: GLenum, dpfail: GLenum, dppass: GLenum);
    fn stencil_mask(&self, mask: GLuint);
    fn stencil_func_separate(&self, face: GLenum, func: GLenum, ref_: GLint, mask: GLuint);
    fn stencil_op_separate(&self, face: GLenum, sfail: GLenum, dpfail: GLenum, dppass: GLenum);
    fn stencil_mask_separate(&self, face: GLenum, mask: GLuint);
    fn polygon_mode(&self, face: GLenum, mode: GLenum);
    fn point_size(&self, size: GLfloat);
    fn provoking_vertex(&self, mode: GLenum);
    fn logic_op(&self, opcode: GLenum);
    fn hint(&self, target: GLenum, mode: GLenum);
    fn enable_i(&self, cap: GLenum, index: GLuint);
    fn disable_i(&self, cap: GLenum, index: GLuint);
    fn is_enabled_i(&self, cap: GLenum, index: GLuint) -> GLboolean;
    fn blend_func_i(&self, buf: GLuint, src: GLenum, dst: GLenum);
    fn color_mask_i(&self, buf: GLuint, r: bool, g: bool, b: bool, a: bool);
    fn primitive_restart_index(&self, index: GLuint);
    fn memory_barrier(&self, barriers: GLbitfield);
    fn flush(&self);
    fn finish(&self);

    // Drawing.
    fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei);
    fn draw_arrays_instanced(&self, mode: GLenum, first: GLint, count: GLsizei,
                             primcount: GLsizei);
    fn draw_elements(&self, mode: GLenum, count: GLsizei, element_type: GLenum,
                     indices_offset: GLuint);
    fn draw_elements_instanced(&self, mode: GLenum, count: GLsizei, element_type: GLenum,
                               indices_offset: GLuint, primcount: GLsizei);
    fn draw_range_elements(&self, mode: GLenum, start: GLuint, end: GLuint, count: GLsizei,
                           element_type: GLenum, indices_offset: GLuint);
    fn draw_elements_base_vertex(&self, mode: GLenum, count: GLsizei, element_type: GLenum,
                                 indices_offset: GLuint, base_vertex: GLint);
    fn draw_range_elements_base_vertex(&self, mode: GLenum, start: GLuint, end: GLuint,
                                       count: GLsizei, element_type: GLenum,
                                       indices_offset: GLuint, base_vertex: GLint);
    fn draw_elements_instanced_base_vertex(&self, mode: GLenum, count: GLsizei,
                                           element_type: GLenum, indices_offset: GLuint,
                                           primcount: GLsizei, base_vertex: GLint);

    // Compute.
    fn dispatch_compute(&self, x: GLuint, y: GLuint, z: GLuint);
}

/// Convenience queries built on `get_integer_v` and friends.
pub trait DriverExt: Driver {
    /// Return the single integer `glGetIntegerv(name)` reports.
    fn get_integer(&self, name: GLenum) -> GLint {
        let mut result = [0];
        self.get_integer_v(name, &mut result);
        result[0]
    }

    /// Return the single integer `glGetIntegeri_v(name, index)` reports.
    fn get_integer_i(&self, name: GLenum, index: GLuint) -> GLint {
        let mut result = [0];
        self.get_integer_iv(name, index, &mut result);
        result[0]
    }

    fn get_float(&self, name: GLenum) -> GLfloat {
        let mut result = [0.0];
        self.get_float_v(name, &mut result);
        result[0]
    }

    /// Return the name bound at the binding query `binding`.
    fn get_bound(&self, binding: GLenum) -> GLuint {
        self.get_integer(binding) as GLuint
    }
}

impl<D: Driver + ?Sized> DriverExt for D {}
