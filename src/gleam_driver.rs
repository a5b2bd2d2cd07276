//! A `Driver` backed by a real GL context, through `gleam`.
//!
//! `gleam` covers most of what the wrappers call. The rest (one-dimensional
//! textures, transform feedback objects, vector texture parameters, level
//! queries, multisample renderbuffers, base vertex draws, and so on) is
//! called through the `gl` crate's global function pointers, which
//! `GleamDriver::load_with` loads alongside gleam's. `has_entry_point`
//! reports whether those pointers were found.
//!
//! The `gl` crate's 4.5 core bindings have no `ARB_bindless_texture`, so
//! `load_with` looks those three functions up itself.

use gleam::gl::{GLbitfield, GLboolean, GLenum, GLfloat, GLint, GLintptr, GLsizei,
                GLsizeiptr, GLuint, GLuint64, Gl, GlType};
use std::ffi::CString;
use std::mem;
use std::os::raw::{c_char, c_void};
use std::ptr;
use std::rc::Rc;

use crate::driver::{Driver, EntryPoint};

pub struct GleamDriver {
    gl: Rc<dyn Gl>,
    bindless: Option<BindlessFns>,
}

#[derive(Copy, Clone)]
struct BindlessFns {
    get_texture_handle: unsafe extern "system" fn(GLuint) -> GLuint64,
    make_resident: unsafe extern "system" fn(GLuint64),
    make_non_resident: unsafe extern "system" fn(GLuint64),
}

impl BindlessFns {
    /// Safety: as for `GleamDriver::load_with`.
    unsafe fn load<F>(loader: &mut F) -> Option<BindlessFns>
    where F: FnMut(&str) -> *const c_void
    {
        let get_texture_handle = loader("glGetTextureHandleARB");
        let make_resident = loader("glMakeTextureHandleResidentARB");
        let make_non_resident = loader("glMakeTextureHandleNonResidentARB");
        if get_texture_handle.is_null() || make_resident.is_null() || make_non_resident.is_null() {
            return None;
        }
        Some(BindlessFns {
            get_texture_handle: mem::transmute(get_texture_handle),
            make_resident: mem::transmute(make_resident),
            make_non_resident: mem::transmute(make_non_resident),
        })
    }
}

impl GleamDriver {
    /// Wrap a context that has already been loaded.
    ///
    /// The entry points gleam lacks are only available if `gl::load_with`
    /// has been called for the same context; otherwise the features needing
    /// them are reported as unsupported.
    pub fn new(gl: Rc<dyn Gl>) -> GleamDriver {
        GleamDriver { gl, bindless: None }
    }

    /// Load a desktop OpenGL context's entry points through `loader`, which
    /// maps names like `"glBindBuffer"` to function addresses.
    ///
    /// # Safety
    ///
    /// `loader` must return null or a pointer to the named function of the
    /// context that is current whenever this driver is used.
    pub unsafe fn load_with<F>(mut loader: F) -> GleamDriver
    where F: FnMut(&str) -> *const c_void
    {
        gl::load_with(|name| loader(name));
        let bindless = BindlessFns::load(&mut loader);
        GleamDriver { gl: gleam::gl::GlFns::load_with(loader), bindless }
    }

    /// Like `load_with`, for an OpenGL ES context.
    ///
    /// # Safety
    ///
    /// As for `load_with`.
    pub unsafe fn load_gles_with<F>(mut loader: F) -> GleamDriver
    where F: FnMut(&str) -> *const c_void
    {
        gl::load_with(|name| loader(name));
        let bindless = BindlessFns::load(&mut loader);
        GleamDriver { gl: gleam::gl::GlesFns::load_with(loader), bindless }
    }

    pub fn gl(&self) -> &Rc<dyn Gl> {
        &self.gl
    }
}

fn data_ptr(data: Option<&[u8]>) -> *const c_void {
    data.map_or(ptr::null(), |data| data.as_ptr() as *const c_void)
}

fn gl_bool(value: bool) -> GLboolean {
    if value { gl::TRUE } else { gl::FALSE }
}

fn offset_ptr(offset: GLuint) -> *const c_void {
    offset as usize as *const c_void
}

impl Driver for GleamDriver {
    fn has_entry_point(&self, entry: EntryPoint) -> bool {
        match entry {
            EntryPoint::TransformFeedback =>
                gl::GenTransformFeedbacks::is_loaded()
                && gl::BindTransformFeedback::is_loaded()
                && gl::PauseTransformFeedback::is_loaded(),
            EntryPoint::TexImage1D =>
                gl::TexImage1D::is_loaded() && gl::TexSubImage1D::is_loaded(),
            EntryPoint::TexParameterVector =>
                gl::TexParameteriv::is_loaded() && gl::TexParameterfv::is_loaded(),
            EntryPoint::TexLevelParameter => gl::GetTexLevelParameteriv::is_loaded(),
            EntryPoint::RenderbufferStorageMultisample =>
                gl::RenderbufferStorageMultisample::is_loaded(),
            EntryPoint::GetTexImage =>
                self.gl.get_type() == GlType::Gl && gl::GetTexImage::is_loaded(),
            EntryPoint::TransformFeedbackVaryings => gl::TransformFeedbackVaryings::is_loaded(),
            EntryPoint::ReadPixels => gl::ReadPixels::is_loaded(),
            EntryPoint::PolygonMode =>
                self.gl.get_type() == GlType::Gl && gl::PolygonMode::is_loaded(),
            EntryPoint::PointSize =>
                self.gl.get_type() == GlType::Gl && gl::PointSize::is_loaded(),
            EntryPoint::ProvokingVertex => gl::ProvokingVertex::is_loaded(),
            EntryPoint::LogicOp =>
                self.gl.get_type() == GlType::Gl && gl::LogicOp::is_loaded(),
            EntryPoint::IndexedState =>
                gl::Enablei::is_loaded() && gl::Disablei::is_loaded()
                && gl::IsEnabledi::is_loaded() && gl::BlendFunci::is_loaded()
                && gl::ColorMaski::is_loaded(),
            EntryPoint::MemoryBarrier => gl::MemoryBarrier::is_loaded(),
            EntryPoint::DispatchCompute => gl::DispatchCompute::is_loaded(),
            EntryPoint::PrimitiveRestartIndex => gl::PrimitiveRestartIndex::is_loaded(),
            EntryPoint::DrawRangeElements => gl::DrawRangeElements::is_loaded(),
            EntryPoint::BaseVertex =>
                gl::DrawElementsBaseVertex::is_loaded()
                && gl::DrawRangeElementsBaseVertex::is_loaded()
                && gl::DrawElementsInstancedBaseVertex::is_loaded(),
            EntryPoint::GetUniform =>
                gl::GetUniformfv::is_loaded() && gl::GetUniformiv::is_loaded()
                && gl::GetUniformuiv::is_loaded(),
            EntryPoint::VertexAttribLPointer => gl::VertexAttribLPointer::is_loaded(),
            EntryPoint::BindlessTexture => self.bindless.is_some(),
        }
    }

    fn get_error(&self) -> GLenum {
        self.gl.get_error()
    }

    fn get_string(&self, which: GLenum) -> String {
        self.gl.get_string(which)
    }

    fn get_string_i(&self, which: GLenum, index: GLuint) -> String {
        self.gl.get_string_i(which, index)
    }

    fn get_integer_v(&self, name: GLenum, result: &mut [GLint]) {
        // gleam's queries are unsafe because GL writes as many values as
        // `name` has, regardless of the slice's length. Every caller passes
        // a slice long enough for the parameter it asks about.
        unsafe { self.gl.get_integer_v(name, result) }
    }

    fn get_integer_iv(&self, name: GLenum, index: GLuint, result: &mut [GLint]) {
        unsafe { self.gl.get_integer_iv(name, index, result) }
    }

    fn get_float_v(&self, name: GLenum, result: &mut [GLfloat]) {
        unsafe { self.gl.get_float_v(name, result) }
    }

    fn is_enabled(&self, cap: GLenum) -> GLboolean {
        self.gl.is_enabled(cap)
    }

    fn gen_buffers(&self, n: GLsizei) -> Vec<GLuint> {
        self.gl.gen_buffers(n)
    }

    fn delete_buffers(&self, buffers: &[GLuint]) {
        self.gl.delete_buffers(buffers)
    }

    fn bind_buffer(&self, target: GLenum, buffer: GLuint) {
        self.gl.bind_buffer(target, buffer)
    }

    fn bind_buffer_base(&self, target: GLenum, index: GLuint, buffer: GLuint) {
        self.gl.bind_buffer_base(target, index, buffer)
    }

    fn bind_buffer_range(&self, target: GLenum, index: GLuint, buffer: GLuint,
                         offset: GLintptr, size: GLsizeiptr) {
        self.gl.bind_buffer_range(target, index, buffer, offset, size)
    }

    fn buffer_data(&self, target: GLenum, size: GLsizeiptr, data: Option<&[u8]>, usage: GLenum) {
        let size = data.map_or(size, |data| data.len() as GLsizeiptr);
        self.gl.buffer_data_untyped(target, size, data_ptr(data), usage)
    }

    fn buffer_sub_data(&self, target: GLenum, offset: GLintptr, data: &[u8]) {
        self.gl.buffer_sub_data_untyped(target, offset, data.len() as GLsizeiptr,
                                        data.as_ptr() as *const c_void)
    }

    fn get_buffer_parameter_iv(&self, target: GLenum, pname: GLenum) -> GLint {
        self.gl.get_buffer_parameter_iv(target, pname)
    }

    fn map_buffer_range(&self, target: GLenum, offset: GLintptr, length: GLsizeiptr,
                        access: GLbitfield) -> *mut c_void {
        self.gl.map_buffer_range(target, offset, length, access)
    }

    fn unmap_buffer(&self, target: GLenum) -> GLboolean {
        self.gl.unmap_buffer(target)
    }

    fn gen_textures(&self, n: GLsizei) -> Vec<GLuint> {
        self.gl.gen_textures(n)
    }

    fn delete_textures(&self, textures: &[GLuint]) {
        self.gl.delete_textures(textures)
    }

    fn active_texture(&self, texture: GLenum) {
        self.gl.active_texture(texture)
    }

    fn bind_texture(&self, target: GLenum, texture: GLuint) {
        self.gl.bind_texture(target, texture)
    }

    fn tex_image_1d(&self, target: GLenum, level: GLint, internal_format: GLint,
                    width: GLsizei, border: GLint, format: GLenum, ty: GLenum,
                    opt_data: Option<&[u8]>) {
        unsafe {
            gl::TexImage1D(target, level, internal_format, width, border, format, ty,
                           data_ptr(opt_data))
        }
    }

    fn tex_image_2d(&self, target: GLenum, level: GLint, internal_format: GLint,
                    width: GLsizei, height: GLsizei, border: GLint, format: GLenum,
                    ty: GLenum, opt_data: Option<&[u8]>) {
        self.gl.tex_image_2d(target, level, internal_format, width, height, border,
                             format, ty, opt_data)
    }

    fn tex_image_3d(&self, target: GLenum, level: GLint, internal_format: GLint,
                    width: GLsizei, height: GLsizei, depth: GLsizei, border: GLint,
                    format: GLenum, ty: GLenum, opt_data: Option<&[u8]>) {
        self.gl.tex_image_3d(target, level, internal_format, width, height, depth, border,
                             format, ty, opt_data)
    }

    fn tex_sub_image_1d(&self, target: GLenum, level: GLint, xoffset: GLint, width: GLsizei,
                        format: GLenum, ty: GLenum, data: &[u8]) {
        unsafe {
            gl::TexSubImage1D(target, level, xoffset, width, format, ty,
                              data.as_ptr() as *const c_void)
        }
    }

    fn tex_sub_image_2d(&self, target: GLenum, level: GLint, xoffset: GLint, yoffset: GLint,
                        width: GLsizei, height: GLsizei, format: GLenum, ty: GLenum,
                        data: &[u8]) {
        self.gl.tex_sub_image_2d(target, level, xoffset, yoffset, width, height, format, ty, data)
    }

    fn tex_sub_image_3d(&self, target: GLenum, level: GLint, xoffset: GLint, yoffset: GLint,
                        zoffset: GLint, width: GLsizei, height: GLsizei, depth: GLsizei,
                        format: GLenum, ty: GLenum, data: &[u8]) {
        self.gl.tex_sub_image_3d(target, level, xoffset, yoffset, zoffset, width, height, depth,
                                 format, ty, data)
    }

    fn tex_storage_2d(&self, target: GLenum, levels: GLint, internal_format: GLenum,
                      width: GLsizei, height: GLsizei) {
        self.gl.tex_storage_2d(target, levels, internal_format, width, height)
    }

    fn tex_storage_3d(&self, target: GLenum, levels: GLint, internal_format: GLenum,
                      width: GLsizei, height: GLsizei, depth: GLsizei) {
        self.gl.tex_storage_3d(target, levels, internal_format, width, height, depth)
    }

    fn tex_parameter_i(&self, target: GLenum, pname: GLenum, param: GLint) {
        self.gl.tex_parameter_i(target, pname, param)
    }

    fn tex_parameter_f(&self, target: GLenum, pname: GLenum, param: GLfloat) {
        self.gl.tex_parameter_f(target, pname, param)
    }

    fn tex_parameter_iv(&self, target: GLenum, pname: GLenum, params: &[GLint]) {
        unsafe { gl::TexParameteriv(target, pname, params.as_ptr()) }
    }

    fn tex_parameter_fv(&self, target: GLenum, pname: GLenum, params: &[GLfloat]) {
        unsafe { gl::TexParameterfv(target, pname, params.as_ptr()) }
    }

    fn get_tex_parameter_iv(&self, target: GLenum, pname: GLenum) -> GLint {
        self.gl.get_tex_parameter_iv(target, pname)
    }

    fn get_tex_parameter_fv(&self, target: GLenum, pname: GLenum) -> GLfloat {
        self.gl.get_tex_parameter_fv(target, pname)
    }

    fn get_tex_level_parameter_iv(&self, target: GLenum, level: GLint, pname: GLenum) -> GLint {
        let mut result = 0;
        unsafe { gl::GetTexLevelParameteriv(target, level, pname, &mut result) };
        result
    }

    fn generate_mipmap(&self, target: GLenum) {
        self.gl.generate_mipmap(target)
    }

    fn tex_buffer(&self, target: GLenum, internal_format: GLenum, buffer: GLuint) {
        self.gl.tex_buffer(target, internal_format, buffer)
    }

    fn get_tex_image_into_buffer(&self, target: GLenum, level: GLint, format: GLenum,
                                 ty: GLenum, output: &mut [u8]) {
        self.gl.get_tex_image_into_buffer(target, level, format, ty, output)
    }

    fn pixel_store_i(&self, name: GLenum, param: GLint) {
        self.gl.pixel_store_i(name, param)
    }

    fn get_texture_handle(&self, texture: GLuint) -> GLuint64 {
        match self.bindless {
            Some(fns) => unsafe { (fns.get_texture_handle)(texture) },
            None => 0,
        }
    }

    fn make_texture_handle_resident(&self, handle: GLuint64) {
        if let Some(fns) = self.bindless {
            unsafe { (fns.make_resident)(handle) }
        }
    }

    fn make_texture_handle_non_resident(&self, handle: GLuint64) {
        if let Some(fns) = self.bindless {
            unsafe { (fns.make_non_resident)(handle) }
        }
    }

    fn gen_framebuffers(&self, n: GLsizei) -> Vec<GLuint> {
        self.gl.gen_framebuffers(n)
    }

    fn delete_framebuffers(&self, framebuffers: &[GLuint]) {
        self.gl.delete_framebuffers(framebuffers)
    }

    fn bind_framebuffer(&self, target: GLenum, framebuffer: GLuint) {
        self.gl.bind_framebuffer(target, framebuffer)
    }

    fn framebuffer_texture_2d(&self, target: GLenum, attachment: GLenum, textarget: GLenum,
                              texture: GLuint, level: GLint) {
        self.gl.framebuffer_texture_2d(target, attachment, textarget, texture, level)
    }

    fn framebuffer_texture_layer(&self, target: GLenum, attachment: GLenum, texture: GLuint,
                                 level: GLint, layer: GLint) {
        self.gl.framebuffer_texture_layer(target, attachment, texture, level, layer)
    }

    fn framebuffer_renderbuffer(&self, target: GLenum, attachment: GLenum,
                                renderbuffertarget: GLenum, renderbuffer: GLuint) {
        self.gl.framebuffer_renderbuffer(target, attachment, renderbuffertarget, renderbuffer)
    }

    fn check_frame_buffer_status(&self, target: GLenum) -> GLenum {
        self.gl.check_frame_buffer_status(target)
    }

    fn draw_buffers(&self, bufs: &[GLenum]) {
        self.gl.draw_buffers(bufs)
    }

    fn read_buffer(&self, mode: GLenum) {
        self.gl.read_buffer(mode)
    }

    fn read_pixels(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei,
                   format: GLenum, ty: GLenum, output: &mut [u8]) {
        // gleam's `read_pixels_into_buffer` insists on tightly packed rows,
        // and resets GL_PACK_ALIGNMENT to get them.
        unsafe {
            gl::ReadPixels(x, y, width, height, format, ty, output.as_mut_ptr() as *mut c_void)
        }
    }

    fn blit_framebuffer(&self, src_x0: GLint, src_y0: GLint, src_x1: GLint, src_y1: GLint,
                        dst_x0: GLint, dst_y0: GLint, dst_x1: GLint, dst_y1: GLint,
                        mask: GLbitfield, filter: GLenum) {
        self.gl.blit_framebuffer(src_x0, src_y0, src_x1, src_y1,
                                 dst_x0, dst_y0, dst_x1, dst_y1, mask, filter)
    }

    fn gen_renderbuffers(&self, n: GLsizei) -> Vec<GLuint> {
        self.gl.gen_renderbuffers(n)
    }

    fn delete_renderbuffers(&self, renderbuffers: &[GLuint]) {
        self.gl.delete_renderbuffers(renderbuffers)
    }

    fn bind_renderbuffer(&self, target: GLenum, renderbuffer: GLuint) {
        self.gl.bind_renderbuffer(target, renderbuffer)
    }

    fn renderbuffer_storage(&self, target: GLenum, internalformat: GLenum,
                            width: GLsizei, height: GLsizei) {
        self.gl.renderbuffer_storage(target, internalformat, width, height)
    }

    fn renderbuffer_storage_multisample(&self, target: GLenum, samples: GLsizei,
                                        internalformat: GLenum, width: GLsizei,
                                        height: GLsizei) {
        unsafe {
            gl::RenderbufferStorageMultisample(target, samples, internalformat, width, height)
        }
    }

    fn gen_transform_feedbacks(&self, n: GLsizei) -> Vec<GLuint> {
        let mut ids = vec![0; n.max(0) as usize];
        unsafe { gl::GenTransformFeedbacks(n, ids.as_mut_ptr()) };
        ids
    }

    fn delete_transform_feedbacks(&self, ids: &[GLuint]) {
        unsafe { gl::DeleteTransformFeedbacks(ids.len() as GLsizei, ids.as_ptr()) }
    }

    fn bind_transform_feedback(&self, target: GLenum, id: GLuint) {
        unsafe { gl::BindTransformFeedback(target, id) }
    }

    fn begin_transform_feedback(&self, primitive_mode: GLenum) {
        unsafe { gl::BeginTransformFeedback(primitive_mode) }
    }

    fn end_transform_feedback(&self) {
        unsafe { gl::EndTransformFeedback() }
    }

    fn pause_transform_feedback(&self) {
        unsafe { gl::PauseTransformFeedback() }
    }

    fn resume_transform_feedback(&self) {
        unsafe { gl::ResumeTransformFeedback() }
    }

    fn transform_feedback_varyings(&self, program: GLuint, varyings: &[&str],
                                   buffer_mode: GLenum) {
        // A name can't contain a NUL; anything after one is dropped.
        let names: Vec<CString> = varyings.iter()
            .map(|v| CString::new(v.split('\0').next().unwrap_or("")).unwrap_or_default())
            .collect();
        let pointers: Vec<*const c_char> = names.iter().map(|n| n.as_ptr()).collect();
        unsafe {
            gl::TransformFeedbackVaryings(program, pointers.len() as GLsizei, pointers.as_ptr(),
                                          buffer_mode)
        }
    }

    fn gen_vertex_arrays(&self, n: GLsizei) -> Vec<GLuint> {
        self.gl.gen_vertex_arrays(n)
    }

    fn delete_vertex_arrays(&self, vertex_arrays: &[GLuint]) {
        self.gl.delete_vertex_arrays(vertex_arrays)
    }

    fn bind_vertex_array(&self, vao: GLuint) {
        self.gl.bind_vertex_array(vao)
    }

    fn vertex_attrib_pointer(&self, index: GLuint, size: GLint, type_: GLenum,
                             normalized: bool, stride: GLsizei, offset: GLuint) {
        self.gl.vertex_attrib_pointer(index, size, type_, normalized, stride, offset)
    }

    fn vertex_attrib_i_pointer(&self, index: GLuint, size: GLint, type_: GLenum,
                               stride: GLsizei, offset: GLuint) {
        self.gl.vertex_attrib_i_pointer(index, size, type_, stride, offset)
    }

    fn vertex_attrib_l_pointer(&self, index: GLuint, size: GLint, type_: GLenum,
                               stride: GLsizei, offset: GLuint) {
        unsafe { gl::VertexAttribLPointer(index, size, type_, stride, offset_ptr(offset)) }
    }

    fn vertex_attrib_divisor(&self, index: GLuint, divisor: GLuint) {
        self.gl.vertex_attrib_divisor(index, divisor)
    }

    fn enable_vertex_attrib_array(&self, index: GLuint) {
        self.gl.enable_vertex_attrib_array(index)
    }

    fn disable_vertex_attrib_array(&self, index: GLuint) {
        self.gl.disable_vertex_attrib_array(index)
    }

    fn vertex_attrib_4f(&self, index: GLuint, x: GLfloat, y: GLfloat, z: GLfloat, w: GLfloat) {
        self.gl.vertex_attrib_4f(index, x, y, z, w)
    }

    fn create_shader(&self, shader_type: GLenum) -> GLuint {
        self.gl.create_shader(shader_type)
    }

    fn delete_shader(&self, shader: GLuint) {
        self.gl.delete_shader(shader)
    }

    fn shader_source(&self, shader: GLuint, strings: &[&[u8]]) {
        self.gl.shader_source(shader, strings)
    }

    fn compile_shader(&self, shader: GLuint) {
        self.gl.compile_shader(shader)
    }

    fn get_shader_iv(&self, shader: GLuint, pname: GLenum) -> GLint {
        let mut result = [0];
        unsafe { self.gl.get_shader_iv(shader, pname, &mut result) };
        result[0]
    }

    fn get_shader_info_log(&self, shader: GLuint) -> String {
        self.gl.get_shader_info_log(shader)
    }

    fn create_program(&self) -> GLuint {
        self.gl.create_program()
    }

    fn delete_program(&self, program: GLuint) {
        self.gl.delete_program(program)
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        self.gl.attach_shader(program, shader)
    }

    fn detach_shader(&self, program: GLuint, shader: GLuint) {
        self.gl.detach_shader(program, shader)
    }

    fn link_program(&self, program: GLuint) {
        self.gl.link_program(program)
    }

    fn validate_program(&self, program: GLuint) {
        self.gl.validate_program(program)
    }

    fn use_program(&self, program: GLuint) {
        self.gl.use_program(program)
    }

    fn get_program_iv(&self, program: GLuint, pname: GLenum) -> GLint {
        let mut result = [0];
        unsafe { self.gl.get_program_iv(program, pname, &mut result) };
        result[0]
    }

    fn get_program_info_log(&self, program: GLuint) -> String {
        self.gl.get_program_info_log(program)
    }

    fn get_uniform_location(&self, program: GLuint, name: &str) -> GLint {
        self.gl.get_uniform_location(program, name)
    }

    fn get_attrib_location(&self, program: GLuint, name: &str) -> GLint {
        self.gl.get_attrib_location(program, name)
    }

    fn bind_attrib_location(&self, program: GLuint, index: GLuint, name: &str) {
        self.gl.bind_attrib_location(program, index, name)
    }

    fn uniform_1f(&self, location: GLint, v0: GLfloat) {
        self.gl.uniform_1f(location, v0)
    }

    fn uniform_2f(&self, location: GLint, v0: GLfloat, v1: GLfloat) {
        self.gl.uniform_2f(location, v0, v1)
    }

    fn uniform_3f(&self, location: GLint, v0: GLfloat, v1: GLfloat, v2: GLfloat) {
        self.gl.uniform_3f(location, v0, v1, v2)
    }

    fn uniform_4f(&self, location: GLint, x: GLfloat, y: GLfloat, z: GLfloat, w: GLfloat) {
        self.gl.uniform_4f(location, x, y, z, w)
    }

    fn uniform_1i(&self, location: GLint, v0: GLint) {
        self.gl.uniform_1i(location, v0)
    }

    fn uniform_2i(&self, location: GLint, v0: GLint, v1: GLint) {
        self.gl.uniform_2i(location, v0, v1)
    }

    fn uniform_3i(&self, location: GLint, v0: GLint, v1: GLint, v2: GLint) {
        self.gl.uniform_3i(location, v0, v1, v2)
    }

    fn uniform_4i(&self, location: GLint, x: GLint, y: GLint, z: GLint, w: GLint) {
        self.gl.uniform_4i(location, x, y, z, w)
    }

    fn uniform_1ui(&self, location: GLint, v0: GLuint) {
        self.gl.uniform_1ui(location, v0)
    }

    fn uniform_2ui(&self, location: GLint, v0: GLuint, v1: GLuint) {
        self.gl.uniform_2ui(location, v0, v1)
    }

    fn uniform_3ui(&self, location: GLint, v0: GLuint, v1: GLuint, v2: GLuint) {
        self.gl.uniform_3ui(location, v0, v1, v2)
    }

    fn uniform_4ui(&self, location: GLint, x: GLuint, y: GLuint, z: GLuint, w: GLuint) {
        self.gl.uniform_4ui(location, x, y, z, w)
    }

    fn uniform_matrix_2fv(&self, location: GLint, transpose: bool, value: &[f32]) {
        self.gl.uniform_matrix_2fv(location, transpose, value)
    }

    fn uniform_matrix_3fv(&self, location: GLint, transpose: bool, value: &[f32]) {
        self.gl.uniform_matrix_3fv(location, transpose, value)
    }

    fn uniform_matrix_4fv(&self, location: GLint, transpose: bool, value: &[f32]) {
        self.gl.uniform_matrix_4fv(location, transpose, value)
    }

    fn get_uniform_fv(&self, program: GLuint, location: GLint, result: &mut [GLfloat]) {
        unsafe { gl::GetUniformfv(program, location, result.as_mut_ptr()) }
    }

    fn get_uniform_iv(&self, program: GLuint, location: GLint, result: &mut [GLint]) {
        unsafe { gl::GetUniformiv(program, location, result.as_mut_ptr()) }
    }

    fn get_uniform_uiv(&self, program: GLuint, location: GLint, result: &mut [GLuint]) {
        unsafe { gl::GetUniformuiv(program, location, result.as_mut_ptr()) }
    }

    fn enable(&self, cap: GLenum) {
        self.gl.enable(cap)
    }

    fn disable(&self, cap: GLenum) {
        self.gl.disable(cap)
    }

    fn blend_func(&self, sfactor: GLenum, dfactor: GLenum) {
        self.gl.blend_func(sfactor, dfactor)
    }

    fn blend_func_separate(&self, src_rgb: GLenum, dest_rgb: GLenum,
                           src_alpha: GLenum, dest_alpha: GLenum) {
        self.gl.blend_func_separate(src_rgb, dest_rgb, src_alpha, dest_alpha)
    }

    fn blend_equation(&self, mode: GLenum) {
        self.gl.blend_equation(mode)
    }

    fn blend_equation_separate(&self, mode_rgb: GLenum, mode_alpha: GLenum) {
        self.gl.blend_equation_separate(mode_rgb, mode_alpha)
    }

    fn blend_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.gl.blend_color(r, g, b, a)
    }

    fn depth_func(&self, func: GLenum) {
        self.gl.depth_func(func)
    }

    fn depth_mask(&self, flag: bool) {
        self.gl.depth_mask(flag)
    }

    fn depth_range(&self, near: f64, far: f64) {
        self.gl.depth_range(near, far)
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.gl.clear_color(r, g, b, a)
    }

    fn clear_depth(&self, depth: f64) {
        self.gl.clear_depth(depth)
    }

    fn clear_stencil(&self, s: GLint) {
        self.gl.clear_stencil(s)
    }

    fn clear(&self, buffer_mask: GLbitfield) {
        self.gl.clear(buffer_mask)
    }

    fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        self.gl.viewport(x, y, width, height)
    }

    fn scissor(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        self.gl.scissor(x, y, width, height)
    }

    fn cull_face(&self, mode: GLenum) {
        self.gl.cull_face(mode)
    }

    fn front_face(&self, mode: GLenum) {
        self.gl.front_face(mode)
    }

    fn polygon_offset(&self, factor: GLfloat, units: GLfloat) {
        self.gl.polygon_offset(factor, units)
    }

    fn line_width(&self, width: GLfloat) {
        self.gl.line_width(width)
    }

    fn color_mask(&self, r: bool, g: bool, b: bool, a: bool) {
        self.gl.color_mask(r, g, b, a)
    }

    fn stencil_func(&self, func: GLenum, ref_: GLint, mask: GLuint) {
        self.gl.stencil_func(func, ref_, mask)
    }

    fn stencil_op(&self, sfail: GLenum, dpfail: GLenum, dppass: GLenum) {
        self.gl.stencil_op(sfail, dpfail, dppass)
    }

    fn stencil_mask(&self, mask: GLuint) {
        self.gl.stencil_mask(mask)
    }

    fn stencil_func_separate(&self, face: GLenum, func: GLenum, ref_: GLint, mask: GLuint) {
        self.gl.stencil_func_separate(face, func, ref_, mask)
    }

    fn stencil_op_separate(&self, face: GLenum, sfail: GLenum, dpfail: GLenum, dppass: GLenum) {
        self.gl.stencil_op_separate(face, sfail, dpfail, dppass)
    }

    fn stencil_mask_separate(&self, face: GLenum, mask: GLuint) {
        self.gl.stencil_mask_separate(face, mask)
    }

    fn polygon_mode(&self, face: GLenum, mode: GLenum) {
        unsafe { gl::PolygonMode(face, mode) }
    }

    fn point_size(&self, size: GLfloat) {
        unsafe { gl::PointSize(size) }
    }

    fn provoking_vertex(&self, mode: GLenum) {
        unsafe { gl::ProvokingVertex(mode) }
    }

    fn logic_op(&self, opcode: GLenum) {
        unsafe { gl::LogicOp(opcode) }
    }

    fn hint(&self, target: GLenum, mode: GLenum) {
        self.gl.hint(target, mode)
    }

    fn enable_i(&self, cap: GLenum, index: GLuint) {
        unsafe { gl::Enablei(cap, index) }
    }

    fn disable_i(&self, cap: GLenum, index: GLuint) {
        unsafe { gl::Disablei(cap, index) }
    }

    fn is_enabled_i(&self, cap: GLenum, index: GLuint) -> GLboolean {
        unsafe { gl::IsEnabledi(cap, index) }
    }

    fn blend_func_i(&self, buf: GLuint, src: GLenum, dst: GLenum) {
        unsafe { gl::BlendFunci(buf, src, dst) }
    }

    fn color_mask_i(&self, buf: GLuint, r: bool, g: bool, b: bool, a: bool) {
        unsafe { gl::ColorMaski(buf, gl_bool(r), gl_bool(g), gl_bool(b), gl_bool(a)) }
    }

    fn primitive_restart_index(&self, index: GLuint) {
        unsafe { gl::PrimitiveRestartIndex(index) }
    }

    fn memory_barrier(&self, barriers: GLbitfield) {
        unsafe { gl::MemoryBarrier(barriers) }
    }

    fn flush(&self) {
        self.gl.flush()
    }

    fn finish(&self) {
        self.gl.finish()
    }

    fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei) {
        self.gl.draw_arrays(mode, first, count)
    }

    fn draw_arrays_instanced(&self, mode: GLenum, first: GLint, count: GLsizei,
                             primcount: GLsizei) {
        self.gl.draw_arrays_instanced(mode, first, count, primcount)
    }

    fn draw_elements(&self, mode: GLenum, count: GLsizei, element_type: GLenum,
                     indices_offset: GLuint) {
        self.gl.draw_elements(mode, count, element_type, indices_offset)
    }

    fn draw_elements_instanced(&self, mode: GLenum, count: GLsizei, element_type: GLenum,
                               indices_offset: GLuint, primcount: GLsizei) {
        self.gl.draw_elements_instanced(mode, count, element_type, indices_offset, primcount)
    }

    fn draw_range_elements(&self, mode: GLenum, start: GLuint, end: GLuint, count: GLsizei,
                           element_type: GLenum, indices_offset: GLuint) {
        unsafe {
            gl::DrawRangeElements(mode, start, end, count, element_type,
                                  offset_ptr(indices_offset))
        }
    }

    fn draw_elements_base_vertex(&self, mode: GLenum, count: GLsizei, element_type: GLenum,
                                 indices_offset: GLuint, base_vertex: GLint) {
        unsafe {
            gl::DrawElementsBaseVertex(mode, count, element_type, offset_ptr(indices_offset),
                                       base_vertex)
        }
    }

    fn draw_range_elements_base_vertex(&self, mode: GLenum, start: GLuint, end: GLuint,
                                       count: GLsizei, element_type: GLenum,
                                       indices_offset: GLuint, base_vertex: GLint) {
        unsafe {
            gl::DrawRangeElementsBaseVertex(mode, start, end, count, element_type,
                                            offset_ptr(indices_offset), base_vertex)
        }
    }

    fn draw_elements_instanced_base_vertex(&self, mode: GLenum, count: GLsizei,
                                           element_type: GLenum, indices_offset: GLuint,
                                           primcount: GLsizei, base_vertex: GLint) {
        unsafe {
            gl::DrawElementsInstancedBaseVertex(mode, count, element_type,
                                                offset_ptr(indices_offset), primcount,
                                                base_vertex)
        }
    }

    fn dispatch_compute(&self, x: GLuint, y: GLuint, z: GLuint) {
        unsafe { gl::DispatchCompute(x, y, z) }
    }
}
