//! A `Driver` that records the calls made through it.
//!
//! `Recorder` wraps another driver, forwards every call to it, and appends a
//! `Call` describing each call with an effect on GL state to a `CallStream`.
//! Tests use it to check exactly which GL calls a wrapper operation makes.

use gleam::gl::{GLbitfield, GLboolean, GLenum, GLfloat, GLint, GLintptr, GLsizei,
                GLsizeiptr, GLuint, GLuint64};
use std::cell::RefCell;
use std::os::raw::c_void;
use std::rc::Rc;
use std::sync;

use crate::call::Call;
use crate::driver::{Driver, EntryPoint};

/// Somewhere to put recorded calls.
pub trait CallStream {
    fn write_call(&mut self, call: Call);
}

impl CallStream for Vec<Call> {
    fn write_call(&mut self, call: Call) {
        self.push(call);
    }
}

/// A stream shared with the code inspecting it.
impl CallStream for Rc<RefCell<Vec<Call>>> {
    fn write_call(&mut self, call: Call) {
        self.borrow_mut().push(call);
    }
}

/// An implementation of `Driver` that records method calls.
pub struct Recorder<D, S> {
    /// The driver calls to which we are recording.
    inner: D,

    /// The stream to which we record calls to `inner`.
    call_stream: sync::Mutex<S>,
}

impl<D, S> Recorder<D, S> {
    pub fn new(inner: D, call_stream: S) -> Recorder<D, S> {
        Recorder {
            inner,
            call_stream: sync::Mutex::new(call_stream),
        }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    pub fn lock_call_stream(&self) -> sync::MutexGuard<'_, S> {
        // A panic while recording leaves the stream usable: a `Call` is
        // pushed whole or not at all.
        self.call_stream.lock().unwrap_or_else(sync::PoisonError::into_inner)
    }

    pub fn into_call_stream(self) -> S {
        self.call_stream.into_inner().unwrap_or_else(sync::PoisonError::into_inner)
    }
}

/// A `Driver` method parameter type, and how it appears in a `Call`.
///
/// - `u32`, `f32` and the like appear in the `Call` as themselves.
///
/// - Borrowed data like `str` and `[T]` is copied into an owned `String` or
///   `Vec`, since the `Call` must outlive the borrow.
trait Parameter {
    type InCall;

    fn to_call(&self) -> Self::InCall;
}

macro_rules! simple_parameter_types {
    ( $( $type:ty ),* ) => {
        $(
            impl Parameter for $type {
                type InCall = Self;
                fn to_call(&self) -> Self {
                    *self
                }
            }
        )*
    }
}

// These types appear as themselves in `Call`. This covers `GLenum`, `GLint`,
// and friends.
simple_parameter_types!(bool, u8, u32, i32, u64, f32, f64, isize, usize);

impl Parameter for str {
    type InCall = String;

    fn to_call(&self) -> String {
        self.to_string()
    }
}

impl<T: Parameter> Parameter for [T] {
    type InCall = Vec<T::InCall>;

    fn to_call(&self) -> Self::InCall {
        self.iter().map(Parameter::to_call).collect()
    }
}

impl<T: Parameter> Parameter for Vec<T> {
    type InCall = Vec<T::InCall>;

    fn to_call(&self) -> Self::InCall {
        self[..].to_call()
    }
}

/// A parameter of type `&T` is recorded just as a parameter of type `T`.
impl<T: Parameter + ?Sized> Parameter for &T {
    type InCall = T::InCall;

    fn to_call(&self) -> Self::InCall {
        (**self).to_call()
    }
}

impl<T: Parameter> Parameter for Option<T> {
    type InCall = Option<T::InCall>;

    fn to_call(&self) -> Self::InCall {
        self.as_ref().map(Parameter::to_call)
    }
}

/// General form of call that has no side effects, and hence doesn't need to be
/// recorded.
macro_rules! no_side_effect {
    ($self:ident . $method:ident ( $( $arg:ident ),* )) => {
        {
            $self .inner. $method ( $( $arg ),* )
        }
    }
}

/// General form of a recorded call. Always makes the call, and returns its value.
macro_rules! general {
    (
        let $returned:ident = $self:ident . $method:ident ( $( $arg:ident ),* );
        $call:expr
    ) => {
        {
            let $returned = $self .inner. $method ( $( $arg ),* );
            let call = $call;
            $self .lock_call_stream().write_call(call);
            $returned
        }
    }
}

macro_rules! simple {
    ($self:ident . $method:ident ( $( $arg:ident ),* )) => {
        general! {
            let returned = $self . $method ( $( $arg ),* );
            Call:: $method {
                $(
                    $arg : $arg .to_call()
                ),*
            }
        }
    }
}

macro_rules! simple_with_return_value {
    ($self:ident . $method:ident ( $( $arg:ident ),* )) => {
        general! {
            let returned = $self . $method ( $( $arg ),* );
            Call:: $method {
                $( $arg : $arg .to_call(), )*
                returned: returned.to_call()
            }
        }
    }
}

impl<D, S> Driver for Recorder<D, S>
where
    D: Driver,
    S: CallStream,
{
    fn has_entry_point(&self, entry: EntryPoint) -> bool {
        self.inner.has_entry_point(entry)
    }

    fn get_error(&self) -> GLenum {
        no_side_effect!(self.get_error())
    }

    fn get_string(&self, which: GLenum) -> String {
        no_side_effect!(self.get_string(which))
    }

    fn get_string_i(&self, which: GLenum, index: GLuint) -> String {
        no_side_effect!(self.get_string_i(which, index))
    }

    fn get_integer_v(&self, name: GLenum, result: &mut [GLint]) {
        no_side_effect!(self.get_integer_v(name, result))
    }

    fn get_integer_iv(&self, name: GLenum, index: GLuint, result: &mut [GLint]) {
        no_side_effect!(self.get_integer_iv(name, index, result))
    }

    fn get_float_v(&self, name: GLenum, result: &mut [GLfloat]) {
        no_side_effect!(self.get_float_v(name, result))
    }

    fn is_enabled(&self, cap: GLenum) -> GLboolean {
        no_side_effect!(self.is_enabled(cap))
    }

    fn gen_buffers(&self, n: GLsizei) -> Vec<GLuint> {
        simple_with_return_value!(self.gen_buffers(n))
    }

    fn delete_buffers(&self, buffers: &[GLuint]) {
        simple!(self.delete_buffers(buffers))
    }

    fn bind_buffer(&self, target: GLenum, buffer: GLuint) {
        simple!(self.bind_buffer(target, buffer))
    }

    fn bind_buffer_base(&self, target: GLenum, index: GLuint, buffer: GLuint) {
        simple!(self.bind_buffer_base(target, index, buffer))
    }

    fn bind_buffer_range(&self, target: GLenum, index: GLuint, buffer: GLuint,
                         offset: GLintptr, size: GLsizeiptr) {
        simple!(self.bind_buffer_range(target, index, buffer, offset, size))
    }

    fn buffer_data(&self, target: GLenum, size: GLsizeiptr, data: Option<&[u8]>, usage: GLenum) {
        simple!(self.buffer_data(target, size, data, usage))
    }

    fn buffer_sub_data(&self, target: GLenum, offset: GLintptr, data: &[u8]) {
        simple!(self.buffer_sub_data(target, offset, data))
    }

    fn get_buffer_parameter_iv(&self, target: GLenum, pname: GLenum) -> GLint {
        no_side_effect!(self.get_buffer_parameter_iv(target, pname))
    }

    fn map_buffer_range(&self, target: GLenum, offset: GLintptr, length: GLsizeiptr,
                        access: GLbitfield) -> *mut c_void {
        simple!(self.map_buffer_range(target, offset, length, access))
    }

    fn unmap_buffer(&self, target: GLenum) -> GLboolean {
        simple!(self.unmap_buffer(target))
    }

    fn gen_textures(&self, n: GLsizei) -> Vec<GLuint> {
        simple_with_return_value!(self.gen_textures(n))
    }

    fn delete_textures(&self, textures: &[GLuint]) {
        simple!(self.delete_textures(textures))
    }

    fn active_texture(&self, texture: GLenum) {
        simple!(self.active_texture(texture))
    }

    fn bind_texture(&self, target: GLenum, texture: GLuint) {
        simple!(self.bind_texture(target, texture))
    }

    fn tex_image_1d(&self, target: GLenum, level: GLint, internal_format: GLint,
                    width: GLsizei, border: GLint, format: GLenum, ty: GLenum,
                    opt_data: Option<&[u8]>) {
        simple!(self.tex_image_1d(target, level, internal_format, width, border, format, ty,
                                  opt_data))
    }

    fn tex_image_2d(&self, target: GLenum, level: GLint, internal_format: GLint,
                    width: GLsizei, height: GLsizei, border: GLint, format: GLenum,
                    ty: GLenum, opt_data: Option<&[u8]>) {
        simple!(self.tex_image_2d(target, level, internal_format, width, height, border,
                                  format, ty, opt_data))
    }

    fn tex_image_3d(&self, target: GLenum, level: GLint, internal_format: GLint,
                    width: GLsizei, height: GLsizei, depth: GLsizei, border: GLint,
                    format: GLenum, ty: GLenum, opt_data: Option<&[u8]>) {
        simple!(self.tex_image_3d(target, level, internal_format, width, height, depth,
                                  border, format, ty, opt_data))
    }

    fn tex_sub_image_1d(&self, target: GLenum, level: GLint, xoffset: GLint, width: GLsizei,
                        format: GLenum, ty: GLenum, data: &[u8]) {
        simple!(self.tex_sub_image_1d(target, level, xoffset, width, format, ty, data))
    }

    fn tex_sub_image_2d(&self, target: GLenum, level: GLint, xoffset: GLint, yoffset: GLint,
                        width: GLsizei, height: GLsizei, format: GLenum, ty: GLenum,
                        data: &[u8]) {
        simple!(self.tex_sub_image_2d(target, level, xoffset, yoffset, width, height, format,
                                      ty, data))
    }

    fn tex_sub_image_3d(&self, target: GLenum, level: GLint, xoffset: GLint, yoffset: GLint,
                        zoffset: GLint, width: GLsizei, height: GLsizei, depth: GLsizei,
                        format: GLenum, ty: GLenum, data: &[u8]) {
        simple!(self.tex_sub_image_3d(target, level, xoffset, yoffset, zoffset, width, height,
                                      depth, format, ty, data))
    }

    fn tex_storage_2d(&self, target: GLenum, levels: GLint, internal_format: GLenum,
                      width: GLsizei, height: GLsizei) {
        simple!(self.tex_storage_2d(target, levels, internal_format, width, height))
    }

    fn tex_storage_3d(&self, target: GLenum, levels: GLint, internal_format: GLenum,
                      width: GLsizei, height: GLsizei, depth: GLsizei) {
        simple!(self.tex_storage_3d(target, levels, internal_format, width, height, depth))
    }

    fn tex_parameter_i(&self, target: GLenum, pname: GLenum, param: GLint) {
        simple!(self.tex_parameter_i(target, pname, param))
    }

    fn tex_parameter_f(&self, target: GLenum, pname: GLenum, param: GLfloat) {
        simple!(self.tex_parameter_f(target, pname, param))
    }

    fn tex_parameter_iv(&self, target: GLenum, pname: GLenum, params: &[GLint]) {
        simple!(self.tex_parameter_iv(target, pname, params))
    }

    fn tex_parameter_fv(&self, target: GLenum, pname: GLenum, params: &[GLfloat]) {
        simple!(self.tex_parameter_fv(target, pname, params))
    }

    fn get_tex_parameter_iv(&self, target: GLenum, pname: GLenum) -> GLint {
        no_side_effect!(self.get_tex_parameter_iv(target, pname))
    }

    fn get_tex_parameter_fv(&self, target: GLenum, pname: GLenum) -> GLfloat {
        no_side_effect!(self.get_tex_parameter_fv(target, pname))
    }

    fn get_tex_level_parameter_iv(&self, target: GLenum, level: GLint, pname: GLenum) -> GLint {
        no_side_effect!(self.get_tex_level_parameter_iv(target, level, pname))
    }

    fn generate_mipmap(&self, target: GLenum) {
        simple!(self.generate_mipmap(target))
    }

    fn tex_buffer(&self, target: GLenum, internal_format: GLenum, buffer: GLuint) {
        simple!(self.tex_buffer(target, internal_format, buffer))
    }

    fn get_tex_image_into_buffer(&self, target: GLenum, level: GLint, format: GLenum,
                                 ty: GLenum, output: &mut [u8]) {
        no_side_effect!(self.get_tex_image_into_buffer(target, level, format, ty, output))
    }

    fn pixel_store_i(&self, name: GLenum, param: GLint) {
        simple!(self.pixel_store_i(name, param))
    }

    fn get_texture_handle(&self, texture: GLuint) -> GLuint64 {
        simple_with_return_value!(self.get_texture_handle(texture))
    }

    fn make_texture_handle_resident(&self, handle: GLuint64) {
        simple!(self.make_texture_handle_resident(handle))
    }

    fn make_texture_handle_non_resident(&self, handle: GLuint64) {
        simple!(self.make_texture_handle_non_resident(handle))
    }

    fn gen_framebuffers(&self, n: GLsizei) -> Vec<GLuint> {
        simple_with_return_value!(self.gen_framebuffers(n))
    }

    fn delete_framebuffers(&self, framebuffers: &[GLuint]) {
        simple!(self.delete_framebuffers(framebuffers))
    }

    fn bind_framebuffer(&self, target: GLenum, framebuffer: GLuint) {
        simple!(self.bind_framebuffer(target, framebuffer))
    }

    fn framebuffer_texture_2d(&self, target: GLenum, attachment: GLenum, textarget: GLenum,
                              texture: GLuint, level: GLint) {
        simple!(self.framebuffer_texture_2d(target, attachment, textarget, texture, level))
    }

    fn framebuffer_texture_layer(&self, target: GLenum, attachment: GLenum, texture: GLuint,
                                 level: GLint, layer: GLint) {
        simple!(self.framebuffer_texture_layer(target, attachment, texture, level, layer))
    }

    fn framebuffer_renderbuffer(&self, target: GLenum, attachment: GLenum,
                                renderbuffertarget: GLenum, renderbuffer: GLuint) {
        simple!(self.framebuffer_renderbuffer(target, attachment, renderbuffertarget,
                                              renderbuffer))
    }

    fn check_frame_buffer_status(&self, target: GLenum) -> GLenum {
        no_side_effect!(self.check_frame_buffer_status(target))
    }

    fn draw_buffers(&self, bufs: &[GLenum]) {
        simple!(self.draw_buffers(bufs))
    }

    fn read_buffer(&self, mode: GLenum) {
        simple!(self.read_buffer(mode))
    }

    fn read_pixels(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei,
                   format: GLenum, ty: GLenum, output: &mut [u8]) {
        no_side_effect!(self.read_pixels(x, y, width, height, format, ty, output))
    }

    fn blit_framebuffer(&self, src_x0: GLint, src_y0: GLint, src_x1: GLint, src_y1: GLint,
                        dst_x0: GLint, dst_y0: GLint, dst_x1: GLint, dst_y1: GLint,
                        mask: GLbitfield, filter: GLenum) {
        simple!(self.blit_framebuffer(src_x0, src_y0, src_x1, src_y1,
                                      dst_x0, dst_y0, dst_x1, dst_y1, mask, filter))
    }

    fn gen_renderbuffers(&self, n: GLsizei) -> Vec<GLuint> {
        simple_with_return_value!(self.gen_renderbuffers(n))
    }

    fn delete_renderbuffers(&self, renderbuffers: &[GLuint]) {
        simple!(self.delete_renderbuffers(renderbuffers))
    }

    fn bind_renderbuffer(&self, target: GLenum, renderbuffer: GLuint) {
        simple!(self.bind_renderbuffer(target, renderbuffer))
    }

    fn renderbuffer_storage(&self, target: GLenum, internalformat: GLenum,
                            width: GLsizei, height: GLsizei) {
        simple!(self.renderbuffer_storage(target, internalformat, width, height))
    }

    fn renderbuffer_storage_multisample(&self, target: GLenum, samples: GLsizei,
                                        internalformat: GLenum, width: GLsizei, height: GLsizei) {
        simple!(self.renderbuffer_storage_multisample(target, samples, internalformat,
                                                      width, height))
    }

    fn gen_transform_feedbacks(&self, n: GLsizei) -> Vec<GLuint> {
        simple_with_return_value!(self.gen_transform_feedbacks(n))
    }

    fn delete_transform_feedbacks(&self, ids: &[GLuint]) {
        simple!(self.delete_transform_feedbacks(ids))
    }

    fn bind_transform_feedback(&self, target: GLenum, id: GLuint) {
        simple!(self.bind_transform_feedback(target, id))
    }

    fn begin_transform_feedback(&self, primitive_mode: GLenum) {
        simple!(self.begin_transform_feedback(primitive_mode))
    }

    fn end_transform_feedback(&self) {
        simple!(self.end_transform_feedback())
    }

    fn pause_transform_feedback(&self) {
        simple!(self.pause_transform_feedback())
    }

    fn resume_transform_feedback(&self) {
        simple!(self.resume_transform_feedback())
    }

    fn transform_feedback_varyings(&self, program: GLuint, varyings: &[&str], buffer_mode: GLenum) {
        simple!(self.transform_feedback_varyings(program, varyings, buffer_mode))
    }

    fn gen_vertex_arrays(&self, n: GLsizei) -> Vec<GLuint> {
        simple_with_return_value!(self.gen_vertex_arrays(n))
    }

    fn delete_vertex_arrays(&self, vertex_arrays: &[GLuint]) {
        simple!(self.delete_vertex_arrays(vertex_arrays))
    }

    fn bind_vertex_array(&self, vao: GLuint) {
        simple!(self.bind_vertex_array(vao))
    }

    fn vertex_attrib_pointer(&self, index: GLuint, size: GLint, type_: GLenum,
                             normalized: bool, stride: GLsizei, offset: GLuint) {
        simple!(self.vertex_attrib_pointer(index, size, type_, normalized, stride, offset))
    }

    fn vertex_attrib_i_pointer(&self, index: GLuint, size: GLint, type_: GLenum,
                               stride: GLsizei, offset: GLuint) {
        simple!(self.vertex_attrib_i_pointer(index, size, type_, stride, offset))
    }

    fn vertex_attrib_l_pointer(&self, index: GLuint, size: GLint, type_: GLenum,
                               stride: GLsizei, offset: GLuint) {
        simple!(self.vertex_attrib_l_pointer(index, size, type_, stride, offset))
    }

    fn vertex_attrib_divisor(&self, index: GLuint, divisor: GLuint) {
        simple!(self.vertex_attrib_divisor(index, divisor))
    }

    fn enable_vertex_attrib_array(&self, index: GLuint) {
        simple!(self.enable_vertex_attrib_array(index))
    }

    fn disable_vertex_attrib_array(&self, index: GLuint) {
        simple!(self.disable_vertex_attrib_array(index))
    }

    fn vertex_attrib_4f(&self, index: GLuint, x: GLfloat, y: GLfloat, z: GLfloat, w: GLfloat) {
        simple!(self.vertex_attrib_4f(index, x, y, z, w))
    }

    fn create_shader(&self, shader_type: GLenum) -> GLuint {
        simple_with_return_value!(self.create_shader(shader_type))
    }

    fn delete_shader(&self, shader: GLuint) {
        simple!(self.delete_shader(shader))
    }

    fn shader_source(&self, shader: GLuint, strings: &[&[u8]]) {
        simple!(self.shader_source(shader, strings))
    }

    fn compile_shader(&self, shader: GLuint) {
        simple!(self.compile_shader(shader))
    }

    fn get_shader_iv(&self, shader: GLuint, pname: GLenum) -> GLint {
        no_side_effect!(self.get_shader_iv(shader, pname))
    }

    fn get_shader_info_log(&self, shader: GLuint) -> String {
        no_side_effect!(self.get_shader_info_log(shader))
    }

    fn create_program(&self) -> GLuint {
        simple_with_return_value!(self.create_program())
    }

    fn delete_program(&self, program: GLuint) {
        simple!(self.delete_program(program))
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        simple!(self.attach_shader(program, shader))
    }

    fn detach_shader(&self, program: GLuint, shader: GLuint) {
        simple!(self.detach_shader(program, shader))
    }

    fn link_program(&self, program: GLuint) {
        simple!(self.link_program(program))
    }

    fn validate_program(&self, program: GLuint) {
        simple!(self.validate_program(program))
    }

    fn use_program(&self, program: GLuint) {
        simple!(self.use_program(program))
    }

    fn get_program_iv(&self, program: GLuint, pname: GLenum) -> GLint {
        no_side_effect!(self.get_program_iv(program, pname))
    }

    fn get_program_info_log(&self, program: GLuint) -> String {
        no_side_effect!(self.get_program_info_log(program))
    }

    fn get_uniform_location(&self, program: GLuint, name: &str) -> GLint {
        no_side_effect!(self.get_uniform_location(program, name))
    }

    fn get_attrib_location(&self, program: GLuint, name: &str) -> GLint {
        no_side_effect!(self.get_attrib_location(program, name))
    }

    fn bind_attrib_location(&self, program: GLuint, index: GLuint, name: &str) {
        simple!(self.bind_attrib_location(program, index, name))
    }

    fn uniform_1f(&self, location: GLint, v0: GLfloat) {
        simple!(self.uniform_1f(location, v0))
    }

    fn uniform_2f(&self, location: GLint, v0: GLfloat, v1: GLfloat) {
        simple!(self.uniform_2f(location, v0, v1))
    }

    fn uniform_3f(&self, location: GLint, v0: GLfloat, v1: GLfloat, v2: GLfloat) {
        simple!(self.uniform_3f(location, v0, v1, v2))
    }

    fn uniform_4f(&self, location: GLint, x: GLfloat, y: GLfloat, z: GLfloat, w: GLfloat) {
        simple!(self.uniform_4f(location, x, y, z, w))
    }

    fn uniform_1i(&self, location: GLint, v0: GLint) {
        simple!(self.uniform_1i(location, v0))
    }

    fn uniform_2i(&self, location: GLint, v0: GLint, v1: GLint) {
        simple!(self.uniform_2i(location, v0, v1))
    }

    fn uniform_3i(&self, location: GLint, v0: GLint, v1: GLint, v2: GLint) {
        simple!(self.uniform_3i(location, v0, v1, v2))
    }

    fn uniform_4i(&self, location: GLint, x: GLint, y: GLint, z: GLint, w: GLint) {
        simple!(self.uniform_4i(location, x, y, z, w))
    }

    fn uniform_1ui(&self, location: GLint, v0: GLuint) {
        simple!(self.uniform_1ui(location, v0))
    }

    fn uniform_2ui(&self, location: GLint, v0: GLuint, v1: GLuint) {
        simple!(self.uniform_2ui(location, v0, v1))
    }

    fn uniform_3ui(&self, location: GLint, v0: GLuint, v1: GLuint, v2: GLuint) {
        simple!(self.uniform_3ui(location, v0, v1, v2))
    }

    fn uniform_4ui(&self, location: GLint, x: GLuint, y: GLuint, z: GLuint, w: GLuint) {
        simple!(self.uniform_4ui(location, x, y, z, w))
    }

    fn uniform_matrix_2fv(&self, location: GLint, transpose: bool, value: &[f32]) {
        simple!(self.uniform_matrix_2fv(location, transpose, value))
    }

    fn uniform_matrix_3fv(&self, location: GLint, transpose: bool, value: &[f32]) {
        simple!(self.uniform_matrix_3fv(location, transpose, value))
    }

    fn uniform_matrix_4fv(&self, location: GLint, transpose: bool, value: &[f32]) {
        simple!(self.uniform_matrix_4fv(location, transpose, value))
    }

    fn get_uniform_fv(&self, program: GLuint, location: GLint, result: &mut [GLfloat]) {
        no_side_effect!(self.get_uniform_fv(program, location, result))
    }

    fn get_uniform_iv(&self, program: GLuint, location: GLint, result: &mut [GLint]) {
        no_side_effect!(self.get_uniform_iv(program, location, result))
    }

    fn get_uniform_uiv(&self, program: GLuint, location: GLint, result: &mut [GLuint]) {
        no_side_effect!(self.get_uniform_uiv(program, location, result))
    }

    fn enable(&self, cap: GLenum) {
        simple!(self.enable(cap))
    }

    fn disable(&self, cap: GLenum) {
        simple!(self.disable(cap))
    }

    fn blend_func(&self, sfactor: GLenum, dfactor: GLenum) {
        simple!(self.blend_func(sfactor, dfactor))
    }

    fn blend_func_separate(&self, src_rgb: GLenum, dest_rgb: GLenum,
                           src_alpha: GLenum, dest_alpha: GLenum) {
        simple!(self.blend_func_separate(src_rgb, dest_rgb, src_alpha, dest_alpha))
    }

    fn blend_equation(&self, mode: GLenum) {
        simple!(self.blend_equation(mode))
    }

    fn blend_equation_separate(&self, mode_rgb: GLenum, mode_alpha: GLenum) {
        simple!(self.blend_equation_separate(mode_rgb, mode_alpha))
    }

    fn blend_color(&self, r: f32, g: f32, b: f32, a: f32) {
        simple!(self.blend_color(r, g, b, a))
    }

    fn depth_func(&self, func: GLenum) {
        simple!(self.depth_func(func))
    }

    fn depth_mask(&self, flag: bool) {
        simple!(self.depth_mask(flag))
    }

    fn depth_range(&self, near: f64, far: f64) {
        simple!(self.depth_range(near, far))
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        simple!(self.clear_color(r, g, b, a))
    }

    fn clear_depth(&self, depth: f64) {
        simple!(self.clear_depth(depth))
    }

    fn clear_stencil(&self, s: GLint) {
        simple!(self.clear_stencil(s))
    }

    fn clear(&self, buffer_mask: GLbitfield) {
        simple!(self.clear(buffer_mask))
    }

    fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        simple!(self.viewport(x, y, width, height))
    }

    fn scissor(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        simple!(self.scissor(x, y, width, height))
    }

    fn cull_face(&self, mode: GLenum) {
        simple!(self.cull_face(mode))
    }

    fn front_face(&self, mode: GLenum) {
        simple!(self.front_face(mode))
    }

    fn polygon_offset(&self, factor: GLfloat, units: GLfloat) {
        simple!(self.polygon_offset(factor, units))
    }

    fn line_width(&self, width: GLfloat) {
        simple!(self.line_width(width))
    }

    fn color_mask(&self, r: bool, g: bool, b: bool, a: bool) {
        simple!(self.color_mask(r, g, b, a))
    }

    fn stencil_func(&self, func: GLenum, ref_: GLint, mask: GLuint) {
        simple!(self.stencil_func(func, ref_, mask))
    }

    fn stencil_op(&self, sfail: GLenum, dpfail: GLenum, dppass: GLenum) {
        simple!(self.stencil_op(sfail, dpfail, dppass))
    }

    fn stencil_mask(&self, mask: GLuint) {
        simple!(self.stencil_mask(mask))
    }

    fn stencil_func_separate(&self, face: GLenum, func: GLenum, ref_: GLint, mask: GLuint) {
        simple!(self.stencil_func_separate(face, func, ref_, mask))
    }

    fn stencil_op_separate(&self, face: GLenum, sfail: GLenum, dpfail: GLenum, dppass: GLenum) {
        simple!(self.stencil_op_separate(face, sfail, dpfail, dppass))
    }

    fn stencil_mask_separate(&self, face: GLenum, mask: GLuint) {
        simple!(self.stencil_mask_separate(face, mask))
    }

    fn polygon_mode(&self, face: GLenum, mode: GLenum) {
        simple!(self.polygon_mode(face, mode))
    }

    fn point_size(&self, size: GLfloat) {
        simple!(self.point_size(size))
    }

    fn provoking_vertex(&self, mode: GLenum) {
        simple!(self.provoking_vertex(mode))
    }

    fn logic_op(&self, opcode: GLenum) {
        simple!(self.logic_op(opcode))
    }

    fn hint(&self, target: GLenum, mode: GLenum) {
        simple!(self.hint(target, mode))
    }

    fn enable_i(&self, cap: GLenum, index: GLuint) {
        simple!(self.enable_i(cap, index))
    }

    fn disable_i(&self, cap: GLenum, index: GLuint) {
        simple!(self.disable_i(cap, index))
    }

    fn is_enabled_i(&self, cap: GLenum, index: GLuint) -> GLboolean {
        no_side_effect!(self.is_enabled_i(cap, index))
    }

    fn blend_func_i(&self, buf: GLuint, src: GLenum, dst: GLenum) {
        simple!(self.blend_func_i(buf, src, dst))
    }

    fn color_mask_i(&self, buf: GLuint, r: bool, g: bool, b: bool, a: bool) {
        simple!(self.color_mask_i(buf, r, g, b, a))
    }

    fn primitive_restart_index(&self, index: GLuint) {
        simple!(self.primitive_restart_index(index))
    }

    fn memory_barrier(&self, barriers: GLbitfield) {
        simple!(self.memory_barrier(barriers))
    }

    fn flush(&self) {
        simple!(self.flush())
    }

    fn finish(&self) {
        simple!(self.finish())
    }

    fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei) {
        simple!(self.draw_arrays(mode, first, count))
    }

    fn draw_arrays_instanced(&self, mode: GLenum, first: GLint, count: GLsizei,
                             primcount: GLsizei) {
        simple!(self.draw_arrays_instanced(mode, first, count, primcount))
    }

    fn draw_elements(&self, mode: GLenum, count: GLsizei, element_type: GLenum,
                     indices_offset: GLuint) {
        simple!(self.draw_elements(mode, count, element_type, indices_offset))
    }

    fn draw_elements_instanced(&self, mode: GLenum, count: GLsizei, element_type: GLenum,
                               indices_offset: GLuint, primcount: GLsizei) {
        simple!(self.draw_elements_instanced(mode, count, element_type, indices_offset,
                                             primcount))
    }

    fn draw_range_elements(&self, mode: GLenum, start: GLuint, end: GLuint, count: GLsizei,
                           element_type: GLenum, indices_offset: GLuint) {
        simple!(self.draw_range_elements(mode, start, end, count, element_type, indices_offset))
    }

    fn draw_elements_base_vertex(&self, mode: GLenum, count: GLsizei, element_type: GLenum,
                                 indices_offset: GLuint, base_vertex: GLint) {
        simple!(self.draw_elements_base_vertex(mode, count, element_type, indices_offset,
                                               base_vertex))
    }

    fn draw_range_elements_base_vertex(&self, mode: GLenum, start: GLuint, end: GLuint,
                                       count: GLsizei, element_type: GLenum,
                                       indices_offset: GLuint, base_vertex: GLint) {
        simple!(self.draw_range_elements_base_vertex(mode, start, end, count, element_type,
                                                     indices_offset, base_vertex))
    }

    fn draw_elements_instanced_base_vertex(&self, mode: GLenum, count: GLsizei,
                                           element_type: GLenum, indices_offset: GLuint,
                                           primcount: GLsizei, base_vertex: GLint) {
        simple!(self.draw_elements_instanced_base_vertex(mode, count, element_type,
                                                         indices_offset, primcount, base_vertex))
    }

    fn dispatch_compute(&self, x: GLuint, y: GLuint, z: GLuint) {
        simple!(self.dispatch_compute(x, y, z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessDriver;

    #[test]
    fn test_records_effects_not_queries() {
        let recorder = Recorder::new(HeadlessDriver::new(), Vec::new());
        let names = recorder.gen_buffers(1);
        recorder.bind_buffer(gl::ARRAY_BUFFER, names[0]);
        recorder.buffer_data(gl::ARRAY_BUFFER, 3, Some(&[1, 2, 3]), gl::STATIC_DRAW);
        assert_eq!(recorder.get_buffer_parameter_iv(gl::ARRAY_BUFFER, gl::BUFFER_SIZE), 3);
        assert_eq!(recorder.get_error(), gl::NO_ERROR);

        assert_eq!(recorder.into_call_stream(), vec![
            Call::gen_buffers { n: 1, returned: names.clone() },
            Call::bind_buffer { target: gl::ARRAY_BUFFER, buffer: names[0] },
            Call::buffer_data { target: gl::ARRAY_BUFFER, size: 3, data: Some(vec![1, 2, 3]),
                                usage: gl::STATIC_DRAW },
        ]);
    }

    #[test]
    fn test_borrowed_parameters() {
        fn check<P: Parameter + ?Sized>(param: &P, expected: P::InCall)
        where P::InCall: PartialEq + std::fmt::Debug
        {
            assert_eq!(param.to_call(), expected);
        }

        check("vertex", "vertex".to_string());
        check(&["a", "b"][..], vec!["a".to_string(), "b".to_string()]);
        check(&Some(&[1u8, 2][..]), Some(vec![1, 2]));
        check(&[&b"ab"[..], &b"c"[..]][..], vec![b"ab".to_vec(), b"c".to_vec()]);
    }
}
