//! Vertex array objects, and the vertex attributes they record.

use gleam::gl::{GLenum, GLint, GLsizei, GLuint};
use std::rc::Rc;

use crate::binding::{check_default_binding, Bindable};
use crate::capabilities::Feature;
use crate::context::Context;
use crate::enums::DataType;
use crate::error::Result;
use crate::object::{Object, ObjectKind};
use crate::program::Program;

#[derive(Debug)]
pub struct VertexArray {
    obj: Object,
}

impl VertexArray {
    #[track_caller]
    pub fn new(ctx: &Rc<Context>) -> Result<VertexArray> {
        ctx.require(Feature::VertexArrayObject)?;
        Ok(VertexArray { obj: Object::generate(ctx, ObjectKind::VertexArray) })
    }

    /// Wrap a vertex array created elsewhere, without taking ownership.
    pub fn from_raw(ctx: &Rc<Context>, name: GLuint) -> VertexArray {
        VertexArray { obj: Object::from_raw(ctx, ObjectKind::VertexArray, name) }
    }

    pub fn object(&self) -> &Object {
        &self.obj
    }

    pub fn take(&mut self) -> VertexArray {
        VertexArray { obj: self.obj.take() }
    }
}

impl Bindable for VertexArray {
    fn context(&self) -> &Rc<Context> {
        self.obj.context()
    }

    fn name(&self) -> GLuint {
        self.obj.name()
    }

    fn binding_query(&self) -> (GLenum, String) {
        (gl::VERTEX_ARRAY_BINDING, "GL_VERTEX_ARRAY_BINDING".to_string())
    }

    #[track_caller]
    fn bind_name(&self, name: GLuint) {
        self.context().call("glBindVertexArray", "VertexArray::bind",
                            |d| d.bind_vertex_array(name));
    }
}

/// Rust types that can be vertex attribute components.
pub trait AttribType {
    const DATA_TYPE: DataType;
}

macro_rules! attrib_types {
    ( $( $ty:ty => $data_type:ident ),* ) => {
        $(
            impl AttribType for $ty {
                const DATA_TYPE: DataType = DataType::$data_type;
            }
        )*
    }
}

attrib_types!(i8 => Byte, u8 => UnsignedByte, i16 => Short, u16 => UnsignedShort,
              i32 => Int, u32 => UnsignedInt, f32 => Float, f64 => Double);

/// A vertex attribute slot.
///
/// Everything but `static_value` records state in the bound vertex array;
/// each such method reports when only the default vertex array is bound.
/// Methods reading from a buffer also report when no buffer is bound to
/// `GL_ARRAY_BUFFER`.
pub struct VertexAttrib {
    ctx: Rc<Context>,
    location: GLuint,
}

impl VertexAttrib {
    pub fn new(ctx: &Rc<Context>, location: u32) -> VertexAttrib {
        VertexAttrib { ctx: ctx.clone(), location }
    }

    /// The slot of attribute `name` in `program`. A program without such an
    /// attribute is reported, and `None` returned.
    #[track_caller]
    pub fn from_program(program: &Program, name: &str) -> Option<VertexAttrib> {
        let location = program.attrib_location(name);
        if location < 0 {
            program.context().report_misuse(
                "Attribute Location Error",
                format!("Program {} has no active attribute named '{}'.", program.name(), name),
                "VertexAttrib::from_program");
            return None;
        }
        Some(VertexAttrib::new(program.context(), location as u32))
    }

    pub fn location(&self) -> u32 {
        self.location
    }

    /// Read `values_per_vertex` components of type `T` per vertex from the
    /// bound array buffer, tightly packed from its start. Integer types stay
    /// integers; see `setup_with`.
    #[track_caller]
    pub fn setup<T: AttribType>(&self, values_per_vertex: u32) -> Result<&Self> {
        self.setup_with(values_per_vertex, T::DATA_TYPE, 0, 0)
    }

    /// Point this attribute at the bound array buffer. Floating-point and
    /// fixed-point types go through `glVertexAttribPointer`; integer types
    /// through `glVertexAttribIPointer`, so the shader sees them unconverted;
    /// doubles through `glVertexAttribLPointer`, keeping their precision.
    #[track_caller]
    pub fn setup_with(&self, values_per_vertex: u32, ty: DataType, stride: u32, offset: u32)
                      -> Result<&Self> {
        match ty {
            DataType::Float | DataType::HalfFloat | DataType::Fixed =>
                Ok(self.pointer(values_per_vertex, ty, false, stride, offset)),
            DataType::Double => self.lpointer(values_per_vertex, stride, offset),
            _ => self.ipointer(values_per_vertex, ty, stride, offset),
        }
    }

    /// `glVertexAttribPointer`: the shader sees floats, with integer data
    /// converted and, if `normalized`, mapped to [0, 1] or [-1, 1].
    #[track_caller]
    pub fn pointer(&self, values_per_vertex: u32, ty: DataType, normalized: bool,
                   stride: u32, offset: u32) -> &Self {
        self.check_vertex_array("VertexAttrib::pointer");
        self.check_array_buffer("VertexAttrib::pointer");
        self.ctx.call("glVertexAttribPointer", "VertexAttrib::pointer", |d| {
            d.vertex_attrib_pointer(self.location, values_per_vertex as GLint, ty.as_gl(),
                                    normalized, stride as GLsizei, offset)
        });
        self
    }

    #[track_caller]
    pub fn ipointer(&self, values_per_vertex: u32, ty: DataType, stride: u32, offset: u32)
                    -> Result<&Self> {
        self.ctx.require(Feature::IntegerAttributes)?;
        self.check_vertex_array("VertexAttrib::ipointer");
        self.check_array_buffer("VertexAttrib::ipointer");
        self.ctx.call("glVertexAttribIPointer", "VertexAttrib::ipointer", |d| {
            d.vertex_attrib_i_pointer(self.location, values_per_vertex as GLint, ty.as_gl(),
                                      stride as GLsizei, offset)
        });
        Ok(self)
    }

    /// Feed a `double`/`dvec` shader input from 64-bit floats.
    #[track_caller]
    pub fn lpointer(&self, values_per_vertex: u32, stride: u32, offset: u32) -> Result<&Self> {
        self.ctx.require(Feature::DoubleAttributes)?;
        self.check_vertex_array("VertexAttrib::lpointer");
        self.check_array_buffer("VertexAttrib::lpointer");
        self.ctx.call("glVertexAttribLPointer", "VertexAttrib::lpointer", |d| {
            d.vertex_attrib_l_pointer(self.location, values_per_vertex as GLint,
                                      DataType::Double.as_gl(), stride as GLsizei, offset)
        });
        Ok(self)
    }

    /// Advance this attribute once per `divisor` instances instead of once
    /// per vertex. Zero restores per-vertex data.
    #[track_caller]
    pub fn divisor(&self, divisor: u32) -> Result<&Self> {
        self.ctx.require(Feature::InstancedArrays)?;
        self.check_vertex_array("VertexAttrib::divisor");
        self.ctx.call("glVertexAttribDivisor", "VertexAttrib::divisor",
                      |d| d.vertex_attrib_divisor(self.location, divisor));
        Ok(self)
    }

    #[track_caller]
    pub fn enable(&self) -> &Self {
        self.check_vertex_array("VertexAttrib::enable");
        self.ctx.call("glEnableVertexAttribArray", "VertexAttrib::enable",
                      |d| d.enable_vertex_attrib_array(self.location));
        self
    }

    #[track_caller]
    pub fn disable(&self) -> &Self {
        self.check_vertex_array("VertexAttrib::disable");
        self.ctx.call("glDisableVertexAttribArray", "VertexAttrib::disable",
                      |d| d.disable_vertex_attrib_array(self.location));
        self
    }

    /// Give every vertex the same value, used while the array is disabled.
    #[track_caller]
    pub fn static_value(&self, value: [f32; 4]) {
        self.ctx.call("glVertexAttrib4f", "VertexAttrib::static_value", |d| {
            d.vertex_attrib_4f(self.location, value[0], value[1], value[2], value[3])
        });
    }

    /// Assign this slot to attribute `name` of `program`, from its next link.
    #[track_caller]
    pub fn bind_location(&self, program: &Program, name: &str) {
        program.bind_attrib_location(self.location, name);
    }

    #[track_caller]
    fn check_vertex_array(&self, function: &'static str) {
        check_default_binding(&self.ctx, gl::VERTEX_ARRAY_BINDING, "GL_VERTEX_ARRAY_BINDING",
                              function);
    }

    #[track_caller]
    fn check_array_buffer(&self, function: &'static str) {
        check_default_binding(&self.ctx, gl::ARRAY_BUFFER_BINDING, "GL_ARRAY_BUFFER_BINDING",
                              function);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;
    use crate::config::Config;
    use crate::enums::{BufferType, BufferUsage};
    use crate::headless::HeadlessDriver;

    #[test]
    fn test_default_vertex_array_reported() {
        let ctx = Context::with_config(HeadlessDriver::new(), Config::debug());
        let buffer = Buffer::new(&ctx, BufferType::Array);
        buffer.bind();
        buffer.data(&[0.0f32; 6], BufferUsage::StaticDraw);

        // Default vertex array: one bind-check report, one GL error report.
        VertexAttrib::new(&ctx, 0).setup::<f32>(3).unwrap();
        let diagnostics = ctx.diagnostics();
        assert_eq!(diagnostics.reported, 2);
        let last = diagnostics.last_message.unwrap();
        assert_eq!(last.call, Some("glVertexAttribPointer"));

        let vao = VertexArray::new(&ctx).unwrap();
        vao.bind();
        VertexAttrib::new(&ctx, 0).setup::<f32>(3).unwrap().enable();
        VertexAttrib::new(&ctx, 1).setup::<u16>(2).unwrap().divisor(1).unwrap();
        assert_eq!(ctx.diagnostics().reported, 2);
    }

    #[test]
    fn test_double_attributes() {
        let ctx = Context::with_config(HeadlessDriver::new(), Config::debug());
        let vao = VertexArray::new(&ctx).unwrap();
        vao.bind();
        let buffer = Buffer::new(&ctx, BufferType::Array);
        buffer.bind();
        buffer.data(&[0.0f64; 6], BufferUsage::StaticDraw);

        VertexAttrib::new(&ctx, 0).setup::<f64>(3).unwrap().enable();
        assert_eq!(ctx.diagnostics().reported, 0);

        let old = Context::with_config(HeadlessDriver::with_version("3.3", &[]),
                                       Config::debug());
        match VertexAttrib::new(&old, 0).setup::<f64>(2) {
            Err(crate::Error::Unsupported(Feature::DoubleAttributes)) => {}
            other => panic!("expected double attributes to be unsupported, got {:?}",
                            other.map(|attrib| attrib.location())),
        }
    }
}
