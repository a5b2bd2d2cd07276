//! Renderbuffer objects: images that can be drawn to, but not sampled.

use gleam::gl::{GLenum, GLsizei, GLuint};
use std::rc::Rc;

use crate::binding::{check_binding, Bindable};
use crate::capabilities::Feature;
use crate::context::Context;
use crate::enums::{PixelDataInternalFormat, RenderbufferType};
use crate::error::Result;
use crate::object::{Object, ObjectKind};

#[derive(Debug)]
pub struct Renderbuffer {
    obj: Object,
}

impl Renderbuffer {
    #[track_caller]
    pub fn new(ctx: &Rc<Context>) -> Result<Renderbuffer> {
        ctx.require(Feature::FramebufferObject)?;
        Ok(Renderbuffer { obj: Object::generate(ctx, ObjectKind::Renderbuffer) })
    }

    /// Wrap a renderbuffer created elsewhere, without taking ownership.
    pub fn from_raw(ctx: &Rc<Context>, name: GLuint) -> Renderbuffer {
        Renderbuffer { obj: Object::from_raw(ctx, ObjectKind::Renderbuffer, name) }
    }

    pub fn object(&self) -> &Object {
        &self.obj
    }

    pub fn take(&mut self) -> Renderbuffer {
        Renderbuffer { obj: self.obj.take() }
    }

    /// Allocate the renderbuffer's image.
    #[track_caller]
    pub fn storage(&self, internal_format: PixelDataInternalFormat, width: u32, height: u32) {
        check_binding(self, "Renderbuffer::storage");
        self.context().call("glRenderbufferStorage", "Renderbuffer::storage", |d| {
            d.renderbuffer_storage(gl::RENDERBUFFER, internal_format.as_gl(),
                                   width as GLsizei, height as GLsizei)
        });
    }

    /// Allocate a multisampled image with at least `samples` samples per
    /// pixel.
    #[track_caller]
    pub fn storage_multisample(&self, samples: u32, internal_format: PixelDataInternalFormat,
                               width: u32, height: u32) -> Result<()> {
        self.context().require(Feature::MultisampleRenderbuffer)?;
        check_binding(self, "Renderbuffer::storage_multisample");
        self.context().call("glRenderbufferStorageMultisample",
                            "Renderbuffer::storage_multisample", |d| {
            d.renderbuffer_storage_multisample(gl::RENDERBUFFER, samples as GLsizei,
                                               internal_format.as_gl(),
                                               width as GLsizei, height as GLsizei)
        });
        Ok(())
    }
}

impl Bindable for Renderbuffer {
    fn context(&self) -> &Rc<Context> {
        self.obj.context()
    }

    fn name(&self) -> GLuint {
        self.obj.name()
    }

    fn binding_query(&self) -> (GLenum, String) {
        let binding = RenderbufferType::Renderbuffer.binding();
        (binding.as_gl(), binding.gl_name())
    }

    #[track_caller]
    fn bind_name(&self, name: GLuint) {
        self.context().call("glBindRenderbuffer", "Renderbuffer::bind",
                            |d| d.bind_renderbuffer(gl::RENDERBUFFER, name));
    }
}
