//! Framebuffer objects.

use gleam::gl::{GLenum, GLint, GLsizei, GLuint};
use std::convert::TryFrom;
use std::rc::Rc;

use crate::binding::{check_binding, Bindable};
use crate::capabilities::Feature;
use crate::context::Context;
use crate::driver::DriverExt;
use crate::enums::{self, ClearBuffers, ColorBuffer, CubeFace, FramebufferAttachment,
                   FramebufferStatus, FramebufferType, MagFilter, PixelDataFormat, PixelDataType};
use crate::error::{Error, Result};
use crate::object::{Object, ObjectKind};
use crate::renderbuffer::Renderbuffer;
use crate::texture::Texture;

/// A framebuffer object, along with the target its methods bind it to.
///
/// `Framebuffer::default_framebuffer` wraps the window system's framebuffer,
/// name 0, so it can be bound and checked like any other.
#[derive(Debug)]
pub struct Framebuffer {
    obj: Object,
    target: FramebufferType,
}

/// A rectangle of framebuffer pixels, as `[x0, y0, x1, y1]`.
pub type Rect = [i32; 4];

impl Framebuffer {
    #[track_caller]
    pub fn new(ctx: &Rc<Context>, target: FramebufferType) -> Result<Framebuffer> {
        ctx.require(Feature::FramebufferObject)?;
        Ok(Framebuffer { obj: Object::generate(ctx, ObjectKind::Framebuffer), target })
    }

    pub fn default_framebuffer(ctx: &Rc<Context>, target: FramebufferType) -> Framebuffer {
        Framebuffer::from_raw(ctx, target, 0)
    }

    /// Wrap a framebuffer created elsewhere, without taking ownership.
    pub fn from_raw(ctx: &Rc<Context>, target: FramebufferType, name: GLuint) -> Framebuffer {
        Framebuffer { obj: Object::from_raw(ctx, ObjectKind::Framebuffer, name), target }
    }

    pub fn target(&self) -> FramebufferType {
        self.target
    }

    pub fn object(&self) -> &Object {
        &self.obj
    }

    pub fn take(&mut self) -> Framebuffer {
        Framebuffer { obj: self.obj.take(), target: self.target }
    }

    /// Ask the driver whether this framebuffer can be drawn to.
    ///
    /// The driver returns zero when the call itself fails, for a bad target
    /// or a lost context. That comes back as `Error::UnknownEnum`, not as a
    /// status.
    #[track_caller]
    pub fn status(&self) -> Result<FramebufferStatus> {
        check_binding(self, "Framebuffer::status");
        let status = self.context().call("glCheckFramebufferStatus", "Framebuffer::status",
                                         |d| d.check_frame_buffer_status(self.target.as_gl()));
        FramebufferStatus::try_from(status)
    }

    /// Return an error describing why this framebuffer is incomplete, if it
    /// is. Unlike the other checks, this runs whatever the configuration.
    #[track_caller]
    pub fn validate(&self) -> Result<()> {
        match self.status()? {
            FramebufferStatus::Complete => Ok(()),
            status => {
                log::warn!("framebuffer {}: {}", self.name(), status.message());
                Err(Error::IncompleteFramebuffer(status))
            }
        }
    }

    /// Attach level `level` of `texture` at `attachment`.
    ///
    /// For cube maps, use `attach_cube_face`; for array and 3D textures,
    /// `attach_texture_layer`.
    #[track_caller]
    pub fn attach_texture(&self, attachment: FramebufferAttachment, texture: &Texture,
                          level: u32) {
        self.texture_2d(attachment, texture.target().as_gl(), texture, level,
                        "Framebuffer::attach_texture")
    }

    #[track_caller]
    pub fn attach_cube_face(&self, attachment: FramebufferAttachment, face: CubeFace,
                            texture: &Texture, level: u32) {
        self.texture_2d(attachment, face.as_gl(), texture, level,
                        "Framebuffer::attach_cube_face")
    }

    #[track_caller]
    fn texture_2d(&self, attachment: FramebufferAttachment, textarget: GLenum, texture: &Texture,
                  level: u32, function: &'static str) {
        check_binding(self, function);
        self.context().call("glFramebufferTexture2D", function, |d| {
            d.framebuffer_texture_2d(self.target.as_gl(), attachment.as_gl(), textarget,
                                     texture.object().name(), level as GLint)
        });
    }

    /// Attach one layer of an array, cube map array, or 3D texture.
    #[track_caller]
    pub fn attach_texture_layer(&self, attachment: FramebufferAttachment, texture: &Texture,
                                level: u32, layer: u32) -> Result<()> {
        self.context().require(Feature::FramebufferTextureLayer)?;
        check_binding(self, "Framebuffer::attach_texture_layer");
        self.context().call("glFramebufferTextureLayer", "Framebuffer::attach_texture_layer", |d| {
            d.framebuffer_texture_layer(self.target.as_gl(), attachment.as_gl(),
                                        texture.object().name(), level as GLint, layer as GLint)
        });
        Ok(())
    }

    #[track_caller]
    pub fn attach_renderbuffer(&self, attachment: FramebufferAttachment,
                               renderbuffer: &Renderbuffer) {
        check_binding(self, "Framebuffer::attach_renderbuffer");
        self.context().call("glFramebufferRenderbuffer", "Framebuffer::attach_renderbuffer", |d| {
            d.framebuffer_renderbuffer(self.target.as_gl(), attachment.as_gl(),
                                       gl::RENDERBUFFER, renderbuffer.object().name())
        });
    }

    /// Select the color buffers fragment shader outputs go to, in output
    /// order. Acts on the framebuffer bound for drawing.
    #[track_caller]
    pub fn draw_buffers(&self, buffers: &[ColorBuffer]) -> Result<()> {
        self.context().require(Feature::DrawBuffers)?;
        check_binding(self, "Framebuffer::draw_buffers");
        let buffers: Vec<GLenum> = buffers.iter().map(|b| b.as_gl()).collect();
        self.context().call("glDrawBuffers", "Framebuffer::draw_buffers",
                            |d| d.draw_buffers(&buffers));
        Ok(())
    }

    /// Select the color buffer reads and blits take pixels from. Acts on
    /// the framebuffer bound for reading.
    #[track_caller]
    pub fn read_buffer(&self, buffer: ColorBuffer) -> Result<()> {
        self.context().require(Feature::DrawBuffers)?;
        check_binding(self, "Framebuffer::read_buffer");
        self.context().call("glReadBuffer", "Framebuffer::read_buffer",
                            |d| d.read_buffer(buffer.as_gl()));
        Ok(())
    }

    /// Copy the `src` rectangle of the read framebuffer to the `dst`
    /// rectangle of the draw framebuffer.
    #[track_caller]
    pub fn blit(ctx: &Context, src: Rect, dst: Rect, mask: ClearBuffers, filter: MagFilter)
                -> Result<()> {
        ctx.require(Feature::FramebufferBlit)?;
        ctx.call("glBlitFramebuffer", "Framebuffer::blit", |d| {
            d.blit_framebuffer(src[0], src[1], src[2], src[3],
                               dst[0], dst[1], dst[2], dst[3],
                               mask.bits(), filter.as_gl())
        });
        Ok(())
    }

    /// Read a `width` by `height` block of pixels at `(x, y)` from the read
    /// framebuffer's read buffer, with rows padded to `GL_PACK_ALIGNMENT`.
    #[track_caller]
    pub fn read_pixels(ctx: &Context, x: i32, y: i32, width: u32, height: u32,
                       format: PixelDataFormat, ty: PixelDataType) -> Result<Vec<u8>> {
        ctx.require(Feature::ReadPixels)?;
        let alignment = ctx.driver().get_integer(gl::PACK_ALIGNMENT).max(1) as usize;
        let len = enums::image_size(width as usize, height as usize,
                                    enums::pixel_size(format, ty), alignment);
        let mut pixels = vec![0u8; len];
        ctx.call("glReadPixels", "Framebuffer::read_pixels", |d| {
            d.read_pixels(x, y, width as GLsizei, height as GLsizei, format.as_gl(), ty.as_gl(),
                          &mut pixels)
        });
        Ok(pixels)
    }
}

impl Bindable for Framebuffer {
    fn context(&self) -> &Rc<Context> {
        self.obj.context()
    }

    fn name(&self) -> GLuint {
        self.obj.name()
    }

    fn binding_query(&self) -> (GLenum, String) {
        let binding = self.target.binding();
        (binding.as_gl(), binding.gl_name())
    }

    #[track_caller]
    fn bind_name(&self, name: GLuint) {
        self.context().call("glBindFramebuffer", "Framebuffer::bind",
                            |d| d.bind_framebuffer(self.target.as_gl(), name));
    }

    /// `GL_FRAMEBUFFER` sets both the draw and read bindings, so both are
    /// saved, draw first.
    fn save_binding(&self) -> Vec<GLuint> {
        match self.target {
            FramebufferType::Framebuffer => {
                let ctx = self.context();
                vec![ctx.bound(gl::DRAW_FRAMEBUFFER_BINDING),
                     ctx.bound(gl::READ_FRAMEBUFFER_BINDING)]
            }
            _ => vec![self.context().bound(self.target.binding().as_gl())],
        }
    }

    #[track_caller]
    fn restore_binding(&self, saved: &[GLuint]) {
        match (self.target, saved) {
            (FramebufferType::Framebuffer, &[draw, read]) => {
                let ctx = self.context();
                ctx.call("glBindFramebuffer", "Framebuffer::restore_binding",
                         |d| d.bind_framebuffer(gl::DRAW_FRAMEBUFFER, draw));
                ctx.call("glBindFramebuffer", "Framebuffer::restore_binding",
                         |d| d.bind_framebuffer(gl::READ_FRAMEBUFFER, read));
            }
            (_, saved) => {
                if let Some(&name) = saved.first() {
                    self.bind_name(name);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::driver::EntryPoint;
    use crate::enums::{ErrorType, PixelDataInternalFormat, TextureType};
    use crate::headless::HeadlessDriver;

    #[test]
    fn test_validate() {
        let ctx = Context::with_config(HeadlessDriver::new(), Config::release());
        let fbo = Framebuffer::new(&ctx, FramebufferType::Framebuffer).unwrap();
        fbo.bind();
        match fbo.validate() {
            Err(Error::IncompleteFramebuffer(FramebufferStatus::IncompleteMissingAttachment)) => {}
            other => panic!("unexpected validation result: {:?}", other),
        }

        let color = Renderbuffer::new(&ctx).unwrap();
        color.bind();
        color.storage(PixelDataInternalFormat::Rgba8, 64, 64);
        fbo.attach_renderbuffer(FramebufferAttachment::Color(0), &color);
        fbo.validate().unwrap();

        // The default framebuffer always exists here.
        let window = Framebuffer::default_framebuffer(&ctx, FramebufferType::Framebuffer);
        window.bind();
        assert_eq!(window.status().unwrap(), FramebufferStatus::Complete);
    }

    #[test]
    fn test_draw_buffer_without_attachment() {
        let ctx = Context::with_config(HeadlessDriver::new(), Config::debug());
        let fbo = Framebuffer::new(&ctx, FramebufferType::Framebuffer).unwrap();
        fbo.bind();
        let texture = Texture::new(&ctx, TextureType::Texture2D).unwrap();
        texture.bind();
        texture.upload_2d::<u8>(PixelDataInternalFormat::Rgba8, 4, 4,
                                PixelDataFormat::Rgba, PixelDataType::UnsignedByte, None)
            .unwrap();
        fbo.attach_texture(FramebufferAttachment::Color(0), &texture, 0);
        fbo.draw_buffers(&[ColorBuffer::ColorAttachment0, ColorBuffer::ColorAttachment1])
            .unwrap();
        assert_eq!(fbo.status().unwrap(), FramebufferStatus::IncompleteDrawBuffer);
        assert!(fbo.validate().is_err());
        assert_eq!(ctx.diagnostics().reported, 0);
    }

    #[test]
    fn test_layers_read_pixels_and_blit() {
        let ctx = Context::with_config(HeadlessDriver::new(), Config::debug());
        let array = Texture::new(&ctx, TextureType::Texture2DArray).unwrap();
        array.bind();
        array.upload_3d(PixelDataInternalFormat::Rgba8, 2, 1, 2, PixelDataFormat::Rgba,
                        PixelDataType::UnsignedByte, Some(&[1u32, 2, 3, 4][..])).unwrap();

        let fbo = Framebuffer::new(&ctx, FramebufferType::Framebuffer).unwrap();
        fbo.bind();
        fbo.attach_texture_layer(FramebufferAttachment::Color(0), &array, 0, 1).unwrap();
        fbo.read_buffer(ColorBuffer::ColorAttachment0).unwrap();
        assert_eq!(fbo.status().unwrap(), FramebufferStatus::Complete);

        let pixels = Framebuffer::read_pixels(&ctx, 0, 0, 2, 1, PixelDataFormat::Rgba,
                                              PixelDataType::UnsignedByte).unwrap();
        let expected: Vec<u8> = [3u32, 4].iter()
            .flat_map(|texel| texel.to_ne_bytes().to_vec()).collect();
        assert_eq!(pixels, expected);

        Framebuffer::blit(&ctx, [0, 0, 2, 1], [0, 0, 4, 2], ClearBuffers::COLOR,
                          MagFilter::Linear).unwrap();
        assert_eq!(ctx.diagnostics().reported, 0);

        // Past the last layer, the attachment is incomplete, and neither
        // reads nor blits can use it.
        fbo.attach_texture_layer(FramebufferAttachment::Color(0), &array, 0, 2).unwrap();
        assert_eq!(fbo.status().unwrap(), FramebufferStatus::IncompleteAttachment);
        Framebuffer::blit(&ctx, [0, 0, 2, 1], [0, 0, 2, 1], ClearBuffers::COLOR,
                          MagFilter::Nearest).unwrap();
        assert_eq!(ctx.last_error(), Some(ErrorType::InvalidFramebufferOperation));
        Framebuffer::read_pixels(&ctx, 0, 0, 1, 1, PixelDataFormat::Rgba,
                                 PixelDataType::UnsignedByte).unwrap();
        assert_eq!(ctx.diagnostics().reported, 2);
    }

    #[test]
    fn test_failed_status_call() {
        use crate::driver::Driver;

        // A bad target makes the call fail and return zero.
        let driver = HeadlessDriver::new();
        assert_eq!(driver.check_frame_buffer_status(gl::TEXTURE_2D), 0);
        assert_eq!(driver.get_error(), gl::INVALID_ENUM);

        match FramebufferStatus::try_from(0) {
            Err(Error::UnknownEnum { kind: "FramebufferStatus", value: 0 }) => {}
            other => panic!("zero should not be a status, got {:?}", other),
        }
        assert_eq!(FramebufferStatus::try_from(gl::FRAMEBUFFER_UNDEFINED).unwrap(),
                   FramebufferStatus::Undefined);
    }

    #[test]
    fn test_multisample_renderbuffers() {
        let ctx = Context::with_config(HeadlessDriver::new(), Config::debug());
        let fbo = Framebuffer::new(&ctx, FramebufferType::Framebuffer).unwrap();
        fbo.bind();

        let color = Renderbuffer::new(&ctx).unwrap();
        color.bind();
        color.storage_multisample(4, PixelDataInternalFormat::Rgba8, 32, 32).unwrap();
        fbo.attach_renderbuffer(FramebufferAttachment::Color(0), &color);

        let depth = Renderbuffer::new(&ctx).unwrap();
        depth.bind();
        depth.storage(PixelDataInternalFormat::DepthComponent24, 32, 32);
        fbo.attach_renderbuffer(FramebufferAttachment::Depth, &depth);
        assert_eq!(fbo.status().unwrap(), FramebufferStatus::IncompleteMultisample);

        depth.storage_multisample(4, PixelDataInternalFormat::DepthComponent24, 32, 32).unwrap();
        assert_eq!(fbo.status().unwrap(), FramebufferStatus::Complete);
        assert_eq!(ctx.diagnostics().reported, 0);

        // More samples than GL_MAX_SAMPLES allows.
        color.bind();
        color.storage_multisample(64, PixelDataInternalFormat::Rgba8, 32, 32).unwrap();
        assert_eq!(ctx.last_error(), Some(ErrorType::InvalidValue));
        assert_eq!(ctx.diagnostics().reported, 1);
    }

    #[test]
    fn test_unsupported_framebuffer_operations() {
        let ctx = Context::with_config(HeadlessDriver::with_version("OpenGL ES 2.0", &[]),
                                       Config::debug());
        let fbo = Framebuffer::new(&ctx, FramebufferType::Framebuffer).unwrap();
        let texture = Texture::new(&ctx, TextureType::Texture2D).unwrap();
        fn check(result: Result<()>, feature: Feature) {
            match result {
                Err(Error::Unsupported(f)) if f == feature => {}
                other => panic!("expected {:?} to be unsupported, got {:?}", feature, other),
            }
        }

        check(fbo.attach_texture_layer(FramebufferAttachment::Color(0), &texture, 0, 0),
              Feature::FramebufferTextureLayer);
        check(fbo.draw_buffers(&[ColorBuffer::ColorAttachment0]), Feature::DrawBuffers);
        check(fbo.read_buffer(ColorBuffer::ColorAttachment0), Feature::DrawBuffers);
        check(Framebuffer::blit(&ctx, [0; 4], [0; 4], ClearBuffers::COLOR, MagFilter::Nearest),
              Feature::FramebufferBlit);
        let rb = Renderbuffer::new(&ctx).unwrap();
        rb.bind();
        check(rb.storage_multisample(4, PixelDataInternalFormat::Rgba8, 16, 16),
              Feature::MultisampleRenderbuffer);

        let ctx = Context::with_config(
            HeadlessDriver::new().without_entry_point(EntryPoint::ReadPixels), Config::debug());
        check(Framebuffer::read_pixels(&ctx, 0, 0, 1, 1, PixelDataFormat::Rgba,
                                       PixelDataType::UnsignedByte).map(drop),
              Feature::ReadPixels);
    }
}
