//! Texture objects.
//!
//! A `Texture` remembers the target it was created for, and every method
//! acts through that target on the currently active texture unit. Methods
//! that take client pixel data check its length against the image size GL
//! will read, taking `GL_UNPACK_ALIGNMENT` into account, since a short slice
//! would have the driver read past its end; a short slice returns
//! `Error::PixelDataTooShort` without calling GL. Pixel data always comes
//! from client memory: these methods don't support a bound
//! `GL_PIXEL_UNPACK_BUFFER`.
//!
//! Where `GL_ARB_bindless_texture` is available, `make_bindless` turns a
//! texture into a handle shaders can sample without a texture unit. From then
//! on the texture is immutable; with error checking on, attempts to modify it
//! are reported as "Bindless Texture Modified".

use gleam::gl::{GLenum, GLint, GLsizei, GLuint, GLuint64};
use std::cell::Cell;
use std::convert::TryFrom;
use std::fs::File;
use std::path::Path;
use std::rc::Rc;

use crate::binding::{check_binding, Bindable};
use crate::buffer::Buffer;
use crate::capabilities::Feature;
use crate::context::Context;
use crate::driver::{DriverExt, EntryPoint};
use crate::enums::{self, CompareFunc, CompareMode, CubeFace, MagFilter, MinFilter,
                   PixelDataFormat, PixelDataInternalFormat, PixelDataType, SwizzleMode,
                   TextureType, WrapMode};
use crate::error::{Error, Result};
use crate::object::{Object, ObjectKind};
use crate::raw::{self, Plain};

#[derive(Debug)]
pub struct Texture {
    obj: Object,
    target: TextureType,
    /// The bindless handle, or zero if `make_bindless` hasn't been called.
    handle: Cell<GLuint64>,
}

/// How `Texture::load_image` stores a decoded image.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageOptions {
    /// Treat the color channels as sRGB-encoded.
    pub srgb: bool,
    /// Let the driver compress the image.
    pub compressed: bool,
    /// Keep the alpha channel, if the file has one. Without it, images are
    /// stored as RGB.
    pub alpha: bool,
}

impl ImageOptions {
    /// The internal format to store an image with, given whether its client
    /// data will carry alpha.
    pub fn internal_format(self, has_alpha: bool) -> PixelDataInternalFormat {
        use PixelDataInternalFormat::*;
        match (self.srgb, self.compressed, has_alpha) {
            (true, true, true) => CompressedSrgbAlpha,
            (true, true, false) => CompressedSrgb,
            (true, false, true) => Srgb8Alpha8,
            (true, false, false) => Srgb8,
            (false, true, true) => CompressedRgba,
            (false, true, false) => CompressedRgb,
            (false, false, true) => Rgba8,
            (false, false, false) => Rgb8,
        }
    }
}

impl Texture {
    /// Create a texture for `target`.
    ///
    /// One-dimensional, three-dimensional, and buffer textures are missing
    /// from some contexts; asking for one there returns
    /// `Error::Unsupported`.
    #[track_caller]
    pub fn new(ctx: &Rc<Context>, target: TextureType) -> Result<Texture> {
        match target {
            TextureType::Texture1D | TextureType::Texture1DArray =>
                ctx.require(Feature::Texture1D)?,
            TextureType::Texture3D | TextureType::Texture2DArray =>
                ctx.require(Feature::Texture3D)?,
            TextureType::TextureBuffer => ctx.require(Feature::TextureBuffer)?,
            _ => {}
        }
        Ok(Texture { obj: Object::generate(ctx, ObjectKind::Texture), target, handle: Cell::new(0) })
    }

    /// Wrap a texture created elsewhere, without taking ownership.
    pub fn from_raw(ctx: &Rc<Context>, target: TextureType, name: GLuint) -> Texture {
        Texture { obj: Object::from_raw(ctx, ObjectKind::Texture, name), target, handle: Cell::new(0) }
    }

    pub fn target(&self) -> TextureType {
        self.target
    }

    pub fn object(&self) -> &Object {
        &self.obj
    }

    /// Move this texture into a new `Texture`, leaving this one empty.
    pub fn take(&mut self) -> Texture {
        Texture { obj: self.obj.take(), target: self.target, handle: Cell::new(self.handle.take()) }
    }

    /// Make texture unit `unit` the one later binds affect.
    #[track_caller]
    pub fn active_texture(ctx: &Context, unit: u32) {
        ctx.call("glActiveTexture", "Texture::active_texture",
                 |d| d.active_texture(gl::TEXTURE0 + unit));
    }

    /// Bind this texture to texture unit `unit`, leaving that unit active.
    #[track_caller]
    pub fn bind_to_unit(&self, unit: u32) {
        Texture::active_texture(self.context(), unit);
        self.bind();
    }

    fn image_target(&self, face: Option<CubeFace>) -> GLenum {
        match face {
            Some(face) => face.as_gl(),
            None => self.target.as_gl(),
        }
    }

    /// The target level queries and reads use: cube map faces all have the
    /// same size and format, so the positive X face stands in for the map.
    fn query_target(&self) -> GLenum {
        match self.target {
            TextureType::TextureCubeMap => CubeFace::PositiveX.as_gl(),
            target => target.as_gl(),
        }
    }

    /// Check the binding before a call that changes the texture, and report
    /// the change if the texture has been made bindless.
    #[track_caller]
    fn check_mutable(&self, function: &'static str) {
        check_binding(self, function);
        if self.handle.get() != 0 {
            self.context().report_misuse(
                "Bindless Texture Modified",
                "Textures marked as bindless are immutable and none of their state can be \
                 changed.",
                function);
        }
    }

    // Image specification.

    /// Specify level 0 of a one-dimensional texture. With `data` of `None`,
    /// the image is allocated but left undefined.
    #[track_caller]
    pub fn upload_1d<T: Plain>(&self, internal_format: PixelDataInternalFormat, width: u32,
                               format: PixelDataFormat, ty: PixelDataType,
                               data: Option<&[T]>) -> Result<()> {
        self.upload_mipmap_1d(0, internal_format, width, format, ty, data)
    }

    #[track_caller]
    pub fn upload_mipmap_1d<T: Plain>(&self, level: u32,
                                      internal_format: PixelDataInternalFormat, width: u32,
                                      format: PixelDataFormat, ty: PixelDataType,
                                      data: Option<&[T]>) -> Result<()> {
        self.context().require(Feature::Texture1D)?;
        self.check_mutable("Texture::upload_1d");
        let bytes = data.map(|data| checked_bytes(self.context(), data, [width, 1, 1], format, ty))
            .transpose()?;
        self.context().call("glTexImage1D", "Texture::upload_1d", |d| {
            d.tex_image_1d(self.target.as_gl(), level as GLint, internal_format.as_gl() as GLint,
                           width as GLsizei, 0, format.as_gl(), ty.as_gl(), bytes)
        });
        Ok(())
    }

    /// Specify level 0 of a two-dimensional texture, or of a one-dimensional
    /// array texture.
    #[track_caller]
    pub fn upload_2d<T: Plain>(&self, internal_format: PixelDataInternalFormat,
                               width: u32, height: u32,
                               format: PixelDataFormat, ty: PixelDataType,
                               data: Option<&[T]>) -> Result<()> {
        self.upload_mipmap_2d(0, internal_format, width, height, format, ty, data)
    }

    #[track_caller]
    pub fn upload_mipmap_2d<T: Plain>(&self, level: u32,
                                      internal_format: PixelDataInternalFormat,
                                      width: u32, height: u32,
                                      format: PixelDataFormat, ty: PixelDataType,
                                      data: Option<&[T]>) -> Result<()> {
        self.tex_image_2d(None, level, internal_format, width, height, format, ty, data,
                          "Texture::upload_2d")
    }

    /// Specify one face of a cube map texture.
    #[track_caller]
    pub fn upload_cube_face<T: Plain>(&self, face: CubeFace, level: u32,
                                      internal_format: PixelDataInternalFormat,
                                      width: u32, height: u32,
                                      format: PixelDataFormat, ty: PixelDataType,
                                      data: Option<&[T]>) -> Result<()> {
        self.tex_image_2d(Some(face), level, internal_format, width, height, format, ty, data,
                          "Texture::upload_cube_face")
    }

    #[track_caller]
    #[allow(clippy::too_many_arguments)]
    fn tex_image_2d<T: Plain>(&self, face: Option<CubeFace>, level: u32,
                              internal_format: PixelDataInternalFormat,
                              width: u32, height: u32,
                              format: PixelDataFormat, ty: PixelDataType,
                              data: Option<&[T]>, function: &'static str) -> Result<()> {
        self.check_mutable(function);
        let bytes = data.map(|data| checked_bytes(self.context(), data, [width, height, 1],
                                                  format, ty))
            .transpose()?;
        self.context().call("glTexImage2D", function, |d| {
            d.tex_image_2d(self.image_target(face), level as GLint,
                           internal_format.as_gl() as GLint,
                           width as GLsizei, height as GLsizei, 0,
                           format.as_gl(), ty.as_gl(), bytes)
        });
        Ok(())
    }

    /// Specify level 0 of a three-dimensional or two-dimensional array
    /// texture.
    #[track_caller]
    pub fn upload_3d<T: Plain>(&self, internal_format: PixelDataInternalFormat,
                               width: u32, height: u32, depth: u32,
                               format: PixelDataFormat, ty: PixelDataType,
                               data: Option<&[T]>) -> Result<()> {
        self.upload_mipmap_3d(0, internal_format, width, height, depth, format, ty, data)
    }

    #[track_caller]
    #[allow(clippy::too_many_arguments)]
    pub fn upload_mipmap_3d<T: Plain>(&self, level: u32,
                                      internal_format: PixelDataInternalFormat,
                                      width: u32, height: u32, depth: u32,
                                      format: PixelDataFormat, ty: PixelDataType,
                                      data: Option<&[T]>) -> Result<()> {
        self.check_mutable("Texture::upload_3d");
        let bytes = data.map(|data| checked_bytes(self.context(), data, [width, height, depth],
                                                  format, ty))
            .transpose()?;
        self.context().call("glTexImage3D", "Texture::upload_3d", |d| {
            d.tex_image_3d(self.target.as_gl(), level as GLint, internal_format.as_gl() as GLint,
                           width as GLsizei, height as GLsizei, depth as GLsizei, 0,
                           format.as_gl(), ty.as_gl(), bytes)
        });
        Ok(())
    }

    /// Replace part of level `level` of a one-dimensional texture.
    #[track_caller]
    pub fn sub_upload_1d<T: Plain>(&self, level: u32, x: u32, width: u32,
                                   format: PixelDataFormat, ty: PixelDataType, data: &[T])
                                   -> Result<()> {
        self.context().require(Feature::Texture1D)?;
        self.check_mutable("Texture::sub_upload_1d");
        let bytes = checked_bytes(self.context(), data, [width, 1, 1], format, ty)?;
        self.context().call("glTexSubImage1D", "Texture::sub_upload_1d", |d| {
            d.tex_sub_image_1d(self.target.as_gl(), level as GLint, x as GLint, width as GLsizei,
                               format.as_gl(), ty.as_gl(), bytes)
        });
        Ok(())
    }

    /// Replace the `width` by `height` rectangle at `(x, y)` of level
    /// `level`. For cube maps, `face` selects the face to modify.
    #[track_caller]
    #[allow(clippy::too_many_arguments)]
    pub fn sub_upload_2d<T: Plain>(&self, face: Option<CubeFace>, level: u32,
                                   x: u32, y: u32, width: u32, height: u32,
                                   format: PixelDataFormat, ty: PixelDataType, data: &[T])
                                   -> Result<()> {
        self.check_mutable("Texture::sub_upload_2d");
        let bytes = checked_bytes(self.context(), data, [width, height, 1], format, ty)?;
        self.context().call("glTexSubImage2D", "Texture::sub_upload_2d", |d| {
            d.tex_sub_image_2d(self.image_target(face), level as GLint, x as GLint, y as GLint,
                               width as GLsizei, height as GLsizei,
                               format.as_gl(), ty.as_gl(), bytes)
        });
        Ok(())
    }

    #[track_caller]
    #[allow(clippy::too_many_arguments)]
    pub fn sub_upload_3d<T: Plain>(&self, level: u32, offset: [u32; 3], size: [u32; 3],
                                   format: PixelDataFormat, ty: PixelDataType, data: &[T])
                                   -> Result<()> {
        self.check_mutable("Texture::sub_upload_3d");
        let bytes = checked_bytes(self.context(), data, size, format, ty)?;
        self.context().call("glTexSubImage3D", "Texture::sub_upload_3d", |d| {
            d.tex_sub_image_3d(self.target.as_gl(), level as GLint,
                               offset[0] as GLint, offset[1] as GLint, offset[2] as GLint,
                               size[0] as GLsizei, size[1] as GLsizei, size[2] as GLsizei,
                               format.as_gl(), ty.as_gl(), bytes)
        });
        Ok(())
    }

    /// Allocate immutable storage for `levels` mipmap levels. After this,
    /// the images can only be filled with the `sub_upload` methods.
    #[track_caller]
    pub fn storage_2d(&self, levels: u32, internal_format: PixelDataInternalFormat,
                      width: u32, height: u32) -> Result<()> {
        self.context().require(Feature::TextureStorage)?;
        self.check_mutable("Texture::storage_2d");
        self.context().call("glTexStorage2D", "Texture::storage_2d", |d| {
            d.tex_storage_2d(self.target.as_gl(), levels as GLint, internal_format.as_gl(),
                             width as GLsizei, height as GLsizei)
        });
        Ok(())
    }

    #[track_caller]
    pub fn storage_3d(&self, levels: u32, internal_format: PixelDataInternalFormat,
                      width: u32, height: u32, depth: u32) -> Result<()> {
        self.context().require(Feature::TextureStorage)?;
        self.check_mutable("Texture::storage_3d");
        self.context().call("glTexStorage3D", "Texture::storage_3d", |d| {
            d.tex_storage_3d(self.target.as_gl(), levels as GLint, internal_format.as_gl(),
                             width as GLsizei, height as GLsizei, depth as GLsizei)
        });
        Ok(())
    }

    /// Fill in every mipmap level below level 0 from level 0.
    #[track_caller]
    pub fn generate_mipmap(&self) {
        self.check_mutable("Texture::generate_mipmap");
        self.context().call("glGenerateMipmap", "Texture::generate_mipmap",
                            |d| d.generate_mipmap(self.target.as_gl()));
    }

    /// Attach `buffer`'s storage as this buffer texture's texel array.
    #[track_caller]
    pub fn buffer(&self, internal_format: PixelDataInternalFormat, buffer: &Buffer)
                  -> Result<()> {
        self.context().require(Feature::TextureBuffer)?;
        self.check_mutable("Texture::buffer");
        self.context().call("glTexBuffer", "Texture::buffer", |d| {
            d.tex_buffer(self.target.as_gl(), internal_format.as_gl(), buffer.object().name())
        });
        Ok(())
    }

    // Sampling parameters.

    #[track_caller]
    fn set_parameter(&self, pname: GLenum, value: GLenum, function: &'static str) {
        self.check_mutable(function);
        self.context().call("glTexParameteri", function,
                            |d| d.tex_parameter_i(self.target.as_gl(), pname, value as GLint));
    }

    #[track_caller]
    fn parameter<E>(&self, pname: GLenum, function: &'static str) -> Result<E>
    where E: TryFrom<GLenum, Error = Error>
    {
        check_binding(self, function);
        let value = self.context().call("glGetTexParameteriv", function,
                                        |d| d.get_tex_parameter_iv(self.target.as_gl(), pname));
        E::try_from(value as GLenum)
    }

    #[track_caller]
    pub fn set_min_filter(&self, filter: MinFilter) {
        self.set_parameter(gl::TEXTURE_MIN_FILTER, filter.as_gl(), "Texture::set_min_filter")
    }

    #[track_caller]
    pub fn min_filter(&self) -> Result<MinFilter> {
        self.parameter(gl::TEXTURE_MIN_FILTER, "Texture::min_filter")
    }

    #[track_caller]
    pub fn set_mag_filter(&self, filter: MagFilter) {
        self.set_parameter(gl::TEXTURE_MAG_FILTER, filter.as_gl(), "Texture::set_mag_filter")
    }

    #[track_caller]
    pub fn mag_filter(&self) -> Result<MagFilter> {
        self.parameter(gl::TEXTURE_MAG_FILTER, "Texture::mag_filter")
    }

    #[track_caller]
    pub fn set_wrap_s(&self, mode: WrapMode) {
        self.set_parameter(gl::TEXTURE_WRAP_S, mode.as_gl(), "Texture::set_wrap_s")
    }

    #[track_caller]
    pub fn wrap_s(&self) -> Result<WrapMode> {
        self.parameter(gl::TEXTURE_WRAP_S, "Texture::wrap_s")
    }

    #[track_caller]
    pub fn set_wrap_t(&self, mode: WrapMode) {
        self.set_parameter(gl::TEXTURE_WRAP_T, mode.as_gl(), "Texture::set_wrap_t")
    }

    #[track_caller]
    pub fn wrap_t(&self) -> Result<WrapMode> {
        self.parameter(gl::TEXTURE_WRAP_T, "Texture::wrap_t")
    }

    #[track_caller]
    pub fn set_wrap_r(&self, mode: WrapMode) {
        self.set_parameter(gl::TEXTURE_WRAP_R, mode.as_gl(), "Texture::set_wrap_r")
    }

    #[track_caller]
    pub fn wrap_r(&self) -> Result<WrapMode> {
        self.parameter(gl::TEXTURE_WRAP_R, "Texture::wrap_r")
    }

    #[track_caller]
    fn set_swizzle(&self, pname: GLenum, mode: SwizzleMode, function: &'static str)
                   -> Result<()> {
        self.context().require(Feature::TextureSwizzle)?;
        self.set_parameter(pname, mode.as_gl(), function);
        Ok(())
    }

    #[track_caller]
    pub fn set_swizzle_r(&self, mode: SwizzleMode) -> Result<()> {
        self.set_swizzle(gl::TEXTURE_SWIZZLE_R, mode, "Texture::set_swizzle_r")
    }

    #[track_caller]
    pub fn set_swizzle_g(&self, mode: SwizzleMode) -> Result<()> {
        self.set_swizzle(gl::TEXTURE_SWIZZLE_G, mode, "Texture::set_swizzle_g")
    }

    #[track_caller]
    pub fn set_swizzle_b(&self, mode: SwizzleMode) -> Result<()> {
        self.set_swizzle(gl::TEXTURE_SWIZZLE_B, mode, "Texture::set_swizzle_b")
    }

    #[track_caller]
    pub fn set_swizzle_a(&self, mode: SwizzleMode) -> Result<()> {
        self.set_swizzle(gl::TEXTURE_SWIZZLE_A, mode, "Texture::set_swizzle_a")
    }

    /// Set all four swizzles at once, in red, green, blue, alpha order.
    #[track_caller]
    pub fn set_swizzle_rgba(&self, modes: [SwizzleMode; 4]) -> Result<()> {
        self.context().require(Feature::TextureSwizzle)?;
        if !self.context().driver().has_entry_point(EntryPoint::TexParameterVector) {
            return Err(Error::Unsupported(Feature::TextureSwizzle));
        }
        self.check_mutable("Texture::set_swizzle_rgba");
        let values: Vec<GLint> = modes.iter().map(|mode| mode.as_gl() as GLint).collect();
        self.context().call("glTexParameteriv", "Texture::set_swizzle_rgba", |d| {
            d.tex_parameter_iv(self.target.as_gl(), gl::TEXTURE_SWIZZLE_RGBA, &values)
        });
        Ok(())
    }

    /// The swizzles of the red, green, blue, and alpha channels.
    #[track_caller]
    pub fn swizzle_rgba(&self) -> Result<[SwizzleMode; 4]> {
        self.context().require(Feature::TextureSwizzle)?;
        Ok([
            self.parameter(gl::TEXTURE_SWIZZLE_R, "Texture::swizzle_rgba")?,
            self.parameter(gl::TEXTURE_SWIZZLE_G, "Texture::swizzle_rgba")?,
            self.parameter(gl::TEXTURE_SWIZZLE_B, "Texture::swizzle_rgba")?,
            self.parameter(gl::TEXTURE_SWIZZLE_A, "Texture::swizzle_rgba")?,
        ])
    }

    /// Set the color sampled outside the image under `WrapMode::ClampToBorder`.
    #[track_caller]
    pub fn set_border_color(&self, color: [f32; 4]) -> Result<()> {
        self.context().require(Feature::TextureBorderColor)?;
        self.check_mutable("Texture::set_border_color");
        self.context().call("glTexParameterfv", "Texture::set_border_color", |d| {
            d.tex_parameter_fv(self.target.as_gl(), gl::TEXTURE_BORDER_COLOR, &color)
        });
        Ok(())
    }

    /// Set the maximum degree of anisotropic filtering. Values above
    /// `Texture::max_anisotropy` are clamped by the driver.
    #[track_caller]
    pub fn set_anisotropy(&self, degree: f32) -> Result<()> {
        self.context().require(Feature::Anisotropy)?;
        self.check_mutable("Texture::set_anisotropy");
        self.context().call("glTexParameterf", "Texture::set_anisotropy", |d| {
            d.tex_parameter_f(self.target.as_gl(), enums::TEXTURE_MAX_ANISOTROPY, degree)
        });
        Ok(())
    }

    #[track_caller]
    pub fn anisotropy(&self) -> Result<f32> {
        self.context().require(Feature::Anisotropy)?;
        check_binding(self, "Texture::anisotropy");
        Ok(self.context().call("glGetTexParameterfv", "Texture::anisotropy", |d| {
            d.get_tex_parameter_fv(self.target.as_gl(), enums::TEXTURE_MAX_ANISOTROPY)
        }))
    }

    /// The largest anisotropy the implementation supports.
    #[track_caller]
    pub fn max_anisotropy(ctx: &Context) -> Result<f32> {
        ctx.require(Feature::Anisotropy)?;
        Ok(ctx.call("glGetFloatv", "Texture::max_anisotropy",
                    |d| d.get_float(enums::MAX_TEXTURE_MAX_ANISOTROPY)))
    }

    #[track_caller]
    pub fn set_compare_mode(&self, mode: CompareMode) {
        self.set_parameter(gl::TEXTURE_COMPARE_MODE, mode.as_gl(), "Texture::set_compare_mode")
    }

    #[track_caller]
    pub fn compare_mode(&self) -> Result<CompareMode> {
        self.parameter(gl::TEXTURE_COMPARE_MODE, "Texture::compare_mode")
    }

    #[track_caller]
    pub fn set_compare_func(&self, func: CompareFunc) {
        self.set_parameter(gl::TEXTURE_COMPARE_FUNC, func.as_gl(), "Texture::set_compare_func")
    }

    #[track_caller]
    pub fn compare_func(&self) -> Result<CompareFunc> {
        self.parameter(gl::TEXTURE_COMPARE_FUNC, "Texture::compare_func")
    }

    // Bindless handles.

    /// Get this texture's bindless handle, after which the texture can no
    /// longer be modified. The handle starts out non-resident.
    #[track_caller]
    pub fn make_bindless(&self) -> Result<GLuint64> {
        self.context().require(Feature::BindlessTexture)?;
        if self.handle.get() != 0 {
            self.context().report_misuse(
                "Texture Already Bindless",
                "Texture::make_bindless was called several times on a texture.",
                "Texture::make_bindless");
        }
        let handle = self.context().call("glGetTextureHandleARB", "Texture::make_bindless",
                                         |d| d.get_texture_handle(self.name()));
        self.handle.set(handle);
        log::trace!("texture {}: bindless handle {:#x}", self.name(), handle);
        Ok(handle)
    }

    /// The bindless handle, if `make_bindless` has been called.
    pub fn handle(&self) -> Option<GLuint64> {
        match self.handle.get() {
            0 => None,
            handle => Some(handle),
        }
    }

    /// The handle residency calls act on. A texture that isn't bindless yet
    /// is reported, then made bindless.
    #[track_caller]
    fn resident_handle(&self, function: &'static str) -> Result<GLuint64> {
        self.context().require(Feature::BindlessTexture)?;
        if self.handle.get() == 0 {
            self.context().report_misuse(
                "Non Bindless Texture Residency Change",
                "Residency change was requested on a non-bindless texture.",
                function);
            return self.make_bindless();
        }
        Ok(self.handle.get())
    }

    /// Make the bindless handle resident, so shaders may sample through it.
    #[track_caller]
    pub fn make_resident(&self) -> Result<()> {
        let handle = self.resident_handle("Texture::make_resident")?;
        self.context().call("glMakeTextureHandleResidentARB", "Texture::make_resident",
                            |d| d.make_texture_handle_resident(handle));
        Ok(())
    }

    #[track_caller]
    pub fn make_non_resident(&self) -> Result<()> {
        let handle = self.resident_handle("Texture::make_non_resident")?;
        self.context().call("glMakeTextureHandleNonResidentARB", "Texture::make_non_resident",
                            |d| d.make_texture_handle_non_resident(handle));
        Ok(())
    }

    // Level queries.

    #[track_caller]
    fn level_parameter(&self, level: u32, pname: GLenum, function: &'static str) -> Result<GLint> {
        self.context().require(Feature::TextureLevelQueries)?;
        check_binding(self, function);
        Ok(self.context().call("glGetTexLevelParameteriv", function, |d| {
            d.get_tex_level_parameter_iv(self.query_target(), level as GLint, pname)
        }))
    }

    #[track_caller]
    pub fn width(&self, level: u32) -> Result<u32> {
        Ok(self.level_parameter(level, gl::TEXTURE_WIDTH, "Texture::width")?.max(0) as u32)
    }

    #[track_caller]
    pub fn height(&self, level: u32) -> Result<u32> {
        Ok(self.level_parameter(level, gl::TEXTURE_HEIGHT, "Texture::height")?.max(0) as u32)
    }

    #[track_caller]
    pub fn depth(&self, level: u32) -> Result<u32> {
        Ok(self.level_parameter(level, gl::TEXTURE_DEPTH, "Texture::depth")?.max(0) as u32)
    }

    #[track_caller]
    pub fn internal_format(&self, level: u32) -> Result<PixelDataInternalFormat> {
        let format = self.level_parameter(level, gl::TEXTURE_INTERNAL_FORMAT,
                                          "Texture::internal_format")?;
        PixelDataInternalFormat::try_from(format as GLenum)
    }

    // Reading images back.

    /// Read level `level` into a new vector, in `format`/`ty` layout with
    /// rows padded to the current `GL_PACK_ALIGNMENT`.
    #[track_caller]
    pub fn get_image(&self, level: u32, format: PixelDataFormat, ty: PixelDataType)
                     -> Result<Vec<u8>> {
        self.read_image(None, level, format, ty)
    }

    /// Like `get_image`, for one face of a cube map.
    #[track_caller]
    pub fn get_cube_face_image(&self, face: CubeFace, level: u32,
                               format: PixelDataFormat, ty: PixelDataType) -> Result<Vec<u8>> {
        self.read_image(Some(face), level, format, ty)
    }

    #[track_caller]
    fn read_image(&self, face: Option<CubeFace>, level: u32,
                  format: PixelDataFormat, ty: PixelDataType) -> Result<Vec<u8>> {
        self.context().require(Feature::GetTexImage)?;
        if face.is_none() && self.target == TextureType::TextureCubeMap {
            return Err(Error::CubeMapFaceRequired);
        }
        let size = [self.width(level)?, self.height(level)?, self.depth(level)?];
        let alignment = self.context().driver().get_integer(gl::PACK_ALIGNMENT).max(1) as usize;
        let len = enums::image_size(size[0] as usize, (size[1] * size[2]) as usize,
                                    enums::pixel_size(format, ty), alignment);
        let mut pixels = vec![0u8; len];
        let target = self.image_target(face);
        self.context().call("glGetTexImage", "Texture::get_image", |d| {
            d.get_tex_image_into_buffer(target, level as GLint, format.as_gl(), ty.as_gl(),
                                        &mut pixels)
        });
        Ok(pixels)
    }

    // Image files.

    /// Decode the image file at `path` and upload it as level 0, choosing
    /// the internal format from `options` and whether the file has an alpha
    /// channel.
    #[track_caller]
    pub fn load_image<P: AsRef<Path>>(&self, path: P, options: ImageOptions) -> Result<()> {
        self.load(None, path.as_ref(), options)
    }

    /// Like `load_image`, for one face of a cube map.
    #[track_caller]
    pub fn load_cube_face_image<P: AsRef<Path>>(&self, face: CubeFace, path: P,
                                                options: ImageOptions) -> Result<()> {
        self.load(Some(face), path.as_ref(), options)
    }

    #[track_caller]
    fn load(&self, face: Option<CubeFace>, path: &Path, options: ImageOptions) -> Result<()> {
        let image = image::open(path)?;
        let has_alpha = options.alpha && image.color().has_alpha();
        let (width, height, format, pixels) = if has_alpha {
            let rgba = image.to_rgba8();
            let (width, height) = rgba.dimensions();
            (width, height, PixelDataFormat::Rgba, rgba.into_raw())
        } else {
            let rgb = image.to_rgb8();
            let (width, height) = rgb.dimensions();
            (width, height, PixelDataFormat::Rgb, rgb.into_raw())
        };
        log::trace!("texture {}: loaded {}x{} {:?} image from {}",
                    self.name(), width, height, format, path.display());

        // The decoded rows are tightly packed.
        let _alignment = PixelStore::set(self.context(), gl::UNPACK_ALIGNMENT, 1,
                                         "Texture::load_image");
        self.tex_image_2d(face, 0, options.internal_format(has_alpha), width, height,
                          format, PixelDataType::UnsignedByte, Some(&pixels[..]),
                          "Texture::load_image")
    }

    /// Write level 0 to `path` as an RGBA PNG file. Cube maps have no single
    /// level 0 image, and return `Error::CubeMapFaceRequired`.
    #[track_caller]
    pub fn save_image<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let pixels = {
            let _alignment = PixelStore::set(self.context(), gl::PACK_ALIGNMENT, 4,
                                             "Texture::save_image");
            self.get_image(0, PixelDataFormat::Rgba, PixelDataType::UnsignedByte)?
        };
        let (width, height) = (self.width(0)?, self.height(0)?);
        let file = File::create(path.as_ref()).map_err(image::ImageError::from)?;
        image::png::PngEncoder::new(file)
            .encode(&pixels, width, height, image::ColorType::Rgba8)?;
        Ok(())
    }
}

impl Bindable for Texture {
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
        self.context().call("glBindTexture", "Texture::bind",
                            |d| d.bind_texture(self.target.as_gl(), name));
    }
}

/// Return `data` as bytes, after checking it holds a whole image of `size`
/// pixels as GL will read it.
fn checked_bytes<'a, T: Plain>(ctx: &Context, data: &'a [T], size: [u32; 3],
                               format: PixelDataFormat, ty: PixelDataType)
                               -> Result<&'a [u8]> {
    let bytes = raw::slice_as_bytes(data);
    let alignment = ctx.driver().get_integer(gl::UNPACK_ALIGNMENT).max(1) as usize;
    let needed = enums::image_size(size[0] as usize, size[1] as usize * size[2] as usize,
                                   enums::pixel_size(format, ty), alignment);
    if bytes.len() < needed {
        log::debug!("{}x{}x{} {:?}/{:?} image: {} bytes of pixel data, {} needed",
                    size[0], size[1], size[2], format, ty, bytes.len(), needed);
        return Err(Error::PixelDataTooShort { needed, given: bytes.len() });
    }
    Ok(bytes)
}

/// Set a pixel store parameter for as long as this guard lives.
struct PixelStore<'a> {
    ctx: &'a Context,
    pname: GLenum,
    previous: GLint,
    function: &'static str,
}

impl<'a> PixelStore<'a> {
    #[track_caller]
    fn set(ctx: &'a Context, pname: GLenum, value: GLint, function: &'static str)
           -> PixelStore<'a> {
        let previous = ctx.driver().get_integer(pname);
        if previous != value {
            ctx.call("glPixelStorei", function, |d| d.pixel_store_i(pname, value));
        }
        PixelStore { ctx, pname, previous, function }
    }
}

impl<'a> Drop for PixelStore<'a> {
    fn drop(&mut self) {
        let (pname, previous) = (self.pname, self.previous);
        if self.ctx.driver().get_integer(pname) != previous {
            self.ctx.call("glPixelStorei", self.function, |d| d.pixel_store_i(pname, previous));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::headless::HeadlessDriver;

    fn context() -> Rc<Context> {
        Context::with_config(HeadlessDriver::new(), Config::debug())
    }

    #[test]
    fn test_internal_format_selection() {
        fn check(srgb: bool, compressed: bool, alpha: bool, expected: PixelDataInternalFormat) {
            let options = ImageOptions { srgb, compressed, alpha };
            assert_eq!(options.internal_format(alpha), expected, "{:?}", options);
        }

        use PixelDataInternalFormat::*;
        check(true, true, true, CompressedSrgbAlpha);
        check(true, true, false, CompressedSrgb);
        check(true, false, true, Srgb8Alpha8);
        check(true, false, false, Srgb8);
        check(false, true, true, CompressedRgba);
        check(false, true, false, CompressedRgb);
        check(false, false, true, Rgba8);
        check(false, false, false, Rgb8);
    }

    #[test]
    fn test_parameters() {
        let ctx = context();
        let texture = Texture::new(&ctx, TextureType::Texture2D).unwrap();
        texture.bind();

        assert_eq!(texture.min_filter().unwrap(), MinFilter::NearestMipmapLinear);
        texture.set_min_filter(MinFilter::Linear);
        texture.set_mag_filter(MagFilter::Nearest);
        texture.set_wrap_s(WrapMode::ClampToEdge);
        texture.set_compare_func(CompareFunc::Greater);
        assert_eq!(texture.min_filter().unwrap(), MinFilter::Linear);
        assert_eq!(texture.mag_filter().unwrap(), MagFilter::Nearest);
        assert_eq!(texture.wrap_s().unwrap(), WrapMode::ClampToEdge);
        assert_eq!(texture.wrap_t().unwrap(), WrapMode::Repeat);
        assert_eq!(texture.compare_func().unwrap(), CompareFunc::Greater);

        use SwizzleMode::*;
        texture.set_swizzle_rgba([Blue, Green, Red, One]).unwrap();
        assert_eq!(texture.swizzle_rgba().unwrap(), [Blue, Green, Red, One]);
        texture.set_swizzle_a(Zero).unwrap();
        assert_eq!(texture.swizzle_rgba().unwrap(), [Blue, Green, Red, Zero]);

        texture.set_anisotropy(64.0).unwrap();
        assert_eq!(texture.anisotropy().unwrap(), Texture::max_anisotropy(&ctx).unwrap());
        assert_eq!(ctx.diagnostics().reported, 0);
    }

    #[test]
    fn test_upload_padded_rows() {
        let ctx = context();
        let texture = Texture::new(&ctx, TextureType::Texture2D).unwrap();
        texture.bind();

        // Three RGB pixels are nine bytes a row; the default unpack
        // alignment of 4 pads each row to twelve.
        let rows: [u8; 21] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 0, 0,
                              10, 11, 12, 13, 14, 15, 16, 17, 18];
        texture.upload_2d(PixelDataInternalFormat::Rgb8, 3, 2,
                          PixelDataFormat::Rgb, PixelDataType::UnsignedByte, Some(&rows[..]))
            .unwrap();
        assert_eq!(texture.width(0).unwrap(), 3);
        assert_eq!(texture.height(0).unwrap(), 2);
        assert_eq!(texture.internal_format(0).unwrap(), PixelDataInternalFormat::Rgb8);

        let read = texture.get_image(0, PixelDataFormat::Rgb, PixelDataType::UnsignedByte)
            .unwrap();
        assert_eq!(read, rows.to_vec());
        assert_eq!(ctx.diagnostics().reported, 0);
    }

    #[test]
    fn test_short_upload() {
        let ctx = context();
        let texture = Texture::new(&ctx, TextureType::Texture2D).unwrap();
        texture.bind();
        let result = texture.upload_2d(PixelDataInternalFormat::Rgb8, 3, 2,
                                       PixelDataFormat::Rgb, PixelDataType::UnsignedByte,
                                       Some(&[0u8; 18][..]));
        assert!(matches!(result, Err(Error::PixelDataTooShort { needed: 21, given: 18 })),
                "{:?}", result);

        // Nothing reached GL.
        assert_eq!(texture.width(0).unwrap(), 0);
        assert_eq!(ctx.diagnostics().reported, 0);

        let result = texture.sub_upload_2d(None, 0, 0, 0, 2, 2, PixelDataFormat::Rgba,
                                           PixelDataType::UnsignedByte, &[0u32; 3]);
        assert!(matches!(result, Err(Error::PixelDataTooShort { needed: 16, given: 12 })),
                "{:?}", result);
    }

    #[test]
    fn test_upload_1d() {
        let ctx = context();
        let texture = Texture::new(&ctx, TextureType::Texture1D).unwrap();
        texture.bind();
        texture.upload_1d(PixelDataInternalFormat::Rgba8, 4,
                          PixelDataFormat::Rgba, PixelDataType::UnsignedByte,
                          Some(&[0xff00_00ffu32; 4][..])).unwrap();
        texture.sub_upload_1d(0, 1, 2, PixelDataFormat::Rgba, PixelDataType::UnsignedByte,
                              &[0x0000_ff00u32; 2]).unwrap();
        assert_eq!(texture.width(0).unwrap(), 4);
        assert_eq!(texture.height(0).unwrap(), 1);

        let read = texture.get_image(0, PixelDataFormat::Rgba, PixelDataType::UnsignedByte)
            .unwrap();
        let expected: Vec<u8> = [0xff00_00ffu32, 0x0000_ff00, 0x0000_ff00, 0xff00_00ff]
            .iter().flat_map(|texel| texel.to_ne_bytes().to_vec()).collect();
        assert_eq!(read, expected);
        assert_eq!(ctx.diagnostics().reported, 0);
    }

    #[test]
    fn test_upload_1d_unsupported() {
        let ctx = context();
        let texture = Texture::new(&ctx, TextureType::Texture1D).unwrap();
        texture.bind();

        // An ES context has no one-dimensional textures, whatever the handle
        // claims to be.
        let es = Context::with_config(HeadlessDriver::with_version("OpenGL ES 3.2", &[]),
                                      Config::debug());
        let view = Texture::from_raw(&es, TextureType::Texture1D, 1);
        let result = view.upload_1d::<u8>(PixelDataInternalFormat::Rgba8, 4,
                                          PixelDataFormat::Rgba, PixelDataType::UnsignedByte,
                                          None);
        assert!(matches!(result, Err(Error::Unsupported(Feature::Texture1D))), "{:?}", result);
        let result = view.sub_upload_1d(0, 0, 1, PixelDataFormat::Rgba,
                                        PixelDataType::UnsignedByte, &[0u32]);
        assert!(matches!(result, Err(Error::Unsupported(Feature::Texture1D))), "{:?}", result);
    }

    #[test]
    fn test_upload_3d() {
        let ctx = context();
        let texture = Texture::new(&ctx, TextureType::Texture3D).unwrap();
        texture.bind();
        let texels: Vec<u8> = (0..2 * 2 * 3).collect();
        let _alignment = PixelStore::set(&ctx, gl::UNPACK_ALIGNMENT, 1, "test");
        texture.upload_3d(PixelDataInternalFormat::R8, 2, 2, 3,
                          PixelDataFormat::Red, PixelDataType::UnsignedByte,
                          Some(&texels[..])).unwrap();
        assert_eq!((texture.width(0).unwrap(), texture.height(0).unwrap(),
                    texture.depth(0).unwrap()), (2, 2, 3));

        texture.sub_upload_3d(0, [1, 0, 2], [1, 2, 1], PixelDataFormat::Red,
                              PixelDataType::UnsignedByte, &[100u8, 101]).unwrap();
        let _pack = PixelStore::set(&ctx, gl::PACK_ALIGNMENT, 1, "test");
        let read = texture.get_image(0, PixelDataFormat::Red, PixelDataType::UnsignedByte)
            .unwrap();
        assert_eq!(read, vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 100, 10, 101]);
        assert_eq!(ctx.diagnostics().reported, 0);
    }

    #[test]
    fn test_storage() {
        let ctx = context();
        let flat = Texture::new(&ctx, TextureType::Texture2D).unwrap();
        flat.bind();
        flat.storage_2d(3, PixelDataInternalFormat::Rgba8, 8, 4).unwrap();
        assert_eq!((flat.width(0).unwrap(), flat.height(0).unwrap()), (8, 4));
        assert_eq!((flat.width(2).unwrap(), flat.height(2).unwrap()), (2, 1));
        assert_eq!(flat.internal_format(1).unwrap(), PixelDataInternalFormat::Rgba8);

        // Immutable storage can't be respecified.
        flat.upload_2d::<u8>(PixelDataInternalFormat::Rgba8, 8, 4, PixelDataFormat::Rgba,
                             PixelDataType::UnsignedByte, None).unwrap();
        assert_eq!(ctx.last_error(), Some(enums::ErrorType::InvalidOperation));

        let array = Texture::new(&ctx, TextureType::Texture2DArray).unwrap();
        array.bind();
        array.storage_3d(1, PixelDataInternalFormat::R8, 4, 4, 6).unwrap();
        assert_eq!(array.depth(0).unwrap(), 6);

        let es2 = Context::with_config(HeadlessDriver::with_version("OpenGL ES 2.0", &[]),
                                       Config::debug());
        let view = Texture::from_raw(&es2, TextureType::Texture2D, 1);
        assert!(matches!(view.storage_2d(1, PixelDataInternalFormat::Rgba8, 1, 1),
                         Err(Error::Unsupported(Feature::TextureStorage))));
    }

    #[test]
    fn test_cube_map_reads_need_a_face() {
        let ctx = context();
        let cube = Texture::new(&ctx, TextureType::TextureCubeMap).unwrap();
        cube.bind();
        for (i, &face) in CubeFace::ALL.iter().enumerate() {
            cube.upload_cube_face(face, 0, PixelDataInternalFormat::Rgba8, 1, 1,
                                  PixelDataFormat::Rgba, PixelDataType::UnsignedByte,
                                  Some(&[i as u32][..])).unwrap();
        }

        let whole = cube.get_image(0, PixelDataFormat::Rgba, PixelDataType::UnsignedByte);
        assert!(matches!(whole, Err(Error::CubeMapFaceRequired)), "{:?}", whole);
        assert!(whole.unwrap_err().to_string().contains("get_cube_face_image"));
        let dir = std::env::temp_dir().join("oglwrap-test-cube-save.png");
        assert!(matches!(cube.save_image(&dir), Err(Error::CubeMapFaceRequired)));

        let face = cube.get_cube_face_image(CubeFace::NegativeY, 0, PixelDataFormat::Rgba,
                                            PixelDataType::UnsignedByte).unwrap();
        assert_eq!(face, 3u32.to_ne_bytes().to_vec());
        assert_eq!(ctx.diagnostics().reported, 0);
    }

    #[test]
    fn test_save_and_load_image() {
        let ctx = context();
        let texture = Texture::new(&ctx, TextureType::Texture2D).unwrap();
        texture.bind();
        let texels: [u8; 16] = [255, 0, 0, 255, 0, 255, 0, 128,
                                0, 0, 255, 255, 10, 20, 30, 40];
        texture.upload_2d(PixelDataInternalFormat::Rgba8, 2, 2, PixelDataFormat::Rgba,
                          PixelDataType::UnsignedByte, Some(&texels[..])).unwrap();

        let path = std::env::temp_dir()
            .join(format!("oglwrap-test-save-{}.png", std::process::id()));
        texture.save_image(&path).unwrap();

        let copy = Texture::new(&ctx, TextureType::Texture2D).unwrap();
        copy.bind();
        copy.load_image(&path, ImageOptions { alpha: true, ..ImageOptions::default() })
            .unwrap();
        assert_eq!(copy.internal_format(0).unwrap(), PixelDataInternalFormat::Rgba8);
        assert_eq!(copy.get_image(0, PixelDataFormat::Rgba, PixelDataType::UnsignedByte)
                   .unwrap(), texels.to_vec());

        // Without alpha, the image is stored as RGB.
        let opaque = Texture::new(&ctx, TextureType::Texture2D).unwrap();
        opaque.bind();
        opaque.load_image(&path, ImageOptions::default()).unwrap();
        assert_eq!(opaque.internal_format(0).unwrap(), PixelDataInternalFormat::Rgb8);

        std::fs::remove_file(&path).unwrap();
        assert!(matches!(copy.load_image(&path, ImageOptions::default()),
                         Err(Error::Image(_))));
        assert_eq!(ctx.diagnostics().reported, 0);
    }

    #[test]
    fn test_bindless() {
        let ctx = context();
        let seen = Rc::new(std::cell::RefCell::new(vec![]));
        let sink_seen = seen.clone();
        ctx.set_sink(move |m: &crate::debug::ErrorMessage| {
            sink_seen.borrow_mut().push(m.title.clone())
        });

        let texture = Texture::new(&ctx, TextureType::Texture2D).unwrap();
        texture.bind();
        texture.upload_2d(PixelDataInternalFormat::Rgba8, 1, 1, PixelDataFormat::Rgba,
                          PixelDataType::UnsignedByte, Some(&[0u32][..])).unwrap();
        assert_eq!(texture.handle(), None);

        let handle = texture.make_bindless().unwrap();
        assert_ne!(handle, 0);
        assert_eq!(texture.handle(), Some(handle));
        texture.make_resident().unwrap();
        texture.make_non_resident().unwrap();
        assert!(seen.borrow().is_empty(), "{:?}", seen.borrow());

        texture.set_min_filter(MinFilter::Nearest);
        assert_eq!(seen.borrow()[0], "Bindless Texture Modified");
        assert_eq!(seen.borrow()[1], "Invalid Operation");

        texture.make_bindless().unwrap();
        assert_eq!(seen.borrow()[2], "Texture Already Bindless");

        // Residency changes on a texture that isn't bindless yet make it so.
        let other = Texture::new(&ctx, TextureType::Texture2D).unwrap();
        other.bind();
        other.make_resident().unwrap();
        assert_eq!(seen.borrow()[3], "Non Bindless Texture Residency Change");
        assert!(other.handle().is_some());
        assert_eq!(seen.borrow().len(), 4);
    }

    #[test]
    fn test_bindless_unsupported() {
        let ctx = Context::with_config(HeadlessDriver::with_version("4.6", &[]),
                                       Config::debug());
        let texture = Texture::new(&ctx, TextureType::Texture2D).unwrap();
        assert!(matches!(texture.make_bindless(),
                         Err(Error::Unsupported(Feature::BindlessTexture))));

        let missing = HeadlessDriver::new().without_entry_point(EntryPoint::BindlessTexture);
        let ctx = Context::with_config(missing, Config::debug());
        let texture = Texture::new(&ctx, TextureType::Texture2D).unwrap();
        assert!(matches!(texture.make_resident(),
                         Err(Error::Unsupported(Feature::BindlessTexture))));
    }

    #[test]
    fn test_pixel_store_restored() {
        let ctx = context();
        {
            let _store = PixelStore::set(&ctx, gl::UNPACK_ALIGNMENT, 1, "test");
            assert_eq!(ctx.driver().get_integer(gl::UNPACK_ALIGNMENT), 1);
        }
        assert_eq!(ctx.driver().get_integer(gl::UNPACK_ALIGNMENT), 4);
    }
}
