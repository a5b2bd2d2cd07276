//! Errors returned by fallible wrapper operations.
//!
//! Most GL misuse is reported through the context's debug sink and never
//! surfaces here; see `debug`. These are the failures a caller is expected to
//! handle: missing features, shaders that don't build, framebuffers that
//! can't be drawn to, and files that can't be read.

use gleam::gl::GLenum;
use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::capabilities::Feature;
use crate::enums::{BufferType, FramebufferStatus};

#[derive(Debug)]
pub enum Error {
    /// The driver lacks the version, extension, or entry point a feature needs.
    Unsupported(Feature),

    /// A shader failed to compile. `name` is the file it came from, if any.
    ShaderCompile { name: String, log: String },

    /// A program failed to link. `shaders` names its attached shaders.
    ProgramLink { shaders: Vec<String>, log: String },

    /// `Framebuffer::validate` found an incomplete framebuffer.
    IncompleteFramebuffer(FramebufferStatus),

    /// The driver refused to map a buffer, or mapped it at an address not
    /// aligned for the element type.
    MapFailed { target: BufferType },

    /// A shader source file could not be read.
    ShaderFile { path: PathBuf, source: io::Error },

    /// `ShaderSource::insert_macro_value` found no `#define` of this macro.
    MacroNotFound { name: String, shader: String },

    /// An image file could not be decoded or encoded.
    Image(image::ImageError),

    /// A `GLenum` value doesn't correspond to any variant of the named enum.
    UnknownEnum { kind: &'static str, value: GLenum },

    /// Client pixel data is shorter than the image GL would read from it.
    PixelDataTooShort { needed: usize, given: usize },

    /// A whole-texture read was asked of a cube map, whose faces must be
    /// read one at a time.
    CubeMapFaceRequired,
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Unsupported(feature) =>
                write!(fmt, "{} is not supported by this OpenGL context", feature),
            Error::ShaderCompile { name, log } =>
                write!(fmt, "shader compile failure in '{}':\n{}", name, log),
            Error::ProgramLink { shaders, log } =>
                write!(fmt, "program link failure (shaders: {}):\n{}", shaders.join(", "), log),
            Error::IncompleteFramebuffer(status) =>
                write!(fmt, "framebuffer is incomplete: {}", status.message()),
            Error::MapFailed { target } =>
                write!(fmt, "could not map the buffer bound to {}", target.gl_name()),
            Error::ShaderFile { path, source } =>
                write!(fmt, "shader file '{}' not found: {}", path.display(), source),
            Error::MacroNotFound { name, shader } =>
                write!(fmt, "#define {} not found in shader '{}'", name, shader),
            Error::Image(e) => write!(fmt, "image error: {}", e),
            Error::UnknownEnum { kind, value } =>
                write!(fmt, "0x{:x} is not a valid {}", value, kind),
            Error::PixelDataTooShort { needed, given } =>
                write!(fmt, "image needs {} bytes of pixel data, but only {} given",
                       needed, given),
            Error::CubeMapFaceRequired =>
                write!(fmt, "cube map images must be read one face at a time; \
                             use Texture::get_cube_face_image"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ShaderFile { source, .. } => Some(source),
            Error::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Error {
        Error::Image(e)
    }
}
