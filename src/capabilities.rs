//! What the current context can do, discovered once at context creation.
//!
//! Wrappers for functionality newer than OpenGL 2.1 / ES 2.0 name a `Feature`
//! and ask the context whether it is present before touching the driver.

use gleam::gl::GLuint;
use std::collections::BTreeSet;
use std::fmt;

use crate::driver::{Driver, DriverExt, EntryPoint};

/// A parsed `GL_VERSION` string, plus the extension list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Capabilities {
    /// Major and minor version numbers.
    pub version: (u32, u32),
    /// True for OpenGL ES contexts.
    pub es: bool,
    pub extensions: BTreeSet<String>,
}

impl Capabilities {
    /// Query `driver` for its version and extensions.
    pub fn detect<D: Driver + ?Sized>(driver: &D) -> Capabilities {
        let version_string = driver.get_string(gl::VERSION);
        let (version, es) = parse_version(&version_string);

        // Core contexts from 3.0 on list extensions one at a time; the
        // space-separated `GL_EXTENSIONS` string is gone in core profiles.
        let extensions: BTreeSet<String> = if at_least(version, es, (3, 0), (3, 0)) {
            let count = driver.get_integer(gl::NUM_EXTENSIONS).max(0) as GLuint;
            (0..count).map(|i| driver.get_string_i(gl::EXTENSIONS, i)).collect()
        } else {
            driver.get_string(gl::EXTENSIONS)
                .split_whitespace()
                .map(str::to_string)
                .collect()
        };

        log::debug!("detected OpenGL{} {}.{} with {} extensions",
                    if es { " ES" } else { "" }, version.0, version.1, extensions.len());

        Capabilities { version, es, extensions }
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains(name)
    }

    /// Return true if this is a desktop context of at least version `gl`, or
    /// an ES context of at least version `es`.
    pub fn at_least(&self, gl: (u32, u32), es: (u32, u32)) -> bool {
        at_least(self.version, self.es, gl, es)
    }

    /// Return true if this is a desktop context of at least version `gl`.
    pub fn gl_at_least(&self, gl: (u32, u32)) -> bool {
        !self.es && self.version >= gl
    }

    /// Return true if this is an ES context of at least version `es`.
    pub fn es_at_least(&self, es: (u32, u32)) -> bool {
        self.es && self.version >= es
    }

    /// Return true if the context provides `feature`. Entry points a
    /// feature needs are checked against `driver`.
    pub fn supports<D: Driver + ?Sized>(&self, driver: &D, feature: Feature) -> bool {
        use Feature::*;
        let ext = |name: &str| self.has_extension(name);
        match feature {
            VertexArrayObject =>
                self.at_least((3, 0), (3, 0))
                || ext("GL_ARB_vertex_array_object")
                || ext("GL_OES_vertex_array_object"),
            FramebufferObject =>
                self.at_least((3, 0), (2, 0)) || ext("GL_ARB_framebuffer_object"),
            TransformFeedbackObject =>
                (self.at_least((4, 0), (3, 0)) || ext("GL_ARB_transform_feedback2"))
                && driver.has_entry_point(EntryPoint::TransformFeedback),
            TextureStorage =>
                self.at_least((4, 2), (3, 0)) || ext("GL_ARB_texture_storage"),
            InstancedDrawing =>
                self.at_least((3, 1), (3, 0)) || ext("GL_ARB_draw_instanced"),
            InstancedArrays =>
                self.at_least((3, 3), (3, 0)) || ext("GL_ARB_instanced_arrays"),
            IntegerAttributes => self.at_least((3, 0), (3, 0)),
            MapBufferRange =>
                self.at_least((3, 0), (3, 0)) || ext("GL_ARB_map_buffer_range"),
            UniformBuffer =>
                self.at_least((3, 1), (3, 0)) || ext("GL_ARB_uniform_buffer_object"),
            ShaderStorageBuffer =>
                self.at_least((4, 3), (3, 1)) || ext("GL_ARB_shader_storage_buffer_object"),
            TextureBuffer =>
                self.at_least((3, 1), (3, 2)) || ext("GL_ARB_texture_buffer_object"),
            Texture1D =>
                !self.es && driver.has_entry_point(EntryPoint::TexImage1D),
            Texture3D => self.at_least((1, 2), (3, 0)),
            TextureSwizzle =>
                self.at_least((3, 3), (3, 0)) || ext("GL_ARB_texture_swizzle"),
            TextureBorderColor =>
                (!self.es || self.es_at_least((3, 2)) || ext("GL_OES_texture_border_clamp"))
                && driver.has_entry_point(EntryPoint::TexParameterVector),
            Anisotropy =>
                self.gl_at_least((4, 6))
                || ext("GL_ARB_texture_filter_anisotropic")
                || ext("GL_EXT_texture_filter_anisotropic"),
            GetTexImage =>
                !self.es && driver.has_entry_point(EntryPoint::GetTexImage),
            TextureLevelQueries =>
                (!self.es || self.es_at_least((3, 1)))
                && driver.has_entry_point(EntryPoint::TexLevelParameter),
            MultisampleRenderbuffer =>
                self.at_least((3, 0), (3, 0))
                && driver.has_entry_point(EntryPoint::RenderbufferStorageMultisample),
            TransformFeedbackVaryings =>
                (self.at_least((3, 0), (3, 0)) || ext("GL_EXT_transform_feedback"))
                && driver.has_entry_point(EntryPoint::TransformFeedbackVaryings),
            FramebufferBlit =>
                self.at_least((3, 0), (3, 0)) || ext("GL_ARB_framebuffer_object"),
            FramebufferTextureLayer =>
                self.at_least((3, 0), (3, 0)) || ext("GL_ARB_framebuffer_object"),
            DrawBuffers =>
                self.at_least((2, 0), (3, 0)) || ext("GL_EXT_draw_buffers"),
            UnsignedIntegerUniforms => self.at_least((3, 0), (3, 0)),
            ReadPixels => driver.has_entry_point(EntryPoint::ReadPixels),
            PolygonMode => !self.es && driver.has_entry_point(EntryPoint::PolygonMode),
            PointSize => !self.es && driver.has_entry_point(EntryPoint::PointSize),
            ProvokingVertex =>
                (self.gl_at_least((3, 2)) || ext("GL_ARB_provoking_vertex"))
                && driver.has_entry_point(EntryPoint::ProvokingVertex),
            LogicOp => !self.es && driver.has_entry_point(EntryPoint::LogicOp),
            IndexedState =>
                (self.at_least((4, 0), (3, 2)) || ext("GL_ARB_draw_buffers_blend"))
                && driver.has_entry_point(EntryPoint::IndexedState),
            MemoryBarrier =>
                (self.at_least((4, 2), (3, 1)) || ext("GL_ARB_shader_image_load_store"))
                && driver.has_entry_point(EntryPoint::MemoryBarrier),
            Compute =>
                (self.at_least((4, 3), (3, 1)) || ext("GL_ARB_compute_shader"))
                && driver.has_entry_point(EntryPoint::DispatchCompute),
            PrimitiveRestartIndex =>
                self.gl_at_least((3, 1))
                && driver.has_entry_point(EntryPoint::PrimitiveRestartIndex),
            DrawRangeElements =>
                self.at_least((1, 2), (3, 0))
                && driver.has_entry_point(EntryPoint::DrawRangeElements),
            BaseVertex =>
                (self.at_least((3, 2), (3, 2)) || ext("GL_ARB_draw_elements_base_vertex"))
                && driver.has_entry_point(EntryPoint::BaseVertex),
            GetUniform =>
                self.at_least((3, 0), (3, 0))
                && driver.has_entry_point(EntryPoint::GetUniform),
            DoubleAttributes =>
                (self.gl_at_least((4, 1)) || ext("GL_ARB_vertex_attrib_64bit"))
                && driver.has_entry_point(EntryPoint::VertexAttribLPointer),
            BindlessTexture =>
                ext("GL_ARB_bindless_texture")
                && driver.has_entry_point(EntryPoint::BindlessTexture),
        }
    }
}

/// Functionality that not every context provides.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Feature {
    VertexArrayObject,
    FramebufferObject,
    TransformFeedbackObject,
    TextureStorage,
    InstancedDrawing,
    InstancedArrays,
    IntegerAttributes,
    MapBufferRange,
    UniformBuffer,
    ShaderStorageBuffer,
    TextureBuffer,
    Texture1D,
    Texture3D,
    TextureSwizzle,
    TextureBorderColor,
    Anisotropy,
    GetTexImage,
    TextureLevelQueries,
    MultisampleRenderbuffer,
    TransformFeedbackVaryings,
    FramebufferBlit,
    FramebufferTextureLayer,
    /// `glDrawBuffers` and `glReadBuffer`.
    DrawBuffers,
    UnsignedIntegerUniforms,
    ReadPixels,
    PolygonMode,
    PointSize,
    ProvokingVertex,
    LogicOp,
    /// Per-draw-buffer enables, blend functions, and color masks.
    IndexedState,
    MemoryBarrier,
    /// Compute shaders and `glDispatchCompute`.
    Compute,
    PrimitiveRestartIndex,
    DrawRangeElements,
    BaseVertex,
    /// Reading uniform values back from a program.
    GetUniform,
    /// 64-bit vertex attributes, fed with `glVertexAttribLPointer`.
    DoubleAttributes,
    /// `GL_ARB_bindless_texture` handles.
    BindlessTexture,
}

impl fmt::Display for Feature {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, fmt)
    }
}

fn at_least(version: (u32, u32), es: bool, gl: (u32, u32), gles: (u32, u32)) -> bool {
    version >= if es { gles } else { gl }
}

/// Parse a `GL_VERSION` string into `((major, minor), is_es)`.
///
/// Desktop strings start with the version (`"4.6.0 NVIDIA 535.54"`); ES
/// strings start with `"OpenGL ES "` and may carry a profile suffix
/// (`"OpenGL ES-CM 1.1"`). Anything unparseable reads as version 0.0.
pub fn parse_version(version: &str) -> ((u32, u32), bool) {
    let (rest, es) = match version.strip_prefix("OpenGL ES") {
        Some(rest) => (rest.trim_start_matches(|c: char| c != ' ').trim_start(), true),
        None => (version.trim_start(), false),
    };

    let number = rest.split_whitespace().next().unwrap_or("");
    let mut parts = number.split('.').map(|part| {
        let digits: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
        digits.parse::<u32>().ok()
    });
    let major = parts.next().flatten();
    let minor = parts.next().flatten();

    match (major, minor) {
        (Some(major), Some(minor)) => ((major, minor), es),
        (Some(major), None) => ((major, 0), es),
        _ => ((0, 0), es),
    }
}

#[test]
fn test_parse_version() {
    fn check(s: &str, version: (u32, u32), es: bool) {
        assert_eq!(parse_version(s), (version, es), "{:?}", s);
    }

    check("4.6.0 NVIDIA 535.54.03", (4, 6), false);
    check("3.3 (Core Profile) Mesa 23.1.4", (3, 3), false);
    check("2.1", (2, 1), false);
    check("OpenGL ES 3.2 Mesa 23.1.4", (3, 2), true);
    check("OpenGL ES 2.0", (2, 0), true);
    check("OpenGL ES-CM 1.1", (1, 1), true);
    check("", (0, 0), false);
    check("garbage", (0, 0), false);
}

#[test]
fn test_at_least() {
    let caps = Capabilities { version: (3, 3), es: false, extensions: BTreeSet::new() };
    assert!(caps.at_least((3, 0), (3, 0)));
    assert!(caps.at_least((3, 3), (9, 9)));
    assert!(!caps.at_least((4, 0), (2, 0)));

    let es = Capabilities { version: (3, 0), es: true, ..caps };
    assert!(es.at_least((4, 6), (3, 0)));
    assert!(!es.at_least((1, 0), (3, 1)));
}
