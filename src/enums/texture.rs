//! Texture sampling parameters, cube map faces, and framebuffer attachment
//! points.

use gleam::gl::GLenum;

gl_enum! {
    pub enum MinFilter {
        Nearest = gl::NEAREST,
        Linear = gl::LINEAR,
        NearestMipmapNearest = gl::NEAREST_MIPMAP_NEAREST,
        LinearMipmapNearest = gl::LINEAR_MIPMAP_NEAREST,
        NearestMipmapLinear = gl::NEAREST_MIPMAP_LINEAR,
        LinearMipmapLinear = gl::LINEAR_MIPMAP_LINEAR,
    }
}

gl_enum! {
    /// Magnification filters; also the filters `glBlitFramebuffer` accepts.
    pub enum MagFilter {
        Nearest = gl::NEAREST,
        Linear = gl::LINEAR,
    }
}

gl_enum! {
    pub enum WrapMode {
        Repeat = gl::REPEAT,
        MirroredRepeat = gl::MIRRORED_REPEAT,
        ClampToEdge = gl::CLAMP_TO_EDGE,
        ClampToBorder = gl::CLAMP_TO_BORDER,
        MirrorClampToEdge = gl::MIRROR_CLAMP_TO_EDGE,
    }
}

gl_enum! {
    /// Where a texture swizzle takes a channel's value from.
    pub enum SwizzleMode {
        Red = gl::RED,
        Green = gl::GREEN,
        Blue = gl::BLUE,
        Alpha = gl::ALPHA,
        Zero = gl::ZERO,
        One = gl::ONE,
    }
}

gl_enum! {
    pub enum CompareMode {
        None = gl::NONE,
        CompareRefToTexture = gl::COMPARE_REF_TO_TEXTURE,
    }
}

gl_enum! {
    /// Comparison functions, used both by depth-texture comparisons and the
    /// depth test.
    pub enum CompareFunc {
        Never = gl::NEVER,
        Less = gl::LESS,
        Equal = gl::EQUAL,
        Lequal = gl::LEQUAL,
        Greater = gl::GREATER,
        Notequal = gl::NOTEQUAL,
        Gequal = gl::GEQUAL,
        Always = gl::ALWAYS,
    }
}

gl_enum! {
    pub enum CubeFace {
        PositiveX = gl::TEXTURE_CUBE_MAP_POSITIVE_X,
        NegativeX = gl::TEXTURE_CUBE_MAP_NEGATIVE_X,
        PositiveY = gl::TEXTURE_CUBE_MAP_POSITIVE_Y,
        NegativeY = gl::TEXTURE_CUBE_MAP_NEGATIVE_Y,
        PositiveZ = gl::TEXTURE_CUBE_MAP_POSITIVE_Z,
        NegativeZ = gl::TEXTURE_CUBE_MAP_NEGATIVE_Z,
    }
}

gl_enum! {
    pub enum FramebufferStatus {
        Complete = gl::FRAMEBUFFER_COMPLETE,
        Undefined = gl::FRAMEBUFFER_UNDEFINED,
        IncompleteAttachment = gl::FRAMEBUFFER_INCOMPLETE_ATTACHMENT,
        IncompleteMissingAttachment = gl::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT,
        IncompleteDrawBuffer = gl::FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER,
        IncompleteReadBuffer = gl::FRAMEBUFFER_INCOMPLETE_READ_BUFFER,
        Unsupported = gl::FRAMEBUFFER_UNSUPPORTED,
        IncompleteMultisample = gl::FRAMEBUFFER_INCOMPLETE_MULTISAMPLE,
        IncompleteLayerTargets = gl::FRAMEBUFFER_INCOMPLETE_LAYER_TARGETS,
    }
}

impl FramebufferStatus {
    /// A sentence explaining what makes a framebuffer with this status
    /// unusable.
    pub fn message(self) -> &'static str {
        match self {
            FramebufferStatus::Complete =>
                "the framebuffer is complete",
            FramebufferStatus::Undefined =>
                "the default framebuffer is bound, but it does not exist",
            FramebufferStatus::IncompleteAttachment =>
                "an attachment point is framebuffer incomplete",
            FramebufferStatus::IncompleteMissingAttachment =>
                "the framebuffer does not have any images attached to it",
            FramebufferStatus::IncompleteDrawBuffer =>
                "a draw buffer names a color attachment point with no image attached",
            FramebufferStatus::IncompleteReadBuffer =>
                "the read buffer names a color attachment point with no image attached",
            FramebufferStatus::Unsupported =>
                "the combination of internal formats of the attached images \
                 violates an implementation-dependent set of restrictions",
            FramebufferStatus::IncompleteMultisample =>
                "the attached images do not all have the same number of samples, \
                 or do not all use fixed sample locations",
            FramebufferStatus::IncompleteLayerTargets =>
                "an attachment is layered while another populated attachment is not, \
                 or the layered attachments are not all from the same kind of texture",
        }
    }
}

/// An attachment point of a framebuffer object.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FramebufferAttachment {
    /// `GL_COLOR_ATTACHMENTi`.
    Color(u32),
    Depth,
    Stencil,
    DepthStencil,
}

impl FramebufferAttachment {
    pub fn as_gl(self) -> GLenum {
        match self {
            FramebufferAttachment::Color(i) => gl::COLOR_ATTACHMENT0 + i,
            FramebufferAttachment::Depth => gl::DEPTH_ATTACHMENT,
            FramebufferAttachment::Stencil => gl::STENCIL_ATTACHMENT,
            FramebufferAttachment::DepthStencil => gl::DEPTH_STENCIL_ATTACHMENT,
        }
    }
}

impl From<FramebufferAttachment> for GLenum {
    fn from(value: FramebufferAttachment) -> GLenum {
        value.as_gl()
    }
}

impl std::convert::TryFrom<GLenum> for FramebufferAttachment {
    type Error = crate::Error;

    fn try_from(value: GLenum) -> Result<FramebufferAttachment, crate::Error> {
        // Implementations support at most 32 color attachments.
        match value {
            gl::DEPTH_ATTACHMENT => Ok(FramebufferAttachment::Depth),
            gl::STENCIL_ATTACHMENT => Ok(FramebufferAttachment::Stencil),
            gl::DEPTH_STENCIL_ATTACHMENT => Ok(FramebufferAttachment::DepthStencil),
            v if v >= gl::COLOR_ATTACHMENT0 && v < gl::COLOR_ATTACHMENT0 + 32 =>
                Ok(FramebufferAttachment::Color(v - gl::COLOR_ATTACHMENT0)),
            _ => Err(crate::Error::UnknownEnum { kind: "FramebufferAttachment", value }),
        }
    }
}

gl_enum! {
    /// Values `glDrawBuffers` accepts besides color attachments.
    pub enum ColorBuffer {
        None = gl::NONE,
        FrontLeft = gl::FRONT_LEFT,
        FrontRight = gl::FRONT_RIGHT,
        BackLeft = gl::BACK_LEFT,
        BackRight = gl::BACK_RIGHT,
        ColorAttachment0 = gl::COLOR_ATTACHMENT0,
        ColorAttachment1 = gl::COLOR_ATTACHMENT1,
        ColorAttachment2 = gl::COLOR_ATTACHMENT2,
        ColorAttachment3 = gl::COLOR_ATTACHMENT3,
        ColorAttachment4 = gl::COLOR_ATTACHMENT4,
        ColorAttachment5 = gl::COLOR_ATTACHMENT5,
        ColorAttachment6 = gl::COLOR_ATTACHMENT6,
        ColorAttachment7 = gl::COLOR_ATTACHMENT7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test_attachments() {
        fn check(attachment: FramebufferAttachment, value: GLenum) {
            assert_eq!(attachment.as_gl(), value);
            assert_eq!(FramebufferAttachment::try_from(value).unwrap(), attachment);
        }

        check(FramebufferAttachment::Color(0), gl::COLOR_ATTACHMENT0);
        check(FramebufferAttachment::Color(3), gl::COLOR_ATTACHMENT3);
        check(FramebufferAttachment::Depth, gl::DEPTH_ATTACHMENT);
        check(FramebufferAttachment::Stencil, gl::STENCIL_ATTACHMENT);
        check(FramebufferAttachment::DepthStencil, gl::DEPTH_STENCIL_ATTACHMENT);
        assert!(FramebufferAttachment::try_from(gl::TEXTURE_2D).is_err());
    }

    #[test]
    fn test_cube_faces_are_consecutive() {
        for (i, &face) in CubeFace::ALL.iter().enumerate() {
            assert_eq!(face.as_gl(), gl::TEXTURE_CUBE_MAP_POSITIVE_X + i as GLenum);
        }
    }

    #[test]
    fn test_status_round_trip() {
        for &status in FramebufferStatus::ALL {
            assert_eq!(FramebufferStatus::try_from(status.as_gl()).unwrap(), status);
            assert!(!status.message().is_empty());
        }
    }
}
