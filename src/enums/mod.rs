//! Typed replacements for the raw `GLenum` values GL entry points accept.
//!
//! Each enum here converts to exactly the `GL_*` constant it wraps
//! (`GLenum::from(e)` or `e.as_gl()`), and back again with `TryFrom<GLenum>`,
//! which fails with `Error::UnknownEnum` for values outside the enum.

use gleam::gl::GLenum;

macro_rules! gl_enum {
    (
        $( #[$meta:meta] )*
        pub enum $name:ident {
            $( $( #[$vmeta:meta] )* $variant:ident = $value:expr ),* $(,)?
        }
    ) => {
        $( #[$meta] )*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $( #[$vmeta] )* $variant ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),* ];

            /// Return the `GLenum` value this variant stands for.
            pub fn as_gl(self) -> gleam::gl::GLenum {
                match self {
                    $( $name::$variant => $value ),*
                }
            }

            /// The C name of the constant, like `"GL_ARRAY_BUFFER_BINDING"`.
            pub fn gl_name(self) -> String {
                let constant = match self {
                    $( $name::$variant => stringify!($value) ),*
                };
                format!("GL_{}", constant.trim_start_matches("gl::"))
            }
        }

        impl From<$name> for gleam::gl::GLenum {
            fn from(value: $name) -> gleam::gl::GLenum {
                value.as_gl()
            }
        }

        impl std::convert::TryFrom<gleam::gl::GLenum> for $name {
            type Error = crate::Error;

            fn try_from(value: gleam::gl::GLenum) -> Result<$name, crate::Error> {
                $(
                    if value == $value {
                        return Ok($name::$variant);
                    }
                )*
                Err(crate::Error::UnknownEnum { kind: stringify!($name), value })
            }
        }
    }
}

mod binding;
mod pixel;
mod state;
mod texture;

pub use binding::*;
pub use pixel::*;
pub use state::*;
pub use texture::*;

/// `GL_TABLE_TOO_LARGE`, from the imaging subset. Core-profile bindings don't
/// define it, but compatibility drivers still return it from `glGetError`.
pub const TABLE_TOO_LARGE: GLenum = 0x8031;

/// `GL_TEXTURE_MAX_ANISOTROPY`, core in 4.6 and the same value as the
/// `EXT`/`ARB` extension token. The 4.5 bindings stop short of it.
pub const TEXTURE_MAX_ANISOTROPY: GLenum = 0x84FE;

/// `GL_MAX_TEXTURE_MAX_ANISOTROPY`, the limit for `TEXTURE_MAX_ANISOTROPY`.
pub const MAX_TEXTURE_MAX_ANISOTROPY: GLenum = 0x84FF;

gl_enum! {
    /// The error flags `glGetError` can report.
    pub enum ErrorType {
        InvalidEnum = gl::INVALID_ENUM,
        InvalidValue = gl::INVALID_VALUE,
        InvalidOperation = gl::INVALID_OPERATION,
        StackOverflow = gl::STACK_OVERFLOW,
        StackUnderflow = gl::STACK_UNDERFLOW,
        OutOfMemory = gl::OUT_OF_MEMORY,
        InvalidFramebufferOperation = gl::INVALID_FRAMEBUFFER_OPERATION,
        TableTooLarge = TABLE_TOO_LARGE,
    }
}

impl ErrorType {
    /// The heading diagnostics use for this error.
    pub fn title(self) -> &'static str {
        match self {
            ErrorType::InvalidEnum => "Invalid Enum",
            ErrorType::InvalidValue => "Invalid Value",
            ErrorType::InvalidOperation => "Invalid Operation",
            ErrorType::StackOverflow => "Stack Overflow",
            ErrorType::StackUnderflow => "Stack Underflow",
            ErrorType::OutOfMemory => "Out of Memory",
            ErrorType::InvalidFramebufferOperation => "Invalid Framebuffer Operation",
            ErrorType::TableTooLarge => "Table Too Large",
        }
    }
}

gl_enum! {
    /// Strings `glGetString` can return.
    pub enum StringName {
        Vendor = gl::VENDOR,
        Renderer = gl::RENDERER,
        Version = gl::VERSION,
        ShadingLanguageVersion = gl::SHADING_LANGUAGE_VERSION,
        Extensions = gl::EXTENSIONS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test_error_type() {
        assert_eq!(ErrorType::InvalidEnum.as_gl(), 0x0500);
        assert_eq!(ErrorType::InvalidFramebufferOperation.as_gl(), 0x0506);
        assert_eq!(ErrorType::try_from(0x0502).unwrap(), ErrorType::InvalidOperation);
        assert_eq!(ErrorType::try_from(0x8031).unwrap(), ErrorType::TableTooLarge);
        assert!(ErrorType::try_from(gl::NO_ERROR).is_err());

        assert_eq!(ErrorType::InvalidOperation.gl_name(), "GL_INVALID_OPERATION");
        assert_eq!(ErrorType::TableTooLarge.gl_name(), "GL_TABLE_TOO_LARGE");

        for &e in ErrorType::ALL {
            assert_eq!(ErrorType::try_from(GLenum::from(e)).unwrap(), e);
        }
    }

    #[test]
    fn test_every_enum_round_trips() {
        macro_rules! check {
            ($($ty:ident),* $(,)?) => {$(
                for &v in $ty::ALL {
                    assert_eq!($ty::try_from(v.as_gl()).unwrap(), v);
                    assert_eq!(GLenum::from(v), v.as_gl());
                    assert!(v.gl_name().starts_with("GL_"), "{:?}", v);
                }
            )*}
        }

        check!(
            BufferType, BufferBinding, IndexedBufferType, IndexedBufferBinding,
            TextureType, TextureBinding, FramebufferType, FramebufferBinding,
            RenderbufferType, RenderbufferBinding, TransformFeedbackType,
            TransformFeedbackBinding, ErrorType, StringName, PixelDataFormat,
            PixelDataType, PixelDataInternalFormat, DataType, BufferUsage,
            Capability, BlendFactor, BlendEquation, Face, FaceOrientation,
            StencilOperation, PrimitiveType, TransformFeedbackPrimitive,
            TransformFeedbackBufferMode, ShaderType, PolygonMode, ProvokingVertex,
            LogicOp, HintTarget, HintMode, MinFilter, MagFilter, WrapMode,
            SwizzleMode, CompareMode, CompareFunc, CubeFace, FramebufferStatus,
            ColorBuffer,
        );

        assert_eq!(PolygonMode::Line.gl_name(), "GL_LINE");
        assert_eq!(LogicOp::try_from(gl::XOR).unwrap(), LogicOp::Xor);
    }

    #[test]
    fn test_anisotropy_tokens() {
        // Must match GL_EXT_texture_filter_anisotropic.
        assert_eq!(TEXTURE_MAX_ANISOTROPY, 0x84FE);
        assert_eq!(MAX_TEXTURE_MAX_ANISOTROPY, 0x84FF);
        assert!(TextureType::try_from(TEXTURE_MAX_ANISOTROPY).is_err());
    }

    #[test]
    fn test_unknown_enum_message() {
        let err = StringName::try_from(0x1234).unwrap_err();
        assert_eq!(err.to_string(), "0x1234 is not a valid StringName");
    }
}
