//! Bind targets, and the queries that report what is bound to them.
//!
//! Every target enum has a `binding()` method mapping it to the `glGet*`
//! parameter that names the object currently bound there. These tables are
//! written out by hand: GL's naming isn't regular enough to compute them
//! (`GL_COPY_READ_BUFFER` is its own query, and the buffer bound to
//! `GL_TEXTURE_BUFFER` is reported by `GL_TEXTURE_BUFFER` too, while
//! `GL_TEXTURE_BINDING_BUFFER` reports the buffer texture).

gl_enum! {
    /// Targets a `Buffer` can be bound to.
    pub enum BufferType {
        Array = gl::ARRAY_BUFFER,
        AtomicCounter = gl::ATOMIC_COUNTER_BUFFER,
        CopyRead = gl::COPY_READ_BUFFER,
        CopyWrite = gl::COPY_WRITE_BUFFER,
        DispatchIndirect = gl::DISPATCH_INDIRECT_BUFFER,
        DrawIndirect = gl::DRAW_INDIRECT_BUFFER,
        ElementArray = gl::ELEMENT_ARRAY_BUFFER,
        PixelPack = gl::PIXEL_PACK_BUFFER,
        PixelUnpack = gl::PIXEL_UNPACK_BUFFER,
        ShaderStorage = gl::SHADER_STORAGE_BUFFER,
        Texture = gl::TEXTURE_BUFFER,
        TransformFeedback = gl::TRANSFORM_FEEDBACK_BUFFER,
        Uniform = gl::UNIFORM_BUFFER,
    }
}

gl_enum! {
    pub enum BufferBinding {
        ArrayBufferBinding = gl::ARRAY_BUFFER_BINDING,
        AtomicCounterBufferBinding = gl::ATOMIC_COUNTER_BUFFER_BINDING,
        CopyReadBuffer = gl::COPY_READ_BUFFER,
        CopyWriteBuffer = gl::COPY_WRITE_BUFFER,
        DispatchIndirectBufferBinding = gl::DISPATCH_INDIRECT_BUFFER_BINDING,
        DrawIndirectBufferBinding = gl::DRAW_INDIRECT_BUFFER_BINDING,
        ElementArrayBufferBinding = gl::ELEMENT_ARRAY_BUFFER_BINDING,
        PixelPackBufferBinding = gl::PIXEL_PACK_BUFFER_BINDING,
        PixelUnpackBufferBinding = gl::PIXEL_UNPACK_BUFFER_BINDING,
        ShaderStorageBufferBinding = gl::SHADER_STORAGE_BUFFER_BINDING,
        TextureBuffer = gl::TEXTURE_BUFFER,
        TransformFeedbackBufferBinding = gl::TRANSFORM_FEEDBACK_BUFFER_BINDING,
        UniformBufferBinding = gl::UNIFORM_BUFFER_BINDING,
    }
}

impl BufferType {
    pub fn binding(self) -> BufferBinding {
        match self {
            BufferType::Array => BufferBinding::ArrayBufferBinding,
            BufferType::AtomicCounter => BufferBinding::AtomicCounterBufferBinding,
            BufferType::CopyRead => BufferBinding::CopyReadBuffer,
            BufferType::CopyWrite => BufferBinding::CopyWriteBuffer,
            BufferType::DispatchIndirect => BufferBinding::DispatchIndirectBufferBinding,
            BufferType::DrawIndirect => BufferBinding::DrawIndirectBufferBinding,
            BufferType::ElementArray => BufferBinding::ElementArrayBufferBinding,
            BufferType::PixelPack => BufferBinding::PixelPackBufferBinding,
            BufferType::PixelUnpack => BufferBinding::PixelUnpackBufferBinding,
            BufferType::ShaderStorage => BufferBinding::ShaderStorageBufferBinding,
            BufferType::Texture => BufferBinding::TextureBuffer,
            BufferType::TransformFeedback => BufferBinding::TransformFeedbackBufferBinding,
            BufferType::Uniform => BufferBinding::UniformBufferBinding,
        }
    }
}

gl_enum! {
    /// Targets with an array of indexed binding points, set with
    /// `glBindBufferBase` and `glBindBufferRange`.
    pub enum IndexedBufferType {
        AtomicCounter = gl::ATOMIC_COUNTER_BUFFER,
        ShaderStorage = gl::SHADER_STORAGE_BUFFER,
        TransformFeedback = gl::TRANSFORM_FEEDBACK_BUFFER,
        Uniform = gl::UNIFORM_BUFFER,
    }
}

gl_enum! {
    /// Queries for indexed binding points, passed to `glGetIntegeri_v`.
    pub enum IndexedBufferBinding {
        AtomicCounterBufferBinding = gl::ATOMIC_COUNTER_BUFFER_BINDING,
        ShaderStorageBufferBinding = gl::SHADER_STORAGE_BUFFER_BINDING,
        TransformFeedbackBufferBinding = gl::TRANSFORM_FEEDBACK_BUFFER_BINDING,
        UniformBufferBinding = gl::UNIFORM_BUFFER_BINDING,
    }
}

impl IndexedBufferType {
    pub fn binding(self) -> IndexedBufferBinding {
        match self {
            IndexedBufferType::AtomicCounter => IndexedBufferBinding::AtomicCounterBufferBinding,
            IndexedBufferType::ShaderStorage => IndexedBufferBinding::ShaderStorageBufferBinding,
            IndexedBufferType::TransformFeedback => IndexedBufferBinding::TransformFeedbackBufferBinding,
            IndexedBufferType::Uniform => IndexedBufferBinding::UniformBufferBinding,
        }
    }

    /// The generic (non-indexed) target sharing this target's name.
    pub fn buffer_type(self) -> BufferType {
        match self {
            IndexedBufferType::AtomicCounter => BufferType::AtomicCounter,
            IndexedBufferType::ShaderStorage => BufferType::ShaderStorage,
            IndexedBufferType::TransformFeedback => BufferType::TransformFeedback,
            IndexedBufferType::Uniform => BufferType::Uniform,
        }
    }
}

gl_enum! {
    pub enum TextureType {
        Texture1D = gl::TEXTURE_1D,
        Texture1DArray = gl::TEXTURE_1D_ARRAY,
        Texture2D = gl::TEXTURE_2D,
        Texture2DArray = gl::TEXTURE_2D_ARRAY,
        Texture2DMultisample = gl::TEXTURE_2D_MULTISAMPLE,
        Texture2DMultisampleArray = gl::TEXTURE_2D_MULTISAMPLE_ARRAY,
        Texture3D = gl::TEXTURE_3D,
        TextureCubeMap = gl::TEXTURE_CUBE_MAP,
        TextureCubeMapArray = gl::TEXTURE_CUBE_MAP_ARRAY,
        TextureRectangle = gl::TEXTURE_RECTANGLE,
        TextureBuffer = gl::TEXTURE_BUFFER,
    }
}

gl_enum! {
    pub enum TextureBinding {
        TextureBinding1D = gl::TEXTURE_BINDING_1D,
        TextureBinding1DArray = gl::TEXTURE_BINDING_1D_ARRAY,
        TextureBinding2D = gl::TEXTURE_BINDING_2D,
        TextureBinding2DArray = gl::TEXTURE_BINDING_2D_ARRAY,
        TextureBinding2DMultisample = gl::TEXTURE_BINDING_2D_MULTISAMPLE,
        TextureBinding2DMultisampleArray = gl::TEXTURE_BINDING_2D_MULTISAMPLE_ARRAY,
        TextureBinding3D = gl::TEXTURE_BINDING_3D,
        TextureBindingCubeMap = gl::TEXTURE_BINDING_CUBE_MAP,
        TextureBindingCubeMapArray = gl::TEXTURE_BINDING_CUBE_MAP_ARRAY,
        TextureBindingRectangle = gl::TEXTURE_BINDING_RECTANGLE,
        TextureBindingBuffer = gl::TEXTURE_BINDING_BUFFER,
    }
}

impl TextureType {
    pub fn binding(self) -> TextureBinding {
        match self {
            TextureType::Texture1D => TextureBinding::TextureBinding1D,
            TextureType::Texture1DArray => TextureBinding::TextureBinding1DArray,
            TextureType::Texture2D => TextureBinding::TextureBinding2D,
            TextureType::Texture2DArray => TextureBinding::TextureBinding2DArray,
            TextureType::Texture2DMultisample => TextureBinding::TextureBinding2DMultisample,
            TextureType::Texture2DMultisampleArray => TextureBinding::TextureBinding2DMultisampleArray,
            TextureType::Texture3D => TextureBinding::TextureBinding3D,
            TextureType::TextureCubeMap => TextureBinding::TextureBindingCubeMap,
            TextureType::TextureCubeMapArray => TextureBinding::TextureBindingCubeMapArray,
            TextureType::TextureRectangle => TextureBinding::TextureBindingRectangle,
            TextureType::TextureBuffer => TextureBinding::TextureBindingBuffer,
        }
    }

    /// How many coordinates address a texel of one image layer of this
    /// target: 1, 2, or 3.
    pub fn dimensions(self) -> u32 {
        match self {
            TextureType::Texture1D | TextureType::TextureBuffer => 1,
            TextureType::Texture1DArray
            | TextureType::Texture2D
            | TextureType::Texture2DMultisample
            | TextureType::TextureCubeMap
            | TextureType::TextureRectangle => 2,
            TextureType::Texture2DArray
            | TextureType::Texture2DMultisampleArray
            | TextureType::Texture3D
            | TextureType::TextureCubeMapArray => 3,
        }
    }
}

gl_enum! {
    pub enum FramebufferType {
        Framebuffer = gl::FRAMEBUFFER,
        ReadFramebuffer = gl::READ_FRAMEBUFFER,
        DrawFramebuffer = gl::DRAW_FRAMEBUFFER,
    }
}

gl_enum! {
    /// `GL_FRAMEBUFFER_BINDING` has the same value as
    /// `GL_DRAW_FRAMEBUFFER_BINDING`, so it has no variant of its own.
    pub enum FramebufferBinding {
        DrawFramebufferBinding = gl::DRAW_FRAMEBUFFER_BINDING,
        ReadFramebufferBinding = gl::READ_FRAMEBUFFER_BINDING,
    }
}

impl FramebufferType {
    pub fn binding(self) -> FramebufferBinding {
        match self {
            FramebufferType::Framebuffer => FramebufferBinding::DrawFramebufferBinding,
            FramebufferType::ReadFramebuffer => FramebufferBinding::ReadFramebufferBinding,
            FramebufferType::DrawFramebuffer => FramebufferBinding::DrawFramebufferBinding,
        }
    }
}

gl_enum! {
    pub enum RenderbufferType {
        Renderbuffer = gl::RENDERBUFFER,
    }
}

gl_enum! {
    pub enum RenderbufferBinding {
        RenderbufferBinding = gl::RENDERBUFFER_BINDING,
    }
}

impl RenderbufferType {
    pub fn binding(self) -> RenderbufferBinding {
        match self {
            RenderbufferType::Renderbuffer => RenderbufferBinding::RenderbufferBinding,
        }
    }
}

gl_enum! {
    pub enum TransformFeedbackType {
        TransformFeedback = gl::TRANSFORM_FEEDBACK,
    }
}

gl_enum! {
    pub enum TransformFeedbackBinding {
        TransformFeedbackBinding = gl::TRANSFORM_FEEDBACK_BINDING,
    }
}

impl TransformFeedbackType {
    pub fn binding(self) -> TransformFeedbackBinding {
        match self {
            TransformFeedbackType::TransformFeedback => TransformFeedbackBinding::TransformFeedbackBinding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gleam::gl::GLenum;

    #[test]
    fn test_buffer_bindings() {
        fn check(target: BufferType, query: GLenum) {
            assert_eq!(target.binding().as_gl(), query, "{:?}", target);
        }

        check(BufferType::Array, gl::ARRAY_BUFFER_BINDING);
        check(BufferType::AtomicCounter, gl::ATOMIC_COUNTER_BUFFER_BINDING);
        check(BufferType::CopyRead, gl::COPY_READ_BUFFER);
        check(BufferType::CopyWrite, gl::COPY_WRITE_BUFFER);
        check(BufferType::DispatchIndirect, gl::DISPATCH_INDIRECT_BUFFER_BINDING);
        check(BufferType::DrawIndirect, gl::DRAW_INDIRECT_BUFFER_BINDING);
        check(BufferType::ElementArray, gl::ELEMENT_ARRAY_BUFFER_BINDING);
        check(BufferType::PixelPack, gl::PIXEL_PACK_BUFFER_BINDING);
        check(BufferType::PixelUnpack, gl::PIXEL_UNPACK_BUFFER_BINDING);
        check(BufferType::ShaderStorage, gl::SHADER_STORAGE_BUFFER_BINDING);
        check(BufferType::Texture, gl::TEXTURE_BUFFER);
        check(BufferType::TransformFeedback, gl::TRANSFORM_FEEDBACK_BUFFER_BINDING);
        check(BufferType::Uniform, gl::UNIFORM_BUFFER_BINDING);
    }

    #[test]
    fn test_indexed_buffer_bindings() {
        for &target in IndexedBufferType::ALL {
            // Indexed targets share their names and queries with the generic ones.
            assert_eq!(target.as_gl(), target.buffer_type().as_gl());
            assert_eq!(target.binding().as_gl(), target.buffer_type().binding().as_gl());
        }
    }

    #[test]
    fn test_texture_bindings() {
        fn check(target: TextureType, query: GLenum) {
            assert_eq!(target.binding().as_gl(), query, "{:?}", target);
        }

        check(TextureType::Texture1D, gl::TEXTURE_BINDING_1D);
        check(TextureType::Texture1DArray, gl::TEXTURE_BINDING_1D_ARRAY);
        check(TextureType::Texture2D, gl::TEXTURE_BINDING_2D);
        check(TextureType::Texture2DArray, gl::TEXTURE_BINDING_2D_ARRAY);
        check(TextureType::Texture2DMultisample, gl::TEXTURE_BINDING_2D_MULTISAMPLE);
        check(TextureType::Texture2DMultisampleArray, gl::TEXTURE_BINDING_2D_MULTISAMPLE_ARRAY);
        check(TextureType::Texture3D, gl::TEXTURE_BINDING_3D);
        check(TextureType::TextureCubeMap, gl::TEXTURE_BINDING_CUBE_MAP);
        check(TextureType::TextureCubeMapArray, gl::TEXTURE_BINDING_CUBE_MAP_ARRAY);
        check(TextureType::TextureRectangle, gl::TEXTURE_BINDING_RECTANGLE);
        check(TextureType::TextureBuffer, gl::TEXTURE_BINDING_BUFFER);
    }

    #[test]
    fn test_other_bindings() {
        assert_eq!(FramebufferType::Framebuffer.binding().as_gl(), gl::FRAMEBUFFER_BINDING);
        assert_eq!(FramebufferType::DrawFramebuffer.binding().as_gl(), gl::DRAW_FRAMEBUFFER_BINDING);
        assert_eq!(FramebufferType::ReadFramebuffer.binding().as_gl(), gl::READ_FRAMEBUFFER_BINDING);
        assert_eq!(RenderbufferType::Renderbuffer.binding().as_gl(), gl::RENDERBUFFER_BINDING);
        assert_eq!(TransformFeedbackType::TransformFeedback.binding().as_gl(),
                   gl::TRANSFORM_FEEDBACK_BINDING);
    }
}
