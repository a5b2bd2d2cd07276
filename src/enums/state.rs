//! Context state: capabilities, blending, rasterization, primitives, and
//! shader stages.

gl_enum! {
    /// Server-side capabilities toggled with `glEnable`/`glDisable`.
    pub enum Capability {
        Blend = gl::BLEND,
        ColorLogicOp = gl::COLOR_LOGIC_OP,
        CullFace = gl::CULL_FACE,
        DepthClamp = gl::DEPTH_CLAMP,
        DepthTest = gl::DEPTH_TEST,
        Dither = gl::DITHER,
        FramebufferSrgb = gl::FRAMEBUFFER_SRGB,
        LineSmooth = gl::LINE_SMOOTH,
        Multisample = gl::MULTISAMPLE,
        PolygonOffsetFill = gl::POLYGON_OFFSET_FILL,
        PolygonOffsetLine = gl::POLYGON_OFFSET_LINE,
        PrimitiveRestart = gl::PRIMITIVE_RESTART,
        ProgramPointSize = gl::PROGRAM_POINT_SIZE,
        RasterizerDiscard = gl::RASTERIZER_DISCARD,
        SampleAlphaToCoverage = gl::SAMPLE_ALPHA_TO_COVERAGE,
        ScissorTest = gl::SCISSOR_TEST,
        StencilTest = gl::STENCIL_TEST,
        TextureCubeMapSeamless = gl::TEXTURE_CUBE_MAP_SEAMLESS,
    }
}

gl_enum! {
    pub enum BlendFactor {
        Zero = gl::ZERO,
        One = gl::ONE,
        SrcColor = gl::SRC_COLOR,
        OneMinusSrcColor = gl::ONE_MINUS_SRC_COLOR,
        DstColor = gl::DST_COLOR,
        OneMinusDstColor = gl::ONE_MINUS_DST_COLOR,
        SrcAlpha = gl::SRC_ALPHA,
        OneMinusSrcAlpha = gl::ONE_MINUS_SRC_ALPHA,
        DstAlpha = gl::DST_ALPHA,
        OneMinusDstAlpha = gl::ONE_MINUS_DST_ALPHA,
        ConstantColor = gl::CONSTANT_COLOR,
        OneMinusConstantColor = gl::ONE_MINUS_CONSTANT_COLOR,
        ConstantAlpha = gl::CONSTANT_ALPHA,
        OneMinusConstantAlpha = gl::ONE_MINUS_CONSTANT_ALPHA,
        SrcAlphaSaturate = gl::SRC_ALPHA_SATURATE,
    }
}

gl_enum! {
    pub enum BlendEquation {
        FuncAdd = gl::FUNC_ADD,
        FuncSubtract = gl::FUNC_SUBTRACT,
        FuncReverseSubtract = gl::FUNC_REVERSE_SUBTRACT,
        Min = gl::MIN,
        Max = gl::MAX,
    }
}

gl_enum! {
    pub enum Face {
        Front = gl::FRONT,
        Back = gl::BACK,
        FrontAndBack = gl::FRONT_AND_BACK,
    }
}

gl_enum! {
    pub enum FaceOrientation {
        Cw = gl::CW,
        Ccw = gl::CCW,
    }
}

gl_enum! {
    pub enum StencilOperation {
        Keep = gl::KEEP,
        Zero = gl::ZERO,
        Replace = gl::REPLACE,
        Incr = gl::INCR,
        IncrWrap = gl::INCR_WRAP,
        Decr = gl::DECR,
        DecrWrap = gl::DECR_WRAP,
        Invert = gl::INVERT,
    }
}

gl_enum! {
    pub enum PrimitiveType {
        Points = gl::POINTS,
        LineStrip = gl::LINE_STRIP,
        LineLoop = gl::LINE_LOOP,
        Lines = gl::LINES,
        LineStripAdjacency = gl::LINE_STRIP_ADJACENCY,
        LinesAdjacency = gl::LINES_ADJACENCY,
        TriangleStrip = gl::TRIANGLE_STRIP,
        TriangleFan = gl::TRIANGLE_FAN,
        Triangles = gl::TRIANGLES,
        TriangleStripAdjacency = gl::TRIANGLE_STRIP_ADJACENCY,
        TrianglesAdjacency = gl::TRIANGLES_ADJACENCY,
        Patches = gl::PATCHES,
    }
}

gl_enum! {
    /// Primitive modes `glBeginTransformFeedback` accepts.
    pub enum TransformFeedbackPrimitive {
        Points = gl::POINTS,
        Lines = gl::LINES,
        Triangles = gl::TRIANGLES,
    }
}

gl_enum! {
    pub enum TransformFeedbackBufferMode {
        InterleavedAttribs = gl::INTERLEAVED_ATTRIBS,
        SeparateAttribs = gl::SEPARATE_ATTRIBS,
    }
}

gl_enum! {
    pub enum ShaderType {
        Vertex = gl::VERTEX_SHADER,
        Fragment = gl::FRAGMENT_SHADER,
        Geometry = gl::GEOMETRY_SHADER,
        TessControl = gl::TESS_CONTROL_SHADER,
        TessEvaluation = gl::TESS_EVALUATION_SHADER,
        Compute = gl::COMPUTE_SHADER,
    }
}

gl_enum! {
    pub enum PolygonMode {
        Point = gl::POINT,
        Line = gl::LINE,
        Fill = gl::FILL,
    }
}

gl_enum! {
    /// Which vertex of a primitive supplies flat-shaded outputs.
    pub enum ProvokingVertex {
        FirstVertexConvention = gl::FIRST_VERTEX_CONVENTION,
        LastVertexConvention = gl::LAST_VERTEX_CONVENTION,
    }
}

gl_enum! {
    /// The operation `Capability::ColorLogicOp` applies between source and
    /// destination colors.
    pub enum LogicOp {
        Clear = gl::CLEAR,
        And = gl::AND,
        AndReverse = gl::AND_REVERSE,
        Copy = gl::COPY,
        AndInverted = gl::AND_INVERTED,
        Noop = gl::NOOP,
        Xor = gl::XOR,
        Or = gl::OR,
        Nor = gl::NOR,
        Equiv = gl::EQUIV,
        Invert = gl::INVERT,
        OrReverse = gl::OR_REVERSE,
        CopyInverted = gl::COPY_INVERTED,
        OrInverted = gl::OR_INVERTED,
        Nand = gl::NAND,
        Set = gl::SET,
    }
}

gl_enum! {
    pub enum HintTarget {
        LineSmoothHint = gl::LINE_SMOOTH_HINT,
        PolygonSmoothHint = gl::POLYGON_SMOOTH_HINT,
        TextureCompressionHint = gl::TEXTURE_COMPRESSION_HINT,
        FragmentShaderDerivativeHint = gl::FRAGMENT_SHADER_DERIVATIVE_HINT,
    }
}

gl_enum! {
    pub enum HintMode {
        Fastest = gl::FASTEST,
        Nicest = gl::NICEST,
        DontCare = gl::DONT_CARE,
    }
}

bitflags::bitflags! {
    /// The kinds of incoherent memory access `glMemoryBarrier` orders.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct MemoryBarriers: u32 {
        const VERTEX_ATTRIB_ARRAY = gl::VERTEX_ATTRIB_ARRAY_BARRIER_BIT;
        const ELEMENT_ARRAY = gl::ELEMENT_ARRAY_BARRIER_BIT;
        const UNIFORM = gl::UNIFORM_BARRIER_BIT;
        const TEXTURE_FETCH = gl::TEXTURE_FETCH_BARRIER_BIT;
        const SHADER_IMAGE_ACCESS = gl::SHADER_IMAGE_ACCESS_BARRIER_BIT;
        const COMMAND = gl::COMMAND_BARRIER_BIT;
        const PIXEL_BUFFER = gl::PIXEL_BUFFER_BARRIER_BIT;
        const TEXTURE_UPDATE = gl::TEXTURE_UPDATE_BARRIER_BIT;
        const BUFFER_UPDATE = gl::BUFFER_UPDATE_BARRIER_BIT;
        const FRAMEBUFFER = gl::FRAMEBUFFER_BARRIER_BIT;
        const TRANSFORM_FEEDBACK = gl::TRANSFORM_FEEDBACK_BARRIER_BIT;
        const ATOMIC_COUNTER = gl::ATOMIC_COUNTER_BARRIER_BIT;
        const SHADER_STORAGE = gl::SHADER_STORAGE_BARRIER_BIT;
        const CLIENT_MAPPED_BUFFER = gl::CLIENT_MAPPED_BUFFER_BARRIER_BIT;
        const QUERY_BUFFER = gl::QUERY_BUFFER_BARRIER_BIT;
    }
}

bitflags::bitflags! {
    /// The buffers `glClear` clears.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct ClearBuffers: u32 {
        const COLOR = gl::COLOR_BUFFER_BIT;
        const DEPTH = gl::DEPTH_BUFFER_BIT;
        const STENCIL = gl::STENCIL_BUFFER_BIT;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test_round_trips() {
        for &cap in Capability::ALL {
            assert_eq!(Capability::try_from(cap.as_gl()).unwrap(), cap);
        }
        for &prim in PrimitiveType::ALL {
            assert_eq!(PrimitiveType::try_from(prim.as_gl()).unwrap(), prim);
        }
        for &ty in ShaderType::ALL {
            assert_eq!(ShaderType::try_from(ty.as_gl()).unwrap(), ty);
        }
    }

    #[test]
    fn test_memory_barrier_bits() {
        assert_eq!(MemoryBarriers::all().bits(), 0xffff);
        assert_eq!(MemoryBarriers::SHADER_STORAGE.bits(), 0x2000);
    }

    #[test]
    fn test_clear_bits() {
        let all = ClearBuffers::COLOR | ClearBuffers::DEPTH | ClearBuffers::STENCIL;
        assert_eq!(all.bits(), 0x4500);
        assert_eq!(ClearBuffers::all(), all);
    }
}
