//! Formats and component types of pixel and vertex data.

gl_enum! {
    /// The layout of client-side pixel data.
    pub enum PixelDataFormat {
        Red = gl::RED,
        Rg = gl::RG,
        Rgb = gl::RGB,
        Bgr = gl::BGR,
        Rgba = gl::RGBA,
        Bgra = gl::BGRA,
        RedInteger = gl::RED_INTEGER,
        RgInteger = gl::RG_INTEGER,
        RgbInteger = gl::RGB_INTEGER,
        RgbaInteger = gl::RGBA_INTEGER,
        DepthComponent = gl::DEPTH_COMPONENT,
        StencilIndex = gl::STENCIL_INDEX,
        DepthStencil = gl::DEPTH_STENCIL,
    }
}

impl PixelDataFormat {
    /// Number of components per pixel.
    pub fn components(self) -> usize {
        match self {
            PixelDataFormat::Red
            | PixelDataFormat::RedInteger
            | PixelDataFormat::DepthComponent
            | PixelDataFormat::StencilIndex
            | PixelDataFormat::DepthStencil => 1,
            PixelDataFormat::Rg | PixelDataFormat::RgInteger => 2,
            PixelDataFormat::Rgb | PixelDataFormat::Bgr | PixelDataFormat::RgbInteger => 3,
            PixelDataFormat::Rgba | PixelDataFormat::Bgra | PixelDataFormat::RgbaInteger => 4,
        }
    }
}

gl_enum! {
    /// The type of each component of client-side pixel data.
    pub enum PixelDataType {
        UnsignedByte = gl::UNSIGNED_BYTE,
        Byte = gl::BYTE,
        UnsignedShort = gl::UNSIGNED_SHORT,
        Short = gl::SHORT,
        UnsignedInt = gl::UNSIGNED_INT,
        Int = gl::INT,
        HalfFloat = gl::HALF_FLOAT,
        Float = gl::FLOAT,
        UnsignedInt248 = gl::UNSIGNED_INT_24_8,
        Float32UnsignedInt248Rev = gl::FLOAT_32_UNSIGNED_INT_24_8_REV,
    }
}

impl PixelDataType {
    /// Size in bytes of one component. Packed types report the size of the
    /// whole packed pixel, and count as a single component.
    pub fn size(self) -> usize {
        match self {
            PixelDataType::UnsignedByte | PixelDataType::Byte => 1,
            PixelDataType::UnsignedShort | PixelDataType::Short | PixelDataType::HalfFloat => 2,
            PixelDataType::UnsignedInt
            | PixelDataType::Int
            | PixelDataType::Float
            | PixelDataType::UnsignedInt248 => 4,
            PixelDataType::Float32UnsignedInt248Rev => 8,
        }
    }
}

/// Size in bytes of one pixel of `format`/`ty` data.
pub fn pixel_size(format: PixelDataFormat, ty: PixelDataType) -> usize {
    match ty {
        PixelDataType::UnsignedInt248 | PixelDataType::Float32UnsignedInt248Rev => ty.size(),
        _ => format.components() * ty.size(),
    }
}

/// Bytes of client memory holding `rows` rows of `width` pixels, when every
/// row but the last is padded to a multiple of `alignment` bytes (the
/// `GL_UNPACK_ALIGNMENT`/`GL_PACK_ALIGNMENT` rule).
pub fn image_size(width: usize, rows: usize, pixel_size: usize, alignment: usize) -> usize {
    if rows == 0 || width == 0 {
        return 0;
    }
    let row = width * pixel_size;
    let stride = (row + alignment - 1) / alignment * alignment;
    stride * (rows - 1) + row
}

gl_enum! {
    /// How GL stores texture and renderbuffer images.
    pub enum PixelDataInternalFormat {
        Red = gl::RED,
        Rg = gl::RG,
        Rgb = gl::RGB,
        Rgba = gl::RGBA,
        R8 = gl::R8,
        Rg8 = gl::RG8,
        Rgb8 = gl::RGB8,
        Rgba8 = gl::RGBA8,
        Srgb8 = gl::SRGB8,
        Srgb8Alpha8 = gl::SRGB8_ALPHA8,
        R16F = gl::R16F,
        Rg16F = gl::RG16F,
        Rgb16F = gl::RGB16F,
        Rgba16F = gl::RGBA16F,
        R32F = gl::R32F,
        Rg32F = gl::RG32F,
        Rgb32F = gl::RGB32F,
        Rgba32F = gl::RGBA32F,
        R32I = gl::R32I,
        R32UI = gl::R32UI,
        Rgba32UI = gl::RGBA32UI,
        DepthComponent16 = gl::DEPTH_COMPONENT16,
        DepthComponent24 = gl::DEPTH_COMPONENT24,
        DepthComponent32F = gl::DEPTH_COMPONENT32F,
        Depth24Stencil8 = gl::DEPTH24_STENCIL8,
        StencilIndex8 = gl::STENCIL_INDEX8,
        CompressedRgb = gl::COMPRESSED_RGB,
        CompressedRgba = gl::COMPRESSED_RGBA,
        CompressedSrgb = gl::COMPRESSED_SRGB,
        CompressedSrgbAlpha = gl::COMPRESSED_SRGB_ALPHA,
    }
}

impl PixelDataInternalFormat {
    /// A client format and type that can carry this format's pixels without
    /// conversion, used to size storage allocated without client data.
    pub fn transfer_format(self) -> (PixelDataFormat, PixelDataType) {
        use PixelDataInternalFormat::*;
        match self {
            Red | R8 => (PixelDataFormat::Red, PixelDataType::UnsignedByte),
            Rg | Rg8 => (PixelDataFormat::Rg, PixelDataType::UnsignedByte),
            Rgb | Rgb8 | Srgb8 | CompressedRgb | CompressedSrgb =>
                (PixelDataFormat::Rgb, PixelDataType::UnsignedByte),
            Rgba | Rgba8 | Srgb8Alpha8 | CompressedRgba | CompressedSrgbAlpha =>
                (PixelDataFormat::Rgba, PixelDataType::UnsignedByte),
            R16F => (PixelDataFormat::Red, PixelDataType::HalfFloat),
            Rg16F => (PixelDataFormat::Rg, PixelDataType::HalfFloat),
            Rgb16F => (PixelDataFormat::Rgb, PixelDataType::HalfFloat),
            Rgba16F => (PixelDataFormat::Rgba, PixelDataType::HalfFloat),
            R32F => (PixelDataFormat::Red, PixelDataType::Float),
            Rg32F => (PixelDataFormat::Rg, PixelDataType::Float),
            Rgb32F => (PixelDataFormat::Rgb, PixelDataType::Float),
            Rgba32F => (PixelDataFormat::Rgba, PixelDataType::Float),
            R32I => (PixelDataFormat::RedInteger, PixelDataType::Int),
            R32UI => (PixelDataFormat::RedInteger, PixelDataType::UnsignedInt),
            Rgba32UI => (PixelDataFormat::RgbaInteger, PixelDataType::UnsignedInt),
            DepthComponent16 => (PixelDataFormat::DepthComponent, PixelDataType::UnsignedShort),
            DepthComponent24 => (PixelDataFormat::DepthComponent, PixelDataType::UnsignedInt),
            DepthComponent32F => (PixelDataFormat::DepthComponent, PixelDataType::Float),
            Depth24Stencil8 => (PixelDataFormat::DepthStencil, PixelDataType::UnsignedInt248),
            StencilIndex8 => (PixelDataFormat::StencilIndex, PixelDataType::UnsignedByte),
        }
    }
}

gl_enum! {
    /// Component types of vertex attributes and element indices.
    pub enum DataType {
        Byte = gl::BYTE,
        UnsignedByte = gl::UNSIGNED_BYTE,
        Short = gl::SHORT,
        UnsignedShort = gl::UNSIGNED_SHORT,
        Int = gl::INT,
        UnsignedInt = gl::UNSIGNED_INT,
        HalfFloat = gl::HALF_FLOAT,
        Float = gl::FLOAT,
        Double = gl::DOUBLE,
        Fixed = gl::FIXED,
    }
}

gl_enum! {
    pub enum BufferUsage {
        StreamDraw = gl::STREAM_DRAW,
        StreamRead = gl::STREAM_READ,
        StreamCopy = gl::STREAM_COPY,
        StaticDraw = gl::STATIC_DRAW,
        StaticRead = gl::STATIC_READ,
        StaticCopy = gl::STATIC_COPY,
        DynamicDraw = gl::DYNAMIC_DRAW,
        DynamicRead = gl::DYNAMIC_READ,
        DynamicCopy = gl::DYNAMIC_COPY,
    }
}

impl Default for BufferUsage {
    fn default() -> BufferUsage {
        BufferUsage::StaticDraw
    }
}

bitflags::bitflags! {
    /// Access flags for `glMapBufferRange`.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct BufferMapAccess: u32 {
        const READ = gl::MAP_READ_BIT;
        const WRITE = gl::MAP_WRITE_BIT;
        const INVALIDATE_RANGE = gl::MAP_INVALIDATE_RANGE_BIT;
        const INVALIDATE_BUFFER = gl::MAP_INVALIDATE_BUFFER_BIT;
        const FLUSH_EXPLICIT = gl::MAP_FLUSH_EXPLICIT_BIT;
        const UNSYNCHRONIZED = gl::MAP_UNSYNCHRONIZED_BIT;
        const PERSISTENT = gl::MAP_PERSISTENT_BIT;
        const COHERENT = gl::MAP_COHERENT_BIT;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test_pixel_size() {
        assert_eq!(pixel_size(PixelDataFormat::Rgba, PixelDataType::UnsignedByte), 4);
        assert_eq!(pixel_size(PixelDataFormat::Rgb, PixelDataType::Float), 12);
        assert_eq!(pixel_size(PixelDataFormat::Red, PixelDataType::HalfFloat), 2);
        assert_eq!(pixel_size(PixelDataFormat::DepthStencil, PixelDataType::UnsignedInt248), 4);
    }

    #[test]
    fn test_transfer_formats_round_trip() {
        for &format in PixelDataInternalFormat::ALL {
            let (client, ty) = format.transfer_format();
            assert_eq!(PixelDataFormat::try_from(client.as_gl()).unwrap(), client);
            assert!(pixel_size(client, ty) > 0);
        }
    }

    #[test]
    fn test_map_access_bits() {
        let access = BufferMapAccess::READ | BufferMapAccess::WRITE;
        assert_eq!(access.bits(), gl::MAP_READ_BIT | gl::MAP_WRITE_BIT);
        assert_eq!(BufferUsage::default().as_gl(), gl::STATIC_DRAW);
    }
}
