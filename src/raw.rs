//! Viewing typed slices as the raw bytes GL uploads.

/// A marker trait for types whose values can be handed to GL by simply
/// passing along their bytes: no padding, no pointers, and any bit pattern
/// is a valid value, so whatever GL writes into a mapped buffer can be read
/// back as `T`.
pub unsafe trait Plain: Copy + 'static {}

/// View `data` as the bytes GL will copy.
pub fn slice_as_bytes<T: Plain>(data: &[T]) -> &[u8] {
    // Safe because `T: Plain`.
    unsafe { std::slice::from_raw_parts(data.as_ptr() as *const u8, std::mem::size_of_val(data)) }
}

macro_rules! implement_plain {
    ( $( $type:ty ),* ) => {
        $(
            unsafe impl Plain for $type { }
        )*
    }
}

implement_plain!(u8, u16, u32, u64,
                 i8, i16, i32, i64,
                 f32, f64);

// Vertex attributes, colors, and matrices are usually uploaded as fixed-size
// arrays of the scalars above.
unsafe impl<T: Plain, const N: usize> Plain for [T; N] {}

#[test]
fn test_slice_as_bytes() {
    fn check<T: Plain>(data: &[T], len: usize) {
        assert_eq!(slice_as_bytes(data).len(), len);
    }

    check::<u8>(&[], 0);
    check(&[1u16, 2, 3], 6);
    check(&[[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]], 24);
    check(&[[[0.0f64; 2]; 2]], 32);

    let words = [0x0102_0304u32, 0x0506_0708];
    assert_eq!(&slice_as_bytes(&words)[..4], &0x0102_0304u32.to_ne_bytes());
}
