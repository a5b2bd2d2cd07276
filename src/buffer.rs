//! Buffer objects: vertex data, indices, uniform blocks, pixel transfers.

use gleam::gl::{GLenum, GLintptr, GLsizeiptr, GLuint};
use std::marker::PhantomData;
use std::mem;
use std::ops::Deref;
use std::rc::Rc;
use std::slice;

use crate::binding::{check_binding, Bindable};
use crate::capabilities::Feature;
use crate::context::Context;
use crate::enums::{BufferMapAccess, BufferType, BufferUsage, IndexedBufferType};
use crate::error::{Error, Result};
use crate::object::{Object, ObjectKind};
use crate::raw::{self, Plain};

/// A buffer object, along with the target its methods bind it to.
#[derive(Debug)]
pub struct Buffer {
    obj: Object,
    target: BufferType,
}

impl Buffer {
    #[track_caller]
    pub fn new(ctx: &Rc<Context>, target: BufferType) -> Buffer {
        Buffer { obj: Object::generate(ctx, ObjectKind::Buffer), target }
    }

    /// Wrap a buffer created elsewhere, without taking ownership.
    pub fn from_raw(ctx: &Rc<Context>, target: BufferType, name: GLuint) -> Buffer {
        Buffer { obj: Object::from_raw(ctx, ObjectKind::Buffer, name), target }
    }

    pub fn target(&self) -> BufferType {
        self.target
    }

    /// Use `target` for this buffer's future binds.
    pub fn set_target(&mut self, target: BufferType) {
        self.target = target;
    }

    pub fn object(&self) -> &Object {
        &self.obj
    }

    /// Move this buffer into a new `Buffer`, leaving this one empty.
    pub fn take(&mut self) -> Buffer {
        Buffer { obj: self.obj.take(), target: self.target }
    }

    /// Replace the buffer's contents with `data`.
    #[track_caller]
    pub fn data<T: Plain>(&self, data: &[T], usage: BufferUsage) {
        check_binding(self, "Buffer::data");
        let bytes = raw::slice_as_bytes(data);
        self.context().call("glBufferData", "Buffer::data", |d| {
            d.buffer_data(self.target.as_gl(), bytes.len() as GLsizeiptr, Some(bytes), usage.as_gl())
        });
    }

    /// Allocate `size` bytes of uninitialized storage.
    #[track_caller]
    pub fn data_uninit(&self, size: usize, usage: BufferUsage) {
        check_binding(self, "Buffer::data_uninit");
        self.context().call("glBufferData", "Buffer::data_uninit", |d| {
            d.buffer_data(self.target.as_gl(), size as GLsizeiptr, None, usage.as_gl())
        });
    }

    /// Overwrite part of the buffer, starting `offset` bytes in.
    #[track_caller]
    pub fn sub_data<T: Plain>(&self, offset: usize, data: &[T]) {
        check_binding(self, "Buffer::sub_data");
        let bytes = raw::slice_as_bytes(data);
        self.context().call("glBufferSubData", "Buffer::sub_data", |d| {
            d.buffer_sub_data(self.target.as_gl(), offset as GLintptr, bytes)
        });
    }

    /// The buffer's size in bytes.
    #[track_caller]
    pub fn size(&self) -> usize {
        check_binding(self, "Buffer::size");
        let size = self.context().call("glGetBufferParameteriv", "Buffer::size", |d| {
            d.get_buffer_parameter_iv(self.target.as_gl(), gl::BUFFER_SIZE)
        });
        size.max(0) as usize
    }

    /// Map the whole buffer, viewed as elements of type `T`.
    #[track_caller]
    pub fn map<T: Plain>(&mut self, access: BufferMapAccess) -> Result<BufferMap<'_, T>> {
        let len = self.size() / mem::size_of::<T>();
        self.map_range(0, len, access)
    }

    /// Map `len` elements of type `T`, starting `offset` elements in.
    ///
    /// The buffer stays mapped until the returned `BufferMap` is dropped.
    #[track_caller]
    pub fn map_range<T: Plain>(&mut self, offset: usize, len: usize, access: BufferMapAccess)
                               -> Result<BufferMap<'_, T>>
    {
        self.context().require(Feature::MapBufferRange)?;
        check_binding(self, "Buffer::map_range");
        let size = mem::size_of::<T>();
        let ptr = self.context().call("glMapBufferRange", "Buffer::map_range", |d| {
            d.map_buffer_range(self.target.as_gl(), (offset * size) as GLintptr,
                               (len * size) as GLsizeiptr, access.bits())
        }) as *mut T;

        if ptr.is_null() || ptr as usize % mem::align_of::<T>() != 0 {
            if !ptr.is_null() {
                self.context().call("glUnmapBuffer", "Buffer::map_range",
                                    |d| d.unmap_buffer(self.target.as_gl()));
            }
            return Err(Error::MapFailed { target: self.target });
        }

        Ok(BufferMap { buffer: self, ptr, len, access, marker: PhantomData })
    }

    /// Bind to indexed binding point `index` of `target`, which also binds to
    /// `target` itself.
    #[track_caller]
    pub fn bind_base(&self, target: IndexedBufferType, index: u32) -> Result<()> {
        require_indexed(self.context(), target)?;
        self.context().call("glBindBufferBase", "Buffer::bind_base", |d| {
            d.bind_buffer_base(target.as_gl(), index, self.name())
        });
        Ok(())
    }

    /// Bind `size` bytes starting at `offset` to indexed binding point
    /// `index` of `target`.
    #[track_caller]
    pub fn bind_range(&self, target: IndexedBufferType, index: u32, offset: usize, size: usize)
                      -> Result<()>
    {
        require_indexed(self.context(), target)?;
        self.context().call("glBindBufferRange", "Buffer::bind_range", |d| {
            d.bind_buffer_range(target.as_gl(), index, self.name(),
                                offset as GLintptr, size as GLsizeiptr)
        });
        Ok(())
    }
}

fn require_indexed(ctx: &Context, target: IndexedBufferType) -> Result<()> {
    match target {
        IndexedBufferType::Uniform => ctx.require(Feature::UniformBuffer),
        IndexedBufferType::ShaderStorage => ctx.require(Feature::ShaderStorageBuffer),
        IndexedBufferType::AtomicCounter | IndexedBufferType::TransformFeedback => Ok(()),
    }
}

impl Bindable for Buffer {
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
        self.context().call("glBindBuffer", "Buffer::bind",
                            |d| d.bind_buffer(self.target.as_gl(), name));
    }
}

/// A mapped range of a buffer. Unmaps the buffer on drop.
///
/// The elements can always be read through `Deref`; they can only be
/// written through `as_mut_slice` if the mapping has write access.
pub struct BufferMap<'a, T: Plain> {
    buffer: &'a mut Buffer,
    ptr: *mut T,
    len: usize,
    access: BufferMapAccess,
    marker: PhantomData<&'a mut [T]>,
}

impl<'a, T: Plain> BufferMap<'a, T> {
    pub fn access(&self) -> BufferMapAccess {
        self.access
    }

    /// The mapped elements, if the mapping is writable.
    pub fn as_mut_slice(&mut self) -> Option<&mut [T]> {
        if !self.access.contains(BufferMapAccess::WRITE) {
            return None;
        }
        // Safe: the driver maps `len` elements, aligned (checked in
        // `map_range`), until `glUnmapBuffer` in our drop. `T: Plain` accepts
        // whatever bytes are there.
        Some(unsafe { slice::from_raw_parts_mut(self.ptr, self.len) })
    }
}

impl<'a, T: Plain> Deref for BufferMap<'a, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        // Safe for the same reasons as `as_mut_slice`.
        unsafe { slice::from_raw_parts(self.ptr, self.len) }
    }
}

impl<'a, T: Plain> Drop for BufferMap<'a, T> {
    fn drop(&mut self) {
        check_binding(&*self.buffer, "BufferMap::drop");
        let target = self.buffer.target.as_gl();
        self.buffer.context().call("glUnmapBuffer", "BufferMap::drop",
                                   |d| d.unmap_buffer(target));
    }
}
