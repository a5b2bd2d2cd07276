//! Draw calls, and compute dispatch.
//!
//! Element draws take the index type as a type parameter, so the
//! `GL_UNSIGNED_*` constant always matches the data in the element buffer.

use gleam::gl::{GLint, GLsizei, GLuint};
use std::mem;

use crate::binding::check_default_binding;
use crate::capabilities::Feature;
use crate::context::Context;
use crate::enums::{DataType, PrimitiveType};
use crate::error::Result;
use crate::raw::Plain;

/// Types an element buffer can hold.
pub trait IndexType: Plain {
    const DATA_TYPE: DataType;
}

impl IndexType for u8 {
    const DATA_TYPE: DataType = DataType::UnsignedByte;
}

impl IndexType for u16 {
    const DATA_TYPE: DataType = DataType::UnsignedShort;
}

impl IndexType for u32 {
    const DATA_TYPE: DataType = DataType::UnsignedInt;
}

/// Draw `count` vertices starting at `first`, from the enabled vertex
/// attribute arrays.
#[track_caller]
pub fn draw_arrays(ctx: &Context, mode: PrimitiveType, first: u32, count: u32) {
    ctx.call("glDrawArrays", "drawing::draw_arrays",
             |d| d.draw_arrays(mode.as_gl(), first as GLint, count as GLsizei));
}

#[track_caller]
pub fn draw_arrays_instanced(ctx: &Context, mode: PrimitiveType, first: u32, count: u32,
                             instances: u32) -> Result<()> {
    ctx.require(Feature::InstancedDrawing)?;
    ctx.call("glDrawArraysInstanced", "drawing::draw_arrays_instanced", |d| {
        d.draw_arrays_instanced(mode.as_gl(), first as GLint, count as GLsizei,
                                instances as GLsizei)
    });
    Ok(())
}

/// Draw `count` vertices, taking their indices from the bound element
/// buffer, starting `first` indices in.
#[track_caller]
pub fn draw_elements<T: IndexType>(ctx: &Context, mode: PrimitiveType, count: u32, first: u32) {
    check_element_buffer(ctx, "drawing::draw_elements");
    ctx.call("glDrawElements", "drawing::draw_elements", |d| {
        d.draw_elements(mode.as_gl(), count as GLsizei, T::DATA_TYPE.as_gl(),
                        index_offset::<T>(first))
    });
}

#[track_caller]
pub fn draw_elements_instanced<T: IndexType>(ctx: &Context, mode: PrimitiveType, count: u32,
                                             first: u32, instances: u32) -> Result<()> {
    ctx.require(Feature::InstancedDrawing)?;
    check_element_buffer(ctx, "drawing::draw_elements_instanced");
    ctx.call("glDrawElementsInstanced", "drawing::draw_elements_instanced", |d| {
        d.draw_elements_instanced(mode.as_gl(), count as GLsizei, T::DATA_TYPE.as_gl(),
                                  index_offset::<T>(first), instances as GLsizei)
    });
    Ok(())
}

/// Like `draw_elements`, promising that every index read lies in
/// `start..=end`.
#[track_caller]
pub fn draw_range_elements<T: IndexType>(ctx: &Context, mode: PrimitiveType, start: u32,
                                         end: u32, count: u32, first: u32) -> Result<()> {
    ctx.require(Feature::DrawRangeElements)?;
    check_element_buffer(ctx, "drawing::draw_range_elements");
    ctx.call("glDrawRangeElements", "drawing::draw_range_elements", |d| {
        d.draw_range_elements(mode.as_gl(), start, end, count as GLsizei, T::DATA_TYPE.as_gl(),
                              index_offset::<T>(first))
    });
    Ok(())
}

/// Like `draw_elements`, adding `base_vertex` to every index read.
#[track_caller]
pub fn draw_elements_base_vertex<T: IndexType>(ctx: &Context, mode: PrimitiveType, count: u32,
                                               first: u32, base_vertex: i32) -> Result<()> {
    ctx.require(Feature::BaseVertex)?;
    check_element_buffer(ctx, "drawing::draw_elements_base_vertex");
    ctx.call("glDrawElementsBaseVertex", "drawing::draw_elements_base_vertex", |d| {
        d.draw_elements_base_vertex(mode.as_gl(), count as GLsizei, T::DATA_TYPE.as_gl(),
                                    index_offset::<T>(first), base_vertex)
    });
    Ok(())
}

#[track_caller]
#[allow(clippy::too_many_arguments)]
pub fn draw_range_elements_base_vertex<T: IndexType>(ctx: &Context, mode: PrimitiveType,
                                                     start: u32, end: u32, count: u32,
                                                     first: u32, base_vertex: i32)
                                                     -> Result<()> {
    ctx.require(Feature::BaseVertex)?;
    check_element_buffer(ctx, "drawing::draw_range_elements_base_vertex");
    ctx.call("glDrawRangeElementsBaseVertex", "drawing::draw_range_elements_base_vertex", |d| {
        d.draw_range_elements_base_vertex(mode.as_gl(), start, end, count as GLsizei,
                                          T::DATA_TYPE.as_gl(), index_offset::<T>(first),
                                          base_vertex)
    });
    Ok(())
}

#[track_caller]
pub fn draw_elements_instanced_base_vertex<T: IndexType>(ctx: &Context, mode: PrimitiveType,
                                                         count: u32, first: u32, instances: u32,
                                                         base_vertex: i32) -> Result<()> {
    ctx.require(Feature::InstancedDrawing)?;
    ctx.require(Feature::BaseVertex)?;
    check_element_buffer(ctx, "drawing::draw_elements_instanced_base_vertex");
    ctx.call("glDrawElementsInstancedBaseVertex", "drawing::draw_elements_instanced_base_vertex",
             |d| {
                 d.draw_elements_instanced_base_vertex(mode.as_gl(), count as GLsizei,
                                                       T::DATA_TYPE.as_gl(),
                                                       index_offset::<T>(first),
                                                       instances as GLsizei, base_vertex)
             });
    Ok(())
}

/// Run the current compute program over an `x` by `y` by `z` grid of work
/// groups.
#[track_caller]
pub fn dispatch_compute(ctx: &Context, x: u32, y: u32, z: u32) -> Result<()> {
    ctx.require(Feature::Compute)?;
    ctx.call("glDispatchCompute", "drawing::dispatch_compute", |d| d.dispatch_compute(x, y, z));
    Ok(())
}

fn index_offset<T: IndexType>(first: u32) -> GLuint {
    first * mem::size_of::<T>() as GLuint
}

#[track_caller]
fn check_element_buffer(ctx: &Context, function: &'static str) {
    check_default_binding(ctx, gl::ELEMENT_ARRAY_BUFFER_BINDING,
                          "GL_ELEMENT_ARRAY_BUFFER_BINDING", function);
}

#[test]
fn test_index_offset() {
    assert_eq!(index_offset::<u8>(6), 6);
    assert_eq!(index_offset::<u16>(6), 12);
    assert_eq!(index_offset::<u32>(6), 24);
    assert_eq!(u16::DATA_TYPE.as_gl(), gl::UNSIGNED_SHORT);
}
