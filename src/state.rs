//! Context-global state: capabilities, blending, depth and stencil tests,
//! clearing, rasterization, and the viewport.
//!
//! None of this belongs to an object, so these are free functions taking the
//! context, named after the GL entry points they call. Entry points some
//! contexts lack return `Error::Unsupported` there.

use gleam::gl::{GLint, GLsizei, GLuint};
use std::convert::TryFrom;

use crate::capabilities::Feature;
use crate::context::Context;
use crate::driver::DriverExt;
use crate::enums::{BlendEquation, BlendFactor, Capability, ClearBuffers, CompareFunc, Face,
                   FaceOrientation, HintMode, HintTarget, LogicOp, MemoryBarriers, PolygonMode,
                   ProvokingVertex, StencilOperation};
use crate::error::Result;

/// A rectangle as GL reports it: x, y, width, height.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[track_caller]
pub fn enable(ctx: &Context, capability: Capability) {
    ctx.call("glEnable", "state::enable", |d| d.enable(capability.as_gl()));
}

#[track_caller]
pub fn disable(ctx: &Context, capability: Capability) {
    ctx.call("glDisable", "state::disable", |d| d.disable(capability.as_gl()));
}

#[track_caller]
pub fn is_enabled(ctx: &Context, capability: Capability) -> bool {
    ctx.call("glIsEnabled", "state::is_enabled", |d| d.is_enabled(capability.as_gl())) != 0
}

/// Enable `capability` if `value` is true, disable it otherwise.
#[track_caller]
pub fn set_capability(ctx: &Context, capability: Capability, value: bool) {
    if value {
        enable(ctx, capability);
    } else {
        disable(ctx, capability);
    }
}

#[track_caller]
pub fn blend_func(ctx: &Context, src: BlendFactor, dst: BlendFactor) {
    ctx.call("glBlendFunc", "state::blend_func", |d| d.blend_func(src.as_gl(), dst.as_gl()));
}

#[track_caller]
pub fn blend_func_separate(ctx: &Context, src_rgb: BlendFactor, dst_rgb: BlendFactor,
                           src_alpha: BlendFactor, dst_alpha: BlendFactor) {
    ctx.call("glBlendFuncSeparate", "state::blend_func_separate", |d| {
        d.blend_func_separate(src_rgb.as_gl(), dst_rgb.as_gl(),
                              src_alpha.as_gl(), dst_alpha.as_gl())
    });
}

#[track_caller]
pub fn blend_equation(ctx: &Context, equation: BlendEquation) {
    ctx.call("glBlendEquation", "state::blend_equation",
             |d| d.blend_equation(equation.as_gl()));
}

#[track_caller]
pub fn blend_equation_separate(ctx: &Context, rgb: BlendEquation, alpha: BlendEquation) {
    ctx.call("glBlendEquationSeparate", "state::blend_equation_separate",
             |d| d.blend_equation_separate(rgb.as_gl(), alpha.as_gl()));
}

#[track_caller]
pub fn blend_color(ctx: &Context, color: [f32; 4]) {
    ctx.call("glBlendColor", "state::blend_color",
             |d| d.blend_color(color[0], color[1], color[2], color[3]));
}

#[track_caller]
pub fn depth_func(ctx: &Context, func: CompareFunc) {
    ctx.call("glDepthFunc", "state::depth_func", |d| d.depth_func(func.as_gl()));
}

/// The current depth comparison. A value this crate doesn't know reads as
/// `Less`, GL's initial value.
#[track_caller]
pub fn get_depth_func(ctx: &Context) -> CompareFunc {
    let value = ctx.call("glGetIntegerv", "state::get_depth_func",
                         |d| d.get_integer(gl::DEPTH_FUNC));
    CompareFunc::try_from(value as u32).unwrap_or(CompareFunc::Less)
}

#[track_caller]
pub fn depth_mask(ctx: &Context, write: bool) {
    ctx.call("glDepthMask", "state::depth_mask", |d| d.depth_mask(write));
}

#[track_caller]
pub fn get_depth_mask(ctx: &Context) -> bool {
    ctx.call("glGetIntegerv", "state::get_depth_mask",
             |d| d.get_integer(gl::DEPTH_WRITEMASK)) != 0
}

#[track_caller]
pub fn depth_range(ctx: &Context, near: f64, far: f64) {
    ctx.call("glDepthRange", "state::depth_range", |d| d.depth_range(near, far));
}

#[track_caller]
pub fn clear_color(ctx: &Context, color: [f32; 4]) {
    ctx.call("glClearColor", "state::clear_color",
             |d| d.clear_color(color[0], color[1], color[2], color[3]));
}

#[track_caller]
pub fn get_clear_color(ctx: &Context) -> [f32; 4] {
    let mut color = [0.0; 4];
    ctx.call("glGetFloatv", "state::get_clear_color",
             |d| d.get_float_v(gl::COLOR_CLEAR_VALUE, &mut color));
    color
}

#[track_caller]
pub fn clear_depth(ctx: &Context, depth: f64) {
    ctx.call("glClearDepth", "state::clear_depth", |d| d.clear_depth(depth));
}

#[track_caller]
pub fn clear_stencil(ctx: &Context, stencil: i32) {
    ctx.call("glClearStencil", "state::clear_stencil", |d| d.clear_stencil(stencil));
}

/// Clear `buffers` of the bound draw framebuffer.
#[track_caller]
pub fn clear(ctx: &Context, buffers: ClearBuffers) {
    ctx.call("glClear", "state::clear", |d| d.clear(buffers.bits()));
}

#[track_caller]
pub fn viewport(ctx: &Context, x: i32, y: i32, width: i32, height: i32) {
    ctx.call("glViewport", "state::viewport",
             |d| d.viewport(x, y, width as GLsizei, height as GLsizei));
}

#[track_caller]
pub fn get_viewport(ctx: &Context) -> Viewport {
    let mut values: [GLint; 4] = [0; 4];
    ctx.call("glGetIntegerv", "state::get_viewport",
             |d| d.get_integer_v(gl::VIEWPORT, &mut values));
    Viewport { x: values[0], y: values[1], width: values[2], height: values[3] }
}

/// Restrict drawing to a rectangle. Takes effect while
/// `Capability::ScissorTest` is enabled.
#[track_caller]
pub fn scissor(ctx: &Context, x: i32, y: i32, width: i32, height: i32) {
    ctx.call("glScissor", "state::scissor",
             |d| d.scissor(x, y, width as GLsizei, height as GLsizei));
}

#[track_caller]
pub fn cull_face(ctx: &Context, face: Face) {
    ctx.call("glCullFace", "state::cull_face", |d| d.cull_face(face.as_gl()));
}

#[track_caller]
pub fn front_face(ctx: &Context, orientation: FaceOrientation) {
    ctx.call("glFrontFace", "state::front_face", |d| d.front_face(orientation.as_gl()));
}

#[track_caller]
pub fn polygon_offset(ctx: &Context, factor: f32, units: f32) {
    ctx.call("glPolygonOffset", "state::polygon_offset", |d| d.polygon_offset(factor, units));
}

#[track_caller]
pub fn line_width(ctx: &Context, width: f32) {
    ctx.call("glLineWidth", "state::line_width", |d| d.line_width(width));
}

#[track_caller]
pub fn color_mask(ctx: &Context, r: bool, g: bool, b: bool, a: bool) {
    ctx.call("glColorMask", "state::color_mask", |d| d.color_mask(r, g, b, a));
}

#[track_caller]
pub fn get_color_mask(ctx: &Context) -> [bool; 4] {
    let mut values: [GLint; 4] = [0; 4];
    ctx.call("glGetIntegerv", "state::get_color_mask",
             |d| d.get_integer_v(gl::COLOR_WRITEMASK, &mut values));
    [values[0] != 0, values[1] != 0, values[2] != 0, values[3] != 0]
}

#[track_caller]
pub fn stencil_func(ctx: &Context, func: CompareFunc, reference: i32, mask: u32) {
    ctx.call("glStencilFunc", "state::stencil_func",
             |d| d.stencil_func(func.as_gl(), reference, mask as GLuint));
}

/// What to do when the stencil test fails, when it passes but the depth test
/// fails, and when both pass.
#[track_caller]
pub fn stencil_op(ctx: &Context, stencil_fail: StencilOperation, depth_fail: StencilOperation,
                  depth_pass: StencilOperation) {
    ctx.call("glStencilOp", "state::stencil_op",
             |d| d.stencil_op(stencil_fail.as_gl(), depth_fail.as_gl(), depth_pass.as_gl()));
}

#[track_caller]
pub fn stencil_mask(ctx: &Context, mask: u32) {
    ctx.call("glStencilMask", "state::stencil_mask", |d| d.stencil_mask(mask));
}

/// Like `stencil_func`, for only the front or back faces.
#[track_caller]
pub fn stencil_func_separate(ctx: &Context, face: Face, func: CompareFunc, reference: i32,
                             mask: u32) {
    ctx.call("glStencilFuncSeparate", "state::stencil_func_separate",
             |d| d.stencil_func_separate(face.as_gl(), func.as_gl(), reference, mask as GLuint));
}

#[track_caller]
pub fn stencil_op_separate(ctx: &Context, face: Face, stencil_fail: StencilOperation,
                           depth_fail: StencilOperation, depth_pass: StencilOperation) {
    ctx.call("glStencilOpSeparate", "state::stencil_op_separate", |d| {
        d.stencil_op_separate(face.as_gl(), stencil_fail.as_gl(), depth_fail.as_gl(),
                              depth_pass.as_gl())
    });
}

#[track_caller]
pub fn stencil_mask_separate(ctx: &Context, face: Face, mask: u32) {
    ctx.call("glStencilMaskSeparate", "state::stencil_mask_separate",
             |d| d.stencil_mask_separate(face.as_gl(), mask));
}

/// The stencil function, reference value, and mask of the front or back
/// faces. `Face::FrontAndBack` reads the front face's.
#[track_caller]
pub fn get_stencil_func(ctx: &Context, face: Face) -> (CompareFunc, i32, u32) {
    let names = match face {
        Face::Back => [gl::STENCIL_BACK_FUNC, gl::STENCIL_BACK_REF, gl::STENCIL_BACK_VALUE_MASK],
        _ => [gl::STENCIL_FUNC, gl::STENCIL_REF, gl::STENCIL_VALUE_MASK],
    };
    let [func, reference, mask] = names;
    ctx.call("glGetIntegerv", "state::get_stencil_func", |d| {
        (CompareFunc::try_from(d.get_integer(func) as u32).unwrap_or(CompareFunc::Always),
         d.get_integer(reference),
         d.get_integer(mask) as u32)
    })
}

/// Rasterize polygons as points, outlines, or filled. Desktop GL only.
#[track_caller]
pub fn polygon_mode(ctx: &Context, mode: PolygonMode) -> Result<()> {
    ctx.require(Feature::PolygonMode)?;
    ctx.call("glPolygonMode", "state::polygon_mode",
             |d| d.polygon_mode(gl::FRONT_AND_BACK, mode.as_gl()));
    Ok(())
}

#[track_caller]
pub fn get_polygon_mode(ctx: &Context) -> Result<PolygonMode> {
    ctx.require(Feature::PolygonMode)?;
    let mut values: [GLint; 2] = [0; 2];
    ctx.call("glGetIntegerv", "state::get_polygon_mode",
             |d| d.get_integer_v(gl::POLYGON_MODE, &mut values));
    PolygonMode::try_from(values[0] as u32)
}

/// The size of rasterized points, when `Capability::ProgramPointSize` is
/// disabled. Desktop GL only.
#[track_caller]
pub fn point_size(ctx: &Context, size: f32) -> Result<()> {
    ctx.require(Feature::PointSize)?;
    ctx.call("glPointSize", "state::point_size", |d| d.point_size(size));
    Ok(())
}

#[track_caller]
pub fn get_point_size(ctx: &Context) -> f32 {
    ctx.call("glGetFloatv", "state::get_point_size", |d| d.get_float(gl::POINT_SIZE))
}

#[track_caller]
pub fn provoking_vertex(ctx: &Context, convention: ProvokingVertex) -> Result<()> {
    ctx.require(Feature::ProvokingVertex)?;
    ctx.call("glProvokingVertex", "state::provoking_vertex",
             |d| d.provoking_vertex(convention.as_gl()));
    Ok(())
}

#[track_caller]
pub fn get_provoking_vertex(ctx: &Context) -> Result<ProvokingVertex> {
    ctx.require(Feature::ProvokingVertex)?;
    let value = ctx.call("glGetIntegerv", "state::get_provoking_vertex",
                         |d| d.get_integer(gl::PROVOKING_VERTEX));
    ProvokingVertex::try_from(value as u32)
}

/// The logical operation applied to colors while `Capability::ColorLogicOp`
/// is enabled. Desktop GL only.
#[track_caller]
pub fn logic_op(ctx: &Context, op: LogicOp) -> Result<()> {
    ctx.require(Feature::LogicOp)?;
    ctx.call("glLogicOp", "state::logic_op", |d| d.logic_op(op.as_gl()));
    Ok(())
}

#[track_caller]
pub fn get_logic_op(ctx: &Context) -> Result<LogicOp> {
    ctx.require(Feature::LogicOp)?;
    let value = ctx.call("glGetIntegerv", "state::get_logic_op",
                         |d| d.get_integer(gl::LOGIC_OP_MODE));
    LogicOp::try_from(value as u32)
}

#[track_caller]
pub fn hint(ctx: &Context, target: HintTarget, mode: HintMode) {
    ctx.call("glHint", "state::hint", |d| d.hint(target.as_gl(), mode.as_gl()));
}

#[track_caller]
pub fn get_hint(ctx: &Context, target: HintTarget) -> Result<HintMode> {
    let value = ctx.call("glGetIntegerv", "state::get_hint",
                         |d| d.get_integer(target.as_gl()));
    HintMode::try_from(value as u32)
}

// Per-draw-buffer state. Only `Capability::Blend` and
// `Capability::ScissorTest` can be enabled per buffer.

#[track_caller]
pub fn enable_i(ctx: &Context, capability: Capability, index: u32) -> Result<()> {
    ctx.require(Feature::IndexedState)?;
    ctx.call("glEnablei", "state::enable_i", |d| d.enable_i(capability.as_gl(), index));
    Ok(())
}

#[track_caller]
pub fn disable_i(ctx: &Context, capability: Capability, index: u32) -> Result<()> {
    ctx.require(Feature::IndexedState)?;
    ctx.call("glDisablei", "state::disable_i", |d| d.disable_i(capability.as_gl(), index));
    Ok(())
}

#[track_caller]
pub fn is_enabled_i(ctx: &Context, capability: Capability, index: u32) -> Result<bool> {
    ctx.require(Feature::IndexedState)?;
    Ok(ctx.call("glIsEnabledi", "state::is_enabled_i",
                |d| d.is_enabled_i(capability.as_gl(), index)) != 0)
}

/// Set the blend function of draw buffer `buffer` alone.
#[track_caller]
pub fn blend_func_i(ctx: &Context, buffer: u32, src: BlendFactor, dst: BlendFactor)
                    -> Result<()> {
    ctx.require(Feature::IndexedState)?;
    ctx.call("glBlendFunci", "state::blend_func_i",
             |d| d.blend_func_i(buffer, src.as_gl(), dst.as_gl()));
    Ok(())
}

/// The source and destination RGB blend factors of draw buffer `buffer`.
#[track_caller]
pub fn get_blend_func_i(ctx: &Context, buffer: u32) -> Result<(BlendFactor, BlendFactor)> {
    ctx.require(Feature::IndexedState)?;
    let (src, dst) = ctx.call("glGetIntegeri_v", "state::get_blend_func_i", |d| {
        (d.get_integer_i(gl::BLEND_SRC_RGB, buffer), d.get_integer_i(gl::BLEND_DST_RGB, buffer))
    });
    Ok((BlendFactor::try_from(src as u32)?, BlendFactor::try_from(dst as u32)?))
}

#[track_caller]
pub fn color_mask_i(ctx: &Context, buffer: u32, r: bool, g: bool, b: bool, a: bool)
                    -> Result<()> {
    ctx.require(Feature::IndexedState)?;
    ctx.call("glColorMaski", "state::color_mask_i", |d| d.color_mask_i(buffer, r, g, b, a));
    Ok(())
}

#[track_caller]
pub fn get_color_mask_i(ctx: &Context, buffer: u32) -> Result<[bool; 4]> {
    ctx.require(Feature::IndexedState)?;
    let mut values: [GLint; 4] = [0; 4];
    ctx.call("glGetIntegeri_v", "state::get_color_mask_i",
             |d| d.get_integer_iv(gl::COLOR_WRITEMASK, buffer, &mut values));
    Ok([values[0] != 0, values[1] != 0, values[2] != 0, values[3] != 0])
}

/// Set the index that restarts a primitive while
/// `Capability::PrimitiveRestart` is enabled.
#[track_caller]
pub fn primitive_restart_index(ctx: &Context, index: u32) -> Result<()> {
    ctx.require(Feature::PrimitiveRestartIndex)?;
    ctx.call("glPrimitiveRestartIndex", "state::primitive_restart_index",
             |d| d.primitive_restart_index(index));
    Ok(())
}

#[track_caller]
pub fn get_primitive_restart_index(ctx: &Context) -> u32 {
    ctx.call("glGetIntegerv", "state::get_primitive_restart_index",
             |d| d.get_integer(gl::PRIMITIVE_RESTART_INDEX)) as u32
}

/// Order shader writes of the kinds in `barriers` before later reads.
#[track_caller]
pub fn memory_barrier(ctx: &Context, barriers: MemoryBarriers) -> Result<()> {
    ctx.require(Feature::MemoryBarrier)?;
    ctx.call("glMemoryBarrier", "state::memory_barrier", |d| d.memory_barrier(barriers.bits()));
    Ok(())
}

#[track_caller]
pub fn flush(ctx: &Context) {
    ctx.call("glFlush", "state::flush", |d| d.flush());
}

/// Block until every command issued so far has completed.
#[track_caller]
pub fn finish(ctx: &Context) {
    ctx.call("glFinish", "state::finish", |d| d.finish());
}

/// Whether the context advertises extension `name`, like
/// `"GL_ARB_texture_storage"`. The list is read once, when the context is
/// created.
pub fn has_extension(ctx: &Context, name: &str) -> bool {
    ctx.capabilities().has_extension(name)
}

pub fn extensions(ctx: &Context) -> Vec<String> {
    ctx.capabilities().extensions.iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::headless::HeadlessDriver;

    #[test]
    fn test_capabilities() {
        let ctx = Context::with_config(HeadlessDriver::new(), Config::debug());
        assert!(!is_enabled(&ctx, Capability::DepthTest));
        set_capability(&ctx, Capability::DepthTest, true);
        assert!(is_enabled(&ctx, Capability::DepthTest));
        set_capability(&ctx, Capability::DepthTest, false);
        assert!(!is_enabled(&ctx, Capability::DepthTest));
        assert_eq!(ctx.diagnostics().reported, 0);
    }

    #[test]
    fn test_queries() {
        let ctx = Context::with_config(HeadlessDriver::new(), Config::debug());

        viewport(&ctx, 10, 20, 300, 200);
        assert_eq!(get_viewport(&ctx), Viewport { x: 10, y: 20, width: 300, height: 200 });

        depth_func(&ctx, CompareFunc::Lequal);
        assert_eq!(get_depth_func(&ctx), CompareFunc::Lequal);

        depth_mask(&ctx, false);
        assert!(!get_depth_mask(&ctx));

        clear_color(&ctx, [0.25, 0.5, 0.75, 1.0]);
        assert_eq!(get_clear_color(&ctx), [0.25, 0.5, 0.75, 1.0]);

        color_mask(&ctx, true, false, true, false);
        assert_eq!(get_color_mask(&ctx), [true, false, true, false]);

        assert_eq!(ctx.diagnostics().reported, 0);
    }

    #[test]
    fn test_separate_stencil() {
        let ctx = Context::with_config(HeadlessDriver::new(), Config::debug());
        stencil_func_separate(&ctx, Face::Back, CompareFunc::Greater, 3, 0x0f);
        stencil_op_separate(&ctx, Face::Back, StencilOperation::Keep, StencilOperation::Incr,
                            StencilOperation::Replace);
        stencil_mask_separate(&ctx, Face::Front, 0x7);
        assert_eq!(get_stencil_func(&ctx, Face::Back), (CompareFunc::Greater, 3, 0x0f));
        assert_eq!(get_stencil_func(&ctx, Face::Front), (CompareFunc::Always, 0, !0));
        assert_eq!(ctx.driver().get_integer(gl::STENCIL_BACK_PASS_DEPTH_PASS),
                   gl::REPLACE as GLint);
        assert_eq!(ctx.driver().get_integer(gl::STENCIL_PASS_DEPTH_PASS), gl::KEEP as GLint);
        assert_eq!(ctx.driver().get_integer(gl::STENCIL_WRITEMASK), 0x7);

        stencil_func_separate(&ctx, Face::FrontAndBack, CompareFunc::Never, 1, 1);
        assert_eq!(get_stencil_func(&ctx, Face::Front), (CompareFunc::Never, 1, 1));
        assert_eq!(get_stencil_func(&ctx, Face::Back), (CompareFunc::Never, 1, 1));
        assert_eq!(ctx.diagnostics().reported, 0);
    }

    #[test]
    fn test_rasterization_state() {
        let ctx = Context::with_config(HeadlessDriver::new(), Config::debug());
        assert_eq!(get_polygon_mode(&ctx).unwrap(), PolygonMode::Fill);
        polygon_mode(&ctx, PolygonMode::Line).unwrap();
        assert_eq!(get_polygon_mode(&ctx).unwrap(), PolygonMode::Line);

        assert_eq!(get_point_size(&ctx), 1.0);
        point_size(&ctx, 4.5).unwrap();
        assert_eq!(get_point_size(&ctx), 4.5);

        assert_eq!(get_provoking_vertex(&ctx).unwrap(), ProvokingVertex::LastVertexConvention);
        provoking_vertex(&ctx, ProvokingVertex::FirstVertexConvention).unwrap();
        assert_eq!(get_provoking_vertex(&ctx).unwrap(), ProvokingVertex::FirstVertexConvention);

        assert_eq!(get_logic_op(&ctx).unwrap(), LogicOp::Copy);
        logic_op(&ctx, LogicOp::Xor).unwrap();
        assert_eq!(get_logic_op(&ctx).unwrap(), LogicOp::Xor);

        assert_eq!(get_hint(&ctx, HintTarget::LineSmoothHint).unwrap(), HintMode::DontCare);
        hint(&ctx, HintTarget::LineSmoothHint, HintMode::Nicest);
        assert_eq!(get_hint(&ctx, HintTarget::LineSmoothHint).unwrap(), HintMode::Nicest);
        assert_eq!(get_hint(&ctx, HintTarget::TextureCompressionHint).unwrap(),
                   HintMode::DontCare);

        assert_eq!(get_primitive_restart_index(&ctx), 0);
        primitive_restart_index(&ctx, 0xffff).unwrap();
        assert_eq!(get_primitive_restart_index(&ctx), 0xffff);

        memory_barrier(&ctx, MemoryBarriers::SHADER_STORAGE | MemoryBarriers::COMMAND).unwrap();
        memory_barrier(&ctx, MemoryBarriers::all()).unwrap();
        assert_eq!(ctx.diagnostics().reported, 0);

        point_size(&ctx, 0.0).unwrap();
        assert_eq!(ctx.last_error(), Some(crate::enums::ErrorType::InvalidValue));
    }

    #[test]
    fn test_desktop_only_state_on_es() {
        let ctx = Context::with_config(HeadlessDriver::with_version("OpenGL ES 3.0", &[]),
                                       Config::debug());
        fn check<T: std::fmt::Debug>(result: Result<T>, feature: Feature) {
            match result {
                Err(crate::Error::Unsupported(f)) if f == feature => {}
                other => panic!("expected {:?} to be unsupported, got {:?}", feature, other),
            }
        }
        check(polygon_mode(&ctx, PolygonMode::Line), Feature::PolygonMode);
        check(point_size(&ctx, 2.0), Feature::PointSize);
        check(logic_op(&ctx, LogicOp::Set), Feature::LogicOp);
        check(provoking_vertex(&ctx, ProvokingVertex::FirstVertexConvention),
              Feature::ProvokingVertex);
        check(primitive_restart_index(&ctx, 7), Feature::PrimitiveRestartIndex);
        check(enable_i(&ctx, Capability::Blend, 1), Feature::IndexedState);
        check(memory_barrier(&ctx, MemoryBarriers::all()), Feature::MemoryBarrier);

        let ctx = Context::with_config(
            HeadlessDriver::new().without_entry_point(crate::driver::EntryPoint::IndexedState),
            Config::debug());
        check(color_mask_i(&ctx, 0, true, true, true, true), Feature::IndexedState);
    }

    #[test]
    fn test_indexed_state() {
        let ctx = Context::with_config(HeadlessDriver::new(), Config::debug());
        enable(&ctx, Capability::Blend);
        disable_i(&ctx, Capability::Blend, 2).unwrap();
        assert!(is_enabled_i(&ctx, Capability::Blend, 0).unwrap());
        assert!(!is_enabled_i(&ctx, Capability::Blend, 2).unwrap());
        enable_i(&ctx, Capability::ScissorTest, 1).unwrap();
        assert!(is_enabled_i(&ctx, Capability::ScissorTest, 1).unwrap());
        assert!(!is_enabled(&ctx, Capability::ScissorTest));

        // Setting the global state again overrides every buffer.
        enable(&ctx, Capability::Blend);
        assert!(is_enabled_i(&ctx, Capability::Blend, 2).unwrap());

        blend_func(&ctx, BlendFactor::One, BlendFactor::Zero);
        blend_func_i(&ctx, 1, BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha).unwrap();
        assert_eq!(get_blend_func_i(&ctx, 1).unwrap(),
                   (BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha));
        assert_eq!(get_blend_func_i(&ctx, 0).unwrap(), (BlendFactor::One, BlendFactor::Zero));

        color_mask_i(&ctx, 3, false, true, false, true).unwrap();
        assert_eq!(get_color_mask_i(&ctx, 3).unwrap(), [false, true, false, true]);
        assert_eq!(get_color_mask_i(&ctx, 0).unwrap(), [true; 4]);
        color_mask(&ctx, true, true, true, false);
        assert_eq!(get_color_mask_i(&ctx, 3).unwrap(), [true, true, true, false]);
        assert_eq!(ctx.diagnostics().reported, 0);

        // Only blending and scissoring are per buffer, and there are eight
        // draw buffers.
        ctx.set_sink(|_: &crate::debug::ErrorMessage| {});
        enable_i(&ctx, Capability::DepthTest, 0).unwrap();
        assert_eq!(ctx.last_error(), Some(crate::enums::ErrorType::InvalidEnum));
        color_mask_i(&ctx, 8, true, true, true, true).unwrap();
        assert_eq!(ctx.last_error(), Some(crate::enums::ErrorType::InvalidValue));
    }

    #[test]
    fn test_bad_values_reported() {
        let ctx = Context::with_config(HeadlessDriver::new(), Config::debug());
        ctx.set_sink(|_: &crate::debug::ErrorMessage| {});
        line_width(&ctx, 0.0);
        assert_eq!(ctx.last_error(), Some(crate::enums::ErrorType::InvalidValue));
        viewport(&ctx, 0, 0, -1, 1);
        assert_eq!(ctx.diagnostics().reported, 2);
    }
}
