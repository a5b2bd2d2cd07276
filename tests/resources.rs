//! Buffers, textures, framebuffers, shaders, and drawing against the
//! headless driver.

use oglwrap::enums::{BufferMapAccess, BufferType, BufferUsage, FramebufferAttachment,
                     FramebufferStatus, FramebufferType, IndexedBufferType, PixelDataFormat,
                     PixelDataInternalFormat, PixelDataType, PrimitiveType, ShaderType,
                     TextureType, TransformFeedbackBufferMode, TransformFeedbackPrimitive};
use oglwrap::enums::ErrorType;
use oglwrap::{drawing, Bindable, Buffer, Config, Context, DriverExt, Error, ErrorMessage,
              Feature, Framebuffer, HeadlessDriver, LazyUniform, Program, Renderbuffer, Shader,
              ShaderSource, Texture, TransformFeedback, TransformFeedbackActivator, Uniform,
              VertexArray, VertexAttrib};
use std::cell::RefCell;
use std::rc::Rc;

const VERTEX: &str = "#version 330\n\
                      uniform mat4 mvp;\n\
                      in vec3 position;\n\
                      out vec3 color;\n\
                      void main() { gl_Position = mvp * vec4(position, 1.0); }\n";

const FRAGMENT: &str = "#version 330\n\
                        uniform float brightness;\n\
                        void main() {}\n";

fn debug_context() -> Rc<Context> {
    Context::with_config(HeadlessDriver::new(), Config::debug())
}

/// A context whose diagnostics are collected instead of printed.
fn collecting_context() -> (Rc<Context>, Rc<RefCell<Vec<ErrorMessage>>>) {
    let ctx = debug_context();
    let seen = Rc::new(RefCell::new(vec![]));
    let sink_seen = seen.clone();
    ctx.set_sink(move |m: &ErrorMessage| sink_seen.borrow_mut().push(m.clone()));
    (ctx, seen)
}

/// Link a program from `sources`, without checking that it linked.
fn program_from(ctx: &Rc<Context>, sources: &[(ShaderType, &str)]) -> Program {
    let shaders: Vec<Shader> = sources.iter()
        .map(|&(ty, source)| Shader::with_source(ctx, ty, &ShaderSource::new(source)))
        .collect();
    let mut program = Program::new(ctx);
    for shader in &shaders {
        program.attach(shader).unwrap();
    }
    let _ = program.link();
    program
}

fn linked_program(ctx: &Rc<Context>) -> Program {
    let vertex = Shader::with_source(ctx, ShaderType::Vertex, &ShaderSource::new(VERTEX));
    let fragment = Shader::with_source(ctx, ShaderType::Fragment, &ShaderSource::new(FRAGMENT));
    let mut program = Program::new(ctx);
    program.attach(&vertex).unwrap();
    program.attach(&fragment).unwrap();
    program.link().unwrap();
    program
}

#[test]
fn test_buffer_map_round_trip() {
    let ctx = debug_context();
    let mut buffer = Buffer::new(&ctx, BufferType::Array);
    buffer.bind();
    buffer.data(&[1.0f32, 2.0, 3.0, 4.0], BufferUsage::StaticDraw);
    assert_eq!(buffer.size(), 16);

    {
        let map = buffer.map::<f32>(BufferMapAccess::READ).unwrap();
        assert_eq!(&map[..], &[1.0, 2.0, 3.0, 4.0]);
    }

    {
        let mut map = buffer.map_range::<f32>(1, 2, BufferMapAccess::WRITE).unwrap();
        map.as_mut_slice().unwrap().copy_from_slice(&[20.0, 30.0]);
    }

    buffer.sub_data(12, &[40.0f32]);
    let map = buffer.map::<f32>(BufferMapAccess::READ).unwrap();
    assert!(map.access().contains(BufferMapAccess::READ));
    assert_eq!(&map[..], &[1.0, 20.0, 30.0, 40.0]);
    drop(map);
    assert_eq!(ctx.diagnostics().reported, 0);
}

#[test]
fn test_read_only_map_is_not_writable() {
    let ctx = debug_context();
    let mut buffer = Buffer::new(&ctx, BufferType::Array);
    buffer.bind();
    buffer.data_uninit(8, BufferUsage::DynamicDraw);
    let mut map = buffer.map::<u32>(BufferMapAccess::READ).unwrap();
    assert_eq!(map.len(), 2);
    assert!(map.as_mut_slice().is_none());
}

#[test]
fn test_indexed_binding() {
    let ctx = debug_context();
    let buffer = Buffer::new(&ctx, BufferType::Uniform);
    buffer.bind();
    buffer.data_uninit(256, BufferUsage::DynamicDraw);
    buffer.bind_range(IndexedBufferType::Uniform, 2, 0, 128).unwrap();
    assert_eq!(ctx.driver().get_integer_i(gl::UNIFORM_BUFFER_BINDING, 2) as u32,
               buffer.object().name());
    assert_eq!(ctx.diagnostics().reported, 0);
}

#[test]
fn test_texture_round_trip() {
    let ctx = debug_context();
    let texture = Texture::new(&ctx, TextureType::Texture2D).unwrap();
    texture.bind();

    let pixels: Vec<u8> = (0..16).collect();
    texture.upload_2d(PixelDataInternalFormat::Rgba8, 2, 2,
                      PixelDataFormat::Rgba, PixelDataType::UnsignedByte, Some(&pixels[..]))
        .unwrap();
    assert_eq!(texture.width(0).unwrap(), 2);
    assert_eq!(texture.height(0).unwrap(), 2);
    assert_eq!(texture.internal_format(0).unwrap(), PixelDataInternalFormat::Rgba8);

    let read = texture.get_image(0, PixelDataFormat::Rgba, PixelDataType::UnsignedByte).unwrap();
    assert_eq!(read, pixels);

    texture.sub_upload_2d(None, 0, 1, 1, 1, 1, PixelDataFormat::Rgba,
                          PixelDataType::UnsignedByte, &[255u8, 255, 255, 255]).unwrap();
    let read = texture.get_image(0, PixelDataFormat::Rgba, PixelDataType::UnsignedByte).unwrap();
    assert_eq!(&read[12..], &[255, 255, 255, 255]);
    assert_eq!(&read[..12], &pixels[..12]);
    assert_eq!(ctx.diagnostics().reported, 0);
}

#[test]
fn test_texture_units() {
    let ctx = debug_context();
    let texture = Texture::new(&ctx, TextureType::Texture2D).unwrap();
    texture.bind_to_unit(3);
    assert_eq!(ctx.driver().get_integer(gl::ACTIVE_TEXTURE) as u32, gl::TEXTURE3);
    assert!(texture.is_bound());

    Texture::active_texture(&ctx, 0);
    assert!(!texture.is_bound());
}

#[test]
fn test_framebuffer_validation() {
    let ctx = Context::with_config(HeadlessDriver::new(), Config::release());
    let fbo = Framebuffer::new(&ctx, FramebufferType::Framebuffer).unwrap();
    fbo.bind();
    match fbo.validate() {
        Err(Error::IncompleteFramebuffer(status)) =>
            assert_eq!(status, FramebufferStatus::IncompleteMissingAttachment),
        other => panic!("expected an incomplete framebuffer, got {:?}", other),
    }

    let depth = Renderbuffer::new(&ctx).unwrap();
    depth.bind();
    depth.storage(PixelDataInternalFormat::DepthComponent24, 32, 32);
    let color = Texture::new(&ctx, TextureType::Texture2D).unwrap();
    color.bind();
    color.upload_2d::<u8>(PixelDataInternalFormat::Rgba8, 32, 32,
                          PixelDataFormat::Rgba, PixelDataType::UnsignedByte, None).unwrap();
    fbo.attach_texture(FramebufferAttachment::Color(0), &color, 0);
    fbo.attach_renderbuffer(FramebufferAttachment::Depth, &depth);
    assert_eq!(fbo.status().unwrap(), FramebufferStatus::Complete);
    fbo.validate().unwrap();
}

#[test]
fn test_compile_failure() {
    let ctx = debug_context();
    let source = ShaderSource::new("#version 330\n#error unfinished\nvoid main() {}\n");
    let shader = Shader::with_source(&ctx, ShaderType::Fragment, &source);
    match shader.compile() {
        Err(Error::ShaderCompile { name, log }) => {
            assert_eq!(name, "Unnamed shader");
            assert!(log.contains("#error unfinished"), "log: {}", log);
        }
        other => panic!("expected a compile failure, got {:?}", other),
    }
    assert!(!shader.compile_status());

    // Without the error check, the failure is left for the caller to query.
    let ctx = Context::with_config(HeadlessDriver::new(), Config::release());
    let shader = Shader::with_source(&ctx, ShaderType::Fragment, &source);
    shader.compile().unwrap();
    assert!(!shader.compile_status());
}

#[test]
fn test_link_failure() {
    let ctx = debug_context();
    let mut program = Program::new(&ctx);
    match program.link() {
        Err(Error::ProgramLink { shaders, log }) => {
            assert!(shaders.is_empty());
            assert!(log.contains("no shaders attached"), "log: {}", log);
        }
        other => panic!("expected a link failure, got {:?}", other),
    }
}

#[test]
fn test_program_misuse_reported() {
    let (ctx, seen) = collecting_context();

    let shader = Shader::with_source(&ctx, ShaderType::Vertex, &ShaderSource::new(VERTEX));
    shader.compile().unwrap();
    shader.compile().unwrap();
    assert_eq!(seen.borrow().last().map(|m| m.title.clone()),
               Some("Shader Compile Misuse".to_string()));

    let mut program = Program::new(&ctx);
    program.use_program();
    assert!(seen.borrow().iter().any(|m| m.title == "Program Use Misuse"));

    program.attach(&shader).unwrap();
    program.link().unwrap();
    program.link().unwrap();
    assert!(seen.borrow().iter().any(|m| m.title == "Program Link Misuse"));
}

#[test]
fn test_uniforms() {
    let (ctx, seen) = collecting_context();
    let program = linked_program(&ctx);
    assert_eq!(program.shader_names(), &["Unnamed shader", "Unnamed shader"]);
    program.use_program();
    assert!(program.is_active());
    assert!(program.validate());

    let mvp = Uniform::<[[f32; 4]; 4]>::new(&program, "mvp");
    assert!(mvp.location() >= 0);
    mvp.set([[1.0, 0.0, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0],
             [0.0, 0.0, 1.0, 0.0], [0.0, 0.0, 0.0, 1.0]]).unwrap();
    let brightness = LazyUniform::<f32>::new(&program, "brightness");
    brightness.set(0.5).unwrap();
    assert!(brightness.location() >= 0);
    assert!(seen.borrow().is_empty());

    let missing = Uniform::<f32>::new(&program, "missing");
    assert_eq!(missing.location(), -1);
    missing.set(1.0).unwrap();
    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].title, "Uniform Location Error");
}

#[test]
fn test_uniform_read_back() {
    let ctx = debug_context();
    let program = linked_program(&ctx);
    program.use_program();

    let matrix = [[2.0, 0.0, 0.0, 0.0], [0.0, 2.0, 0.0, 0.0],
                  [0.0, 0.0, 2.0, 0.0], [0.0, 0.0, 0.0, 1.0]];
    let mvp = Uniform::<[[f32; 4]; 4]>::new(&program, "mvp");
    mvp.set(matrix).unwrap();
    assert_eq!(mvp.get().unwrap(), matrix);

    let brightness = LazyUniform::<f32>::new(&program, "brightness");
    brightness.set(0.25).unwrap();
    assert_eq!(brightness.get().unwrap(), 0.25);

    // Reading doesn't need the program to be current.
    Program::unuse(&ctx);
    assert_eq!(brightness.get().unwrap(), 0.25);
    assert_eq!(ctx.diagnostics().reported, 0);
}

#[test]
fn test_unsigned_uniforms() {
    const TINTED: &str = "#version 330\n\
                          uniform uvec3 tint;\n\
                          uniform uint layer;\n\
                          void main() {}\n";

    let ctx = debug_context();
    let program = program_from(&ctx, &[(ShaderType::Vertex, VERTEX),
                                       (ShaderType::Fragment, TINTED)]);
    program.use_program();
    let tint = Uniform::<[u32; 3]>::new(&program, "tint");
    tint.set([1, 2, 3]).unwrap();
    assert_eq!(tint.get().unwrap(), [1, 2, 3]);
    let layer = Uniform::<u32>::new(&program, "layer");
    layer.set(7).unwrap();
    assert_eq!(layer.get().unwrap(), 7);
    assert_eq!(ctx.diagnostics().reported, 0);

    fn check<T: std::fmt::Debug>(result: Result<T, Error>, feature: Feature) {
        match result {
            Err(Error::Unsupported(f)) if f == feature => {}
            other => panic!("expected {:?} to be unsupported, got {:?}", feature, other),
        }
    }

    for &version in &["OpenGL ES 2.0", "2.1 Mesa"] {
        let ctx = Context::with_config(HeadlessDriver::with_version(version, &[]),
                                       Config::debug());
        let program = program_from(&ctx, &[(ShaderType::Vertex, VERTEX),
                                           (ShaderType::Fragment, TINTED)]);
        program.use_program();
        let tint = Uniform::<[u32; 3]>::new(&program, "tint");
        check(tint.set([1, 2, 3]), Feature::UnsignedIntegerUniforms);
        check(Uniform::<u32>::new(&program, "layer").set(7), Feature::UnsignedIntegerUniforms);
        check(tint.get(), Feature::GetUniform);

        // Float uniforms are still fine.
        Uniform::<[[f32; 4]; 4]>::new(&program, "mvp").set([[0.0; 4]; 4]).unwrap();
        assert_eq!(ctx.diagnostics().reported, 0);
    }
}

#[test]
fn test_uniform_binds_its_program() {
    let (ctx, seen) = collecting_context();
    let program = linked_program(&ctx);
    Program::unuse(&ctx);

    Uniform::<f32>::new(&program, "brightness").set(1.0).unwrap();
    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(seen.borrow()[0].title, "Bind Check Failure");
    assert!(program.is_active());
}

#[test]
fn test_draw() {
    let ctx = debug_context();
    let program = linked_program(&ctx);
    program.use_program();

    let vao = VertexArray::new(&ctx).unwrap();
    vao.bind();
    let positions = Buffer::new(&ctx, BufferType::Array);
    positions.bind();
    positions.data(&[[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
                   BufferUsage::StaticDraw);
    VertexAttrib::from_program(&program, "position").unwrap()
        .setup::<f32>(3).unwrap()
        .enable();

    drawing::draw_arrays(&ctx, PrimitiveType::Triangles, 0, 3);
    drawing::draw_arrays_instanced(&ctx, PrimitiveType::Triangles, 0, 3, 4).unwrap();

    let indices = Buffer::new(&ctx, BufferType::ElementArray);
    indices.bind();
    indices.data(&[0u16, 1, 2], BufferUsage::StaticDraw);
    drawing::draw_elements::<u16>(&ctx, PrimitiveType::Triangles, 3, 0);
    drawing::draw_elements_instanced::<u16>(&ctx, PrimitiveType::Triangles, 3, 0, 2).unwrap();
    assert_eq!(ctx.diagnostics().reported, 0);
}

#[test]
fn test_ranged_and_base_vertex_draws() {
    let ctx = debug_context();
    let program = linked_program(&ctx);
    program.use_program();

    let vao = VertexArray::new(&ctx).unwrap();
    vao.bind();
    let indices = Buffer::new(&ctx, BufferType::ElementArray);
    indices.bind();
    indices.data(&[0u32, 1, 2, 2, 1, 3], BufferUsage::StaticDraw);

    drawing::draw_range_elements::<u32>(&ctx, PrimitiveType::Triangles, 0, 3, 6, 0).unwrap();
    drawing::draw_elements_base_vertex::<u32>(&ctx, PrimitiveType::Triangles, 3, 3, 4)
        .unwrap();
    drawing::draw_range_elements_base_vertex::<u32>(&ctx, PrimitiveType::Triangles,
                                                    0, 3, 6, 0, 4).unwrap();
    drawing::draw_elements_instanced_base_vertex::<u32>(&ctx, PrimitiveType::Triangles,
                                                        6, 0, 3, 4).unwrap();
    assert_eq!(ctx.diagnostics().reported, 0);

    // A range that ends before it starts.
    drawing::draw_range_elements::<u32>(&ctx, PrimitiveType::Triangles, 3, 0, 6, 0).unwrap();
    assert_eq!(ctx.last_error(), Some(ErrorType::InvalidValue));

    let old = Context::with_config(HeadlessDriver::with_version("3.1 Mesa", &[]),
                                   Config::debug());
    match drawing::draw_elements_base_vertex::<u32>(&old, PrimitiveType::Triangles, 3, 0, 1) {
        Err(Error::Unsupported(Feature::BaseVertex)) => {}
        other => panic!("base vertex draws should need 3.2, got {:?}", other),
    }
    let extended = Context::with_config(
        HeadlessDriver::with_version("3.1 Mesa", &["GL_ARB_draw_elements_base_vertex"]),
        Config::release());
    assert!(extended.supports(Feature::BaseVertex));
}

#[test]
fn test_dispatch_compute() {
    const COMPUTE: &str = "#version 430\n\
                           layout(local_size_x = 8) in;\n\
                           uniform uint count;\n\
                           void main() {}\n";

    let (ctx, seen) = collecting_context();
    let compute = program_from(&ctx, &[(ShaderType::Compute, COMPUTE)]);
    assert!(compute.is_linked());
    compute.use_program();
    drawing::dispatch_compute(&ctx, 4, 4, 1).unwrap();
    assert!(seen.borrow().is_empty());

    drawing::dispatch_compute(&ctx, 1 << 20, 1, 1).unwrap();
    assert_eq!(ctx.last_error(), Some(ErrorType::InvalidValue));

    // A graphics program can't be dispatched.
    let graphics = linked_program(&ctx);
    graphics.use_program();
    drawing::dispatch_compute(&ctx, 1, 1, 1).unwrap();
    assert_eq!(ctx.last_error(), Some(ErrorType::InvalidOperation));
    assert_eq!(seen.borrow().len(), 2);
    assert_eq!(seen.borrow()[1].call, Some("glDispatchCompute"));

    let old = Context::with_config(HeadlessDriver::with_version("4.1 Mesa", &[]),
                                   Config::debug());
    match drawing::dispatch_compute(&old, 1, 1, 1) {
        Err(Error::Unsupported(Feature::Compute)) => {}
        other => panic!("compute should need 4.3, got {:?}", other),
    }
}

#[test]
fn test_draw_elements_without_element_buffer() {
    let (ctx, seen) = collecting_context();
    let program = linked_program(&ctx);
    program.use_program();

    drawing::draw_elements::<u32>(&ctx, PrimitiveType::Triangles, 3, 0);
    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].title, "Bind Check Failure");
    assert_eq!(seen[1].call, Some("glDrawElements"));
}

#[test]
fn test_transform_feedback_activator() {
    let ctx = debug_context();
    let vertex = Shader::with_source(&ctx, ShaderType::Vertex, &ShaderSource::new(VERTEX));
    let mut program = Program::new(&ctx);
    program.attach(&vertex).unwrap();
    program.transform_feedback_varyings(&["color"], TransformFeedbackBufferMode::InterleavedAttribs)
        .unwrap();
    program.link().unwrap();
    program.use_program();

    let feedback = TransformFeedback::new(&ctx).unwrap();
    let output = Buffer::new(&ctx, BufferType::TransformFeedback);
    output.bind();
    output.data_uninit(1024, BufferUsage::StreamRead);
    output.bind_base(IndexedBufferType::TransformFeedback, 0).unwrap();

    {
        let activator = TransformFeedbackActivator::new(&feedback, TransformFeedbackPrimitive::Points);
        assert!(feedback.is_bound());
        assert!(feedback.is_active());

        activator.pause();
        activator.pause();
        assert!(feedback.is_paused());
        activator.resume();
        activator.resume();
        assert!(!feedback.is_paused());
    }

    assert!(!feedback.is_active());
    assert_eq!(ctx.driver().get_bound(gl::TRANSFORM_FEEDBACK_BINDING), 0);
    assert_eq!(ctx.diagnostics().reported, 0);
}

#[test]
fn test_transform_feedback_varyings_need_support() {
    let ctx = Context::with_config(HeadlessDriver::with_version("2.1 Mesa", &[]),
                                   Config::debug());
    let vertex = Shader::with_source(&ctx, ShaderType::Vertex, &ShaderSource::new(VERTEX));
    let mut program = Program::new(&ctx);
    program.attach(&vertex).unwrap();
    match program.transform_feedback_varyings(&["color"],
                                              TransformFeedbackBufferMode::SeparateAttribs) {
        Err(Error::Unsupported(Feature::TransformFeedbackVaryings)) => {}
        other => panic!("expected transform feedback to be unsupported, got {:?}", other),
    }

    let extended = Context::with_config(
        HeadlessDriver::with_version("2.1 Mesa", &["GL_EXT_transform_feedback"]),
        Config::release());
    assert!(extended.supports(Feature::TransformFeedbackVaryings));
}

#[test]
fn test_transform_feedback_misuse() {
    let (ctx, seen) = collecting_context();
    let feedback = TransformFeedback::new(&ctx).unwrap();
    feedback.bind();
    feedback.end();
    assert_eq!(seen.borrow()[0].title, "Transform Feedback Misuse");
    assert!(seen.borrow()[0].message.contains("is not active"));
}
