//! Feature gating, enum bindings, and the diagnostics the context produces.

use oglwrap::enums::{BufferType, ErrorType, ShaderType, TextureType};
use oglwrap::{Bindable, Buffer, Config, Context, DriverExt, EntryPoint, Error, ErrorMessage,
              Feature, HeadlessDriver, Shader, Texture, TransformFeedback, VertexArray};
use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

fn unsupported<T: std::fmt::Debug>(result: oglwrap::Result<T>) -> Feature {
    match result {
        Err(Error::Unsupported(feature)) => feature,
        other => panic!("expected Error::Unsupported, got {:?}", other),
    }
}

#[test]
fn test_legacy_context() {
    let ctx = Context::with_config(HeadlessDriver::with_version("2.1", &[]), Config::debug());
    assert_eq!(ctx.capabilities().version, (2, 1));
    assert!(!ctx.capabilities().es);

    assert_eq!(unsupported(VertexArray::new(&ctx)), Feature::VertexArrayObject);
    assert_eq!(unsupported(TransformFeedback::new(&ctx)), Feature::TransformFeedbackObject);

    // Extensions fill the gap.
    let ctx = Context::new(HeadlessDriver::with_version("2.1", &["GL_ARB_vertex_array_object"]));
    assert!(ctx.supports(Feature::VertexArrayObject));
    VertexArray::new(&ctx).unwrap();
}

#[test]
fn test_es_context() {
    let ctx = Context::with_config(HeadlessDriver::with_version("OpenGL ES 3.0", &[]),
                                   Config::debug());
    assert_eq!(ctx.capabilities().version, (3, 0));
    assert!(ctx.capabilities().es);

    assert_eq!(unsupported(Texture::new(&ctx, TextureType::Texture1D)), Feature::Texture1D);
    assert_eq!(unsupported(Texture::new(&ctx, TextureType::TextureBuffer)),
               Feature::TextureBuffer);
    Texture::new(&ctx, TextureType::Texture3D).unwrap();
    VertexArray::new(&ctx).unwrap();
    TransformFeedback::new(&ctx).unwrap();
    assert!(!ctx.supports(Feature::GetTexImage));
    assert_eq!(ctx.diagnostics().reported, 0);
}

#[test]
fn test_missing_entry_points() {
    let driver = HeadlessDriver::new()
        .without_entry_point(EntryPoint::TransformFeedback)
        .without_entry_point(EntryPoint::TexImage1D);
    let ctx = Context::with_config(driver, Config::debug());

    assert_eq!(unsupported(TransformFeedback::new(&ctx)), Feature::TransformFeedbackObject);
    assert_eq!(unsupported(Texture::new(&ctx, TextureType::Texture1DArray)), Feature::Texture1D);
    assert!(ctx.supports(Feature::GetTexImage));

    let message = Error::Unsupported(Feature::Texture1D).to_string();
    assert!(message.contains("Texture1D"), "{}", message);
}

#[test]
fn test_buffer_bindings() {
    let ctx = Context::with_config(HeadlessDriver::new(), Config::debug());
    for &target in BufferType::ALL {
        let buffer = Buffer::new(&ctx, target);
        buffer.bind();
        assert_eq!(ctx.driver().get_bound(target.binding().as_gl()), buffer.object().name(),
                   "{:?}", target);
        buffer.unbind();
        assert!(!buffer.is_bound());
    }
    assert_eq!(ctx.diagnostics().reported, 0);
}

#[test]
fn test_texture_bindings() {
    let ctx = Context::with_config(HeadlessDriver::new(), Config::debug());
    for &target in TextureType::ALL {
        let texture = Texture::new(&ctx, target).unwrap();
        texture.bind();
        assert_eq!(ctx.driver().get_bound(target.binding().as_gl()), texture.object().name(),
                   "{:?}", target);
    }
    assert_eq!(ctx.diagnostics().reported, 0);
}

#[test]
fn test_error_check_diagnostic() {
    let ctx = Context::with_config(HeadlessDriver::new(), Config::debug());
    let seen = Rc::new(RefCell::new(vec![]));
    let sink_seen = seen.clone();
    ctx.set_sink(move |m: &ErrorMessage| sink_seen.borrow_mut().push(m.clone()));

    let bogus = Buffer::from_raw(&ctx, BufferType::Array, 1234);
    let line = line!() + 1;
    bogus.bind();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].title, "Invalid Operation");
    assert_eq!(seen[0].call, Some("glBindBuffer"));
    assert_eq!(seen[0].function, "Buffer::bind");
    assert_eq!(seen[0].file, file!());
    assert_eq!(seen[0].line, line);
    assert!(seen[0].message.contains("GL_INVALID_OPERATION"));
    assert_eq!(ctx.last_error(), Some(ErrorType::InvalidOperation));

    let banner = seen[0].to_string();
    assert!(banner.contains("Invalid Operation"), "{}", banner);
    assert!(banner.contains("glBindBuffer"), "{}", banner);
}

#[test]
fn test_release_config_is_silent() {
    let ctx = Context::with_config(HeadlessDriver::new(), Config::release());
    Buffer::from_raw(&ctx, BufferType::Array, 1234).bind();
    assert_eq!(ctx.diagnostics().reported, 0);
    assert_eq!(ctx.last_error(), None);
    // The flag is still set, for whoever asks.
    assert_eq!(ctx.driver().get_error(), gl::INVALID_OPERATION);
}

#[test]
#[should_panic(expected = "stopping after 2 reported errors")]
fn test_max_errors() {
    let config = Config { max_errors: Some(2), ..Config::debug() };
    let ctx = Context::with_config(HeadlessDriver::new(), config);
    ctx.set_sink(|_: &ErrorMessage| {});
    for _ in 0..3 {
        Buffer::from_raw(&ctx, BufferType::Array, 1234).bind();
    }
}

#[test]
fn test_shader_path() {
    let dir = std::env::temp_dir().join(format!("oglwrap-shader-path-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("tint.frag"), "#version 330\n#define STRENGTH 1\nvoid main() {}\n")
        .unwrap();

    let config = Config { shader_path: dir.clone(), ..Config::debug() };
    let ctx = Context::with_config(HeadlessDriver::new(), config);
    let shader = Shader::from_file(&ctx, ShaderType::Fragment, "tint.frag").unwrap();
    assert_eq!(shader.source_name(), "tint.frag");
    shader.compile().unwrap();

    match Shader::from_file(&ctx, ShaderType::Fragment, "missing.frag") {
        Err(Error::ShaderFile { path, .. }) => assert_eq!(path, dir.join("missing.frag")),
        other => panic!("expected a missing file, got {:?}", other),
    }
    fs::remove_dir_all(&dir).unwrap();
}
