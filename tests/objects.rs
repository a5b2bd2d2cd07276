//! Object ownership, binding, and the bind check.

use oglwrap::enums::{BufferType, BufferUsage, FramebufferType, TextureType};
use oglwrap::{Bindable, Buffer, Call, Config, Context, DriverExt, ErrorMessage, Framebuffer,
              HeadlessDriver, Recorder, TemporaryBind, Texture};
use std::cell::RefCell;
use std::rc::Rc;

type Calls = Rc<RefCell<Vec<Call>>>;

fn recorded_context(config: Config) -> (Rc<Context>, Calls) {
    let calls: Calls = Rc::new(RefCell::new(vec![]));
    let ctx = Context::with_config(Recorder::new(HeadlessDriver::new(), calls.clone()), config);
    (ctx, calls)
}

fn buffer_deletions(calls: &Calls) -> Vec<Vec<u32>> {
    calls.borrow().iter().filter_map(|call| match call {
        Call::delete_buffers { buffers } => Some(buffers.clone()),
        _ => None,
    }).collect()
}

#[test]
fn test_owning_lifecycle() {
    let (ctx, calls) = recorded_context(Config::debug());

    let mut original = Buffer::new(&ctx, BufferType::Array);
    let name = original.object().name();
    assert_ne!(name, 0);
    assert!(original.object().is_owned());

    let taken = original.take();
    assert_eq!(original.object().name(), 0);
    assert_eq!(taken.object().name(), name);

    drop(original);
    assert!(buffer_deletions(&calls).is_empty());

    drop(taken);
    assert_eq!(buffer_deletions(&calls), vec![vec![name]]);
    assert_eq!(ctx.diagnostics().reported, 0);
}

#[test]
fn test_non_owning_never_deletes() {
    let (ctx, calls) = recorded_context(Config::debug());

    let owner = Buffer::new(&ctx, BufferType::Array);
    let name = owner.object().name();
    {
        let view = Buffer::from_raw(&ctx, BufferType::Array, name);
        assert!(!view.object().is_owned());
        assert_eq!(view.object().name(), name);
    }
    assert!(buffer_deletions(&calls).is_empty());

    let raw = owner.object().name();
    drop(owner);
    assert_eq!(buffer_deletions(&calls), vec![vec![raw]]);
}

#[test]
fn test_take_then_drop_deletes_once() {
    let (ctx, calls) = recorded_context(Config::debug());
    let mut texture = Texture::new(&ctx, TextureType::Texture2D).unwrap();
    let object = texture.object().name();
    let taken = texture.take();
    drop(texture);
    drop(taken);

    let deletions = calls.borrow().iter().filter(|call| {
        matches!(call, Call::delete_textures { textures } if textures == &vec![object])
    }).count();
    assert_eq!(deletions, 1);
}

#[test]
fn test_temporary_bind_restores() {
    let ctx = Context::with_config(HeadlessDriver::new(), Config::debug());
    let first = Texture::new(&ctx, TextureType::Texture2D).unwrap();
    let second = Texture::new(&ctx, TextureType::Texture2D).unwrap();
    let bound = || ctx.driver().get_bound(gl::TEXTURE_BINDING_2D);

    // Restores the zero object.
    assert_eq!(bound(), 0);
    {
        let guard = TemporaryBind::new(&first);
        assert_eq!(guard.previous(), 0);
        assert_eq!(bound(), first.object().name());
    }
    assert_eq!(bound(), 0);

    // Restores another object.
    first.bind();
    {
        let _guard = TemporaryBind::new(&second);
        assert!(second.is_bound());
    }
    assert!(first.is_bound());

    // Binding what is already bound changes nothing.
    {
        let _guard = TemporaryBind::new(&first);
        assert!(first.is_bound());
    }
    assert!(first.is_bound());
    assert_eq!(ctx.diagnostics().reported, 0);
}

#[test]
fn test_temporary_bind_restores_split_framebuffers() {
    let ctx = Context::with_config(HeadlessDriver::new(), Config::debug());
    let read = Framebuffer::new(&ctx, FramebufferType::ReadFramebuffer).unwrap();
    let draw = Framebuffer::new(&ctx, FramebufferType::DrawFramebuffer).unwrap();
    let both = Framebuffer::new(&ctx, FramebufferType::Framebuffer).unwrap();
    let bindings = || (ctx.driver().get_bound(gl::READ_FRAMEBUFFER_BINDING),
                       ctx.driver().get_bound(gl::DRAW_FRAMEBUFFER_BINDING));

    read.bind();
    draw.bind();
    let before = (read.object().name(), draw.object().name());
    assert_eq!(bindings(), before);
    {
        let guard = TemporaryBind::new(&both);
        assert_eq!(guard.previous(), draw.object().name());
        let name = both.object().name();
        assert_eq!(bindings(), (name, name));
    }
    assert_eq!(bindings(), before);

    // Only one half matching still counts as a change.
    let (read_name, draw_name) = before;
    let read_view = Framebuffer::from_raw(&ctx, FramebufferType::Framebuffer, read_name);
    {
        let _guard = TemporaryBind::new(&read_view);
        assert_eq!(bindings(), (read_name, read_name));
    }
    assert_eq!(bindings(), (read_name, draw_name));
    assert_eq!(ctx.diagnostics().reported, 0);
}

#[test]
fn test_bind_check_reports_once() {
    let ctx = Context::with_config(HeadlessDriver::new(), Config::debug());
    let seen = Rc::new(RefCell::new(vec![]));
    let sink_seen = seen.clone();
    ctx.set_sink(move |m: &ErrorMessage| sink_seen.borrow_mut().push(m.clone()));

    let intended = Buffer::new(&ctx, BufferType::Array);
    let other = Buffer::new(&ctx, BufferType::Array);
    other.bind();

    intended.data(&[1u8, 2, 3, 4], BufferUsage::StaticDraw);

    {
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].title, "Bind Check Failure");
        assert_eq!(seen[0].function, "Buffer::data");
        assert_eq!(seen[0].file, file!());
        assert!(seen[0].message.contains("GL_ARRAY_BUFFER_BINDING"));
    }
    assert!(intended.is_bound());
    assert_eq!(intended.size(), 4);

    other.bind();
    assert_eq!(other.size(), 0);
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn test_bind_check_off() {
    let config = Config { bind_check: false, ..Config::debug() };
    let ctx = Context::with_config(HeadlessDriver::new(), config);

    let intended = Buffer::new(&ctx, BufferType::Array);
    let other = Buffer::new(&ctx, BufferType::Array);
    other.bind();

    // Without the check, the call acts on whatever is bound.
    intended.data(&[1u8, 2, 3, 4], BufferUsage::StaticDraw);
    assert!(other.is_bound());
    assert_eq!(ctx.diagnostics().reported, 0);
    other.bind();
    assert_eq!(other.size(), 4);
}
