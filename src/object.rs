//! Owned GL object names.

use gleam::gl::GLuint;
use std::fmt;
use std::mem;
use std::rc::Rc;

use crate::context::Context;

/// The kinds of GL object, each with its own name space and delete call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Buffer,
    Texture,
    Framebuffer,
    Renderbuffer,
    VertexArray,
    TransformFeedback,
    Shader,
    Program,
}

/// A GL object name, deleted on drop if this `Object` owns it.
///
/// The name is zero for an `Object` whose name has been moved out with
/// `take`, and dropping such an object deletes nothing.
pub struct Object {
    ctx: Rc<Context>,
    name: GLuint,
    kind: ObjectKind,
    owned: bool,
}

impl Object {
    /// Generate a fresh object of `kind` with the matching `glGen*` call.
    /// Shaders and programs are created by their wrappers, which know their
    /// type; see `Object::owned`.
    #[track_caller]
    pub(crate) fn generate(ctx: &Rc<Context>, kind: ObjectKind) -> Object {
        let names = match kind {
            ObjectKind::Buffer => ctx.call("glGenBuffers", "Buffer::new", |d| d.gen_buffers(1)),
            ObjectKind::Texture => ctx.call("glGenTextures", "Texture::new", |d| d.gen_textures(1)),
            ObjectKind::Framebuffer => ctx.call("glGenFramebuffers", "Framebuffer::new",
                                                |d| d.gen_framebuffers(1)),
            ObjectKind::Renderbuffer => ctx.call("glGenRenderbuffers", "Renderbuffer::new",
                                                 |d| d.gen_renderbuffers(1)),
            ObjectKind::VertexArray => ctx.call("glGenVertexArrays", "VertexArray::new",
                                                |d| d.gen_vertex_arrays(1)),
            ObjectKind::TransformFeedback => ctx.call("glGenTransformFeedbacks",
                                                      "TransformFeedback::new",
                                                      |d| d.gen_transform_feedbacks(1)),
            ObjectKind::Shader | ObjectKind::Program => vec![],
        };
        Object::owned(ctx, kind, names.first().copied().unwrap_or(0))
    }

    /// Take ownership of `name`, a freshly created object of `kind`.
    pub(crate) fn owned(ctx: &Rc<Context>, kind: ObjectKind, name: GLuint) -> Object {
        log::trace!("created {:?} {}", kind, name);
        Object { ctx: ctx.clone(), name, kind, owned: true }
    }

    /// Wrap an object created elsewhere. Dropping the result doesn't delete
    /// the object.
    pub fn from_raw(ctx: &Rc<Context>, kind: ObjectKind, name: GLuint) -> Object {
        Object { ctx: ctx.clone(), name, kind, owned: false }
    }

    pub fn name(&self) -> GLuint {
        self.name
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn context(&self) -> &Rc<Context> {
        &self.ctx
    }

    pub fn is_owned(&self) -> bool {
        self.owned
    }

    /// Move the name and its ownership into a new `Object`, leaving this one
    /// with the name zero.
    pub fn take(&mut self) -> Object {
        Object {
            ctx: self.ctx.clone(),
            name: mem::replace(&mut self.name, 0),
            kind: self.kind,
            owned: mem::replace(&mut self.owned, false),
        }
    }

    /// Give up ownership and return the name. The caller becomes
    /// responsible for deleting it.
    pub fn into_raw(mut self) -> GLuint {
        self.owned = false;
        self.name
    }
}

impl Drop for Object {
    fn drop(&mut self) {
        if !self.owned || self.name == 0 {
            return;
        }
        log::trace!("deleting {:?} {}", self.kind, self.name);
        let names = [self.name];
        let ctx = &self.ctx;
        match self.kind {
            ObjectKind::Buffer => ctx.call("glDeleteBuffers", "Buffer::drop",
                                           |d| d.delete_buffers(&names)),
            ObjectKind::Texture => ctx.call("glDeleteTextures", "Texture::drop",
                                            |d| d.delete_textures(&names)),
            ObjectKind::Framebuffer => ctx.call("glDeleteFramebuffers", "Framebuffer::drop",
                                                |d| d.delete_framebuffers(&names)),
            ObjectKind::Renderbuffer => ctx.call("glDeleteRenderbuffers", "Renderbuffer::drop",
                                                 |d| d.delete_renderbuffers(&names)),
            ObjectKind::VertexArray => ctx.call("glDeleteVertexArrays", "VertexArray::drop",
                                                |d| d.delete_vertex_arrays(&names)),
            ObjectKind::TransformFeedback => ctx.call("glDeleteTransformFeedbacks",
                                                      "TransformFeedback::drop",
                                                      |d| d.delete_transform_feedbacks(&names)),
            ObjectKind::Shader => ctx.call("glDeleteShader", "Shader::drop",
                                           |d| d.delete_shader(names[0])),
            ObjectKind::Program => ctx.call("glDeleteProgram", "Program::drop",
                                            |d| d.delete_program(names[0])),
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Object")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("owned", &self.owned)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::Call;
    use crate::config::Config;
    use crate::headless::HeadlessDriver;
    use crate::recorder::Recorder;
    use std::cell::RefCell;

    fn recording_context() -> (Rc<Context>, Rc<RefCell<Vec<Call>>>) {
        let calls = Rc::new(RefCell::new(vec![]));
        let driver = Recorder::new(HeadlessDriver::new(), calls.clone());
        (Context::with_config(driver, Config::debug()), calls)
    }

    fn deletes(calls: &Rc<RefCell<Vec<Call>>>) -> usize {
        calls.borrow().iter().filter(|call| call.is_delete()).count()
    }

    #[test]
    fn test_take() {
        let (ctx, calls) = recording_context();
        let mut first = Object::generate(&ctx, ObjectKind::Buffer);
        let name = first.name();
        assert_ne!(name, 0);

        let second = first.take();
        assert_eq!(first.name(), 0);
        assert_eq!(second.name(), name);
        assert!(!first.is_owned());
        assert!(second.is_owned());

        drop(first);
        assert_eq!(deletes(&calls), 0);
        drop(second);
        assert_eq!(deletes(&calls), 1);
        assert_eq!(calls.borrow().last(), Some(&Call::delete_buffers { buffers: vec![name] }));
    }

    #[test]
    fn test_non_owning() {
        let (ctx, calls) = recording_context();
        let owner = Object::generate(&ctx, ObjectKind::Texture);
        drop(Object::from_raw(&ctx, ObjectKind::Texture, owner.name()));
        assert_eq!(deletes(&calls), 0);

        let name = owner.into_raw();
        assert_ne!(name, 0);
        assert_eq!(deletes(&calls), 0);
        assert_eq!(ctx.diagnostics().reported, 0);
    }
}
