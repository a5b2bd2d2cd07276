//! Binding objects to targets, and checking they're bound.
//!
//! Much of GL acts on "whatever is bound to target X" rather than on a named
//! object. The wrappers' methods act on `self`, so before forwarding such a
//! call they check (when `Config::bind_check` is on) that `self` really is
//! what's bound. If it isn't, that is reported once as a diagnostic, and the
//! object is bound so the call acts on the object the caller meant.

use gleam::gl::{GLenum, GLuint};
use std::rc::Rc;

use crate::context::Context;
use crate::debug::ErrorMessage;

/// An object that binds to a single target at a time.
pub trait Bindable {
    fn context(&self) -> &Rc<Context>;

    /// The object's name.
    fn name(&self) -> GLuint;

    /// The `glGet*` parameter reporting what is bound where this object
    /// binds, and its C name for diagnostics.
    fn binding_query(&self) -> (GLenum, String);

    /// Bind `name`, which may be zero, where this object binds.
    fn bind_name(&self, name: GLuint);

    #[track_caller]
    fn bind(&self) {
        self.bind_name(self.name())
    }

    /// Bind the zero object in this object's place.
    #[track_caller]
    fn unbind(&self) {
        self.bind_name(0)
    }

    fn is_bound(&self) -> bool {
        self.context().bound(self.binding_query().0) == self.name()
    }

    /// Every name `bind` would replace. Most targets have one binding; a
    /// target that binds to several points at once returns one per point.
    fn save_binding(&self) -> Vec<GLuint> {
        vec![self.context().bound(self.binding_query().0)]
    }

    /// Put back what `save_binding` returned.
    #[track_caller]
    fn restore_binding(&self, saved: &[GLuint]) {
        if let Some(&name) = saved.first() {
            self.bind_name(name);
        }
    }
}

/// If bind checking is on and `object` is not bound, report that and bind
/// it. `function` names the wrapper method about to act on the binding.
#[track_caller]
pub fn check_binding<B: Bindable + ?Sized>(object: &B, function: &'static str) {
    let ctx = object.context();
    if !ctx.config().bind_check {
        return;
    }
    let (query, query_name) = object.binding_query();
    let bound = ctx.bound(query);
    if bound == object.name() {
        return;
    }
    ctx.report(ErrorMessage::new(
        "Bind Check Failure",
        format!("{} was called through object {}, but {} reports object {}.\n\
                 Did you forget to bind it?",
                function, object.name(), query_name, bound),
        function));
    object.bind();
}

/// If bind checking is on and only the zero object is bound at `query`,
/// report that. Nothing is bound in its place.
#[track_caller]
pub fn check_default_binding(ctx: &Context, query: GLenum, query_name: &str,
                             function: &'static str) {
    if !ctx.config().bind_check || ctx.bound(query) != 0 {
        return;
    }
    ctx.report(ErrorMessage::new(
        "Bind Check Failure",
        format!("{} requires an object bound to {}, but only the default object 0 \
                 is bound there.",
                function, query_name),
        function));
}

/// Bind an object for as long as this guard lives, then restore whatever was
/// bound before, even if that was the zero object.
pub struct TemporaryBind<'a, B: Bindable + ?Sized> {
    object: &'a B,
    saved: Vec<GLuint>,
}

impl<'a, B: Bindable + ?Sized> TemporaryBind<'a, B> {
    #[track_caller]
    pub fn new(object: &'a B) -> TemporaryBind<'a, B> {
        let saved = object.save_binding();
        let guard = TemporaryBind { object, saved };
        if guard.changes_binding() {
            object.bind();
        }
        guard
    }

    /// The name that will be rebound on drop. For targets with several
    /// binding points, the first of them.
    pub fn previous(&self) -> GLuint {
        self.saved.first().copied().unwrap_or(0)
    }

    fn changes_binding(&self) -> bool {
        self.saved.iter().any(|&name| name != self.object.name())
    }
}

impl<'a, B: Bindable + ?Sized> Drop for TemporaryBind<'a, B> {
    fn drop(&mut self) {
        if self.changes_binding() {
            self.object.restore_binding(&self.saved);
        }
    }
}
