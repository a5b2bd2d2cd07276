//! Transform feedback objects: capturing vertex shader outputs into buffers.

use gleam::gl::{GLenum, GLuint};
use std::cell::Cell;
use std::rc::Rc;

use crate::binding::{check_binding, Bindable};
use crate::capabilities::Feature;
use crate::context::Context;
use crate::enums::{TransformFeedbackPrimitive, TransformFeedbackType};
use crate::error::Result;
use crate::object::{Object, ObjectKind};

#[derive(Debug)]
pub struct TransformFeedback {
    obj: Object,
    active: Cell<bool>,
    paused: Cell<bool>,
}

impl TransformFeedback {
    #[track_caller]
    pub fn new(ctx: &Rc<Context>) -> Result<TransformFeedback> {
        ctx.require(Feature::TransformFeedbackObject)?;
        Ok(TransformFeedback::wrap(Object::generate(ctx, ObjectKind::TransformFeedback)))
    }

    /// Wrap a transform feedback object created elsewhere, without taking
    /// ownership.
    pub fn from_raw(ctx: &Rc<Context>, name: GLuint) -> TransformFeedback {
        TransformFeedback::wrap(Object::from_raw(ctx, ObjectKind::TransformFeedback, name))
    }

    fn wrap(obj: Object) -> TransformFeedback {
        TransformFeedback { obj, active: Cell::new(false), paused: Cell::new(false) }
    }

    pub fn object(&self) -> &Object {
        &self.obj
    }

    pub fn take(&mut self) -> TransformFeedback {
        TransformFeedback {
            obj: self.obj.take(),
            active: Cell::new(self.active.replace(false)),
            paused: Cell::new(self.paused.replace(false)),
        }
    }

    /// Whether `begin` has been called without a matching `end`.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn is_paused(&self) -> bool {
        self.paused.get()
    }

    /// Start capturing primitives of type `primitive`.
    #[track_caller]
    pub fn begin(&self, primitive: TransformFeedbackPrimitive) {
        if self.active.get() {
            self.misuse("is already active", "TransformFeedback::begin");
        }
        check_binding(self, "TransformFeedback::begin");
        self.context().call("glBeginTransformFeedback", "TransformFeedback::begin",
                            |d| d.begin_transform_feedback(primitive.as_gl()));
        self.active.set(true);
        self.paused.set(false);
    }

    #[track_caller]
    pub fn end(&self) {
        if !self.active.get() {
            self.misuse("is not active", "TransformFeedback::end");
        }
        check_binding(self, "TransformFeedback::end");
        self.context().call("glEndTransformFeedback", "TransformFeedback::end",
                            |d| d.end_transform_feedback());
        self.active.set(false);
        self.paused.set(false);
    }

    #[track_caller]
    pub fn pause(&self) {
        if !self.active.get() || self.paused.get() {
            self.misuse("is not capturing", "TransformFeedback::pause");
        }
        check_binding(self, "TransformFeedback::pause");
        self.context().call("glPauseTransformFeedback", "TransformFeedback::pause",
                            |d| d.pause_transform_feedback());
        self.paused.set(true);
    }

    #[track_caller]
    pub fn resume(&self) {
        if !self.paused.get() {
            self.misuse("is not paused", "TransformFeedback::resume");
        }
        check_binding(self, "TransformFeedback::resume");
        self.context().call("glResumeTransformFeedback", "TransformFeedback::resume",
                            |d| d.resume_transform_feedback());
        self.paused.set(false);
    }

    #[track_caller]
    fn misuse(&self, problem: &str, function: &'static str) {
        self.context().report_misuse("Transform Feedback Misuse",
                                     format!("{} was called, but transform feedback object {} {}.",
                                             function, self.obj.name(), problem),
                                     function);
    }
}

impl Bindable for TransformFeedback {
    fn context(&self) -> &Rc<Context> {
        self.obj.context()
    }

    fn name(&self) -> GLuint {
        self.obj.name()
    }

    fn binding_query(&self) -> (GLenum, String) {
        let binding = TransformFeedbackType::TransformFeedback.binding();
        (binding.as_gl(), binding.gl_name())
    }

    #[track_caller]
    fn bind_name(&self, name: GLuint) {
        self.context().call("glBindTransformFeedback", "TransformFeedback::bind",
                            |d| d.bind_transform_feedback(gl::TRANSFORM_FEEDBACK, name));
    }
}

/// Capture into a transform feedback object for as long as this guard
/// lives.
///
/// Creating the guard binds the object and begins capturing; dropping it
/// ends capturing and rebinds whatever was bound before. `pause` and
/// `resume` may be called any number of times.
pub struct TransformFeedbackActivator<'a> {
    feedback: &'a TransformFeedback,
    previous: GLuint,
}

impl<'a> TransformFeedbackActivator<'a> {
    #[track_caller]
    pub fn new(feedback: &'a TransformFeedback, primitive: TransformFeedbackPrimitive)
               -> TransformFeedbackActivator<'a> {
        let previous = feedback.context().bound(feedback.binding_query().0);
        if previous != feedback.name() {
            feedback.bind();
        }
        feedback.begin(primitive);
        TransformFeedbackActivator { feedback, previous }
    }

    #[track_caller]
    pub fn pause(&self) {
        if !self.feedback.is_paused() {
            self.feedback.pause();
        }
    }

    #[track_caller]
    pub fn resume(&self) {
        if self.feedback.is_paused() {
            self.feedback.resume();
        }
    }
}

impl<'a> Drop for TransformFeedbackActivator<'a> {
    fn drop(&mut self) {
        self.feedback.end();
        if self.previous != self.feedback.name() {
            self.feedback.bind_name(self.previous);
        }
    }
}
