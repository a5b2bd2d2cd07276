//! Program objects: shaders linked together.

use gleam::gl::{GLenum, GLint, GLuint};
use std::mem;
use std::rc::Rc;

use crate::binding::Bindable;
use crate::capabilities::Feature;
use crate::context::Context;
use crate::enums::TransformFeedbackBufferMode;
use crate::error::{Error, Result};
use crate::object::{Object, ObjectKind};
use crate::shader::{self, Shader};

/// A program object.
///
/// Binding a program with `Bindable::bind` makes it the current program;
/// `Program::use_program` does the same, after checking it linked. Shaders
/// attached through the wrapper are detached when it is dropped.
#[derive(Debug)]
pub struct Program {
    obj: Object,
    shaders: Vec<GLuint>,
    shader_names: Vec<String>,
    linked: bool,
}

impl Program {
    #[track_caller]
    pub fn new(ctx: &Rc<Context>) -> Program {
        let name = ctx.call("glCreateProgram", "Program::new", |d| d.create_program());
        Program {
            obj: Object::owned(ctx, ObjectKind::Program, name),
            shaders: vec![],
            shader_names: vec![],
            linked: false,
        }
    }

    /// Wrap a program created elsewhere, without taking ownership. It is
    /// assumed to be linked.
    pub fn from_raw(ctx: &Rc<Context>, name: GLuint) -> Program {
        Program {
            obj: Object::from_raw(ctx, ObjectKind::Program, name),
            shaders: vec![],
            shader_names: vec![],
            linked: true,
        }
    }

    pub fn object(&self) -> &Object {
        &self.obj
    }

    pub fn take(&mut self) -> Program {
        Program {
            obj: self.obj.take(),
            shaders: mem::take(&mut self.shaders),
            shader_names: mem::take(&mut self.shader_names),
            linked: mem::replace(&mut self.linked, false),
        }
    }

    /// Attach `shader`, compiling it first if it hasn't been.
    #[track_caller]
    pub fn attach(&mut self, shader: &Shader) -> Result<()> {
        shader.ensure_compiled()?;
        let name = shader::shader_name(shader);
        self.context().call("glAttachShader", "Program::attach",
                            |d| d.attach_shader(self.obj.name(), name));
        self.shaders.push(name);
        self.shader_names.push(shader.source_name().to_string());
        Ok(())
    }

    /// The source names of the attached shaders.
    pub fn shader_names(&self) -> &[String] {
        &self.shader_names
    }

    /// Link the attached shaders. When error checking is on, a failed link
    /// returns `Error::ProgramLink` with the driver's info log.
    #[track_caller]
    pub fn link(&mut self) -> Result<()> {
        let ctx = self.obj.context().clone();
        if self.linked {
            ctx.report_misuse("Program Link Misuse",
                              format!("Program::link was called on program {}, \
                                       which is already linked.", self.obj.name()),
                              "Program::link");
        }
        ctx.call("glLinkProgram", "Program::link", |d| d.link_program(self.obj.name()));
        self.linked = true;

        if ctx.config().error_check && !self.link_status() {
            let log = self.info_log();
            log::error!("failed to link shaders {:?}:\n{}", self.shader_names, log);
            return Err(Error::ProgramLink { shaders: self.shader_names.clone(), log });
        }
        Ok(())
    }

    /// Whether `link` has been called.
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// Whether the last link succeeded.
    #[track_caller]
    pub fn link_status(&self) -> bool {
        self.context().call("glGetProgramiv", "Program::link_status",
                            |d| d.get_program_iv(self.obj.name(), gl::LINK_STATUS)) != 0
    }

    #[track_caller]
    pub fn info_log(&self) -> String {
        self.context().call("glGetProgramInfoLog", "Program::info_log",
                            |d| d.get_program_info_log(self.obj.name()))
    }

    /// Ask the driver whether the program can run in the current state, and
    /// return its answer. A failure is reported when error checking is on.
    #[track_caller]
    pub fn validate(&self) -> bool {
        let ctx = self.context();
        ctx.call("glValidateProgram", "Program::validate",
                 |d| d.validate_program(self.obj.name()));
        let valid = ctx.call("glGetProgramiv", "Program::validate",
                             |d| d.get_program_iv(self.obj.name(), gl::VALIDATE_STATUS)) != 0;
        if !valid {
            ctx.report_misuse("Program Validation Failure",
                              format!("Validation of the program linked from {:?} failed. \
                                       Drawing with it may generate GL_INVALID_OPERATION.\n\
                                       The validation log:\n{}",
                                      self.shader_names, self.info_log()),
                              "Program::validate");
        }
        valid
    }

    /// Make this the current program.
    #[track_caller]
    pub fn use_program(&self) {
        if !self.linked {
            self.context().report_misuse(
                "Program Use Misuse",
                format!("Program::use_program was called on program {}, which was \
                         never linked.", self.obj.name()),
                "Program::use_program");
        }
        self.bind();
    }

    /// Make no program current.
    #[track_caller]
    pub fn unuse(ctx: &Context) {
        ctx.call("glUseProgram", "Program::unuse", |d| d.use_program(0));
    }

    /// Whether this is the current program.
    pub fn is_active(&self) -> bool {
        self.is_bound()
    }

    /// The location of uniform `name`, or -1 if the program has no active
    /// uniform by that name.
    #[track_caller]
    pub fn uniform_location(&self, name: &str) -> GLint {
        self.context().call("glGetUniformLocation", "Program::uniform_location",
                            |d| d.get_uniform_location(self.obj.name(), name))
    }

    /// The location of vertex attribute `name`, or -1.
    #[track_caller]
    pub fn attrib_location(&self, name: &str) -> GLint {
        self.context().call("glGetAttribLocation", "Program::attrib_location",
                            |d| d.get_attrib_location(self.obj.name(), name))
    }

    /// Assign attribute `name` to `index`. Takes effect at the next link.
    #[track_caller]
    pub fn bind_attrib_location(&self, index: u32, name: &str) {
        self.context().call("glBindAttribLocation", "Program::bind_attrib_location",
                            |d| d.bind_attrib_location(self.obj.name(), index, name));
    }

    /// Choose the outputs transform feedback captures. Takes effect at the
    /// next link.
    #[track_caller]
    pub fn transform_feedback_varyings(&self, varyings: &[&str],
                                       mode: TransformFeedbackBufferMode) -> Result<()> {
        self.context().require(Feature::TransformFeedbackVaryings)?;
        if self.linked {
            self.context().report_misuse(
                "Transform Feedback Varyings Misuse",
                format!("Program::transform_feedback_varyings was called on program {} \
                         after linking; relink it for the varyings to take effect.",
                        self.obj.name()),
                "Program::transform_feedback_varyings");
        }
        self.context().call("glTransformFeedbackVaryings", "Program::transform_feedback_varyings",
                            |d| d.transform_feedback_varyings(self.obj.name(), varyings,
                                                              mode.as_gl()));
        Ok(())
    }
}

impl Bindable for Program {
    fn context(&self) -> &Rc<Context> {
        self.obj.context()
    }

    fn name(&self) -> GLuint {
        self.obj.name()
    }

    fn binding_query(&self) -> (GLenum, String) {
        (gl::CURRENT_PROGRAM, "GL_CURRENT_PROGRAM".to_string())
    }

    #[track_caller]
    fn bind_name(&self, name: GLuint) {
        self.context().call("glUseProgram", "Program::use_program", |d| d.use_program(name));
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        if !self.obj.is_owned() || self.obj.name() == 0 {
            return;
        }
        let program = self.obj.name();
        for &shader in &self.shaders {
            self.obj.context().call("glDetachShader", "Program::drop",
                                    |d| d.detach_shader(program, shader));
        }
    }
}
