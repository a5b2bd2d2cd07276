//! GLSL source text and shader objects.

use gleam::gl::GLuint;
use std::cell::Cell;
use std::fmt;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use crate::context::Context;
use crate::enums::ShaderType;
use crate::error::{Error, Result};
use crate::object::{Object, ObjectKind};

const UNNAMED: &str = "Unnamed shader";

/// GLSL source text, along with the name of the file it came from, for
/// diagnostics.
#[derive(Clone, Debug, PartialEq)]
pub struct ShaderSource {
    source: String,
    name: String,
}

impl ShaderSource {
    pub fn new<S: Into<String>>(source: S) -> ShaderSource {
        ShaderSource { source: source.into(), name: UNNAMED.to_string() }
    }

    /// Read `path`, resolved against the context's configured shader path.
    pub fn from_file<P: AsRef<Path>>(ctx: &Context, path: P) -> Result<ShaderSource> {
        let path = path.as_ref();
        let full_path = ctx.config().shader_path.join(path);
        let source = fs::read_to_string(&full_path)
            .map_err(|source| Error::ShaderFile { path: full_path.clone(), source })?;
        log::trace!("read shader source {}", full_path.display());
        Ok(ShaderSource { source, name: path.display().to_string() })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn set_source<S: Into<String>>(&mut self, source: S) {
        self.source = source.into();
    }

    /// The file the source was read from, or "Unnamed shader".
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    /// Give the first `#define` of `macro_name` the value `value`, replacing
    /// whatever followed the macro's name on that line.
    pub fn insert_macro_value<T: fmt::Display>(&mut self, macro_name: &str, value: T)
                                               -> Result<()> {
        let directive = format!("#define {}", macro_name);
        let mut search_from = 0;
        let name_end = loop {
            let found = match self.source[search_from..].find(&directive) {
                Some(offset) => search_from + offset,
                None => return Err(Error::MacroNotFound {
                    name: macro_name.to_string(),
                    shader: self.name.clone(),
                }),
            };
            let end = found + directive.len();
            // `#define FOO` must not match `#define FOOBAR`.
            match self.source[end..].chars().next() {
                Some(c) if c.is_alphanumeric() || c == '_' => search_from = end,
                _ => break end,
            }
        };
        let line_end = self.source[name_end..].find('\n')
            .map_or(self.source.len(), |offset| name_end + offset);
        self.source.replace_range(name_end..line_end, &format!(" {}", value));
        Ok(())
    }
}

/// A shader object.
///
/// A shader compiles at most once: `compile` on a compiled shader is
/// reported as misuse and does nothing else. `Program::attach` compiles
/// shaders that haven't been compiled yet.
#[derive(Debug)]
pub struct Shader {
    obj: Object,
    ty: ShaderType,
    name: String,
    compiled: Cell<bool>,
}

impl Shader {
    #[track_caller]
    pub fn new(ctx: &Rc<Context>, ty: ShaderType) -> Shader {
        let name = ctx.call("glCreateShader", "Shader::new", |d| d.create_shader(ty.as_gl()));
        Shader {
            obj: Object::owned(ctx, ObjectKind::Shader, name),
            ty,
            name: UNNAMED.to_string(),
            compiled: Cell::new(false),
        }
    }

    /// Create a shader and give it `source`.
    #[track_caller]
    pub fn with_source(ctx: &Rc<Context>, ty: ShaderType, source: &ShaderSource) -> Shader {
        let mut shader = Shader::new(ctx, ty);
        shader.source(source);
        shader
    }

    /// Create a shader from the file at `path`, resolved against the
    /// configured shader path.
    #[track_caller]
    pub fn from_file<P: AsRef<Path>>(ctx: &Rc<Context>, ty: ShaderType, path: P)
                                     -> Result<Shader> {
        let source = ShaderSource::from_file(ctx, path)?;
        Ok(Shader::with_source(ctx, ty, &source))
    }

    pub fn ty(&self) -> ShaderType {
        self.ty
    }

    /// The name of the file this shader's source came from.
    pub fn source_name(&self) -> &str {
        &self.name
    }

    pub fn object(&self) -> &Object {
        &self.obj
    }

    pub fn context(&self) -> &Rc<Context> {
        self.obj.context()
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled.get()
    }

    /// Replace the shader's source. The shader must be compiled again
    /// before it takes effect.
    #[track_caller]
    pub fn source(&mut self, source: &ShaderSource) {
        self.name = source.name().to_string();
        self.compiled.set(false);
        let text = source.source().as_bytes();
        self.context().call("glShaderSource", "Shader::source",
                            |d| d.shader_source(self.obj.name(), &[text]));
    }

    /// Compile the shader. When error checking is on, a failed compile
    /// returns `Error::ShaderCompile` with the driver's info log.
    #[track_caller]
    pub fn compile(&self) -> Result<()> {
        let ctx = self.context();
        if self.compiled.get() {
            ctx.report_misuse("Shader Compile Misuse",
                              format!("Shader::compile was called on shader '{}', \
                                       which is already compiled.", self.name),
                              "Shader::compile");
            return Ok(());
        }
        ctx.call("glCompileShader", "Shader::compile", |d| d.compile_shader(self.obj.name()));
        self.compiled.set(true);

        if ctx.config().error_check && !self.compile_status() {
            let log = self.info_log();
            log::error!("shader '{}' failed to compile:\n{}", self.name, log);
            return Err(Error::ShaderCompile { name: self.name.clone(), log });
        }
        Ok(())
    }

    /// Compile the shader if it hasn't been already.
    #[track_caller]
    pub(crate) fn ensure_compiled(&self) -> Result<()> {
        if self.compiled.get() {
            return Ok(());
        }
        self.compile()
    }

    /// Whether the last compile succeeded.
    #[track_caller]
    pub fn compile_status(&self) -> bool {
        self.context().call("glGetShaderiv", "Shader::compile_status",
                            |d| d.get_shader_iv(self.obj.name(), gl::COMPILE_STATUS)) != 0
    }

    #[track_caller]
    pub fn info_log(&self) -> String {
        self.context().call("glGetShaderInfoLog", "Shader::info_log",
                            |d| d.get_shader_info_log(self.obj.name()))
    }
}

/// The raw name, for the program wrapper.
pub(crate) fn shader_name(shader: &Shader) -> GLuint {
    shader.obj.name()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_macro_value() {
        fn check(source: &str, name: &str, value: &str, expected: &str) {
            let mut shader = ShaderSource::new(source);
            shader.insert_macro_value(name, value).unwrap();
            assert_eq!(shader.source(), expected);
        }

        check("#define COUNT 4\nvoid main() {}\n", "COUNT", "16",
              "#define COUNT 16\nvoid main() {}\n");
        check("#define COUNT\n", "COUNT", "2", "#define COUNT 2\n");
        check("#define COUNT 4", "COUNT", "8", "#define COUNT 8");
        check("#define COUNTER 1\n#define COUNT 4\n", "COUNT", "5",
              "#define COUNTER 1\n#define COUNT 5\n");
    }

    #[test]
    fn test_missing_macro() {
        let mut shader = ShaderSource::new("#define OTHER 1\n");
        shader.set_name("blur.frag");
        match shader.insert_macro_value("RADIUS", 3) {
            Err(Error::MacroNotFound { name, shader }) => {
                assert_eq!(name, "RADIUS");
                assert_eq!(shader, "blur.frag");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
