//! Typed uniform variables of a program.
//!
//! Setting a uniform acts on the current program, so `set` first checks that
//! the uniform's program is current, the same way other wrappers check their
//! bindings.

use gleam::gl::{GLint, GLuint};
use std::cell::Cell;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::binding::{check_binding, Bindable};
use crate::capabilities::Feature;
use crate::context::Context;
use crate::driver::Driver;
use crate::error::Result;
use crate::program::Program;

/// Types a uniform can hold, and the `glUniform*` and `glGetUniform*` calls
/// that set and read them.
///
/// Matrices are arrays of columns.
pub trait UniformValue: Sized {
    /// The entry points `set_uniform` and `get_uniform` call, for
    /// diagnostics.
    const GL_CALL: &'static str;
    const GET_CALL: &'static str;

    /// The feature the context must have to set values of this type, beyond
    /// what every context provides.
    const FEATURE: Option<Feature> = None;

    fn set_uniform(&self, driver: &dyn Driver, location: GLint);

    /// Read the value at `location` of `program`.
    fn get_uniform(driver: &dyn Driver, program: GLuint, location: GLint) -> Self;
}

impl UniformValue for f32 {
    const GL_CALL: &'static str = "glUniform1f";
    const GET_CALL: &'static str = "glGetUniformfv";

    fn set_uniform(&self, driver: &dyn Driver, location: GLint) {
        driver.uniform_1f(location, *self)
    }

    fn get_uniform(driver: &dyn Driver, program: GLuint, location: GLint) -> f32 {
        let mut value = [0.0];
        driver.get_uniform_fv(program, location, &mut value);
        value[0]
    }
}

impl UniformValue for i32 {
    const GL_CALL: &'static str = "glUniform1i";
    const GET_CALL: &'static str = "glGetUniformiv";

    fn set_uniform(&self, driver: &dyn Driver, location: GLint) {
        driver.uniform_1i(location, *self)
    }

    fn get_uniform(driver: &dyn Driver, program: GLuint, location: GLint) -> i32 {
        let mut value = [0];
        driver.get_uniform_iv(program, location, &mut value);
        value[0]
    }
}

impl UniformValue for u32 {
    const GL_CALL: &'static str = "glUniform1ui";
    const GET_CALL: &'static str = "glGetUniformuiv";
    const FEATURE: Option<Feature> = Some(Feature::UnsignedIntegerUniforms);

    fn set_uniform(&self, driver: &dyn Driver, location: GLint) {
        driver.uniform_1ui(location, *self)
    }

    fn get_uniform(driver: &dyn Driver, program: GLuint, location: GLint) -> u32 {
        let mut value = [0];
        driver.get_uniform_uiv(program, location, &mut value);
        value[0]
    }
}

macro_rules! vector_uniform {
    ( $( [$scalar:ty; $n:tt] => $set:ident, $name:literal, $get:ident, $get_name:literal,
         $feature:expr; )* ) => {
        $(
            impl UniformValue for [$scalar; $n] {
                const GL_CALL: &'static str = $name;
                const GET_CALL: &'static str = $get_name;
                const FEATURE: Option<Feature> = $feature;

                fn set_uniform(&self, driver: &dyn Driver, location: GLint) {
                    vector_uniform!(@call driver.$set(location, self, $n))
                }

                fn get_uniform(driver: &dyn Driver, program: GLuint, location: GLint)
                               -> [$scalar; $n] {
                    let mut value = [<$scalar>::default(); $n];
                    driver.$get(program, location, &mut value);
                    value
                }
            }
        )*
    };
    (@call $d:ident . $set:ident ($loc:ident, $v:ident, 2)) => { $d.$set($loc, $v[0], $v[1]) };
    (@call $d:ident . $set:ident ($loc:ident, $v:ident, 3)) => {
        $d.$set($loc, $v[0], $v[1], $v[2])
    };
    (@call $d:ident . $set:ident ($loc:ident, $v:ident, 4)) => {
        $d.$set($loc, $v[0], $v[1], $v[2], $v[3])
    };
}

vector_uniform! {
    [f32; 2] => uniform_2f, "glUniform2f", get_uniform_fv, "glGetUniformfv", None;
    [f32; 3] => uniform_3f, "glUniform3f", get_uniform_fv, "glGetUniformfv", None;
    [f32; 4] => uniform_4f, "glUniform4f", get_uniform_fv, "glGetUniformfv", None;
    [i32; 2] => uniform_2i, "glUniform2i", get_uniform_iv, "glGetUniformiv", None;
    [i32; 3] => uniform_3i, "glUniform3i", get_uniform_iv, "glGetUniformiv", None;
    [i32; 4] => uniform_4i, "glUniform4i", get_uniform_iv, "glGetUniformiv", None;
    [u32; 2] => uniform_2ui, "glUniform2ui", get_uniform_uiv, "glGetUniformuiv",
        Some(Feature::UnsignedIntegerUniforms);
    [u32; 3] => uniform_3ui, "glUniform3ui", get_uniform_uiv, "glGetUniformuiv",
        Some(Feature::UnsignedIntegerUniforms);
    [u32; 4] => uniform_4ui, "glUniform4ui", get_uniform_uiv, "glGetUniformuiv",
        Some(Feature::UnsignedIntegerUniforms);
}

macro_rules! matrix_uniform {
    ( $( $n:literal => $call:ident, $name:literal; )* ) => {
        $(
            impl UniformValue for [[f32; $n]; $n] {
                const GL_CALL: &'static str = $name;
                const GET_CALL: &'static str = "glGetUniformfv";

                fn set_uniform(&self, driver: &dyn Driver, location: GLint) {
                    let columns: Vec<f32> = self.iter().flatten().copied().collect();
                    driver.$call(location, false, &columns)
                }

                fn get_uniform(driver: &dyn Driver, program: GLuint, location: GLint)
                               -> [[f32; $n]; $n] {
                    let mut flat = [0.0; $n * $n];
                    driver.get_uniform_fv(program, location, &mut flat);
                    let mut columns = [[0.0; $n]; $n];
                    for (column, values) in columns.iter_mut().zip(flat.chunks($n)) {
                        column.copy_from_slice(values);
                    }
                    columns
                }
            }
        )*
    }
}

matrix_uniform! {
    2 => uniform_matrix_2fv, "glUniformMatrix2fv";
    3 => uniform_matrix_3fv, "glUniformMatrix3fv";
    4 => uniform_matrix_4fv, "glUniformMatrix4fv";
}

/// A uniform whose location is looked up when it is created.
pub struct Uniform<T: UniformValue> {
    program: Program,
    name: String,
    location: GLint,
    marker: PhantomData<fn(&T)>,
}

impl<T: UniformValue> Uniform<T> {
    /// Look up uniform `name` of `program`. A uniform the program doesn't
    /// have is reported when error checking is on; setting it does nothing.
    #[track_caller]
    pub fn new(program: &Program, name: &str) -> Uniform<T> {
        let location = program.uniform_location(name);
        if location == -1 {
            report_missing(program.context(), program.name(), name, "Uniform::new");
        }
        Uniform { program: view(program), name: name.to_string(), location, marker: PhantomData }
    }

    /// Look up element `index` of uniform array `name`.
    #[track_caller]
    pub fn indexed(program: &Program, name: &str, index: usize) -> Uniform<T> {
        Uniform::new(program, &format!("{}[{}]", name, index))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> GLint {
        self.location
    }

    /// Set the uniform in its program, which must be current. Unsigned
    /// integer uniforms need `Feature::UnsignedIntegerUniforms`.
    #[track_caller]
    pub fn set(&self, value: T) -> Result<()> {
        set(&self.program, self.location, &value, "Uniform::set")
    }

    /// Read the uniform's current value back from its program.
    #[track_caller]
    pub fn get(&self) -> Result<T> {
        get(&self.program, self.location, "Uniform::get")
    }
}

/// A uniform whose location is looked up the first time it is set.
pub struct LazyUniform<T: UniformValue> {
    program: Program,
    name: String,
    location: Cell<Option<GLint>>,
    marker: PhantomData<fn(&T)>,
}

impl<T: UniformValue> LazyUniform<T> {
    pub fn new(program: &Program, name: &str) -> LazyUniform<T> {
        LazyUniform {
            program: view(program),
            name: name.to_string(),
            location: Cell::new(None),
            marker: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The location, looking it up if this is the first use.
    #[track_caller]
    pub fn location(&self) -> GLint {
        if let Some(location) = self.location.get() {
            return location;
        }
        let location = self.program.uniform_location(&self.name);
        if location == -1 {
            report_missing(self.program.context(), self.program.name(), &self.name,
                           "LazyUniform::set");
        }
        self.location.set(Some(location));
        location
    }

    #[track_caller]
    pub fn set(&self, value: T) -> Result<()> {
        let location = self.location();
        set(&self.program, location, &value, "LazyUniform::set")
    }

    #[track_caller]
    pub fn get(&self) -> Result<T> {
        let location = self.location();
        get(&self.program, location, "LazyUniform::get")
    }
}

/// A sampler uniform, set to the texture unit to sample.
pub type UniformSampler = Uniform<i32>;
pub type LazyUniformSampler = LazyUniform<i32>;

/// A non-owning handle on `program`, for checking it is current.
fn view(program: &Program) -> Program {
    Program::from_raw(program.context(), program.name())
}

#[track_caller]
fn set<T: UniformValue>(program: &Program, location: GLint, value: &T, function: &'static str)
                        -> Result<()> {
    if let Some(feature) = T::FEATURE {
        program.context().require(feature)?;
    }
    check_binding(program, function);
    program.context().call(T::GL_CALL, function, |d| value.set_uniform(d, location));
    Ok(())
}

/// Reading doesn't need the program to be current.
#[track_caller]
fn get<T: UniformValue>(program: &Program, location: GLint, function: &'static str)
                        -> Result<T> {
    let ctx = program.context();
    ctx.require(Feature::GetUniform)?;
    if let Some(feature) = T::FEATURE {
        ctx.require(feature)?;
    }
    Ok(ctx.call(T::GET_CALL, function, |d| T::get_uniform(d, program.name(), location)))
}

#[track_caller]
fn report_missing(ctx: &Rc<Context>, program: GLuint, name: &str, function: &'static str) {
    ctx.report_misuse("Uniform Location Error",
                      format!("Program {} has no active uniform named '{}'.", program, name),
                      function);
}
