//! Typed, owning wrappers around OpenGL objects.
//!
//! Every GL object kind gets a Rust type (`Buffer`, `Texture`, `Program`,
//! ...) that generates its object when created and deletes it when dropped.
//! Methods take typed enums instead of raw `GLenum`s, so a texture method
//! can't be handed a buffer target.
//!
//! All wrappers share an `Rc<Context>`, which holds the `Driver` making the
//! actual GL calls, the capabilities detected when it was created, and a
//! `Config` choosing which debug-time checks run:
//!
//! - With `error_check` on, `glGetError` is drained after every call, and
//!   each flag is reported to the context's `DebugSink` along with the GL
//!   entry point and the caller's file and line.
//!
//! - With `bind_check` on, methods acting on "whatever is bound" first check
//!   that their object is the one bound. If it isn't, that is reported and
//!   the object is bound, so the call does what the caller meant.
//!
//! Functionality newer than OpenGL 2.1 / ES 2.0 is checked against the
//! context's capabilities, and returns `Error::Unsupported` when missing.
//!
//! Drivers:
//!
//! - `GleamDriver` forwards to a real context through `gleam`.
//! - `HeadlessDriver` models objects and bindings in memory, for tests and
//!   for running without a GPU.
//! - `Recorder` wraps another driver and records every call it forwards.

mod binding;
mod buffer;
mod call;
mod capabilities;
mod config;
mod context;
mod debug;
mod driver;
pub mod drawing;
pub mod enums;
mod error;
mod framebuffer;
mod gleam_driver;
mod headless;
mod object;
mod program;
pub mod raw;
mod recorder;
mod renderbuffer;
mod shader;
pub mod state;
mod texture;
mod transform_feedback;
mod uniform;
mod vertex_array;

pub use binding::{check_binding, check_default_binding, Bindable, TemporaryBind};
pub use buffer::{Buffer, BufferMap};
pub use call::Call;
pub use capabilities::{parse_version, Capabilities, Feature};
pub use config::Config;
pub use context::Context;
pub use debug::{DebugSink, Diagnostics, ErrorMessage, LogSink, StderrSink};
pub use drawing::IndexType;
pub use driver::{Driver, DriverExt, EntryPoint};
pub use error::{Error, Result};
pub use framebuffer::{Framebuffer, Rect};
pub use gleam_driver::GleamDriver;
pub use headless::HeadlessDriver;
pub use object::{Object, ObjectKind};
pub use program::Program;
pub use raw::Plain;
pub use recorder::{CallStream, Recorder};
pub use renderbuffer::Renderbuffer;
pub use shader::{Shader, ShaderSource};
pub use state::Viewport;
pub use texture::{ImageOptions, Texture};
pub use transform_feedback::{TransformFeedback, TransformFeedbackActivator};
pub use uniform::{LazyUniform, LazyUniformSampler, Uniform, UniformSampler, UniformValue};
pub use vertex_array::{AttribType, VertexArray, VertexAttrib};
