//! The per-context state every wrapper object holds a reference to.

use gleam::gl::GLenum;
use std::cell::RefCell;
use std::convert::TryFrom;
use std::rc::Rc;

use crate::capabilities::{Capabilities, Feature};
use crate::config::Config;
use crate::debug::{DebugSink, Diagnostics, ErrorMessage, StderrSink};
use crate::driver::Driver;
use crate::enums::ErrorType;
use crate::error::{Error, Result};

/// Give up draining `glGetError` after this many flags. A driver with no
/// current context can report errors forever.
const MAX_ERROR_FLAGS: usize = 8;

/// A GL context, as the wrappers see it.
///
/// Every object wrapper holds an `Rc<Context>`. All calls into GL go through
/// `Context::call`, which checks for errors afterwards when the configuration
/// asks for it, and all diagnostics go through `Context::report`.
pub struct Context {
    driver: Box<dyn Driver>,
    capabilities: Capabilities,
    config: Config,
    sink: RefCell<Box<dyn DebugSink>>,
    diagnostics: RefCell<Diagnostics>,
}

impl Context {
    /// Wrap `driver`, configured from the environment (see `Config::from_env`).
    pub fn new<D: Driver + 'static>(driver: D) -> Rc<Context> {
        Context::with_config(driver, Config::from_env())
    }

    pub fn with_config<D: Driver + 'static>(driver: D, config: Config) -> Rc<Context> {
        let capabilities = Capabilities::detect(&driver);
        log::debug!("context: {:?}", config);
        Rc::new(Context {
            driver: Box::new(driver),
            capabilities,
            config,
            sink: RefCell::new(Box::new(StderrSink)),
            diagnostics: RefCell::new(Diagnostics::default()),
        })
    }

    /// The driver, for calls the wrappers don't cover. Calls made this way
    /// are not error-checked.
    pub fn driver(&self) -> &dyn Driver {
        &*self.driver
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send future diagnostics to `sink` instead of standard error.
    pub fn set_sink<S: DebugSink + 'static>(&self, sink: S) {
        *self.sink.borrow_mut() = Box::new(sink);
    }

    /// A snapshot of what has been reported so far.
    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics.borrow().clone()
    }

    /// The most recent error flag the error check saw.
    pub fn last_error(&self) -> Option<ErrorType> {
        self.diagnostics.borrow().last_error
    }

    pub fn supports(&self, feature: Feature) -> bool {
        self.capabilities.supports(&*self.driver, feature)
    }

    /// Return `Err(Error::Unsupported)` if this context lacks `feature`.
    pub fn require(&self, feature: Feature) -> Result<()> {
        if self.supports(feature) {
            Ok(())
        } else {
            log::debug!("unsupported feature: {}", feature);
            Err(Error::Unsupported(feature))
        }
    }

    /// Make a GL call through the driver, and check for errors afterwards.
    ///
    /// `gl_call` is the GL entry point `f` calls, like `"glBufferData"`, and
    /// `function` the wrapper method making the call, like `"Buffer::data"`.
    /// Both only appear in diagnostics.
    #[track_caller]
    pub fn call<R, F>(&self, gl_call: &'static str, function: &'static str, f: F) -> R
    where F: FnOnce(&dyn Driver) -> R
    {
        let result = f(&*self.driver);
        self.check_error(gl_call, function);
        result
    }

    /// If error checking is on, drain the driver's error flags, reporting
    /// each one. Return the first flag found.
    #[track_caller]
    pub fn check_error(&self, gl_call: &'static str, function: &'static str) -> Option<ErrorType> {
        if !self.config.error_check {
            return None;
        }

        let mut first = None;
        for _ in 0..MAX_ERROR_FLAGS {
            let code = self.driver.get_error();
            if code == gl::NO_ERROR {
                break;
            }
            let message = match ErrorType::try_from(code) {
                Ok(error) => {
                    self.diagnostics.borrow_mut().last_error = Some(error);
                    first = first.or(Some(error));
                    ErrorMessage::new(error.title(),
                                      format!("{} generated {}.", gl_call, error.gl_name()),
                                      function)
                }
                Err(_) => ErrorMessage::new("Unknown Error",
                                            format!("{} generated error code {:#x}.",
                                                    gl_call, code),
                                            function),
            };
            self.report(message.with_call(gl_call));
        }
        first
    }

    /// Send `message` to the sink and record it.
    ///
    /// # Panics
    ///
    /// When the configuration sets `max_errors`, reporting that many messages
    /// panics.
    pub fn report(&self, message: ErrorMessage) {
        let reported = {
            let mut diagnostics = self.diagnostics.borrow_mut();
            diagnostics.reported += 1;
            diagnostics.last_message = Some(message.clone());
            diagnostics.reported
        };
        self.sink.borrow().report(&message);
        if let Some(max) = self.config.max_errors {
            if reported >= max {
                panic!("oglwrap: stopping after {} reported errors; the last was:\n{}",
                       reported, message);
            }
        }
    }

    /// Report a logical error: misuse the wrapper caught, rather than GL.
    #[track_caller]
    pub(crate) fn report_misuse<M: Into<String>>(&self, title: &str, message: M,
                                                function: &'static str) {
        if self.config.error_check {
            self.report(ErrorMessage::new(title, message, function));
        }
    }

    /// The current binding at `query`.
    pub(crate) fn bound(&self, query: GLenum) -> gleam::gl::GLuint {
        use crate::driver::DriverExt;
        self.driver.get_bound(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessDriver;

    #[test]
    fn test_check_error() {
        let ctx = Context::with_config(HeadlessDriver::new(), Config::debug());
        let seen = Rc::new(RefCell::new(vec![]));
        let sink_seen = seen.clone();
        ctx.set_sink(move |m: &ErrorMessage| sink_seen.borrow_mut().push(m.clone()));

        ctx.call("glBindBuffer", "test", |d| d.bind_buffer(gl::ARRAY_BUFFER, 1234));
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].title, "Invalid Operation");
        assert_eq!(seen[0].call, Some("glBindBuffer"));
        assert_eq!(seen[0].file, file!());
        assert_eq!(ctx.last_error(), Some(ErrorType::InvalidOperation));
        assert_eq!(ctx.diagnostics().reported, 1);
    }

    #[test]
    fn test_release_skips_checks() {
        let ctx = Context::with_config(HeadlessDriver::new(), Config::release());
        ctx.call("glBindBuffer", "test", |d| d.bind_buffer(gl::ARRAY_BUFFER, 1234));
        assert_eq!(ctx.diagnostics().reported, 0);
        // The flag is still there for whoever asks.
        assert_eq!(ctx.driver().get_error(), gl::INVALID_OPERATION);
    }

    #[test]
    #[should_panic(expected = "stopping after 2 reported errors")]
    fn test_max_errors() {
        let config = Config { max_errors: Some(2), ..Config::debug() };
        let ctx = Context::with_config(HeadlessDriver::new(), config);
        ctx.set_sink(|_: &ErrorMessage| {});
        for _ in 0..3 {
            ctx.call("glEnable", "test", |d| d.enable(0));
        }
    }
}
