//! Reporting of GL errors and wrapper misuse.
//!
//! Checks that fire at run time (a `glGetError` flag after a call, an object
//! used while something else is bound, a shader compiled twice) don't fail
//! the call. They build an `ErrorMessage` and hand it to the context's
//! `DebugSink`, then carry on. The context also keeps a `Diagnostics` record
//! of what has been reported, so tests and tools can inspect it afterwards.

use std::fmt;
use std::panic::Location;

use crate::enums::ErrorType;

/// One diagnostic: what went wrong, and where the caller was when it did.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorMessage {
    pub title: String,
    pub message: String,
    /// The caller's source file and line.
    pub file: &'static str,
    pub line: u32,
    /// The wrapper method that detected the problem, like `"Buffer::data"`.
    pub function: &'static str,
    /// The GL entry point whose error flag triggered this message, if any.
    pub call: Option<&'static str>,
}

impl ErrorMessage {
    #[track_caller]
    pub fn new<T: Into<String>, M: Into<String>>(title: T, message: M,
                                                 function: &'static str) -> ErrorMessage {
        let location = Location::caller();
        ErrorMessage {
            title: title.into(),
            message: message.into(),
            file: location.file(),
            line: location.line(),
            function,
            call: None,
        }
    }

    pub fn with_call(self, call: &'static str) -> ErrorMessage {
        ErrorMessage { call: Some(call), ..self }
    }
}

impl fmt::Display for ErrorMessage {
    /// The banner format: a titled header, the context of the failure, the
    /// message, and a footer rule as wide as the header.
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let header = format!("---------========={{[ {} ]}}=========---------", self.title);
        writeln!(fmt, "{}\n", header)?;
        if let Some(call) = self.call {
            writeln!(fmt, "Caused by {}", call)?;
        }
        writeln!(fmt, "In function: {}", self.function)?;
        writeln!(fmt, "In '{}' at line {}\n", self.file, self.line)?;
        writeln!(fmt, "{}", self.message)?;
        write!(fmt, "{}", "-".repeat(header.len()))
    }
}

/// Somewhere to send diagnostics.
pub trait DebugSink {
    fn report(&self, message: &ErrorMessage);
}

impl<F: Fn(&ErrorMessage)> DebugSink for F {
    fn report(&self, message: &ErrorMessage) {
        self(message)
    }
}

/// Print each diagnostic to standard error in banner format. This is the
/// default sink.
#[derive(Copy, Clone, Debug, Default)]
pub struct StderrSink;

impl DebugSink for StderrSink {
    fn report(&self, message: &ErrorMessage) {
        eprintln!("\n{}\n", message);
    }
}

/// Forward each diagnostic to the `log` facade at `error` level, on one line.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogSink;

impl DebugSink for LogSink {
    fn report(&self, message: &ErrorMessage) {
        match message.call {
            Some(call) => log::error!("{}: {} (caused by {}, in {} at {}:{})",
                                      message.title, message.message, call,
                                      message.function, message.file, message.line),
            None => log::error!("{}: {} (in {} at {}:{})",
                                message.title, message.message,
                                message.function, message.file, message.line),
        }
    }
}

/// What a context has reported so far.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagnostics {
    /// The most recent error flag `glGetError` returned.
    pub last_error: Option<ErrorType>,
    /// The most recent diagnostic of any kind.
    pub last_message: Option<ErrorMessage>,
    /// How many diagnostics have been reported.
    pub reported: usize,
}

#[test]
fn test_banner_format() {
    let message = ErrorMessage {
        title: "Invalid Operation".to_string(),
        message: "bad".to_string(),
        file: "src/main.rs",
        line: 12,
        function: "Buffer::data",
        call: Some("glBufferData"),
    };

    let text = message.to_string();
    let mut lines = text.lines();
    let header = lines.next().unwrap();
    assert_eq!(header, "---------========={[ Invalid Operation ]}=========---------");
    assert_eq!(lines.next(), Some(""));
    assert_eq!(lines.next(), Some("Caused by glBufferData"));
    assert_eq!(lines.next(), Some("In function: Buffer::data"));
    assert_eq!(lines.next(), Some("In 'src/main.rs' at line 12"));
    assert_eq!(lines.next(), Some(""));
    assert_eq!(lines.next(), Some("bad"));
    assert_eq!(lines.next().map(str::len), Some(header.len()));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_closure_sink() {
    use std::cell::RefCell;

    let seen = RefCell::new(vec![]);
    let sink = |m: &ErrorMessage| seen.borrow_mut().push(m.title.clone());
    sink.report(&ErrorMessage::new("Title", "text", "test"));
    assert_eq!(*seen.borrow(), vec!["Title".to_string()]);
}

#[test]
fn test_log_sink() {
    use std::sync::Mutex;

    struct Collect(Mutex<Vec<String>>);

    impl log::Log for Collect {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= log::Level::Error
        }

        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                self.0.lock().unwrap().push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: Collect = Collect(Mutex::new(Vec::new()));
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(log::LevelFilter::Error);

    let message = ErrorMessage {
        title: "Sink Check".to_string(),
        message: "one line".to_string(),
        file: "src/lib.rs",
        line: 3,
        function: "Texture::bind",
        call: None,
    };
    LogSink.report(&message);
    LogSink.report(&message.clone().with_call("glBindTexture"));

    let lines: Vec<String> = LOGGER.0.lock().unwrap().iter()
        .filter(|line| line.starts_with("Sink Check"))
        .cloned()
        .collect();
    assert_eq!(lines, vec![
        "Sink Check: one line (in Texture::bind at src/lib.rs:3)".to_string(),
        "Sink Check: one line (caused by glBindTexture, in Texture::bind at src/lib.rs:3)"
            .to_string(),
    ]);
}
