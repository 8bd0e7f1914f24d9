//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.
//! Formatting is a pure function of severity and message; [`Console`] only
//! decides which sink a rendered line goes to.

use std::fmt::Display;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use colored::Colorize;

/// Kind of user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Plain output (no color)
    Info,
    /// Green checkmark
    Success,
    /// Yellow "Warning:" prefix, error sink
    Warning,
    /// Red bold "error:" prefix, error sink
    Error,
    /// Cyan bold section header
    Header,
    /// Indented detail
    Detail,
}

impl Severity {
    /// Whether the message belongs on the error sink.
    pub fn is_diagnostic(self) -> bool {
        matches!(self, Severity::Warning | Severity::Error)
    }
}

/// Render one message line (without trailing newline).
pub fn render(severity: Severity, msg: &(impl Display + ?Sized)) -> String {
    match severity {
        Severity::Info => msg.to_string(),
        Severity::Success => format!("{} {}", "✓".green(), msg),
        Severity::Warning => format!("{}: {}", "Warning".yellow(), msg),
        Severity::Error => format!("{}: {}", "error".red().bold(), msg),
        Severity::Header => msg.to_string().cyan().bold().to_string(),
        Severity::Detail => format!("  {}", msg),
    }
}

/// Output sink pair: regular output and diagnostics.
pub struct Console {
    out: Box<dyn Write>,
    err: Box<dyn Write>,
}

impl Console {
    /// Console writing to the process's stdout and stderr.
    pub fn stdio() -> Self {
        Self::new(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    pub fn new(out: Box<dyn Write>, err: Box<dyn Write>) -> Self {
        Self { out, err }
    }

    /// Console writing into in-memory buffers, for tests.
    pub fn captured() -> (Self, CapturedOutput) {
        let captured = CapturedOutput::default();
        let console = Self::new(
            Box::new(captured.out.clone()),
            Box::new(captured.err.clone()),
        );
        (console, captured)
    }

    pub fn emit(&mut self, severity: Severity, msg: &(impl Display + ?Sized)) {
        let line = render(severity, msg);
        let sink = if severity.is_diagnostic() {
            &mut self.err
        } else {
            &mut self.out
        };
        // best effort
        writeln!(sink, "{line}").ok();
    }

    pub fn info(&mut self, msg: &(impl Display + ?Sized)) {
        self.emit(Severity::Info, msg);
    }

    pub fn success(&mut self, msg: &(impl Display + ?Sized)) {
        self.emit(Severity::Success, msg);
    }

    pub fn warning(&mut self, msg: &(impl Display + ?Sized)) {
        self.emit(Severity::Warning, msg);
    }

    pub fn error(&mut self, msg: &(impl Display + ?Sized)) {
        self.emit(Severity::Error, msg);
    }

    pub fn header(&mut self, msg: &(impl Display + ?Sized)) {
        self.emit(Severity::Header, msg);
    }

    pub fn detail(&mut self, msg: &(impl Display + ?Sized)) {
        self.emit(Severity::Detail, msg);
    }
}

/// Shared growable byte buffer usable as a `Write` sink.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        self.0
            .lock()
            .map(|buf| String::from_utf8_lossy(&buf).into_owned())
            .unwrap_or_default()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self
            .0
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        inner.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Handles to what a captured [`Console`] wrote.
#[derive(Clone, Default)]
pub struct CapturedOutput {
    out: SharedBuffer,
    err: SharedBuffer,
}

impl CapturedOutput {
    pub fn stdout(&self) -> String {
        self.out.contents()
    }

    pub fn stderr(&self) -> String {
        self.err.contents()
    }
}
