use std::cell::RefCell;

/// Line-oriented log collaborator.
///
/// Implementations must not panic; the draw pipeline calls this from places
/// where a failure has already been absorbed.
pub trait LineSink {
    fn write_line(&self, line: &str);
}

/// Default sink: forwards every line to the `log` facade at info level.
#[derive(Debug, Default, Copy, Clone)]
pub struct LogSink;

impl LineSink for LogSink {
    fn write_line(&self, line: &str) {
        log::info!(target: "rosalila", "{line}");
    }
}

/// Sink that keeps every line in memory. Useful for tests and for hosts that
/// want to surface engine messages in their own UI.
#[derive(Debug, Default)]
pub struct RecordingSink {
    lines: RefCell<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every recorded line, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl LineSink for RecordingSink {
    fn write_line(&self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}

impl<T: LineSink + ?Sized> LineSink for &T {
    fn write_line(&self, line: &str) {
        (**self).write_line(line);
    }
}
