//! Destinations for report lines and forwarded tool output

use std::io::Write;
use std::sync::Mutex;

/// Where the clean report and the registry tool's stderr are written
///
/// Both go through the same sink so forwarded lines appear at the point
/// they were produced relative to the report.
pub trait OutputSink: Send + Sync {
    /// Write one report line
    fn line(&self, line: &str);

    /// Forward one line of the registry tool's stderr verbatim
    fn forward(&self, line: &str);
}

/// Sink that writes to the process stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn line(&self, line: &str) {
        // Closed pipes are ignored
        let _ = writeln!(std::io::stdout().lock(), "{}", line);
    }

    fn forward(&self, line: &str) {
        self.line(line);
    }
}

/// Sink that keeps everything in memory
#[derive(Debug, Default)]
pub struct BufferSink {
    lines: Mutex<Vec<String>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines written so far, in order
    pub fn lines(&self) -> Vec<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl OutputSink for BufferSink {
    fn line(&self, line: &str) {
        self.lock().push(line.to_string());
    }

    fn forward(&self, line: &str) {
        self.lock().push(line.to_string());
    }
}
