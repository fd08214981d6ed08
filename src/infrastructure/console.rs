use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Line-oriented output sink the stub adapters report through.
pub trait Console: Send + Sync {
    fn write_line(&self, line: &str) -> io::Result<()>;
}

pub type ConsoleRef = Arc<dyn Console>;

#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{line}")?;
        out.flush()
    }
}

/// Captures lines in memory. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct RecordingConsole {
    lines: Arc<Mutex<Vec<String>>>,
}

impl RecordingConsole {
    /// Creates a new, empty recording console.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every line written so far, oldest first.
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Console for RecordingConsole {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut lines = self
            .lines
            .lock()
            .map_err(|_| io::Error::other("recording console poisoned"))?;
        lines.push(line.to_string());
        Ok(())
    }
}
