use std::fmt::Debug;
use std::io::Write;
use std::sync::Mutex;

/// Where trace lines go.
pub trait TraceSink: Debug + Send + Sync {
    /// Append one complete line; the sink adds the line terminator.
    ///
    /// # Errors
    /// if the underlying stream refuses the write.
    fn emit(&self, line: &str) -> std::io::Result<()>;
}

/// Writes each line to stdout in one locked write.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default)]
pub struct StdoutSink {}

impl TraceSink for StdoutSink {
    fn emit(&self, line: &str) -> std::io::Result<()> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(buf.as_bytes())?;
        stdout.flush()
    }
}

/// Keeps every line in memory.
#[derive(Debug, Default)]
pub struct MemorySink(Mutex<Vec<String>>);

impl MemorySink {
    /// Copy of the lines emitted so far.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.0.lock().map(|lines| lines.clone()).unwrap_or_default()
    }

    /// Take the lines emitted so far, leaving the sink empty.
    pub fn drain(&self) -> Vec<String> {
        self.0
            .lock()
            .map(|mut lines| std::mem::take(&mut *lines))
            .unwrap_or_default()
    }
}

impl TraceSink for MemorySink {
    fn emit(&self, line: &str) -> std::io::Result<()> {
        self.0
            .lock()
            .map_err(|_| std::io::Error::new(std::io::ErrorKind::Other, "trace buffer poisoned"))?
            .push(String::from(line));
        Ok(())
    }
}
