use std::fmt;
use std::io::Write;
use std::sync::Mutex;

/// Human facing progress lines, kept apart from the tracing output on stderr
pub struct Console {
    out: Mutex<Box<dyn Write + Send>>,
}

impl Console {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
        }
    }

    pub fn line(&self, line: impl fmt::Display) -> eyre::Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| eyre::eyre!("Console lock poisoned"))?;

        writeln!(out, "{line}")?;
        out.flush()?;

        Ok(())
    }

    pub fn blank(&self) -> eyre::Result<()> {
        self.line("")
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}
