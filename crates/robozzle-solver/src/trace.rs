//! Observers for interpreter runs.
//!
//! A run never logs on its own. Callers that want a step-by-step account pass
//! a [`TraceSink`]; everyone else gets [`NoTrace`], which reports itself as
//! disabled so no trace line is ever formatted.

/// Receives one line of text per notable interpreter step.
pub trait TraceSink {
    /// Whether lines should be produced at all.
    fn enabled(&self) -> bool {
        true
    }

    fn line(&mut self, line: &str);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl TraceSink for NoTrace {
    #[inline]
    fn enabled(&self) -> bool {
        false
    }

    #[inline]
    fn line(&mut self, _line: &str) {}
}

/// Collects lines in memory.
impl TraceSink for Vec<String> {
    fn line(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

/// Forwards lines to `tracing` at TRACE level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn enabled(&self) -> bool {
        tracing::enabled!(tracing::Level::TRACE)
    }

    fn line(&mut self, line: &str) {
        tracing::trace!("{line}");
    }
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    fn enabled(&self) -> bool {
        (**self).enabled()
    }

    fn line(&mut self, line: &str) {
        (**self).line(line)
    }
}

/// Emit a line built lazily, only if the sink is listening.
#[inline]
pub(crate) fn emit<S, F>(sink: &mut S, line: F)
where
    S: TraceSink + ?Sized,
    F: FnOnce() -> String,
{
    if sink.enabled() {
        sink.line(&line());
    }
}
