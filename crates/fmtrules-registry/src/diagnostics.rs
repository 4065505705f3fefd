//! Deprecation diagnostics emitted by registry lookups.
//!
//! Looking up a deprecated alias reports a [`DeprecationNotice`] to the
//! registry's [`DiagnosticSink`]. Sinks are infallible by signature: whatever
//! happens while reporting, the lookup itself still returns its rule.
//!
//! # Sinks
//!
//! - [`TracingSink`]: `tracing::warn!` event (the default)
//! - [`WriterSink`]: one `[DEPRECATION]` line per notice on any writer
//! - [`RecordingSink`]: keeps notices in memory for later inspection
//! - [`NullSink`]: drops notices

use std::fmt;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

use tracing::warn;

/// A deprecated rule name and the rule that supersedes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deprecation {
    pub replacement: String,
    pub removal_version: Option<String>,
}

/// Notice emitted each time a deprecated alias is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeprecationNotice {
    pub name: String,
    pub replacement: String,
    pub removal_version: Option<String>,
}

impl DeprecationNotice {
    pub fn new(name: &str, deprecation: &Deprecation) -> Self {
        Self {
            name: name.to_string(),
            replacement: deprecation.replacement.clone(),
            removal_version: deprecation.removal_version.clone(),
        }
    }
}

impl fmt::Display for DeprecationNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "the `{}` validation is deprecated; use `{}` instead",
            self.name, self.replacement
        )?;
        if let Some(version) = &self.removal_version {
            write!(f, " (it will be removed in version {version})")?;
        }
        Ok(())
    }
}

/// Receiver for registry diagnostics.
pub trait DiagnosticSink: Send + Sync {
    /// Report that a deprecated rule name was looked up.
    fn deprecated(&self, notice: &DeprecationNotice);
}

/// Reports notices as `tracing` warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn deprecated(&self, notice: &DeprecationNotice) {
        warn!(
            rule = %notice.name,
            replacement = %notice.replacement,
            removal_version = notice.removal_version.as_deref().unwrap_or("-"),
            "{notice}"
        );
    }
}

/// Drops every notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn deprecated(&self, _notice: &DeprecationNotice) {}
}

/// Writes notices to a writer, ignoring write failures.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consume the sink and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> DiagnosticSink for WriterSink<W> {
    fn deprecated(&self, notice: &DeprecationNotice) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        // Best effort: a broken stream must not affect the lookup.
        let _ = writeln!(writer, "[DEPRECATION] {notice}");
        let _ = writer.flush();
    }
}

/// Collects notices in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    notices: Mutex<Vec<DeprecationNotice>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the notices recorded so far.
    pub fn notices(&self) -> Vec<DeprecationNotice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove and return all recorded notices.
    pub fn take(&self) -> Vec<DeprecationNotice> {
        std::mem::take(&mut *self.notices.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl DiagnosticSink for RecordingSink {
    fn deprecated(&self, notice: &DeprecationNotice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice.clone());
    }
}
