//! Audit sinks.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use fs2::FileExt;
use tracing::warn;

use crate::error::{AuditError, AuditResult};
use crate::event::AuditEvent;

/// Destination for audit events.
///
/// Implementations must be thread-safe and tolerate concurrent appends.
pub trait AuditSink: Send + Sync {
    /// Append one event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be persisted. Callers on the
    /// decision path go through [`record_best_effort`] instead.
    fn record(&self, event: &AuditEvent) -> AuditResult<()>;
}

/// Record an event, logging and discarding any failure.
///
/// Returns whether the event was written.
pub fn record_best_effort(sink: &dyn AuditSink, event: &AuditEvent) -> bool {
    match sink.record(event) {
        Ok(()) => true,
        Err(e) => {
            warn!(kind = %event.kind, error = %e, "Failed to record audit event");
            false
        },
    }
}

/// Lock attempts before a contended write is dropped.
const LOCK_ATTEMPTS: u32 = 20;
/// Pause between lock attempts; bounds the wait to roughly 100 ms.
const LOCK_RETRY_DELAY: Duration = Duration::from_millis(5);

/// Append-only JSON Lines file.
///
/// Each event is written as one line under an exclusive advisory lock so
/// overlapping processes never interleave partial records. If another
/// holder keeps the lock past the retry window the write fails with
/// [`AuditError::Io`] instead of waiting.
#[derive(Debug, Clone)]
pub struct JsonlAuditSink {
    path: PathBuf,
}

impl JsonlAuditSink {
    /// Sink writing to `path`. The file and its parent directories are
    /// created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Log file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Take the exclusive lock, giving up after a bounded number of attempts.
    fn lock(&self, file: &File) -> AuditResult<()> {
        for _ in 1..LOCK_ATTEMPTS {
            match file.try_lock_exclusive() {
                Ok(()) => return Ok(()),
                Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
                    thread::sleep(LOCK_RETRY_DELAY);
                },
                Err(e) => return Err(self.io_error(e)),
            }
        }
        file.try_lock_exclusive().map_err(|e| self.io_error(e))
    }

    fn io_error(&self, source: std::io::Error) -> AuditError {
        AuditError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl AuditSink for JsonlAuditSink {
    fn record(&self, event: &AuditEvent) -> AuditResult<()> {
        let mut line = serde_json::to_vec(event)?;
        line.push(b'\n');

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;

        // Released when `file` is dropped.
        self.lock(&file)?;
        file.write_all(&line).map_err(|e| self.io_error(e))?;
        file.flush().map_err(|e| self.io_error(e))
    }
}

/// In-memory sink.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    events: Mutex<Vec<AuditEvent>>,
}

impl MemoryAuditSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, event: &AuditEvent) -> AuditResult<()> {
        self.events
            .lock()
            .map_err(|_| AuditError::Lock)?
            .push(event.clone());
        Ok(())
    }
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAuditSink;

impl AuditSink for NullAuditSink {
    fn record(&self, _event: &AuditEvent) -> AuditResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tempfile::TempDir;

    struct BrokenSink;

    impl AuditSink for BrokenSink {
        fn record(&self, _event: &AuditEvent) -> AuditResult<()> {
            Err(AuditError::Unavailable("disk full".to_string()))
        }
    }

    fn read_lines(path: &Path) -> Vec<Value> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_jsonl_appends_one_line_per_event() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/events.jsonl");
        let sink = JsonlAuditSink::new(&path);

        sink.record(&AuditEvent::new("PreToolUse", json!({"decision": "deny"})))
            .unwrap();
        sink.record(&AuditEvent::new("Stop", json!({}))).unwrap();

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["kind"], "PreToolUse");
        assert_eq!(lines[0]["payload"]["decision"], "deny");
        assert!(lines[0]["ts"].is_string());
        assert_eq!(lines[1]["kind"], "Stop");
    }

    #[test]
    fn test_jsonl_concurrent_appends_do_not_interleave() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.jsonl");
        let sink = Arc::new(JsonlAuditSink::new(&path));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let sink = Arc::clone(&sink);
                std::thread::spawn(move || {
                    for j in 0..10 {
                        let payload = json!({"writer": i, "seq": j, "pad": "x".repeat(512)});
                        sink.record(&AuditEvent::new("PreToolUse", payload)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(read_lines(&path).len(), 80);
    }

    #[test]
    fn test_jsonl_unwritable_path_errors() {
        let dir = TempDir::new().unwrap();
        // A regular file where a directory is expected.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let sink = JsonlAuditSink::new(blocker.join("events.jsonl"));

        let err = sink.record(&AuditEvent::new("Stop", json!({}))).unwrap_err();
        assert!(matches!(err, AuditError::Io { .. }));
    }

    #[test]
    fn test_jsonl_contended_lock_gives_up() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.jsonl");
        let holder = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .unwrap();
        holder.lock_exclusive().unwrap();

        let sink = JsonlAuditSink::new(&path);
        let started = std::time::Instant::now();
        let err = sink.record(&AuditEvent::new("Stop", json!({}))).unwrap_err();
        assert!(matches!(err, AuditError::Io { .. }));
        assert!(started.elapsed() < Duration::from_secs(2));

        holder.unlock().unwrap();
        sink.record(&AuditEvent::new("Stop", json!({}))).unwrap();
        assert_eq!(read_lines(&path).len(), 1);
    }

    #[test]
    fn test_best_effort_swallows_failure() {
        let event = AuditEvent::new("PreToolUse", json!({}));
        assert!(!record_best_effort(&BrokenSink, &event));
        assert!(record_best_effort(&NullAuditSink, &event));
    }

    #[test]
    fn test_memory_sink() {
        let sink = MemoryAuditSink::new();
        assert!(sink.is_empty());
        record_best_effort(&sink, &AuditEvent::new("SessionStart", json!({"source": "startup"})));
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.events()[0].kind, "SessionStart");
    }

    #[test]
    fn test_event_round_trip() {
        let event = AuditEvent::new("UserPromptSubmit", json!({"prompt_length": 12}));
        let text = serde_json::to_string(&event).unwrap();
        assert!(text.starts_with(r#"{"ts":"#));
        let back: AuditEvent = serde_json::from_str(&text).unwrap();
        assert_eq!(back, event);
    }
}
