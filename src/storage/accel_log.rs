use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use tracing::debug;

use crate::analysis::Event;
use crate::error::LogError;

const HEADER: [&str; 3] = ["position", "voltage", "category"];

/// Append-only CSV record of detected acceleration points.
///
/// The log is an audit trail, not idempotent state: re-running analysis on
/// unchanged input appends the same rows again. Writes are serialized so
/// concurrent requests cannot interleave records.
pub struct AccelerationLog {
    path: PathBuf,
    write_guard: Mutex<()>,
}

impl AccelerationLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append the given events, writing the header first if the file is new.
    pub async fn append(&self, events: &[Event]) -> Result<(), LogError> {
        if events.is_empty() {
            return Ok(());
        }

        let _guard = self.write_guard.lock().await;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if needs_header {
            writer.write_record(HEADER)?;
        }
        for event in events {
            writer.write_record(&[
                event.index.to_string(),
                event.voltage.to_string(),
                event.kind.as_str().to_string(),
            ])?;
        }
        writer.flush()?;

        debug!(count = events.len(), "appended acceleration events");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::EventKind;
    use tempfile::TempDir;

    fn events(values: &[(usize, f64)]) -> Vec<Event> {
        values
            .iter()
            .map(|&(index, voltage)| Event {
                index,
                timestamp: None,
                voltage,
                kind: EventKind::Acceleration,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_append_writes_header_once() {
        let dir = TempDir::new().unwrap();
        let log = AccelerationLog::new(dir.path().join("accel.csv"));
        let batch = events(&[(3, 12.5), (7, 11.0)]);

        log.append(&batch).await.unwrap();
        log.append(&batch).await.unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "position,voltage,category");
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "3,12.5,acceleration");
    }

    #[tokio::test]
    async fn test_append_grows_by_same_increment() {
        let dir = TempDir::new().unwrap();
        let log = AccelerationLog::new(dir.path().join("accel.csv"));
        let batch = events(&[(1, 9.0), (2, 8.0), (5, 3.0)]);

        log.append(&batch).await.unwrap();
        let first = std::fs::metadata(log.path()).unwrap().len();
        log.append(&batch).await.unwrap();
        let second = std::fs::metadata(log.path()).unwrap().len();
        log.append(&batch).await.unwrap();
        let third = std::fs::metadata(log.path()).unwrap().len();

        assert!(second > first);
        assert_eq!(second - first, third - second);
    }

    #[tokio::test]
    async fn test_append_empty_batch_is_noop() {
        let dir = TempDir::new().unwrap();
        let log = AccelerationLog::new(dir.path().join("accel.csv"));
        log.append(&[]).await.unwrap();
        assert!(!log.path().exists());
    }

    #[tokio::test]
    async fn test_append_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let log = AccelerationLog::new(dir.path().join("logs").join("accel.csv"));
        log.append(&events(&[(0, 1.0)])).await.unwrap();
        assert!(log.path().exists());
    }
}
