//! JSONL file writer for accepted log records.
//!
//! Each [`LogRecord`] is serialized as a single JSON line with an added
//! `archived_at` timestamp, appended to the file via a buffered writer.

use feed_application::RecordArchive;
use feed_domain::LogRecord;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL record archive that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Appends to an existing file and
/// flushes on `Drop`.
pub struct JsonlRecordArchive {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlRecordArchive {
    /// Open (or create) the archive at the given path.
    ///
    /// Creates parent directories if needed. Returns `None` if the file
    /// cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create archive directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open record archive {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the archive file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordArchive for JsonlRecordArchive {
    fn append(&self, record: &LogRecord) {
        let archived_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut value = match serde_json::to_value(record) {
            Ok(value) => value,
            Err(e) => {
                warn!("Could not serialize record {}: {}", record.timestamp, e);
                return;
            }
        };
        if let serde_json::Value::Object(map) = &mut value {
            map.insert(
                "archived_at".to_string(),
                serde_json::Value::String(archived_at),
            );
        }

        if let Ok(mut writer) = self.writer.lock() {
            if let Err(e) = writeln!(writer, "{}", value) {
                warn!("Could not write to record archive: {}", e);
                return;
            }
            // Append-only; flush each line so a crash loses nothing.
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlRecordArchive {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
