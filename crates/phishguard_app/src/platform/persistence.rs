use std::fs;
use std::path::PathBuf;

use guard_logging::{guard_error, guard_info, guard_warn};
use phishguard_engine::AtomicFileWriter;
use phishguard_report::ScanHistoryItem;

const SNAPSHOT_FILENAME: &str = "scan_history.json";

/// Durable store for the bounded scan history: one named JSON snapshot,
/// read once at startup, overwritten on every successful scan, erased on
/// explicit clear.
pub(crate) struct HistoryStore {
    data_dir: PathBuf,
}

impl HistoryStore {
    pub(crate) fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub(crate) fn at_default_location() -> Self {
        Self::new(resolve_data_dir())
    }

    fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(SNAPSHOT_FILENAME)
    }

    /// Loads the persisted snapshot. A missing file is a normal first run;
    /// an unreadable or corrupt one degrades to an empty history with a
    /// warning. Never fails the caller.
    pub(crate) fn load(&self) -> Vec<ScanHistoryItem> {
        let path = self.snapshot_path();
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Vec::new();
            }
            Err(err) => {
                guard_warn!("Failed to read history snapshot from {:?}: {}", path, err);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<ScanHistoryItem>>(&content) {
            Ok(items) => {
                guard_info!("Loaded {} history entries from {:?}", items.len(), path);
                items
            }
            Err(err) => {
                guard_warn!("Failed to parse history snapshot from {:?}: {}", path, err);
                Vec::new()
            }
        }
    }

    /// Writes the snapshot atomically; last write wins.
    pub(crate) fn save(&self, items: &[ScanHistoryItem]) {
        let content = match serde_json::to_string_pretty(items) {
            Ok(text) => text,
            Err(err) => {
                guard_error!("Failed to serialize history snapshot: {}", err);
                return;
            }
        };

        let writer = AtomicFileWriter::new(self.data_dir.clone());
        if let Err(err) = writer.write(SNAPSHOT_FILENAME, &content) {
            guard_error!(
                "Failed to write history snapshot to {:?}: {}",
                self.data_dir,
                err
            );
        }
    }

    /// Erases the persisted snapshot.
    pub(crate) fn clear(&self) {
        let path = self.snapshot_path();
        match fs::remove_file(&path) {
            Ok(()) => guard_info!("Erased history snapshot at {:?}", path),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => guard_warn!("Failed to erase history snapshot at {:?}: {}", path, err),
        }
    }
}

fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PHISHGUARD_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::data_local_dir()
        .map(|dir| dir.join("phishguard"))
        .unwrap_or_else(|| PathBuf::from("."))
}
