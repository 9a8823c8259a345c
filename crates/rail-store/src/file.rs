use std::collections::BTreeMap;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::traits::{EntityStore, Record};

/// File-backed entity store.
///
/// The whole collection lives in memory and is mirrored to a single JSON
/// snapshot file. Every insert rewrites the snapshot into a temporary file in
/// the same directory and renames it over the old one, so a crash leaves
/// either the previous or the new snapshot on disk, never a torn one.
///
/// The write lock is held across the rename: two inserts can never persist
/// out of order.
pub struct FileEntityStore<T> {
    path: PathBuf,
    records: RwLock<BTreeMap<String, T>>,
}

impl<T: Record> FileEntityStore<T> {
    /// Open the snapshot at `path`, creating an empty collection if the file
    /// does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let records = if path.exists() {
            let file = fs::File::open(&path)?;
            let map: BTreeMap<String, T> = serde_json::from_reader(BufReader::new(file))
                .map_err(|e| StoreError::CorruptSnapshot {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
            debug!(path = %path.display(), records = map.len(), "loaded entity snapshot");
            map
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    /// Location of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, map: &BTreeMap<String, T>) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let tmp = tempfile::NamedTempFile::new_in(&dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer(&mut writer, map)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

impl<T: Record> EntityStore<T> for FileEntityStore<T> {
    fn get(&self, key: &str) -> StoreResult<Option<T>> {
        let map = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.get(key).cloned())
    }

    fn insert(&self, key: &str, record: &T) -> StoreResult<()> {
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        let mut map = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        let previous = map.insert(key.to_string(), record.clone());
        if let Err(e) = self.persist(&map) {
            warn!(path = %self.path.display(), error = %e, "snapshot write failed; rolling back");
            match previous {
                Some(old) => {
                    map.insert(key.to_string(), old);
                }
                None => {
                    map.remove(key);
                }
            }
            return Err(e);
        }
        Ok(())
    }

    fn values(&self) -> StoreResult<Vec<T>> {
        let map = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.values().cloned().collect())
    }

    fn len(&self) -> StoreResult<usize> {
        let map = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.len())
    }
}

impl<T> std::fmt::Debug for FileEntityStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.records.read().map(|m| m.len()).unwrap_or_default();
        f.debug_struct("FileEntityStore")
            .field("path", &self.path)
            .field("record_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rail_types::Train;

    fn train(id: &str, capacity: u32) -> Train {
        Train {
            id: id.into(),
            capacity,
            empty_seats: capacity,
            time: "10:00".into(),
            starting_point: "A".into(),
            stops: vec!["B".into()],
        }
    }

    #[test]
    fn open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store: FileEntityStore<Train> =
            FileEntityStore::open(dir.path().join("trains.json")).unwrap();
        assert!(store.is_empty().unwrap());
        assert!(!store.path().exists());
    }

    #[test]
    fn insert_writes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trains.json");
        let store = FileEntityStore::open(&path).unwrap();
        store.insert("t1", &train("t1", 4)).unwrap();
        assert!(path.exists());
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"t1\""));
    }

    #[test]
    fn reopen_restores_records_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trains.json");
        {
            let store = FileEntityStore::open(&path).unwrap();
            store.insert("id-000002", &train("id-000002", 2)).unwrap();
            store.insert("id-000001", &train("id-000001", 1)).unwrap();
            let mut updated = train("id-000002", 2);
            updated.empty_seats = 1;
            store.insert("id-000002", &updated).unwrap();
        }

        let reopened: FileEntityStore<Train> = FileEntityStore::open(&path).unwrap();
        let values = reopened.values().unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].id, "id-000001");
        assert_eq!(values[1].empty_seats, 1);
    }

    #[test]
    fn corrupt_snapshot_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trains.json");
        fs::write(&path, b"{not json").unwrap();
        let err = FileEntityStore::<Train>::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::CorruptSnapshot { .. }));
    }

    #[test]
    fn open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data").join("trains.json");
        let store = FileEntityStore::open(&path).unwrap();
        store.insert("t1", &train("t1", 1)).unwrap();
        assert!(path.exists());
    }
}
