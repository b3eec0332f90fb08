//! Dataset Cache Module
//! Keeps loaded tables per path pair and reloads them when a file changes on disk.

use crate::data::loader::{BikeData, DataLoader, DataPaths, Fingerprint, LoaderError};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Loaded tables together with the file state they were read from.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub data: Arc<BikeData>,
    pub fingerprint: Fingerprint,
}

impl Snapshot {
    /// Read both files, recording their modification times first so a write
    /// racing the read shows up as stale on the next lookup.
    pub fn load(paths: &DataPaths) -> Result<Self, LoaderError> {
        let fingerprint = Fingerprint::of(paths)?;
        let data = DataLoader::load(paths)?;
        Ok(Self {
            data: Arc::new(data),
            fingerprint,
        })
    }
}

/// In-memory cache of loaded datasets keyed by their input paths.
///
/// An entry is served only while both files keep the modification time they
/// had when it was loaded.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<DataPaths, Snapshot>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached tables if the files are unchanged since loading.
    pub fn get_fresh(&self, paths: &DataPaths) -> Option<Arc<BikeData>> {
        let snapshot = self.entries.get(paths)?;
        match Fingerprint::of(paths) {
            Ok(current) if current == snapshot.fingerprint => Some(Arc::clone(&snapshot.data)),
            Ok(_) => {
                debug!(hour = %paths.hour_path.display(), "Cached data is stale");
                None
            }
            Err(e) => {
                debug!("Cannot stat input files: {}", e);
                None
            }
        }
    }

    /// Return the cached tables, loading them first on a miss or a stale entry.
    pub fn get_or_load(&mut self, paths: &DataPaths) -> Result<Arc<BikeData>, LoaderError> {
        if let Some(data) = self.get_fresh(paths) {
            debug!("Dataset cache hit");
            return Ok(data);
        }

        let snapshot = Snapshot::load(paths)?;
        let data = Arc::clone(&snapshot.data);
        self.store(paths.clone(), snapshot);
        Ok(data)
    }

    /// Store a snapshot loaded elsewhere (e.g. on a background thread).
    pub fn store(&mut self, paths: DataPaths, snapshot: Snapshot) {
        info!(
            hour = %paths.hour_path.display(),
            day = %paths.day_path.display(),
            "Caching dataset"
        );
        self.entries.insert(paths, snapshot);
    }

    /// Drop the entry for a path pair, forcing the next lookup to reload.
    pub fn invalidate(&mut self, paths: &DataPaths) {
        if self.entries.remove(paths).is_some() {
            info!(hour = %paths.hour_path.display(), "Dataset cache entry invalidated");
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    const HOUR_CSV: &str = "dteday,hr,cnt,season\n2011-01-01,0,16,1\n2011-01-01,1,40,1\n";
    const DAY_CSV: &str = "dteday,temp,cnt,season\n2011-01-01,0.344167,985,1\n";

    fn write_fixture(dir: &TempDir) -> DataPaths {
        let paths = DataPaths::new(dir.path().join("hour.csv"), dir.path().join("day.csv"));
        fs::write(&paths.hour_path, HOUR_CSV).unwrap();
        fs::write(&paths.day_path, DAY_CSV).unwrap();
        paths
    }

    fn bump_mtime(path: &std::path::Path) {
        let later = SystemTime::now() + Duration::from_secs(60);
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(later)
            .unwrap();
    }

    #[test]
    fn test_second_lookup_is_a_hit() {
        let dir = TempDir::new().unwrap();
        let paths = write_fixture(&dir);
        let mut cache = DatasetCache::new();

        let first = cache.get_or_load(&paths).unwrap();
        let second = cache.get_or_load(&paths).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_modified_file_forces_reload() {
        let dir = TempDir::new().unwrap();
        let paths = write_fixture(&dir);
        let mut cache = DatasetCache::new();

        let first = cache.get_or_load(&paths).unwrap();
        fs::write(
            &paths.day_path,
            "dteday,temp,cnt,season\n2011-01-01,0.344167,985,1\n2011-01-02,0.363478,801,1\n",
        )
        .unwrap();
        bump_mtime(&paths.day_path);

        assert!(cache.get_fresh(&paths).is_none());
        let second = cache.get_or_load(&paths).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.day.height(), 2);
    }

    #[test]
    fn test_invalidate_drops_entry() {
        let dir = TempDir::new().unwrap();
        let paths = write_fixture(&dir);
        let mut cache = DatasetCache::new();

        cache.get_or_load(&paths).unwrap();
        cache.invalidate(&paths);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_load_failure_is_not_cached() {
        let dir = TempDir::new().unwrap();
        let paths = DataPaths::new(dir.path().join("missing.csv"), dir.path().join("day.csv"));
        let mut cache = DatasetCache::new();

        assert!(cache.get_or_load(&paths).is_err());
        assert!(cache.is_empty());
    }
}
