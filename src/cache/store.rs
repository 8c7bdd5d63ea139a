use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::ffi::OsString;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument, warn};

use crate::constants::CORRUPT_SUFFIX;

use super::error::{CacheError, CacheResult};
use super::types::{AffiliationRecord, CacheLookup, LoadOutcome};

/// Normalizes an entity name into its cache key.
#[inline]
pub fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Persistent map from lower-cased entity name to [`AffiliationRecord`].
///
/// The whole map is rewritten to disk on every mutation (temp file, fsync, rename), while the
/// write lock is held. The file on disk therefore always matches the map as of the last
/// completed `put` or `remove`. Reads take the shared lock and never touch the disk.
#[derive(Debug)]
pub struct AffiliationCache {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, AffiliationRecord>>,
}

impl AffiliationCache {
    /// Loads the snapshot at `path`, creating or recovering it as needed.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> CacheResult<(Self, LoadOutcome)> {
        let path = path.as_ref().to_path_buf();

        if path.is_dir() {
            return Err(CacheError::NotAFile { path });
        }

        let bytes = match fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(source) => return Err(CacheError::Io { path, source }),
        };

        let Some(bytes) = bytes else {
            let cache = Self::empty(path);
            cache.persist(&cache.entries.read())?;
            info!("No affiliation snapshot found, created an empty one");
            return Ok((cache, LoadOutcome::Created));
        };

        match serde_json::from_slice::<Map<String, Value>>(&bytes) {
            Ok(raw) => {
                let decoded = decode_entries(raw);
                let (count, skipped) = (decoded.entries.len(), decoded.skipped);
                info!(entries = count, skipped, "Loaded affiliation snapshot");

                let cache = Self {
                    path,
                    entries: RwLock::new(decoded.entries),
                };

                if decoded.rekeyed {
                    debug!("Snapshot keys were not normalized, rewriting");
                    cache.persist(&cache.entries.read())?;
                }

                Ok((
                    cache,
                    LoadOutcome::Loaded {
                        entries: count,
                        skipped,
                    },
                ))
            }
            Err(e) => {
                let backup = corrupt_backup_path(&path);
                warn!(
                    error = %e,
                    backup = %backup.display(),
                    "Affiliation snapshot is unreadable, starting empty"
                );
                fs::rename(&path, &backup).map_err(|source| CacheError::Io {
                    path: backup.clone(),
                    source,
                })?;

                let cache = Self::empty(path);
                cache.persist(&cache.entries.read())?;
                Ok((cache, LoadOutcome::Recovered { backup }))
            }
        }
    }

    fn empty(path: PathBuf) -> Self {
        Self {
            path,
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Returns the snapshot path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, name: &str) -> CacheLookup {
        let key = normalize_key(name);
        self.entries
            .read()
            .get(&key)
            .map(CacheLookup::from)
            .unwrap_or(CacheLookup::Miss)
    }

    /// Returns the raw stored record, if any.
    pub fn record(&self, name: &str) -> Option<AffiliationRecord> {
        self.entries.read().get(&normalize_key(name)).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(&normalize_key(name))
    }

    /// Stores `record` under `name` and persists the whole map before returning.
    ///
    /// The record is stored in its canonical form, so a reopened snapshot answers exactly
    /// as this instance does. If persisting fails the in-memory map is rolled back.
    pub fn put(&self, name: &str, record: AffiliationRecord) -> CacheResult<()> {
        let key = normalize_key(name);
        let record = record.canonical();
        let mut entries = self.entries.write();

        let previous = entries.insert(key.clone(), record);
        if let Err(e) = self.persist(&entries) {
            match previous {
                Some(old) => entries.insert(key, old),
                None => entries.remove(&key),
            };
            return Err(e);
        }

        debug!(key = %key, entries = entries.len(), "Stored affiliation record");
        Ok(())
    }

    /// Removes the record for `name`, persisting if anything was removed.
    pub fn remove(&self, name: &str) -> CacheResult<Option<AffiliationRecord>> {
        let key = normalize_key(name);
        let mut entries = self.entries.write();

        let Some(removed) = entries.remove(&key) else {
            return Ok(None);
        };

        if let Err(e) = self.persist(&entries) {
            entries.insert(key, removed);
            return Err(e);
        }

        debug!(key = %key, "Removed affiliation record");
        Ok(Some(removed))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Snapshot of all entries in key order.
    pub fn entries(&self) -> Vec<(String, AffiliationRecord)> {
        self.entries
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn persist(&self, entries: &BTreeMap<String, AffiliationRecord>) -> CacheResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        fs::create_dir_all(&dir).map_err(|source| CacheError::Io {
            path: dir.clone(),
            source,
        })?;

        let bytes = serde_json::to_vec_pretty(entries)?;

        let io_err = |source| CacheError::Io {
            path: self.path.clone(),
            source,
        };

        let mut temp = NamedTempFile::new_in(&dir).map_err(io_err)?;
        temp.write_all(&bytes).map_err(io_err)?;
        temp.as_file().sync_all().map_err(io_err)?;
        temp.persist(&self.path).map_err(|e| io_err(e.error))?;

        Ok(())
    }
}

struct Decoded {
    entries: BTreeMap<String, AffiliationRecord>,
    /// Malformed entries plus keys that collided after normalization.
    skipped: usize,
    /// At least one key on disk differs from its normalized form.
    rekeyed: bool,
}

/// Decodes raw snapshot entries. On a key collision the first entry in file order wins.
fn decode_entries(raw: Map<String, Value>) -> Decoded {
    let mut entries = BTreeMap::new();
    let mut skipped = 0;
    let mut rekeyed = false;

    for (name, value) in raw {
        let record = match serde_json::from_value::<AffiliationRecord>(value) {
            Ok(record) => record,
            Err(e) => {
                warn!(key = %name, error = %e, "Skipping malformed affiliation record");
                skipped += 1;
                continue;
            }
        };

        let key = normalize_key(&name);
        rekeyed |= key != name;

        match entries.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(slot) => {
                warn!(
                    key = %name,
                    normalized = %slot.key(),
                    "Skipping duplicate affiliation record"
                );
                skipped += 1;
            }
        }
    }

    Decoded {
        entries,
        skipped,
        rekeyed,
    }
}

fn corrupt_backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(CORRUPT_SUFFIX);
    PathBuf::from(name)
}
