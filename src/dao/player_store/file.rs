//! JSON file backed player store with atomic replace semantics.
//!
//! Every write lands in a uniquely named temporary file next to the canonical document,
//! is synced, then renamed over it, so readers only ever observe complete snapshots.
//! Writers inside this process are serialized by [`WRITE_LOCK`]; writers in other
//! processes only get the rename guarantee, so a read-modify-write racing with another
//! process can lose that process's update (last writer wins).

use std::{
    fs::{self, File},
    io::{self, ErrorKind, Write},
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::dao::{
    models::{PlayerEntity, PlayerMap},
    player_store::PlayerStore,
    storage::{StorageError, StorageResult},
};

/// Process-wide lock shared by every store instance.
static WRITE_LOCK: Mutex<()> = Mutex::new(());

fn write_lock() -> MutexGuard<'static, ()> {
    WRITE_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Player registry persisted as a single pretty-printed JSON object.
#[derive(Debug, Clone)]
pub struct JsonFilePlayerStore {
    path: PathBuf,
}

impl JsonFilePlayerStore {
    /// Store backed by the document at `path`; nothing is touched until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Canonical document location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "players".into());
        self.directory()
            .join(format!(".{file_name}.{}.tmp", Uuid::new_v4().simple()))
    }

    fn read(&self) -> PlayerMap {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "player registry not found; starting empty");
                return PlayerMap::new();
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to read player registry");
                return PlayerMap::new();
            }
        };

        let entries = match serde_json::from_str::<IndexMap<String, Value>>(&contents) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "player registry is not a JSON object; treating as empty"
                );
                return PlayerMap::new();
            }
        };

        entries
            .into_iter()
            .filter_map(|(name, value)| match serde_json::from_value::<PlayerEntity>(value) {
                Ok(player) if player.is_consistent() => Some((name, player)),
                Ok(_) => {
                    warn!(player = %name, "skipping record with more correct answers than answered");
                    None
                }
                Err(err) => {
                    warn!(player = %name, error = %err, "skipping malformed player record");
                    None
                }
            })
            .collect()
    }

    /// Write a full snapshot. Callers must hold [`WRITE_LOCK`].
    fn write(&self, _guard: &MutexGuard<'_, ()>, players: &PlayerMap) -> StorageResult<()> {
        let body = serde_json::to_vec_pretty(players).map_err(StorageError::Encode)?;
        let temp = self.temp_path();

        if let Err(source) = write_synced(&temp, &body) {
            discard(&temp);
            return Err(StorageError::Write { path: temp, source });
        }

        if let Err(source) = fs::rename(&temp, &self.path) {
            discard(&temp);
            return Err(StorageError::Replace {
                path: self.path.clone(),
                source,
            });
        }

        if let Err(err) = sync_directory(self.directory()) {
            warn!(
                path = %self.path.display(),
                error = %err,
                "registry replaced but directory entry not synced"
            );
        }

        debug!(path = %self.path.display(), players = players.len(), "saved player registry");
        Ok(())
    }

    fn unavailable(&self, source: io::Error) -> StorageError {
        StorageError::Unavailable {
            path: self.path.clone(),
            source,
        }
    }
}

/// Persist the rename itself by syncing the containing directory.
#[cfg(unix)]
fn sync_directory(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_directory(_dir: &Path) -> io::Result<()> {
    Ok(())
}

/// Closest ancestor of `dir` that already exists; writes create everything below it.
fn existing_ancestor(dir: &Path) -> Option<&Path> {
    dir.ancestors()
        .find(|candidate| candidate.as_os_str().is_empty() || candidate.exists())
        .map(|candidate| {
            if candidate.as_os_str().is_empty() {
                Path::new(".")
            } else {
                candidate
            }
        })
}

fn write_synced(path: &Path, body: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(body)?;
    file.sync_all()
}

fn discard(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to remove orphaned snapshot")
        }
    }
}

impl PlayerStore for JsonFilePlayerStore {
    fn load_all(&self) -> PlayerMap {
        self.read()
    }

    fn save_all(&self, players: &PlayerMap) -> StorageResult<()> {
        let guard = write_lock();
        self.write(&guard, players)
    }

    fn upsert(&self, name: &str, player: PlayerEntity) -> StorageResult<PlayerMap> {
        let guard = write_lock();
        let mut players = self.read();
        players.insert(name.to_string(), player);
        self.write(&guard, &players)?;
        Ok(players)
    }

    fn update(
        &self,
        name: &str,
        change: &mut dyn FnMut(&mut PlayerEntity),
    ) -> StorageResult<Option<PlayerEntity>> {
        let guard = write_lock();
        let mut players = self.read();
        let Some(player) = players.get_mut(name) else {
            return Ok(None);
        };
        change(player);
        let updated = player.clone();
        self.write(&guard, &players)?;
        Ok(Some(updated))
    }

    fn register(&self, name: &str, player: PlayerEntity) -> StorageResult<(PlayerEntity, bool)> {
        let guard = write_lock();
        let mut players = self.read();
        if let Some(existing) = players.get(name) {
            return Ok((existing.clone(), false));
        }
        players.insert(name.to_string(), player.clone());
        self.write(&guard, &players)?;
        Ok((player, true))
    }

    fn health_check(&self) -> StorageResult<()> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str::<IndexMap<String, Value>>(&contents)
                .map(drop)
                .map_err(|source| StorageError::Corrupt {
                    path: self.path.clone(),
                    source,
                }),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                let Some(ancestor) = existing_ancestor(self.directory()) else {
                    return Err(self.unavailable(err));
                };
                let metadata = fs::metadata(ancestor).map_err(|err| self.unavailable(err))?;
                if metadata.is_dir() {
                    Ok(())
                } else {
                    Err(self.unavailable(io::Error::other(format!(
                        "`{}` is not a directory",
                        ancestor.display()
                    ))))
                }
            }
            Err(err) => Err(self.unavailable(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use tempfile::TempDir;

    use super::*;

    fn player(score: u64, answered: u64, correct: u64) -> PlayerEntity {
        PlayerEntity {
            score,
            questions_answered: answered,
            correct_answers: correct,
            join_time: "2026-10-17T09:00:00Z".into(),
        }
    }

    fn store_in(dir: &TempDir) -> JsonFilePlayerStore {
        JsonFilePlayerStore::new(dir.path().join("shared_players.json"))
    }

    fn leftover_temp_files(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "tmp"))
            .collect()
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut players = PlayerMap::new();
        players.insert("Ada".into(), player(120, 10, 8));
        players.insert("ada".into(), player(0, 0, 0));
        players.insert("Zoë".into(), player(45, 5, 3));

        store.save_all(&players).unwrap();
        let loaded = store.load_all();

        assert_eq!(loaded, players);
        assert_eq!(
            loaded.keys().collect::<Vec<_>>(),
            vec!["Ada", "ada", "Zoë"],
            "join order is preserved"
        );
        assert!(leftover_temp_files(dir.path()).is_empty());
    }

    #[test]
    fn reset_empties_the_registry() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.upsert("Ada", player(10, 1, 1)).unwrap();

        store.reset_all().unwrap();

        assert!(store.load_all().is_empty());
        assert_eq!(fs::read_to_string(store.path()).unwrap().trim(), "{}");
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir).load_all().is_empty());
    }

    #[test]
    fn corrupt_or_non_object_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        fs::write(store.path(), "{ not json").unwrap();
        assert!(store.load_all().is_empty());

        fs::write(store.path(), "[1, 2, 3]").unwrap();
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn malformed_records_are_dropped_at_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            r#"{
                "good": {"score": 5, "questions_answered": 1, "correct_answers": 1, "join_time": "2026-10-17T09:00:00Z"},
                "negative": {"score": -5, "questions_answered": 1, "correct_answers": 0, "join_time": "t"},
                "missing": {"score": 5},
                "inconsistent": {"score": 5, "questions_answered": 1, "correct_answers": 3, "join_time": "t"}
            }"#,
        )
        .unwrap();

        let loaded = store.load_all();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get("good"), Some(&player(5, 1, 1)));
    }

    #[test]
    fn upsert_overwrites_in_place() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.upsert("Ada", player(10, 1, 1)).unwrap();
        store.upsert("Grace", player(0, 0, 0)).unwrap();

        let players = store.upsert("Ada", player(25, 2, 2)).unwrap();

        assert_eq!(players.get("Ada"), Some(&player(25, 2, 2)));
        assert_eq!(players.get_index_of("Ada"), Some(0));
        assert_eq!(store.load_all(), players);
    }

    #[test]
    fn register_keeps_existing_record() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let (created, is_new) = store.register("Ada", player(0, 0, 0)).unwrap();
        assert!(is_new);
        assert_eq!(created, player(0, 0, 0));

        store.update("Ada", &mut |p| p.record_answer(true, 12)).unwrap();
        let (existing, is_new) = store.register("Ada", player(0, 0, 0)).unwrap();
        assert!(!is_new);
        assert_eq!(existing.score, 12);
    }

    #[test]
    fn update_of_unknown_player_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let result = store.update("ghost", &mut |p| p.score += 1).unwrap();

        assert_eq!(result, None);
        assert!(!store.path().exists());
    }

    #[test]
    fn concurrent_upserts_from_two_instances_both_persist() {
        let dir = TempDir::new().unwrap();
        let first = Arc::new(store_in(&dir));
        let second = Arc::new(store_in(&dir));

        let handles: Vec<_> = [(first, "left"), (second, "right")]
            .into_iter()
            .map(|(store, prefix)| {
                thread::spawn(move || {
                    for i in 0..20u64 {
                        store.upsert(&format!("{prefix}-{i}"), player(i, i, i)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let players = store_in(&dir).load_all();
        assert_eq!(players.len(), 40);
        assert_eq!(players.get("left-7"), Some(&player(7, 7, 7)));
        assert_eq!(players.get("right-19"), Some(&player(19, 19, 19)));
        assert!(leftover_temp_files(dir.path()).is_empty());
    }

    #[test]
    fn failed_replace_cleans_up_temp_file() {
        let dir = TempDir::new().unwrap();
        let canonical = dir.path().join("shared_players.json");
        fs::create_dir(&canonical).unwrap();
        fs::write(canonical.join("keep"), "occupied").unwrap();
        let store = JsonFilePlayerStore::new(&canonical);

        let err = store.save_all(&PlayerMap::new()).unwrap_err();

        assert!(matches!(err, StorageError::Replace { .. }), "{err:?}");
        assert!(leftover_temp_files(dir.path()).is_empty());
        assert!(canonical.join("keep").exists());
    }

    #[test]
    fn failed_write_keeps_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "file").unwrap();
        let store = JsonFilePlayerStore::new(blocker.join("players.json"));

        let err = store.save_all(&PlayerMap::new()).unwrap_err();

        assert!(matches!(err, StorageError::Write { .. }), "{err:?}");
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "file");
    }

    #[test]
    fn health_check_accepts_absent_file_and_valid_document() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.health_check().is_ok());

        store.upsert("Ada", player(10, 1, 1)).unwrap();
        assert!(store.health_check().is_ok());
    }

    #[test]
    fn health_check_rejects_corrupt_document() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{ not json").unwrap();

        assert!(matches!(
            store.health_check(),
            Err(StorageError::Corrupt { .. })
        ));
    }

    #[test]
    fn nested_location_is_healthy_before_first_write() {
        let dir = TempDir::new().unwrap();
        let store = JsonFilePlayerStore::new(dir.path().join("data/nested/players.json"));
        assert!(store.health_check().is_ok());

        store.upsert("Ada", player(10, 1, 1)).unwrap();
        assert!(store.health_check().is_ok());
        assert_eq!(store.load_all().get("Ada"), Some(&player(10, 1, 1)));
        assert!(leftover_temp_files(&dir.path().join("data/nested")).is_empty());
    }

    #[test]
    fn health_check_rejects_location_under_a_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "file").unwrap();
        let store = JsonFilePlayerStore::new(blocker.join("data/players.json"));

        assert!(matches!(
            store.health_check(),
            Err(StorageError::Unavailable { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn directory_sync_succeeds_for_store_directory() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save_all(&PlayerMap::new()).unwrap();
        assert!(sync_directory(store.directory()).is_ok());
    }
}
