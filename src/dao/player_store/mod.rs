mod cache;
mod file;

pub use self::cache::CachedPlayerStore;
pub use self::file::JsonFilePlayerStore;

use crate::dao::{
    models::{PlayerEntity, PlayerMap},
    storage::StorageResult,
};

/// Abstraction over the shared player registry.
///
/// Reads fail soft: a missing or unreadable backing document is an empty registry.
/// Writes replace the whole document and report failures as [`StorageError`].
///
/// [`StorageError`]: crate::dao::storage::StorageError
pub trait PlayerStore: Send + Sync {
    /// Load every player record.
    fn load_all(&self) -> PlayerMap;

    /// Replace the registry with `players`.
    fn save_all(&self, players: &PlayerMap) -> StorageResult<()>;

    /// Set or overwrite `name` and return the registry as written.
    fn upsert(&self, name: &str, player: PlayerEntity) -> StorageResult<PlayerMap>;

    /// Remove every player.
    fn reset_all(&self) -> StorageResult<()> {
        self.save_all(&PlayerMap::new())
    }

    /// Look up a single player.
    fn get(&self, name: &str) -> Option<PlayerEntity> {
        self.load_all().shift_remove(name)
    }

    /// Apply `change` to the latest stored copy of `name` and persist it.
    ///
    /// Returns `None` without writing when the player does not exist.
    fn update(
        &self,
        name: &str,
        change: &mut dyn FnMut(&mut PlayerEntity),
    ) -> StorageResult<Option<PlayerEntity>> {
        let Some(mut player) = self.get(name) else {
            return Ok(None);
        };
        change(&mut player);
        self.upsert(name, player.clone())?;
        Ok(Some(player))
    }

    /// Insert `player` unless `name` is already registered.
    ///
    /// Returns the stored record and whether it was created by this call.
    fn register(&self, name: &str, player: PlayerEntity) -> StorageResult<(PlayerEntity, bool)> {
        if let Some(existing) = self.get(name) {
            return Ok((existing, false));
        }
        self.upsert(name, player.clone())?;
        Ok((player, true))
    }

    /// Verify that the backing storage is reachable.
    fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }
}
