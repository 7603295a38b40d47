use std::{
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

use tracing::trace;

use crate::{
    dao::{
        models::{PlayerEntity, PlayerMap},
        player_store::PlayerStore,
        storage::StorageResult,
    },
    state::clock::Clock,
};

struct Snapshot {
    taken_at: Instant,
    players: PlayerMap,
}

/// Time-boxed memoization of [`PlayerStore::load_all`] for frequently polled views.
///
/// Writes always go through to the inner store and drop the cached snapshot, so this
/// process observes its own writes immediately. Writes from other processes become
/// visible once the snapshot is older than `ttl`.
pub struct CachedPlayerStore<S> {
    inner: S,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    snapshot: Mutex<Option<Snapshot>>,
}

impl<S: PlayerStore> CachedPlayerStore<S> {
    pub fn new(inner: S, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner,
            ttl,
            clock,
            snapshot: Mutex::new(None),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Forget the cached snapshot so the next read hits the inner store.
    pub fn invalidate(&self) {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    fn write_through<T>(&self, result: StorageResult<T>) -> StorageResult<T> {
        self.invalidate();
        result
    }
}

impl<S: PlayerStore> PlayerStore for CachedPlayerStore<S> {
    fn load_all(&self) -> PlayerMap {
        let now = self.clock.now();
        let mut snapshot = self.snapshot.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(cached) = snapshot.as_ref() {
            if now.saturating_duration_since(cached.taken_at) < self.ttl {
                trace!("serving player registry from cache");
                return cached.players.clone();
            }
        }

        let players = self.inner.load_all();
        *snapshot = Some(Snapshot {
            taken_at: now,
            players: players.clone(),
        });
        players
    }

    fn save_all(&self, players: &PlayerMap) -> StorageResult<()> {
        self.write_through(self.inner.save_all(players))
    }

    fn upsert(&self, name: &str, player: PlayerEntity) -> StorageResult<PlayerMap> {
        self.write_through(self.inner.upsert(name, player))
    }

    fn reset_all(&self) -> StorageResult<()> {
        self.write_through(self.inner.reset_all())
    }

    fn update(
        &self,
        name: &str,
        change: &mut dyn FnMut(&mut PlayerEntity),
    ) -> StorageResult<Option<PlayerEntity>> {
        self.write_through(self.inner.update(name, change))
    }

    fn register(&self, name: &str, player: PlayerEntity) -> StorageResult<(PlayerEntity, bool)> {
        self.write_through(self.inner.register(name, player))
    }

    fn health_check(&self) -> StorageResult<()> {
        self.inner.health_check()
    }
}
