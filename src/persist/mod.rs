//! Persistence gateway - mirrors the whitelisted store slices to durable storage
//!
//! Only `auth`, `favorites`, `water` and `workout` are written, together, as one
//! versioned JSON envelope under a single key. Nothing else in memory is durable.
//! In-memory state stays the source of truth: a failed save is reported but never
//! rolls anything back, and a failed or malformed load falls back to defaults.

mod memory;

pub use memory::MemoryStore;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::clock::Clock;
use crate::store::{AppStore, AuthState, FavoritesState, WaterState, WorkoutState};

/// Storage key holding the envelope
pub const ENVELOPE_KEY: &str = "persist:root";

/// Bump when the envelope layout changes; older envelopes are discarded
pub const ENVELOPE_VERSION: u32 = 1;

/// Durable key-value storage. Implementations own their own retry policy.
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;

    /// Force pending writes to durable media
    async fn flush(&self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage error: {0:#}")]
    Storage(anyhow::Error),
    #[error("malformed envelope: {0}")]
    Json(#[from] serde_json::Error),
    #[error("envelope version {found} does not match expected {expected}")]
    VersionMismatch { found: u64, expected: u32 },
    #[error("envelope lists favorite {id} more than once")]
    DuplicateFavorite { id: String },
}

/// Serialized bundle of the persisted slices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub version: u32,
    pub auth: AuthState,
    pub favorites: FavoritesState,
    pub water: WaterState,
    pub workout: WorkoutState,
}

impl Envelope {
    pub fn new(
        auth: AuthState,
        favorites: FavoritesState,
        water: WaterState,
        workout: WorkoutState,
    ) -> Self {
        Self {
            version: ENVELOPE_VERSION,
            auth,
            favorites,
            water,
            workout,
        }
    }

    fn from_json(json: &str) -> Result<Self, PersistError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let found = value.get("version").and_then(|v| v.as_u64()).unwrap_or(0);
        if found != u64::from(ENVELOPE_VERSION) {
            return Err(PersistError::VersionMismatch {
                found,
                expected: ENVELOPE_VERSION,
            });
        }
        let envelope: Envelope = serde_json::from_value(value)?;
        if let Some(id) = envelope.favorites.duplicate_id() {
            return Err(PersistError::DuplicateFavorite { id: id.to_string() });
        }
        Ok(envelope)
    }
}

/// How boot-time rehydration ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rehydration {
    /// Envelope found and applied
    Restored,
    /// Nothing stored yet
    Empty,
    /// Storage failed or envelope was unusable; defaults in place
    Fallback,
}

pub struct PersistenceGateway<S> {
    storage: S,
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Write the envelope. Errors are logged and returned; memory is untouched.
    pub async fn save(&self, envelope: &Envelope) -> Result<(), PersistError> {
        let json = serde_json::to_string(envelope)?;
        if let Err(e) = self.storage.set(ENVELOPE_KEY, &json).await {
            error!("Failed to persist state: {:#}", e);
            return Err(PersistError::Storage(e));
        }
        Ok(())
    }

    /// Read the envelope. A partially valid envelope is rejected as a whole.
    pub async fn load(&self) -> Result<Option<Envelope>, PersistError> {
        let json = self
            .storage
            .get(ENVELOPE_KEY)
            .await
            .map_err(PersistError::Storage)?;
        json.map(|j| Envelope::from_json(&j)).transpose()
    }

    /// Boot-time load into `store`. Never fails: anything unusable leaves defaults.
    pub async fn rehydrate<C: Clock>(&self, store: &mut AppStore<C>) -> Rehydration {
        match self.load().await {
            Ok(Some(envelope)) => {
                store.restore(envelope);
                Rehydration::Restored
            }
            Ok(None) => Rehydration::Empty,
            Err(e) => {
                warn!("Discarding persisted state: {}", e);
                store.clear_all_data();
                Rehydration::Fallback
            }
        }
    }

    /// Snapshot the store and save it
    pub async fn persist<C: Clock>(&self, store: &AppStore<C>) -> Result<(), PersistError> {
        self.save(&store.snapshot()).await
    }

    /// Wipe the stored envelope and flush, so the next load sees nothing
    pub async fn purge_and_flush(&self) -> Result<(), PersistError> {
        self.storage
            .remove(ENVELOPE_KEY)
            .await
            .map_err(PersistError::Storage)?;
        self.storage.flush().await.map_err(PersistError::Storage)?;
        info!("Persisted state purged");
        Ok(())
    }
}
