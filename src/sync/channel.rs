//! Per-instance sync channel over the property space
//!
//! Publishing is fire-and-forget: the local board has already applied its own
//! change, so a lost or late echo costs nothing. Reading always returns the
//! whole current record, which is what lets a missed notification heal on
//! the next one.

use tracing::{debug, info, warn};

use super::error::SyncResult;
use super::record::{instance_key, SharedState};
use super::store::{PropertyScope, PropertyStore, SpaceEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncChannel {
    key: String,
}

impl SyncChannel {
    pub fn new(instance: &str) -> Self {
        Self {
            key: instance_key(instance),
        }
    }

    /// Property key this channel reads and writes.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Store `state` under this instance's key. Failures are logged only.
    pub fn publish<P: PropertyStore + ?Sized>(&self, store: &P, state: &SharedState) {
        let json = match state.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!("[SYNC] Could not encode {:?}: {}", state, e);
                return;
            }
        };
        match store.set_public(&self.key, &json) {
            Ok(()) => info!("[SYNC] Published {} = {}", self.key, json),
            Err(e) => warn!("[SYNC] Publish to {} failed: {}", self.key, e),
        }
    }

    /// Whether `event` mentions this instance's key.
    pub fn is_relevant(&self, event: &SpaceEvent) -> bool {
        event.touches(&self.key)
    }

    /// Current public record, the one `publish` writes and notifications
    /// announce.
    pub fn read<P: PropertyStore + ?Sized>(&self, store: &P) -> SyncResult<Option<SharedState>> {
        self.decode(store.get(PropertyScope::Public, &self.key))
    }

    /// Startup record: the protected namespace wins over the public one.
    pub fn read_initial<P: PropertyStore + ?Sized>(&self, store: &P) -> SyncResult<Option<SharedState>> {
        let raw = store
            .get(PropertyScope::Protected, &self.key)
            .or_else(|| store.get(PropertyScope::Public, &self.key));
        self.decode(raw)
    }

    fn decode(&self, raw: Option<String>) -> SyncResult<Option<SharedState>> {
        match raw {
            Some(json) => {
                debug!("[SYNC] Read {} = {}", self.key, json);
                SharedState::from_json(&json).map(Some)
            }
            None => Ok(None),
        }
    }
}
