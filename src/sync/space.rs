//! In-process shared property space
//!
//! Stands in for the host's space-property bus: every [`SpaceClient`] sees the
//! same key-value map, and every write is announced to all connected clients
//! as a [`SpaceEvent`] over a crossbeam channel. Whether the writer receives
//! its own notification is configurable, since real hosts do not guarantee
//! it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;
use tracing::debug;

use super::error::{SyncError, SyncResult};
use super::store::{PropertyScope, PropertyStore, SpaceEvent};

#[derive(Debug)]
struct SpaceInner {
    properties: Mutex<HashMap<(PropertyScope, String), String>>,
    subscribers: Mutex<Vec<(u64, Sender<SpaceEvent>)>>,
    echo_to_writer: AtomicBool,
    next_client: AtomicU64,
}

impl SpaceInner {
    fn write(&self, writer: Option<u64>, scope: PropertyScope, key: &str, value: &str) {
        self.properties
            .lock()
            .insert((scope, key.to_string()), value.to_string());

        let echo = self.echo_to_writer.load(Ordering::Relaxed);
        let event = SpaceEvent {
            changed: vec![key.to_string()],
        };

        // Receivers dropped with their client are pruned here.
        self.subscribers.lock().retain(|(id, tx)| {
            if !echo && Some(*id) == writer {
                return true;
            }
            tx.send(event.clone()).is_ok()
        });
        debug!("[SPACE] {:?} '{}' written", scope, key);
    }
}

/// Owner handle of the space; dropping every clone disconnects all clients.
#[derive(Debug, Clone)]
pub struct SharedSpace {
    inner: Arc<SpaceInner>,
}

impl Default for SharedSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedSpace {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SpaceInner {
                properties: Mutex::new(HashMap::new()),
                subscribers: Mutex::new(Vec::new()),
                echo_to_writer: AtomicBool::new(true),
                next_client: AtomicU64::new(0),
            }),
        }
    }

    /// Whether a client is notified of its own writes.
    pub fn echo_to_writer(self, echo: bool) -> Self {
        self.inner.echo_to_writer.store(echo, Ordering::Relaxed);
        self
    }

    /// Join the space as a new participant, not yet signed in.
    pub fn connect(&self) -> SpaceClient {
        let id = self.inner.next_client.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = crossbeam_channel::unbounded();
        self.inner.subscribers.lock().push((id, tx));
        SpaceClient {
            id,
            space: Arc::downgrade(&self.inner),
            events: rx,
            user: Mutex::new(None),
        }
    }

    /// Join the space as an already signed-in participant.
    pub fn connect_as(&self, user: impl Into<String>) -> SpaceClient {
        let client = self.connect();
        client.sign_in(user);
        client
    }

    /// Privileged write; notifies every client.
    pub fn set_protected(&self, key: &str, value: &str) {
        self.inner.write(None, PropertyScope::Protected, key, value);
    }

    /// Write from outside any client, e.g. a moderator tool.
    pub fn set_public(&self, key: &str, value: &str) {
        self.inner.write(None, PropertyScope::Public, key, value);
    }

    pub fn get(&self, scope: PropertyScope, key: &str) -> Option<String> {
        self.inner
            .properties
            .lock()
            .get(&(scope, key.to_string()))
            .cloned()
    }
}

/// One participant's connection to a [`SharedSpace`]
#[derive(Debug)]
pub struct SpaceClient {
    id: u64,
    space: Weak<SpaceInner>,
    events: Receiver<SpaceEvent>,
    user: Mutex<Option<String>>,
}

impl SpaceClient {
    pub fn sign_in(&self, user: impl Into<String>) {
        *self.user.lock() = Some(user.into());
    }

    pub fn sign_out(&self) {
        *self.user.lock() = None;
    }

    /// Notifications received since the last call, oldest first.
    pub fn drain_events(&self) -> Vec<SpaceEvent> {
        self.events.try_iter().collect()
    }
}

impl PropertyStore for SpaceClient {
    fn is_connected(&self) -> bool {
        self.space.strong_count() > 0
    }

    fn local_user(&self) -> Option<String> {
        self.user.lock().clone()
    }

    fn get(&self, scope: PropertyScope, key: &str) -> Option<String> {
        let space = self.space.upgrade()?;
        let value = space.properties.lock().get(&(scope, key.to_string())).cloned();
        value
    }

    fn set_public(&self, key: &str, value: &str) -> SyncResult<()> {
        let space = self.space.upgrade().ok_or(SyncError::HostUnavailable)?;
        space.write(Some(self.id), PropertyScope::Public, key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_visible_to_all_clients() {
        let space = SharedSpace::new();
        let alice = space.connect();
        let bob = space.connect();

        alice.set_public("k", "v").unwrap();

        assert_eq!(bob.get(PropertyScope::Public, "k").as_deref(), Some("v"));
        assert_eq!(bob.get(PropertyScope::Protected, "k"), None);
        assert_eq!(bob.drain_events(), vec![SpaceEvent { changed: vec!["k".into()] }]);
        assert_eq!(alice.drain_events().len(), 1);
    }

    #[test]
    fn test_echo_can_be_suppressed() {
        let space = SharedSpace::new().echo_to_writer(false);
        let alice = space.connect();
        let bob = space.connect();

        alice.set_public("k", "v").unwrap();

        assert!(alice.drain_events().is_empty());
        assert_eq!(bob.drain_events().len(), 1);
    }

    #[test]
    fn test_identity_starts_unknown() {
        let space = SharedSpace::new();
        let client = space.connect();
        assert_eq!(client.local_user(), None);
        client.sign_in("alice");
        assert_eq!(client.local_user().as_deref(), Some("alice"));
        client.sign_out();
        assert_eq!(client.local_user(), None);
        assert_eq!(space.connect_as("bob").local_user().as_deref(), Some("bob"));
    }

    #[test]
    fn test_dropped_space_disconnects_clients() {
        let space = SharedSpace::new();
        let client = space.connect();
        assert!(client.is_connected());

        drop(space);

        assert!(!client.is_connected());
        assert!(matches!(
            client.set_public("k", "v"),
            Err(SyncError::HostUnavailable)
        ));
        assert_eq!(client.get(PropertyScope::Public, "k"), None);
    }

    #[test]
    fn test_dropped_clients_are_pruned() {
        let space = SharedSpace::new();
        let gone = space.connect();
        let stays = space.connect();
        drop(gone);

        space.set_public("k", "v");

        assert_eq!(space.inner.subscribers.lock().len(), 1);
        assert_eq!(stays.drain_events().len(), 1);
    }
}
