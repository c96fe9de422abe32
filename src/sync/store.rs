//! Host property store abstraction
//!
//! The host exposes a flat key-value space shared by every participant, with
//! a change notification listing the keys that changed. Values live in one of
//! two namespaces; the protected one can only be written by privileged
//! participants and wins over the public one on read.

use super::error::SyncResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyScope {
    Protected,
    Public,
}

/// Host change notification
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpaceEvent {
    pub changed: Vec<String>,
}

impl SpaceEvent {
    pub fn touches(&self, key: &str) -> bool {
        self.changed.iter().any(|changed| changed == key)
    }
}

/// Key-value access to the host's shared space
pub trait PropertyStore {
    /// False once the host has gone away.
    fn is_connected(&self) -> bool;

    /// Identity of the local participant, `None` until the host knows it.
    fn local_user(&self) -> Option<String>;

    fn get(&self, scope: PropertyScope, key: &str) -> Option<String>;

    /// Write to the public namespace. Does not wait for other participants.
    fn set_public(&self, key: &str, value: &str) -> SyncResult<()>;
}
