//! Game-state sync over the host's shared property space
//!
//! - `record` - `{ "fen": ... }` wire format and the reset sentinel
//! - `store` - the host key-value bus as a trait
//! - `space` - in-process implementation of that bus
//! - `channel` - per-instance publish/read on top of a store

pub mod channel;
pub mod error;
pub mod record;
pub mod space;
pub mod store;

pub use channel::SyncChannel;
pub use error::{SyncError, SyncResult};
pub use record::{instance_key, GameRecord, SharedState, RESET_SENTINEL};
pub use space::{SharedSpace, SpaceClient};
pub use store::{PropertyScope, PropertyStore, SpaceEvent};
