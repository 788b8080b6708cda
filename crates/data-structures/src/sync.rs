//! Synchronization primitives.

pub use parking_lot::{
    Mutex as Lock, MutexGuard as LockGuard, RwLock, RwLockReadGuard as ReadGuard,
    RwLockWriteGuard as WriteGuard,
};
pub use std::sync::{Arc as Lrc, OnceLock};
