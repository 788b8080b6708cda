use crate::diagnostics::{Diag, Emitter};
use contrail_data_structures::sync::RwLock;
use std::sync::Arc;

/// An in-memory diagnostics emitter.
///
/// Diagnostics are pushed to a shared buffer as-is, after the context has applied its limits.
///
/// # Warning
///
/// Do **NOT** hold a read lock on the buffer while checking, as this will prevent the checker
/// from pushing diagnostics.
pub struct InMemoryEmitter {
    buffer: Arc<RwLock<Vec<Diag>>>,
}

impl InMemoryEmitter {
    /// Creates a new emitter, returning the emitter itself and the buffer.
    pub fn new() -> (Self, Arc<RwLock<Vec<Diag>>>) {
        let buffer = Default::default();
        (Self { buffer: Arc::clone(&buffer) }, buffer)
    }
}

impl Emitter for InMemoryEmitter {
    fn emit_diagnostic(&mut self, diagnostic: &Diag) {
        self.buffer.write().push(diagnostic.clone());
    }
}
