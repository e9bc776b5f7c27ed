use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared counter; bumping it invalidates every token captured earlier.
#[derive(Clone, Debug, Default)]
pub struct Generation(Arc<AtomicU64>);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    /// Start a new generation and return its number.
    pub fn bump(&self) -> u64 {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn token(&self) -> CancelToken {
        CancelToken {
            generation: Arc::clone(&self.0),
            captured: self.current(),
        }
    }
}

/// Snapshot of a [`Generation`]; cancelled once the generation moves on.
#[derive(Clone, Debug)]
pub struct CancelToken {
    generation: Arc<AtomicU64>,
    captured: u64,
}

impl CancelToken {
    /// A token nobody can cancel.
    pub fn never() -> Self {
        Generation::new().token()
    }

    pub fn is_cancelled(&self) -> bool {
        self.generation.load(Ordering::Acquire) != self.captured
    }
}
