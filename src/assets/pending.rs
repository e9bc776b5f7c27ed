use std::sync::mpsc::{self, Receiver, TryRecvError};

use crate::foundation::error::IntroResult;

enum PendingState<T> {
    Loading(Receiver<IntroResult<T>>),
    Ready(T),
    Failed,
}

/// A value produced on a background thread and picked up without blocking.
///
/// Failures are logged once and the asset stays absent afterwards.
pub struct PendingAsset<T> {
    label: String,
    state: PendingState<T>,
}

impl<T: Send + 'static> PendingAsset<T> {
    pub fn spawn<F>(label: impl Into<String>, load: F) -> Self
    where
        F: FnOnce() -> IntroResult<T> + Send + 'static,
    {
        let label = label.into();
        let (tx, rx) = mpsc::channel();
        let spawned = std::thread::Builder::new()
            .name(format!("courtintro-load-{label}"))
            .spawn(move || {
                // The receiver may already be gone if the session was dropped.
                let _ = tx.send(load());
            });

        let state = match spawned {
            Ok(_) => PendingState::Loading(rx),
            Err(e) => {
                tracing::warn!(asset = %label, error = %e, "could not start asset loader");
                PendingState::Failed
            }
        };
        Self { label, state }
    }
}

impl<T> PendingAsset<T> {
    pub fn ready(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            state: PendingState::Ready(value),
        }
    }

    pub fn absent(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            state: PendingState::Failed,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PendingState::Loading(_))
    }

    /// Non-blocking: the value if it has arrived, `None` while loading or after failure.
    pub fn poll(&mut self) -> Option<&T> {
        let received = match &self.state {
            PendingState::Loading(rx) => Some(rx.try_recv()),
            _ => None,
        };
        match received {
            Some(Ok(result)) => self.settle(result),
            Some(Err(TryRecvError::Disconnected)) => self.settle_disconnected(),
            Some(Err(TryRecvError::Empty)) | None => {}
        }
        self.get()
    }

    /// Block until the loader finishes.
    pub fn wait(&mut self) -> Option<&T> {
        let received = match &self.state {
            PendingState::Loading(rx) => Some(rx.recv()),
            _ => None,
        };
        match received {
            Some(Ok(result)) => self.settle(result),
            Some(Err(_)) => self.settle_disconnected(),
            None => {}
        }
        self.get()
    }

    fn get(&self) -> Option<&T> {
        match &self.state {
            PendingState::Ready(v) => Some(v),
            _ => None,
        }
    }

    fn settle(&mut self, result: IntroResult<T>) {
        self.state = match result {
            Ok(v) => {
                tracing::debug!(asset = %self.label, "asset ready");
                PendingState::Ready(v)
            }
            Err(e) => {
                tracing::warn!(asset = %self.label, error = %e, "asset unavailable, continuing without it");
                PendingState::Failed
            }
        };
    }

    fn settle_disconnected(&mut self) {
        tracing::warn!(asset = %self.label, "asset loader exited without a result");
        self.state = PendingState::Failed;
    }
}

impl<T> std::fmt::Debug for PendingAsset<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state {
            PendingState::Loading(_) => "loading",
            PendingState::Ready(_) => "ready",
            PendingState::Failed => "absent",
        };
        f.debug_struct("PendingAsset")
            .field("label", &self.label)
            .field("state", &state)
            .finish()
    }
}
