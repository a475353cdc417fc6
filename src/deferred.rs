use std::fmt;
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::error::ArtifactError;

type Thunk<T> = Box<dyn Fn() -> Result<T, ArtifactError> + Send + Sync>;

/// A lazily computed, memoized artifact.
///
/// The computation runs at most once successfully; every later `get` returns the
/// cached value. A failed computation is not cached, so the next caller retries it.
/// Safe to share across threads: concurrent first readers block on one computation.
pub struct Deferred<T> {
    value: OnceLock<T>,
    compute_lock: Mutex<()>,
    thunk: Option<Thunk<T>>,
}

impl<T> Deferred<T> {
    pub fn new<F>(compute: F) -> Self
    where
        F: Fn() -> Result<T, ArtifactError> + Send + Sync + 'static,
    {
        Deferred {
            value: OnceLock::new(),
            compute_lock: Mutex::new(()),
            thunk: Some(Box::new(compute)),
        }
    }

    /// An artifact whose value is already known.
    pub fn ready(value: T) -> Self {
        Deferred {
            value: OnceLock::from(value),
            compute_lock: Mutex::new(()),
            thunk: None,
        }
    }

    pub fn get(&self) -> Result<&T, ArtifactError> {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let _guard = self
            .compute_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Another reader may have finished while we waited for the lock.
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let thunk = self
            .thunk
            .as_ref()
            .ok_or_else(|| ArtifactError::Failed("deferred artifact has no computation".into()))?;
        let computed = thunk()?;
        tracing::trace!("deferred artifact computed");
        Ok(self.value.get_or_init(|| computed))
    }

    pub fn is_evaluated(&self) -> bool {
        self.value.get().is_some()
    }
}

impl<T: fmt::Debug> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.get() {
            Some(value) => f.debug_tuple("Deferred").field(value).finish(),
            None => f.write_str("Deferred(<pending>)"),
        }
    }
}
