//! In-memory backends and the call log they share.

mod control_plane;
mod secrets;

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub use control_plane::InMemoryControlPlane;
pub use secrets::InMemorySecretStore;

/// A remote call observed by one of the in-memory backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ConnectSecrets {
        region: String,
    },
    FetchSecret {
        name: String,
    },
    CreateSecret {
        name: String,
    },
    DeleteSecret {
        name: String,
    },
    ConnectControlPlane,
    CreateIndex {
        name: String,
        dimension: i32,
        region: String,
    },
    DeleteIndex {
        name: String,
    },
}

/// Operation that can be forced to fail with `fail_on`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    FetchSecret,
    CreateSecret,
    DeleteSecret,
    CreateIndex,
    DeleteIndex,
}

/// Ordered record of calls, shared between backends.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallLog {
    /// Returns a snapshot of every call so far.
    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    /// Counts the calls matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        lock(&self.calls).iter().filter(|call| predicate(call)).count()
    }

    pub(crate) fn record(&self, call: Call) {
        lock(&self.calls).push(call);
    }
}

/// Set of operations that fail on their next and every later call.
#[derive(Debug, Clone, Default)]
pub(crate) struct Failures {
    operations: Arc<Mutex<HashSet<MockOperation>>>,
}

impl Failures {
    pub(crate) fn insert(&self, operation: MockOperation) {
        lock(&self.operations).insert(operation);
    }

    pub(crate) fn contains(&self, operation: MockOperation) -> bool {
        lock(&self.operations).contains(&operation)
    }
}

/// Locks a mutex, ignoring poisoning from a panicked test thread.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
