//! # Broadcast channel
//!
//! A [Channel] holds an insertion-ordered set of listeners
//! and invokes all of them, synchronously, on every [broadcast](Channel::broadcast).
//!
//! A pass observes changes made while it runs:
//! a listener removed by an earlier listener is skipped,
//! a listener added during the pass is invoked in the same pass.
//!
//! Only one broadcast may be in progress on a channel.
//! A broadcast from another thread waits for the running pass to finish.
//! A nested broadcast (from inside a listener, on the same thread) is ignored
//! and reported through the channel [Diagnostics](crate::diagnostics::Diagnostics).
//! A listener must not block on a thread that broadcasts on the same channel.

use crate::diagnostics::{Diagnostics, Recursion};
use guard::{BroadcastGuard, PassState};
use listener::Entry;
use parking_lot::Mutex;
use std::{
    collections::BTreeMap,
    fmt,
    ops::Bound,
    panic::Location,
    sync::Arc,
};

mod builder;
mod guard;
mod listener;
mod unregister;


pub use builder::Builder;
pub use listener::{IntoListener, Listener};
pub use unregister::Unregister;

/// Creates a new channel without listeners
pub fn channel<T>() -> Channel<T> {
    Channel::new()
}

/// Synchronous broadcast channel
///
/// Clones refer to the same channel
pub struct Channel<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    name: Option<String>,
    listeners: Mutex<Listeners<T>>,
    broadcasting: PassState,
    diagnostics: Box<dyn Diagnostics>,
}

struct Listeners<T> {
    entries: BTreeMap<u64, Entry<T>>,
    next_id: u64,
}

/// This enumeration is the list of the possible error outcomes for the
/// [try_broadcast](crate::Channel::try_broadcast) fn
#[non_exhaustive]
pub enum BroadcastError<T> {
    /// The current thread is already broadcasting on this channel
    AlreadyBroadcasting(T),
}

impl<T> Channel<T> {
    /// Creates a new channel with default configuration
    pub fn new() -> Self {
        Builder::new().build()
    }

    /// Returns a builder to configure a new channel
    pub fn builder() -> Builder<T> {
        Builder::new()
    }

    /// Registers a listener
    ///
    /// With `once` set the listener is removed after its first invocation,
    /// see [register_once](Channel::register_once).
    ///
    /// A persistent registration of a clone of an already registered
    /// [Listener] returns a handle to the existing entry.
    /// Closures and functions passed directly have no identity,
    /// so each registration of them is a new entry.
    ///
    /// Closures must annotate their argument type: `|value: &T| ...`
    pub fn register<L: IntoListener<T>>(&self, listener: L, once: bool) -> Unregister<T> {
        let (id, inserted) = self.inner.insert(Entry::new(listener.into_listener(), once));
        if inserted {
            tracing::trace!(channel = self.name(), id, once, "listener registered");
        }
        Unregister::new(Arc::downgrade(&self.inner), id)
    }

    /// Registers a listener that is removed after its first invocation
    ///
    /// Every call creates a new entry, even for the same [Listener]
    pub fn register_once<L: IntoListener<T>>(&self, listener: L) -> Unregister<T> {
        self.register(listener, true)
    }

    /// Invokes every registered listener with `value`
    ///
    /// A call made while another thread is broadcasting on this channel
    /// waits for that pass to finish.
    /// A call made from inside a listener of this channel does nothing
    /// except reporting to the channel diagnostics.
    /// A panic in a listener propagates to the caller
    /// and skips the remaining listeners of this pass.
    #[track_caller]
    pub fn broadcast(&self, value: T) {
        if self.try_broadcast(value).is_ok() {
            return;
        }
        let recursion = Recursion {
            channel: self.name(),
            location: Location::caller(),
        };
        self.inner.diagnostics.warn(&recursion);
        self.inner.diagnostics.trace(&recursion);
    }

    /// Same as [broadcast](Channel::broadcast), but a nested call
    /// returns the value instead of reporting to diagnostics
    pub fn try_broadcast(&self, value: T) -> Result<(), BroadcastError<T>> {
        let _guard = match BroadcastGuard::acquire(&self.inner.broadcasting) {
            Some(guard) => guard,
            None => return Err(BroadcastError::AlreadyBroadcasting(value)),
        };
        let mut cursor = None;
        while let Some((id, entry)) = self.inner.next_after(cursor) {
            cursor = Some(id);
            entry.listener().call(&value);
            if entry.is_once() {
                self.inner.remove(id);
            }
        }
        Ok(())
    }

    /// Debug name of this channel
    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// Number of registered listeners
    pub fn len(&self) -> usize {
        self.inner.listeners.lock().entries.len()
    }

    /// Returns true if no listener is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true while a broadcast is in progress on any thread
    pub fn is_broadcasting(&self) -> bool {
        guard::in_progress(&self.inner.broadcasting)
    }
}

impl<T> Inner<T> {
    fn new(name: Option<String>, diagnostics: Box<dyn Diagnostics>) -> Self {
        Self {
            name,
            listeners: Mutex::new(Listeners {
                entries: BTreeMap::new(),
                next_id: 0,
            }),
            broadcasting: guard::new_state(),
            diagnostics,
        }
    }

    /// Returns the entry id and whether a new entry was stored
    fn insert(&self, entry: Entry<T>) -> (u64, bool) {
        let mut listeners = self.listeners.lock();
        if let Entry::Persistent(listener) = &entry {
            let existing = listeners.entries.iter().find(|(_, e)| match e {
                Entry::Persistent(l) => l.ptr_eq(listener),
                Entry::OnceOnly(_) => false,
            });
            if let Some((id, _)) = existing {
                return (*id, false);
            }
        }
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.insert(id, entry);
        (id, true)
    }

    fn remove(&self, id: u64) -> bool {
        self.listeners.lock().entries.remove(&id).is_some()
    }

    fn contains(&self, id: u64) -> bool {
        self.listeners.lock().entries.contains_key(&id)
    }

    /// First entry registered after `cursor`, cloned out of the lock
    fn next_after(&self, cursor: Option<u64>) -> Option<(u64, Entry<T>)> {
        let lower = match cursor {
            Some(id) => Bound::Excluded(id),
            None => Bound::Unbounded,
        };
        let listeners = self.listeners.lock();
        listeners
            .entries
            .range((lower, Bound::Unbounded))
            .next()
            .map(|(id, entry)| (*id, entry.clone()))
    }
}

impl<T> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name())
            .field("listeners", &self.len())
            .field("broadcasting", &self.is_broadcasting())
            .finish()
    }
}

impl<T> BroadcastError<T> {
    /// Returns the value that was not broadcast
    pub fn into_inner(self) -> T {
        match self {
            BroadcastError::AlreadyBroadcasting(value) => value,
        }
    }
}

impl<T> fmt::Debug for BroadcastError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BroadcastError::AlreadyBroadcasting(_) => {
                write!(f, "BroadcastError: AlreadyBroadcasting")
            }
        }
    }
}

impl<T> fmt::Display for BroadcastError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BroadcastError::AlreadyBroadcasting(_) => {
                write!(f, "the current thread is already broadcasting on this channel")
            }
        }
    }
}

impl<T> std::error::Error for BroadcastError<T> {}
