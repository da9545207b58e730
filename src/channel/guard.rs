use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::cell::Cell;

/// Per-channel pass state: the lock serializes passes across threads,
/// the cell marks a pass running on the thread that holds the lock
pub(crate) type PassState = ReentrantMutex<Cell<bool>>;

/// Holds the pass state of a channel for the duration of one pass
///
/// The flag is cleared on drop, so a panicking listener
/// still leaves the channel idle
pub(crate) struct BroadcastGuard<'a> {
    pass: ReentrantMutexGuard<'a, Cell<bool>>,
}

impl<'a> BroadcastGuard<'a> {
    /// Waits for a pass running on another thread to finish.
    /// Returns None if the current thread is already inside a pass
    pub(crate) fn acquire(state: &'a PassState) -> Option<Self> {
        let pass = state.lock();
        if pass.replace(true) {
            return None;
        }
        Some(Self { pass })
    }
}

impl Drop for BroadcastGuard<'_> {
    fn drop(&mut self) {
        self.pass.set(false);
    }
}

pub(crate) fn new_state() -> PassState {
    ReentrantMutex::new(Cell::new(false))
}

/// Returns true while any thread is inside a pass
pub(crate) fn in_progress(state: &PassState) -> bool {
    match state.try_lock() {
        Some(pass) => pass.get(),
        None => true,
    }
}
