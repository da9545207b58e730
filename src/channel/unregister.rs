use super::Inner;
use std::{fmt, sync::Weak};

/// Unregister handle returned by [register](crate::Channel::register)
///
/// The handle does not keep the channel alive
/// and dropping it does not remove the listener
pub struct Unregister<T> {
    inner: Weak<Inner<T>>,
    id: u64,
}

impl<T> Unregister<T> {
    pub(super) fn new(inner: Weak<Inner<T>>, id: u64) -> Self {
        Self { inner, id }
    }

    /// Removes the listener
    ///
    /// Returns false if it was already removed
    /// or the channel no longer exists
    pub fn unregister(&self) -> bool {
        let inner = match self.inner.upgrade() {
            Some(inner) => inner,
            None => return false,
        };
        let removed = inner.remove(self.id);
        if removed {
            tracing::trace!(channel = inner.name.as_deref(), id = self.id, "listener unregistered");
        }
        removed
    }

    /// Returns true while the listener is registered
    pub fn is_registered(&self) -> bool {
        match self.inner.upgrade() {
            Some(inner) => inner.contains(self.id),
            None => false,
        }
    }
}

impl<T> Clone for Unregister<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            id: self.id,
        }
    }
}

impl<T> fmt::Debug for Unregister<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unregister").field("id", &self.id).finish()
    }
}
