use std::sync::{mpsc, Arc};

type Callback<T> = dyn Fn(&T) + Send + Sync + 'static;

/// A callback registered on a [Channel](crate::Channel)
///
/// Clones share identity: registering the same listener twice
/// as a persistent listener stores it once
pub struct Listener<T>(Arc<Callback<T>>);

/// Trait for types that can be registered on a [Channel](crate::Channel)
pub trait IntoListener<T> {
    /// Converts this value into a listener
    fn into_listener(self) -> Listener<T>;
}

impl<T> Listener<T> {
    /// Wraps a callback into a new listener with its own identity
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }

    /// Returns true if both listeners are the same callback
    pub fn ptr_eq(&self, other: &Self) -> bool {
        // metadata of the fat pointer is not part of the identity
        Arc::as_ptr(&self.0) as *const () == Arc::as_ptr(&other.0) as *const ()
    }

    pub(crate) fn call(&self, value: &T) {
        (self.0)(value)
    }
}

impl<T> Clone for Listener<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> std::fmt::Debug for Listener<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listener({:p})", Arc::as_ptr(&self.0) as *const ())
    }
}

/// Slot of the listener collection
pub(crate) enum Entry<T> {
    Persistent(Listener<T>),
    OnceOnly(Listener<T>),
}

impl<T> Entry<T> {
    pub(crate) fn new(listener: Listener<T>, once: bool) -> Self {
        if once {
            Entry::OnceOnly(listener)
        } else {
            Entry::Persistent(listener)
        }
    }

    pub(crate) fn listener(&self) -> &Listener<T> {
        match self {
            Entry::Persistent(listener) | Entry::OnceOnly(listener) => listener,
        }
    }

    pub(crate) fn is_once(&self) -> bool {
        matches!(self, Entry::OnceOnly(_))
    }
}

impl<T> Clone for Entry<T> {
    fn clone(&self) -> Self {
        match self {
            Entry::Persistent(listener) => Entry::Persistent(listener.clone()),
            Entry::OnceOnly(listener) => Entry::OnceOnly(listener.clone()),
        }
    }
}

impl<F, T> IntoListener<T> for F
where
    F: Fn(&T) + Send + Sync + 'static,
{
    fn into_listener(self) -> Listener<T> {
        Listener::new(self)
    }
}

impl<T> IntoListener<T> for Listener<T> {
    fn into_listener(self) -> Listener<T> {
        self
    }
}

impl<T> IntoListener<T> for mpsc::Sender<T>
where
    T: Clone + Send + 'static,
{
    fn into_listener(self) -> Listener<T> {
        // a disconnected receiver is not the broadcaster's concern
        Listener::new(move |value: &T| {
            let _ = self.send(value.clone());
        })
    }
}

#[cfg(feature = "tokio")]
impl<T> IntoListener<T> for tokio::sync::mpsc::UnboundedSender<T>
where
    T: Clone + Send + 'static,
{
    fn into_listener(self) -> Listener<T> {
        Listener::new(move |value: &T| {
            let _ = self.send(value.clone());
        })
    }
}
