use super::{Channel, Inner};
use crate::diagnostics::{Diagnostics, Tracing};
use std::{marker::PhantomData, sync::Arc};

/// Channel configuration
///
/// ```rust
/// use pubchan::{diagnostics::Silent, Channel};
///
/// let channel = Channel::<u8>::builder()
///     .name("ticks")
///     .diagnostics(Silent)
///     .build();
/// assert_eq!(channel.name(), Some("ticks"));
/// ```
pub struct Builder<T> {
    name: Option<String>,
    diagnostics: Box<dyn Diagnostics>,
    _payload: PhantomData<fn(&T)>,
}

impl<T> Builder<T> {
    /// Default configuration: no name, [Tracing] diagnostics
    pub fn new() -> Self {
        Self {
            name: None,
            diagnostics: Box::new(Tracing),
            _payload: PhantomData,
        }
    }

    /// Channel name in debug messages
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sink for rejected broadcast reports
    pub fn diagnostics(mut self, diagnostics: impl Diagnostics) -> Self {
        self.diagnostics = Box::new(diagnostics);
        self
    }

    /// Creates the channel
    pub fn build(self) -> Channel<T> {
        Channel {
            inner: Arc::new(Inner::new(self.name, self.diagnostics)),
        }
    }
}

impl<T> Default for Builder<T> {
    fn default() -> Self {
        Self::new()
    }
}
