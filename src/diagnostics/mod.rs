//! # Diagnostics
//!
//! A [Channel](crate::Channel) reports rejected broadcasts
//! through a [Diagnostics] sink instead of a global logger,
//! so the sink can be swapped or silenced per channel

use std::{backtrace::Backtrace, fmt, panic::Location};


/// A broadcast made from inside a listener of the same channel
#[derive(Debug, Clone, Copy)]
pub struct Recursion<'a> {
    /// Debug name of the channel, if it was given one
    pub channel: Option<&'a str>,
    /// Call site of the rejected broadcast
    pub location: &'static Location<'static>,
}

/// Sink for the diagnostics of a channel
pub trait Diagnostics: Send + Sync + 'static {
    /// Called with the detection message of a rejected broadcast
    fn warn(&self, recursion: &Recursion<'_>);

    /// Called right after [warn](Diagnostics::warn) with call-site information
    fn trace(&self, recursion: &Recursion<'_>);
}

/// Emits diagnostics as [tracing] events
///
/// This is the default sink
#[derive(Debug, Default, Clone, Copy)]
pub struct Tracing;

/// Discards all diagnostics
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Diagnostics for Tracing {
    fn warn(&self, recursion: &Recursion<'_>) {
        tracing::warn!(
            channel = recursion.channel,
            location = %recursion.location,
            "Detected recursive broadcast, ignoring nested broadcast"
        );
    }

    fn trace(&self, recursion: &Recursion<'_>) {
        if !tracing::enabled!(tracing::Level::TRACE) {
            return;
        }
        let backtrace = Backtrace::force_capture();
        tracing::trace!(
            channel = recursion.channel,
            location = %recursion.location,
            "Detected recursive broadcast\n{}",
            backtrace
        );
    }
}

impl Diagnostics for Silent {
    fn warn(&self, _recursion: &Recursion<'_>) {}

    fn trace(&self, _recursion: &Recursion<'_>) {}
}

impl fmt::Display for Recursion<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.channel {
            Some(name) => write!(f, "recursive broadcast in {} at {}", name, self.location),
            None => write!(f, "recursive broadcast at {}", self.location),
        }
    }
}
