#![warn(missing_docs)]
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::missing_panics_doc)]

//! Synchronous in-process broadcast channel
//!
//! A [Channel] fans a published value out to every registered listener,
//! in registration order, on the publishing thread.
//! Listeners are either persistent or one-shot.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! let channel = pubchan::channel::<i32>();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let a = {
//!     let seen = seen.clone();
//!     channel.register(move |v: &i32| seen.lock().unwrap().push(("a", *v)), false)
//! };
//! {
//!     let seen = seen.clone();
//!     channel.register_once(move |v: &i32| seen.lock().unwrap().push(("b", *v)));
//! }
//!
//! channel.broadcast(1);
//! channel.broadcast(2);
//! assert_eq!(*seen.lock().unwrap(), [("a", 1), ("b", 1), ("a", 2)]);
//!
//! assert!(a.unregister());
//! assert!(!a.unregister());
//! ```

pub mod channel;
pub mod diagnostics;

pub use channel::{channel, BroadcastError, Builder, Channel, IntoListener, Listener, Unregister};
