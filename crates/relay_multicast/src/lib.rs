//! Multicast delegates.
//!
//! A `Multicast` holds an ordered list of [`relay_core::Delegate`] bindings
//! and calls each of them in turn. Up to `N` bindings are stored inline.

pub mod config;
pub mod multicast;

pub use config::MulticastConfig;
pub use multicast::Multicast;
pub use relay_core::{Delegate, Null};
