//! Invocation errors and their message constants.

use std::fmt;

pub mod messages {
    pub const UNBOUND: &str = "delegate invoked while unbound";
}

/// Recoverable failure reported by the checked invocation paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InvokeError {
    /// The handle has no thunk bound.
    Unbound,
}

impl fmt::Display for InvokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvokeError::Unbound => f.write_str(messages::UNBOUND),
        }
    }
}

impl std::error::Error for InvokeError {}
