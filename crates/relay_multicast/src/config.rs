//! Multicast configuration.

/// Behaviour switches for a [`crate::Multicast`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MulticastConfig {
    /// Whether the same binding may be registered more than once.
    pub allow_duplicates: bool,
}

impl Default for MulticastConfig {
    fn default() -> Self {
        Self {
            allow_duplicates: true,
        }
    }
}

impl MulticastConfig {
    pub fn unique() -> Self {
        Self {
            allow_duplicates: false,
        }
    }
}
