//! Ordered collection of delegates invoked together.
//!
//! Bindings live inline up to `N` entries and only spill to the heap past
//! that. Membership is decided by delegate equality, so removing a binding
//! means presenting an equal handle.

use std::fmt;
use std::ops::{AddAssign, SubAssign};

use relay_core::Delegate;
use smallvec::SmallVec;

use crate::config::MulticastConfig;

pub struct Multicast<'a, Args, R = (), const N: usize = 4> {
    delegates: SmallVec<[Delegate<'a, Args, R>; N]>,
    config: MulticastConfig,
}

impl<'a, Args, R, const N: usize> Multicast<'a, Args, R, N> {
    pub fn new() -> Self {
        Self::with_config(MulticastConfig::default())
    }

    pub fn with_config(config: MulticastConfig) -> Self {
        Self {
            delegates: SmallVec::new(),
            config,
        }
    }

    pub fn config(&self) -> MulticastConfig {
        self.config
    }

    /// Appends `delegate`. Unbound handles are ignored, as are duplicates
    /// when the config forbids them. Returns whether it was added.
    pub fn add(&mut self, delegate: Delegate<'a, Args, R>) -> bool {
        if delegate.is_null() {
            tracing::trace!("multicast ignored unbound delegate");
            return false;
        }
        if !self.config.allow_duplicates && self.contains(&delegate) {
            tracing::trace!(len = self.delegates.len(), "multicast ignored duplicate binding");
            return false;
        }
        self.delegates.push(delegate);
        tracing::trace!(
            len = self.delegates.len(),
            spilled = self.delegates.spilled(),
            "multicast binding added"
        );
        true
    }

    /// Removes the most recently added binding equal to `delegate`.
    /// Equality is handle identity; see [`Delegate`] for when two distinct
    /// targets can compare equal.
    pub fn remove(&mut self, delegate: &Delegate<'a, Args, R>) -> bool {
        match self.delegates.iter().rposition(|d| d == delegate) {
            Some(idx) => {
                self.delegates.remove(idx);
                tracing::trace!(len = self.delegates.len(), "multicast binding removed");
                true
            }
            None => {
                tracing::debug!(len = self.delegates.len(), "multicast remove found no binding");
                false
            }
        }
    }

    #[inline]
    pub fn contains(&self, delegate: &Delegate<'a, Args, R>) -> bool {
        self.delegates.iter().any(|d| d == delegate)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.delegates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }

    /// True once more than `N` bindings forced a heap allocation.
    #[inline]
    pub fn spilled(&self) -> bool {
        self.delegates.spilled()
    }

    pub fn clear(&mut self) {
        let dropped = self.delegates.len();
        self.delegates.clear();
        tracing::trace!(dropped, "multicast cleared");
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Delegate<'a, Args, R>> {
        self.delegates.iter()
    }

    pub fn as_slice(&self) -> &[Delegate<'a, Args, R>] {
        &self.delegates
    }

    /// The single binding, if there is exactly one.
    pub fn single(&self) -> Option<&Delegate<'a, Args, R>> {
        match self.delegates.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

impl<Args: Clone, R, const N: usize> Multicast<'_, Args, R, N> {
    /// Calls every binding in insertion order, discarding results.
    /// Returns how many were called.
    pub fn invoke(&self, args: Args) -> usize {
        for d in &self.delegates {
            d.invoke(args.clone());
        }
        self.delegates.len()
    }

    /// Calls every binding in insertion order and collects the results.
    pub fn invoke_collect<E: Extend<R>>(&self, args: Args, out: &mut E) {
        out.extend(self.delegates.iter().map(|d| d.invoke(args.clone())));
    }
}

impl<Args, R, const N: usize> Default for Multicast<'_, Args, R, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args, R, const N: usize> Clone for Multicast<'_, Args, R, N> {
    fn clone(&self) -> Self {
        Self {
            delegates: self.delegates.iter().copied().collect(),
            config: self.config,
        }
    }
}

impl<'a, Args, R, const N: usize> AddAssign<Delegate<'a, Args, R>> for Multicast<'a, Args, R, N> {
    fn add_assign(&mut self, delegate: Delegate<'a, Args, R>) {
        self.add(delegate);
    }
}

impl<'a, Args, R, const N: usize> SubAssign<Delegate<'a, Args, R>> for Multicast<'a, Args, R, N> {
    fn sub_assign(&mut self, delegate: Delegate<'a, Args, R>) {
        self.remove(&delegate);
    }
}

impl<'a, Args, R, const N: usize> Extend<Delegate<'a, Args, R>> for Multicast<'a, Args, R, N> {
    fn extend<I: IntoIterator<Item = Delegate<'a, Args, R>>>(&mut self, iter: I) {
        for d in iter {
            self.add(d);
        }
    }
}

impl<'a, Args, R, const N: usize> FromIterator<Delegate<'a, Args, R>>
    for Multicast<'a, Args, R, N>
{
    fn from_iter<I: IntoIterator<Item = Delegate<'a, Args, R>>>(iter: I) -> Self {
        let mut m = Self::new();
        m.extend(iter);
        m
    }
}

impl<'m, 'a, Args, R, const N: usize> IntoIterator for &'m Multicast<'a, Args, R, N> {
    type Item = &'m Delegate<'a, Args, R>;
    type IntoIter = std::slice::Iter<'m, Delegate<'a, Args, R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Equality
// ============================================================================

impl<Args, R, const N: usize> PartialEq for Multicast<'_, Args, R, N> {
    fn eq(&self, other: &Self) -> bool {
        self.delegates.as_slice() == other.delegates.as_slice()
    }
}

impl<Args, R, const N: usize> Eq for Multicast<'_, Args, R, N> {}

/// `m == d` iff `m` holds exactly one binding and it is `d`.
impl<'a, Args, R, const N: usize> PartialEq<Delegate<'a, Args, R>> for Multicast<'a, Args, R, N> {
    fn eq(&self, delegate: &Delegate<'a, Args, R>) -> bool {
        self.single() == Some(delegate)
    }
}

impl<'a, Args, R, const N: usize> PartialEq<Multicast<'a, Args, R, N>> for Delegate<'a, Args, R> {
    fn eq(&self, multicast: &Multicast<'a, Args, R, N>) -> bool {
        multicast == self
    }
}

impl<Args, R, const N: usize> fmt::Debug for Multicast<'_, Args, R, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Multicast")
            .field("delegates", &self.delegates.as_slice())
            .field("config", &self.config)
            .finish()
    }
}
