//! Callable handle.
//!
//! `Delegate` is a two-word value that can stand for a free function, a
//! method bound to a receiver, a method bound to a receiver fixed at compile
//! time, or a closure. It never owns what it points at: the lifetime `'a`
//! ties the handle to the borrow it was built from.
//!
//! Binding constructors live in `bind.rs`, the per-arity `call` sugar in
//! `call.rs`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::errors::{InvokeError, messages};
use crate::invocation::{Invocation, Thunk};

/// Type-erased, non-owning callable with argument tuple `Args` and return `R`.
///
/// Handles compare equal when they share both thunk and context, i.e. the
/// same target bound to the same receiver. Identity is address based, which
/// cuts both ways:
///
/// - Two separately compiled crates may monomorphize distinct thunks for the
///   same function, and those handles compare unequal.
/// - The optimizer may merge functions with identical bodies. In release
///   builds `Delegate::function(double) == Delegate::function(twice)` can
///   hold when both compute `x * 2`.
/// - Zero-sized closures have no storage of their own, so two distinct
///   instances bound with [`Delegate::closure`] may or may not share an
///   address depending on the build. Bind those with [`Delegate::function`]
///   instead; equality then follows the closure's type.
///
/// Containers that look bindings up by equality, such as a multicast list,
/// inherit these rules: removing one binding may remove another that
/// compares equal.
///
/// Handles are neither `Send` nor `Sync`.
pub struct Delegate<'a, Args = (), R = ()> {
    invocation: Invocation<Args, R>,
    _borrow: PhantomData<&'a ()>,
}

/// Null sentinel. `d == Null` iff `d.is_null()`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Null;

impl<'a, Args, R> Delegate<'a, Args, R> {
    /// Unbound handle.
    #[inline]
    pub const fn new() -> Self {
        Self {
            invocation: Invocation::new(),
            _borrow: PhantomData,
        }
    }

    #[inline]
    pub const fn null() -> Self {
        Self::new()
    }

    #[inline]
    pub(crate) const fn from_parts(context: Option<NonNull<()>>, thunk: Thunk<Args, R>) -> Self {
        Self {
            invocation: Invocation::bind(context, thunk),
            _borrow: PhantomData,
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        !self.invocation.is_bound()
    }

    #[inline]
    pub const fn is_bound(&self) -> bool {
        self.invocation.is_bound()
    }

    #[inline]
    pub const fn invocation(&self) -> &Invocation<Args, R> {
        &self.invocation
    }

    /// Back to the unbound state.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Calls the bound target with a packed argument tuple.
    ///
    /// # Panics
    ///
    /// Panics if the handle is unbound.
    #[inline]
    pub fn invoke(&self, args: Args) -> R {
        match self.invocation.thunk() {
            // SAFETY: thunk and context were paired by the binding path that
            // built this handle, and `'a` keeps the referent alive.
            Some(thunk) => unsafe { thunk(self.invocation.context(), args) },
            None => panic!("{}", messages::UNBOUND),
        }
    }

    /// Like [`Delegate::invoke`], but reports an unbound handle as an error.
    #[inline]
    pub fn try_invoke(&self, args: Args) -> Result<R, InvokeError> {
        match self.invocation.thunk() {
            // SAFETY: as in `invoke`.
            Some(thunk) => Ok(unsafe { thunk(self.invocation.context(), args) }),
            None => {
                tracing::debug!(
                    signature = std::any::type_name::<Args>(),
                    "{}",
                    messages::UNBOUND
                );
                Err(InvokeError::Unbound)
            }
        }
    }

    /// Calls the bound target without checking for a thunk.
    ///
    /// # Safety
    ///
    /// The handle must be bound. Debug builds assert it.
    #[inline(always)]
    pub unsafe fn invoke_unchecked(&self, args: Args) -> R {
        debug_assert!(self.is_bound(), "{}", messages::UNBOUND);
        // SAFETY: the caller guarantees a bound thunk; pairing with the
        // context is as in `invoke`.
        unsafe {
            let thunk = self.invocation.thunk().unwrap_unchecked();
            thunk(self.invocation.context(), args)
        }
    }
}

impl<Args, R> Clone for Delegate<'_, Args, R> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<Args, R> Copy for Delegate<'_, Args, R> {}

impl<Args, R> Default for Delegate<'_, Args, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args, R> From<Null> for Delegate<'_, Args, R> {
    fn from(_: Null) -> Self {
        Self::new()
    }
}

impl<Args, R> PartialEq for Delegate<'_, Args, R> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.invocation == other.invocation
    }
}

impl<Args, R> Eq for Delegate<'_, Args, R> {}

impl<Args, R> PartialEq<Null> for Delegate<'_, Args, R> {
    #[inline]
    fn eq(&self, _: &Null) -> bool {
        self.is_null()
    }
}

impl<'a, Args, R> PartialEq<Delegate<'a, Args, R>> for Null {
    #[inline]
    fn eq(&self, other: &Delegate<'a, Args, R>) -> bool {
        other.is_null()
    }
}

impl<Args, R> Hash for Delegate<'_, Args, R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.invocation.hash(state);
    }
}

impl<Args, R> fmt::Debug for Delegate<'_, Args, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("Delegate(null)");
        }
        f.debug_tuple("Delegate").field(&self.invocation).finish()
    }
}
