//! Invocation record.
//!
//! The two-word payload behind every delegate: an erased context pointer and
//! the trampoline that knows how to turn it back into a concrete receiver.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr::NonNull;

/// Signature-fixed trampoline.
///
/// Receives the erased context (absent for free functions and fixed
/// receivers) and the packed argument tuple.
pub type Thunk<Args, R> = unsafe fn(Option<NonNull<()>>, Args) -> R;

/// Context pointer plus thunk. `thunk == None` means unbound.
pub struct Invocation<Args, R> {
    context: Option<NonNull<()>>,
    thunk: Option<Thunk<Args, R>>,
}

impl<Args, R> Invocation<Args, R> {
    #[inline]
    pub const fn new() -> Self {
        Self {
            context: None,
            thunk: None,
        }
    }

    /// Populates both fields at once.
    #[inline]
    pub const fn bind(context: Option<NonNull<()>>, thunk: Thunk<Args, R>) -> Self {
        Self {
            context,
            thunk: Some(thunk),
        }
    }

    #[inline]
    pub const fn is_bound(&self) -> bool {
        self.thunk.is_some()
    }

    #[inline]
    pub const fn context(&self) -> Option<NonNull<()>> {
        self.context
    }

    #[inline]
    pub const fn thunk(&self) -> Option<Thunk<Args, R>> {
        self.thunk
    }

    /// Copies both fields verbatim into `target`. The referent is never touched.
    #[inline]
    pub fn clone_into(&self, target: &mut Self) {
        target.context = self.context;
        target.thunk = self.thunk;
    }

    /// Address of the thunk, used for identity comparison.
    #[inline]
    pub fn thunk_addr(&self) -> Option<usize> {
        self.thunk.map(|t| t as usize)
    }

    #[inline]
    fn context_addr(&self) -> Option<usize> {
        self.context.map(|p| p.as_ptr() as usize)
    }
}

impl<Args, R> Clone for Invocation<Args, R> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<Args, R> Copy for Invocation<Args, R> {}

impl<Args, R> Default for Invocation<Args, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args, R> PartialEq for Invocation<Args, R> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.thunk_addr() == other.thunk_addr() && self.context == other.context
    }
}

impl<Args, R> Eq for Invocation<Args, R> {}

impl<Args, R> Hash for Invocation<Args, R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.thunk_addr().hash(state);
        self.context_addr().hash(state);
    }
}

impl<Args, R> fmt::Debug for Invocation<Args, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("context", &Addr(self.context_addr()))
            .field("thunk", &Addr(self.thunk_addr()))
            .finish()
    }
}

struct Addr(Option<usize>);

impl fmt::Debug for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(addr) => write!(f, "{addr:#x}"),
            None => f.write_str("null"),
        }
    }
}
