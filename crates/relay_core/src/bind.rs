//! Binding paths.
//!
//! Each constructor picks a thunk at compile time. Free functions, methods
//! and fixed receivers are passed as zero-sized callables (function items or
//! non-capturing closures), so their identity lives in the thunk's type
//! parameters and nothing about them is stored. Closures are referenced,
//! never copied.

use std::mem::size_of;
use std::ptr::NonNull;

use crate::apply::{Apply, ApplyMethod, ApplyMethodMut, ApplyMut};
use crate::delegate::Delegate;

#[inline(always)]
const fn assert_zero_sized<F>() {
    const {
        assert!(
            size_of::<F>() == 0,
            "callable must be zero-sized (a function item or non-capturing closure)"
        )
    }
}

/// Produces a value of a zero-sized callable type from the type alone.
///
/// # Safety
///
/// A value of `F` must have existed; every binding path receives one. `F` is
/// `Copy` and carries no bytes, so a fresh value is indistinguishable from a
/// copy of that one.
#[inline(always)]
unsafe fn conjure<F: Copy>() -> F {
    assert_zero_sized::<F>();
    // SAFETY: `F` is zero-sized, so reading through a dangling aligned
    // pointer touches no memory.
    unsafe { NonNull::<F>::dangling().as_ptr().read() }
}

impl<'a, Args, R> Delegate<'a, Args, R> {
    /// Binds a free function. No context is stored.
    ///
    /// ```
    /// use relay_core::Delegate;
    ///
    /// fn add(a: i32, b: i32) -> i32 {
    ///     a + b
    /// }
    ///
    /// let d: Delegate<(i32, i32), i32> = Delegate::function(add);
    /// assert_eq!(d.call(3, 4), 7);
    /// ```
    #[inline]
    pub fn function<F>(_function: F) -> Self
    where
        F: Copy,
        Args: Apply<F, R>,
    {
        assert_zero_sized::<F>();
        Self::from_parts(None, function_thunk::<F, Args, R>)
    }

    /// Binds a `&self` method to `receiver`.
    #[inline]
    pub fn method<T, M>(receiver: &'a T, _method: M) -> Self
    where
        M: Copy,
        Args: ApplyMethod<T, M, R>,
    {
        assert_zero_sized::<M>();
        Self::from_parts(
            Some(NonNull::from(receiver).cast()),
            method_thunk::<T, M, Args, R>,
        )
    }

    /// Binds a `&mut self` method to `receiver`.
    ///
    /// # Safety
    ///
    /// The handle and its copies must not be invoked while another invocation
    /// through any of them is still running (e.g. from inside the method);
    /// overlapping calls would alias the `&mut T`.
    #[inline]
    pub unsafe fn method_mut<T, M>(receiver: &'a mut T, _method: M) -> Self
    where
        M: Copy,
        Args: ApplyMethodMut<T, M, R>,
    {
        assert_zero_sized::<M>();
        Self::from_parts(
            Some(NonNull::from(receiver).cast()),
            method_mut_thunk::<T, M, Args, R>,
        )
    }

    /// Binds a `&self` method to a receiver fixed at compile time.
    ///
    /// `receiver` is a zero-sized accessor such as `|| &SENSOR`; neither it
    /// nor the receiver address is stored.
    ///
    /// ```
    /// use relay_core::Delegate;
    ///
    /// struct Gauge(u32);
    ///
    /// impl Gauge {
    ///     fn scaled(&self, k: u32) -> u32 {
    ///         self.0 * k
    ///     }
    /// }
    ///
    /// static GAUGE: Gauge = Gauge(21);
    ///
    /// let d: Delegate<(u32,), u32> = Delegate::fixed(|| &GAUGE, Gauge::scaled);
    /// assert_eq!(d.call(2), 42);
    /// assert!(d.invocation().context().is_none());
    /// ```
    #[inline]
    pub fn fixed<T, G, M>(_receiver: G, _method: M) -> Self
    where
        T: 'static,
        G: Fn() -> &'static T + Copy,
        M: Copy,
        Args: ApplyMethod<T, M, R>,
    {
        assert_zero_sized::<G>();
        assert_zero_sized::<M>();
        Self::from_parts(None, fixed_thunk::<T, G, M, Args, R>)
    }

    /// Binds a closure by reference.
    ///
    /// ```
    /// use std::cell::Cell;
    /// use relay_core::Delegate;
    ///
    /// let hits = Cell::new(0);
    /// let bump = |n: u32| hits.set(hits.get() + n);
    /// let d: Delegate<(u32,)> = Delegate::closure(&bump);
    /// d.call(2);
    /// d.call(3);
    /// assert_eq!(hits.get(), 5);
    /// ```
    #[inline]
    pub fn closure<F>(closure: &'a F) -> Self
    where
        Args: Apply<F, R>,
    {
        Self::from_parts(
            Some(NonNull::from(closure).cast()),
            closure_thunk::<F, Args, R>,
        )
    }

    /// Binds an `FnMut` closure by reference.
    ///
    /// # Safety
    ///
    /// Same contract as [`Delegate::method_mut`]: no overlapping invocations.
    #[inline]
    pub unsafe fn closure_mut<F>(closure: &'a mut F) -> Self
    where
        Args: ApplyMut<F, R>,
    {
        Self::from_parts(
            Some(NonNull::from(closure).cast()),
            closure_mut_thunk::<F, Args, R>,
        )
    }

    /// Rebinds this handle to `closure`.
    #[inline]
    pub fn bind_closure<F>(&mut self, closure: &'a F)
    where
        Args: Apply<F, R>,
    {
        *self = Self::closure(closure);
    }
}

impl<'a, F, Args, R> From<&'a F> for Delegate<'a, Args, R>
where
    Args: Apply<F, R>,
{
    fn from(closure: &'a F) -> Self {
        Self::closure(closure)
    }
}

// ============================================================================
// Thunks
// ============================================================================

unsafe fn function_thunk<F, Args, R>(_: Option<NonNull<()>>, args: Args) -> R
where
    F: Copy,
    Args: Apply<F, R>,
{
    // SAFETY: `function` received an `F` before installing this thunk.
    let function = unsafe { conjure::<F>() };
    args.apply(&function)
}

unsafe fn method_thunk<T, M, Args, R>(context: Option<NonNull<()>>, args: Args) -> R
where
    M: Copy,
    Args: ApplyMethod<T, M, R>,
{
    // SAFETY: context was set from `&'a T` by `method`, and `'a` outlives
    // the handle that installed this thunk.
    let receiver = unsafe { context.unwrap_unchecked().cast::<T>().as_ref() };
    // SAFETY: `method` received an `M` before installing this thunk.
    let method = unsafe { conjure::<M>() };
    args.apply_method(receiver, &method)
}

unsafe fn method_mut_thunk<T, M, Args, R>(context: Option<NonNull<()>>, args: Args) -> R
where
    M: Copy,
    Args: ApplyMethodMut<T, M, R>,
{
    // SAFETY: context was set from `&'a mut T` by `method_mut`, whose caller
    // rules out overlapping invocations, so this is the only live `&mut T`.
    let receiver = unsafe { context.unwrap_unchecked().cast::<T>().as_mut() };
    // SAFETY: `method_mut` received an `M` before installing this thunk.
    let method = unsafe { conjure::<M>() };
    args.apply_method_mut(receiver, &method)
}

unsafe fn fixed_thunk<T, G, M, Args, R>(_: Option<NonNull<()>>, args: Args) -> R
where
    T: 'static,
    G: Fn() -> &'static T + Copy,
    M: Copy,
    Args: ApplyMethod<T, M, R>,
{
    // SAFETY: `fixed` received a `G` before installing this thunk.
    let accessor = unsafe { conjure::<G>() };
    let receiver = accessor();
    // SAFETY: `fixed` received an `M` before installing this thunk.
    let method = unsafe { conjure::<M>() };
    args.apply_method(receiver, &method)
}

unsafe fn closure_thunk<F, Args, R>(context: Option<NonNull<()>>, args: Args) -> R
where
    Args: Apply<F, R>,
{
    // SAFETY: context was set from `&'a F` by `closure`, and `'a` outlives
    // the handle that installed this thunk.
    let closure = unsafe { context.unwrap_unchecked().cast::<F>().as_ref() };
    args.apply(closure)
}

unsafe fn closure_mut_thunk<F, Args, R>(context: Option<NonNull<()>>, args: Args) -> R
where
    Args: ApplyMut<F, R>,
{
    // SAFETY: context was set from `&'a mut F` by `closure_mut`, whose caller
    // rules out overlapping invocations.
    let closure = unsafe { context.unwrap_unchecked().cast::<F>().as_mut() };
    args.apply_mut(closure)
}
