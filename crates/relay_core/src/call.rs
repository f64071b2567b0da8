//! Fixed-arity call operators.
//!
//! `d.call(a, b)` is sugar for `d.invoke((a, b))`, generated for every arity
//! the argument-tuple traits support.

use crate::delegate::Delegate;
use crate::errors::InvokeError;

macro_rules! impl_call {
    ($($arg:ident: $ty:ident),*) => {
        impl<$($ty,)* R> Delegate<'_, ($($ty,)*), R> {
            /// Calls the bound target.
            ///
            /// # Panics
            ///
            /// Panics if the handle is unbound.
            #[inline]
            pub fn call(&self, $($arg: $ty),*) -> R {
                self.invoke(($($arg,)*))
            }

            /// Calls the bound target, reporting an unbound handle as
            /// [`InvokeError::Unbound`].
            #[inline]
            pub fn try_call(&self, $($arg: $ty),*) -> Result<R, InvokeError> {
                self.try_invoke(($($arg,)*))
            }

            /// # Safety
            ///
            /// The handle must be bound.
            #[inline(always)]
            pub unsafe fn call_unchecked(&self, $($arg: $ty),*) -> R {
                // SAFETY: forwarded from this method's own contract.
                unsafe { self.invoke_unchecked(($($arg,)*)) }
            }
        }
    };
}

impl_call!();
impl_call!(a0: A0);
impl_call!(a0: A0, a1: A1);
impl_call!(a0: A0, a1: A1, a2: A2);
impl_call!(a0: A0, a1: A1, a2: A2, a3: A3);
impl_call!(a0: A0, a1: A1, a2: A2, a3: A3, a4: A4);
impl_call!(a0: A0, a1: A1, a2: A2, a3: A3, a4: A4, a5: A5);
impl_call!(a0: A0, a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6);
impl_call!(a0: A0, a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6, a7: A7);
