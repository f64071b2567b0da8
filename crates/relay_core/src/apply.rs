//! Argument tuples.
//!
//! A delegate's signature is an argument tuple plus a return type. These
//! traits let a tuple be spread into a callable of matching arity; they are
//! implemented for tuples of up to eight elements.

/// Spreads `self` into a shared callable.
pub trait Apply<F, R>: Sized {
    fn apply(self, f: &F) -> R;
}

/// Spreads `self` into a mutable callable.
pub trait ApplyMut<F, R>: Sized {
    fn apply_mut(self, f: &mut F) -> R;
}

/// Spreads `self` into a method taking `&T` as receiver.
pub trait ApplyMethod<T, M, R>: Sized {
    fn apply_method(self, receiver: &T, method: &M) -> R;
}

/// Spreads `self` into a method taking `&mut T` as receiver.
pub trait ApplyMethodMut<T, M, R>: Sized {
    fn apply_method_mut(self, receiver: &mut T, method: &M) -> R;
}

macro_rules! impl_apply {
    ($($arg:ident: $ty:ident),*) => {
        impl<F, R, $($ty,)*> Apply<F, R> for ($($ty,)*)
        where
            F: Fn($($ty),*) -> R,
        {
            #[inline(always)]
            fn apply(self, f: &F) -> R {
                let ($($arg,)*) = self;
                f($($arg),*)
            }
        }

        impl<F, R, $($ty,)*> ApplyMut<F, R> for ($($ty,)*)
        where
            F: FnMut($($ty),*) -> R,
        {
            #[inline(always)]
            fn apply_mut(self, f: &mut F) -> R {
                let ($($arg,)*) = self;
                f($($arg),*)
            }
        }

        impl<T, M, R, $($ty,)*> ApplyMethod<T, M, R> for ($($ty,)*)
        where
            M: Fn(&T, $($ty),*) -> R,
        {
            #[inline(always)]
            fn apply_method(self, receiver: &T, method: &M) -> R {
                let ($($arg,)*) = self;
                method(receiver, $($arg),*)
            }
        }

        impl<T, M, R, $($ty,)*> ApplyMethodMut<T, M, R> for ($($ty,)*)
        where
            M: Fn(&mut T, $($ty),*) -> R,
        {
            #[inline(always)]
            fn apply_method_mut(self, receiver: &mut T, method: &M) -> R {
                let ($($arg,)*) = self;
                method(receiver, $($arg),*)
            }
        }
    };
}

impl_apply!();
impl_apply!(a0: A0);
impl_apply!(a0: A0, a1: A1);
impl_apply!(a0: A0, a1: A1, a2: A2);
impl_apply!(a0: A0, a1: A1, a2: A2, a3: A3);
impl_apply!(a0: A0, a1: A1, a2: A2, a3: A3, a4: A4);
impl_apply!(a0: A0, a1: A1, a2: A2, a3: A3, a4: A4, a5: A5);
impl_apply!(a0: A0, a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6);
impl_apply!(a0: A0, a1: A1, a2: A2, a3: A3, a4: A4, a5: A5, a6: A6, a7: A7);
