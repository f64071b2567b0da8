//! Allocation-free callable handles.
//!
//! This crate contains the two pieces every delegate is made of:
//! - `Invocation` - context pointer plus thunk, two machine words
//! - `Delegate` - the public handle, bindable to a free function, a method on
//!   a borrowed receiver, a method on a receiver fixed at compile time, or a
//!   borrowed closure
//!
//! Nothing here allocates, and no handle owns what it calls.

#![allow(clippy::too_many_arguments)]
#![allow(clippy::type_complexity)]

pub mod apply;
mod bind;
mod call;
pub mod delegate;
pub mod errors;
pub mod invocation;

pub use apply::{Apply, ApplyMethod, ApplyMethodMut, ApplyMut};
pub use delegate::{Delegate, Null};
pub use errors::InvokeError;
pub use invocation::{Invocation, Thunk};
