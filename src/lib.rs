//! Turns closures into context-free bare function pointers, for host APIs whose callback slots
//! take nothing but a function address.
//!
//! ```
//! use static_closure_ffi::static_fn;
//!
//! // Stands in for a C API that takes a callback without a user data pointer
//! fn host_apply(callback: extern "C" fn(i32) -> i32, value: i32) -> i32 {
//!     callback(value)
//! }
//!
//! let offset = 10;
//! let callback = static_fn!(move |x: i32| x + offset);
//! assert_eq!(host_apply(callback, 5), 15);
//! ```
//!
//! # How it works
//! Every closure has its own concrete type. The first time a closure type is adapted, a binding is
//! created for it in a process-wide [`registry`]: a storage slot holding a value of that type, and
//! a trampoline whose signature is the closure's signature. The trampoline looks up the slot and
//! calls whatever closure it currently holds. Adapting the closure moves it into the slot and
//! returns the trampoline.
//!
//! Bindings are never freed. The returned pointer stays valid for the life of the process.
//!
//! # Closures of the same type share a binding
//! Two closures produced by the same expression have the same type, even with different captured
//! values. They get the same function pointer, and the last closure adapted wins:
//!
//! ```
//! use static_closure_ffi::static_fn;
//!
//! fn constant(value: i32) -> impl FnMut() -> i32 + Send + 'static {
//!     move || value
//! }
//!
//! let one = static_fn!(constant(1));
//! assert_eq!(one(), 1);
//!
//! let two = static_fn!(constant(2));
//! assert_eq!(one as usize, two as usize);
//! assert_eq!(one(), 2);
//! ```
//!
//! Use a distinct closure expression for each callback that must stay independent.
//!
//! # Threads
//! Adapted closures must be `Send + 'static`. Each binding's storage sits behind a lock, so
//! trampolines can be called from any thread, concurrently with adaptations of the same type.
//! A closure must not call its own trampoline, nor adapt another closure of its own type, while it
//! runs. The storage lock is not re-entrant: the thread deadlocks, or the lock panics, which
//! aborts the process behind any calling convention other than [`cc::Rust`].
//!
//! Trampolines using a calling convention other than [`cc::Rust`] abort the process if the
//! closure panics.
//!
//! # Rejected callables
//! Type-erasing wrappers would make unrelated callables share one binding. Boxed callables,
//! borrowed callables and function pointers are refused at compile time:
//!
//! ```compile_fail,E0277
//! use static_closure_ffi::static_fn;
//!
//! let erased: Box<dyn FnMut(u32) -> u32 + Send> = Box::new(|x| x + 1);
//! let bare = static_fn!(erased);
//! ```
//!
//! ```compile_fail,E0277
//! use static_closure_ffi::static_fn;
//!
//! fn double(x: u32) -> u32 {
//!     2 * x
//! }
//! let bare = static_fn!(double as fn(u32) -> u32);
//! ```
//!
//! So are closures whose signature cannot be resolved, or which can only be called once:
//!
//! ```compile_fail
//! use static_closure_ffi::static_fn;
//!
//! let bare = static_fn!(|x| x);
//! ```
//!
//! ```compile_fail
//! use static_closure_ffi::static_fn;
//!
//! let name = String::from("once");
//! let bare = static_fn!(move || name);
//! ```
//!
//! Closures borrowing from their environment are not `'static` and are refused as well:
//!
//! ```compile_fail
//! use static_closure_ffi::static_fn;
//!
//! let local = 5;
//! let bare = static_fn!(|x: i32| x + local);
//! ```
//!
//! # Features
//! - `std` (default): locks come from `std::sync`. Without it the crate is `no_std` (with `alloc`)
//!   and uses `spin` locks.
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod binding;
mod sync;
mod thunk;

pub mod cc;
pub mod erasure;
pub mod registry;
pub mod traits;

pub mod prelude {
    pub use super::cc;
    pub use super::static_fn;
    pub use super::traits::{FnPtr, StaticThunk};
}

pub use binding::adapt;
pub use erasure::Concrete;
pub use prelude::*;

/// Adapts a closure into a bare function pointer with the same signature.
///
/// `static_fn!(closure)` produces an `extern "C" fn`; `static_fn!(cconv, closure)` uses the
/// calling convention marker `cconv` from [`cc`] instead.
///
/// The closure is moved into the process-wide binding of its type, replacing any closure of the
/// same type adapted before. Every parameter type must be annotated, and the closure must be
/// `FnMut + Send + 'static` with at most 12 parameters.
///
/// ```
/// use static_closure_ffi::{cc, static_fn};
///
/// let mut total = 0;
/// let accumulate: fn(u32) -> u32 = static_fn!(cc::Rust, move |x: u32| {
///     total += x;
///     total
/// });
///
/// assert_eq!(accumulate(3), 3);
/// assert_eq!(accumulate(4), 7);
/// ```
#[macro_export]
macro_rules! static_fn {
    ($cconv:expr, $closure:expr $(,)?) => {{
        #[allow(unused_imports)]
        use $crate::erasure::{ProbeConcrete as _, ProbeErased as _};

        let closure = $closure;
        let verdict = (&&$crate::erasure::Probe::of(&closure)).classify();
        $crate::adapt($cconv, $crate::erasure::Admissible::admit(verdict, closure))
    }};
    ($closure:expr $(,)?) => {
        $crate::static_fn!($crate::cc::C, $closure)
    };
}
