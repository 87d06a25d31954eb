//! Build-time rejection of type-erased callables.
//!
//! Bindings are keyed by the concrete type of the adapted value. A wrapper such as
//! `Box<dyn Fn(u32) -> u32>` gives every callable it holds the same type, so unrelated callables
//! would silently share one binding. [`static_fn!`](crate::static_fn) classifies its argument
//! through autoref method resolution: the erased classification applies to boxes, references and
//! function pointers and wins over the blanket concrete one. Only the concrete verdict can admit a
//! closure, so an erased value fails to compile with a dedicated diagnostic naming the wrapper.
//!
//! The classification only sees the type written at the macro call site. Generic code forwarding
//! an arbitrary `F` to the macro is classified as concrete.
//!
//! Everything here except [`Concrete`] exists for the macro expansion and is not part of the
//! public API.

#[cfg(not(feature = "std"))]
use alloc::boxed::Box;
use core::marker::PhantomData;

#[doc(hidden)]
pub struct Probe<T>(PhantomData<fn() -> T>);

impl<T> Probe<T> {
    #[inline(always)]
    pub fn of(_value: &T) -> Self {
        Self(PhantomData)
    }
}

/// Verdict for a value whose concrete type identifies a single callable. The private field keeps
/// it out of reach of code outside this module.
#[doc(hidden)]
pub struct Accepted(());

/// Verdict for a value of the type-erasing wrapper `W`.
#[doc(hidden)]
pub struct TypeErased<W>(PhantomData<fn() -> W>);

#[doc(hidden)]
pub trait ProbeConcrete {
    #[inline(always)]
    fn classify(&self) -> Accepted {
        Accepted(())
    }
}

impl<T> ProbeConcrete for Probe<T> {}

/// Implemented on `&Probe<_>` so that method resolution prefers it over [`ProbeConcrete`].
#[doc(hidden)]
pub trait ProbeErased {
    type Wrapper;

    #[inline(always)]
    fn classify(&self) -> TypeErased<Self::Wrapper> {
        TypeErased(PhantomData)
    }
}

impl<T: ?Sized> ProbeErased for &Probe<Box<T>> {
    type Wrapper = Box<T>;
}

impl<'a, T: ?Sized> ProbeErased for &Probe<&'a T> {
    type Wrapper = &'a T;
}

impl<'a, T: ?Sized> ProbeErased for &Probe<&'a mut T> {
    type Wrapper = &'a mut T;
}

/// A closure that passed the erasure check of [`static_fn!`](crate::static_fn).
///
/// There is no public constructor: handing a wrapped `Box<dyn FnMut>` to
/// [`adapt`](crate::adapt) directly does not compile.
///
/// ```compile_fail
/// use static_closure_ffi::{
///     adapt, cc,
///     erasure::{Accepted, Admissible},
/// };
///
/// let erased: Box<dyn FnMut() -> u32 + Send> = Box::new(|| 1);
/// let bare = adapt(cc::C, Admissible::admit(Accepted(()), erased));
/// ```
#[derive(Debug)]
pub struct Concrete<F>(F);

impl<F> Concrete<F> {
    #[inline(always)]
    pub(crate) fn into_inner(self) -> F {
        self.0
    }
}

/// Implemented by verdicts that allow adaptation.
#[doc(hidden)]
#[diagnostic::on_unimplemented(
    message = "cannot adapt a type-erased callable into a static function: `{Self}`",
    label = "type-erased callables are rejected",
    note = "every callable stored behind the same wrapper type would share a single binding; \
            pass the closure itself by value instead"
)]
pub trait Admissible {
    fn admit<F>(self, closure: F) -> Concrete<F>;
}

impl Admissible for Accepted {
    #[inline(always)]
    fn admit<F>(self, closure: F) -> Concrete<F> {
        Concrete(closure)
    }
}
