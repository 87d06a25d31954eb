//! Per-type binding: the storage slot holding the latest closure of a type, and the trampoline
//! reading it.

use core::{any::type_name, mem};

use crate::{
    cc::CallingConvention,
    erasure::Concrete,
    registry,
    sync::Mutex,
    traits::{FnPtr, StaticThunk},
};

/// Storage slot and trampoline address for one closure type.
pub(crate) struct Binding<F> {
    storage: Mutex<F>,
    trampoline: usize,
}

impl<F> Binding<F> {
    pub(crate) fn new(closure: F, trampoline: *const ()) -> Self {
        Self {
            storage: Mutex::new(closure),
            trampoline: trampoline as usize,
        }
    }

    /// Replaces the stored closure, dropping the previous one once the slot is unlocked.
    pub(crate) fn store(&self, closure: F) {
        let previous = mem::replace(&mut *self.storage.lock(), closure);
        drop(previous);
    }

    pub(crate) fn trampoline(&self) -> *const () {
        self.trampoline as *const ()
    }

    /// Runs `call` with exclusive access to the stored closure.
    pub(crate) fn with<R>(&self, call: impl FnOnce(&mut F) -> R) -> R {
        let mut storage = self.storage.lock();
        call(&mut *storage)
    }
}

/// Moves `closure` into the binding of its type and returns the binding's trampoline.
pub(crate) fn bind_and_store<CC, F, Args>(closure: F) -> F::Bare
where
    CC: CallingConvention,
    F: StaticThunk<CC, Args>,
{
    let trampoline = <F as StaticThunk<CC, Args>>::TRAMPOLINE.to_ptr();
    let binding = registry::bind::<CC, F>(closure, trampoline);

    // SAFETY: the binding was created from `F::TRAMPOLINE` of this same `(CC, F)` pair, whose
    // bare function type is fixed by `F`'s call signature up to lifetimes
    unsafe { <F::Bare as FnPtr>::from_ptr(binding.trampoline()) }
}

/// Body of every trampoline: forwards to the closure currently stored for `(CC, F)`.
#[inline]
pub(crate) fn invoke<CC, F, R>(call: impl FnOnce(&mut F) -> R) -> R
where
    CC: 'static,
    F: Send + 'static,
{
    match registry::lookup::<CC, F>() {
        Some(binding) => binding.with(call),
        None => unbound::<F>(),
    }
}

#[cold]
#[inline(never)]
fn unbound<F>() -> ! {
    panic!(
        "trampoline of `{}` called before any closure of that type was adapted",
        type_name::<F>()
    )
}

/// Adapts a closure that passed the erasure check into a bare function pointer with the `cconv`
/// calling convention and the closure's own signature.
///
/// This is the function behind [`static_fn!`](crate::static_fn), the only source of
/// [`Concrete`] values. Storage for `F` is created on the first call and overwritten on every
/// later call; the returned pointer is the same for every closure of type `F`.
#[inline]
pub fn adapt<CC, F, Args>(cconv: CC, closure: Concrete<F>) -> F::Bare
where
    CC: CallingConvention,
    F: StaticThunk<CC, Args>,
{
    let _ = cconv;
    bind_and_store::<CC, F, Args>(closure.into_inner())
}
