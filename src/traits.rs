//! Signature extraction: the traits relating a closure type to the bare function pointer that can
//! stand in for it.

/// Trait implemented by safe and unsafe function pointer types of up to 12 arguments, for every
/// calling convention in [`cc`](crate::cc).
///
/// Allows introspection of the function's calling convention, arguments, return type, and provides
/// a `call` method for invoking the function with its arguments packed in a tuple.
///
/// # Limitations
/// The trait is not implemented for higher-kinded (i.e. `for<'a> fn(&'a T)`) bare functions. The
/// pointers returned by [`static_fn!`](crate::static_fn) are never higher-kinded: any lifetime in
/// their arguments is inferred at the call site.
pub trait FnPtr: Clone + Copy {
    /// Calling convention of the bare function, as a ZST marker type.
    type CC: Default;

    /// The arguments of the function, as a tuple.
    type Args;

    /// The return type of the function.
    type Ret;

    /// Calls self.
    ///
    /// # Safety
    /// The same function-specific safety invariants must be upheld as when calling it directly.
    unsafe fn call(self, args: Self::Args) -> Self::Ret;

    /// Erases the function pointer into an untyped code address.
    fn to_ptr(self) -> *const ();

    /// Rebuilds the function pointer from an address obtained through [`FnPtr::to_ptr`].
    ///
    /// # Safety
    /// `ptr` must have been produced by [`FnPtr::to_ptr`] on a function pointer of this exact type,
    /// up to lifetimes.
    unsafe fn from_ptr(ptr: *const ()) -> Self;
}

/// Capability of a closure type to back a context-free function pointer with the `CC` calling
/// convention, where `Args` is the tuple of its parameter types.
///
/// Implemented for every `FnMut` closure of up to 12 arguments that is also `Send + 'static`. Both
/// `Fn` and `FnMut` closures qualify; closures that can only be called once do not.
///
/// The argument tuple is a type parameter rather than an associated type so that it can be
/// inferred from the closure's single call signature, the same way `Fn*` bounds work.
///
/// # Safety
/// This trait is internal to the library and is not meant to be implemented by downstream crates.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not have a single call signature that can back a static function pointer",
    label = "call signature cannot be resolved",
    note = "annotate the type of every closure parameter, take at most 12 of them, and make sure \
            the closure can be called more than once (`FnMut`)"
)]
pub unsafe trait StaticThunk<CC, Args>: Sized + Send + 'static {
    /// The closure's result type.
    type Ret;

    /// The bare function pointer type with the closure's signature.
    type Bare: FnPtr<CC = CC, Args = Args, Ret = Self::Ret>;

    /// Trampoline forwarding its arguments to the binding stored for `Self`. Internal to the
    /// library.
    #[doc(hidden)]
    const TRAMPOLINE: Self::Bare;
}
