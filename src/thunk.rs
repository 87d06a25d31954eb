//! Per-arity trait impls: the trampoline template for each closure type, the [`FnPtr`] impls of
//! the matching bare function types, and their rejection by the erasure probe.
//!
//! [`FnPtr`]: crate::traits::FnPtr

macro_rules! thunk_impl {
    ($cconv:ty, $cconv_lit:literal, ($($args:ident: $tys:ident,)*)) => {
        unsafe impl<F, R, $($tys),*> $crate::traits::StaticThunk<$cconv, ($($tys,)*)> for F
        where
            F: FnMut($($tys),*) -> R + Send + 'static,
        {
            type Ret = R;
            type Bare = extern $cconv_lit fn($($tys),*) -> R;

            const TRAMPOLINE: Self::Bare = {
                extern $cconv_lit fn trampoline<F, R, $($tys),*>($($args: $tys),*) -> R
                where
                    F: FnMut($($tys),*) -> R + Send + 'static,
                {
                    $crate::binding::invoke::<$cconv, F, R>(move |closure| closure($($args),*))
                }
                trampoline::<F, R, $($tys),*>
            };
        }

        $crate::thunk::fn_ptr_impl!($cconv, extern $cconv_lit fn($($tys),*) -> R, ($($args: $tys,)*));
        $crate::thunk::fn_ptr_impl!(
            $cconv,
            unsafe extern $cconv_lit fn($($tys),*) -> R,
            ($($args: $tys,)*)
        );
    };
}

macro_rules! fn_ptr_impl {
    ($cconv:ty, $fn_ty:ty, ($($args:ident: $tys:ident,)*)) => {
        impl<R, $($tys),*> $crate::traits::FnPtr for $fn_ty {
            type CC = $cconv;
            type Args = ($($tys,)*);
            type Ret = R;

            #[inline(always)]
            #[allow(unused_unsafe)]
            unsafe fn call(self, ($($args,)*): Self::Args) -> R {
                unsafe { (self)($($args),*) }
            }

            #[inline(always)]
            fn to_ptr(self) -> *const () {
                self as *const ()
            }

            #[inline(always)]
            unsafe fn from_ptr(ptr: *const ()) -> Self {
                // SAFETY: function pointers are the size of a data pointer on every supported
                // target, and the caller guarantees `ptr` came from this type
                unsafe { ::core::mem::transmute_copy(&ptr) }
            }
        }

        impl<R, $($tys),*> $crate::erasure::ProbeErased
            for &$crate::erasure::Probe<$fn_ty>
        {
            type Wrapper = $fn_ty;
        }
    };
}

macro_rules! cc_thunk_impl {
    ($cconv:ty, $cconv_lit:literal) => {
        // Support closures of up to 12 arguments, like most traits on tuples
        ::seq_macro::seq!(M in 0..=12 {
            #(
                ::seq_macro::seq!(N in 0..M {
                    $crate::thunk::thunk_impl!($cconv, $cconv_lit, (#(a~N: T~N,)*));
                });
            )*
        });
    };
}

pub(crate) use cc_thunk_impl;
pub(crate) use fn_ptr_impl;
pub(crate) use thunk_impl;
