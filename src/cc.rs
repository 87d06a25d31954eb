//! Calling convention markers selecting the ABI of generated trampolines.
//!
//! Pass one of these to [`static_fn!`](crate::static_fn) or [`adapt`](crate::adapt). A marker
//! also keys its own set of bindings: one closure type adapted under two conventions owns two
//! independent storage slots.
//!
//! ```
//! use static_closure_ffi::cc::{self, CallingConvention};
//!
//! assert_eq!(cc::C::ABI, "C");
//! assert_eq!(<cc::System as CallingConvention>::ABI, "system");
//! ```

/// A calling convention that trampolines can be generated for.
pub trait CallingConvention: Copy + Default + Send + Sync + 'static {
    /// The ABI string as written after `extern` in a function type.
    const ABI: &'static str;
}

macro_rules! calling_conventions {
    ($($(#[cfg($cfg:meta)])? $marker:ident => $abi:literal,)*) => {
        $(
            #[doc = concat!("Selects `extern \"", $abi, "\"` trampolines.")]
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
            $(#[cfg(any($cfg, doc))])?
            pub struct $marker;

            $(#[cfg(any($cfg, doc))])?
            impl CallingConvention for $marker {
                const ABI: &'static str = $abi;
            }

            $(#[cfg($cfg)])?
            $crate::thunk::cc_thunk_impl!($marker, $abi);
        )*
    };
}

calling_conventions! {
    C => "C",
    System => "system",
    Rust => "Rust",
    #[cfg(all(not(windows), target_arch = "x86_64"))]
    Sysv64 => "sysv64",
    #[cfg(target_arch = "arm")]
    Aapcs => "aapcs",
    #[cfg(all(windows, any(target_arch = "x86_64", target_arch = "x86")))]
    Fastcall => "fastcall",
    #[cfg(all(windows, any(target_arch = "x86_64", target_arch = "x86")))]
    Stdcall => "stdcall",
    #[cfg(all(windows, any(target_arch = "x86_64", target_arch = "x86")))]
    Cdecl => "cdecl",
    #[cfg(all(windows, target_arch = "x86"))]
    Thiscall => "thiscall",
    #[cfg(all(windows, target_arch = "x86_64"))]
    Win64 => "win64",
}
