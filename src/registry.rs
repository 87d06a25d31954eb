//! The process-wide table of bindings, keyed by the [`TypeId`] of `(CC, F)`.
//!
//! Rows are created lazily on the first adaptation of a closure type, overwritten in place by
//! later adaptations of the same type, and never removed. Binding memory is leaked so that
//! trampolines can hold `'static` references to it.
//!
//! The inspection functions make the aliasing law observable: two closures of one type map to a
//! single row, whatever their captured values.

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, collections::BTreeMap};
use core::any::{type_name, Any, TypeId};
#[cfg(feature = "std")]
use std::collections::BTreeMap;

use log::{debug, trace};

use crate::{binding::Binding, cc::CallingConvention, sync::RwLock};

type Entry = &'static (dyn Any + Send + Sync);

static BINDINGS: RwLock<BTreeMap<TypeId, Entry>> = RwLock::new(BTreeMap::new());

#[inline(always)]
fn key<CC: 'static, F: 'static>() -> TypeId {
    TypeId::of::<(CC, F)>()
}

fn downcast<F: Send + 'static>(entry: Entry) -> &'static Binding<F> {
    match entry.downcast_ref() {
        Some(binding) => binding,
        // Rows are only ever inserted by `bind` with a matching key
        None => unreachable!("binding for `{}` stored under a foreign key", type_name::<F>()),
    }
}

/// Returns the binding of `F` under the `CC` calling convention, if any.
pub(crate) fn lookup<CC: 'static, F: Send + 'static>() -> Option<&'static Binding<F>> {
    let entry = *BINDINGS.read().get(&key::<CC, F>())?;
    Some(downcast(entry))
}

/// Stores `closure` in the binding of `F` under `CC`, creating the binding with `trampoline` as
/// its entry point if this is the first closure of that type.
///
/// Every binding keeps the trampoline address it was created with.
pub(crate) fn bind<CC: CallingConvention, F: Send + 'static>(
    closure: F,
    trampoline: *const (),
) -> &'static Binding<F> {
    let existing = match lookup::<CC, F>() {
        Some(binding) => binding,
        None => {
            let mut bindings = BINDINGS.write();
            // Another thread may have bound `F` between the two lock acquisitions
            match bindings.get(&key::<CC, F>()) {
                Some(&entry) => downcast(entry),
                None => {
                    let binding: &'static Binding<F> =
                        Box::leak(Box::new(Binding::new(closure, trampoline)));
                    bindings.insert(key::<CC, F>(), binding);
                    debug!(
                        "created static binding for `{}` with the \"{}\" ABI ({} bindings)",
                        type_name::<F>(),
                        CC::ABI,
                        bindings.len()
                    );
                    return binding;
                }
            }
        }
    };

    existing.store(closure);
    trace!("replaced stored closure of `{}`", type_name::<F>());
    existing
}

/// Number of bindings created so far in this process.
///
/// Never decreases.
pub fn len() -> usize {
    BINDINGS.read().len()
}

/// Whether a closure of type `F` has been adapted with the `CC` calling convention.
pub fn is_bound<CC: 'static, F: 'static>() -> bool {
    BINDINGS.read().contains_key(&key::<CC, F>())
}

/// Same as [`is_bound`], inferring `CC` and `F` from values since closure types cannot be named.
///
/// ```
/// use static_closure_ffi::{cc, registry, static_fn};
///
/// fn adder(offset: u32) -> impl FnMut(u32) -> u32 + Send + 'static {
///     move |x| x + offset
/// }
///
/// let unused = adder(0);
/// assert!(!registry::is_bound_like(cc::C, &unused));
///
/// let bare = static_fn!(adder(7));
/// assert_eq!(bare(1), 8);
/// assert!(registry::is_bound_like(cc::C, &unused));
/// ```
pub fn is_bound_like<CC: 'static, F: 'static>(_cconv: CC, _closure: &F) -> bool {
    is_bound::<CC, F>()
}
