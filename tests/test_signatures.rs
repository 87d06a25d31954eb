#![allow(improper_ctypes_definitions)]

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use static_closure_ffi::{
    cc::{self, CallingConvention},
    static_fn,
    traits::FnPtr,
};

#[test]
fn test_basic_signature() {
    let bare: extern "C" fn(u8, u8) -> i32 = static_fn!(|x: u8, y: u8| x as i32 + y as i32);

    assert_eq!(bare(40, 2), 42);
    assert_eq!(bare(255, 255), 510);
}

#[test]
fn test_no_args() {
    let called = Arc::new(AtomicBool::new(false));
    let flag = called.clone();

    let bare = static_fn!(move || flag.store(true, Ordering::SeqCst));
    bare();
    assert!(called.load(Ordering::SeqCst));
}

#[test]
fn test_value_args() {
    let bare = static_fn!(cc::Rust, |x: i32, y: String| format!("{y}{x}"));

    assert_eq!(bare(10, "test".to_owned()), "test10");
}

#[test]
fn test_mut_ref_arg() {
    let bare = static_fn!(|x: &mut i32| {
        let old = *x;
        *x = 100;
        old
    });

    let mut x = 20;
    assert_eq!(bare(&mut x), 20);
    assert_eq!(x, 100);
}

#[test]
fn test_shared_ref_args() {
    let bare = static_fn!(|x: &i32, y: &str| *x + y.len() as i32);

    let x = 20;
    assert_eq!(bare(&x, "test"), 24);
}

#[test]
fn test_out_param() {
    let bare = static_fn!(|result: *mut bool| unsafe { *result = true });

    let mut result = false;
    bare(&mut result);
    assert!(result);
}

#[test]
fn test_fn_ptr_call() {
    let bare = static_fn!(|x: u64, y: u64| x * y);

    assert_eq!(unsafe { bare.call((6, 7)) }, 42);
    assert_eq!(bare.to_ptr(), bare as *const ());

    let rebuilt = unsafe { <extern "C" fn(u64, u64) -> u64 as FnPtr>::from_ptr(bare.to_ptr()) };
    assert_eq!(rebuilt(3, 3), 9);
}

#[test]
fn test_calling_conventions() {
    let system: extern "system" fn(u32) -> u32 = static_fn!(cc::System, |n: u32| 2 * n);
    assert_eq!(system(21), 42);

    let rust: fn(u32) -> u32 = static_fn!(cc::Rust, |n: u32| 3 * n);
    assert_eq!(rust(5), 15);

    #[cfg(all(not(windows), target_arch = "x86_64"))]
    {
        let sysv: extern "sysv64" fn(u32) -> u32 = static_fn!(cc::Sysv64, |n: u32| n + 1);
        assert_eq!(sysv(41), 42);
    }

    #[cfg(all(windows, target_arch = "x86_64"))]
    {
        let win: extern "win64" fn(u32) -> u32 = static_fn!(cc::Win64, |n: u32| n + 1);
        assert_eq!(win(41), 42);
    }
}

#[test]
fn test_calling_convention_abi() {
    assert_eq!(cc::C::ABI, "C");
    assert_eq!(cc::System::ABI, "system");
    assert_eq!(cc::Rust::ABI, "Rust");

    #[cfg(all(not(windows), target_arch = "x86_64"))]
    assert_eq!(cc::Sysv64::ABI, "sysv64");

    #[cfg(all(windows, target_arch = "x86_64"))]
    assert_eq!(cc::Win64::ABI, "win64");
}

#[test]
fn test_max_arity() {
    let bare = static_fn!(
        |a: u8, b: u8, c: u8, d: u8, e: u8, f: u8, g: u8, h: u8, i: u8, j: u8, k: u8, l: u8| {
            [a, b, c, d, e, f, g, h, i, j, k, l]
                .iter()
                .map(|&n| n as u32)
                .sum::<u32>()
        }
    );

    assert_eq!(bare(1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12), 78);
}

#[test]
fn test_printing_closure() {
    let prefix = String::from("value");
    let bare = static_fn!(move |n: usize| {
        println!("{prefix}: {n:08x}");
        3 * n
    });

    assert_eq!(bare(5), 15);
}
