use static_closure_ffi::{cc, static_fn};

#[cfg(feature = "std")]
#[test]
fn test_recovers_after_panic() {
    let mut calls = 0;
    let bare = static_fn!(cc::Rust, move |explode: bool| {
        calls += 1;
        if explode {
            panic!("closure panicked on call {calls}");
        }
        calls
    });

    assert!(std::panic::catch_unwind(|| bare(true)).is_err());
    assert_eq!(bare(false), 2);
}

/// Set in the environment of the child process that performs the panicking call.
#[cfg(unix)]
const ABORT_CHILD_VAR: &str = "STATIC_CLOSURE_FFI_ABORT_CHILD";

#[cfg(unix)]
#[test]
fn test_c_trampoline_panic_aborts() {
    use std::{env, os::unix::process::ExitStatusExt, process::Command};

    if env::var_os(ABORT_CHILD_VAR).is_some() {
        let bare = static_fn!(|explode: bool| {
            if explode {
                panic!("closure panicked behind an extern \"C\" trampoline");
            }
        });
        bare(true);
        unreachable!("the panic must not unwind out of the trampoline");
    }

    let output = Command::new(env::current_exe().unwrap())
        .args(["--exact", "test_c_trampoline_panic_aborts", "--test-threads=1"])
        .env(ABORT_CHILD_VAR, "1")
        .output()
        .unwrap();

    // SIGABRT
    assert_eq!(output.status.signal(), Some(6), "child exited with {}", output.status);
}
