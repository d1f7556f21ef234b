//! Allocator-stomp trigger: `fputws` to a closed stderr stream.
//!
//! Sequence: close fd 2, write a 4096-character wide string to the
//! now-invalid `stderr` stream (expected to fail or no-op, never crash),
//! then alternate 16-character marker writes with `free(malloc(1))` for
//! 1024 iterations. On a healthy libc the process exits 0 with no output.
//! If the long write stomped allocator bookkeeping, one of the
//! malloc/free pairs dies with a signal; that crash is the observable
//! under test, so no return value here is checked.

use wideprobe_core::wide::{self, STOMP_FILL_CHAR, STOMP_FILL_LEN, STOMP_ITERATIONS};

unsafe extern "C" {
    // glibc exports the stdio stream globals and fputws; the libc crate
    // binds neither.
    #[allow(non_upper_case_globals)]
    static mut stderr: *mut libc::FILE;
    fn fputws(ws: *const libc::wchar_t, stream: *mut libc::FILE) -> libc::c_int;
}

/// Runs the stomp sequence. Does not return an error: a corrupted
/// allocator terminates the process with a signal instead.
pub fn run() {
    let long: Vec<libc::wchar_t> = wide::terminated_fill(STOMP_FILL_LEN, STOMP_FILL_CHAR)
        .into_iter()
        .map(|c| c as libc::wchar_t)
        .collect();
    let marker: Vec<libc::wchar_t> = wide::marker_string()
        .iter()
        .map(|&c| c as libc::wchar_t)
        .collect();

    // SAFETY: both buffers are NUL-terminated and outlive every fputws
    // call; `stderr` is the glibc stream global, valid (as a stream object)
    // even after its fd is closed. The calls after close(2) are the
    // deliberately-unsafe operations this trigger exists to perform.
    unsafe {
        libc::close(libc::STDERR_FILENO);

        let _ = fputws(long.as_ptr(), stderr);

        for _ in 0..STOMP_ITERATIONS {
            let _ = fputws(marker.as_ptr(), stderr);
            // malloc must not crash here. It will if the writes above
            // stomped the allocator's internal state.
            libc::free(libc::malloc(1));
        }
    }
}
