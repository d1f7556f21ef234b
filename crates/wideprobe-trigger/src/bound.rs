//! Conversion destination-bound trigger: unvalidated `wcstombs`.
//!
//! Sequence: set `LC_CTYPE` to `en_US.UTF-8`, read 8 raw bytes from stdin
//! into a zeroed 16-byte buffer, reinterpret that buffer as `wchar_t`
//! without revalidating the encoding, convert into a separate zeroed
//! 16-byte buffer with bound 16, and write all 16 destination bytes to
//! stdout. The conversion result is never inspected: whatever the
//! converter left behind (including overflowed or untouched bytes) is the
//! observable under test.
//!
//! If `en_US.UTF-8` is not installed, `setlocale` fails and the conversion
//! runs under the previous locale; the output is then
//! implementation-defined. The failure is not detected or substituted, to
//! match the reproducer exactly.

use std::ffi::CStr;

use wideprobe_core::wide::{CONV_BUF_LEN, CONV_INPUT_BYTES};

/// Locale requested before the conversion.
pub const PROBE_LOCALE: &CStr = c"en_US.UTF-8";

/// Runs the conversion sequence. Always exits normally; short reads and
/// encoding errors are passed through, not handled.
pub fn run() {
    let mut input = [0u8; CONV_BUF_LEN];
    let mut output = [0u8; CONV_BUF_LEN];

    // SAFETY: every pointer/length pair matches a live fixed-size local
    // buffer. The wchar_t reinterpretation of `input` is intentionally
    // unchecked; probing the converter with raw code units is the point.
    unsafe {
        libc::setlocale(libc::LC_CTYPE, PROBE_LOCALE.as_ptr());

        let _ = libc::read(libc::STDIN_FILENO, input.as_mut_ptr().cast(), CONV_INPUT_BYTES);

        let _ = libc::wcstombs(
            output.as_mut_ptr().cast(),
            input.as_ptr().cast::<libc::wchar_t>(),
            CONV_BUF_LEN,
        );

        let _ = libc::write(libc::STDOUT_FILENO, output.as_ptr().cast(), CONV_BUF_LEN);
    }
}
