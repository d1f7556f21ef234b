//! Wide-character buffer helpers and probe buffer constants.
//!
//! Wide strings are modeled as `u32` code-unit slices, NUL-terminated with
//! `0u32` (`wchar_t` is 4 bytes on linux-gnu). The trigger crate casts to
//! `libc::wchar_t` at the FFI boundary only.

/// Size of one wide character in bytes on the supported platform.
pub const WCHAR_BYTES: usize = 4;

/// Length (in wide chars, excluding NUL) of the long fill string the stomp
/// trigger writes to the closed stderr stream.
pub const STOMP_FILL_LEN: usize = 4096;

/// Fill character for the long stomp string.
pub const STOMP_FILL_CHAR: u32 = 'x' as u32;

/// Number of marker-write + malloc/free iterations in the stomp loop.
pub const STOMP_ITERATIONS: usize = 1024;

/// Bytes read from stdin by the conversion-bound trigger.
pub const CONV_INPUT_BYTES: usize = 8;

/// Capacity (bytes) of both the staged input buffer and the conversion
/// destination buffer in the conversion-bound trigger.
pub const CONV_BUF_LEN: usize = 16;

/// Returns the length of a NUL-terminated wide string (not counting the NUL).
///
/// Scans `s` for the first `0u32` element; if no NUL is found, returns the
/// full slice length.
pub fn wide_len(s: &[u32]) -> usize {
    s.iter().position(|&c| c == 0).unwrap_or(s.len())
}

/// Builds a heap buffer of `len` copies of `ch` followed by a NUL element.
///
/// This is the wide analogue of `calloc` + fill used to construct the stomp
/// trigger's 4096-character payload.
pub fn terminated_fill(len: usize, ch: u32) -> Vec<u32> {
    let mut buf = vec![0u32; len + 1];
    buf[..len].fill(ch);
    buf
}

/// Returns the 16-character marker string `0123456789ABCDEF`, NUL-terminated.
pub fn marker_string() -> [u32; 17] {
    let mut m = [0u32; 17];
    for (i, &b) in b"0123456789ABCDEF".iter().enumerate() {
        m[i] = u32::from(b);
    }
    m
}

/// Reinterprets a raw byte buffer as wide code units in native endianness.
///
/// No encoding validation is performed; this mirrors the trigger's unchecked
/// `wchar_t` cast so the safe model sees the same code units glibc does.
///
/// # Panics
///
/// Panics if `bytes` is not a multiple of [`WCHAR_BYTES`]; probe buffers are
/// sized as whole code units by construction.
pub fn bytes_as_wide(bytes: &[u8]) -> Vec<u32> {
    assert!(
        bytes.len() % WCHAR_BYTES == 0,
        "bytes_as_wide: {} bytes is not a whole number of wide chars",
        bytes.len()
    );
    bytes
        .chunks_exact(WCHAR_BYTES)
        .map(|chunk| u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}
