//! Safe reference model of glibc `wcstombs` under a UTF-8 `LC_CTYPE`.
//!
//! The conversion-bound trigger hands glibc an unvalidated `wchar_t` buffer
//! and emits whatever the converter leaves in its destination. This module
//! models what a *correct* converter produces for the same inputs, so the
//! harness can tell "expected output" apart from "leaked bytes".
//!
//! Semantics mirrored from the glibc contract:
//! - conversion stops at the first NUL code unit, which is written to the
//!   destination (if it fits) but not counted in the returned byte total;
//! - a character is written only if it fits entirely within the byte bound;
//! - a code unit that is not a valid Unicode scalar value is an encoding
//!   error (glibc reports EILSEQ).

use thiserror::Error;

use crate::wide::{CONV_BUF_LEN, CONV_INPUT_BYTES, bytes_as_wide};

/// Encoding failure from the conversion model.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// Source contained a code unit that is not a Unicode scalar value.
    #[error("invalid wide character {value:#010x} at index {index}")]
    InvalidWideChar { index: usize, value: u32 },
}

/// Converts the NUL-terminated wide string `src` to UTF-8 in `dest`,
/// writing at most `n` bytes.
///
/// Returns the number of bytes written, excluding the terminating NUL,
/// like C `wcstombs`. If `src` has no NUL terminator the model stops at the
/// slice boundary; glibc would keep reading, which is exactly the behavior
/// the trigger exists to observe.
pub fn wide_to_multibyte(dest: &mut [u8], src: &[u32], n: usize) -> Result<usize, EncodeError> {
    let cap = n.min(dest.len());
    let mut written = 0usize;

    for (index, &unit) in src.iter().enumerate() {
        if unit == 0 {
            if written < cap {
                dest[written] = 0;
            }
            return Ok(written);
        }
        let ch = char::from_u32(unit).ok_or(EncodeError::InvalidWideChar { index, value: unit })?;
        let mut utf8 = [0u8; 4];
        let encoded = ch.encode_utf8(&mut utf8).len();
        if written + encoded > cap {
            return Ok(written);
        }
        dest[written..written + encoded].copy_from_slice(&utf8[..encoded]);
        written += encoded;
    }

    Ok(written)
}

/// Models the full conversion-bound trigger data path for a correct
/// converter: stage up to [`CONV_INPUT_BYTES`] input bytes into a zeroed
/// 16-byte buffer, reinterpret as wide chars, convert with bound
/// [`CONV_BUF_LEN`] into a zeroed destination, and return all 16
/// destination bytes.
pub fn model_conversion_output(input: &[u8]) -> Result<[u8; CONV_BUF_LEN], EncodeError> {
    let mut staged = [0u8; CONV_BUF_LEN];
    let take = input.len().min(CONV_INPUT_BYTES);
    staged[..take].copy_from_slice(&input[..take]);

    let wide = bytes_as_wide(&staged);
    let mut dest = [0u8; CONV_BUF_LEN];
    wide_to_multibyte(&mut dest, &wide, CONV_BUF_LEN)?;
    Ok(dest)
}
