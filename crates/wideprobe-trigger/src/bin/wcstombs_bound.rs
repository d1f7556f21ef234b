//! Conversion-bound probe entry point.
//!
//! Reads 8 bytes from stdin, writes 16 bytes to stdout, ignores any
//! arguments, and always exits 0.

fn main() {
    wideprobe_trigger::bound::run();
}
