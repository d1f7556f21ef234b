//! Allocator-stomp probe entry point.
//!
//! Takes no input and ignores any arguments. Exit code 0 means the
//! allocator survived; a signal death is the bug signal.

fn main() {
    wideprobe_trigger::stomp::run();
}
