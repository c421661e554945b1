//! Codec phases: decode (block graph → steps) and encode (steps → block
//! graph). Both are pure transforms over the `GraphAdapter` interface and
//! retain no state between calls.

pub mod decode;
pub mod encode;

pub use decode::decode;
pub use encode::encode;

/// Maximum accepted `Repeat` nesting depth, in either direction. Both
/// phases recurse per nesting level, so the bound keeps untrusted input
/// from exhausting the call stack.
pub const MAX_NESTING_DEPTH: usize = 64;
