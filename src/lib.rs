pub mod codec;
pub mod error;
pub mod graph;
pub mod step;
pub mod wasm;
