//! Compiled policy loaders.

pub mod opa;

pub use opa::{OpaWasmLoader, OpaWasmPolicy};
