//! Policy engine abstraction
//!
//! The sender only sees [`PolicyEngine`]. [`ArtifactPolicy`] implements it
//! over a compiled artifact and an injectable [`PolicyLoader`]; the
//! WebAssembly loader lives in the infrastructure crate.

mod artifact;
mod traits;


pub use artifact::ArtifactPolicy;
pub use traits::{LoadedPolicy, PolicyEngine, PolicyLoader};
