//! Types and helpers shared by the renderers.

pub mod types;
pub mod typescript;

pub use types::{GeneratedCode, GeneratedFile};
