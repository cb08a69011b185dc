//! Builder abstraction and implementations.

pub mod base;
pub mod cargo;
pub mod mock;

pub use base::{BuildError, BuildLine, BuildStream, Builder};
pub use cargo::CargoBuilder;
pub use mock::MockBuilder;
