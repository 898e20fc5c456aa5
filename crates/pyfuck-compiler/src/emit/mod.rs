//! Code emission and serialization.
//!
//! - `EmissionContext` turns operators into instruction templates and owns the
//!   constant and name pools
//! - `ContainerWriter` marshals a finished context into a module image

mod container;
mod context;
mod pool;

#[cfg(test)]
mod context_tests;

pub use container::ContainerWriter;
pub use context::EmissionContext;
pub use pool::{ConstantPool, NamePool};
