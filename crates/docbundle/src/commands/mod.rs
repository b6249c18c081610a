//! CLI command implementations.

mod build;
mod input;
mod outline;

pub(crate) use build::BuildArgs;
pub(crate) use outline::OutlineArgs;
