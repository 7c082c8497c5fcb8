//! CLI command implementations

pub mod build;
pub mod test;

pub use build::BuildCommand;
pub use test::TestCommand;
