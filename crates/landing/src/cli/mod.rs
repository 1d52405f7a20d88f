//! Subcommands of the `landing` binary

pub mod check;
pub mod output;
pub mod plan;
pub mod validate;
