//! CLI subcommand implementations.

pub mod enter;
pub mod resolve;
pub mod send;
pub mod show;
pub mod submit;
pub mod util;

#[cfg(test)]
mod test_support;
