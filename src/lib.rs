//! Delve library exports for testing

pub mod core;
pub mod provider;
pub mod render;
pub mod repl;

#[cfg(test)]
pub mod test_support;
