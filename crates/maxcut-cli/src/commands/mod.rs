//! CLI command implementations.

pub mod common;
pub mod cut;
pub mod random;
pub mod run;
pub mod version;
