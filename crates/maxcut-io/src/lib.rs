//! `maxcut-io` — the outside world of a QAOA Max-Cut run.
//!
//! - [`config`]: YAML run configuration with `MAXCUT_*` environment overrides
//! - [`source`]: the [`GraphSource`] contract and an Erdős–Rényi generator
//! - [`persist`]: JSON probability distributions

pub mod config;
pub mod error;
pub mod persist;
pub mod source;

pub use config::{Config, EdgeList, GraphSection};
pub use error::{ConfigError, ConfigResult};
pub use persist::{DistributionRecord, read_distribution, write_distribution};
pub use source::{GraphSource, RandomGraph};
