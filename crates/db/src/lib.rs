//! JuaHustle data source layer.
//!
//! - [`models`]: jobs, applications and directory users plus their
//!   create / update DTOs.
//! - [`DataSource`]: the async port every view talks to.
//! - [`InMemoryDataSource`]: seeded stub with per-operation latency and
//!   failure injection, used by the default configuration and by tests.
//! - [`HttpDataSource`]: `reqwest` client for a REST backend exposing the
//!   same operations.

pub mod http;
pub mod memory;
pub mod models;
pub mod seed;
pub mod source;

pub use http::HttpDataSource;
pub use memory::{InMemoryDataSource, LatencyProfile, Operation};
pub use source::{DataSource, DataSourceError, DataSourceResult};
