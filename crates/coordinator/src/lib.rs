//! Dispatch Coordinator
//!
//! This crate routes fully-described execution requests to the backend
//! executor registered for their category, after resolving which physical
//! host should receive them. Endpoint selection internals and the wire
//! transport stay behind the `HostSelector` and `ExecutorManager` traits.

pub mod config;
pub mod dispatcher;
pub mod host_selector;
pub mod metrics;
pub mod registry;
pub mod traits;


pub use self::config::{ConfigError, ConfigResult, ConfigValidator, DispatchConfig};
pub use self::dispatcher::{BatchDispatchFailure, BatchDispatchResult, ExecutorDispatcher};
pub use self::host_selector::{RandomHostSelector, RoundRobinHostSelector, WorkerHostPool};
pub use self::metrics::DispatchMetrics;
pub use self::registry::ExecutorRegistry;
pub use self::traits::{ExecutorManager, HostSelector};

// Re-export the shared vocabulary so embedders need only this crate
pub use dispatch_domain::{
    BoundExecutionContext, ExecutionContext, ExecutorCategory, Host, DEFAULT_WORKER_GROUP,
};
pub use dispatch_errors::{DispatchError, DispatchResult, ExecutorError, ExecutorResult};
