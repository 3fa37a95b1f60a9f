//! # Dispatch Testing Utils
//!
//! Shared test support for the dispatch workspace.
//!
//! ## Features
//!
//! - **Mocks**: in-memory `ExecutorManager` and `HostSelector` doubles that
//!   record every invocation and can be configured to fail on demand
//! - **Builders**: fluent construction of `ExecutionContext` values for tests
//!
//! ## Usage
//!
//! Add to the `dev-dependencies` of the crate under test:
//!
//! ```toml
//! [dev-dependencies]
//! dispatch-testing-utils = { path = "../testing-utils" }
//! ```

pub mod builders;
pub mod mocks;

pub use builders::*;
pub use mocks::*;
