//! Mock implementations for the coordinator traits
//!
//! This module provides in-memory mock implementations that can be used
//! for unit and integration testing without requiring live worker nodes
//! or a real transport layer.

use async_trait::async_trait;
use dispatch_coordinator::{ExecutorManager, HostSelector};
use dispatch_domain::{BoundExecutionContext, ExecutionContext, Host};
use dispatch_errors::{ExecutorError, ExecutorResult};
use std::sync::{Arc, Mutex};

/// A single recorded hook call, tagged with the address the hook observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookInvocation {
    Before { address: String },
    Execute { address: String },
    After { address: String },
}

impl HookInvocation {
    /// Short name of the hook, handy for asserting call order.
    pub fn hook(&self) -> &'static str {
        match self {
            HookInvocation::Before { .. } => "before",
            HookInvocation::Execute { .. } => "execute",
            HookInvocation::After { .. } => "after",
        }
    }

    /// The bound address the hook was called with.
    pub fn address(&self) -> &str {
        match self {
            HookInvocation::Before { address }
            | HookInvocation::Execute { address }
            | HookInvocation::After { address } => address,
        }
    }
}

/// Mock implementation of ExecutorManager for testing
///
/// Records every hook invocation in call order and can be configured to
/// fail individual hooks with a given message.
#[derive(Debug, Clone)]
pub struct MockExecutorManager {
    name: String,
    invocations: Arc<Mutex<Vec<HookInvocation>>>,
    before_failure: Arc<Mutex<Option<String>>>,
    execute_failure: Arc<Mutex<Option<String>>>,
    after_failure: Arc<Mutex<Option<String>>>,
}

impl MockExecutorManager {
    pub fn new() -> Self {
        Self::with_name("mock-executor")
    }

    pub fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            invocations: Arc::new(Mutex::new(Vec::new())),
            before_failure: Arc::new(Mutex::new(None)),
            execute_failure: Arc::new(Mutex::new(None)),
            after_failure: Arc::new(Mutex::new(None)),
        }
    }

    /// Make `before_execute` fail with an internal error carrying `message`.
    pub fn fail_before_execute(&self, message: &str) {
        *self.before_failure.lock().unwrap() = Some(message.to_string());
    }

    /// Make `execute` fail with a transport error carrying `message`.
    pub fn fail_execute(&self, message: &str) {
        *self.execute_failure.lock().unwrap() = Some(message.to_string());
    }

    /// Make `after_execute` fail with an internal error carrying `message`.
    pub fn fail_after_execute(&self, message: &str) {
        *self.after_failure.lock().unwrap() = Some(message.to_string());
    }

    /// All recorded hook calls in the order they happened.
    pub fn invocations(&self) -> Vec<HookInvocation> {
        self.invocations.lock().unwrap().clone()
    }

    /// The hook names in call order, e.g. `["before", "execute", "after"]`.
    pub fn hook_sequence(&self) -> Vec<&'static str> {
        self.invocations
            .lock()
            .unwrap()
            .iter()
            .map(|invocation| invocation.hook())
            .collect()
    }

    pub fn invocation_count(&self) -> usize {
        self.invocations.lock().unwrap().len()
    }

    /// How many times `after_execute` ran.
    pub fn after_execute_count(&self) -> usize {
        self.invocations
            .lock()
            .unwrap()
            .iter()
            .filter(|invocation| matches!(invocation, HookInvocation::After { .. }))
            .count()
    }

    pub fn clear(&self) {
        self.invocations.lock().unwrap().clear();
        *self.before_failure.lock().unwrap() = None;
        *self.execute_failure.lock().unwrap() = None;
        *self.after_failure.lock().unwrap() = None;
    }

    fn record(&self, invocation: HookInvocation) {
        self.invocations.lock().unwrap().push(invocation);
    }
}

impl Default for MockExecutorManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExecutorManager for MockExecutorManager {
    async fn before_execute(&self, context: &BoundExecutionContext) -> ExecutorResult<()> {
        self.record(HookInvocation::Before {
            address: context.address().to_string(),
        });
        if let Some(message) = self.before_failure.lock().unwrap().clone() {
            return Err(ExecutorError::internal(message));
        }
        Ok(())
    }

    async fn execute(&self, context: &BoundExecutionContext) -> ExecutorResult<()> {
        self.record(HookInvocation::Execute {
            address: context.address().to_string(),
        });
        if let Some(message) = self.execute_failure.lock().unwrap().clone() {
            return Err(ExecutorError::transport(message));
        }
        Ok(())
    }

    async fn after_execute(&self, context: &BoundExecutionContext) -> ExecutorResult<()> {
        self.record(HookInvocation::After {
            address: context.address().to_string(),
        });
        if let Some(message) = self.after_failure.lock().unwrap().clone() {
            return Err(ExecutorError::internal(message));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Mock implementation of HostSelector for testing
///
/// Always answers with the configured host and counts how often it was asked.
#[derive(Debug, Clone)]
pub struct FixedHostSelector {
    host: Arc<Mutex<Host>>,
    select_calls: Arc<Mutex<usize>>,
}

impl FixedHostSelector {
    pub fn new(host: Host) -> Self {
        Self {
            host: Arc::new(Mutex::new(host)),
            select_calls: Arc::new(Mutex::new(0)),
        }
    }

    /// A selector that never finds a node, i.e. always answers `Host::empty()`.
    pub fn empty() -> Self {
        Self::new(Host::empty())
    }

    pub fn set_host(&self, host: Host) {
        *self.host.lock().unwrap() = host;
    }

    /// How many times `select` was invoked.
    pub fn select_count(&self) -> usize {
        *self.select_calls.lock().unwrap()
    }
}

#[async_trait]
impl HostSelector for FixedHostSelector {
    async fn select(&self, _context: &ExecutionContext) -> Host {
        *self.select_calls.lock().unwrap() += 1;
        self.host.lock().unwrap().clone()
    }

    fn name(&self) -> &str {
        "Fixed"
    }
}
