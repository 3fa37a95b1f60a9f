//! Test data builders for creating dispatch entities
//!
//! This module provides builder patterns for creating test data with
//! sensible defaults and easy customization.

use dispatch_domain::{ExecutionContext, ExecutorCategory};
use uuid::Uuid;

/// Builder for creating test ExecutionContext values
pub struct ExecutionContextBuilder {
    context: ExecutionContext,
}

impl ExecutionContextBuilder {
    pub fn new() -> Self {
        Self {
            context: ExecutionContext::new(ExecutorCategory::Worker, serde_json::json!({})),
        }
    }

    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.context.request_id = request_id;
        self
    }

    pub fn with_category(mut self, category: ExecutorCategory) -> Self {
        self.context.category = category;
        self
    }

    pub fn with_worker_group(mut self, worker_group: &str) -> Self {
        self.context.worker_group = worker_group.to_string();
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.context.payload = payload;
        self
    }

    pub fn build(self) -> ExecutionContext {
        self.context
    }
}

impl Default for ExecutionContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
