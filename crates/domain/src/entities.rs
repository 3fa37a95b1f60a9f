use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::{ExecutorCategory, Host};

/// 未指定分组时的默认Worker分组
pub const DEFAULT_WORKER_GROUP: &str = "default";

/// 一次执行请求的完整描述，创建后不可变
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionContext {
    pub request_id: Uuid,
    pub category: ExecutorCategory,
    pub worker_group: String,
    pub payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl ExecutionContext {
    pub fn new(category: ExecutorCategory, payload: serde_json::Value) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            category,
            worker_group: DEFAULT_WORKER_GROUP.to_string(),
            payload,
            created_at: Utc::now(),
        }
    }

    pub fn with_worker_group<S: Into<String>>(mut self, worker_group: S) -> Self {
        self.worker_group = worker_group.into();
        self
    }

    /// 将请求绑定到已解析的目标节点，产生不可变的绑定值。
    /// 调用方必须保证host非空；绑定不修改原请求。
    pub fn bind(&self, host: Host) -> BoundExecutionContext {
        BoundExecutionContext {
            context: self.clone(),
            host,
        }
    }

    pub fn entity_description(&self) -> String {
        format!(
            "执行请求 (ID: {}, 类别: {}, 分组: {})",
            self.request_id, self.category, self.worker_group
        )
    }
}

/// 已绑定目标节点的执行请求，每次分发调用至多构造一次
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundExecutionContext {
    pub context: ExecutionContext,
    pub host: Host,
}

impl BoundExecutionContext {
    pub fn request_id(&self) -> Uuid {
        self.context.request_id
    }

    pub fn category(&self) -> ExecutorCategory {
        self.context.category
    }

    pub fn address(&self) -> &str {
        &self.host.address
    }
}
