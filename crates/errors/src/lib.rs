use dispatch_domain::ExecutorCategory;
use thiserror::Error;


/// 执行器钩子与传输层的错误类型
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("通信传输错误: {0}")]
    Transport(String),
    #[error("操作超时: {0}")]
    Timeout(String),
    #[error("序列化错误: {0}")]
    Serialization(String),
    #[error("内部错误: {0}")]
    Internal(String),
}

pub type ExecutorResult<T> = Result<T, ExecutorError>;

impl ExecutorError {
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Self::Transport(msg.into())
    }
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        Self::Timeout(msg.into())
    }
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
    pub fn is_retryable(&self) -> bool {
        matches!(self, ExecutorError::Transport(_) | ExecutorError::Timeout(_))
    }
}

impl From<serde_json::Error> for ExecutorError {
    fn from(err: serde_json::Error) -> Self {
        ExecutorError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for ExecutorError {
    fn from(err: anyhow::Error) -> Self {
        ExecutorError::Internal(err.to_string())
    }
}

/// 分发调用的终态错误类型，每次调用恰好产生一个结果
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("执行器未注册: {category}")]
    ExecutorNotRegistered { category: ExecutorCategory },
    #[error("没有合适的Worker节点: 类别 {category} - 分组 {worker_group}")]
    NoSuitableWorker {
        category: ExecutorCategory,
        worker_group: String,
    },
    #[error("分发准备失败: 类别 {category} - {source}")]
    PrepareFailed {
        category: ExecutorCategory,
        #[source]
        source: ExecutorError,
    },
    #[error("分发执行失败: 类别 {category} - {source}")]
    ExecuteFailed {
        category: ExecutorCategory,
        #[source]
        source: ExecutorError,
    },
    #[error("分发清理失败: 类别 {category} - {source}")]
    CleanupFailed {
        category: ExecutorCategory,
        #[source]
        source: ExecutorError,
    },
}

pub type DispatchResult<T> = Result<T, DispatchError>;

impl DispatchError {
    pub fn executor_not_registered(category: ExecutorCategory) -> Self {
        Self::ExecutorNotRegistered { category }
    }
    pub fn no_suitable_worker<S: Into<String>>(category: ExecutorCategory, worker_group: S) -> Self {
        Self::NoSuitableWorker {
            category,
            worker_group: worker_group.into(),
        }
    }
    pub fn prepare_failed(category: ExecutorCategory, source: ExecutorError) -> Self {
        Self::PrepareFailed { category, source }
    }
    pub fn execute_failed(category: ExecutorCategory, source: ExecutorError) -> Self {
        Self::ExecuteFailed { category, source }
    }
    pub fn cleanup_failed(category: ExecutorCategory, source: ExecutorError) -> Self {
        Self::CleanupFailed { category, source }
    }
    pub fn category(&self) -> ExecutorCategory {
        match self {
            DispatchError::ExecutorNotRegistered { category }
            | DispatchError::NoSuitableWorker { category, .. }
            | DispatchError::PrepareFailed { category, .. }
            | DispatchError::ExecuteFailed { category, .. }
            | DispatchError::CleanupFailed { category, .. } => *category,
        }
    }
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DispatchError::NoSuitableWorker { .. } | DispatchError::ExecuteFailed { .. }
        )
    }
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::ExecutorNotRegistered { .. } => "executor_not_registered",
            DispatchError::NoSuitableWorker { .. } => "no_suitable_worker",
            DispatchError::PrepareFailed { .. } => "prepare_failed",
            DispatchError::ExecuteFailed { .. } => "execute_failed",
            DispatchError::CleanupFailed { .. } => "cleanup_failed",
        }
    }
}
