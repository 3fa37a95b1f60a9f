use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};
use uuid::Uuid;

use dispatch_domain::{BoundExecutionContext, ExecutionContext, ExecutorCategory};
use dispatch_errors::{DispatchError, DispatchResult, ExecutorResult};

use crate::metrics::DispatchMetrics;
use crate::registry::ExecutorRegistry;
use crate::traits::{ExecutorManager, HostSelector};

/// 分发协调器，将执行请求路由到正确的执行器和目标节点
///
/// 每个实例持有自己的注册表，由调用方显式构造和传递；
/// 多个调用方任务可并发调用 `dispatch`。
pub struct ExecutorDispatcher {
    pub registry: ExecutorRegistry,
    pub host_selector: Arc<dyn HostSelector>,
    pub metrics: Arc<DispatchMetrics>,
}

/// 批量分发的汇总结果
#[derive(Debug, Clone)]
pub struct BatchDispatchResult {
    pub successful: usize,
    pub failed: Vec<BatchDispatchFailure>,
    pub total_attempted: usize,
}

impl BatchDispatchResult {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// 批量分发中的单条失败记录
#[derive(Debug, Clone)]
pub struct BatchDispatchFailure {
    pub request_id: Uuid,
    pub category: ExecutorCategory,
    pub worker_group: String,
    pub error_message: String,
}

impl ExecutorDispatcher {
    pub fn new(host_selector: Arc<dyn HostSelector>, metrics: Arc<DispatchMetrics>) -> Self {
        Self {
            registry: ExecutorRegistry::new(),
            host_selector,
            metrics,
        }
    }

    /// 注册执行器，启动引导和运行期管理入口
    pub fn register(&self, category: ExecutorCategory, executor: Arc<dyn ExecutorManager>) {
        self.registry.register(category, executor);
        self.metrics
            .update_registered_executors(self.registry.len() as f64);
    }

    /// 为全部内置类别注册同一个执行器，进程启动时调用
    pub fn register_default_executors(&self, executor: Arc<dyn ExecutorManager>) {
        for category in ExecutorCategory::all() {
            self.register(category, Arc::clone(&executor));
        }
        info!("内置执行器注册完成: {}", executor.name());
    }

    /// 分发一次执行请求，成功不携带返回数据
    ///
    /// 协议按固定顺序执行：解析执行器、解析目标节点、绑定、
    /// 准备、执行、清理。完成绑定后清理钩子必定运行。
    /// 调用方自行决定超时与重试，协调器内部不做任何一种。
    pub async fn dispatch(&self, context: &ExecutionContext) -> DispatchResult<()> {
        let start_time = std::time::Instant::now();
        let result = self.resolve_and_execute(context).await;
        self.metrics
            .record_dispatch(start_time.elapsed().as_secs_f64());

        match &result {
            Ok(()) => {
                info!("分发完成: {}", context.entity_description());
            }
            Err(e) => {
                self.metrics
                    .record_dispatch_failure(context.category.as_str(), e.kind());
            }
        }

        result
    }

    async fn resolve_and_execute(&self, context: &ExecutionContext) -> DispatchResult<()> {
        // 1. 解析执行器，未注册立即失败，不再解析节点
        let executor = self
            .registry
            .lookup(context.category)
            .ok_or_else(|| DispatchError::executor_not_registered(context.category))?;

        // 2. 解析目标节点，空节点表示分组内无可用Worker
        let selection_start = std::time::Instant::now();
        let host = self.host_selector.select(context).await;
        self.metrics
            .record_selection_duration(selection_start.elapsed().as_secs_f64());

        if host.is_empty() {
            warn!(
                "分发执行请求失败: 分组 {} 中没有合适的Worker节点, 请求: {}",
                context.worker_group,
                context.entity_description()
            );
            self.metrics.record_no_suitable_worker();
            return Err(DispatchError::no_suitable_worker(
                context.category,
                context.worker_group.clone(),
            ));
        }

        // 3. 绑定目标节点，此后清理钩子必定运行
        let bound = context.bind(host);
        debug!("请求 {} 绑定到节点 {}", bound.request_id(), bound.address());

        // 4-6. 准备、执行，然后无条件清理
        let run_result = self.run_executor(executor.as_ref(), &bound).await;
        let cleanup_result = executor.after_execute(&bound).await;

        merge_outcome(&bound, run_result, cleanup_result)
    }

    /// 准备与执行两个钩子，准备失败时跳过执行
    async fn run_executor(
        &self,
        executor: &dyn ExecutorManager,
        bound: &BoundExecutionContext,
    ) -> DispatchResult<()> {
        executor
            .before_execute(bound)
            .await
            .map_err(|e| DispatchError::prepare_failed(bound.category(), e))?;
        executor
            .execute(bound)
            .await
            .map_err(|e| DispatchError::execute_failed(bound.category(), e))?;

        Ok(())
    }

    /// 并发分发一批执行请求，`max_concurrent` 必须大于0
    pub async fn dispatch_all(
        &self,
        contexts: Vec<ExecutionContext>,
        max_concurrent: usize,
    ) -> BatchDispatchResult {
        info!(
            "开始并发分发 {} 个执行请求 (并发限制: {})",
            contexts.len(),
            max_concurrent
        );

        let total_attempted = contexts.len();
        let results: Vec<Result<(), BatchDispatchFailure>> = stream::iter(contexts)
            .map(|context| async move {
                match self.dispatch(&context).await {
                    Ok(()) => Ok(()),
                    Err(e) => Err(BatchDispatchFailure {
                        request_id: context.request_id,
                        category: context.category,
                        worker_group: context.worker_group.clone(),
                        error_message: e.to_string(),
                    }),
                }
            })
            .buffer_unordered(max_concurrent)
            .collect()
            .await;

        let mut failed = Vec::new();
        let mut successful = 0;
        for result in results {
            match result {
                Ok(()) => successful += 1,
                Err(failure) => failed.push(failure),
            }
        }

        let result = BatchDispatchResult {
            successful,
            failed,
            total_attempted,
        };

        info!(
            "并发分发完成: {} 成功，{} 失败",
            result.successful,
            result.failed.len()
        );

        result
    }
}

/// 合并执行与清理的结果: 先发生的错误优先，
/// 清理失败只在它是唯一失败时作为调用结果
fn merge_outcome(
    bound: &BoundExecutionContext,
    run_result: DispatchResult<()>,
    cleanup_result: ExecutorResult<()>,
) -> DispatchResult<()> {
    match (run_result, cleanup_result) {
        (Ok(()), Ok(())) => Ok(()),
        (Ok(()), Err(cleanup_err)) => Err(DispatchError::cleanup_failed(
            bound.category(),
            cleanup_err,
        )),
        (Err(run_err), Ok(())) => Err(run_err),
        (Err(run_err), Err(cleanup_err)) => {
            warn!(
                "清理钩子失败已被先发错误覆盖: 请求 {} - {}",
                bound.request_id(),
                cleanup_err
            );
            Err(run_err)
        }
    }
}
