use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use dispatch_coordinator::{
    DispatchMetrics, ExecutorDispatcher, ExecutorManager, RoundRobinHostSelector, WorkerHostPool,
};
use dispatch_domain::{
    BoundExecutionContext, ExecutionContext, ExecutorCategory, Host, DEFAULT_WORKER_GROUP,
};
use dispatch_errors::ExecutorResult;

/// 演示用执行器，把每次执行打印到控制台
struct LoggingExecutor;

#[async_trait]
impl ExecutorManager for LoggingExecutor {
    async fn execute(&self, context: &BoundExecutionContext) -> ExecutorResult<()> {
        println!(
            "   执行请求 {} -> 节点 {}",
            context.request_id(),
            context.address()
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "logging-executor"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== 分发协调器演示 ===\n");

    println!("1. 构建Worker节点池:");
    let pool = Arc::new(WorkerHostPool::new());
    pool.add_host(DEFAULT_WORKER_GROUP, Host::of("10.0.0.1", 9000));
    pool.add_host(DEFAULT_WORKER_GROUP, Host::of("10.0.0.2", 9000));
    pool.add_host("gpu", Host::of("10.0.1.1", 9000));
    for group in [DEFAULT_WORKER_GROUP, "gpu"] {
        let hosts: Vec<String> = pool.hosts(group).iter().map(|h| h.to_string()).collect();
        println!("   分组 {}: {}", group, hosts.join(", "));
    }

    println!();
    println!("2. 组装协调器并注册执行器:");
    let selector = Arc::new(RoundRobinHostSelector::new(pool));
    let metrics = Arc::new(DispatchMetrics::new()?);
    let dispatcher = ExecutorDispatcher::new(selector, metrics);
    dispatcher.register_default_executors(Arc::new(LoggingExecutor));
    println!("   已注册类别: {:?}", dispatcher.registry.categories());

    println!();
    println!("3. 轮询分发到default分组:");
    for i in 1..=4 {
        let context = ExecutionContext::new(
            ExecutorCategory::Worker,
            serde_json::json!({ "task": format!("demo_task_{i}") }),
        );
        dispatcher.dispatch(&context).await?;
    }

    println!();
    println!("4. 指定分组分发:");
    let context =
        ExecutionContext::new(ExecutorCategory::Worker, serde_json::json!({"task": "gpu"}))
            .with_worker_group("gpu");
    dispatcher.dispatch(&context).await?;

    println!();
    println!("5. 分组内没有可用节点:");
    let context = ExecutionContext::new(ExecutorCategory::Worker, serde_json::json!({}))
        .with_worker_group("empty-group");
    match dispatcher.dispatch(&context).await {
        Ok(()) => println!("   意外成功"),
        Err(e) => println!("   ✗ {e} (可重试: {})", e.is_retryable()),
    }

    println!();
    println!("6. 并发批量分发:");
    let contexts: Vec<ExecutionContext> = (0..6)
        .map(|i| {
            ExecutionContext::new(
                ExecutorCategory::Worker,
                serde_json::json!({ "task": format!("batch_task_{i}") }),
            )
        })
        .collect();
    let batch = dispatcher.dispatch_all(contexts, 3).await;
    println!(
        "   成功 {} / 共 {}，全部成功: {}",
        batch.successful,
        batch.total_attempted,
        batch.all_succeeded()
    );

    println!("\n=== 演示完成 ===");
    Ok(())
}
