//! 分发核心抽象接口定义
//!
//! 此模块定义了分发协调器与外部协作者之间的接口：
//! - `ExecutorManager`：按类别注册的后端执行器，承载实际的远程执行
//! - `HostSelector`：目标节点解析器，从候选节点中挑选物理目的地
//!
//! 协调器只通过这两个接口与外界交互，不关心节点选择算法内部
//! 和远程传输的具体实现。

use async_trait::async_trait;

use dispatch_domain::{BoundExecutionContext, ExecutionContext, Host};
use dispatch_errors::ExecutorResult;

/// 后端执行器接口，每个类别至多注册一个实例
///
/// 三个钩子由协调器按固定顺序调用：`before_execute` 成功后才会调用
/// `execute`；只要请求完成了节点绑定，`after_execute` 必定被调用恰好
/// 一次，无论前两个钩子是否失败。
///
/// # 线程安全
///
/// 要求 `Send + Sync`，同一实例会被多个在途分发并发调用。
///
/// # 实现要求
///
/// - `after_execute` 必须容忍前序钩子失败或未执行的情况
/// - 钩子内部不做重试，失败原样返回给协调器
#[async_trait]
pub trait ExecutorManager: Send + Sync {
    /// 执行前的准备钩子，可用于申请信道、预热连接等
    async fn before_execute(&self, context: &BoundExecutionContext) -> ExecutorResult<()> {
        let _ = context;
        Ok(())
    }

    /// 向绑定的目标节点执行请求
    async fn execute(&self, context: &BoundExecutionContext) -> ExecutorResult<()>;

    /// 执行后的清理钩子，释放准备阶段占用的资源
    async fn after_execute(&self, context: &BoundExecutionContext) -> ExecutorResult<()> {
        let _ = context;
        Ok(())
    }

    /// 执行器名称，用于注册日志和诊断
    fn name(&self) -> &str;
}

/// 目标节点解析接口
///
/// `select` 必须是并发安全的；没有可用节点时返回空 `Host`
/// 而不是错误，由协调器将其归类为失败。
#[async_trait]
pub trait HostSelector: Send + Sync {
    async fn select(&self, context: &ExecutionContext) -> Host;

    fn name(&self) -> &str;
}
