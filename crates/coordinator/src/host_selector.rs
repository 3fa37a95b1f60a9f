use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use dispatch_domain::{ExecutionContext, Host};

use crate::traits::HostSelector;

/// Worker分组到存活节点列表的共享池
///
/// 由节点管理侧（注册、心跳）写入，选择器并发读取；
/// 读取返回时点快照，不持有池内锁。
pub struct WorkerHostPool {
    groups: DashMap<String, Vec<Host>>,
}

impl WorkerHostPool {
    pub fn new() -> Self {
        Self {
            groups: DashMap::new(),
        }
    }

    pub fn add_host(&self, worker_group: &str, host: Host) {
        self.groups
            .entry(worker_group.to_string())
            .or_default()
            .push(host);
    }

    /// 整组替换节点列表，节点状态同步时使用
    pub fn replace_hosts(&self, worker_group: &str, hosts: Vec<Host>) {
        self.groups.insert(worker_group.to_string(), hosts);
    }

    pub fn remove_host(&self, worker_group: &str, host: &Host) -> bool {
        if let Some(mut entry) = self.groups.get_mut(worker_group) {
            let before = entry.len();
            entry.retain(|h| h != host);
            before != entry.len()
        } else {
            false
        }
    }

    pub fn remove_group(&self, worker_group: &str) -> bool {
        self.groups.remove(worker_group).is_some()
    }

    /// 分组节点的时点快照，未知分组返回空列表
    pub fn hosts(&self, worker_group: &str) -> Vec<Host> {
        self.groups
            .get(worker_group)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

impl Default for WorkerHostPool {
    fn default() -> Self {
        Self::new()
    }
}

pub struct RoundRobinHostSelector {
    pool: Arc<WorkerHostPool>,
    counter: AtomicUsize,
}

impl RoundRobinHostSelector {
    pub fn new(pool: Arc<WorkerHostPool>) -> Self {
        Self {
            pool,
            counter: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl HostSelector for RoundRobinHostSelector {
    async fn select(&self, context: &ExecutionContext) -> Host {
        let hosts = self.pool.hosts(&context.worker_group);
        if hosts.is_empty() {
            debug!("分组 {} 没有可用的Worker节点", context.worker_group);
            return Host::empty();
        }
        let index = self.counter.fetch_add(1, Ordering::Relaxed) % hosts.len();
        let selected = hosts[index].clone();

        debug!(
            "轮询策略选择节点: {} (索引: {}/{})",
            selected,
            index,
            hosts.len()
        );

        selected
    }

    fn name(&self) -> &str {
        "RoundRobin"
    }
}

pub struct RandomHostSelector {
    pool: Arc<WorkerHostPool>,
}

impl RandomHostSelector {
    pub fn new(pool: Arc<WorkerHostPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HostSelector for RandomHostSelector {
    async fn select(&self, context: &ExecutionContext) -> Host {
        use rand::Rng;

        let hosts = self.pool.hosts(&context.worker_group);
        if hosts.is_empty() {
            debug!("分组 {} 没有可用的Worker节点", context.worker_group);
            return Host::empty();
        }
        let index = rand::rng().random_range(0..hosts.len());
        let selected = hosts[index].clone();

        debug!(
            "随机策略选择节点: {} (候选数: {})",
            selected,
            hosts.len()
        );

        selected
    }

    fn name(&self) -> &str {
        "Random"
    }
}
