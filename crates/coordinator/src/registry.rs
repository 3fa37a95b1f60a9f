use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use dispatch_domain::ExecutorCategory;

use crate::traits::ExecutorManager;

/// 执行器注册表，维护类别到执行器的并发安全映射
///
/// 底层使用分片map：写入只锁单个分片，不同类别的并发查找互不阻塞。
pub struct ExecutorRegistry {
    executors: DashMap<ExecutorCategory, Arc<dyn ExecutorManager>>,
}

impl ExecutorRegistry {
    pub fn new() -> Self {
        Self {
            executors: DashMap::new(),
        }
    }

    /// 注册执行器，同类别后注册的覆盖先注册的。
    /// 已持有旧执行器引用的在途分发不受覆盖影响。
    pub fn register(&self, category: ExecutorCategory, executor: Arc<dyn ExecutorManager>) {
        debug!("注册执行器: 类别 {} -> {}", category, executor.name());
        self.executors.insert(category, executor);
    }

    /// 查找执行器，返回Arc克隆；类别未注册时返回None
    pub fn lookup(&self, category: ExecutorCategory) -> Option<Arc<dyn ExecutorManager>> {
        self.executors
            .get(&category)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// 注销执行器，返回是否存在过
    pub fn unregister(&self, category: ExecutorCategory) -> bool {
        let removed = self.executors.remove(&category).is_some();
        if removed {
            debug!("注销执行器: 类别 {}", category);
        }
        removed
    }

    pub fn contains(&self, category: ExecutorCategory) -> bool {
        self.executors.contains_key(&category)
    }

    pub fn len(&self) -> usize {
        self.executors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.executors.is_empty()
    }

    /// 已注册类别的时点快照，不是实时视图
    pub fn categories(&self) -> Vec<ExecutorCategory> {
        self.executors.iter().map(|entry| *entry.key()).collect()
    }
}

impl Default for ExecutorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
