#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use dispatch_coordinator::{
        DispatchMetrics, ExecutorDispatcher, RoundRobinHostSelector, WorkerHostPool,
    };
    use dispatch_domain::{ExecutorCategory, Host, DEFAULT_WORKER_GROUP};
    use dispatch_errors::{DispatchError, ExecutorError};
    use dispatch_testing_utils::{ExecutionContextBuilder, FixedHostSelector, MockExecutorManager};

    fn create_test_metrics() -> Arc<DispatchMetrics> {
        Arc::new(DispatchMetrics::new().unwrap())
    }

    fn create_test_dispatcher(selector: FixedHostSelector) -> ExecutorDispatcher {
        ExecutorDispatcher::new(Arc::new(selector), create_test_metrics())
    }

    #[tokio::test]
    async fn test_dispatcher_creation() {
        let dispatcher = create_test_dispatcher(FixedHostSelector::empty());
        assert!(dispatcher.registry.is_empty());

        dispatcher.register(ExecutorCategory::Worker, Arc::new(MockExecutorManager::new()));
        assert_eq!(dispatcher.registry.len(), 1);
        assert!(dispatcher.registry.contains(ExecutorCategory::Worker));
        assert!(!dispatcher.registry.contains(ExecutorCategory::Client));
    }

    #[tokio::test]
    async fn test_dispatch_success_runs_hooks_in_order() {
        let dispatcher =
            create_test_dispatcher(FixedHostSelector::new(Host::of("10.0.0.5", 9000)));
        let executor = Arc::new(MockExecutorManager::new());
        dispatcher.register(ExecutorCategory::Worker, executor.clone());

        let context = ExecutionContextBuilder::new().build();
        dispatcher.dispatch(&context).await.unwrap();

        assert_eq!(executor.hook_sequence(), vec!["before", "execute", "after"]);
        for invocation in executor.invocations() {
            assert_eq!(invocation.address(), "10.0.0.5:9000");
        }
    }

    #[tokio::test]
    async fn test_dispatch_fails_fast_when_executor_not_registered() {
        let selector = FixedHostSelector::new(Host::of("10.0.0.5", 9000));
        let dispatcher = ExecutorDispatcher::new(Arc::new(selector.clone()), create_test_metrics());

        let context = ExecutionContextBuilder::new().build();
        let err = dispatcher.dispatch(&context).await.unwrap_err();

        match err {
            DispatchError::ExecutorNotRegistered { category } => {
                assert_eq!(category, ExecutorCategory::Worker);
            }
            other => panic!("unexpected error: {other}"),
        }
        // Host resolution must not run when the executor lookup already failed
        assert_eq!(selector.select_count(), 0);
    }

    #[tokio::test]
    async fn test_categories_are_resolved_independently() {
        let dispatcher =
            create_test_dispatcher(FixedHostSelector::new(Host::of("10.0.0.5", 9000)));
        let worker_executor = Arc::new(MockExecutorManager::with_name("worker-executor"));
        dispatcher.register(ExecutorCategory::Worker, worker_executor.clone());

        let context = ExecutionContextBuilder::new()
            .with_category(ExecutorCategory::Client)
            .build();
        let err = dispatcher.dispatch(&context).await.unwrap_err();

        match err {
            DispatchError::ExecutorNotRegistered { category } => {
                assert_eq!(category, ExecutorCategory::Client);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(worker_executor.invocation_count(), 0);
    }

    #[tokio::test]
    async fn test_dispatch_without_available_worker() {
        let selector = FixedHostSelector::empty();
        let dispatcher = ExecutorDispatcher::new(Arc::new(selector.clone()), create_test_metrics());
        let executor = Arc::new(MockExecutorManager::new());
        dispatcher.register(ExecutorCategory::Worker, executor.clone());

        let context = ExecutionContextBuilder::new()
            .with_worker_group("offline-group")
            .build();
        let err = dispatcher.dispatch(&context).await.unwrap_err();

        match &err {
            DispatchError::NoSuitableWorker {
                category,
                worker_group,
            } => {
                assert_eq!(*category, ExecutorCategory::Worker);
                assert_eq!(worker_group, "offline-group");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.is_retryable()); // the group may repopulate later
        // No hook may run before a host is bound
        assert_eq!(selector.select_count(), 1);
        assert_eq!(executor.invocation_count(), 0);
    }

    #[tokio::test]
    async fn test_prepare_failure_skips_execute_but_still_cleans_up() {
        let dispatcher =
            create_test_dispatcher(FixedHostSelector::new(Host::of("10.0.0.5", 9000)));
        let executor = Arc::new(MockExecutorManager::new());
        executor.fail_before_execute("channel not ready");
        dispatcher.register(ExecutorCategory::Worker, executor.clone());

        let context = ExecutionContextBuilder::new().build();
        let err = dispatcher.dispatch(&context).await.unwrap_err();

        match err {
            DispatchError::PrepareFailed { category, source } => {
                assert_eq!(category, ExecutorCategory::Worker);
                assert!(matches!(source, ExecutorError::Internal(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(executor.hook_sequence(), vec!["before", "after"]);
        assert_eq!(executor.after_execute_count(), 1);
    }

    #[tokio::test]
    async fn test_execute_failure_still_cleans_up() {
        let dispatcher =
            create_test_dispatcher(FixedHostSelector::new(Host::of("10.0.0.5", 9000)));
        let executor = Arc::new(MockExecutorManager::new());
        executor.fail_execute("connection refused");
        dispatcher.register(ExecutorCategory::Worker, executor.clone());

        let context = ExecutionContextBuilder::new().build();
        let err = dispatcher.dispatch(&context).await.unwrap_err();

        match &err {
            DispatchError::ExecuteFailed { category, source } => {
                assert_eq!(*category, ExecutorCategory::Worker);
                assert!(matches!(source, ExecutorError::Transport(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.is_retryable());
        assert_eq!(executor.hook_sequence(), vec!["before", "execute", "after"]);
    }

    #[tokio::test]
    async fn test_cleanup_failure_alone_is_reported() {
        let dispatcher =
            create_test_dispatcher(FixedHostSelector::new(Host::of("10.0.0.5", 9000)));
        let executor = Arc::new(MockExecutorManager::new());
        executor.fail_after_execute("release failed");
        dispatcher.register(ExecutorCategory::Worker, executor.clone());

        let context = ExecutionContextBuilder::new().build();
        let err = dispatcher.dispatch(&context).await.unwrap_err();

        match err {
            DispatchError::CleanupFailed { category, source } => {
                assert_eq!(category, ExecutorCategory::Worker);
                assert!(matches!(source, ExecutorError::Internal(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(executor.hook_sequence(), vec!["before", "execute", "after"]);
    }

    #[tokio::test]
    async fn test_cleanup_failure_does_not_mask_execute_failure() {
        let dispatcher =
            create_test_dispatcher(FixedHostSelector::new(Host::of("10.0.0.5", 9000)));
        let executor = Arc::new(MockExecutorManager::new());
        executor.fail_execute("connection refused");
        executor.fail_after_execute("release failed");
        dispatcher.register(ExecutorCategory::Worker, executor.clone());

        let context = ExecutionContextBuilder::new().build();
        let err = dispatcher.dispatch(&context).await.unwrap_err();

        assert!(matches!(err, DispatchError::ExecuteFailed { .. }));
        assert_eq!(executor.after_execute_count(), 1);
    }

    #[tokio::test]
    async fn test_after_execute_runs_exactly_once_per_dispatch() {
        let dispatcher =
            create_test_dispatcher(FixedHostSelector::new(Host::of("10.0.0.5", 9000)));
        let executor = Arc::new(MockExecutorManager::new());
        dispatcher.register(ExecutorCategory::Worker, executor.clone());

        for _ in 0..3 {
            let context = ExecutionContextBuilder::new().build();
            dispatcher.dispatch(&context).await.unwrap();
        }

        assert_eq!(executor.after_execute_count(), 3);
    }

    #[tokio::test]
    async fn test_reregistration_takes_effect_for_new_dispatches() {
        let dispatcher =
            create_test_dispatcher(FixedHostSelector::new(Host::of("10.0.0.5", 9000)));
        let first = Arc::new(MockExecutorManager::with_name("first"));
        let second = Arc::new(MockExecutorManager::with_name("second"));

        dispatcher.register(ExecutorCategory::Worker, first.clone());
        let context = ExecutionContextBuilder::new().build();
        dispatcher.dispatch(&context).await.unwrap();

        dispatcher.register(ExecutorCategory::Worker, second.clone());
        let context = ExecutionContextBuilder::new().build();
        dispatcher.dispatch(&context).await.unwrap();

        assert_eq!(first.hook_sequence(), vec!["before", "execute", "after"]);
        assert_eq!(second.hook_sequence(), vec!["before", "execute", "after"]);
    }

    #[tokio::test]
    async fn test_dispatch_with_round_robin_pool() {
        let pool = Arc::new(WorkerHostPool::new());
        pool.add_host(DEFAULT_WORKER_GROUP, Host::of("10.0.0.1", 9000));
        pool.add_host(DEFAULT_WORKER_GROUP, Host::of("10.0.0.2", 9000));

        let selector = Arc::new(RoundRobinHostSelector::new(pool));
        let dispatcher = ExecutorDispatcher::new(selector, create_test_metrics());
        let executor = Arc::new(MockExecutorManager::new());
        dispatcher.register(ExecutorCategory::Worker, executor.clone());

        for _ in 0..2 {
            let context = ExecutionContextBuilder::new().build();
            dispatcher.dispatch(&context).await.unwrap();
        }

        let invocations = executor.invocations();
        assert_eq!(invocations.len(), 6);
        // Each dispatch is pinned to the host bound at the start of the call
        let first_address = invocations[0].address().to_string();
        let second_address = invocations[3].address().to_string();
        assert!(invocations[..3].iter().all(|i| i.address() == first_address));
        assert!(invocations[3..].iter().all(|i| i.address() == second_address));
        assert_ne!(first_address, second_address);
    }

    #[tokio::test]
    async fn test_dispatch_all_reports_mixed_results() {
        let dispatcher =
            create_test_dispatcher(FixedHostSelector::new(Host::of("10.0.0.5", 9000)));
        let executor = Arc::new(MockExecutorManager::new());
        dispatcher.register(ExecutorCategory::Worker, executor.clone());

        let contexts = vec![
            ExecutionContextBuilder::new().build(),
            ExecutionContextBuilder::new()
                .with_category(ExecutorCategory::Client)
                .build(),
            ExecutionContextBuilder::new().build(),
        ];

        let result = dispatcher.dispatch_all(contexts, 2).await;

        assert_eq!(result.total_attempted, 3);
        assert_eq!(result.successful, 2);
        assert_eq!(result.failed.len(), 1);
        assert!(!result.all_succeeded());

        let failure = &result.failed[0];
        assert_eq!(failure.category, ExecutorCategory::Client);
        assert!(failure.error_message.contains("执行器未注册"));
    }

    #[tokio::test]
    async fn test_dispatch_all_with_empty_input() {
        let dispatcher = create_test_dispatcher(FixedHostSelector::empty());

        let result = dispatcher.dispatch_all(vec![], 4).await;

        assert_eq!(result.total_attempted, 0);
        assert_eq!(result.successful, 0);
        assert!(result.all_succeeded());
    }

    #[tokio::test]
    async fn test_register_default_executors_covers_all_categories() {
        let dispatcher =
            create_test_dispatcher(FixedHostSelector::new(Host::of("10.0.0.5", 9000)));
        dispatcher.register_default_executors(Arc::new(MockExecutorManager::new()));

        assert!(dispatcher.registry.contains(ExecutorCategory::Worker));
        assert!(dispatcher.registry.contains(ExecutorCategory::Client));
        assert_eq!(dispatcher.registry.len(), 2);
    }
}
