//! Integration tests for concurrent retry execution
//!
//! Tests cover:
//! - 100 parallel failing tests with max_retries = 2: exactly 200 retries and
//!   100 permanent failures, no lost or duplicated increments
//! - Mixed pass/fail workloads under parallel workers
//! - Per-test attempt isolation when workers interleave

use std::sync::Arc;

use brokkr_core::config::{EnvOverrides, SuiteParams};
use brokkr_harness::{FinalStatus, RetryListener, TestId, TestOutcome, Verdict};
use futures::future::join_all;

fn started_listener(max_retries: u32) -> Arc<RetryListener> {
    let mut listener = RetryListener::new();
    let params = SuiteParams {
        max_retries: Some(max_retries.to_string()),
        delay_secs: Some("0".to_string()),
        ..SuiteParams::none()
    };
    listener.on_suite_start_with_env(params, EnvOverrides::none());
    Arc::new(listener)
}

async fn drive(
    listener: &RetryListener,
    test: &TestId,
    failures: Option<u32>,
) -> (FinalStatus, u32) {
    let mut executed = 0u32;
    loop {
        executed += 1;
        let outcome = match failures {
            Some(k) if executed > k => TestOutcome::Passed,
            _ => TestOutcome::failed("simulated failure"),
        };
        match listener.on_test_outcome(test, outcome).await {
            Verdict::Retry { .. } => continue,
            Verdict::Finalize(status) => return (status, executed),
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn hundred_parallel_failing_tests_count_exactly() {
    let listener = started_listener(2);

    let workers: Vec<_> = (0..100)
        .map(|i| {
            let listener = Arc::clone(&listener);
            tokio::spawn(async move {
                let test = TestId::new("ConcurrentSuite", format!("failing_{i}"));
                drive(&listener, &test, None).await
            })
        })
        .collect();

    for result in join_all(workers).await {
        let (status, executed) = result.expect("worker task");
        assert_eq!(status, FinalStatus::Failed { attempts: 3 });
        assert_eq!(executed, 3);
    }

    assert_eq!(listener.stats().total_retries(), 200);
    assert_eq!(listener.stats().total_failed_tests(), 100);
    assert_eq!(listener.stats().total_successful_retries(), 0);
    assert_eq!(listener.stats().success_rate(), 0.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn mixed_workload_counts_are_consistent() {
    let listener = started_listener(3);

    // Even-numbered tests fail twice then pass; odd ones never pass.
    let workers: Vec<_> = (0..40)
        .map(|i| {
            let listener = Arc::clone(&listener);
            tokio::spawn(async move {
                let test = TestId::new("MixedSuite", format!("case_{i}"));
                let failures = if i % 2 == 0 { Some(2) } else { None };
                drive(&listener, &test, failures).await
            })
        })
        .collect();

    let mut passed_after_retry = 0u64;
    let mut failed = 0u64;
    for result in join_all(workers).await {
        match result.expect("worker task").0 {
            FinalStatus::PassedAfterRetry { attempts } => {
                assert_eq!(attempts, 3);
                passed_after_retry += 1;
            }
            FinalStatus::Failed { attempts } => {
                assert_eq!(attempts, 4);
                failed += 1;
            }
            FinalStatus::Passed => panic!("no test passes on the first attempt here"),
        }
    }

    assert_eq!(passed_after_retry, 20);
    assert_eq!(failed, 20);
    // 20 flaky tests x 2 retries + 20 hopeless tests x 3 retries
    assert_eq!(listener.stats().total_retries(), 100);
    assert_eq!(listener.stats().total_failed_tests(), 20);
    assert_eq!(listener.stats().total_successful_retries(), 20);
    assert_eq!(listener.stats().success_rate(), 20.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn attempt_counters_do_not_bleed_across_tests() {
    let listener = started_listener(5);

    // Many tests in flight at once, each with a different failure count;
    // every one must see exactly its own budget consumed.
    let workers: Vec<_> = (0u32..24)
        .map(|i| {
            let listener = Arc::clone(&listener);
            tokio::spawn(async move {
                let test = TestId::new("IsolationSuite", format!("case_{i}"));
                let k = i % 6;
                let (status, executed) = drive(&listener, &test, Some(k)).await;
                assert_eq!(executed, k + 1);
                assert_eq!(status.attempts(), k + 1);
            })
        })
        .collect();

    for result in join_all(workers).await {
        result.expect("worker task");
    }

    // 4 tests each of k = 0..=5 failures before passing.
    assert_eq!(listener.stats().total_retries(), 4 * (1 + 2 + 3 + 4 + 5));
    assert_eq!(listener.stats().total_failed_tests(), 0);
    assert_eq!(listener.stats().total_successful_retries(), 20);
}
