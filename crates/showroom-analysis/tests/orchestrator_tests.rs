// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end orchestrator behavior over mock collaborators.

use std::time::Duration;

use chrono::{TimeDelta, Utc};
use showroom_core::{AnalysisMethod, ShowroomError};
use showroom_test_utils::{MockProvider, TestHarness, valid_analysis_json, visit_request};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[tokio::test]
async fn model_success_is_persisted_and_logged() {
    let harness = TestHarness::builder()
        .with_provider(MockProvider::with_replies(vec![Ok(valid_analysis_json(0.72, 7))]))
        .build();

    let outcome = harness.analyze(&visit_request("visit-1")).await.unwrap();
    assert!(!outcome.cached);
    assert_eq!(outcome.method, Some(AnalysisMethod::Model));
    assert_eq!(outcome.message(), "AI analysis completed successfully");
    assert!(approx(outcome.result.purchase_probability, 0.72));

    let stored = harness.visits.get("visit-1").await.unwrap();
    assert_eq!(stored, outcome.result);

    let entries = harness.log.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].method, AnalysisMethod::Model);
    assert!(entries[0].success);
    assert!(entries[0].error_message.is_none());
}

#[tokio::test]
async fn missing_visit_id_is_rejected_without_side_effects() {
    let harness = TestHarness::new();
    let err = harness.analyze(&visit_request("  ")).await.unwrap_err();
    assert!(matches!(err, ShowroomError::Validation(_)));
    assert_eq!(harness.provider.call_count(), 0);
    assert_eq!(harness.visits.write_count(), 0);
    assert!(harness.log.entries().await.is_empty());
}

#[tokio::test]
async fn failing_model_still_succeeds_with_fallback() {
    let harness = TestHarness::builder().with_failing_model().build();
    let request = TestHarness::sample_request("visit-2");

    let outcome = harness.analyze(&request).await.unwrap();
    assert_eq!(outcome.method, Some(AnalysisMethod::Fallback));
    assert_eq!(outcome.message(), "Analysis completed using fallback scoring");
    assert!(approx(outcome.result.purchase_probability, 0.9));
    assert_eq!(outcome.result.priority_ranking, 9);
    assert!(approx(outcome.result.confidence_score, 0.6));

    let entries = harness.log.entries().await;
    assert!(!entries[0].success);
    assert!(
        entries[0]
            .error_message
            .as_deref()
            .is_some_and(|m| m.contains("mock provider failure"))
    );
    assert_eq!(harness.breaker.failure_count(), 1);
}

#[tokio::test]
async fn empty_visit_with_failing_model_scores_baseline() {
    let harness = TestHarness::builder().with_failing_model().build();
    let outcome = harness.analyze(&visit_request("visit-3")).await.unwrap();
    assert!(approx(outcome.result.purchase_probability, 0.5));
    assert_eq!(outcome.result.priority_ranking, 5);
    assert!(approx(outcome.result.sentiment_score, 0.0));
    assert!(approx(outcome.result.confidence_score, 0.6));
}

#[tokio::test]
async fn unparseable_model_output_falls_back() {
    let harness = TestHarness::builder()
        .with_provider(MockProvider::with_replies(vec![Ok("no json here".into())]))
        .build();
    let outcome = harness.analyze(&visit_request("visit-4")).await.unwrap();
    assert_eq!(outcome.method, Some(AnalysisMethod::Fallback));
    assert_eq!(harness.breaker.failure_count(), 1);
}

#[tokio::test]
async fn out_of_range_model_output_falls_back() {
    let harness = TestHarness::builder()
        .with_provider(MockProvider::with_replies(vec![Ok(valid_analysis_json(1.7, 8))]))
        .build();
    let outcome = harness.analyze(&visit_request("visit-5")).await.unwrap();
    assert_eq!(outcome.method, Some(AnalysisMethod::Fallback));
    assert!(outcome.result.validate().is_ok());
}

#[tokio::test]
async fn second_call_within_ttl_is_cached() {
    let harness = TestHarness::new();
    let first = harness.analyze(&visit_request("visit-6")).await.unwrap();
    let second = harness.analyze(&visit_request("visit-6")).await.unwrap();

    assert!(second.cached);
    assert_eq!(second.method, None);
    assert_eq!(second.message(), "Analysis retrieved from cache");
    assert_eq!(second.result, first.result);
    assert_eq!(harness.provider.call_count(), 1);
    assert_eq!(harness.log.entries().await.len(), 1);
    assert_eq!(harness.visits.write_count(), 1);
}

#[tokio::test]
async fn force_reanalysis_bypasses_cache() {
    let harness = TestHarness::new();
    harness.analyze(&visit_request("visit-7")).await.unwrap();

    let mut forced = visit_request("visit-7");
    forced.force_reanalysis = true;
    let outcome = harness.analyze(&forced).await.unwrap();
    assert!(!outcome.cached);
    assert_eq!(outcome.method, Some(AnalysisMethod::Model));
    assert_eq!(harness.provider.call_count(), 2);
    assert_eq!(harness.log.entries().await.len(), 2);
}

#[tokio::test]
async fn stale_analysis_is_recomputed() {
    let harness = TestHarness::new();
    let mut old = harness.analyze(&visit_request("visit-8")).await.unwrap().result;
    old.generated_at = Utc::now() - TimeDelta::hours(25);
    harness.visits.insert("visit-8", old).await;

    let outcome = harness.analyze(&visit_request("visit-8")).await.unwrap();
    assert!(!outcome.cached);
    assert_eq!(harness.provider.call_count(), 2);
}

#[tokio::test]
async fn custom_ttl_is_honored() {
    let harness = TestHarness::builder()
        .with_cache_ttl(TimeDelta::minutes(5))
        .build();
    let mut result = harness.analyze(&visit_request("visit-9")).await.unwrap().result;
    result.generated_at = Utc::now() - TimeDelta::minutes(10);
    harness.visits.insert("visit-9", result).await;

    assert!(!harness.analyze(&visit_request("visit-9")).await.unwrap().cached);
}

#[tokio::test]
async fn breaker_opens_after_three_failures_and_skips_model() {
    let harness = TestHarness::builder().with_failing_model().build();
    for i in 0..3 {
        harness
            .analyze(&visit_request(&format!("visit-b{i}")))
            .await
            .unwrap();
    }
    assert_eq!(harness.provider.call_count(), 3);
    assert!(harness.breaker.is_open());

    let outcome = harness.analyze(&visit_request("visit-b3")).await.unwrap();
    assert_eq!(outcome.method, Some(AnalysisMethod::Fallback));
    assert_eq!(harness.provider.call_count(), 3);

    let entries = harness.log.entries().await;
    assert_eq!(
        entries.last().unwrap().error_message.as_deref(),
        Some("circuit breaker open")
    );
}

#[tokio::test]
async fn two_failures_do_not_open_breaker() {
    let harness = TestHarness::builder()
        .with_provider(MockProvider::with_replies(vec![
            Err("timeout".into()),
            Err("timeout".into()),
        ]))
        .build();
    harness.analyze(&visit_request("a")).await.unwrap();
    harness.analyze(&visit_request("b")).await.unwrap();
    assert!(!harness.breaker.is_open());

    let third = harness.analyze(&visit_request("c")).await.unwrap();
    assert_eq!(harness.provider.call_count(), 3);
    assert_eq!(third.method, Some(AnalysisMethod::Model));
    assert_eq!(harness.breaker.failure_count(), 0);
}

#[tokio::test]
async fn breaker_recovers_after_cooldown() {
    let harness = TestHarness::builder().with_failing_model().build();
    for i in 0..3 {
        harness
            .analyze(&visit_request(&format!("visit-r{i}")))
            .await
            .unwrap();
    }
    assert!(harness.breaker.is_open());

    harness.provider.set_failing(false);
    harness.advance(Duration::from_secs(61));

    let outcome = harness.analyze(&visit_request("visit-r3")).await.unwrap();
    assert_eq!(outcome.method, Some(AnalysisMethod::Model));
    assert_eq!(harness.provider.call_count(), 4);
}

#[tokio::test]
async fn persistence_failures_do_not_fail_the_request() {
    let harness = TestHarness::new();
    harness.visits.set_fail_writes(true);
    harness.log.set_fail_appends(true);

    let outcome = harness.analyze(&visit_request("visit-p")).await.unwrap();
    assert_eq!(outcome.method, Some(AnalysisMethod::Model));
    assert!(harness.visits.get("visit-p").await.is_none());
    assert!(harness.log.entries().await.is_empty());
}

#[tokio::test]
async fn cache_read_failure_is_treated_as_miss() {
    let harness = TestHarness::new();
    harness.visits.set_fail_reads(true);
    let outcome = harness.analyze(&visit_request("visit-q")).await.unwrap();
    assert!(!outcome.cached);
    assert_eq!(harness.provider.call_count(), 1);
}

#[tokio::test]
async fn offline_service_logs_disabled_model() {
    let harness = TestHarness::builder().offline().build();
    harness.analyze(&visit_request("visit-o")).await.unwrap();
    let entries = harness.log.entries().await;
    assert_eq!(entries[0].method, AnalysisMethod::Fallback);
    assert_eq!(entries[0].error_message.as_deref(), Some("model scoring disabled"));
    assert_eq!(harness.breaker.failure_count(), 0);
}

#[tokio::test]
async fn prompt_is_sent_with_json_output_requested() {
    let harness = TestHarness::new();
    harness
        .analyze(&TestHarness::sample_request("visit-j"))
        .await
        .unwrap();
    let requests = harness.provider.requests().await;
    assert_eq!(requests.len(), 1);
    assert!(requests[0].json_output);
    assert!(requests[0].prompt.contains("25000-35000"));
    assert!(requests[0].system_prompt.contains("Jordan"));
}
