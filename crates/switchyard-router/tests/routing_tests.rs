// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end routing cycles against a scripted provider.

use switchyard_core::InferenceParams;
use switchyard_router::{classification_prompt, CallStatus, Route, RouteBasis};
use switchyard_test_utils::{MockReply, TestHarness};

#[tokio::test]
async fn simple_prompt_goes_to_compact_model() {
    let harness = TestHarness::builder()
        .with_replies(vec![MockReply::text("0"), MockReply::text("こんにちは！")])
        .build();

    let cycle = harness.route("こんにちは").await;

    assert_eq!(cycle.classification.route, Route::Simple);
    assert_eq!(cycle.classification.basis, RouteBasis::Classified);
    assert_eq!(cycle.generation.model.label, "Claude 3.5 Haiku");
    assert_eq!(cycle.generation.response_text, "こんにちは！");
    assert_eq!(cycle.generation.status, CallStatus::Completed);

    let requests = harness.mock_provider.requests().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].model, harness.routing.classifier_model);
    assert_eq!(requests[0].prompt, classification_prompt("こんにちは"));
    assert_eq!(requests[0].params, InferenceParams::classification());
    assert_eq!(requests[1].model, harness.routing.compact_model);
    assert_eq!(requests[1].prompt, "こんにちは");
    assert_eq!(requests[1].params, InferenceParams::generation());
}

#[tokio::test]
async fn complex_prompt_goes_to_capable_model() {
    let prompt = "量子コンピューティングについて詳しく説明してください。";
    let harness = TestHarness::builder()
        .with_replies(vec![MockReply::text("1\n"), MockReply::text("long answer")])
        .build();

    let cycle = harness.route(prompt).await;

    assert_eq!(cycle.classification.route, Route::Complex);
    assert!(!cycle.classification.is_fallback());
    assert_eq!(cycle.generation.model.label, "Claude 3.7 Sonnet");
    assert_eq!(
        harness.requested_models().await,
        vec![
            harness.routing.classifier_model.clone(),
            harness.routing.capable_model.clone()
        ]
    );
}

#[tokio::test]
async fn unexpected_reply_falls_back_to_capable_model() {
    let harness = TestHarness::builder()
        .with_replies(vec![MockReply::text("maybe"), MockReply::text("answer")])
        .build();

    let cycle = harness.route("hmm").await;

    assert_eq!(cycle.classification.route, Route::Complex);
    assert_eq!(cycle.classification.basis, RouteBasis::AmbiguousReply);
    assert_eq!(cycle.classification.raw_reply, "maybe");
    assert_eq!(harness.requested_models().await[1], harness.routing.capable_model);
}

#[tokio::test]
async fn classifier_failure_falls_back_and_still_generates() {
    let harness = TestHarness::builder()
        .with_replies(vec![
            MockReply::fail("throttled"),
            MockReply::text("answer anyway"),
        ])
        .build();

    let cycle = harness.route("anything").await;

    assert_eq!(cycle.classification.route, Route::Complex);
    assert_eq!(cycle.classification.raw_reply, "");
    assert!(cycle.classification.failure().is_some_and(|e| e.contains("throttled")));
    assert_eq!(cycle.classification.usage.total(), 0);
    assert_eq!(cycle.generation.response_text, "answer anyway");
    assert_eq!(harness.mock_provider.call_count().await, 2);
}

#[tokio::test]
async fn generation_failure_is_reported_without_retry() {
    let harness = TestHarness::builder()
        .with_replies(vec![MockReply::text("0"), MockReply::fail("model offline")])
        .build();

    let cycle = harness.route("hi").await;

    let error = cycle.generation.failure().expect("generation should fail");
    assert!(error.contains("model offline"));
    assert_eq!(
        cycle.generation.response_text,
        format!("An error occurred: {error}")
    );
    assert_eq!(cycle.generation.usage.total(), 0);
    // Compact model failed; no second attempt and no switch to the capable model.
    assert_eq!(
        harness.requested_models().await,
        vec![
            harness.routing.classifier_model.clone(),
            harness.routing.compact_model.clone()
        ]
    );
}

#[tokio::test]
async fn prompts_are_independent() {
    let harness = TestHarness::builder()
        .with_replies(vec![
            MockReply::fail("first classifier down"),
            MockReply::text("a"),
            MockReply::text("0"),
            MockReply::text("b"),
        ])
        .build();

    let first = harness.route("one").await;
    let second = harness.route("two").await;

    assert_eq!(first.classification.route, Route::Complex);
    assert_eq!(second.classification.route, Route::Simple);
    assert_eq!(second.generation.model.id, harness.routing.compact_model);
    assert_eq!(harness.mock_provider.call_count().await, 4);
}
