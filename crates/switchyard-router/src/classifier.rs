// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routing policy: classify a prompt as simple or complex with a small model.
//!
//! The classifier model is asked to answer with a single `0` (simple) or `1`
//! (complex). Anything else, including a failed call, routes to
//! [`FALLBACK_ROUTE`], so a routing decision is always made.

use std::sync::Arc;
use std::time::{Duration, Instant};

use strum::Display;
use switchyard_core::{InferenceParams, ProviderAdapter, ProviderRequest, TokenUsage};
use tracing::{debug, warn};

/// Which generator should answer a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Route {
    /// A short, basic answer is enough. Served by the compact model.
    Simple,
    /// A detailed or reasoned answer is needed. Served by the capable model.
    Complex,
}

impl Route {
    /// Short model-family label used in transcripts (`haiku` / `sonnet`).
    pub fn choice_label(self) -> &'static str {
        match self {
            Route::Simple => "haiku",
            Route::Complex => "sonnet",
        }
    }
}

/// Route used when the classifier reply is unrecognised or the call fails.
///
/// Both cases share this one default: an unclear signal is served by the
/// capable model.
pub const FALLBACK_ROUTE: Route = Route::Complex;

const INSTRUCTION_HEAD: &str = "以下のユーザープロンプトを分析し、処理に適したモデルを選択してください。

プロンプト: ";

const INSTRUCTION_TAIL: &str = "

判断基準:
- 複雑で詳細な回答が必要な場合は「1」
- 簡潔で基本的な回答で十分な場合は「0」

複雑な回答が必要な場合（1を選択）:
- 詳細な説明や分析が必要
- 高度な推論や創造的なタスク
- 複数の観点からの考察
- 長文の生成が必要

簡潔な回答で十分な場合（0を選択）:
- 基本的な質問応答
- 短い返答で済むもの
- 事実の確認程度のもの
- 単純なタスク

回答は必ず「0」または「1」のみで答えてください。それ以外の文字や説明は不要です。";

/// Build the classifier message with `prompt` embedded verbatim.
pub fn classification_prompt(prompt: &str) -> String {
    format!("{INSTRUCTION_HEAD}{prompt}{INSTRUCTION_TAIL}")
}

/// Parse a classifier reply into a route.
///
/// Surrounding whitespace is ignored; the remainder must be exactly `0` or
/// `1`. Returns `None` for anything else.
pub fn parse_reply(reply: &str) -> Option<Route> {
    match reply.trim() {
        "0" => Some(Route::Simple),
        "1" => Some(Route::Complex),
        _ => None,
    }
}

/// How the route in a [`ClassificationOutcome`] was arrived at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteBasis {
    /// The reply was exactly `0` or `1`.
    Classified,
    /// The call succeeded but the reply was something else.
    AmbiguousReply,
    /// The call itself failed.
    CallFailed { error: String },
}

/// Result of one classification call. `route` is always decided.
#[derive(Debug, Clone)]
pub struct ClassificationOutcome {
    /// Classifier text as returned by the backend. Empty when the call failed.
    pub raw_reply: String,
    pub route: Route,
    pub basis: RouteBasis,
    /// Zero when the call failed.
    pub usage: TokenUsage,
    pub elapsed: Duration,
}

impl ClassificationOutcome {
    /// Description of the call failure, if the call failed.
    pub fn failure(&self) -> Option<&str> {
        match &self.basis {
            RouteBasis::CallFailed { error } => Some(error),
            _ => None,
        }
    }

    /// Whether the route came from [`FALLBACK_ROUTE`] rather than the reply.
    pub fn is_fallback(&self) -> bool {
        self.basis != RouteBasis::Classified
    }
}

/// Asks the classifier model whether a prompt needs the capable generator.
pub struct PromptClassifier {
    provider: Arc<dyn ProviderAdapter>,
    model: String,
}

impl PromptClassifier {
    pub fn new(provider: Arc<dyn ProviderAdapter>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Classify `prompt`, making exactly one classifier call.
    ///
    /// Never fails: an unrecognised reply or a failed call yields
    /// [`FALLBACK_ROUTE`] with the cause recorded in the outcome.
    pub async fn decide_route(&self, prompt: &str) -> ClassificationOutcome {
        let request = ProviderRequest {
            model: self.model.clone(),
            prompt: classification_prompt(prompt),
            params: InferenceParams::classification(),
        };

        let started = Instant::now();
        let result = self.provider.complete(request).await;
        let elapsed = started.elapsed();

        match result {
            Ok(response) => {
                let (route, basis) = match parse_reply(&response.content) {
                    Some(route) => (route, RouteBasis::Classified),
                    None => {
                        warn!(
                            reply = %response.content.trim(),
                            fallback = %FALLBACK_ROUTE,
                            "unexpected classifier reply"
                        );
                        (FALLBACK_ROUTE, RouteBasis::AmbiguousReply)
                    }
                };
                debug!(
                    %route,
                    elapsed_ms = elapsed.as_millis() as u64,
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    "prompt classified"
                );
                ClassificationOutcome {
                    raw_reply: response.content,
                    route,
                    basis,
                    usage: response.usage,
                    elapsed,
                }
            }
            Err(e) => {
                warn!(
                    error = %e,
                    fallback = %FALLBACK_ROUTE,
                    "classifier call failed"
                );
                ClassificationOutcome {
                    raw_reply: String::new(),
                    route: FALLBACK_ROUTE,
                    basis: RouteBasis::CallFailed {
                        error: e.to_string(),
                    },
                    usage: TokenUsage::default(),
                    elapsed,
                }
            }
        }
    }
}
