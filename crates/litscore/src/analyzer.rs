//! Turning a user's answer into a literacy assessment.
//!
//! [`LiteracyAnalyzer`] is the one unit of real behaviour in the crate: it
//! rejects blank answers without touching the network, wraps everything
//! else in the rubric conversation, makes a single provider call and
//! returns either the trimmed reply or a categorised error.

use tracing::{error, info, warn};

use crate::error::{AssessmentError, EMPTY_ANSWER_MESSAGE};
use crate::provider::CompletionProvider;
use crate::rating::extract_rating;
use crate::rubric::{self, DEFAULT_RUBRIC};

/// Result of analysing one submission.
#[derive(Debug)]
pub enum AnalysisOutcome {
    /// The provider's assessment, trimmed.
    Assessed(String),
    /// The answer was empty or whitespace-only; nothing was sent.
    EmptyInput,
    /// The provider call failed.
    Failed(AssessmentError),
}

impl AnalysisOutcome {
    /// Text to show the user for this outcome.
    pub fn message(&self) -> &str {
        match self {
            Self::Assessed(text) => text,
            Self::EmptyInput => EMPTY_ANSWER_MESSAGE,
            Self::Failed(err) => err.user_message(),
        }
    }

    /// Overall 0–10 rating, when the assessment states one.
    pub fn rating(&self) -> Option<u8> {
        match self {
            Self::Assessed(text) => extract_rating(text),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Assessed(_))
    }
}

/// Sends answers to a [`CompletionProvider`] under a fixed rubric.
pub struct LiteracyAnalyzer<P> {
    provider: P,
    rubric: String,
}

impl<P: CompletionProvider> LiteracyAnalyzer<P> {
    /// Analyzer using the stock rubric.
    pub fn new(provider: P) -> Self {
        Self::with_rubric(provider, DEFAULT_RUBRIC)
    }

    pub fn with_rubric(provider: P, rubric: impl Into<String>) -> Self {
        let analyzer = Self {
            provider,
            rubric: rubric.into(),
        };
        info!(
            "LiteracyAnalyzer initialized: provider={}, model={}",
            analyzer.provider.provider_name(),
            analyzer.provider.model()
        );
        analyzer
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn rubric(&self) -> &str {
        &self.rubric
    }

    /// Assess `text`, returning the trimmed reply or the failure category.
    ///
    /// Does not check for blank input; use [`analyze_answer`](Self::analyze_answer)
    /// for user submissions.
    pub async fn assess(&self, text: &str) -> Result<String, AssessmentError> {
        let messages = rubric::build_messages(&self.rubric, text);
        info!("Sending assessment request ({} chars)", text.chars().count());
        match self.provider.complete(messages).await {
            Ok(reply) => {
                info!("Assessment received ({} chars)", reply.chars().count());
                Ok(reply.trim().to_string())
            }
            Err(e) => {
                error!("Assessment failed: {e}");
                Err(e)
            }
        }
    }

    /// Analyse a user submission. Blank submissions never reach the provider.
    pub async fn analyze_answer(&self, answer: &str) -> AnalysisOutcome {
        if answer.trim().is_empty() {
            warn!("Empty answer submitted; skipping assessment");
            return AnalysisOutcome::EmptyInput;
        }
        match self.assess(answer).await {
            Ok(text) => AnalysisOutcome::Assessed(text),
            Err(e) => AnalysisOutcome::Failed(e),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::Message;
    use crate::provider::CompletionFuture;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Provider that records every conversation and replays a fixed reply.
    pub(crate) struct RecordingProvider {
        reply: Mutex<Box<dyn FnMut() -> Result<String, AssessmentError> + Send>>,
        pub(crate) calls: AtomicUsize,
        pub(crate) seen: Mutex<Vec<Vec<Message>>>,
    }

    impl RecordingProvider {
        pub(crate) fn replying(text: &str) -> Self {
            let text = text.to_string();
            Self::with(move || Ok(text.clone()))
        }

        pub(crate) fn with(
            f: impl FnMut() -> Result<String, AssessmentError> + Send + 'static,
        ) -> Self {
            Self {
                reply: Mutex::new(Box::new(f)),
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CompletionProvider for RecordingProvider {
        fn complete(&self, messages: Vec<Message>) -> CompletionFuture<'_> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(messages);
            let result = {
                let mut reply = self.reply.lock().unwrap();
                (*reply)()
            };
            Box::pin(async move { result })
        }

        fn model(&self) -> &str {
            "recording"
        }
    }

    #[tokio::test]
    async fn blank_answers_never_reach_the_provider() {
        let analyzer = LiteracyAnalyzer::new(RecordingProvider::replying("unused"));
        for blank in ["", "   ", "\n\t  \r\n"] {
            let outcome = analyzer.analyze_answer(blank).await;
            assert!(matches!(outcome, AnalysisOutcome::EmptyInput));
            assert_eq!(outcome.message(), "Please enter an answer before analyzing.");
        }
        assert_eq!(analyzer.provider().call_count(), 0);
    }

    #[tokio::test]
    async fn reply_is_trimmed_and_otherwise_untouched() {
        let reply = "\n\n  Grammar: fine.\n\n  Overall literacy rating: 8/10  \n";
        let analyzer = LiteracyAnalyzer::new(RecordingProvider::replying(reply));
        let outcome = analyzer.analyze_answer("I like to read.").await;
        assert_eq!(
            outcome.message(),
            "Grammar: fine.\n\n  Overall literacy rating: 8/10"
        );
        assert_eq!(outcome.rating(), Some(8));
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn each_failure_maps_to_its_static_message() {
        let cases: Vec<(AssessmentError, &str)> = vec![
            (AssessmentError::Timeout, crate::error::TIMEOUT_MESSAGE),
            (
                AssessmentError::Api {
                    status: 500,
                    message: "x".into(),
                },
                crate::error::API_ERROR_MESSAGE,
            ),
            (
                AssessmentError::InvalidRequest {
                    status: 400,
                    message: "x".into(),
                },
                crate::error::INVALID_REQUEST_MESSAGE,
            ),
            (
                AssessmentError::Unexpected("x".into()),
                crate::error::UNEXPECTED_MESSAGE,
            ),
        ];
        for (err, expected) in cases {
            let mut slot = Some(err);
            let provider = RecordingProvider::with(move || {
                Err(slot
                    .take()
                    .unwrap_or_else(|| AssessmentError::Unexpected("reused".into())))
            });
            let analyzer = LiteracyAnalyzer::new(provider);
            let outcome = analyzer.analyze_answer("Some text.").await;
            assert!(matches!(outcome, AnalysisOutcome::Failed(_)));
            assert_eq!(outcome.message(), expected);
            assert_eq!(outcome.rating(), None);
        }
    }

    #[tokio::test]
    async fn identical_input_sends_identical_conversations() {
        let analyzer = LiteracyAnalyzer::new(RecordingProvider::replying("ok"));
        analyzer.analyze_answer("Same words.").await;
        analyzer.analyze_answer("Same words.").await;

        let seen = analyzer.provider().seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], seen[1]);
        assert_eq!(seen[0][0], Message::system(DEFAULT_RUBRIC));
        assert_eq!(seen[0][1], Message::user("User's text: Same words."));
    }

    #[tokio::test]
    async fn custom_rubric_is_sent_as_system_message() {
        let analyzer =
            LiteracyAnalyzer::with_rubric(RecordingProvider::replying("ok"), "Grade harshly.");
        analyzer.assess("text").await.unwrap();
        let seen = analyzer.provider().seen.lock().unwrap();
        assert_eq!(seen[0][0].content, "Grade harshly.");
        assert_eq!(analyzer.rubric(), "Grade harshly.");
    }

    #[tokio::test]
    async fn init_and_reply_length_are_logged() {
        use crate::ui::tracing::UiTracingLayer;
        use tracing_subscriber::layer::SubscriberExt;

        let (layer, buffer) = UiTracingLayer::new();
        let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(layer));

        let analyzer = LiteracyAnalyzer::new(RecordingProvider::replying("Très bien"));
        analyzer.assess("Café au lait.").await.unwrap();

        let messages: Vec<String> = buffer.drain().into_iter().map(|l| l.message).collect();
        assert!(
            messages
                .iter()
                .any(|m| m == "LiteracyAnalyzer initialized: provider=custom, model=recording"),
            "got {messages:?}"
        );
        assert!(messages.contains(&"Sending assessment request (13 chars)".to_string()));
        assert!(messages.contains(&"Assessment received (9 chars)".to_string()));
    }
}
