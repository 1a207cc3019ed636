//! Async driver that serves a front end through [`UiState`].
//!
//! The front end only flips intents in the shared state. [`Session::step`]
//! turns those into prompt picks and assessments, one at a time.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::info;

use crate::analyzer::{AnalysisOutcome, LiteracyAnalyzer};
use crate::prompts::PromptBank;
use crate::provider::CompletionProvider;
use crate::ui::{
    UiState, quit_requested, set_analysis_result, set_model, set_question, take_pending_answer,
    take_question_request,
};

/// Default interval between polls of the shared state.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// What a single [`Session::step`] did.
#[derive(Debug)]
pub enum StepOutcome {
    Idle,
    QuestionPicked(String),
    Analyzed(AnalysisOutcome),
}

pub struct Session<P> {
    state: Arc<Mutex<UiState>>,
    bank: PromptBank,
    analyzer: LiteracyAnalyzer<P>,
}

impl<P: CompletionProvider> Session<P> {
    pub fn new(state: Arc<Mutex<UiState>>, bank: PromptBank, analyzer: LiteracyAnalyzer<P>) -> Self {
        set_model(&state, analyzer.provider().model());
        Self {
            state,
            bank,
            analyzer,
        }
    }

    /// Handle at most one pending intent. Question requests go first.
    pub async fn step(&self) -> StepOutcome {
        if take_question_request(&self.state) {
            let question = self.bank.pick().to_string();
            info!("Generated question: {question}");
            set_question(&self.state, &question);
            return StepOutcome::QuestionPicked(question);
        }

        let Some(answer) = take_pending_answer(&self.state) else {
            return StepOutcome::Idle;
        };
        let outcome = self.analyzer.analyze_answer(&answer).await;
        set_analysis_result(&self.state, outcome.message(), outcome.rating());
        StepOutcome::Analyzed(outcome)
    }

    /// Step until the front end asks to quit.
    pub async fn run(&self, poll: Duration) {
        while !quit_requested(&self.state) {
            if matches!(self.step().await, StepOutcome::Idle) {
                tokio::time::sleep(poll).await;
            }
        }
        info!("Session finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::tests::RecordingProvider;
    use crate::error::AssessmentError;
    use crate::ui::{enter_main_screen, request_quit, submit_answer};

    fn session(provider: RecordingProvider) -> (Arc<Mutex<UiState>>, Session<RecordingProvider>) {
        let state = Arc::new(Mutex::new(UiState::default()));
        let session = Session::new(
            state.clone(),
            PromptBank::default(),
            LiteracyAnalyzer::new(provider),
        );
        (state, session)
    }

    #[tokio::test]
    async fn idle_without_intents() {
        let (_state, session) = session(RecordingProvider::replying("x"));
        assert!(matches!(session.step().await, StepOutcome::Idle));
    }

    #[tokio::test]
    async fn model_is_published_on_start() {
        let (state, _session) = session(RecordingProvider::replying("x"));
        assert_eq!(state.lock().unwrap().model, "recording");
    }

    #[tokio::test]
    async fn entering_main_screen_shows_a_bank_prompt() {
        let (state, session) = session(RecordingProvider::replying("x"));
        enter_main_screen(&state);
        let StepOutcome::QuestionPicked(q) = session.step().await else {
            panic!("expected a question");
        };
        assert!(PromptBank::default().contains(&q));
        assert_eq!(state.lock().unwrap().question, q);
    }

    #[tokio::test]
    async fn answer_is_assessed_and_written_back() {
        let (state, session) = session(RecordingProvider::replying(
            "  Clear and correct.\nOverall literacy rating: 9/10\n",
        ));
        assert!(submit_answer(&state, "Reading widens the world."));
        let outcome = session.step().await;
        assert!(matches!(outcome, StepOutcome::Analyzed(AnalysisOutcome::Assessed(_))));

        let s = state.lock().unwrap();
        assert_eq!(
            s.analysis_result,
            "Clear and correct.\nOverall literacy rating: 9/10"
        );
        assert_eq!(s.rating, Some(9));
        assert!(!s.busy);
    }

    #[tokio::test]
    async fn blank_answer_shows_prompt_without_calling_provider() {
        let (state, session) = session(RecordingProvider::replying("x"));
        submit_answer(&state, "   ");
        session.step().await;
        assert_eq!(
            state.lock().unwrap().analysis_result,
            "Please enter an answer before analyzing."
        );
        assert_eq!(session.analyzer.provider().call_count(), 0);
    }

    #[tokio::test]
    async fn failure_shows_static_message() {
        let (state, session) =
            session(RecordingProvider::with(|| Err(AssessmentError::Timeout)));
        submit_answer(&state, "Some answer");
        session.step().await;
        let s = state.lock().unwrap();
        assert_eq!(s.analysis_result, crate::error::TIMEOUT_MESSAGE);
        assert!(s.rating.is_none());
        assert!(!s.busy);
    }

    #[tokio::test]
    async fn run_stops_on_quit() {
        let (state, session) = session(RecordingProvider::replying("x"));
        request_quit(&state);
        tokio::time::timeout(Duration::from_secs(1), session.run(Duration::from_millis(5)))
            .await
            .unwrap();
    }
}
