use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use quiz_core::model::{
    AnswerOutcome, Question, QuizSettings, ScoreSummary, SessionState, SessionStateError,
    SessionStep,
};
use quiz_core::{Clock, TimerState};

use super::observer::{NoopObserver, QuizObserver};
use super::view::{QuestionView, QuizResult, QuizSnapshot};
use crate::error::{QuizError, SourceError};
use crate::source::QuestionSource;
use crate::timer::{Timer, TimerEvent};

//
// ─── PUBLIC TYPES ──────────────────────────────────────────────────────────────
//

/// Screen-level state of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnginePhase {
    Idle,
    Loading,
    Active(usize),
    Finished,
}

/// Proof that a load was started; hand it back with the fetch result.
///
/// Only the ticket of the most recent load is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    settings: QuizSettings,
}

impl LoadTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }
}

/// What the presentation layer shows right after an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub question_index: usize,
    pub outcome: AnswerOutcome,
    pub correct_answer: String,
}

impl AnswerFeedback {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.outcome.is_correct()
    }
}

/// Result of [`QuizEngine::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Next(usize),
    Finished(QuizResult),
}

/// Puts the engine back in `Idle` if an in-place load is dropped mid-fetch.
struct PendingLoad<'a> {
    engine: &'a mut QuizEngine,
    generation: u64,
    armed: bool,
}

impl<'a> PendingLoad<'a> {
    fn new(engine: &'a mut QuizEngine, generation: u64) -> Self {
        Self {
            engine,
            generation,
            armed: true,
        }
    }

    fn complete(
        mut self,
        ticket: LoadTicket,
        fetched: Result<Vec<Question>, SourceError>,
    ) -> Result<(), QuizError> {
        self.armed = false;
        self.engine.complete_loading(ticket, fetched)
    }
}

impl Drop for PendingLoad<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let engine = &mut *self.engine;
        if engine.generation == self.generation && matches!(engine.state, EngineState::Loading) {
            warn!(generation = self.generation, "load cancelled before the fetch finished");
            engine.generation = engine.generation.wrapping_add(1);
            engine.state = EngineState::Idle;
        }
    }
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

enum EngineState {
    Idle,
    Loading,
    Running(SessionState),
}

/// Drives one quiz at a time: loading, the answer/advance cycle, and the
/// per-question timer.
///
/// Answering and advancing are separate commands so the caller decides how
/// long the revealed answer stays on screen. Timer expiry resolves the current
/// question as timed out but never advances on its own.
pub struct QuizEngine {
    clock: Clock,
    observer: Arc<dyn QuizObserver>,
    timer: Timer,
    generation: u64,
    state: EngineState,
    last_settings: Option<QuizSettings>,
}

impl Default for QuizEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: Clock::default(),
            observer: Arc::new(NoopObserver),
            timer: Timer::new(),
            generation: 0,
            state: EngineState::Idle,
            last_settings: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn QuizObserver>) -> Self {
        self.observer = observer;
        self
    }

    //
    // ─── LOADING ───────────────────────────────────────────────────────────
    //

    /// Fetch questions for `settings` and start the first one.
    ///
    /// Any quiz in progress is abandoned first.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoQuestionsAvailable` or `QuizError::Transport` when the
    /// fetch fails; the engine is then back in `Idle`. Dropping the future before
    /// it completes also leaves the engine in `Idle`.
    pub async fn start_quiz<S>(&mut self, source: &S, settings: QuizSettings) -> Result<(), QuizError>
    where
        S: QuestionSource + ?Sized,
    {
        let ticket = self.begin_loading(settings);
        let guard = PendingLoad::new(self, ticket.generation);
        let fetched = source.fetch_questions(ticket.settings()).await;
        guard.complete(ticket, fetched)
    }

    /// Start again with the settings of the previous quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotAccepting` if no quiz was ever started, otherwise
    /// the errors of [`QuizEngine::start_quiz`].
    pub async fn restart<S>(&mut self, source: &S) -> Result<(), QuizError>
    where
        S: QuestionSource + ?Sized,
    {
        let settings = self.last_settings.clone().ok_or(QuizError::NotAccepting)?;
        self.start_quiz(source, settings).await
    }

    /// Enter `Loading`, abandoning any current quiz and any load in flight.
    pub fn begin_loading(&mut self, settings: QuizSettings) -> LoadTicket {
        self.timer.stop();
        self.generation = self.generation.wrapping_add(1);
        self.state = EngineState::Loading;
        self.last_settings = Some(settings.clone());

        info!(
            generation = self.generation,
            amount = settings.amount(),
            difficulty = %settings.difficulty(),
            category = ?settings.category(),
            "loading quiz"
        );

        LoadTicket {
            generation: self.generation,
            settings,
        }
    }

    /// Apply the fetch result of a load started with [`QuizEngine::begin_loading`].
    ///
    /// # Errors
    ///
    /// Returns `QuizError::StaleLoad` (leaving the engine untouched) if a newer
    /// load or `return_to_setup` superseded the ticket. Fetch failures are
    /// mapped as in [`QuizEngine::start_quiz`].
    pub fn complete_loading(
        &mut self,
        ticket: LoadTicket,
        fetched: Result<Vec<Question>, SourceError>,
    ) -> Result<(), QuizError> {
        if ticket.generation != self.generation || !matches!(self.state, EngineState::Loading) {
            warn!(
                ticket = ticket.generation,
                current = self.generation,
                "dropping result of abandoned load"
            );
            return Err(QuizError::StaleLoad);
        }

        let questions = match fetched {
            Ok(questions) => questions,
            Err(err) => {
                warn!(error = %err, "failed to load questions");
                self.state = EngineState::Idle;
                return Err(err.into());
            }
        };

        let session = match SessionState::new(ticket.settings, questions, self.clock.now()) {
            Ok(session) => session,
            Err(_) => {
                self.state = EngineState::Idle;
                return Err(QuizError::NoQuestionsAvailable);
            }
        };

        info!(questions = session.total(), "quiz started");
        let seconds = session.settings().seconds_per_question();
        self.state = EngineState::Running(session);
        self.start_question_timer(0, seconds);
        Ok(())
    }

    /// Abandon everything and go back to the setup screen.
    pub fn return_to_setup(&mut self) {
        self.timer.stop();
        self.generation = self.generation.wrapping_add(1);
        self.state = EngineState::Idle;
        debug!("returned to setup");
    }

    //
    // ─── ANSWER CYCLE ──────────────────────────────────────────────────────
    //

    /// Record `choice` for the current question and stop its timer.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotAccepting` outside `Active` or when the current
    /// question is already resolved (answered or timed out).
    pub fn submit_answer(&mut self, choice: &str) -> Result<AnswerFeedback, QuizError> {
        let EngineState::Running(session) = &mut self.state else {
            return Err(QuizError::NotAccepting);
        };
        if session.is_complete() || session.is_current_resolved() {
            return Err(QuizError::NotAccepting);
        }

        self.timer.stop();
        let question_index = session.current_index();
        let outcome = session
            .record_answer(choice)
            .map_err(|_| QuizError::NotAccepting)?
            .clone();
        let correct_answer = session
            .current_question()
            .map(|q| q.correct_answer().to_string())
            .unwrap_or_default();

        debug!(
            question = question_index,
            correct = outcome.is_correct(),
            score = session.score(),
            "answer recorded"
        );

        Ok(AnswerFeedback {
            question_index,
            outcome,
            correct_answer,
        })
    }

    /// Move on from a resolved question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::QuestionNotResolved` if the current question has neither
    /// an answer nor an expired timer, and `QuizError::NotAccepting` outside `Active`.
    pub fn advance(&mut self) -> Result<Advance, QuizError> {
        let EngineState::Running(session) = &mut self.state else {
            return Err(QuizError::NotAccepting);
        };

        let step = session.advance(self.clock.now()).map_err(|err| match err {
            SessionStateError::Unresolved => QuizError::QuestionNotResolved,
            _ => QuizError::NotAccepting,
        })?;
        self.timer.stop();

        match step {
            SessionStep::Next(index) => {
                let seconds = session.settings().seconds_per_question();
                debug!(question = index, "advanced");
                self.start_question_timer(index, seconds);
                Ok(Advance::Next(index))
            }
            SessionStep::Completed => {
                let result = QuizResult::from_session(session).ok_or(QuizError::NotAccepting)?;
                info!(
                    score = result.score.correct,
                    total = result.score.total,
                    percent = result.percent(),
                    "quiz finished"
                );
                Ok(Advance::Finished(result))
            }
        }
    }

    /// Report one elapsed second to the running timer.
    ///
    /// On expiry the current question is resolved as timed out.
    pub fn elapse_second(&mut self) -> Option<TimerEvent> {
        let event = self.timer.elapse_second()?;
        if event == TimerEvent::Expired {
            if let EngineState::Running(session) = &mut self.state {
                if session.record_timeout().is_ok() {
                    debug!(question = session.current_index(), "time is up");
                }
            }
        }
        Some(event)
    }

    fn start_question_timer(&mut self, index: usize, seconds: u32) {
        let tick_observer = Arc::clone(&self.observer);
        let expire_observer = Arc::clone(&self.observer);
        self.timer.start(
            seconds,
            move |remaining| tick_observer.on_tick(index, remaining),
            move || expire_observer.on_expire(index),
        );
    }

    //
    // ─── READ ACCESS ───────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn phase(&self) -> EnginePhase {
        match &self.state {
            EngineState::Idle => EnginePhase::Idle,
            EngineState::Loading => EnginePhase::Loading,
            EngineState::Running(session) if session.is_complete() => EnginePhase::Finished,
            EngineState::Running(session) => EnginePhase::Active(session.current_index()),
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&SessionState> {
        match &self.state {
            EngineState::Running(session) => Some(session),
            _ => None,
        }
    }

    /// Settings of the current or most recent quiz.
    #[must_use]
    pub fn settings(&self) -> Option<&QuizSettings> {
        self.last_settings.as_ref()
    }

    #[must_use]
    pub fn timer_state(&self) -> TimerState {
        self.timer.state()
    }

    #[must_use]
    pub fn score(&self) -> ScoreSummary {
        self.session()
            .map(SessionState::score_summary)
            .unwrap_or_default()
    }

    /// Final result, once the quiz is finished.
    #[must_use]
    pub fn result(&self) -> Option<QuizResult> {
        self.session().and_then(QuizResult::from_session)
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        QuizSnapshot {
            phase: self.phase(),
            question: self.session().and_then(QuestionView::from_session),
            timer: self.timer_state(),
            score: self.score(),
            result: self.result(),
        }
    }
}

impl fmt::Debug for QuizEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizEngine")
            .field("phase", &self.phase())
            .field("generation", &self.generation)
            .field("timer", &self.timer)
            .field("score", &self.score())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
