/// Hooks a presentation layer installs to hear about countdown progress.
///
/// Called from inside `QuizEngine::elapse_second` (and on question start for the
/// initial tick), so implementations must not call back into the engine.
pub trait QuizObserver: Send + Sync {
    fn on_tick(&self, _question_index: usize, _remaining_seconds: u32) {}

    fn on_expire(&self, _question_index: usize) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl QuizObserver for NoopObserver {}
