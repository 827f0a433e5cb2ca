use std::sync::Arc;
use std::time::Duration;

use quiz_core::model::{AnswerOutcome, Difficulty, QuizSettings};
use quiz_services::{CannedSource, IntervalTicks, QuizEngine, spawn_ticker};
use tokio::sync::Mutex;

const BODY: &str = r#"{
    "response_code": 0,
    "results": [
        {
            "category": "History",
            "difficulty": "easy",
            "question": "In which year did the Berlin Wall fall?",
            "correct_answer": "1989",
            "incorrect_answers": ["1987", "1991", "1985"]
        },
        {
            "category": "History",
            "difficulty": "easy",
            "question": "Who was the first emperor of Rome?",
            "correct_answer": "Augustus",
            "incorrect_answers": ["Nero", "Julius Caesar", "Caligula"]
        },
        {
            "category": "History",
            "difficulty": "easy",
            "question": "Which ship sank in 1912?",
            "correct_answer": "Titanic",
            "incorrect_answers": ["Lusitania", "Britannic", "Olympic"]
        }
    ]
}"#;

async fn started_engine() -> Arc<Mutex<QuizEngine>> {
    quiz_services::logging::init(true);
    let source = CannedSource::from_json(BODY).unwrap();
    let mut engine = QuizEngine::new();
    engine
        .start_quiz(&source, QuizSettings::new(None, Difficulty::Easy, 3, 5))
        .await
        .unwrap();
    Arc::new(Mutex::new(engine))
}

#[tokio::test(start_paused = true)]
async fn real_time_ticks_expire_the_question() {
    let engine = started_engine().await;
    let _ticker = spawn_ticker(&engine, IntervalTicks::every_second());

    tokio::time::sleep(Duration::from_millis(2_500)).await;
    {
        let engine = engine.lock().await;
        assert_eq!(engine.timer_state().remaining_seconds, 3);
        assert!(engine.timer_state().running);
    }

    tokio::time::sleep(Duration::from_secs(3)).await;
    let engine = engine.lock().await;
    assert!(!engine.timer_state().running);
    assert_eq!(
        engine.session().unwrap().current_outcome(),
        Some(&AnswerOutcome::TimedOut)
    );
}

#[tokio::test(start_paused = true)]
async fn answering_before_expiry_wins() {
    let engine = started_engine().await;
    let _ticker = spawn_ticker(&engine, IntervalTicks::every_second());

    tokio::time::sleep(Duration::from_millis(1_500)).await;
    engine.lock().await.submit_answer("1989").unwrap();

    tokio::time::sleep(Duration::from_secs(10)).await;
    let engine = engine.lock().await;
    let outcome = engine.session().unwrap().current_outcome().cloned();
    assert_eq!(
        outcome,
        Some(AnswerOutcome::Correct {
            choice: "1989".into()
        })
    );
    assert_eq!(engine.score().correct, 1);
}

#[tokio::test(start_paused = true)]
async fn ticker_stops_when_engine_is_dropped() {
    let engine = started_engine().await;
    let ticker = spawn_ticker(&engine, IntervalTicks::every_second());
    drop(engine);

    tokio::time::timeout(Duration::from_secs(5), ticker)
        .await
        .expect("ticker should exit")
        .unwrap();
}
