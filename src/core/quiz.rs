//! # Quiz Session
//!
//! Drives one practice quiz: a question at a time, a score, a completion
//! screen and a restart.
//!
//! ```text
//!  Loading ──load()──► InProgress ──submit_answer()──► Answered
//!     │                    ▲                              │
//!     │                    └────── advance(gen) ◄─────────┤ (after the feedback delay)
//!     ▼                                                   ▼
//!   Empty                 InProgress ◄──restart()──── Completed
//! ```
//!
//! The session does no I/O and owns no timer. `submit_answer` hands back a
//! [`ScheduledAdvance`]; whoever drives the session waits on it and feeds
//! the generation back through [`QuizSession::advance`]. A restart or
//! dispose bumps the generation, so a timer that fires late is a no-op.

use std::fmt;
use std::time::Duration;

use log::{debug, info, warn};
use serde_json::json;
use tokio::time::Instant;

use crate::core::analytics::EventLog;
use crate::core::course::CourseContext;
use crate::core::question_bank::Question;

/// How long answer feedback stays up before the quiz moves on.
pub const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Waiting for the question bank.
    Loading,
    /// The bank had nothing for this unit (or couldn't be reached).
    Empty,
    /// Waiting for an answer to the current question.
    InProgress,
    /// Feedback is showing; an advance is scheduled.
    Answered,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub is_correct: bool,
    pub message: String,
}

/// Everything a renderer needs. Two sessions over the same bank in the
/// same position compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizState {
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub selected_answer: Option<usize>,
    pub score: u32,
    pub feedback: Option<Feedback>,
    pub phase: QuizPhase,
}

impl QuizState {
    fn initial(questions: Vec<Question>, phase: QuizPhase) -> Self {
        Self {
            questions,
            current_index: 0,
            selected_answer: None,
            score: 0,
            feedback: None,
            phase,
        }
    }
}

/// A pending "move on" step. Wait for it, then pass `generation` to
/// [`QuizSession::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAdvance {
    pub generation: u64,
    pub delay: Duration,
}

impl ScheduledAdvance {
    /// Sleeps for the feedback delay and yields the generation.
    pub async fn wait(self) -> u64 {
        tokio::time::sleep(self.delay).await;
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// No question bank is loaded, or it was empty.
    NoQuestions,
    /// The session is not in a phase that accepts this operation.
    NotAccepting(QuizPhase),
    SelectionOutOfRange { selection: usize, options: usize },
    Disposed,
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::NoQuestions => write!(f, "no practice questions are loaded"),
            QuizError::NotAccepting(phase) => write!(f, "not accepted while {phase:?}"),
            QuizError::SelectionOutOfRange { selection, options } => write!(
                f,
                "option {} is out of range (question has {} options)",
                selection + 1,
                options
            ),
            QuizError::Disposed => write!(f, "quiz session has been closed"),
        }
    }
}

impl std::error::Error for QuizError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Green,
    Yellow,
    Red,
}

impl ScoreBand {
    pub fn for_percentage(percentage: u32) -> Self {
        if percentage >= 70 {
            ScoreBand::Green
        } else if percentage >= 50 {
            ScoreBand::Yellow
        } else {
            ScoreBand::Red
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    pub score: u32,
    pub total: usize,
    pub percentage: u32,
    pub band: ScoreBand,
    pub message: &'static str,
}

/// Rounded percentage, halves rounding up.
pub fn percentage(score: u32, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(score) * 100.0 / total as f64).round() as u32
}

fn encouragement(percentage: u32) -> &'static str {
    if percentage >= 80 {
        "Excellent! You've mastered this material."
    } else if percentage >= 60 {
        "Good job! You're on the right track."
    } else {
        "Keep practicing! Review the concepts and try again."
    }
}

pub struct QuizSession {
    state: QuizState,
    course_id: String,
    unit_id: String,
    events: EventLog,
    feedback_delay: Duration,
    generation: u64,
    disposed: bool,
    shown_at: Instant,
}

impl QuizSession {
    /// Creates a session for the course's current unit, in `Loading`.
    pub fn new(course: &CourseContext, events: EventLog, feedback_delay: Duration) -> Self {
        Self {
            state: QuizState::initial(Vec::new(), QuizPhase::Loading),
            course_id: course.course_id.clone(),
            unit_id: course.current_unit.id.clone(),
            events,
            feedback_delay,
            generation: 0,
            disposed: false,
            shown_at: Instant::now(),
        }
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn phase(&self) -> QuizPhase {
        self.state.phase
    }

    pub fn unit_id(&self) -> &str {
        &self.unit_id
    }

    pub fn total(&self) -> usize {
        self.state.questions.len()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.state.questions.get(self.state.current_index)
    }

    /// Installs the fetched questions. Only valid while `Loading`.
    pub fn load(&mut self, questions: Vec<Question>) -> Result<(), QuizError> {
        if self.state.phase != QuizPhase::Loading {
            return Err(QuizError::NotAccepting(self.state.phase));
        }

        let phase = if questions.is_empty() {
            QuizPhase::Empty
        } else {
            QuizPhase::InProgress
        };
        let count = questions.len();
        self.state = QuizState::initial(questions, phase);
        self.shown_at = Instant::now();

        info!(
            "Practice session loaded: unit={}, {} question(s)",
            self.unit_id, count
        );
        self.events.record(
            "practice_session_started",
            json!({
                "courseId": self.course_id,
                "unitId": self.unit_id,
                "questionCount": count,
            }),
        );
        Ok(())
    }

    /// The bank couldn't be reached. The session shows its empty state.
    pub fn load_failed(&mut self, error: &dyn fmt::Display) {
        warn!("Error fetching questions for {}: {}", self.unit_id, error);
        if self.state.phase == QuizPhase::Loading {
            self.state.phase = QuizPhase::Empty;
        }
    }

    /// Grades `selection` (an option index) for the current question.
    ///
    /// On success the session is `Answered` and the returned advance must be
    /// waited on and fed back to [`advance`](Self::advance).
    pub fn submit_answer(&mut self, selection: usize) -> Result<ScheduledAdvance, QuizError> {
        if self.disposed {
            return Err(QuizError::Disposed);
        }
        match self.state.phase {
            QuizPhase::InProgress => {}
            QuizPhase::Loading | QuizPhase::Empty => return Err(QuizError::NoQuestions),
            other => return Err(QuizError::NotAccepting(other)),
        }

        let question = self
            .state
            .questions
            .get(self.state.current_index)
            .ok_or(QuizError::NoQuestions)?;
        if selection >= question.options.len() {
            return Err(QuizError::SelectionOutOfRange {
                selection,
                options: question.options.len(),
            });
        }

        let is_correct = question.is_correct(selection);
        let message = if is_correct {
            "Correct! Well done.".to_string()
        } else {
            format!(
                "Incorrect. The right answer is: {}",
                question.correct_option().unwrap_or("(unavailable)")
            )
        };
        let payload = json!({
            "questionId": question.id,
            "isCorrect": is_correct,
            "selectedAnswer": selection,
            "correctAnswer": question.correct_answer,
            "timeSpent": self.shown_at.elapsed().as_millis() as u64,
        });

        if is_correct {
            self.state.score += 1;
        }
        self.state.selected_answer = Some(selection);
        self.state.feedback = Some(Feedback {
            is_correct,
            message,
        });
        self.state.phase = QuizPhase::Answered;
        self.generation += 1;

        debug!(
            "Answer submitted: index={}, selection={}, correct={}, score={}",
            self.state.current_index, selection, is_correct, self.state.score
        );
        self.events.record("practice_answer_submitted", payload);

        Ok(ScheduledAdvance {
            generation: self.generation,
            delay: self.feedback_delay,
        })
    }

    /// Applies a scheduled advance. Returns `false` (and changes nothing)
    /// if the advance is stale or the session is gone.
    pub fn advance(&mut self, generation: u64) -> bool {
        if self.disposed || generation != self.generation || self.state.phase != QuizPhase::Answered
        {
            debug!(
                "Ignoring stale advance: gen={} (current={}), phase={:?}, disposed={}",
                generation, self.generation, self.state.phase, self.disposed
            );
            return false;
        }

        if self.state.current_index + 1 < self.state.questions.len() {
            self.state.current_index += 1;
            self.state.selected_answer = None;
            self.state.feedback = None;
            self.state.phase = QuizPhase::InProgress;
            self.shown_at = Instant::now();
        } else {
            self.state.phase = QuizPhase::Completed;
            let total = self.total();
            info!(
                "Practice session completed: {}/{} on {}",
                self.state.score, total, self.unit_id
            );
            self.events.record(
                "practice_session_completed",
                json!({
                    "score": self.state.score,
                    "totalQuestions": total,
                    "percentageCorrect": percentage(self.state.score, total),
                }),
            );
        }
        true
    }

    /// Starts the same quiz over. Only valid once completed.
    pub fn restart(&mut self) -> Result<(), QuizError> {
        if self.disposed {
            return Err(QuizError::Disposed);
        }
        if self.state.phase != QuizPhase::Completed {
            return Err(QuizError::NotAccepting(self.state.phase));
        }

        let previous_score = self.state.score;
        let questions = std::mem::take(&mut self.state.questions);
        let total = questions.len();
        self.state = QuizState::initial(questions, QuizPhase::InProgress);
        self.generation += 1;
        self.shown_at = Instant::now();

        self.events.record(
            "practice_session_restarted",
            json!({
                "previousScore": previous_score,
                "totalQuestions": total,
            }),
        );
        Ok(())
    }

    /// Tears the session down. Safe to call more than once.
    pub fn dispose(&mut self) {
        if !self.disposed {
            debug!("Quiz session for {} disposed", self.unit_id);
        }
        self.disposed = true;
    }

    pub fn percentage(&self) -> u32 {
        percentage(self.state.score, self.total())
    }

    /// How far through the quiz the student is, 0..=100.
    pub fn progress_percent(&self) -> f64 {
        if self.state.questions.is_empty() {
            return 0.0;
        }
        self.state.current_index as f64 / self.total() as f64 * 100.0
    }

    /// Final score read-out, once completed.
    pub fn summary(&self) -> Option<QuizSummary> {
        if self.state.phase != QuizPhase::Completed {
            return None;
        }
        let percentage = self.percentage();
        Some(QuizSummary {
            score: self.state.score,
            total: self.total(),
            percentage,
            band: ScoreBand::for_percentage(percentage),
            message: encouragement(percentage),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::course::CourseCatalog;
    use crate::test_support::sample_questions;

    fn session(events: &EventLog) -> QuizSession {
        let course = CourseCatalog::builtin().context(None, None);
        QuizSession::new(&course, events.clone(), DEFAULT_FEEDBACK_DELAY)
    }

    fn loaded(events: &EventLog) -> QuizSession {
        let mut s = session(events);
        s.load(sample_questions()).unwrap();
        s
    }

    /// Submits and immediately applies the advance, skipping the delay.
    fn answer(s: &mut QuizSession, selection: usize) {
        let ticket = s.submit_answer(selection).unwrap();
        assert!(s.advance(ticket.generation));
    }

    fn event_names(events: &EventLog) -> Vec<String> {
        events.read_all().into_iter().map(|e| e.name).collect()
    }

    #[test]
    fn test_new_session_is_loading() {
        let events = EventLog::new();
        let s = session(&events);
        assert_eq!(s.phase(), QuizPhase::Loading);
        assert_eq!(s.unit_id(), "unit1");
        assert!(events.is_empty());
    }

    #[test]
    fn test_load_starts_quiz_and_emits_event() {
        let events = EventLog::new();
        let s = loaded(&events);
        assert_eq!(s.phase(), QuizPhase::InProgress);
        assert_eq!(s.current_question().unwrap().id, "s1");

        let started = &events.read_all()[0];
        assert_eq!(started.name, "practice_session_started");
        assert_eq!(started.data["questionCount"], 3);
        assert_eq!(started.data["unitId"], "unit1");
        assert_eq!(started.data["courseId"], "BIO101");
    }

    #[test]
    fn test_load_twice_is_rejected() {
        let events = EventLog::new();
        let mut s = loaded(&events);
        assert_eq!(
            s.load(sample_questions()),
            Err(QuizError::NotAccepting(QuizPhase::InProgress))
        );
    }

    #[test]
    fn test_empty_bank_goes_to_empty_state() {
        let events = EventLog::new();
        let mut s = session(&events);
        s.load(Vec::new()).unwrap();
        assert_eq!(s.phase(), QuizPhase::Empty);
        assert_eq!(s.submit_answer(0), Err(QuizError::NoQuestions));
    }

    #[test]
    fn test_load_failed_emits_nothing() {
        let events = EventLog::new();
        let mut s = session(&events);
        s.load_failed(&"connection refused");
        assert_eq!(s.phase(), QuizPhase::Empty);
        assert!(events.is_empty());
    }

    #[test]
    fn test_submit_before_load_is_rejected() {
        let events = EventLog::new();
        let mut s = session(&events);
        assert_eq!(s.submit_answer(0), Err(QuizError::NoQuestions));
        assert!(events.is_empty());
    }

    #[test]
    fn test_out_of_range_selection_is_rejected() {
        let events = EventLog::new();
        let mut s = loaded(&events);
        let before = s.state().clone();

        assert_eq!(
            s.submit_answer(4),
            Err(QuizError::SelectionOutOfRange {
                selection: 4,
                options: 4
            })
        );
        assert_eq!(s.state(), &before);
        assert_eq!(events.len(), 1); // just the start event
    }

    #[test]
    fn test_correct_answer_scores_and_shows_feedback() {
        let events = EventLog::new();
        let mut s = loaded(&events);

        let ticket = s.submit_answer(1).unwrap();
        assert_eq!(ticket.delay, DEFAULT_FEEDBACK_DELAY);
        assert_eq!(s.phase(), QuizPhase::Answered);
        assert_eq!(s.state().score, 1);
        assert_eq!(s.state().selected_answer, Some(1));
        let feedback = s.state().feedback.as_ref().unwrap();
        assert!(feedback.is_correct);
        assert_eq!(feedback.message, "Correct! Well done.");

        let submitted = &events.read_all()[1];
        assert_eq!(submitted.name, "practice_answer_submitted");
        assert_eq!(submitted.data["questionId"], "s1");
        assert_eq!(submitted.data["isCorrect"], true);
        assert_eq!(submitted.data["selectedAnswer"], 1);
        assert_eq!(submitted.data["correctAnswer"], 1);
        assert!(submitted.data["timeSpent"].is_u64());
    }

    #[test]
    fn test_wrong_answer_names_the_right_option() {
        let events = EventLog::new();
        let mut s = loaded(&events);
        s.submit_answer(0).unwrap();

        assert_eq!(s.state().score, 0);
        let feedback = s.state().feedback.as_ref().unwrap();
        assert!(!feedback.is_correct);
        assert_eq!(feedback.message, "Incorrect. The right answer is: B");
    }

    #[test]
    fn test_second_submit_while_answered_is_rejected() {
        let events = EventLog::new();
        let mut s = loaded(&events);
        s.submit_answer(1).unwrap();
        assert_eq!(
            s.submit_answer(1),
            Err(QuizError::NotAccepting(QuizPhase::Answered))
        );
        assert_eq!(s.state().score, 1);
    }

    #[test]
    fn test_advance_moves_to_next_question() {
        let events = EventLog::new();
        let mut s = loaded(&events);
        let ticket = s.submit_answer(1).unwrap();

        assert!(s.advance(ticket.generation));
        assert_eq!(s.phase(), QuizPhase::InProgress);
        assert_eq!(s.state().current_index, 1);
        assert_eq!(s.state().selected_answer, None);
        assert_eq!(s.state().feedback, None);
        assert!((s.progress_percent() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_advance_applies_once() {
        let events = EventLog::new();
        let mut s = loaded(&events);
        let ticket = s.submit_answer(1).unwrap();
        assert!(s.advance(ticket.generation));
        assert!(!s.advance(ticket.generation));
        assert_eq!(s.state().current_index, 1);
    }

    #[test]
    fn test_mixed_answers_score_two_of_three() {
        let events = EventLog::new();
        let mut s = loaded(&events);
        for selection in [1, 1, 2] {
            answer(&mut s, selection);
        }

        assert_eq!(s.phase(), QuizPhase::Completed);
        assert_eq!(s.state().score, 2);
        assert_eq!(s.percentage(), 67);

        let completed = events.read_all().pop().unwrap();
        assert_eq!(completed.name, "practice_session_completed");
        assert_eq!(completed.data["score"], 2);
        assert_eq!(completed.data["totalQuestions"], 3);
        assert_eq!(completed.data["percentageCorrect"], 67);
    }

    #[test]
    fn test_completion_uses_committed_score_when_last_answer_correct() {
        let events = EventLog::new();
        let mut s = loaded(&events);
        for selection in [1, 0, 2] {
            answer(&mut s, selection);
        }
        let completed = events.read_all().pop().unwrap();
        assert_eq!(completed.data["score"], 3);
        assert_eq!(completed.data["percentageCorrect"], 100);
    }

    #[test]
    fn test_score_never_exceeds_submissions_or_decreases() {
        let events = EventLog::new();
        let mut s = loaded(&events);
        let mut last = 0;
        for (n, selection) in [3, 0, 2].into_iter().enumerate() {
            let correct = s.current_question().unwrap().correct_answer == selection;
            answer(&mut s, selection);
            let score = s.state().score;
            assert!(score as usize <= n + 1);
            assert!(score >= last);
            assert_eq!(score, last + u32::from(correct));
            last = score;
        }
    }

    #[test]
    fn test_completed_session_rejects_answers() {
        let events = EventLog::new();
        let mut s = loaded(&events);
        for selection in [1, 0, 2] {
            answer(&mut s, selection);
        }
        let before = s.state().clone();
        assert_eq!(
            s.submit_answer(0),
            Err(QuizError::NotAccepting(QuizPhase::Completed))
        );
        assert_eq!(s.state(), &before);
    }

    #[test]
    fn test_restart_matches_fresh_session() {
        let events = EventLog::new();
        let mut s = loaded(&events);
        for selection in [1, 1, 2] {
            answer(&mut s, selection);
        }
        s.restart().unwrap();

        let fresh = loaded(&EventLog::new());
        assert_eq!(s.state(), fresh.state());

        let restarted = events.read_all().pop().unwrap();
        assert_eq!(restarted.name, "practice_session_restarted");
        assert_eq!(restarted.data["previousScore"], 2);
        assert_eq!(restarted.data["totalQuestions"], 3);
    }

    #[test]
    fn test_restart_only_from_completed() {
        let events = EventLog::new();
        let mut s = loaded(&events);
        assert_eq!(
            s.restart(),
            Err(QuizError::NotAccepting(QuizPhase::InProgress))
        );
    }

    #[test]
    fn test_stale_advance_after_restart_is_ignored() {
        let events = EventLog::new();
        let mut s = loaded(&events);
        answer(&mut s, 1);
        answer(&mut s, 0);
        let last = s.submit_answer(2).unwrap();
        assert!(s.advance(last.generation));
        s.restart().unwrap();

        // Answer again, then replay the old ticket
        let fresh_ticket = s.submit_answer(1).unwrap();
        assert!(!s.advance(last.generation));
        assert_eq!(s.phase(), QuizPhase::Answered);
        assert!(s.advance(fresh_ticket.generation));
    }

    #[test]
    fn test_dispose_is_idempotent_and_blocks_advance() {
        let events = EventLog::new();
        let mut s = loaded(&events);
        let ticket = s.submit_answer(1).unwrap();

        s.dispose();
        s.dispose();
        assert!(s.is_disposed());
        assert!(!s.advance(ticket.generation));
        assert_eq!(s.state().current_index, 0);
        assert_eq!(s.submit_answer(0), Err(QuizError::Disposed));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_event_sequence_for_full_run() {
        let events = EventLog::new();
        let mut s = loaded(&events);
        for selection in [1, 0, 2] {
            answer(&mut s, selection);
        }
        s.restart().unwrap();

        assert_eq!(
            event_names(&events),
            vec![
                "practice_session_started",
                "practice_answer_submitted",
                "practice_answer_submitted",
                "practice_answer_submitted",
                "practice_session_completed",
                "practice_session_restarted",
            ]
        );
    }

    #[test]
    fn test_summary_only_when_completed() {
        let events = EventLog::new();
        let mut s = loaded(&events);
        assert!(s.summary().is_none());
        for selection in [1, 1, 2] {
            answer(&mut s, selection);
        }
        let summary = s.summary().unwrap();
        assert_eq!(summary.score, 2);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.percentage, 67);
        assert_eq!(summary.band, ScoreBand::Yellow);
        assert_eq!(summary.message, "Good job! You're on the right track.");
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13); // 12.5 rounds up
        assert_eq!(percentage(4, 4), 100);
    }

    #[test]
    fn test_score_bands_and_messages() {
        assert_eq!(ScoreBand::for_percentage(70), ScoreBand::Green);
        assert_eq!(ScoreBand::for_percentage(69), ScoreBand::Yellow);
        assert_eq!(ScoreBand::for_percentage(50), ScoreBand::Yellow);
        assert_eq!(ScoreBand::for_percentage(49), ScoreBand::Red);
        assert!(encouragement(80).starts_with("Excellent"));
        assert!(encouragement(60).starts_with("Good job"));
        assert!(encouragement(59).starts_with("Keep practicing"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduled_advance_waits_for_delay() {
        let ticket = ScheduledAdvance {
            generation: 7,
            delay: Duration::from_secs(2),
        };
        let start = tokio::time::Instant::now();
        let generation = ticket.wait().await;
        assert_eq!(generation, 7);
        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    fn last_time_spent(events: &EventLog) -> Option<u64> {
        events
            .read_all()
            .into_iter()
            .rev()
            .find(|e| e.name == "practice_answer_submitted")
            .and_then(|e| e.data["timeSpent"].as_u64())
    }

    #[tokio::test(start_paused = true)]
    async fn test_time_spent_measures_from_question_shown() {
        let events = EventLog::new();
        let mut s = loaded(&events);

        tokio::time::advance(Duration::from_millis(1500)).await;
        let ticket = s.submit_answer(1).unwrap();
        assert_eq!(last_time_spent(&events), Some(1500));

        // Feedback time is not charged to the next question.
        let generation = ticket.wait().await;
        assert!(s.advance(generation));
        tokio::time::advance(Duration::from_millis(300)).await;
        s.submit_answer(0).unwrap();
        assert_eq!(last_time_spent(&events), Some(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_time_spent_resets_on_restart() {
        let events = EventLog::new();
        let mut s = loaded(&events);
        for selection in [1, 0, 2] {
            answer(&mut s, selection);
        }
        assert_eq!(s.phase(), QuizPhase::Completed);

        tokio::time::advance(Duration::from_secs(10)).await;
        s.restart().unwrap();
        tokio::time::advance(Duration::from_millis(700)).await;
        s.submit_answer(1).unwrap();
        assert_eq!(last_time_spent(&events), Some(700));
    }

    #[tokio::test(start_paused = true)]
    async fn test_time_spent_starts_at_load_not_construction() {
        let events = EventLog::new();
        let mut s = session(&events);

        tokio::time::advance(Duration::from_secs(5)).await;
        s.load(sample_questions()).unwrap();
        tokio::time::advance(Duration::from_millis(250)).await;
        s.submit_answer(0).unwrap();
        assert_eq!(last_time_spent(&events), Some(250));
    }
}
