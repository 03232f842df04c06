//! Live session planning.

use crate::models::Quiz;
use uuid::Uuid;

const JOIN_CODE_LEN: usize = 6;
const JOIN_CODE_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

const STEP: u32 = 5;
const MIN_VALUE: u32 = 5;
const DEFAULT_DURATION: u32 = 20;
const DEFAULT_LIMIT: u32 = 30;

/// A prepared live session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPlan {
    pub quiz_title: String,
    pub duration_minutes: u32,
    pub participant_limit: u32,
    /// Code learners type to join.
    pub join_code: String,
}

/// Blueprint being edited on the sessions view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPlanner {
    /// Index into the quiz catalog.
    pub quiz_index: usize,
    pub duration_minutes: u32,
    pub participant_limit: u32,
}

impl Default for SessionPlanner {
    fn default() -> Self {
        Self {
            quiz_index: 0,
            duration_minutes: DEFAULT_DURATION,
            participant_limit: DEFAULT_LIMIT,
        }
    }
}

impl SessionPlanner {
    pub fn cycle_quiz(&mut self, delta: i32, quiz_count: usize) {
        if quiz_count == 0 {
            self.quiz_index = 0;
            return;
        }
        let len = quiz_count as i32;
        self.quiz_index = (self.quiz_index as i32 + delta).rem_euclid(len) as usize;
    }

    pub fn adjust_duration(&mut self, steps: i32) {
        self.duration_minutes = step(self.duration_minutes, steps);
    }

    pub fn adjust_limit(&mut self, steps: i32) {
        self.participant_limit = step(self.participant_limit, steps);
    }

    /// Build a plan against the current catalog.
    pub fn plan(&self, quizzes: &[Quiz]) -> SessionPlan {
        let quiz = quizzes.get(self.quiz_index);
        plan_session(quiz, self.duration_minutes, self.participant_limit)
    }
}

fn step(value: u32, steps: i32) -> u32 {
    let next = i64::from(value) + i64::from(steps) * i64::from(STEP);
    next.max(i64::from(MIN_VALUE)) as u32
}

/// Prepare a session for `quiz` with a fresh join code.
pub fn plan_session(quiz: Option<&Quiz>, duration_minutes: u32, participant_limit: u32) -> SessionPlan {
    SessionPlan {
        quiz_title: quiz.map(|q| q.title.clone()).unwrap_or_else(|| "Unknown".to_string()),
        duration_minutes,
        participant_limit,
        join_code: join_code(),
    }
}

fn join_code() -> String {
    let mut n = Uuid::new_v4().as_u128();
    let mut code = String::with_capacity(JOIN_CODE_LEN);
    for _ in 0..JOIN_CODE_LEN {
        code.push(JOIN_CODE_ALPHABET[(n % 36) as usize] as char);
        n /= 36;
    }
    code
}
