//! View-state controller.
//!
//! [`QuizController`] is the only writer of application state. The renderer
//! and the input binder read through its accessors and request changes
//! through its transition methods; every transition leaves the countdown
//! running if and only if the quiz view is showing a quiz in progress.

use crate::catalog::Catalog;
use crate::countdown::Countdown;
use crate::models::{Difficulty, Question, Quiz, QuizId, QuizProgress, Report, Route, LEARNER_SELF};
use crate::notice::{NoticeLevel, NoticeQueue};
use crate::session::{SessionPlan, SessionPlanner};
use crate::settings::{Settings, Theme};
use crate::stats::{round_div, slugify};
use chrono::Utc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Estimated time used when the form value is missing or invalid.
pub const FALLBACK_ESTIMATED_MINUTES: u32 = 5;

/// Outcome of one countdown tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// No countdown running.
    Idle,
    /// One second elapsed; seconds left.
    Counted(u32),
    /// Time ran out and the quiz was submitted.
    Expired(Report),
}

/// Input for [`QuizController::create_quiz`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewQuiz {
    pub title: String,
    pub description: String,
    /// Comma-separated.
    pub tags: String,
    pub estimated_time_minutes: u32,
}

impl NewQuiz {
    /// Split the comma-separated tag string, trimming and dropping blanks.
    pub fn parsed_tags(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    }
}

pub struct QuizController {
    route: Route,
    quizzes: Vec<Quiz>,
    /// Most recent first.
    reports: Vec<Report>,
    active_quiz: Option<QuizId>,
    progress: Option<QuizProgress>,
    countdown: Countdown,
    notices: NoticeQueue,
    settings: Settings,
    planner: SessionPlanner,
    last_session: Option<SessionPlan>,
}

impl QuizController {
    pub fn new(catalog: Catalog, settings: Settings, notice_window: Duration) -> Self {
        Self {
            route: Route::Dashboard,
            quizzes: catalog.quizzes,
            reports: catalog.reports,
            active_quiz: None,
            progress: None,
            countdown: Countdown::new(),
            notices: NoticeQueue::new(notice_window),
            settings,
            planner: SessionPlanner::default(),
            last_session: None,
        }
    }

    /// Controller over the bundled catalog with default settings.
    pub fn bundled() -> Self {
        Self::new(
            Catalog::bundled(),
            Settings::default(),
            crate::notice::DEFAULT_DISMISS_AFTER,
        )
    }

    // ---- read access ----

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn quizzes(&self) -> &[Quiz] {
        &self.quizzes
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn quiz(&self, quiz_id: &str) -> Option<&Quiz> {
        self.quizzes.iter().find(|q| q.id == quiz_id)
    }

    pub fn active_quiz(&self) -> Option<&Quiz> {
        self.active_quiz.as_deref().and_then(|id| self.quiz(id))
    }

    pub fn progress(&self) -> Option<&QuizProgress> {
        self.progress.as_ref()
    }

    /// Question currently displayed, if a quiz is in progress.
    pub fn current_question(&self) -> Option<&Question> {
        let progress = self.progress.as_ref()?;
        self.active_quiz()?.questions.get(progress.current_index)
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn notices(&self) -> &NoticeQueue {
        &self.notices
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn planner(&self) -> &SessionPlanner {
        &self.planner
    }

    pub fn last_session(&self) -> Option<&SessionPlan> {
        self.last_session.as_ref()
    }

    // ---- routing ----

    /// Switch views. Leaving the quiz view halts the countdown; entering it
    /// resumes an existing quiz and is ignored when there is none.
    pub fn navigate(&mut self, route: Route) {
        if route == Route::Quiz && self.active_quiz().is_none() {
            debug!("ignoring navigation to quiz view without an active quiz");
            return;
        }
        if self.route != route {
            debug!(from = ?self.route, to = ?route, "navigate");
        }
        self.route = route;
        self.sync_countdown();
    }

    // ---- quiz taking ----

    /// Start `quiz_id` from the first question. Returns false if no such quiz.
    pub fn launch_quiz(&mut self, quiz_id: &str) -> bool {
        let Some(quiz) = self.quiz(quiz_id) else {
            debug!(quiz_id, "launch ignored, quiz not found");
            return false;
        };

        let progress = (!quiz.questions.is_empty()).then(|| QuizProgress::start(quiz));
        info!(
            quiz_id,
            questions = quiz.question_count(),
            seconds = quiz.allotted_seconds(),
            "quiz launched"
        );

        // A previous attempt's countdown must not carry over.
        self.countdown.stop();
        self.active_quiz = Some(quiz_id.to_string());
        self.progress = progress;
        self.route = Route::Quiz;
        self.sync_countdown();
        true
    }

    /// Record `option_id` for the current question without advancing.
    pub fn answer_question(&mut self, option_id: &str) -> bool {
        let Some(question_id) = self
            .current_question()
            .filter(|q| q.has_option(option_id))
            .map(|q| q.id.clone())
        else {
            return false;
        };

        if let Some(progress) = self.progress.as_mut() {
            progress.answers.insert(question_id, option_id.to_string());
            return true;
        }
        false
    }

    /// Advance to the next question, or submit from the last one. Blocked
    /// with a warning while the current question is unanswered.
    pub fn next_question(&mut self) -> Option<Report> {
        let total = self.active_quiz().map(Quiz::question_count)?;
        let question_id = self.current_question()?.id.clone();
        let progress = self.progress.as_mut()?;

        if progress.answer_for(&question_id).is_none() {
            self.notices.warning("Select an option to continue.");
            return None;
        }

        if progress.current_index + 1 >= total {
            return self.submit_quiz();
        }
        progress.current_index += 1;
        None
    }

    /// Step back one question; no-op on the first.
    pub fn prev_question(&mut self) {
        if let Some(progress) = self.progress.as_mut() {
            progress.current_index = progress.current_index.saturating_sub(1);
        }
    }

    /// Score the active quiz, prepend its report and show the reports view.
    pub fn submit_quiz(&mut self) -> Option<Report> {
        let quiz = self.active_quiz()?;
        let progress = self.progress.as_ref()?;
        if quiz.questions.is_empty() {
            return None;
        }

        let total = quiz.question_count();
        let correct = quiz
            .questions
            .iter()
            .filter(|q| progress.answer_for(&q.id).is_some_and(|id| q.is_correct(id)))
            .count();
        let score = round_div(100 * correct as u64, total as u64).min(100) as u8;

        let elapsed = quiz.allotted_seconds().saturating_sub(progress.remaining_seconds);
        let duration_minutes =
            (round_div(u64::from(elapsed), 60) as u32).min(quiz.estimated_time_minutes);

        let now = Utc::now();
        let id = self.unique_report_id(now.timestamp_millis());
        let report = Report {
            id,
            learner: LEARNER_SELF.to_string(),
            quiz_id: quiz.id.clone(),
            score,
            submitted_at: now,
            duration_minutes,
        };

        info!(
            quiz_id = %report.quiz_id,
            score,
            correct,
            total,
            duration_minutes,
            "quiz submitted"
        );

        self.countdown.stop();
        self.reports.insert(0, report.clone());
        self.active_quiz = None;
        self.progress = None;
        self.route = Route::Reports;
        self.sync_countdown();
        self.notices
            .success(format!("Quiz submitted • Score {}%", report.score));
        Some(report)
    }

    /// Abandon the active quiz and return to the library.
    pub fn exit_quiz(&mut self) {
        if let Some(id) = self.active_quiz.take() {
            debug!(quiz_id = %id, "quiz exited");
        }
        self.countdown.stop();
        self.progress = None;
        self.route = Route::Library;
        self.sync_countdown();
    }

    // ---- countdown ----

    /// One countdown tick. Submits the quiz when time has run out.
    pub fn tick_timer(&mut self) -> Tick {
        if !self.countdown.is_running() {
            return Tick::Idle;
        }
        let Some(progress) = self.progress.as_mut() else {
            self.countdown.stop();
            return Tick::Idle;
        };

        if progress.remaining_seconds > 0 {
            progress.remaining_seconds -= 1;
            return Tick::Counted(progress.remaining_seconds);
        }

        info!("countdown expired, submitting");
        match self.submit_quiz() {
            Some(report) => Tick::Expired(report),
            None => {
                self.countdown.stop();
                Tick::Idle
            }
        }
    }

    /// Replay every tick owed at `now` and expire old notices. Returns the
    /// auto-submitted report, if time ran out.
    pub fn advance(&mut self, now: Instant) -> Option<Report> {
        self.notices.process_auto_dismiss(now);

        let due = self.countdown.due_ticks(now);
        for _ in 0..due {
            match self.tick_timer() {
                Tick::Expired(report) => return Some(report),
                Tick::Idle => break,
                Tick::Counted(_) => {}
            }
        }
        None
    }

    fn sync_countdown(&mut self) {
        if self.route == Route::Quiz && self.progress.is_some() {
            if self.countdown.start() {
                debug!("countdown started");
            }
        } else if self.countdown.stop() {
            debug!("countdown stopped");
        }
    }

    // ---- catalog ----

    /// Add an empty quiz to the front of the catalog and show the library.
    pub fn create_quiz(&mut self, new_quiz: NewQuiz) -> QuizId {
        let mut slug = slugify(&new_quiz.title);
        if slug.is_empty() {
            slug = "quiz".to_string();
        }
        let id = self.unique_quiz_id(&slug, Utc::now().timestamp_millis());
        let estimated_time_minutes = match new_quiz.estimated_time_minutes {
            0 => FALLBACK_ESTIMATED_MINUTES,
            n => n,
        };

        let quiz = Quiz {
            id: id.clone(),
            title: new_quiz.title.trim().to_string(),
            description: new_quiz.description.trim().to_string(),
            tags: new_quiz.parsed_tags(),
            difficulty: Difficulty::Custom,
            estimated_time_minutes,
            questions: Vec::new(),
        };

        info!(quiz_id = %id, "quiz created");
        self.notices.success(format!(
            "{} created. Add questions from the dashboard.",
            quiz.title
        ));
        self.quizzes.insert(0, quiz);
        self.navigate(Route::Library);
        id
    }

    fn unique_quiz_id(&self, slug: &str, stamp: i64) -> QuizId {
        let mut stamp = stamp;
        loop {
            let id = format!("{slug}-{stamp}");
            if self.quiz(&id).is_none() {
                return id;
            }
            stamp += 1;
        }
    }

    fn unique_report_id(&self, stamp: i64) -> String {
        let mut stamp = stamp;
        loop {
            let id = format!("rep-{stamp}");
            if !self.reports.iter().any(|r| r.id == id) {
                return id;
            }
            stamp += 1;
        }
    }

    // ---- live sessions ----

    pub fn cycle_session_quiz(&mut self, delta: i32) {
        self.planner.cycle_quiz(delta, self.quizzes.len());
    }

    pub fn adjust_session_duration(&mut self, steps: i32) {
        self.planner.adjust_duration(steps);
    }

    pub fn adjust_session_limit(&mut self, steps: i32) {
        self.planner.adjust_limit(steps);
    }

    /// Prepare a session from the planner and keep it for display.
    pub fn generate_session(&mut self) -> &SessionPlan {
        let plan = self.planner.plan(&self.quizzes);
        info!(join_code = %plan.join_code, quiz = %plan.quiz_title, "live session prepared");
        self.notices
            .success("Live session prepared. Copy the join code for your learners.");
        self.last_session.insert(plan)
    }

    // ---- settings ----

    /// Flip light/dark and return the new theme.
    pub fn toggle_theme(&mut self) -> Theme {
        self.settings.theme = self.settings.theme.toggled();
        info!(theme = self.settings.theme.name(), "theme toggled");
        self.settings.theme
    }

    pub fn cycle_brand_voice(&mut self) {
        self.settings.brand_voice = self.settings.brand_voice.next();
    }

    pub fn cycle_reminder_frequency(&mut self) {
        self.settings.reminder_frequency = self.settings.reminder_frequency.next();
    }

    pub fn cycle_digest_mode(&mut self) {
        self.settings.digest_mode = self.settings.digest_mode.next();
    }

    pub fn save_settings(&mut self) {
        self.notices.success("Settings saved.");
    }

    // ---- notices ----

    /// Raise a notice on behalf of the input surface.
    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(level, message);
    }

    pub fn dismiss_notice(&mut self) -> bool {
        self.notices.dismiss_latest()
    }
}
