//! Application state and key bindings.

use crate::config::{Config, Preferences};
use crate::form::{FormAction, QuizForm};
use anyhow::Context;
use crossterm::event::{KeyCode, KeyEvent};
use quizarc_core::{
    reports_csv, Catalog, NoticeLevel, Quiz, QuizController, Route, Settings, EXPORT_FILE_NAME,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// Quizzes featured on the dashboard.
pub const FEATURED_QUIZZES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionField {
    Quiz,
    Duration,
    ParticipantLimit,
}

impl SessionField {
    pub const ALL: [SessionField; 3] = [
        SessionField::Quiz,
        SessionField::Duration,
        SessionField::ParticipantLimit,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Theme,
    BrandVoice,
    ReminderFrequency,
    DigestMode,
}

impl SettingsField {
    pub const ALL: [SettingsField; 4] = [
        SettingsField::Theme,
        SettingsField::BrandVoice,
        SettingsField::ReminderFrequency,
        SettingsField::DigestMode,
    ];
}

pub struct App {
    pub controller: QuizController,
    pub config: Config,
    prefs_path: Option<PathBuf>,
    pub form: Option<QuizForm>,
    pub show_help: bool,
    /// Row cursor on the current view.
    pub selected: usize,
    /// Highlighted option on the quiz player.
    pub option_cursor: usize,
    /// Route and question the cursors belong to.
    cursor_owner: (Route, Option<usize>),
}

impl App {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let prefs_path = Config::preferences_path();
        let prefs = prefs_path
            .as_deref()
            .map(Preferences::load)
            .unwrap_or_default();

        let mut catalog = Catalog::bundled();
        let mut bank_error = None;
        if let Some(path) = &config.catalog.question_bank {
            match load_bank(&mut catalog, path) {
                Ok(count) => info!(count, path = %path.display(), "question bank imported"),
                Err(err) => {
                    warn!(error = %err, path = %path.display(), "question bank rejected");
                    bank_error = Some(format!("Question bank not loaded: {err}"));
                }
            }
        }

        let controller = QuizController::new(
            catalog,
            Settings::with_theme(prefs.theme),
            config.notices.dismiss_after(),
        );
        let mut app = Self::with_controller(controller, config, prefs_path);
        if let Some(message) = bank_error {
            app.controller.notify(NoticeLevel::Error, message);
        }
        Ok(app)
    }

    pub fn with_controller(
        controller: QuizController,
        config: Config,
        prefs_path: Option<PathBuf>,
    ) -> Self {
        let cursor_owner = (controller.route(), None);
        Self {
            controller,
            config,
            prefs_path,
            form: None,
            show_help: false,
            selected: 0,
            option_cursor: 0,
            cursor_owner,
        }
    }

    pub fn can_quit(&self) -> bool {
        self.form.is_none()
    }

    /// Quizzes shown on the dashboard, in catalog order.
    pub fn featured_quizzes(&self) -> &[Quiz] {
        let quizzes = self.controller.quizzes();
        &quizzes[..quizzes.len().min(FEATURED_QUIZZES)]
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(form) = self.form.as_mut() {
            match form.handle_key(key) {
                FormAction::None => {}
                FormAction::Cancel => self.form = None,
                FormAction::Submit => self.submit_form(),
            }
            self.sync_cursors();
            return;
        }

        if self.show_help {
            self.show_help = false;
            return;
        }

        let handled = match self.controller.route() {
            Route::Quiz => self.handle_quiz_key(key),
            Route::Dashboard => self.handle_dashboard_key(key),
            Route::Library => self.handle_library_key(key),
            Route::Reports => self.handle_reports_key(key),
            Route::Sessions => self.handle_sessions_key(key),
            Route::Settings => self.handle_settings_key(key),
        };
        if !handled {
            self.handle_global_key(key);
        }
        self.sync_cursors();
    }

    /// Drive the countdown and notice expiry from the wall clock.
    pub fn tick(&mut self, now: Instant) {
        if let Some(report) = self.controller.advance(now) {
            info!(report_id = %report.id, "time ran out");
        }
        self.sync_cursors();
    }

    fn handle_global_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c @ '1'..='5') => {
                let index = (c as u8 - b'1') as usize;
                self.controller.navigate(Route::NAV[index]);
            }
            KeyCode::Char('c') => self.controller.navigate(Route::Quiz),
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('n') => self.open_form(),
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('x') => {
                self.controller.dismiss_notice();
            }
            _ => {}
        }
    }

    fn handle_quiz_key(&mut self, key: KeyEvent) -> bool {
        let option_ids: Vec<String> = match self.controller.current_question() {
            Some(question) => question.options.iter().map(|o| o.id.clone()).collect(),
            None => {
                // No questions: the only way forward is back out.
                return match key.code {
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Char('b') => {
                        self.controller.exit_quiz();
                        true
                    }
                    _ => false,
                };
            }
        };

        match key.code {
            KeyCode::Char(c @ 'a'..='h') => {
                let index = (c as u8 - b'a') as usize;
                if let Some(option_id) = option_ids.get(index) {
                    self.controller.answer_question(option_id);
                    self.option_cursor = index;
                }
            }
            KeyCode::Char('j') | KeyCode::Down => {
                if !option_ids.is_empty() {
                    self.option_cursor = (self.option_cursor + 1).min(option_ids.len() - 1);
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.option_cursor = self.option_cursor.saturating_sub(1);
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(option_id) = option_ids.get(self.option_cursor) {
                    self.controller.answer_question(option_id);
                }
            }
            KeyCode::Char('n') | KeyCode::Right => {
                self.controller.next_question();
            }
            KeyCode::Char('p') | KeyCode::Left => self.controller.prev_question(),
            KeyCode::Esc => self.controller.exit_quiz(),
            _ => return false,
        }
        true
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) -> bool {
        let count = self.featured_quizzes().len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.select_next(count),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),
            KeyCode::Enter => {
                if let Some(id) = self.featured_quizzes().get(self.selected).map(|q| q.id.clone()) {
                    self.controller.launch_quiz(&id);
                }
            }
            KeyCode::Char('s') => self.controller.navigate(Route::Sessions),
            _ => return false,
        }
        true
    }

    fn handle_library_key(&mut self, key: KeyEvent) -> bool {
        let count = self.controller.quizzes().len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.select_next(count),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),
            KeyCode::Enter => {
                let id = self.controller.quizzes().get(self.selected).map(|q| q.id.clone());
                if let Some(id) = id {
                    self.controller.launch_quiz(&id);
                }
            }
            KeyCode::Char('a') => self.open_form(),
            _ => return false,
        }
        true
    }

    fn handle_reports_key(&mut self, key: KeyEvent) -> bool {
        let count = self.controller.reports().len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.select_next(count),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),
            KeyCode::Char('e') => self.export_reports(),
            KeyCode::Char('s') => self.controller.navigate(Route::Sessions),
            _ => return false,
        }
        true
    }

    fn handle_sessions_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.select_next(SessionField::ALL.len()),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),
            KeyCode::Char('h') | KeyCode::Left => self.adjust_session(-1),
            KeyCode::Char('l') | KeyCode::Right => self.adjust_session(1),
            KeyCode::Enter | KeyCode::Char('g') => {
                self.controller.generate_session();
            }
            _ => return false,
        }
        true
    }

    fn handle_settings_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.select_next(SettingsField::ALL.len()),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),
            KeyCode::Enter | KeyCode::Char(' ') => match SettingsField::ALL[self.selected] {
                SettingsField::Theme => self.toggle_theme(),
                SettingsField::BrandVoice => self.controller.cycle_brand_voice(),
                SettingsField::ReminderFrequency => self.controller.cycle_reminder_frequency(),
                SettingsField::DigestMode => self.controller.cycle_digest_mode(),
            },
            KeyCode::Char('s') => self.controller.save_settings(),
            _ => return false,
        }
        true
    }

    fn select_next(&mut self, count: usize) {
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn adjust_session(&mut self, delta: i32) {
        match SessionField::ALL[self.selected.min(SessionField::ALL.len() - 1)] {
            SessionField::Quiz => self.controller.cycle_session_quiz(delta),
            SessionField::Duration => self.controller.adjust_session_duration(delta),
            SessionField::ParticipantLimit => self.controller.adjust_session_limit(delta),
        }
    }

    fn open_form(&mut self) {
        self.form = Some(QuizForm::default());
    }

    fn submit_form(&mut self) {
        let Some(new_quiz) = self.form.as_ref().and_then(QuizForm::to_new_quiz) else {
            self.controller
                .notify(NoticeLevel::Warning, "Title and description are required.");
            return;
        };
        self.form = None;
        self.controller.create_quiz(new_quiz);
    }

    fn toggle_theme(&mut self) {
        let theme = self.controller.toggle_theme();
        let Some(path) = &self.prefs_path else {
            return;
        };
        if let Err(err) = (Preferences { theme }).save(path) {
            warn!(error = %err, path = %path.display(), "failed to save theme preference");
        }
    }

    fn export_reports(&mut self) {
        let path = self.config.export_dir().join(EXPORT_FILE_NAME);
        match write_export(&self.controller, &path) {
            Ok(()) => {
                info!(path = %path.display(), "reports exported");
                self.controller
                    .notify(NoticeLevel::Success, "Reports exported as CSV.");
            }
            Err(err) => {
                warn!(error = %err, path = %path.display(), "report export failed");
                self.controller
                    .notify(NoticeLevel::Error, format!("Export failed: {err}"));
            }
        }
    }

    /// Reset cursors when the view or the displayed question changes.
    fn sync_cursors(&mut self) {
        let owner = (
            self.controller.route(),
            self.controller.progress().map(|p| p.current_index),
        );
        if owner == self.cursor_owner {
            return;
        }
        if owner.0 != self.cursor_owner.0 {
            self.selected = 0;
        }
        self.cursor_owner = owner;

        // Land on the stored answer when revisiting a question.
        let answered = self.controller.current_question().and_then(|q| {
            let chosen = self.controller.progress()?.answer_for(&q.id)?;
            q.options.iter().position(|o| o.id == chosen)
        });
        self.option_cursor = answered.unwrap_or(0);
    }
}

fn load_bank(catalog: &mut Catalog, path: &Path) -> anyhow::Result<usize> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let quizzes = Catalog::parse_bank(&json)?;
    Ok(catalog.import(quizzes)?)
}

fn write_export(controller: &QuizController, path: &Path) -> anyhow::Result<()> {
    let csv = reports_csv(controller.reports(), controller.quizzes())?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, csv).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use quizarc_core::{Theme, CSV_HEADER};

    fn app() -> App {
        App::with_controller(QuizController::bundled(), Config::default(), None)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn latest_message(app: &App) -> &str {
        app.controller
            .notices()
            .latest()
            .map(|n| n.message.as_str())
            .unwrap_or_default()
    }

    #[test]
    fn test_number_keys_navigate() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.controller.route(), Route::Reports);
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.controller.route(), Route::Settings);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.controller.route(), Route::Settings);
    }

    #[test]
    fn test_route_change_resets_selection() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected, 2);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected, 2);

        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_take_quiz_with_letter_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.controller.route(), Route::Quiz);
        assert_eq!(app.controller.active_quiz().unwrap().id, "fundamentals-html");

        for answer in ['a', 'b', 'c'] {
            press(&mut app, KeyCode::Char(answer));
            press(&mut app, KeyCode::Char('n'));
        }

        assert_eq!(app.controller.route(), Route::Reports);
        assert_eq!(app.controller.reports()[0].score, 100);
        assert_eq!(latest_message(&app), "Quiz submitted • Score 100%");
    }

    #[test]
    fn test_next_without_answer_warns() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.controller.progress().unwrap().current_index, 0);
        assert_eq!(latest_message(&app), "Select an option to continue.");
    }

    #[test]
    fn test_cursor_select_and_revisit() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(
            app.controller.progress().unwrap().answer_for("html-1"),
            Some("summary")
        );

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.option_cursor, 0);
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.option_cursor, 2);
    }

    #[test]
    fn test_escape_exits_quiz() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.controller.route(), Route::Library);
        assert!(app.controller.progress().is_none());
    }

    #[test]
    fn test_form_requires_title_and_description() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        assert!(app.form.is_some());
        assert!(!app.can_quit());

        type_str(&mut app, "Only a title");
        press(&mut app, KeyCode::Enter);
        assert!(app.form.is_some());
        assert_eq!(latest_message(&app), "Title and description are required.");

        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Now described");
        press(&mut app, KeyCode::Enter);
        assert!(app.form.is_none());
        assert!(app.can_quit());
        assert_eq!(app.controller.route(), Route::Library);
        assert_eq!(app.controller.quizzes()[0].title, "Only a title");
        assert_eq!(app.controller.quizzes()[0].estimated_time_minutes, 8);
    }

    #[test]
    fn test_created_quiz_is_selected_after_submit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('5'));
        for _ in 0..3 {
            press(&mut app, KeyCode::Char('j'));
        }
        assert_eq!(app.selected, 3);

        press(&mut app, KeyCode::Char('n'));
        type_str(&mut app, "Fresh quiz");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Made just now");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.controller.route(), Route::Library);
        assert_eq!(app.selected, 0);

        let created = app.controller.quizzes()[0].id.clone();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.controller.route(), Route::Quiz);
        assert_eq!(app.controller.active_quiz().unwrap().id, created);
    }

    #[test]
    fn test_form_cancel() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        type_str(&mut app, "123");
        press(&mut app, KeyCode::Esc);
        assert!(app.form.is_none());
        assert_eq!(app.controller.route(), Route::Dashboard);
        assert_eq!(app.controller.quizzes().len(), 3);
    }

    #[test]
    fn test_empty_quiz_only_exits() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        type_str(&mut app, "Blank");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "No questions");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.controller.route(), Route::Quiz);
        assert!(app.controller.progress().is_none());

        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.controller.route(), Route::Library);
    }

    #[test]
    fn test_export_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.export.directory = Some(dir.path().join("exports"));
        let mut app = App::with_controller(QuizController::bundled(), config, None);

        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('e'));

        let csv = std::fs::read_to_string(dir.path().join("exports").join(EXPORT_FILE_NAME)).unwrap();
        assert!(csv.starts_with(&CSV_HEADER.join(",")));
        assert_eq!(csv.lines().count(), 4);
        assert_eq!(latest_message(&app), "Reports exported as CSV.");
    }

    #[test]
    fn test_export_failure_raises_error_notice() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let mut config = Config::default();
        config.export.directory = Some(blocker);
        let mut app = App::with_controller(QuizController::bundled(), config, None);

        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('e'));

        let notice = app.controller.notices().latest().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.starts_with("Export failed"));
    }

    #[test]
    fn test_theme_toggle_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        let mut app = App::with_controller(
            QuizController::bundled(),
            Config::default(),
            Some(path.clone()),
        );

        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.controller.settings().theme, Theme::Dark);
        assert_eq!(Preferences::load(&path).theme, Theme::Dark);
    }

    #[test]
    fn test_sessions_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('h'));
        press(&mut app, KeyCode::Char('g'));

        let plan = app.controller.last_session().unwrap();
        assert_eq!(plan.quiz_title, "Modern CSS Layouts");
        assert_eq!(plan.duration_minutes, 15);
        assert_eq!(plan.participant_limit, 30);
    }

    #[test]
    fn test_settings_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('s'));

        assert_eq!(app.controller.settings().brand_voice.label(), "Coach");
        assert_eq!(latest_message(&app), "Settings saved.");
        press(&mut app, KeyCode::Char('x'));
        assert!(app.controller.notices().is_empty());
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('2'));
        assert!(!app.show_help);
        assert_eq!(app.controller.route(), Route::Dashboard);
    }

    #[test]
    fn test_tick_counts_down() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        let t0 = Instant::now();
        app.tick(t0);
        app.tick(t0 + std::time::Duration::from_millis(2100));
        assert_eq!(app.controller.progress().unwrap().remaining_seconds, 478);
    }

    #[test]
    fn test_bank_import_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.json");
        std::fs::write(
            &path,
            r#"[{"id":"extra","title":"Extra","description":"More","difficulty":"Foundational",
                "estimatedTime":2,"questions":[{"id":"q1","text":"?","options":[{"id":"a","label":"A"}],
                "answerId":"a","rationale":"Because."}]}]"#,
        )
        .unwrap();

        let mut catalog = Catalog::bundled();
        assert_eq!(load_bank(&mut catalog, &path).unwrap(), 1);
        assert_eq!(catalog.quizzes.last().unwrap().id, "extra");
        assert!(load_bank(&mut catalog, &dir.path().join("missing.json")).is_err());
    }
}
