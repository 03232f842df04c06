//! UI rendering for QuizArc.

use crate::app::{App, SessionField, SettingsField};
use crate::form::{FormField, QuizForm};
use crate::theme::Palette;
use quizarc_core::{
    answered_percent, attempt_bar_percent, attempts_for_quiz, average_score, format_countdown,
    format_timestamp, quiz_title, total_engaged_minutes, NoticeLevel, Report, Route,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};

const MAX_TOASTS: usize = 3;
const DASHBOARD_BAR_WEIGHT: usize = 12;
const LIBRARY_BAR_WEIGHT: usize = 10;
const LATEST_RUNS: usize = 5;
/// Letters typed to answer; options past these get no letter.
const ANSWER_LETTERS: &str = "abcdefgh";

pub fn draw(f: &mut Frame, app: &App) {
    let palette = Palette::for_theme(app.controller.settings().theme);
    f.render_widget(Block::default().style(palette.base()), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    draw_header(f, app, &palette, chunks[0]);

    match app.controller.route() {
        Route::Dashboard => draw_dashboard(f, app, &palette, chunks[1]),
        Route::Library => draw_library(f, app, &palette, chunks[1]),
        Route::Reports => draw_reports(f, app, &palette, chunks[1]),
        Route::Sessions => draw_sessions(f, app, &palette, chunks[1]),
        Route::Settings => draw_settings(f, app, &palette, chunks[1]),
        Route::Quiz => draw_quiz(f, app, &palette, chunks[1]),
    }

    draw_footer(f, app, &palette, chunks[2]);

    if app.show_help {
        draw_help(f, &palette);
    }

    if let Some(form) = &app.form {
        draw_form(f, form, &palette);
    }

    draw_notices(f, app, &palette);
}

fn card(title: &str, palette: &Palette) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border())
        .title(Span::styled(format!(" {title} "), palette.title()))
}

fn heading<'a>(title: &'a str, subtitle: &'a str, palette: &Palette) -> Paragraph<'a> {
    Paragraph::new(vec![
        Line::from(Span::styled(title, palette.accent())),
        Line::from(Span::styled(subtitle, palette.muted())),
    ])
}

/// Text progress bar, `width` cells wide.
fn text_bar(percent: u16, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn draw_header(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(22)])
        .split(area);

    let mut routes: Vec<Route> = Route::NAV.to_vec();
    if app.controller.active_quiz().is_some() {
        routes.push(Route::Quiz);
    }
    let titles: Vec<Line> = routes
        .iter()
        .enumerate()
        .map(|(i, route)| Line::from(format!("{} {}", i + 1, route.label())))
        .collect();
    let selected = routes
        .iter()
        .position(|r| *r == app.controller.route())
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).border_style(palette.border()))
        .style(palette.muted())
        .select(selected)
        .highlight_style(palette.accent());
    f.render_widget(tabs, chunks[0]);

    let brand = Paragraph::new(Line::from(vec![
        Span::styled("QuizArc", palette.title()),
        Span::styled(format!(" · {}", app.controller.settings().theme.name()), palette.muted()),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(palette.border()));
    f.render_widget(brand, chunks[1]);
}

fn draw_footer(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let hints = match app.controller.route() {
        Route::Dashboard => "j/k:Select  Enter:Open  s:Live session  n:New quiz  1-5:Views  t:Theme  ?:Help  q:Quit",
        Route::Library => "j/k:Select  Enter:Launch  a:Create quiz  1-5:Views  t:Theme  ?:Help  q:Quit",
        Route::Reports => "j/k:Scroll  e:Export CSV  s:Schedule session  1-5:Views  ?:Help  q:Quit",
        Route::Sessions => "j/k:Field  h/l:Adjust  Enter:Generate session  1-5:Views  ?:Help  q:Quit",
        Route::Settings => "j/k:Field  Enter:Change  s:Save changes  1-5:Views  ?:Help  q:Quit",
        Route::Quiz if app.controller.progress().is_none() => "Esc/Enter:Go back  1-5:Views  ?:Help",
        Route::Quiz => "a-h:Answer  j/k+Space:Select  n/→:Next  p/←:Previous  Esc:Exit quiz  1-5:Views",
    };
    let footer = Paragraph::new(hints)
        .style(palette.muted())
        .block(Block::default().borders(Borders::ALL).border_style(palette.border()));
    f.render_widget(footer, area);
}

fn draw_dashboard(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    f.render_widget(
        heading(
            "Insight Dashboard",
            "Monitor cohort performance, trending quizzes, and live participation health.",
            palette,
        ),
        chunks[0],
    );

    let reports = app.controller.reports();
    let stats = [
        ("Active learners", reports.len().to_string(), "Tracked across latest quiz attempts."),
        ("Average score", average_score(reports).to_string(), "Mean of every recorded attempt."),
        ("Minutes engaged", total_engaged_minutes(reports).to_string(), "Aggregate focus time across quizzes."),
    ];
    let stat_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(chunks[1]);
    for ((title, value, meta), stat_area) in stats.into_iter().zip(stat_areas.iter()) {
        let stat = Paragraph::new(vec![
            Line::from(Span::styled(value, palette.accent())),
            Line::from(Span::styled(meta, palette.muted())),
        ])
        .block(card(title, palette));
        f.render_widget(stat, *stat_area);
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    let items: Vec<ListItem> = app
        .featured_quizzes()
        .iter()
        .map(|quiz| {
            let attempts = attempts_for_quiz(reports, &quiz.id);
            let bar = text_bar(attempt_bar_percent(attempts, DASHBOARD_BAR_WEIGHT), 12);
            ListItem::new(vec![
                Line::from(Span::styled(quiz.title.as_str(), palette.title())),
                Line::from(Span::styled(quiz.description.as_str(), palette.muted())),
                Line::from(format!("{attempts} attempts  {bar}  {} min", quiz.estimated_time_minutes)),
                Line::from(""),
            ])
        })
        .collect();
    let list = List::new(items)
        .block(card("Fastest growing quizzes", palette))
        .highlight_style(palette.selected());
    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, columns[0], &mut state);

    let latest = card("Latest assessment runs", palette);
    if reports.is_empty() {
        f.render_widget(
            empty_state(
                "No attempts yet",
                "Once learners submit a quiz, analytics will populate here with their performance metrics.",
                palette,
            )
            .block(latest),
            columns[1],
        );
    } else {
        let recent = &reports[..reports.len().min(LATEST_RUNS)];
        let table = report_table(app, recent, false, None, palette).block(latest);
        f.render_widget(table, columns[1]);
    }
}

fn empty_state<'a>(title: &'a str, description: &'a str, palette: &Palette) -> Paragraph<'a> {
    Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(title, palette.title())),
        Line::from(Span::styled(description, palette.muted())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
}

fn report_table<'a>(
    app: &'a App,
    reports: &'a [Report],
    with_duration: bool,
    selected: Option<usize>,
    palette: &Palette,
) -> Table<'a> {
    let quizzes = app.controller.quizzes();
    let rows: Vec<Row> = reports
        .iter()
        .enumerate()
        .map(|(i, report)| {
            let mut cells = vec![
                Span::raw(report.learner.as_str()),
                Span::raw(quiz_title(quizzes, &report.quiz_id)),
                Span::styled(format!("{}%", report.score), palette.score(report.score)),
            ];
            if with_duration {
                cells.push(Span::raw(format!("{} min", report.duration_minutes)));
            }
            cells.push(Span::styled(format_timestamp(&report.submitted_at), palette.muted()));

            let row = Row::new(cells);
            if selected == Some(i) {
                row.style(palette.selected())
            } else {
                row
            }
        })
        .collect();

    let (header, widths) = if with_duration {
        (
            vec!["Learner", "Quiz", "Score", "Duration", "Submitted"],
            vec![
                Constraint::Percentage(22),
                Constraint::Percentage(30),
                Constraint::Percentage(10),
                Constraint::Percentage(12),
                Constraint::Percentage(26),
            ],
        )
    } else {
        (
            vec!["Learner", "Quiz", "Score", "Submitted"],
            vec![
                Constraint::Percentage(26),
                Constraint::Percentage(34),
                Constraint::Percentage(12),
                Constraint::Percentage(28),
            ],
        )
    };

    Table::new(rows, widths).header(Row::new(header).style(palette.title()))
}

fn draw_library(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    f.render_widget(
        heading(
            "Quiz library",
            "Curated catalog of reusable assessments for your teams.",
            palette,
        ),
        chunks[0],
    );

    let reports = app.controller.reports();
    let items: Vec<ListItem> = app
        .controller
        .quizzes()
        .iter()
        .map(|quiz| {
            let attempts = attempts_for_quiz(reports, &quiz.id);
            let bar = text_bar(attempt_bar_percent(attempts, LIBRARY_BAR_WEIGHT), 12);
            let mut lines = vec![
                Line::from(Span::styled(quiz.title.as_str(), palette.title())),
                Line::from(Span::styled(
                    format!("{} · {} min", quiz.difficulty.label(), quiz.estimated_time_minutes),
                    palette.muted(),
                )),
                Line::from(quiz.description.as_str()),
            ];
            if !quiz.tags.is_empty() {
                let tags: Vec<Span> = quiz
                    .tags
                    .iter()
                    .map(|tag| Span::styled(format!("#{tag} "), palette.accent()))
                    .collect();
                lines.push(Line::from(tags));
            }
            lines.push(Line::from(format!(
                "{attempts} attempts  {bar}  {} questions",
                quiz.question_count()
            )));
            lines.push(Line::from(""));
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(card("Quizzes", palette))
        .highlight_style(palette.selected());
    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, chunks[1], &mut state);
}

fn draw_reports(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    f.render_widget(
        heading(
            "Performance reports",
            "Filter attempts by quiz to identify retention gaps. Press e to export CSV.",
            palette,
        ),
        chunks[0],
    );

    let reports = app.controller.reports();
    let block = card("Attempts", palette);
    if reports.is_empty() {
        f.render_widget(
            empty_state(
                "No reports generated",
                "Once learners finish a quiz, their analytics show up here for pattern analysis.",
                palette,
            )
            .block(block),
            chunks[1],
        );
        return;
    }

    // Keep the cursor row on screen: borders and header take three rows.
    let visible = usize::from(chunks[1].height.saturating_sub(3)).max(1);
    let skip = app.selected.saturating_sub(visible - 1);
    let table = report_table(app, &reports[skip..], true, Some(app.selected - skip), palette).block(block);
    f.render_widget(table, chunks[1]);
}

fn draw_sessions(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    f.render_widget(
        heading(
            "Live session controller",
            "Activate timer-based sessions and monitor participant flow.",
            palette,
        ),
        chunks[0],
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    let planner = app.controller.planner();
    let quiz = app
        .controller
        .quizzes()
        .get(planner.quiz_index)
        .map(|q| q.title.as_str())
        .unwrap_or("No quizzes");

    let mut lines = vec![Line::from(Span::styled(
        "Select a quiz, configure duration, and share the join code with participants.",
        palette.muted(),
    ))];
    lines.push(Line::from(""));
    for (i, field) in SessionField::ALL.iter().enumerate() {
        let (label, value) = match field {
            SessionField::Quiz => ("Quiz", quiz.to_string()),
            SessionField::Duration => ("Duration (minutes)", planner.duration_minutes.to_string()),
            SessionField::ParticipantLimit => ("Participant limit", planner.participant_limit.to_string()),
        };
        let style = if i == app.selected { palette.selected() } else { palette.base() };
        lines.push(Line::from(vec![
            Span::styled(format!("{label:<20}"), palette.muted()),
            Span::styled(format!("◂ {value} ▸"), style),
        ]));
    }
    lines.push(Line::from(""));

    if let Some(plan) = app.controller.last_session() {
        lines.push(Line::from(vec![
            Span::styled("Join code ", palette.muted()),
            Span::styled(plan.join_code.as_str(), palette.accent()),
        ]));
        lines.push(Line::from(format!(
            "{} · {} min",
            plan.quiz_title, plan.duration_minutes
        )));
        lines.push(Line::from(Span::styled(
            format!(
                "Share join code {} with learners (max {} participants).",
                plan.join_code, plan.participant_limit
            ),
            palette.muted(),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Press Enter to generate a session.",
            palette.muted(),
        )));
    }

    let blueprint = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(card("Session blueprint", palette));
    f.render_widget(blueprint, columns[0]);

    let timeline = card("Engagement timeline", palette);
    let inner = timeline.inner(columns[1]);
    f.render_widget(timeline, columns[1]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);
    f.render_widget(
        Paragraph::new(Span::styled(
            "Simulated trend of learners joining the live quiz over time.",
            palette.muted(),
        )),
        rows[0],
    );
    f.render_widget(
        Gauge::default()
            .gauge_style(palette.accent())
            .percent(68),
        rows[2],
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            "68% seats reserved · 14 waiting for approval",
            palette.muted(),
        )),
        rows[3],
    );
}

fn draw_settings(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    f.render_widget(
        heading(
            "Platform settings",
            "Control brand accents, notifications, and automation rules.",
            palette,
        ),
        chunks[0],
    );

    let settings = app.controller.settings();
    let items: Vec<ListItem> = SettingsField::ALL
        .iter()
        .map(|field| {
            let (label, value) = match field {
                SettingsField::Theme => ("Theme", settings.theme.name()),
                SettingsField::BrandVoice => ("Brand voice", settings.brand_voice.label()),
                SettingsField::ReminderFrequency => {
                    ("Reminder frequency", settings.reminder_frequency.label())
                }
                SettingsField::DigestMode => ("Digest email", settings.digest_mode.label()),
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{label:<22}"), palette.muted()),
                Span::raw(value),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(card("Brand identity & notification cadence", palette))
        .highlight_style(palette.selected())
        .highlight_symbol("› ");
    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, chunks[1], &mut state);
}

fn draw_quiz(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let Some(quiz) = app.controller.active_quiz() else {
        return;
    };
    let (Some(progress), Some(question)) =
        (app.controller.progress(), app.controller.current_question())
    else {
        let popup = centered_rect(70, 50, area);
        f.render_widget(
            empty_state(
                "This quiz does not have questions yet",
                "Add questions from the library or import a question bank to play this quiz. Press Esc to go back.",
                palette,
            )
            .block(card(&quiz.title, palette)),
            popup,
        );
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(3), // Progress
            Constraint::Min(0),    // Question
            Constraint::Length(1), // Navigation
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(16)])
        .split(chunks[0]);
    f.render_widget(heading(&quiz.title, &quiz.description, palette), top[0]);

    let timer_style = if progress.remaining_seconds <= 60 {
        palette.notice(NoticeLevel::Error)
    } else {
        palette.accent()
    };
    f.render_widget(
        Paragraph::new(Span::styled(
            format!("Time left {}", format_countdown(progress.remaining_seconds)),
            timer_style.add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Right),
        top[1],
    );

    let total = quiz.question_count();
    let answered = answered_percent(progress.answered_count(), total);
    let gauge = Gauge::default()
        .block(card(
            &format!("Question {} of {}", progress.current_index + 1, total),
            palette,
        ))
        .gauge_style(palette.accent())
        .percent(answered)
        .label(format!("{answered}% answered"));
    f.render_widget(gauge, chunks[1]);

    let chosen = progress.answer_for(&question.id);
    let mut lines = vec![
        Line::from(Span::styled(question.text.as_str(), palette.title())),
        Line::from(""),
    ];
    for (i, option) in question.options.iter().enumerate() {
        let is_chosen = chosen == Some(option.id.as_str());
        let marker = if is_chosen { "●" } else { "○" };
        let letter = ANSWER_LETTERS.chars().nth(i).unwrap_or('·');
        let style = if i == app.option_cursor {
            palette.selected()
        } else if is_chosen {
            palette.accent()
        } else {
            palette.base()
        };
        lines.push(Line::from(Span::styled(
            format!(" {marker} {letter}) {}", option.label),
            style,
        )));
    }
    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(card("Choose one", palette));
    f.render_widget(body, chunks[2]);

    let prev_style = if progress.current_index == 0 {
        palette.muted()
    } else {
        palette.base()
    };
    let next_label = if progress.current_index + 1 >= total {
        "Submit ▸"
    } else {
        "Next ▸"
    };
    let nav = Line::from(vec![
        Span::styled("◂ Previous", prev_style),
        Span::raw("   "),
        Span::styled(next_label, palette.accent()),
    ]);
    f.render_widget(Paragraph::new(nav).alignment(Alignment::Center), chunks[3]);
}

fn draw_help(f: &mut Frame, palette: &Palette) {
    let area = centered_rect(60, 80, f.area());
    f.render_widget(Clear, area);

    let help = r#"
QuizArc Keybindings

Views:
  1-5             Dashboard, Library, Reports, Sessions, Settings
  c               Continue the quiz in progress
  n               Create a quiz
  t               Toggle light/dark theme
  x               Dismiss the latest notice

Quiz:
  a-h             Answer with option letter
  j/k, Space      Move and select an option
  n, Right        Next question / submit on the last
  p, Left         Previous question
  Esc             Exit the quiz (progress is discarded)

Reports:
  e               Export reports as CSV

General:
  ?               Show this help
  q, Ctrl-c       Quit

Press any key to close
"#;

    let popup = Paragraph::new(help)
        .style(palette.base())
        .block(card("Help", palette))
        .wrap(Wrap { trim: false });
    f.render_widget(popup, area);
}

fn draw_form(f: &mut Frame, form: &QuizForm, palette: &Palette) {
    let area = centered_rect(60, 70, f.area());
    f.render_widget(Clear, area);

    let block = card("New quiz", palette).style(palette.base());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(3); FormField::ALL.len()];
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (field, row) in FormField::ALL.iter().zip(rows.iter()) {
        let focused = *field == form.focus;
        let border = if focused { palette.accent() } else { palette.border() };
        let input = Paragraph::new(form.value(*field)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(format!(" {} ", field.label())),
        );
        f.render_widget(input, *row);

        if focused {
            let width = form.value(*field).chars().count() as u16;
            f.set_cursor_position((row.x + 1 + width.min(row.width.saturating_sub(2)), row.y + 1));
        }
    }

    f.render_widget(
        Paragraph::new("Tab:Next field  Enter:Create  Esc:Cancel").style(palette.muted()),
        rows[FormField::ALL.len()],
    );
}

fn draw_notices(f: &mut Frame, app: &App, palette: &Palette) {
    let screen = f.area();
    let width = screen.width.min(52);
    let x = screen.x + screen.width - width;

    for (i, notice) in app.controller.notices().visible(MAX_TOASTS).enumerate() {
        let y = screen.y + 3 + (i as u16) * 3;
        if y + 3 > screen.y + screen.height {
            break;
        }
        let area = Rect::new(x, y, width, 3);
        f.render_widget(Clear, area);

        let style = palette.notice(notice.level);
        let toast = Paragraph::new(Line::from(vec![
            Span::styled(format!("{} ", notice.level.icon()), style),
            Span::raw(notice.message.as_str()),
        ]))
        .style(palette.base())
        .block(Block::default().borders(Borders::ALL).border_style(style));
        f.render_widget(toast, area);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use quizarc_core::{
        bundled_quizzes, AnswerOption, Catalog, NewQuiz, QuizController, Settings, DEFAULT_DISMISS_AFTER,
    };
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;

    fn app_with(controller: QuizController) -> App {
        App::with_controller(controller, Config::default(), None)
    }

    fn render(app: &App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut result = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                if let Some(cell) = buffer.cell((x, y)) {
                    result.push_str(cell.symbol());
                }
            }
            result.push('\n');
        }
        result
    }

    #[test]
    fn test_dashboard_renders() {
        let app = app_with(QuizController::bundled());
        let screen = text(&render(&app));
        assert!(screen.contains("Insight Dashboard"));
        assert!(screen.contains("Active learners"));
        assert!(screen.contains("HTML Fundamentals"));
        assert!(screen.contains("Latest assessment runs"));
    }

    #[test]
    fn test_same_state_same_frame() {
        let mut controller = QuizController::bundled();
        controller.launch_quiz("modern-css");
        let app = app_with(controller);
        assert_eq!(render(&app), render(&app));
    }

    #[test]
    fn test_renavigate_same_route_same_frame() {
        let mut controller = QuizController::bundled();
        controller.navigate(Route::Reports);
        let mut app = app_with(controller);
        let before = render(&app);
        app.controller.navigate(app.controller.route());
        assert_eq!(before, render(&app));

        app.controller.launch_quiz("modern-css");
        let option_id = app.controller.current_question().unwrap().options[0].id.clone();
        assert!(app.controller.answer_question(&option_id));
        let before = render(&app);
        let starts = app.controller.countdown().starts();
        app.controller.navigate(app.controller.route());
        assert_eq!(before, render(&app));
        assert_eq!(app.controller.countdown().starts(), starts);
    }

    #[test]
    fn test_long_option_list_renders() {
        let mut quizzes = bundled_quizzes();
        let question = &mut quizzes[0].questions[0];
        question.options = (0..200)
            .map(|i| AnswerOption::new(format!("opt-{i}"), format!("Option {i}")))
            .collect();
        question.answer_id = "opt-0".into();
        let first = quizzes[0].id.clone();
        let catalog = Catalog {
            quizzes,
            reports: Vec::new(),
        };
        let mut controller =
            QuizController::new(catalog, Settings::default(), DEFAULT_DISMISS_AFTER);
        controller.launch_quiz(&first);

        let screen = text(&render(&app_with(controller)));
        assert!(screen.contains("a) Option 0"));
        assert!(screen.contains("h) Option 7"));
        assert!(screen.contains("·) Option 8"));
    }

    #[test]
    fn test_every_route_renders() {
        let headings = [
            (Route::Dashboard, "Insight Dashboard"),
            (Route::Library, "Quiz library"),
            (Route::Reports, "Performance reports"),
            (Route::Sessions, "Live session controller"),
            (Route::Settings, "Platform settings"),
        ];
        for (route, heading) in headings {
            let mut controller = QuizController::bundled();
            controller.navigate(route);
            let screen = text(&render(&app_with(controller)));
            assert!(screen.contains(heading), "{route:?}");
        }
    }

    #[test]
    fn test_quiz_player_shows_timer_and_progress() {
        let mut controller = QuizController::bundled();
        controller.launch_quiz("fundamentals-html");
        controller.answer_question("alt-text");
        let screen = text(&render(&app_with(controller)));

        assert!(screen.contains("08:00"));
        assert!(screen.contains("Question 1 of 3"));
        assert!(screen.contains("Next ▸"));
        assert!(screen.contains("<meta name=\"description\">"));
    }

    #[test]
    fn test_last_question_offers_submit() {
        let mut controller = QuizController::bundled();
        controller.launch_quiz("fundamentals-html");
        for answer in ["meta-description", "alt-text"] {
            controller.answer_question(answer);
            controller.next_question();
        }
        let screen = text(&render(&app_with(controller)));
        assert!(screen.contains("Question 3 of 3"));
        assert!(screen.contains("Submit ▸"));
        assert!(screen.contains("67% answered"));
    }

    #[test]
    fn test_empty_quiz_state() {
        let mut controller = QuizController::bundled();
        let id = controller.create_quiz(NewQuiz {
            title: "Draft".into(),
            description: "Soon".into(),
            ..NewQuiz::default()
        });
        controller.launch_quiz(&id);
        let screen = text(&render(&app_with(controller)));
        assert!(screen.contains("This quiz does not have questions yet"));
    }

    fn without_reports() -> QuizController {
        let catalog = Catalog {
            quizzes: bundled_quizzes(),
            reports: Vec::new(),
        };
        QuizController::new(catalog, Settings::default(), DEFAULT_DISMISS_AFTER)
    }

    #[test]
    fn test_empty_reports_state() {
        let dashboard = text(&render(&app_with(without_reports())));
        assert!(dashboard.contains("No attempts yet"));

        let mut controller = without_reports();
        controller.navigate(Route::Reports);
        let reports = text(&render(&app_with(controller)));
        assert!(reports.contains("No reports generated"));
    }

    #[test]
    fn test_toasts_and_form_overlay() {
        let mut app = app_with(QuizController::bundled());
        app.controller.save_settings();
        app.form = Some(QuizForm::default());
        let screen = text(&render(&app));
        assert!(screen.contains("Settings saved."));
        assert!(screen.contains("New quiz"));
        assert!(screen.contains("Estimated minutes"));
    }

    #[test]
    fn test_theme_changes_frame() {
        let light = app_with(QuizController::bundled());
        let mut dark = app_with(QuizController::bundled());
        dark.controller.toggle_theme();
        assert_ne!(render(&light), render(&dark));
        assert!(text(&render(&dark)).contains("QuizArc · dark"));
    }

    #[test]
    fn test_text_bar() {
        assert_eq!(text_bar(0, 4), "░░░░");
        assert_eq!(text_bar(50, 4), "██░░");
        assert_eq!(text_bar(100, 4), "████");
    }
}
