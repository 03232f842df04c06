//! New-quiz form state.

use crossterm::event::{KeyCode, KeyEvent};
use quizarc_core::NewQuiz;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Tags,
    EstimatedTime,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Title,
        FormField::Description,
        FormField::Tags,
        FormField::EstimatedTime,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Tags => "Tags (comma separated)",
            Self::EstimatedTime => "Estimated minutes",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Tags,
            Self::Tags => Self::EstimatedTime,
            Self::EstimatedTime => Self::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Title => Self::EstimatedTime,
            Self::Description => Self::Title,
            Self::Tags => Self::Description,
            Self::EstimatedTime => Self::Tags,
        }
    }
}

/// What the form wants after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    None,
    Cancel,
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizForm {
    pub title: String,
    pub description: String,
    pub tags: String,
    pub estimated_time: String,
    pub focus: FormField,
}

impl Default for QuizForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            tags: String::new(),
            estimated_time: "8".to_string(),
            focus: FormField::Title,
        }
    }
}

impl QuizForm {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Description => &self.description,
            FormField::Tags => &self.tags,
            FormField::EstimatedTime => &self.estimated_time,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
            FormField::Tags => &mut self.tags,
            FormField::EstimatedTime => &mut self.estimated_time,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Enter => return FormAction::Submit,
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Backspace => {
                self.focused_mut().pop();
            }
            KeyCode::Char(c) => {
                if self.focus == FormField::EstimatedTime && !c.is_ascii_digit() {
                    return FormAction::None;
                }
                self.focused_mut().push(c);
            }
            _ => {}
        }
        FormAction::None
    }

    /// Title and description are required; an unparsable time becomes 0
    /// and is replaced by the fallback on creation.
    pub fn to_new_quiz(&self) -> Option<NewQuiz> {
        let title = self.title.trim();
        let description = self.description.trim();
        if title.is_empty() || description.is_empty() {
            return None;
        }
        Some(NewQuiz {
            title: title.to_string(),
            description: description.to_string(),
            tags: self.tags.clone(),
            estimated_time_minutes: self.estimated_time.trim().parse().unwrap_or(0),
        })
    }
}
