//! Light and dark palettes.

use quizarc_core::{NoticeLevel, Theme};
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub primary: Color,
    pub selection: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::light(),
            Theme::Dark => Self::dark(),
        }
    }

    fn light() -> Self {
        Self {
            background: Color::Rgb(246, 247, 251),
            text: Color::Rgb(23, 28, 45),
            muted: Color::Rgb(98, 106, 130),
            border: Color::Rgb(208, 213, 226),
            primary: Color::Rgb(31, 102, 255),
            selection: Color::Rgb(222, 232, 255),
            success: Color::Rgb(22, 128, 80),
            warning: Color::Rgb(176, 104, 0),
            error: Color::Rgb(196, 43, 43),
        }
    }

    fn dark() -> Self {
        Self {
            background: Color::Rgb(15, 18, 30),
            text: Color::Rgb(232, 235, 245),
            muted: Color::Rgb(140, 148, 172),
            border: Color::Rgb(52, 58, 82),
            primary: Color::Rgb(106, 152, 255),
            selection: Color::Rgb(36, 48, 86),
            success: Color::Rgb(80, 200, 140),
            warning: Color::Rgb(240, 180, 80),
            error: Color::Rgb(240, 110, 110),
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.selection)
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn notice(&self, level: NoticeLevel) -> Style {
        let color = match level {
            NoticeLevel::Info => self.primary,
            NoticeLevel::Success => self.success,
            NoticeLevel::Warning => self.warning,
            NoticeLevel::Error => self.error,
        };
        Style::default().fg(color)
    }

    /// Color for a score percentage.
    pub fn score(&self, score: u8) -> Style {
        let color = match score {
            80..=100 => self.success,
            50..=79 => self.warning,
            _ => self.error,
        };
        Style::default().fg(color)
    }
}
