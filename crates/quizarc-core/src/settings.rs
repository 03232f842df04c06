//! Platform settings and the theme preference.

use serde::{Deserialize, Serialize};

/// Color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrandVoice {
    #[default]
    Mentor,
    Coach,
    Challenger,
}

impl BrandVoice {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mentor => "Mentor",
            Self::Coach => "Coach",
            Self::Challenger => "Challenger",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Mentor => Self::Coach,
            Self::Coach => Self::Challenger,
            Self::Challenger => Self::Mentor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReminderFrequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl ReminderFrequency {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Daily => Self::Weekly,
            Self::Weekly => Self::Monthly,
            Self::Monthly => Self::Daily,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestMode {
    #[default]
    Summary,
    Detailed,
    Off,
}

impl DigestMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Summary => "Summary",
            Self::Detailed => "Detailed",
            Self::Off => "Off",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Summary => Self::Detailed,
            Self::Detailed => Self::Off,
            Self::Off => Self::Summary,
        }
    }
}

/// In-session settings. Only the theme outlives the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    pub theme: Theme,
    pub brand_voice: BrandVoice,
    pub reminder_frequency: ReminderFrequency,
    pub digest_mode: DigestMode,
}

impl Settings {
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }
}
