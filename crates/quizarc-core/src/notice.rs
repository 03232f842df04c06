//! Transient user-facing notices (toasts).

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a notice stays up unless dismissed.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_millis(4200);

/// Unique notice ID.
pub type NoticeId = u64;

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    /// Get icon character.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Info => "ℹ",
            Self::Success => "✓",
            Self::Warning => "⚠",
            Self::Error => "✗",
        }
    }
}

/// A single notice.
#[derive(Debug, Clone)]
pub struct Notice {
    /// Unique ID.
    pub id: NoticeId,
    pub level: NoticeLevel,
    pub message: String,
    /// When it was raised.
    pub raised_at: Instant,
}

/// Queue of live notices, newest first.
#[derive(Debug, Clone)]
pub struct NoticeQueue {
    notices: VecDeque<Notice>,
    dismiss_after: Duration,
    next_id: NoticeId,
}

impl NoticeQueue {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            notices: VecDeque::new(),
            dismiss_after,
            next_id: 1,
        }
    }

    /// Raise a notice at `now`.
    pub fn push_at(&mut self, level: NoticeLevel, message: impl Into<String>, now: Instant) -> NoticeId {
        let id = self.next_id;
        self.next_id += 1;
        self.notices.push_front(Notice {
            id,
            level,
            message: message.into(),
            raised_at: now,
        });
        id
    }

    /// Raise a notice now.
    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) -> NoticeId {
        self.push_at(level, message, Instant::now())
    }

    pub fn info(&mut self, message: impl Into<String>) -> NoticeId {
        self.push(NoticeLevel::Info, message)
    }

    pub fn success(&mut self, message: impl Into<String>) -> NoticeId {
        self.push(NoticeLevel::Success, message)
    }

    pub fn warning(&mut self, message: impl Into<String>) -> NoticeId {
        self.push(NoticeLevel::Warning, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> NoticeId {
        self.push(NoticeLevel::Error, message)
    }

    /// Dismiss one notice.
    pub fn dismiss(&mut self, id: NoticeId) {
        self.notices.retain(|n| n.id != id);
    }

    /// Dismiss the newest notice, if any.
    pub fn dismiss_latest(&mut self) -> bool {
        self.notices.pop_front().is_some()
    }

    /// Drop notices older than the dismissal window.
    pub fn process_auto_dismiss(&mut self, now: Instant) {
        let window = self.dismiss_after;
        self.notices
            .retain(|n| now.saturating_duration_since(n.raised_at) < window);
    }

    /// Most recent notice.
    pub fn latest(&self) -> Option<&Notice> {
        self.notices.front()
    }

    /// Up to `max` notices, newest first.
    pub fn visible(&self, max: usize) -> impl Iterator<Item = &Notice> {
        self.notices.iter().take(max)
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

impl Default for NoticeQueue {
    fn default() -> Self {
        Self::new(DEFAULT_DISMISS_AFTER)
    }
}
