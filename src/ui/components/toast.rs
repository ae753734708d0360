//! Toast messages for user feedback.
//!
//! The demo uses these to explain why a tag was refused, since the editor
//! itself only flashes its error state.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::editor::Rejection;

/// How long info and success toasts stay up.
const SHORT_TOAST: Duration = Duration::from_secs(2);

/// How long warnings and errors stay up.
const LONG_TOAST: Duration = Duration::from_secs(4);

/// The kind of toast, which determines its appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    /// Icon shown before the message.
    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Info => "ℹ",
            ToastKind::Success => "✓",
            ToastKind::Warning => "⚠",
            ToastKind::Error => "✗",
        }
    }

    /// Color of the message and border.
    pub fn color(&self) -> Color {
        match self {
            ToastKind::Info => Color::Blue,
            ToastKind::Success => Color::Green,
            ToastKind::Warning => Color::Yellow,
            ToastKind::Error => Color::Red,
        }
    }
}

/// A single toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

impl Toast {
    /// Create a toast that expires `duration` after `now`.
    pub fn new(message: impl Into<String>, kind: ToastKind, now: Instant, duration: Duration) -> Self {
        Self {
            message: message.into(),
            kind,
            expires_at: now + duration,
        }
    }

    /// Toast explaining a refused tag.
    ///
    /// Rejections that carry no message for the user produce nothing.
    pub fn for_rejection(label: &str, rejection: &Rejection, now: Instant) -> Option<Self> {
        if !rejection.is_user_facing() {
            return None;
        }
        let kind = if rejection.flashes_error() {
            ToastKind::Error
        } else {
            ToastKind::Warning
        };
        Some(Self::new(
            format!("{}: {}", label, rejection),
            kind,
            now,
            LONG_TOAST,
        ))
    }

    /// Whether the toast has expired at `now`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Stack of visible toasts, newest last.
#[derive(Debug)]
pub struct ToastStack {
    toasts: VecDeque<Toast>,
    max_visible: usize,
}

impl Default for ToastStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastStack {
    /// Create a stack showing up to three toasts.
    pub fn new() -> Self {
        Self::with_max_visible(3)
    }

    /// Create a stack with a custom visible limit.
    pub fn with_max_visible(max_visible: usize) -> Self {
        Self {
            toasts: VecDeque::new(),
            max_visible,
        }
    }

    /// Push a toast, dropping the oldest beyond the limit.
    pub fn push(&mut self, toast: Toast) {
        self.toasts.push_back(toast);
        while self.toasts.len() > self.max_visible {
            self.toasts.pop_front();
        }
    }

    /// Push an info toast.
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Toast::new(message, ToastKind::Info, Instant::now(), SHORT_TOAST));
    }

    /// Push a success toast.
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Toast::new(message, ToastKind::Success, Instant::now(), SHORT_TOAST));
    }

    /// Push an error toast.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Toast::new(message, ToastKind::Error, Instant::now(), LONG_TOAST));
    }

    /// Drop toasts expired by now.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Drop toasts expired at `now`.
    pub fn tick_at(&mut self, now: Instant) {
        self.toasts.retain(|t| !t.is_expired_at(now));
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    /// Render the stack in the bottom-right corner of `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width = 44.min(area.width.saturating_sub(2));
        if width < 6 {
            return;
        }
        let inner_width = width.saturating_sub(4) as usize;

        let mut bottom = area.bottom().saturating_sub(1);
        for toast in self.toasts.iter().rev() {
            let text_len = toast.message.chars().count() + 2;
            let lines = ((text_len + inner_width - 1) / inner_width).max(1) as u16;
            let height = lines + 2;
            if bottom < area.y + height {
                break;
            }
            let toast_area = Rect::new(area.right().saturating_sub(width + 1), bottom - height, width, height);
            render_toast(toast, frame, toast_area);
            bottom -= height;
        }
    }
}

fn render_toast(toast: &Toast, frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);

    let style = Style::default().fg(toast.kind.color());
    let text = Line::from(vec![
        Span::styled(
            format!("{} ", toast.kind.icon()),
            style.add_modifier(Modifier::BOLD),
        ),
        Span::styled(toast.message.as_str(), style),
    ]);

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).border_style(style))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
