//! Contextual help bar component.
//!
//! Displays keyboard hints for the focused field at the bottom of the screen.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::editor::TagEditor;

/// Build the hint text for the focused editor.
///
/// Keys appear in brackets; the confirm keys come from the editor's config.
pub fn editor_hints(editor: Option<&TagEditor>) -> String {
    let mut hints = Vec::new();

    match editor {
        Some(editor) if editor.is_read_only() => {
            hints.push("read-only field".to_string());
        }
        Some(editor) if editor.is_disabled() => {
            hints.push("[Ctrl+D] enable".to_string());
        }
        Some(editor) => {
            let confirm: Vec<String> = editor
                .config()
                .confirm_keys
                .iter()
                .map(|k| display_key(k))
                .collect();
            if !confirm.is_empty() {
                hints.push(format!("[{}] add", confirm.join("/")));
            }
            hints.push("[Bksp] remove last".to_string());
            if !editor.suggestions().is_empty() {
                hints.push("[\u{2191}/\u{2193}] suggestions".to_string());
            }
            hints.push("[Ctrl+X] clear".to_string());
            hints.push("[Ctrl+D] disable".to_string());
        }
        None => {}
    }

    hints.push("[Tab] next field".to_string());
    hints.push("[Ctrl+C] submit".to_string());
    hints.join("  ")
}

/// Display form of a configured key name.
fn display_key(name: &str) -> String {
    match name {
        "Enter" => "Enter".to_string(),
        "Escape" => "Esc".to_string(),
        "Backspace" => "Bksp".to_string(),
        "ArrowUp" => "\u{2191}".to_string(),
        "ArrowDown" => "\u{2193}".to_string(),
        "ArrowLeft" => "\u{2190}".to_string(),
        "ArrowRight" => "\u{2192}".to_string(),
        " " => "Space".to_string(),
        other => other.to_string(),
    }
}

/// Render a help bar with hints for the focused editor.
pub fn render_editor_help(frame: &mut Frame, area: Rect, editor: Option<&TagEditor>) {
    let hints = editor_hints(editor);

    let spans = parse_hints_to_spans(&hints);
    let line = Line::from(spans);
    let paragraph = Paragraph::new(line);

    frame.render_widget(paragraph, area);
}

/// Parse hint text into styled spans.
///
/// Highlights the key portion (in brackets) differently from the description.
fn parse_hints_to_spans(hints: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;

    for c in hints.chars() {
        match c {
            '[' if !in_bracket => {
                if !current.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut current),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                in_bracket = true;
                current.push(c);
            }
            ']' if in_bracket => {
                current.push(c);
                spans.push(Span::styled(
                    std::mem::take(&mut current),
                    Style::default().fg(Color::Cyan),
                ));
                in_bracket = false;
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        spans.push(Span::styled(current, Style::default().fg(Color::DarkGray)));
    }

    spans
}
