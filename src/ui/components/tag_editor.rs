//! Terminal rendering of a tag editor field.
//!
//! Pills are drawn as coloured chips followed by the pending input text. The
//! suggestions dropdown is drawn separately, on top of everything else, so it
//! can overlap the fields below.

use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::editor::TagEditor;
use crate::ui::theme::Theme;

/// Height of a rendered field, borders included.
pub const FIELD_HEIGHT: u16 = 3;

/// Rows the dropdown shows before scrolling.
const MAX_VISIBLE_SUGGESTIONS: usize = 6;

/// Render a tag editor field.
pub fn render_tag_editor(
    frame: &mut Frame,
    area: Rect,
    editor: &TagEditor,
    label: &str,
    focused: bool,
    theme: &Theme,
) {
    let border_color = if editor.has_error() {
        theme.error
    } else if focused && !editor.is_disabled() {
        theme.border_focused
    } else {
        theme.border
    };

    let title = if editor.is_read_only() {
        format!(" {} (read-only) ", label)
    } else if editor.is_disabled() {
        format!(" {} (disabled) ", label)
    } else {
        format!(" {} ", label)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = pill_spans(editor, theme);
    let prefix_width: usize = spans.iter().map(Span::width).sum();

    let cursor_offset = if editor.is_read_only() {
        0
    } else {
        let typed: String = editor
            .input_value()
            .chars()
            .take(editor.input_cursor())
            .collect();
        let typed_width = Span::raw(typed).width();

        if editor.input_value().is_empty() {
            spans.push(Span::styled(
                editor.placeholder().to_string(),
                Style::default().fg(theme.muted),
            ));
        } else {
            spans.push(Span::styled(
                editor.input_value().to_string(),
                Style::default().fg(theme.fg),
            ));
        }
        prefix_width + typed_width
    };

    // Scroll horizontally so the cursor stays inside the field.
    let visible = inner.width.saturating_sub(1) as usize;
    let scroll = cursor_offset.saturating_sub(visible) as u16;

    let mut paragraph = Paragraph::new(Line::from(spans)).scroll((0, scroll));
    if editor.is_disabled() {
        paragraph = paragraph.style(Style::default().add_modifier(Modifier::DIM));
    }
    frame.render_widget(paragraph, inner);

    if focused && editor.has_input() && !editor.is_disabled() && inner.width > 0 {
        let x = inner.x + (cursor_offset as u16).saturating_sub(scroll);
        frame.set_cursor_position(Position::new(x.min(inner.right().saturating_sub(1)), inner.y));
    }
}

/// Chips for the current tags, each followed by a space.
fn pill_spans(editor: &TagEditor, theme: &Theme) -> Vec<Span<'static>> {
    let color = theme.variant_color(&editor.config().variant);
    let mut spans = Vec::with_capacity(editor.tags().len() * 2);

    for tag in editor.tags() {
        let mut style = Style::default().fg(theme.pill_fg).bg(color);
        if editor.flashing_tag() == Some(tag.as_str()) {
            style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
        }
        let text = if editor.is_read_only() {
            format!(" {} ", tag)
        } else {
            format!(" {} \u{00d7} ", tag)
        };
        spans.push(Span::styled(text, style));
        spans.push(Span::raw(" "));
    }
    spans
}

/// Render the open suggestions dropdown below `anchor`.
///
/// Flips above the field when there is no room below within `bounds`.
pub fn render_suggestions(
    frame: &mut Frame,
    anchor: Rect,
    bounds: Rect,
    editor: &TagEditor,
    theme: &Theme,
) {
    if !editor.is_suggestions_open() || editor.filtered_suggestions().is_empty() {
        return;
    }

    let rows = editor.filtered_suggestions().len().min(MAX_VISIBLE_SUGGESTIONS) as u16;
    let height = rows + 2;
    let below = anchor.bottom();
    let y = if below + height <= bounds.bottom() {
        below
    } else if anchor.y >= bounds.y + height {
        anchor.y - height
    } else {
        below
    };
    let area = Rect::new(anchor.x, y, anchor.width, height).intersection(bounds);
    if area.height < 3 {
        return;
    }

    frame.render_widget(Clear, area);

    let items: Vec<ListItem> = editor
        .filtered_suggestions()
        .iter()
        .map(|s| ListItem::new(s.as_str()))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_focused)),
        )
        .highlight_style(
            Style::default()
                .fg(theme.bg)
                .bg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(editor.highlighted_index());
    frame.render_stateful_widget(list, area, &mut state);
}
