//! Demo form application.
//!
//! This module implements The Elm Architecture (TEA) pattern: events flow
//! through [`App::update`], and [`App::view`] draws the current state. The
//! form page is a [`Document`] whose fields are tag editors, some mounted
//! explicitly and some discovered from their declarative attributes.

use std::collections::BTreeMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{debug, info, trace};

use crate::config::{dataset_from_config, Settings, MARKER_ATTRIBUTE};
use crate::editor::{TagAction, TagEditor, TagEditorHooks};
use crate::error::Result;
use crate::events::Event;
use crate::markup::{data_attribute_name, Document, NodeId, SharedDocument};
use crate::registry::TagEditorRegistry;
use crate::ui::{
    render_editor_help, render_suggestions, render_tag_editor, Theme, Toast, ToastStack,
    FIELD_HEIGHT,
};

/// A field on the form.
#[derive(Debug, Clone)]
struct Field {
    label: String,
    container: NodeId,
}

/// The demo application state.
pub struct App {
    /// The form page.
    document: SharedDocument,
    /// The `form` element holding every field container.
    form: NodeId,
    /// Mounted editors.
    registry: TagEditorRegistry,
    /// Fields in display order.
    fields: Vec<Field>,
    /// Index of the focused field.
    focus: usize,
    /// Toasts explaining refused tags.
    toasts: ToastStack,
    theme: Theme,
    should_quit: bool,
}

impl App {
    /// Build the form page described by `settings` and mount its editors.
    ///
    /// # Errors
    ///
    /// Returns an error if the page markup cannot be built.
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut doc = Document::new();
        let root = doc.root();
        let form = doc.create_element("form");
        doc.set_attribute(form, "id", "mosaic-form")?;
        doc.append_child(root, form)?;

        let mut containers = Vec::with_capacity(settings.fields.len());
        for (index, field) in settings.fields.iter().enumerate() {
            let container = doc.create_element("div");
            doc.set_attribute(container, "id", format!("field-{}", index))?;
            doc.set_attribute(container, "aria-label", field.label.as_str())?;
            if field.declarative {
                doc.set_attribute(container, MARKER_ATTRIBUTE, "")?;
                for (key, value) in dataset_from_config(&field.editor) {
                    doc.set_attribute(container, data_attribute_name(&key), value)?;
                }
            }
            doc.append_child(form, container)?;
            containers.push(container);
        }

        let document = doc.into_shared();
        let mut registry = TagEditorRegistry::new(&document);

        for (field, &container) in settings.fields.iter().zip(&containers) {
            if field.declarative {
                continue;
            }
            let label = field.label.clone();
            let hooks = TagEditorHooks::new().on_change(move |tags| {
                debug!(field = %label, count = tags.len(), "Field changed");
            });
            registry.mount(container, field.editor.clone(), hooks);
        }
        registry.mount_all(form);

        let fields: Vec<Field> = settings
            .fields
            .iter()
            .zip(containers)
            .filter(|(_, container)| registry.get(*container).is_some())
            .map(|(field, container)| Field {
                label: field.label.clone(),
                container,
            })
            .collect();

        info!(fields = fields.len(), "Form ready");

        let mut app = Self {
            document,
            form,
            registry,
            fields,
            focus: 0,
            toasts: ToastStack::new(),
            theme: Theme::from_name(&settings.theme),
            should_quit: false,
        };
        if let Some(editor) = app.focused_editor_mut() {
            editor.focus();
        }
        Ok(app)
    }

    /// Whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Number of fields on the form.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Index of the focused field.
    pub fn focused_index(&self) -> usize {
        self.focus
    }

    /// The editor for the field at `index`.
    pub fn editor(&self, index: usize) -> Option<&TagEditor> {
        self.fields
            .get(index)
            .and_then(|f| self.registry.get(f.container))
    }

    /// The editor for the focused field.
    pub fn focused_editor(&self) -> Option<&TagEditor> {
        self.editor(self.focus)
    }

    fn focused_editor_mut(&mut self) -> Option<&mut TagEditor> {
        let container = self.fields.get(self.focus)?.container;
        self.registry.get_mut(container)
    }

    /// The toasts currently shown.
    pub fn toasts(&self) -> &ToastStack {
        &self.toasts
    }

    /// The form page.
    pub fn document(&self) -> &SharedDocument {
        &self.document
    }

    /// Read every hidden field on the form, by field name.
    ///
    /// This is what submitting the form would send.
    pub fn form_values(&self) -> BTreeMap<String, String> {
        let doc = self.document.borrow();
        doc.descendants(self.form)
            .into_iter()
            .filter(|&node| doc.attribute(node, "type") == Some("hidden"))
            .filter_map(|node| {
                let name = doc.attribute(node, "name")?;
                let value = doc.attribute(node, "value").unwrap_or_default();
                Some((name.to_string(), value.to_string()))
            })
            .collect()
    }

    /// Serialize the form page.
    pub fn to_html(&self) -> String {
        self.document.borrow().to_html(self.form)
    }

    /// Destroy every editor.
    pub fn teardown(&mut self) {
        self.registry.teardown();
    }

    /// Update the application state based on an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Quit => {
                info!("Quit event received");
                self.should_quit = true;
            }
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Paste(text) => {
                if let Some(editor) = self.focused_editor_mut() {
                    editor.paste(&text);
                }
            }
            Event::FocusGained => {
                if let Some(editor) = self.focused_editor_mut() {
                    editor.focus();
                }
            }
            Event::FocusLost => {
                if let Some(editor) = self.focused_editor_mut() {
                    editor.blur();
                }
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => self.handle_tick(),
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('q'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            (KeyCode::BackTab, _) => {
                self.move_focus(false);
                return;
            }
            (KeyCode::Tab, KeyModifiers::NONE) if !self.tab_confirms() => {
                self.move_focus(true);
                return;
            }
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
                if let Some(editor) = self.focused_editor_mut() {
                    if editor.is_disabled() {
                        editor.enable();
                        editor.focus();
                    } else {
                        editor.disable();
                    }
                }
                return;
            }
            (KeyCode::Char('x'), KeyModifiers::CONTROL) => {
                if let Some(editor) = self.focused_editor_mut() {
                    editor.remove_all();
                }
                return;
            }
            _ => {}
        }

        let Some(field) = self.fields.get(self.focus).cloned() else {
            return;
        };
        let Some(editor) = self.registry.get_mut(field.container) else {
            return;
        };

        match editor.handle_key(key_event) {
            Some(TagAction::Added(tag)) => {
                debug!(field = %field.label, tag = %tag, "Tag added from keyboard");
            }
            Some(TagAction::Removed(tag)) => {
                debug!(field = %field.label, tag = %tag, "Tag removed from keyboard");
            }
            Some(TagAction::Rejected(reason)) => {
                if let Some(toast) =
                    Toast::for_rejection(&field.label, &reason, std::time::Instant::now())
                {
                    self.toasts.push(toast);
                }
            }
            None => {}
        }
    }

    /// Whether Tab would commit something on the focused field.
    fn tab_confirms(&self) -> bool {
        self.focused_editor().map_or(false, |e| {
            e.has_input()
                && !e.is_disabled()
                && e.config().is_confirm_key("Tab")
                && (!e.input_value().is_empty() || e.highlighted_index().is_some())
        })
    }

    fn move_focus(&mut self, forward: bool) {
        if self.fields.is_empty() {
            return;
        }
        if let Some(editor) = self.focused_editor_mut() {
            editor.blur();
        }
        let count = self.fields.len();
        self.focus = if forward {
            (self.focus + 1) % count
        } else {
            (self.focus + count - 1) % count
        };
        if let Some(editor) = self.focused_editor_mut() {
            editor.focus();
        }
        debug!(focus = self.focus, "Focus moved");
    }

    fn handle_tick(&mut self) {
        self.registry.tick();
        self.toasts.tick();
    }

    /// Render the application UI.
    pub fn view(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(1),    // Fields
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        let anchor = self.render_fields(frame, chunks[1]);
        render_editor_help(frame, chunks[2], self.focused_editor());

        if let (Some(anchor), Some(editor)) = (anchor, self.focused_editor()) {
            if !editor.is_disabled() {
                render_suggestions(frame, anchor, chunks[1], editor, &self.theme);
            }
        }

        self.toasts.render(frame, area);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let title = Paragraph::new("Mosaic Tags")
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        frame.render_widget(title, area);
    }

    /// Render every field, returning the focused field's area.
    fn render_fields(&self, frame: &mut Frame, area: Rect) -> Option<Rect> {
        let mut constraints: Vec<Constraint> = self
            .fields
            .iter()
            .map(|_| Constraint::Length(FIELD_HEIGHT))
            .collect();
        constraints.push(Constraint::Min(0));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let mut focused_area = None;
        for (index, (field, row)) in self.fields.iter().zip(rows.iter()).enumerate() {
            let Some(editor) = self.registry.get(field.container) else {
                continue;
            };
            let focused = index == self.focus;
            render_tag_editor(frame, *row, editor, &field.label, focused, &self.theme);
            if focused {
                focused_area = Some(*row);
            }
        }
        focused_area
    }
}
