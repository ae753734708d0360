//! Mosaic Tags - a demo form of typeahead tag editors in the terminal.
//!
//! On exit the submitted form values are printed as JSON.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableBracketedPaste, DisableFocusChange, EnableBracketedPaste, EnableFocusChange},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info, warn};

use mosaic_tags::app::App;
use mosaic_tags::config::{split_list, FieldSettings, Settings, TagEditorConfig};
use mosaic_tags::error::AppError;
use mosaic_tags::events::EventHandler;
use mosaic_tags::logging;

/// Typeahead tag editors on a terminal form.
#[derive(Debug, Parser)]
#[command(name = "mosaic-tags", version, about)]
struct Cli {
    /// Settings file to load instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Show a single field with these comma-separated tags.
    #[arg(long, value_name = "CSV")]
    tags: Option<String>,

    /// Comma-separated suggestions for the single field.
    #[arg(long, value_name = "CSV")]
    suggestions: Option<String>,

    /// Make the single field read-only.
    #[arg(long)]
    read_only: bool,

    /// Maximum number of tags on the single field.
    #[arg(long, value_name = "N")]
    max_tags: Option<usize>,

    /// Only accept tags from the suggestions.
    #[arg(long)]
    no_free_text: bool,

    /// Print the form page markup after mounting, then exit.
    #[arg(long)]
    markup: bool,

    /// Print the effective settings as TOML, then exit.
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    /// Whether any single-field flag was given.
    fn wants_single_field(&self) -> bool {
        self.tags.is_some()
            || self.suggestions.is_some()
            || self.read_only
            || self.max_tags.is_some()
            || self.no_free_text
    }

    /// The single field described by the flags.
    fn single_field(&self) -> FieldSettings {
        let mut config = TagEditorConfig::default()
            .with_tags(self.tags.as_deref().map(split_list).unwrap_or_default())
            .with_suggestions(
                self.suggestions
                    .as_deref()
                    .map(split_list)
                    .unwrap_or_default(),
            )
            .with_read_only(self.read_only)
            .with_allow_free_text(!self.no_free_text);
        if let Some(max) = self.max_tags {
            config = config.with_max_tags(max);
        }
        FieldSettings::new("Tags", config)
    }
}

fn load_settings(cli: &Cli) -> Result<Settings, AppError> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    if cli.wants_single_field() {
        settings.fields = vec![cli.single_field()];
        settings.validate()?;
    }
    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e.user_message());
            if let Some(action) = e.suggested_action() {
                eprintln!("{}", action);
            }
            return Err(e.into());
        }
    };

    if cli.print_config {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    if let Err(e) = logging::init(settings.log_filter.as_deref()) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let mut app = App::new(&settings)?;

    if cli.markup {
        println!("{}", app.to_html());
        return Ok(());
    }

    let result = run(&mut app, settings.tick_rate_ms);
    if let Err(e) = &result {
        error!(error = %e, "Event loop failed");
    }

    let values = app.form_values();
    app.teardown();
    logging::shutdown();
    result?;

    println!("{}", serde_json::to_string_pretty(&values)?);
    Ok(())
}

/// Raw mode and the alternate screen, undone on drop.
struct TerminalGuard {
    terminal: Option<Terminal<CrosstermBackend<io::Stdout>>>,
}

impl TerminalGuard {
    /// Enter raw mode and the alternate screen.
    ///
    /// Raw mode is left again if any later step fails.
    fn enter() -> anyhow::Result<Self> {
        enable_raw_mode().map_err(|e| AppError::terminal(e.to_string()))?;
        let mut guard = Self { terminal: None };

        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableBracketedPaste,
            EnableFocusChange
        )
        .context("Failed to enter the alternate screen")?;
        guard.terminal = Some(Terminal::new(CrosstermBackend::new(stdout))?);
        Ok(guard)
    }

    fn terminal(&mut self) -> anyhow::Result<&mut Terminal<CrosstermBackend<io::Stdout>>> {
        self.terminal
            .as_mut()
            .ok_or_else(|| AppError::terminal("terminal not initialized").into())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!(error = %e, "Failed to disable raw mode");
        }
        let restored = match self.terminal.as_mut() {
            Some(terminal) => execute!(
                terminal.backend_mut(),
                DisableFocusChange,
                DisableBracketedPaste,
                LeaveAlternateScreen
            )
            .and_then(|()| terminal.show_cursor()),
            None => execute!(
                io::stdout(),
                DisableFocusChange,
                DisableBracketedPaste,
                LeaveAlternateScreen
            ),
        };
        if let Err(e) = restored {
            warn!(error = %e, "Failed to restore the terminal");
        }
    }
}

/// Run the event loop on the alternate screen, restoring the terminal after.
fn run(app: &mut App, tick_rate_ms: u64) -> anyhow::Result<()> {
    let mut guard = TerminalGuard::enter()?;
    event_loop(guard.terminal()?, app, tick_rate_ms)
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_rate_ms: u64,
) -> anyhow::Result<()> {
    let events = EventHandler::with_tick_rate(tick_rate_ms);
    info!(tick_rate_ms, fields = app.field_count(), "Event loop started");

    while !app.should_quit() {
        terminal.draw(|frame| app.view(frame))?;
        let event = events.next()?;
        app.update(event);
    }

    Ok(())
}
