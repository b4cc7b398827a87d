use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing_subscriber::EnvFilter;

use marketboard_tui::action::Action;
use marketboard_tui::app::{App, ModalState, ViewMode};
use marketboard_tui::config::AppConfig;
use marketboard_tui::tui;

fn main() -> Result<()> {
    let config = AppConfig::discover()?;
    init_logging(&config)?;

    // Load every dataset before entering raw mode so a fatal load error
    // prints as a clear message instead of corrupting the terminal
    let mut app = App::new(config)?;

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;

    result
}

/// Main event loop
fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(250);

    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match app.view_mode {
                        ViewMode::Filter => handle_filter_mode(app, key),
                        ViewMode::Dashboard => {
                            let action = handle_key_event(app, key);
                            app.handle_action(action);
                        }
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle key events while the filter form is focused (text input)
fn handle_filter_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_filter_form(),
        KeyCode::Enter => app.apply_filter_form(),
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = app.filter_form.as_mut() {
                form.next_field();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = app.filter_form.as_mut() {
                form.prev_field();
            }
        }
        KeyCode::Left => {
            if let Some(form) = app.filter_form.as_mut() {
                form.cycle_left();
            }
        }
        KeyCode::Right => {
            if let Some(form) = app.filter_form.as_mut() {
                form.cycle_right();
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = app.filter_form.as_mut() {
                form.backspace();
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = app.filter_form.as_mut() {
                form.type_char(c);
            }
        }
        _ => {}
    }
}

/// Convert key events to actions based on current state
fn handle_key_event(app: &App, key: KeyEvent) -> Action {
    // Handle modal keys first
    if app.modal != ModalState::None {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Action::CloseModal,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('?') => Action::ShowHelp,

        KeyCode::Left | KeyCode::Char('h') => Action::PrevReport,
        KeyCode::Right | KeyCode::Char('l') => Action::NextReport,
        KeyCode::Char('f') => Action::OpenFilter,
        KeyCode::Char('g') => Action::ToggleGeoScope,

        KeyCode::Char(c @ '1'..='5') => Action::JumpToReport(c as usize - '1' as usize),

        _ => Action::None,
    }
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let file = std::fs::File::create(&config.log_file)
        .with_context(|| format!("Failed to create log file: {:?}", config.log_file))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
