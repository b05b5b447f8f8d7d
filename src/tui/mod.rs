//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the screen,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm. It is
//! also where `Effect`s get carried out: fetches are spawned as tokio tasks
//! and their resolutions come back through the screen's action channel.
//!
//! ## Screens
//!
//! Each mounted screen gets its own `App` and its own action channel.
//! Switching screens drops both: the debounce timer is aborted with the
//! `App`, and fetches still in flight find their channel closed, so their
//! results are ignored rather than applied to the new screen.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (fetch in flight or a keystroke waiting to settle): draws every ~80ms.
//! - **Idle**: sleeps up to 500ms, only redraws on events or background actions.

mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::Arc;

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::ScreenMode;
use crate::catalog::{CatalogClient, CatalogError, ResultPage, TmdbClient};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::fetch::PendingRun;
use crate::core::state::App;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// What a terminal event asks the loop to do.
#[derive(Debug, PartialEq)]
enum Command {
    Dispatch(Action),
    /// Unmount the current screen and mount the other one, optionally seeding its search input.
    SwitchMode(Option<String>),
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste)?;
        info!("Terminal modes enabled (bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

/// Build the catalog client from a resolved config.
pub fn build_catalog(
    config: &ResolvedConfig,
) -> Result<Arc<dyn CatalogClient>, Box<dyn std::error::Error>> {
    let api_key = config.require_api_key()?.to_string();
    let client = TmdbClient::new(api_key, Some(config.base_url.clone())).with_timeout(config.timeout)?;
    info!("Using catalog backend: {}", client.name());
    Ok(Arc::new(client))
}

pub fn run(config: ResolvedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = build_catalog(&config)?;
    let (mut app, mut tx, mut rx) = mount(catalog.clone(), config.mode, config.include_adult, None);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.fetch_state().loading || app.search.is_pending();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match translate(event, &app) {
                Some(Command::Dispatch(action)) => {
                    if perform(update(&mut app, action), &tx) {
                        should_quit = true;
                    }
                }
                Some(Command::SwitchMode(seed)) => {
                    let mode = app.mode.toggle();
                    info!("Switching to {:?} screen", mode);
                    // The old screen, its timer and its channel are dropped on assignment.
                    (app, tx, rx) = mount(catalog.clone(), mode, app.include_adult, seed);
                }
                None => {}
            }
            if should_quit {
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (debounce fires, fetch results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if perform(update(&mut app, action), &tx) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Creates a screen with a fresh action channel and runs its mount effect.
fn mount(
    catalog: Arc<dyn CatalogClient>,
    mode: ScreenMode,
    include_adult: bool,
    seed: Option<String>,
) -> (App, UnboundedSender<Action>, UnboundedReceiver<Action>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut app = App::new(catalog, mode, include_adult, tx.clone());
    perform(update(&mut app, Action::Mount), &tx);
    if let Some(text) = seed {
        perform(update(&mut app, Action::SearchInput(text)), &tx);
    }
    (app, tx, rx)
}

/// Maps a terminal event to a command for the current screen.
fn translate(event: TuiEvent, app: &App) -> Option<Command> {
    let command = match event {
        TuiEvent::Quit => Command::Dispatch(Action::Quit),
        TuiEvent::ToggleAdult => Command::Dispatch(Action::ToggleAdult),
        TuiEvent::Refetch => Command::Dispatch(Action::Refetch),
        TuiEvent::SwitchMode => Command::SwitchMode(None),
        // Disabled arrows do nothing
        TuiEvent::PrevPage if app.can_go_back() => Command::Dispatch(Action::PrevPage),
        TuiEvent::NextPage if app.can_go_forward() => Command::Dispatch(Action::NextPage),
        TuiEvent::PrevPage | TuiEvent::NextPage => return None,
        TuiEvent::InputChar(c) => edit_input(app, |text| text.push(c)),
        TuiEvent::Paste(pasted) => {
            let flattened = pasted.replace(['\r', '\n'], " ");
            edit_input(app, |text| text.push_str(&flattened))
        }
        TuiEvent::Backspace if app.mode == ScreenMode::Search => {
            if app.search.raw_input().is_empty() {
                return None;
            }
            edit_input(app, |text| {
                text.pop();
            })
        }
        TuiEvent::ClearInput if app.mode == ScreenMode::Search => {
            if app.search.raw_input().is_empty() {
                return None;
            }
            Command::Dispatch(Action::SearchInput(String::new()))
        }
        TuiEvent::Backspace | TuiEvent::ClearInput | TuiEvent::Resize => return None,
    };
    Some(command)
}

/// Typing on the search screen edits its input; typing anywhere else opens search with it.
fn edit_input(app: &App, edit: impl FnOnce(&mut String)) -> Command {
    match app.mode {
        ScreenMode::Search => {
            let mut text = app.search.raw_input().to_string();
            edit(&mut text);
            Command::Dispatch(Action::SearchInput(text))
        }
        ScreenMode::Latest => {
            let mut text = String::new();
            edit(&mut text);
            Command::SwitchMode(Some(text))
        }
    }
}

/// Carries out an effect. Returns true when the loop should quit.
fn perform(effect: Effect, tx: &UnboundedSender<Action>) -> bool {
    match effect {
        Effect::None => false,
        Effect::Fetch(run) => {
            spawn_fetch(run, tx.clone());
            false
        }
        Effect::Quit => true,
    }
}

fn spawn_fetch(run: PendingRun<ResultPage, CatalogError>, tx: UnboundedSender<Action>) {
    info!("Spawning catalog fetch {:?}", run.generation());
    tokio::spawn(async move {
        let resolution = run.complete().await;
        if tx.send(Action::MoviesLoaded(resolution)).is_err() {
            debug!("Fetch finished after its screen was unmounted; result ignored");
        }
    });
}
