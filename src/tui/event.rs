use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    Quit,
    InputChar(char),
    Paste(String), // Bracketed paste
    Backspace,
    ClearInput, // Ctrl+U
    PrevPage,
    NextPage,
    ToggleAdult, // Ctrl+A
    Refetch,     // Ctrl+R
    SwitchMode,  // Tab
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).ok()? {
        return None;
    }
    match event::read().ok()? {
        Event::Key(key_event) => {
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            map_key(key_event)
        }
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Quit),
        (KeyModifiers::CONTROL, KeyCode::Char('a')) => Some(TuiEvent::ToggleAdult),
        (KeyModifiers::CONTROL, KeyCode::Char('r')) => Some(TuiEvent::Refetch),
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => Some(TuiEvent::ClearInput),
        (KeyModifiers::CONTROL, _) => None,
        (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Left | KeyCode::PageUp) => Some(TuiEvent::PrevPage),
        (_, KeyCode::Right | KeyCode::PageDown) => Some(TuiEvent::NextPage),
        (_, KeyCode::Tab) => Some(TuiEvent::SwitchMode),
        (_, KeyCode::Esc) => Some(TuiEvent::Quit),
        _ => None,
    }
}
