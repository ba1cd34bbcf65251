use crossterm::event::{self, KeyCode, KeyEventKind, KeyModifiers};

/// Input the screensaver reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Quit,
    NextMode,
    NextColor,
    RandomSpot,
    Resize { columns: u16, rows: u16 },
}

impl Event {
    pub fn from_crossterm_event(event: event::Event) -> Option<Self> {
        match event {
            event::Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(Event::Quit)
                }
                KeyCode::Char('q') | KeyCode::Esc => Some(Event::Quit),
                KeyCode::Char('m') => Some(Event::NextMode),
                KeyCode::Char('c') => Some(Event::NextColor),
                KeyCode::Char('r') => Some(Event::RandomSpot),
                _ => None,
            },
            event::Event::Resize(columns, rows) => Some(Event::Resize { columns, rows }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyEventState};

    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> event::Event {
        event::Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn press(c: char) -> event::Event {
        key(KeyCode::Char(c), KeyModifiers::NONE, KeyEventKind::Press)
    }

    #[test]
    fn keys() {
        assert_eq!(Event::from_crossterm_event(press('q')), Some(Event::Quit));
        assert_eq!(Event::from_crossterm_event(press('m')), Some(Event::NextMode));
        assert_eq!(Event::from_crossterm_event(press('c')), Some(Event::NextColor));
        assert_eq!(Event::from_crossterm_event(press('r')), Some(Event::RandomSpot));
        assert_eq!(Event::from_crossterm_event(press('x')), None);
        assert_eq!(
            Event::from_crossterm_event(key(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyEventKind::Press
            )),
            Some(Event::Quit)
        );
        assert_eq!(
            Event::from_crossterm_event(key(
                KeyCode::Esc,
                KeyModifiers::NONE,
                KeyEventKind::Press
            )),
            Some(Event::Quit)
        );
    }

    #[test]
    fn releases_are_ignored() {
        assert_eq!(
            Event::from_crossterm_event(key(
                KeyCode::Char('m'),
                KeyModifiers::NONE,
                KeyEventKind::Release
            )),
            None
        );
    }

    #[test]
    fn resize() {
        assert_eq!(
            Event::from_crossterm_event(event::Event::Resize(120, 40)),
            Some(Event::Resize {
                columns: 120,
                rows: 40
            })
        );
    }
}
