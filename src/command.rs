use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A player action decoded from a key press
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    /// Begin a run if none is in progress
    Start,
    /// Begin a new run unconditionally
    Restart,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Char('q')) | (_, KeyCode::Esc) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Char('w' | 'k') | KeyCode::Up) => Some(Command::Up),
            (KeyModifiers::NONE, KeyCode::Char('s' | 'j') | KeyCode::Down) => Some(Command::Down),
            (KeyModifiers::NONE, KeyCode::Char('a' | 'h') | KeyCode::Left) => Some(Command::Left),
            (KeyModifiers::NONE, KeyCode::Char('d' | 'l') | KeyCode::Right) => Some(Command::Right),
            (KeyModifiers::NONE, KeyCode::Char(' ')) => Some(Command::Start),
            (KeyModifiers::NONE, KeyCode::Char('r')) => Some(Command::Restart),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(KeyCode::Up, KeyModifiers::NONE, Some(Command::Up))]
    #[case(KeyCode::Char('w'), KeyModifiers::NONE, Some(Command::Up))]
    #[case(KeyCode::Char('k'), KeyModifiers::NONE, Some(Command::Up))]
    #[case(KeyCode::Down, KeyModifiers::NONE, Some(Command::Down))]
    #[case(KeyCode::Char('j'), KeyModifiers::NONE, Some(Command::Down))]
    #[case(KeyCode::Left, KeyModifiers::NONE, Some(Command::Left))]
    #[case(KeyCode::Char('a'), KeyModifiers::NONE, Some(Command::Left))]
    #[case(KeyCode::Right, KeyModifiers::NONE, Some(Command::Right))]
    #[case(KeyCode::Char('l'), KeyModifiers::NONE, Some(Command::Right))]
    #[case(KeyCode::Char(' '), KeyModifiers::NONE, Some(Command::Start))]
    #[case(KeyCode::Char('r'), KeyModifiers::NONE, Some(Command::Restart))]
    #[case(KeyCode::Char('q'), KeyModifiers::NONE, Some(Command::Quit))]
    #[case(KeyCode::Esc, KeyModifiers::NONE, Some(Command::Quit))]
    #[case(KeyCode::Char('c'), KeyModifiers::CONTROL, Some(Command::Quit))]
    #[case(KeyCode::Char('c'), KeyModifiers::NONE, None)]
    #[case(KeyCode::Char('w'), KeyModifiers::CONTROL, None)]
    #[case(KeyCode::Enter, KeyModifiers::NONE, None)]
    fn test_from_key_event(
        #[case] code: KeyCode,
        #[case] modifiers: KeyModifiers,
        #[case] cmd: Option<Command>,
    ) {
        assert_eq!(Command::from_key_event(KeyEvent::new(code, modifiers)), cmd);
    }
}
