use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Abstract key commands shared by every screen
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    /// Ctrl-C: leave the whole application
    Quit,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Space,
    Esc,
    Backspace,
    Home,
    End,
    Next,
    Prev,
    /// A decimal digit key, carrying its value
    Digit(u8),
    Hint,
    M,
    P,
    Q,
    R,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Char('w' | 'k') | KeyCode::Up) => Some(Command::Up),
            (KeyModifiers::NONE, KeyCode::Char('s' | 'j') | KeyCode::Down) => Some(Command::Down),
            (KeyModifiers::NONE, KeyCode::Char('a' | 'h') | KeyCode::Left) => Some(Command::Left),
            (KeyModifiers::NONE, KeyCode::Char('d' | 'l') | KeyCode::Right) => Some(Command::Right),
            (KeyModifiers::NONE, KeyCode::Char(c)) if c.is_ascii_digit() => c
                .to_digit(10)
                .and_then(|d| u8::try_from(d).ok())
                .map(Command::Digit),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('?')) => Some(Command::Hint),
            (_, KeyCode::Enter) => Some(Command::Enter),
            (KeyModifiers::NONE, KeyCode::Char(' ')) => Some(Command::Space),
            (_, KeyCode::Esc) => Some(Command::Esc),
            (_, KeyCode::Backspace) => Some(Command::Backspace),
            (_, KeyCode::Home) => Some(Command::Home),
            (_, KeyCode::End) => Some(Command::End),
            (_, KeyCode::Tab) => Some(Command::Next),
            (_, KeyCode::BackTab) => Some(Command::Prev),
            (KeyModifiers::NONE, KeyCode::Char('m')) => Some(Command::M),
            (KeyModifiers::NONE, KeyCode::Char('p')) => Some(Command::P),
            (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Command::Q),
            (KeyModifiers::NONE, KeyCode::Char('r')) => Some(Command::R),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), Some(Command::Quit))]
    #[case(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE), Some(Command::Up))]
    #[case(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE), Some(Command::Up))]
    #[case(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE), Some(Command::Down))]
    #[case(KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE), Some(Command::Left))]
    #[case(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE), Some(Command::Right))]
    #[case(KeyEvent::new(KeyCode::Char('0'), KeyModifiers::NONE), Some(Command::Digit(0)))]
    #[case(KeyEvent::new(KeyCode::Char('7'), KeyModifiers::NONE), Some(Command::Digit(7)))]
    #[case(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT), Some(Command::Hint))]
    #[case(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE), Some(Command::Hint))]
    #[case(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), Some(Command::Enter))]
    #[case(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE), Some(Command::Space))]
    #[case(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE), Some(Command::Esc))]
    #[case(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE), Some(Command::Backspace))]
    #[case(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE), Some(Command::R))]
    #[case(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE), None)]
    #[case(KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT), None)]
    #[case(KeyEvent::new(KeyCode::Char('7'), KeyModifiers::ALT), None)]
    fn test_from_key_event(#[case] ev: KeyEvent, #[case] cmd: Option<Command>) {
        assert_eq!(Command::from_key_event(ev), cmd);
    }
}
