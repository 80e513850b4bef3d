use super::direction::Direction;
use crate::command::Command;

/// What a key press means to a Snake session
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Input {
    Turn(Direction),
    TogglePause,
    Reset,
    /// Return to the launcher
    Quit,
}

impl Input {
    /// Translate a key command.  No check is made against the snake's current
    /// direction; that is up to [`super::state::SnakeState::set_direction()`].
    pub(crate) fn from_command(cmd: Command) -> Option<Input> {
        match cmd {
            Command::Up => Some(Input::Turn(Direction::North)),
            Command::Down => Some(Input::Turn(Direction::South)),
            Command::Left => Some(Input::Turn(Direction::West)),
            Command::Right => Some(Input::Turn(Direction::East)),
            Command::Space | Command::P => Some(Input::TogglePause),
            Command::R => Some(Input::Reset),
            Command::Esc | Command::Q => Some(Input::Quit),
            _ => None,
        }
    }
}
