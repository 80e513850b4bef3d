//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Number of cells in the snake's body after a reset
pub(crate) const INITIAL_SNAKE_LENGTH: u16 = 3;

/// Glyph for the snake's head when it is moving north/up
pub(crate) const SNAKE_HEAD_NORTH_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving south/down
pub(crate) const SNAKE_HEAD_SOUTH_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving east/right
pub(crate) const SNAKE_HEAD_EAST_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving west/left
pub(crate) const SNAKE_HEAD_WEST_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the target
pub(crate) const TARGET_SYMBOL: char = '●';

/// Glyph for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green);

/// Style for the snake's head
pub(crate) const SNAKE_HEAD_STYLE: Style = Style::new()
    .fg(Color::LightGreen)
    .add_modifier(Modifier::BOLD);

/// Style for the target
pub(crate) const TARGET_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of a game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for the launcher's title art
pub(crate) const LOGO_STYLE: Style = Style::new().fg(Color::Cyan);

/// Style for messages reporting rejected input
pub(crate) const ERROR_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for messages reporting a good outcome
pub(crate) const SUCCESS_STYLE: Style = Style::new()
    .fg(Color::LightGreen)
    .add_modifier(Modifier::BOLD);

/// Style for hints in the number guessing game
pub(crate) const HINT_STYLE: Style = Style::new().fg(Color::LightMagenta);

/// Style for section headings (statistics screen, etc.)
pub(crate) const HEADING_STYLE: Style = Style::new()
    .fg(Color::Cyan)
    .add_modifier(Modifier::BOLD);

/// Style for the "X" player's marks
pub(crate) const X_STYLE: Style = Style::new().fg(Color::LightRed).add_modifier(Modifier::BOLD);

/// Style for the "O" player's marks
pub(crate) const O_STYLE: Style = Style::new()
    .fg(Color::LightBlue)
    .add_modifier(Modifier::BOLD);

/// Style for the digits shown in empty tic-tac-toe cells
pub(crate) const CELL_NUMBER_STYLE: Style = Style::new().add_modifier(Modifier::DIM);

/// Style for the tic-tac-toe cursor cell
pub(crate) const CURSOR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
