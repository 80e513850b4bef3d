mod board;
pub(crate) use self::board::{Mark, Outcome};
use self::board::{Board, MoveError};
use crate::app::{Globals, Screen};
use crate::command::Command;
use crate::consts;
use crate::launcher::Launcher;
use crate::util::get_display_area;
use crossterm::event::{read, Event};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Widget,
    Frame,
};

/// The two-player tic-tac-toe screen
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct TicTacToe {
    board: Board,
    /// `(row, column)` of the highlighted cell
    cursor: (usize, usize),
    error: Option<MoveError>,
    globals: Globals,
}

impl TicTacToe {
    pub(crate) fn new(globals: Globals) -> TicTacToe {
        log::info!("Starting Tic-Tac-Toe round");
        TicTacToe {
            board: Board::new(),
            cursor: (1, 1),
            error: None,
            globals,
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        let (row, col) = self.cursor;
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Quit => return Some(Screen::Quit),
            Command::Esc | Command::Q | Command::M => {
                log::info!("Leaving Tic-Tac-Toe");
                return Some(Screen::Launcher(Launcher::new(self.globals.clone())));
            }
            Command::Up => self.cursor = (row.saturating_sub(1), col),
            Command::Down => self.cursor = ((row + 1).min(2), col),
            Command::Left => self.cursor = (row, col.saturating_sub(1)),
            Command::Right => self.cursor = (row, (col + 1).min(2)),
            Command::Enter | Command::Space => self.place(row, col),
            Command::Digit(d) => match usize::from(d).checked_sub(1) {
                Some(i) => self.place(i / 3, i % 3),
                None => self.reject(MoveError::OutOfRange),
            },
            Command::R if self.board.outcome().is_some() => {
                log::info!("Starting Tic-Tac-Toe round");
                self.board = Board::new();
                self.cursor = (1, 1);
                self.error = None;
            }
            _ => (),
        }
        None
    }

    fn place(&mut self, row: usize, col: usize) {
        let mark = self.board.turn();
        match self.board.place(row, col) {
            Ok(outcome) => {
                self.error = None;
                self.cursor = (row, col);
                log::debug!("{mark} placed at row {}, column {}", row + 1, col + 1);
                if let Some(outcome) = outcome {
                    match outcome {
                        Outcome::Win { .. } => log::info!("Tic-Tac-Toe round won by {mark}"),
                        Outcome::Draw => log::info!("Tic-Tac-Toe round drawn"),
                    }
                    self.globals.stats.tictactoe.record(outcome);
                }
            }
            Err(e) => self.reject(e),
        }
    }

    fn reject(&mut self, e: MoveError) {
        log::debug!("Move rejected: {e}");
        self.error = Some(e);
    }
}

impl Widget for &TicTacToe {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [title_area, _, status_area, _, board_area, _, msg_area, _, keys_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(BoardView::HEIGHT),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(1),
            ])
            .areas(display);
        Line::styled(" Tic-Tac-Toe", consts::SCORE_BAR_STYLE).render(title_area, buf);

        let outcome = self.board.outcome();
        let status = match outcome {
            None => {
                let mark = self.board.turn();
                Line::from_iter([
                    Span::raw("Current Player: "),
                    Span::styled(mark.to_string(), mark_style(mark)),
                ])
            }
            Some(Outcome::Win { mark, .. }) => Line::from_iter([
                Span::raw("Player "),
                Span::styled(mark.to_string(), mark_style(mark)),
                Span::styled(" wins!", consts::SUCCESS_STYLE),
            ]),
            Some(Outcome::Draw) => Line::styled("It's a draw!", consts::SUCCESS_STYLE),
        };
        status.centered().render(status_area, buf);

        let [board_area] = Layout::horizontal([BoardView::WIDTH])
            .flex(Flex::Center)
            .areas(board_area);
        BoardView {
            board: &self.board,
            cursor: outcome.is_none().then_some(self.cursor),
        }
        .render(board_area, buf);

        if let Some(e) = self.error {
            Line::styled(e.to_string(), consts::ERROR_STYLE)
                .centered()
                .render(msg_area, buf);
        }

        let keys = if outcome.is_none() {
            vec![
                Span::raw(" Place ("),
                Span::styled("Enter", consts::KEY_STYLE),
                Span::raw(" or "),
                Span::styled("1", consts::KEY_STYLE),
                Span::raw("-"),
                Span::styled("9", consts::KEY_STYLE),
                Span::raw(") — Back ("),
                Span::styled("Esc", consts::KEY_STYLE),
                Span::raw(")"),
            ]
        } else {
            vec![
                Span::raw(" Play Again ("),
                Span::styled("r", consts::KEY_STYLE),
                Span::raw(") — Back to Launcher ("),
                Span::styled("q", consts::KEY_STYLE),
                Span::raw(")"),
            ]
        };
        Line::from(keys).render(keys_area, buf);
    }
}

fn mark_style(mark: Mark) -> Style {
    match mark {
        Mark::X => consts::X_STYLE,
        Mark::O => consts::O_STYLE,
    }
}

/// The 3×3 grid.  Empty cells show the digit that places a mark there.
#[derive(Clone, Copy, Debug)]
struct BoardView<'a> {
    board: &'a Board,
    cursor: Option<(usize, usize)>,
}

impl BoardView<'_> {
    const HEIGHT: u16 = 5;
    const WIDTH: u16 = 11;
}

impl Widget for BoardView<'_> {
    /*
     *  X │ 2 │ O
     * ───┼───┼───
     *  4 │ X │ 6
     * ───┼───┼───
     *  7 │ 8 │ O
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let winning = match self.board.outcome() {
            Some(Outcome::Win { line, .. }) => Some(line),
            _ => None,
        };
        for (row, y) in (0..3).zip((0..BoardView::HEIGHT).step_by(2)) {
            let mut spans = Vec::with_capacity(5);
            for col in 0..3 {
                if col > 0 {
                    spans.push(Span::raw("│"));
                }
                let (text, mut style) = match self.board.get(row, col) {
                    Some(mark) => (format!(" {mark} "), mark_style(mark)),
                    None => (
                        format!(" {} ", row * 3 + col + 1),
                        consts::CELL_NUMBER_STYLE,
                    ),
                };
                if winning.is_some_and(|line| line.contains(&(row, col))) {
                    style = style.patch(consts::SUCCESS_STYLE);
                }
                if self.cursor == Some((row, col)) {
                    style = style.patch(consts::CURSOR_STYLE);
                }
                spans.push(Span::styled(text, style));
            }
            let row_area = Rect {
                y: area.y.saturating_add(y),
                height: 1,
                ..area
            };
            if row_area.y < area.bottom() {
                Line::from(spans).render(row_area, buf);
            }
            if row < 2 {
                let sep_area = Rect {
                    y: row_area.y.saturating_add(1),
                    ..row_area
                };
                if sep_area.y < area.bottom() {
                    Line::from("───┼───┼───").render(sep_area, buf);
                }
            }
        }
    }
}
