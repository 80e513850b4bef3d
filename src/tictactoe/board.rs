use std::fmt;
use thiserror::Error;

/// The eight ways to get three in a row, as `(row, column)` cells
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Mark {
    X,
    O,
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => f.pad("X"),
            Mark::O => f.pad("O"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Outcome {
    Win {
        mark: Mark,
        line: [(usize, usize); 3],
    },
    Draw,
}

/// A 3×3 tic-tac-toe board and whose turn it is
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Board {
    cells: [[Option<Mark>; 3]; 3],
    moves: usize,
    outcome: Option<Outcome>,
}

impl Board {
    pub(crate) fn new() -> Board {
        Board::default()
    }

    /// The player to move next.  `X` always moves first.
    pub(crate) fn turn(&self) -> Mark {
        if self.moves % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        }
    }

    pub(crate) fn get(&self, row: usize, col: usize) -> Option<Mark> {
        self.cells.get(row)?.get(col).copied().flatten()
    }

    pub(crate) fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Place the current player's mark at `(row, col)` (zero-based).  On
    /// error, the board is left unchanged.
    pub(crate) fn place(&mut self, row: usize, col: usize) -> Result<Option<Outcome>, MoveError> {
        if self.outcome.is_some() {
            return Err(MoveError::GameOver);
        }
        let mark = self.turn();
        let cell = self
            .cells
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(MoveError::OutOfRange)?;
        if cell.is_some() {
            return Err(MoveError::Occupied);
        }
        *cell = Some(mark);
        self.moves += 1;
        if let Some(line) = LINES
            .into_iter()
            .find(|line| line.iter().all(|&(r, c)| self.cells[r][c] == Some(mark)))
        {
            self.outcome = Some(Outcome::Win { mark, line });
        } else if self.moves == 9 {
            self.outcome = Some(Outcome::Draw);
        }
        Ok(self.outcome)
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum MoveError {
    #[error("Please enter numbers between 1 and 3")]
    OutOfRange,
    #[error("That position is already taken!")]
    Occupied,
    #[error("The game is over; press r to play again")]
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn play(moves: &[(usize, usize)]) -> Board {
        let mut board = Board::new();
        for &(r, c) in moves {
            board.place(r, c).unwrap();
        }
        board
    }

    #[test]
    fn x_moves_first_and_turns_alternate() {
        let mut board = Board::new();
        assert_eq!(board.turn(), Mark::X);
        assert_eq!(board.place(1, 1), Ok(None));
        assert_eq!(board.get(1, 1), Some(Mark::X));
        assert_eq!(board.turn(), Mark::O);
        assert_eq!(board.place(0, 0), Ok(None));
        assert_eq!(board.get(0, 0), Some(Mark::O));
        assert_eq!(board.turn(), Mark::X);
    }

    #[rstest]
    #[case(LINES[0])]
    #[case(LINES[1])]
    #[case(LINES[2])]
    #[case(LINES[3])]
    #[case(LINES[4])]
    #[case(LINES[5])]
    #[case(LINES[6])]
    #[case(LINES[7])]
    fn x_wins_on_line(#[case] line: [(usize, usize); 3]) {
        // O plays into the first free cells not on the line
        let mut others = (0..3)
            .flat_map(|r| (0..3).map(move |c| (r, c)))
            .filter(|cell| !line.contains(cell));
        let mut board = Board::new();
        for (i, &(r, c)) in line.iter().enumerate() {
            let outcome = board.place(r, c).unwrap();
            if i < 2 {
                assert_eq!(outcome, None);
                let (or, oc) = others.next().unwrap();
                assert_eq!(board.place(or, oc), Ok(None));
            } else {
                assert_eq!(outcome, Some(Outcome::Win { mark: Mark::X, line }));
            }
        }
    }

    #[test]
    fn o_wins() {
        let board = play(&[(0, 0), (0, 2), (1, 0), (1, 1), (2, 2), (2, 0)]);
        assert_eq!(
            board.outcome(),
            Some(Outcome::Win {
                mark: Mark::O,
                line: [(0, 2), (1, 1), (2, 0)]
            })
        );
    }

    #[test]
    fn draw() {
        // X O X
        // X O O
        // O X X
        let board = play(&[
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 1),
            (1, 0),
            (1, 2),
            (2, 1),
            (2, 0),
            (2, 2),
        ]);
        assert_eq!(board.outcome(), Some(Outcome::Draw));
    }

    #[test]
    fn win_on_last_move_is_not_draw() {
        // X O X
        // O O X
        // O X X
        let board = play(&[
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 1),
            (1, 2),
            (1, 0),
            (2, 1),
            (2, 0),
            (2, 2),
        ]);
        assert!(matches!(
            board.outcome(),
            Some(Outcome::Win { mark: Mark::X, .. })
        ));
    }

    #[rstest]
    #[case(3, 0, MoveError::OutOfRange)]
    #[case(0, 3, MoveError::OutOfRange)]
    #[case(1, 1, MoveError::Occupied)]
    fn rejected_move(#[case] row: usize, #[case] col: usize, #[case] err: MoveError) {
        let mut board = play(&[(1, 1)]);
        let before = board.clone();
        assert_eq!(board.place(row, col), Err(err));
        assert_eq!(board, before);
    }

    #[test]
    fn no_moves_after_game_over() {
        let mut board = play(&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        let before = board.clone();
        assert_eq!(board.place(2, 2), Err(MoveError::GameOver));
        assert_eq!(board, before);
    }
}
