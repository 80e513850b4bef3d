use super::direction::Direction;
use crate::consts;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::{Position, Rect, Size};
use std::collections::{HashSet, VecDeque};
use thiserror::Error;

/// Everything belonging to one Snake session.
///
/// All positions are relative to the top-left corner of the grid.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct SnakeState {
    grid: Size,

    /// Points added to the score for each target eaten
    reward: u32,

    /// The cells of the snake, head first
    body: VecDeque<Position>,

    /// Always equal to the front of `body`
    head: Position,

    /// The direction the snake will move in on the next step
    direction: Direction,

    /// The direction the snake moved in on the last step
    heading: Direction,

    target: Position,
    score: u32,
    terminal: bool,
    paused: bool,
    collision: Option<Collision>,
}

impl SnakeState {
    pub(crate) fn new<R: Rng + ?Sized>(
        grid: Size,
        reward: u32,
        rng: &mut R,
    ) -> Result<SnakeState, InvariantViolation> {
        let mut state = SnakeState {
            grid,
            reward,
            body: VecDeque::new(),
            head: Position::ORIGIN,
            direction: Direction::East,
            heading: Direction::East,
            target: Position::ORIGIN,
            score: 0,
            terminal: false,
            paused: false,
            collision: None,
        };
        state.reset(rng)?;
        Ok(state)
    }

    /// Put a snake of [`consts::INITIAL_SNAKE_LENGTH`] cells in the middle of
    /// the grid facing east, place a new target, and clear the score & flags.
    pub(crate) fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), InvariantViolation> {
        let too_small = InvariantViolation::GridTooSmall {
            width: self.grid.width,
            height: self.grid.height,
        };
        if self.grid.height == 0 {
            return Err(too_small);
        }
        let x = self.grid.width / 2;
        let y = self.grid.height / 2;
        let mut body = VecDeque::new();
        for i in 0..consts::INITIAL_SNAKE_LENGTH {
            let Some(xi) = x.checked_sub(i) else {
                return Err(too_small);
            };
            body.push_back(Position::new(xi, y));
        }
        self.head = Position::new(x, y);
        self.body = body;
        self.direction = Direction::East;
        self.heading = Direction::East;
        self.score = 0;
        self.terminal = false;
        self.paused = false;
        self.collision = None;
        self.target = self.free_cell(rng)?;
        Ok(())
    }

    /// Request a change of direction for the next step.  Returns `false` if
    /// the request was ignored: the game is over or paused, or `d` is the
    /// opposite of the currently requested direction.
    pub(crate) fn set_direction(&mut self, d: Direction) -> bool {
        if self.terminal || self.paused || d == self.direction.reverse() {
            return false;
        }
        self.direction = d;
        true
    }

    /// Pause or unpause.  Returns `false` (and does nothing) once the game is
    /// over.
    pub(crate) fn toggle_pause(&mut self) -> bool {
        if self.terminal {
            return false;
        }
        self.paused = !self.paused;
        true
    }

    pub(crate) fn pause(&mut self) {
        if !self.terminal {
            self.paused = true;
        }
    }

    /// Advance the snake one cell in its current direction.
    pub(crate) fn step<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<StepOutcome, InvariantViolation> {
        if self.terminal || self.paused {
            return Ok(StepOutcome::Inert);
        }
        let Some(candidate) = self.direction.advance(self.head, self.grid) else {
            return Ok(self.collide(Collision::Wall));
        };
        if self.body.contains(&candidate) {
            return Ok(self.collide(Collision::Body));
        }
        self.body.push_front(candidate);
        self.head = candidate;
        self.heading = self.direction;
        if candidate == self.target {
            self.score = self.score.saturating_add(self.reward);
            self.target = self.free_cell(rng)?;
            Ok(StepOutcome::Ate)
        } else {
            let _ = self.body.pop_back();
            Ok(StepOutcome::Moved)
        }
    }

    fn collide(&mut self, collision: Collision) -> StepOutcome {
        self.terminal = true;
        self.collision = Some(collision);
        StepOutcome::Collided(collision)
    }

    /// Choose a cell not covered by the snake uniformly at random
    fn free_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Position, InvariantViolation> {
        let occupied = self.body.iter().copied().collect::<HashSet<_>>();
        Rect::from((Position::ORIGIN, self.grid))
            .positions()
            .filter(|p| !occupied.contains(p))
            .choose(rng)
            .ok_or(InvariantViolation::NoFreeCell {
                width: self.grid.width,
                height: self.grid.height,
            })
    }

    pub(crate) fn grid(&self) -> Size {
        self.grid
    }

    pub(crate) fn head(&self) -> Position {
        self.head
    }

    pub(crate) fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    /// The direction the snake actually moved in on its last step
    pub(crate) fn heading(&self) -> Direction {
        self.heading
    }

    pub(crate) fn target(&self) -> Position {
        self.target
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn collision(&self) -> Option<Collision> {
        self.collision
    }

    pub(crate) fn phase(&self) -> Phase {
        if self.terminal {
            Phase::Terminal
        } else if self.paused {
            Phase::Paused
        } else {
            Phase::Running
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
    Running,
    Paused,
    Terminal,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    Wall,
    Body,
}

/// What a call to [`SnakeState::step()`] did
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum StepOutcome {
    Moved,
    Ate,
    Collided(Collision),
    /// Nothing happened because the game is paused or over
    Inert,
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum InvariantViolation {
    #[error("no free cell left on the {width}×{height} grid for a new target")]
    NoFreeCell { width: u16, height: u16 },
    #[error("a {width}×{height} grid is too small for the snake to start on")]
    GridTooSmall { width: u16, height: u16 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn rng() -> ChaCha12Rng {
        ChaCha12Rng::seed_from_u64(RNG_SEED)
    }

    fn body<const N: usize>(cells: [(u16, u16); N]) -> VecDeque<Position> {
        cells.into_iter().map(Position::from).collect()
    }

    fn ten_by_ten() -> SnakeState {
        SnakeState::new(Size::new(10, 10), 10, &mut rng()).unwrap()
    }

    fn set_body<const N: usize>(state: &mut SnakeState, cells: [(u16, u16); N]) {
        state.body = body(cells);
        state.head = Position::from(cells[0]);
    }

    #[test]
    fn initial_configuration() {
        let state = ten_by_ten();
        assert_eq!(state.body(), &body([(5, 5), (4, 5), (3, 5)]));
        assert_eq!(state.direction(), Direction::East);
        assert_eq!(state.score(), 0);
        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(state.collision(), None);
        assert!(!state.body().contains(&state.target()));
    }

    #[test]
    fn eat_target() {
        let mut state = ten_by_ten();
        state.target = Position::new(6, 5);
        let mut rng = rng();
        assert_eq!(state.step(&mut rng), Ok(StepOutcome::Ate));
        assert_eq!(state.body(), &body([(6, 5), (5, 5), (4, 5), (3, 5)]));
        assert_eq!(state.score(), 10);
        assert!(!state.body().contains(&state.target()));
        state.target = Position::new(7, 5);
        assert_eq!(state.step(&mut rng), Ok(StepOutcome::Ate));
        assert_eq!(state.score(), 20);
        assert_eq!(state.body().len(), 5);
    }

    #[test]
    fn hit_wall() {
        let mut state = ten_by_ten();
        set_body(&mut state, [(9, 5), (8, 5), (7, 5)]);
        state.target = Position::new(0, 0);
        let before = state.body.clone();
        assert_eq!(
            state.step(&mut rng()),
            Ok(StepOutcome::Collided(Collision::Wall))
        );
        assert_eq!(state.phase(), Phase::Terminal);
        assert_eq!(state.body(), &before);
        assert_eq!(state.collision(), Some(Collision::Wall));
    }

    #[test]
    fn move_up() {
        let mut state = ten_by_ten();
        set_body(&mut state, [(2, 2), (2, 3)]);
        state.direction = Direction::North;
        state.heading = Direction::North;
        state.target = Position::new(8, 8);
        assert_eq!(state.step(&mut rng()), Ok(StepOutcome::Moved));
        assert_eq!(state.body(), &body([(2, 1), (2, 2)]));
        assert_eq!(state.head(), Position::new(2, 1));
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn bite_self() {
        let mut state = ten_by_ten();
        set_body(&mut state, [(4, 4), (5, 4), (5, 5), (4, 5), (3, 5)]);
        state.direction = Direction::South;
        state.heading = Direction::West;
        state.target = Position::new(0, 0);
        assert_eq!(
            state.step(&mut rng()),
            Ok(StepOutcome::Collided(Collision::Body))
        );
        assert_eq!(state.phase(), Phase::Terminal);
        assert_eq!(state.body().len(), 5);
    }

    #[rstest]
    #[case(Direction::West, false)]
    #[case(Direction::East, true)]
    #[case(Direction::North, true)]
    #[case(Direction::South, true)]
    fn reversal_rejected(#[case] d: Direction, #[case] accepted: bool) {
        let mut state = ten_by_ten();
        assert_eq!(state.set_direction(d), accepted);
        let expected = if accepted { d } else { Direction::East };
        assert_eq!(state.direction(), expected);
    }

    #[test]
    fn turns_checked_against_requested_direction() {
        let mut state = ten_by_ten();
        state.target = Position::new(0, 0);
        assert!(state.set_direction(Direction::North));
        // Only the opposite of the requested direction is refused, even
        // though the snake last moved east
        assert!(state.set_direction(Direction::West));
        assert_eq!(state.direction(), Direction::West);
        assert_eq!(state.heading(), Direction::East);
        assert!(!state.set_direction(Direction::East));
        assert_eq!(state.direction(), Direction::West);
        assert_eq!(
            state.step(&mut rng()),
            Ok(StepOutcome::Collided(Collision::Body))
        );
    }

    #[test]
    fn paused_is_inert() {
        let mut state = ten_by_ten();
        assert!(state.toggle_pause());
        assert_eq!(state.phase(), Phase::Paused);
        let before = state.clone();
        assert_eq!(state.step(&mut rng()), Ok(StepOutcome::Inert));
        assert!(!state.set_direction(Direction::North));
        assert_eq!(state, before);
        assert!(state.toggle_pause());
        assert_eq!(state.phase(), Phase::Running);
    }

    #[test]
    fn terminal_is_inert() {
        let mut state = ten_by_ten();
        set_body(&mut state, [(9, 5), (8, 5), (7, 5)]);
        state.target = Position::new(0, 0);
        let mut rng = rng();
        assert!(state.step(&mut rng).is_ok());
        let before = state.clone();
        assert_eq!(state.step(&mut rng), Ok(StepOutcome::Inert));
        assert!(!state.set_direction(Direction::North));
        assert!(!state.toggle_pause());
        state.pause();
        assert_eq!(state, before);
    }

    #[test]
    fn reset_restores_initial() {
        let mut state = ten_by_ten();
        let mut rng = rng();
        state.target = Position::new(6, 5);
        assert!(state.step(&mut rng).is_ok());
        assert!(state.set_direction(Direction::South));
        for _ in 0..10 {
            assert!(state.step(&mut rng).is_ok());
        }
        assert_eq!(state.phase(), Phase::Terminal);
        state.reset(&mut ChaCha12Rng::seed_from_u64(RNG_SEED)).unwrap();
        assert_eq!(state, ten_by_ten());
    }

    #[test]
    fn full_grid_on_eating() {
        let mut state = SnakeState::new(Size::new(4, 1), 1, &mut rng()).unwrap();
        assert_eq!(state.body(), &body([(2, 0), (1, 0), (0, 0)]));
        assert_eq!(state.target(), Position::new(3, 0));
        assert_eq!(
            state.step(&mut rng()),
            Err(InvariantViolation::NoFreeCell {
                width: 4,
                height: 1
            })
        );
    }

    #[rstest]
    #[case(Size::new(3, 3))]
    #[case(Size::new(10, 0))]
    fn grid_too_small(#[case] grid: Size) {
        assert_eq!(
            SnakeState::new(grid, 1, &mut rng()),
            Err(InvariantViolation::GridTooSmall {
                width: grid.width,
                height: grid.height
            })
        );
    }

    #[test]
    fn random_walk_keeps_invariants() {
        let mut rng = rng();
        let mut state = SnakeState::new(Size::new(12, 8), 5, &mut rng).unwrap();
        let directions = [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ];
        let mut games = 0;
        for _ in 0..5000 {
            let d = directions[rng.random_range(0..directions.len())];
            let _ = state.set_direction(d);
            let len = state.body().len();
            let score = state.score();
            match state.step(&mut rng).unwrap() {
                StepOutcome::Moved => {
                    assert_eq!(state.body().len(), len);
                    assert_eq!(state.score(), score);
                }
                StepOutcome::Ate => {
                    assert_eq!(state.body().len(), len + 1);
                    assert_eq!(state.score(), score + 5);
                }
                StepOutcome::Collided(_) => {
                    assert_eq!(state.body().len(), len);
                    assert_eq!(state.score(), score);
                    games += 1;
                    state.reset(&mut rng).unwrap();
                    continue;
                }
                StepOutcome::Inert => unreachable!("running game should not be inert"),
            }
            assert_eq!(state.body().front(), Some(&state.head()));
            let cells = state.body().iter().collect::<HashSet<_>>();
            assert_eq!(cells.len(), state.body().len(), "body overlaps itself");
            assert!(!cells.contains(&state.target()), "target is on the body");
            assert!(state
                .body()
                .iter()
                .all(|p| p.x < state.grid().width && p.y < state.grid().height));
        }
        assert!(games > 0);
    }
}
