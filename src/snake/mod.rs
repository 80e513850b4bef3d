mod direction;
mod input;
mod preset;
mod render;
mod state;
pub(crate) use self::preset::SnakePreset;
pub(crate) use self::state::InvariantViolation;
use self::input::Input;
use self::render::SnakeView;
use self::state::{Phase, SnakeState, StepOutcome};
use crate::app::{Globals, Screen};
use crate::command::Command;
use crate::launcher::Launcher;
use crate::warning::{Warning, WarningScreen};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::Frame;
use std::time::{Duration, Instant};

/// A Snake session together with the timer that drives it
#[derive(Clone, Debug)]
pub(crate) struct SnakeGame<R = rand::rngs::ThreadRng> {
    rng: R,
    state: SnakeState,
    preset: SnakePreset,
    globals: Globals,
    next_tick: Option<Instant>,
    started: Instant,
    /// Session length, fixed once the snake collides
    finished: Option<Duration>,
}

impl SnakeGame<rand::rngs::ThreadRng> {
    pub(crate) fn new(globals: Globals) -> Result<Self, InvariantViolation> {
        SnakeGame::new_with_rng(globals, rand::rng())
    }
}

impl<R: Rng> SnakeGame<R> {
    pub(crate) fn new_with_rng(globals: Globals, mut rng: R) -> Result<SnakeGame<R>, InvariantViolation> {
        let preset = globals.options.snake;
        let state = SnakeState::new(preset.grid(), preset.reward(), &mut rng)?;
        log::info!("Starting Snake session on {preset} preset");
        Ok(SnakeGame {
            rng,
            state,
            preset,
            globals,
            next_tick: None,
            started: Instant::now(),
            finished: None,
        })
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(
            SnakeView {
                state: &self.state,
                preset: self.preset,
                elapsed: self.elapsed_at(Instant::now()),
            },
            frame.area(),
        );
    }

    fn elapsed_at(&self, now: Instant) -> Duration {
        self.finished
            .unwrap_or_else(|| now.saturating_duration_since(self.started))
    }

    /// Wait for either an input event or the next tick, whichever comes
    /// first, and handle it.  While the game is paused or over, there is no
    /// tick to wait for.
    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        if self.state.phase() == Phase::Running {
            let period = self.preset.tick_period();
            let when = *self
                .next_tick
                .get_or_insert_with(|| Instant::now() + period);
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.next_tick = None;
                Ok(self.tick())
            } else {
                Ok(self.handle_event(read()?))
            }
        } else {
            self.next_tick = None;
            Ok(self.handle_event(read()?))
        }
    }

    fn tick(&mut self) -> Option<Screen> {
        match self.state.step(&mut self.rng) {
            Ok(StepOutcome::Ate) => {
                log::debug!("Snake ate target; score is now {}", self.state.score());
                None
            }
            Ok(StepOutcome::Collided(collision)) => {
                let score = self.state.score();
                let elapsed = self.started.elapsed();
                self.finished = Some(elapsed);
                log::info!(
                    "Snake session ended by {collision:?} collision with score {score} after {}s",
                    elapsed.as_secs()
                );
                self.globals.stats.snake.record(score);
                None
            }
            Ok(StepOutcome::Moved | StepOutcome::Inert) => None,
            Err(e) => Some(self.abort(e)),
        }
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        if event == Event::FocusLost {
            self.state.pause();
            return None;
        }
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        if cmd == Command::Quit {
            return Some(Screen::Quit);
        }
        match Input::from_command(cmd)? {
            Input::Turn(d) => {
                if !self.state.set_direction(d) {
                    log::debug!("Ignored turn to {d:?}");
                }
            }
            Input::TogglePause => {
                let _ = self.state.toggle_pause();
            }
            Input::Reset => {
                if self.state.phase() == Phase::Terminal {
                    if let Err(e) = self.state.reset(&mut self.rng) {
                        return Some(self.abort(e));
                    }
                    self.started = Instant::now();
                    self.finished = None;
                    log::info!("Restarting Snake session on {} preset", self.preset);
                }
            }
            Input::Quit => {
                log::info!("Leaving Snake");
                return Some(Screen::Launcher(Launcher::new(self.globals.clone())));
            }
        }
        None
    }

    fn abort(&self, e: InvariantViolation) -> Screen {
        log::error!("Snake session aborted: {e}");
        Screen::Warning(WarningScreen::new(
            Warning::from(e),
            Launcher::new(self.globals.clone()),
        ))
    }
}
