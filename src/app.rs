use crate::guess::GuessGame;
use crate::launcher::Launcher;
use crate::options::Options;
use crate::snake::SnakeGame;
use crate::stats::{SessionStats, StatsScreen};
use crate::tictactoe::TicTacToe;
use crate::warning::{Warning, WarningScreen};
use ratatui::{backend::Backend, Terminal};
use std::io;

/// State carried from screen to screen for the life of the program
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Globals {
    pub(crate) options: Options,
    pub(crate) stats: SessionStats,
}

#[derive(Clone, Debug)]
pub(crate) struct App {
    screen: Screen,
}

impl App {
    /// Start at the launcher, with `warning` (if any) shown on top of it
    pub(crate) fn new(globals: Globals, warning: Option<Warning>) -> App {
        let launcher = Launcher::new(globals);
        let screen = match warning {
            Some(w) => Screen::Warning(WarningScreen::new(w, launcher)),
            None => Screen::Launcher(launcher),
        };
        App { screen }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        log::info!("Application started");
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        log::info!("Application quitting");
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        match self.screen {
            Screen::Launcher(ref launcher) => {
                terminal.draw(|frame| launcher.draw(frame))?;
            }
            Screen::Snake(ref game) => {
                terminal.draw(|frame| game.draw(frame))?;
            }
            Screen::TicTacToe(ref game) => {
                terminal.draw(|frame| game.draw(frame))?;
            }
            Screen::Guess(ref game) => {
                terminal.draw(|frame| game.draw(frame))?;
            }
            Screen::Stats(ref stats) => {
                terminal.draw(|frame| stats.draw(frame))?;
            }
            Screen::Warning(ref warning) => {
                terminal.draw(|frame| warning.draw(frame))?;
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        let next = match self.screen {
            Screen::Launcher(ref mut launcher) => launcher.process_input()?,
            Screen::Snake(ref mut game) => game.process_input()?,
            Screen::TicTacToe(ref mut game) => game.process_input()?,
            Screen::Guess(ref mut game) => game.process_input()?,
            Screen::Stats(ref mut stats) => stats.process_input()?,
            Screen::Warning(ref mut warning) => warning.process_input()?,
            Screen::Quit => None,
        };
        if let Some(screen) = next {
            self.screen = screen;
        }
        Ok(())
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }
}

/// The application's current top-level mode
#[derive(Clone, Debug)]
pub(crate) enum Screen {
    Launcher(Launcher),
    Snake(SnakeGame),
    TicTacToe(TicTacToe),
    Guess(GuessGame),
    Stats(StatsScreen),
    Warning(WarningScreen),
    Quit,
}
