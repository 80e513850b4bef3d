//! Per-game statistics for the current run of the program
use crate::app::{Globals, Screen};
use crate::command::Command;
use crate::consts;
use crate::launcher::Launcher;
use crate::tictactoe::{Mark, Outcome};
use crate::util::get_display_area;
use crossterm::event::{read, Event};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::Widget,
    Frame,
};

/// Statistics for every game, kept in memory only
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct SessionStats {
    pub(crate) snake: SnakeStats,
    pub(crate) tictactoe: TicTacToeStats,
    pub(crate) guess: GuessStats,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct SnakeStats {
    /// Number of sessions that ended in a collision
    pub(crate) sessions: u32,
    pub(crate) best_score: u32,
    pub(crate) total_score: u64,
}

impl SnakeStats {
    pub(crate) fn record(&mut self, score: u32) {
        self.sessions += 1;
        self.best_score = self.best_score.max(score);
        self.total_score += u64::from(score);
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct TicTacToeStats {
    pub(crate) x_wins: u32,
    pub(crate) o_wins: u32,
    pub(crate) draws: u32,
}

impl TicTacToeStats {
    pub(crate) fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win { mark: Mark::X, .. } => self.x_wins += 1,
            Outcome::Win { mark: Mark::O, .. } => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    pub(crate) fn rounds(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct GuessStats {
    pub(crate) played: u32,
    pub(crate) won: u32,
    pub(crate) total_attempts: u32,
    /// Fewest attempts needed to win a round
    pub(crate) best_attempts: Option<u32>,
}

impl GuessStats {
    pub(crate) fn record(&mut self, won: bool, attempts: u32) {
        self.played += 1;
        self.total_attempts += attempts;
        if won {
            self.won += 1;
            self.best_attempts = Some(self.best_attempts.map_or(attempts, |b| b.min(attempts)));
        }
    }

    /// Percentage of rounds won
    pub(crate) fn win_rate(&self) -> Option<f64> {
        (self.played > 0).then(|| f64::from(self.won) * 100.0 / f64::from(self.played))
    }

    pub(crate) fn average_attempts(&self) -> Option<f64> {
        (self.played > 0).then(|| f64::from(self.total_attempts) / f64::from(self.played))
    }
}

/// The statistics screen
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct StatsScreen {
    globals: Globals,
}

impl StatsScreen {
    pub(crate) fn new(globals: Globals) -> StatsScreen {
        StatsScreen { globals }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Quit => Some(Screen::Quit),
            Command::Enter | Command::Esc | Command::Q | Command::M => {
                Some(Screen::Launcher(Launcher::new(self.globals.clone())))
            }
            _ => None,
        }
    }
}

impl Widget for &StatsScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [title_area, _, body_area, keys_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(" Game Statistics", consts::SCORE_BAR_STYLE).render(title_area, buf);

        let stats = &self.globals.stats;
        let mut lines = Vec::new();
        lines.push(Line::styled(" Snake", consts::HEADING_STYLE));
        if stats.snake.sessions == 0 {
            lines.push(Line::from("   No games played yet!"));
        } else {
            lines.push(Line::from(format!(
                "   Games Played: {}",
                stats.snake.sessions
            )));
            lines.push(Line::from(format!(
                "   Best Score: {}",
                stats.snake.best_score
            )));
            lines.push(Line::from(format!(
                "   Total Score: {}",
                stats.snake.total_score
            )));
        }
        lines.push(Line::default());

        lines.push(Line::styled(" Tic-Tac-Toe", consts::HEADING_STYLE));
        if stats.tictactoe.rounds() == 0 {
            lines.push(Line::from("   No games played yet!"));
        } else {
            lines.push(Line::from(format!(
                "   X Wins: {}",
                stats.tictactoe.x_wins
            )));
            lines.push(Line::from(format!(
                "   O Wins: {}",
                stats.tictactoe.o_wins
            )));
            lines.push(Line::from(format!("   Draws: {}", stats.tictactoe.draws)));
        }
        lines.push(Line::default());

        lines.push(Line::styled(" Number Guessing", consts::HEADING_STYLE));
        let guess = stats.guess;
        match (guess.win_rate(), guess.average_attempts()) {
            (Some(rate), Some(avg)) => {
                lines.push(Line::from(format!("   Games Played: {}", guess.played)));
                lines.push(Line::from(format!("   Games Won: {}", guess.won)));
                lines.push(Line::from(format!("   Win Rate: {rate:.1}%")));
                lines.push(Line::from(format!("   Average Attempts: {avg:.1}")));
                if let Some(best) = guess.best_attempts {
                    lines.push(Line::from(format!("   Best Score: {best} attempts")));
                }
            }
            _ => lines.push(Line::from("   No games played yet!")),
        }
        Text::from(lines).render(body_area, buf);

        Line::from_iter([
            Span::raw(" Back to Launcher ("),
            Span::styled("Enter", consts::KEY_STYLE),
            Span::raw(")"),
        ])
        .render(keys_area, buf);
    }
}
