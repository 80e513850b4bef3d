mod level;
mod round;
pub(crate) use self::level::Level;
use self::round::{GuessError, Round, Status, Verdict};
use crate::app::{Globals, Screen};
use crate::command::Command;
use crate::consts;
use crate::launcher::Launcher;
use crate::util::get_display_area;
use crossterm::event::{read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Widget,
    Frame,
};

/// The number guessing screen
#[derive(Clone, Debug)]
pub(crate) struct GuessGame<R = rand::rngs::ThreadRng> {
    rng: R,
    round: Round,

    /// Digits typed so far for the next guess
    input: String,

    /// Accepted guesses in the current round, oldest first
    guesses: Vec<u32>,

    message: Option<Message>,
    globals: Globals,
}

impl GuessGame<rand::rngs::ThreadRng> {
    pub(crate) fn new(globals: Globals) -> Self {
        GuessGame::new_with_rng(globals, rand::rng())
    }
}

impl<R: Rng> GuessGame<R> {
    pub(crate) fn new_with_rng(globals: Globals, mut rng: R) -> GuessGame<R> {
        let level = globals.options.guess;
        log::info!("Starting Number Guessing round on {level} level");
        let round = Round::new(level, &mut rng);
        GuessGame {
            rng,
            round,
            input: String::new(),
            guesses: Vec::new(),
            message: None,
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
        let playing = self.round.status() == Status::Playing;
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Quit => return Some(Screen::Quit),
            Command::Esc | Command::Q => {
                log::info!("Leaving Number Guessing");
                return Some(Screen::Launcher(Launcher::new(self.globals.clone())));
            }
            Command::Digit(d) if playing => {
                if self.input.len() < self.round.level().max_digits() {
                    self.input.push(char::from(b'0' + d));
                }
            }
            Command::Backspace if playing => {
                let _ = self.input.pop();
            }
            Command::Enter if playing => self.submit(),
            Command::Hint if playing => {
                self.message = Some(match self.round.hint() {
                    Ok(text) => Message::Hint(text),
                    Err(e) => {
                        log::debug!("Hint refused: {e}");
                        Message::Error(e.to_string())
                    }
                });
            }
            Command::R if !playing => self.new_round(),
            _ => (),
        }
        None
    }

    fn submit(&mut self) {
        let parsed = self.input.parse::<u32>().map_err(|_| GuessError::NotANumber);
        self.input.clear();
        let verdict = parsed.and_then(|n| {
            let verdict = self.round.guess(n)?;
            self.guesses.push(n);
            Ok(verdict)
        });
        self.message = Some(match verdict {
            Ok(Verdict::Correct) => {
                let attempts = self.round.attempts();
                log::info!("Number Guessing round won in {attempts} attempts");
                self.globals.stats.guess.record(true, attempts);
                Message::Success(format!(
                    "Congratulations! You guessed it in {attempts} attempt(s) using {} hint(s)!",
                    self.round.hints_used()
                ))
            }
            Ok(Verdict::Wrong { attempts_left }) => {
                let mut msg = format!("Not quite! You have {attempts_left} attempt(s) left.");
                if self.round.hint_available() {
                    msg.push_str(" Press ? for a hint.");
                }
                Message::Info(msg)
            }
            Ok(Verdict::Lost) => {
                let attempts = self.round.attempts();
                log::info!("Number Guessing round lost after {attempts} attempts");
                self.globals.stats.guess.record(false, attempts);
                Message::Error(format!(
                    "Game Over! You ran out of attempts. The secret number was {}.",
                    self.round.secret()
                ))
            }
            Err(e) => {
                log::debug!("Guess rejected: {e}");
                Message::Error(e.to_string())
            }
        });
    }

    fn new_round(&mut self) {
        let level = self.globals.options.guess;
        log::info!("Starting Number Guessing round on {level} level");
        self.round = Round::new(level, &mut self.rng);
        self.input.clear();
        self.guesses.clear();
        self.message = None;
    }
}

impl<R> Widget for &GuessGame<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [title_area, _, intro_area, status_area, history_area, _, input_area, _, msg_area, _, keys_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(1),
            ])
            .areas(display);
        let level = self.round.level();
        Line::styled(
            format!(" Number Guessing │ {level}"),
            consts::SCORE_BAR_STYLE,
        )
        .render(title_area, buf);

        let range = level.range();
        Line::from(format!(
            " I'm thinking of a number between {} and {}.",
            range.start(),
            range.end()
        ))
        .render(intro_area, buf);
        Line::from(format!(
            " Attempt {}/{} │ Hints left: {}",
            self.round.attempts(),
            level.max_attempts(),
            self.round.hints_left()
        ))
        .render(status_area, buf);
        if !self.guesses.is_empty() {
            let history = self
                .guesses
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            Line::from(format!(" Your guesses: {history}")).render(history_area, buf);
        }

        if self.round.status() == Status::Playing {
            Line::from_iter([
                Span::raw(" Your guess: "),
                Span::styled(self.input.as_str(), consts::KEY_STYLE),
                Span::styled("_", consts::CURSOR_STYLE),
            ])
            .render(input_area, buf);
        }

        if let Some(ref msg) = self.message {
            Line::styled(format!(" {}", msg.text()), msg.style()).render(msg_area, buf);
        }

        let keys = if self.round.status() == Status::Playing {
            vec![
                Span::raw(" Guess ("),
                Span::styled("Enter", consts::KEY_STYLE),
                Span::raw(") — Hint ("),
                Span::styled("?", consts::KEY_STYLE),
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

/// Feedback on the last thing the player did
#[derive(Clone, Debug, Eq, PartialEq)]
enum Message {
    Info(String),
    Hint(&'static str),
    Success(String),
    Error(String),
}

impl Message {
    fn text(&self) -> &str {
        match self {
            Message::Info(s) | Message::Success(s) | Message::Error(s) => s,
            Message::Hint(s) => s,
        }
    }

    fn style(&self) -> Style {
        match self {
            Message::Info(_) => Style::new(),
            Message::Hint(_) => consts::HINT_STYLE,
            Message::Success(_) => consts::SUCCESS_STYLE,
            Message::Error(_) => consts::ERROR_STYLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn game(level: Level) -> GuessGame<ChaCha12Rng> {
        let mut globals = Globals::default();
        globals.options.guess = level;
        GuessGame::new_with_rng(globals, ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_guess(game: &mut GuessGame<ChaCha12Rng>, n: u32) {
        for c in n.to_string().chars() {
            assert!(game.handle_event(key(KeyCode::Char(c))).is_none());
        }
        assert!(game.handle_event(key(KeyCode::Enter)).is_none());
    }

    fn wrong(game: &GuessGame<ChaCha12Rng>) -> u32 {
        if game.round.secret() == 1 {
            2
        } else {
            1
        }
    }

    fn render(game: &GuessGame<ChaCha12Rng>) -> Vec<String> {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    #[test]
    fn input_bounded_by_range() {
        let mut game = game(Level::Medium);
        for c in ['1', '2', '3'] {
            assert!(game.handle_event(key(KeyCode::Char(c))).is_none());
        }
        assert_eq!(game.input, "12");
        assert!(game.handle_event(key(KeyCode::Backspace)).is_none());
        assert_eq!(game.input, "1");
    }

    #[test]
    fn empty_guess_rejected() {
        let mut game = game(Level::Easy);
        assert!(game.handle_event(key(KeyCode::Enter)).is_none());
        assert_eq!(
            game.message,
            Some(Message::Error(String::from("Please enter a number")))
        );
        assert_eq!(game.round.attempts(), 0);
    }

    #[test]
    fn out_of_range_rejected() {
        let mut game = game(Level::Easy);
        type_guess(&mut game, 0);
        assert_eq!(
            game.message,
            Some(Message::Error(String::from(
                "Please enter a number between 1 and 10"
            )))
        );
        assert_eq!(game.round.attempts(), 0);
        assert!(game.guesses.is_empty());
    }

    #[test]
    fn wrong_then_hint_then_win() {
        let mut game = game(Level::Hard);
        let n = wrong(&game);
        type_guess(&mut game, n);
        assert_eq!(
            game.message,
            Some(Message::Info(String::from(
                "Not quite! You have 9 attempt(s) left. Press ? for a hint."
            )))
        );
        assert!(game.handle_event(key(KeyCode::Char('?'))).is_none());
        assert!(matches!(game.message, Some(Message::Hint(_))));
        let secret = game.round.secret();
        type_guess(&mut game, secret);
        assert_eq!(
            game.message,
            Some(Message::Success(String::from(
                "Congratulations! You guessed it in 2 attempt(s) using 1 hint(s)!"
            )))
        );
        assert_eq!(game.globals.stats.guess.played, 1);
        assert_eq!(game.globals.stats.guess.won, 1);
        assert_eq!(game.globals.stats.guess.best_attempts, Some(2));
        let screen = render(&game);
        assert!(screen[0].starts_with(" Number Guessing │ Hard "));
        assert!(screen[4].starts_with(&format!(" Your guesses: {n}, {secret} ")));
        assert!(screen[23].starts_with(" Play Again (r) — Back to Launcher (q)"));
    }

    #[test]
    fn lose_and_replay() {
        let mut game = game(Level::Easy);
        let n = wrong(&game);
        for _ in 0..5 {
            type_guess(&mut game, n);
        }
        let secret = game.round.secret();
        assert_eq!(
            game.message,
            Some(Message::Error(format!(
                "Game Over! You ran out of attempts. The secret number was {secret}."
            )))
        );
        assert_eq!(game.globals.stats.guess.played, 1);
        assert_eq!(game.globals.stats.guess.won, 0);
        // Typing is ignored once the round is over
        assert!(game.handle_event(key(KeyCode::Char('3'))).is_none());
        assert!(game.input.is_empty());
        assert!(game.handle_event(key(KeyCode::Char('r'))).is_none());
        assert_eq!(game.round.status(), Status::Playing);
        assert_eq!(game.round.attempts(), 0);
        assert!(game.guesses.is_empty());
        assert_eq!(game.message, None);
    }

    #[test]
    fn render_fresh_round() {
        let game = game(Level::Medium);
        let screen = render(&game);
        assert!(screen[2].starts_with(" I'm thinking of a number between 1 and 50. "));
        assert!(screen[3].starts_with(" Attempt 0/7 │ Hints left: 3 "));
        assert!(screen[6].starts_with(" Your guess: _ "));
        assert!(screen[23].starts_with(" Guess (Enter) — Hint (?) — Back (Esc)"));
    }

    #[test]
    fn esc_returns_to_launcher() {
        let mut game = game(Level::Easy);
        assert!(matches!(
            game.handle_event(key(KeyCode::Esc)),
            Some(Screen::Launcher(_))
        ));
    }
}
