use super::level::Level;
use rand::Rng;
use thiserror::Error;

/// One round of the number guessing game
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Round {
    level: Level,
    secret: u32,
    attempts: u32,
    hints_used: u32,

    /// The most recent wrong guess, if a hint may still be given for it
    hintable: Option<u32>,

    status: Status,
}

impl Round {
    pub(crate) fn new<R: Rng + ?Sized>(level: Level, rng: &mut R) -> Round {
        Round {
            level,
            secret: rng.random_range(level.range()),
            attempts: 0,
            hints_used: 0,
            hintable: None,
            status: Status::Playing,
        }
    }

    /// Submit a guess.  A guess outside the level's range, or a guess made
    /// after the round has ended, is rejected without using up an attempt.
    pub(crate) fn guess(&mut self, n: u32) -> Result<Verdict, GuessError> {
        if self.status != Status::Playing {
            return Err(GuessError::RoundOver);
        }
        let range = self.level.range();
        if !range.contains(&n) {
            return Err(GuessError::OutOfRange {
                min: *range.start(),
                max: *range.end(),
            });
        }
        self.attempts += 1;
        if n == self.secret {
            self.status = Status::Won;
            self.hintable = None;
            Ok(Verdict::Correct)
        } else if self.attempts >= self.level.max_attempts() {
            self.status = Status::Lost;
            self.hintable = None;
            Ok(Verdict::Lost)
        } else {
            self.hintable = Some(n);
            Ok(Verdict::Wrong {
                attempts_left: self.attempts_left(),
            })
        }
    }

    /// Ask for a hint about the most recent wrong guess.  At most one hint
    /// is given per wrong guess.
    pub(crate) fn hint(&mut self) -> Result<&'static str, HintError> {
        if self.status != Status::Playing {
            return Err(HintError::RoundOver);
        }
        if self.hints_left() == 0 {
            return Err(HintError::NoneLeft);
        }
        let Some(guess) = self.hintable.take() else {
            return Err(HintError::NothingToHint);
        };
        self.hints_used += 1;
        Ok(hint_text(self.secret, guess))
    }

    pub(crate) fn hint_available(&self) -> bool {
        self.status == Status::Playing && self.hints_left() > 0 && self.hintable.is_some()
    }

    pub(crate) fn level(&self) -> Level {
        self.level
    }

    pub(crate) fn secret(&self) -> u32 {
        self.secret
    }

    /// Number of attempts used so far
    pub(crate) fn attempts(&self) -> u32 {
        self.attempts
    }

    pub(crate) fn attempts_left(&self) -> u32 {
        self.level.max_attempts().saturating_sub(self.attempts)
    }

    pub(crate) fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub(crate) fn hints_left(&self) -> u32 {
        self.level.max_hints().saturating_sub(self.hints_used)
    }

    pub(crate) fn status(&self) -> Status {
        self.status
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Status {
    Playing,
    Won,
    Lost,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Verdict {
    Correct,
    Wrong { attempts_left: u32 },
    /// The guess was wrong and it was the last attempt
    Lost,
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum GuessError {
    #[error("Please enter a number")]
    NotANumber,
    #[error("Please enter a number between {min} and {max}")]
    OutOfRange { min: u32, max: u32 },
    #[error("This round is over")]
    RoundOver,
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum HintError {
    #[error("You have no hints left!")]
    NoneLeft,
    #[error("Make a guess first, then ask for a hint")]
    NothingToHint,
    #[error("This round is over")]
    RoundOver,
}

/// Describe how far `guess` is from `secret` without giving it away
pub(crate) fn hint_text(secret: u32, guess: u32) -> &'static str {
    let distance = secret.abs_diff(guess);
    if guess < secret {
        match distance {
            0..=5 => "Very close! Try a bit higher.",
            6..=15 => "Getting warmer! Go higher.",
            _ => "Too low! Try a much higher number.",
        }
    } else {
        match distance {
            0..=5 => "Very close! Try a bit lower.",
            6..=15 => "Getting warmer! Go lower.",
            _ => "Too high! Try a much lower number.",
        }
    }
}
