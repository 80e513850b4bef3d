use crate::guess::Level;
use crate::snake::SnakePreset;
use crate::util::EnumExt;
use enum_dispatch::enum_dispatch;
use enum_map::Enum;
use serde::Deserialize;
use std::fmt;

/// Settings chosen in the launcher's options box
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct Options {
    pub(crate) snake: SnakePreset,
    pub(crate) guess: Level,
}

impl Options {
    pub(crate) fn get(&self, key: OptKey) -> OptValue {
        match key {
            OptKey::Snake => self.snake.into(),
            OptKey::Guessing => self.guess.into(),
        }
    }

    pub(crate) fn set(&mut self, key: OptKey, value: OptValue) {
        match key {
            OptKey::Snake => {
                self.snake = value
                    .try_into()
                    .expect("Options::set(Snake, value) called with non-SnakePreset value");
            }
            OptKey::Guessing => {
                self.guess = value
                    .try_into()
                    .expect("Options::set(Guessing, value) called with non-Level value");
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum OptKey {
    Snake,
    Guessing,
}

impl OptKey {
    pub(crate) const DISPLAY_WIDTH: u16 = 8;

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            OptKey::Snake => "Snake",
            OptKey::Guessing => "Guessing",
        }
    }
}

impl fmt::Display for OptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[enum_dispatch]
pub(crate) trait Adjustable {
    fn increase(&mut self);
    fn decrease(&mut self);
    fn can_increase(&self) -> bool;
    fn can_decrease(&self) -> bool;
}

#[enum_dispatch(Adjustable)] // This also gives us From and TryInto
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum OptValue {
    SnakePreset,
    Level,
}

impl OptValue {
    pub(crate) const DISPLAY_WIDTH: u16 = 10;
}

// This is needed for EnumMap to be convenient to construct.
impl Default for OptValue {
    fn default() -> OptValue {
        OptValue::SnakePreset(SnakePreset::default())
    }
}

impl fmt::Display for OptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OptValue::SnakePreset(p) => p.as_str(),
            OptValue::Level(lv) => lv.as_str(),
        };
        write!(
            f,
            "{left} {name:^6} {right}",
            left = if self.can_decrease() { '◀' } else { '◁' },
            right = if self.can_increase() { '▶' } else { '▷' }
        )
    }
}

impl Adjustable for SnakePreset {
    fn increase(&mut self) {
        if let Some(p) = self.next() {
            *self = p;
        }
    }

    fn decrease(&mut self) {
        if let Some(p) = self.prev() {
            *self = p;
        }
    }

    fn can_increase(&self) -> bool {
        self.next().is_some()
    }

    fn can_decrease(&self) -> bool {
        self.prev().is_some()
    }
}

impl Adjustable for Level {
    fn increase(&mut self) {
        if let Some(lv) = self.next() {
            *self = lv;
        }
    }

    fn decrease(&mut self) {
        if let Some(lv) = self.prev() {
            *self = lv;
        }
    }

    fn can_increase(&self) -> bool {
        self.next().is_some()
    }

    fn can_decrease(&self) -> bool {
        self.prev().is_some()
    }
}
