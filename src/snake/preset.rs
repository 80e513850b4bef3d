use enum_map::Enum;
use ratatui::layout::Size;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Named snake difficulty: grid size, tick period, and reward per target
#[derive(Clone, Copy, Debug, Default, Deserialize, Enum, Eq, Hash, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SnakePreset {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl SnakePreset {
    pub(crate) fn grid(self) -> Size {
        match self {
            SnakePreset::Easy => Size {
                width: 24,
                height: 12,
            },
            SnakePreset::Normal => Size {
                width: 40,
                height: 16,
            },
            SnakePreset::Hard => Size {
                width: 60,
                height: 19,
            },
        }
    }

    /// Time between movements of the snake
    pub(crate) fn tick_period(self) -> Duration {
        match self {
            SnakePreset::Easy => Duration::from_millis(150),
            SnakePreset::Normal => Duration::from_millis(100),
            SnakePreset::Hard => Duration::from_millis(70),
        }
    }

    /// Points awarded for each target eaten
    pub(crate) fn reward(self) -> u32 {
        match self {
            SnakePreset::Easy => 5,
            SnakePreset::Normal => 10,
            SnakePreset::Hard => 20,
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            SnakePreset::Easy => "Easy",
            SnakePreset::Normal => "Normal",
            SnakePreset::Hard => "Hard",
        }
    }
}

impl fmt::Display for SnakePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts;
    use crate::util::EnumExt;

    #[test]
    fn grids_fit_display() {
        // One row for the score bar, two for messages, two for the border
        for preset in SnakePreset::iter() {
            let grid = preset.grid();
            assert!(grid.width + 2 <= consts::DISPLAY_SIZE.width, "{preset}");
            assert!(grid.height + 5 <= consts::DISPLAY_SIZE.height, "{preset}");
        }
    }

    #[test]
    fn harder_is_faster_and_richer() {
        let presets = SnakePreset::iter().collect::<Vec<_>>();
        for pair in presets.windows(2) {
            assert!(pair[0].tick_period() > pair[1].tick_period());
            assert!(pair[0].reward() < pair[1].reward());
        }
    }

    #[test]
    fn fmt_width() {
        assert_eq!(format!("{:6}", SnakePreset::Hard), "Hard  ");
    }

    #[test]
    fn deserialize_lowercase() {
        #[derive(Debug, Deserialize)]
        struct Wrapper {
            preset: SnakePreset,
        }
        let w: Wrapper = toml::from_str(r#"preset = "hard""#).unwrap();
        assert_eq!(w.preset, SnakePreset::Hard);
    }
}
