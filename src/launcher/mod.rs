mod widgets;
use self::widgets::{Footer, Logo};
use crate::app::{Globals, Screen};
use crate::command::Command;
use crate::consts;
use crate::guess::GuessGame;
use crate::options::{Adjustable, OptKey, OptValue, Options};
use crate::snake::SnakeGame;
use crate::stats::{SessionStats, StatsScreen};
use crate::tictactoe::TicTacToe;
use crate::util::{get_display_area, EnumExt};
use crate::warning::{Warning, WarningScreen};
use crossterm::event::{read, Event};
use enum_map::{Enum, EnumMap};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
    Frame,
};
use std::fmt;

/// The numbered menu from which every game is started
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Launcher {
    selection: Selection,
    options: OptionsMenu,
    status: Option<&'static str>,
    stats: SessionStats,
}

impl Launcher {
    const INVALID_CHOICE: &'static str = "Invalid choice! Please enter 1-5.";

    pub(crate) fn new(globals: Globals) -> Launcher {
        Launcher {
            selection: Selection::default(),
            options: OptionsMenu::new(globals.options),
            status: None,
            stats: globals.stats,
        }
    }

    /// The options and statistics to hand to the next screen
    pub(crate) fn globals(&self) -> Globals {
        Globals {
            options: self.options.to_options(),
            stats: self.stats.clone(),
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        self.status = None;
        match (self.selection, cmd) {
            (_, Command::Quit | Command::Q) => return Some(self.activate(Entry::Quit)),
            (_, Command::Digit(d)) => {
                if let Some(entry) = Entry::from_digit(d) {
                    return Some(self.activate(entry));
                }
                log::debug!("Rejected launcher choice {d}");
                self.status = Some(Self::INVALID_CHOICE);
            }
            (_, Command::Home) => self.select(Selection::first()),
            (_, Command::End) => self.select(Selection::last()),
            (sel, Command::Up) => {
                if let Some(s) = sel.prev() {
                    self.select(s);
                }
            }
            (sel, Command::Down) => {
                if let Some(s) = sel.next() {
                    self.select(s);
                }
            }
            (sel, Command::Prev) => self.select(sel.prev().unwrap_or_else(Selection::last)),
            (sel, Command::Next) => self.select(sel.next().unwrap_or_else(Selection::first)),
            (Selection::Setting(key), Command::Left) => self.options.settings[key].decrease(),
            (Selection::Setting(key), Command::Right) => self.options.settings[key].increase(),
            (Selection::Entry(entry), Command::Enter | Command::Space) => {
                return Some(self.activate(entry));
            }
            _ => (),
        }
        None
    }

    fn activate(&self, entry: Entry) -> Screen {
        let globals = self.globals();
        log::info!("Launcher: {}", entry.name());
        match entry {
            Entry::Snake => match SnakeGame::new(globals) {
                Ok(game) => Screen::Snake(game),
                Err(e) => {
                    log::error!("Could not start Snake: {e}");
                    Screen::Warning(WarningScreen::new(Warning::from(e), self.clone()))
                }
            },
            Entry::TicTacToe => Screen::TicTacToe(TicTacToe::new(globals)),
            Entry::NumberGuess => Screen::Guess(GuessGame::new(globals)),
            Entry::Statistics => Screen::Stats(StatsScreen::new(globals)),
            Entry::Quit => Screen::Quit,
        }
    }

    fn select(&mut self, selection: Selection) {
        self.selection = selection;
        self.options.selection = match selection {
            Selection::Setting(key) => Some(key),
            Selection::Entry(_) => None,
        };
    }
}

impl Widget for &Launcher {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [logo_area, entries_area, options_area, status_area, _, footer_area] =
            Layout::vertical([
                Constraint::Length(Logo::HEIGHT),
                Constraint::Length(ENTRY_COUNT),
                Constraint::Length(OptionsMenu::HEIGHT),
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(1),
            ])
            .spacing(1)
            .areas(display);

        let [logo_area] = Layout::horizontal([Logo::WIDTH])
            .flex(Flex::Center)
            .areas(logo_area);
        Logo.render(logo_area, buf);

        let [entries_area] = Layout::horizontal([Entry::LINE_WIDTH])
            .flex(Flex::Center)
            .areas(entries_area);
        for (entry, row) in Entry::iter().zip(entries_area.rows()) {
            let selected = self.selection == Selection::Entry(entry);
            let style = if selected {
                consts::MENU_SELECTION_STYLE
            } else {
                Style::new()
            };
            Line::from_iter([
                Span::styled(if selected { "» " } else { "  " }, style),
                Span::styled(entry.number().to_string(), consts::KEY_STYLE.patch(style)),
                Span::styled(format!(". {entry}"), style),
            ])
            .render(row, buf);
        }

        let [options_area] = Layout::horizontal([OptionsMenu::WIDTH])
            .flex(Flex::Center)
            .areas(options_area);
        (&self.options).render(options_area, buf);

        if let Some(msg) = self.status {
            Line::styled(msg, consts::ERROR_STYLE)
                .centered()
                .render(status_area, buf);
        }

        Footer.render(footer_area, buf);
    }
}

#[allow(clippy::cast_possible_truncation)]
const ENTRY_COUNT: u16 = Entry::LENGTH as u16;

#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
enum Entry {
    Snake,
    TicTacToe,
    NumberGuess,
    Statistics,
    Quit,
}

impl Entry {
    const NAME_WIDTH: usize = 16;
    const LINE_WIDTH: u16 = 49;

    /// Look up the entry chosen by pressing digit `d`
    fn from_digit(d: u8) -> Option<Entry> {
        let i = usize::from(d).checked_sub(1)?;
        (i < Entry::LENGTH).then(|| Entry::from_usize(i))
    }

    fn number(self) -> usize {
        self.into_usize() + 1
    }

    fn name(self) -> &'static str {
        match self {
            Entry::Snake => "Snake",
            Entry::TicTacToe => "Tic-Tac-Toe",
            Entry::NumberGuess => "Number Guessing",
            Entry::Statistics => "Statistics",
            Entry::Quit => "Quit",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Entry::Snake => "Classic arcade game",
            Entry::TicTacToe => "Two-player strategy game",
            Entry::NumberGuess => "Interactive guessing game",
            Entry::Statistics => "View your game history",
            Entry::Quit => "Quit the program",
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{name:width$} - {desc}",
            name = self.name(),
            width = Entry::NAME_WIDTH,
            desc = self.description()
        )
    }
}

/// The highlighted launcher row: a menu entry or an options-box setting
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Selection {
    Entry(Entry),
    Setting(OptKey),
}

impl Selection {
    fn first() -> Selection {
        Selection::Entry(Entry::min())
    }

    fn last() -> Selection {
        Selection::Setting(OptKey::max())
    }

    fn next(self) -> Option<Selection> {
        match self {
            Selection::Entry(e) => Some(
                e.next()
                    .map_or_else(|| Selection::Setting(OptKey::min()), Selection::Entry),
            ),
            Selection::Setting(key) => key.next().map(Selection::Setting),
        }
    }

    fn prev(self) -> Option<Selection> {
        match self {
            Selection::Entry(e) => e.prev().map(Selection::Entry),
            Selection::Setting(key) => Some(
                key.prev()
                    .map_or_else(|| Selection::Entry(Entry::max()), Selection::Setting),
            ),
        }
    }
}

impl Default for Selection {
    fn default() -> Selection {
        Selection::first()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct OptionsMenu {
    /// `Some(key)` when the launcher's selection is the setting for `key`
    selection: Option<OptKey>,
    settings: EnumMap<OptKey, OptValue>,
}

impl OptionsMenu {
    #[allow(clippy::cast_possible_truncation)]
    const HEIGHT: u16 = (OptKey::LENGTH as u16) + 2 /* for border */;
    const HORIZONTAL_PADDING: u16 = 1; // padding on each side
    const POINTER_WIDTH: u16 = 2;
    const LABEL_VALUE_GUTTER: u16 = 2;
    const WIDTH: u16 = 2 /* for border */ + 2 * Self::HORIZONTAL_PADDING + Self::POINTER_WIDTH + OptKey::DISPLAY_WIDTH + Self::LABEL_VALUE_GUTTER + OptValue::DISPLAY_WIDTH;

    fn new(options: Options) -> Self {
        let settings = EnumMap::from_iter(OptKey::iter().map(|key| (key, options.get(key))));
        OptionsMenu {
            selection: None,
            settings,
        }
    }

    fn to_options(&self) -> Options {
        let mut opts = Options::default();
        for key in OptKey::iter() {
            opts.set(key, self.settings[key]);
        }
        opts
    }
}

impl Widget for &OptionsMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Options: ")
            .padding(Padding::horizontal(OptionsMenu::HORIZONTAL_PADDING));
        let menu_area = block.inner(area);
        block.render(area, buf);
        for ((key, value), row) in OptKey::iter()
            .map(|key| (key, self.settings[key]))
            .zip(menu_area.rows())
        {
            let selected = Some(key) == self.selection;
            let style = if selected {
                consts::MENU_SELECTION_STYLE
            } else {
                Style::new()
            };
            let s = format!(
                "{pointer:pwidth$}{key:lwidth$}{space:gutter$}{value}",
                pointer = if selected { "»" } else { "" },
                pwidth = usize::from(OptionsMenu::POINTER_WIDTH),
                lwidth = usize::from(OptKey::DISPLAY_WIDTH),
                space = "",
                gutter = usize::from(OptionsMenu::LABEL_VALUE_GUTTER),
            );
            Span::styled(s, style).render(row, buf);
        }
    }
}
