use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::launcher::Launcher;
use crate::util::center_rect;
use crossterm::event::{read, Event};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect, Size},
    text::{Line, Span, Text},
    widgets::{
        block::{Block, Padding},
        Clear, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
    Frame,
};
use std::borrow::Cow;

/// A popup describing an error and its chain of causes
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Warning {
    lines: Vec<String>,
    scroll_offset: usize,
    max_scroll: usize,
}

impl Warning {
    const MAX_LINES: u16 = 16;
    const TEXT_WIDTH: u16 = 48;
    const WIDTH: u16 = Self::TEXT_WIDTH + 4;

    fn handle_command(&mut self, cmd: Command) -> Option<WarningOutcome> {
        match (cmd, self.scrolling()) {
            (Command::Enter | Command::Esc | Command::Space, _) => {
                return Some(WarningOutcome::Dismissed)
            }
            (Command::Quit, _) => return Some(WarningOutcome::Quit),
            (Command::Up, true) => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            (Command::Down, true) => {
                if self.scroll_offset < self.max_scroll.saturating_sub(1) {
                    self.scroll_offset += 1;
                }
            }
            _ => (),
        }
        None
    }

    fn scrolling(&self) -> bool {
        self.lines.len() > usize::from(Self::MAX_LINES)
    }

    /// Lay out an error message followed by its causes, outermost first
    fn from_chain(msgs: Vec<String>) -> Warning {
        let mut msgs = msgs.into_iter();
        let Some(head) = msgs.next() else {
            return Warning {
                lines: vec![String::from("An unknown error occurred.")],
                scroll_offset: 0,
                max_scroll: 0,
            };
        };
        let causes = msgs.collect::<Vec<_>>();
        let width = usize::from(Warning::TEXT_WIDTH);
        let mut lines = wrap(&head, textwrap::Options::new(width));
        match causes.as_slice() {
            [] => (),
            [cause] => {
                lines.push(String::new());
                lines.push(String::from("Caused by:"));
                lines.extend(wrap(
                    cause,
                    textwrap::Options::new(width)
                        .initial_indent("    ")
                        .subsequent_indent("    "),
                ));
            }
            _ => {
                lines.push(String::new());
                lines.push(String::from("Caused by:"));
                for (i, cause) in causes.iter().enumerate() {
                    let init_indent = format!("{i:>5}: ");
                    lines.extend(wrap(
                        cause,
                        textwrap::Options::new(width)
                            .initial_indent(&init_indent)
                            .subsequent_indent("       "),
                    ));
                }
            }
        }
        let max_scroll = lines
            .len()
            .saturating_sub(usize::from(Warning::MAX_LINES) - 1);
        Warning {
            lines,
            scroll_offset: 0,
            max_scroll,
        }
    }
}

fn wrap(text: &str, opts: textwrap::Options<'_>) -> Vec<String> {
    textwrap::wrap(text, opts.break_words(true))
        .into_iter()
        .map(Cow::into_owned)
        .collect()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum WarningOutcome {
    Dismissed,
    Quit,
}

impl<E: std::error::Error> From<E> for Warning {
    fn from(e: E) -> Warning {
        let mut msgs = vec![e.to_string()];
        let mut source = e.source();
        while let Some(src) = source {
            msgs.push(src.to_string());
            source = src.source();
        }
        Warning::from_chain(msgs)
    }
}

impl Widget for &Warning {
    // `area` is here the area of the entire display in which the program is
    // drawing, not the area for just the widget proper.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = u16::try_from(self.lines.len())
            .unwrap_or(u16::MAX)
            .min(Warning::MAX_LINES)
            .saturating_add(4);
        let block_area = center_rect(
            area,
            Size {
                width: Warning::WIDTH.saturating_add(u16::from(self.scrolling()) * 2),
                height,
            },
        );
        let block = Block::bordered()
            .title(" WARNING ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let [text_area, ok_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
            .flex(Flex::Start)
            .spacing(1)
            .areas(block.inner(block_area));
        Clear.render(block_area, buf);
        block.render(block_area, buf);
        if self.scrolling() {
            let [text_area, scrollbar_area] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Length(1)])
                    .flex(Flex::Start)
                    .spacing(1)
                    .areas(text_area);
            Text::from_iter(
                self.lines
                    .iter()
                    .skip(self.scroll_offset)
                    .take(usize::from(Warning::MAX_LINES))
                    .map(String::as_str),
            )
            .render(text_area, buf);
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .track_symbol(Some(ratatui::symbols::shade::MEDIUM));
            let mut scroll_state =
                ScrollbarState::new(self.max_scroll).position(self.scroll_offset);
            scrollbar.render(scrollbar_area, buf, &mut scroll_state);
        } else {
            Text::from_iter(self.lines.iter().map(String::as_str)).render(text_area, buf);
        }

        Line::from_iter([
            Span::raw("[OK ("),
            Span::styled("Enter", consts::KEY_STYLE),
            Span::raw(")]"),
        ])
        .centered()
        .render(ok_area, buf);
    }
}

/// A [`Warning`] shown on top of the launcher it returns to when dismissed
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct WarningScreen {
    warning: Warning,
    launcher: Launcher,
}

impl WarningScreen {
    pub(crate) fn new(warning: Warning, launcher: Launcher) -> WarningScreen {
        WarningScreen { warning, launcher }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        match self.warning.handle_command(cmd)? {
            WarningOutcome::Dismissed => Some(Screen::Launcher(self.launcher.clone())),
            WarningOutcome::Quit => Some(Screen::Quit),
        }
    }
}

impl Widget for &WarningScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        (&self.launcher).render(area, buf);
        (&self.warning).render(area, buf);
    }
}
