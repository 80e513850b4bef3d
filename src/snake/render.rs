use super::direction::Direction;
use super::preset::SnakePreset;
use super::state::{Phase, SnakeState};
use crate::consts;
use crate::util::{center_rect, get_display_area};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};
use std::fmt;
use std::time::Duration;

/// Draws a Snake session: score bar, bordered grid, and status messages
#[derive(Clone, Copy, Debug)]
pub(crate) struct SnakeView<'a> {
    pub(crate) state: &'a SnakeState,
    pub(crate) preset: SnakePreset,
    /// Time played so far in this session
    pub(crate) elapsed: Duration,
}

impl Widget for SnakeView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, block_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(
            format!(
                " Score: {} │ Time: {} │ {}",
                self.state.score(),
                Clock(self.elapsed),
                self.preset
            ),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let grid = self.state.grid();
        let block_size = Size {
            width: grid.width.saturating_add(2),
            height: grid.height.saturating_add(2),
        };
        let block_area = center_rect(block_area, block_size);
        Block::bordered().render(block_area, buf);

        let mut canvas = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        for &p in self.state.body().iter().skip(1) {
            canvas.draw_cell(p, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        canvas.draw_cell(
            self.state.target(),
            consts::TARGET_SYMBOL,
            consts::TARGET_STYLE,
        );
        // Head last, so it sits on top of the target.  After a collision the
        // head has not moved, and its cell gets the collision glyph.
        if self.state.collision().is_some() {
            canvas.draw_cell(
                self.state.head(),
                consts::COLLISION_SYMBOL,
                consts::COLLISION_STYLE,
            );
        } else {
            canvas.draw_cell(
                self.state.head(),
                head_symbol(self.state.heading()),
                consts::SNAKE_HEAD_STYLE,
            );
        }

        match self.state.phase() {
            Phase::Running => {
                Line::from_iter([
                    Span::raw(" Move (arrows/wasd) — Pause ("),
                    Span::styled("p", consts::KEY_STYLE),
                    Span::raw(") — Back ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg2_area, buf);
            }
            Phase::Paused => {
                let popup = center_rect(
                    display,
                    Size {
                        width: PausedBox::WIDTH,
                        height: PausedBox::HEIGHT,
                    },
                );
                PausedBox.render(popup, buf);
            }
            Phase::Terminal => {
                Line::from(format!(
                    " — GAME OVER — Final score: {}",
                    self.state.score()
                ))
                .render(msg1_area, buf);
                Line::from_iter([
                    Span::raw(" Play Again ("),
                    Span::styled("r", consts::KEY_STYLE),
                    Span::raw(") — Back to Launcher ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg2_area, buf);
            }
        }
    }
}

fn head_symbol(direction: Direction) -> char {
    match direction {
        Direction::North => consts::SNAKE_HEAD_NORTH_SYMBOL,
        Direction::South => consts::SNAKE_HEAD_SOUTH_SYMBOL,
        Direction::East => consts::SNAKE_HEAD_EAST_SYMBOL,
        Direction::West => consts::SNAKE_HEAD_WEST_SYMBOL,
    }
}

/// Formats a duration as `MM:SS`, with minutes running past 59 as needed
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Clock(Duration);

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0.as_secs();
        write!(f, "{:02}:{:02}", secs / 60, secs % 60)
    }
}

/// Grid-relative drawing onto a buffer
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        if pos.x >= self.area.width || pos.y >= self.area.height {
            return;
        }
        let Some(x) = self.area.x.checked_add(pos.x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct PausedBox;

impl PausedBox {
    const HEIGHT: u16 = 4;
    const WIDTH: u16 = 22;
}

impl Widget for PausedBox {
    /*
     * ┌────── PAUSED ──────┐
     * │ Resume (p / Space) │
     * │ Back to Menu (q)   │
     * └────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" PAUSED ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        let lines = [
            Line::from_iter([
                Span::raw("Resume ("),
                Span::styled("p", consts::KEY_STYLE),
                Span::raw(" / "),
                Span::styled("Space", consts::KEY_STYLE),
                Span::raw(")"),
            ]),
            Line::from_iter([
                Span::raw("Back to Menu ("),
                Span::styled("q", consts::KEY_STYLE),
                Span::raw(")"),
            ]),
        ];
        for (line, row) in lines.into_iter().zip(inner.rows()) {
            line.render(row, buf);
        }
    }
}
