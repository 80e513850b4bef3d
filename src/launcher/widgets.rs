use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::Widget,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Logo;

impl Logo {
    const GAME_WIDTH: u16 = 28;
    const BOX_WIDTH: u16 = 17;
    const TEXT_HEIGHT: u16 = 5;
    pub(super) const HEIGHT: u16 = Self::TEXT_HEIGHT + 2;
    pub(super) const WIDTH: u16 = Self::GAME_WIDTH + Self::BOX_WIDTH;
    const TAGLINE: &'static str = "A collection of terminal mini-games";

    #[rustfmt::skip]
    const GAME: [&'static str; Self::TEXT_HEIGHT as usize] = [
         "  ____                      ",
         " / ___| __ _ _ __ ___   ___ ",
        r"| |  _ / _` | '_ ` _ \ / _ \",
         "| |_| | (_| | | | | | |  __/",
        r" \____|\__,_|_| |_| |_|\___|",
    ];

    #[rustfmt::skip]
    const BOX: [&'static str; Self::TEXT_HEIGHT as usize] = [
         " ____            ",
         "| __ )  _____  __",
        r"|  _ \ / _ \ \/ /",
         "| |_) | (_) >  < ",
        r"|____/ \___/_/\_\",
    ];
}

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([Self::WIDTH])
            .flex(Flex::Start)
            .areas(area);
        let [words_area, tagline_area] = Layout::vertical([Self::TEXT_HEIGHT, 1])
            .flex(Flex::Start)
            .spacing(1)
            .areas(area);
        let [game_area, box_area] = Layout::horizontal([Self::GAME_WIDTH, Self::BOX_WIDTH])
            .flex(Flex::Start)
            .areas(words_area);
        Text::from_iter(Self::GAME)
            .style(consts::LOGO_STYLE)
            .render(game_area, buf);
        Text::from_iter(Self::BOX)
            .style(consts::TARGET_STYLE)
            .render(box_area, buf);
        Line::from(Self::TAGLINE).centered().render(tagline_area, buf);
    }
}

/// Key hints along the bottom of the launcher
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Footer;

impl Widget for Footer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Line::from_iter([
            Span::styled("↑/↓", consts::KEY_STYLE),
            Span::raw(" Select — "),
            Span::styled("←/→", consts::KEY_STYLE),
            Span::raw(" Adjust — "),
            Span::styled("Enter", consts::KEY_STYLE),
            Span::raw(" Start — "),
            Span::styled("1", consts::KEY_STYLE),
            Span::raw("-"),
            Span::styled("5", consts::KEY_STYLE),
            Span::raw(" Choose — "),
            Span::styled("q", consts::KEY_STYLE),
            Span::raw(" Quit"),
        ])
        .centered()
        .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod logo {
        use super::*;

        #[test]
        fn test_render() {
            let mut buffer = Buffer::empty(Rect::new(0, 0, 50, 8));
            Logo.render(Rect::new(3, 1, Logo::WIDTH, Logo::HEIGHT), &mut buffer);
            #[rustfmt::skip]
            let mut expected = Buffer::with_lines([
                 "",
                 "     ____                       ____              ",
                 "    / ___| __ _ _ __ ___   ___ | __ )  _____  __  ",
                r"   | |  _ / _` | '_ ` _ \ / _ \|  _ \ / _ \ \/ /  ",
                 "   | |_| | (_| | | | | | |  __/| |_) | (_) >  <   ",
                r"    \____|\__,_|_| |_| |_|\___||____/ \___/_/\_\  ",
                 "",
                 "        A collection of terminal mini-games       ",
            ]);
            expected.set_style(Rect::new(3, 1, 28, 5), consts::LOGO_STYLE);
            expected.set_style(Rect::new(31, 1, 17, 5), consts::TARGET_STYLE);
            pretty_assertions::assert_eq!(buffer, expected);
        }

        #[test]
        fn game_width() {
            assert!(Logo::GAME
                .iter()
                .all(|ln| ln.len() == usize::from(Logo::GAME_WIDTH)));
        }

        #[test]
        fn box_width() {
            assert!(Logo::BOX
                .iter()
                .all(|ln| ln.len() == usize::from(Logo::BOX_WIDTH)));
        }
    }
}
