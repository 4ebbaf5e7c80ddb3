use ratatui::{
    prelude::*,
    style::{Style, Stylize},
    widgets::*,
};

use crate::game::{Arena, GameEvent, Player, Pos};

pub const P1_COLOR: Color = Color::Green;
pub const P1_HEAD_COLOR: Color = Color::LightGreen;
pub const P2_COLOR: Color = Color::Blue;
pub const P2_HEAD_COLOR: Color = Color::LightBlue;

const FOOD_SYMBOL: &str = "●";
const POWER_UP_SYMBOL: &str = "★";

/// Terminal columns per grid cell, so the board looks square.
const CELL_WIDTH: u16 = 2;

pub fn snek_colors(player: Player) -> (Color, Color) {
    match player {
        Player::One => (P1_COLOR, P1_HEAD_COLOR),
        Player::Two => (P2_COLOR, P2_HEAD_COLOR),
    }
}

pub fn score_line(arena: &Arena) -> String {
    format!(
        "P1 Score: {:02}    P2 Score: {:02}",
        arena.score(Player::One),
        arena.score(Player::Two)
    )
}

/// One-line summary of an event for the status bar.
pub fn describe(event: &GameEvent) -> String {
    match event {
        GameEvent::Ate(player) => format!("{player} ate"),
        GameEvent::PoweredUp(player) => format!("{player} grabbed the power-up!"),
        GameEvent::PowerUpShown(_) => "A power-up appeared".to_string(),
        GameEvent::PowerUpExpired => "The power-up vanished".to_string(),
        GameEvent::Crashed { winner, cause } => {
            format!("{} {}", winner.opponent(), cause)
        }
    }
}

/// The playing field without its frame.
pub struct Board<'a>(pub &'a Arena);

impl Board<'_> {
    pub fn size(arena: &Arena) -> (u16, u16) {
        let cells = arena.grid().cell_count.max(0) as u16;
        (cells * CELL_WIDTH, cells)
    }
}

fn paint(area: Rect, buf: &mut Buffer, pos: Pos, symbol: &str, style: Style) {
    if pos.x < 0 || pos.y < 0 {
        return;
    }
    let x = area.x + pos.x as u16 * CELL_WIDTH;
    let y = area.y + pos.y as u16;
    if x + CELL_WIDTH > area.right() || y >= area.bottom() {
        return;
    }

    buf[(x, y)].set_symbol(symbol).set_style(style);
    for column in 1..CELL_WIDTH {
        buf[(x + column, y)].set_symbol(" ").set_style(style);
    }
}

impl Widget for Board<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let arena = self.0;
        let grid = arena.grid();

        for player in Player::BOTH {
            let (body_color, head_color) = snek_colors(player);
            let snek = arena.snek(player);
            for pos in snek.body().iter().skip(1) {
                if grid.contains(*pos) {
                    paint(area, buf, *pos, " ", Style::default().bg(body_color));
                }
            }
            // A head that left the grid is not drawn
            if grid.contains(snek.head()) {
                paint(area, buf, snek.head(), " ", Style::default().bg(head_color));
            }
        }

        paint(
            area,
            buf,
            arena.food(),
            FOOD_SYMBOL,
            Style::default().fg(Color::LightRed),
        );

        if let Some(pos) = arena.power_up() {
            paint(
                area,
                buf,
                pos,
                POWER_UP_SYMBOL,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        }
    }
}

pub fn render(frame: &mut Frame, arena: &Arena, status: &str) {
    let (board_width, board_height) = Board::size(arena);

    let layout = Layout::default()
        .direction(layout::Direction::Vertical)
        .constraints([
            Constraint::Length(1),                // Title
            Constraint::Length(board_height + 2), // Board + border
            Constraint::Length(1),                // Scores
            Constraint::Length(1),                // Status
            Constraint::Min(0),
        ])
        .split(frame.area());

    frame.render_widget(Paragraph::new("2-Player Snake").bold(), layout[0]);

    let board_area = Rect {
        width: (board_width + 2).min(layout[1].width),
        ..layout[1]
    };
    let block = Block::default().borders(Borders::ALL);
    let inner_area = block.inner(board_area);
    frame.render_widget(block, board_area);

    if let Some(message) = arena.winner_message() {
        let text = Text::from(vec![
            Line::from(message).bold(),
            Line::from(""),
            Line::from("Press SPACE to Restart"),
        ]);
        let top = inner_area.y + inner_area.height.saturating_sub(3) / 2;
        let message_area = Rect {
            y: top,
            height: inner_area.bottom().saturating_sub(top),
            ..inner_area
        };
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Red)),
            message_area,
        );
    } else {
        frame.render_widget(Board(arena), inner_area);
    }

    frame.render_widget(Paragraph::new(score_line(arena)), layout[2]);
    frame.render_widget(
        Paragraph::new(status.to_string()).style(Style::default().fg(Color::DarkGray)),
        layout[3],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Crash, Rules};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Instant;

    fn arena() -> Arena {
        Arena::new(Rules::default(), StdRng::seed_from_u64(9), Instant::now()).unwrap()
    }

    fn cell_at(buf: &Buffer, x: u16, y: u16) -> &ratatui::buffer::Cell {
        &buf[(x, y)]
    }

    #[test]
    fn test_score_line_pads_to_two_digits() {
        assert_eq!(score_line(&arena()), "P1 Score: 00    P2 Score: 00");
    }

    #[test]
    fn test_board_size() {
        assert_eq!(Board::size(&arena()), (50, 25));
    }

    #[test]
    fn test_board_paints_sneks_and_food() {
        let arena = arena();
        let area = Rect::new(0, 0, 50, 25);
        let mut buf = Buffer::empty(area);

        Board(&arena).render(area, &mut buf);

        // Player one's head at (6, 9) covers columns 12 and 13
        assert_eq!(cell_at(&buf, 12, 9).bg, P1_HEAD_COLOR);
        assert_eq!(cell_at(&buf, 13, 9).bg, P1_HEAD_COLOR);
        assert_eq!(cell_at(&buf, 10, 9).bg, P1_COLOR);
        // Player two's head at (18, 9)
        assert_eq!(cell_at(&buf, 36, 9).bg, P2_HEAD_COLOR);
        assert_eq!(cell_at(&buf, 40, 9).bg, P2_COLOR);

        let food = arena.food();
        let cell = cell_at(&buf, food.x as u16 * 2, food.y as u16);
        assert_eq!(cell.symbol(), FOOD_SYMBOL);
    }

    #[test]
    fn test_paint_clips_to_area() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);

        paint(area, &mut buf, Pos::new(5, 5), "x", Style::default());
        paint(area, &mut buf, Pos::NOWHERE, "x", Style::default());
        paint(area, &mut buf, Pos::new(1, 1), "x", Style::default());

        assert_eq!(cell_at(&buf, 2, 1).symbol(), "x");
        assert_eq!(cell_at(&buf, 0, 0).symbol(), " ");
    }

    #[test]
    fn test_describe_events() {
        assert_eq!(describe(&GameEvent::Ate(Player::One)), "Player 1 ate");
        assert_eq!(
            describe(&GameEvent::Crashed {
                winner: Player::One,
                cause: Crash::OutOfBounds
            }),
            "Player 2 left the arena"
        );
    }
}
