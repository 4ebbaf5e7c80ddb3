use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::{Direction, Player};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(Player, Direction),
    Restart,
    Quit,
    /// Keys that mean nothing to the game.
    Ignore,
}

/// Arrow keys drive player one, WASD drives player two.
pub fn map_key(key: KeyEvent) -> Command {
    if key.kind != KeyEventKind::Press {
        return Command::Ignore;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Command::Quit;
    }

    match key.code {
        KeyCode::Up => Command::Steer(Player::One, Direction::North),
        KeyCode::Down => Command::Steer(Player::One, Direction::South),
        KeyCode::Left => Command::Steer(Player::One, Direction::West),
        KeyCode::Right => Command::Steer(Player::One, Direction::East),

        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Command::Steer(Player::Two, Direction::North),
            's' => Command::Steer(Player::Two, Direction::South),
            'a' => Command::Steer(Player::Two, Direction::West),
            'd' => Command::Steer(Player::Two, Direction::East),
            ' ' => Command::Restart,
            'q' => Command::Quit,
            _ => Command::Ignore,
        },
        KeyCode::Esc => Command::Quit,

        _ => Command::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys_steer_player_one() {
        assert_eq!(
            map_key(press(KeyCode::Up)),
            Command::Steer(Player::One, Direction::North)
        );
        assert_eq!(
            map_key(press(KeyCode::Down)),
            Command::Steer(Player::One, Direction::South)
        );
        assert_eq!(
            map_key(press(KeyCode::Left)),
            Command::Steer(Player::One, Direction::West)
        );
        assert_eq!(
            map_key(press(KeyCode::Right)),
            Command::Steer(Player::One, Direction::East)
        );
    }

    #[test]
    fn test_wasd_steers_player_two() {
        assert_eq!(
            map_key(press(KeyCode::Char('w'))),
            Command::Steer(Player::Two, Direction::North)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('S'))),
            Command::Steer(Player::Two, Direction::South)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('a'))),
            Command::Steer(Player::Two, Direction::West)
        );
        assert_eq!(
            map_key(press(KeyCode::Char('D'))),
            Command::Steer(Player::Two, Direction::East)
        );
    }

    #[test]
    fn test_controls() {
        assert_eq!(map_key(press(KeyCode::Char(' '))), Command::Restart);
        assert_eq!(map_key(press(KeyCode::Char('q'))), Command::Quit);
        assert_eq!(map_key(press(KeyCode::Esc)), Command::Quit);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Command::Quit
        );
        assert_eq!(map_key(press(KeyCode::Char('x'))), Command::Ignore);
        assert_eq!(map_key(press(KeyCode::Enter)), Command::Ignore);
    }

    #[test]
    fn test_releases_are_ignored() {
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Up,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(map_key(release), Command::Ignore);
    }
}
