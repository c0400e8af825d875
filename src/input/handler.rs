use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, Input};
use crate::menu::MenuChoice;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Input),
    NewGame(MenuChoice),
    Restart,
    ToMenu,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => Self::steer(Direction::Up),
            KeyCode::Down => Self::steer(Direction::Down),
            KeyCode::Left => Self::steer(Direction::Left),
            KeyCode::Right => Self::steer(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => Self::steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => Self::steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => Self::steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => Self::steer(Direction::Right),

            // Pause never doubles as a direction
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
                KeyAction::GameAction(Input::TogglePause)
            }

            // Menu
            KeyCode::Char('1') => KeyAction::NewGame(MenuChoice::Small),
            KeyCode::Char('2') => KeyAction::NewGame(MenuChoice::Large),
            KeyCode::Char('c') | KeyCode::Char('C') => KeyAction::NewGame(MenuChoice::Custom),

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            KeyCode::Char('m') | KeyCode::Char('M') => KeyAction::ToMenu,

            _ => KeyAction::None,
        }
    }

    fn steer(direction: Direction) -> KeyAction {
        KeyAction::GameAction(direction.into())
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyAction {
        InputHandler::new().handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(
            press(KeyCode::Up),
            KeyAction::GameAction(Input::Direction(Direction::Up))
        );
        assert_eq!(
            press(KeyCode::Down),
            KeyAction::GameAction(Input::Direction(Direction::Down))
        );
        assert_eq!(
            press(KeyCode::Left),
            KeyAction::GameAction(Input::Direction(Direction::Left))
        );
        assert_eq!(
            press(KeyCode::Right),
            KeyAction::GameAction(Input::Direction(Direction::Right))
        );
    }

    #[test]
    fn test_wasd_keys() {
        assert_eq!(
            press(KeyCode::Char('w')),
            KeyAction::GameAction(Input::Direction(Direction::Up))
        );
        assert_eq!(
            press(KeyCode::Char('a')),
            KeyAction::GameAction(Input::Direction(Direction::Left))
        );
        assert_eq!(
            press(KeyCode::Char('s')),
            KeyAction::GameAction(Input::Direction(Direction::Down))
        );
        assert_eq!(
            press(KeyCode::Char('d')),
            KeyAction::GameAction(Input::Direction(Direction::Right))
        );
    }

    #[test]
    fn test_wasd_uppercase() {
        let handler = InputHandler::new();

        let w_upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(w_upper),
            KeyAction::GameAction(Input::Direction(Direction::Up))
        );
    }

    #[test]
    fn test_pause_is_not_a_direction() {
        assert_eq!(
            press(KeyCode::Char(' ')),
            KeyAction::GameAction(Input::TogglePause)
        );
        assert_eq!(
            press(KeyCode::Char('p')),
            KeyAction::GameAction(Input::TogglePause)
        );
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(press(KeyCode::Char('1')), KeyAction::NewGame(MenuChoice::Small));
        assert_eq!(press(KeyCode::Char('2')), KeyAction::NewGame(MenuChoice::Large));
        assert_eq!(press(KeyCode::Char('c')), KeyAction::NewGame(MenuChoice::Custom));
        assert_eq!(press(KeyCode::Char('m')), KeyAction::ToMenu);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(press(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press(KeyCode::Esc), KeyAction::Quit);
    }

    #[test]
    fn test_restart_key() {
        assert_eq!(press(KeyCode::Char('r')), KeyAction::Restart);
        assert_eq!(press(KeyCode::Char('R')), KeyAction::Restart);
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(press(KeyCode::Char('x')), KeyAction::None);
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }
}
