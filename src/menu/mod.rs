//! Session factory
//!
//! The menu collects a board size, builds a [`GameSession`] for it and owns
//! that session until the player returns to the menu. Only one session is
//! alive at a time; starting a new one replaces the old by value.

use crate::game::{GameConfig, GameSession, clamp_dimension};

/// Board side length of the small preset
pub const SMALL_PRESET: usize = 16;
/// Board side length of the large preset
pub const LARGE_PRESET: usize = 32;

/// A selectable menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// 16x16 board
    Small,
    /// 32x32 board
    Large,
    /// Board size taken from the free-text custom fields
    Custom,
}

/// Free-text board size, as typed by the player
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomSize {
    pub width: String,
    pub height: String,
}

impl CustomSize {
    pub fn new(width: impl Into<String>, height: impl Into<String>) -> Self {
        Self {
            width: width.into(),
            height: height.into(),
        }
    }

    /// Board size after coercion and clamping
    pub fn resolve(&self) -> (usize, usize) {
        (
            clamp_dimension(parse_dimension(&self.width)),
            clamp_dimension(parse_dimension(&self.height)),
        )
    }
}

/// Coerce free text into a number.
///
/// Blank or non-numeric text becomes 0 and fractions are truncated, so any
/// input ends up on a playable board once clamped.
pub fn parse_dimension(text: &str) -> i64 {
    let text = text.trim();

    if let Ok(value) = text.parse::<i64>() {
        return value;
    }

    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => value.trunc() as i64,
        _ => 0,
    }
}

pub struct Menu {
    config: GameConfig,
    custom: CustomSize,
    game: Option<GameSession>,
}

impl Menu {
    pub fn new(config: GameConfig, custom: CustomSize) -> Self {
        Self {
            config,
            custom,
            game: None,
        }
    }

    /// The menu is shown whenever no session is alive
    pub fn is_visible(&self) -> bool {
        self.game.is_none()
    }

    pub fn custom_size(&self) -> &CustomSize {
        &self.custom
    }

    pub fn game(&self) -> Option<&GameSession> {
        self.game.as_ref()
    }

    pub fn game_mut(&mut self) -> Option<&mut GameSession> {
        self.game.as_mut()
    }

    /// Start a session for a menu entry
    pub fn choose(&mut self, choice: MenuChoice) -> &mut GameSession {
        let (width, height) = match choice {
            MenuChoice::Small => (SMALL_PRESET, SMALL_PRESET),
            MenuChoice::Large => (LARGE_PRESET, LARGE_PRESET),
            MenuChoice::Custom => self.custom.resolve(),
        };
        self.create_game(width, height)
    }

    /// Replace any live session with a fresh one of the given size
    pub fn create_game(&mut self, width: usize, height: usize) -> &mut GameSession {
        let config = self.config.with_size(width, height);
        log::info!(
            "Starting {}x{} game at {} ticks/s",
            config.grid_width,
            config.grid_height,
            config.ticks_per_second
        );

        self.config = config;
        self.game.insert(GameSession::new(&self.config))
    }

    /// Start over on the same board size as the current session
    pub fn restart(&mut self) -> Option<&mut GameSession> {
        let (width, height) = {
            let grid = self.game.as_ref()?.grid();
            (grid.width(), grid.height())
        };
        Some(self.create_game(width, height))
    }

    /// Drop the live session and show the menu again
    pub fn destroy_game(&mut self) -> Option<GameSession> {
        let game = self.game.take();
        if let Some(game) = &game {
            log::info!("Closed session with score {}", game.score());
        }
        game
    }

    /// Settings used for the most recent session
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, MAX_GRID_SIZE, MIN_GRID_SIZE, SessionState};

    fn menu() -> Menu {
        Menu::new(GameConfig::default(), CustomSize::new("12", "20"))
    }

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension("42"), 42);
        assert_eq!(parse_dimension("  7 "), 7);
        assert_eq!(parse_dimension("-5"), -5);
        assert_eq!(parse_dimension("12.9"), 12);
        assert_eq!(parse_dimension(""), 0);
        assert_eq!(parse_dimension("abc"), 0);
        assert_eq!(parse_dimension("NaN"), 0);
        assert_eq!(parse_dimension("inf"), 0);
    }

    #[test]
    fn test_malformed_custom_size_degrades_to_minimum() {
        assert_eq!(
            CustomSize::new("", "banana").resolve(),
            (MIN_GRID_SIZE, MIN_GRID_SIZE)
        );
        assert_eq!(CustomSize::new("9", "99999").resolve(), (9, MAX_GRID_SIZE));
    }

    #[test]
    fn test_menu_starts_idle() {
        let menu = menu();
        assert!(menu.is_visible());
        assert!(menu.game().is_none());
    }

    #[test]
    fn test_presets() {
        let mut menu = menu();

        let game = menu.choose(MenuChoice::Small);
        assert_eq!(game.grid().width(), SMALL_PRESET);
        assert_eq!(game.state(), SessionState::AwaitingStart);

        let game = menu.choose(MenuChoice::Large);
        assert_eq!((game.grid().width(), game.grid().height()), (32, 32));
        assert!(!menu.is_visible());
    }

    #[test]
    fn test_custom_game() {
        let mut menu = menu();
        let game = menu.choose(MenuChoice::Custom);
        assert_eq!((game.grid().width(), game.grid().height()), (12, 20));
    }

    #[test]
    fn test_new_game_replaces_old() {
        let mut menu = menu();
        menu.choose(MenuChoice::Small).set_direction(Direction::Up);
        assert!(menu.game().unwrap().is_running());

        menu.choose(MenuChoice::Small);
        assert_eq!(menu.game().unwrap().state(), SessionState::AwaitingStart);
    }

    #[test]
    fn test_restart_keeps_size() {
        let mut menu = menu();
        assert!(menu.restart().is_none());

        menu.create_game(7, 9).set_direction(Direction::Down);
        let game = menu.restart().unwrap();
        assert_eq!((game.grid().width(), game.grid().height()), (7, 9));
        assert_eq!(game.state(), SessionState::AwaitingStart);
    }

    #[test]
    fn test_destroy_game_returns_to_menu() {
        let mut menu = menu();
        menu.choose(MenuChoice::Small);

        assert!(menu.destroy_game().is_some());
        assert!(menu.is_visible());
        assert!(menu.destroy_game().is_none());
    }

    #[test]
    fn test_tick_rate_carries_into_sessions() {
        let config = GameConfig {
            ticks_per_second: 5,
            ..Default::default()
        };
        let mut menu = Menu::new(config, CustomSize::default());
        menu.choose(MenuChoice::Large);
        assert_eq!(menu.config().ticks_per_second, 5);
        assert_eq!(menu.config().grid_width, 32);
    }
}
