use std::collections::HashSet;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{EndReason, Position, SessionState, Snapshot};
use crate::menu::{CustomSize, LARGE_PRESET, SMALL_PRESET};
use crate::metrics::GameMetrics;

/// Each cell is drawn two columns wide so the board looks square
const CELL_WIDTH: u16 = 2;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(snapshot, metrics);
        frame.render_widget(stats, chunks[0]);

        let game_area = chunks[1];
        match snapshot.state {
            SessionState::Over(reason) => {
                let game_over = self.render_game_over(snapshot, reason, metrics);
                frame.render_widget(game_over, game_area);
            }
            _ => {
                let grid = self.render_grid(game_area, snapshot);
                frame.render_widget(grid, game_area);
            }
        }

        let controls = self.render_controls(snapshot.state);
        frame.render_widget(controls, chunks[2]);
    }

    pub fn render_menu(&self, frame: &mut Frame, custom: &CustomSize, metrics: &GameMetrics) {
        let (custom_width, custom_height) = custom.resolve();
        let option = |key: &'static str, label: String| {
            Line::from(vec![
                Span::styled(
                    key,
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(label, Style::default().fg(Color::White)),
            ])
        };

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            option("1", format!("{0}x{0} board", SMALL_PRESET)),
            option("2", format!("{0}x{0} board", LARGE_PRESET)),
            option("C", format!("Custom {}x{} board", custom_width, custom_height)),
            Line::from(""),
            option("Q", "Quit".to_string()),
        ];

        if metrics.games_played > 0 {
            text.push(Line::from(""));
            text.push(Line::from(vec![
                Span::styled("High score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.high_score.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]));
        }

        let menu = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title(" Menu "),
        );
        frame.render_widget(menu, frame.area());
    }

    fn render_grid(&self, area: Rect, snapshot: &Snapshot) -> Paragraph<'_> {
        let body: HashSet<Position> = snapshot.snake.iter().copied().collect();
        let head = snapshot.head();

        // Large boards scroll to keep the head in view
        let visible_cols = (area.width.saturating_sub(2) / CELL_WIDTH) as usize;
        let visible_rows = area.height.saturating_sub(2) as usize;
        let anchor = head.unwrap_or(Position::new(0, 0));
        let (x0, cols) = viewport(anchor.x, visible_cols, snapshot.grid_width);
        let (y0, rows) = viewport(anchor.y, visible_rows, snapshot.grid_height);

        let mut lines = Vec::with_capacity(rows);
        for y in y0..y0 + rows {
            let mut spans = Vec::with_capacity(cols);

            for x in x0..x0 + cols {
                let pos = Position::new(x as i32, y as i32);

                let cell = if Some(pos) == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if body.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if Some(pos) == snapshot.apple {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let title = match snapshot.state {
            SessionState::Paused => " Snake (paused) ",
            _ => " Snake ",
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ];

        match snapshot.state {
            SessionState::AwaitingStart => {
                spans.push(Span::raw("    "));
                spans.push(Span::styled(
                    "Choose a direction to start",
                    Style::default().fg(Color::Cyan),
                ));
            }
            SessionState::Paused => {
                spans.push(Span::raw("    "));
                spans.push(Span::styled(
                    "PAUSED",
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            _ => {}
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_game_over(
        &self,
        snapshot: &Snapshot,
        reason: EndReason,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
        let (headline, colour) = match reason {
            EndReason::BoardFilled => ("YOU WIN", Color::Green),
            EndReason::Collision(_) => ("GAME OVER", Color::Red),
        };
        let final_score = snapshot.final_score().unwrap_or(snapshot.score);

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                headline,
                Style::default().fg(colour).add_modifier(Modifier::BOLD),
            )]),
            Line::from(vec![Span::styled(
                format!("The snake {}", reason),
                Style::default().fg(Color::Gray),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    final_score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Games played: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.games_played.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart, ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "M",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" for the menu or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colour)),
        )
    }

    fn render_controls(&self, state: SessionState) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
        ];
        if !matches!(state, SessionState::Over(_)) {
            spans.push(Span::styled("Space", Style::default().fg(Color::Magenta)));
            spans.push(Span::raw(" to pause | "));
        }
        spans.push(Span::styled("Q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" to quit"));

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// First visible index and count along one axis, centred on `focus` and
/// clamped to the board.
fn viewport(focus: i32, visible: usize, size: usize) -> (usize, usize) {
    if visible >= size {
        return (0, size);
    }

    let focus = focus.clamp(0, size as i32 - 1) as usize;
    let start = focus.saturating_sub(visible / 2).min(size - visible);
    (start, visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CollisionType, GameConfig, GameSession};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_viewport() {
        assert_eq!(viewport(3, 40, 16), (0, 16));
        assert_eq!(viewport(50, 20, 100), (40, 20));
        assert_eq!(viewport(2, 20, 100), (0, 20));
        assert_eq!(viewport(99, 20, 100), (80, 20));
        assert_eq!(viewport(-1, 20, 100), (0, 20));
    }

    #[test]
    fn test_renders_board() {
        let session = GameSession::new(&GameConfig::new(8, 8));
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();

        terminal
            .draw(|frame| Renderer::new().render(frame, &session.snapshot(), &GameMetrics::new()))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Snake"));
        assert!(text.contains("■"));
        assert!(text.contains("Choose a direction"));
    }

    #[test]
    fn test_renders_game_over() {
        let mut snapshot = GameSession::new(&GameConfig::new(8, 8)).snapshot();
        snapshot.score = 7;
        snapshot.state = SessionState::Over(EndReason::Collision(CollisionType::Wall));
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();

        terminal
            .draw(|frame| Renderer::new().render(frame, &snapshot, &GameMetrics::new()))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Final Score: 7"));
    }

    #[test]
    fn test_renders_menu() {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let custom = CustomSize::new("x", "10");

        terminal
            .draw(|frame| Renderer::new().render_menu(frame, &custom, &GameMetrics::new()))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("16x16 board"));
        assert!(text.contains("Custom 4x10 board"));
    }
}
