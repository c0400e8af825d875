use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior, interval};

use crate::game::{GameConfig, SessionState, TickClock, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::menu::{CustomSize, Menu, MenuChoice};
use crate::metrics::GameMetrics;
use crate::render::{RenderSink, TerminalSink};

/// Interactive play in the terminal.
///
/// The loop wakes once per display frame. Each frame feeds its elapsed time
/// into a [`TickClock`], which releases at most one game tick, and then
/// redraws. While the session is not running the clock is not fed at all.
pub struct HumanMode {
    menu: Menu,
    clock: TickClock,
    frame_interval: Duration,
    metrics: GameMetrics,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, custom: CustomSize) -> Self {
        let config = config.normalized();

        Self {
            clock: TickClock::new(config.ticks_per_second),
            frame_interval: Duration::from_secs(1) / config.frame_rate,
            menu: Menu::new(config, custom),
            metrics: GameMetrics::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    /// Skip the menu and go straight to a custom-sized game
    pub fn start_custom(&mut self) {
        self.new_game(MenuChoice::Custom);
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut sink = TerminalSink::new()?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut sink).await;

        sink.destroy()?;

        result
    }

    async fn run_game_loop<S: RenderSink>(&mut self, sink: &mut S) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut frame_timer = interval(self.frame_interval);
        // A late frame is reported as one long frame, not a burst
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_frame = Instant::now();

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => log::warn!("Failed to read terminal event: {}", err),
                        None => self.should_quit = true,
                    }
                }

                // Display frame: maybe tick, then redraw
                now = frame_timer.tick() => {
                    let elapsed = now.duration_since(last_frame);
                    last_frame = now;

                    self.on_frame(elapsed);
                    self.redraw(sink)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key);
            self.apply(action);
        }
    }

    fn apply(&mut self, action: KeyAction) {
        if action == KeyAction::Quit {
            self.should_quit = true;
            return;
        }

        let Some(game) = self.menu.game_mut() else {
            if let KeyAction::NewGame(choice) = action {
                self.new_game(choice);
            }
            return;
        };

        match action {
            KeyAction::GameAction(input) => {
                let before = game.state();
                game.handle_input(input);

                // Time spent waiting or paused is not owed to the game
                if before != SessionState::Running && game.is_running() {
                    self.clock.reset();
                }
            }
            KeyAction::Restart => {
                self.menu.restart();
                self.on_game_start();
            }
            KeyAction::ToMenu => {
                self.menu.destroy_game();
            }
            KeyAction::NewGame(_) | KeyAction::Quit | KeyAction::None => {}
        }
    }

    /// Advance one display frame. Returns what the game tick did, if any ran.
    fn on_frame(&mut self, elapsed: Duration) -> TickOutcome {
        let Some(game) = self.menu.game_mut() else {
            return TickOutcome::Idle;
        };
        if !game.is_running() {
            return TickOutcome::Idle;
        }

        self.metrics.add_play_time(elapsed);
        if !self.clock.advance(elapsed) {
            return TickOutcome::Idle;
        }

        let outcome = game.tick();
        if let TickOutcome::Ended(_) = outcome {
            self.metrics.on_game_over(game.score());
        }
        outcome
    }

    fn redraw<S: RenderSink>(&self, sink: &mut S) -> Result<()> {
        match self.menu.game() {
            Some(game) => sink.draw(&game.snapshot(), &self.metrics),
            None => sink.draw_menu(self.menu.custom_size(), &self.metrics),
        }
    }

    fn new_game(&mut self, choice: MenuChoice) {
        self.menu.choose(choice);
        self.on_game_start();
    }

    fn on_game_start(&mut self) {
        self.metrics.on_game_start();
        self.clock.reset();
    }
}
