use std::io::{Stderr, stderr};

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use super::{RenderSink, Renderer};
use crate::game::Snapshot;
use crate::menu::CustomSize;
use crate::metrics::GameMetrics;

/// Draws to the alternate screen on stderr.
///
/// Raw mode is entered on construction and left again by
/// [`RenderSink::destroy`], or on drop if the loop bailed out early.
pub struct TerminalSink {
    terminal: Terminal<CrosstermBackend<Stderr>>,
    renderer: Renderer,
    destroyed: bool,
}

impl TerminalSink {
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        Ok(Self {
            terminal,
            renderer: Renderer::new(),
            destroyed: false,
        })
    }
}

impl RenderSink for TerminalSink {
    fn draw(&mut self, snapshot: &Snapshot, metrics: &GameMetrics) -> Result<()> {
        let renderer = &self.renderer;
        self.terminal
            .draw(|frame| renderer.render(frame, snapshot, metrics))
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn draw_menu(&mut self, custom: &CustomSize, metrics: &GameMetrics) -> Result<()> {
        let renderer = &self.renderer;
        self.terminal
            .draw(|frame| renderer.render_menu(frame, custom, metrics))
            .context("Failed to draw menu")?;
        Ok(())
    }

    fn destroy(&mut self) -> Result<()> {
        if self.destroyed {
            return Ok(());
        }
        self.destroyed = true;

        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

impl Drop for TerminalSink {
    fn drop(&mut self) {
        if let Err(err) = self.destroy() {
            log::error!("Failed to restore terminal: {:#}", err);
        }
    }
}
