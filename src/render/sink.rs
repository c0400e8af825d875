use anyhow::Result;

use crate::game::Snapshot;
use crate::menu::CustomSize;
use crate::metrics::GameMetrics;

/// Where frames go.
///
/// A sink only consumes state; nothing flows back into the game. The
/// driving loop calls [`RenderSink::destroy`] exactly once when it shuts
/// down, after which no more frames are drawn.
pub trait RenderSink {
    /// Redraw the board from a session snapshot
    fn draw(&mut self, snapshot: &Snapshot, metrics: &GameMetrics) -> Result<()>;

    /// Redraw the size selection screen
    fn draw_menu(&mut self, custom: &CustomSize, metrics: &GameMetrics) -> Result<()>;

    /// Tear down whatever the sink set up
    fn destroy(&mut self) -> Result<()>;
}
