pub mod renderer;
pub mod sink;
pub mod terminal;

pub use renderer::Renderer;
pub use sink::RenderSink;
pub use terminal::TerminalSink;
