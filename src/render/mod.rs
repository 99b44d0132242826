pub mod geometry;
pub mod panel;
pub mod terminal;

pub use geometry::BarGeometry;
pub use panel::{BarRenderer, FrameSink};
pub use terminal::{TerminalSession, warn_if_clipped};
