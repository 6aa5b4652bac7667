//! Terminal stand-ins for the editor surfaces

pub mod prompt;
pub mod sink;

pub use prompt::TerminalHost;
pub use sink::TerminalSink;
