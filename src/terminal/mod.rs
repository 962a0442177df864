//! Terminal module: Presenting software surfaces in a truecolor terminal.

mod output;
mod presenter;

pub use output::OutputBuffer;
pub use presenter::{quit_requested, Presenter, TerminalConfig};
