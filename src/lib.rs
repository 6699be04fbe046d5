//! Keypad calculator core: turns keystrokes into a well-formed expression
//! line and evaluates it on demand.

pub mod calculator;
pub mod config;

pub use calculator::{Editor, EditorState, InputEvent};
pub use config::Config;
