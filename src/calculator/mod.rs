//! Calculator input line.
//!
//! This module provides functionality to:
//! - Normalize typed text between display glyphs and evaluator syntax
//! - Apply keypad events to the input line through the [`Editor`]
//! - Evaluate expressions using fasteval
//! - Record finished calculations and copy results to the clipboard

mod clipboard;
mod display;
mod editor;
mod error;
mod evaluation;
mod history;
mod syntax;

pub use clipboard::{ClipboardError, ClipboardSink, SystemClipboard};
pub use display::{FontScale, MonospaceMetrics, WidthOracle};
pub use editor::{Editor, EditorState, InputEvent};
pub use error::{EditError, EmptyBufferError, EvaluationError};
pub use evaluation::{DECIMAL_BASE, Evaluator, FastEvaluator, evaluate_display, format_result};
pub use history::{History, HistorySink};
pub use syntax::{
    CharClass, Operator, char_before, classify_char, classify_trailing_char, to_display_syntax,
    to_evaluator_syntax,
};
