//! Edit state machine for the calculator input line.
//!
//! Every keypad event is applied to the owned [`EditorState`] to completion
//! before the next one is accepted. Evaluation, history, clipboard and text
//! measurement are collaborators handed to the [`Editor`] at construction.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace, warn};

use super::clipboard::{ClipboardSink, SystemClipboard};
use super::display::{FontScale, MonospaceMetrics, WidthOracle};
use super::error::{EditError, EvaluationError};
use super::evaluation::{Evaluator, FastEvaluator, evaluate_display};
use super::history::{History, HistorySink};
use super::syntax::{
    CharClass, Operator, char_before, classify_trailing_char, to_display_syntax,
};

/// Observable state of the input line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EditorState {
    /// Expression text in display syntax.
    pub buffer: String,
    /// False right after Equals produced a result, until the next edit.
    pub continue_typing: bool,
    /// When set, the next Clear wipes the history instead of the buffer.
    pub all_clear_armed: bool,
    pub font: FontScale,
}

impl EditorState {
    pub fn new(font: FontScale) -> Self {
        Self {
            buffer: String::new(),
            continue_typing: true,
            all_clear_armed: false,
            font,
        }
    }

    /// Class of the last buffer character, `None` for an empty buffer.
    pub fn trailing_class(&self) -> Option<CharClass> {
        classify_trailing_char(&self.buffer).ok()
    }

    /// Number of `(` without a matching `)`.
    fn open_brackets(&self) -> usize {
        let opened = self.buffer.chars().filter(|&c| c == '(').count();
        let closed = self.buffer.chars().filter(|&c| c == ')').count();
        opened.saturating_sub(closed)
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(FontScale::default())
    }
}

/// A single input to the editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Digit(char),
    Point,
    Symbol(Operator),
    Bracket,
    Backspace,
    Clear,
    Equals,
    /// The buffer was replaced from outside the keypad (paste, typing into
    /// the field). `caret` is a char index into `text`.
    TextReplaced { text: String, caret: usize },
    Copy,
}

/// Owns the editor state and applies input events to it.
pub struct Editor {
    state: EditorState,
    evaluator: Box<dyn Evaluator>,
    history: Box<dyn HistorySink>,
    clipboard: Box<dyn ClipboardSink>,
    width: Box<dyn WidthOracle>,
    on_clear_state_changed: Option<Arc<dyn Fn(bool) + Send + Sync>>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(FontScale::default())
    }
}

impl Editor {
    pub fn new(font: FontScale) -> Self {
        Self {
            state: EditorState::new(font),
            evaluator: Box::new(FastEvaluator),
            history: Box::new(History::new()),
            clipboard: Box::new(SystemClipboard),
            width: Box::new(MonospaceMetrics::default()),
            on_clear_state_changed: None,
        }
    }

    pub fn with_evaluator(mut self, evaluator: impl Evaluator + 'static) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    pub fn with_history(mut self, history: impl HistorySink + 'static) -> Self {
        self.history = Box::new(history);
        self
    }

    pub fn with_clipboard(mut self, clipboard: impl ClipboardSink + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    pub fn with_width_oracle(mut self, width: impl WidthOracle + 'static) -> Self {
        self.width = Box::new(width);
        self
    }

    /// Set the callback fired whenever the meaning of the Clear key may
    /// have changed. It receives the new `all_clear_armed` value.
    pub fn set_on_clear_state_changed(&mut self, callback: impl Fn(bool) + Send + Sync + 'static) {
        self.on_clear_state_changed = Some(Arc::new(callback));
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn buffer(&self) -> &str {
        &self.state.buffer
    }

    pub fn history(&self) -> &dyn HistorySink {
        self.history.as_ref()
    }

    pub fn history_count(&self) -> usize {
        self.history.count()
    }

    /// Apply one input event.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidDigit`] for a digit event carrying a
    /// non-digit and [`EditError::Evaluation`] when Equals cannot evaluate
    /// the buffer. The state is left unchanged in both cases.
    pub fn handle(&mut self, event: InputEvent) -> Result<(), EditError> {
        trace!(?event, buffer = %self.state.buffer, "input event");

        match event {
            InputEvent::Digit(digit) => self.enter_digit(digit)?,
            InputEvent::Point => self.enter_point(),
            InputEvent::Symbol(op) => self.enter_symbol(op),
            InputEvent::Bracket => self.enter_bracket(),
            InputEvent::Backspace => self.backspace(),
            InputEvent::Clear => self.clear(),
            InputEvent::Equals => self.equals()?,
            InputEvent::TextReplaced { text, caret } => self.text_replaced(&text, caret),
            InputEvent::Copy => self.copy_result_to_clipboard(),
        }

        Ok(())
    }

    /// Append a digit, starting over after a result or a lone `0`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidDigit`] when `digit` is not `0`-`9`.
    pub fn enter_digit(&mut self, digit: char) -> Result<(), EditError> {
        if !digit.is_ascii_digit() {
            return Err(EditError::InvalidDigit(digit));
        }

        if !self.state.continue_typing || self.state.buffer == "0" {
            self.state.buffer.clear();
            self.state.continue_typing = true;
        }

        self.state.buffer.push(digit);
        self.refresh_display();
        Ok(())
    }

    /// Append a decimal point, with a leading `0` when no number precedes it.
    ///
    /// After a result the point starts a fresh `0.` instead of extending the
    /// result. A second point in the same number is not rejected.
    pub fn enter_point(&mut self) {
        if !self.state.continue_typing {
            self.state.buffer.clear();
            self.state.continue_typing = true;
        }

        if matches!(self.state.trailing_class(), None | Some(CharClass::Operator)) {
            self.state.buffer.push('0');
        }

        self.state.buffer.push('.');
        self.refresh_display();
    }

    /// Append an operator, replacing a trailing operator instead of
    /// stacking a second one.
    pub fn enter_symbol(&mut self, op: Operator) {
        match self.state.trailing_class() {
            Some(CharClass::Operator) => {
                self.state.buffer.pop();
            }
            Some(CharClass::Point | CharClass::LeftBracket) => self.state.buffer.push('0'),
            _ if op == Operator::Subtract && self.state.buffer == "0" => {
                self.state.buffer.clear();
            }
            _ => {}
        }

        // Only a minus may start the expression.
        if self.state.buffer.is_empty() && op != Operator::Subtract {
            self.state.buffer.push('0');
        }

        self.state.buffer.push(op.glyph());
        self.state.continue_typing = true;
        self.refresh_display();
    }

    /// Close the innermost open bracket when a value precedes the caret,
    /// otherwise open a new one.
    pub fn enter_bracket(&mut self) {
        if !self.state.continue_typing {
            self.state.buffer.clear();
            self.state.continue_typing = true;
        }

        if self.state.trailing_class() == Some(CharClass::Point) {
            self.state.buffer.push('0');
        }

        let after_value = matches!(
            self.state.trailing_class(),
            Some(CharClass::Digit | CharClass::RightBracket)
        );

        if after_value && self.state.open_brackets() > 0 {
            self.state.buffer.push(')');
        } else {
            if after_value {
                self.state.buffer.push(Operator::Multiply.glyph());
            }
            self.state.buffer.push('(');
        }

        self.refresh_display();
    }

    /// Remove the last character. Does nothing to an empty buffer.
    pub fn backspace(&mut self) {
        self.state.continue_typing = true;

        if self.state.buffer.pop().is_some() {
            self.refresh_display();
        }
    }

    /// Clear the buffer, or the history when the buffer was already cleared.
    pub fn clear(&mut self) {
        if self.state.all_clear_armed {
            self.history.clear_all();
            self.state.all_clear_armed = false;
        } else {
            self.state.buffer.clear();
            self.state.all_clear_armed = true;
            self.state.font.reset();
        }

        self.notify_clear_state();
    }

    /// Evaluate the buffer and replace it with the result.
    ///
    /// # Errors
    ///
    /// Returns the evaluator's error; the buffer is left unchanged.
    pub fn equals(&mut self) -> Result<(), EvaluationError> {
        let buffer = &self.state.buffer;
        if buffer.is_empty()
            || buffer == "0"
            || !self.state.continue_typing
            || matches!(
                self.state.trailing_class(),
                Some(CharClass::LeftBracket | CharClass::Point)
            )
        {
            trace!(%buffer, "nothing to evaluate");
            return Ok(());
        }

        let result = match evaluate_display(self.evaluator.as_ref(), buffer) {
            Ok(result) => to_display_syntax(&result),
            Err(e) => {
                debug!(%buffer, error = %e, "evaluation failed");
                return Err(e);
            }
        };

        if result == *buffer {
            return Ok(());
        }

        self.history.add_record(&format!("{} = {}", buffer, result));
        self.state.buffer = result;
        self.refresh_display();
        self.state.continue_typing = false;
        Ok(())
    }

    /// Re-normalize text that was changed outside the keypad.
    pub fn text_replaced(&mut self, text: &str, caret: usize) {
        self.state.buffer = to_display_syntax(text);
        self.state.font.fit(&self.state.buffer, self.width.as_ref());

        match char_before(&self.state.buffer, caret) {
            Some(CharClass::Operator) => self.state.continue_typing = true,
            Some(CharClass::Digit | CharClass::Point) if !self.state.continue_typing => {
                // Typing over a result starts a new expression.
                self.state.buffer.clear();
                self.state.continue_typing = true;
            }
            _ => {}
        }

        // Armed from the final buffer, which is empty after a discarded result.
        self.sync_clear_state();
    }

    /// Copy the value of the buffer to the clipboard. Failures are dropped.
    pub fn copy_result_to_clipboard(&mut self) {
        match evaluate_display(self.evaluator.as_ref(), &self.state.buffer) {
            Ok(result) => {
                if let Err(e) = self.clipboard.set_text(&result) {
                    warn!(error = %e, "copy to clipboard failed");
                }
            }
            Err(e) => debug!(error = %e, "nothing to copy"),
        }
    }

    /// Re-render the buffer after a keypad edit.
    fn refresh_display(&mut self) {
        self.state.buffer = to_display_syntax(&self.state.buffer);
        if self.state.font.fit(&self.state.buffer, self.width.as_ref()) {
            trace!(font_size = self.state.font.size(), "input line overflow");
        }
        self.sync_clear_state();
    }

    fn sync_clear_state(&mut self) {
        self.state.all_clear_armed = self.state.buffer.is_empty();
        self.notify_clear_state();
    }

    fn notify_clear_state(&self) {
        if let Some(callback) = &self.on_clear_state_changed {
            callback(self.state.all_clear_armed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::clipboard::ClipboardError;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct RecordingClipboard(Rc<RefCell<Vec<String>>>);

    impl ClipboardSink for RecordingClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            self.0.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    struct BrokenClipboard;

    impl ClipboardSink for BrokenClipboard {
        fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Unavailable("no display".to_string()))
        }
    }

    /// One pixel per char, `max_chars` pixels available.
    struct CharWidth {
        max_chars: u32,
    }

    impl WidthOracle for CharWidth {
        fn measure_width(&self, text: &str, _font_size: u32) -> u32 {
            text.chars().count() as u32
        }

        fn available_width(&self) -> u32 {
            self.max_chars
        }
    }

    fn new_editor() -> (Editor, RecordingClipboard) {
        let clipboard = RecordingClipboard::default();
        let editor = Editor::default()
            .with_clipboard(clipboard.clone())
            .with_width_oracle(CharWidth { max_chars: 100 });
        (editor, clipboard)
    }

    fn type_keys(editor: &mut Editor, keys: &str) {
        for key in keys.chars() {
            let event = match key {
                '0'..='9' => InputEvent::Digit(key),
                '.' => InputEvent::Point,
                '(' => InputEvent::Bracket,
                '<' => InputEvent::Backspace,
                'c' => InputEvent::Clear,
                '=' => InputEvent::Equals,
                other => InputEvent::Symbol(Operator::from_char(other).unwrap()),
            };
            let _ = editor.handle(event);
        }
    }

    #[test]
    fn test_initial_state() {
        let (editor, _) = new_editor();
        let state = editor.state();
        assert_eq!(state.buffer, "");
        assert!(state.continue_typing);
        assert!(!state.all_clear_armed);
        assert_eq!(state.font.size(), state.font.default_size());
    }

    #[test]
    fn test_digits_concatenate() {
        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "5");
        type_keys(&mut editor, "0");
        assert_eq!(editor.buffer(), "50");
        type_keys(&mut editor, "123");
        assert_eq!(editor.buffer(), "50123");
        assert!(!editor.state().all_clear_armed);
    }

    #[test]
    fn test_leading_zero_is_replaced() {
        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "007");
        assert_eq!(editor.buffer(), "7");
    }

    #[test]
    fn test_invalid_digit_rejected() {
        let (mut editor, _) = new_editor();
        assert_eq!(
            editor.handle(InputEvent::Digit('a')),
            Err(EditError::InvalidDigit('a'))
        );
        assert_eq!(editor.buffer(), "");
    }

    #[test]
    fn test_point_after_operator_gets_zero() {
        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "5+.");
        assert_eq!(editor.buffer(), "5＋0.");
    }

    #[test]
    fn test_point_on_empty_buffer_gets_zero() {
        let (mut editor, _) = new_editor();
        type_keys(&mut editor, ".5");
        assert_eq!(editor.buffer(), "0.5");
    }

    #[test]
    fn test_second_point_in_number_is_accepted() {
        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "1.2.3");
        assert_eq!(editor.buffer(), "1.2.3");
    }

    #[test]
    fn test_symbol_replaces_symbol() {
        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "5+");
        let before = editor.buffer().chars().count();
        type_keys(&mut editor, "x");
        assert_eq!(editor.buffer(), "5×");
        assert_eq!(editor.buffer().chars().count(), before);
        assert_eq!(editor.state().trailing_class(), Some(CharClass::Operator));
    }

    #[test]
    fn test_symbol_after_point_or_bracket_gets_zero() {
        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "5.+");
        assert_eq!(editor.buffer(), "5.0＋");

        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "(/");
        assert_eq!(editor.buffer(), "(0÷");
    }

    #[test]
    fn test_minus_after_zero_starts_negative_number() {
        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "0-5");
        assert_eq!(editor.buffer(), "－5");
    }

    #[test]
    fn test_symbol_on_empty_buffer() {
        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "+");
        assert_eq!(editor.buffer(), "0＋");

        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "-");
        assert_eq!(editor.buffer(), "－");
    }

    #[test]
    fn test_backspace() {
        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "12+<");
        assert_eq!(editor.buffer(), "12");
        type_keys(&mut editor, "<<");
        assert_eq!(editor.buffer(), "");
        assert!(editor.state().all_clear_armed);
    }

    #[test]
    fn test_backspace_on_empty_buffer() {
        let (mut editor, _) = new_editor();
        editor.backspace();
        assert_eq!(editor.buffer(), "");
        assert!(editor.state().continue_typing);
        assert!(!editor.state().all_clear_armed);
    }

    #[test]
    fn test_equals_records_history() {
        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "8+2=");
        assert_eq!(editor.buffer(), "10");
        assert!(!editor.state().continue_typing);
        assert_eq!(editor.history().records(), ["8＋2 = 10"]);
        assert_eq!(editor.history_count(), 1);
    }

    #[test]
    fn test_digit_after_result_starts_over() {
        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "8+2=5");
        assert_eq!(editor.buffer(), "5");
        assert!(editor.state().continue_typing);
    }

    #[test]
    fn test_symbol_after_result_continues() {
        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "8+2=x3=");
        assert_eq!(editor.buffer(), "30");
        assert_eq!(editor.history().records(), ["8＋2 = 10", "10×3 = 30"]);
    }

    #[test]
    fn test_negative_result_uses_display_glyph() {
        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "3-8=");
        assert_eq!(editor.buffer(), "－5");
        assert_eq!(editor.history().records(), ["3－8 = －5"]);
    }

    #[test]
    fn test_equals_no_op_cases() {
        let (mut editor, _) = new_editor();
        assert_eq!(editor.equals(), Ok(()));
        assert_eq!(editor.history_count(), 0);

        type_keys(&mut editor, "00=");
        assert_eq!(editor.buffer(), "0");
        assert_eq!(editor.history_count(), 0);

        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "5.=");
        assert_eq!(editor.buffer(), "5.");

        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "2x(=");
        assert_eq!(editor.buffer(), "2×(");
        assert_eq!(editor.history_count(), 0);
    }

    #[test]
    fn test_equals_twice_is_no_op() {
        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "8+2==");
        assert_eq!(editor.buffer(), "10");
        assert_eq!(editor.history_count(), 1);
    }

    #[test]
    fn test_equals_without_change_is_not_recorded() {
        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "5=");
        assert_eq!(editor.buffer(), "5");
        assert!(editor.state().continue_typing);
        assert_eq!(editor.history_count(), 0);
    }

    #[test]
    fn test_equals_error_leaves_buffer() {
        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "3+");
        let err = editor.handle(InputEvent::Equals).unwrap_err();
        assert!(matches!(err, EditError::Evaluation(_)));
        assert_eq!(editor.buffer(), "3＋");
        assert!(editor.state().continue_typing);
        assert_eq!(editor.history_count(), 0);
    }

    #[test]
    fn test_division_by_zero_is_an_error() {
        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "1/0");
        assert!(editor.equals().is_err());
        assert_eq!(editor.buffer(), "1÷0");
    }

    #[test]
    fn test_clear_twice() {
        let (mut editor, _) = new_editor();
        let notifications = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&notifications);
        editor.set_on_clear_state_changed(move |armed| sink.lock().unwrap().push(armed));

        type_keys(&mut editor, "8+2=");
        notifications.lock().unwrap().clear();

        editor.clear();
        assert_eq!(editor.buffer(), "");
        assert!(editor.state().all_clear_armed);
        assert_eq!(editor.history_count(), 1);

        editor.clear();
        assert_eq!(editor.buffer(), "");
        assert!(!editor.state().all_clear_armed);
        assert_eq!(editor.history_count(), 0);

        assert_eq!(*notifications.lock().unwrap(), [true, false]);
    }

    #[test]
    fn test_digit_notifies_clear_state() {
        let (mut editor, _) = new_editor();
        let notifications = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&notifications);
        editor.set_on_clear_state_changed(move |armed| sink.lock().unwrap().push(armed));

        type_keys(&mut editor, "1<");
        assert_eq!(*notifications.lock().unwrap(), [false, true]);
    }

    #[test]
    fn test_brackets() {
        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "(2+3(x4=");
        assert_eq!(editor.history().records(), ["(2＋3)×4 = 20"]);

        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "2(");
        assert_eq!(editor.buffer(), "2×(");

        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "((1.((");
        assert_eq!(editor.buffer(), "((1.0))");
    }

    #[test]
    fn test_bracket_after_result_starts_over() {
        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "8+2=(");
        assert_eq!(editor.buffer(), "(");
        assert!(editor.state().continue_typing);
    }

    #[test]
    fn test_text_replaced_normalizes() {
        let (mut editor, _) = new_editor();
        editor.text_replaced("2*3-（1）", 8);
        assert_eq!(editor.buffer(), "2×3－(1)");
        assert!(!editor.state().all_clear_armed);

        editor.text_replaced("", 0);
        assert!(editor.state().all_clear_armed);
    }

    #[test]
    fn test_text_replaced_over_result() {
        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "8+2=");

        editor.text_replaced("10+", 3);
        assert_eq!(editor.buffer(), "10＋");
        assert!(editor.state().continue_typing);

        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "8+2=");

        let event = InputEvent::TextReplaced {
            text: "105".to_string(),
            caret: 3,
        };
        editor.handle(event).unwrap();
        assert_eq!(editor.buffer(), "");
        assert!(editor.state().continue_typing);
        assert!(editor.state().all_clear_armed);
    }

    #[test]
    fn test_text_replaced_notifies_clear_state() {
        let (mut editor, _) = new_editor();
        let notifications = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&notifications);
        editor.set_on_clear_state_changed(move |armed| sink.lock().unwrap().push(armed));

        editor.text_replaced("5+", 2);
        assert_eq!(editor.buffer(), "5＋");
        assert!(!editor.state().all_clear_armed);

        editor.text_replaced("", 0);
        assert!(editor.state().all_clear_armed);

        assert_eq!(*notifications.lock().unwrap(), [false, true]);
    }

    #[test]
    fn test_text_replaced_point_over_result() {
        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "8+2=");
        assert!(!editor.state().continue_typing);

        editor.text_replaced("10.", 3);
        assert_eq!(editor.buffer(), "");
        assert!(editor.state().continue_typing);
        assert!(editor.state().all_clear_armed);
    }

    #[test]
    fn test_point_after_result_starts_fresh_number() {
        let (mut editor, _) = new_editor();
        type_keys(&mut editor, "8+2=.");
        assert_eq!(editor.buffer(), "0.");
        assert!(editor.state().continue_typing);
    }

    #[test]
    fn test_font_shrinks_and_resets_on_clear() {
        let mut editor = Editor::new(FontScale::new(25, 10))
            .with_clipboard(RecordingClipboard::default())
            .with_width_oracle(CharWidth { max_chars: 5 });

        type_keys(&mut editor, "1234");
        assert_eq!(editor.state().font.size(), 25);
        type_keys(&mut editor, "5");
        assert_eq!(editor.state().font.size(), 23);
        type_keys(&mut editor, "6");
        assert_eq!(editor.state().font.size(), 21);

        // No regrowth when the text gets shorter.
        editor.text_replaced("1", 1);
        assert_eq!(editor.state().font.size(), 21);

        editor.clear();
        assert_eq!(editor.state().font.size(), 25);
    }

    #[test]
    fn test_font_floor() {
        let mut editor = Editor::new(FontScale::new(12, 10))
            .with_clipboard(RecordingClipboard::default())
            .with_width_oracle(CharWidth { max_chars: 1 });

        type_keys(&mut editor, "123456");
        assert_eq!(editor.state().font.size(), 10);
    }

    #[test]
    fn test_copy_result() {
        let (mut editor, clipboard) = new_editor();
        type_keys(&mut editor, "3-8");
        editor.handle(InputEvent::Copy).unwrap();
        assert_eq!(*clipboard.0.borrow(), ["-5"]);
        assert_eq!(editor.buffer(), "3－8");
    }

    #[test]
    fn test_copy_failure_is_swallowed() {
        let (mut editor, clipboard) = new_editor();
        type_keys(&mut editor, "3+");
        editor.copy_result_to_clipboard();
        assert!(clipboard.0.borrow().is_empty());

        let mut editor = Editor::default()
            .with_clipboard(BrokenClipboard)
            .with_width_oracle(CharWidth { max_chars: 100 });
        type_keys(&mut editor, "1+1");
        assert_eq!(editor.handle(InputEvent::Copy), Ok(()));
    }

    struct FixedEvaluator(f64);

    impl Evaluator for FixedEvaluator {
        fn evaluate(&self, _expression: &str, base: u32) -> Result<f64, EvaluationError> {
            assert_eq!(base, 10);
            Ok(self.0)
        }
    }

    #[test]
    fn test_custom_evaluator() {
        let (editor, _) = new_editor();
        let mut editor = editor.with_evaluator(FixedEvaluator(2.5));
        type_keys(&mut editor, "1+1=");
        assert_eq!(editor.buffer(), "2.5");
        assert_eq!(editor.history().records(), ["1＋1 = 2.5"]);
    }

    #[test]
    fn test_custom_history_capacity() {
        let mut editor = Editor::default()
            .with_history(History::with_capacity(1))
            .with_clipboard(RecordingClipboard::default());
        type_keys(&mut editor, "1+1=+1=");
        assert_eq!(editor.history().records(), ["2＋1 = 3"]);
    }
}
