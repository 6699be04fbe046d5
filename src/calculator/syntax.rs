//! Conversion between display syntax and evaluator syntax.
//!
//! The buffer shown to the user holds full-width operator glyphs
//! (`＋ － × ÷`) while the evaluator only understands ASCII operators.
//! Brackets and the decimal point are ASCII on both sides; their
//! full-width variants are folded to ASCII when text is normalized.

use lazy_static::lazy_static;
use regex::Regex;

use super::error::EmptyBufferError;

lazy_static! {
    /// Characters typed as a multiplication sign.
    static ref MULTIPLY_ALIASES: Regex = Regex::new(r"[xX*]").unwrap();
}

/// One of the four binary operators on the keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Glyph used in display syntax.
    pub fn glyph(self) -> char {
        match self {
            Self::Add => '＋',
            Self::Subtract => '－',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }

    /// ASCII character used in evaluator syntax.
    pub fn ascii(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Parse an operator from its glyph, its ASCII form or a typed alias.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' | '＋' => Some(Self::Add),
            '-' | '－' => Some(Self::Subtract),
            '*' | 'x' | 'X' | '×' => Some(Self::Multiply),
            '/' | '÷' => Some(Self::Divide),
            _ => None,
        }
    }
}

/// Class of a single character in evaluator syntax.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharClass {
    Digit,
    Operator,
    Point,
    LeftBracket,
    RightBracket,
    Other,
}

/// Replace display glyphs and typed multiply aliases with their ASCII
/// counterparts.
pub fn to_evaluator_syntax(text: &str) -> String {
    MULTIPLY_ALIASES
        .replace_all(text, "*")
        .chars()
        .map(|c| match c {
            '＋' => '+',
            '－' => '-',
            '×' => '*',
            '÷' => '/',
            '（' => '(',
            '）' => ')',
            '。' => '.',
            other => other,
        })
        .collect()
}

/// Render text in display syntax.
///
/// Accepts raw typed text as well as text that is already in display
/// syntax, so applying it twice gives the same result as applying it once.
pub fn to_display_syntax(text: &str) -> String {
    MULTIPLY_ALIASES
        .replace_all(text, "×")
        .chars()
        .map(|c| match c {
            '+' => '＋',
            '-' => '－',
            '/' => '÷',
            '（' => '(',
            '）' => ')',
            '。' => '.',
            other => other,
        })
        .collect()
}

/// Classify a character in evaluator syntax.
pub fn classify_char(c: char) -> CharClass {
    match c {
        '0'..='9' => CharClass::Digit,
        '+' | '-' | '*' | '/' => CharClass::Operator,
        '.' => CharClass::Point,
        '(' => CharClass::LeftBracket,
        ')' => CharClass::RightBracket,
        _ => CharClass::Other,
    }
}

/// Classify the last character of `text`.
///
/// # Errors
///
/// Returns [`EmptyBufferError`] when `text` is empty.
pub fn classify_trailing_char(text: &str) -> Result<CharClass, EmptyBufferError> {
    to_evaluator_syntax(text)
        .chars()
        .next_back()
        .map(classify_char)
        .ok_or(EmptyBufferError)
}

/// Classify the character just before `caret` (a char index into `text`).
///
/// Returns `None` when the caret is at the start or beyond the end.
pub fn char_before(text: &str, caret: usize) -> Option<CharClass> {
    let index = caret.checked_sub(1)?;
    to_evaluator_syntax(text)
        .chars()
        .nth(index)
        .map(classify_char)
}
