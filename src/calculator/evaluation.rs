//! Expression evaluation using fasteval.
//!
//! The editor only needs a number back for an expression, so evaluation
//! sits behind the [`Evaluator`] trait. [`FastEvaluator`] is the default
//! implementation.

use std::collections::BTreeMap;

use super::error::EvaluationError;
use super::syntax::to_evaluator_syntax;

/// Base used for every evaluation issued by the editor.
pub const DECIMAL_BASE: u32 = 10;

/// Significant digits kept when a result is formatted.
const SIGNIFICANT_DIGITS: usize = 6;

/// Evaluates expressions written in evaluator syntax.
///
/// Implementations must be deterministic and free of side effects.
pub trait Evaluator {
    /// Evaluate `expression` read as numbers in `base`.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] when the expression is malformed or
    /// has no finite value.
    fn evaluate(&self, expression: &str, base: u32) -> Result<f64, EvaluationError>;
}

/// Evaluator backed by fasteval.
///
/// Accepts more than the keypad can produce: pasted text may use fasteval's
/// functions, constants and SI suffixes (`5k+1` is `5001`).
#[derive(Clone, Copy, Debug, Default)]
pub struct FastEvaluator;

impl Evaluator for FastEvaluator {
    fn evaluate(&self, expression: &str, base: u32) -> Result<f64, EvaluationError> {
        if base != DECIMAL_BASE {
            return Err(EvaluationError::UnsupportedBase(base));
        }

        // Use an empty namespace (no custom variables)
        let mut namespace = BTreeMap::<String, f64>::new();

        let value = fasteval::ez_eval(expression, &mut namespace).map_err(|e| {
            EvaluationError::Malformed {
                expression: expression.to_string(),
                reason: format!("{:?}", e),
            }
        })?;

        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvaluationError::NotFinite {
                expression: expression.to_string(),
                value: value.to_string(),
            })
        }
    }
}

/// Evaluate text in display syntax and format the result.
///
/// # Errors
///
/// Propagates the evaluator's error.
pub fn evaluate_display(
    evaluator: &dyn Evaluator,
    display_text: &str,
) -> Result<String, EvaluationError> {
    let expression = to_evaluator_syntax(display_text);
    let value = evaluator.evaluate(&expression, DECIMAL_BASE)?;
    Ok(format_result(value))
}

/// Format a number in general notation with six significant digits.
///
/// Large and tiny magnitudes switch to scientific notation (`1e+06`),
/// trailing zeros are dropped.
pub fn format_result(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    // Rounding to the significant digits decides the exponent, so let the
    // scientific formatter do it first.
    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Drop trailing zeros (and a dangling point) from a decimal fraction.
fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
