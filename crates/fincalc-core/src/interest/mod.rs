//! Simple and compound interest solvers.
//!
//! Each solver takes the known variables of its interest relation, derives
//! the requested unknown algebraically, and can grade a submitted answer
//! against the derived value.

pub mod compound;
pub mod simple;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Relative tolerance applied when grading a submitted answer (1%).
const ANSWER_TOLERANCE: Decimal = dec!(0.01);

/// Supplied amounts are expected to satisfy M = C + I within this band
/// before a consistency warning is raised.
const CONSISTENCY_EPSILON: Decimal = dec!(0.01);

/// Result of grading a submitted answer against the derived value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerCheck {
    /// Value the solver derived.
    pub expected: Decimal,
    /// Value that was submitted.
    pub submitted: Decimal,
    /// Absolute tolerance applied (1% of the derived value).
    pub tolerance: Decimal,
    pub correct: bool,
}

/// Grade a submitted answer, accepting anything within 1% of the derived
/// value.
pub fn check_answer(expected: Decimal, submitted: Decimal) -> AnswerCheck {
    let tolerance = (expected * ANSWER_TOLERANCE).abs();
    AnswerCheck {
        expected,
        submitted,
        tolerance,
        correct: (submitted - expected).abs() <= tolerance,
    }
}

/// Warn when principal, interest and amount are all supplied but do not
/// satisfy M = C + I.
fn consistency_warning(
    principal: Option<Decimal>,
    interest: Option<Decimal>,
    amount: Option<Decimal>,
) -> Option<String> {
    let (c, i, m) = (principal?, interest?, amount?);
    if (m - (c + i)).abs() > CONSISTENCY_EPSILON {
        Some(format!(
            "Amount ({m}) differs from principal + interest ({})",
            c + i
        ))
    } else {
        None
    }
}
