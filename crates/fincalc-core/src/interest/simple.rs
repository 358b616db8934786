//! Simple interest: I = C·i·n and M = C·(1 + i·n).
//!
//! The unknown is picked by `solve_for`; every other variable it needs must
//! be supplied. Rates are percentages on the way in and the way out
//! (12 = 12%), time is in years.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FincalcError;
use crate::interest::{check_answer, consistency_warning, AnswerCheck};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate, Years};
use crate::FincalcResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Variable to solve for in the simple interest relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimpleVariable {
    /// C: the capital placed at interest.
    Principal,
    /// i: annual rate, as a percentage.
    Rate,
    /// n: time in years.
    Time,
    /// I: interest earned.
    Interest,
    /// M: maturity amount, C + I.
    Amount,
}

/// Known variables for one simple-interest computation. Leave the unknown
/// unset. Solving for C, i or n needs either `interest` or `amount`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleInterestInput {
    pub solve_for: SimpleVariable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<Money>,
    /// Annual rate as a percentage (12 = 12%).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<Percent>,
    /// Time in years.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<Years>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    /// Answer to grade against the derived value, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_answer: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleInterestOutput {
    /// Variable that was derived.
    pub variable: SimpleVariable,
    /// Derived value, in the same units the variable is supplied in.
    pub value: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_check: Option<AnswerCheck>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive the requested unknown of I = C·i·n.
pub fn solve_simple_interest(
    input: &SimpleInterestInput,
) -> FincalcResult<ComputationOutput<SimpleInterestOutput>> {
    let start = Instant::now();

    let mut warnings: Vec<String> = Vec::new();
    if let Some(warning) = consistency_warning(input.principal, input.interest, input.amount) {
        warnings.push(warning);
    }

    let value = derive(input)?;
    let answer_check = input
        .submitted_answer
        .map(|submitted| check_answer(value, submitted));

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Simple interest: I = C·i·n",
        input,
        warnings,
        elapsed,
        SimpleInterestOutput {
            variable: input.solve_for,
            value,
            answer_check,
        },
    ))
}

// ---------------------------------------------------------------------------
// Derivations
// ---------------------------------------------------------------------------

fn derive(input: &SimpleInterestInput) -> FincalcResult<Decimal> {
    match input.solve_for {
        SimpleVariable::Interest => {
            let c = require(input.principal, "principal")?;
            let i = rate_fraction(input)?;
            let n = require(input.time, "time")?;
            Ok(c * i * n)
        }
        SimpleVariable::Amount => {
            let c = require(input.principal, "principal")?;
            let i = rate_fraction(input)?;
            let n = require(input.time, "time")?;
            Ok(c * (Decimal::ONE + i * n))
        }
        SimpleVariable::Principal => {
            let i = rate_fraction(input)?;
            let n = require(input.time, "time")?;
            if let Some(interest) = input.interest {
                let growth = i * n;
                if growth.is_zero() {
                    return Err(FincalcError::DivisionByZero {
                        context: "simple interest principal (i·n)".into(),
                    });
                }
                Ok(interest / growth)
            } else if let Some(amount) = input.amount {
                // 1 + i·n >= 1 for non-negative inputs
                Ok(amount / (Decimal::ONE + i * n))
            } else {
                Err(missing_interest_or_amount("principal"))
            }
        }
        SimpleVariable::Rate => {
            let c = require(input.principal, "principal")?;
            let n = require(input.time, "time")?;
            let base = c * n;
            if base.is_zero() {
                return Err(FincalcError::DivisionByZero {
                    context: "simple interest rate (C·n)".into(),
                });
            }
            if let Some(interest) = input.interest {
                Ok(interest / base * dec!(100))
            } else if let Some(amount) = input.amount {
                Ok((amount - c) / base * dec!(100))
            } else {
                Err(missing_interest_or_amount("rate"))
            }
        }
        SimpleVariable::Time => {
            let c = require(input.principal, "principal")?;
            let i = rate_fraction(input)?;
            let base = c * i;
            if base.is_zero() {
                return Err(FincalcError::DivisionByZero {
                    context: "simple interest time (C·i)".into(),
                });
            }
            if let Some(interest) = input.interest {
                Ok(interest / base)
            } else if let Some(amount) = input.amount {
                Ok((amount - c) / base)
            } else {
                Err(missing_interest_or_amount("time"))
            }
        }
    }
}

fn require(value: Option<Decimal>, field: &str) -> FincalcResult<Decimal> {
    value.ok_or_else(|| FincalcError::InvalidInput {
        field: field.into(),
        reason: "required for this unknown".into(),
    })
}

fn rate_fraction(input: &SimpleInterestInput) -> FincalcResult<Rate> {
    Ok(require(input.rate, "rate")? / dec!(100))
}

fn missing_interest_or_amount(unknown: &str) -> FincalcError {
    FincalcError::InsufficientData(format!(
        "solving for {unknown} requires either interest or amount"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_input(solve_for: SimpleVariable) -> SimpleInterestInput {
        SimpleInterestInput {
            solve_for,
            principal: Some(dec!(1000)),
            rate: Some(dec!(12)),
            time: Some(dec!(2)),
            interest: None,
            amount: None,
            submitted_answer: None,
        }
    }

    #[test]
    fn test_solve_interest() {
        // I = 1000 * 0.12 * 2 = 240
        let result = solve_simple_interest(&base_input(SimpleVariable::Interest)).unwrap();
        assert_eq!(result.result.value, dec!(240));
    }

    #[test]
    fn test_solve_amount() {
        // M = 1000 * (1 + 0.24) = 1240
        let result = solve_simple_interest(&base_input(SimpleVariable::Amount)).unwrap();
        assert_eq!(result.result.value, dec!(1240));
    }

    #[test]
    fn test_solve_rate_from_amount() {
        let mut input = base_input(SimpleVariable::Rate);
        input.rate = None;
        input.amount = Some(dec!(1240));
        let result = solve_simple_interest(&input).unwrap();
        assert_eq!(result.result.value, dec!(12));
    }

    #[test]
    fn test_rate_needs_interest_or_amount() {
        let mut input = base_input(SimpleVariable::Rate);
        input.rate = None;
        let err = solve_simple_interest(&input).unwrap_err();
        assert!(matches!(err, FincalcError::InsufficientData(_)));
    }

    #[test]
    fn test_principal_zero_rate_division() {
        let mut input = base_input(SimpleVariable::Principal);
        input.principal = None;
        input.rate = Some(Decimal::ZERO);
        input.interest = Some(dec!(240));
        let err = solve_simple_interest(&input).unwrap_err();
        assert!(matches!(err, FincalcError::DivisionByZero { .. }));
    }
}
