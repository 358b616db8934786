//! Compound interest: M = C·(1 + i/m)^(n·m).
//!
//! Same solving pattern as the simple module, with m compounding periods
//! per year. Fractional exponents and logarithms come from
//! `rust_decimal`'s maths support, so everything stays in `Decimal`.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FincalcError;
use crate::interest::{check_answer, consistency_warning, AnswerCheck};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Years};
use crate::FincalcResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Variable to solve for in the compound interest relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompoundVariable {
    /// C: the capital placed at interest.
    Principal,
    /// i: nominal annual rate, as a percentage.
    Rate,
    /// n: time in years.
    Time,
    /// I: interest earned, M − C.
    Interest,
    /// M: maturity amount.
    Amount,
}

/// Known variables for one compound-interest computation. Leave the unknown
/// unset. Solving for C, i or n needs either `interest` or `amount`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundInterestInput {
    pub solve_for: CompoundVariable,
    /// Compounding periods per year: 1 = annual, 12 = monthly. Always
    /// required.
    pub compounds_per_year: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<Money>,
    /// Nominal annual rate as a percentage (12 = 12%).
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
pub struct CompoundInterestOutput {
    /// Variable that was derived.
    pub variable: CompoundVariable,
    /// Derived value, in the same units the variable is supplied in.
    pub value: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_check: Option<AnswerCheck>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive the requested unknown of M = C·(1 + i/m)^(n·m).
pub fn solve_compound_interest(
    input: &CompoundInterestInput,
) -> FincalcResult<ComputationOutput<CompoundInterestOutput>> {
    let start = Instant::now();

    if input.compounds_per_year == 0 {
        return Err(FincalcError::InvalidInput {
            field: "compounds_per_year".into(),
            reason: "must be at least 1".into(),
        });
    }

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
        "Compound interest: M = C·(1 + i/m)^(n·m)",
        input,
        warnings,
        elapsed,
        CompoundInterestOutput {
            variable: input.solve_for,
            value,
            answer_check,
        },
    ))
}

// ---------------------------------------------------------------------------
// Derivations
// ---------------------------------------------------------------------------

fn derive(input: &CompoundInterestInput) -> FincalcResult<Decimal> {
    let m = Decimal::from(input.compounds_per_year);

    match input.solve_for {
        CompoundVariable::Amount => {
            let c = require(input.principal, "principal")?;
            Ok(c * growth_factor(input, m)?)
        }
        CompoundVariable::Interest => {
            let c = require(input.principal, "principal")?;
            if let Some(amount) = input.amount {
                Ok(amount - c)
            } else {
                Ok(c * growth_factor(input, m)? - c)
            }
        }
        CompoundVariable::Principal => {
            if let Some(amount) = input.amount {
                Ok(amount / growth_factor(input, m)?)
            } else if let Some(interest) = input.interest {
                let accrual = growth_factor(input, m)? - Decimal::ONE;
                if accrual.is_zero() {
                    return Err(FincalcError::DivisionByZero {
                        context: "compound principal ((1 + i/m)^(n·m) − 1)".into(),
                    });
                }
                Ok(interest / accrual)
            } else {
                Err(missing_interest_or_amount("principal"))
            }
        }
        CompoundVariable::Rate => {
            let c = require(input.principal, "principal")?;
            let n = require(input.time, "time")?;
            let ratio = growth_ratio(c, input.interest, input.amount, "rate")?;
            let exponent = n * m;
            if exponent <= Decimal::ZERO {
                return Err(FincalcError::InvalidInput {
                    field: "time".into(),
                    reason: "must be greater than zero".into(),
                });
            }
            // i = m·[(M/C)^(1/(n·m)) − 1], reported as a percentage
            let root = ratio.powd(Decimal::ONE / exponent);
            Ok(m * (root - Decimal::ONE) * dec!(100))
        }
        CompoundVariable::Time => {
            let c = require(input.principal, "principal")?;
            let i = require(input.rate, "rate")? / dec!(100);
            let ratio = growth_ratio(c, input.interest, input.amount, "time")?;
            if ratio < Decimal::ONE {
                return Err(FincalcError::FinancialImpossibility(
                    "an amount below the principal cannot be reached with a positive rate".into(),
                ));
            }
            let period_growth = Decimal::ONE + i / m;
            if period_growth <= Decimal::ZERO || period_growth == Decimal::ONE {
                return Err(FincalcError::DivisionByZero {
                    context: "compound time (ln(1 + i/m))".into(),
                });
            }
            // n = ln(M/C) / (m·ln(1 + i/m))
            Ok(ratio.ln() / (m * period_growth.ln()))
        }
    }
}

/// (1 + i/m)^(n·m) from the supplied rate and time.
fn growth_factor(input: &CompoundInterestInput, m: Decimal) -> FincalcResult<Decimal> {
    let i = require(input.rate, "rate")? / dec!(100);
    let n = require(input.time, "time")?;
    let base = Decimal::ONE + i / m;
    if base <= Decimal::ZERO {
        return Err(FincalcError::InvalidInput {
            field: "rate".into(),
            reason: "per-period rate must be greater than -100%".into(),
        });
    }
    Ok(base.powd(n * m))
}

/// M/C (or (I + C)/C), the total growth over the investment.
fn growth_ratio(
    principal: Decimal,
    interest: Option<Decimal>,
    amount: Option<Decimal>,
    unknown: &str,
) -> FincalcResult<Decimal> {
    if principal.is_zero() {
        return Err(FincalcError::DivisionByZero {
            context: format!("compound {unknown} (M/C)"),
        });
    }
    let target = if let Some(amount) = amount {
        amount
    } else if let Some(interest) = interest {
        interest + principal
    } else {
        return Err(missing_interest_or_amount(unknown));
    };

    let ratio = target / principal;
    if ratio <= Decimal::ZERO {
        return Err(FincalcError::FinancialImpossibility(format!(
            "growth ratio must be positive to solve for {unknown} (got {ratio})"
        )));
    }
    Ok(ratio)
}

fn require(value: Option<Decimal>, field: &str) -> FincalcResult<Decimal> {
    value.ok_or_else(|| FincalcError::InvalidInput {
        field: field.into(),
        reason: "required for this unknown".into(),
    })
}

fn missing_interest_or_amount(unknown: &str) -> FincalcError {
    FincalcError::InsufficientData(format!(
        "solving for {unknown} requires either interest or amount"
    ))
}
